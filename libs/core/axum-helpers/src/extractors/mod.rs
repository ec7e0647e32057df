//! Custom extractors that reject with [`AppError`](crate::AppError) so every
//! failure uses the same `{"errors": ...}` envelope.
pub mod current_user;
pub mod json_body;
pub mod path_param;
pub mod query_params;

pub use current_user::CurrentUser;
pub use json_body::JsonBody;
pub use path_param::PathParam;
pub use query_params::QueryParams;

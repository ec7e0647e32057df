//! Declarative input rules for each product operation.
//!
//! A [`RuleSet`] is a static table of [`FieldRule`]s. [`validate`] checks a
//! raw JSON value against it and returns the normalized object: numeric
//! strings coerced, defaults filled, `null` optionals dropped. Every violated
//! field is reported, not only the first.

use serde_json::{Map, Number, Value};
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Largest integer a JSON number carries without precision loss (2^53 - 1)
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Non-empty string of at most `max` characters
    Text { max: usize },
    /// Any finite number in the safe range
    Number,
    /// Whole number within `min..=max`
    Integer { min: i64, max: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Filled in when the field is absent
    pub default: Option<i64>,
}

impl FieldRule {
    const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
        }
    }

    const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: None,
        }
    }

    const fn defaulted(name: &'static str, kind: FieldKind, default: i64) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: Some(default),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RuleSet {
    pub fields: &'static [FieldRule],
}

const NAME: FieldKind = FieldKind::Text { max: 100 };
const DESCRIPTION: FieldKind = FieldKind::Text { max: 100 };
const CATEGORY: FieldKind = FieldKind::Text { max: 100 };
const IMAGE_URL: FieldKind = FieldKind::Text { max: 1000 };
const STOCK: FieldKind = FieldKind::Integer {
    min: i32::MIN as i64,
    max: i32::MAX as i64,
};
const MIN_ID: i64 = 1;
const POSITIVE_ID: FieldKind = FieldKind::Integer {
    min: MIN_ID,
    max: i64::MAX,
};

pub const CREATE: RuleSet = RuleSet {
    fields: &[
        FieldRule::required("name", NAME),
        FieldRule::required("price", FieldKind::Number),
        FieldRule::required("stock", STOCK),
        FieldRule::optional("description", DESCRIPTION),
        FieldRule::required("category", CATEGORY),
        FieldRule::required("imageUrl", IMAGE_URL),
    ],
};

pub const UPDATE: RuleSet = RuleSet {
    fields: &[
        FieldRule::required("id", POSITIVE_ID),
        FieldRule::required("name", NAME),
        FieldRule::required("price", FieldKind::Number),
        FieldRule::required("stock", STOCK),
        FieldRule::optional("description", DESCRIPTION),
        FieldRule::required("category", CATEGORY),
        FieldRule::required("imageUrl", IMAGE_URL),
    ],
};

pub const SEARCH: RuleSet = RuleSet {
    fields: &[
        FieldRule::defaulted("page", FieldKind::Integer { min: 1, max: i64::MAX }, 1),
        FieldRule::defaulted("size", FieldKind::Integer { min: 1, max: 100 }, 10),
        FieldRule::optional("name", NAME),
        FieldRule::optional("price", FieldKind::Number),
        FieldRule::optional("stock", STOCK),
        FieldRule::optional("description", DESCRIPTION),
        FieldRule::optional("category", CATEGORY),
        FieldRule::optional("imageUrl", IMAGE_URL),
    ],
};

/// Rule for the bare product identifier of get/remove
pub const PRODUCT_ID: FieldRule = FieldRule::required("id", POSITIVE_ID);

fn field_error(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(message))
}

/// Check `input` against `rules` and return the normalized object.
pub fn validate(rules: &RuleSet, input: &Value) -> Result<Map<String, Value>, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let Some(object) = input.as_object() else {
        errors.add(
            "value",
            field_error("object", "\"value\" must be of type object".to_string()),
        );
        return Err(errors);
    };

    let mut normalized = Map::new();

    for rule in rules.fields {
        match check_field(rule, object.get(rule.name)) {
            Ok(Some(value)) => {
                normalized.insert(rule.name.to_string(), value);
            }
            Ok(None) => {}
            Err(err) => errors.add(rule.name, err),
        }
    }

    for key in object.keys() {
        if !rules.fields.iter().any(|rule| rule.name == key) {
            add_owned(
                &mut errors,
                key.clone(),
                field_error("unknown", format!("\"{key}\" is not allowed")),
            );
        }
    }

    if errors.is_empty() {
        Ok(normalized)
    } else {
        Err(errors)
    }
}

/// Check a bare identifier (path parameter or JSON number).
pub fn validate_id(input: &Value) -> Result<i64, ValidationErrors> {
    let name = PRODUCT_ID.name;
    let checked = match input {
        Value::Null => Err(field_error("required", format!("\"{name}\" is required"))),
        value => check_integer(name, value, MIN_ID, i64::MAX),
    };
    checked.map_err(|err| single(name, err))
}

fn single(field: &'static str, error: ValidationError) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    errors
}

/// Record an error under a key that only exists at runtime.
fn add_owned(errors: &mut ValidationErrors, field: String, error: ValidationError) {
    if let ValidationErrorsKind::Field(list) = errors
        .errors_mut()
        .entry(Cow::Owned(field))
        .or_insert_with(|| ValidationErrorsKind::Field(Vec::new()))
    {
        list.push(error);
    }
}

/// `Ok(None)` means absent and allowed to be.
fn check_field(rule: &FieldRule, value: Option<&Value>) -> Result<Option<Value>, ValidationError> {
    let name = rule.name;

    let value = match value {
        None | Some(Value::Null) => {
            if rule.required {
                return Err(field_error("required", format!("\"{name}\" is required")));
            }
            return Ok(rule.default.map(Value::from));
        }
        Some(value) => value,
    };

    match rule.kind {
        FieldKind::Text { max } => {
            let Value::String(text) = value else {
                return Err(field_error("string", format!("\"{name}\" must be a string")));
            };
            if text.is_empty() {
                return Err(field_error(
                    "empty",
                    format!("\"{name}\" is not allowed to be empty"),
                ));
            }
            if text.chars().count() > max {
                return Err(field_error(
                    "max",
                    format!("\"{name}\" length must be less than or equal to {max} characters long"),
                ));
            }
            Ok(Some(Value::String(text.clone())))
        }
        FieldKind::Number => {
            let number = parse_number(name, value)?;
            Number::from_f64(number)
                .map(|n| Some(Value::Number(n)))
                .ok_or_else(|| field_error("number", format!("\"{name}\" must be a number")))
        }
        FieldKind::Integer { min, max } => {
            check_integer(name, value, min, max).map(|n| Some(Value::from(n)))
        }
    }
}

/// Whole number within `min..=max`, from a JSON number or numeric string.
fn check_integer(name: &str, value: &Value, min: i64, max: i64) -> Result<i64, ValidationError> {
    let number = parse_number(name, value)?;
    if number.fract() != 0.0 {
        return Err(field_error("integer", format!("\"{name}\" must be an integer")));
    }
    // Safe range guarantees the cast is exact
    let number = number as i64;
    if number < min {
        let message = if min == 1 {
            format!("\"{name}\" must be a positive number")
        } else {
            format!("\"{name}\" must be greater than or equal to {min}")
        };
        return Err(field_error("min", message));
    }
    if number > max {
        return Err(field_error(
            "max",
            format!("\"{name}\" must be less than or equal to {max}"),
        ));
    }
    Ok(number)
}

/// Accept JSON numbers and trimmed numeric strings within the safe range.
fn parse_number(name: &str, value: &Value) -> Result<f64, ValidationError> {
    let not_a_number = || field_error("number", format!("\"{name}\" must be a number"));

    let number = match value {
        Value::Number(n) => n.as_f64().ok_or_else(not_a_number)?,
        Value::String(s) => {
            let trimmed = s.trim();
            // Rust also parses "inf" and "NaN"; only plain decimal notation counts
            if trimmed.is_empty()
                || !trimmed
                    .chars()
                    .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
            {
                return Err(not_a_number());
            }
            trimmed.parse::<f64>().map_err(|_| not_a_number())?
        }
        _ => return Err(not_a_number()),
    };

    if !number.is_finite() {
        return Err(not_a_number());
    }
    if number.abs() > MAX_SAFE_INTEGER {
        return Err(field_error("unsafe", format!("\"{name}\" must be a safe number")));
    }

    Ok(number)
}

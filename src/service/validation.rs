//! Request validation from per-entity field rules.

use crate::error::AppError;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// Compiled once; `None` only if the pattern itself is invalid.
static EMAIL: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).ok());

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Boolean,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldFormat {
    Email,
}

/// One column's write rule. Lengths are in characters and mirror the column widths.
#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub max_length: Option<usize>,
    pub format: Option<FieldFormat>,
}

impl FieldRule {
    pub const fn text(name: &'static str, max_length: usize) -> Self {
        FieldRule {
            name,
            kind: FieldKind::Text,
            required: false,
            max_length: Some(max_length),
            format: None,
        }
    }

    pub const fn boolean(name: &'static str) -> Self {
        FieldRule {
            name,
            kind: FieldKind::Boolean,
            required: false,
            max_length: None,
            format: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn format(mut self, format: FieldFormat) -> Self {
        self.format = Some(format);
        self
    }
}

pub const USER_RULES: &[FieldRule] = &[
    FieldRule::text("email", 120).required().format(FieldFormat::Email),
    FieldRule::text("password", 80).required(),
    FieldRule::boolean("is_active"),
];

pub const CHARACTER_RULES: &[FieldRule] = &[
    FieldRule::text("name", 100).required(),
    FieldRule::text("gender", 20),
    FieldRule::text("birth_year", 20),
    FieldRule::text("eye_color", 20),
    FieldRule::text("hair_color", 20),
    FieldRule::text("height", 20),
];

pub const PLANET_RULES: &[FieldRule] = &[
    FieldRule::text("name", 100).required(),
    FieldRule::text("climate", 50),
    FieldRule::text("terrain", 50),
    FieldRule::text("population", 50),
];

pub struct RequestValidator;

impl RequestValidator {
    /// Validate body against the entity's rules, in rule order. Required text fields
    /// must be present, non-null and non-empty. Fields without a rule are ignored.
    pub fn validate(entity: &str, body: &HashMap<String, Value>, rules: &[FieldRule]) -> Result<(), AppError> {
        for rule in rules {
            let val = body.get(rule.name).filter(|v| !v.is_null());
            let missing = match val {
                None => true,
                Some(Value::String(s)) => s.is_empty(),
                Some(_) => false,
            };
            if rule.required && missing {
                return Err(AppError::Validation(format!("Missing {} {}", entity, rule.name)));
            }
            if let Some(v) = val {
                validate_field(rule, v)?;
            }
        }
        Ok(())
    }
}

fn validate_field(rule: &FieldRule, v: &Value) -> Result<(), AppError> {
    let col = rule.name;
    match rule.kind {
        FieldKind::Boolean => {
            if !v.is_boolean() {
                return Err(AppError::Validation(format!("{} must be a boolean", col)));
            }
        }
        FieldKind::Text => {
            let s = v
                .as_str()
                .ok_or_else(|| AppError::Validation(format!("{} must be a string", col)))?;
            if let Some(max) = rule.max_length {
                if s.chars().count() > max {
                    return Err(AppError::Validation(format!(
                        "{} must be at most {} characters",
                        col, max
                    )));
                }
            }
            if let Some(format) = rule.format {
                validate_format(col, s, format)?;
            }
        }
    }
    Ok(())
}

fn validate_format(col: &str, s: &str, format: FieldFormat) -> Result<(), AppError> {
    match format {
        FieldFormat::Email => {
            let re = EMAIL
                .as_ref()
                .ok_or_else(|| AppError::Internal("invalid email pattern".into()))?;
            if !re.is_match(s) {
                return Err(AppError::Validation(format!("{} must be a valid email", col)));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn body(value: Value) -> HashMap<String, Value> {
        match value {
            Value::Object(m) => m.into_iter().collect(),
            _ => panic!("test body must be an object"),
        }
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({"name": null}))]
    #[case(json!({"name": ""}))]
    #[case(json!({"climate": "arid"}))]
    fn planet_without_name_is_rejected(#[case] payload: Value) {
        let err = RequestValidator::validate("planet", &body(payload), PLANET_RULES).unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m == "Missing planet name"));
    }

    #[test]
    fn optional_fields_may_be_absent_or_null() {
        let payload = body(json!({"name": "Dagobah", "climate": null}));
        assert!(RequestValidator::validate("planet", &payload, PLANET_RULES).is_ok());
    }

    #[test]
    fn over_long_text_is_rejected() {
        let payload = body(json!({"name": "Luke", "gender": "x".repeat(21)}));
        let err = RequestValidator::validate("character", &payload, CHARACTER_RULES).unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m == "gender must be at most 20 characters"));
    }

    #[test]
    fn non_string_text_is_rejected() {
        let payload = body(json!({"name": 42}));
        assert!(RequestValidator::validate("character", &payload, CHARACTER_RULES).is_err());
    }

    #[rstest]
    #[case("leia@alderaan.org", true)]
    #[case("not-an-email", false)]
    #[case("two@@at.com", false)]
    #[case("space @x.io", false)]
    fn email_format(#[case] email: &str, #[case] ok: bool) {
        let payload = body(json!({"email": email, "password": "pw"}));
        assert_eq!(RequestValidator::validate("user", &payload, USER_RULES).is_ok(), ok);
    }

    #[test]
    fn invalid_email_is_a_validation_error() {
        assert!(EMAIL.is_some());
        let payload = body(json!({"email": "not-an-email", "password": "pw"}));
        for _ in 0..2 {
            let err = RequestValidator::validate("user", &payload, USER_RULES).unwrap_err();
            assert!(matches!(err, AppError::Validation(m) if m == "email must be a valid email"));
        }
    }

    #[test]
    fn user_requires_password_and_boolean_is_active() {
        let missing = body(json!({"email": "a@b.co"}));
        let err = RequestValidator::validate("user", &missing, USER_RULES).unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m == "Missing user password"));

        let bad_flag = body(json!({"email": "a@b.co", "password": "pw", "is_active": "yes"}));
        assert!(RequestValidator::validate("user", &bad_flag, USER_RULES).is_err());
    }
}

//! Field validation engine.
//!
//! Validation runs synchronously, field-by-field, on an explicit advance
//! or submit action. A multi-step form validates only the fields on the
//! active step; on failure every failing field is reported and
//! advancement is blocked.

use std::sync::LazyLock;

use regex::Regex;

// Conservative email shape: local part, `@`, domain with at least one
// dot. No DNS validation.
#[allow(clippy::unwrap_used)]
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// A declared constraint on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Value must be non-empty after trimming whitespace.
    Required,
    /// Value must match a conservative email shape.
    Email,
    /// Value must parse as a number and be zero or greater.
    NumberNonNegative,
    /// At least one option in the group must be selected.
    ChoiceGroupRequired,
}

/// The value a rule is checked against.
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    /// A free-text input.
    Text(&'a str),
    /// The selected options of a choice group.
    Selection(&'a [String]),
}

/// Outcome of checking one field against one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the field passed.
    pub valid: bool,
    /// Error message when the field failed.
    pub message: Option<String>,
}

impl ValidationResult {
    /// A passing result.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    /// A failing result with a message.
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// Check a single field against a single rule.
#[must_use]
pub fn validate_field(value: &FieldValue<'_>, rule: FieldRule) -> ValidationResult {
    match rule {
        FieldRule::Required => match value {
            FieldValue::Text(s) if s.trim().is_empty() => {
                ValidationResult::fail("This field is required")
            }
            FieldValue::Selection(selected) if selected.is_empty() => {
                ValidationResult::fail("This field is required")
            }
            _ => ValidationResult::ok(),
        },
        FieldRule::Email => match value {
            FieldValue::Text(s) if EMAIL_RE.is_match(s.trim()) => ValidationResult::ok(),
            _ => ValidationResult::fail("Enter a valid email address"),
        },
        FieldRule::NumberNonNegative => match value {
            // The empty string is invalid even though `0` is valid: an
            // explicit non-negative-number check, not truthiness.
            FieldValue::Text(s) => match s.trim().parse::<f64>() {
                Ok(n) if n >= 0.0 => ValidationResult::ok(),
                _ => ValidationResult::fail("Enter a number of 0 or more"),
            },
            FieldValue::Selection(_) => ValidationResult::fail("Enter a number of 0 or more"),
        },
        FieldRule::ChoiceGroupRequired => match value {
            FieldValue::Selection(selected) if !selected.is_empty() => ValidationResult::ok(),
            FieldValue::Text(s) if !s.is_empty() => ValidationResult::ok(),
            _ => ValidationResult::fail("Select at least one option"),
        },
    }
}

/// A field on the active form step together with its rules.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec<'a> {
    /// Field name used in error reporting.
    pub name: &'a str,
    /// Current value.
    pub value: FieldValue<'a>,
    /// Declared constraints, checked in order.
    pub rules: &'a [FieldRule],
}

/// A failed field with its first error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the failing field.
    pub field: String,
    /// Error message for the field.
    pub message: String,
}

/// Validate every field on the active step.
///
/// Returns one error per failing field (the first failing rule wins);
/// fields on other steps are not checked until reached.
#[must_use]
pub fn validate_step(fields: &[FieldSpec<'_>]) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for field in fields {
        for rule in field.rules {
            let result = validate_field(&field.value, *rule);
            if !result.valid {
                errors.push(FieldError {
                    field: field.name.to_string(),
                    message: result.message.unwrap_or_default(),
                });
                break;
            }
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_whitespace() {
        assert!(!validate_field(&FieldValue::Text("   "), FieldRule::Required).valid);
        assert!(!validate_field(&FieldValue::Text(""), FieldRule::Required).valid);
        assert!(validate_field(&FieldValue::Text("x"), FieldRule::Required).valid);
    }

    #[test]
    fn test_email_shape() {
        assert!(validate_field(&FieldValue::Text("a@b.co"), FieldRule::Email).valid);
        assert!(!validate_field(&FieldValue::Text("a@b"), FieldRule::Email).valid);
        assert!(!validate_field(&FieldValue::Text("a b@c.co"), FieldRule::Email).valid);
        assert!(!validate_field(&FieldValue::Text(""), FieldRule::Email).valid);
    }

    #[test]
    fn test_number_non_negative() {
        assert!(validate_field(&FieldValue::Text("0"), FieldRule::NumberNonNegative).valid);
        assert!(validate_field(&FieldValue::Text("3.5"), FieldRule::NumberNonNegative).valid);
        assert!(!validate_field(&FieldValue::Text("-1"), FieldRule::NumberNonNegative).valid);
        // Empty is invalid even though 0 is valid.
        assert!(!validate_field(&FieldValue::Text(""), FieldRule::NumberNonNegative).valid);
        assert!(!validate_field(&FieldValue::Text("abc"), FieldRule::NumberNonNegative).valid);
    }

    #[test]
    fn test_choice_group_required() {
        let none: Vec<String> = vec![];
        let some = vec!["A".to_string()];
        assert!(!validate_field(&FieldValue::Selection(&none), FieldRule::ChoiceGroupRequired).valid);
        assert!(validate_field(&FieldValue::Selection(&some), FieldRule::ChoiceGroupRequired).valid);
    }

    #[test]
    fn test_optional_empty_checkbox_group_is_valid() {
        // Zero selections with no rules attached is always valid.
        let none: Vec<String> = vec![];
        let errors = validate_step(&[FieldSpec {
            name: "toppings",
            value: FieldValue::Selection(&none),
            rules: &[],
        }]);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_validate_step_reports_every_failing_field() {
        let errors = validate_step(&[
            FieldSpec {
                name: "email",
                value: FieldValue::Text("not-an-email"),
                rules: &[FieldRule::Required, FieldRule::Email],
            },
            FieldSpec {
                name: "age",
                value: FieldValue::Text(""),
                rules: &[FieldRule::NumberNonNegative],
            },
            FieldSpec {
                name: "name",
                value: FieldValue::Text("fine"),
                rules: &[FieldRule::Required],
            },
        ]);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "email");
        assert_eq!(errors[1].field, "age");
    }
}

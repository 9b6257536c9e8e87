//! Declarative request validation
//!
//! Every endpoint that accepts input declares a [`Ruleset`]: an ordered list of
//! `(field, check)` pairs. Validation runs every rule against the raw JSON
//! input, collecting one [`FieldError`] per failing rule in declaration order.
//! Rules never short-circuit each other.
//!
//! Only [`Check::Required`] fails on a missing (or `null`) field. All other
//! checks pass vacuously when there is nothing to check, so an absent field
//! yields exactly one error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use validator::ValidateEmail;

/// A single check applied to one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Field is present and not `null`
    Required,
    /// Field is a JSON string
    String,
    /// Field is a JSON integer
    Integer,
    /// Field is a string shaped like an email address
    Email,
    /// String field has at least `n` characters
    MinLength(usize),
    /// String field has at most `n` characters
    MaxLength(usize),
    /// Field is an integer >= 1, given either as a JSON number or as a string
    /// of decimal digits (path and query parameters arrive as strings)
    PositiveInteger,
}

impl Check {
    fn passes(self, value: Option<&Value>) -> bool {
        let value = match value {
            None | Some(Value::Null) => return self != Check::Required,
            Some(value) => value,
        };

        match self {
            Check::Required => true,
            Check::String => value.is_string(),
            Check::Integer => value.is_i64() || value.is_u64(),
            Check::Email => value.as_str().is_some_and(|s| s.validate_email()),
            Check::MinLength(min) => value.as_str().map_or(true, |s| s.chars().count() >= min),
            Check::MaxLength(max) => value.as_str().map_or(true, |s| s.chars().count() <= max),
            Check::PositiveInteger => parse_positive_id(value).is_some(),
        }
    }

    fn message(self, field: &str) -> String {
        match self {
            Check::Required => format!("{field} is required"),
            Check::String => format!("{field} must be a string"),
            Check::Integer => format!("{field} must be an integer"),
            Check::Email => format!("{field} must be a valid email address"),
            Check::MinLength(1) => format!("{field} cannot be empty"),
            Check::MinLength(min) => format!("{field} must be at least {min} characters"),
            Check::MaxLength(max) => format!("{field} must be at most {max} characters"),
            Check::PositiveInteger => format!("{field} must be a positive integer"),
        }
    }
}

/// Parse a positive 64-bit identifier from a JSON number or digit string
pub fn parse_positive_id(value: &Value) -> Option<i64> {
    let id = match value {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            s.parse::<i64>().ok()?
        }
        _ => return None,
    };
    (id >= 1).then_some(id)
}

/// One failing rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered, non-empty list of failing rules
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed with {} error(s)", .0.len())]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone)]
struct Rule {
    field: &'static str,
    check: Check,
}

/// Ordered set of rules for one endpoint's input
#[derive(Debug, Clone, Default)]
pub struct Ruleset {
    rules: Vec<Rule>,
}

impl Ruleset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append checks for `field`, in the given order
    pub fn field(mut self, field: &'static str, checks: impl IntoIterator<Item = Check>) -> Self {
        self.rules
            .extend(checks.into_iter().map(|check| Rule { field, check }));
        self
    }

    /// Run every rule against `input`
    ///
    /// Non-object inputs are treated as having no fields at all.
    pub fn validate(&self, input: &Value) -> Result<(), ValidationErrors> {
        let errors: Vec<FieldError> = self
            .rules
            .iter()
            .filter(|rule| !rule.check.passes(input.get(rule.field)))
            .map(|rule| FieldError {
                field: rule.field.to_string(),
                message: rule.check.message(rule.field),
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Input types that carry their own ruleset
pub trait ValidatedInput {
    fn ruleset() -> Ruleset;
}

/// Ruleset for a path identifier named `id`
pub fn path_id_ruleset() -> Ruleset {
    Ruleset::new().field("id", [Check::Required, Check::PositiveInteger])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    fn registration_rules() -> Ruleset {
        Ruleset::new()
            .field("name", [Check::Required, Check::String, Check::MinLength(1)])
            .field("email", [Check::Required, Check::Email])
            .field("password", [Check::Required, Check::String, Check::MinLength(1)])
    }

    #[test]
    fn test_missing_name_yields_exactly_one_error() {
        let input = json!({ "email": "a@b.com", "password": "x" });
        let errors = registration_rules().validate(&input).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].field, "name");
        assert_eq!(errors.errors()[0].message, "name is required");
    }

    #[test]
    fn test_valid_input_passes() {
        let input = json!({ "name": "Ada", "email": "ada@example.com", "password": "x" });
        assert!(registration_rules().validate(&input).is_ok());
    }

    #[test]
    fn test_all_rules_run_in_declaration_order() {
        let input = json!({ "name": 42, "email": "nope" });
        let errors = registration_rules().validate(&input).unwrap_err();

        let reported: Vec<(&str, &str)> = errors
            .errors()
            .iter()
            .map(|e| (e.field.as_str(), e.message.as_str()))
            .collect();
        assert_eq!(
            reported,
            vec![
                ("name", "name must be a string"),
                ("email", "email must be a valid email address"),
                ("password", "password is required"),
            ]
        );
    }

    #[test]
    fn test_null_counts_as_missing() {
        let input = json!({ "name": null, "email": "a@b.com", "password": "x" });
        let errors = registration_rules().validate(&input).unwrap_err();
        assert_eq!(errors.errors()[0].field, "name");
    }

    #[test]
    fn test_non_object_input_reports_every_required_field() {
        let errors = registration_rules().validate(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_optional_fields_pass_when_absent() {
        let rules = Ruleset::new().field("title", [Check::String, Check::MinLength(3)]);
        assert!(rules.validate(&json!({})).is_ok());
    }

    #[rstest]
    #[case(Check::String, json!("text"), true)]
    #[case(Check::String, json!(12), false)]
    #[case(Check::Integer, json!(12), true)]
    #[case(Check::Integer, json!(1.5), false)]
    #[case(Check::Integer, json!("12"), false)]
    #[case(Check::Email, json!("someone@example.com"), true)]
    #[case(Check::Email, json!("someone"), false)]
    #[case(Check::Email, json!(7), false)]
    #[case(Check::MinLength(3), json!("abc"), true)]
    #[case(Check::MinLength(3), json!("ab"), false)]
    #[case(Check::MaxLength(3), json!("héé"), true)]
    #[case(Check::MaxLength(3), json!("abcd"), false)]
    #[case(Check::PositiveInteger, json!("42"), true)]
    #[case(Check::PositiveInteger, json!(42), true)]
    #[case(Check::PositiveInteger, json!("0"), false)]
    #[case(Check::PositiveInteger, json!(-3), false)]
    #[case(Check::PositiveInteger, json!("abc"), false)]
    #[case(Check::PositiveInteger, json!("+5"), false)]
    #[case(Check::PositiveInteger, json!("99999999999999999999"), false)]
    fn test_single_check(#[case] check: Check, #[case] value: Value, #[case] expected: bool) {
        let rules = Ruleset::new().field("f", [check]);
        assert_eq!(rules.validate(&json!({ "f": value })).is_ok(), expected);
    }

    #[test]
    fn test_path_id_ruleset_rejects_non_numeric() {
        let errors = path_id_ruleset().validate(&json!({ "id": "abc" })).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].message, "id must be a positive integer");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_positive_ids_round_trip_through_strings(id in 1i64..=i64::MAX) {
            prop_assert_eq!(parse_positive_id(&json!(id.to_string())), Some(id));
        }

        #[test]
        fn prop_strings_with_letters_are_not_ids(s in "[0-9]{0,4}[a-zA-Z_ -]{1,4}[0-9]{0,4}") {
            prop_assert_eq!(parse_positive_id(&json!(s)), None);
        }

        #[test]
        fn prop_error_count_never_exceeds_rule_count(
            name in proptest::option::of("[a-z]{0,5}"),
            email in proptest::option::of("[a-z@.]{0,8}"),
        ) {
            let rules = registration_rules();
            let input = json!({ "name": name, "email": email });
            if let Err(errors) = rules.validate(&input) {
                prop_assert!(errors.len() <= rules.len());
            }
        }
    }
}

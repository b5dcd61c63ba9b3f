//! Field validation rules
//!
//! Rules are declared as data: an ordered table binding a field kind or a
//! field name to a predicate and the inline message shown on failure. The
//! first binding that matches a field decides its rule.

use crate::state::{FieldKind, FormField, RegistrationForm};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

/// Predicate applied to a field's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// An option of the group is chosen
    AnySelected,
    EmailAddress,
    /// `YYYY-MM-DD` calendar date
    CalendarDate,
    /// Digits, whitespace, `-`, `+`, parentheses; at least 10 long
    PhoneNumber,
    MinLength(usize),
    /// Equal to the current value of the named field
    SameAs(&'static str),
    NonEmpty,
}

/// Which fields a binding applies to
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    Kind(FieldKind),
    Name(&'static str),
}

impl Matcher {
    fn matches(&self, field: &FormField) -> bool {
        match self {
            Self::Kind(kind) => field.kind == *kind,
            Self::Name(name) => field.name == *name,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RuleBinding {
    pub matcher: Matcher,
    pub rule: Rule,
    pub message: &'static str,
}

const fn bind(matcher: Matcher, rule: Rule, message: &'static str) -> RuleBinding {
    RuleBinding {
        matcher,
        rule,
        message,
    }
}

/// Ordered rule table; first match wins
pub const RULES: &[RuleBinding] = &[
    bind(
        Matcher::Kind(FieldKind::Radio),
        Rule::AnySelected,
        "Please select an option",
    ),
    bind(
        Matcher::Kind(FieldKind::Email),
        Rule::EmailAddress,
        "Please enter a valid email address",
    ),
    bind(
        Matcher::Kind(FieldKind::Date),
        Rule::CalendarDate,
        "Please enter a valid date (YYYY-MM-DD)",
    ),
    bind(
        Matcher::Name("phone"),
        Rule::PhoneNumber,
        "Please enter a valid phone number (at least 10 digits)",
    ),
    bind(
        Matcher::Name("username"),
        Rule::MinLength(4),
        "Username must be at least 4 characters",
    ),
    bind(
        Matcher::Name("password"),
        Rule::MinLength(8),
        "Password must be at least 8 characters",
    ),
    bind(
        Matcher::Name("confirmPassword"),
        Rule::SameAs("password"),
        "Passwords do not match",
    ),
];

/// Rule and message for required fields no binding matches
pub const REQUIRED: (Rule, &str) = (Rule::NonEmpty, "This field is required");

/// Look up the rule and failure message that govern a field
pub fn binding_for(field: &FormField) -> (Rule, &'static str) {
    RULES
        .iter()
        .find(|binding| binding.matcher.matches(field))
        .map_or(REQUIRED, |binding| (binding.rule, binding.message))
}

/// Length in UTF-16 code units
fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

fn email_pattern() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

fn phone_pattern() -> &'static Regex {
    static PHONE_RE: OnceLock<Regex> = OnceLock::new();
    PHONE_RE.get_or_init(|| Regex::new(r"^[0-9\s\-+()]+$").expect("valid phone regex"))
}

impl Rule {
    /// Check a field against this rule. `form` resolves cross-field references.
    pub fn check(&self, field: &FormField, form: &RegistrationForm) -> bool {
        let value = field.as_text();
        match self {
            Self::AnySelected => field.selected().is_some(),
            Self::EmailAddress => email_pattern().is_match(value),
            Self::CalendarDate => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").is_ok(),
            Self::PhoneNumber => phone_pattern().is_match(value) && utf16_len(value) >= 10,
            Self::MinLength(min) => utf16_len(value) >= *min,
            Self::SameAs(other) => value == form.text(other),
            Self::NonEmpty => !field.is_blank(),
        }
    }
}

/// Validate every required field of a step.
///
/// Each examined field has its error set or cleared. Returns true iff all
/// examined fields pass. Steps without required fields are always valid.
pub fn validate_step(form: &mut RegistrationForm, step: usize) -> bool {
    let outcomes: Vec<Option<&'static str>> = form
        .step_fields(step)
        .iter()
        .map(|field| {
            if !field.required {
                return None;
            }
            let (rule, message) = binding_for(field);
            (!rule.check(field, form)).then_some(message)
        })
        .collect();

    let mut valid = true;
    for (field, outcome) in form.step_fields_mut(step).iter_mut().zip(outcomes) {
        if !field.required {
            continue;
        }
        if outcome.is_some() {
            valid = false;
        }
        field.error = outcome;
    }

    if !valid {
        tracing::debug!("Step {step} failed validation");
    }
    valid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with(values: &[(&str, &str)]) -> RegistrationForm {
        let mut form = RegistrationForm::new();
        for (name, value) in values {
            form.field_mut(name).unwrap().set_text(*value);
        }
        form
    }

    fn check(form: &RegistrationForm, name: &str) -> bool {
        let field = form.field(name).unwrap();
        binding_for(field).0.check(field, form)
    }

    mod rule_table {
        use super::*;

        #[test]
        fn test_kind_bindings() {
            let form = RegistrationForm::new();
            assert_eq!(
                binding_for(form.field("gender").unwrap()).0,
                Rule::AnySelected
            );
            assert_eq!(
                binding_for(form.field("email").unwrap()).0,
                Rule::EmailAddress
            );
            assert_eq!(
                binding_for(form.field("dateOfBirth").unwrap()).0,
                Rule::CalendarDate
            );
        }

        #[test]
        fn test_name_bindings() {
            let form = RegistrationForm::new();
            assert_eq!(
                binding_for(form.field("phone").unwrap()).0,
                Rule::PhoneNumber
            );
            assert_eq!(
                binding_for(form.field("username").unwrap()).0,
                Rule::MinLength(4)
            );
            assert_eq!(
                binding_for(form.field("password").unwrap()).0,
                Rule::MinLength(8)
            );
            assert_eq!(
                binding_for(form.field("confirmPassword").unwrap()).0,
                Rule::SameAs("password")
            );
        }

        #[test]
        fn test_everything_else_is_non_empty() {
            let form = RegistrationForm::new();
            for name in ["firstName", "lastName", "address", "city", "country"] {
                assert_eq!(binding_for(form.field(name).unwrap()).0, Rule::NonEmpty);
            }
        }
    }

    mod rules {
        use super::*;

        #[test]
        fn test_email() {
            assert!(!check(&form_with(&[("email", "not-an-email")]), "email"));
            assert!(check(&form_with(&[("email", "a@b.co")]), "email"));
            assert!(!check(&form_with(&[("email", "a b@c.de")]), "email"));
            assert!(!check(&form_with(&[("email", "a@@b.co")]), "email"));
            assert!(!check(&form_with(&[("email", "a@b.")]), "email"));
        }

        #[test]
        fn test_phone() {
            assert!(!check(&form_with(&[("phone", "123")]), "phone"));
            assert!(check(&form_with(&[("phone", "(555) 123-4567")]), "phone"));
            assert!(check(&form_with(&[("phone", "+44 20 7946 0958")]), "phone"));
            assert!(!check(&form_with(&[("phone", "555-CALL-NOW")]), "phone"));
        }

        #[test]
        fn test_username_length() {
            assert!(!check(&form_with(&[("username", "ada")]), "username"));
            assert!(check(&form_with(&[("username", "adal")]), "username"));
        }

        #[test]
        fn test_lengths_count_utf16_units() {
            // Each emoji is a surrogate pair
            assert!(check(&form_with(&[("username", "😀😀")]), "username"));
            assert!(!check(&form_with(&[("username", "😀")]), "username"));
            assert!(check(&form_with(&[("username", "ñañá")]), "username"));
        }

        #[test]
        fn test_unmatched_required_fields_fall_back_to_required() {
            let form = RegistrationForm::new();
            assert_eq!(binding_for(form.field("country").unwrap()), REQUIRED);
            assert_eq!(
                binding_for(form.field("lastName").unwrap()).1,
                "This field is required"
            );
        }

        #[test]
        fn test_password_length() {
            assert!(!check(&form_with(&[("password", "short")]), "password"));
            assert!(check(&form_with(&[("password", "longenough")]), "password"));
        }

        #[test]
        fn test_confirm_password_must_match() {
            let form = form_with(&[("password", "analytical"), ("confirmPassword", "difference")]);
            assert!(!check(&form, "confirmPassword"));

            let form = form_with(&[("password", "analytical"), ("confirmPassword", "analytical")]);
            assert!(check(&form, "confirmPassword"));
        }

        #[test]
        fn test_date_of_birth() {
            assert!(check(&form_with(&[("dateOfBirth", "1815-12-10")]), "dateOfBirth"));
            assert!(!check(&form_with(&[("dateOfBirth", "1815-13-10")]), "dateOfBirth"));
            assert!(!check(&form_with(&[("dateOfBirth", "10/12/1815")]), "dateOfBirth"));
            assert!(!check(&form_with(&[("dateOfBirth", "")]), "dateOfBirth"));
        }

        #[test]
        fn test_non_empty_trims() {
            assert!(!check(&form_with(&[("city", "   ")]), "city"));
            assert!(check(&form_with(&[("city", " London ")]), "city"));
        }

        #[test]
        fn test_radio_requires_selection() {
            let mut form = RegistrationForm::new();
            assert!(!check(&form, "gender"));
            form.field_mut("gender").unwrap().select_value("other");
            assert!(check(&form, "gender"));
        }
    }

    mod validate_step {
        use super::*;

        #[test]
        fn test_sets_errors_on_every_failing_field() {
            let mut form = form_with(&[("firstName", "Ada")]);
            assert!(!validate_step(&mut form, 1));

            assert!(form.field("firstName").unwrap().error.is_none());
            assert_eq!(
                form.field("lastName").unwrap().error,
                Some("This field is required")
            );
            assert!(form.field("dateOfBirth").unwrap().error.is_some());
            assert_eq!(
                form.field("gender").unwrap().error,
                Some("Please select an option")
            );
        }

        #[test]
        fn test_success_clears_previous_errors() {
            let mut form = RegistrationForm::new();
            assert!(!validate_step(&mut form, 1));

            for (name, value) in [
                ("firstName", "Ada"),
                ("lastName", "Lovelace"),
                ("dateOfBirth", "1815-12-10"),
            ] {
                form.field_mut(name).unwrap().set_text(value);
            }
            form.field_mut("gender").unwrap().select_value("female");

            assert!(validate_step(&mut form, 1));
            assert!(form.step_fields(1).iter().all(|f| f.error.is_none()));
        }

        #[test]
        fn test_only_examines_the_given_step() {
            let mut form = RegistrationForm::new();
            validate_step(&mut form, 1);
            assert!(form.step_fields(2).iter().all(|f| f.error.is_none()));
        }

        #[test]
        fn test_optional_interests_do_not_block() {
            let mut form = form_with(&[
                ("username", "adal"),
                ("password", "analytical"),
                ("confirmPassword", "analytical"),
            ]);
            assert!(validate_step(&mut form, 3));
            assert!(form.field("interests").unwrap().error.is_none());
        }

        #[test]
        fn test_confirm_mismatch_blocks_even_when_long_enough() {
            let mut form = form_with(&[
                ("username", "adal"),
                ("password", "analytical"),
                ("confirmPassword", "analytics"),
            ]);
            assert!(!validate_step(&mut form, 3));
            assert_eq!(
                form.field("confirmPassword").unwrap().error,
                Some("Passwords do not match")
            );
            assert!(form.field("password").unwrap().error.is_none());
        }

        #[test]
        fn test_review_step_is_always_valid() {
            let mut form = RegistrationForm::new();
            assert!(validate_step(&mut form, 4));
        }
    }
}

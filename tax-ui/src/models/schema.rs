//! Input constraints of the three forms.
//!
//! One rule per HTML input attribute (`required`, numeric `min`, `pattern`,
//! `maxlength`, select options). A submission that breaks one is blocked
//! before any handler runs, the way a browser refuses to fire the submit
//! event. Nothing beyond these constraints is checked client-side.
//!
//! Amounts follow [`parse_amount`], not the browser's `type=number` grammar:
//! comma grouping (`1,200.50`) is accepted, and a value must fit a
//! [`Decimal`] (magnitude below about 7.9e28), so `1e30` is not a number
//! here. The request then carries the parsed decimal, so `5e4` goes out as
//! `"50000"`.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use tax_core::{FilingStatus, PayFrequency};

use super::{FormId, FormSubmission};
use crate::utils::parse_amount;

static REGION_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2}$").expect("region code pattern compiles"));

/// Backend truncates labels beyond this length.
pub const LABEL_MAX_LEN: usize = 60;

#[derive(Debug, Clone)]
pub enum Constraint {
    Required,
    /// Decimal number, optionally bounded below.
    Number { min: Option<Decimal> },
    /// Whole-value match.
    Pattern(&'static Regex),
    MaxLength(usize),
    /// Value must equal one of the options exactly.
    OneOf(Vec<&'static str>),
}

#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub name: &'static str,
    pub label: &'static str,
    pub constraints: Vec<Constraint>,
}

impl FieldSchema {
    fn new(
        name: &'static str,
        label: &'static str,
        constraints: Vec<Constraint>,
    ) -> Self {
        Self {
            name,
            label,
            constraints,
        }
    }

    fn is_required(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| matches!(c, Constraint::Required))
    }

    fn check(
        &self,
        value: &str,
        errors: &mut Vec<String>,
    ) {
        // An empty optional field satisfies every other constraint.
        if value.is_empty() {
            if self.is_required() {
                errors.push(format!("{} is required.", self.label));
            }
            return;
        }

        for constraint in &self.constraints {
            match constraint {
                Constraint::Required => {}
                Constraint::Number { min } => match parse_amount(value) {
                    Ok(amount) => {
                        if let Some(min) = min {
                            if amount < *min {
                                errors.push(format!("{} must be at least {min}.", self.label));
                            }
                        }
                    }
                    Err(_) => errors.push(format!("{} must be a number.", self.label)),
                },
                Constraint::Pattern(re) => {
                    if !re.is_match(value) {
                        errors.push(format!("{} must match the requested format.", self.label));
                    }
                }
                Constraint::MaxLength(max) => {
                    if value.chars().count() > *max {
                        errors.push(format!(
                            "{} must be at most {max} characters.",
                            self.label
                        ));
                    }
                }
                Constraint::OneOf(options) => {
                    if !options.contains(&value) {
                        errors.push(format!(
                            "{} must be one of: {}.",
                            self.label,
                            options.join(", ")
                        ));
                    }
                }
            }
        }
    }
}

/// The constraint set of one form.
#[derive(Debug, Clone)]
pub struct FormSchema {
    pub form: FormId,
    pub fields: Vec<FieldSchema>,
}

impl FormSchema {
    pub fn for_form(form: FormId) -> Self {
        let fields = match form {
            FormId::Estimate => vec![
                FieldSchema::new(
                    "gross_annual",
                    "Gross annual income",
                    vec![
                        Constraint::Required,
                        Constraint::Number {
                            min: Some(Decimal::ZERO),
                        },
                    ],
                ),
                FieldSchema::new(
                    "filing_status",
                    "Filing status",
                    vec![
                        Constraint::Required,
                        Constraint::OneOf(FilingStatus::all().iter().map(|s| s.as_str()).collect()),
                    ],
                ),
                FieldSchema::new(
                    "state",
                    "State",
                    vec![Constraint::Required, Constraint::Pattern(&REGION_CODE)],
                ),
            ],
            FormId::SaveNet | FormId::EditLatest => {
                let mut frequencies: Vec<_> =
                    PayFrequency::all().iter().map(|f| f.as_str()).collect();
                frequencies.push("biweekly");

                vec![
                    FieldSchema::new("label", "Label", vec![Constraint::MaxLength(LABEL_MAX_LEN)]),
                    FieldSchema::new(
                        "net_amount",
                        "Net amount",
                        vec![
                            Constraint::Required,
                            Constraint::Number {
                                min: Some(Decimal::ZERO),
                            },
                        ],
                    ),
                    FieldSchema::new(
                        "frequency",
                        "Frequency",
                        vec![Constraint::Required, Constraint::OneOf(frequencies)],
                    ),
                ]
            }
        };

        Self { form, fields }
    }

    /// Checks every field and returns all violations, in field order.
    pub fn validate(
        &self,
        submission: &FormSubmission,
    ) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for field in &self.fields {
            field.check(submission.field(field.name), &mut errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn estimate(
        gross: &str,
        status: &str,
        state: &str,
    ) -> FormSubmission {
        FormSubmission::new(FormId::Estimate)
            .with_field("gross_annual", gross)
            .with_field("filing_status", status)
            .with_field("state", state)
    }

    fn net_income(
        form: FormId,
        label: &str,
        amount: &str,
        frequency: &str,
    ) -> FormSubmission {
        FormSubmission::new(form)
            .with_field("label", label)
            .with_field("net_amount", amount)
            .with_field("frequency", frequency)
    }

    #[test]
    fn valid_estimate_passes() {
        let schema = FormSchema::for_form(FormId::Estimate);
        assert_eq!(schema.validate(&estimate("50000", "single", "CA")), Ok(()));
    }

    #[test]
    fn missing_required_fields_are_reported_in_order() {
        let schema = FormSchema::for_form(FormId::Estimate);

        let errors = schema
            .validate(&FormSubmission::new(FormId::Estimate))
            .unwrap_err();

        assert_eq!(
            errors,
            vec![
                "Gross annual income is required.".to_string(),
                "Filing status is required.".to_string(),
                "State is required.".to_string(),
            ]
        );
    }

    #[test]
    fn non_numeric_and_negative_amounts_fail() {
        let schema = FormSchema::for_form(FormId::Estimate);

        assert_eq!(
            schema.validate(&estimate("lots", "single", "CA")),
            Err(vec!["Gross annual income must be a number.".to_string()])
        );
        assert_eq!(
            schema.validate(&estimate("-1", "single", "CA")),
            Err(vec!["Gross annual income must be at least 0.".to_string()])
        );
    }

    #[test]
    fn amounts_use_decimal_grammar() {
        let schema = FormSchema::for_form(FormId::Estimate);

        assert!(schema.validate(&estimate("1,200.50", "single", "CA")).is_ok());
        assert!(schema.validate(&estimate("5e4", "single", "CA")).is_ok());
        for not_a_number in ["1e30", "1_000"] {
            assert_eq!(
                schema.validate(&estimate(not_a_number, "single", "CA")),
                Err(vec!["Gross annual income must be a number.".to_string()]),
                "input {not_a_number}"
            );
        }
    }

    #[test]
    fn state_must_be_two_letters() {
        let schema = FormSchema::for_form(FormId::Estimate);

        assert!(schema.validate(&estimate("1", "single", "ny")).is_ok());
        assert_eq!(
            schema.validate(&estimate("1", "single", "Cal")),
            Err(vec!["State must match the requested format.".to_string()])
        );
    }

    #[test]
    fn filing_status_must_be_an_option() {
        let schema = FormSchema::for_form(FormId::Estimate);

        assert_eq!(
            schema.validate(&estimate("1", "mfs", "CA")),
            Err(vec![
                "Filing status must be one of: single, mfj, hoh.".to_string()
            ])
        );
    }

    #[test]
    fn net_income_forms_share_constraints() {
        for form in [FormId::SaveNet, FormId::EditLatest] {
            let schema = FormSchema::for_form(form);
            assert!(schema.validate(&net_income(form, "", "1,200.50", "biweekly")).is_ok());
            assert!(schema.validate(&net_income(form, "Salary", "0", "yearly")).is_ok());
        }
    }

    #[test]
    fn label_is_optional_but_bounded() {
        let schema = FormSchema::for_form(FormId::SaveNet);
        let long_label = "x".repeat(LABEL_MAX_LEN + 1);

        assert_eq!(
            schema.validate(&net_income(FormId::SaveNet, &long_label, "10", "monthly")),
            Err(vec!["Label must be at most 60 characters.".to_string()])
        );
    }

    #[test]
    fn unknown_frequency_fails() {
        let schema = FormSchema::for_form(FormId::EditLatest);

        let errors = schema
            .validate(&net_income(FormId::EditLatest, "Salary", "10", "daily"))
            .unwrap_err();

        assert_eq!(
            errors,
            vec!["Frequency must be one of: weekly, bi-weekly, monthly, yearly, biweekly.".to_string()]
        );
    }
}

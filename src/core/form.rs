//! Generic create forms.
//!
//! A form is described by its fields. Raw string input is collected per
//! field, required fields are checked, values are coerced to their field
//! types, and the coerced values are handed to the caller's persist
//! operation. The form only clears itself once persisting succeeded.

use crate::errors::{Error, Result, ValidationErrors};
use std::collections::BTreeMap;
use std::future::Future;

/// One choice of a select field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    /// An option whose label and value are the same text.
    #[must_use]
    pub fn same(text: &str) -> Self {
        Self {
            label: text.to_string(),
            value: text.to_string(),
        }
    }
}

/// Input widget and coercion rule of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Text,
    /// Parsed to `f64` from its leading number; otherwise `0`
    Number,
    Date,
    Tel,
    Email,
    /// Non-empty input must be the value of one of the options
    Select(Vec<SelectOption>),
    /// Comma-separated names, trimmed, empties dropped
    CommaList,
    /// Comma-separated numbers, each read from its leading number;
    /// entries without one are dropped
    NumberList,
}

/// A form field descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub name: &'static str,
    pub field_type: FieldType,
    pub placeholder: Option<&'static str>,
    pub required: bool,
}

impl FormField {
    /// An optional field without placeholder.
    #[must_use]
    pub const fn new(label: &'static str, name: &'static str, field_type: FieldType) -> Self {
        Self {
            label,
            name,
            field_type,
            placeholder: None,
            required: false,
        }
    }

    /// Marks the field as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the placeholder text.
    #[must_use]
    pub const fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Input hint shown under list fields.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        match self.field_type {
            FieldType::CommaList => Some("Separate colors with commas"),
            FieldType::NumberList => Some("Separate ratios with commas (e.g., 50, 40, 10)"),
            _ => None,
        }
    }
}

/// A coerced field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    /// No input was given for an optional text field
    Missing,
    Text(String),
    Number(f64),
    List(Vec<String>),
    Numbers(Vec<f64>),
}

/// The coerced values of a submitted form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues(BTreeMap<&'static str, FormValue>);

impl FormValues {
    /// The value of `name`, `Missing` if the form has no such field.
    #[must_use]
    pub fn get(&self, name: &str) -> &FormValue {
        self.0.get(name).unwrap_or(&FormValue::Missing)
    }

    /// Non-empty text of `name`.
    ///
    /// # Errors
    /// Returns a validation error keyed by `name` if the value is absent or empty.
    pub fn required_text(&self, name: &str, label: &str) -> Result<String> {
        match self.get(name) {
            FormValue::Text(text) if !text.is_empty() => Ok(text.clone()),
            _ => Err(ValidationErrors::single(name, format!("{label} is required")).into()),
        }
    }

    /// Number of `name`; anything that is not a number reads as `0`.
    #[must_use]
    pub fn number(&self, name: &str) -> f64 {
        match self.get(name) {
            FormValue::Number(n) => *n,
            _ => 0.0,
        }
    }

    /// List of `name`; a missing value reads as empty.
    #[must_use]
    pub fn list(&self, name: &str) -> Vec<String> {
        match self.get(name) {
            FormValue::List(items) => items.clone(),
            _ => Vec::new(),
        }
    }

    /// Numeric list of `name`; a missing value reads as empty.
    #[must_use]
    pub fn numbers(&self, name: &str) -> Vec<f64> {
        match self.get(name) {
            FormValue::Numbers(items) => items.clone(),
            _ => Vec::new(),
        }
    }
}

/// Conversion from coerced form values to a typed record.
pub trait FromForm: Sized {
    /// Builds the record.
    ///
    /// # Errors
    /// Returns `Error::Validation` keyed by the offending field.
    fn from_form(values: &FormValues) -> Result<Self>;
}

/// Reads the longest number at the start of `raw`, after leading whitespace.
///
/// Accepts an optional sign, digits with an optional fraction, and an
/// optional exponent, so `"2.5 L"` reads as `2.5` and `"50%"` as `50`.
#[must_use]
pub fn leading_number(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if has_digits || frac_end > end + 1 {
            has_digits = true;
            end = frac_end;
        }
    }
    if !has_digits {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + sign);
        if exp_end > end + 1 + sign {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parses a number field from its leading number; anything else becomes `0`.
#[must_use]
pub fn parse_number(raw: &str) -> f64 {
    leading_number(raw).unwrap_or(0.0)
}

/// Splits comma-separated names, trimming and dropping empty entries.
#[must_use]
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Splits comma-separated numbers, dropping entries that do not start with one.
#[must_use]
pub fn split_numbers(raw: &str) -> Vec<f64> {
    raw.split(',').filter_map(leading_number).collect()
}

/// Checks required fields and select choices against raw input.
#[must_use]
pub fn validate(fields: &[FormField], input: &BTreeMap<String, String>) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for field in fields {
        let raw = input.get(field.name).filter(|raw| !raw.is_empty());
        match (raw, &field.field_type) {
            (None, _) if field.required => {
                errors.insert(field.name, format!("{} is required", field.label));
            }
            (Some(raw), FieldType::Select(options))
                if !options.iter().any(|o| !o.value.is_empty() && o.value == *raw) =>
            {
                errors.insert(field.name, select_message(field.label, options));
            }
            _ => {}
        }
    }
    errors
}

fn select_message(label: &str, options: &[SelectOption]) -> String {
    let choices: Vec<&str> = options
        .iter()
        .map(|o| o.value.as_str())
        .filter(|v| !v.is_empty())
        .collect();
    if choices.is_empty() {
        format!("{label} has no options to choose from yet")
    } else {
        format!("{label} must be one of: {}", choices.join(", "))
    }
}

/// Coerces raw input to typed values, field by field.
#[must_use]
pub fn coerce(fields: &[FormField], input: &BTreeMap<String, String>) -> FormValues {
    let mut values = BTreeMap::new();
    for field in fields {
        let raw = input.get(field.name).map(String::as_str);
        let value = match (&field.field_type, raw) {
            (FieldType::Number, raw) => FormValue::Number(parse_number(raw.unwrap_or_default())),
            (FieldType::CommaList, Some(raw)) => FormValue::List(split_list(raw)),
            (FieldType::NumberList, Some(raw)) => FormValue::Numbers(split_numbers(raw)),
            (_, Some(raw)) => FormValue::Text(raw.to_string()),
            (_, None) => FormValue::Missing,
        };
        values.insert(field.name, value);
    }
    FormValues(values)
}

/// State of one create form: input, per-field errors, and visibility.
#[derive(Debug, Clone)]
pub struct CreateForm {
    title: String,
    fields: Vec<FormField>,
    input: BTreeMap<String, String>,
    errors: ValidationErrors,
    open: bool,
    submitting: bool,
}

impl CreateForm {
    /// A closed, empty form.
    #[must_use]
    pub fn new(title: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self {
            title: title.into(),
            fields,
            input: BTreeMap::new(),
            errors: ValidationErrors::new(),
            open: false,
            submitting: false,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    #[must_use]
    pub const fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Whether a persist call is in flight.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Raw input currently entered for `name`.
    #[must_use]
    pub fn input(&self, name: &str) -> Option<&str> {
        self.input.get(name).map(String::as_str)
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closes the form, discarding input and errors.
    pub fn close(&mut self) {
        self.reset();
        self.open = false;
    }

    /// Enters raw input for `name` and clears that field's error.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.input.insert(name.to_string(), value.into());
        self.errors.remove(name);
    }

    /// Runs required-field validation, recording the errors on the form.
    pub fn validate(&mut self) -> bool {
        self.errors = validate(&self.fields, &self.input);
        self.errors.is_empty()
    }

    /// Validates, coerces, and hands the values to `persist`.
    ///
    /// On success the form is cleared and closed. On failure the error is
    /// returned, the input is kept for retry, and validation errors raised by
    /// `persist` are recorded on the form.
    ///
    /// # Errors
    /// Returns `Error::Validation` without calling `persist` if a required
    /// field is empty; otherwise whatever `persist` fails with.
    pub async fn submit<T, F, Fut>(&mut self, persist: F) -> Result<T>
    where
        F: FnOnce(FormValues) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if !self.validate() {
            return Err(Error::Validation(self.errors.clone()));
        }

        let values = coerce(&self.fields, &self.input);
        self.submitting = true;
        let outcome = persist(values).await;
        self.submitting = false;

        match outcome {
            Ok(saved) => {
                self.close();
                Ok(saved)
            }
            Err(e) => {
                if let Error::Validation(errors) = &e {
                    self.errors = errors.clone();
                }
                Err(e)
            }
        }
    }

    fn reset(&mut self) {
        self.input.clear();
        self.errors.clear();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    fn mix_fields() -> Vec<FormField> {
        vec![
            FormField::new("Mix Name", "mixName", FieldType::Text).required(),
            FormField::new("Base Colors", "baseColors", FieldType::CommaList).required(),
            FormField::new("Mixing Ratios", "ratios", FieldType::NumberList).required(),
            FormField::new("Quantity (liters)", "quantity", FieldType::Number).required(),
            FormField::new("Notes", "notes", FieldType::Text),
        ]
    }

    fn input(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("Blue, Black, White"), ["Blue", "Black", "White"]);
        assert_eq!(split_list(" Blue ,, ,White,"), ["Blue", "White"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_split_numbers() {
        assert_eq!(split_numbers("50, 40, 10"), [50.0, 40.0, 10.0]);
        assert_eq!(split_numbers("50, abc, , 12.5"), [50.0, 12.5]);
    }

    #[test]
    fn test_split_numbers_reads_leading_numbers() {
        assert_eq!(split_numbers("50%, 40%, 10%"), [50.0, 40.0, 10.0]);
        assert_eq!(split_numbers("1/2, .5 parts"), [1.0, 0.5]);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("2.5"), 2.5);
        assert_eq!(parse_number(" 7 "), 7.0);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("lots"), 0.0);
        assert_eq!(parse_number("NaN"), 0.0);
    }

    #[test]
    fn test_parse_number_reads_leading_number() {
        assert_eq!(parse_number("2.5 L"), 2.5);
        assert_eq!(parse_number("12 units"), 12.0);
        assert_eq!(parse_number("-3.5kg"), -3.5);
        assert_eq!(parse_number("1e3ml"), 1000.0);
        assert_eq!(parse_number("4e"), 4.0);
        assert_eq!(parse_number("5."), 5.0);
        assert_eq!(parse_number("-"), 0.0);
        assert_eq!(parse_number(".x"), 0.0);
        assert_eq!(parse_number("L 2.5"), 0.0);
    }

    #[test]
    fn test_validate_select_choices() {
        let fields = vec![
            FormField::new(
                "Status",
                "status",
                FieldType::Select(vec![SelectOption::same("Pending"), SelectOption::same("Completed")]),
            )
            .required(),
            FormField::new(
                "Painter Name",
                "painterName",
                FieldType::Select(vec![SelectOption {
                    label: "Select Painter".to_string(),
                    value: String::new(),
                }]),
            ),
        ];

        let ok = validate(&fields, &input(&[("status", "Pending")]));
        assert!(ok.is_empty());

        let errors = validate(&fields, &input(&[("status", "Shipped"), ("painterName", "Zed")]));
        assert_eq!(errors.get("status"), Some("Status must be one of: Pending, Completed"));
        assert_eq!(
            errors.get("painterName"),
            Some("Painter Name has no options to choose from yet")
        );
    }

    #[test]
    fn test_validate_required() {
        let errors = validate(&mix_fields(), &input(&[("mixName", ""), ("quantity", "2")]));
        assert_eq!(errors.get("mixName"), Some("Mix Name is required"));
        assert_eq!(errors.get("baseColors"), Some("Base Colors is required"));
        assert_eq!(errors.get("ratios"), Some("Mixing Ratios is required"));
        assert_eq!(errors.get("quantity"), None);
        assert_eq!(errors.get("notes"), None);
    }

    #[test]
    fn test_coerce() {
        let values = coerce(
            &mix_fields(),
            &input(&[
                ("mixName", "Navy"),
                ("baseColors", "Blue, Black, White"),
                ("ratios", "50, 40, 10"),
                ("quantity", "oops"),
            ]),
        );
        assert_eq!(values.get("mixName"), &FormValue::Text("Navy".to_string()));
        assert_eq!(values.list("baseColors"), ["Blue", "Black", "White"]);
        assert_eq!(values.numbers("ratios"), [50.0, 40.0, 10.0]);
        assert_eq!(values.number("quantity"), 0.0);
        assert_eq!(values.get("notes"), &FormValue::Missing);
    }

    #[test]
    fn test_required_text() {
        let values = coerce(&mix_fields(), &input(&[("mixName", "Navy")]));
        assert_eq!(values.required_text("mixName", "Mix Name").unwrap(), "Navy");
        let err = values.required_text("notes", "Notes").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_set_clears_field_error() {
        let mut form = CreateForm::new("Log New Color Mix", mix_fields());
        assert!(!form.validate());
        assert!(form.errors().get("mixName").is_some());

        form.set("mixName", "Navy");
        assert!(form.errors().get("mixName").is_none());
        assert!(form.errors().get("ratios").is_some());
    }

    #[tokio::test]
    async fn test_submit_blocked_by_empty_required_field() {
        let mut form = CreateForm::new("Log New Color Mix", mix_fields());
        form.open();
        form.set("mixName", "");

        let mut called = false;
        let result = form
            .submit(|_values| {
                called = true;
                async { Ok(()) }
            })
            .await;

        assert!(!called);
        match result {
            Err(Error::Validation(errors)) => {
                assert_eq!(errors.get("mixName"), Some("Mix Name is required"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(form.is_open());
    }

    #[tokio::test]
    async fn test_submit_success_clears_and_closes() {
        let mut form = CreateForm::new("Log New Color Mix", mix_fields());
        form.open();
        form.set("mixName", "Navy");
        form.set("baseColors", "Blue, Black");
        form.set("ratios", "70, 30");
        form.set("quantity", "2.5");

        let saved = form
            .submit(|values| async move { Ok(values.numbers("ratios")) })
            .await
            .unwrap();

        assert_eq!(saved, [70.0, 30.0]);
        assert!(!form.is_open());
        assert!(!form.is_submitting());
        assert_eq!(form.input("mixName"), None);
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_input_for_retry() {
        let mut form = CreateForm::new("Log New Color Mix", mix_fields());
        form.open();
        form.set("mixName", "Navy");
        form.set("baseColors", "Blue");
        form.set("ratios", "100");
        form.set("quantity", "1");

        let result: Result<()> = form
            .submit(|_values| async {
                Err(Error::StoreUnavailable {
                    message: "offline".to_string(),
                })
            })
            .await;

        assert!(matches!(result, Err(Error::StoreUnavailable { .. })));
        assert!(form.is_open());
        assert!(!form.is_submitting());
        assert_eq!(form.input("mixName"), Some("Navy"));
    }

    #[tokio::test]
    async fn test_submit_records_conversion_errors() {
        let mut form = CreateForm::new("Log New Color Mix", mix_fields());
        form.set("mixName", "Navy");
        form.set("baseColors", "Blue");
        form.set("ratios", "100");
        form.set("quantity", "1");

        let result: Result<()> = form
            .submit(|_values| async {
                Err(ValidationErrors::single("quantity", "Quantity must be positive").into())
            })
            .await;

        assert!(result.is_err());
        assert_eq!(form.errors().get("quantity"), Some("Quantity must be positive"));
    }

    #[test]
    fn test_hints() {
        let fields = mix_fields();
        assert_eq!(fields[1].hint(), Some("Separate colors with commas"));
        assert!(fields[2].hint().unwrap().contains("50, 40, 10"));
        assert_eq!(fields[0].hint(), None);
    }
}

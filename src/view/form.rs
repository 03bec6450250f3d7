//! Create/edit form dialogs
//!
//! A form is a list of field specs keyed by wire name. Raw text input is
//! validated field by field, converted to typed JSON, and decoded into the
//! collection's create or update payload.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde_json::{Map, Number, Value};

use crate::client::models::Resource;
use crate::error::{FieldError, ValidationError};

/// Raw form input keyed by field name
pub type FormValues = BTreeMap<String, String>;

/// Whether the dialog creates a new entity or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// When a field must be filled in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Always,
    OnCreate,
    Optional,
}

/// Input type and constraints of a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Free text, optionally capped in characters
    Text { max_len: Option<usize> },
    /// Exactly `len` ASCII digits, kept as text
    Digits { len: usize },
    /// Integer greater than zero
    PositiveInt,
    /// Integer zero or greater
    NonNegativeInt,
    /// Decimal greater than zero
    PositiveDecimal,
    /// Calendar date, `YYYY-MM-DD`
    Date,
    /// Time of day, `HH:mm`
    Time,
    /// One of a fixed set of values
    Choice(&'static [&'static str]),
    /// Secret text; never prefilled
    Secret,
}

/// One field of a form
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Wire name
    pub name: &'static str,
    /// Human label
    pub label: &'static str,
    pub kind: FieldKind,
    pub requirement: Requirement,
    /// Edit mode shows the value but never sends it
    pub locked_on_edit: bool,
}

impl Field {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            requirement: Requirement::Always,
            locked_on_edit: false,
        }
    }

    pub const fn optional(mut self) -> Self {
        self.requirement = Requirement::Optional;
        self
    }

    pub const fn required_on_create(mut self) -> Self {
        self.requirement = Requirement::OnCreate;
        self
    }

    pub const fn locked_on_edit(mut self) -> Self {
        self.locked_on_edit = true;
        self
    }

    pub fn is_required(&self, mode: FormMode) -> bool {
        match self.requirement {
            Requirement::Always => true,
            Requirement::OnCreate => mode == FormMode::Create,
            Requirement::Optional => false,
        }
    }

    /// Short hint of the expected format, for prompts
    pub fn hint(&self) -> Option<String> {
        match self.kind {
            FieldKind::Text { max_len: Some(n) } => Some(format!("max {} chars", n)),
            FieldKind::Text { max_len: None } | FieldKind::Secret => None,
            FieldKind::Digits { len } => Some(format!("{} digits", len)),
            FieldKind::PositiveInt => Some("positive integer".to_string()),
            FieldKind::NonNegativeInt => Some("integer >= 0".to_string()),
            FieldKind::PositiveDecimal => Some("number > 0".to_string()),
            FieldKind::Date => Some("YYYY-MM-DD".to_string()),
            FieldKind::Time => Some("HH:mm".to_string()),
            FieldKind::Choice(options) => Some(options.join("|")),
        }
    }

    /// Validate one trimmed, non-empty input and convert it to JSON.
    /// Value sent for a blanked optional field
    fn cleared(&self) -> Value {
        match self.kind {
            FieldKind::PositiveInt | FieldKind::NonNegativeInt | FieldKind::PositiveDecimal => {
                Value::Null
            }
            _ => Value::String(String::new()),
        }
    }

    fn convert(&self, raw: &str) -> Result<Value, String> {
        match self.kind {
            FieldKind::Text { max_len } => {
                match max_len {
                    Some(max) if raw.chars().count() > max => {
                        Err(format!("must be at most {} characters", max))
                    }
                    _ => Ok(Value::String(raw.to_string())),
                }
            }
            FieldKind::Secret => Ok(Value::String(raw.to_string())),
            FieldKind::Digits { len } => {
                if raw.len() == len && raw.chars().all(|c| c.is_ascii_digit()) {
                    Ok(Value::String(raw.to_string()))
                } else {
                    Err(format!("must be exactly {} digits", len))
                }
            }
            FieldKind::PositiveInt => match raw.parse::<i64>() {
                Ok(n) if n > 0 => Ok(Value::from(n)),
                _ => Err("must be a positive integer".to_string()),
            },
            FieldKind::NonNegativeInt => match raw.parse::<i64>() {
                Ok(n) if n >= 0 => Ok(Value::from(n)),
                _ => Err("must be an integer of 0 or more".to_string()),
            },
            FieldKind::PositiveDecimal => match raw.parse::<f64>() {
                Ok(n) if n > 0.0 && n.is_finite() => Number::from_f64(n)
                    .map(Value::Number)
                    .ok_or_else(|| "must be a number greater than 0".to_string()),
                _ => Err("must be a number greater than 0".to_string()),
            },
            FieldKind::Date => {
                if raw.len() == 10 && NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok() {
                    Ok(Value::String(raw.to_string()))
                } else {
                    Err("must be a date in YYYY-MM-DD format".to_string())
                }
            }
            FieldKind::Time => {
                if raw.len() == 5 && NaiveTime::parse_from_str(raw, "%H:%M").is_ok() {
                    Ok(Value::String(raw.to_string()))
                } else {
                    Err("must be a time in HH:mm format".to_string())
                }
            }
            FieldKind::Choice(options) => {
                if options.contains(&raw) {
                    Ok(Value::String(raw.to_string()))
                } else {
                    Err(format!("must be one of: {}", options.join(", ")))
                }
            }
        }
    }
}

/// An entity with a create/edit form
pub trait FormResource: Resource {
    /// Fields in display order
    fn fields() -> &'static [Field];

    /// Current values of `self`, used to prefill the edit dialog.
    fn form_values(&self) -> FormValues {
        let mut values = FormValues::new();
        let Ok(Value::Object(map)) = serde_json::to_value(self) else {
            return values;
        };
        for field in Self::fields() {
            if field.kind == FieldKind::Secret {
                continue;
            }
            let text = match map.get(field.name) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                Some(Value::Bool(b)) => b.to_string(),
                _ => continue,
            };
            values.insert(field.name.to_string(), text);
        }
        values
    }
}

/// A validated submission ready for the resource client
#[derive(Debug)]
pub enum Submission<R: Resource> {
    Create(R::Create),
    Update(R::Id, R::Update),
}

/// Open create or edit dialog
#[derive(Debug, Clone)]
pub struct FormDialog<R: FormResource> {
    mode: FormMode,
    target: Option<R::Id>,
    values: FormValues,
}

impl<R: FormResource> FormDialog<R> {
    /// Empty dialog for a new entity
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            target: None,
            values: FormValues::new(),
        }
    }

    /// Dialog prefilled from `item`
    pub fn edit(item: &R) -> Self {
        Self {
            mode: FormMode::Edit,
            target: Some(item.id()),
            values: item.form_values(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn target(&self) -> Option<&R::Id> {
        self.target.as_ref()
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Current value of a field, if any
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Set a field. Unknown field names are rejected.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), ValidationError> {
        if !R::fields().iter().any(|f| f.name == name) {
            let known: Vec<&str> = R::fields().iter().map(|f| f.name).collect();
            return Err(ValidationError(vec![FieldError::new(
                name,
                format!("unknown field (expected one of: {})", known.join(", ")),
            )]));
        }
        self.values.insert(name.to_string(), value.into());
        Ok(())
    }

    /// Apply several `name=value` assignments.
    pub fn apply(&mut self, assignments: &FormValues) -> Result<(), ValidationError> {
        for (name, value) in assignments {
            self.set(name, value.clone())?;
        }
        Ok(())
    }

    /// Validate every field and build the submission.
    ///
    /// All failures are reported together, one entry per field.
    pub fn validate(&self) -> Result<Submission<R>, ValidationError> {
        let mut errors = Vec::new();
        let mut payload = Map::new();

        for field in R::fields() {
            if self.mode == FormMode::Edit && field.locked_on_edit {
                continue;
            }

            let raw = self.values.get(field.name).map(|v| v.trim()).unwrap_or("");
            if raw.is_empty() {
                if field.is_required(self.mode) {
                    errors.push(FieldError::new(field.name, "is required"));
                } else if self.mode == FormMode::Edit
                    && field.requirement == Requirement::Optional
                {
                    // blanking an optional field on edit clears it server-side
                    payload.insert(field.name.to_string(), field.cleared());
                }
                continue;
            }

            match field.convert(raw) {
                Ok(value) => {
                    payload.insert(field.name.to_string(), value);
                }
                Err(message) => errors.push(FieldError::new(field.name, message)),
            }
        }

        if !errors.is_empty() {
            return Err(ValidationError(errors));
        }

        let payload = Value::Object(payload);
        let malformed = |e: serde_json::Error| ValidationError(vec![FieldError::new("form", e.to_string())]);

        match (self.mode, &self.target) {
            (FormMode::Edit, Some(id)) => {
                let update = serde_json::from_value(payload).map_err(malformed)?;
                Ok(Submission::Update(id.clone(), update))
            }
            _ => {
                let create = serde_json::from_value(payload).map_err(malformed)?;
                Ok(Submission::Create(create))
            }
        }
    }
}

/// Parse `name=value` pairs from the command line.
pub fn parse_assignments<S: AsRef<str>>(pairs: &[S]) -> Result<FormValues, ValidationError> {
    let mut values = FormValues::new();
    let mut errors = Vec::new();
    for pair in pairs {
        let pair = pair.as_ref();
        match pair.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                values.insert(name.trim().to_string(), value.to_string());
            }
            _ => errors.push(FieldError::new(pair, "expected name=value")),
        }
    }
    if errors.is_empty() {
        Ok(values)
    } else {
        Err(ValidationError(errors))
    }
}

//! Registration form declaration and the serializable form state

use super::field::{FieldKind, FieldValue, FormField};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Titles of the wizard steps, in order. The last step is the review.
pub const STEP_TITLES: &[&str] = &["Personal Info", "Contact Details", "Account Setup", "Review"];

pub const GENDERS: &[&str] = &["male", "female", "other"];

pub const COUNTRIES: &[&str] = &[
    "Australia",
    "Canada",
    "France",
    "Germany",
    "India",
    "Japan",
    "United Kingdom",
    "United States",
];

pub const INTERESTS: &[&str] = &["tech", "sports", "music", "art", "math", "travel"];

/// A stored field value: single string, or an ordered list for checkbox groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StoredValue {
    One(String),
    Many(Vec<String>),
}

impl StoredValue {
    /// Convert a decoded JSON value. Non-string list items are dropped;
    /// numbers, booleans, null and objects have no stored form.
    fn from_json(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(Self::One(s)),
            serde_json::Value::Array(items) => Some(Self::Many(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        serde_json::Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            )),
            _ => None,
        }
    }
}

/// Mapping from field name to value. A missing key means the field is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormState(BTreeMap<String, StoredValue>);

/// Entries are decoded one by one so a single odd value only loses itself
impl<'de> Deserialize<'de> for FormState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let entries = raw
            .into_iter()
            .filter_map(|(name, value)| match StoredValue::from_json(value) {
                Some(value) => Some((name, value)),
                None => {
                    tracing::debug!("Skipping stored value of unsupported type for {name}");
                    None
                }
            })
            .collect();
        Ok(Self(entries))
    }
}

impl FormState {
    pub fn get(&self, name: &str) -> Option<&StoredValue> {
        self.0.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: StoredValue) {
        self.0.insert(name.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StoredValue)> {
        self.0.iter()
    }
}

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// The registration form, paginated into steps.
///
/// Field navigation (the [`Form`] trait) operates on the focused step only.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    /// `steps[0]` holds the fields of step 1
    steps: Vec<Vec<FormField>>,
    /// 1-based step whose fields receive input
    focused_step: usize,
    pub active_field_index: usize,
}

impl RegistrationForm {
    pub fn new() -> Self {
        let steps = vec![
            vec![
                FormField::text("firstName", "First Name", FieldKind::Text).required(),
                FormField::text("lastName", "Last Name", FieldKind::Text).required(),
                FormField::text("dateOfBirth", "Date of Birth (YYYY-MM-DD)", FieldKind::Date)
                    .required(),
                FormField::radio("gender", "Gender", GENDERS).required(),
            ],
            vec![
                FormField::text("email", "Email", FieldKind::Email).required(),
                FormField::text("phone", "Phone", FieldKind::Tel).required(),
                FormField::text("address", "Street Address", FieldKind::Text).required(),
                FormField::text("city", "City", FieldKind::Text).required(),
                FormField::select("country", "Country", COUNTRIES).required(),
            ],
            vec![
                FormField::text("username", "Username", FieldKind::Text).required(),
                FormField::text("password", "Password", FieldKind::Password).required(),
                FormField::text("confirmPassword", "Confirm Password", FieldKind::Password)
                    .required(),
                FormField::checkbox("interests", "Interests", INTERESTS),
            ],
            // Review step has no inputs
            Vec::new(),
        ];
        debug_assert_eq!(steps.len(), STEP_TITLES.len());

        Self {
            steps,
            focused_step: 1,
            active_field_index: 0,
        }
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    /// Fields declared on a 1-based step (empty for out-of-range steps)
    pub fn step_fields(&self, step: usize) -> &[FormField] {
        step.checked_sub(1)
            .and_then(|i| self.steps.get(i))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn step_fields_mut(&mut self, step: usize) -> &mut [FormField] {
        match step.checked_sub(1).and_then(|i| self.steps.get_mut(i)) {
            Some(fields) => fields.as_mut_slice(),
            None => &mut [],
        }
    }

    /// Move field input to another step, activating its first field
    pub fn focus_step(&mut self, step: usize) {
        self.focused_step = step;
        self.active_field_index = 0;
    }

    pub fn focused_step(&self) -> usize {
        self.focused_step
    }

    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.steps.iter().flatten()
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.steps.iter_mut().flatten().find(|f| f.name == name)
    }

    /// Text value of a named field, empty when absent
    pub fn text(&self, name: &str) -> &str {
        self.field(name).map(FormField::as_text).unwrap_or_default()
    }

    /// Collect the current values.
    ///
    /// Text fields are always present. Radio and select fields only when an
    /// option is chosen; checkbox groups only when at least one box is checked.
    pub fn values(&self) -> FormState {
        let mut state = FormState::default();
        for field in self.fields() {
            match &field.value {
                FieldValue::Text(s) => state.insert(field.name, StoredValue::One(s.clone())),
                FieldValue::Choice(_) => {
                    if let Some(selected) = field.selected() {
                        state.insert(field.name, StoredValue::One(selected.to_string()));
                    }
                }
                FieldValue::Multi(_) => {
                    let checked = field.checked_values();
                    if !checked.is_empty() {
                        state.insert(
                            field.name,
                            StoredValue::Many(checked.into_iter().map(String::from).collect()),
                        );
                    }
                }
            }
        }
        state
    }

    /// Populate fields from a stored state.
    ///
    /// Unknown names, unknown option values and shape mismatches are skipped.
    /// Returns the number of fields that received a value.
    pub fn apply(&mut self, state: &FormState) -> usize {
        let mut applied = 0;
        for field in self.steps.iter_mut().flatten() {
            let Some(value) = state.get(field.name) else {
                continue;
            };
            let accepted = match (field.kind, value) {
                (FieldKind::Radio | FieldKind::Select, StoredValue::One(v)) => field.select_value(v),
                (FieldKind::Checkbox, StoredValue::Many(values)) => values
                    .iter()
                    .fold(false, |any, v| field.select_value(v) || any),
                (kind, StoredValue::One(v)) if kind.is_text_like() => {
                    field.set_text(v.clone());
                    true
                }
                _ => false,
            };
            if accepted {
                applied += 1;
            }
        }

        let unknown = state
            .iter()
            .filter(|(name, _)| self.field(name).is_none())
            .count();
        if unknown > 0 {
            tracing::debug!("Ignoring {unknown} stored values for unknown fields");
        }
        applied
    }

    /// Clear every field and return focus to step 1
    pub fn clear(&mut self) {
        self.steps.iter_mut().flatten().for_each(FormField::clear);
        self.focus_step(1);
    }

    /// Toggle reveal on the active field if it is a password field
    pub fn toggle_reveal(&mut self) -> bool {
        match self.get_active_field_mut() {
            Some(field) if field.kind == FieldKind::Password => {
                field.revealed = !field.revealed;
                true
            }
            _ => false,
        }
    }
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for RegistrationForm {
    fn field_count(&self) -> usize {
        self.step_fields(self.focused_step).len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.field_count().saturating_sub(1));
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        let index = self.active_field_index;
        let step = self.focused_step;
        self.step_fields_mut(step).get_mut(index)
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.step_fields(self.focused_step).get(index)
    }
}

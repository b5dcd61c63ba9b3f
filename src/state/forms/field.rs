//! Form field value objects

/// Input kind of a field; drives editing, rendering and rule selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Date,
    Password,
    Select,
    Radio,
    Checkbox,
}

impl FieldKind {
    /// Fields edited by typing characters
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            Self::Text | Self::Email | Self::Tel | Self::Date | Self::Password
        )
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// Index of the chosen option (radio group or select)
    Choice(Option<usize>),
    /// One flag per declared option (checkbox group)
    Multi(Vec<bool>),
}

/// A single form field: its declaration, current value and inline error slot
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub options: &'static [&'static str],
    pub value: FieldValue,
    /// Highlighted option for radio, select and checkbox fields
    pub option_cursor: usize,
    /// Inline error message; `Some` means the field is shown as invalid
    pub error: Option<&'static str>,
    /// Password fields render masked unless revealed
    pub revealed: bool,
}

impl FormField {
    /// Create a new typed text field
    pub fn text(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            options: &[],
            value: FieldValue::Text(String::new()),
            option_cursor: 0,
            error: None,
            revealed: false,
        }
    }

    /// Create a new radio group
    pub fn radio(name: &'static str, label: &'static str, options: &'static [&'static str]) -> Self {
        Self::choice(name, label, FieldKind::Radio, options)
    }

    /// Create a new single-choice select
    pub fn select(name: &'static str, label: &'static str, options: &'static [&'static str]) -> Self {
        Self::choice(name, label, FieldKind::Select, options)
    }

    /// Create a new checkbox group sharing one field name
    pub fn checkbox(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self {
            value: FieldValue::Multi(vec![false; options.len()]),
            options,
            ..Self::text(name, label, FieldKind::Checkbox)
        }
    }

    fn choice(
        name: &'static str,
        label: &'static str,
        kind: FieldKind,
        options: &'static [&'static str],
    ) -> Self {
        Self {
            value: FieldValue::Choice(None),
            options,
            ..Self::text(name, label, kind)
        }
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Get the text value (empty for choice and checkbox fields)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }

    /// The chosen option of a radio group or select
    pub fn selected(&self) -> Option<&'static str> {
        match &self.value {
            FieldValue::Choice(Some(i)) => self.options.get(*i).copied(),
            _ => None,
        }
    }

    /// Checked options of a checkbox group, in declaration order
    pub fn checked_values(&self) -> Vec<&'static str> {
        match &self.value {
            FieldValue::Multi(flags) => self
                .options
                .iter()
                .zip(flags)
                .filter(|(_, checked)| **checked)
                .map(|(option, _)| *option)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Whether the field holds no user input at all
    pub fn is_blank(&self) -> bool {
        match &self.value {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Choice(choice) => choice.is_none(),
            FieldValue::Multi(flags) => !flags.iter().any(|f| *f),
        }
    }

    /// Replace the text value
    pub fn set_text(&mut self, value: impl Into<String>) {
        if let FieldValue::Text(s) = &mut self.value {
            *s = value.into();
        }
    }

    /// Push a character to a text field. Returns true if the value changed.
    pub fn push_char(&mut self, c: char) -> bool {
        match &mut self.value {
            FieldValue::Text(s) => {
                s.push(c);
                true
            }
            _ => false,
        }
    }

    /// Remove the last character. Returns true if the value changed.
    pub fn pop_char(&mut self) -> bool {
        match &mut self.value {
            FieldValue::Text(s) => s.pop().is_some(),
            _ => false,
        }
    }

    /// Move the option cursor right, wrapping
    pub fn next_option(&mut self) {
        if !self.options.is_empty() {
            self.option_cursor = (self.option_cursor + 1) % self.options.len();
        }
    }

    /// Move the option cursor left, wrapping
    pub fn prev_option(&mut self) {
        if self.options.is_empty() {
            return;
        }
        if self.option_cursor == 0 {
            self.option_cursor = self.options.len() - 1;
        } else {
            self.option_cursor -= 1;
        }
    }

    /// Choose (radio, select) or toggle (checkbox) the highlighted option.
    /// Returns true if the value changed.
    pub fn activate_option(&mut self) -> bool {
        let cursor = self.option_cursor;
        match &mut self.value {
            FieldValue::Choice(choice) if cursor < self.options.len() => {
                let changed = *choice != Some(cursor);
                *choice = Some(cursor);
                changed
            }
            FieldValue::Multi(flags) => match flags.get_mut(cursor) {
                Some(flag) => {
                    *flag = !*flag;
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    /// Choose the option with the given value. Returns false if no option matches.
    pub fn select_value(&mut self, value: &str) -> bool {
        let Some(index) = self.options.iter().position(|o| *o == value) else {
            return false;
        };
        match &mut self.value {
            FieldValue::Choice(choice) => {
                *choice = Some(index);
                self.option_cursor = index;
                true
            }
            FieldValue::Multi(flags) => match flags.get_mut(index) {
                Some(flag) => {
                    *flag = true;
                    true
                }
                None => false,
            },
            FieldValue::Text(_) => false,
        }
    }

    /// Clear the field value and its error
    pub fn clear(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => s.clear(),
            FieldValue::Choice(choice) => *choice = None,
            FieldValue::Multi(flags) => flags.iter_mut().for_each(|f| *f = false),
        }
        self.option_cursor = 0;
        self.error = None;
        self.revealed = false;
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) if self.kind == FieldKind::Password && !self.revealed => {
                "•".repeat(s.chars().count())
            }
            FieldValue::Text(s) => s.clone(),
            FieldValue::Choice(_) => self.selected().unwrap_or_default().to_string(),
            FieldValue::Multi(_) => self.checked_values().join(", "),
        }
    }
}

//! Add-plant form: holds the raw field text and validates it on submit

use std::num::NonZeroU32;

use thiserror::Error;

use crate::notice::Notice;
use crate::plant::MAX_INTERVAL_DAYS;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingField,

    #[error("Interval must be greater than 0")]
    NonPositiveInterval,

    #[error("Interval can't be longer than {} days", MAX_INTERVAL_DAYS)]
    IntervalTooLong,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Name,
    Interval,
}

#[derive(Debug, Clone, Default)]
pub struct AddPlantForm {
    pub name: String,
    pub interval: String,
    pub focus: FormField,
}

/// Whole-string integer parse; anything else is `None`
pub fn parse_interval(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

/// A positive whole number, however large
fn is_digits(text: &str) -> bool {
    let digits = text.trim();
    let digits = digits.strip_prefix('+').unwrap_or(digits);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl AddPlantForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(name: impl Into<String>, interval: impl Into<String>) -> Self {
        Self { name: name.into(), interval: interval.into(), focus: FormField::Name }
    }

    /// Check the fields without touching them
    pub fn validate(&self) -> Result<(String, NonZeroU32), ValidationError> {
        let name = self.name.trim();
        // Only the name is trimmed here; blank interval text fails the parse
        if name.is_empty() || self.interval.is_empty() {
            return Err(ValidationError::MissingField);
        }

        let days = match parse_interval(&self.interval) {
            Some(days) if days > 0 => days,
            None if is_digits(&self.interval) => return Err(ValidationError::IntervalTooLong),
            _ => return Err(ValidationError::NonPositiveInterval),
        };
        if days > i64::from(MAX_INTERVAL_DAYS) {
            return Err(ValidationError::IntervalTooLong);
        }
        let interval = u32::try_from(days)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(ValidationError::NonPositiveInterval)?;

        Ok((name.to_string(), interval))
    }

    /// Validate, hand the plant to `on_add`, then clear the fields.
    ///
    /// On error nothing is emitted and the fields keep their text.
    pub fn submit(&mut self, on_add: impl FnOnce(&str, NonZeroU32)) -> Result<Notice, ValidationError> {
        let (name, interval) = self.validate()?;
        on_add(&name, interval);
        self.clear();
        Ok(Notice::success(
            "Plant Added! 🌱",
            "Your new plant has been added successfully.",
        ))
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.interval.clear();
        self.focus = FormField::Name;
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            FormField::Name => FormField::Interval,
            FormField::Interval => FormField::Name,
        };
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::Interval => &mut self.interval,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }
}

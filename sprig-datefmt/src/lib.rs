//! Named date formats for generated admin UI components.
//!
//! Mirrors the date display component the scaffolded UI uses: a value, a
//! format name, and an optional locale override produce a formatted string,
//! or nothing when the formatting context is incomplete. Rendering uses
//! fixed en-style patterns; the locale only establishes that a formatting
//! context exists.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// A named display format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `Jun 15, 2015, 9:03:01 PM`
    Medium,
    /// `9:03:01 PM`
    MediumTime,
    /// `June 15, 2015`
    LongDate,
    /// `6/15/15, 9:03 PM`
    Short,
}

impl DateFormat {
    /// Look up a format by its display name. Unrecognized names mean no
    /// formatting is applied.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "medium" => Some(DateFormat::Medium),
            "mediumTime" => Some(DateFormat::MediumTime),
            "longDate" => Some(DateFormat::LongDate),
            "short" => Some(DateFormat::Short),
            _ => None,
        }
    }

    /// The strftime pattern this format renders with.
    pub fn pattern(&self) -> &'static str {
        match self {
            DateFormat::Medium => "%b %-d, %Y, %-I:%M:%S %p",
            DateFormat::MediumTime => "%-I:%M:%S %p",
            DateFormat::LongDate => "%B %-d, %Y",
            DateFormat::Short => "%-m/%-d/%y, %-I:%M %p",
        }
    }
}

/// A date value: either an actual datetime or date-like text.
#[derive(Debug, Clone)]
pub enum DateValue {
    DateTime(NaiveDateTime),
    Text(String),
}

impl DateValue {
    /// Resolve to a datetime, parsing textual values.
    fn resolve(&self) -> Option<NaiveDateTime> {
        match self {
            DateValue::DateTime(dt) => Some(*dt),
            DateValue::Text(text) => parse_date_text(text),
        }
    }
}

impl From<NaiveDateTime> for DateValue {
    fn from(dt: NaiveDateTime) -> Self {
        DateValue::DateTime(dt)
    }
}

impl From<&str> for DateValue {
    fn from(text: &str) -> Self {
        DateValue::Text(text.to_string())
    }
}

impl From<String> for DateValue {
    fn from(text: String) -> Self {
        DateValue::Text(text)
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Formats date values against the named formats.
#[derive(Debug, Clone, Default)]
pub struct DateFormatter {
    locale: Option<String>,
}

impl DateFormatter {
    /// A formatter with no locale context of its own.
    pub fn new() -> Self {
        Self::default()
    }

    /// A formatter carrying a locale context.
    pub fn with_locale(locale: impl Into<String>) -> Self {
        Self {
            locale: Some(locale.into()),
        }
    }

    /// Format a value with a named format.
    ///
    /// Returns `None` when no locale is available from either the override
    /// or the formatter, when the format name is unrecognized, or when a
    /// textual value does not parse as a date.
    pub fn format(
        &self,
        value: &DateValue,
        format_name: &str,
        locale_override: Option<&str>,
    ) -> Option<String> {
        locale_override.or(self.locale.as_deref())?;
        let format = DateFormat::from_name(format_name)?;
        let datetime = value.resolve()?;
        Some(datetime.format(format.pattern()).to_string())
    }
}

//! Form-side types: editable fields, their string values, and the
//! conversions from form strings to wire payloads.

use crate::model::game::{Game, GameCreate, GamePatch, Platform};
use crate::validate::ValidationReport;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::fmt;
use thiserror::Error;

/// The five editable fields, in rule-precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Platform,
    Released,
    Genre,
    Developer,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Platform,
        Field::Released,
        Field::Genre,
        Field::Developer,
    ];

    /// The form/wire key for this field.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Platform => "platform",
            Field::Released => "released",
            Field::Genre => "genre",
            Field::Developer => "developer",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A release-date string that does not parse as `YYYY-MM-DD`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Release date must be a valid date (YYYY-MM-DD)")]
pub struct InvalidReleaseDate;

/// Parses a form date (`YYYY-MM-DD`) into the wire representation: midnight
/// UTC of that day.
pub fn parse_release_date(value: &str) -> Result<DateTime<Utc>, InvalidReleaseDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| InvalidReleaseDate)
}

/// Formats a wire date-time back into the form representation.
pub fn format_release_date(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}

/// The current form strings of one edit session.
///
/// Everything is a string here, exactly as a form holds it: `released` as
/// `YYYY-MM-DD`, absent optionals as `""`. Conversion to wire values happens
/// per field at commit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    pub name: String,
    pub platform: String,
    pub released: String,
    pub genre: String,
    pub developer: String,
}

impl FieldValues {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Platform => &self.platform,
            Field::Released => &self.released,
            Field::Genre => &self.genre,
            Field::Developer => &self.developer,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Platform => self.platform = value,
            Field::Released => self.released = value,
            Field::Genre => self.genre = value,
            Field::Developer => self.developer = value,
        }
    }

    /// Builds the one-field patch for an autosave commit.
    ///
    /// The error is the field-scoped message shown to the user; it resolves
    /// the edit locally, exactly like a validation rejection.
    pub fn patch_for(&self, field: Field) -> Result<GamePatch, String> {
        let mut patch = GamePatch::default();
        match field {
            Field::Name => patch.name = Some(self.name.clone()),
            Field::Platform => {
                patch.platform = Some(self.platform.parse::<Platform>().map_err(|e| e.to_string())?)
            }
            Field::Released => {
                patch.released = Some(parse_release_date(&self.released).map_err(|e| e.to_string())?)
            }
            Field::Genre => patch.genre = Some(self.genre.clone()),
            Field::Developer => patch.developer = Some(self.developer.clone()),
        }
        Ok(patch)
    }

    /// Builds the whole-record patch for the save-all path.
    ///
    /// All conversion failures are reported at once, keyed by field.
    pub fn full_patch(&self) -> Result<GamePatch, ValidationReport> {
        let mut report = ValidationReport::default();
        let mut patch = GamePatch {
            name: Some(self.name.clone()),
            platform: None,
            released: None,
            genre: Some(self.genre.clone()),
            developer: Some(self.developer.clone()),
        };

        match self.platform.parse::<Platform>() {
            Ok(platform) => patch.platform = Some(platform),
            Err(e) => report.insert(Field::Platform, e.to_string()),
        }
        match parse_release_date(&self.released) {
            Ok(released) => patch.released = Some(released),
            Err(e) => report.insert(Field::Released, e.to_string()),
        }

        if report.is_empty() {
            Ok(patch)
        } else {
            Err(report)
        }
    }

    /// Builds the create payload for a new record. Blank optionals are
    /// omitted; on creation there is nothing to clear.
    pub fn to_create(&self) -> Result<GameCreate, ValidationReport> {
        let mut report = ValidationReport::default();
        let platform = match self.platform.parse::<Platform>() {
            Ok(platform) => Some(platform),
            Err(e) => {
                report.insert(Field::Platform, e.to_string());
                None
            }
        };
        let released = match parse_release_date(&self.released) {
            Ok(released) => Some(released),
            Err(e) => {
                report.insert(Field::Released, e.to_string());
                None
            }
        };

        if !report.is_empty() {
            return Err(report);
        }
        // Both options are present when the report is empty.
        let (Some(platform), Some(released)) = (platform, released) else {
            unreachable!("conversion produced no value and no error");
        };

        Ok(GameCreate {
            name: self.name.clone(),
            platform,
            released,
            genre: (!self.genre.is_empty()).then(|| self.genre.clone()),
            developer: (!self.developer.is_empty()).then(|| self.developer.clone()),
        })
    }
}

impl From<&Game> for FieldValues {
    /// Seeds form strings from a stored record: ISO date-time becomes
    /// `YYYY-MM-DD`, absent optionals become `""`.
    fn from(game: &Game) -> Self {
        Self {
            name: game.name.clone(),
            platform: game.platform.to_string(),
            released: format_release_date(game.released),
            genre: game.genre.clone().unwrap_or_default(),
            developer: game.developer.clone().unwrap_or_default(),
        }
    }
}

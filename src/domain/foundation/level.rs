//! Proficiency level value object.
//!
//! A level is either a rating on the 0-6 scale or the "not concerned"
//! sentinel, meaning the skill does not apply to the respondent.
//! Serialized as a bare integer or the string `"nc"`; `"NC"` is also
//! accepted on input because catalog level tables use upper case.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::ValidationError;

/// A skill proficiency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// A numeric rating between [`Level::MIN`] and [`Level::MAX`].
    Rated(u8),
    /// The skill does not apply.
    NotConcerned,
}

impl Level {
    /// Lowest rating.
    pub const MIN: u8 = 0;

    /// Highest rating.
    pub const MAX: u8 = 6;

    /// Creates a rated level, rejecting values above [`Level::MAX`].
    pub fn rated(value: u8) -> Result<Self, ValidationError> {
        if value > Self::MAX {
            return Err(ValidationError::out_of_range(
                "level",
                Self::MIN,
                Self::MAX,
                value,
            ));
        }
        Ok(Self::Rated(value))
    }

    /// Returns the numeric rating, or `None` for not-concerned.
    pub fn as_rating(&self) -> Option<u8> {
        match self {
            Level::Rated(value) => Some(*value),
            Level::NotConcerned => None,
        }
    }

    /// Returns true for the not-concerned sentinel.
    pub fn is_not_concerned(&self) -> bool {
        matches!(self, Level::NotConcerned)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Rated(value) => write!(f, "{}", value),
            Level::NotConcerned => f.write_str("NC"),
        }
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Level::Rated(value) => serializer.serialize_u8(*value),
            Level::NotConcerned => serializer.serialize_str("nc"),
        }
    }
}

struct LevelVisitor;

impl<'de> Visitor<'de> for LevelVisitor {
    type Value = Level;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an integer between {} and {} or \"nc\"", Level::MIN, Level::MAX)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Level, E> {
        u8::try_from(value)
            .ok()
            .and_then(|v| Level::rated(v).ok())
            .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(value), &self))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Level, E> {
        u64::try_from(value)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
            .and_then(|v| self.visit_u64(v))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Level, E> {
        if value.fract() == 0.0 && value >= 0.0 {
            self.visit_u64(value as u64)
        } else {
            Err(E::invalid_value(de::Unexpected::Float(value), &self))
        }
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Level, E> {
        if value.eq_ignore_ascii_case("nc") {
            Ok(Level::NotConcerned)
        } else {
            Err(E::invalid_value(de::Unexpected::Str(value), &self))
        }
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LevelVisitor)
    }
}

//! Skill definitions as supplied by the catalog bundle.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::foundation::{CategoryId, Level, RoleId, SkillId};

/// Expected levels for one role, ordered junior, confirmed, senior, expert.
pub type ExpectedLevels = [Level; 4];

/// Kind of external learning resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    #[default]
    Documentation,
    Tutorial,
    Course,
    Book,
    Video,
}

/// An external learning resource attached to a skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub url: String,
    pub title: String,
    #[serde(default, rename = "type")]
    pub kind: ResourceKind,
}

/// A skill with its per-role expectations.
///
/// Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub category: CategoryId,

    /// Display name of the category, stamped by the data packaging step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,

    #[serde(default)]
    pub description: String,

    /// Roles for which this skill is declared core on the skill itself.
    #[serde(default)]
    pub core_roles: Vec<RoleId>,

    /// Role -> expected levels.
    #[serde(default)]
    pub levels: BTreeMap<RoleId, ExpectedLevels>,

    #[serde(default, deserialize_with = "level_keyed")]
    pub level_descriptions: BTreeMap<u8, String>,

    #[serde(
        default,
        deserialize_with = "level_keyed",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub behavioral_indicators: BTreeMap<u8, Vec<String>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,

    /// Tips keyed by transition label, e.g. `"1→2"`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub improvement_tips: BTreeMap<String, String>,
}

impl Skill {
    /// Returns the expected levels for a role, if the skill defines them.
    pub fn expected_levels(&self, role: &RoleId) -> Option<&ExpectedLevels> {
        self.levels.get(role)
    }

    /// Returns true if the skill has an expected-level entry for `role`.
    pub fn has_levels_for(&self, role: &RoleId) -> bool {
        self.levels.contains_key(role)
    }

    /// Returns true if at least one role has an expected-level entry.
    pub fn has_any_levels(&self) -> bool {
        !self.levels.is_empty()
    }

    /// Returns the description text for a rated level.
    pub fn level_description(&self, level: Level) -> Option<&str> {
        level
            .as_rating()
            .and_then(|rating| self.level_descriptions.get(&rating))
            .map(String::as_str)
    }

    /// Returns true if the skill itself lists `role` among its core roles.
    pub fn declares_core_for(&self, role: &RoleId) -> bool {
        self.core_roles.contains(role)
    }
}

/// Map key naming a level. Catalog sources write these as integers or as
/// digit strings (JSON object keys are always strings).
#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct LevelKey(u8);

impl<'de> Deserialize<'de> for LevelKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LevelKeyVisitor;

        impl<'de> Visitor<'de> for LevelKeyVisitor {
            type Value = LevelKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a level number as an integer or digit string")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<LevelKey, E> {
                u8::try_from(value)
                    .map(LevelKey)
                    .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<LevelKey, E> {
                u8::try_from(value)
                    .map(LevelKey)
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<LevelKey, E> {
                value
                    .trim()
                    .parse::<u8>()
                    .map(LevelKey)
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
            }
        }

        deserializer.deserialize_any(LevelKeyVisitor)
    }
}

fn level_keyed<'de, D, V>(deserializer: D) -> Result<BTreeMap<u8, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    let raw = BTreeMap::<LevelKey, V>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(key, value)| (key.0, value)).collect())
}

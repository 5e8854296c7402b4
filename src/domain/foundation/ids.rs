//! Strongly-typed identifier value objects.
//!
//! Catalog identifiers are human-authored slugs (`sql_basics`, `data_analyst`)
//! rather than generated UUIDs, so each wraps a `String`.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use super::ValidationError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier without validation.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Creates an identifier, rejecting blank values.
            pub fn try_new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                Ok(Self(value))
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Unique identifier of a skill in the catalog.
    SkillId,
    "skill_id"
);

string_id!(
    /// Identifier of a job role (e.g. `data_analyst`).
    RoleId,
    "role_id"
);

string_id!(
    /// Identifier of a skill group, or the synthetic ungrouped bucket.
    GroupId,
    "group_id"
);

string_id!(
    /// Identifier of a skill category (e.g. `engineering`).
    CategoryId,
    "category_id"
);

impl GroupId {
    /// Identifier of the implicit bucket holding ungrouped skills.
    pub const OTHER: &'static str = "other";

    /// Returns the synthetic "other" group identifier.
    pub fn other() -> Self {
        Self::new(Self::OTHER)
    }

    /// Returns true for the synthetic "other" group.
    pub fn is_other(&self) -> bool {
        self.0 == Self::OTHER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn try_new_rejects_blank_identifier() {
        assert_eq!(
            SkillId::try_new("  "),
            Err(ValidationError::empty_field("skill_id"))
        );
        assert!(RoleId::try_new("data_analyst").is_ok());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&SkillId::new("sql_basics")).unwrap();
        assert_eq!(json, "\"sql_basics\"");

        let back: CategoryId = serde_json::from_str("\"engineering\"").unwrap();
        assert_eq!(back.as_str(), "engineering");
    }

    #[test]
    fn ids_can_be_looked_up_by_str() {
        let mut map = BTreeMap::new();
        map.insert(SkillId::from("python"), 3);
        assert_eq!(map.get("python"), Some(&3));
    }

    #[test]
    fn other_group_is_recognised() {
        assert!(GroupId::other().is_other());
        assert!(!GroupId::from("data_fundamentals").is_other());
    }
}

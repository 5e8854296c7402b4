//! Declarative inference rules.
//!
//! A rule watches one source skill. Each clause pairs a comparison against
//! the source's numeric answer with the targets it suggests levels for:
//!
//! ```yaml
//! source: sql_basics
//! rules:
//!   - condition: ">= 3"
//!     targets:
//!       - { skill: python_basics, suggestion: 2, confidence: 0.8 }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Confidence, SkillId};

/// Comparison operator of a rule condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    AtLeast,
    AtMost,
    GreaterThan,
    LessThan,
    Equal,
}

impl Comparison {
    // Longest tokens first so ">=" is not read as ">".
    const TOKENS: [(&'static str, Comparison); 6] = [
        ("==", Comparison::Equal),
        (">=", Comparison::AtLeast),
        ("<=", Comparison::AtMost),
        (">", Comparison::GreaterThan),
        ("<", Comparison::LessThan),
        ("=", Comparison::Equal),
    ];

    /// Applies the operator as `lhs <op> rhs`.
    pub fn evaluate(&self, lhs: u32, rhs: u32) -> bool {
        match self {
            Comparison::AtLeast => lhs >= rhs,
            Comparison::AtMost => lhs <= rhs,
            Comparison::GreaterThan => lhs > rhs,
            Comparison::LessThan => lhs < rhs,
            Comparison::Equal => lhs == rhs,
        }
    }

    /// Splits a leading operator token off `input`.
    fn split_prefix(input: &str) -> Option<(Comparison, &str)> {
        Self::TOKENS
            .iter()
            .find_map(|(token, op)| input.strip_prefix(token).map(|rest| (*op, rest)))
    }
}

/// A rule condition such as `">= 3"`.
///
/// Keeps the authored text so a malformed condition survives a
/// serialization round trip; a malformed condition never holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Condition {
    text: String,
    test: Option<(Comparison, u32)>,
}

impl Condition {
    /// Parses `<operator><whitespace?><non-negative integer>`.
    pub fn parse(text: impl Into<String>) -> Self {
        let text = text.into();
        let test = Self::parse_test(&text);
        Self { text, test }
    }

    fn parse_test(text: &str) -> Option<(Comparison, u32)> {
        let (op, rest) = Comparison::split_prefix(text.trim())?;
        let digits = rest.trim_start();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(|threshold| (op, threshold))
    }

    /// Returns true when the text parsed into an operator and threshold.
    pub fn is_well_formed(&self) -> bool {
        self.test.is_some()
    }

    /// Evaluates the condition against a numeric level.
    pub fn holds(&self, level: u8) -> bool {
        match self.test {
            Some((op, threshold)) => op.evaluate(u32::from(level), threshold),
            None => false,
        }
    }

    /// Returns the authored text.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<String> for Condition {
    fn from(text: String) -> Self {
        Self::parse(text)
    }
}

impl From<Condition> for String {
    fn from(condition: Condition) -> Self {
        condition.text
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A skill that receives a suggested level when a clause holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceTarget {
    pub skill: SkillId,
    pub suggestion: u8,
    pub confidence: Confidence,
}

/// One condition and the targets it drives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleClause {
    pub condition: Condition,
    #[serde(default)]
    pub targets: Vec<InferenceTarget>,
}

/// All clauses attached to one source skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceRule {
    pub source: SkillId,
    #[serde(default, rename = "rules")]
    pub clauses: Vec<RuleClause>,
}

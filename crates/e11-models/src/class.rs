//! Safety-equipment class vocabulary.
//!
//! The detector reports one of a fixed, closed set of labels:
//!
//! - `fire_extinguisher`
//! - `oxygen_tank`
//! - `toolkit`

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Object class recognised by the space-station safety model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SafetyClass {
    /// Handheld fire extinguisher.
    FireExtinguisher,

    /// Pressurised oxygen tank.
    OxygenTank,

    /// Maintenance toolkit.
    Toolkit,
}

impl SafetyClass {
    /// All classes, in model output-index order.
    pub const ALL: &'static [SafetyClass] = &[
        SafetyClass::FireExtinguisher,
        SafetyClass::OxygenTank,
        SafetyClass::Toolkit,
    ];

    /// Returns the wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            SafetyClass::FireExtinguisher => "fire_extinguisher",
            SafetyClass::OxygenTank => "oxygen_tank",
            SafetyClass::Toolkit => "toolkit",
        }
    }

    /// Wire labels of the full vocabulary.
    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(SafetyClass::as_str).collect()
    }

    /// Returns true if `label` belongs to the vocabulary.
    pub fn is_known_label(label: &str) -> bool {
        Self::ALL.iter().any(|c| c.as_str() == label)
    }
}

impl fmt::Display for SafetyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SafetyClass {
    type Err = SafetyClassParseError;

    /// Only the exact wire labels parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| SafetyClassParseError(s.to_string()))
    }
}

#[derive(Debug, Error)]
#[error("Unknown safety class: {0}")]
pub struct SafetyClassParseError(String);

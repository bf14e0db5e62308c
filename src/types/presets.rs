//! Preset types

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Preset families under `/presets/{kind}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PresetKind {
    Import,
    Export,
    Marks,
    Plan,
    Report,
    Cut,
    /// Any other family the server exposes
    Custom(String),
}

impl PresetKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Import => "import",
            Self::Export => "export",
            Self::Marks => "marks",
            Self::Plan => "plan",
            Self::Report => "report",
            Self::Cut => "cut",
            Self::Custom(s) => s,
        }
    }
}

impl fmt::Display for PresetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for PresetKind {
    fn from(s: &str) -> Self {
        match s {
            "import" => Self::Import,
            "export" => Self::Export,
            "marks" => Self::Marks,
            "plan" => Self::Plan,
            "report" => Self::Report,
            "cut" => Self::Cut,
            other => Self::Custom(other.to_string()),
        }
    }
}

/// Body of `POST /presets/{kind}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePreset {
    pub name: String,
    pub settings: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_kinds_parse_and_custom_passes_through() {
        assert_eq!(PresetKind::from("cut"), PresetKind::Cut);
        assert_eq!(PresetKind::from("step-repeat"), PresetKind::Custom("step-repeat".into()));
        assert_eq!(PresetKind::Custom("step-repeat".into()).to_string(), "step-repeat");
    }
}

//! Material library types

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::utils::units::Measurement;

/// Library collections exposed under `/libraries/{kind}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryKind {
    Stocks,
    Plates,
    Presses,
    Dies,
    Marks,
}

impl LibraryKind {
    pub const ALL: [LibraryKind; 5] = [
        Self::Stocks,
        Self::Plates,
        Self::Presses,
        Self::Dies,
        Self::Marks,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stocks => "stocks",
            Self::Plates => "plates",
            Self::Presses => "presses",
            Self::Dies => "dies",
            Self::Marks => "marks",
        }
    }
}

impl fmt::Display for LibraryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A print substrate in the stock library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "kebab-case")]
pub struct Stock {
    #[validate(length(min = 1))]
    pub name: String,
    /// `sheet` or `roll`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub stock_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<Measurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[validate(nested)]
    pub grades: Vec<Grade>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Stock {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, stock_type: impl Into<String>) -> Self {
        self.stock_type = Some(stock_type.into());
        self
    }

    pub fn with_grade(mut self, grade: Grade) -> Self {
        self.grades.push(grade);
        self
    }
}

/// A weight/size variant of a stock.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "kebab-case")]
pub struct Grade {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Measurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caliper: Option<Measurement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sheets: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Grade {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_weight(mut self, weight: Measurement) -> Self {
        self.weight = Some(weight);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::units::Unit;
    use serde_json::json;

    #[test]
    fn library_kinds_are_path_segments() {
        let segments: Vec<_> = LibraryKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(segments, ["stocks", "plates", "presses", "dies", "marks"]);
        assert_eq!(serde_json::to_value(LibraryKind::Dies).unwrap(), json!("dies"));
    }

    #[test]
    fn stock_serializes_type_and_nested_grades() {
        let stock = Stock::new("Gloss 150")
            .with_type("sheet")
            .with_grade(Grade::new("150gsm").with_weight(Measurement::new(150.0, Unit::Other("gsm".into()))));
        let value = serde_json::to_value(&stock).unwrap();
        assert_eq!(value["type"], "sheet");
        assert_eq!(value["grades"][0]["name"], "150gsm");
        assert_eq!(value["grades"][0]["weight"], json!({"value": 150.0, "unit": "gsm"}));
    }

    #[test]
    fn nested_grade_validation_bubbles_up() {
        let stock = Stock::new("Matte").with_grade(Grade::new(""));
        assert!(stock.validate().is_err());
    }
}

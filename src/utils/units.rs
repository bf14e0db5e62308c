//! Unit conversion for physical measurements
//!
//! Fixed factors: `1 in = 25.4 mm`, `1 in = 72 pt`, `1 cm = 10 mm`.
//! Units the client does not recognize (gsm, microns, ...) pass through every
//! conversion unchanged.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::PhoenixError;

pub const MM_PER_INCH: f64 = 25.4;
pub const POINTS_PER_INCH: f64 = 72.0;
pub const MM_PER_CM: f64 = 10.0;

static MEASUREMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*([+-]?(?:\d+(?:\.\d*)?|\.\d+))\s*([A-Za-z"]+)\s*$"#)
        .expect("measurement pattern is valid")
});

/// Unit of a [`Measurement`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    Millimeters,
    Centimeters,
    Inches,
    Points,
    Other(String),
}

impl Unit {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Millimeters => "mm",
            Self::Centimeters => "cm",
            Self::Inches => "in",
            Self::Points => "pt",
            Self::Other(s) => s,
        }
    }

    /// Millimeters per one of this unit, `None` for unknown units.
    fn mm_factor(&self) -> Option<f64> {
        match self {
            Self::Millimeters => Some(1.0),
            Self::Centimeters => Some(MM_PER_CM),
            Self::Inches => Some(MM_PER_INCH),
            Self::Points => Some(MM_PER_INCH / POINTS_PER_INCH),
            Self::Other(_) => None,
        }
    }
}

impl From<&str> for Unit {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "mm" | "millimeter" | "millimeters" | "millimetre" | "millimetres" => Self::Millimeters,
            "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => Self::Centimeters,
            "in" | "inch" | "inches" | "\"" => Self::Inches,
            "pt" | "point" | "points" => Self::Points,
            _ => Self::Other(s.trim().to_string()),
        }
    }
}

impl From<String> for Unit {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.as_str().to_string()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scalar value with a unit; on the wire `{"value": 210.0, "unit": "mm"}`.
/// `{"magnitude": 210.0, "unit": "mm"}` is accepted when reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    #[serde(rename = "value", alias = "magnitude")]
    pub magnitude: f64,
    pub unit: Unit,
}

impl Measurement {
    pub fn new(magnitude: f64, unit: Unit) -> Self {
        Self { magnitude, unit }
    }

    pub fn mm(magnitude: f64) -> Self {
        Self::new(magnitude, Unit::Millimeters)
    }

    pub fn inches(magnitude: f64) -> Self {
        Self::new(magnitude, Unit::Inches)
    }

    pub fn points(magnitude: f64) -> Self {
        Self::new(magnitude, Unit::Points)
    }

    /// Parse `"210mm"`, `"8.5 in"`, `"72pt"`; a unit is required.
    pub fn parse(s: &str) -> Result<Self, PhoenixError> {
        let caps = MEASUREMENT_RE
            .captures(s)
            .ok_or_else(|| PhoenixError::InvalidParameter(format!("Not a measurement: '{s}'")))?;
        let magnitude: f64 = caps[1]
            .parse()
            .map_err(|_| PhoenixError::InvalidParameter(format!("Not a number: '{}'", &caps[1])))?;
        Ok(Self::new(magnitude, Unit::from(&caps[2])))
    }

    pub fn is_finite(&self) -> bool {
        self.magnitude.is_finite()
    }

    fn convert(&self, target: Unit) -> Self {
        match (self.unit.mm_factor(), target.mm_factor()) {
            (Some(from), Some(to)) if self.unit != target => {
                Self::new(self.magnitude * from / to, target)
            }
            _ => self.clone(),
        }
    }

    pub fn to_mm(&self) -> Self {
        self.convert(Unit::Millimeters)
    }

    pub fn to_inches(&self) -> Self {
        self.convert(Unit::Inches)
    }

    pub fn to_points(&self) -> Self {
        self.convert(Unit::Points)
    }
}

impl FromStr for Measurement {
    type Err = PhoenixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit)
    }
}

pub fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

pub fn inches_to_mm(inches: f64) -> f64 {
    inches * MM_PER_INCH
}

/// Points for a measurement; unknown units return the magnitude unchanged.
pub fn to_points(measurement: &Measurement) -> f64 {
    measurement.to_points().magnitude
}

//! # Unit Types
//!
//! Type-safe wrappers for the units the estimator works in, plus the parsers
//! that turn catalog strings and loose form values into numbers.
//!
//! Greenhouse catalogs are kept in US customary units:
//! - Structure dimensions: feet (ft)
//! - Panel lengths: inches, written as mixed numbers (`115 9/16"`)
//! - Glazing and fabric: square feet (sq ft)
//!
//! ## Example
//!
//! ```rust
//! use gh_core::units::{parse_mixed_length_to_inches, inches_to_feet, Feet, Inches};
//!
//! let inches = parse_mixed_length_to_inches(Some("115 9/16\"")).unwrap();
//! assert_eq!(inches, 115.5625);
//!
//! let ft: Feet = Inches(144.0).into();
//! assert_eq!(ft.0, 12.0);
//! assert_eq!(inches_to_feet(144.0), 12.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / 12.0)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

impl Mul for Feet {
    type Output = SqFt;
    fn mul(self, rhs: Feet) -> SqFt {
        SqFt(self.0 * rhs.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Feet);
impl_arithmetic!(Inches);
impl_arithmetic!(SqFt);

// ============================================================================
// Parsers
// ============================================================================

/// Convert inches to feet.
pub fn inches_to_feet(inches: f64) -> f64 {
    Feet::from(Inches(inches)).value()
}

/// Parse a mixed-number length such as `115 9/16"`, `9/16"` or `48` into
/// decimal inches.
///
/// The trailing inch mark is optional. Returns `None` for empty input, more
/// than two tokens, a malformed fraction, a non-numeric token, or any result
/// that is not finite. Never panics.
///
/// ```rust
/// use gh_core::units::parse_mixed_length_to_inches;
///
/// assert_eq!(parse_mixed_length_to_inches(Some("9/16\"")), Some(0.5625));
/// assert_eq!(parse_mixed_length_to_inches(Some("48")), Some(48.0));
/// assert_eq!(parse_mixed_length_to_inches(Some("abc")), None);
/// assert_eq!(parse_mixed_length_to_inches(None), None);
/// ```
pub fn parse_mixed_length_to_inches(s: Option<&str>) -> Option<f64> {
    let cleaned = s?.replace('"', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = cleaned.split(' ').collect();
    let value = match tokens.as_slice() {
        [single] if single.contains('/') => parse_fraction(single)?,
        [single] => parse_number(single)?,
        [whole, fraction] if fraction.contains('/') => {
            parse_number(whole)? + parse_fraction(fraction)?
        }
        _ => return None,
    };

    value.is_finite().then_some(value)
}

fn parse_number(token: &str) -> Option<f64> {
    let value: f64 = token.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

fn parse_fraction(token: &str) -> Option<f64> {
    let (numerator, denominator) = token.split_once('/')?;
    let numerator = parse_number(numerator)?;
    let denominator = parse_number(denominator)?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

/// A count as it arrives from a form or database row: a number, a numeric
/// string, or nothing at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseCount {
    Number(f64),
    Text(String),
}

impl Default for LooseCount {
    fn default() -> Self {
        LooseCount::Number(0.0)
    }
}

impl From<u32> for LooseCount {
    fn from(n: u32) -> Self {
        LooseCount::Number(n as f64)
    }
}

impl From<&str> for LooseCount {
    fn from(s: &str) -> Self {
        LooseCount::Text(s.to_string())
    }
}

/// Lenient count parser: absent, unparsable, negative or non-finite values
/// become 0. Fractional counts are truncated.
pub fn parse_count(value: Option<&LooseCount>) -> u32 {
    let raw = match value {
        Some(LooseCount::Number(n)) => *n,
        Some(LooseCount::Text(s)) => match s.trim().parse::<f64>() {
            Ok(n) => n,
            Err(_) => return 0,
        },
        None => return 0,
    };
    if raw.is_finite() && raw > 0.0 {
        raw.trunc().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// Clamp a length to a finite, non-negative value.
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

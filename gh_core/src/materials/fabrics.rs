//! Curtain Fabrics
//!
//! Curtain fabric catalog entries: the roll widths a fabric is made in and
//! its area-tiered price schedule. Insect screens are priced from these.

use serde::{Deserialize, Serialize};

/// Upper bound (inclusive) of the smallest price tier, sq ft
pub const TIER_1_MAX_SQFT: f64 = 5000.0;

/// Upper bound (inclusive) of the middle price tier, sq ft
pub const TIER_2_MAX_SQFT: f64 = 20000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FabricType {
    Shade,
    Blackout,
    #[serde(rename = "Insect Screen")]
    InsectScreen,
}

/// Price tier selected by fabric area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceTier {
    /// (0, 5000] sq ft
    UpTo5000,
    /// (5000, 20000] sq ft
    UpTo20000,
    /// over 20000 sq ft
    Over20000,
}

impl PriceTier {
    /// Tier for a fabric area. Zero, negative or NaN areas have no tier.
    pub fn for_area(area_sqft: f64) -> Option<PriceTier> {
        if !(area_sqft > 0.0) {
            None
        } else if area_sqft <= TIER_1_MAX_SQFT {
            Some(PriceTier::UpTo5000)
        } else if area_sqft <= TIER_2_MAX_SQFT {
            Some(PriceTier::UpTo20000)
        } else {
            Some(PriceTier::Over20000)
        }
    }
}

/// A curtain fabric catalog entry.
///
/// ## JSON Example
///
/// ```json
/// {
///   "fabric_name": "Econet 4045",
///   "fabric_type": "Insect Screen",
///   "price_0_5000": 0.42,
///   "price_5000_20000": 0.38,
///   "price_20000_plus": 0.35,
///   "width_size": [10.0, 12.0, 16.0]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurtainFabricSpec {
    pub fabric_name: String,
    pub fabric_type: FabricType,
    /// Price per sq ft for areas up to 5000 sq ft
    pub price_0_5000: f64,
    /// Price per sq ft for areas above 5000 up to 20000 sq ft
    pub price_5000_20000: f64,
    /// Price per sq ft for areas above 20000 sq ft
    pub price_20000_plus: f64,
    /// Available roll widths in feet
    #[serde(default)]
    pub width_size: Vec<f64>,
}

impl CurtainFabricSpec {
    pub fn price_for(&self, tier: PriceTier) -> f64 {
        match tier {
            PriceTier::UpTo5000 => self.price_0_5000,
            PriceTier::UpTo20000 => self.price_5000_20000,
            PriceTier::Over20000 => self.price_20000_plus,
        }
    }

    /// Price per sq ft for a given fabric area, `None` when no tier applies.
    pub fn price_per_sqft(&self, area_sqft: f64) -> Option<f64> {
        PriceTier::for_area(area_sqft).map(|tier| self.price_for(tier))
    }

    /// Finite widths in ascending order.
    pub fn sorted_widths(&self) -> Vec<f64> {
        let mut widths: Vec<f64> = self
            .width_size
            .iter()
            .copied()
            .filter(|w| w.is_finite())
            .collect();
        widths.sort_by(|a, b| a.total_cmp(b));
        widths
    }
}

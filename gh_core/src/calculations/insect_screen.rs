//! # Insect Screen Pricing
//!
//! Prices the insect screen fabric for a vent line from a curtain fabric
//! catalog entry.
//!
//! ## Method
//!
//! 1. Raw screen area = quantity x length x width (informational)
//! 2. Fabric width = narrowest roll at least as wide as the screen; when no
//!    roll is wide enough, the narrowest roll available
//! 3. Fabric area = fabric width x length x vent quantity
//! 4. Price tier by fabric area: (0, 5000], (5000, 20000], (20000, inf).
//!    Zero area has no tier and no price.
//! 5. Curtain price = fabric area x tier price
//! 6. Linear feet to cut = length x vent quantity, charged at the slitting fee
//!
//! ## Example
//!
//! ```rust
//! use gh_core::calculations::insect_screen::{calculate, InsectScreen, InsectScreenInput, VentConfiguration};
//! use gh_core::config::EngineSettings;
//! use gh_core::materials::{CurtainFabricSpec, FabricType, PriceTier};
//!
//! let fabric = CurtainFabricSpec {
//!     fabric_name: "Econet".to_string(),
//!     fabric_type: FabricType::InsectScreen,
//!     price_0_5000: 0.40,
//!     price_5000_20000: 0.35,
//!     price_20000_plus: 0.30,
//!     width_size: vec![10.0, 12.0, 16.0],
//! };
//! let screen = InsectScreen::for_vent("Econet", 2, 50.0, VentConfiguration::Single, 11.0, None).unwrap();
//! let input = InsectScreenInput { screen, vent_quantity: 2 };
//!
//! let pricing = calculate(&input, &fabric, &EngineSettings::default()).unwrap();
//! assert_eq!(pricing.min_fabric_width_ft, Some(12.0));
//! assert_eq!(pricing.fabric_area_sq_ft, 1200.0);
//! assert_eq!(pricing.price_tier, Some(PriceTier::UpTo5000));
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::SharedCatalog;
use crate::config::EngineSettings;
use crate::errors::{CalcError, CalcResult, Diagnostic};
use crate::materials::{CurtainFabricSpec, PriceTier};

/// Single or double vent line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VentConfiguration {
    #[default]
    Single,
    Double,
}

impl VentConfiguration {
    /// Screens needed per vent
    pub fn screens_per_vent(&self) -> u32 {
        match self {
            VentConfiguration::Single => 1,
            VentConfiguration::Double => 2,
        }
    }
}

/// Insect screen attached to a vent.
///
/// ## JSON Example
///
/// ```json
/// {
///   "fabric_name": "Econet 4045",
///   "quantity": 4,
///   "length_ft": 96.0,
///   "width_ft": 3.5,
///   "slitting_fee": 0.25
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsectScreen {
    pub fabric_name: String,
    pub quantity: u32,
    pub length_ft: f64,
    pub width_ft: f64,
    /// Per linear foot; unset or zero uses the default fee
    #[serde(default)]
    pub slitting_fee: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl InsectScreen {
    /// Screen sized to follow its vent: one screen per vent, two for a
    /// double vent, running the full vent length.
    pub fn for_vent(
        fabric_name: impl Into<String>,
        vent_quantity: u32,
        vent_length_ft: f64,
        configuration: VentConfiguration,
        width_ft: f64,
        slitting_fee: Option<f64>,
    ) -> CalcResult<Self> {
        let quantity = vent_quantity
            .checked_mul(configuration.screens_per_vent())
            .ok_or_else(|| {
                CalcError::invalid_input(
                    "vent_quantity",
                    vent_quantity.to_string(),
                    "Too many vents for the screen count",
                )
            })?;
        Ok(InsectScreen {
            fabric_name: fabric_name.into(),
            quantity,
            length_ft: vent_length_ft,
            width_ft,
            slitting_fee,
            notes: None,
        })
    }

    /// Fee per linear foot after applying the default.
    pub fn slitting_fee_per_ft(&self, settings: &EngineSettings) -> f64 {
        match self.slitting_fee {
            Some(fee) if fee.is_finite() && fee > 0.0 => fee,
            _ => settings.default_slitting_fee_per_ft,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsectScreenInput {
    pub screen: InsectScreen,
    /// Number of vents the screen fabric is cut for
    pub vent_quantity: u32,
}

impl InsectScreenInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("screen.length_ft", self.screen.length_ft),
            ("screen.width_ft", self.screen.width_ft),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Screen dimension must be a non-negative number",
                ));
            }
        }
        if let Some(fee) = self.screen.slitting_fee {
            if fee.is_nan() || fee < 0.0 {
                return Err(CalcError::invalid_input(
                    "screen.slitting_fee",
                    fee.to_string(),
                    "Slitting fee cannot be negative",
                ));
            }
        }
        Ok(())
    }
}

/// Priced insect screen fabric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsectScreenPricing {
    pub fabric_name: String,
    /// quantity x length x width
    pub total_screen_area_sq_ft: f64,
    /// Roll width used; `None` when the fabric lists no widths
    pub min_fabric_width_ft: Option<f64>,
    /// True when no roll was wide enough and the narrowest was used
    pub width_fallback: bool,
    pub fabric_area_sq_ft: f64,
    pub price_tier: Option<PriceTier>,
    /// 0 when no tier applies
    pub price_per_sq_ft: f64,
    /// `None` when no tier applies
    pub curtain_price: Option<f64>,
    pub total_linear_ft_to_cut: f64,
    pub slitting_fee_per_ft: f64,
    pub slitting_cost: f64,
}

/// Narrowest roll at least `screen_width` wide, or the narrowest roll.
///
/// Returns the width and whether the fallback was taken.
pub fn select_fabric_width(widths: &[f64], screen_width: f64) -> Option<(f64, bool)> {
    let first = *widths.first()?;
    match widths.iter().copied().find(|&w| w >= screen_width) {
        Some(w) => Some((w, false)),
        None => Some((first, true)),
    }
}

/// Price one insect screen against its fabric.
pub fn calculate(
    input: &InsectScreenInput,
    fabric: &CurtainFabricSpec,
    settings: &EngineSettings,
) -> CalcResult<InsectScreenPricing> {
    input.validate()?;
    let screen = &input.screen;
    let vents = input.vent_quantity as f64;

    let total_screen_area_sq_ft = screen.quantity as f64 * screen.length_ft * screen.width_ft;

    let selected = select_fabric_width(&fabric.sorted_widths(), screen.width_ft);
    let (min_fabric_width_ft, width_fallback) = match selected {
        Some((width, fallback)) => (Some(width), fallback),
        None => (None, false),
    };
    if width_fallback {
        tracing::warn!(
            fabric = %fabric.fabric_name,
            screen_width = screen.width_ft,
            "no fabric roll wide enough, using narrowest"
        );
    }

    let fabric_area_sq_ft = min_fabric_width_ft.unwrap_or(0.0) * screen.length_ft * vents;
    let price_tier = PriceTier::for_area(fabric_area_sq_ft);
    let price_per_sq_ft = price_tier.map_or(0.0, |tier| fabric.price_for(tier));
    let curtain_price = price_tier.map(|_| fabric_area_sq_ft * price_per_sq_ft);

    let total_linear_ft_to_cut = screen.length_ft * vents;
    let slitting_fee_per_ft = screen.slitting_fee_per_ft(settings);

    Ok(InsectScreenPricing {
        fabric_name: fabric.fabric_name.clone(),
        total_screen_area_sq_ft,
        min_fabric_width_ft,
        width_fallback,
        fabric_area_sq_ft,
        price_tier,
        price_per_sq_ft,
        curtain_price,
        total_linear_ft_to_cut,
        slitting_fee_per_ft,
        slitting_cost: slitting_fee_per_ft * total_linear_ft_to_cut,
    })
}

/// Catalog-backed pricing outcome. Pricing is absent when the fabric could
/// not be resolved; the reason is in `diagnostics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsectScreenQuote {
    pub fabric_name: String,
    pub pricing: Option<InsectScreenPricing>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Fetch the screen's fabric from the catalog and price it.
///
/// Only invalid input is an error; a missing or failing fabric lookup
/// yields a quote without pricing.
pub async fn price_from_catalog(
    catalog: &SharedCatalog,
    input: &InsectScreenInput,
    settings: &EngineSettings,
) -> CalcResult<InsectScreenQuote> {
    input.validate()?;
    let fabric_name = input.screen.fabric_name.clone();
    let scope = format!("Insect screen '{}'", fabric_name);
    tracing::debug!(fabric = %fabric_name, "looking up curtain fabric");

    let mut diagnostics = Vec::new();
    let pricing = match catalog.curtain_fabric(&fabric_name).await {
        Ok(Some(fabric)) => {
            if fabric.sorted_widths().is_empty() {
                diagnostics.push(Diagnostic::config_gap(&scope, "Fabric lists no roll widths"));
            }
            let pricing = calculate(input, &fabric, settings)?;
            if pricing.curtain_price.is_none() {
                diagnostics.push(Diagnostic::config_gap(
                    &scope,
                    "No price available for this area",
                ));
            }
            Some(pricing)
        }
        Ok(None) => {
            tracing::warn!(fabric = %fabric_name, "curtain fabric not found");
            diagnostics.push(Diagnostic::lookup(&scope, "Fabric not found"));
            None
        }
        Err(err) => {
            tracing::warn!(fabric = %fabric_name, error = %err, "curtain fabric lookup failed");
            diagnostics.push(Diagnostic::lookup(&scope, err.to_string()));
            None
        }
    };

    Ok(InsectScreenQuote {
        fabric_name,
        pricing,
        diagnostics,
    })
}

//! Purchasing-agent service fee ("công mua")
//!
//! Low-value orders pay per item, cheaper per item as the count grows.
//! Orders above the threshold pay a percentage of the order total instead.
//! The threshold is checked first; quantity only matters below it.
//!
//! | Order total (¥) | Quantity | Fee (¥)          |
//! |-----------------|----------|------------------|
//! | ≤ 25,000        | 0 or 1   | 500              |
//! | ≤ 25,000        | 2–5      | 400 × quantity   |
//! | ≤ 25,000        | 6–10     | 300 × quantity   |
//! | ≤ 25,000        | > 10     | 300 × quantity   |
//! | > 25,000        | any      | 2% of total      |

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A per-item price band, inclusive upper bound
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuantityTier {
    /// Largest quantity this band covers
    pub max_quantity: u32,

    /// Fee per item in yen
    pub per_unit_yen: f64,
}

/// Fee schedule, defaulting to the published rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ServiceFeeSchedule {
    /// Order totals at or below this use the per-item bands
    #[serde(default = "default_threshold_yen")]
    pub threshold_yen: f64,

    /// Flat fee for a single item
    #[serde(default = "default_single_item_yen")]
    pub single_item_yen: f64,

    /// Per-item bands for quantities above one, ascending
    #[serde(default = "default_tiers")]
    pub tiers: Vec<QuantityTier>,

    /// Per-item fee beyond the last band
    #[serde(default = "default_overflow_per_unit_yen")]
    pub overflow_per_unit_yen: f64,

    /// Share of the order total charged above the threshold
    #[serde(default = "default_percentage")]
    pub percentage: f64,
}

fn default_threshold_yen() -> f64 {
    25_000.0
}

fn default_single_item_yen() -> f64 {
    500.0
}

fn default_tiers() -> Vec<QuantityTier> {
    vec![
        QuantityTier {
            max_quantity: 5,
            per_unit_yen: 400.0,
        },
        QuantityTier {
            max_quantity: 10,
            per_unit_yen: 300.0,
        },
    ]
}

fn default_overflow_per_unit_yen() -> f64 {
    300.0
}

fn default_percentage() -> f64 {
    0.02
}

impl Default for ServiceFeeSchedule {
    fn default() -> Self {
        Self {
            threshold_yen: default_threshold_yen(),
            single_item_yen: default_single_item_yen(),
            tiers: default_tiers(),
            overflow_per_unit_yen: default_overflow_per_unit_yen(),
            percentage: default_percentage(),
        }
    }
}

/// Which rule produced a fee
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeeTier {
    /// One item, flat fee
    SingleItem { fee_yen: f64 },
    /// Per-item band; `max_quantity` is `None` past the last band
    PerUnit {
        per_unit_yen: f64,
        max_quantity: Option<u32>,
    },
    /// Percentage of the order total
    Percentage { rate: f64 },
}

impl std::fmt::Display for FeeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeeTier::SingleItem { fee_yen } => write!(f, "single item, {}¥", fee_yen),
            FeeTier::PerUnit {
                per_unit_yen,
                max_quantity: Some(max),
            } => write!(f, "{}¥ per item (up to {} items)", per_unit_yen, max),
            FeeTier::PerUnit {
                per_unit_yen,
                max_quantity: None,
            } => write!(f, "{}¥ per item", per_unit_yen),
            FeeTier::Percentage { rate } => write!(f, "{}% of order total", rate * 100.0),
        }
    }
}

/// Computed fee with the rule that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ServiceFee {
    pub fee_yen: f64,
    pub tier: FeeTier,
}

impl ServiceFeeSchedule {
    /// Select the rule for an order. Quantity 0 counts as 1.
    pub fn tier_for(&self, order_total_yen: f64, quantity: u32) -> FeeTier {
        if order_total_yen > self.threshold_yen {
            return FeeTier::Percentage {
                rate: self.percentage,
            };
        }

        let q = quantity.max(1);
        if q <= 1 {
            return FeeTier::SingleItem {
                fee_yen: self.single_item_yen,
            };
        }

        self.tiers
            .iter()
            .find(|tier| q <= tier.max_quantity)
            .map(|tier| FeeTier::PerUnit {
                per_unit_yen: tier.per_unit_yen,
                max_quantity: Some(tier.max_quantity),
            })
            .unwrap_or(FeeTier::PerUnit {
                per_unit_yen: self.overflow_per_unit_yen,
                max_quantity: None,
            })
    }

    /// Fee in yen together with the rule applied
    pub fn compute(&self, order_total_yen: f64, quantity: u32) -> ServiceFee {
        let tier = self.tier_for(order_total_yen, quantity);
        let fee_yen = match tier {
            FeeTier::SingleItem { fee_yen } => fee_yen,
            FeeTier::PerUnit { per_unit_yen, .. } => per_unit_yen * f64::from(quantity.max(1)),
            FeeTier::Percentage { rate } => order_total_yen * rate,
        };
        ServiceFee { fee_yen, tier }
    }

    /// Fee in yen
    pub fn fee_yen(&self, order_total_yen: f64, quantity: u32) -> f64 {
        self.compute(order_total_yen, quantity).fee_yen
    }
}

/// Fee in yen under the default schedule
pub fn service_fee_yen(order_total_yen: f64, quantity: u32) -> f64 {
    ServiceFeeSchedule::default().fee_yen(order_total_yen, quantity)
}

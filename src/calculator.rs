//! Price calculation
//!
//! Raw form fields go in, every derived figure comes out:
//!
//! ```text
//! QuoteFields ──normalize──► QuoteInput ──► PriceCalculator::calculate ──► CalculationResult
//!                                             │
//!                                             ├─ service fee (yen)
//!                                             ├─ yen → VND conversion, total
//!                                             └─ volumetric weight (reported separately)
//! ```
//!
//! The calculation is a pure function of its input: no state is kept
//! between calls and the same input always gives the same result.

use crate::config::PricingConfig;
use crate::fee::{FeeTier, ServiceFee, ServiceFeeSchedule};
use crate::normalize::{non_negative, non_negative_num, parse_quantity, RawValue};
use crate::volumetric::{self, PackageDimensions, PackageEstimate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Order value and size
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OrderInput {
    /// VND per 1 JPY
    pub exchange_rate: f64,
    pub order_total_yen: f64,
    pub quantity: u32,
}

/// The three shipping legs
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShippingFees {
    /// Seller to our Japan warehouse, in yen
    pub seller_ship_yen: f64,
    /// Japan to Vietnam, in VND
    pub ship_jp_vn_vnd: f64,
    /// Delivery inside Vietnam, in VND
    pub ship_local_vnd: f64,
}

/// Normalized calculation input
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuoteInput {
    pub order: OrderInput,
    pub package: PackageDimensions,
    pub shipping: ShippingFees,
    pub surcharge_vnd: f64,
}

/// Raw field values as the form holds them
///
/// Any field may be absent, blank, text or a number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteFields {
    pub exchange_rate: RawValue,
    pub order_total_yen: RawValue,
    pub quantity: RawValue,
    pub weight_kg: RawValue,
    pub length_cm: RawValue,
    pub width_cm: RawValue,
    pub height_cm: RawValue,
    pub seller_ship_yen: RawValue,
    pub ship_jp_vn_vnd: RawValue,
    pub ship_local_vnd: RawValue,
    pub surcharge_vnd: RawValue,
}

impl QuoteFields {
    /// Blank and unreadable fields become 0, negatives clamp to 0
    pub fn normalize(&self) -> QuoteInput {
        QuoteInput {
            order: OrderInput {
                exchange_rate: non_negative_num(&self.exchange_rate),
                order_total_yen: non_negative_num(&self.order_total_yen),
                quantity: parse_quantity(&self.quantity),
            },
            package: PackageDimensions {
                weight_kg: non_negative_num(&self.weight_kg),
                length_cm: non_negative_num(&self.length_cm),
                width_cm: non_negative_num(&self.width_cm),
                height_cm: non_negative_num(&self.height_cm),
            },
            shipping: ShippingFees {
                seller_ship_yen: non_negative_num(&self.seller_ship_yen),
                ship_jp_vn_vnd: non_negative_num(&self.ship_jp_vn_vnd),
                ship_local_vnd: non_negative_num(&self.ship_local_vnd),
            },
            surcharge_vnd: non_negative_num(&self.surcharge_vnd),
        }
    }
}

/// Every figure shown to the customer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CalculationResult {
    /// Rate used, VND per 1 JPY
    pub exchange_rate: f64,
    pub order_total_yen: f64,
    pub quantity: u32,

    /// Order total converted, for reference
    pub base_vnd: f64,
    pub service_fee_yen: f64,
    pub service_fee_vnd: f64,
    pub fee_tier: FeeTier,

    /// (order total + service fee) in yen, converted once
    pub price_vnd: f64,

    pub seller_ship_yen: f64,
    pub seller_ship_vnd: f64,
    pub ship_jp_vn_vnd: f64,
    pub ship_local_vnd: f64,
    pub surcharge_vnd: f64,

    /// Amount payable
    pub total_vnd: f64,

    /// Quantity is large enough that the shop quotes directly
    pub bulk_quote_required: bool,

    /// Weight figures, not part of any price
    pub package: PackageEstimate,
}

impl CalculationResult {
    pub fn volumetric_weight_kg(&self) -> f64 {
        self.package.volumetric_weight_kg
    }
}

/// Converted charges; the only inputs to the total
#[derive(Debug, Clone, Copy)]
struct Charges {
    base_vnd: f64,
    service_fee_vnd: f64,
    price_vnd: f64,
    seller_ship_vnd: f64,
    ship_jp_vn_vnd: f64,
    ship_local_vnd: f64,
    surcharge_vnd: f64,
}

impl Charges {
    fn convert(
        order: &OrderInput,
        fee: &ServiceFee,
        shipping: &ShippingFees,
        surcharge_vnd: f64,
    ) -> Self {
        let rate = order.exchange_rate;
        Self {
            base_vnd: order.order_total_yen * rate,
            service_fee_vnd: fee.fee_yen * rate,
            price_vnd: (order.order_total_yen + fee.fee_yen) * rate,
            seller_ship_vnd: shipping.seller_ship_yen * rate,
            ship_jp_vn_vnd: shipping.ship_jp_vn_vnd,
            ship_local_vnd: shipping.ship_local_vnd,
            surcharge_vnd,
        }
    }

    fn total_vnd(&self) -> f64 {
        self.price_vnd
            + self.surcharge_vnd
            + self.seller_ship_vnd
            + self.ship_jp_vn_vnd
            + self.ship_local_vnd
    }
}

/// Calculator bound to a fee schedule
#[derive(Debug, Clone, PartialEq)]
pub struct PriceCalculator {
    pub schedule: ServiceFeeSchedule,
    pub volumetric_divisor: f64,
    pub bulk_contact_quantity: u32,
}

impl Default for PriceCalculator {
    fn default() -> Self {
        Self {
            schedule: ServiceFeeSchedule::default(),
            volumetric_divisor: volumetric::DEFAULT_DIVISOR,
            bulk_contact_quantity: crate::config::DEFAULT_BULK_CONTACT_QUANTITY,
        }
    }
}

impl PriceCalculator {
    pub fn new(schedule: ServiceFeeSchedule) -> Self {
        Self {
            schedule,
            ..Self::default()
        }
    }

    pub fn from_config(config: &PricingConfig) -> Self {
        Self {
            schedule: config.service_fee.clone(),
            volumetric_divisor: config.volumetric_divisor,
            bulk_contact_quantity: config.bulk_contact_quantity,
        }
    }

    /// Normalize raw fields, then calculate
    pub fn quote(&self, fields: &QuoteFields) -> CalculationResult {
        self.calculate(&fields.normalize())
    }

    /// Calculate from normalized input
    ///
    /// Values are clamped again here, so a hand-built `QuoteInput` with
    /// negative or non-finite numbers still yields non-negative figures.
    pub fn calculate(&self, input: &QuoteInput) -> CalculationResult {
        let order = OrderInput {
            exchange_rate: non_negative(input.order.exchange_rate),
            order_total_yen: non_negative(input.order.order_total_yen),
            quantity: input.order.quantity,
        };
        let shipping = ShippingFees {
            seller_ship_yen: non_negative(input.shipping.seller_ship_yen),
            ship_jp_vn_vnd: non_negative(input.shipping.ship_jp_vn_vnd),
            ship_local_vnd: non_negative(input.shipping.ship_local_vnd),
        };
        let surcharge_vnd = non_negative(input.surcharge_vnd);

        let fee = self.schedule.compute(order.order_total_yen, order.quantity);
        let charges = Charges::convert(&order, &fee, &shipping, surcharge_vnd);
        let total_vnd = charges.total_vnd();

        let package = volumetric::estimate(&input.package, self.volumetric_divisor);

        tracing::debug!(
            order_total_yen = order.order_total_yen,
            quantity = order.quantity,
            service_fee_yen = fee.fee_yen,
            total_vnd,
            "calculated quote"
        );

        CalculationResult {
            exchange_rate: order.exchange_rate,
            order_total_yen: order.order_total_yen,
            quantity: order.quantity,
            base_vnd: charges.base_vnd,
            service_fee_yen: fee.fee_yen,
            service_fee_vnd: charges.service_fee_vnd,
            fee_tier: fee.tier,
            price_vnd: charges.price_vnd,
            seller_ship_yen: shipping.seller_ship_yen,
            seller_ship_vnd: charges.seller_ship_vnd,
            ship_jp_vn_vnd: charges.ship_jp_vn_vnd,
            ship_local_vnd: charges.ship_local_vnd,
            surcharge_vnd: charges.surcharge_vnd,
            total_vnd,
            bulk_quote_required: order.quantity > self.bulk_contact_quantity,
            package,
        }
    }
}

/// Calculate with the default schedule
pub fn calculate(fields: &QuoteFields) -> CalculationResult {
    PriceCalculator::default().quote(fields)
}

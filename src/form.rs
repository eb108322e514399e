//! Order form state
//!
//! The form owns the text of each field while the operator types. Every
//! change is followed by a fresh [`OrderForm::quote`]; nothing is cached.
//!
//! The order-total field takes an arithmetic expression. When the text does
//! not evaluate, the last accepted total stays in effect until it does.

use crate::calculator::{CalculationResult, PriceCalculator, QuoteFields};
use crate::config::PricingConfig;
use crate::expr::{self, ExprError};
use crate::normalize::{canonical_number_text, keep_decimal_chars, parse_quantity, RawValue};

/// Package size and weight field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeField {
    Weight,
    Length,
    Width,
    Height,
}

/// Fee field entered as plain number text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeField {
    SellerShipYen,
    ShipJpVnVnd,
    ShipLocalVnd,
    SurchargeVnd,
}

/// Mutable snapshot of the order form
#[derive(Debug, Clone, Default)]
pub struct OrderForm {
    exchange_rate: String,
    order_total_text: String,
    order_total_yen: Option<f64>,
    quantity: Option<u32>,
    weight_kg: String,
    length_cm: String,
    width_cm: String,
    height_cm: String,
    seller_ship_yen: String,
    ship_jp_vn_vnd: String,
    ship_local_vnd: String,
    surcharge_vnd: String,
}

impl OrderForm {
    /// Empty form with the configured starting exchange rate
    pub fn new(config: &PricingConfig) -> Self {
        Self {
            exchange_rate: config.exchange_rate.to_string(),
            ..Self::default()
        }
    }

    pub fn set_exchange_rate(&mut self, text: &str) {
        self.exchange_rate = text.to_string();
    }

    /// Update the order-total text and try to evaluate it
    ///
    /// Leading zeros are dropped from the text. On error the previously
    /// accepted total is kept and the error is returned.
    pub fn set_order_total(&mut self, text: &str) -> Result<f64, ExprError> {
        self.order_total_text = expr::strip_leading_zeros(text);
        match expr::evaluate(&self.order_total_text) {
            Ok(value) => {
                self.order_total_yen = Some(value);
                Ok(value)
            }
            Err(e) => {
                tracing::debug!(
                    text = %self.order_total_text,
                    error = %e,
                    "keeping previous order total"
                );
                self.order_total_yen.get_or_insert(0.0);
                Err(e)
            }
        }
    }

    /// Text as displayed in the order-total field
    pub fn order_total_text(&self) -> &str {
        &self.order_total_text
    }

    /// Last accepted order total, if any expression has been accepted
    pub fn order_total_yen(&self) -> Option<f64> {
        self.order_total_yen
    }

    /// Quantity field; stored already normalized
    pub fn set_quantity(&mut self, text: &str) {
        self.quantity = Some(parse_quantity(&RawValue::from(text)));
    }

    pub fn quantity(&self) -> Option<u32> {
        self.quantity
    }

    /// Size and weight fields keep only digits and `.` while typing
    pub fn set_size(&mut self, field: SizeField, text: &str) {
        *self.size_mut(field) = keep_decimal_chars(text);
    }

    pub fn size(&self, field: SizeField) -> &str {
        match field {
            SizeField::Weight => &self.weight_kg,
            SizeField::Length => &self.length_cm,
            SizeField::Width => &self.width_cm,
            SizeField::Height => &self.height_cm,
        }
    }

    /// Canonicalize a size field when the operator leaves it
    ///
    /// `"0012.0"` becomes `"12"`; an empty field stays empty.
    pub fn finish_editing(&mut self, field: SizeField) {
        let slot = self.size_mut(field);
        if !slot.is_empty() {
            let canonical = canonical_number_text(slot);
            *slot = canonical;
        }
    }

    pub fn set_fee(&mut self, field: FeeField, text: &str) {
        let slot = match field {
            FeeField::SellerShipYen => &mut self.seller_ship_yen,
            FeeField::ShipJpVnVnd => &mut self.ship_jp_vn_vnd,
            FeeField::ShipLocalVnd => &mut self.ship_local_vnd,
            FeeField::SurchargeVnd => &mut self.surcharge_vnd,
        };
        *slot = text.to_string();
    }

    /// Whether the bulk-order notice should show under the quantity field
    pub fn needs_bulk_contact(&self, config: &PricingConfig) -> bool {
        self.quantity
            .is_some_and(|q| q > config.bulk_contact_quantity)
    }

    /// Raw snapshot handed to the calculator
    pub fn fields(&self) -> QuoteFields {
        QuoteFields {
            exchange_rate: RawValue::from(&self.exchange_rate),
            order_total_yen: RawValue::from(self.order_total_yen),
            quantity: RawValue::from(self.quantity),
            weight_kg: RawValue::from(&self.weight_kg),
            length_cm: RawValue::from(&self.length_cm),
            width_cm: RawValue::from(&self.width_cm),
            height_cm: RawValue::from(&self.height_cm),
            seller_ship_yen: RawValue::from(&self.seller_ship_yen),
            ship_jp_vn_vnd: RawValue::from(&self.ship_jp_vn_vnd),
            ship_local_vnd: RawValue::from(&self.ship_local_vnd),
            surcharge_vnd: RawValue::from(&self.surcharge_vnd),
        }
    }

    /// Recalculate from the current snapshot
    pub fn quote(&self, calculator: &PriceCalculator) -> CalculationResult {
        calculator.quote(&self.fields())
    }

    fn size_mut(&mut self, field: SizeField) -> &mut String {
        match field {
            SizeField::Weight => &mut self.weight_kg,
            SizeField::Length => &mut self.length_cm,
            SizeField::Width => &mut self.width_cm,
            SizeField::Height => &mut self.height_cm,
        }
    }
}

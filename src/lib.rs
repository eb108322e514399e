// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # order-price: Japan → Vietnam order price calculator
//!
//! Computes what a customer pays for goods bought in Japan and delivered
//! in Vietnam: order total in yen, the purchasing-agent service fee,
//! conversion to VND, three shipping legs and a surcharge.
//!
//! ## Quick Start
//!
//! ```rust
//! use order_price::{calculate, QuoteFields, RawValue};
//!
//! let fields = QuoteFields {
//!     exchange_rate: RawValue::from("180"),
//!     order_total_yen: RawValue::from("10000"),
//!     quantity: RawValue::from("2"),
//!     length_cm: RawValue::from("30"),
//!     width_cm: RawValue::from("20"),
//!     height_cm: RawValue::from("15"),
//!     ship_jp_vn_vnd: RawValue::from("200000"),
//!     ship_local_vnd: RawValue::from("30000"),
//!     ..QuoteFields::default()
//! };
//!
//! let result = calculate(&fields);
//! assert_eq!(result.service_fee_yen, 800.0);
//! assert_eq!(result.price_vnd, 1_944_000.0);
//! assert_eq!(result.total_vnd, 2_174_000.0);
//! assert_eq!(result.volumetric_weight_kg(), 1.5);
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                                                              │
//! │  raw fields ──► normalize ──► service fee (¥)                │
//! │                     │              │                         │
//! │                     │              ▼                         │
//! │                     │   (total ¥ + fee ¥) × rate ──► total   │
//! │                     │                                        │
//! │                     └──► L×W×H / 6000 (reported only)        │
//! │                                                              │
//! │  order-total text ──► expr::evaluate ──► value | ExprError   │
//! │                                                              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Normalization never fails: blank or unreadable fields count as zero and
//! negatives clamp to zero. The one input that can be rejected is the
//! order-total expression, so the form can keep its last good value.

pub mod calculator;
pub mod config;
pub mod error;
pub mod expr;
pub mod fee;
pub mod form;
pub mod format;
pub mod logging;
pub mod normalize;
pub mod volumetric;

// Re-exports
pub use calculator::{
    calculate, CalculationResult, OrderInput, PriceCalculator, QuoteFields, QuoteInput,
    ShippingFees,
};
pub use config::PricingConfig;
pub use error::{Error, Result};
pub use expr::{evaluate, ExprError};
pub use fee::{service_fee_yen, FeeTier, QuantityTier, ServiceFee, ServiceFeeSchedule};
pub use form::{FeeField, OrderForm, SizeField};
pub use format::{format_date, format_number, format_vnd, render_quote};
pub use normalize::{parse_num, RawValue};
pub use volumetric::{volumetric_weight_kg, PackageDimensions, PackageEstimate};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

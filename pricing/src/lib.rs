//! Closed-form Black-Scholes-Merton pricing of European options.
//!
//! Parameters are validated once, at construction, through
//! [`OptionParameters::new`]; the engine functions are pure and may be
//! called concurrently on shared parameter values.

pub mod analytic;
pub mod common;

pub use analytic::black_scholes::{
    call_price, price_and_greeks, put_price, BlackScholesMerton, OptionPrice,
};
pub use analytic::curve::{generate_price_curve, generate_price_curve_par, CurveSettings};
pub use analytic::parity::ParityCheck;
pub use common::error::PricingError;
pub use common::models::{OptionParameters, OptionPrices, PriceCurvePoint};

use crate::common::models::{OptionParameters, OptionPrices};

/// Put-call parity: C - P = S - K e^(-rT).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParityCheck {
    /// C - P
    pub lhs: f64,
    /// S - K e^(-rT)
    pub rhs: f64,
    pub difference: f64,
    pub tolerance: f64,
}

impl ParityCheck {
    pub const DEFAULT_TOLERANCE: f64 = 0.01;

    pub fn evaluate(params: &OptionParameters, prices: &OptionPrices) -> Self {
        Self::with_tolerance(params, prices, Self::DEFAULT_TOLERANCE)
    }

    pub fn with_tolerance(params: &OptionParameters, prices: &OptionPrices, tolerance: f64) -> Self {
        let lhs = prices.call_price - prices.put_price;
        let rhs = params.underlying_price() - params.strike_price() * params.discount_factor();
        Self {
            lhs,
            rhs,
            difference: (lhs - rhs).abs(),
            tolerance,
        }
    }

    pub fn holds(&self) -> bool {
        self.difference < self.tolerance
    }
}

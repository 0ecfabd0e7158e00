use crate::common::error::PricingError;

/// Market and contract inputs of a European option.
///
/// An instance only exists if every input passed validation, see [`OptionParameters::new`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawOptionParameters")
)]
pub struct OptionParameters {
    /// the asset's price at time t
    underlying_price: f64,
    /// the strike or exercise price of the asset
    strike_price: f64,
    /// (T - t) in years, where T is the time of the option's expiration and t is the current time
    time_to_expiration: f64,
    /// the annualized risk-free interest rate, may be negative
    risk_free_rate: f64,
    /// the annualized standard deviation of the stock's returns
    volatility: f64,
}

impl OptionParameters {
    /// Validates the inputs and builds the parameter set.
    ///
    /// Prices, time and volatility must be strictly positive and every input finite.
    /// The rate carries no sign constraint.
    pub fn new(
        underlying_price: f64,
        strike_price: f64,
        time_to_expiration: f64,
        risk_free_rate: f64,
        volatility: f64,
    ) -> Result<Self, PricingError> {
        let params = Self {
            underlying_price,
            strike_price,
            time_to_expiration,
            risk_free_rate,
            volatility,
        };
        if !params.is_valid() {
            return Err(PricingError::InvalidParameters);
        }
        Ok(params)
    }

    pub fn is_valid(&self) -> bool {
        self.underlying_price > 0.0
            && self.strike_price > 0.0
            && self.time_to_expiration > 0.0
            && self.volatility > 0.0
            && self.underlying_price.is_finite()
            && self.strike_price.is_finite()
            && self.time_to_expiration.is_finite()
            && self.risk_free_rate.is_finite()
            && self.volatility.is_finite()
    }

    /// Same contract with a different underlying price.
    pub fn with_underlying_price(&self, underlying_price: f64) -> Result<Self, PricingError> {
        Self::new(
            underlying_price,
            self.strike_price,
            self.time_to_expiration,
            self.risk_free_rate,
            self.volatility,
        )
    }

    pub fn underlying_price(&self) -> f64 {
        self.underlying_price
    }

    pub fn strike_price(&self) -> f64 {
        self.strike_price
    }

    pub fn time_to_expiration(&self) -> f64 {
        self.time_to_expiration
    }

    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// e^(-rT)
    pub fn discount_factor(&self) -> f64 {
        (-self.risk_free_rate * self.time_to_expiration).exp()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawOptionParameters {
    underlying_price: f64,
    strike_price: f64,
    time_to_expiration: f64,
    risk_free_rate: f64,
    volatility: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawOptionParameters> for OptionParameters {
    type Error = PricingError;

    fn try_from(raw: RawOptionParameters) -> Result<Self, Self::Error> {
        Self::new(
            raw.underlying_price,
            raw.strike_price,
            raw.time_to_expiration,
            raw.risk_free_rate,
            raw.volatility,
        )
    }
}

/// Prices and greeks of the call and put written on one [`OptionParameters`].
///
/// Theta is per calendar day (raw theta / 365.25), vega and rho are per
/// percentage point move of volatility and rate (raw value / 100).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OptionPrices {
    pub call_price: f64,
    pub put_price: f64,
    pub delta_call: f64,
    pub delta_put: f64,
    /// shared by call and put
    pub gamma: f64,
    pub theta_call: f64,
    pub theta_put: f64,
    /// shared by call and put
    pub vega: f64,
    pub rho_call: f64,
    pub rho_put: f64,
}

/// One sample of a price curve.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PriceCurvePoint {
    pub underlying_price: f64,
    pub call_price: f64,
    pub put_price: f64,
}

impl From<PriceCurvePoint> for (f64, f64, f64) {
    fn from(point: PriceCurvePoint) -> Self {
        (point.underlying_price, point.call_price, point.put_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_parameters() {
        let params = OptionParameters::new(100.0, 105.0, 1.0, 0.05, 0.2).unwrap();
        assert!(params.is_valid());
        assert_eq!(params.underlying_price(), 100.0);
        assert_eq!(params.strike_price(), 105.0);
        assert_eq!(params.time_to_expiration(), 1.0);
        assert_eq!(params.risk_free_rate(), 0.05);
        assert_eq!(params.volatility(), 0.2);
    }

    #[test]
    fn negative_rate_is_allowed() {
        assert!(OptionParameters::new(100.0, 100.0, 0.5, -0.01, 0.3).is_ok());
    }

    #[test]
    fn rejects_zero_expiry() {
        assert_eq!(
            OptionParameters::new(100.0, 105.0, 0.0, 0.05, 0.2),
            Err(PricingError::InvalidParameters)
        );
    }

    #[test]
    fn rejects_non_positive_inputs() {
        assert!(OptionParameters::new(0.0, 105.0, 1.0, 0.05, 0.2).is_err());
        assert!(OptionParameters::new(100.0, -1.0, 1.0, 0.05, 0.2).is_err());
        assert!(OptionParameters::new(100.0, 105.0, -0.5, 0.05, 0.2).is_err());
        assert!(OptionParameters::new(100.0, 105.0, 1.0, 0.05, 0.0).is_err());
    }

    #[test]
    fn rejects_non_finite_inputs() {
        assert!(OptionParameters::new(f64::NAN, 105.0, 1.0, 0.05, 0.2).is_err());
        assert!(OptionParameters::new(100.0, f64::INFINITY, 1.0, 0.05, 0.2).is_err());
        assert!(OptionParameters::new(100.0, 105.0, f64::INFINITY, 0.05, 0.2).is_err());
        assert!(OptionParameters::new(100.0, 105.0, 1.0, f64::NAN, 0.2).is_err());
        assert!(OptionParameters::new(100.0, 105.0, 1.0, f64::NEG_INFINITY, 0.2).is_err());
        assert!(OptionParameters::new(100.0, 105.0, 1.0, 0.05, f64::NAN).is_err());
    }

    #[test]
    fn with_underlying_price_keeps_contract() {
        let base = OptionParameters::new(100.0, 105.0, 1.0, 0.05, 0.2).unwrap();
        let moved = base.with_underlying_price(120.0).unwrap();
        assert_eq!(moved.underlying_price(), 120.0);
        assert_eq!(moved.strike_price(), base.strike_price());
        assert_eq!(moved.volatility(), base.volatility());
        assert!(base.with_underlying_price(-1.0).is_err());
    }

    #[test]
    fn curve_point_into_tuple() {
        let point = PriceCurvePoint {
            underlying_price: 90.0,
            call_price: 3.0,
            put_price: 12.5,
        };
        let (s, c, p): (f64, f64, f64) = point.into();
        assert_eq!((s, c, p), (90.0, 3.0, 12.5));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialization_validates() {
        let ok = r#"{"underlying_price":100.0,"strike_price":105.0,"time_to_expiration":1.0,"risk_free_rate":0.05,"volatility":0.2}"#;
        let params: OptionParameters = serde_json::from_str(ok).unwrap();
        assert_eq!(params.strike_price(), 105.0);

        let bad = r#"{"underlying_price":100.0,"strike_price":105.0,"time_to_expiration":0.0,"risk_free_rate":0.05,"volatility":0.2}"#;
        assert!(serde_json::from_str::<OptionParameters>(bad).is_err());
    }
}

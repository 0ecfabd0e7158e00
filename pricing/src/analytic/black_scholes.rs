use crate::analytic::distributions::{normal_cdf, normal_pdf};
use crate::common::error::PricingError;
use crate::common::models::{OptionParameters, OptionPrices};

/// Calendar days per year used to express theta as daily decay.
const DAYS_PER_YEAR: f64 = 365.25;
/// Scales vega and rho to a one percentage point move.
const PERCENTAGE_POINT: f64 = 100.0;

pub trait OptionPrice {
    type Params;
    fn put(params: &Self::Params) -> Result<f64, PricingError>;
    fn call(params: &Self::Params) -> Result<f64, PricingError>;
}

/// European Put and Call option prices for stocks.
/// https://en.wikipedia.org/wiki/Black-Scholes_model
pub struct BlackScholesMerton;

impl OptionPrice for BlackScholesMerton {
    type Params = OptionParameters;

    fn call(params: &OptionParameters) -> Result<f64, PricingError> {
        call_price(params)
    }

    fn put(params: &OptionParameters) -> Result<f64, PricingError> {
        put_price(params)
    }
}

/// The d1/d2 terms shared by the price and greek formulas.
struct Terms {
    d1: f64,
    d2: f64,
    sqrt_t: f64,
    discount: f64,
}

impl Terms {
    fn new(params: &OptionParameters) -> Self {
        let sqrt_t = params.time_to_expiration().sqrt();
        let sigma_exp = params.volatility() * sqrt_t;
        // sigma or T close to zero push d1/d2 towards +-inf; left unguarded
        let d1 = ((params.underlying_price() / params.strike_price()).ln()
            + (params.risk_free_rate() + 0.5 * params.volatility().powi(2))
                * params.time_to_expiration())
            / sigma_exp;
        let d2 = d1 - sigma_exp;
        Self {
            d1,
            d2,
            sqrt_t,
            discount: params.discount_factor(),
        }
    }

    fn call(&self, params: &OptionParameters) -> f64 {
        params.underlying_price() * normal_cdf(self.d1)
            - params.strike_price() * self.discount * normal_cdf(self.d2)
    }

    fn put(&self, params: &OptionParameters) -> f64 {
        params.strike_price() * self.discount * normal_cdf(-self.d2)
            - params.underlying_price() * normal_cdf(-self.d1)
    }
}

fn ensure_valid(params: &OptionParameters) -> Result<(), PricingError> {
    if params.is_valid() {
        Ok(())
    } else {
        Err(PricingError::InvalidParameters)
    }
}

/// Call and put prices together with delta, gamma, theta, vega and rho.
pub fn price_and_greeks(params: &OptionParameters) -> Result<OptionPrices, PricingError> {
    ensure_valid(params)?;

    let s = params.underlying_price();
    let k = params.strike_price();
    let t = params.time_to_expiration();
    let r = params.risk_free_rate();
    let sigma = params.volatility();

    let terms = Terms::new(params);
    let n_d1 = normal_cdf(terms.d1);
    let n_d2 = normal_cdf(terms.d2);
    let n_neg_d2 = normal_cdf(-terms.d2);
    let phi_d1 = normal_pdf(terms.d1);

    let time_decay = -(s * phi_d1 * sigma) / (2.0 * terms.sqrt_t);
    let theta_call = time_decay - r * k * terms.discount * n_d2;
    let theta_put = time_decay + r * k * terms.discount * n_neg_d2;
    let vega = s * phi_d1 * terms.sqrt_t;
    let rho_call = k * t * terms.discount * n_d2;
    let rho_put = -k * t * terms.discount * n_neg_d2;

    Ok(OptionPrices {
        call_price: terms.call(params),
        put_price: terms.put(params),
        delta_call: n_d1,
        delta_put: n_d1 - 1.0,
        gamma: phi_d1 / (s * sigma * terms.sqrt_t),
        theta_call: theta_call / DAYS_PER_YEAR,
        theta_put: theta_put / DAYS_PER_YEAR,
        vega: vega / PERCENTAGE_POINT,
        rho_call: rho_call / PERCENTAGE_POINT,
        rho_put: rho_put / PERCENTAGE_POINT,
    })
}

/// The price (theoretical value) of the European call option.
pub fn call_price(params: &OptionParameters) -> Result<f64, PricingError> {
    ensure_valid(params)?;
    Ok(Terms::new(params).call(params))
}

/// The price (theoretical value) of the European put option.
pub fn put_price(params: &OptionParameters) -> Result<f64, PricingError> {
    ensure_valid(params)?;
    Ok(Terms::new(params).put(params))
}

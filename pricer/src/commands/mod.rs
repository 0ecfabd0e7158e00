//! CLI command implementations

pub mod curve;
pub mod price;

use bsm_pricing::OptionParameters;
use clap::Args;
use tracing::warn;

use crate::config::MarketDefaults;
use crate::Result;

/// Market and contract inputs; omitted flags fall back to the configured defaults.
#[derive(Args, Debug, Default, Clone)]
pub struct ParameterArgs {
    /// Underlying asset price (S)
    #[arg(short = 's', long)]
    pub underlying: Option<f64>,

    /// Strike price (K)
    #[arg(short = 'k', long)]
    pub strike: Option<f64>,

    /// Time to expiration in years (T)
    #[arg(short = 't', long)]
    pub expiry: Option<f64>,

    /// Annual risk-free rate as a decimal, e.g. 0.05 (r)
    #[arg(short = 'r', long, allow_negative_numbers = true)]
    pub rate: Option<f64>,

    /// Annual volatility as a decimal, e.g. 0.2 (sigma)
    #[arg(short = 'v', long)]
    pub volatility: Option<f64>,
}

impl ParameterArgs {
    pub fn resolve(&self, defaults: &MarketDefaults) -> Result<OptionParameters> {
        let underlying = self.underlying.unwrap_or(defaults.underlying_price);
        let strike = self.strike.unwrap_or(defaults.strike_price);
        let expiry = self.expiry.unwrap_or(defaults.time_to_expiration);
        let rate = self.rate.unwrap_or(defaults.risk_free_rate);
        let volatility = self.volatility.unwrap_or(defaults.volatility);

        OptionParameters::new(underlying, strike, expiry, rate, volatility).map_err(|err| {
            warn!(underlying, strike, expiry, rate, volatility, "rejected option parameters");
            err.into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use assert_approx_eq::assert_approx_eq;
    use bsm_pricing::PricingError;

    #[test]
    fn flags_override_defaults() {
        let args = ParameterArgs {
            strike: Some(110.0),
            rate: Some(-0.01),
            ..Default::default()
        };
        let params = args.resolve(&MarketDefaults::default()).unwrap();
        assert_eq!(params.underlying_price(), 100.0);
        assert_eq!(params.strike_price(), 110.0);
        assert_eq!(params.risk_free_rate(), -0.01);
    }

    #[test]
    fn defaults_price_the_reference_option() {
        let params = ParameterArgs::default()
            .resolve(&MarketDefaults::default())
            .unwrap();
        assert_approx_eq!(params.discount_factor(), (-0.05_f64).exp(), 1e-15);
        assert_approx_eq!(bsm_pricing::call_price(&params).unwrap(), 8.0214, 1e-4);
    }

    #[test]
    fn each_rejected_flag_maps_to_invalid_parameters() {
        let rejected = [
            ParameterArgs { underlying: Some(0.0), ..Default::default() },
            ParameterArgs { strike: Some(-5.0), ..Default::default() },
            ParameterArgs { rate: Some(f64::NAN), ..Default::default() },
            ParameterArgs { volatility: Some(f64::INFINITY), ..Default::default() },
        ];
        for args in rejected {
            assert!(matches!(
                args.resolve(&MarketDefaults::default()),
                Err(CliError::Pricing(PricingError::InvalidParameters))
            ));
        }
    }

    #[test]
    fn invalid_inputs_surface_as_pricing_errors() {
        let args = ParameterArgs {
            expiry: Some(0.0),
            ..Default::default()
        };
        assert!(matches!(
            args.resolve(&MarketDefaults::default()),
            Err(CliError::Pricing(PricingError::InvalidParameters))
        ));
    }
}

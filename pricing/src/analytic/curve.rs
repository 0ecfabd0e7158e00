//! Price curves: the option re-priced across a sweep of underlying prices.

use ndarray::Array1;
use rayon::prelude::*;
use tracing::debug;

use crate::analytic::black_scholes::{call_price, put_price};
use crate::common::error::PricingError;
use crate::common::models::{OptionParameters, PriceCurvePoint};

/// Lowest underlying price a curve may start at.
pub const MIN_UNDERLYING_PRICE: f64 = 0.01;

/// Window and resolution of a price curve.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CurveSettings {
    /// half-width of the window around the base underlying price, in price units
    pub price_range: f64,
    pub num_points: usize,
}

impl Default for CurveSettings {
    fn default() -> Self {
        Self {
            price_range: 50.0,
            num_points: 100,
        }
    }
}

impl CurveSettings {
    pub fn generate(&self, base: &OptionParameters) -> Result<Vec<PriceCurvePoint>, PricingError> {
        generate_price_curve(base, self.price_range, self.num_points)
    }
}

/// Sampling grid over the underlying price.
///
/// The lower end is floored at [`MIN_UNDERLYING_PRICE`] without moving the upper end,
/// so the window is off-center whenever `price_range` reaches past zero.
struct Grid {
    start_price: f64,
    step: f64,
    num_points: usize,
}

impl Grid {
    fn new(base: &OptionParameters, price_range: f64, num_points: usize) -> Result<Self, PricingError> {
        if num_points == 0 {
            return Err(PricingError::InvalidArgument(
                "number of points must be positive".to_string(),
            ));
        }
        if !price_range.is_finite() || price_range < 0.0 {
            return Err(PricingError::InvalidArgument(format!(
                "price range must be a finite non-negative number, got {price_range}"
            )));
        }

        let start_price = MIN_UNDERLYING_PRICE.max(base.underlying_price() - price_range);
        let end_price = base.underlying_price() + price_range;
        let step = if num_points == 1 {
            0.0
        } else {
            (end_price - start_price) / (num_points - 1) as f64
        };
        debug!(start_price, end_price, num_points, "sampling price curve");

        Ok(Self {
            start_price,
            step,
            num_points,
        })
    }

    fn price_at(&self, i: usize) -> f64 {
        self.start_price + i as f64 * self.step
    }
}

fn sample(base: &OptionParameters, underlying_price: f64) -> Result<PriceCurvePoint, PricingError> {
    let params = base.with_underlying_price(underlying_price)?;
    Ok(PriceCurvePoint {
        underlying_price,
        call_price: call_price(&params)?,
        put_price: put_price(&params)?,
    })
}

/// Prices the call and put at `num_points` underlying prices between
/// `max(0.01, S - price_range)` and `S + price_range`, in ascending order.
///
/// Strike, expiry, rate and volatility are taken from `base`.
/// A single point is sampled at the lower end of the window.
pub fn generate_price_curve(
    base: &OptionParameters,
    price_range: f64,
    num_points: usize,
) -> Result<Vec<PriceCurvePoint>, PricingError> {
    let grid = Grid::new(base, price_range, num_points)?;
    (0..grid.num_points)
        .map(|i| sample(base, grid.price_at(i)))
        .collect()
}

/// Same as [`generate_price_curve`] with the samples priced on the rayon thread pool.
pub fn generate_price_curve_par(
    base: &OptionParameters,
    price_range: f64,
    num_points: usize,
) -> Result<Vec<PriceCurvePoint>, PricingError> {
    let grid = Grid::new(base, price_range, num_points)?;
    (0..grid.num_points)
        .into_par_iter()
        .map(|i| sample(base, grid.price_at(i)))
        .collect()
}

/// Splits a curve into (underlying, call, put) columns.
pub fn curve_columns(curve: &[PriceCurvePoint]) -> (Array1<f64>, Array1<f64>, Array1<f64>) {
    let prices = curve.iter().map(|p| p.underlying_price).collect();
    let calls = curve.iter().map(|p| p.call_price).collect();
    let puts = curve.iter().map(|p| p.put_price).collect();
    (prices, calls, puts)
}

/// Call and put intrinsic values at expiration for every sampled underlying price.
pub fn expiry_payoffs(curve: &[PriceCurvePoint], strike_price: f64) -> Vec<(f64, f64)> {
    curve
        .iter()
        .map(|p| {
            (
                (p.underlying_price - strike_price).max(0.0),
                (strike_price - p.underlying_price).max(0.0),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytic::black_scholes::price_and_greeks;
    use assert_approx_eq::assert_approx_eq;

    fn base() -> OptionParameters {
        OptionParameters::new(100.0, 105.0, 1.0, 0.05, 0.2).unwrap()
    }

    #[test]
    fn default_settings() {
        let settings = CurveSettings::default();
        assert_eq!(settings.price_range, 50.0);
        assert_eq!(settings.num_points, 100);
        assert_eq!(settings.generate(&base()).unwrap().len(), 100);
    }

    #[test]
    fn window_bounds_and_order() {
        let curve = generate_price_curve(&base(), 50.0, 101).unwrap();
        assert_eq!(curve.len(), 101);
        assert_approx_eq!(curve[0].underlying_price, 50.0, 1e-12);
        assert_approx_eq!(curve[100].underlying_price, 150.0, 1e-9);
        assert_approx_eq!(curve[50].underlying_price, 100.0, 1e-9);
        assert!(curve
            .windows(2)
            .all(|w| w[0].underlying_price < w[1].underlying_price));
    }

    #[test]
    fn floored_window_is_not_recentred() {
        let curve = generate_price_curve(&base(), 150.0, 10).unwrap();
        assert_approx_eq!(curve[0].underlying_price, MIN_UNDERLYING_PRICE, 1e-12);
        assert_approx_eq!(curve[9].underlying_price, 250.0, 1e-9);
    }

    #[test]
    fn samples_match_single_point_pricing() {
        let curve = generate_price_curve(&base(), 20.0, 5).unwrap();
        for point in &curve {
            let params = base().with_underlying_price(point.underlying_price).unwrap();
            let prices = price_and_greeks(&params).unwrap();
            assert_eq!(point.call_price, prices.call_price);
            assert_eq!(point.put_price, prices.put_price);
        }
    }

    #[test]
    fn call_rises_and_put_falls_along_the_curve() {
        let curve = generate_price_curve(&base(), 50.0, 50).unwrap();
        assert!(curve.windows(2).all(|w| w[0].call_price <= w[1].call_price));
        assert!(curve.windows(2).all(|w| w[0].put_price >= w[1].put_price));
    }

    #[test]
    fn single_point_sits_at_window_start() {
        let curve = generate_price_curve(&base(), 50.0, 1).unwrap();
        assert_eq!(curve.len(), 1);
        assert_approx_eq!(curve[0].underlying_price, 50.0, 1e-12);
        assert!(curve[0].call_price.is_finite());
    }

    #[test]
    fn zero_points_is_rejected() {
        assert!(matches!(
            generate_price_curve(&base(), 50.0, 0),
            Err(PricingError::InvalidArgument(_))
        ));
    }

    #[test]
    fn bad_price_range_is_rejected() {
        for range in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                generate_price_curve(&base(), range, 10),
                Err(PricingError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn parallel_curve_matches_sequential() {
        let sequential = generate_price_curve(&base(), 40.0, 257).unwrap();
        let parallel = generate_price_curve_par(&base(), 40.0, 257).unwrap();
        assert_eq!(sequential, parallel);
        assert!(generate_price_curve_par(&base(), 40.0, 0).is_err());
    }

    #[test]
    fn columns_follow_curve_order() {
        let curve = generate_price_curve(&base(), 10.0, 3).unwrap();
        let (prices, calls, puts) = curve_columns(&curve);
        assert_eq!(prices.len(), 3);
        assert_eq!(prices[2], curve[2].underlying_price);
        assert_eq!(calls[1], curve[1].call_price);
        assert_eq!(puts[0], curve[0].put_price);
    }

    #[test]
    fn payoffs_at_expiration() {
        let curve = generate_price_curve(&base(), 10.0, 3).unwrap();
        let payoffs = expiry_payoffs(&curve, 105.0);
        assert_eq!(payoffs[0], (0.0, 15.0));
        assert_eq!(payoffs[1], (0.0, 5.0));
        assert_eq!(payoffs[2], (5.0, 0.0));
    }
}

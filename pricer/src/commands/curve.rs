//! Curve command: call and put prices across a sweep of underlying prices.

use std::fmt::Write;

use bsm_pricing::analytic::curve::{curve_columns, expiry_payoffs};
use bsm_pricing::{generate_price_curve_par, CurveSettings, OptionParameters, PriceCurvePoint};
use clap::ValueEnum;
use serde::Serialize;
use tracing::info;

use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CurveFormat {
    #[default]
    Csv,
    Json,
}

/// A curve sample together with the payoff at expiration.
#[derive(Debug, Serialize)]
pub struct CurveRow {
    pub underlying_price: f64,
    pub call_price: f64,
    pub put_price: f64,
    pub call_payoff: f64,
    pub put_payoff: f64,
}

pub fn run(
    params: &OptionParameters,
    settings: CurveSettings,
    parallel: bool,
    format: CurveFormat,
) -> Result<()> {
    info!(
        price_range = settings.price_range,
        num_points = settings.num_points,
        parallel,
        "generating price curve"
    );
    let rows = build_rows(params, settings, parallel)?;
    let output = match format {
        CurveFormat::Csv => render_csv(&rows),
        CurveFormat::Json => serde_json::to_string_pretty(&rows)?,
    };
    println!("{output}");
    Ok(())
}

pub fn build_rows(
    params: &OptionParameters,
    settings: CurveSettings,
    parallel: bool,
) -> Result<Vec<CurveRow>> {
    let curve: Vec<PriceCurvePoint> = if parallel {
        generate_price_curve_par(params, settings.price_range, settings.num_points)?
    } else {
        settings.generate(params)?
    };
    let payoffs = expiry_payoffs(&curve, params.strike_price());
    let (prices, calls, puts) = curve_columns(&curve);

    Ok(prices
        .iter()
        .zip(calls.iter())
        .zip(puts.iter())
        .zip(payoffs)
        .map(|(((&underlying_price, &call_price), &put_price), (call_payoff, put_payoff))| {
            CurveRow {
                underlying_price,
                call_price,
                put_price,
                call_payoff,
                put_payoff,
            }
        })
        .collect())
}

pub fn render_csv(rows: &[CurveRow]) -> String {
    let mut out = String::from("underlying,call,put,call_payoff,put_payoff\n");
    for row in rows {
        let _ = writeln!(
            out,
            "{:.4},{:.6},{:.6},{:.6},{:.6}",
            row.underlying_price, row.call_price, row.put_price, row.call_payoff, row.put_payoff
        );
    }
    out
}

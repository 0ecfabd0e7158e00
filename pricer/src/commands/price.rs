//! Price command: prices, greeks and the put-call parity check for one parameter set.

use std::fmt::Write;

use bsm_pricing::{price_and_greeks, OptionParameters, OptionPrices, ParityCheck};
use clap::ValueEnum;
use serde::Serialize;
use tracing::info;

use crate::format::{format_currency, format_percentage};
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PriceFormat {
    #[default]
    Table,
    Json,
}

#[derive(Serialize)]
struct PriceReport<'a> {
    parameters: &'a OptionParameters,
    prices: &'a OptionPrices,
    parity: &'a ParityCheck,
}

pub fn run(params: &OptionParameters, format: PriceFormat) -> Result<()> {
    info!(?params, "pricing option");
    let prices = price_and_greeks(params)?;
    let parity = ParityCheck::evaluate(params, &prices);
    if !parity.holds() {
        tracing::warn!(difference = parity.difference, "put-call parity violated");
    }

    let output = match format {
        PriceFormat::Table => render_table(params, &prices, &parity),
        PriceFormat::Json => render_json(params, &prices, &parity)?,
    };
    println!("{output}");
    Ok(())
}

pub fn render_json(
    params: &OptionParameters,
    prices: &OptionPrices,
    parity: &ParityCheck,
) -> Result<String> {
    let report = PriceReport {
        parameters: params,
        prices,
        parity,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn render_table(params: &OptionParameters, prices: &OptionPrices, parity: &ParityCheck) -> String {
    // writing into a String cannot fail
    let mut out = String::new();
    let _ = writeln!(out, "Inputs");
    let _ = writeln!(
        out,
        "  Underlying: {}  Strike: {}  Expiry: {} y",
        format_currency(params.underlying_price()),
        format_currency(params.strike_price()),
        params.time_to_expiration()
    );
    let _ = writeln!(
        out,
        "  Rate: {}  Volatility: {}",
        format_percentage(params.risk_free_rate()),
        format_percentage(params.volatility())
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Option Prices");
    let _ = writeln!(out, "  Call Price: {}", format_currency(prices.call_price));
    let _ = writeln!(out, "  Put Price:  {}", format_currency(prices.put_price));
    if parity.holds() {
        let _ = writeln!(out, "  Put-Call Parity Check: valid");
    } else {
        let _ = writeln!(
            out,
            "  Put-Call Parity Check: difference {:.4}",
            parity.difference
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{:<8}{:>12}{:>12}", "Greek", "Call", "Put");
    let rows = [
        ("Delta", format!("{:.4}", prices.delta_call), format!("{:.4}", prices.delta_put)),
        ("Gamma", format!("{:.6}", prices.gamma), format!("{:.6}", prices.gamma)),
        ("Theta", format!("{:.4}", prices.theta_call), format!("{:.4}", prices.theta_put)),
        ("Vega", format!("{:.4}", prices.vega), format!("{:.4}", prices.vega)),
        ("Rho", format!("{:.4}", prices.rho_call), format!("{:.4}", prices.rho_put)),
    ];
    for (greek, call, put) in rows {
        let _ = writeln!(out, "{greek:<8}{call:>12}{put:>12}");
    }
    out
}

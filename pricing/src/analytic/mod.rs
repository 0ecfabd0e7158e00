pub mod black_scholes;
pub mod curve;
pub mod distributions;
pub mod parity;

//! Cotejo - normalized comparison of two optimization-solver benchmark runs
//!
//! This library takes two collections of per-instance solver run records,
//! pairs them by instance, rescales each pair's objective and lower bound
//! histories by a shared best-known value, and merges all pairs into one
//! mean relative-performance curve over elapsed time.

pub mod cli;
pub mod comparison;
pub mod error;
pub mod filter;
pub mod html_output;
pub mod json_output;
pub mod loader;
pub mod normalize;
pub mod pairing;
pub mod record;

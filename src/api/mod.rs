//! API Module
//!
//! - commands.rs: the `Predictor` facade presentation shells call

pub mod commands;

pub use commands::*;

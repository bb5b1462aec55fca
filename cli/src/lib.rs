//! Tip Time
//!
//! A single-screen tip calculator. The crate is split the same way the screen
//! is wired:
//!
//! - `tip`: the pure calculation from cost text, percentage and round-up flag
//! - `currency`: locale-driven formatting injected into the calculator
//! - `config`: locale resolution from flags and the environment
//! - `ui`: the terminal form that feeds the calculator and shows its result

pub mod config;
pub mod currency;
pub mod tip;
pub mod ui;

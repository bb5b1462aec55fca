//! UI Module
//!
//! This module exports the UI components for the tip calculator:
//!
//! - `app`: Form state, key handling and event loop
//! - `views`: Rendering of the single tip screen
//!
//! The UI only adapts widget state to the plain values the calculator takes;
//! all tip arithmetic lives in `crate::tip`.

mod app;
mod views;

pub use app::{run_app, tip_amount_text, App, Field, TipForm};
pub use views::draw;

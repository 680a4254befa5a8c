//! Sonic Studio - desktop shell for the simulated remix studio
//!
//! Exposes the UI module so integration code can construct the app.

pub mod ui;

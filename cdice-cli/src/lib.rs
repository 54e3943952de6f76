//! cdice-cli: command-line generator for Cantonese diceware word lists
//!
//! This crate holds the configuration layer used by the `cdice` binary.
//! Generation and transliteration live in cdice-engine.

pub mod config;

pub use config::Settings;

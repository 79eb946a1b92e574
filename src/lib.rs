//! ticker-metrics: on-demand stock indicators
//!
//! This library provides:
//! - Daily closes and dividend history from the Yahoo Finance chart API
//! - Mean and median of 5-year closing prices
//! - Beta against a benchmark index and annualized volatility
//! - Trailing dividend sum, dividend yield and ceiling price
//! - Graham fair value from EPS and BVPS
//! - Table and JSON reports for the CLI

pub mod cli;
pub mod config;
pub mod indicators;
pub mod provider;
pub mod report;
pub mod telemetry;

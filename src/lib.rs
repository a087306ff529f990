//! QCOM Viewer - daily price/volume data over HTTP
//!
//! Loads one CSV once, splits it into three historical periods and serves it
//! as an HTML table, a JSON API and a monthly mean volume chart.

pub mod charts;
pub mod config;
pub mod data;
pub mod stats;
pub mod web;

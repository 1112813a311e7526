//! Turns the plaintext logs of the collision-detection benchmark into
//! chart-ready tables.
//!
//! ```text
//! log text ─▶ data::loader ─▶ Dataset ─▶ data::ratio ─▶ Table ─▶ chart::ChartExporter
//! ```

pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;

pub use data::model::{Dataset, Table};
pub use error::{ExportError, ParseError};

pub mod config;
pub mod engine;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod record;
pub mod tier;

pub use engine::types::DashboardReport;
pub use record::{FleetRecord, Measure, ProcessedRecord};

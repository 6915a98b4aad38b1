pub mod billing;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod report;
pub mod utils;

pub use billing::{compute_billing, next_record, ComputedValues, Record, Settings};
pub use document::{Document, DocumentStore, Unit};
pub use error::{MeterbookError, Result};

pub mod calculator;
pub mod sequencer;
pub mod types;

pub use calculator::{check_readings, compute_billing};
pub use sequencer::next_record;
pub use types::{
    parse_finite, ComputedValues, ReadingWarning, Record, RecordField, Settings, Utility,
    DATE_FORMAT,
};

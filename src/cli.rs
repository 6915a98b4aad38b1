use crate::billing::{parse_finite, RecordField};
use crate::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "meterbook")]
#[command(version, about = "Utility meter ledger and bill calculator for landlords")]
pub struct Cli {
    /// Document file to use instead of the configured one
    #[arg(long = "data", global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the config file and an empty document
    Init,

    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Manage rental units
    Unit {
        #[command(subcommand)]
        action: UnitAction,
    },

    /// Manage metering periods of a unit
    Record {
        #[command(subcommand)]
        action: RecordAction,
    },

    /// Print the bill for one period (latest if no record is given)
    Bill {
        /// Unit id or name
        unit: String,
        /// Record id
        record: Option<String>,
    },

    /// Show or change the defaults used for a unit's first record
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Write the whole document to a JSON file
    Export {
        /// Target file (default: landlord-data-YYYY-MM-DD.json in the export directory)
        path: Option<PathBuf>,
    },

    /// Replace the whole document with a JSON file
    Import {
        /// Source file
        path: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print current configuration
    Print,
    /// Check configuration
    Check,
}

#[derive(Subcommand, Debug)]
pub enum UnitAction {
    /// Add a unit
    Add { name: String },
    /// Rename a unit
    Rename {
        /// Unit id or name
        unit: String,
        name: String,
    },
    /// Delete a unit and all its records
    Remove {
        /// Unit id or name
        unit: String,
    },
    /// List units
    List,
}

#[derive(Subcommand, Debug)]
pub enum RecordAction {
    /// Append the next period, prefilled from the previous one
    Add {
        /// Unit id or name
        unit: String,
    },
    /// Change one field of a record
    Set {
        /// Unit id or name
        unit: String,
        /// Record id
        record: String,
        #[arg(value_enum)]
        field: RecordField,
        /// New value (YYYY-MM-DD for dates)
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Delete a record
    Remove {
        /// Unit id or name
        unit: String,
        /// Record id
        record: String,
    },
    /// Show a unit's records with computed fees
    List {
        /// Unit id or name
        unit: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Show the defaults
    Show,
    /// Change one or more defaults
    Set {
        /// Default water unit price
        #[arg(long, allow_hyphen_values = true, value_parser = water_price)]
        water: Option<f64>,
        /// Default electric unit price
        #[arg(long, allow_hyphen_values = true, value_parser = electric_price)]
        electric: Option<f64>,
        /// Default extra fee
        #[arg(long = "extra-fee", allow_hyphen_values = true, value_parser = extra_fee_amount)]
        extra_fee: Option<f64>,
    },
}

fn water_price(value: &str) -> Result<f64> {
    parse_finite("defaultWaterUnitPrice", value)
}

fn electric_price(value: &str) -> Result<f64> {
    parse_finite("defaultElectricUnitPrice", value)
}

fn extra_fee_amount(value: &str) -> Result<f64> {
    parse_finite("defaultExtraFee", value)
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

use chrono::{Local, NaiveDate};
use meterbook::billing::check_readings;
use meterbook::cli::{Cli, Command, ConfigAction, RecordAction, SettingsAction, UnitAction};
use meterbook::config::Config;
use meterbook::debug_println;
use meterbook::document::{default_export_name, DocumentStore};
use meterbook::error::MeterbookError;
use meterbook::report;
use meterbook::Record;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config, using defaults: {}", e);
        Config::default()
    });
    let data_path = config.data_path(cli.data.as_deref());
    debug_println!("Using document {}", data_path.display());

    // Commands that do not touch the document
    match &cli.command {
        Command::Init => {
            Config::init()?;
            let store = DocumentStore::open(data_path)?;
            if !store.path().exists() {
                store.save()?;
                println!("Created empty document at {}", store.path().display());
            } else {
                println!("Document already exists at {}", store.path().display());
            }
            return Ok(());
        }
        Command::Config { action } => {
            match action {
                ConfigAction::Print => config.print()?,
                ConfigAction::Check => {
                    config.check()?;
                    println!("✓ Configuration valid");
                }
            }
            return Ok(());
        }
        _ => {}
    }

    let mut store = match DocumentStore::open(data_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: Failed to load document: {}", e);
            std::process::exit(1);
        }
    };

    let today = Local::now().date_naive();

    match run(cli.command, &mut store, &config, today) {
        Ok(true) => store.save()?,
        Ok(false) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Apply one command; returns whether the document changed and must be saved
fn run(
    command: Command,
    store: &mut DocumentStore,
    config: &Config,
    today: NaiveDate,
) -> Result<bool, MeterbookError> {
    match command {
        Command::Init | Command::Config { .. } => Ok(false),

        Command::Unit { action } => match action {
            UnitAction::Add { name } => {
                let unit = store.document_mut().add_unit(&name)?;
                println!("✓ Added unit {} ({})", unit.name, unit.id);
                Ok(true)
            }
            UnitAction::Rename { unit, name } => {
                let unit = store.document_mut().rename_unit(&unit, &name)?;
                println!("✓ Renamed unit {} to {}", unit.id, unit.name);
                Ok(true)
            }
            UnitAction::Remove { unit } => {
                let removed = store.document_mut().remove_unit(&unit)?;
                println!(
                    "✓ Removed unit {} with {} records",
                    removed.name,
                    removed.records.len()
                );
                Ok(true)
            }
            UnitAction::List => {
                println!("{}", report::render_unit_list(store.document()));
                Ok(false)
            }
        },

        Command::Record { action } => match action {
            RecordAction::Add { unit } => {
                let record = store.document_mut().add_record(&unit, today)?;
                println!(
                    "✓ Added record {} ({} to {})",
                    record.id,
                    record.start_date.format("%Y-%m-%d"),
                    record.end_date.format("%Y-%m-%d")
                );
                Ok(true)
            }
            RecordAction::Set {
                unit,
                record,
                field,
                value,
            } => {
                let record = store
                    .document_mut()
                    .update_record(&unit, &record, field, &value)?;
                println!("✓ Set {} of record {}", field.name(), record.id);
                warn_readings(record);
                Ok(true)
            }
            RecordAction::Remove { unit, record } => {
                let removed = store.document_mut().remove_record(&unit, &record)?;
                println!("✓ Removed record {}", removed.id);
                Ok(true)
            }
            RecordAction::List { unit } => {
                let unit = store
                    .document()
                    .find_unit(&unit)
                    .ok_or(MeterbookError::UnitNotFound(unit))?;
                println!("{}", report::render_record_table(unit));
                unit.records.iter().for_each(warn_readings);
                Ok(false)
            }
        },

        Command::Bill { unit, record } => {
            let found = store
                .document()
                .find_unit(&unit)
                .ok_or_else(|| MeterbookError::UnitNotFound(unit.clone()))?;
            let selected = match &record {
                Some(id) => found
                    .find_record(id)
                    .ok_or_else(|| MeterbookError::RecordNotFound(id.clone()))?,
                None => found
                    .latest_record()
                    .ok_or_else(|| MeterbookError::NoRecords(found.name.clone()))?,
            };
            println!("{}", report::render_bill(&found.name, selected));
            warn_readings(selected);
            Ok(false)
        }

        Command::Settings { action } => match action {
            SettingsAction::Show => {
                println!("{}", report::render_settings(&store.document().settings));
                Ok(false)
            }
            SettingsAction::Set {
                water,
                electric,
                extra_fee,
            } => {
                let mut settings = store.document().settings;
                if let Some(value) = water {
                    settings.default_water_unit_price = value;
                }
                if let Some(value) = electric {
                    settings.default_electric_unit_price = value;
                }
                if let Some(value) = extra_fee {
                    settings.default_extra_fee = value;
                }
                store.document_mut().set_settings(settings)?;
                println!("✓ Settings updated");
                println!("{}", report::render_settings(&settings));
                Ok(true)
            }
        },

        Command::Export { path } => {
            let target =
                path.unwrap_or_else(|| config.export_dir().join(default_export_name(today)));
            store.export(&target)?;
            println!("✓ Exported document to {}", target.display());
            Ok(false)
        }

        Command::Import { path } => {
            store.import(&path)?;
            println!(
                "✓ Imported {} units from {}",
                store.document().units.len(),
                path.display()
            );
            Ok(true)
        }
    }
}

fn warn_readings(record: &Record) {
    for warning in check_readings(record) {
        eprintln!("Warning: record {}: {}", record.id, warning);
    }
}

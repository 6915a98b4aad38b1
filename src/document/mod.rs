pub mod store;

pub use store::{default_export_name, parse_document, DocumentStore};

use crate::billing::{next_record, Record, RecordField, Settings};
use crate::error::{MeterbookError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rental unit and its metering periods, oldest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: String,
    pub name: String,
    pub records: Vec<Record>,
}

/// Everything that is saved and loaded as one file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub units: Vec<Unit>,
    pub settings: Settings,
}

impl Unit {
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: clean_name(name)?,
            records: Vec::new(),
        })
    }

    pub fn find_record(&self, record_id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == record_id)
    }

    fn find_record_mut(&mut self, record_id: &str) -> Result<&mut Record> {
        self.records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| MeterbookError::RecordNotFound(record_id.to_string()))
    }

    /// Most recently appended record
    pub fn latest_record(&self) -> Option<&Record> {
        self.records.last()
    }
}

impl Document {
    /// Look a unit up by id, falling back to an exact name match
    pub fn find_unit(&self, key: &str) -> Option<&Unit> {
        self.position(key).map(|i| &self.units[i])
    }

    fn find_unit_mut(&mut self, key: &str) -> Result<&mut Unit> {
        let index = self
            .position(key)
            .ok_or_else(|| MeterbookError::UnitNotFound(key.to_string()))?;
        Ok(&mut self.units[index])
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.units
            .iter()
            .position(|u| u.id == key)
            .or_else(|| self.units.iter().position(|u| u.name == key))
    }

    pub fn add_unit(&mut self, name: &str) -> Result<&Unit> {
        self.units.push(Unit::new(name)?);
        let index = self.units.len() - 1;
        Ok(&self.units[index])
    }

    pub fn rename_unit(&mut self, key: &str, name: &str) -> Result<&Unit> {
        let name = clean_name(name)?;
        let unit = self.find_unit_mut(key)?;
        unit.name = name;
        Ok(unit)
    }

    pub fn remove_unit(&mut self, key: &str) -> Result<Unit> {
        let index = self
            .position(key)
            .ok_or_else(|| MeterbookError::UnitNotFound(key.to_string()))?;
        Ok(self.units.remove(index))
    }

    /// Append the next metering period to a unit
    pub fn add_record(&mut self, unit_key: &str, today: NaiveDate) -> Result<&Record> {
        let settings = self.settings;
        let unit = self.find_unit_mut(unit_key)?;
        let record = next_record(&unit.records, &settings, today);
        unit.records.push(record);
        Ok(&unit.records[unit.records.len() - 1])
    }

    /// Parse `value` into one field of a record
    ///
    /// The record is left unchanged when the value does not parse.
    pub fn update_record(
        &mut self,
        unit_key: &str,
        record_id: &str,
        field: RecordField,
        value: &str,
    ) -> Result<&Record> {
        let record = self.find_unit_mut(unit_key)?.find_record_mut(record_id)?;
        record.set_field(field, value)?;
        Ok(record)
    }

    pub fn remove_record(&mut self, unit_key: &str, record_id: &str) -> Result<Record> {
        let unit = self.find_unit_mut(unit_key)?;
        let index = unit
            .records
            .iter()
            .position(|r| r.id == record_id)
            .ok_or_else(|| MeterbookError::RecordNotFound(record_id.to_string()))?;
        Ok(unit.records.remove(index))
    }

    /// Replace the defaults, refusing NaN and infinities
    pub fn set_settings(&mut self, settings: Settings) -> Result<()> {
        let values = [
            ("defaultWaterUnitPrice", settings.default_water_unit_price),
            ("defaultElectricUnitPrice", settings.default_electric_unit_price),
            ("defaultExtraFee", settings.default_extra_fee),
        ];
        if let Some((field, _)) = values.iter().find(|(_, value)| !value.is_finite()) {
            return Err(MeterbookError::InvalidValue {
                field: *field,
                reason: "must be a finite number".to_string(),
            });
        }

        self.settings = settings;
        Ok(())
    }
}

fn clean_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(MeterbookError::EmptyName);
    }
    Ok(name.to_string())
}

use crate::error::{MeterbookError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used for record dates in documents and on the command line
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One metering period for one rental unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub water_meter_start: f64,
    pub water_meter_end: f64,
    pub water_unit_price: f64,
    pub electric_meter_start: f64,
    pub electric_meter_end: f64,
    pub electric_unit_price: f64,
    pub extra_fee: f64,
}

/// Defaults that seed the first record of a unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub default_water_unit_price: f64,
    pub default_electric_unit_price: f64,
    pub default_extra_fee: f64,
}

/// Usage and fee figures derived from a record, never stored
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ComputedValues {
    pub water_usage: f64,
    pub electric_usage: f64,
    pub water_fee_total: f64,
    pub electric_fee_total: f64,
    pub all_fee_total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utility {
    Water,
    Electric,
}

impl std::fmt::Display for Utility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Utility::Water => write!(f, "water"),
            Utility::Electric => write!(f, "electric"),
        }
    }
}

/// Meter reading that went backwards; usage for it was clamped to zero
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadingWarning {
    pub utility: Utility,
    pub meter_start: f64,
    pub meter_end: f64,
}

impl std::fmt::Display for ReadingWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} meter end {} is below start {}, usage counted as 0",
            self.utility, self.meter_end, self.meter_start
        )
    }
}

/// Editable record fields, as named on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RecordField {
    StartDate,
    EndDate,
    WaterStart,
    WaterEnd,
    WaterPrice,
    ElectricStart,
    ElectricEnd,
    ElectricPrice,
    ExtraFee,
}

impl RecordField {
    pub fn name(&self) -> &'static str {
        match self {
            RecordField::StartDate => "startDate",
            RecordField::EndDate => "endDate",
            RecordField::WaterStart => "waterMeterStart",
            RecordField::WaterEnd => "waterMeterEnd",
            RecordField::WaterPrice => "waterUnitPrice",
            RecordField::ElectricStart => "electricMeterStart",
            RecordField::ElectricEnd => "electricMeterEnd",
            RecordField::ElectricPrice => "electricUnitPrice",
            RecordField::ExtraFee => "extraFee",
        }
    }
}

impl Record {
    /// Parse `value` and store it in `field`
    ///
    /// Dates must be `YYYY-MM-DD`. Numbers are not checked for sign or
    /// ordering, only that they parse to a finite value.
    pub fn set_field(&mut self, field: RecordField, value: &str) -> Result<()> {
        match field {
            RecordField::StartDate => self.start_date = parse_date(field, value)?,
            RecordField::EndDate => self.end_date = parse_date(field, value)?,
            RecordField::WaterStart => self.water_meter_start = parse_number(field, value)?,
            RecordField::WaterEnd => self.water_meter_end = parse_number(field, value)?,
            RecordField::WaterPrice => self.water_unit_price = parse_number(field, value)?,
            RecordField::ElectricStart => self.electric_meter_start = parse_number(field, value)?,
            RecordField::ElectricEnd => self.electric_meter_end = parse_number(field, value)?,
            RecordField::ElectricPrice => self.electric_unit_price = parse_number(field, value)?,
            RecordField::ExtraFee => self.extra_fee = parse_number(field, value)?,
        }
        Ok(())
    }
}

fn parse_date(field: RecordField, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| MeterbookError::InvalidValue {
        field: field.name(),
        reason: format!("expected YYYY-MM-DD ({})", e),
    })
}

fn parse_number(field: RecordField, value: &str) -> Result<f64> {
    parse_finite(field.name(), value)
}

/// Parse a number, refusing NaN and infinities
///
/// Non-finite numbers are written to JSON as `null`.
pub fn parse_finite(field: &'static str, value: &str) -> Result<f64> {
    let number: f64 = value
        .trim()
        .parse()
        .map_err(|e| MeterbookError::InvalidValue {
            field,
            reason: format!("{}", e),
        })?;

    if !number.is_finite() {
        return Err(MeterbookError::InvalidValue {
            field,
            reason: "must be a finite number".to_string(),
        });
    }

    Ok(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> Record {
        Record {
            id: "r1".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            water_meter_start: 100.0,
            water_meter_end: 150.0,
            water_unit_price: 3.5,
            electric_meter_start: 500.0,
            electric_meter_end: 600.0,
            electric_unit_price: 0.8,
            extra_fee: 50.0,
        }
    }

    #[test]
    fn test_set_numeric_field() {
        let mut record = sample_record();
        record.set_field(RecordField::WaterEnd, "175.5").unwrap();
        record.set_field(RecordField::ExtraFee, " -20 ").unwrap();

        assert_eq!(record.water_meter_end, 175.5);
        assert_eq!(record.extra_fee, -20.0);
    }

    #[test]
    fn test_set_date_field() {
        let mut record = sample_record();
        record.set_field(RecordField::EndDate, "2026-02-15").unwrap();
        assert_eq!(record.end_date, NaiveDate::from_ymd_opt(2026, 2, 15).unwrap());
    }

    #[test]
    fn test_set_field_rejects_bad_input() {
        let mut record = sample_record();
        let before = record.clone();

        assert!(matches!(
            record.set_field(RecordField::StartDate, "15/02/2026"),
            Err(MeterbookError::InvalidValue { field: "startDate", .. })
        ));
        assert!(matches!(
            record.set_field(RecordField::WaterPrice, "abc"),
            Err(MeterbookError::InvalidValue { field: "waterUnitPrice", .. })
        ));
        assert!(matches!(
            record.set_field(RecordField::ElectricEnd, "NaN"),
            Err(MeterbookError::InvalidValue { .. })
        ));
        assert_eq!(record, before);
    }

    #[test]
    fn test_parse_finite() {
        assert_eq!(parse_finite("defaultExtraFee", " 12.5 ").unwrap(), 12.5);
        assert_eq!(parse_finite("defaultExtraFee", "-3").unwrap(), -3.0);

        for value in ["NaN", "inf", "-inf", "infinity", ""] {
            assert!(
                matches!(
                    parse_finite("defaultWaterUnitPrice", value),
                    Err(MeterbookError::InvalidValue {
                        field: "defaultWaterUnitPrice",
                        ..
                    })
                ),
                "accepted {:?}",
                value
            );
        }
    }

    #[test]
    fn test_record_json_uses_camel_case() {
        let value = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(value["startDate"], "2026-01-01");
        assert_eq!(value["waterMeterStart"], 100.0);
        assert_eq!(value["electricUnitPrice"], 0.8);
        assert_eq!(value["extraFee"], 50.0);
    }
}

use crate::billing::{Record, Settings};
use chrono::{Datelike, Months, NaiveDate};
use uuid::Uuid;

/// Build the initial values for the next metering period of a unit
///
/// `existing` is the unit's record list in insertion order; its last element
/// is treated as the previous period. With no prior records the new period
/// spans the calendar month containing `today` and takes its prices from
/// `settings`. Otherwise it starts where the previous period ended, runs one
/// calendar month, and carries prices, extra fee and meter readings forward.
/// The list itself is not touched.
pub fn next_record(existing: &[Record], settings: &Settings, today: NaiveDate) -> Record {
    let id = Uuid::new_v4().to_string();

    match existing.last() {
        None => {
            let (start_date, end_date) = month_bounds(today);
            Record {
                id,
                start_date,
                end_date,
                water_meter_start: 0.0,
                water_meter_end: 0.0,
                water_unit_price: settings.default_water_unit_price,
                electric_meter_start: 0.0,
                electric_meter_end: 0.0,
                electric_unit_price: settings.default_electric_unit_price,
                extra_fee: settings.default_extra_fee,
            }
        }
        Some(last) => Record {
            id,
            start_date: last.end_date,
            end_date: add_one_month(last.end_date),
            water_meter_start: last.water_meter_end,
            water_meter_end: 0.0,
            water_unit_price: last.water_unit_price,
            electric_meter_start: last.electric_meter_end,
            electric_meter_end: 0.0,
            electric_unit_price: last.electric_unit_price,
            extra_fee: last.extra_fee,
        },
    }
}

/// Advance a date by one calendar month
///
/// Days past the end of the target month clamp to its last day
/// (2026-01-31 becomes 2026-02-28).
pub fn add_one_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1)).unwrap_or(date)
}

/// First and last day of the month containing `date`
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next_month| next_month.pred_opt())
        .unwrap_or(first);
    (first, last)
}

use crate::billing::{ComputedValues, ReadingWarning, Record, Utility};

/// Metered usage, with readings that went backwards clamped to zero
pub fn usage(meter_end: f64, meter_start: f64) -> f64 {
    (meter_end - meter_start).max(0.0)
}

/// Round to 2 decimal places, half away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Calculate usage and fee totals for a single record
///
/// Each figure is rounded once from the raw products, so `all_fee_total` is
/// not necessarily the sum of the two rounded per-utility totals.
pub fn compute_billing(record: &Record) -> ComputedValues {
    let water_usage = usage(record.water_meter_end, record.water_meter_start);
    let electric_usage = usage(record.electric_meter_end, record.electric_meter_start);

    let water_fee = water_usage * record.water_unit_price;
    let electric_fee = electric_usage * record.electric_unit_price;
    let all_fee = water_fee + electric_fee + record.extra_fee;

    ComputedValues {
        water_usage,
        electric_usage,
        water_fee_total: round2(water_fee),
        electric_fee_total: round2(electric_fee),
        all_fee_total: round2(all_fee),
    }
}

/// Report meters whose end reading is below the start reading
pub fn check_readings(record: &Record) -> Vec<ReadingWarning> {
    let readings = [
        (
            Utility::Water,
            record.water_meter_start,
            record.water_meter_end,
        ),
        (
            Utility::Electric,
            record.electric_meter_start,
            record.electric_meter_end,
        ),
    ];

    readings
        .into_iter()
        .filter(|(_, start, end)| end < start)
        .map(|(utility, meter_start, meter_end)| ReadingWarning {
            utility,
            meter_start,
            meter_end,
        })
        .collect()
}

/// Sum of `all_fee_total` across records, rounded once more at the end
pub fn calculate_records_total(records: &[Record]) -> f64 {
    round2(
        records
            .iter()
            .map(|record| compute_billing(record).all_fee_total)
            .sum(),
    )
}

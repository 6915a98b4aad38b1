use crate::billing::{calculator::calculate_records_total, compute_billing, Record, Settings};
use crate::document::{Document, Unit};
use std::fmt::Write;

const RULE: &str = "----------------------------------------";

/// One line per unit: id, name, record count and running total
pub fn render_unit_list(document: &Document) -> String {
    if document.units.is_empty() {
        return "No units yet. Add one with `meterbook unit add <NAME>`.".to_string();
    }

    let mut out = String::new();
    for unit in &document.units {
        let _ = writeln!(
            out,
            "{}  {:<20} {:>3} records  total {:.2}",
            unit.id,
            unit.name,
            unit.records.len(),
            calculate_records_total(&unit.records)
        );
    }
    out.trim_end().to_string()
}

/// Record table for one unit, with the computed fee columns
pub fn render_record_table(unit: &Unit) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", unit.name, unit.id);

    if unit.records.is_empty() {
        out.push_str("No records yet. Add one with `meterbook record add <UNIT>`.");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<36}  {:<10}  {:<10}  {:>19}  {:>6}  {:>9}  {:>19}  {:>6}  {:>9}  {:>8}  {:>10}",
        "ID",
        "START",
        "END",
        "WATER",
        "PRICE",
        "WATER FEE",
        "ELECTRIC",
        "PRICE",
        "ELEC FEE",
        "EXTRA",
        "TOTAL"
    );

    for record in &unit.records {
        let computed = compute_billing(record);
        let _ = writeln!(
            out,
            "{:<36}  {}  {}  {:>19}  {:>6}  {:>9.2}  {:>19}  {:>6}  {:>9.2}  {:>8.2}  {:>10.2}",
            record.id,
            record.start_date.format("%Y-%m-%d"),
            record.end_date.format("%Y-%m-%d"),
            format!("{} -> {}", record.water_meter_start, record.water_meter_end),
            record.water_unit_price,
            computed.water_fee_total,
            format!(
                "{} -> {}",
                record.electric_meter_start, record.electric_meter_end
            ),
            record.electric_unit_price,
            computed.electric_fee_total,
            record.extra_fee,
            computed.all_fee_total
        );
    }

    out.trim_end().to_string()
}

/// Printable statement for one billing period
pub fn render_bill(unit_name: &str, record: &Record) -> String {
    let computed = compute_billing(record);
    let mut out = String::new();

    let _ = writeln!(out, "Utility bill: {}", unit_name);
    let _ = writeln!(
        out,
        "Period: {} to {}",
        record.start_date.format("%Y-%m-%d"),
        record.end_date.format("%Y-%m-%d")
    );
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(
        out,
        "Water     {} -> {}  usage {}  x {}  = {:.2}",
        record.water_meter_start,
        record.water_meter_end,
        computed.water_usage,
        record.water_unit_price,
        computed.water_fee_total
    );
    let _ = writeln!(
        out,
        "Electric  {} -> {}  usage {}  x {}  = {:.2}",
        record.electric_meter_start,
        record.electric_meter_end,
        computed.electric_usage,
        record.electric_unit_price,
        computed.electric_fee_total
    );
    let _ = writeln!(out, "Extra fee {:.2}", record.extra_fee);
    let _ = writeln!(out, "{}", RULE);
    let _ = write!(out, "Total     {:.2}", computed.all_fee_total);

    out
}

pub fn render_settings(settings: &Settings) -> String {
    [
        ("Default water unit price:   ", settings.default_water_unit_price),
        ("Default electric unit price:", settings.default_electric_unit_price),
        ("Default extra fee:          ", settings.default_extra_fee),
    ]
    .iter()
    .map(|(label, value)| format!("{} {}", label, value))
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reference_record() -> Record {
        Record {
            id: "r1".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
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
    fn test_render_bill() {
        let bill = render_bill("Unit A", &reference_record());

        assert!(bill.starts_with("Utility bill: Unit A\n"));
        assert!(bill.contains("Period: 2026-01-10 to 2026-02-10"));
        assert!(bill.contains("Water     100 -> 150  usage 50  x 3.5  = 175.00"));
        assert!(bill.contains("Electric  500 -> 600  usage 100  x 0.8  = 80.00"));
        assert!(bill.contains("Extra fee 50.00"));
        assert!(bill.ends_with("Total     305.00"));
    }

    #[test]
    fn test_render_record_table() {
        let unit = Unit {
            id: "u1".to_string(),
            name: "Unit A".to_string(),
            records: vec![reference_record()],
        };
        let table = render_record_table(&unit);

        assert!(table.starts_with("Unit A (u1)"));
        assert!(table.contains("175.00"));
        assert!(table.contains("305.00"));

        let empty = Unit {
            records: Vec::new(),
            ..unit
        };
        assert!(render_record_table(&empty).contains("No records yet"));
    }

    #[test]
    fn test_render_unit_list() {
        assert!(render_unit_list(&Document::default()).starts_with("No units yet"));

        let doc = Document {
            units: vec![Unit {
                id: "u1".to_string(),
                name: "Unit A".to_string(),
                records: vec![reference_record()],
            }],
            settings: Settings::default(),
        };
        let list = render_unit_list(&doc);
        assert!(list.contains("Unit A"));
        assert!(list.contains("1 records"));
        assert!(list.contains("total 305.00"));
    }

    #[test]
    fn test_render_settings() {
        let text = render_settings(&Settings::default());
        assert!(text.contains("Default water unit price:    3.5"));
        assert!(text.contains("Default electric unit price: 0.8"));
        assert!(text.contains("Default extra fee:           0"));
    }
}

use super::{Document, Unit};
use crate::billing::Settings;
use crate::config::DEFAULT_SETTINGS;
use crate::debug_println;
use crate::error::{MeterbookError, Result};
use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Owns the document file and the in-memory document loaded from it
pub struct DocumentStore {
    path: PathBuf,
    document: Document,
}

impl DocumentStore {
    /// Create a store for `path` holding an empty document
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            document: Document::default(),
        }
    }

    /// Create a store and load its file, if there is one
    pub fn open(path: PathBuf) -> Result<Self> {
        let mut store = Self::new(path);
        store.load()?;
        Ok(store)
    }

    /// Load the document from file
    ///
    /// A missing or empty file leaves the empty document in place.
    pub fn load(&mut self) -> Result<()> {
        if !self.path.exists() {
            debug_println!("No document at {}, starting empty", self.path.display());
            return Ok(());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(());
        }

        self.document = parse_document(&content)?;
        debug_println!(
            "Loaded {} units from {}",
            self.document.units.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Save the document to file
    pub fn save(&self) -> Result<()> {
        write_document(&self.path, &self.document)?;
        debug_println!("Saved document to {}", self.path.display());
        Ok(())
    }

    /// Replace the current document with the contents of `source`
    ///
    /// Nothing changes when the file cannot be read or fails validation.
    pub fn import(&mut self, source: &Path) -> Result<()> {
        let content = fs::read_to_string(source)?;
        let document = parse_document(&content)?;
        debug_println!(
            "Import of {}: {} units, {} records, defaults water {} electric {} extra {}",
            source.display(),
            document.units.len(),
            document.units.iter().map(|u| u.records.len()).sum::<usize>(),
            document.settings.default_water_unit_price,
            document.settings.default_electric_unit_price,
            document.settings.default_extra_fee
        );
        self.replace(document);
        Ok(())
    }

    /// Write the current document to `target`
    pub fn export(&self, target: &Path) -> Result<()> {
        write_document(target, &self.document)
    }

    pub fn replace(&mut self, document: Document) {
        self.document = document;
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// File name used for exports, e.g. `landlord-data-2026-03-14.json`
pub fn default_export_name(today: NaiveDate) -> String {
    format!("landlord-data-{}.json", today.format("%Y-%m-%d"))
}

/// Parse and validate a document
///
/// The top level must be an object with a `units` array. A missing
/// `settings` object, or missing keys inside it, fall back to the built-in
/// defaults key by key.
pub fn parse_document(content: &str) -> Result<Document> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| MeterbookError::InvalidFormat(format!("not valid JSON ({})", e)))?;

    let root = value
        .as_object()
        .ok_or_else(|| MeterbookError::InvalidFormat("top level is not an object".to_string()))?;

    let units = match root.get("units") {
        Some(units @ Value::Array(_)) => units.clone(),
        Some(_) => {
            return Err(MeterbookError::InvalidFormat(
                "`units` is not a list".to_string(),
            ))
        }
        None => {
            return Err(MeterbookError::InvalidFormat(
                "missing `units` list".to_string(),
            ))
        }
    };

    let units: Vec<Unit> = serde_json::from_value(units)
        .map_err(|e| MeterbookError::InvalidFormat(format!("bad unit data ({})", e)))?;

    let settings = merge_settings(root.get("settings").and_then(Value::as_object));

    Ok(Document { units, settings })
}

/// Overlay the numeric keys present in `loaded` on `DEFAULT_SETTINGS`
fn merge_settings(loaded: Option<&Map<String, Value>>) -> Settings {
    let pick = |key: &str, fallback: f64| {
        loaded
            .and_then(|map| map.get(key))
            .and_then(Value::as_f64)
            .unwrap_or(fallback)
    };

    Settings {
        default_water_unit_price: pick(
            "defaultWaterUnitPrice",
            DEFAULT_SETTINGS.default_water_unit_price,
        ),
        default_electric_unit_price: pick(
            "defaultElectricUnitPrice",
            DEFAULT_SETTINGS.default_electric_unit_price,
        ),
        default_extra_fee: pick("defaultExtraFee", DEFAULT_SETTINGS.default_extra_fee),
    }
}

/// Write pretty-printed JSON through a temporary file, then rename over the target
fn write_document(path: &Path, document: &Document) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let content = serde_json::to_string_pretty(document)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
  "units": [
    {
      "id": "u1",
      "name": "Unit A",
      "records": [
        {
          "id": "r1", "startDate": "2026-01-10", "endDate": "2026-02-10",
          "waterMeterStart": 100, "waterMeterEnd": 150, "waterUnitPrice": 3.5,
          "electricMeterStart": 500, "electricMeterEnd": 600, "electricUnitPrice": 0.8,
          "extraFee": 50
        }
      ]
    }
  ],
  "settings": {
    "defaultWaterUnitPrice": 4.2,
    "defaultElectricUnitPrice": 1.1,
    "defaultExtraFee": 20
  }
}"#;

    #[test]
    fn test_parse_full_document() {
        let doc = parse_document(SAMPLE).unwrap();

        assert_eq!(doc.units.len(), 1);
        assert_eq!(doc.units[0].name, "Unit A");
        let record = &doc.units[0].records[0];
        assert_eq!(record.id, "r1");
        assert_eq!(record.end_date, NaiveDate::from_ymd_opt(2026, 2, 10).unwrap());
        assert_eq!(record.water_meter_end, 150.0);
        assert_eq!(doc.settings.default_water_unit_price, 4.2);
        assert_eq!(doc.settings.default_extra_fee, 20.0);
    }

    #[test]
    fn test_missing_settings_use_defaults() {
        let doc = parse_document(r#"{"units": []}"#).unwrap();
        assert!(doc.units.is_empty());
        assert_eq!(doc.settings, DEFAULT_SETTINGS);
    }

    #[test]
    fn test_partial_settings_merge_per_key() {
        let doc =
            parse_document(r#"{"units": [], "settings": {"defaultElectricUnitPrice": 0.95}}"#)
                .unwrap();

        assert_eq!(doc.settings.default_electric_unit_price, 0.95);
        assert_eq!(doc.settings.default_water_unit_price, 3.5);
        assert_eq!(doc.settings.default_extra_fee, 0.0);
    }

    #[test]
    fn test_rejects_missing_or_wrong_units() {
        for content in [
            r#"{}"#,
            r#"{"settings": {}}"#,
            r#"{"units": {}}"#,
            r#"{"units": "none"}"#,
            r#"[]"#,
            "not json",
        ] {
            assert!(
                matches!(parse_document(content), Err(MeterbookError::InvalidFormat(_))),
                "accepted {}",
                content
            );
        }
    }

    #[test]
    fn test_rejects_malformed_record_date() {
        let content = SAMPLE.replace("2026-02-10", "10/02/2026");
        assert!(matches!(
            parse_document(&content),
            Err(MeterbookError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_serialized_roundtrip() {
        let doc = parse_document(SAMPLE).unwrap();
        let json = serde_json::to_string_pretty(&doc).unwrap();
        let reparsed = parse_document(&json).unwrap();

        assert_eq!(reparsed, doc);
        assert!(json.contains("\"startDate\": \"2026-01-10\""));
        assert!(json.contains("\"defaultElectricUnitPrice\": 1.1"));
    }

    #[test]
    fn test_default_export_name() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        assert_eq!(default_export_name(today), "landlord-data-2026-03-04.json");
    }
}

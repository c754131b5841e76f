use crate::Result;
use crate::record::ExportRecord;

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
}

/// JSON formatter for export records
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, record: &ExportRecord) -> Result<String> {
        convert_to_json(record, &self.config)
    }
}

/// Serialize the record itself, one key per field.
pub fn convert_to_json(record: &ExportRecord, config: &JsonConfig) -> Result<String> {
    let json = if config.pretty { serde_json::to_string_pretty(record)? } else { serde_json::to_string(record)? };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::NovelMetadata;

    fn record() -> ExportRecord {
        let metadata = NovelMetadata {
            title: "Night \"Train\"".to_string(),
            author: "Tsukishima".to_string(),
            novel_id: "42".to_string(),
            ..Default::default()
        };
        ExportRecord::assemble(metadata, "First.\n\nSecond.".to_string()).unwrap()
    }

    #[test]
    fn test_compact_output() {
        let json = convert_to_json(&record(), &JsonConfig::default()).unwrap();
        assert!(!json.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["title"], "Night \"Train\"");
        assert_eq!(value["content"], "First.\n\nSecond.");
        assert_eq!(value["novel_id"], "42");
        assert!(value["extracted_at"].is_string());
    }

    #[test]
    fn test_pretty_output() {
        let json = JsonFormatter::new(JsonConfig { pretty: true }).convert(&record()).unwrap();
        assert!(json.contains("\n  \"author\": \"Tsukishima\""));
    }
}

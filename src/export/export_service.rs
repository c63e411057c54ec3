use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::core::errors::ExportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }

    /// `<stem>.<extension>`
    pub fn file_name(&self, stem: &str) -> String {
        format!("{stem}.{}", self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format '{other}'")),
        }
    }
}

/// Turns record and aggregate sequences into CSV or JSON text.
///
/// Both shapes carry the same rows: CSV takes its header from the field
/// names of the first row, in declaration order, and JSON is a pretty
/// printed array.
#[derive(Debug, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    pub fn export<T: Serialize>(&self, rows: &[T], format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => self.to_csv(rows),
            ExportFormat::Json => self.to_json(rows),
        }
    }

    pub fn to_json<T: Serialize>(&self, rows: &[T]) -> Result<String, ExportError> {
        serde_json::to_string_pretty(rows).map_err(|source| ExportError::Serialization {
            format: ExportFormat::Json.to_string(),
            source,
        })
    }

    /// Empty input produces an empty string. Every row must serialize to a
    /// JSON object; fields missing from a later row become empty cells.
    pub fn to_csv<T: Serialize>(&self, rows: &[T]) -> Result<String, ExportError> {
        let values = rows
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| ExportError::Serialization {
                format: ExportFormat::Csv.to_string(),
                source,
            })?;

        let Some(first) = values.first() else {
            return Ok(String::new());
        };
        let headers: Vec<&str> = first
            .as_object()
            .ok_or(ExportError::NotAnObject { index: 0 })?
            .keys()
            .map(String::as_str)
            .collect();

        let mut lines = Vec::with_capacity(values.len() + 1);
        lines.push(headers.join(","));

        for (index, value) in values.iter().enumerate() {
            let object = value
                .as_object()
                .ok_or(ExportError::NotAnObject { index })?;
            let cells: Vec<String> = headers
                .iter()
                .map(|header| csv_cell(object.get(*header)))
                .collect();
            lines.push(cells.join(","));
        }

        debug!("Exported {} rows with {} columns as CSV", values.len(), headers.len());
        Ok(lines.join("\n"))
    }

    pub async fn write_to_file(&self, content: &str, path: &Path) -> Result<(), ExportError> {
        tokio::fs::write(path, content)
            .await
            .map_err(|source| ExportError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

fn csv_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => quote(text),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(nested @ (Value::Array(_) | Value::Object(_))) => quote(&nested.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Serialize)]
    struct Row {
        name: &'static str,
        platform: &'static str,
        cost: f64,
        clicks: u64,
        note: Option<&'static str>,
    }

    #[test]
    fn csv_quotes_strings_and_keeps_field_order() {
        let rows = vec![
            Row {
                name: "Spring \"Sale\"",
                platform: "google_ads",
                cost: 12.5,
                clicks: 40,
                note: None,
            },
            Row {
                name: "Winter",
                platform: "facebook_ads",
                cost: 3.0,
                clicks: 2,
                note: Some("paused"),
            },
        ];

        let csv = ExportService::new().to_csv(&rows).unwrap();
        assert_eq!(
            csv,
            "name,platform,cost,clicks,note\n\
             \"Spring \"\"Sale\"\"\",\"google_ads\",12.5,40,\n\
             \"Winter\",\"facebook_ads\",3.0,2,\"paused\""
        );
    }

    #[test]
    fn empty_input_is_empty_output() {
        let rows: Vec<Row> = Vec::new();
        assert_eq!(ExportService::new().to_csv(&rows).unwrap(), "");
        assert_eq!(ExportService::new().to_json(&rows).unwrap(), "[]");
    }

    #[test]
    fn json_is_pretty_printed() {
        let rows = vec![json!({"date": "2024-03-01", "cost": 1})];
        let out = ExportService::new().export(&rows, ExportFormat::Json).unwrap();
        assert_eq!(out, "[\n  {\n    \"date\": \"2024-03-01\",\n    \"cost\": 1\n  }\n]");
    }

    #[test]
    fn scalar_rows_are_rejected() {
        let result = ExportService::new().to_csv(&[1, 2]);
        assert!(matches!(result, Err(ExportError::NotAnObject { index: 0 })));
    }

    #[test]
    fn format_helpers() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::Json.mime_type(), "application/json");
        assert_eq!(ExportFormat::Csv.file_name("daily"), "daily.csv");
    }
}

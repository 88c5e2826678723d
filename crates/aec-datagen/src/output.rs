//! Streaming collection writers.
//!
//! Documents are serialized one at a time and dropped, so memory use does not
//! grow with the collection.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown output format: {0} (expected json or jsonl)")]
    UnknownFormat(String),
}

/// Layout of a collection file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// A single JSON array, one document per line inside the brackets.
    #[default]
    Json,
    /// JSON Lines: one compact document per line.
    Jsonl,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// `assets` becomes `assets.json` or `assets.jsonl`.
    pub fn file_name(&self, collection: &str) -> String {
        format!("{collection}.{}", self.extension())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            other => Err(OutputError::UnknownFormat(other.to_string())),
        }
    }
}

/// Writes a collection of documents in either format.
pub struct CollectionWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    written: usize,
    bytes: u64,
}

impl<W: Write> CollectionWriter<W> {
    pub fn new(mut writer: W, format: OutputFormat) -> Result<Self, OutputError> {
        let mut bytes = 0;
        if format == OutputFormat::Json {
            writer.write_all(b"[")?;
            bytes += 1;
        }
        Ok(Self {
            writer,
            format,
            written: 0,
            bytes,
        })
    }

    /// Serializes one document and returns its compact length in bytes,
    /// separators excluded.
    pub fn push<T: Serialize>(&mut self, document: &T) -> Result<usize, OutputError> {
        let encoded = serde_json::to_vec(document)?;

        match self.format {
            OutputFormat::Json => {
                let separator: &[u8] = if self.written == 0 { b"\n" } else { b",\n" };
                self.writer.write_all(separator)?;
                self.writer.write_all(&encoded)?;
                self.bytes += (separator.len() + encoded.len()) as u64;
            }
            OutputFormat::Jsonl => {
                self.writer.write_all(&encoded)?;
                self.writer.write_all(b"\n")?;
                self.bytes += encoded.len() as u64 + 1;
            }
        }

        self.written += 1;
        Ok(encoded.len())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Closes the array (if any), flushes and returns the total file size.
    pub fn finish(mut self) -> Result<u64, OutputError> {
        if self.format == OutputFormat::Json {
            let closing: &[u8] = if self.written == 0 { b"]\n" } else { b"\n]\n" };
            self.writer.write_all(closing)?;
            self.bytes += closing.len() as u64;
        }
        self.writer.flush()?;
        Ok(self.bytes)
    }
}

/// Parses a collection written in `format` back into values.
pub fn read_collection<T: serde::de::DeserializeOwned>(
    text: &str,
    format: OutputFormat,
) -> Result<Vec<T>, OutputError> {
    match format {
        OutputFormat::Json => Ok(serde_json::from_str(text)?),
        OutputFormat::Jsonl => text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(OutputError::from))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn write_all(format: OutputFormat, docs: &[Value]) -> (String, u64) {
        let mut buffer = Vec::new();
        let mut writer = CollectionWriter::new(&mut buffer, format).unwrap();
        for doc in docs {
            writer.push(doc).unwrap();
        }
        let size = writer.finish().unwrap();
        (String::from_utf8(buffer).unwrap(), size)
    }

    #[test]
    fn test_json_array_layout() {
        let docs = [json!({"a": 1}), json!({"b": [1, 2]})];
        let (text, size) = write_all(OutputFormat::Json, &docs);

        assert_eq!(text, "[\n{\"a\":1},\n{\"b\":[1,2]}\n]\n");
        assert_eq!(size, text.len() as u64);
    }

    #[test]
    fn test_empty_json_array() {
        let (text, _) = write_all(OutputFormat::Json, &[]);
        assert_eq!(text, "[]\n");
        let parsed: Vec<Value> = read_collection(&text, OutputFormat::Json).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_jsonl_layout() {
        let docs = [json!({"a": 1}), json!({"b": 2})];
        let (text, size) = write_all(OutputFormat::Jsonl, &docs);

        assert_eq!(text, "{\"a\":1}\n{\"b\":2}\n");
        assert_eq!(size, text.len() as u64);
    }

    #[test]
    fn test_push_reports_document_size() {
        let mut writer = CollectionWriter::new(Vec::new(), OutputFormat::Json).unwrap();
        assert_eq!(writer.push(&json!({"id": "wall-000001"})).unwrap(), 20);
        assert_eq!(writer.push(&json!({"id": "wall-000002"})).unwrap(), 20);
        assert_eq!(writer.written(), 2);
    }

    #[test]
    fn test_both_formats_parse_to_same_content() {
        let docs = vec![
            json!({"_id": {"modelId": "m", "id": "wall-000000"}, "value": 1.25}),
            json!({"_id": {"modelId": "m", "id": "door-000000"}, "nested": {"x": [0.1, 0.2]}}),
        ];

        let (array, _) = write_all(OutputFormat::Json, &docs);
        let (lines, _) = write_all(OutputFormat::Jsonl, &docs);

        let from_array: Vec<Value> = read_collection(&array, OutputFormat::Json).unwrap();
        let from_lines: Vec<Value> = read_collection(&lines, OutputFormat::Jsonl).unwrap();
        assert_eq!(from_array, docs);
        assert_eq!(from_lines, docs);
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("JSONL".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Jsonl.file_name("assets"), "assets.jsonl");
    }
}

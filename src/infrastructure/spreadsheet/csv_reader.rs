// ============================================================
// CSV READER
// ============================================================
// Read CSV contact sheets with encoding and delimiter detection

use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::domain::error::AppError;

/// CSV reader producing raw rows (header row included)
pub struct CsvReader {
    /// Delimiter character (default: comma)
    delimiter: u8,
}

impl Default for CsvReader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read a CSV file into rows, detecting the delimiter from the content
    pub fn read_file_auto_detect(path: &Path) -> Result<Vec<Vec<String>>, AppError> {
        let content = read_with_encoding_detection(path)?;
        let delimiter = Self::detect_delimiter(&content);
        Self::default().with_delimiter(delimiter).read_content(&content)
    }

    /// Parse CSV content into rows, skipping rows that are entirely blank
    pub fn read_content(&self, content: &str) -> Result<Vec<Vec<String>>, AppError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .trim(Trim::All)
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let mut rows: Vec<Vec<String>> = Vec::new();

        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            let row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
            if row.iter().all(|s| s.trim().is_empty()) {
                continue;
            }
            rows.push(row);
        }

        Ok(rows)
    }

    /// Guess the delimiter: the candidate that appears most often per
    /// line, at the steadiest rate, across the first few lines
    pub fn detect_delimiter(content: &str) -> u8 {
        const CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

        let sample: Vec<&str> = content.lines().take(10).collect();
        if sample.is_empty() {
            return b',';
        }
        let n = sample.len() as f32;

        let scored = CANDIDATES.iter().map(|&delimiter| {
            let counts: Vec<usize> = sample
                .iter()
                .map(|line| line.bytes().filter(|&b| b == delimiter).count())
                .collect();
            let mean = counts.iter().sum::<usize>() as f32 / n;
            let variance =
                counts.iter().map(|&c| (c as f32 - mean).powi(2)).sum::<f32>() / n;
            (delimiter, mean / (1.0 + variance.sqrt()))
        });

        // Ties keep the earlier candidate, so comma wins by default
        scored
            .fold((b',', 0.0f32), |best, (delimiter, score)| {
                if score > best.1 {
                    (delimiter, score)
                } else {
                    best
                }
            })
            .0
    }
}

/// Read a file as UTF-8, falling back to Latin-1 for legacy exports
fn read_with_encoding_detection(path: &Path) -> Result<String, AppError> {
    let bytes =
        std::fs::read(path).map_err(|e| AppError::IoError(format!("Failed to read file: {}", e)))?;

    if let Ok(content) = std::str::from_utf8(&bytes) {
        return Ok(content.to_string());
    }

    let (content, _, had_errors) = encoding_rs::WINDOWS_1252.decode(&bytes);
    if !had_errors {
        return Ok(content.into_owned());
    }

    Ok(String::from_utf8_lossy(&bytes).to_string())
}

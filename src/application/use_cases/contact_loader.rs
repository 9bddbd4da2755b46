//! Contact Loader
//!
//! Turns a spreadsheet file into an ordered `ContactBook`:
//! - dispatches on extension (.xlsx/.xls via calamine, .csv/.txt via csv)
//! - locates the name and phone columns by exact header or a fixed set of
//!   case-insensitive synonyms
//! - drops rows with empty name or phone and normalizes phone values

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::domain::contact::{Contact, ContactBook};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::spreadsheet::{xlsx_reader, CsvReader};

/// Recognized headers for the name column (matched case-insensitively)
const NAME_SYNONYMS: &[&str] = &["nome", "name"];

/// Recognized headers for the phone column (matched case-insensitively)
const PHONE_SYNONYMS: &[&str] = &[
    "número de telefone",
    "numero de telefone",
    "numero",
    "telefone",
    "phone",
    "phone number",
    "celular",
];

/// Everything except digits and '+' is stripped from raw phone values
static PHONE_JUNK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\d+]").unwrap());

pub struct ContactLoader;

impl ContactLoader {
    /// Load and normalize contacts from a spreadsheet file.
    ///
    /// The file is read exactly once. Errors leave any previously loaded
    /// book untouched because the caller only swaps in the new book on `Ok`.
    pub fn load(path: &Path) -> Result<ContactBook> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        let rows = match extension.as_str() {
            "xlsx" | "xls" => xlsx_reader::read_first_sheet(path)?,
            "csv" | "txt" => CsvReader::read_file_auto_detect(path)?,
            other => {
                return Err(AppError::ValidationError(format!(
                    "Unsupported spreadsheet format: '{}'",
                    other
                )))
            }
        };

        let book = Self::from_rows(rows, path.display().to_string())?;
        info!(
            contacts = book.len(),
            path = %path.display(),
            "Loaded contact book"
        );
        Ok(book)
    }

    /// Build a contact book from raw rows (header row first)
    pub fn from_rows(rows: Vec<Vec<String>>, source_path: String) -> Result<ContactBook> {
        let mut iter = rows.into_iter();
        let headers = iter
            .next()
            .ok_or_else(|| AppError::ParseError("Spreadsheet is empty".to_string()))?;

        let name_col = find_column(&headers, NAME_SYNONYMS);
        let phone_col = find_column(&headers, PHONE_SYNONYMS);

        let missing: Vec<&str> = [
            name_col.is_none().then_some("name"),
            phone_col.is_none().then_some("phone number"),
        ]
        .into_iter()
        .flatten()
        .collect();

        if !missing.is_empty() {
            return Err(AppError::ParseError(format!(
                "Columns not found: {}",
                missing.join(", ")
            )));
        }

        let (name_col, phone_col) = (name_col.unwrap(), phone_col.unwrap());

        let mut contacts = Vec::new();
        for row in iter {
            let name = row.get(name_col).map(|s| s.trim()).unwrap_or_default();
            let phone_raw = row.get(phone_col).map(|s| s.trim()).unwrap_or_default();

            if name.is_empty() || phone_raw.is_empty() {
                continue;
            }

            let phone = clean_phone(phone_raw);
            if !phone.chars().any(|c| c.is_ascii_digit()) {
                continue;
            }

            contacts.push(Contact::new(name.to_string(), phone));
        }

        if contacts.is_empty() {
            return Err(AppError::ParseError(
                "No valid contacts found in spreadsheet".to_string(),
            ));
        }

        Ok(ContactBook::new(source_path, contacts))
    }
}

/// Find the index of the first header matching any synonym, case-insensitively
fn find_column(headers: &[String], synonyms: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        let header = header.trim().to_lowercase();
        synonyms.iter().any(|syn| header == *syn)
    })
}

/// Strip formatting from a phone value, keeping digits and a leading '+' only
fn clean_phone(raw: &str) -> String {
    let stripped = PHONE_JUNK.replace_all(raw, "");
    let mut out = String::with_capacity(stripped.len());

    for (idx, c) in stripped.chars().enumerate() {
        if c == '+' && idx != 0 {
            continue;
        }
        out.push(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_load_counts_valid_rows_only() {
        let book = ContactLoader::from_rows(
            rows(&[
                &["Nome", "Número de Telefone"],
                &["Ana", "11 99999-0000"],
                &["", "11 88888-0000"],
                &["Bob", ""],
                &["Carla", "+55 11 77777-0000"],
            ]),
            "test.xlsx".to_string(),
        )
        .unwrap();

        assert_eq!(book.len(), 2);
        assert_eq!(book.contacts[0], Contact::new("Ana".into(), "11999990000".into()));
        assert_eq!(
            book.contacts[1],
            Contact::new("Carla".into(), "+5511777770000".into())
        );
    }

    #[test]
    fn test_header_matching_is_case_insensitive() {
        let book = ContactLoader::from_rows(
            rows(&[&["NAME", "Celular"], &["Ana", "11999990000"]]),
            "test.csv".to_string(),
        )
        .unwrap();

        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_headers_trimmed_before_matching() {
        let book = ContactLoader::from_rows(
            rows(&[&[" nome ", " Telefone "], &["Ana", "11999990000"]]),
            "test.csv".to_string(),
        )
        .unwrap();

        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_missing_columns_reported_by_name() {
        let err = ContactLoader::from_rows(
            rows(&[&["Endereço", "Cidade"], &["Rua A", "SP"]]),
            "test.csv".to_string(),
        )
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("name"));
        assert!(message.contains("phone number"));
    }

    #[test]
    fn test_missing_phone_column_only() {
        let err = ContactLoader::from_rows(
            rows(&[&["Nome", "Cidade"], &["Ana", "SP"]]),
            "test.csv".to_string(),
        )
        .unwrap_err();

        let message = err.to_string();
        assert!(!message.contains("name,"));
        assert!(message.contains("phone number"));
    }

    #[test]
    fn test_zero_valid_rows_fails() {
        let err = ContactLoader::from_rows(
            rows(&[&["Nome", "Telefone"], &["", ""], &["Ana", "---"]]),
            "test.csv".to_string(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("No valid contacts"));
    }

    #[test]
    fn test_empty_spreadsheet_fails() {
        let err = ContactLoader::from_rows(Vec::new(), "test.csv".to_string()).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_clean_phone_keeps_leading_plus_only() {
        assert_eq!(clean_phone("+55 (11) 99999-0000"), "+5511999990000");
        assert_eq!(clean_phone("11 9+9999-0000"), "11999990000");
        assert_eq!(clean_phone("(11) 99999.0000"), "11999990000");
    }

    #[test]
    fn test_load_csv_file_end_to_end() {
        let mut file = tempfile::NamedTempFile::with_suffix(".csv").unwrap();
        write!(file, "name,phone\nAna,11 99999-0000\nBob,11 88888-0000").unwrap();

        let book = ContactLoader::load(file.path()).unwrap();
        assert_eq!(book.len(), 2);
        assert_eq!(book.contacts[1].phone, "11888880000");
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let err = ContactLoader::load(Path::new("contacts.pdf")).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}

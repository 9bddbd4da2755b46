// ============================================================
// EXCEL READER
// ============================================================
// Read .xlsx/.xls contact sheets via calamine

use std::path::Path;

use calamine::{open_workbook_auto, DataType, Reader};

use crate::domain::error::AppError;

/// Read the first worksheet of an Excel file into raw rows (header row included)
pub fn read_first_sheet(path: &Path) -> Result<Vec<Vec<String>>, AppError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| AppError::IoError(format!("Failed to open Excel file: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::ParseError("No worksheet found".to_string()))?
        .map_err(|e| AppError::ParseError(format!("Failed to read Excel range: {}", e)))?;

    let mut rows = Vec::new();

    for row in range.rows() {
        let row_data: Vec<String> = row
            .iter()
            .map(|cell| {
                cell.as_string()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("{}", cell))
            })
            .collect();

        if row_data.iter().all(|s| s.trim().is_empty()) {
            continue;
        }
        rows.push(row_data);
    }

    Ok(rows)
}

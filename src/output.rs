use std::fs;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::Workbook;
use serde::{Deserialize, Serialize};

use crate::errors::{StatementParseError, StatementResult};
use crate::types::{LedgerRow, TEMPLATE_COLUMNS, TransactionRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    #[serde(rename = "xlsx")]
    Xlsx,
    #[serde(rename = "csv")]
    Csv,
    #[serde(rename = "json")]
    Json,
}

/// Writes the records as template-shaped CSV, header row first.
pub fn write_csv<W: Write>(records: &[TransactionRecord], writer: W) -> StatementResult<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(TEMPLATE_COLUMNS)?;
    for record in records {
        wtr.serialize(LedgerRow::from(record))?;
    }
    wtr.flush()
        .map_err(|e| StatementParseError::WriteFailed(e.to_string()))?;
    Ok(())
}

/// Position of `ToAccountRate` in the template.
const AMOUNT_COLUMN: u16 = 17;

/// Writes the records as a single-sheet workbook, header row first.
///
/// Amounts are stored as numbers; every other filled column as text.
pub fn write_xlsx<W: Write>(records: &[TransactionRecord], mut writer: W) -> StatementResult<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, name) in (0u16..).zip(TEMPLATE_COLUMNS) {
        sheet.write_string(0, col, name)?;
    }

    for (row, record) in (1u32..).zip(records) {
        let ledger = LedgerRow::from(record);
        for (col, value) in (0u16..).zip(ledger.values()) {
            let Some(text) = value else { continue };
            let amount = (col == AMOUNT_COLUMN)
                .then(|| record.amount.to_f64())
                .flatten();
            match amount {
                Some(amount) => sheet.write_number(row, col, amount)?,
                None => sheet.write_string(row, col, text)?,
            };
        }
    }

    let buffer = workbook.save_to_buffer()?;
    writer
        .write_all(&buffer)
        .map_err(|e| StatementParseError::WriteFailed(e.to_string()))?;
    Ok(())
}

pub fn write_json<W: Write>(records: &[TransactionRecord], writer: W) -> StatementResult<()> {
    let rows: Vec<LedgerRow<'_>> = records.iter().map(LedgerRow::from).collect();
    serde_json::to_writer_pretty(writer, &rows)?;
    Ok(())
}

/// Writes the ledger to `path`, creating missing parent directories.
pub fn write_to_path(
    path: &Path,
    records: &[TransactionRecord],
    format: OutputFormat,
) -> StatementResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| write_failed(parent, e))?;
        }
    }

    let file = fs::File::create(path).map_err(|e| write_failed(path, e))?;
    match format {
        OutputFormat::Xlsx => write_xlsx(records, file),
        OutputFormat::Csv => write_csv(records, file),
        OutputFormat::Json => write_json(records, file),
    }
}

fn write_failed(path: &Path, err: std::io::Error) -> StatementParseError {
    StatementParseError::WriteFailed(format!("{}: {}", path.display(), err))
}

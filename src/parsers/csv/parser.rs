use crate::errors::{StatementParseError, StatementResult};
use crate::grid::{Cell, RawGrid};
use crate::parsers::traits::SheetDecoder;
use csv::ReaderBuilder;

/// Reads a CSV export as a headerless grid of text cells.
pub struct CsvDecoder;

impl SheetDecoder for CsvDecoder {
    fn is_supported(filename: Option<&str>, content: &[u8]) -> bool {
        if let Some(name) = filename {
            return name.to_lowercase().ends_with(".csv");
        }

        // without a name, accept text whose first line has a separator
        std::str::from_utf8(content)
            .ok()
            .and_then(|text| text.lines().next())
            .map(|line| line.contains(','))
            .unwrap_or(false)
    }

    fn decode(content: &[u8], _sheet: Option<&str>) -> StatementResult<RawGrid> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content);

        let mut rows = Vec::new();

        for result in reader.records() {
            let record = result
                .map_err(|e| StatementParseError::WorkbookDecode(format!("CSV read error: {}", e)))?;
            rows.push(record.iter().map(Cell::from).collect());
        }

        Ok(RawGrid::new(rows))
    }
}

use crate::errors::{StatementParseError, StatementResult};
use crate::grid::{Cell, RawGrid};
use crate::parsers::traits::SheetDecoder;
use calamine::{Data, Reader, open_workbook_auto_from_rs};
use std::io::Cursor;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = b"\xD0\xCF\x11\xE0";

/// Reads Excel / OpenDocument workbooks through calamine.
pub struct XlsxDecoder;

impl SheetDecoder for XlsxDecoder {
    fn is_supported(filename: Option<&str>, content: &[u8]) -> bool {
        if let Some(name) = filename {
            let name = name.to_lowercase();
            if [".xlsx", ".xlsm", ".xls", ".xlsb", ".ods"]
                .iter()
                .any(|ext| name.ends_with(ext))
            {
                return true;
            }
        }

        content.starts_with(ZIP_MAGIC) || content.starts_with(OLE_MAGIC)
    }

    fn decode(content: &[u8], sheet: Option<&str>) -> StatementResult<RawGrid> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(content))
            .map_err(|e| StatementParseError::WorkbookDecode(e.to_string()))?;

        let range = match sheet {
            Some(name) => {
                if !workbook.sheet_names().iter().any(|n| n == name) {
                    return Err(StatementParseError::SheetNotFound(name.to_string()));
                }
                workbook.worksheet_range(name)
            }
            None => workbook
                .worksheet_range_at(0)
                .ok_or_else(|| StatementParseError::SheetNotFound("(first sheet)".to_string()))?,
        }
        .map_err(|e| StatementParseError::WorkbookDecode(e.to_string()))?;

        let rows = range
            .rows()
            .map(|row| row.iter().map(to_cell).collect())
            .collect();

        Ok(RawGrid::new(rows))
    }
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::String(s) => Cell::from(s.as_str()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(Cell::Date)
            .unwrap_or(Cell::Number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::from(s.as_str()),
        Data::Error(_) | Data::Empty => Cell::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractConfig;
    use crate::extract::extract_transactions;
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
    use std::str::FromStr;

    /// A summary sheet first, the transaction table on "Table 1".
    fn statement_workbook() -> Vec<u8> {
        let mut workbook = Workbook::new();
        workbook
            .add_worksheet()
            .set_name("Summary")
            .unwrap()
            .write_string(0, 0, "Account summary")
            .unwrap();

        let date_format = Format::new().set_num_format("dd/mm/yyyy");
        let feb_first = ExcelDateTime::from_ymd(2025, 2, 1).unwrap();

        let sheet = workbook.add_worksheet().set_name("Table 1").unwrap();
        sheet.write_string(0, 0, "Entry Date").unwrap();
        sheet.write_string(0, 1, "Transaction Description").unwrap();
        sheet.write_string(0, 2, "Transaction Amount").unwrap();
        sheet
            .write_datetime_with_format(1, 0, &feb_first, &date_format)
            .unwrap();
        sheet.write_string(1, 1, "Deposit").unwrap();
        sheet.write_string(1, 2, "100.00+").unwrap();
        sheet.write_string(2, 1, "ref:123").unwrap();
        sheet.write_string(3, 1, "Card fee").unwrap();
        sheet.write_number(3, 2, -1.5).unwrap();
        sheet.write_string(4, 1, "ENDING BALANCE").unwrap();
        sheet.write_number(4, 2, 5098.5).unwrap();

        workbook.save_to_buffer().unwrap()
    }

    #[rstest]
    #[case(Some("statement.xlsx"), b"".as_slice(), true)]
    #[case(Some("STATEMENT.XLS"), b"".as_slice(), true)]
    #[case(Some("statement.ods"), b"".as_slice(), true)]
    #[case(None, b"PK\x03\x04rest".as_slice(), true)]
    #[case(None, b"\xD0\xCF\x11\xE0rest".as_slice(), true)]
    #[case(Some("statement.csv"), b"Date,Amount".as_slice(), false)]
    #[case(None, b"plain text".as_slice(), false)]
    fn test_is_supported(
        #[case] filename: Option<&str>,
        #[case] content: &[u8],
        #[case] expected: bool,
    ) {
        assert_eq!(XlsxDecoder::is_supported(filename, content), expected);
    }

    #[rstest]
    #[case(Data::String("Deposit".to_string()), Cell::Text("Deposit".to_string()))]
    #[case(Data::String(String::new()), Cell::Empty)]
    #[case(Data::Float(12.5), Cell::Number(12.5))]
    #[case(Data::Int(-3), Cell::Number(-3.0))]
    #[case(Data::Bool(true), Cell::Text("true".to_string()))]
    #[case(Data::DateTimeIso("2025-02-01".to_string()), Cell::Text("2025-02-01".to_string()))]
    #[case(Data::Empty, Cell::Empty)]
    fn test_to_cell(#[case] data: Data, #[case] expected: Cell) {
        assert_eq!(to_cell(&data), expected);
    }

    #[test]
    fn test_decode_named_sheet_keeps_date_cells() {
        let grid = XlsxDecoder::decode(&statement_workbook(), Some("Table 1")).unwrap();

        assert_eq!(grid.len(), 5);
        assert_eq!(grid.cell(0, 1), Some(&Cell::from("Transaction Description")));
        let feb_first = NaiveDate::from_ymd_opt(2025, 2, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(grid.cell(1, 0), Some(&Cell::Date(feb_first)));
        assert_eq!(grid.cell(3, 2), Some(&Cell::Number(-1.5)));
        assert_eq!(grid.cell(2, 0), Some(&Cell::Empty));
    }

    #[test]
    fn test_decode_defaults_to_first_sheet() {
        let grid = XlsxDecoder::decode(&statement_workbook(), None).unwrap();
        assert_eq!(grid.cell(0, 0), Some(&Cell::from("Account summary")));
        assert!(matches!(
            extract_transactions(&grid, &ExtractConfig::default()),
            Err(StatementParseError::HeaderNotFound)
        ));
    }

    #[test]
    fn test_decode_missing_sheet() {
        let result = XlsxDecoder::decode(&statement_workbook(), Some("Table 9"));
        assert!(matches!(result, Err(StatementParseError::SheetNotFound(name)) if name == "Table 9"));
    }

    #[test]
    fn test_decoded_workbook_extracts() {
        let grid = XlsxDecoder::decode(&statement_workbook(), Some("Table 1")).unwrap();
        let records = extract_transactions(&grid, &ExtractConfig::default()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].doc_no, "OR1");
        assert_eq!(records[0].doc_date_text(), "1/2/2025");
        assert_eq!(records[0].narrative, "Deposit ref:123");
        assert_eq!(records[0].amount, Decimal::from_str("100.00").unwrap());
        assert_eq!(records[1].doc_no, "PV1");
        assert_eq!(records[1].doc_date_text(), "1/2/2025");
        assert_eq!(records[1].amount, Decimal::from_str("-1.5").unwrap());
    }

    #[test]
    fn test_decode_garbage() {
        let result = XlsxDecoder::decode(b"PK\x03\x04 not really a zip", None);
        assert!(matches!(result, Err(StatementParseError::WorkbookDecode(_))));
    }
}

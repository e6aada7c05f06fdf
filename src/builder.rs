use std::fs;

use crate::{
    config::ExtractConfig, errors::StatementParseError, extract::extract_transactions,
    grid::RawGrid, parsers::prelude::*, types::TransactionRecord,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    #[serde(rename = "xlsx")]
    Xlsx,
    #[serde(rename = "csv")]
    Csv,
}

impl FileFormat {
    pub fn decode(&self, content: &[u8], sheet: Option<&str>) -> Result<RawGrid, StatementParseError> {
        match self {
            FileFormat::Xlsx => XlsxDecoder::decode(content, sheet),
            FileFormat::Csv => CsvDecoder::decode(content, sheet),
        }
    }

    pub fn detect(filename: Option<&str>, content: Option<&[u8]>) -> Result<Self, StatementParseError> {
        if let Some(content) = content {
            if XlsxDecoder::is_supported(filename, content) {
                return Ok(FileFormat::Xlsx);
            }
            if CsvDecoder::is_supported(filename, content) {
                return Ok(FileFormat::Csv);
            }
        }

        if let Some(filename) = filename {
            if let Some(ext) = filename.rsplit('.').next() {
                match ext.to_lowercase().as_str() {
                    "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => return Ok(FileFormat::Xlsx),
                    "csv" => return Ok(FileFormat::Csv),
                    _ => {}
                }
            }
        }

        Err(StatementParseError::UnsupportedFormat)
    }
}

/// Extracts the transactions of a single statement file.
///
/// ```rust,ignore
/// let records = ExtractorBuilder::new()
///     .filename("statement_jan.xlsx")
///     .year("2025")
///     .parse()?;
/// ```
#[derive(Default)]
pub struct ExtractorBuilder {
    content: Option<Vec<u8>>,
    filepath: Option<String>,
    format: Option<FileFormat>,
    config: ExtractConfig,
}

impl ExtractorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: &[u8]) -> Self {
        self.content = Some(content.to_vec());
        self
    }

    pub fn filename(mut self, filename: &str) -> Self {
        self.filepath = Some(filename.to_string());
        self
    }

    pub fn format(mut self, format: FileFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn config(mut self, config: ExtractConfig) -> Self {
        self.config = config;
        self
    }

    pub fn year(mut self, year: &str) -> Self {
        self.config.default_year = year.to_string();
        self
    }

    pub fn inflow_prefix(mut self, prefix: &str) -> Self {
        self.config.inflow_prefix = prefix.to_string();
        self
    }

    pub fn outflow_prefix(mut self, prefix: &str) -> Self {
        self.config.outflow_prefix = prefix.to_string();
        self
    }

    pub fn sheet(mut self, sheet: &str) -> Self {
        self.config.sheet_name = Some(sheet.to_string());
        self
    }

    /// Decodes the input into a grid without extracting anything.
    pub fn grid(&self) -> Result<RawGrid, StatementParseError> {
        let loaded;
        let content = match (&self.content, &self.filepath) {
            (Some(content), _) => content.as_slice(),
            (None, Some(path)) => {
                loaded = fs::read(path)?;
                loaded.as_slice()
            }
            (None, None) => return Err(StatementParseError::MissingContentAndFilepath),
        };

        let format = self
            .format
            .map(Ok)
            .unwrap_or_else(|| FileFormat::detect(self.filepath.as_deref(), Some(content)))?;

        format.decode(content, self.config.sheet_name.as_deref())
    }

    pub fn parse(self) -> Result<Vec<TransactionRecord>, StatementParseError> {
        let grid = self.grid()?;
        extract_transactions(&grid, &self.config)
    }
}

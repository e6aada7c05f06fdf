//! Runs the extraction over a batch of statement files and aggregates the result.

mod month;

pub use month::MonthToken;

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::builder::FileFormat;
use crate::config::ExtractConfig;
use crate::errors::{StatementParseError, StatementResult};
use crate::extract::extract_transactions;
use crate::grid::RawGrid;
use crate::types::TransactionRecord;

/// Extensions picked up when scanning a directory.
const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods", "csv"];

/// Anything the orchestrator can turn into a grid, one file at a time.
pub trait StatementSource {
    fn name(&self) -> String;

    fn load(self, config: &ExtractConfig) -> StatementResult<RawGrid>;
}

/// An uploaded statement held in memory.
#[derive(Debug, Clone)]
pub struct InputFile {
    pub name: String,
    pub content: Vec<u8>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }

    pub fn read(path: &Path) -> StatementResult<Self> {
        let content = fs::read(path)?;
        Ok(Self::new(file_name(path), content))
    }
}

impl StatementSource for InputFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn load(self, config: &ExtractConfig) -> StatementResult<RawGrid> {
        let format = FileFormat::detect(Some(self.name.as_str()), Some(self.content.as_slice()))?;
        format.decode(&self.content, config.sheet_name.as_deref())
    }
}

/// Files on disk are only read when their turn comes.
impl StatementSource for PathBuf {
    fn name(&self) -> String {
        file_name(self)
    }

    fn load(self, config: &ExtractConfig) -> StatementResult<RawGrid> {
        InputFile::read(&self)?.load(config)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Lists the spreadsheet files directly inside `dir`, sorted by name.
pub fn collect_inputs(dir: &Path) -> StatementResult<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_supported_extension(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Extracted(usize),
    Empty,
    Failed(String),
}

/// Advisory result of one file of the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub name: String,
    pub month: MonthToken,
    pub status: FileStatus,
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            FileStatus::Extracted(n) => write!(f, "{}: {} transactions", self.name, n),
            FileStatus::Empty => write!(f, "{}: no transactions found", self.name),
            FileStatus::Failed(e) => write!(f, "{}: failed ({})", self.name, e),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// All records, in file-processing order.
    pub records: Vec<TransactionRecord>,
    pub outcomes: Vec<FileOutcome>,
    /// Record count per month token, unknown last.
    pub month_summary: BTreeMap<MonthToken, usize>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, FileStatus::Failed(_)))
    }

    /// Turns the batch-level outcomes (no input, nothing extracted) into errors.
    pub fn into_result(self) -> StatementResult<Self> {
        if self.outcomes.is_empty() {
            return Err(StatementParseError::NoInputFiles);
        }
        if self.records.is_empty() {
            return Err(StatementParseError::NoTransactions);
        }
        Ok(self)
    }
}

pub struct BatchOrchestrator {
    config: ExtractConfig,
}

impl BatchOrchestrator {
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// Processes the files in month order (unknown months last, then by name).
    ///
    /// A failing file is reported and contributes nothing; it never stops the batch.
    pub fn run<S, I>(&self, sources: I) -> BatchReport
    where
        S: StatementSource,
        I: IntoIterator<Item = S>,
    {
        let mut queue: Vec<(MonthToken, String, S)> = sources
            .into_iter()
            .map(|s| {
                let name = s.name();
                let month = MonthToken::from_filename(&name);
                if !month.is_known() {
                    tracing::debug!(file = %name, "no month in filename, ordering last");
                }
                (month, name, s)
            })
            .collect();
        queue.sort_by(|a, b| (a.0, &a.1).cmp(&(b.0, &b.1)));

        let mut report = BatchReport::default();

        for (month, name, source) in queue {
            let status = match self.process(source) {
                Ok(records) if records.is_empty() => {
                    tracing::warn!(file = %name, "no transactions found");
                    FileStatus::Empty
                }
                Ok(records) => {
                    let count = records.len();
                    tracing::info!(file = %name, count, %month, "extracted transactions");
                    report.records.extend(records);
                    FileStatus::Extracted(count)
                }
                Err(e) => {
                    tracing::warn!(file = %name, error = %e, "failed to process file");
                    FileStatus::Failed(e.to_string())
                }
            };

            let count = match &status {
                FileStatus::Extracted(n) => *n,
                _ => 0,
            };
            *report.month_summary.entry(month).or_default() += count;
            report.outcomes.push(FileOutcome {
                name,
                month,
                status,
            });
        }

        report
    }

    /// The grid lives only for the duration of this call.
    fn process<S: StatementSource>(&self, source: S) -> StatementResult<Vec<TransactionRecord>> {
        let grid = source.load(&self.config)?;
        extract_transactions(&grid, &self.config)
    }
}

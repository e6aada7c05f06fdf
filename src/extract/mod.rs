//! Row-by-row extraction of ledger transactions from a statement grid.

pub mod amount;
pub mod classify;
pub mod date;
pub mod header;
pub mod merge;
pub mod numbering;

use std::ops::ControlFlow;

use crate::config::ExtractConfig;
use crate::errors::{StatementParseError, StatementResult};
use crate::grid::RawGrid;
use crate::types::TransactionRecord;

use amount::normalize_amount;
use classify::{RowClass, RowView, classify};
use date::DateResolver;
use header::{ColumnMap, locate_header};
use merge::PendingDescription;
use numbering::DocumentNumbering;

/// State threaded through the scan of a single file.
#[derive(Debug)]
pub struct ParseState {
    pub dates: DateResolver,
    pub pending: PendingDescription,
    pub records: Vec<TransactionRecord>,
    pub numbering: DocumentNumbering,
}

impl ParseState {
    pub fn new(config: &ExtractConfig) -> Self {
        Self {
            dates: DateResolver::new(),
            pending: PendingDescription::new(),
            records: Vec::new(),
            numbering: DocumentNumbering::new(&config.inflow_prefix, &config.outflow_prefix),
        }
    }

    /// Applies one row. `Break` means an ending-balance row was reached.
    pub fn step(&mut self, row: usize, view: &RowView, config: &ExtractConfig) -> ControlFlow<()> {
        let class = classify(view, self.dates.has_date(), &config.markers);

        if class.observes_date() && view.has_date() {
            self.dates.observe(&view.date);
        }

        match class {
            RowClass::Terminator => {
                self.pending.flush_into(&mut self.records);
                return ControlFlow::Break(());
            }
            RowClass::Ignored(reason) => {
                tracing::trace!(row, ?reason, "ignored row");
            }
            RowClass::Transaction {
                description,
                amount,
            } => self.push_transaction(row, description, &amount, config),
            RowClass::Continuation(text) => self.pending.push(text),
            RowClass::Blank => {}
        }

        ControlFlow::Continue(())
    }

    fn push_transaction(
        &mut self,
        row: usize,
        description: String,
        amount: &str,
        config: &ExtractConfig,
    ) {
        self.pending.flush_into(&mut self.records);

        let amount = match normalize_amount(amount) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(row, error = %e, "dropping row with unparseable amount");
                return;
            }
        };

        let doc_date = match self.dates.resolve(&config.default_year) {
            Ok(date) => Some(date),
            Err(e) => {
                tracing::debug!(row, error = %e, "transaction date left empty");
                None
            }
        };

        let (doc_no, doc_type) = self.numbering.allocate(amount);
        self.records.push(TransactionRecord::new(
            doc_no,
            doc_type,
            doc_date,
            description,
            amount,
        ));
    }

    /// Flushes what is left in the continuation buffer and hands back the records.
    pub fn finish(mut self) -> Vec<TransactionRecord> {
        self.pending.flush_into(&mut self.records);
        self.records
    }
}

/// Extracts every transaction of a statement grid in a single forward pass.
///
/// Fails only on structural problems: no header row, or no amount column.
pub fn extract_transactions(
    grid: &RawGrid,
    config: &ExtractConfig,
) -> StatementResult<Vec<TransactionRecord>> {
    let (columns, header_row) = locate_header(grid, &config.markers);
    check_columns(&columns)?;

    let state = scan_rows(grid, &columns, header_row + 1, config);
    Ok(state.finish())
}

/// Folds rows `start..` of the grid into a [`ParseState`].
pub fn scan_rows(
    grid: &RawGrid,
    columns: &ColumnMap,
    start: usize,
    config: &ExtractConfig,
) -> ParseState {
    let mut state = ParseState::new(config);

    for row in start..grid.len() {
        let view = RowView::read(grid, row, columns);
        if state.step(row, &view, config).is_break() {
            break;
        }
    }

    state
}

fn check_columns(columns: &ColumnMap) -> StatementResult<()> {
    if columns.is_resolved() {
        Ok(())
    } else if columns.date.is_none() || columns.description.is_none() {
        Err(StatementParseError::HeaderNotFound)
    } else {
        Err(StatementParseError::ColumnUnresolved("amount"))
    }
}

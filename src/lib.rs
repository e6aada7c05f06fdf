//! Extract a normalized ledger from semi-structured bank statement spreadsheets.
//!
//! ```rust,ignore
//! use bank_ledger_rs::ExtractorBuilder;
//!
//! let records = ExtractorBuilder::new()
//!     .filename("statement_jan.xlsx")
//!     .year("2025")
//!     .parse()?;
//! ```
//!
//! Whole directories go through [`BatchOrchestrator`], which orders files by
//! the month named in their filename and aggregates the results.

mod builder;
mod types;

pub mod batch;
pub mod config;
pub mod errors;
pub mod extract;
pub mod grid;
pub mod output;
pub mod parsers;

pub use batch::{BatchOrchestrator, BatchReport, FileOutcome, FileStatus, InputFile, MonthToken};
pub use builder::{ExtractorBuilder, FileFormat};
pub use config::{ExtractConfig, HeaderMarkers};
pub use extract::extract_transactions;
pub use grid::{Cell, RawGrid};
pub use parsers::prelude::*;
pub use types::{DocumentType, LedgerRow, ReservedFields, TEMPLATE_COLUMNS, TransactionRecord};

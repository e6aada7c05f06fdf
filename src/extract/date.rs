use crate::errors::{StatementParseError, StatementResult};
use crate::grid::Cell;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

static DAY_MONTH_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}/[0-9]{2}$").expect("valid day/month pattern"));

/// Day-first layouts tried in order; each `%y` goes before its `%Y` since `%Y`
/// also takes two digits.
const DATE_FORMATS: &[&str] = &[
    "%d/%m/%y", "%d/%m/%Y", "%d-%m-%y", "%d-%m-%Y", "%d.%m.%y", "%d.%m.%Y", "%d %b %y",
    "%d %b %Y", "%d-%b-%y", "%d-%b-%Y", "%d %B %y", "%d %B %Y", "%Y-%m-%d",
];

/// Anything earlier is a mangled year, not a statement date.
const MIN_YEAR: i32 = 1000;

const DATETIME_FORMATS: &[&str] = &["%d/%m/%Y %H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Carries the last seen date across rows and turns it into a calendar date.
#[derive(Debug, Clone, Default)]
pub struct DateResolver {
    last_known: Option<Cell>,
}

impl DateResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remembers `cell` when it holds a value; empty cells leave the state alone.
    pub fn observe(&mut self, cell: &Cell) {
        if !cell.is_empty() {
            self.last_known = Some(cell.clone());
        }
    }

    pub fn has_date(&self) -> bool {
        self.last_known.is_some()
    }

    /// Resolves the carried value, completing `DD/MM` with `default_year`.
    pub fn resolve(&self, default_year: &str) -> StatementResult<NaiveDate> {
        match &self.last_known {
            Some(cell) => resolve_cell(cell, default_year),
            None => Err(StatementParseError::DateInvalid(String::new())),
        }
    }
}

/// Resolves a single date cell. Date cells are taken as-is; anything else is
/// rendered to text and parsed day-first.
pub fn resolve_cell(cell: &Cell, default_year: &str) -> StatementResult<NaiveDate> {
    match cell {
        Cell::Date(dt) => Ok(dt.date()),
        other => parse_day_first(&complete_partial(&other.render(), default_year)),
    }
}

/// Appends the year to a bare `DD/MM` value; other text is returned unchanged.
pub fn complete_partial(text: &str, default_year: &str) -> String {
    let text = text.trim();
    if DAY_MONTH_ONLY.is_match(text) {
        format!("{text}/{default_year}")
    } else {
        text.to_string()
    }
}

pub fn parse_day_first(text: &str) -> StatementResult<NaiveDate> {
    let s = text.trim();

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        .filter(|date| date.year() >= MIN_YEAR)
        .ok_or_else(|| StatementParseError::DateInvalid(s.to_string()))
}

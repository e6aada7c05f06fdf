use crate::config::HeaderMarkers;
use crate::extract::header::ColumnMap;
use crate::grid::{Cell, RawGrid};

/// The three mapped cells of one statement row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowView {
    pub date: Cell,
    pub description: Option<String>,
    pub amount: Option<String>,
}

impl RowView {
    /// Reads the mapped cells of `row`; absent columns and short rows read as empty.
    pub fn read(grid: &RawGrid, row: usize, columns: &ColumnMap) -> Self {
        let cell = |col: Option<usize>| {
            col.and_then(|c| grid.cell(row, c))
                .cloned()
                .unwrap_or_default()
        };

        RowView {
            date: cell(columns.date),
            description: cell(columns.description).text(),
            amount: cell(columns.amount).text(),
        }
    }

    pub fn has_date(&self) -> bool {
        !self.date.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    BeginningBalance,
    HeaderEcho,
}

/// Outcome of classifying one row, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowClass {
    /// Ending balance: flush and stop reading the file.
    Terminator,
    Ignored(IgnoreReason),
    /// A dated row with an amount; the amount still has to parse.
    Transaction { description: String, amount: String },
    Continuation(String),
    Blank,
}

impl RowClass {
    /// Whether the row may update the carried date.
    pub fn observes_date(&self) -> bool {
        !matches!(self, RowClass::Terminator | RowClass::Ignored(_))
    }
}

/// Classifies a row. `date_known` tells whether an earlier row carried a date.
pub fn classify(row: &RowView, date_known: bool, markers: &HeaderMarkers) -> RowClass {
    let description = row.description.as_deref();
    let amount = row.amount.as_deref();

    let date_known = date_known || row.has_date();

    match (description, amount) {
        (Some(d), _) if contains_marker(d, &markers.ending_balance) => RowClass::Terminator,
        (Some(d), _) if contains_marker(d, &markers.beginning_balance) => {
            RowClass::Ignored(IgnoreReason::BeginningBalance)
        }
        (_, Some(a)) if contains_marker(a, &markers.amount) => {
            RowClass::Ignored(IgnoreReason::HeaderEcho)
        }
        (d, Some(a)) if date_known => RowClass::Transaction {
            description: d.unwrap_or_default().to_string(),
            amount: a.to_string(),
        },
        (Some(d), None) => RowClass::Continuation(d.to_string()),
        _ => RowClass::Blank,
    }
}

fn contains_marker(text: &str, marker: &str) -> bool {
    !marker.is_empty() && text.to_lowercase().contains(&marker.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(date: &str, description: &str, amount: &str) -> RowView {
        RowView {
            date: Cell::from(date),
            description: Cell::from(description).text(),
            amount: Cell::from(amount).text(),
        }
    }

    fn transaction(description: &str, amount: &str) -> RowClass {
        RowClass::Transaction {
            description: description.to_string(),
            amount: amount.to_string(),
        }
    }

    #[rstest]
    #[case(row("31/01", "ENDING BALANCE", "5,000.00"), true, RowClass::Terminator)]
    #[case(row("", "Ending Balance", ""), false, RowClass::Terminator)]
    #[case(row("01/01", "BEGINNING BALANCE", "4,000.00"), true, RowClass::Ignored(IgnoreReason::BeginningBalance))]
    #[case(row("", "ending balance b/f beginning balance", ""), false, RowClass::Terminator)]
    #[case(row("Entry Date", "Description", "TRANSACTION AMOUNT"), true, RowClass::Ignored(IgnoreReason::HeaderEcho))]
    #[case(row("01/02", "Deposit", "100+"), false, transaction("Deposit", "100+"))]
    #[case(row("", "Transfer", "50-"), true, transaction("Transfer", "50-"))]
    #[case(row("", "", "50-"), true, transaction("", "50-"))]
    #[case(row("", "Transfer", "50-"), false, RowClass::Blank)]
    #[case(row("", "ref:123", ""), true, RowClass::Continuation("ref:123".to_string()))]
    #[case(row("", "ref:123", ""), false, RowClass::Continuation("ref:123".to_string()))]
    #[case(row("02/01", "ref:123", ""), false, RowClass::Continuation("ref:123".to_string()))]
    #[case(row("", "", ""), true, RowClass::Blank)]
    #[case(row("02/01", "", ""), true, RowClass::Blank)]
    #[case(row("", "   ", "  "), true, RowClass::Blank)]
    fn test_classification_priority(
        #[case] view: RowView,
        #[case] date_known: bool,
        #[case] expected: RowClass,
    ) {
        assert_eq!(classify(&view, date_known, &HeaderMarkers::default()), expected);
    }

    #[test]
    fn test_only_terminator_and_ignored_skip_date_update() {
        assert!(!RowClass::Terminator.observes_date());
        assert!(!RowClass::Ignored(IgnoreReason::HeaderEcho).observes_date());
        assert!(RowClass::Blank.observes_date());
        assert!(RowClass::Continuation(String::new()).observes_date());
        assert!(transaction("x", "1").observes_date());
    }

    #[test]
    fn test_read_tolerates_short_rows_and_missing_columns() {
        let grid = RawGrid::from(vec![["01/02", "Deposit"]]);
        let columns = ColumnMap {
            date: Some(0),
            description: Some(1),
            amount: Some(5),
        };
        let view = RowView::read(&grid, 0, &columns);
        assert!(view.has_date());
        assert_eq!(view.description.as_deref(), Some("Deposit"));
        assert_eq!(view.amount, None);

        let view = RowView::read(&grid, 0, &ColumnMap::default());
        assert_eq!(view, RowView::default());
    }

    #[test]
    fn test_numeric_amount_cell_reads_as_text() {
        let grid = RawGrid::new(vec![vec![Cell::from("01/02"), Cell::from("Fee"), Cell::Number(-12.5)]]);
        let columns = ColumnMap {
            date: Some(0),
            description: Some(1),
            amount: Some(2),
        };
        let view = RowView::read(&grid, 0, &columns);
        assert_eq!(view.amount.as_deref(), Some("-12.5"));
    }
}

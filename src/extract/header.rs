use crate::config::HeaderMarkers;
use crate::grid::{Cell, RawGrid};
use serde::{Deserialize, Serialize};

/// Column positions of the fields the extraction reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    pub date: Option<usize>,
    pub description: Option<usize>,
    pub amount: Option<usize>,
}

impl ColumnMap {
    pub fn is_resolved(&self) -> bool {
        self.date.is_some() && self.description.is_some() && self.amount.is_some()
    }
}

/// Finds the first row carrying both the date and description markers.
///
/// Returns the column map and the header row position. When no row
/// qualifies the map is all-absent and the position is `0`.
pub fn locate_header(grid: &RawGrid, markers: &HeaderMarkers) -> (ColumnMap, usize) {
    let date_marker = markers.date.to_lowercase();
    let description_marker = markers.description.to_lowercase();
    let amount_marker = markers.amount.to_lowercase();

    for (position, row) in grid.rows().iter().enumerate() {
        let labels: Vec<String> = row.iter().map(label).collect();

        let date = find_marker(&labels, &date_marker);
        let description = find_marker(&labels, &description_marker);

        if date.is_some() && description.is_some() {
            let map = ColumnMap {
                date,
                description,
                amount: find_marker(&labels, &amount_marker),
            };
            return (map, position);
        }
    }

    (ColumnMap::default(), 0)
}

fn label(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => s.trim().to_lowercase(),
        _ => String::new(),
    }
}

fn find_marker(labels: &[String], marker: &str) -> Option<usize> {
    if marker.is_empty() {
        return None;
    }
    labels.iter().position(|l| l.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn markers() -> HeaderMarkers {
        HeaderMarkers::default()
    }

    #[rstest]
    #[case(vec!["Date", "Description", "Amount"], Some(0), Some(1), Some(2))]
    #[case(vec!["  TARIKH MASUK / ENTRY DATE ", "", "TRANSACTION DESCRIPTION", "TRANSACTION AMOUNT"], Some(0), Some(2), Some(3))]
    #[case(vec!["amount", "details / description", "posting date"], Some(2), Some(1), Some(0))]
    #[case(vec!["DATE", "DESCRIPTION"], Some(0), Some(1), None)]
    fn test_header_variants(
        #[case] header: Vec<&str>,
        #[case] date: Option<usize>,
        #[case] description: Option<usize>,
        #[case] amount: Option<usize>,
    ) {
        let grid = RawGrid::new(vec![header.into_iter().map(Cell::from).collect()]);
        let (map, position) = locate_header(&grid, &markers());
        assert_eq!(position, 0);
        assert_eq!(map, ColumnMap { date, description, amount });
    }

    #[test]
    fn test_header_found_below_preamble() {
        let grid = RawGrid::from(vec![
            ["ACME BANK BERHAD", "", ""],
            ["Statement Date: 31/01/2025", "", ""],
            ["Entry Date", "Transaction Description", "Transaction Amount"],
            ["01/01", "Deposit", "100+"],
        ]);
        let (map, position) = locate_header(&grid, &markers());
        assert_eq!(position, 2);
        assert!(map.is_resolved());
        assert_eq!(map.amount, Some(2));
    }

    #[test]
    fn test_first_matching_cell_wins() {
        let grid = RawGrid::from(vec![[
            "Entry Date",
            "Value Date",
            "Description",
            "Amount",
            "Balance Amount",
        ]]);
        let (map, _) = locate_header(&grid, &markers());
        assert_eq!(map.date, Some(0));
        assert_eq!(map.amount, Some(3));
    }

    #[test]
    fn test_no_header_row() {
        let grid = RawGrid::from(vec![["01/01", "Deposit", "100+"], ["02/01", "Fee", "5-"]]);
        let (map, position) = locate_header(&grid, &markers());
        assert_eq!(map, ColumnMap::default());
        assert!(!map.is_resolved());
        assert_eq!(position, 0);
    }

    #[test]
    fn test_non_text_cells_never_match() {
        let grid = RawGrid::new(vec![vec![Cell::Number(1.0), Cell::Empty, Cell::from("date")]]);
        let (map, _) = locate_header(&grid, &markers());
        assert_eq!(map, ColumnMap::default());
    }

    #[test]
    fn test_custom_markers() {
        let custom = HeaderMarkers {
            date: "tarikh".to_string(),
            description: "keterangan".to_string(),
            amount: "jumlah".to_string(),
            ..HeaderMarkers::default()
        };
        let grid = RawGrid::from(vec![["TARIKH", "KETERANGAN", "JUMLAH"]]);
        let (map, _) = locate_header(&grid, &custom);
        assert_eq!(map, ColumnMap { date: Some(0), description: Some(1), amount: Some(2) });
    }
}

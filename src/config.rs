use serde::{Deserialize, Serialize};

pub const DEFAULT_YEAR: &str = "2025";
pub const DEFAULT_INFLOW_PREFIX: &str = "OR";
pub const DEFAULT_OUTFLOW_PREFIX: &str = "PV";

/// Marker tokens used to find the header row and to recognize balance rows.
///
/// Every marker is matched case-insensitively as a substring of the cell text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderMarkers {
    pub date: String,
    pub description: String,
    /// Also the header-echo token: an amount cell containing it is ignored.
    pub amount: String,
    pub beginning_balance: String,
    pub ending_balance: String,
}

impl Default for HeaderMarkers {
    fn default() -> Self {
        Self {
            date: "date".to_string(),
            description: "description".to_string(),
            amount: "amount".to_string(),
            beginning_balance: "beginning balance".to_string(),
            ending_balance: "ending balance".to_string(),
        }
    }
}

/// Caller-supplied settings for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Year appended to `DD/MM` dates.
    pub default_year: String,
    pub inflow_prefix: String,
    pub outflow_prefix: String,
    pub markers: HeaderMarkers,
    /// Worksheet to read; the first sheet when absent.
    pub sheet_name: Option<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            default_year: DEFAULT_YEAR.to_string(),
            inflow_prefix: DEFAULT_INFLOW_PREFIX.to_string(),
            outflow_prefix: DEFAULT_OUTFLOW_PREFIX.to_string(),
            markers: HeaderMarkers::default(),
            sheet_name: None,
        }
    }
}

impl ExtractConfig {
    /// Parses a JSON config; any field left out keeps its default.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExtractConfig::default();
        assert_eq!(config.default_year, "2025");
        assert_eq!(config.inflow_prefix, "OR");
        assert_eq!(config.outflow_prefix, "PV");
        assert_eq!(config.markers.amount, "amount");
        assert!(config.sheet_name.is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            ExtractConfig::from_json(r#"{"default_year": "2024", "markers": {"date": "tarikh"}}"#)
                .unwrap();
        assert_eq!(config.default_year, "2024");
        assert_eq!(config.inflow_prefix, "OR");
        assert_eq!(config.markers.date, "tarikh");
        assert_eq!(config.markers.description, "description");
    }

    #[test]
    fn test_invalid_json() {
        assert!(ExtractConfig::from_json("{not json").is_err());
    }
}

use crate::types::DocumentType;
use rust_decimal::Decimal;

/// Per-file document numbering, one counter per polarity.
#[derive(Debug, Clone)]
pub struct DocumentNumbering {
    inflow_prefix: String,
    outflow_prefix: String,
    inflow_count: u32,
    outflow_count: u32,
}

impl DocumentNumbering {
    pub fn new(inflow_prefix: impl Into<String>, outflow_prefix: impl Into<String>) -> Self {
        Self {
            inflow_prefix: inflow_prefix.into(),
            outflow_prefix: outflow_prefix.into(),
            inflow_count: 0,
            outflow_count: 0,
        }
    }

    /// Allocates the next number for the polarity of `amount`.
    pub fn allocate(&mut self, amount: Decimal) -> (String, DocumentType) {
        let doc_type = DocumentType::from_amount(amount);
        let doc_no = match doc_type {
            DocumentType::Inflow => {
                self.inflow_count += 1;
                format!("{}{}", self.inflow_prefix, self.inflow_count)
            }
            DocumentType::Outflow => {
                self.outflow_count += 1;
                format!("{}{}", self.outflow_prefix, self.outflow_count)
            }
        };
        (doc_no, doc_type)
    }

    pub fn inflow_count(&self) -> u32 {
        self.inflow_count
    }

    pub fn outflow_count(&self) -> u32 {
        self.outflow_count
    }
}

use crate::types::TransactionRecord;

/// Continuation lines waiting to be folded onto the preceding record.
#[derive(Debug, Clone, Default)]
pub struct PendingDescription {
    lines: Vec<String>,
}

impl PendingDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Appends the buffered lines to the last record and clears the buffer.
    ///
    /// With no record to attach to, the buffer is discarded.
    pub fn flush_into(&mut self, records: &mut [TransactionRecord]) {
        if self.lines.is_empty() {
            return;
        }
        let merged = self.lines.join(" ");
        self.lines.clear();

        if let Some(last) = records.last_mut() {
            last.append_narrative(&merged);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocumentType;
    use rust_decimal::Decimal;

    fn record(no: &str, narrative: &str) -> TransactionRecord {
        TransactionRecord::new(
            no.to_string(),
            DocumentType::Inflow,
            None,
            narrative.to_string(),
            Decimal::ONE,
        )
    }

    #[test]
    fn test_flush_appends_to_last_record_in_order() {
        let mut records = vec![record("OR1", "Deposit"), record("OR2", "Transfer")];
        let mut pending = PendingDescription::new();
        pending.push("from ACME");
        pending.push("ref:123");

        pending.flush_into(&mut records);

        assert!(pending.is_empty());
        assert_eq!(records[0].narrative, "Deposit");
        assert_eq!(records[1].narrative, "Transfer from ACME ref:123");
    }

    #[test]
    fn test_flush_without_record_discards_buffer() {
        let mut records: Vec<TransactionRecord> = Vec::new();
        let mut pending = PendingDescription::new();
        pending.push("orphan");

        pending.flush_into(&mut records);

        assert!(pending.is_empty());
        assert!(records.is_empty());
    }

    #[test]
    fn test_empty_flush_is_noop() {
        let mut records = vec![record("OR1", "Deposit")];
        PendingDescription::new().flush_into(&mut records);
        assert_eq!(records[0].narrative, "Deposit");
    }
}

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Column set of the accounting import template, in output order.
pub const TEMPLATE_COLUMNS: [&str; 22] = [
    "DocNo",
    "DocNo2",
    "DocDate",
    "TaxDate",
    "DocType",
    "JournalType",
    "DealWith",
    "TaxEntity",
    "Description",
    "Extracted Description",
    "CurrencyCode",
    "PaymentAmt",
    "BankCharge",
    "BankChargeTaxCode",
    "BankChargeTaxRate",
    "BankChargeTax",
    "ToBankRate",
    "ToAccountRate",
    "BankChargeTaxRefNo",
    "PaymentBy",
    "FloatDay",
    "BankChargeDeptNo",
];

/// Polarity of a transaction, derived from the sign of its amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    Inflow,
    Outflow,
}

impl DocumentType {
    pub fn from_amount(amount: Decimal) -> Self {
        if amount.is_sign_negative() && !amount.is_zero() {
            DocumentType::Outflow
        } else {
            DocumentType::Inflow
        }
    }

    /// Document-type code expected by the accounting system.
    pub fn code(&self) -> &'static str {
        match self {
            DocumentType::Inflow => "OR",
            DocumentType::Outflow => "PV",
        }
    }
}

/// Template columns the extraction never fills; kept for downstream enrichment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservedFields {
    pub doc_no2: Option<String>,
    pub tax_date: Option<String>,
    pub journal_type: Option<String>,
    pub deal_with: Option<String>,
    pub tax_entity: Option<String>,
    pub description: Option<String>,
    pub currency_code: Option<String>,
    pub payment_amt: Option<String>,
    pub bank_charge: Option<String>,
    pub bank_charge_tax_code: Option<String>,
    pub bank_charge_tax_rate: Option<String>,
    pub bank_charge_tax: Option<String>,
    pub to_bank_rate: Option<String>,
    pub bank_charge_tax_ref_no: Option<String>,
    pub payment_by: Option<String>,
    pub float_day: Option<String>,
    pub bank_charge_dept_no: Option<String>,
}

/// One ledger entry extracted from a statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub doc_no: String,
    /// Set once at creation; `None` when the carried date did not parse.
    pub doc_date: Option<NaiveDate>,
    pub doc_type: DocumentType,
    /// Extracted narrative, grown by continuation rows.
    pub narrative: String,
    pub amount: Decimal,
    #[serde(default)]
    pub reserved: ReservedFields,
}

impl TransactionRecord {
    /// `doc_type` is whatever the numbering allocated alongside `doc_no`.
    pub fn new(
        doc_no: String,
        doc_type: DocumentType,
        doc_date: Option<NaiveDate>,
        narrative: String,
        amount: Decimal,
    ) -> Self {
        Self {
            doc_no,
            doc_date,
            doc_type,
            narrative,
            amount,
            reserved: ReservedFields::default(),
        }
    }

    /// `D/M/YYYY` without leading zeros, or empty.
    pub fn doc_date_text(&self) -> String {
        self.doc_date
            .map(|d| format!("{}/{}/{}", d.day(), d.month(), d.year()))
            .unwrap_or_default()
    }

    /// Appends continuation text, space-joined, never replacing what is there.
    pub fn append_narrative(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.narrative.push(' ');
        self.narrative.push_str(text);
    }
}

/// Flat, template-shaped view of a record used by the writers.
#[derive(Debug, Serialize)]
pub struct LedgerRow<'a> {
    #[serde(rename = "DocNo")]
    pub doc_no: &'a str,
    #[serde(rename = "DocNo2")]
    pub doc_no2: Option<&'a str>,
    #[serde(rename = "DocDate")]
    pub doc_date: String,
    #[serde(rename = "TaxDate")]
    pub tax_date: Option<&'a str>,
    #[serde(rename = "DocType")]
    pub doc_type: &'static str,
    #[serde(rename = "JournalType")]
    pub journal_type: Option<&'a str>,
    #[serde(rename = "DealWith")]
    pub deal_with: Option<&'a str>,
    #[serde(rename = "TaxEntity")]
    pub tax_entity: Option<&'a str>,
    #[serde(rename = "Description")]
    pub description: Option<&'a str>,
    #[serde(rename = "Extracted Description")]
    pub extracted_description: &'a str,
    #[serde(rename = "CurrencyCode")]
    pub currency_code: Option<&'a str>,
    #[serde(rename = "PaymentAmt")]
    pub payment_amt: Option<&'a str>,
    #[serde(rename = "BankCharge")]
    pub bank_charge: Option<&'a str>,
    #[serde(rename = "BankChargeTaxCode")]
    pub bank_charge_tax_code: Option<&'a str>,
    #[serde(rename = "BankChargeTaxRate")]
    pub bank_charge_tax_rate: Option<&'a str>,
    #[serde(rename = "BankChargeTax")]
    pub bank_charge_tax: Option<&'a str>,
    #[serde(rename = "ToBankRate")]
    pub to_bank_rate: Option<&'a str>,
    #[serde(rename = "ToAccountRate")]
    pub to_account_rate: String,
    #[serde(rename = "BankChargeTaxRefNo")]
    pub bank_charge_tax_ref_no: Option<&'a str>,
    #[serde(rename = "PaymentBy")]
    pub payment_by: Option<&'a str>,
    #[serde(rename = "FloatDay")]
    pub float_day: Option<&'a str>,
    #[serde(rename = "BankChargeDeptNo")]
    pub bank_charge_dept_no: Option<&'a str>,
}

impl LedgerRow<'_> {
    /// Cell values in `TEMPLATE_COLUMNS` order; `None` for an unfilled column.
    pub fn values(&self) -> [Option<&str>; 22] {
        [
            Some(self.doc_no),
            self.doc_no2,
            Some(self.doc_date.as_str()).filter(|d| !d.is_empty()),
            self.tax_date,
            Some(self.doc_type),
            self.journal_type,
            self.deal_with,
            self.tax_entity,
            self.description,
            Some(self.extracted_description),
            self.currency_code,
            self.payment_amt,
            self.bank_charge,
            self.bank_charge_tax_code,
            self.bank_charge_tax_rate,
            self.bank_charge_tax,
            self.to_bank_rate,
            Some(self.to_account_rate.as_str()),
            self.bank_charge_tax_ref_no,
            self.payment_by,
            self.float_day,
            self.bank_charge_dept_no,
        ]
    }
}

impl<'a> From<&'a TransactionRecord> for LedgerRow<'a> {
    fn from(record: &'a TransactionRecord) -> Self {
        let r = &record.reserved;
        LedgerRow {
            doc_no: &record.doc_no,
            doc_no2: r.doc_no2.as_deref(),
            doc_date: record.doc_date_text(),
            tax_date: r.tax_date.as_deref(),
            doc_type: record.doc_type.code(),
            journal_type: r.journal_type.as_deref(),
            deal_with: r.deal_with.as_deref(),
            tax_entity: r.tax_entity.as_deref(),
            description: r.description.as_deref(),
            extracted_description: &record.narrative,
            currency_code: r.currency_code.as_deref(),
            payment_amt: r.payment_amt.as_deref(),
            bank_charge: r.bank_charge.as_deref(),
            bank_charge_tax_code: r.bank_charge_tax_code.as_deref(),
            bank_charge_tax_rate: r.bank_charge_tax_rate.as_deref(),
            bank_charge_tax: r.bank_charge_tax.as_deref(),
            to_bank_rate: r.to_bank_rate.as_deref(),
            to_account_rate: record.amount.to_string(),
            bank_charge_tax_ref_no: r.bank_charge_tax_ref_no.as_deref(),
            payment_by: r.payment_by.as_deref(),
            float_day: r.float_day.as_deref(),
            bank_charge_dept_no: r.bank_charge_dept_no.as_deref(),
        }
    }
}

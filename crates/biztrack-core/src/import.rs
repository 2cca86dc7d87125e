//! Transaction history readers (JSON and CSV)

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{parse_date, Transaction};

/// File formats accepted for transaction history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryFormat {
    Json,
    Csv,
}

impl HistoryFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("json") => Some(Self::Json),
            Some("csv") => Some(Self::Csv),
            _ => None,
        }
    }
}

/// JSON files may hold a bare array or the request envelope `{"transactions": [...]}`
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonHistory {
    List(Vec<Transaction>),
    Envelope { transactions: Vec<Transaction> },
}

/// Read a transaction file, picking the parser from its extension
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let format = HistoryFormat::from_path(path).ok_or_else(|| {
        Error::InvalidData(format!(
            "{}: expected a .json or .csv transaction file",
            path.display()
        ))
    })?;

    let file = File::open(path)?;
    let transactions = match format {
        HistoryFormat::Json => parse_json(file)?,
        HistoryFormat::Csv => parse_csv(file)?,
    };

    debug!(
        path = %path.display(),
        count = transactions.len(),
        "Loaded transaction history"
    );
    Ok(transactions)
}

/// Parse transactions from JSON
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let history: JsonHistory = serde_json::from_reader(reader)?;
    let transactions = match history {
        JsonHistory::List(txs) => txs,
        JsonHistory::Envelope { transactions } => transactions,
    };
    for tx in &transactions {
        tx.parsed_date()?;
    }
    Ok(transactions)
}

/// Parse transactions from CSV with a `description,amount,date,vendor` header
///
/// Columns are matched by header name, so order is free and `description`/`vendor` may be
/// omitted entirely.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    };
    let amount_col = column("amount")
        .ok_or_else(|| Error::InvalidData("CSV header is missing an amount column".into()))?;
    let date_col = column("date")
        .ok_or_else(|| Error::InvalidData("CSV header is missing a date column".into()))?;
    let description_col = column("description");
    let vendor_col = column("vendor");

    let mut transactions = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let line = i + 2;

        let amount_str = field(&record, Some(amount_col))
            .ok_or_else(|| Error::InvalidData(format!("line {}: missing amount", line)))?;
        let amount = parse_amount(amount_str)
            .map_err(|e| Error::InvalidData(format!("line {}: {}", line, e)))?;

        let date = field(&record, Some(date_col))
            .ok_or_else(|| Error::InvalidData(format!("line {}: missing date", line)))?;
        parse_date(date).map_err(|e| Error::InvalidData(format!("line {}: {}", line, e)))?;

        transactions.push(Transaction {
            description: field(&record, description_col).map(str::to_string),
            amount,
            date: date.to_string(),
            vendor: field(&record, vendor_col).map(str::to_string),
        });
    }

    Ok(transactions)
}

/// Non-empty cell at `col`
fn field(record: &StringRecord, col: Option<usize>) -> Option<&str> {
    col.and_then(|c| record.get(c)).filter(|s| !s.is_empty())
}

/// Parse an amount string, handling currency symbols and thousands separators
fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s
        .trim()
        .replace(['$', '€', '£', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    cleaned
        .parse::<f64>()
        .map_err(|_| Error::InvalidData(format!("Unable to parse amount: {}", s)))
}

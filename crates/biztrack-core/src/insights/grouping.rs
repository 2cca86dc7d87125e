//! Turning raw transactions into categorized expenses

use crate::categorize::CategoryResolver;
use crate::config::GroupBy;
use crate::error::Result;
use crate::models::{ExpenseEntry, Transaction};

/// Label each transaction with its spend category under the given grouping key
///
/// `SuggestedCategory` runs every description through the resolver in one batch.
pub fn expense_entries(
    transactions: &[Transaction],
    group_by: GroupBy,
    resolver: &CategoryResolver,
) -> Result<Vec<ExpenseEntry>> {
    let entries = match group_by {
        GroupBy::Description => transactions
            .iter()
            .map(|tx| ExpenseEntry::new(tx.description_text(), tx.amount))
            .collect(),
        GroupBy::Vendor => transactions
            .iter()
            .map(|tx| {
                let key = tx
                    .vendor
                    .as_deref()
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or_else(|| tx.description_text());
                ExpenseEntry::new(key, tx.amount)
            })
            .collect(),
        GroupBy::SuggestedCategory => {
            let descriptions: Vec<String> = transactions
                .iter()
                .map(|tx| tx.description_text().to_string())
                .collect();
            resolver
                .resolve(&descriptions)?
                .into_iter()
                .zip(transactions)
                .map(|(prediction, tx)| ExpenseEntry::new(prediction.category, tx.amount))
                .collect()
        }
    };
    Ok(entries)
}

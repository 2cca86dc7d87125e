//! Labeled data for the categorizer
//!
//! The seed set covers the six business expense categories with four descriptions each.
//! Real deployments train from a CSV of `description,category` rows exported from the
//! accounting product.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

const SEED_DATA: &[(&str, &str)] = &[
    // Rent
    ("Monthly office rent payment", "rent"),
    ("Shop lease for December", "rent"),
    ("Warehouse rental fee", "rent"),
    ("Paid office space rent", "rent"),
    // Salaries
    ("Staff salaries for NOV", "salaries"),
    ("Monthly wages - marketing team", "salaries"),
    ("Employee payroll payment", "salaries"),
    ("Bonus payment to sales staff", "salaries"),
    // Stock
    ("Purchased inventory from supplier", "stock"),
    ("Restocking electronics stock", "stock"),
    ("Wholesaler payment for goods", "stock"),
    ("New products inventory order", "stock"),
    // Transport
    ("Fuel for delivery van", "transport"),
    ("Uber for business meeting", "transport"),
    ("Logistics and shipping fees", "transport"),
    ("Vehicle maintenance and petrol", "transport"),
    // Utilities
    ("Electricity bill - Main office", "utilities"),
    ("Water utility payment", "utilities"),
    ("Internet subscription fee", "utilities"),
    ("Phone and data charges", "utilities"),
    // Marketing
    ("Facebook ads campaign", "marketing"),
    ("Google search advertising", "marketing"),
    ("Printing flyers and banners", "marketing"),
    ("Social media promo costs", "marketing"),
];

/// Built-in `(description, category)` training pairs
pub fn seed_examples() -> Vec<(String, String)> {
    SEED_DATA
        .iter()
        .map(|(d, c)| (d.to_string(), c.to_string()))
        .collect()
}

#[derive(Debug, Deserialize)]
struct LabeledRow {
    description: String,
    category: String,
}

/// Read `(description, category)` pairs from a CSV with a header row
pub fn load_labeled_csv(path: &Path) -> Result<Vec<(String, String)>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;

    let mut examples = Vec::new();
    for (line, row) in reader.deserialize::<LabeledRow>().enumerate() {
        let row = row?;
        if row.description.is_empty() || row.category.is_empty() {
            return Err(Error::InvalidData(format!(
                "row {} needs both description and category",
                line + 2
            )));
        }
        examples.push((row.description, row.category.to_lowercase()));
    }

    if examples.is_empty() {
        return Err(Error::InvalidData(format!(
            "{} contains no labeled rows",
            path.display()
        )));
    }
    Ok(examples)
}

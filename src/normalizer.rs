use thiserror::Error;

use crate::models::{NormalizedTransaction, RawRow};

#[derive(Error, Debug, PartialEq)]
pub enum NormalizeError {
    #[error("unparseable amount: {0:?}")]
    BadAmount(String),
}

/// Parse a currency amount, tolerating thousands separators, a dollar sign,
/// quotes, and parenthesized negatives. Returns None rather than defaulting
/// to zero so malformed input surfaces as a row failure.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw.replace(',', "").replace('"', "").replace('$', "");
    let s = s.trim();
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return inner.trim().parse::<f64>().ok().map(|v| -v);
    }
    s.parse().ok()
}

fn trimmed(field: &Option<String>) -> String {
    field.as_deref().unwrap_or("").trim().to_string()
}

/// Coerce a raw CSV row into the canonical record shape. Dates are trimmed
/// but not validated; the store rejects malformed ones at insert time.
pub fn normalize(row: &RawRow, user_id: i64) -> Result<NormalizedTransaction, NormalizeError> {
    let amount_raw = trimmed(&row.amount);
    let amount = parse_amount(&amount_raw).ok_or(NormalizeError::BadAmount(amount_raw))?;

    Ok(NormalizedTransaction {
        user_id,
        date: trimmed(&row.date),
        amount,
        merchant: trimmed(&row.merchant),
        category: trimmed(&row.category),
        description: trimmed(&row.description),
    })
}

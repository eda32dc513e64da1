use serde::Deserialize;

/// One record from the source CSV, as the parser hands it over. No field is
/// guaranteed present or well formed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRow {
    pub date: Option<String>,
    pub amount: Option<String>,
    pub merchant: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// Canonical record shape after normalization. All strings are trimmed and
/// non-null; absent input becomes the empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTransaction {
    pub user_id: i64,
    pub date: String,
    pub amount: f64,
    pub merchant: String,
    pub category: String,
    pub description: String,
}

/// Classification of a single insert attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    Inserted,
    SkippedDuplicate,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
}

use sha2::{Digest, Sha256};

use crate::models::NormalizedTransaction;

/// Pipe-joined canonical tuple used as the hash input. Merchant and category
/// are lowercased so case differences in the source never defeat dedup; the
/// description keeps its case. The amount uses f64's shortest display form,
/// so "12.00" and "12" in the source hash identically.
pub fn canonical_key(txn: &NormalizedTransaction) -> String {
    format!(
        "{}|{}|{}|{}|{}|{}",
        txn.user_id,
        txn.date,
        txn.amount,
        txn.merchant.to_lowercase(),
        txn.category.to_lowercase(),
        txn.description,
    )
}

/// Deterministic import identifier: lowercase-hex SHA-256 of the canonical
/// key. Two raw rows that normalize to the same tuple get the same
/// fingerprint, which is what makes reruns idempotent.
pub fn fingerprint(txn: &NormalizedTransaction) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_key(txn).as_bytes());
    hex::encode(hasher.finalize())
}

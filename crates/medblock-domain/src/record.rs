//! Medical record module

use serde::{Deserialize, Serialize};

/// A medical record anchored on the ledger
///
/// The document itself lives off-ledger; `content_reference` is an opaque
/// pointer to it (typically a content hash) and is never interpreted here.
/// Records are written once and never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    /// Caller-supplied unique identifier
    pub id: String,

    /// Patient the record belongs to
    pub patient_id: String,

    /// Pointer to the off-ledger document
    #[serde(alias = "ipfsHash")]
    pub content_reference: String,

    /// RFC 3339 creation time taken from the creating transaction
    #[serde(alias = "timestamp")]
    pub created_at: String,

    /// Identifier of the hospital user who created the record
    pub created_by: String,
}

impl MedicalRecord {
    /// Ledger key this record is stored under
    pub fn key(&self) -> String {
        crate::keys::record_key(&self.id)
    }
}

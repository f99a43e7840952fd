//! Record manager - creation and retrieval of medical records

use crate::access::{require_non_empty, require_role};
use crate::codec::{decode, encode};
use crate::{ContractError, EntityKind};
use chrono::SecondsFormat;
use medblock_domain::keys::{record_key, RECORD_PREFIX};
use medblock_domain::{IdentityResolver, LedgerAccessor, MedicalRecord, QueryIterator, Role, Selector};
use medblock_gatekeeper::AccessPolicy;
use tracing::{debug, info, warn};

/// Records returned by a patient listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordListing {
    /// Decoded records, in ledger query order
    pub records: Vec<MedicalRecord>,

    /// Keys whose values matched the query but could not be decoded
    pub skipped: Vec<String>,
}

impl RecordListing {
    /// Whether every matching entry decoded
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Lazy, single-pass iterator over a patient's records
///
/// Entries that match the query but do not decode as a [`MedicalRecord`]
/// yield [`ContractError::NotFound`] carrying their ledger key, so callers
/// can tell them apart from ledger failures.
pub struct RecordIter<'a> {
    inner: QueryIterator<'a>,
}

impl Iterator for RecordIter<'_> {
    type Item = Result<MedicalRecord, ContractError>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        Some(item.map_err(ContractError::from).and_then(|(key, value)| {
            decode::<MedicalRecord>(&value).ok_or(ContractError::NotFound {
                kind: EntityKind::Record,
                id: key,
            })
        }))
    }
}

/// Creates and reads medical records
///
/// Only hospital members may create records. Reads are open to any caller.
pub struct RecordManager<'p> {
    policy: &'p AccessPolicy,
}

impl<'p> RecordManager<'p> {
    /// Create a record manager enforcing `policy`
    pub fn new(policy: &'p AccessPolicy) -> Self {
        Self { policy }
    }

    /// Store a new medical record
    ///
    /// `created_at` comes from the transaction timestamp and `created_by` from
    /// the resolved caller.
    ///
    /// # Errors
    /// - [`ContractError::Unauthorized`] unless the caller is a hospital member
    /// - [`ContractError::InvalidArgument`] for empty fields
    /// - [`ContractError::AlreadyExists`] if the id is taken and duplicates are rejected
    pub fn create_record<L, I>(
        &self,
        ledger: &mut L,
        caller: &I,
        id: &str,
        patient_id: &str,
        content_reference: &str,
    ) -> Result<MedicalRecord, ContractError>
    where
        L: LedgerAccessor + ?Sized,
        I: IdentityResolver + ?Sized,
    {
        require_role(self.policy, caller, "create_record", &[Role::Hospital])?;
        let created_by = caller.caller_id()?;

        require_non_empty("record id", id)?;
        require_non_empty("patient id", patient_id)?;
        require_non_empty("content reference", content_reference)?;

        let record = MedicalRecord {
            id: id.to_string(),
            patient_id: patient_id.to_string(),
            content_reference: content_reference.to_string(),
            created_at: ledger.tx_timestamp().to_rfc3339_opts(SecondsFormat::Secs, true),
            created_by,
        };

        let key = record.key();
        if self.policy.rejects_duplicate_ids() && ledger.get_state(&key)?.is_some() {
            warn!(record_id = id, "Refusing to overwrite existing record");
            return Err(ContractError::AlreadyExists {
                kind: EntityKind::Record,
                id: id.to_string(),
            });
        }

        ledger.put_state(&key, encode(&record)?)?;
        info!(
            record_id = %record.id,
            patient_id = %record.patient_id,
            created_by = %record.created_by,
            "Created medical record"
        );

        Ok(record)
    }

    /// Load a record by id
    ///
    /// # Errors
    /// [`ContractError::NotFound`] if nothing is stored under the id or the
    /// stored value does not decode.
    pub fn get_record<L>(&self, ledger: &L, id: &str) -> Result<MedicalRecord, ContractError>
    where
        L: LedgerAccessor + ?Sized,
    {
        let not_found = || ContractError::NotFound {
            kind: EntityKind::Record,
            id: id.to_string(),
        };

        let bytes = ledger.get_state(&record_key(id))?.ok_or_else(not_found)?;
        let record = decode::<MedicalRecord>(&bytes).ok_or_else(|| {
            warn!(record_id = id, "Stored record does not decode");
            not_found()
        })?;

        debug!(record_id = id, "Loaded medical record");
        Ok(record)
    }

    /// Lazily iterate the calling patient's records
    ///
    /// The caller's own identifier is the patient filter; there is no way to
    /// list another patient's records.
    pub fn iter_records_for_patient<'l, L, I>(
        &self,
        ledger: &'l L,
        caller: &I,
    ) -> Result<RecordIter<'l>, ContractError>
    where
        L: LedgerAccessor + ?Sized,
        I: IdentityResolver + ?Sized,
    {
        let patient_id = caller.caller_id()?;
        let selector = Selector::eq("patientId", patient_id);
        let inner = ledger.query(&selector.to_query_string())?;
        Ok(RecordIter { inner })
    }

    /// Collect the calling patient's records
    ///
    /// Entries that fail to decode are logged and reported in
    /// [`RecordListing::skipped`] rather than dropped silently. Ledger
    /// failures abort the listing.
    pub fn list_records_for_patient<L, I>(
        &self,
        ledger: &L,
        caller: &I,
    ) -> Result<RecordListing, ContractError>
    where
        L: LedgerAccessor + ?Sized,
        I: IdentityResolver + ?Sized,
    {
        let mut listing = RecordListing::default();

        for item in self.iter_records_for_patient(ledger, caller)? {
            match item {
                Ok(record) => listing.records.push(record),
                Err(ContractError::NotFound { id: key, .. }) => {
                    warn!(key = %key, "Skipping undecodable record in patient listing");
                    listing.skipped.push(key);
                }
                Err(e) => return Err(e),
            }
        }

        debug!(
            records = listing.records.len(),
            skipped = listing.skipped.len(),
            "Listed patient records"
        );
        Ok(listing)
    }
}

/// Record id for a `RECORD_` key, if it is one
pub fn record_id_from_key(key: &str) -> Option<&str> {
    key.strip_prefix(RECORD_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_from_key() {
        assert_eq!(record_id_from_key("RECORD_R1"), Some("R1"));
        assert_eq!(record_id_from_key("CLAIM_C1"), None);
    }

    #[test]
    fn test_listing_completeness() {
        let mut listing = RecordListing::default();
        assert!(listing.is_complete());
        listing.skipped.push("RECORD_bad".to_string());
        assert!(!listing.is_complete());
    }
}

//! Record storage.
//!
//! The store is an explicitly passed handle (`Arc<dyn RecordStore>`) rather than a process-wide
//! connection, so services and tests can choose the backing implementation.
//!
//! ## Matching semantics
//!
//! All lookups are case-insensitive literal substring matches and walk the collection in
//! insertion order. "First match" therefore means "earliest inserted match".
//!
//! ## Implementations
//!
//! - [`MemoryStore`]: collections held in memory only.
//! - [`JsonFileStore`]: a memory store mirrored to JSON files under a data directory.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::models::{DiseaseRecord, PreventiveTip};
use crate::MedcareResult;
use medcare_types::NonEmptyText;

/// Read-mostly access to the disease and tip collections.
///
/// Records are immutable once inserted. Concurrent inserts are not deduplicated.
pub trait RecordStore: Send + Sync {
    fn list_diseases(&self) -> MedcareResult<Vec<DiseaseRecord>>;

    /// First record whose disease name contains `needle`.
    fn find_disease_by_name(&self, needle: &NonEmptyText) -> MedcareResult<Option<DiseaseRecord>>;

    /// First record with at least one symptom containing `needle`.
    fn find_disease_by_symptom(
        &self,
        needle: &NonEmptyText,
    ) -> MedcareResult<Option<DiseaseRecord>>;

    fn insert_disease(&self, record: DiseaseRecord) -> MedcareResult<()>;

    fn list_tips(&self) -> MedcareResult<Vec<PreventiveTip>>;

    /// Tips whose title, description or category contains `needle`.
    fn search_tips(&self, needle: &NonEmptyText) -> MedcareResult<Vec<PreventiveTip>>;

    fn tip_count(&self) -> MedcareResult<usize>;

    /// Tip at `index` in insertion order.
    fn tip_at(&self, index: usize) -> MedcareResult<Option<PreventiveTip>>;

    fn insert_tip(&self, tip: PreventiveTip) -> MedcareResult<()>;
}

pub(crate) fn disease_name_matches(record: &DiseaseRecord, needle: &NonEmptyText) -> bool {
    needle.is_contained_in(&record.disease_name)
}

pub(crate) fn disease_symptom_matches(record: &DiseaseRecord, needle: &NonEmptyText) -> bool {
    record.symptoms.iter().any(|s| needle.is_contained_in(s))
}

pub(crate) fn tip_matches(tip: &PreventiveTip, needle: &NonEmptyText) -> bool {
    needle.is_contained_in(&tip.title)
        || needle.is_contained_in(&tip.description)
        || needle.is_contained_in(&tip.category)
}

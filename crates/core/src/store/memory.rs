use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use medcare_types::NonEmptyText;

use super::{disease_name_matches, disease_symptom_matches, tip_matches, RecordStore};
use crate::models::{DiseaseRecord, PreventiveTip};
use crate::{MedcareError, MedcareResult};

/// In-memory record store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    diseases: RwLock<Vec<DiseaseRecord>>,
    tips: RwLock<Vec<PreventiveTip>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given collections, keeping their order.
    pub fn with_records(diseases: Vec<DiseaseRecord>, tips: Vec<PreventiveTip>) -> Self {
        Self {
            diseases: RwLock::new(diseases),
            tips: RwLock::new(tips),
        }
    }

    fn diseases(&self) -> MedcareResult<RwLockReadGuard<'_, Vec<DiseaseRecord>>> {
        self.diseases.read().map_err(|_| MedcareError::LockPoisoned)
    }

    fn tips(&self) -> MedcareResult<RwLockReadGuard<'_, Vec<PreventiveTip>>> {
        self.tips.read().map_err(|_| MedcareError::LockPoisoned)
    }

    pub(crate) fn diseases_mut(
        &self,
    ) -> MedcareResult<RwLockWriteGuard<'_, Vec<DiseaseRecord>>> {
        self.diseases.write().map_err(|_| MedcareError::LockPoisoned)
    }

    pub(crate) fn tips_mut(&self) -> MedcareResult<RwLockWriteGuard<'_, Vec<PreventiveTip>>> {
        self.tips.write().map_err(|_| MedcareError::LockPoisoned)
    }
}

impl RecordStore for MemoryStore {
    fn list_diseases(&self) -> MedcareResult<Vec<DiseaseRecord>> {
        Ok(self.diseases()?.clone())
    }

    fn find_disease_by_name(&self, needle: &NonEmptyText) -> MedcareResult<Option<DiseaseRecord>> {
        Ok(self
            .diseases()?
            .iter()
            .find(|r| disease_name_matches(r, needle))
            .cloned())
    }

    fn find_disease_by_symptom(
        &self,
        needle: &NonEmptyText,
    ) -> MedcareResult<Option<DiseaseRecord>> {
        Ok(self
            .diseases()?
            .iter()
            .find(|r| disease_symptom_matches(r, needle))
            .cloned())
    }

    fn insert_disease(&self, record: DiseaseRecord) -> MedcareResult<()> {
        self.diseases_mut()?.push(record);
        Ok(())
    }

    fn list_tips(&self) -> MedcareResult<Vec<PreventiveTip>> {
        Ok(self.tips()?.clone())
    }

    fn search_tips(&self, needle: &NonEmptyText) -> MedcareResult<Vec<PreventiveTip>> {
        Ok(self
            .tips()?
            .iter()
            .filter(|t| tip_matches(t, needle))
            .cloned()
            .collect())
    }

    fn tip_count(&self) -> MedcareResult<usize> {
        Ok(self.tips()?.len())
    }

    fn tip_at(&self, index: usize) -> MedcareResult<Option<PreventiveTip>> {
        Ok(self.tips()?.get(index).cloned())
    }

    fn insert_tip(&self, tip: PreventiveTip) -> MedcareResult<()> {
        self.tips_mut()?.push(tip);
        Ok(())
    }
}

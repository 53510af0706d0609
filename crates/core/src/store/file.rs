//! JSON file-backed store.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//!   diseases.json          # array of DiseaseRecord, insertion order
//!   preventive_tips.json   # array of PreventiveTip, insertion order
//! ```
//!
//! Each insert rewrites the affected collection file via a temporary file and rename, while
//! holding the collection's write lock.

use std::fs;
use std::path::{Path, PathBuf};

use medcare_types::NonEmptyText;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{MemoryStore, RecordStore};
use crate::constants::{DISEASES_FILENAME, TIPS_FILENAME};
use crate::models::{DiseaseRecord, PreventiveTip};
use crate::{MedcareError, MedcareResult};

#[derive(Debug)]
pub struct JsonFileStore {
    data_dir: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Opens (or creates) a store rooted at `data_dir`.
    ///
    /// Missing collection files are treated as empty collections.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or an existing collection file
    /// cannot be read or parsed.
    pub fn open(data_dir: impl Into<PathBuf>) -> MedcareResult<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(MedcareError::DataDirCreation)?;

        let diseases: Vec<DiseaseRecord> = read_collection(&data_dir.join(DISEASES_FILENAME))?;
        let tips: Vec<PreventiveTip> = read_collection(&data_dir.join(TIPS_FILENAME))?;

        tracing::info!(
            "opened record store at {} ({} diseases, {} tips)",
            data_dir.display(),
            diseases.len(),
            tips.len()
        );

        Ok(Self {
            data_dir,
            inner: MemoryStore::with_records(diseases, tips),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn read_collection<T: DeserializeOwned>(path: &Path) -> MedcareResult<Vec<T>> {
    if !path.is_file() {
        return Ok(Vec::new());
    }
    let contents = fs::read_to_string(path).map_err(MedcareError::StorageRead)?;
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&contents).map_err(MedcareError::Deserialization)
}

fn write_collection<T: Serialize>(path: &Path, records: &[T]) -> MedcareResult<()> {
    let json = serde_json::to_string_pretty(records).map_err(MedcareError::Serialization)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(MedcareError::StorageWrite)?;
    fs::rename(&tmp, path).map_err(MedcareError::StorageWrite)
}

impl RecordStore for JsonFileStore {
    fn list_diseases(&self) -> MedcareResult<Vec<DiseaseRecord>> {
        self.inner.list_diseases()
    }

    fn find_disease_by_name(&self, needle: &NonEmptyText) -> MedcareResult<Option<DiseaseRecord>> {
        self.inner.find_disease_by_name(needle)
    }

    fn find_disease_by_symptom(
        &self,
        needle: &NonEmptyText,
    ) -> MedcareResult<Option<DiseaseRecord>> {
        self.inner.find_disease_by_symptom(needle)
    }

    fn insert_disease(&self, record: DiseaseRecord) -> MedcareResult<()> {
        let mut diseases = self.inner.diseases_mut()?;
        diseases.push(record);
        if let Err(e) = write_collection(&self.data_dir.join(DISEASES_FILENAME), &diseases) {
            diseases.pop();
            return Err(e);
        }
        Ok(())
    }

    fn list_tips(&self) -> MedcareResult<Vec<PreventiveTip>> {
        self.inner.list_tips()
    }

    fn search_tips(&self, needle: &NonEmptyText) -> MedcareResult<Vec<PreventiveTip>> {
        self.inner.search_tips(needle)
    }

    fn tip_count(&self) -> MedcareResult<usize> {
        self.inner.tip_count()
    }

    fn tip_at(&self, index: usize) -> MedcareResult<Option<PreventiveTip>> {
        self.inner.tip_at(index)
    }

    fn insert_tip(&self, tip: PreventiveTip) -> MedcareResult<()> {
        let mut tips = self.inner.tips_mut()?;
        tips.push(tip);
        if let Err(e) = write_collection(&self.data_dir.join(TIPS_FILENAME), &tips) {
            tips.pop();
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{disease, tip};
    use tempfile::TempDir;

    #[test]
    fn test_open_on_empty_dir_starts_empty() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = JsonFileStore::open(temp_dir.path().join("data")).unwrap();

        assert!(store.list_diseases().unwrap().is_empty());
        assert_eq!(store.tip_count().unwrap(), 0);
        assert!(store.data_dir().is_dir());
    }

    #[test]
    fn test_inserts_survive_reopen() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        {
            let store = JsonFileStore::open(temp_dir.path()).unwrap();
            store.insert_disease(disease("Fever", &["hot"])).unwrap();
            store.insert_disease(disease("Cold", &["sneeze"])).unwrap();
            store.insert_tip(tip("Wash hands", "Hygiene", "Soap")).unwrap();
        }

        assert!(temp_dir.path().join(DISEASES_FILENAME).is_file());
        assert!(temp_dir.path().join(TIPS_FILENAME).is_file());

        let reopened = JsonFileStore::open(temp_dir.path()).unwrap();
        let names: Vec<String> = reopened
            .list_diseases()
            .unwrap()
            .into_iter()
            .map(|d| d.disease_name)
            .collect();
        assert_eq!(names, vec!["Fever", "Cold"]);
        assert_eq!(reopened.tip_at(0).unwrap().unwrap().title, "Wash hands");
    }

    #[test]
    fn test_open_rejects_corrupt_collection() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(temp_dir.path().join(TIPS_FILENAME), "{not json").unwrap();

        let err = JsonFileStore::open(temp_dir.path()).unwrap_err();
        assert!(matches!(err, MedcareError::Deserialization(_)));
    }
}

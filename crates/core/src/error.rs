#[derive(Debug, thiserror::Error)]
pub enum MedcareError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
    #[error("failed to create data directory: {0}")]
    DataDirCreation(std::io::Error),
    #[error("failed to read store file: {0}")]
    StorageRead(std::io::Error),
    #[error("failed to write store file: {0}")]
    StorageWrite(std::io::Error),
    #[error("failed to serialize records: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize records: {0}")]
    Deserialization(serde_json::Error),
    #[error("failed to deserialize YAML: {0}")]
    YamlDeserialization(serde_yaml::Error),
    #[error("record store lock poisoned")]
    LockPoisoned,
}

pub type MedcareResult<T> = std::result::Result<T, MedcareError>;

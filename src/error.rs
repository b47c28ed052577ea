use std::path::PathBuf;
use thiserror::Error;

/// Failure to load or validate the people and zone seed data
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid seed file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("duplicate person id `{0}`")]
    DuplicatePerson(String),

    #[error("duplicate zone id `{0}`")]
    DuplicateZone(String),

    #[error("zone `{zone}` has an invalid order `{value}`")]
    InvalidOrder { zone: String, value: String },
}

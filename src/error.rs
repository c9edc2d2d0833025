use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("preference storage is unavailable")]
    Unavailable,
    #[error("preference storage rejected write for `{key}`")]
    WriteRejected { key: String },
}

#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("locale catalog `{language}` is not valid JSON: {source}")]
    InvalidJson {
        language: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("locale catalog `{language}` must be a JSON object at the root")]
    NotAnObject { language: &'static str },
}

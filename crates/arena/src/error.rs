use thiserror::Error;

/// Errors from arena files and engine selection
#[derive(Error, Debug)]
pub enum ArenaError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode or decode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse arena config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("unknown engine `{0}`")]
    UnknownEngine(String),
}

impl ArenaError {
    pub(crate) fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        ArenaError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Content pool is empty")]
    EmptyPool,

    #[error("Content pool too small for {game}: need {required} templates, got {available}")]
    PoolTooSmall {
        game: &'static str,
        required: usize,
        available: usize,
    },

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Config parse error: {0}")]
    ConfigParseError(String),

    #[error("Content parse error: {0}")]
    ContentParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::ConfigParseError(e.message().to_string())
    }
}

impl Error {
    /// Build a `PoolTooSmall` error unless `available` satisfies `required`.
    pub(crate) fn check_pool(game: &'static str, required: usize, available: usize) -> Result<()> {
        if available == 0 {
            return Err(Error::EmptyPool);
        }
        if available < required {
            return Err(Error::PoolTooSmall {
                game,
                required,
                available,
            });
        }
        Ok(())
    }
}

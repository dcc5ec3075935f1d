use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Insert matched an existing row on all nine provider-derived fields.
    #[error("\"{title}\" is already in the library")]
    Duplicate { title: String },

    /// Exact-title lookup matched zero rows.
    #[error("couldn't find \"{title}\" in the library")]
    NotFound { title: String },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn duplicate(title: impl Into<String>) -> Self {
        Self::Duplicate {
            title: title.into(),
        }
    }

    pub fn not_found(title: impl Into<String>) -> Self {
        Self::NotFound {
            title: title.into(),
        }
    }
}

use clinic_types::TextError;

#[derive(Debug, thiserror::Error)]
pub enum ClinicError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("{kind} already exists: {id}")]
    DuplicateId { kind: &'static str, id: String },
    #[error("{label} has already been added")]
    DuplicateMetric { label: &'static str },
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("missing or unknown bearer token")]
    Unauthorised,
    #[error("not allowed: {0}")]
    Forbidden(String),
    #[error("{0} lock poisoned")]
    LockPoisoned(&'static str),

    #[error("failed to read seed file: {0}")]
    SeedRead(std::io::Error),
    #[error("invalid seed data at {path}: {source}")]
    SeedParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl From<TextError> for ClinicError {
    fn from(err: TextError) -> Self {
        ClinicError::InvalidInput(err.to_string())
    }
}

pub type ClinicResult<T> = std::result::Result<T, ClinicError>;

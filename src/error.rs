/// Error types shared by the storage, account, catalog and pagination layers
use std::collections::BTreeMap;
use std::fmt;

/// Failure of the persistent store. Fatal for the operation that triggered it.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read `{key}`: {reason}")]
    Read { key: String, reason: String },

    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },

    #[error("failed to serialize `{key}`: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("stored value for `{key}` is malformed: {source}")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Registration form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
        };
        f.write_str(name)
    }
}

/// Per-field validation messages from the registration form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.fields.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.fields.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("invalid registration: {0}")]
    Invalid(ValidationErrors),

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error(transparent)]
    Persistence(#[from] StoreError),
}

impl RegisterError {
    /// Message to show next to a form field, if the error belongs to one
    pub fn field_message(&self, field: Field) -> Option<String> {
        match self {
            RegisterError::Invalid(errors) => errors.get(field).map(str::to_string),
            RegisterError::EmailAlreadyRegistered if field == Field::Email => {
                Some(self.to_string())
            }
            _ => None,
        }
    }
}

/// Login failure. Never says which of email or password was wrong.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Persistence(#[from] StoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("no category with id `{0}`")]
    NotFound(String),

    #[error(transparent)]
    Persistence(#[from] StoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("no randomness source: {0}")]
    Entropy(getrandom::Error),

    #[error(transparent)]
    Persistence(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    #[error("page {0} is not offered by the page controls")]
    PageNotOffered(usize),
}

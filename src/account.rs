/// Account registry: registration, login and the single active session
///
/// Credentials are stored as entered and compared exactly. There is no
/// hashing; this shell has no backend and makes no security claims.

use crate::config::{ACCOUNTS_KEY, PENDING_VERIFICATION_KEY, SESSION_KEY, ShellConfig};
use crate::error::{
    Field, LoginError, RegisterError, StoreError, ValidationErrors, VerificationError,
};
use crate::storage::PersistentStore;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid email regex"));

/// A registered user. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "name")]
    pub display_name: String,
    pub email: String,
    #[serde(rename = "password")]
    pub secret: String,
}

/// Identity of the logged-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "name")]
    pub display_name: String,
    pub email: String,
}

impl Session {
    fn of(account: &Account) -> Self {
        Session {
            display_name: account.display_name.clone(),
            email: account.email.clone(),
        }
    }

    /// Header greeting, e.g. "Hi, Ann"
    pub fn greeting(&self) -> String {
        let name = self.display_name.trim();
        if name.is_empty() {
            "Hi, User".to_string()
        } else {
            format!("Hi, {}", name)
        }
    }
}

/// Verification code issued after registration. Delivery is out of scope;
/// the code is written to the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingVerification {
    pub email: String,
    pub code: String,
}

/// Check the registration form. Every failing field gets a message.
pub fn validate_registration(
    display_name: &str,
    email: &str,
    secret: &str,
    min_password_len: usize,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if display_name.trim().is_empty() {
        errors.add(Field::Name, "Name is required");
    }

    if email.trim().is_empty() {
        errors.add(Field::Email, "Email is required");
    } else if !EMAIL_RE.is_match(email) {
        errors.add(Field::Email, "Email is invalid");
    }

    if secret.trim().is_empty() {
        errors.add(Field::Password, "Password is required");
    } else if secret.chars().count() < min_password_len {
        errors.add(
            Field::Password,
            format!("Password must be at least {} characters", min_password_len),
        );
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[derive(Clone, PartialEq)]
pub struct AccountRegistry {
    store: PersistentStore,
    min_password_len: usize,
}

impl AccountRegistry {
    pub fn new(store: PersistentStore) -> Self {
        Self::with_config(store, &ShellConfig::default())
    }

    pub fn with_config(store: PersistentStore, config: &ShellConfig) -> Self {
        AccountRegistry {
            store,
            min_password_len: config.min_password_len,
        }
    }

    /// All registered accounts in registration order
    pub fn accounts(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self.store.read(ACCOUNTS_KEY)?.unwrap_or_default())
    }

    /// Register a new account. Does not log the user in.
    pub fn register(
        &self,
        display_name: &str,
        email: &str,
        secret: &str,
    ) -> Result<(), RegisterError> {
        validate_registration(display_name, email, secret, self.min_password_len)
            .map_err(RegisterError::Invalid)?;

        self.store.update(ACCOUNTS_KEY, |accounts: &mut Vec<Account>| {
            if accounts.iter().any(|a| a.email == email) {
                log::warn!("register: {} is already registered", email);
                return Err(RegisterError::EmailAlreadyRegistered);
            }
            accounts.push(Account {
                display_name: display_name.to_string(),
                email: email.to_string(),
                secret: secret.to_string(),
            });
            Ok(())
        })?;

        log::info!("register: created account for {}", email);
        Ok(())
    }

    /// Start a session for the account matching `email` and `secret`,
    /// replacing any previous session.
    pub fn login(&self, email: &str, secret: &str) -> Result<Session, LoginError> {
        let accounts = self.accounts()?;
        let Some(account) = accounts
            .iter()
            .find(|a| a.email == email && a.secret == secret)
        else {
            log::warn!("login: rejected credentials for {}", email);
            return Err(LoginError::InvalidCredentials);
        };

        let session = Session::of(account);
        self.store.write(SESSION_KEY, &session)?;
        log::info!("login: session started for {}", session.email);
        Ok(session)
    }

    /// End the session. Succeeds when nobody is logged in.
    pub fn logout(&self) -> Result<(), StoreError> {
        self.store.remove(SESSION_KEY)?;
        log::info!("logout: session cleared");
        Ok(())
    }

    pub fn current_session(&self) -> Result<Option<Session>, StoreError> {
        self.store.read(SESSION_KEY)
    }

    pub fn is_authenticated(&self) -> Result<bool, StoreError> {
        Ok(self.current_session()?.is_some())
    }

    /// Issue an 8-digit verification code for `email`, replacing any pending one
    pub fn issue_verification(&self, email: &str) -> Result<PendingVerification, VerificationError> {
        let mut buf = [0u8; 4];
        getrandom::getrandom(&mut buf).map_err(VerificationError::Entropy)?;
        let code = 10_000_000 + u32::from_le_bytes(buf) % 90_000_000;

        let pending = PendingVerification {
            email: email.to_string(),
            code: code.to_string(),
        };
        self.store.write(PENDING_VERIFICATION_KEY, &pending)?;
        log::info!("verification code for {}: {}", pending.email, pending.code);
        Ok(pending)
    }

    pub fn pending_verification(&self) -> Result<Option<PendingVerification>, StoreError> {
        self.store.read(PENDING_VERIFICATION_KEY)
    }

    /// Clear the pending verification if `code` matches it
    pub fn confirm_verification(&self, code: &str) -> Result<bool, StoreError> {
        match self.pending_verification()? {
            Some(pending) if pending.code == code.trim() => {
                self.store.remove(PENDING_VERIFICATION_KEY)?;
                log::info!("verification: confirmed {}", pending.email);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

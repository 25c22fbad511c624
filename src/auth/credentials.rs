use anyhow::{Context, Result};
use keyring::Entry;

/// Keychain service name shared by all stored admin accounts
const SERVICE_NAME: &str = "dispatch-admin";

/// OS keychain storage for admin credentials, used by the remember-me login
/// path. The session tokens themselves are never stored here; only the
/// password needed to obtain a fresh pair.
pub struct CredentialStore;

impl CredentialStore {
    /// Store the admin's password in the OS keychain
    pub fn store(username: &str, password: &str) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, username)
            .context("Failed to create keyring entry")?;
        entry
            .set_password(password)
            .context("Failed to store password in keychain")?;
        Ok(())
    }

    /// Retrieve the stored password for an admin username
    pub fn get_password(username: &str) -> Result<String> {
        let entry = Entry::new(SERVICE_NAME, username)
            .context("Failed to create keyring entry")?;
        entry
            .get_password()
            .context("Failed to retrieve password from keychain")
    }

    /// Remove the stored password. Missing entries are not an error, so
    /// forgetting an account is idempotent.
    pub fn forget(username: &str) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, username)
            .context("Failed to create keyring entry")?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete credential from keychain"),
        }
    }

    /// Check whether a password is stored for this username
    pub fn has_credentials(username: &str) -> bool {
        match Entry::new(SERVICE_NAME, username) {
            Ok(entry) => entry.get_password().is_ok(),
            Err(_) => false,
        }
    }
}

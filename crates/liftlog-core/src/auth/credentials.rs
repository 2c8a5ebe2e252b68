use anyhow::{Context, Result};
use keyring::Entry;

/// Keychain service name for stored account passwords
const SERVICE_NAME: &str = "liftlog";

/// Optional OS-keychain storage for the account password, so an expired
/// session can be re-established without retyping. Tokens never go here;
/// they live in the `TokenStore`.
pub struct CredentialStore;

impl CredentialStore {
    /// Save the password for a username in the OS keychain
    pub fn store(username: &str, password: &str) -> Result<()> {
        let entry =
            Entry::new(SERVICE_NAME, username).context("Failed to create keyring entry")?;
        entry
            .set_password(password)
            .context("Failed to store password in keychain")?;
        Ok(())
    }

    /// Look up the stored password for a username
    pub fn get_password(username: &str) -> Result<String> {
        let entry =
            Entry::new(SERVICE_NAME, username).context("Failed to create keyring entry")?;
        entry
            .get_password()
            .context("Failed to retrieve password from keychain")
    }

    /// Remove the stored password for a username
    pub fn delete(username: &str) -> Result<()> {
        let entry =
            Entry::new(SERVICE_NAME, username).context("Failed to create keyring entry")?;
        entry
            .delete_credential()
            .context("Failed to delete credential from keychain")?;
        Ok(())
    }

    /// Whether a password is stored for this username
    pub fn has_credentials(username: &str) -> bool {
        Entry::new(SERVICE_NAME, username)
            .map(|entry| entry.get_password().is_ok())
            .unwrap_or(false)
    }
}

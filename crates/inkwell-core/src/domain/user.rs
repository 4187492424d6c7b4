use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Display name given to every guest account.
pub const GUEST_NAME: &str = "Guest User";

const GUEST_EMAIL_DOMAIN: &str = "inkwell.guest";

/// User entity - a guest account bound to one device identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user about to be inserted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    /// A guest account for the given device.
    pub fn guest(device_id: &str, password_hash: String) -> Self {
        Self {
            name: GUEST_NAME.to_string(),
            email: guest_email(device_id),
            password_hash,
        }
    }
}

/// Deterministic email for the guest account owning `device_id`.
///
/// The same device identifier always maps to the same address, which is
/// what makes guest sign-in idempotent.
pub fn guest_email(device_id: &str) -> String {
    let digest = Sha256::digest(device_id.as_bytes());
    let hex = hex::encode(digest);
    format!("guest_{}@{GUEST_EMAIL_DOMAIN}", &hex[..32])
}

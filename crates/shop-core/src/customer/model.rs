//! Customer account models.

use serde::{Deserialize, Serialize};

/// A customer account as exposed to clients. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: i64,
    pub name: String,
    pub address: String,
}

//! Customer registration and authentication.

pub mod model;
pub mod password;

use tracing::{debug, info};

use crate::error::{require_non_empty, ShopResult};
use crate::store::CustomerAccounts;
use model::CustomerRecord;

/// Number of customers returned by the listing endpoint.
pub const DEFAULT_LIST_LIMIT: usize = 10;

/// Register a new customer. The password is stored as an Argon2id hash.
///
/// Fails with `ShopError::Conflict` if the name is already registered.
pub async fn register(
    accounts: &dyn CustomerAccounts,
    name: &str,
    address: &str,
    password: &str,
) -> ShopResult<CustomerRecord> {
    require_non_empty("c_name", name)?;
    require_non_empty("c_password", password)?;

    let hash = password::hash_in_background(password).await?;
    let customer = accounts.insert(name, address, &hash).await?;

    info!(customer_id = customer.id, name = %customer.name, "Registered customer");
    Ok(customer)
}

/// Return the customer only when name and password both match.
pub async fn authenticate(
    accounts: &dyn CustomerAccounts,
    name: &str,
    password: &str,
) -> ShopResult<Option<CustomerRecord>> {
    require_non_empty("c_name", name)?;
    require_non_empty("c_password", password)?;

    let (customer, hash) = match accounts.find_with_hash(name).await? {
        Some((customer, hash)) => (Some(customer), Some(hash)),
        None => (None, None),
    };

    // Unknown names still pay for a full verify.
    let matches = password::verify_in_background(password, hash).await?;

    match customer {
        Some(customer) if matches => Ok(Some(customer)),
        Some(_) => {
            debug!(name, "Password mismatch");
            Ok(None)
        }
        None => {
            debug!(name, "Login for unknown customer");
            Ok(None)
        }
    }
}

/// List up to `limit` customers.
pub async fn list(accounts: &dyn CustomerAccounts, limit: usize) -> ShopResult<Vec<CustomerRecord>> {
    accounts.list(limit).await
}

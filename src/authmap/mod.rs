//! Interfaces for mapping IAM roles to Kubernetes identities.
//!
//! Only the decision logic lives here; where the mappings are stored is up
//! to the [`AuthMapStore`] implementation.

mod models;
mod store;

use tracing::{info, warn};

pub use models::{AuthMapDocument, MapRole};
pub use store::{AuthMapStore, FileAuthMap};

#[derive(thiserror::Error, Debug)]
pub enum AuthMapError {
    #[error("--{0} must be set")]
    MustBeSet(&'static str),
    #[error("'{0}' is not an IAM role ARN")]
    InvalidRoleArn(String),
    #[error("identity mapping needs at least one group")]
    NoGroups,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Append `role` to the cluster's mappings and save them.
///
/// Existing entries for the same role ARN are kept; the authenticator only
/// honours the last one, so they are shadowed. Returns how many were.
pub async fn create_identity_mapping<S>(
    store: &mut S,
    cluster: &str,
    role: MapRole,
) -> Result<usize, AuthMapError>
where
    S: AuthMapStore + ?Sized,
{
    if role.role_arn.is_empty() {
        return Err(AuthMapError::MustBeSet("role"));
    }
    if cluster.is_empty() {
        return Err(AuthMapError::MustBeSet("cluster"));
    }
    role.validate()?;

    let shadowed = store
        .roles()
        .await?
        .iter()
        .filter(|r| r.role_arn == role.role_arn)
        .count();
    if shadowed > 0 {
        warn!(
            "found {shadowed} mappings with same role {:?} (which will be shadowed by your new mapping)",
            role.role_arn
        );
    }

    info!(cluster, role = %role.role_arn, username = %role.username, "adding identity mapping");
    store.add_role(role).await?;
    store.save().await?;
    Ok(shadowed)
}

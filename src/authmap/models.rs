use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::AuthMapError;

fn role_arn_regex() -> &'static Regex {
    static ROLE_ARN_RE: OnceLock<Regex> = OnceLock::new();
    ROLE_ARN_RE.get_or_init(|| {
        Regex::new(r"^arn:aws(?:-[a-z]+)*:iam::[0-9]{12}:role/[A-Za-z0-9_+=,.@/-]+$")
            .expect("invalid IAM role ARN regex")
    })
}

/// Maps an IAM role to a Kubernetes user and its groups.
///
/// Field names follow the `mapRoles` records of the cluster's auth document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapRole {
    #[serde(rename = "rolearn")]
    pub role_arn: String,
    pub username: String,
    #[serde(default)]
    pub groups: Vec<String>,
}

impl MapRole {
    pub fn new(
        role_arn: impl Into<String>,
        username: impl Into<String>,
        groups: Vec<String>,
    ) -> Self {
        Self {
            role_arn: role_arn.into(),
            username: username.into(),
            groups,
        }
    }

    pub fn validate(&self) -> Result<(), AuthMapError> {
        if self.role_arn.is_empty() {
            return Err(AuthMapError::MustBeSet("role"));
        }
        if !role_arn_regex().is_match(&self.role_arn) {
            return Err(AuthMapError::InvalidRoleArn(self.role_arn.clone()));
        }
        if self.username.is_empty() {
            return Err(AuthMapError::MustBeSet("username"));
        }
        if self.groups.iter().all(|g| g.is_empty()) {
            return Err(AuthMapError::NoGroups);
        }
        Ok(())
    }
}

/// On-disk shape of the auth document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthMapDocument {
    #[serde(rename = "mapRoles", default)]
    pub map_roles: Vec<MapRole>,
}

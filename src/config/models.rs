use serde::{Deserialize, Serialize};

/// Tool settings; serde is confined to this module tree.
///
/// Every field is optional: a missing value falls through to the command
/// line flag or, failing that, the interactive picker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub(crate) region: Option<String>,
    pub(crate) version: Option<String>,
    pub(crate) instance_type: Option<String>,
    pub(crate) image_family: Option<String>,
    pub(crate) log_level: Option<String>,
}

impl Settings {
    // Borrowing getters (no clones).
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn instance_type(&self) -> Option<&str> {
        self.instance_type.as_deref()
    }

    pub fn image_family(&self) -> Option<&str> {
        self.image_family.as_deref()
    }

    /// Tracing filter directive, e.g. `debug` or `eks_ami_resolver=trace`.
    pub fn log_level(&self) -> Option<&str> {
        self.log_level.as_deref()
    }
}

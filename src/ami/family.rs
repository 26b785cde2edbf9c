use std::fmt;
use std::str::FromStr;

/// Supported OS image families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImageFamily {
    AmazonLinux2,
    Ubuntu1804,
}

impl ImageFamily {
    pub const ALL: [ImageFamily; 2] = [ImageFamily::AmazonLinux2, ImageFamily::Ubuntu1804];

    /// Canonical name, as callers spell it.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFamily::AmazonLinux2 => "AmazonLinux2",
            ImageFamily::Ubuntu1804 => "Ubuntu1804",
        }
    }

    /// Whether images of this family are published with accelerator drivers.
    pub fn supports_accelerators(&self) -> bool {
        matches!(self, ImageFamily::AmazonLinux2)
    }
}

impl fmt::Display for ImageFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown image family '{0}'")]
pub struct UnknownImageFamily(pub String);

impl FromStr for ImageFamily {
    type Err = UnknownImageFamily;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s).ok_or_else(|| UnknownImageFamily(s.to_string()))
    }
}

/// Exact, case-sensitive match against the supported family names.
pub fn normalize(name: &str) -> Option<ImageFamily> {
    ImageFamily::ALL.into_iter().find(|f| f.as_str() == name)
}

#[cfg(test)]
mod tests {
    use super::{ImageFamily, UnknownImageFamily, normalize};

    #[test]
    fn known_names_normalize() {
        assert_eq!(normalize("AmazonLinux2"), Some(ImageFamily::AmazonLinux2));
        assert_eq!(normalize("Ubuntu1804"), Some(ImageFamily::Ubuntu1804));
    }

    #[test]
    fn matching_is_exact() {
        for name in ["amazonlinux2", "AmazonLinux2 ", "Ubuntu", "ubuntu1804", ""] {
            assert_eq!(normalize(name), None, "{name:?}");
        }
    }

    #[test]
    fn from_str_reports_the_raw_name() {
        let err = "Bottlerocket".parse::<ImageFamily>().unwrap_err();
        assert_eq!(err, UnknownImageFamily("Bottlerocket".to_string()));
        assert_eq!(err.to_string(), "unknown image family 'Bottlerocket'");
    }

    #[test]
    fn display_round_trips_every_family() {
        for family in ImageFamily::ALL {
            assert_eq!(family.to_string().parse::<ImageFamily>(), Ok(family));
        }
    }

    #[test]
    fn only_amazon_linux_carries_drivers() {
        assert!(ImageFamily::AmazonLinux2.supports_accelerators());
        assert!(!ImageFamily::Ubuntu1804.supports_accelerators());
    }
}

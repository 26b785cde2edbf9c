use std::fmt;

/// Instance families that ship accelerator hardware and need a
/// driver-enabled image.
const ACCELERATED_FAMILIES: &[&str] = &["p2", "p3", "g3", "g4dn"];

/// Capability class of an instance type, derived from its family prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CapabilityClass {
    Standard,
    Accelerated,
}

impl CapabilityClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityClass::Standard => "standard",
            CapabilityClass::Accelerated => "accelerated",
        }
    }
}

impl fmt::Display for CapabilityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Family prefix of an instance type, e.g. `g4dn` for `g4dn.xlarge`.
/// Without a `.` the whole string is the prefix.
pub fn family_prefix(instance_type: &str) -> &str {
    instance_type
        .split_once('.')
        .map(|(family, _)| family)
        .unwrap_or(instance_type)
}

/// Classify an instance type. Unknown or malformed types are `Standard`.
pub fn classify(instance_type: &str) -> CapabilityClass {
    if ACCELERATED_FAMILIES.contains(&family_prefix(instance_type)) {
        CapabilityClass::Accelerated
    } else {
        CapabilityClass::Standard
    }
}

#[cfg(test)]
mod tests {
    use super::{CapabilityClass, classify, family_prefix};
    use proptest::prelude::*;

    #[test]
    fn prefix_stops_at_first_dot() {
        assert_eq!(family_prefix("g4dn.xlarge"), "g4dn");
        assert_eq!(family_prefix("p3.2xlarge.extra"), "p3");
    }

    #[test]
    fn prefix_without_separator_is_whole_string() {
        assert_eq!(family_prefix("p2"), "p2");
        assert_eq!(family_prefix(""), "");
    }

    #[test]
    fn accelerator_families_are_accelerated() {
        for it in ["p2.xlarge", "p3.2xlarge", "g3.4xlarge", "g4dn.xlarge", "p3"] {
            assert_eq!(classify(it), CapabilityClass::Accelerated, "{it}");
        }
    }

    #[test]
    fn everything_else_is_standard() {
        for it in ["t2.medium", "m5.large", "g4.xlarge", "P2.xlarge", "xp2.large", "", "."] {
            assert_eq!(classify(it), CapabilityClass::Standard, "{it}");
        }
    }

    proptest! {
        #[test]
        fn classify_is_total_and_stable(instance_type in ".*") {
            let first = classify(&instance_type);
            prop_assert_eq!(first, classify(&instance_type));
        }

        #[test]
        fn size_suffix_does_not_change_class(size in "[a-z0-9]{1,8}") {
            prop_assert_eq!(classify(&format!("p2.{size}")), CapabilityClass::Accelerated);
            prop_assert_eq!(classify(&format!("t3.{size}")), CapabilityClass::Standard);
        }
    }
}

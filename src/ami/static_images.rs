use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use super::CapabilityClass::{self, Accelerated, Standard};
use super::ImageFamily::{self, AmazonLinux2, Ubuntu1804};

/// One compiled table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageEntry {
    pub version: &'static str,
    pub family: ImageFamily,
    pub class: CapabilityClass,
    pub region: &'static str,
    pub image: &'static str,
}

const fn entry(
    version: &'static str,
    family: ImageFamily,
    class: CapabilityClass,
    region: &'static str,
    image: &'static str,
) -> ImageEntry {
    ImageEntry {
        version,
        family,
        class,
        region,
        image,
    }
}

const IMAGES: &[ImageEntry] = &[
    // 1.12, EKS-optimized Amazon Linux 2
    entry("1.12", AmazonLinux2, Standard, "eu-west-1", "ami-0a6be9528ebb8999d"),
    entry("1.12", AmazonLinux2, Standard, "us-east-1", "ami-0259ce67309f76e0b"),
    entry("1.12", AmazonLinux2, Standard, "us-west-2", "ami-0315dd35bf204311d"),
    // 1.12, EKS-optimized Amazon Linux 2 with GPU drivers
    entry("1.12", AmazonLinux2, Accelerated, "eu-west-1", "ami-049574de1981b69dc"),
    entry("1.12", AmazonLinux2, Accelerated, "us-east-1", "ami-0585963de7ab8b964"),
    entry("1.12", AmazonLinux2, Accelerated, "us-west-2", "ami-04f40a6dd1cd12b3c"),
    // 1.12, Canonical EKS Ubuntu 18.04
    entry("1.12", Ubuntu1804, Standard, "eu-west-1", "ami-0ac97cadeed862a54"),
    entry("1.12", Ubuntu1804, Standard, "us-east-1", "ami-058c6e6f18b1cca2c"),
    entry("1.12", Ubuntu1804, Standard, "us-west-2", "ami-0551b6dc0b4079e1d"),
];

type RegionImages = HashMap<&'static str, &'static str>;
type ClassImages = HashMap<CapabilityClass, RegionImages>;
type FamilyImages = HashMap<ImageFamily, ClassImages>;
type ImageIndex = HashMap<&'static str, FamilyImages>;

/// Built exactly once, read-only afterwards.
static INDEX: OnceLock<ImageIndex> = OnceLock::new();

fn index() -> &'static ImageIndex {
    INDEX.get_or_init(|| {
        let mut index = ImageIndex::new();
        for e in IMAGES {
            index
                .entry(e.version)
                .or_default()
                .entry(e.family)
                .or_default()
                .entry(e.class)
                .or_default()
                .insert(e.region, e.image);
        }
        index
    })
}

/// Exact-match descent: version, family, class, region.
pub fn lookup(
    family: ImageFamily,
    class: CapabilityClass,
    version: &str,
    region: &str,
) -> Option<&'static str> {
    index()
        .get(version)?
        .get(&family)?
        .get(&class)?
        .get(region)
        .copied()
}

/// Every compiled row, ordered by version, family, class, then region.
pub fn entries() -> Vec<ImageEntry> {
    let mut all = IMAGES.to_vec();
    all.sort_by(|a, b| {
        a.version
            .cmp(b.version)
            .then_with(|| a.family.cmp(&b.family))
            .then_with(|| a.class.cmp(&b.class))
            .then_with(|| a.region.cmp(b.region))
    });
    all
}

/// Platform versions with at least one image.
pub fn versions() -> Vec<&'static str> {
    index()
        .keys()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Regions that have an image for the given combination, sorted.
pub fn regions(version: &str, family: ImageFamily, class: CapabilityClass) -> Vec<&'static str> {
    index()
        .get(version)
        .and_then(|f| f.get(&family))
        .and_then(|c| c.get(&class))
        .map(|r| r.keys().copied().collect::<BTreeSet<_>>().into_iter().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_row_is_reachable() {
        for e in IMAGES {
            assert_eq!(lookup(e.family, e.class, e.version, e.region), Some(e.image));
        }
    }

    #[test]
    fn keys_are_unique_and_images_non_empty() {
        let mut seen = HashSet::new();
        for e in IMAGES {
            assert!(!e.image.is_empty(), "{e:?}");
            assert!(
                seen.insert((e.version, e.family, e.class, e.region)),
                "duplicate key {e:?}"
            );
        }
    }

    #[test]
    fn accelerated_rows_only_for_driver_families() {
        for e in IMAGES.iter().filter(|e| e.class == Accelerated) {
            assert!(e.family.supports_accelerators(), "{e:?}");
        }
    }

    #[test]
    fn version_must_match_exactly() {
        assert_eq!(lookup(AmazonLinux2, Standard, "1.12.0", "us-west-2"), None);
        assert_eq!(lookup(AmazonLinux2, Standard, "1.1", "us-west-2"), None);
        assert_eq!(lookup(AmazonLinux2, Standard, " 1.12", "us-west-2"), None);
    }

    #[test]
    fn missing_levels_return_none() {
        assert_eq!(lookup(AmazonLinux2, Standard, "1.12", "sa-east-1"), None);
        assert_eq!(lookup(Ubuntu1804, Accelerated, "1.12", "us-east-1"), None);
        assert_eq!(lookup(AmazonLinux2, Standard, "9.99", "us-east-1"), None);
    }

    #[test]
    fn enumeration_is_sorted_and_complete() {
        let all = entries();
        assert_eq!(all.len(), IMAGES.len());
        assert_eq!(versions(), vec!["1.12"]);
        assert_eq!(
            regions("1.12", AmazonLinux2, Accelerated),
            vec!["eu-west-1", "us-east-1", "us-west-2"]
        );
        assert!(regions("1.12", Ubuntu1804, Accelerated).is_empty());
        assert_eq!(all[0].region, "eu-west-1");
        assert_eq!(all[0].family, AmazonLinux2);
        assert_eq!(all[0].class, Standard);
    }
}

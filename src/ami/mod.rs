//! Static EKS node image resolution.
//!
//! [`resolve`] turns `(region, version, instance type, image family)` into the
//! id of a pre-baked AMI, or a [`FailedResolution`] naming the request.

mod error;
mod family;
mod instance;
pub mod static_images;
mod static_resolver;

use std::sync::OnceLock;

use tracing::debug;

pub use error::FailedResolution;
pub use family::{ImageFamily, UnknownImageFamily, normalize};
pub use instance::{CapabilityClass, classify, family_prefix};
pub use static_resolver::StaticResolver;

/// A request after family normalisation and instance classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverQuery<'a> {
    pub region: &'a str,
    pub version: &'a str,
    pub instance_type: &'a str,
    pub family: ImageFamily,
    pub class: CapabilityClass,
}

/// One resolution strategy. `None` means "no match here, try the next one".
pub trait Resolver: Send + Sync {
    fn name(&self) -> &'static str;

    fn resolve(&self, query: &ResolverQuery<'_>) -> Option<String>;
}

/// Ordered strategies; the first match wins.
#[derive(Default)]
pub struct ResolverChain {
    resolvers: Vec<Box<dyn Resolver>>,
}

impl ResolverChain {
    pub fn new(resolvers: Vec<Box<dyn Resolver>>) -> Self {
        Self { resolvers }
    }

    /// Append a strategy tried after every existing one.
    pub fn push(&mut self, resolver: impl Resolver + 'static) -> &mut Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    pub fn resolve(
        &self,
        region: &str,
        version: &str,
        instance_type: &str,
        image_family: &str,
    ) -> Result<String, FailedResolution> {
        let failed = || FailedResolution::new(region, version, instance_type, image_family);

        let Some(family) = normalize(image_family) else {
            debug!(image_family, "unknown image family");
            return Err(failed());
        };

        let query = ResolverQuery {
            region,
            version,
            instance_type,
            family,
            class: classify(instance_type),
        };

        for resolver in &self.resolvers {
            match resolver.resolve(&query) {
                Some(image) if !image.is_empty() => {
                    debug!(resolver = resolver.name(), %image, ?query, "resolved image");
                    return Ok(image);
                }
                _ => debug!(resolver = resolver.name(), ?query, "no match"),
            }
        }

        Err(failed())
    }
}

/// The built-in strategies in priority order.
pub fn default_resolvers() -> ResolverChain {
    let mut chain = ResolverChain::default();
    chain.push(StaticResolver);
    chain
}

static DEFAULT_CHAIN: OnceLock<ResolverChain> = OnceLock::new();

/// Resolve with [`default_resolvers`].
pub fn resolve(
    region: &str,
    version: &str,
    instance_type: &str,
    image_family: &str,
) -> Result<String, FailedResolution> {
    DEFAULT_CHAIN
        .get_or_init(default_resolvers)
        .resolve(region, version, instance_type, image_family)
}

use super::{Resolver, ResolverQuery, static_images};

/// Resolves against the compiled image table.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticResolver;

impl Resolver for StaticResolver {
    fn name(&self) -> &'static str {
        "static"
    }

    fn resolve(&self, query: &ResolverQuery<'_>) -> Option<String> {
        static_images::lookup(query.family, query.class, query.version, query.region)
            .map(str::to_string)
    }
}

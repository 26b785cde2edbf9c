/// No compiled image matches the request.
///
/// Carries the four inputs exactly as the caller supplied them, so an expected
/// failure can be built directly and compared with `==`. The outcome depends
/// only on compiled data: retrying the same request yields the same failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[error(
    "Unable to determine AMI to use: unable to resolve AMI for region {region}, version {version}, instance type {instance_type} & image family {image_family}"
)]
pub struct FailedResolution {
    region: String,
    version: String,
    instance_type: String,
    image_family: String,
}

impl FailedResolution {
    pub fn new(
        region: impl Into<String>,
        version: impl Into<String>,
        instance_type: impl Into<String>,
        image_family: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            version: version.into(),
            instance_type: instance_type.into(),
            image_family: image_family.into(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn instance_type(&self) -> &str {
        &self.instance_type
    }

    /// The family name as supplied, before normalisation.
    pub fn image_family(&self) -> &str {
        &self.image_family
    }
}

#[cfg(test)]
mod tests {
    use super::FailedResolution;

    #[test]
    fn message_embeds_fields_in_order() {
        let err = FailedResolution::new("sa-east-1", "1.12", "t2.medium", "AmazonLinux2");
        assert_eq!(
            err.to_string(),
            "Unable to determine AMI to use: unable to resolve AMI for region sa-east-1, \
             version 1.12, instance type t2.medium & image family AmazonLinux2"
        );
    }

    #[test]
    fn equality_is_field_wise() {
        let a = FailedResolution::new("us-east-1", "1.12", "p2.xlarge", "Ubuntu1804");
        assert_eq!(a, FailedResolution::new("us-east-1", "1.12", "p2.xlarge", "Ubuntu1804"));
        assert_ne!(a, FailedResolution::new("us-east-1", "1.12", "p3.2xlarge", "Ubuntu1804"));
        assert_ne!(a, FailedResolution::new("us-east-1", "1.13", "p2.xlarge", "Ubuntu1804"));
    }

    #[test]
    fn accessors_return_raw_inputs() {
        let err = FailedResolution::new("eu-east-1", "1.12", "p3.2xlarge", "amazonlinux2");
        assert_eq!(err.region(), "eu-east-1");
        assert_eq!(err.version(), "1.12");
        assert_eq!(err.instance_type(), "p3.2xlarge");
        assert_eq!(err.image_family(), "amazonlinux2");
    }
}

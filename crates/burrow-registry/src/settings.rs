use burrow_core::ValidityMinutes;
use typed_builder::TypedBuilder;

pub const DEFAULT_MAX_GENERATION_ATTEMPTS: usize = 1_000;

/// Configures a [`RegistryService`](crate::RegistryService) instance.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RegistrySettings {
    /// Origin joined with `/` and the short code to build display URLs.
    #[builder(setter(into))]
    pub base_url: String,
    /// Upper bound on generator calls per `create` before giving up.
    #[builder(default = DEFAULT_MAX_GENERATION_ATTEMPTS)]
    pub max_generation_attempts: usize,
    /// Validity applied when the caller does not pass one.
    #[builder(default)]
    pub default_validity: ValidityMinutes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let settings = RegistrySettings::builder()
            .base_url("https://bur.row")
            .build();

        assert_eq!(settings.base_url, "https://bur.row");
        assert_eq!(settings.max_generation_attempts, 1_000);
        assert_eq!(settings.default_validity.get(), 30);
    }
}

use std::collections::BTreeSet;
use tessera_domain::config::RegistrationDecl;
use tessera_domain::{FeatureName, LegacyFeatures};

/// Which features an entity asks for.
///
/// The enabled set is `features ∪ (every declared feature, if all) − exclude`.
/// Exclusion always wins, including over features named explicitly in the same
/// request.
///
/// ```rust
/// use tessera_registry::FeatureRequest;
/// use tessera_registry::domain::LegacyFeatures;
///
/// let request = FeatureRequest::new()
///     .legacy(LegacyFeatures::GLOBAL_SEARCH)
///     .flag("dashboard_component", true)
///     .flag("report_choices", false);
///
/// assert_eq!(request.requested().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureRequest {
    features: BTreeSet<FeatureName>,
    all: bool,
    exclude: BTreeSet<FeatureName>,
}

impl FeatureRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every feature, including those declared later.
    #[must_use]
    pub const fn all(mut self) -> Self {
        self.all = true;
        self
    }

    #[must_use]
    pub const fn with_all(mut self, all: bool) -> Self {
        self.all = all;
        self
    }

    #[must_use]
    pub fn feature(mut self, name: impl Into<FeatureName>) -> Self {
        self.features.insert(name.into());
        self
    }

    #[must_use]
    pub fn features<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<FeatureName>,
    {
        self.features.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn exclude<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<FeatureName>,
    {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn excluding(mut self, name: impl Into<FeatureName>) -> Self {
        self.exclude.insert(name.into());
        self
    }

    #[must_use]
    pub fn legacy(mut self, flags: LegacyFeatures) -> Self {
        self.features.extend(flags.feature_names());
        self
    }

    /// A named switch: `true` asks for the feature, `false` is ignored.
    #[must_use]
    pub fn flag(mut self, name: impl Into<FeatureName>, enabled: bool) -> Self {
        if enabled {
            self.features.insert(name.into());
        }
        self
    }

    #[must_use]
    pub fn flags<I, N>(self, flags: I) -> Self
    where
        I: IntoIterator<Item = (N, bool)>,
        N: Into<FeatureName>,
    {
        flags.into_iter().fold(self, |request, (name, enabled)| request.flag(name, enabled))
    }

    #[must_use]
    pub const fn is_all(&self) -> bool {
        self.all
    }

    #[must_use]
    pub const fn requested(&self) -> &BTreeSet<FeatureName> {
        &self.features
    }

    #[must_use]
    pub const fn excluded(&self) -> &BTreeSet<FeatureName> {
        &self.exclude
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.all && self.features.is_empty()
    }
}

impl From<&RegistrationDecl> for FeatureRequest {
    fn from(decl: &RegistrationDecl) -> Self {
        Self::new()
            .with_all(decl.all)
            .features(decl.features.iter())
            .legacy(decl.legacy)
            .flags(decl.flags.iter().map(|(name, &enabled)| (name, enabled)))
            .exclude(decl.exclude.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn false_flags_are_ignored() {
        let request = FeatureRequest::new().flags([("workflow", true), ("notification", false)]);
        let names: Vec<_> = request.requested().iter().map(FeatureName::as_str).collect();
        assert_eq!(names, ["workflow"]);
    }

    #[test]
    fn all_without_features_is_not_empty() {
        assert!(FeatureRequest::new().is_empty());
        assert!(!FeatureRequest::new().all().is_empty());
        assert!(FeatureRequest::new().excluding("import_data").is_empty());
    }
}

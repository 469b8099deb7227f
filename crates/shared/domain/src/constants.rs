//! Names of the features every deployment declares up front.

pub const IMPORT_DATA: &str = "import_data";
pub const EXPORT_DATA: &str = "export_data";
pub const GLOBAL_SEARCH: &str = "global_search";

pub const IMPORT_MODELS: &str = "import_models";
pub const EXPORT_MODELS: &str = "export_models";
pub const GLOBAL_SEARCH_MODELS: &str = "global_search_models";

/// Suffix appended to a feature name when no registry key is given.
pub const REGISTRY_KEY_SUFFIX: &str = "_models";

/// Core features and their registry keys, in declaration order.
pub const CORE_FEATURES: &[(&str, &str)] = &[
    (IMPORT_DATA, IMPORT_MODELS),
    (EXPORT_DATA, EXPORT_MODELS),
    (GLOBAL_SEARCH, GLOBAL_SEARCH_MODELS),
];

use crate::constants::{EXPORT_DATA, GLOBAL_SEARCH, IMPORT_DATA};
use crate::names::FeatureName;
use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// The historical boolean switches for the three core features.
    ///
    /// Only sugar: registration code translates these into feature names before
    /// they reach the registry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    pub struct LegacyFeatures: u8 {
        const IMPORT_DATA = 1 << 0;
        const EXPORT_DATA = 1 << 1;
        const GLOBAL_SEARCH = 1 << 2;

        const ALL = Self::IMPORT_DATA.bits()
            | Self::EXPORT_DATA.bits()
            | Self::GLOBAL_SEARCH.bits();
    }
}

impl LegacyFeatures {
    /// Feature names of the set flags, in core declaration order.
    pub fn feature_names(self) -> impl Iterator<Item = FeatureName> {
        [
            (Self::IMPORT_DATA, IMPORT_DATA),
            (Self::EXPORT_DATA, EXPORT_DATA),
            (Self::GLOBAL_SEARCH, GLOBAL_SEARCH),
        ]
        .into_iter()
        .filter(move |(flag, _)| self.contains(*flag))
        .map(|(_, name)| FeatureName::from_static(name))
    }
}

impl From<&str> for LegacyFeatures {
    fn from(s: &str) -> Self {
        match s {
            IMPORT_DATA => Self::IMPORT_DATA,
            EXPORT_DATA => Self::EXPORT_DATA,
            GLOBAL_SEARCH => Self::GLOBAL_SEARCH,
            "all" | "*" => Self::ALL,
            _ => Self::empty(),
        }
    }
}

impl From<u8> for LegacyFeatures {
    fn from(bits: u8) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl Serialize for LegacyFeatures {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for LegacyFeatures {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}

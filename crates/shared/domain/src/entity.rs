use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Identity of a data-entity type: the owning application plus the model name.
///
/// Two entity types are the same entity when both parts match exactly. The textual
/// form is `app_label.ModelName`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityType {
    app_label: Cow<'static, str>,
    model_name: Cow<'static, str>,
}

impl EntityType {
    #[must_use]
    pub const fn from_static(app_label: &'static str, model_name: &'static str) -> Self {
        Self { app_label: Cow::Borrowed(app_label), model_name: Cow::Borrowed(model_name) }
    }

    pub fn new(
        app_label: impl Into<Cow<'static, str>>,
        model_name: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self { app_label: app_label.into(), model_name: model_name.into() }
    }

    /// Parses `app_label.ModelName`.
    ///
    /// # Errors
    /// Returns [`ParseEntityError`] when either part is missing or contains whitespace.
    pub fn parse(label: &str) -> Result<Self, ParseEntityError> {
        let (app_label, model_name) = split_label(label)?;
        Ok(Self::new(app_label.to_owned(), model_name.to_owned()))
    }

    #[must_use]
    pub fn app_label(&self) -> &str {
        &self.app_label
    }

    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// `app_label.modelname`, the case-insensitive lookup form.
    #[must_use]
    pub fn lookup_key(&self) -> String {
        format!("{}.{}", self.app_label, self.model_name.to_lowercase())
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.app_label, self.model_name)
    }
}

impl FromStr for EntityType {
    type Err = ParseEntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for EntityType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntityType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Static metadata implemented by every entity type definition.
///
/// Usually derived with `#[derive(Entity)]`.
pub trait Entity {
    const APP_LABEL: &'static str;
    const MODEL_NAME: &'static str;
    const VERBOSE_NAME: Option<&'static str> = None;

    #[must_use]
    fn entity_type() -> EntityType {
        EntityType::from_static(Self::APP_LABEL, Self::MODEL_NAME)
    }

    #[must_use]
    fn verbose_name() -> Cow<'static, str> {
        Self::VERBOSE_NAME.map_or_else(|| Cow::Owned(humanize(Self::MODEL_NAME)), Cow::Borrowed)
    }
}

/// A reference to an entity type as supplied by registration code.
///
/// `ByName` references are resolved once, at the registry boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Direct(EntityType),
    ByName { app_label: String, model_name: String },
}

impl EntityRef {
    pub fn by_name(app_label: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self::ByName { app_label: app_label.into(), model_name: model_name.into() }
    }

    /// Parses `app_label.ModelName` into a [`EntityRef::ByName`].
    ///
    /// # Errors
    /// Returns [`ParseEntityError`] for malformed labels.
    pub fn parse(label: &str) -> Result<Self, ParseEntityError> {
        let (app_label, model_name) = split_label(label)?;
        Ok(Self::by_name(app_label, model_name))
    }

    #[must_use]
    pub fn of<T: Entity>() -> Self {
        Self::Direct(T::entity_type())
    }
}

impl From<EntityType> for EntityRef {
    fn from(entity: EntityType) -> Self {
        Self::Direct(entity)
    }
}

impl From<&EntityType> for EntityRef {
    fn from(entity: &EntityType) -> Self {
        Self::Direct(entity.clone())
    }
}

impl From<(&str, &str)> for EntityRef {
    fn from((app_label, model_name): (&str, &str)) -> Self {
        Self::by_name(app_label, model_name)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(entity) => entity.fmt(f),
            Self::ByName { app_label, model_name } => write!(f, "{app_label}.{model_name}"),
        }
    }
}

impl<'de> Deserialize<'de> for EntityRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Label(String),
            Parts { app_label: String, model_name: String },
        }

        match Raw::deserialize(deserializer)? {
            Raw::Label(label) => Self::parse(&label).map_err(serde::de::Error::custom),
            Raw::Parts { app_label, model_name } => Ok(Self::by_name(app_label, model_name)),
        }
    }
}

impl Serialize for EntityRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// A textual entity label that is not of the form `app_label.ModelName`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEntityError {
    label: String,
}

impl fmt::Display for ParseEntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected `app_label.ModelName`, got `{}`", self.label)
    }
}

impl std::error::Error for ParseEntityError {}

fn split_label(label: &str) -> Result<(&str, &str), ParseEntityError> {
    let invalid = || ParseEntityError { label: label.to_owned() };
    let (app_label, model_name) = label.split_once('.').ok_or_else(invalid)?;

    let well_formed = |part: &str| {
        !part.is_empty() && !part.contains('.') && !part.chars().any(char::is_whitespace)
    };
    if well_formed(app_label) && well_formed(model_name) {
        Ok((app_label, model_name))
    } else {
        Err(invalid())
    }
}

/// Splits a CamelCase model name into lowercase words: `OpportunityStage` -> `opportunity stage`.
#[must_use]
pub fn humanize(model_name: &str) -> String {
    let chars: Vec<char> = model_name.chars().collect();
    let mut out = String::with_capacity(model_name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            out.push(' ');
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower)
            {
                out.push(' ');
            }
        }
        out.extend(c.to_lowercase());
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

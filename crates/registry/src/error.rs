use std::borrow::Cow;
use tessera_domain::entity::ParseEntityError;

/// Errors reported by registry operations.
///
/// None of these abort start-up; the `bool`-returning registry calls log them and carry on.
#[tessera_derive::tessera_error]
pub enum RegistryError {
    /// The entity resolver does not know the requested `app_label.ModelName`.
    #[error("Entity not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A textual entity reference could not be parsed.
    #[error("Invalid entity reference{}: {source}", format_context(.context))]
    InvalidReference { source: ParseEntityError, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal registry error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

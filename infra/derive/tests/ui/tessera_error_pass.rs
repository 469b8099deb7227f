use std::borrow::Cow;
use tessera_derive::tessera_error;

#[tessera_error]
pub enum CatalogError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Missing entry{}: {message}", format_context(.context))]
    Missing { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<String, CatalogError> {
    let raw = std::fs::read_to_string("catalog.toml").context("Reading catalog")?;
    Ok(raw)
}

fn main() {
    let _ = read();
    let _: CatalogError = "boom".into();
}

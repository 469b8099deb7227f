use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, LitStr};

#[derive(Default)]
struct EntityArgs {
    app_label: Option<LitStr>,
    model_name: Option<LitStr>,
    verbose_name: Option<LitStr>,
}

pub fn expand(input: DeriveInput) -> TokenStream {
    let ident = &input.ident;

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &input.generics,
            "Entity cannot be derived for generic types: an entity needs a single identity",
        )
        .to_compile_error();
    }

    let args = match parse_args(&input) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error(),
    };

    let Some(app_label) = args.app_label else {
        return syn::Error::new_spanned(
            ident,
            "missing #[entity(app_label = \"...\")] on Entity derive",
        )
        .to_compile_error();
    };
    let model_name =
        args.model_name.unwrap_or_else(|| LitStr::new(&ident.to_string(), ident.span()));
    let verbose_name = args
        .verbose_name
        .map_or_else(
            || quote! { ::core::option::Option::None },
            |v| quote! { ::core::option::Option::Some(#v) },
        );

    quote! {
        #[automatically_derived]
        impl ::tessera_registry::domain::Entity for #ident {
            const APP_LABEL: &'static str = #app_label;
            const MODEL_NAME: &'static str = #model_name;
            const VERBOSE_NAME: ::core::option::Option<&'static str> = #verbose_name;
        }
    }
}

fn parse_args(input: &DeriveInput) -> syn::Result<EntityArgs> {
    let mut args = EntityArgs::default();

    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("entity")) {
        attr.parse_nested_meta(|meta| {
            let slot = if meta.path.is_ident("app_label") {
                &mut args.app_label
            } else if meta.path.is_ident("model_name") {
                &mut args.model_name
            } else if meta.path.is_ident("verbose_name") {
                &mut args.verbose_name
            } else {
                return Err(meta.error("expected `app_label`, `model_name` or `verbose_name`"));
            };

            let value: LitStr = meta.value()?.parse()?;
            if value.value().trim().is_empty() {
                return Err(syn::Error::new_spanned(&value, "entity attributes cannot be empty"));
            }
            *slot = Some(value);
            Ok(())
        })?;
    }

    Ok(args)
}

use proc_macro2::TokenStream;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::parse::Parser;
use syn::{Expr, ExprArray, ExprLit, ItemStruct, Lit, LitBool, LitStr};

#[derive(Default)]
struct FeatureArgs {
    all: bool,
    features: Vec<LitStr>,
    exclude: Vec<LitStr>,
}

impl FeatureArgs {
    fn push_feature(&mut self, name: LitStr) {
        if !self.features.iter().any(|f| f.value() == name.value()) {
            self.features.push(name);
        }
    }

    fn push_exclude(&mut self, name: LitStr) {
        if !self.exclude.iter().any(|f| f.value() == name.value()) {
            self.exclude.push(name);
        }
    }
}

pub fn expand(args: TokenStream, input: ItemStruct) -> TokenStream {
    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &input.generics,
            "feature_enabled cannot annotate generic types",
        )
        .to_compile_error();
    }

    let mut parsed = FeatureArgs::default();
    let parser = syn::meta::parser(|meta| parse_meta(&mut parsed, &meta));
    if let Err(err) = parser.parse2(args) {
        return err.to_compile_error();
    }

    let ident = &input.ident;
    let FeatureArgs { all, features, exclude } = parsed;

    quote! {
        #input

        #[automatically_derived]
        impl ::tessera_registry::FeatureEnabled for #ident {
            const DECLARATION: ::tessera_registry::FeatureDeclaration =
                ::tessera_registry::FeatureDeclaration {
                    entity: <#ident as ::tessera_registry::domain::Entity>::entity_type,
                    features: &[#(#features),*],
                    all: #all,
                    exclude: &[#(#exclude),*],
                };
        }

        ::tessera_registry::inventory::submit! {
            <#ident as ::tessera_registry::FeatureEnabled>::DECLARATION
        }
    }
}

fn parse_meta(args: &mut FeatureArgs, meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
    let Some(ident) = meta.path.get_ident() else {
        return Err(meta.error("expected a feature name, `all`, `features` or `exclude`"));
    };
    let key = ident.to_string();

    match key.as_str() {
        "all" => {
            args.all = optional_bool(meta)?;
        },
        "features" => {
            for name in string_list(meta)? {
                args.push_feature(name);
            }
        },
        "exclude" => {
            for name in string_list(meta)? {
                args.push_exclude(name);
            }
        },
        _ => {
            if optional_bool(meta)? {
                args.push_feature(LitStr::new(&key, ident.span()));
            }
        },
    }

    Ok(())
}

/// `flag` alone means `true`; `flag = <bool>` is taken literally.
fn optional_bool(meta: &ParseNestedMeta<'_>) -> syn::Result<bool> {
    if meta.input.is_empty() || meta.input.peek(syn::Token![,]) {
        return Ok(true);
    }
    let value: LitBool = meta
        .value()?
        .parse()
        .map_err(|e| syn::Error::new(e.span(), "feature flags accept only `true` or `false`"))?;
    Ok(value.value)
}

fn string_list(meta: &ParseNestedMeta<'_>) -> syn::Result<Vec<LitStr>> {
    let expr: Expr = meta.value()?.parse()?;
    match expr {
        Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) => Ok(vec![s]),
        Expr::Array(ExprArray { elems, .. }) => elems
            .into_iter()
            .map(|elem| match elem {
                Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) => Ok(s),
                other => Err(syn::Error::new_spanned(other, "expected a string literal")),
            })
            .collect(),
        other => Err(syn::Error::new_spanned(
            other,
            "expected a string literal or an array of string literals",
        )),
    }
}

//! `#[derive(ApiParams)]` makes `#[apivalidator(...)]` a valid field attribute
//! for the Rust compiler, so parameter records can carry their validation
//! rules next to the fields that apigen reads them from.
//!
//! The derive produces no items. It only checks that every annotation is a
//! single string literal, in either form:
//!
//! ```rust,ignore
//! #[derive(Default, apigen_macros::ApiParams)]
//! pub struct ProfileParams {
//!     #[apivalidator("required")]
//!     pub login: String,
//!     #[apivalidator = "min=0,max=128"]
//!     pub age: i64,
//! }
//! ```

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Expr, Fields, Lit, LitStr, Meta};

const ATTR: &str = "apivalidator";

#[proc_macro_derive(ApiParams, attributes(apivalidator))]
pub fn derive_api_params(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match check_annotations(&input) {
        Ok(()) => TokenStream::from(quote! {}),
        Err(err) => err.to_compile_error().into(),
    }
}

fn check_annotations(input: &DeriveInput) -> syn::Result<()> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "ApiParams can only be derived for structs",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "ApiParams requires a struct with named fields",
        ));
    };
    for field in &fields.named {
        let mut seen = false;
        for attr in field.attrs.iter().filter(|a| a.path().is_ident(ATTR)) {
            if seen {
                return Err(syn::Error::new_spanned(attr, "duplicate apivalidator attribute"));
            }
            seen = true;
            match &attr.meta {
                Meta::List(_) => {
                    attr.parse_args::<LitStr>()?;
                }
                Meta::NameValue(nv) => match &nv.value {
                    Expr::Lit(lit) if matches!(lit.lit, Lit::Str(_)) => {}
                    other => {
                        return Err(syn::Error::new_spanned(
                            other,
                            "expected a string literal: #[apivalidator = \"...\"]",
                        ))
                    }
                },
                Meta::Path(path) => {
                    return Err(syn::Error::new_spanned(
                        path,
                        "expected #[apivalidator(\"...\")] or #[apivalidator = \"...\"]",
                    ))
                }
            }
        }
    }
    Ok(())
}

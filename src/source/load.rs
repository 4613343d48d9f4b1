use std::path::Path;

use quote::ToTokens;
use syn::{Attribute, Expr, FnArg, ImplItem, Item, Lit, LitStr, Meta, Signature, Type};
use tracing::debug;

use super::types::{
    Declaration, FieldDecl, FieldKind, FunctionDecl, ReceiverDecl, RecordDecl, SelfKind,
    SourceFile,
};
use crate::error::GenError;

/// Read and parse an input file.
///
/// `validator_attr` is the field attribute carrying annotations
/// (`apivalidator` by default).
///
/// # Errors
///
/// [`GenError::Io`] if the file cannot be read, [`GenError::SourceParse`] if it
/// is not valid Rust or an annotation attribute is malformed.
pub fn load_source(path: &Path, validator_attr: &str) -> Result<SourceFile, GenError> {
    let content = std::fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
    parse_source(&path.display().to_string(), &content, validator_attr)
}

/// Parse source text already in memory; `name` is used in diagnostics.
pub fn parse_source(
    name: &str,
    content: &str,
    validator_attr: &str,
) -> Result<SourceFile, GenError> {
    let file = syn::parse_file(content).map_err(|e| GenError::parse(name, &e))?;

    let mut declarations = Vec::new();
    for item in &file.items {
        match item {
            Item::Struct(item_struct) => {
                let type_name = item_struct.ident.to_string();
                let syn::Fields::Named(named) = &item_struct.fields else {
                    debug!(record = %type_name, "SKIP struct without named fields");
                    continue;
                };
                let mut fields = Vec::with_capacity(named.named.len());
                for field in &named.named {
                    let Some(ident) = &field.ident else { continue };
                    let annotation = field_annotation(&field.attrs, validator_attr)
                        .map_err(|e| GenError::parse(name, &e))?;
                    fields.push(FieldDecl {
                        name: ident.to_string(),
                        type_name: type_display(&field.ty),
                        kind: plain_type_name(&field.ty)
                            .as_deref()
                            .and_then(FieldKind::from_type_name),
                        annotation,
                        line: ident.span().start().line,
                    });
                }
                declarations.push(Declaration::Record(RecordDecl {
                    name: type_name,
                    fields,
                }));
            }
            Item::Fn(item_fn) => {
                declarations.push(Declaration::Function(function_decl(
                    &item_fn.sig,
                    &item_fn.attrs,
                    None,
                )));
            }
            Item::Impl(item_impl) => {
                let Some(type_name) = base_type_name(&item_impl.self_ty) else {
                    debug!(
                        self_ty = %type_display(&item_impl.self_ty),
                        "SKIP impl block for unnamed type"
                    );
                    continue;
                };
                let generic = impl_is_generic(item_impl);
                for impl_item in &item_impl.items {
                    if let ImplItem::Fn(method) = impl_item {
                        declarations.push(Declaration::Function(function_decl(
                            &method.sig,
                            &method.attrs,
                            Some((&type_name, generic)),
                        )));
                    }
                }
            }
            other => {
                debug!(kind = item_kind(other), "SKIP item");
            }
        }
    }

    Ok(SourceFile {
        name: name.to_string(),
        declarations,
    })
}

fn function_decl(
    sig: &Signature,
    attrs: &[Attribute],
    impl_type: Option<(&str, bool)>,
) -> FunctionDecl {
    let mut self_kind = SelfKind::None;
    let mut params = Vec::new();
    for input in &sig.inputs {
        match input {
            FnArg::Receiver(receiver) => {
                self_kind = match receiver.ty.as_ref() {
                    Type::Reference(r) if r.mutability.is_some() => SelfKind::RefMut,
                    Type::Reference(_) => SelfKind::Ref,
                    _ => SelfKind::Value,
                };
            }
            FnArg::Typed(pat_type) => params.push(plain_type_name(&pat_type.ty)),
        }
    }

    FunctionDecl {
        name: sig.ident.to_string(),
        receiver: impl_type.map(|(type_name, generic)| ReceiverDecl {
            type_name: type_name.to_string(),
            self_kind,
            generic,
        }),
        params,
        doc: doc_text(attrs),
    }
}

/// Read the validator attribute of a field.
///
/// Accepts `#[attr("...")]` and `#[attr = "..."]`.
fn field_annotation(attrs: &[Attribute], attr_name: &str) -> syn::Result<Option<String>> {
    let Some(attr) = attrs.iter().find(|a| a.path().is_ident(attr_name)) else {
        return Ok(None);
    };
    match &attr.meta {
        Meta::List(_) => {
            let lit: LitStr = attr.parse_args()?;
            Ok(Some(lit.value()))
        }
        Meta::NameValue(nv) => match &nv.value {
            Expr::Lit(expr) => match &expr.lit {
                Lit::Str(lit) => Ok(Some(lit.value())),
                other => Err(syn::Error::new_spanned(other, "expected a string literal")),
            },
            other => Err(syn::Error::new_spanned(other, "expected a string literal")),
        },
        Meta::Path(path) => Err(syn::Error::new_spanned(
            path,
            format!("expected #[{attr_name}(\"...\")]"),
        )),
    }
}

/// Doc comment text with one leading space removed per line and surrounding
/// blank lines dropped
fn doc_text(attrs: &[Attribute]) -> String {
    let mut lines = Vec::new();
    for attr in attrs.iter().filter(|a| a.path().is_ident("doc")) {
        let Meta::NameValue(nv) = &attr.meta else { continue };
        let Expr::Lit(expr) = &nv.value else { continue };
        let Lit::Str(lit) = &expr.lit else { continue };
        let value = lit.value();
        if value.is_empty() {
            lines.push(String::new());
        }
        for line in value.lines() {
            lines.push(line.strip_prefix(' ').unwrap_or(line).to_string());
        }
    }

    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}

/// Last path segment of a plain named type (`models::Params` → `Params`).
///
/// Generic, qualified and non-path types yield `None`.
pub(crate) fn plain_type_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => {
            let segment = type_path.path.segments.last()?;
            segment
                .arguments
                .is_none()
                .then(|| segment.ident.to_string())
        }
        Type::Paren(inner) => plain_type_name(&inner.elem),
        Type::Group(inner) => plain_type_name(&inner.elem),
        _ => None,
    }
}

/// Base name of an impl self type, looking through references and generics
fn base_type_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Reference(reference) => base_type_name(&reference.elem),
        Type::Paren(inner) => base_type_name(&inner.elem),
        Type::Group(inner) => base_type_name(&inner.elem),
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string()),
        _ => None,
    }
}

/// Impl block with generic parameters or a self type carrying arguments
fn impl_is_generic(item_impl: &syn::ItemImpl) -> bool {
    if !item_impl.generics.params.is_empty() {
        return true;
    }
    let mut ty = item_impl.self_ty.as_ref();
    loop {
        match ty {
            Type::Reference(_) => return true,
            Type::Paren(inner) => ty = &inner.elem,
            Type::Group(inner) => ty = &inner.elem,
            Type::Path(type_path) => {
                return type_path
                    .path
                    .segments
                    .iter()
                    .any(|segment| !segment.arguments.is_none())
            }
            _ => return false,
        }
    }
}

fn type_display(ty: &Type) -> String {
    ty.to_token_stream().to_string().replace(' ', "")
}

fn item_kind(item: &Item) -> &'static str {
    match item {
        Item::Const(_) => "const",
        Item::Enum(_) => "enum",
        Item::ExternCrate(_) => "extern crate",
        Item::ForeignMod(_) => "extern block",
        Item::Macro(_) => "macro",
        Item::Mod(_) => "mod",
        Item::Static(_) => "static",
        Item::Trait(_) | Item::TraitAlias(_) => "trait",
        Item::Type(_) => "type alias",
        Item::Union(_) => "union",
        Item::Use(_) => "use",
        _ => "other",
    }
}

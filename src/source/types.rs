use std::fmt;

/// Primitive field kinds the generator knows how to bind and validate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any Rust integer primitive
    Int,
    /// `String`
    String,
}

impl FieldKind {
    /// Classify a declared type name; `None` for unsupported types
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
            | "u128" | "usize" => Some(FieldKind::Int),
            "String" => Some(FieldKind::String),
            _ => None,
        }
    }

    /// Name used by the templates
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Int => "int",
            FieldKind::String => "string",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named field of a record type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    /// Declared type as written (tokens, whitespace-normalised)
    pub type_name: String,
    /// `None` when the type is not a supported primitive
    pub kind: Option<FieldKind>,
    /// Content of the validator attribute, if present
    pub annotation: Option<String>,
    pub line: usize,
}

/// A `struct` with named fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDecl {
    pub name: String,
    pub fields: Vec<FieldDecl>,
}

impl RecordDecl {
    pub fn has_annotations(&self) -> bool {
        self.fields.iter().any(|f| f.annotation.is_some())
    }
}

/// How a method takes `self`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfKind {
    /// Associated function without `self`
    None,
    /// `&self`
    Ref,
    /// `&mut self`
    RefMut,
    /// `self`, `mut self` or a typed `self: T`
    Value,
}

/// The `impl` block a function belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiverDecl {
    /// Base name of the impl's self type (`&'a Foo<T>` → `Foo`)
    pub type_name: String,
    pub self_kind: SelfKind,
    /// Impl has generic parameters or its self type has arguments
    pub generic: bool,
}

/// A free function or a method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub name: String,
    pub receiver: Option<ReceiverDecl>,
    /// Non-`self` parameter type names; `None` for anything but a plain named type
    pub params: Vec<Option<String>>,
    /// Leading doc comment text
    pub doc: String,
}

/// Top-level declaration relevant to generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Record(RecordDecl),
    Function(FunctionDecl),
}

/// A parsed input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Display name used in diagnostics and the generated header
    pub name: String,
    pub declarations: Vec<Declaration>,
}

impl SourceFile {
    pub fn records(&self) -> impl Iterator<Item = &RecordDecl> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Record(r) => Some(r),
            Declaration::Function(_) => None,
        })
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionDecl> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Function(f) => Some(f),
            Declaration::Record(_) => None,
        })
    }
}

//! See following macros:
//!
//! - [`Marshal`]
//! - [`MarshalEnum`]
//! - [`MarshalUnion`]
//! - [`Class`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod common;
mod derive_class;
mod derive_enum;
mod derive_marshal;
mod derive_union;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Marshal Derivation
///
/// `#[derive(Marshal)]` implements `Marshal`, `Class` and `Property` for a
/// struct with named fields (or a unit struct).
///
/// Every field type must implement `Property`.
///
/// ## Type Attributes
///
/// ```rust, ignore
/// fn kebab(name: &str) -> String {
///     name.replace('_', "-")
/// }
///
/// #[derive(Marshal)]
/// #[marshal(renamer = kebab, name = "user")]
/// struct User { /* ... */ }
/// ```
///
/// - `renamer`: applied to every property without an explicit name.
/// - `name`: the type name used in messages, defaults to the identifier.
///
/// ## Field Attributes
///
/// ```rust, ignore
/// #[derive(Marshal)]
/// struct User {
///     #[field(name = "user-name")]
///     name: String,
///     #[field(parser = Iso8601)]
///     created: Timestamp,
///     #[field(allow_uninitialized)]
///     id: Uninit<i64>,
///     #[field(enum_by_name)]
///     role: Role,
///     #[marshal(default = 18)]
///     age: i64,
///     #[marshal(skip)]
///     cache: Vec<String>,
/// }
/// ```
///
/// A field takes at most one `#[field]` attribute. A second one is reported
/// as a configuration error the first time the type is marshaled.
///
/// Skipped fields are not marshaled and are rebuilt through `Default`.
#[proc_macro_derive(Marshal, attributes(marshal, field))]
pub fn derive_marshal(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    derive_marshal::derive_marshal(&ast)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// # Enum Derivation
///
/// `#[derive(MarshalEnum)]` implements `EnumType` and `Property` for an enum
/// of unit variants.
///
/// ```rust, ignore
/// #[derive(MarshalEnum)]
/// enum Suit {
///     #[marshal(value = "H")]
///     Hearts,
///     #[marshal(value = "S", name = "SPADES")]
///     Spades,
/// }
///
/// #[derive(MarshalEnum)]
/// enum Level {
///     Low = 1,
///     High = 10,
/// }
/// ```
///
/// An enum is backed when its variants carry a `value` (all of them, all
/// strings or all integers) or explicit discriminants. Otherwise cases are
/// marshaled by name.
#[proc_macro_derive(MarshalEnum, attributes(marshal))]
pub fn derive_marshal_enum(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    derive_enum::derive_marshal_enum(&ast)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// # Union Derivation
///
/// `#[derive(MarshalUnion)]` implements `Property` for an enum whose
/// variants each wrap one property type, producing a union type.
///
/// ```rust, ignore
/// #[derive(MarshalUnion)]
/// enum IdOrName {
///     Id(i64),
///     Name(String),
/// }
/// ```
///
/// When unmarshaling, the variants are tried in declaration order.
#[proc_macro_derive(MarshalUnion)]
pub fn derive_marshal_union(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    derive_union::derive_marshal_union(&ast)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// # Class Derivation
///
/// `#[derive(Class)]` implements `Class` and `Property` for a type that has
/// no marshal capability of its own but may inherit one.
///
/// ```rust, ignore
/// #[derive(Class)]
/// #[class(parent = Base)]
/// struct Derived(Base);
///
/// impl AsRef<Base> for Derived { /* ... */ }
/// impl From<Base> for Derived { /* ... */ }
/// ```
///
/// The nearest ancestor implementing `Marshal` marshals instances, reached
/// through `AsRef` and rebuilt through `From`.
#[proc_macro_derive(Class, attributes(class))]
pub fn derive_class(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    derive_class::derive_class(&ast)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

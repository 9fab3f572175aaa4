//! Parsing of `#[marshal(..)]`, `#[field(..)]` and `#[class(..)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Expr, Lit, LitStr, Meta};

pub(crate) const MARSHAL_ATTRIBUTE: &str = "marshal";
pub(crate) const FIELD_ATTRIBUTE: &str = "field";
pub(crate) const CLASS_ATTRIBUTE: &str = "class";

fn attrs_named<'a>(attrs: &'a [Attribute], name: &'static str) -> impl Iterator<Item = &'a Attribute> {
    attrs.iter().filter(move |attr| attr.path().is_ident(name))
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// `#[marshal(renamer = path, name = "..")]` on a struct.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub renamer: Option<syn::Path>,
    pub name: Option<LitStr>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs_named(attrs, MARSHAL_ATTRIBUTE) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("renamer") {
                    if parsed.renamer.is_some() {
                        return Err(meta.error("a type takes at most one renamer"));
                    }
                    parsed.renamer = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("name") {
                    parsed.name = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("expected `renamer` or `name`"))
                }
            })?;
        }

        Ok(parsed)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// One `#[field(..)]` attribute.
#[derive(Default)]
pub(crate) struct FieldMetadata {
    name: Option<LitStr>,
    parser: Option<syn::Type>,
    allow_uninitialized: bool,
    enum_by_name: bool,
}

impl FieldMetadata {
    fn parse_attr(attr: &Attribute) -> syn::Result<Self> {
        let mut parsed = Self::default();
        if let Meta::Path(_) = attr.meta {
            return Ok(parsed);
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                parsed.name = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("parser") {
                parsed.parser = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("allow_uninitialized") {
                parsed.allow_uninitialized = true;
            } else if meta.path.is_ident("enum_by_name") {
                parsed.enum_by_name = true;
            } else {
                return Err(meta.error(
                    "expected `name`, `parser`, `allow_uninitialized` or `enum_by_name`",
                ));
            }
            Ok(())
        })?;

        Ok(parsed)
    }

    /// Tokens building a `FieldMetadata` value.
    pub fn to_tokens(&self, krate: &syn::Path) -> TokenStream {
        let descriptor_ = crate::path::descriptor_(krate);

        let name = self.name.as_ref().map(|name| quote! { .with_name(#name) });
        let parser = self.parser.as_ref().map(|parser| quote! { .with_parser::<#parser>() });
        let allow_uninitialized = self
            .allow_uninitialized
            .then(|| quote! { .allow_uninitialized() });
        let enum_by_name = self.enum_by_name.then(|| quote! { .enum_by_name() });

        quote! {
            #descriptor_::FieldMetadata::new()
                #name
                #parser
                #allow_uninitialized
                #enum_by_name
        }
    }
}

/// Everything attached to one struct field.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub skip: bool,
    pub default: Option<Expr>,
    /// Every `#[field]` attribute, in order. More than one is rejected when
    /// the bindings are built.
    pub metadata: Vec<FieldMetadata>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs_named(attrs, MARSHAL_ATTRIBUTE) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    parsed.skip = true;
                    Ok(())
                } else if meta.path.is_ident("default") {
                    parsed.default = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("expected `skip` or `default`"))
                }
            })?;
        }

        for attr in attrs_named(attrs, FIELD_ATTRIBUTE) {
            parsed.metadata.push(FieldMetadata::parse_attr(attr)?);
        }

        Ok(parsed)
    }
}

// -----------------------------------------------------------------------------
// VariantAttributes

/// `#[marshal(name = "..", value = ..)]` on an enum variant.
#[derive(Default)]
pub(crate) struct VariantAttributes {
    pub name: Option<LitStr>,
    pub value: Option<Lit>,
}

impl VariantAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs_named(attrs, MARSHAL_ATTRIBUTE) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    parsed.name = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("value") {
                    let lit: Lit = meta.value()?.parse()?;
                    if !matches!(lit, Lit::Str(_) | Lit::Int(_)) {
                        return Err(syn::Error::new_spanned(lit, "backing values are strings or integers"));
                    }
                    parsed.value = Some(lit);
                    Ok(())
                } else {
                    Err(meta.error("expected `name` or `value`"))
                }
            })?;
        }

        Ok(parsed)
    }
}

// -----------------------------------------------------------------------------
// ClassAttributes

/// `#[class(parent = Type, name = "..")]` on a host type.
#[derive(Default)]
pub(crate) struct ClassAttributes {
    pub parent: Option<syn::Type>,
    pub name: Option<LitStr>,
}

impl ClassAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs_named(attrs, CLASS_ATTRIBUTE) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("parent") {
                    if parsed.parent.is_some() {
                        return Err(meta.error("a class has at most one parent"));
                    }
                    parsed.parent = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("name") {
                    parsed.name = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("expected `parent` or `name`"))
                }
            })?;
        }

        Ok(parsed)
    }
}

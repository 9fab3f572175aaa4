//! Code shared by the derives: generic bounds, per-type cells and the
//! `Property` impl of class types.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Generics, Ident, parse_quote};

/// Adds `Property` bounds to every type parameter.
pub(crate) fn with_property_bounds(generics: &Generics, krate: &syn::Path) -> Generics {
    let ops_ = crate::path::ops_(krate);
    let mut generics = generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(#ops_::Property));
    }
    generics
}

/// Tokens evaluating to a `&'static` value built once per type by `init`.
///
/// Non-generic types use a `NonGenericCell<#value_ty>`, generic ones share
/// a `GenericCell` keyed by `Self`.
pub(crate) fn cell_tokens(
    krate: &syn::Path,
    generic: bool,
    value_ty: TokenStream,
    init: TokenStream,
) -> TokenStream {
    let info_ = crate::path::info_(krate);
    if generic {
        quote! {
            static CELL: #info_::GenericCell = #info_::GenericCell::new();
            CELL.get_or_insert::<Self, #value_ty>(|| { #init })
        }
    } else {
        quote! {
            static CELL: #info_::NonGenericCell<#value_ty> = #info_::NonGenericCell::new();
            CELL.get_or_init(|| { #init })
        }
    }
}

/// `Class` and `Property` impls of a struct-like type.
///
/// `info_init` builds the type's `ClassInfo`.
pub(crate) fn impl_class(
    krate: &syn::Path,
    ident: &Ident,
    generics: &Generics,
    info_init: TokenStream,
) -> TokenStream {
    let info_ = crate::path::info_(krate);
    let ops_ = crate::path::ops_(krate);

    let bounded = with_property_bounds(generics, krate);
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();

    let class_info = cell_tokens(
        krate,
        generics.type_params().next().is_some(),
        quote! { #info_::ClassInfo },
        info_init,
    );

    quote! {
        impl #impl_generics #info_::Class for #ident #ty_generics #where_clause {
            fn class_info() -> &'static #info_::ClassInfo {
                #class_info
            }
        }

        impl #impl_generics #ops_::Property for #ident #ty_generics #where_clause {
            fn declared() -> #info_::TypeRefs {
                #info_::TypeRefs::single(#info_::TypeRef::Class(<Self as #info_::Class>::class_info))
            }

            fn as_reflect(&self) -> #ops_::ReflectRef<'_> {
                #ops_::ReflectRef::Object(#ops_::ObjectRef::new(
                    self,
                    <Self as #info_::Class>::class_info(),
                ))
            }

            fn as_present(&self) -> ::core::option::Option<&dyn ::core::any::Any> {
                ::core::option::Option::Some(self)
            }

            fn into_dynamic(self) -> #ops_::Dynamic {
                #ops_::Dynamic::Object(#ops_::ObjectValue::new(self))
            }

            fn from_dynamic(value: #ops_::Dynamic) -> ::core::result::Result<Self, #ops_::Dynamic> {
                #info_::class_from_dynamic(value)
            }
        }
    }
}

/// The display name of a type: an explicit `name = ".."` or its identifier.
pub(crate) fn type_name(ident: &Ident, explicit: Option<&syn::LitStr>) -> syn::LitStr {
    explicit
        .cloned()
        .unwrap_or_else(|| syn::LitStr::new(&ident.to_string(), ident.span()))
}

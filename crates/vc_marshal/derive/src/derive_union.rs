use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

use crate::common;

/// `Property` for an enum whose variants each wrap one property type.
///
/// The declared types are the union of the variants' types. Values are
/// converted back by trying the variants in declaration order, first those
/// holding the value exactly, then all of them.
pub(crate) fn derive_marshal_union(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Enum(data) = &ast.data else {
        return Err(syn::Error::new_spanned(
            &ast.ident,
            "`MarshalUnion` can only be derived for enums",
        ));
    };
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            &ast.ident,
            "`MarshalUnion` requires at least one variant",
        ));
    }

    let mut variants = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        match &variant.fields {
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                variants.push((&variant.ident, &fields.unnamed[0].ty));
            }
            _ => {
                return Err(syn::Error::new_spanned(
                    variant,
                    "`MarshalUnion` variants must wrap exactly one value",
                ));
            }
        }
    }

    let krate = crate::path::vc_marshal();
    let info_ = crate::path::info_(&krate);
    let ops_ = crate::path::ops_(&krate);

    let ident = &ast.ident;
    let bounded = common::with_property_bounds(&ast.generics, &krate);
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();

    let declared = variants.iter().map(|(_, ty)| {
        quote! { declared.extend(<#ty as #ops_::Property>::declared()); }
    });
    let as_reflect = variants.iter().map(|(variant, _)| {
        quote! { Self::#variant(value) => #ops_::Property::as_reflect(value) }
    });
    let as_present = variants.iter().map(|(variant, _)| {
        quote! { Self::#variant(value) => #ops_::Property::as_present(value) }
    });
    let into_dynamic = variants.iter().map(|(variant, _)| {
        quote! { Self::#variant(value) => #ops_::Property::into_dynamic(value) }
    });
    let try_variant = |variant: &syn::Ident, ty: &syn::Type| {
        quote! {
            match <#ty as #ops_::Property>::from_dynamic(value) {
                ::core::result::Result::Ok(value) => {
                    return ::core::result::Result::Ok(Self::#variant(value));
                }
                ::core::result::Result::Err(value) => value,
            }
        }
    };
    // Members holding the value as is come first, widening ints to floats second.
    let exact = variants.iter().map(|(variant, ty)| {
        let attempt = try_variant(*variant, *ty);
        quote! {
            let value = if <#ty as #ops_::Property>::declared().fits_exactly(&value) {
                #attempt
            } else {
                value
            };
        }
    });
    let widened = variants.iter().map(|(variant, ty)| {
        let attempt = try_variant(*variant, *ty);
        quote! { let value = #attempt; }
    });

    Ok(quote! {
        impl #impl_generics #ops_::Property for #ident #ty_generics #where_clause {
            fn declared() -> #info_::TypeRefs {
                let mut declared = #info_::TypeRefs::union([]);
                #(#declared)*
                declared
            }

            fn as_reflect(&self) -> #ops_::ReflectRef<'_> {
                match self {
                    #(#as_reflect,)*
                }
            }

            fn as_present(&self) -> ::core::option::Option<&dyn ::core::any::Any> {
                match self {
                    #(#as_present,)*
                }
            }

            fn present_type() -> ::core::option::Option<::core::any::TypeId> {
                ::core::option::Option::None
            }

            fn into_dynamic(self) -> #ops_::Dynamic {
                match self {
                    #(#into_dynamic,)*
                }
            }

            fn from_dynamic(value: #ops_::Dynamic) -> ::core::result::Result<Self, #ops_::Dynamic> {
                #(#exact)*
                #(#widened)*
                ::core::result::Result::Err(value)
            }
        }
    })
}

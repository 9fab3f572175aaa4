use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Lit, LitStr};

use crate::attributes::VariantAttributes;
use crate::common;

/// `EnumType` and `Property` for an enum of unit variants.
///
/// The enum is backed when its variants carry `#[marshal(value = ..)]`
/// (every variant must then have one) or explicit discriminants.
pub(crate) fn derive_marshal_enum(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Enum(data) = &ast.data else {
        return Err(syn::Error::new_spanned(
            &ast.ident,
            "`MarshalEnum` can only be derived for enums",
        ));
    };
    if !ast.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &ast.generics,
            "`MarshalEnum` does not support generic enums",
        ));
    }

    let mut variants = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "`MarshalEnum` variants must be unit variants, use `MarshalUnion` for newtype variants",
            ));
        }
        variants.push((variant, VariantAttributes::parse_attrs(&variant.attrs)?));
    }

    let with_values = variants.iter().filter(|(_, attrs)| attrs.value.is_some()).count();
    if with_values != 0 && with_values != variants.len() {
        return Err(syn::Error::new_spanned(
            &ast.ident,
            "either every variant or none has a `value`",
        ));
    }
    let by_discriminant =
        with_values == 0 && variants.iter().any(|(variant, _)| variant.discriminant.is_some());

    let krate = crate::path::vc_marshal();
    let info_ = crate::path::info_(&krate);
    let ops_ = crate::path::ops_(&krate);
    let exports_ = crate::path::macro_exports_(&krate);

    let ident = &ast.ident;
    let name = LitStr::new(&ident.to_string(), ident.span());

    let cases = variants.iter().map(|(variant, attrs)| {
        let variant_ident = &variant.ident;
        let case_name = attrs
            .name
            .clone()
            .unwrap_or_else(|| LitStr::new(&variant_ident.to_string(), variant_ident.span()));

        match &attrs.value {
            Some(Lit::Int(int)) => quote! { #info_::EnumCase::backed(#case_name, #int as i64) },
            Some(value) => quote! { #info_::EnumCase::backed(#case_name, #value) },
            None if by_discriminant => {
                quote! { #info_::EnumCase::backed(#case_name, Self::#variant_ident as i64) }
            }
            None => quote! { #info_::EnumCase::new(#case_name) },
        }
    });

    let enum_info = common::cell_tokens(
        &krate,
        false,
        quote! { #info_::EnumInfo },
        quote! {
            #info_::EnumInfo::new::<Self>(#name, #exports_::alloc_utils::vec![#(#cases),*])
        },
    );

    let to_index = variants.iter().enumerate().map(|(index, (variant, _))| {
        let variant_ident = &variant.ident;
        quote! { Self::#variant_ident => #index }
    });
    let from_index = variants.iter().enumerate().map(|(index, (variant, _))| {
        let variant_ident = &variant.ident;
        quote! { #index => ::core::option::Option::Some(Self::#variant_ident) }
    });

    Ok(quote! {
        const _: () = {
            impl #info_::EnumType for #ident {
                fn enum_info() -> &'static #info_::EnumInfo {
                    #enum_info
                }

                fn case_index(&self) -> usize {
                    match self {
                        #(#to_index,)*
                    }
                }

                fn from_case_index(index: usize) -> ::core::option::Option<Self> {
                    match index {
                        #(#from_index,)*
                        _ => ::core::option::Option::None,
                    }
                }
            }

            impl #ops_::Property for #ident {
                fn declared() -> #info_::TypeRefs {
                    #info_::TypeRefs::single(#info_::TypeRef::Enum(<Self as #info_::EnumType>::enum_info))
                }

                fn as_reflect(&self) -> #ops_::ReflectRef<'_> {
                    #ops_::ReflectRef::Enum(#ops_::EnumRef::new(
                        <Self as #info_::EnumType>::enum_info(),
                        #info_::EnumType::case_index(self),
                    ))
                }

                fn as_present(&self) -> ::core::option::Option<&dyn ::core::any::Any> {
                    ::core::option::Option::Some(self)
                }

                fn into_dynamic(self) -> #ops_::Dynamic {
                    #info_::enum_into_dynamic(&self)
                }

                fn from_dynamic(value: #ops_::Dynamic) -> ::core::result::Result<Self, #ops_::Dynamic> {
                    #info_::enum_from_dynamic(value)
                }
            }
        };
    })
}

//! Paths of the `vc_marshal` items named by generated code.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// The path of the `vc_marshal` crate as seen from the invoking crate.
///
/// Either `::vc_marshal` or `::vc_data::marshal`, see
/// [`vc_macro_utils::Manifest`].
pub(crate) fn vc_marshal() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_marshal"))
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn marshal_(krate: &syn::Path) -> TokenStream {
    quote! { #krate::Marshal }
}

#[inline(always)]
pub(crate) fn value_(krate: &syn::Path) -> TokenStream {
    quote! { #krate::Value }
}

#[inline(always)]
pub(crate) fn config_error_(krate: &syn::Path) -> TokenStream {
    quote! { #krate::ConfigError }
}

#[inline(always)]
pub(crate) fn unmarshal_error_(krate: &syn::Path) -> TokenStream {
    quote! { #krate::UnmarshalError }
}

#[inline(always)]
pub(crate) fn binding_(krate: &syn::Path) -> TokenStream {
    quote! { #krate::binding }
}

#[inline(always)]
pub(crate) fn descriptor_(krate: &syn::Path) -> TokenStream {
    quote! { #krate::descriptor }
}

#[inline(always)]
pub(crate) fn info_(krate: &syn::Path) -> TokenStream {
    quote! { #krate::info }
}

#[inline(always)]
pub(crate) fn ops_(krate: &syn::Path) -> TokenStream {
    quote! { #krate::ops }
}

#[inline(always)]
pub(crate) fn slots_(krate: &syn::Path) -> TokenStream {
    quote! { #krate::engine::Slots }
}

#[inline(always)]
pub(crate) fn macro_exports_(krate: &syn::Path) -> TokenStream {
    quote! { #krate::__macro_exports }
}

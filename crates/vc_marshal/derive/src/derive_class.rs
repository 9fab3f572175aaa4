use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::attributes::ClassAttributes;
use crate::common;

/// `Class` and `Property` for a type without its own marshal capability.
pub(crate) fn derive_class(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let attrs = ClassAttributes::parse_attrs(&ast.attrs)?;
    let krate = crate::path::vc_marshal();
    let info_ = crate::path::info_(&krate);

    let ident = &ast.ident;
    let name = common::type_name(ident, attrs.name.as_ref());
    let parent = attrs
        .parent
        .as_ref()
        .map(|parent| quote! { .with_parent(#info_::ParentLink::of::<Self, #parent>()) });

    let impls = common::impl_class(
        &krate,
        ident,
        &ast.generics,
        quote! {
            #info_::ClassInfo::new::<Self>(#name)
                #parent
        },
    );

    Ok(quote! {
        const _: () = {
            #impls
        };
    })
}

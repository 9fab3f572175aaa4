use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, LitStr};

use crate::attributes::{FieldAttributes, TypeAttributes};
use crate::common;

struct MarshalField<'a> {
    ident: &'a syn::Ident,
    ty: &'a syn::Type,
    attrs: FieldAttributes,
}

/// `Marshal`, `Class` and `Property` for a struct with named fields.
pub(crate) fn derive_marshal(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Struct(data) = &ast.data else {
        return Err(syn::Error::new_spanned(
            &ast.ident,
            "`Marshal` can only be derived for structs, use `MarshalEnum` or `MarshalUnion` for enums",
        ));
    };

    let named: Vec<&syn::Field> = match &data.fields {
        Fields::Named(named) => named.named.iter().collect(),
        Fields::Unit => Vec::new(),
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(
                &ast.ident,
                "`Marshal` requires named fields",
            ));
        }
    };

    let fields = named
        .into_iter()
        .map(|field| {
            Ok(MarshalField {
                ident: field.ident.as_ref().ok_or_else(|| {
                    syn::Error::new_spanned(field, "`Marshal` requires named fields")
                })?,
                ty: &field.ty,
                attrs: FieldAttributes::parse_attrs(&field.attrs)?,
            })
        })
        .collect::<syn::Result<Vec<_>>>()?;

    let type_attrs = TypeAttributes::parse_attrs(&ast.attrs)?;
    let krate = crate::path::vc_marshal();

    let ident = &ast.ident;
    let name = common::type_name(ident, type_attrs.name.as_ref());
    let generic = ast.generics.type_params().next().is_some();

    let marshal_ = crate::path::marshal_(&krate);
    let binding_ = crate::path::binding_(&krate);
    let info_ = crate::path::info_(&krate);
    let value_ = crate::path::value_(&krate);
    let config_error_ = crate::path::config_error_(&krate);
    let unmarshal_error_ = crate::path::unmarshal_error_(&krate);
    let slots_ = crate::path::slots_(&krate);
    let exports_ = crate::path::macro_exports_(&krate);

    // -------------------------------------------------------------------------
    // descriptor()

    let renamer = type_attrs
        .renamer
        .as_ref()
        .map(|renamer| quote! { .with_renamer(#renamer) });

    let properties = fields.iter().filter(|field| !field.attrs.skip).map(|field| {
        let MarshalField { ident, ty, attrs } = field;
        let property = LitStr::new(&ident.unraw().to_string(), ident.span());
        let metadata = attrs.metadata.iter().map(|meta| {
            let meta = meta.to_tokens(&krate);
            quote! { .with_metadata(#meta) }
        });
        let default = attrs
            .default
            .as_ref()
            .map(|expr| quote! { .with_default(|| #value_::from(#expr)) });

        quote! {
            .with_property(
                #binding_::PropertyDescriptor::<Self>::new::<#ty>(#property, |this| &this.#ident)
                    #(#metadata)*
                    #default
            )
        }
    });

    // -------------------------------------------------------------------------
    // bindings()

    let bindings_ty = if generic {
        quote! { #exports_::BindingsResult<Self> }
    } else {
        quote! { #exports_::BindingsResult<#ident> }
    };
    let bindings_cell = common::cell_tokens(
        &krate,
        generic,
        bindings_ty,
        quote! { #binding_::TypeBindings::build(<Self as #marshal_>::descriptor()) },
    );

    // -------------------------------------------------------------------------
    // assemble()

    let slots = if fields.iter().any(|field| !field.attrs.skip) {
        format_ident!("slots")
    } else {
        format_ident!("_slots")
    };
    let mut index = 0_usize;
    let assigned = fields.iter().map(|field| {
        let MarshalField { ident, ty, attrs } = field;
        if attrs.skip {
            quote! { #ident: ::core::default::Default::default() }
        } else {
            let slot = index;
            index += 1;
            quote! { #ident: #slots.take::<#ty>(#slot)? }
        }
    });
    let assigned: Vec<_> = assigned.collect();

    // -------------------------------------------------------------------------
    // impls

    let bounded = common::with_property_bounds(&ast.generics, &krate);
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();

    let class_impls = common::impl_class(
        &krate,
        ident,
        &ast.generics,
        quote! {
            #info_::ClassInfo::new::<Self>(#name)
                .with_vtable(#info_::ObjectVTable::of::<Self>())
        },
    );

    Ok(quote! {
        const _: () = {
            impl #impl_generics #marshal_ for #ident #ty_generics #where_clause {
                fn descriptor() -> #binding_::TypeDescriptor<Self> {
                    #binding_::TypeDescriptor::new(#name)
                        #renamer
                        #(#properties)*
                }

                fn bindings() -> ::core::result::Result<
                    &'static #binding_::TypeBindings<Self>,
                    #config_error_,
                > {
                    #exports_::cached_bindings({ #bindings_cell })
                }

                fn assemble(#slots: &mut #slots_) -> ::core::result::Result<Self, #unmarshal_error_> {
                    ::core::result::Result::Ok(Self {
                        #(#assigned,)*
                    })
                }
            }

            #class_impls
        };
    })
}

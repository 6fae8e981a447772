//! `AdminModel` derive macro implementation

use darling::{FromDeriveInput, FromField, ast};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{DeriveInput, parse_macro_input};

use crate::utils::{NativeKind, classify};

/// Fields the engine treats as internal, never read through `Record`
const INTERNAL_FIELDS: [&str; 2] = ["edges", "select_values"];

/// Receiver for the struct that derives `AdminModel`
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(admin), supports(struct_named))]
pub struct AdminModelReceiver {
    ident: syn::Ident,
    generics: syn::Generics,
    data: ast::Data<(), AdminFieldReceiver>,
    /// Entity name override
    #[darling(default)]
    name: Option<String>,
}

/// Receiver for one field of the struct
#[derive(Debug, FromField)]
#[darling(attributes(admin))]
pub struct AdminFieldReceiver {
    ident: Option<syn::Ident>,
    ty: syn::Type,
    vis: syn::Visibility,
    /// Leave the field out entirely
    #[darling(default)]
    skip: bool,
    /// Use this field as the record identifier
    #[darling(default)]
    id: bool,
    /// The field holds another record
    #[darling(default)]
    reference: bool,
}

/// One field after classification
struct ModelField<'a> {
    ident: &'a syn::Ident,
    name: String,
    kind: NativeKind,
    exported: bool,
}

impl ModelField<'_> {
    /// Whether the generated `Record` exposes this field
    fn is_readable(&self) -> bool {
        self.exported
            && !INTERNAL_FIELDS.contains(&self.name.as_str())
            && !matches!(self.kind.underlying(), NativeKind::Other(_))
    }

    fn value_expr(&self) -> TokenStream2 {
        let ident = self.ident;
        match (self.kind.underlying(), self.kind.is_optional()) {
            (NativeKind::Reference, true) => quote! {
                ::model_admin::FieldValue::Reference(
                    self.#ident.as_ref().map(|record| ::model_admin::Reference::of(record))
                )
            },
            (NativeKind::Reference, false) => quote! {
                ::model_admin::FieldValue::Reference(Some(::model_admin::Reference::of(&self.#ident)))
            },
            _ => quote! {
                ::model_admin::ToFieldValue::to_field_value(&self.#ident)
            },
        }
    }
}

/// Process the `AdminModel` derive macro
pub fn process_derive_admin_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(darling::Error::write_errors)
        .into()
}

/// Generate both trait implementations for a parsed struct
pub(crate) fn expand(input: &DeriveInput) -> darling::Result<TokenStream2> {
    let receiver = AdminModelReceiver::from_derive_input(input)?;
    let ast::Data::Struct(fields) = &receiver.data else {
        unreachable!("darling only accepts named structs here")
    };

    let model_fields: Vec<ModelField<'_>> = fields
        .iter()
        .filter(|field| !field.skip)
        .filter_map(|field| {
            let ident = field.ident.as_ref()?;
            Some(ModelField {
                ident,
                name: ident.unraw().to_string(),
                kind: classify(&field.ty, field.reference),
                exported: matches!(field.vis, syn::Visibility::Public(_)),
            })
        })
        .collect();

    let id_field = fields
        .iter()
        .find(|field| field.id)
        .or_else(|| {
            fields
                .iter()
                .find(|field| field.ident.as_ref().is_some_and(|ident| ident == "id"))
        })
        .and_then(|field| field.ident.as_ref())
        .ok_or_else(|| {
            darling::Error::custom(
                "AdminModel requires an `id` field or a field marked `#[admin(id)]`",
            )
            .with_span(&receiver.ident)
        })?;

    let ident = &receiver.ident;
    let entity_name = receiver
        .name
        .clone()
        .unwrap_or_else(|| ident.unraw().to_string());
    let (impl_generics, ty_generics, where_clause) = receiver.generics.split_for_impl();

    let shapes = model_fields.iter().map(|field| {
        let name = &field.name;
        let native = field.kind.to_tokens();
        let exported = field.exported;
        quote! {
            ::model_admin::FieldShape {
                name: #name,
                native: #native,
                exported: #exported,
            }
        }
    });

    let value_arms = model_fields
        .iter()
        .filter(|field| field.is_readable())
        .map(|field| {
            let name = &field.name;
            let value = field.value_expr();
            quote! { #name => ::core::option::Option::Some(#value), }
        });

    Ok(quote! {
        impl #impl_generics ::model_admin::AdminModel for #ident #ty_generics #where_clause {
            const ENTITY_NAME: &'static str = #entity_name;
            const FIELDS: &'static [::model_admin::FieldShape] = &[#(#shapes),*];
        }

        impl #impl_generics ::model_admin::Record for #ident #ty_generics #where_clause {
            fn record_id(&self) -> ::model_admin::RecordId {
                ::model_admin::RecordKey::record_key(&self.#id_field)
            }

            fn field_value(&self, name: &str) -> ::core::option::Option<::model_admin::FieldValue> {
                match name {
                    #(#value_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

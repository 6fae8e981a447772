//! Type classification for the derive macros
//!
//! Maps a field's declared Rust type onto the closed set of native kinds the
//! admin engine understands.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{GenericArgument, PathArguments, Type};

/// Native kind of a field, mirrored by `model_admin::NativeType`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeKind {
    Text,
    Signed,
    Unsigned,
    Float,
    Bool,
    Timestamp,
    Reference,
    Other(String),
    Optional(Box<NativeKind>),
}

impl NativeKind {
    /// The kind with every `Optional` layer removed
    pub fn underlying(&self) -> &Self {
        match self {
            Self::Optional(inner) => inner.underlying(),
            other => other,
        }
    }

    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Tokens building the matching `model_admin::NativeType` in a const
    pub fn to_tokens(&self) -> TokenStream {
        match self {
            Self::Text => quote! { ::model_admin::NativeType::Text },
            Self::Signed => quote! { ::model_admin::NativeType::Signed },
            Self::Unsigned => quote! { ::model_admin::NativeType::Unsigned },
            Self::Float => quote! { ::model_admin::NativeType::Float },
            Self::Bool => quote! { ::model_admin::NativeType::Bool },
            Self::Timestamp => quote! { ::model_admin::NativeType::Timestamp },
            Self::Reference => quote! { ::model_admin::NativeType::Reference },
            Self::Other(name) => quote! { ::model_admin::NativeType::Other(#name) },
            Self::Optional(inner) => {
                let inner = inner.to_tokens();
                quote! { ::model_admin::NativeType::Optional(&#inner) }
            }
        }
    }
}

/// Classify a field type
///
/// `Option<T>` becomes `Optional`. `Box`, `Arc`, `Rc` and references are
/// looked through. With `reference` set, the innermost type is a `Reference`
/// whatever it is.
pub fn classify(ty: &Type, reference: bool) -> NativeKind {
    match ty {
        Type::Reference(inner) => classify(&inner.elem, reference),
        Type::Paren(inner) => classify(&inner.elem, reference),
        Type::Group(inner) => classify(&inner.elem, reference),
        Type::Path(type_path) if type_path.qself.is_none() => {
            let Some(segment) = type_path.path.segments.last() else {
                return NativeKind::Other(String::new());
            };
            let ident = segment.ident.to_string();
            match (ident.as_str(), first_type_argument(&segment.arguments)) {
                ("Option", Some(inner)) => NativeKind::Optional(Box::new(classify(inner, reference))),
                ("Box" | "Arc" | "Rc", Some(inner)) => classify(inner, reference),
                _ if reference => NativeKind::Reference,
                (name, _) => classify_name(name),
            }
        }
        _ if reference => NativeKind::Reference,
        other => NativeKind::Other(quote!(#other).to_string()),
    }
}

fn classify_name(name: &str) -> NativeKind {
    match name {
        "String" | "str" | "Cow" => NativeKind::Text,
        "i8" | "i16" | "i32" | "i64" | "i128" | "isize" => NativeKind::Signed,
        "u8" | "u16" | "u32" | "u64" | "u128" | "usize" => NativeKind::Unsigned,
        "f32" | "f64" => NativeKind::Float,
        "bool" => NativeKind::Bool,
        "DateTime" | "NaiveDateTime" | "NaiveDate" | "SystemTime" => NativeKind::Timestamp,
        other => NativeKind::Other(other.to_owned()),
    }
}

fn first_type_argument(arguments: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

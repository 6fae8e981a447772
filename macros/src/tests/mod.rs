//! Unit tests for the derive macro internals

use quote::quote;
use syn::parse_quote;

use crate::admin_model::expand;
use crate::utils::{NativeKind, classify};

#[test]
fn test_classify_primitives() {
    assert_eq!(classify(&parse_quote!(String), false), NativeKind::Text);
    assert_eq!(classify(&parse_quote!(&'static str), false), NativeKind::Text);
    assert_eq!(classify(&parse_quote!(i32), false), NativeKind::Signed);
    assert_eq!(classify(&parse_quote!(u64), false), NativeKind::Unsigned);
    assert_eq!(classify(&parse_quote!(f64), false), NativeKind::Float);
    assert_eq!(classify(&parse_quote!(bool), false), NativeKind::Bool);
}

#[test]
fn test_classify_timestamps() {
    assert_eq!(
        classify(&parse_quote!(chrono::DateTime<chrono::Utc>), false),
        NativeKind::Timestamp
    );
    assert_eq!(classify(&parse_quote!(NaiveDate), false), NativeKind::Timestamp);
    assert_eq!(
        classify(&parse_quote!(std::time::SystemTime), false),
        NativeKind::Timestamp
    );
}

#[test]
fn test_classify_wrappers() {
    assert_eq!(
        classify(&parse_quote!(Option<String>), false),
        NativeKind::Optional(Box::new(NativeKind::Text))
    );
    assert_eq!(classify(&parse_quote!(Box<i64>), false), NativeKind::Signed);
    assert_eq!(
        classify(&parse_quote!(Vec<u8>), false),
        NativeKind::Other("Vec".to_owned())
    );
}

#[test]
fn test_classify_reference() {
    assert_eq!(classify(&parse_quote!(User), true), NativeKind::Reference);
    assert_eq!(
        classify(&parse_quote!(Option<Box<User>>), true),
        NativeKind::Optional(Box::new(NativeKind::Reference))
    );
    assert_eq!(
        classify(&parse_quote!(User), false),
        NativeKind::Other("User".to_owned())
    );
}

#[test]
fn test_expand_emits_both_impls() {
    let input = parse_quote! {
        #[admin(name = "Fruit")]
        pub struct FruitRow {
            pub id: i64,
            pub name: String,
            stock: i32,
            #[admin(skip)]
            pub cache: Vec<u8>,
        }
    };
    let output = expand(&input).unwrap().to_string();
    assert!(output.contains("ENTITY_NAME"));
    assert!(output.contains("\"Fruit\""));
    assert!(!output.contains("\"FruitRow\""));
    assert!(output.contains("\"name\" =>"));
    // Private fields are described but not readable
    assert!(output.contains("name : \"stock\""));
    assert!(!output.contains("\"stock\" =>"));
    assert!(!output.contains("cache"));
}

#[test]
fn test_expand_requires_identifier() {
    let input = parse_quote! {
        pub struct Orphan {
            pub name: String,
        }
    };
    let err = expand(&input).unwrap_err();
    assert!(err.to_string().contains("`id` field"));
}

#[test]
fn test_optional_native_tokens() {
    let tokens = NativeKind::Optional(Box::new(NativeKind::Signed)).to_tokens();
    let expected = quote! {
        ::model_admin::NativeType::Optional(&::model_admin::NativeType::Signed)
    };
    assert_eq!(tokens.to_string(), expected.to_string());
}

use std::sync::Arc;

use model_admin::{
    CatalogBuilder, Context, FieldValue, MemorySettings, ModelRegistration, NativeType, Record,
    Registry, Result, SaveKind,
};

use crate::utils::{Fruit, RecordingAdapter, SingleEntityClient, form, init_logging};

fn fruit_registry(adapter: Arc<RecordingAdapter>) -> Registry {
    let client = SingleEntityClient {
        entity: "Fruit",
        adapter,
    };
    let mut builder = CatalogBuilder::new(Arc::new(client));
    builder.register(ModelRegistration::<Fruit>::new());
    Registry::new(builder.build(), Arc::new(MemorySettings::new()))
}

#[tokio::test]
async fn test_create_sets_each_field_and_saves_once() -> Result<()> {
    init_logging();
    let adapter = Arc::new(RecordingAdapter::with_setters(&[
        ("name", NativeType::Text),
        ("stock", NativeType::Signed),
    ]));
    let registry = fruit_registry(Arc::clone(&adapter));

    let fruit = registry.get("Fruit")?;
    let record = fruit
        .create(&Context::new(), form(&[("name", "Apple"), ("stock", "5")]))
        .await?;

    assert_eq!(
        adapter.calls(),
        vec![
            ("name".to_owned(), FieldValue::from("Apple")),
            ("stock".to_owned(), FieldValue::Integer(5)),
        ]
    );
    assert_eq!(adapter.save_count(), 1);
    assert_eq!(record.record_id(), 1);
    assert_eq!(record.display_label(), "Apple");
    Ok(())
}

#[tokio::test]
async fn test_unknown_and_readonly_fields_are_skipped() -> Result<()> {
    let adapter = Arc::new(RecordingAdapter::with_setters(&[("name", NativeType::Text)]));
    let registry = fruit_registry(Arc::clone(&adapter));

    registry
        .get("fruit")?
        .create(
            &Context::new(),
            form(&[("id", "99"), ("name", "Pear"), ("colour", "green")]),
        )
        .await?;

    assert_eq!(
        adapter.calls(),
        vec![("name".to_owned(), FieldValue::from("Pear"))]
    );
    Ok(())
}

#[tokio::test]
async fn test_pre_save_hook_rewrites_data() -> Result<()> {
    let adapter = Arc::new(RecordingAdapter::with_setters(&[
        ("name", NativeType::Text),
        ("stock", NativeType::Signed),
    ]));
    let client = SingleEntityClient {
        entity: "Fruit",
        adapter: Arc::clone(&adapter) as _,
    };
    let mut builder = CatalogBuilder::new(Arc::new(client));
    builder.register(ModelRegistration::<Fruit>::new().with_pre_save_fn(|kind, data| {
        assert_eq!(kind, SaveKind::Create);
        if let Some(FieldValue::Text(name)) = data.get_mut("name") {
            *name = name.to_uppercase();
        }
        data.insert("stock".to_owned(), FieldValue::Integer(0));
        Ok(())
    }));
    let catalog = builder.build();

    catalog
        .get("Fruit")?
        .create(&Context::new(), form(&[("name", "kiwi")]))
        .await?;

    assert_eq!(
        adapter.calls(),
        vec![
            ("name".to_owned(), FieldValue::from("KIWI")),
            ("stock".to_owned(), FieldValue::Integer(0)),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_rejecting_hook_prevents_save() {
    let adapter = Arc::new(RecordingAdapter::with_setters(&[("name", NativeType::Text)]));
    let client = SingleEntityClient {
        entity: "Fruit",
        adapter: Arc::clone(&adapter) as _,
    };
    let mut builder = CatalogBuilder::new(Arc::new(client));
    builder.register(
        ModelRegistration::<Fruit>::new()
            .with_pre_save_fn(|_kind, _data| anyhow::bail!("duplicate name")),
    );
    let catalog = builder.build();

    let err = catalog
        .get("Fruit")
        .unwrap()
        .create(&Context::new(), form(&[("name", "Fig")]))
        .await
        .unwrap_err();

    assert!(matches!(err, model_admin::AdminError::Hook { .. }));
    assert!(err.to_string().contains("duplicate name"));
    assert!(adapter.calls().is_empty());
    assert_eq!(adapter.save_count(), 0);
}

#[tokio::test]
async fn test_setter_lookup_is_directional() -> Result<()> {
    // `author` falls back to `author_id`
    let adapter = Arc::new(RecordingAdapter::with_setters(&[("author_id", NativeType::Signed)]));
    fruit_registry(Arc::clone(&adapter))
        .get("Fruit")?
        .create(&Context::new(), form(&[("author", "3")]))
        .await?;
    assert_eq!(
        adapter.calls(),
        vec![("author_id".to_owned(), FieldValue::Integer(3))]
    );

    // `author_id` never falls back to `author`
    let adapter = Arc::new(RecordingAdapter::with_setters(&[
        ("name", NativeType::Text),
        ("author", NativeType::Signed),
    ]));
    fruit_registry(Arc::clone(&adapter))
        .get("Fruit")?
        .create(&Context::new(), form(&[("name", "Apple"), ("author_id", "3")]))
        .await?;
    assert_eq!(
        adapter.calls(),
        vec![("name".to_owned(), FieldValue::from("Apple"))]
    );
    Ok(())
}

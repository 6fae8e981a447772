use std::sync::Arc;

use model_admin::{
    AdminError, CatalogBuilder, Context, DispatchErrorKind, MemoryClient, ModelRegistration,
    NativeType,
};

use crate::utils::{Fruit, RecordingAdapter, SingleEntityClient, form};

#[tokio::test]
async fn test_missing_handle() {
    let mut builder = CatalogBuilder::new(Arc::new(MemoryClient::new()));
    builder.register(ModelRegistration::<Fruit>::new());
    let catalog = builder.build();
    let fruit = catalog.get("Fruit").unwrap();
    let ctx = Context::new();

    let err = fruit.list(&ctx).await.unwrap_err();
    assert_eq!(err.dispatch_kind(), Some(DispatchErrorKind::MissingHandle));

    let err = fruit.create(&ctx, form(&[("name", "Apple")])).await.unwrap_err();
    assert_eq!(err.dispatch_kind(), Some(DispatchErrorKind::MissingHandle));
}

#[tokio::test]
async fn test_missing_operation() {
    let client = SingleEntityClient {
        entity: "Fruit",
        adapter: Arc::new(RecordingAdapter::with_setters(&[("name", NativeType::Text)])),
    };
    let mut builder = CatalogBuilder::new(Arc::new(client));
    builder.register(ModelRegistration::<Fruit>::new());
    let catalog = builder.build();
    let fruit = catalog.get("Fruit").unwrap();
    let ctx = Context::new();

    for err in [
        fruit.list(&ctx).await.unwrap_err(),
        fruit.count(&ctx).await.unwrap_err(),
        fruit.get(&ctx, 1).await.unwrap_err(),
        fruit.update(&ctx, 1, form(&[("name", "Plum")])).await.unwrap_err(),
        fruit.delete(&ctx, 1).await.unwrap_err(),
    ] {
        assert_eq!(err.dispatch_kind(), Some(DispatchErrorKind::MissingOperation), "{err}");
    }
}

#[tokio::test]
async fn test_handle_alias() {
    let adapter = Arc::new(RecordingAdapter::with_setters(&[("name", NativeType::Text)]));
    let client = SingleEntityClient {
        entity: "fruits",
        adapter: Arc::clone(&adapter) as _,
    };
    let mut builder = CatalogBuilder::new(Arc::new(client));
    builder.register(ModelRegistration::<Fruit>::new().with_handle("fruits"));
    let catalog = builder.build();

    catalog
        .get("Fruit")
        .unwrap()
        .create(&Context::new(), form(&[("name", "Lime")]))
        .await
        .unwrap();
    assert_eq!(adapter.save_count(), 1);
}

#[test]
fn test_unknown_entity() {
    let catalog = CatalogBuilder::new(Arc::new(MemoryClient::new())).build();
    let err = catalog.get("Fruit").unwrap_err();
    assert!(matches!(err, AdminError::EntityNotFound(ref name) if name == "Fruit"));
    assert!(err.is_not_found());
}

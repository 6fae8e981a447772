use std::sync::Arc;

use model_admin::{
    AdminConfig, CatalogBuilder, DisplayOrder, FileSettings, MemoryClient, MemorySettings,
    ModelRegistration, Registry, Result, SettingsStore,
};

use crate::utils::{Alpha, Bravo, Charlie, init_logging};

fn abc_registry(settings: Arc<dyn SettingsStore>) -> Registry {
    let mut builder = CatalogBuilder::new(Arc::new(MemoryClient::new()));
    builder
        .register(ModelRegistration::<Alpha>::new())
        .register(ModelRegistration::<Bravo>::new())
        .register(ModelRegistration::<Charlie>::new());
    Registry::new(builder.build(), settings)
}

async fn listed(registry: &Registry) -> Vec<String> {
    registry
        .list()
        .await
        .into_iter()
        .map(|model| model.name().to_owned())
        .collect()
}

#[tokio::test]
async fn test_registration_order_by_default() {
    let registry = abc_registry(Arc::new(MemorySettings::new()));
    assert_eq!(listed(&registry).await, ["A", "B", "C"]);
    assert_eq!(registry.display_order(), DisplayOrder::Registration);
}

#[tokio::test]
async fn test_saved_order_then_unlisted_models() -> Result<()> {
    init_logging();
    let registry = abc_registry(Arc::new(MemorySettings::new()));

    registry.save_order(&["B", "A"]).await?;

    assert_eq!(
        registry.display_order(),
        DisplayOrder::Persisted(vec!["B".to_owned(), "A".to_owned()])
    );
    assert_eq!(listed(&registry).await, ["B", "A", "C"]);
    Ok(())
}

#[tokio::test]
async fn test_stale_and_duplicate_names_are_dropped() {
    let settings = Arc::new(MemorySettings::new());
    settings
        .upsert("admin_model_order", r#"["C","Gone","c","A"]"#.to_owned())
        .await
        .unwrap();
    let registry = abc_registry(settings);

    assert_eq!(listed(&registry).await, ["C", "A", "B"]);
}

#[tokio::test]
async fn test_unreadable_order_falls_back() {
    let settings = Arc::new(MemorySettings::new());
    settings
        .upsert("admin_model_order", "B,A".to_owned())
        .await
        .unwrap();
    let registry = abc_registry(settings);

    assert_eq!(listed(&registry).await, ["A", "B", "C"]);
}

#[tokio::test]
async fn test_list_reloads_external_changes() {
    let settings = Arc::new(MemorySettings::new());
    let registry = abc_registry(Arc::clone(&settings) as _);
    assert_eq!(listed(&registry).await, ["A", "B", "C"]);

    settings
        .upsert("admin_model_order", r#"["C"]"#.to_owned())
        .await
        .unwrap();
    assert_eq!(listed(&registry).await, ["C", "A", "B"]);
}

#[tokio::test]
async fn test_order_key_comes_from_config() -> Result<()> {
    let settings = Arc::new(MemorySettings::new());
    let config = AdminConfig::from_json_str(r#"{ "order_settings_key": "sidebar" }"#)?;
    let mut builder = CatalogBuilder::new(Arc::new(MemoryClient::new())).with_config(config);
    builder
        .register(ModelRegistration::<Alpha>::new())
        .register(ModelRegistration::<Bravo>::new());
    let registry = Registry::new(builder.build(), Arc::clone(&settings) as _);

    registry.save_order(&["B"]).await?;

    assert_eq!(
        settings.get("sidebar").await.unwrap().as_deref(),
        Some(r#"["B"]"#)
    );
    assert_eq!(settings.get("admin_model_order").await.unwrap(), None);
    Ok(())
}

#[tokio::test]
async fn test_file_settings_order_survives_restart() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let registry = abc_registry(Arc::new(FileSettings::new(&path)));
    registry.save_order(&["C", "B", "A"]).await?;
    drop(registry);

    let reopened = abc_registry(Arc::new(FileSettings::new(&path)));
    assert_eq!(listed(&reopened).await, ["C", "B", "A"]);
    Ok(())
}

#[test]
fn test_case_insensitive_lookup() {
    let registry = abc_registry(Arc::new(MemorySettings::new()));
    assert_eq!(registry.get("b").unwrap().name(), "B");
    assert!(registry.get("D").unwrap_err().is_not_found());
}

#[test]
fn test_default_names() {
    let registry = abc_registry(Arc::new(MemorySettings::new()));
    let model = registry.get("A").unwrap();
    assert_eq!(model.display_name(), "A");
    assert_eq!(model.plural(), "As");
    assert_eq!(model.icon(), None);
}

#[test]
fn test_duplicate_registration_keeps_position() {
    let mut builder = CatalogBuilder::new(Arc::new(MemoryClient::new()));
    builder
        .register(ModelRegistration::<Alpha>::new())
        .register(ModelRegistration::<Bravo>::new())
        .register(ModelRegistration::<Alpha>::new().with_plural("Alphas"));
    let catalog = builder.build();

    assert_eq!(catalog.len(), 2);
    let names: Vec<_> = catalog.models().map(|model| model.plural()).collect();
    assert_eq!(names, ["Alphas", "Bs"]);
}

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use log::info;
use model_admin::{
    AdminConfig, AdminModel, CatalogBuilder, Context, FieldDescriptor, FieldMap, FieldValue,
    FileSettings, MemoryClient, MemorySettings, ModelRegistration, Record, Registry, SaveKind,
    SemanticType, SettingsStore,
};

#[derive(Debug, AdminModel)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, AdminModel)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    #[admin(reference)]
    pub author: Option<Box<User>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stand-in for a real password hasher
fn hash_password(kind: SaveKind, data: &mut FieldMap) -> anyhow::Result<()> {
    match data.remove("password") {
        Some(FieldValue::Text(password)) if password.len() >= 8 => {
            let hashed: String = password.chars().rev().collect();
            data.insert("password_hash".to_owned(), FieldValue::Text(format!("demo${hashed}")));
            Ok(())
        }
        Some(FieldValue::Text(password)) if password.is_empty() && kind != SaveKind::Create => Ok(()),
        None if kind != SaveKind::Create => Ok(()),
        _ => anyhow::bail!("password must be at least 8 characters"),
    }
}

fn form(entries: &[(&str, &str)]) -> FieldMap {
    entries
        .iter()
        .map(|(name, value)| ((*name).to_owned(), FieldValue::from(*value)))
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Optional config file and settings file from the command line
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {path}"))?;
            AdminConfig::from_json_str(&raw)?
        }
        None => AdminConfig::default(),
    };
    let settings: Arc<dyn SettingsStore> = match args.next() {
        Some(path) => Arc::new(FileSettings::new(PathBuf::from(path))),
        None => Arc::new(MemorySettings::new()),
    };

    let client = MemoryClient::new().with_model::<User>().with_model::<Post>();
    let mut builder = CatalogBuilder::new(Arc::new(client)).with_config(config);
    builder
        .register(
            ModelRegistration::<User>::new()
                .with_icon("users")
                .hide_fields(["password_hash"])
                .with_extra_field(
                    FieldDescriptor::new("password", SemanticType::Password)
                        .sensitive()
                        .with_help("At least 8 characters"),
                )
                .with_pre_save_fn(hash_password),
        )
        .register(
            ModelRegistration::<Post>::new()
                .with_icon("file-text")
                .with_query_modifier_fn(|query| query.order_by("id", true)),
        );
    let registry = Registry::new(builder.build(), settings);
    let ctx = Context::new().with_request_id("demo");

    let users = registry.get("user")?;
    let alice = form(&[
        ("name", "Alice"),
        ("email", "alice@example.com"),
        ("password", "correct horse"),
        ("is_admin", "on"),
    ]);
    users.validate(&alice)?;
    let alice = users.create(&ctx, alice).await?;
    info!("Created user {}", alice.display_label());

    let posts = registry.get("Post")?;
    let author = alice.record_id().to_string();
    for title in ["Hello", "Second thoughts", "Release notes"] {
        let data = form(&[
            ("title", title),
            ("body", ""),
            ("published", "true"),
            ("published_at", "2024-03-01T09:30"),
            ("author", author.as_str()),
        ]);
        posts.create(&ctx, data).await?;
    }

    let page = posts.page(&ctx, 1, Some(2)).await?;
    info!(
        "{} page {}/{} ({} total)",
        posts.plural(),
        page.page,
        page.total_pages(),
        page.total
    );
    for record in &page.items {
        let row = posts
            .display_row(record.as_ref())
            .into_iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect::<Vec<_>>()
            .join(", ");
        info!("  {row}");
    }

    registry.save_order(&["Post", "User"]).await?;
    let order: Vec<_> = registry
        .list()
        .await
        .into_iter()
        .map(|model| model.plural().to_owned())
        .collect();
    info!("Models in display order: {}", order.join(", "));

    Ok(())
}

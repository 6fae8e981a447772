use std::sync::Arc;

use model_admin::{
    AdminError, CatalogBuilder, Context, FieldValue, MemoryClient, MemorySettings,
    ModelRegistration, Record, Reference, Registry, Result,
};

use crate::utils::{Post, User, blog_registry, form, init_logging};

fn alice() -> model_admin::FieldMap {
    form(&[
        ("name", "Alice"),
        ("email", "alice@example.com"),
        ("password_hash", "x"),
    ])
}

#[tokio::test]
async fn test_user_lifecycle() -> Result<()> {
    init_logging();
    let registry = blog_registry();
    let users = registry.get("User")?;
    let ctx = Context::new();

    let created = users.create(&ctx, alice()).await?;
    assert_eq!(created.record_id(), 1);
    assert_eq!(created.display_label(), "Alice");
    assert!(matches!(created.field_value("created_at"), Some(FieldValue::Timestamp(_))));

    let updated = users.update(&ctx, 1, form(&[("name", "Alicia")])).await?;
    assert_eq!(updated.field_value("name"), Some(FieldValue::from("Alicia")));
    assert_eq!(
        updated.field_value("email"),
        Some(FieldValue::from("alice@example.com"))
    );

    let fetched = users.get(&ctx, 1).await?;
    assert_eq!(fetched.display_label(), "Alicia");
    assert_eq!(users.count(&ctx).await?, 1);

    users.delete(&ctx, 1).await?;
    assert_eq!(users.count(&ctx).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_missing_records() {
    let registry = blog_registry();
    let users = registry.get("User").unwrap();
    let ctx = Context::new();

    for err in [
        users.get(&ctx, 42).await.unwrap_err(),
        users.update(&ctx, 42, form(&[("name", "Bob")])).await.unwrap_err(),
        users.delete(&ctx, 42).await.unwrap_err(),
    ] {
        assert!(
            matches!(err, AdminError::RecordNotFound { ref entity, id: 42 } if entity == "User"),
            "{err}"
        );
    }
}

#[tokio::test]
async fn test_post_reference_and_display() -> Result<()> {
    let registry = blog_registry();
    let ctx = Context::new();
    let author = registry.get("User")?.create(&ctx, alice()).await?;

    let author_id = author.record_id().to_string();
    let posts = registry.get("post")?;
    let post = posts
        .create(
            &ctx,
            form(&[
                ("title", "Hello"),
                ("body", ""),
                ("published", "on"),
                ("published_at", "2024-03-01T09:30"),
                ("author", author_id.as_str()),
            ]),
        )
        .await?;

    assert_eq!(post.field_value("body"), Some(FieldValue::from("")));
    assert_eq!(post.field_value("author_id"), Some(FieldValue::Integer(1)));
    assert!(matches!(
        post.field_value("author"),
        Some(FieldValue::Reference(Some(Reference { id: 1, .. })))
    ));

    let row = posts.display_row(post.as_ref());
    let cell = |label: &str| {
        row.iter()
            .find(|(column, _)| column == label)
            .map(|(_, value)| value.clone())
    };
    assert_eq!(cell("Title").as_deref(), Some("Hello"));
    assert_eq!(cell("Published").as_deref(), Some("✓"));
    assert_eq!(cell("Published At").as_deref(), Some("Mar 1, 2024 9:30 AM"));
    assert_eq!(cell("Author").as_deref(), Some("#1"));
    Ok(())
}

#[tokio::test]
async fn test_unset_optional_values_display_empty() -> Result<()> {
    let registry = blog_registry();
    let ctx = Context::new();
    let posts = registry.get("Post")?;
    let post = posts
        .create(&ctx, form(&[("title", "Draft"), ("published_at", "")]))
        .await?;

    assert_eq!(post.field_value("published_at"), Some(FieldValue::Null));
    let row = posts.display_row(post.as_ref());
    assert!(row.contains(&("Published At".to_owned(), String::new())));
    assert!(row.contains(&("Author".to_owned(), String::new())));
    Ok(())
}

#[tokio::test]
async fn test_sensitive_fields_not_displayed() -> Result<()> {
    let registry = blog_registry();
    let users = registry.get("User")?;
    let user = users.create(&Context::new(), alice()).await?;

    let labels: Vec<_> = users
        .display_row(user.as_ref())
        .into_iter()
        .map(|(label, _)| label)
        .collect();
    assert_eq!(labels, ["ID", "Name", "Email", "Created At", "Updated At"]);
    Ok(())
}

#[tokio::test]
async fn test_invalid_value_is_rejected() {
    let registry = blog_registry();
    let err = registry
        .get("Post")
        .unwrap()
        .create(&Context::new(), form(&[("title", "Hi"), ("published", "maybe")]))
        .await
        .unwrap_err();
    assert!(matches!(err, AdminError::Validation { ref field, .. } if field == "published"));
}

#[test]
fn test_validate_reports_first_missing_field() {
    let registry = blog_registry();
    let users = registry.get("User").unwrap();

    let err = users.validate(&form(&[("name", "Bob"), ("email", "")])).unwrap_err();
    assert!(matches!(err, AdminError::Validation { ref field, .. } if field == "email"));
    assert!(users.validate(&alice()).is_ok());
}

#[tokio::test]
async fn test_pagination() -> Result<()> {
    let registry = blog_registry();
    let users = registry.get("User")?;
    let ctx = Context::new();
    for name in ["a", "b", "c", "d", "e"] {
        users
            .create(&ctx, form(&[("name", name), ("email", "x"), ("password_hash", "x")]))
            .await?;
    }

    let page = users.page(&ctx, 2, Some(2)).await?;
    assert_eq!(page.total, 5);
    assert_eq!(page.total_pages(), 3);
    let ids: Vec<_> = page.items.iter().map(|record| record.record_id()).collect();
    assert_eq!(ids, [3, 4]);

    let page = users.page(&ctx, 0, Some(1000)).await?;
    assert_eq!(page.page, 1);
    assert_eq!(page.per_page, 100);
    assert_eq!(page.items.len(), 5);

    let page = users.page(&ctx, 1, None).await?;
    assert_eq!(page.per_page, 20);
    Ok(())
}

#[tokio::test]
async fn test_zero_limit_lists_past_offset() -> Result<()> {
    let registry = blog_registry();
    let users = registry.get("User")?;
    let ctx = Context::new();
    for name in ["a", "b", "c"] {
        users
            .create(&ctx, form(&[("name", name), ("email", "x"), ("password_hash", "x")]))
            .await?;
    }

    let ids: Vec<_> = users
        .list_paginated(&ctx, 0, 1)
        .await?
        .iter()
        .map(|record| record.record_id())
        .collect();
    assert_eq!(ids, [2, 3]);
    assert_eq!(users.list_paginated(&ctx, 0, 0).await?.len(), 3);
    assert_eq!(users.list_paginated(&ctx, 1, 0).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_page_far_past_the_end_is_empty() -> Result<()> {
    let registry = blog_registry();
    let users = registry.get("User")?;
    let ctx = Context::new();
    users.create(&ctx, alice()).await?;

    let page = users.page(&ctx, usize::MAX, Some(20)).await?;
    assert_eq!(page.total, 1);
    assert!(page.items.is_empty());
    assert!(!page.has_next());
    Ok(())
}

#[tokio::test]
async fn test_query_modifier_applies_to_reads() -> Result<()> {
    let client = MemoryClient::new().with_model::<User>().with_model::<Post>();
    let mut builder = CatalogBuilder::new(Arc::new(client));
    builder.register(
        ModelRegistration::<Post>::new()
            .with_query_modifier_fn(|query| query.order_by("title", true)),
    );
    let registry = Registry::new(builder.build(), Arc::new(MemorySettings::new()));
    let posts = registry.get("Post")?;
    let ctx = Context::new();
    for title in ["b", "c", "a"] {
        posts.create(&ctx, form(&[("title", title)])).await?;
    }

    let titles: Vec<_> = posts
        .list(&ctx)
        .await?
        .iter()
        .filter_map(|record| record.field_value("title"))
        .collect();
    assert_eq!(
        titles,
        [FieldValue::from("c"), FieldValue::from("b"), FieldValue::from("a")]
    );
    assert_eq!(posts.list_paginated(&ctx, 1, 1).await?.len(), 1);
    Ok(())
}

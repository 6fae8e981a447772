//! Procedural macros for the model-admin crate
//!
//! This crate provides `#[derive(AdminModel)]`, which describes a struct's
//! fields at compile time so the admin engine can derive forms, read views
//! and record access without runtime reflection.

use proc_macro::TokenStream;

mod admin_model;
mod utils;

#[cfg(test)]
mod tests;

/// Derive macro for admin models
///
/// Generates `model_admin::AdminModel` (entity name and field shapes) and
/// `model_admin::Record` (identifier and per-field values) for a struct with
/// named fields. The struct must also implement `Debug`.
///
/// Only `pub` fields are readable through the generated `Record`. The
/// identifier is the field named `id` unless another field is marked
/// `#[admin(id)]`.
///
/// # Attributes
///
/// * `#[admin(name = "...")]` on the struct overrides the entity name
/// * `#[admin(skip)]` leaves a field out entirely
/// * `#[admin(id)]` marks the identifier field
/// * `#[admin(reference)]` marks a field holding another record, exposed as a
///   reference value and set through `<field>_id`
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug, AdminModel)]
/// pub struct Post {
///     pub id: i64,
///     pub title: String,
///     pub body: String,
///     pub published_at: Option<DateTime<Utc>>,
///     #[admin(reference)]
///     pub author: Option<Box<User>>,
///     #[admin(skip)]
///     pub cache: PostCache,
/// }
/// ```
#[proc_macro_derive(AdminModel, attributes(admin))]
pub fn derive_admin_model(input: TokenStream) -> TokenStream {
    admin_model::process_derive_admin_model(input)
}

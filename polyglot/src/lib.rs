//! # Polyglot - Localized Document Collections
//!
//! Polyglot keeps every translation of a record inside the record itself and
//! hands callers a single, flat document in the language they work in.
//!
//! ## Key Features
//!
//! - **Co-located locales**: content of each locale lives under `i18n`, keyed
//!   by locale code, next to the shared metadata
//! - **Transparent reads**: list, find and child reads return the working
//!   locale's content merged onto the record, falling back to the record's
//!   native language
//! - **Explicit context**: locale switches are values owned by a collection or
//!   a request-scoped view, not process-wide state
//! - **Pluggable storage**: any [CollectionProvider](collection::CollectionProvider)
//!   can sit underneath; an in-memory one ships with the crate
//! - **Migration**: a batch job seeds `i18n` on records written before
//!   localization, with a per-record report
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use polyglot::collection::{Collection, InMemoryCollection, LocalizableCollection, WriteOptions};
//! use polyglot::doc;
//!
//! let pages = LocalizableCollection::new(Collection::new(InMemoryCollection::new("pages")));
//!
//! pages.create(doc!{
//!     id: "home",
//!     nativeLanguage: "en",
//!     i18n: {
//!         en: { title: "Welcome" },
//!         fr: { title: "Bienvenue" },
//!     },
//! }, &WriteOptions::default())?;
//!
//! let fr = pages.with_context(pages.context().clone().with_working_locale("fr"));
//! let page = fr.find_by_id("home", false)?.unwrap();
//! assert_eq!(page.get("title")?, "Bienvenue".into());
//! ```
//!
//! ## Modules
//!
//! - [`collection`]: documents, the base collection contract and the localized facade
//! - [`common`]: the value model, field names and sort orders
//! - [`errors`]: error kinds and the crate error type
//! - [`filter`]: filters evaluated against stored records
//! - [`i18n`]: merge, field classification, locale resolution and migration

pub mod collection;
pub mod common;
pub mod errors;
pub mod filter;
pub mod i18n;

//! Localization of stored records.
//!
//! A localized record keeps its metadata at the top level and the content of
//! every locale under `i18n`, keyed by locale code. `nativeLanguage` names the
//! locale the record was first written in.
//!
//! - [merge] flattens a locale entry onto its record.
//! - [FieldClassifier] decides which fields are metadata and which are
//!   localizable.
//! - [LocaleContext] carries the localization switches of a facade or request.
//! - [LocaleResolver] picks the locale to surface, with fallback to the
//!   native language.
//! - [add_localization] and [LocalizationMigration] seed `i18n` on records
//!   written before localization was enabled.
//!
//! # Examples
//!
//! ```rust
//! use polyglot::doc;
//! use polyglot::common::Value;
//! use polyglot::i18n::{add_localization, FieldClassifier, LocaleContext, LocaleResolver};
//!
//! let ctx = LocaleContext::default().with_include_i18n(false);
//! let seeded = add_localization(&FieldClassifier::new(), &ctx, &doc! { id: "1", title: "Hi" });
//! let flat = LocaleResolver::new(&ctx).resolve_document(seeded).unwrap();
//! assert_eq!(flat.get("title").unwrap(), Value::from("Hi"));
//! assert!(!flat.contains_key("i18n"));
//! ```

mod context;
mod fields;
mod localizer;
mod merger;
mod migration;
mod resolver;

pub use context::*;
pub use fields::*;
pub use localizer::*;
pub use merger::*;
pub use migration::*;
pub use resolver::*;

//! Documents, the base collection contract and the localizable facade.
//!
//! # Documents
//!
//! A `Document` is a key-value map where keys are strings and values are `Value` objects.
//! Nested fields are addressed with the `.` separator.
//!
//! ```rust,ignore
//! use polyglot::collection::Document;
//!
//! let mut doc = Document::new();
//! doc.put("title", "Hello")?;
//! doc.put("i18n.fr.title", "Bonjour")?;
//! ```
//!
//! # Collections
//!
//! A [Collection] wraps any [CollectionProvider]. The crate ships
//! [InMemoryCollection]; other storage engines implement the trait themselves.
//!
//! A [LocalizableCollection] sits in front of a base collection: stored records
//! keep every locale under `i18n` and reads return the working locale's content
//! flattened onto the record.
//!
//! ```rust,ignore
//! use polyglot::collection::{Collection, InMemoryCollection, LocalizableCollection};
//!
//! let base = Collection::new(InMemoryCollection::new("pages"));
//! let mut pages = LocalizableCollection::builder(base)
//!     .non_localizable_fields(["blockId"])
//!     .build();
//! pages.set_working_locale(Some("fr"))?;
//! let page = pages.find_by_id("42", false)?;
//! ```
//!
//! # Reserved Fields
//!
//! - `id` - Document ID
//! - `version` - Bumped on every write
//! - `createTime` / `lastUpdateTime` - Epoch milliseconds
//! - `nativeLanguage` - Locale the record was first written in
//! - `i18n` - Locale code to localized content

mod base_collection;
mod document;
mod localizable_collection;
mod memory_collection;
mod write_options;

pub use base_collection::*;
pub use document::*;
pub use localizable_collection::*;
pub use memory_collection::*;
pub use write_options::*;

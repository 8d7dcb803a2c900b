//! Query filters for selecting stored documents.
//!
//! Filters are opaque values handed through the localizable facade to the base
//! collection. They always match against the **stored** record, before any
//! locale is resolved, so `field("i18n.fr.title").eq("Bonjour")` works while
//! `field("title")` only sees top-level, non-localized values.
//!
//! # Examples
//!
//! ```rust,ignore
//! use polyglot::filter::{all, by_id, field};
//!
//! let online = field("online").eq(true);
//! let in_section = field("parentId").in_array(vec!["news", "blog"]);
//! let filter = online.and(in_section);
//! let one = by_id("42");
//! ```

mod basic_filters;
mod filter;
mod fluent;
mod logical_filters;

pub use basic_filters::*;
pub use filter::*;
pub use fluent::*;
pub use logical_filters::*;

//! Main docquery crate: HTTP request query strings in, document store queries out.
//!
//! This crate is the primary entry point for users of docquery. It re-exports
//! the core types from the sub-crates and, behind the `mongodb` feature, the
//! MongoDB rendering.
//!
//! # Features
//!
//! - **Query translation** - Filters, projections, pagination and sorting from a query string
//! - **Store-neutral queries** - A small query descriptor any backend can render
//! - **Record collections** - `login` and `userDetails` with handler queries
//! - **MongoDB rendering** - Filter documents and `FindOptions` (requires `mongodb` feature)
//!
//! # Quick Start
//!
//! ```ignore
//! use docquery::prelude::*;
//!
//! // `GET /api/login?fields=username&sort=-createdAt&limit=20`
//! let request: RequestQuery = [
//!     ("fields", "username"),
//!     ("sort", "-createdAt"),
//!     ("limit", "20"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let translator = QueryTranslator::new(AppConfig::load()?.translator);
//! let processed = translator.translate(&request);
//!
//! // The descriptor handed to the store layer
//! let query = list_query::<Login>(&processed);
//! assert_eq!(query.limit, Some(20));
//! ```
//!
//! With the `mongodb` feature the query renders into driver arguments:
//!
//! ```ignore
//! use docquery::mongodb::MongoFind;
//!
//! let find = MongoFind::from_query(&query)?;
//! let cursor = collection.find(find.filter).with_options(find.options).await?;
//! ```

pub mod prelude;

pub use docquery_core::{config, error, query, record, request, translate};

// Re-export BSON types for convenience
pub use bson;

/// MongoDB rendering of queries.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use docquery_mongodb::{MongoFind, MongoUpdate};
}

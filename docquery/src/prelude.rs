//! Convenient re-exports of commonly used types from docquery.
//!
//! ```ignore
//! use docquery::prelude::*;
//! ```
//!
//! This provides access to:
//! - Request queries and the translator
//! - Query descriptors and filters
//! - Record collections and patches
//! - Configuration and error types

pub use docquery_core::{
    config::{AppConfig, ConfigError, TranslatorConfig},
    error::{DocQueryError, DocQueryResult},
    query::{Expr, Filter, Query, QueryBuilder, QueryVisitor, Sort, SortDirection},
    record::{Login, LoginPatch, Record, RecordExt, RecordPatch, UserDetails, UserDetailsPatch, key_query, list_query},
    request::{QueryValue, RequestQuery},
    translate::{Cursor, ProcessedQuery, QueryTranslator, translate},
};

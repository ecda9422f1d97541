//! Translation of HTTP request query strings into document store queries.
//!
//! This crate is the core of the docquery project and provides:
//!
//! - **Request queries** ([`request`]) - The decoded query string of a request
//! - **Query translation** ([`translate`]) - Filter, projection, cursor and detail flag from a request
//! - **Query descriptors** ([`query`]) - Store-neutral queries and the visitor backends render them with
//! - **Record collections** ([`record`]) - The `login` and `userDetails` collections and their handler queries
//! - **Configuration** ([`config`]) - Translator settings from TOML and the environment
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! # Example
//!
//! ```ignore
//! use docquery::{request::RequestQuery, translate::translate};
//!
//! let request: RequestQuery = [
//!     ("name", "amit"),
//!     ("fields", "name,-password"),
//!     ("sort", "-createdAt"),
//!     ("limit", "20"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let processed = translate(&request);
//! assert_eq!(processed.cursor.limit, 20);
//! ```

#[allow(unused_extern_crates)]
extern crate self as docquery_core;

pub mod config;
pub mod error;
pub mod query;
pub mod record;
pub mod request;
pub mod translate;

//! MongoDB rendering of docquery queries.
//!
//! This crate turns store-neutral [`Query`](docquery_core::query::Query) values
//! and record patches into the documents and options the official MongoDB
//! driver expects. It builds arguments only; running them is up to the caller.
//!
//! To use it, include the `mongodb` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! docquery = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use docquery::{mongodb::MongoFind, record::{list_query, Login}, translate::translate};
//!
//! let processed = translate(&request_query);
//! let find = MongoFind::from_query(&list_query::<Login>(&processed))?;
//!
//! let logins = collection.find(find.filter).with_options(find.options).await?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as docquery_mongodb;

pub mod command;
pub(crate) mod query;
pub(crate) mod sanitizer;

pub use command::{MongoFind, MongoUpdate};

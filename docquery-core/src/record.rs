//! Record collections served by the REST layer and the queries built for them.
//!
//! Every collection implements [`Record`]: its name, the field that identifies
//! a record in request paths, and the fields returned by non-detailed listings.
//! The functions in this module build the query descriptors for each handler:
//!
//! - list: [`list_query`] from a translated request query
//! - fetch and delete by key: [`key_query`]
//! - edit: [`key_query`] plus [`RecordPatch::update_document`]
//!
//! Running these against a store is the caller's business.
//!
//! # Example
//!
//! ```ignore
//! use docquery::{record::{list_query, Login}, translate::translate};
//!
//! let processed = translate(&request_query);
//! let query = list_query::<Login>(&processed);
//! ```

use bson::{
    Bson, Document, de::deserialize_from_document, doc, oid::ObjectId, ser::serialize_to_document,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, from_value, to_value};

use crate::{
    error::{DocQueryError, DocQueryResult},
    query::{Filter, Query},
    translate::ProcessedQuery,
};

/// A collection of records exposed over the REST API.
pub trait Record: Serialize + DeserializeOwned + Send + Sync + Clone + 'static {
    /// Returns the name of the collection this record belongs to.
    fn collection_name() -> &'static str;

    /// Returns the field matched against the key segment of a request path.
    fn key_field() -> &'static str;

    /// Converts a key segment of a request path into the stored key value.
    fn key_value(raw: &str) -> Bson {
        Bson::String(raw.to_string())
    }

    /// Returns the projection used by listings that ask for `detailed=false`
    /// without naming fields.
    fn summary_projection() -> Document;

    /// Checks schema constraints.
    fn validate(&self) -> DocQueryResult<()> {
        Ok(())
    }
}

/// Conversion helpers available on every [`Record`].
pub trait RecordExt: Record {
    /// Validates and converts this record into a BSON document for insertion.
    fn to_document(&self) -> DocQueryResult<Document>;

    /// Creates a record from a stored BSON document.
    fn from_document(document: Document) -> DocQueryResult<Self>;

    /// Converts this record to JSON for a response body.
    fn to_json(&self) -> DocQueryResult<Value>;

    /// Creates and validates a record from a JSON request body.
    fn from_json(value: Value) -> DocQueryResult<Self>;
}

impl<R: Record> RecordExt for R {
    fn to_document(&self) -> DocQueryResult<Document> {
        self.validate()?;
        Ok(serialize_to_document(self)?)
    }

    fn from_document(document: Document) -> DocQueryResult<Self> {
        Ok(deserialize_from_document(document)?)
    }

    fn to_json(&self) -> DocQueryResult<Value> {
        Ok(to_value(self)?)
    }

    fn from_json(value: Value) -> DocQueryResult<Self> {
        let record: Self = from_value(value)?;
        record.validate()?;
        Ok(record)
    }
}

/// Login credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Login {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<bson::DateTime>,
}

impl Login {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into(), created_at: None }
    }

    /// Stamps the record with its creation time.
    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(bson::DateTime::from_chrono(at));
        self
    }
}

impl Record for Login {
    fn collection_name() -> &'static str {
        "login"
    }

    fn key_field() -> &'static str {
        "username"
    }

    fn summary_projection() -> Document {
        doc! { "username": 1, "createdAt": 1 }
    }

    fn validate(&self) -> DocQueryResult<()> {
        if self.username.is_empty() {
            return Err(invalid::<Self>("Kindly enter the User Name"));
        }
        if self.password.is_empty() {
            return Err(invalid::<Self>("Kindly enter the Password"));
        }
        Ok(())
    }
}

/// Profile details of a user. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserDetails {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phno: Option<i64>,
}

impl Record for UserDetails {
    fn collection_name() -> &'static str {
        "userDetails"
    }

    fn key_field() -> &'static str {
        "_id"
    }

    /// Path keys that are valid object ids match stored ids; anything else is
    /// compared as a plain string and matches nothing generated by the store.
    fn key_value(raw: &str) -> Bson {
        match ObjectId::parse_str(raw) {
            Ok(id) => Bson::ObjectId(id),
            Err(_) => Bson::String(raw.to_string()),
        }
    }

    fn summary_projection() -> Document {
        doc! { "name": 1, "username": 1, "email": 1 }
    }
}

fn invalid<R: Record>(reason: &str) -> DocQueryError {
    DocQueryError::InvalidRecord(R::collection_name().to_string(), reason.to_string())
}

/// Partial update sent to an edit handler.
pub trait RecordPatch {
    type Record: Record;

    /// Fields to set on the record identified by `key`, or `None` when the
    /// patch changes nothing.
    fn set_fields(&self, key: &str) -> Option<Document>;

    /// Returns the `{ "$set": ... }` update document for the record identified by `key`.
    fn update_document(&self, key: &str) -> Option<Document> {
        self.set_fields(key).map(|fields| doc! { "$set": fields })
    }
}

/// Body of a login edit request. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoginPatch {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl RecordPatch for LoginPatch {
    type Record = Login;

    /// The username is always set, defaulting to the key from the path.
    fn set_fields(&self, key: &str) -> Option<Document> {
        let mut fields = doc! { "username": non_empty(&self.username).unwrap_or(key) };
        if let Some(password) = non_empty(&self.password) {
            fields.insert("password", password);
        }
        Some(fields)
    }
}

/// Body of a user details edit request. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserDetailsPatch {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phno: Option<i64>,
}

impl RecordPatch for UserDetailsPatch {
    type Record = UserDetails;

    fn set_fields(&self, _key: &str) -> Option<Document> {
        let mut fields = Document::new();
        for (field, value) in [
            ("username", &self.username),
            ("password", &self.password),
            ("email", &self.email),
        ] {
            if let Some(value) = non_empty(value) {
                fields.insert(field, value);
            }
        }
        // a zero phone number counts as absent
        if let Some(phno) = self.phno.filter(|phno| *phno != 0) {
            fields.insert("phno", phno);
        }

        (!fields.is_empty()).then_some(fields)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// Builds the find-all query for a translated request.
///
/// Non-detailed listings without an explicit projection fall back to the
/// record's summary projection.
pub fn list_query<R: Record>(processed: &ProcessedQuery) -> Query {
    let mut query = processed.to_query();
    if !processed.is_detailed && query.projection.is_none() {
        query.projection = Some(R::summary_projection());
    }
    query
}

/// Builds the query selecting the record(s) whose key field equals `key`.
pub fn key_query<R: Record>(key: &str) -> Query {
    Query::builder()
        .filter(Filter::eq(R::key_field(), R::key_value(key)))
        .build()
}

//! MongoDB command arguments built from docquery queries.
//!
//! [`MongoFind`] holds the filter document and [`FindOptions`] a handler passes
//! to `Collection::find`; [`MongoUpdate`] holds the filter and update documents
//! for `Collection::update_many`.

use bson::{Bson, Document, doc};
use mongodb::options::FindOptions;
use tracing::debug;

use docquery_core::{
    error::{DocQueryError, DocQueryResult},
    query::{Query, QueryVisitor},
    record::{Record, RecordPatch, key_query},
    translate::ProcessedQuery,
};

use crate::{query::MongoQueryTranslator, sanitizer::FieldSanitizer};

/// Arguments of a MongoDB `find` call.
#[derive(Debug, Clone)]
pub struct MongoFind {
    pub filter: Document,
    pub options: FindOptions,
}

impl MongoFind {
    /// Renders a store-neutral query.
    pub fn from_query(query: &Query) -> DocQueryResult<Self> {
        let mut options = FindOptions::default();

        if let Some(limit) = query.limit {
            options.limit = Some(i64::try_from(limit).unwrap_or(i64::MAX));
        }
        if let Some(skip) = query.offset {
            options.skip = Some(skip);
        }
        if !query.sort.is_empty() {
            options.sort = Some(
                query
                    .sort
                    .iter()
                    .map(|sort| {
                        (
                            FieldSanitizer::sanitize_field(&sort.field),
                            Bson::Int32(sort.direction.as_i32()),
                        )
                    })
                    .collect(),
            );
        }
        if let Some(projection) = &query.projection {
            options.projection = Some(FieldSanitizer::sanitize_keys(projection));
        }

        let filter = match &query.filter {
            Some(expr) => MongoQueryTranslator.visit_expr(expr)?,
            None => doc! {},
        };

        debug!(%filter, ?options, "rendered mongodb find");

        Ok(Self { filter, options })
    }

    /// Renders the query for a translated request.
    pub fn from_processed(processed: &ProcessedQuery) -> DocQueryResult<Self> {
        Self::from_query(&processed.to_query())
    }
}

impl TryFrom<&Query> for MongoFind {
    type Error = DocQueryError;

    fn try_from(query: &Query) -> Result<Self, Self::Error> {
        Self::from_query(query)
    }
}

/// Arguments of a MongoDB `update_many` call.
#[derive(Debug, Clone, PartialEq)]
pub struct MongoUpdate {
    pub filter: Document,
    pub update: Document,
}

impl MongoUpdate {
    /// Renders the edit of the record(s) identified by `key`.
    ///
    /// Returns `None` when the patch sets nothing.
    pub fn from_patch<P: RecordPatch>(key: &str, patch: &P) -> DocQueryResult<Option<Self>> {
        let Some(update) = patch.update_document(key) else {
            return Ok(None);
        };

        let filter = match key_query::<P::Record>(key).filter {
            Some(expr) => MongoQueryTranslator.visit_expr(&expr)?,
            None => doc! {},
        };

        debug!(
            collection = P::Record::collection_name(),
            %filter,
            %update,
            "rendered mongodb update"
        );

        Ok(Some(Self { filter, update }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docquery_core::{
        record::{LoginPatch, UserDetailsPatch},
        request::RequestQuery,
        translate::translate,
    };

    fn processed(pairs: &[(&str, &str)]) -> ProcessedQuery {
        translate(&pairs.iter().copied().collect::<RequestQuery>())
    }

    #[test]
    fn renders_translated_request() {
        let find = MongoFind::from_processed(&processed(&[
            ("name", "amit"),
            ("city", "bangalore"),
            ("fields", "name,-password"),
            ("sort", "-createdAt,name"),
            ("skip", "20"),
            ("limit", "10"),
        ]))
        .unwrap();

        assert_eq!(
            find.filter,
            doc! { "$and": [
                { "name": { "$eq": "amit" } },
                { "city": { "$eq": "bangalore" } },
            ] }
        );
        assert_eq!(find.options.skip, Some(20));
        assert_eq!(find.options.limit, Some(10));
        assert_eq!(find.options.sort, Some(doc! { "createdAt": -1, "name": 1 }));
        assert_eq!(find.options.projection, Some(doc! { "name": 1, "password": 0 }));
    }

    #[test]
    fn empty_request_matches_everything() {
        let find = MongoFind::from_processed(&processed(&[])).unwrap();

        assert_eq!(find.filter, doc! {});
        assert_eq!(find.options.skip, Some(0));
        assert_eq!(find.options.limit, Some(30));
        assert_eq!(find.options.sort, None);
        assert_eq!(find.options.projection, None);
    }

    #[test]
    fn oversized_limit_saturates() {
        let query = Query::builder().limit(u64::MAX).build();

        let find = MongoFind::try_from(&query).unwrap();
        assert_eq!(find.options.limit, Some(i64::MAX));
    }

    #[test]
    fn login_update_targets_username() {
        let patch = LoginPatch { username: None, password: Some("new".into()) };

        let update = MongoUpdate::from_patch("amit", &patch).unwrap().unwrap();
        assert_eq!(update.filter, doc! { "username": { "$eq": "amit" } });
        assert_eq!(
            update.update,
            doc! { "$set": { "username": "amit", "password": "new" } }
        );
    }

    #[test]
    fn empty_patch_renders_nothing() {
        let update = MongoUpdate::from_patch("65a1f0c2e4b0a1b2c3d4e5f6", &UserDetailsPatch::default()).unwrap();

        assert_eq!(update, None);
    }
}

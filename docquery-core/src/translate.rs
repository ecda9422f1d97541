//! Translation of request query parameters into store query descriptors.
//!
//! A request query mixes two kinds of parameters. The reserved ones
//! ([`RESERVED_KEYS`]) steer pagination, sorting, projection and response
//! detail; every other parameter is an equality constraint on the stored
//! records.
//!
//! For `/posts?name=amit&fields=name,-password&sort=-createdAt,name&limit=20&detailed=false`
//! the translator produces:
//!
//! - filter: `{ name: "amit" }`
//! - projection: `{ name: 1, password: 0 }`
//! - cursor: `{ skip: 0, limit: 20, sort: [(createdAt, -1), (name, 1)] }`
//! - detailed: `false`
//!
//! Translation never fails. Malformed numbers fall back to their defaults and
//! empty values count as absent.

use std::num::NonZeroU64;

use bson::{Bson, Document};
use tracing::debug;

use crate::{
    config::TranslatorConfig,
    query::{Filter, Query, Sort, SortDirection},
    request::RequestQuery,
};

pub const LIMIT_KEY: &str = "limit";
pub const SKIP_KEY: &str = "skip";
pub const SORT_KEY: &str = "sort";
pub const FIELDS_KEY: &str = "fields";
pub const DETAILED_KEY: &str = "detailed";

/// Parameter names that never become filter constraints.
pub const RESERVED_KEYS: [&str; 5] = [LIMIT_KEY, SKIP_KEY, SORT_KEY, FIELDS_KEY, DETAILED_KEY];

/// Pagination and ordering of a result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    /// Number of records to skip.
    pub skip: u64,
    /// Maximum number of records to return, always positive.
    pub limit: u64,
    /// Sort keys in request order, most significant first.
    pub sort: Vec<Sort>,
}

impl Cursor {
    /// Renders the sort keys as an ordered `{ field: 1 | -1 }` document.
    pub fn sort_document(&self) -> Document {
        self.sort
            .iter()
            .map(|sort| (sort.field.clone(), Bson::Int32(sort.direction.as_i32())))
            .collect()
    }
}

/// The outcome of translating a [`RequestQuery`].
///
/// An empty `filter` matches every record and an empty `projection` returns
/// whole records.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedQuery {
    /// Equality constraints, all of which must hold.
    pub filter: Document,
    /// Fields mapped to `1` (include) or `0` (exclude).
    pub projection: Document,
    pub cursor: Cursor,
    /// Whether the caller asked for full records rather than a summary.
    pub is_detailed: bool,
}

impl ProcessedQuery {
    /// Builds the store-neutral [`Query`] for this request.
    ///
    /// Filter entries become a conjunction of equality terms in request order.
    /// `is_detailed` is left for the caller to act on.
    pub fn to_query(&self) -> Query {
        let filter = (!self.filter.is_empty()).then(|| {
            Filter::and(
                self.filter
                    .iter()
                    .map(|(field, value)| Filter::eq(field.clone(), value.clone())),
            )
        });

        Query {
            filter,
            projection: (!self.projection.is_empty()).then(|| self.projection.clone()),
            limit: Some(self.cursor.limit),
            offset: Some(self.cursor.skip),
            sort: self.cursor.sort.clone(),
        }
    }
}

impl From<ProcessedQuery> for Query {
    fn from(processed: ProcessedQuery) -> Self {
        processed.to_query()
    }
}

/// Translates request queries using an injected page size.
///
/// The translator holds no state beyond its configuration and can be shared
/// across any number of concurrent requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryTranslator {
    config: TranslatorConfig,
}

impl QueryTranslator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Splits `query` into filter, projection, cursor and detail flag.
    pub fn translate(&self, query: &RequestQuery) -> ProcessedQuery {
        let processed = ProcessedQuery {
            filter: base_filter(query),
            projection: projection(query),
            cursor: cursor(query, self.config.default_page_size),
            is_detailed: is_detailed(query),
        };

        debug!(
            filter = %processed.filter,
            projection = %processed.projection,
            skip = processed.cursor.skip,
            limit = processed.cursor.limit,
            sort = %processed.cursor.sort_document(),
            detailed = processed.is_detailed,
            "translated request query"
        );

        processed
    }
}

/// Translates `query` with the default configuration.
pub fn translate(query: &RequestQuery) -> ProcessedQuery {
    QueryTranslator::default().translate(query)
}

/// Collects every non-reserved parameter with a non-empty value, verbatim.
pub fn base_filter(query: &RequestQuery) -> Document {
    let mut filter = Document::new();

    for (key, value) in query.iter() {
        if RESERVED_KEYS.contains(&key) {
            continue;
        }
        if let Some(value) = value.first().filter(|value| !value.is_empty()) {
            filter.insert(key, value);
        }
    }

    filter
}

/// Parses `fields` into an inclusion/exclusion projection.
///
/// A repeated field keeps its first position and takes its last flag.
pub fn projection(query: &RequestQuery) -> Document {
    let mut projection = Document::new();

    if let Some(fields) = query.get(FIELDS_KEY) {
        for (field, excluded) in terms(fields) {
            projection.insert(field, if excluded { 0 } else { 1 });
        }
    }

    projection
}

/// Parses `skip`, `limit` and `sort` into a [`Cursor`].
pub fn cursor(query: &RequestQuery, default_page_size: NonZeroU64) -> Cursor {
    let skip = parse_count(query, SKIP_KEY).unwrap_or(0);
    let limit = parse_count(query, LIMIT_KEY)
        .filter(|limit| *limit > 0)
        .unwrap_or(default_page_size.get());

    let mut sort: Vec<Sort> = Vec::new();
    if let Some(list) = query.get(SORT_KEY) {
        for (field, descending) in terms(list) {
            let direction = if descending { SortDirection::Desc } else { SortDirection::Asc };
            // a repeated field keeps its first position and takes the last direction
            match sort.iter_mut().find(|existing| existing.field == field) {
                Some(existing) => existing.direction = direction,
                None => sort.push(Sort::new(field, direction)),
            }
        }
    }

    Cursor { skip, limit, sort }
}

/// `false` only for a `detailed` value spelling `false` in any case.
pub fn is_detailed(query: &RequestQuery) -> bool {
    !query
        .get(DETAILED_KEY)
        .is_some_and(|value| value.eq_ignore_ascii_case("false"))
}

/// Splits a comma-separated list into `(field, negated)` terms.
///
/// Terms are trimmed and empty ones skipped. A leading `-` negates the term
/// unless it is the whole term.
fn terms(list: &str) -> impl Iterator<Item = (&str, bool)> {
    list.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(|term| match term.strip_prefix('-') {
            Some(field) if !field.is_empty() => (field, true),
            _ => (term, false),
        })
}

/// Reads a non-negative whole number. Integral float spellings such as `1e1`
/// or `2.0` count; fractions, negatives and non-finite values do not.
fn parse_count(query: &RequestQuery, key: &str) -> Option<u64> {
    let raw = query.get(key)?.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(count) = raw.parse::<u64>() {
        return Some(count);
    }

    match raw.parse::<f64>() {
        Ok(count) if count.is_finite() && count >= 0.0 && count.fract() == 0.0 => {
            // saturates above u64::MAX
            Some(count as u64)
        }
        _ => {
            debug!(key, raw, "ignoring non-numeric pagination parameter");
            None
        }
    }
}

//! Query translation from docquery expressions to MongoDB query syntax.
//!
//! This module translates docquery's filter expressions into MongoDB BSON
//! documents for execution by the MongoDB query engine.

use bson::{Bson, Document, doc};

use docquery_core::{
    error::DocQueryError,
    query::{Expr, QueryVisitor},
};

use crate::sanitizer::FieldSanitizer;

/// Translates docquery filter expressions into MongoDB query documents.
///
/// Equality terms are always wrapped in `$eq`, so values are compared
/// literally and never read as operators.
pub(crate) struct MongoQueryTranslator;

impl QueryVisitor for MongoQueryTranslator {
    type Output = Document;
    type Error = DocQueryError;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        match exprs {
            [] => Ok(doc! {}),
            [single] => self.visit_expr(single),
            _ => Ok(doc! {
                "$and": exprs
                    .iter()
                    .map(|expr| self.visit_expr(expr))
                    .collect::<Result<Vec<_>, _>>()?,
            }),
        }
    }

    fn visit_eq(&mut self, field: &str, value: &Bson) -> Result<Self::Output, Self::Error> {
        if field.is_empty() {
            return Err(DocQueryError::Backend("Filter field name cannot be empty".to_string()));
        }

        let field = FieldSanitizer::sanitize_field(field);
        Ok(doc! {
            field: { "$eq": value },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docquery_core::query::Filter;

    #[test]
    fn single_term_is_not_wrapped() {
        let expr = Filter::and([Filter::eq("name", "amit")]);

        assert_eq!(
            MongoQueryTranslator.visit_expr(&expr).unwrap(),
            doc! { "name": { "$eq": "amit" } }
        );
    }

    #[test]
    fn several_terms_become_and() {
        let expr = Filter::eq("name", "amit").and(Filter::eq("city", "pune"));

        assert_eq!(
            MongoQueryTranslator.visit_expr(&expr).unwrap(),
            doc! { "$and": [
                { "name": { "$eq": "amit" } },
                { "city": { "$eq": "pune" } },
            ] }
        );
    }

    #[test]
    fn empty_conjunction_matches_everything() {
        assert_eq!(MongoQueryTranslator.visit_expr(&Filter::and([])).unwrap(), doc! {});
    }

    #[test]
    fn operator_like_field_names_are_escaped() {
        let expr = Filter::eq("$where", "1");

        assert_eq!(
            MongoQueryTranslator.visit_expr(&expr).unwrap(),
            doc! { "__dollar__where": { "$eq": "1" } }
        );
    }

    #[test]
    fn empty_field_name_is_rejected() {
        let err = MongoQueryTranslator.visit_expr(&Filter::eq("", "x")).unwrap_err();

        assert!(matches!(err, DocQueryError::Backend(_)));
    }
}

//! Field name sanitization for MongoDB compatibility.
//!
//! Filter and projection field names come straight from request query strings.
//! MongoDB reads a leading dollar sign as an operator and rejects null bytes,
//! so both are escaped before a name reaches a query document. Dots are left
//! alone: they address nested fields.

use bson::{Bson, Document};

/// Escapes characters MongoDB would otherwise interpret in field names.
pub(crate) struct FieldSanitizer;

impl FieldSanitizer {
    /// Character replacements for sanitization
    const REPLACEMENTS: [(&'static str, &'static str); 2] = [
        ("$", "__dollar__"),
        ("\0", "__null__"),
    ];

    /// Sanitizes a field name by replacing problematic characters with safe escaped versions.
    pub(crate) fn sanitize_field(input: &str) -> String {
        let mut sanitized = input.to_string();
        for (target, replacement) in Self::REPLACEMENTS.iter() {
            sanitized = sanitized.replace(*target, *replacement);
        }
        sanitized
    }

    /// Sanitizes every key of a flat document, keeping values and order.
    pub(crate) fn sanitize_keys(document: &Document) -> Document {
        document
            .iter()
            .map(|(key, value): (&String, &Bson)| (Self::sanitize_field(key), value.clone()))
            .collect()
    }
}

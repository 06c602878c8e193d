use std::fmt;

use schemars::JsonSchema;
use serde::{
    de::{self, IgnoredAny, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use utoipa::ToSchema;

/// A catalog entry as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, ToSchema)]
pub struct Book {
    /// Assigned by the store, never by the client.
    pub id: i64,
    pub title: String,
    pub author: String,
    pub year: i64,
}

impl Book {
    pub fn from_payload(id: i64, payload: BookPayload) -> Self {
        Self {
            id,
            title: payload.title,
            author: payload.author,
            year: payload.year,
        }
    }
}

/// Request body of create and update.
///
/// Decoding is lenient: keys match regardless of case, missing or `null` fields
/// take their zero value, a `null` body is an empty payload and unknown fields are
/// ignored. A client supplied `id` is accepted but never used.
#[derive(Debug, Clone, Default, PartialEq, Eq, JsonSchema, ToSchema)]
pub struct BookPayload {
    pub id: Option<i64>,
    pub title: String,
    pub author: String,
    pub year: i64,
}

impl BookPayload {
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i64) -> Self {
        Self {
            id: None,
            title: title.into(),
            author: author.into(),
            year,
        }
    }
}

impl<'de> Deserialize<'de> for BookPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BookPayloadVisitor)
    }
}

struct BookPayloadVisitor;

impl<'de> Visitor<'de> for BookPayloadVisitor {
    type Value = BookPayload;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a book object")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(BookPayload::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut payload = BookPayload::default();

        // Later duplicates overwrite earlier ones.
        while let Some(key) = map.next_key::<String>()? {
            match key.to_lowercase().as_str() {
                "id" => payload.id = map.next_value()?,
                "title" => {
                    payload.title = map.next_value::<Option<String>>()?.unwrap_or_default()
                }
                "author" => {
                    payload.author = map.next_value::<Option<String>>()?.unwrap_or_default()
                }
                "year" => payload.year = map.next_value::<Option<i64>>()?.unwrap_or_default(),
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Result<BookPayload, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn keys_match_regardless_of_case() {
        let payload = decode(r#"{"Title":"Dune","AUTHOR":"Frank Herbert","yEaR":1965}"#)
            .expect("Capitalized keys rejected");

        assert_eq!(payload, BookPayload::new("Dune", "Frank Herbert", 1965));
    }

    #[test]
    fn null_and_missing_fields_are_zero() {
        let payload = decode(r#"{"title":null,"author":"X","id":null}"#).expect("Nulls rejected");

        assert_eq!(payload, BookPayload::new("", "X", 0));
        assert_eq!(decode("null").expect("Null body rejected"), BookPayload::default());
    }

    #[test]
    fn client_id_and_unknown_fields_are_kept_out_of_the_book() {
        let payload = decode(r#"{"id":9,"isbn":[1,2],"title":"Emma"}"#).expect("Body rejected");

        assert_eq!(payload.id, Some(9));
        assert_eq!(Book::from_payload(1, payload).id, 1);
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(decode(r#"{"year":"1965"}"#).is_err());
        assert!(decode(r#"{"title":42}"#).is_err());
        assert!(decode(r#"{"id":"x"}"#).is_err());
        assert!(decode(r#"[1, 2, 3]"#).is_err());
        assert!(decode(r#""Dune""#).is_err());
    }
}

//! Purpose: Provide the typed JSON decode entrypoint for response bodies.
//! Exports: `decode`, `null_as_default`, `ParseFailureCategory`, `categorize_error`, `hint_for_error`.
//! Role: Single seam where raw bytes become a declared record shape.
//! Invariants: Unknown input keys are dropped; shapes opt into defaults for absent or null keys.
//! Invariants: Every failure maps to `ErrorKind::Decode` with a category hint.
//! Notes: Callers attach URL context; this module only knows the target type.
#![allow(clippy::result_large_err)]

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::error::Category;

use crate::core::error::{Error, ErrorKind};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseFailureCategory {
    Syntax,
    Data,
    Eof,
    Io,
}

impl ParseFailureCategory {
    pub fn label(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::Data => "data",
            ParseFailureCategory::Eof => "eof",
            ParseFailureCategory::Io => "io",
        }
    }
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(bytes).map_err(|err| {
        let hint = hint_for_error(&err, short_type_name::<T>());
        Error::new(ErrorKind::Decode)
            .with_message(format!(
                "invalid {} json at line {} column {}",
                short_type_name::<T>(),
                err.line(),
                err.column()
            ))
            .with_hint(hint)
            .with_source(err)
    })
}

/// Field deserializer that reads JSON `null` as the type's default.
/// Any other value must still match the field type.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

pub fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    match err.classify() {
        Category::Syntax => ParseFailureCategory::Syntax,
        Category::Data => ParseFailureCategory::Data,
        Category::Eof => ParseFailureCategory::Eof,
        Category::Io => ParseFailureCategory::Io,
    }
}

pub fn hint_for_error(err: &serde_json::Error, shape: &str) -> String {
    let category = categorize_error(err);
    let advice = match category {
        ParseFailureCategory::Syntax => "the response body is not valid JSON",
        ParseFailureCategory::Data => "a field has the wrong JSON type for the record",
        ParseFailureCategory::Eof => "the response body ended early",
        ParseFailureCategory::Io => "the response body could not be read",
    };
    format!(
        "parse category: {}; shape: {shape}; {advice}",
        category.label()
    )
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::{ParseFailureCategory, categorize_error, decode, hint_for_error, null_as_default};
    use crate::core::error::ErrorKind;
    use serde::Deserialize;
    use serde_json::Value;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        id: i64,
        name: String,
    }

    #[test]
    fn decode_drops_unknown_keys() {
        let sample: Sample = decode(br#"{"id":3,"name":"a","extra":[1,2]}"#).expect("decode");
        assert_eq!(sample.id, 3);
        assert_eq!(sample.name, "a");
    }

    #[test]
    fn decode_defaults_missing_keys() {
        let sample: Sample = decode(br#"{"name":"only"}"#).expect("decode");
        assert_eq!(sample.id, 0);
        assert_eq!(sample.name, "only");
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Nullable {
        #[serde(deserialize_with = "null_as_default")]
        count: u32,
        #[serde(deserialize_with = "null_as_default")]
        label: String,
    }

    #[test]
    fn null_fields_read_as_defaults() {
        let nullable: Nullable = decode(br#"{"count":null,"label":null}"#).expect("decode");
        assert_eq!(nullable.count, 0);
        assert!(nullable.label.is_empty());

        let nullable: Nullable = decode(br#"{"count":7,"label":"x"}"#).expect("decode");
        assert_eq!(nullable.count, 7);
        assert_eq!(nullable.label, "x");
    }

    #[test]
    fn null_as_default_keeps_type_checks() {
        let err = decode::<Nullable>(br#"{"count":"7"}"#).expect_err("mismatch");
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn decode_is_case_sensitive() {
        let sample: Sample = decode(br#"{"ID":9,"Name":"x"}"#).expect("decode");
        assert_eq!(sample.id, 0);
        assert!(sample.name.is_empty());
    }

    #[test]
    fn decode_type_mismatch_is_decode_error() {
        let err = decode::<Sample>(br#"{"id":"ten"}"#).expect_err("mismatch");
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(err.message().unwrap_or_default().contains("Sample"));
        assert!(err.hint().unwrap_or_default().contains("parse category: data"));
    }

    #[test]
    fn category_mapping_covers_syntax_and_eof() {
        let syntax = serde_json::from_str::<Value>(r#"{"a":}"#).unwrap_err();
        assert_eq!(categorize_error(&syntax), ParseFailureCategory::Syntax);

        let eof = serde_json::from_str::<Value>(r#"{"a":1"#).unwrap_err();
        assert_eq!(categorize_error(&eof), ParseFailureCategory::Eof);
    }

    #[test]
    fn hint_contains_category_and_shape() {
        let err = serde_json::from_str::<Value>("").unwrap_err();
        let hint = hint_for_error(&err, "Greeting");
        assert!(hint.contains("parse category: eof"));
        assert!(hint.contains("shape: Greeting"));
    }
}

//! Case-insensitive JSON decoding.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ClientError;

/// Lowercase every object key, recursively.
pub(crate) fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(object) => Value::Object(
            object
                .into_iter()
                .map(|(key, value)| (key.to_lowercase(), lowercase_keys(value)))
                .collect::<Map<_, _>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}

/// Lowercase the keys of a top-level object, leaving nested values untouched.
fn lowercase_top_level_keys(value: Value) -> Value {
    match value {
        Value::Object(object) => Value::Object(
            object
                .into_iter()
                .map(|(key, value)| (key.to_lowercase(), value))
                .collect::<Map<_, _>>(),
        ),
        other => other,
    }
}

fn parse_with<T: DeserializeOwned>(
    body: &[u8],
    normalise: fn(Value) -> Value,
) -> Result<T, ClientError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ClientError::decode("empty response body"));
    }
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| ClientError::decode(format!("invalid JSON: {err}")))?;
    serde_json::from_value(normalise(value))
        .map_err(|err| ClientError::decode(format!("unexpected response shape: {err}")))
}

/// Decode an entity body into `T` after normalising key case.
///
/// An empty body is a decode error, never a default value.
pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ClientError> {
    parse_with(body, lowercase_keys)
}

/// Decode an error envelope; only its own field names are case-folded.
///
/// Free-form members such as `details` reach the caller exactly as sent.
pub(crate) fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<T, ClientError> {
    parse_with(body, lowercase_top_level_keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Comment, Post};
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn nested_keys_are_lowercased() {
        let value = json!({"Id": 1, "User": {"UserName": "Mette"}, "Comments": [{"ID": 2}]});

        assert_eq!(
            lowercase_keys(value),
            json!({"id": 1, "user": {"username": "Mette"}, "comments": [{"id": 2}]})
        );
    }

    #[test]
    fn post_decodes_regardless_of_key_case() {
        let body = br#"{
            "ID": 4, "Title": "T", "Content": "C",
            "User": {"Id": 1, "Username": "Kristian"},
            "UpVotes": 1, "DownVotes": 0,
            "Comments": [{"id": 7, "content": "hi", "upvotes": 0, "downvotes": 0,
                          "user": {"id": 1, "username": "Kristian"}}]
        }"#;

        let post: Post = decode(body).expect("decodes");

        assert_eq!(post.id, 4);
        assert_eq!(post.upvotes, 1);
        assert_eq!(post.latest_comment().map(|c| c.content.as_str()), Some("hi"));
    }

    #[test]
    fn envelope_keys_fold_but_nested_keys_survive() {
        let value = json!({"TraceId": "t", "Details": {"pathPostId": 1, "Nested": [{"bodyPostId": 2}]}});

        assert_eq!(
            lowercase_top_level_keys(value),
            json!({"traceid": "t", "details": {"pathPostId": 1, "Nested": [{"bodyPostId": 2}]}})
        );
    }

    #[rstest]
    #[case(b"".as_slice())]
    #[case(b"  \n".as_slice())]
    #[case(b"<html>".as_slice())]
    #[case(br#"{"id": 1}"#.as_slice())]
    fn unusable_bodies_are_decode_errors(#[case] body: &[u8]) {
        let err = decode::<Comment>(body).expect_err("rejected");
        assert!(matches!(err, ClientError::Decode { .. }), "got {err:?}");
    }
}

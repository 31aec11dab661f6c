//! JSON body extractor with case-insensitive property names.
//!
//! Clients in the wild send `userId`, `UserId`, or `userid` interchangeably.
//! [`CaseInsensitiveJson`] rewrites each top-level key of the request object
//! to the canonical spelling declared by [`JsonFields`] before handing the
//! object to serde, so request DTOs keep ordinary camelCase derives.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use crate::domain::Error;

/// Canonical top-level property names of a request body.
pub trait JsonFields {
    /// Field names exactly as the serde derive expects them.
    const FIELDS: &'static [&'static str];
}

/// Extractor decoding a JSON object body with case-insensitive keys.
///
/// Malformed JSON, non-object bodies, missing fields, and type mismatches are
/// all reported as `invalid_request`.
#[derive(Debug)]
pub struct CaseInsensitiveJson<T>(pub T);

impl<T> CaseInsensitiveJson<T> {
    /// Unwrap the decoded value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

fn canonical_key<T: JsonFields>(key: String) -> String {
    T::FIELDS
        .iter()
        .find(|field| field.eq_ignore_ascii_case(&key))
        .map_or(key, |field| (*field).to_owned())
}

fn malformed(message: &str, reason: impl std::fmt::Display) -> Error {
    Error::invalid_request(message).with_details(json!({ "reason": reason.to_string() }))
}

/// Decode `body` into `T`, matching object keys case-insensitively.
pub fn decode_case_insensitive<T>(body: &[u8]) -> Result<T, Error>
where
    T: DeserializeOwned + JsonFields,
{
    let value: Value =
        serde_json::from_slice(body).map_err(|err| malformed("malformed JSON body", err))?;
    let Value::Object(object) = value else {
        return Err(Error::invalid_request("request body must be a JSON object"));
    };
    let normalised: Map<String, Value> = object
        .into_iter()
        .map(|(key, value)| (canonical_key::<T>(key), value))
        .collect();
    serde_json::from_value(Value::Object(normalised))
        .map_err(|err| malformed("invalid request body", err))
}

impl<T> FromRequest for CaseInsensitiveJson<T>
where
    T: DeserializeOwned + JsonFields + 'static,
{
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = web::Bytes::from_request(req, payload);
        Box::pin(async move {
            let body = body
                .await
                .map_err(|err| malformed("unreadable request body", err))?;
            decode_case_insensitive(&body)
                .map(Self)
                .map_err(actix_web::Error::from)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        user_id: i32,
        title: String,
    }

    impl JsonFields for Sample {
        const FIELDS: &'static [&'static str] = &["userId", "title"];
    }

    #[rstest]
    #[case(r#"{"userId": 1, "title": "T"}"#)]
    #[case(r#"{"UserId": 1, "Title": "T"}"#)]
    #[case(r#"{"USERID": 1, "title": "T", "extra": true}"#)]
    fn keys_match_regardless_of_case(#[case] body: &str) {
        let decoded: Sample = decode_case_insensitive(body.as_bytes()).expect("decodes");
        assert_eq!(
            decoded,
            Sample {
                user_id: 1,
                title: "T".into()
            }
        );
    }

    #[rstest]
    #[case("not json", "malformed JSON body")]
    #[case("[1, 2]", "request body must be a JSON object")]
    #[case(r#"{"title": "T"}"#, "invalid request body")]
    #[case(r#"{"userId": "one", "title": "T"}"#, "invalid request body")]
    fn rejects_bad_bodies_as_invalid_request(#[case] body: &str, #[case] message: &str) {
        let err = decode_case_insensitive::<Sample>(body.as_bytes()).expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), message);
    }
}

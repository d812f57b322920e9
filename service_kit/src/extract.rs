use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{header, HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use serde_json::{Map, Value};
use serde_path_to_error::Segment;
use utoipa::openapi::{RefOr, Schema};
use utoipa::PartialSchema;

use crate::error::{ApiError, LocSegment, ValidationIssue};

/// JSON object body extractor whose failures are reported as
/// [`ApiError::Validation`].
///
/// Unlike `axum::Json`, every problem with the body (wrong content type,
/// malformed JSON, a non-object body, missing or mistyped fields) ends up as
/// a 422 carrying the location of the offending field. All missing required
/// fields, as listed by the DTO's schema, are reported together. A request
/// without `Content-Type` is parsed as JSON. Failing to read the body at all
/// keeps its own status, e.g. 413 when a body limit is exceeded.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + PartialSchema,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !accepts_json(req.headers()) {
            return Err(ApiError::Validation(vec![ValidationIssue::new(
                body_loc(),
                "Expected a JSON request body",
                "content_type",
            )]));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| match rejection.status() {
                StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge(rejection.body_text()),
                _ => ApiError::BadRequest(rejection.body_text()),
            })?;

        decode(&bytes).map(ValidatedJson)
    }
}

fn body_loc() -> Vec<LocSegment> {
    vec!["body".into()]
}

fn accepts_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(header::CONTENT_TYPE) else {
        return true;
    };
    let Ok(content_type) = content_type.to_str() else {
        return false;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

fn decode<T: DeserializeOwned + PartialSchema>(bytes: &[u8]) -> Result<T, ApiError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|err| ApiError::Validation(vec![issue_from(err, body_loc())]))?;

    let Value::Object(fields) = &value else {
        return Err(ApiError::Validation(vec![ValidationIssue::new(
            body_loc(),
            "Input should be a valid dictionary",
            "model_attributes_type",
        )]));
    };

    let missing = missing_required::<T>(fields);
    if !missing.is_empty() {
        return Err(ApiError::Validation(missing));
    }

    serde_path_to_error::deserialize(value).map_err(|err| {
        let mut loc = body_loc();
        loc.extend(err.path().iter().filter_map(|segment| match segment {
            Segment::Seq { index } => Some(LocSegment::Index(*index)),
            Segment::Map { key } => Some(LocSegment::Key(key.clone())),
            Segment::Enum { variant } => Some(LocSegment::Key(variant.clone())),
            Segment::Unknown => None,
        }));
        ApiError::Validation(vec![issue_from(err.into_inner(), loc)])
    })
}

fn missing_required<T: PartialSchema>(fields: &Map<String, Value>) -> Vec<ValidationIssue> {
    let RefOr::T(Schema::Object(object)) = T::schema() else {
        return Vec::new();
    };
    object
        .required
        .iter()
        .filter(|name| !fields.contains_key(name.as_str()))
        .map(|name| {
            let mut loc = body_loc();
            loc.push(LocSegment::Key(name.clone()));
            ValidationIssue::new(loc, "Field required", "missing")
        })
        .collect()
}

fn issue_from(err: serde_json::Error, mut loc: Vec<LocSegment>) -> ValidationIssue {
    let message = err.to_string();
    match err.classify() {
        Category::Data => match missing_field(&message) {
            Some(field) => {
                loc.push(LocSegment::Key(field.to_string()));
                ValidationIssue::new(loc, "Field required", "missing")
            }
            None => ValidationIssue::new(loc, message, "invalid_type"),
        },
        Category::Syntax | Category::Eof | Category::Io => {
            ValidationIssue::new(loc, message, "json_invalid")
        }
    }
}

// serde only reports the field name inside the message: "missing field `b` at ...".
fn missing_field(message: &str) -> Option<&str> {
    let rest = message.strip_prefix("missing field `")?;
    rest.split('`').next()
}

use service_kit::api_dto;

/// Body of `GET /`.
#[api_dto]
pub struct GreetingResponse {
    pub message: String,
}

/// Body of `POST /example`.
///
/// `a` and `b` may be JSON numbers or strings holding a number.
#[api_dto]
pub struct ExampleRequest {
    #[serde(deserialize_with = "service_kit::de::lax_f64")]
    pub a: f64,
    #[serde(deserialize_with = "service_kit::de::lax_f64")]
    pub b: f64,
}

/// Result of `POST /example`; `result` is always `a + b`.
#[api_dto]
pub struct ExampleResponse {
    pub result: f64,
}

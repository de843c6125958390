use actix_web::{
    HttpRequest, HttpResponse,
    error::{JsonPayloadError, PathError, QueryPayloadError},
};
use serde::Serialize;
use serde_json::Value;

use super::error::{AppError, Res};

/// Uniform response envelope returned by every endpoint:
/// `{ success, message, token, data }`.
#[derive(Debug, Serialize)]
pub struct ApiBody {
    pub success: bool,
    pub message: Option<String>,
    pub token: Option<String>,
    pub data: Option<Value>,
}

impl ApiBody {
    pub fn new(message: Option<&str>) -> Self {
        ApiBody {
            success: true,
            message: message.map(str::to_string),
            token: None,
            data: None,
        }
    }
}

pub struct Success;
impl Success {
    pub fn ok(message: &str) -> Res<HttpResponse> {
        Ok(HttpResponse::Ok().json(ApiBody::new(Some(message))))
    }

    pub fn ok_with_data<T: Serialize>(message: &str, data: T) -> Res<HttpResponse> {
        let mut body = ApiBody::new(Some(message));
        body.data = Some(serde_json::to_value(data)?);
        Ok(HttpResponse::Ok().json(body))
    }

    pub fn created<T: Serialize>(message: &str, data: T) -> Res<HttpResponse> {
        let mut body = ApiBody::new(Some(message));
        body.data = Some(serde_json::to_value(data)?);
        Ok(HttpResponse::Created().json(body))
    }

    pub fn created_with_message(message: &str) -> Res<HttpResponse> {
        Ok(HttpResponse::Created().json(ApiBody::new(Some(message))))
    }
}

/// Extractor error handlers. Without these, actix answers malformed
/// input with a plain-text 400 instead of the envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn ok_envelope_carries_null_token_and_data() {
        let res = Success::ok("Logged out successfully").unwrap();
        let body = to_bytes(res.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Logged out successfully");
        assert!(json["token"].is_null());
        assert!(json["data"].is_null());
    }

    #[actix_web::test]
    async fn data_envelope_nests_payload() {
        let res =
            Success::ok_with_data("Cart items retrieved successfully.", serde_json::json!({"cart": {"total_price": 42.0}}))
                .unwrap();
        let body = to_bytes(res.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["data"]["cart"]["total_price"], 42.0);
    }

    #[actix_web::test]
    async fn malformed_json_maps_to_enveloped_400() {
        let req = actix_web::test::TestRequest::default().to_http_request();
        let err = json_error_handler(JsonPayloadError::ContentType, &req);

        let res = err.error_response();
        assert_eq!(res.status(), actix_web::http::StatusCode::BAD_REQUEST);

        let body = to_bytes(res.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["message"].is_string());
    }
}

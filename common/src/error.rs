use actix_web::HttpResponse;
use thiserror::Error;

pub type Res<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    // === CONVERSION ERRORS ===
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Mail error: {0}")]
    Mail(String),

    // === APPLICATION ERRORS ===
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn to_http_response(&self) -> HttpResponse {
        let is_dev = cfg!(debug_assertions);

        let to_internal_json = |err_msg: &str| {
            if is_dev {
                serde_json::json!({ "success": false, "message": err_msg })
            } else {
                serde_json::json!({ "success": false, "message": "Something went wrong" })
            }
        };

        match self {
            // === CONVERSION ERRORS ===
            AppError::Database(error) => {
                log::error!("Database error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&error.to_string()))
            }
            AppError::Jwt(error) => {
                log::error!("JWT error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&error.to_string()))
            }
            AppError::Serialization(error) => {
                log::error!("Serialization error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&error.to_string()))
            }
            AppError::Mail(error) => {
                log::error!("Mail error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(error))
            }

            // === APPLICATION ERRORS ===
            AppError::Unauthorized(_) => HttpResponse::Unauthorized()
                .json(serde_json::json!({ "success": false, "message": self.to_string() })),
            AppError::Forbidden(_) => HttpResponse::Forbidden()
                .json(serde_json::json!({ "success": false, "message": self.to_string() })),
            AppError::NotFound(_) => HttpResponse::NotFound()
                .json(serde_json::json!({ "success": false, "message": self.to_string() })),
            AppError::BadRequest(_) => HttpResponse::BadRequest()
                .json(serde_json::json!({ "success": false, "message": self.to_string() })),

            AppError::Internal(error) => {
                log::error!("Internal error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&error.to_string()))
            }
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        self.to_http_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, http::StatusCode, ResponseError};

    #[actix_web::test]
    async fn application_errors_map_to_matching_statuses() {
        let cases = [
            (
                AppError::Unauthorized("no token".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AppError::Forbidden("admins only".into()),
                StatusCode::FORBIDDEN,
            ),
            (AppError::NotFound("missing".into()), StatusCode::NOT_FOUND),
            (
                AppError::BadRequest("bad input".into()),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.error_response().status(), expected);
        }
    }

    #[actix_web::test]
    async fn error_body_uses_failure_envelope() {
        let res = AppError::BadRequest("Cart is empty.".to_string()).error_response();
        let body = to_bytes(res.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Cart is empty.");
    }
}

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::domain::errors::DomainError;

pub const GENERIC_FAILURE_MESSAGE: &str = "something went wrong please try again later";

#[derive(Debug, Error)]
pub enum AppError {
    /// The request body or path did not have the expected shape.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidOrder(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidOrder(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "Validation Error",
            AppError::InvalidOrder(_) => "Invalid_Order",
            AppError::NotFound(_) => "Order_NotFound",
            AppError::Internal(_) => "Internal Server Error",
        }
    }

    /// Message safe to show a client. Internal details are never exposed.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Internal(_) => GENERIC_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// Attach the path of the request that failed.
    pub fn at(self, path: &str) -> ApiError {
        ApiError {
            error: self,
            path: path.to_string(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidOrder(reason) => AppError::InvalidOrder(reason),
            e @ DomainError::OrderNotFound(_) => AppError::NotFound(e.to_string()),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<ValidationErrors> for AppError {
    /// Reports the first failing field under its JSON name, ordered by name
    /// so the message is stable.
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| (json_field_name(&field), errs))
            .collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .into_iter()
            .find_map(|(field, errs)| {
                errs.first().map(|err| match &err.message {
                    Some(msg) => format!("{}: {}", field, msg),
                    None => format!("{}: {}", field, err.code),
                })
            })
            .unwrap_or_else(|| "Validation Failed".to_string());

        AppError::Validation(message)
    }
}

/// `user_id` -> `userId`, matching the request bodies.
fn json_field_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = !name.is_empty();
        } else if upper {
            name.extend(c.to_uppercase());
            upper = false;
        } else {
            name.push(c);
        }
    }
    name
}

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
}

/// An [`AppError`] bound to the request path it happened on.
#[derive(Debug, Error)]
#[error("{error} (path: {path})")]
pub struct ApiError {
    pub error: AppError,
    pub path: String,
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.error.status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.error.status_code();
        match &self.error {
            AppError::Internal(detail) => {
                log::error!("Unhandled error on {}: {}", self.path, detail)
            }
            other => log::warn!("{} on {}: {}", other.tag(), self.path, other),
        }

        HttpResponse::build(status).json(ErrorResponse {
            status: status.as_u16(),
            error: self.error.tag().to_string(),
            message: self.error.public_message(),
            path: self.path.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::ResponseError;
    use serde_json::Value;
    use validator::Validate;

    async fn body_of(err: ApiError) -> (StatusCode, Value) {
        let resp = err.error_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn not_found_returns_404_payload() {
        let err = AppError::from(DomainError::OrderNotFound(1)).at("/api/order/v1/1");
        let (status, body) = body_of(err).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], 404);
        assert_eq!(body["error"], "Order_NotFound");
        assert_eq!(body["message"], "Order with id=1 not found");
        assert_eq!(body["path"], "/api/order/v1/1");
    }

    #[actix_web::test]
    async fn invalid_order_returns_400_payload() {
        let err = AppError::InvalidOrder("Cancelled Order cannot be updated".to_string())
            .at("/api/order/v1/3");
        let (status, body) = body_of(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        assert_eq!(body["error"], "Invalid_Order");
        assert_eq!(body["message"], "Cancelled Order cannot be updated");
    }

    #[actix_web::test]
    async fn internal_error_is_500_and_hides_details() {
        let err = AppError::Internal("connection refused".to_string()).at("/api/order/v1");
        let (status, body) = body_of(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], 500);
        assert_eq!(body["error"], "Internal Server Error");
        assert_eq!(body["message"], GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn validation_error_is_400() {
        let err = AppError::Validation("userId: must not be null".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.tag(), "Validation Error");
    }

    #[test]
    fn internal_error_display() {
        assert_eq!(
            AppError::Internal("msg".to_string()).to_string(),
            "Internal error: msg"
        );
    }

    #[test]
    fn domain_invalid_order_maps_to_app_invalid_order() {
        let app_err: AppError = DomainError::invalid_order("bad value").into();
        assert!(matches!(app_err, AppError::InvalidOrder(ref m) if m == "bad value"));
    }

    #[test]
    fn domain_internal_maps_to_app_internal() {
        let app_err: AppError = DomainError::Internal("oops".to_string()).into();
        assert!(matches!(app_err, AppError::Internal(_)));
    }

    #[derive(Validate)]
    struct TwoRequiredFields {
        #[validate(required(message = "Amount must not be null"))]
        amount: Option<i64>,
        #[validate(required(message = "User Id must not be null"))]
        user: Option<i64>,
    }

    #[test]
    fn validation_errors_report_first_field_by_name() {
        let errors = TwoRequiredFields {
            amount: None,
            user: None,
        }
        .validate()
        .unwrap_err();

        let app_err = AppError::from(errors);

        assert!(matches!(
            app_err,
            AppError::Validation(ref m) if m == "amount: Amount must not be null"
        ));
    }

    #[derive(Validate)]
    struct NewOrderFields {
        #[validate(required(message = "User Id must not be null"))]
        user_id: Option<i64>,
    }

    #[test]
    fn validation_errors_use_json_field_names() {
        let errors = NewOrderFields { user_id: None }.validate().unwrap_err();

        assert!(matches!(
            AppError::from(errors),
            AppError::Validation(ref m) if m == "userId: User Id must not be null"
        ));
    }

    #[test]
    fn json_field_name_converts_snake_case() {
        assert_eq!(json_field_name("user_id"), "userId");
        assert_eq!(json_field_name("amount"), "amount");
        assert_eq!(json_field_name("created_at_utc"), "createdAtUtc");
    }
}

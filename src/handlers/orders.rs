use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::OrderService;
use crate::domain::errors::DomainError;
use crate::domain::order::{CreateOrder, Order, OrderPatch, OrderStatus};
use crate::domain::ports::OrderRepository;
use crate::errors::{ApiError, AppError, ErrorResponse};

pub type SharedOrderService = OrderService<Arc<dyn OrderRepository>>;

// ── Request / response DTOs ──────────────────────────────────────────────────

/// Any `status` sent on create is ignored.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[serde(rename = "userId")]
    #[validate(required(message = "User Id must not be null"))]
    pub user_id: Option<i64>,
    /// Decimal amount as a number or a string, e.g. 25000 or "99.95"
    #[validate(required(message = "Amount must not be null"))]
    #[schema(value_type = Option<String>, example = "25000")]
    pub amount: Option<BigDecimal>,
}

/// Every field is optional; absent fields leave the stored value unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    #[serde(rename = "userId", default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "25000")]
    pub amount: Option<BigDecimal>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    /// Decimal amount as a string to avoid floating-point issues
    pub amount: String,
    pub status: OrderStatus,
}

impl From<CreateOrderRequest> for CreateOrder {
    fn from(r: CreateOrderRequest) -> Self {
        CreateOrder {
            user_id: r.user_id,
            amount: r.amount,
        }
    }
}

impl From<UpdateOrderRequest> for OrderPatch {
    fn from(r: UpdateOrderRequest) -> Self {
        OrderPatch {
            user_id: r.user_id,
            amount: r.amount,
            status: r.status,
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        OrderResponse {
            id: o.id,
            user_id: o.user_id,
            amount: o.amount.to_string(),
            status: o.status,
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Run a service call on the blocking pool; diesel connections are synchronous.
async fn blocking<T, F>(req: &HttpRequest, f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    web::block(f)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))
        .and_then(|r| r.map_err(AppError::from))
        .map_err(|e| e.at(req.path()))
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/order/v1
///
/// Creates a new order. The store assigns the id and the status is always
/// `Created`.
#[utoipa::path(
    post,
    path = "/api/order/v1",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created successfully", body = OrderResponse),
        (status = 400, description = "Validation error or invalid order", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn create_order(
    req: HttpRequest,
    service: web::Data<SharedOrderService>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, ApiError> {
    log::info!("POST {} request received", req.path());
    let body = body.into_inner();
    body.validate().map_err(|e| AppError::from(e).at(req.path()))?;

    let order = blocking(&req, move || service.create_order(body.into())).await?;

    log::info!("POST {} created order id={}", req.path(), order.id);
    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /api/order/v1/{id}
#[utoipa::path(
    get,
    path = "/api/order/v1/{id}",
    params(
        ("id" = i64, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn get_order(
    req: HttpRequest,
    service: web::Data<SharedOrderService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    log::info!("GET order request for id={}", id);

    let order = blocking(&req, move || service.find_by_id(id)).await?;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// GET /api/order/v1
///
/// Returns every order in creation order.
#[utoipa::path(
    get,
    path = "/api/order/v1",
    responses(
        (status = 200, description = "All orders", body = Vec<OrderResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    req: HttpRequest,
    service: web::Data<SharedOrderService>,
) -> Result<HttpResponse, ApiError> {
    let orders = blocking(&req, move || service.find_all()).await?;

    log::info!("GET {} returned {} orders", req.path(), orders.len());
    let items: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(items))
}

/// PUT /api/order/v1/{id}
///
/// Partial update: only the fields present in the body are changed.
/// Cancelled orders cannot be updated.
#[utoipa::path(
    put,
    path = "/api/order/v1/{id}",
    params(
        ("id" = i64, Path, description = "Order id"),
    ),
    request_body = UpdateOrderRequest,
    responses(
        (status = 202, description = "Order updated", body = OrderResponse),
        (status = 400, description = "Validation error or invalid order", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn update_order(
    req: HttpRequest,
    service: web::Data<SharedOrderService>,
    path: web::Path<i64>,
    body: web::Json<UpdateOrderRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let patch = OrderPatch::from(body.into_inner());
    log::info!("PUT order request for id={}", id);

    let order = blocking(&req, move || service.update_order(id, patch)).await?;

    log::info!("PUT order id={} updated, status={}", order.id, order.status);
    Ok(HttpResponse::Accepted().json(OrderResponse::from(order)))
}

/// DELETE /api/order/v1/{id}
#[utoipa::path(
    delete,
    path = "/api/order/v1/{id}",
    params(
        ("id" = i64, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order deleted", body = String, content_type = "text/plain"),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    req: HttpRequest,
    service: web::Data<SharedOrderService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    log::info!("DELETE order request for id={}", id);

    let message = blocking(&req, move || service.delete_by_id(id)).await?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(message))
}

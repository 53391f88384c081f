pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use application::OrderService;
pub use config::{Config, StoreConfig};
pub use db::{create_pool, run_migrations, DbError, DbPool};
pub use domain::ports::OrderRepository;
pub use handlers::orders::SharedOrderService;
pub use infrastructure::{DieselOrderRepository, InMemoryOrderRepository};

use errors::AppError;
use handlers::orders;

#[derive(OpenApi)]
#[openapi(
    paths(
        orders::create_order,
        orders::list_orders,
        orders::get_order,
        orders::update_order,
        orders::delete_order,
    ),
    components(schemas(
        orders::CreateOrderRequest,
        orders::UpdateOrderRequest,
        orders::OrderResponse,
        errors::ErrorResponse,
        domain::order::OrderStatus,
    )),
    tags((name = "orders", description = "Order management"))
)]
pub struct ApiDoc;

/// Open the store selected by `store`. Postgres pools are migrated before use.
pub fn build_repository(store: &StoreConfig) -> Result<Arc<dyn OrderRepository>, DbError> {
    match store {
        StoreConfig::Memory => {
            log::warn!("Using the in-memory order store; data is lost on restart");
            Ok(Arc::new(InMemoryOrderRepository::new()))
        }
        StoreConfig::Postgres {
            database_url,
            pool_size,
        } => {
            let pool = create_pool(database_url, *pool_size)?;
            run_migrations(&pool)?;
            Ok(Arc::new(DieselOrderRepository::new(pool)))
        }
    }
}

/// Register the order routes plus the extractor error handlers that turn
/// malformed bodies and paths into `Validation Error` responses.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, req| {
        AppError::Validation(err.to_string()).at(req.path()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, req| {
        AppError::Validation(err.to_string()).at(req.path()).into()
    }))
    .service(
        web::scope("/api/order/v1")
            .route("", web::post().to(orders::create_order))
            .route("", web::get().to(orders::list_orders))
            .route("/{id}", web::get().to(orders::get_order))
            .route("/{id}", web::put().to(orders::update_order))
            .route("/{id}", web::delete().to(orders::delete_order)),
    );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or spawning) the returned
/// server.
pub fn build_server(
    service: SharedOrderService,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let service = web::Data::new(service);
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(Logger::default())
            .configure(routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}

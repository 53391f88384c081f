use dotenvy::dotenv;
use order_api::{build_repository, build_server, Config, OrderService};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(std::io::Error::other)?;
    let repository = build_repository(&config.store).map_err(std::io::Error::other)?;

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(OrderService::new(repository), &config.host, config.port)?.await
}

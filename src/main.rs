use std::io;
use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};
use config::{Config, Environment, File};
use dotenvy::dotenv;

use pushkind_recipes::auth::{CredentialVerifier, JwtVerifier};
use pushkind_recipes::db::establish_connection_pool;
use pushkind_recipes::models::config::ServerConfig;
use pushkind_recipes::repository::DieselRepository;
use pushkind_recipes::routes::configure;

fn load_config() -> Result<ServerConfig, config::ConfigError> {
    let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());

    Config::builder()
        .add_source(File::with_name("config/default"))
        .add_source(File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(Environment::with_prefix("APP"))
        .build()?
        .try_deserialize()
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = load_config().map_err(|e| {
        log::error!("Failed to load configuration: {e}");
        io::Error::other(e)
    })?;

    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        log::error!("Failed to establish database connection: {e}");
        io::Error::other(e)
    })?;
    let repo = web::Data::new(DieselRepository::new(pool));

    let verifier: Arc<dyn CredentialVerifier> =
        Arc::new(JwtVerifier::new(&server_config.jwt_secret));
    let verifier = web::Data::from(verifier);

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(repo.clone())
            .app_data(verifier.clone())
            .configure(configure)
    })
    .bind(bind_address)?
    .run()
    .await
}

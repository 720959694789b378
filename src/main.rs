#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use yahoo_token::{
    handlers::{health, token_authenticate, ProfileVerifier},
    settings::YahooTokenSettings,
    strategy::YahooTokenStrategy,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load configuration from Settings.toml and environment variables
    // This also loads .env file and initializes the logger
    let settings = YahooTokenSettings::load()
        .map_err(|e| std::io::Error::other(format!("Failed to load settings: {e}")))?;

    let strategy = YahooTokenStrategy::with_timeout(
        settings.strategy.clone(),
        settings.http_timeout(),
        ProfileVerifier,
    )
    .map_err(|e| std::io::Error::other(format!("Failed to initialize strategy: {e}")))?;

    start_server(web::Data::new(strategy), settings).await
}

/// Start the HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Server binding fails
/// - Server fails to start
async fn start_server(
    strategy: web::Data<YahooTokenStrategy<ProfileVerifier>>,
    settings: YahooTokenSettings,
) -> std::io::Result<()> {
    let bind_address = settings.get_bind_address();
    log::info!(
        "Starting yahoo-token {} on http://{bind_address}",
        yahoo_token::VERSION
    );
    log::info!("  GET|POST /auth/yahoo/token - Authenticate with a Yahoo access token");
    log::info!("  GET      /ping             - Health check");

    let cors_origins = settings.get_cors_origins();

    HttpServer::new(move || {
        let cors_origins = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _| {
                cors_origins
                    .iter()
                    .any(|allowed| allowed == origin.to_str().unwrap_or(""))
            })
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec!["Authorization", "Content-Type", "Accept"])
            .max_age(3600);

        App::new()
            .app_data(strategy.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .configure(configure_services)
    })
    .bind(&bind_address)?
    .run()
    .await
}

fn configure_services(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/auth/yahoo/token",
        web::get().to(token_authenticate::<ProfileVerifier>),
    )
    .route(
        "/auth/yahoo/token",
        web::post().to(token_authenticate::<ProfileVerifier>),
    )
    .route("/ping", web::get().to(health));
}

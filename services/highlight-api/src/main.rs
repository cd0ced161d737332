use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use highlight_api::{configure, AppState};
use passage_locator::{config::Settings, palette};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    info!("starting highlight-api service");

    let settings = Settings::new()?;
    if !palette::is_valid_color(&settings.default_color) {
        warn!(
            color = %settings.default_color,
            fallback = palette::DEFAULT_COLOR,
            "unknown default color, falling back"
        );
    }
    let cfg = settings.matcher_config();
    info!(
        tolerance = cfg.tolerance,
        min_overlap_chars = cfg.min_overlap_chars,
        port = settings.http_port,
        "matcher configured"
    );

    let state = web::Data::new(AppState::new(&settings));
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(("0.0.0.0", settings.http_port))?
    .run()
    .await?;
    Ok(())
}

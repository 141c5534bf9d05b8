//! web-server — Company profile website.
//!
//! Serves the home, about, services and contact pages from handlebars
//! templates, logs contact form submissions, and lists features and
//! testimonials from either a SQLite database or compiled-in demo content.
//!
//! Run:
//! ```bash
//! # pretty logs (default); PORT optional
//! cargo run -p web-server
//!
//! # demo content, no database, no css tooling
//! CONTENT_SOURCE=static ASSET_PIPELINE=off cargo run -p web-server
//! ```
//!
//! Configuration: See `config.rs` for all environment variables.
//!

mod assets;
mod config;
mod error;
mod render;
mod routes;
mod views;

use std::net::SocketAddr;
use std::sync::Arc;

use domain::adapters::static_repo::StaticContentRepo;
use domain::ContentRepository;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::assets::AssetPipeline;
use crate::error::StartupError;
use crate::render::Renderer;

#[tokio::main]
async fn main() {
    // Load and validate config first (fail fast on misconfiguration)
    let cfg = match config::Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&cfg);
    cfg.warn_if_dev_mode();

    if let Err(e) = run(cfg).await {
        error!(err = %e, "startup failed");
        std::process::exit(1);
    }
}

async fn run(cfg: config::Config) -> Result<(), StartupError> {
    if let Ok(dir) = std::env::current_dir() {
        info!(cwd = %dir.display(), "working directory");
    }

    let repo = build_repo(&cfg)?;

    let assets = AssetPipeline::new(cfg.npm_bin.clone(), cfg.asset_pipeline);
    if let Err(e) = assets.build().await {
        warn!(err = %e, "css build failed; make sure `npm install` has been run");
    }
    // Detached: runs until it exits on its own or the process ends.
    let _watcher = assets.spawn_watcher();

    let renderer = Renderer::new(&cfg.views_dir, cfg.template_reload)?;
    let state = routes::AppState::new(repo, cfg.company.clone(), renderer, cfg.views_dir.clone());

    // Request ID header name
    let x_request_id = axum::http::HeaderName::from_static("x-request-id");

    let app = routes::router(state, &cfg.static_dir)
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid));

    let addr: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;
    info!(%addr, "web-server listening");
    info!(
        "check template files at http://localhost:{}/check-static",
        cfg.port
    );
    axum::serve(listener, app).await.map_err(StartupError::Serve)
}

fn init_tracing(cfg: &config::Config) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    match cfg.log_format {
        config::LogFormat::Json => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(fmt::time::SystemTime)
                        .with_writer(std::io::stdout),
                )
                .init();
        }
        config::LogFormat::Pretty => {
            registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_writer(std::io::stdout),
                )
                .init();
        }
    }
}

// Construct the content repository selected by config and feature flags.
fn build_repo(cfg: &config::Config) -> Result<Arc<dyn ContentRepository>, StartupError> {
    match cfg.content_source {
        config::ContentSource::Static => Ok(Arc::new(StaticContentRepo::new())),
        #[cfg(feature = "sqlite")]
        config::ContentSource::Sqlite => {
            let repo = sqlite_adapter::SqliteContentRepo::open(&cfg.db_path, cfg.db_busy_timeout)
                .map_err(StartupError::Database)?;
            info!(path = %cfg.db_path.display(), "database connected");

            info!("running database migrations");
            let applied = repo.migrate().map_err(StartupError::Migration)?;
            let version = repo.schema_version().map_err(StartupError::Database)?;
            info!(?applied, version, "migrations completed");
            Ok(Arc::new(repo))
        }
        #[cfg(not(feature = "sqlite"))]
        config::ContentSource::Sqlite => Err(StartupError::SourceUnavailable("sqlite")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(pairs: &[(&str, String)]) -> config::Config {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        config::Config::from_lookup(|k| map.get(k).cloned()).unwrap()
    }

    #[test]
    fn static_source_never_touches_the_database() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("never.db");
        let cfg = config_with(&[
            ("CONTENT_SOURCE", "static".into()),
            ("DB_PATH", db.display().to_string()),
        ]);
        let repo = build_repo(&cfg).unwrap();
        assert_eq!(repo.list_features().unwrap().len(), 4);
        assert!(!db.exists());
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn unreachable_database_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("plain-file");
        std::fs::write(&blocker, "not a directory").unwrap();
        let cfg = config_with(&[
            ("CONTENT_SOURCE", "sqlite".into()),
            ("DB_PATH", blocker.join("site.db").display().to_string()),
        ]);
        assert!(matches!(build_repo(&cfg), Err(StartupError::Database(_))));
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn fresh_database_is_migrated_and_seeded() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_with(&[
            ("CONTENT_SOURCE", "sqlite".into()),
            ("DB_PATH", dir.path().join("data/site.db").display().to_string()),
        ]);
        let repo = build_repo(&cfg).unwrap();
        assert_eq!(repo.list_testimonials().unwrap().len(), 3);
    }
}

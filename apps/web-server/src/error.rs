use std::path::PathBuf;

use domain::CoreError;

/// Errors that stop the process before it starts serving.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("database unavailable: {0}")]
    Database(CoreError),

    #[error("running migrations failed: {0}")]
    Migration(CoreError),

    #[cfg(not(feature = "sqlite"))]
    #[error("content source '{0}' is not compiled into this build")]
    SourceUnavailable(&'static str),

    #[error("template directory {} is not readable: {source}", .path.display())]
    TemplateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template '{name}' failed to load: {source}")]
    Template {
        name: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Errors while turning a view model into HTML. Served as 500.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("template '{0}' is not registered")]
    MissingTemplate(String),

    #[error("view model could not be serialised: {0}")]
    Context(#[from] serde_json::Error),

    #[error("template render failed: {0}")]
    Template(#[from] handlebars::RenderError),
}

//! Route table and page handlers.
//!
//! Every page handler builds its view model and renders it inside the shared
//! layout. Anything unmatched is looked up under the static root first and
//! otherwise answered with the rendered not-found page and a 404 status.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, State},
    handler::Handler,
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, MethodRouter},
    Form, Json, Router,
};
use chrono::{SecondsFormat, Utc};
use domain::service::{ContentService, HomeContent};
use domain::{CompanyInfo, ContactSubmission, ContentRepository};
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::render::{Renderer, StaticCheck};
use crate::views::{self, PageView};

const INTERNAL_ERROR_HTML: &str = "<!doctype html><html><head><title>500 - Internal Server Error</title></head>\
<body><h1>500 - Internal Server Error</h1><p>Something went wrong while rendering this page.</p></body></html>";

pub type SharedContent = ContentService<Arc<dyn ContentRepository>>;

#[derive(Clone)]
pub struct AppState {
    content: Arc<SharedContent>,
    company: Arc<CompanyInfo>,
    renderer: Arc<Renderer>,
    views_dir: PathBuf,
}

impl AppState {
    pub fn new(
        repo: Arc<dyn ContentRepository>,
        company: CompanyInfo,
        renderer: Renderer,
        views_dir: PathBuf,
    ) -> Self {
        Self {
            content: Arc::new(ContentService::new(repo)),
            company: Arc::new(company),
            renderer: Arc::new(renderer),
            views_dir,
        }
    }
}

/// Build the application router.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    // Browser must not cache assets that the watcher keeps rebuilding.
    let static_assets = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache"),
        ))
        .service(
            ServeDir::new(static_dir)
                .append_index_html_on_directories(false)
                .call_fallback_on_method_not_allowed(true)
                .not_found_service(not_found.with_state(state.clone())),
        );

    // Directories are not browsable; they fall through to the 404 page.
    let static_root = ServeDir::new(static_dir)
        .append_index_html_on_directories(false)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(not_found.with_state(state.clone()));

    Router::new()
        .route("/", page(get(home)))
        .route("/about", page(get(about)))
        .route("/services", page(get(services)))
        .route("/contact", page(get(contact_form).post(contact_submit)))
        .route("/404", page(get(not_found_page)))
        .route("/check-static", page(get(check_static)))
        .nest_service("/static", static_assets)
        .fallback_service(static_root)
        .with_state(state)
}

// Known path with an unsupported method still gets the not-found page.
fn page(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.fallback(not_found)
}

fn html(status: StatusCode, renderer: &Renderer, view: &PageView<'_>) -> Response {
    match renderer.render_page(view) {
        Ok(body) => {
            debug!(
                template = view.template(),
                active = view.active().map(|k| k.as_str()).unwrap_or("-"),
                "page rendered"
            );
            (status, Html(body)).into_response()
        }
        Err(e) => {
            error!(template = view.template(), err = %e, "render failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Html(INTERNAL_ERROR_HTML)).into_response()
        }
    }
}

async fn load_home_content(content: Arc<SharedContent>) -> HomeContent {
    // Repository calls block; keep them off the async workers.
    let loaded = tokio::task::spawn_blocking(move || content.home_content()).await;
    let content = match loaded {
        Ok(c) => c,
        Err(e) => {
            error!(err = %e, "content task failed, rendering empty lists");
            HomeContent::default()
        }
    };
    for failure in &content.failures {
        warn!(
            section = failure.section.as_str(),
            err = %failure.error,
            "content fetch failed, rendering empty list"
        );
    }
    content
}

async fn home(State(state): State<AppState>) -> Response {
    let content = load_home_content(state.content.clone()).await;
    html(
        StatusCode::OK,
        &state.renderer,
        &views::home(&state.company, content),
    )
}

async fn about(State(state): State<AppState>) -> Response {
    html(StatusCode::OK, &state.renderer, &views::about(&state.company))
}

async fn services(State(state): State<AppState>) -> Response {
    html(StatusCode::OK, &state.renderer, &views::services(&state.company))
}

async fn contact_form(State(state): State<AppState>) -> Response {
    html(StatusCode::OK, &state.renderer, &views::contact(&state.company))
}

#[derive(Debug, Default, Deserialize)]
struct ContactForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    message: String,
}

async fn contact_submit(
    State(state): State<AppState>,
    form: Result<Form<ContactForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(f)) => f,
        Err(rejection) => {
            warn!(err = %rejection, "unreadable contact form, treating fields as empty");
            ContactForm::default()
        }
    };
    let submission = ContactSubmission::new(form.name, form.email, form.message);

    info!(
        submission_id = %Uuid::new_v4(),
        name = %submission.name,
        email = %submission.email,
        message = %submission.message,
        received_at = %Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        "contact message received"
    );

    html(
        StatusCode::OK,
        &state.renderer,
        &views::contact_submitted(&state.company, &submission),
    )
}

async fn not_found_page(State(state): State<AppState>) -> Response {
    html(StatusCode::OK, &state.renderer, &views::not_found(&state.company))
}

async fn not_found(State(state): State<AppState>) -> Response {
    html(
        StatusCode::NOT_FOUND,
        &state.renderer,
        &views::not_found(&state.company),
    )
}

async fn check_static(State(state): State<AppState>) -> Json<StaticCheck> {
    Json(StaticCheck::probe(&state.views_dir))
}

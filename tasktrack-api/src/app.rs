/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use tasktrack_api::{app::{build_router, AppState}, config::Config};
/// use tasktrack_shared::store::MemoryStore;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(MemoryStore::new()), config);
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    middleware::{auth::jwt_auth_layer, security::SecurityHeadersLayer},
    routes,
};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use tasktrack_shared::store::Store;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into every handler; both fields are `Arc`s.
#[derive(Clone)]
pub struct AppState {
    /// Storage capability used by every operation
    pub store: Arc<dyn Store>,

    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete router
///
/// ```text
/// /api
/// ├── GET   /health
/// ├── /auth
/// │   ├── POST /register
/// │   ├── POST /login
/// │   ├── POST /refresh
/// │   └── GET  /me                                (auth)
/// ├── /organizations                              (auth)
/// │   ├── POST /
/// │   ├── GET  /
/// │   └── POST /:id/join
/// ├── /projects                                   (auth)
/// │   ├── POST /
/// │   └── GET  /organization/:organization_id
/// ├── /tasks                                      (auth)
/// │   ├── POST  /
/// │   ├── GET   /project/:project_id
/// │   └── PATCH /:id/status
/// └── /activities                                 (auth)
///     └── GET /organization/:organization_id
/// ```
///
/// Layers, outermost first: security headers, CORS, request tracing.
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/refresh", post(routes::auth::refresh));

    let protected_routes = Router::new()
        .route("/auth/me", get(routes::auth::me))
        .route(
            "/organizations",
            post(routes::organizations::create_organization)
                .get(routes::organizations::list_organizations),
        )
        .route(
            "/organizations/:id/join",
            post(routes::organizations::join_organization),
        )
        .route("/projects", post(routes::projects::create_project))
        .route(
            "/projects/organization/:organization_id",
            get(routes::projects::list_projects),
        )
        .route("/tasks", post(routes::tasks::create_task))
        .route("/tasks/project/:project_id", get(routes::tasks::list_tasks))
        .route("/tasks/:id/status", patch(routes::tasks::update_task_status))
        .route(
            "/activities/organization/:organization_id",
            get(routes::activities::list_activities),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let api_routes = public_routes.merge(protected_routes);

    let cors = if state.config.cors_permissive() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

//! JSON HTTP API.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Service banner |
//! | `GET`  | `/health` | Health check with catalog size and origin |
//! | `GET`  | `/api/exoplanets?max_dist=&max_size=` | Filtered catalog page |
//! | `POST` | `/api/signup` | Create an account |
//! | `POST` | `/api/login` | Verify credentials |
//! | `POST` | `/api/save_bookmark` | Save a planet for a user |
//! | `POST` | `/api/my_bookmarks` | List a user's saved planets |
//! | `GET`  | `/api/iss-location` | Live ISS position |
//! | `GET`  | `/api/iss-predict?timestamp=` | ISS position at a Unix time |
//! | `GET`  | `/api/classified` | Classified files feed |
//!
//! # Response Contract
//!
//! Success bodies carry `"status": "success"`. Errors carry a machine code and
//! a message safe to show to end users:
//!
//! ```json
//! { "status": "error", "code": "already_bookmarked", "message": "Already saved in your Universe!" }
//! ```
//!
//! | Code | HTTP |
//! |------|------|
//! | `validation` | 400 |
//! | `invalid_credential` | 401 |
//! | `duplicate_credential`, `already_bookmarked` | 409 |
//! | `internal` | 500 |
//! | `upstream` | 502 |
//! | `storage_unavailable` | 503 |
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so the browser frontend
//! can be hosted separately.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::accounts::Accounts;
use crate::bookmarks::Bookmarks;
use crate::catalog::{query, ArchiveSource, CatalogStore, QueryBounds};
use crate::classified::{classified_files, ClassifiedFile};
use crate::config::Config;
use crate::db;
use crate::error::ServiceError;
use crate::migrate;
use crate::models::CatalogEntry;
use crate::satellite::{parse_timestamp, HttpSatelliteSource, SatelliteSource};
use crate::store::{BookmarkStore, SqliteStore, UserStore};

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<CatalogStore>,
    accounts: Accounts,
    bookmarks: Bookmarks,
    satellite: Arc<dyn SatelliteSource>,
    query_defaults: QueryBounds,
    max_results: usize,
}

impl AppState {
    pub fn new(
        config: &Config,
        catalog: Arc<CatalogStore>,
        users: Arc<dyn UserStore>,
        bookmarks: Arc<dyn BookmarkStore>,
        satellite: Arc<dyn SatelliteSource>,
    ) -> Self {
        Self {
            catalog,
            accounts: Accounts::new(users),
            bookmarks: Bookmarks::new(bookmarks),
            satellite,
            query_defaults: QueryBounds::from_config(&config.catalog),
            max_results: config.catalog.max_results,
        }
    }
}

/// Starts the HTTP server.
///
/// Opens the database and ensures the schema exists, then loads the catalog.
/// The listener is bound only after the catalog load has finished (from the
/// archive or the fallback), so no request ever sees a partial catalog.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let pool = db::connect(config).await?;
    migrate::apply(&pool).await?;
    let store = Arc::new(SqliteStore::new(pool));

    let catalog = CatalogStore::load(&ArchiveSource::from_config(&config.catalog)).await;
    let satellite = Arc::new(HttpSatelliteSource::new(&config.satellite)?);

    let state = AppState::new(config, Arc::new(catalog), store.clone(), store, satellite);
    serve(&config.server.bind, state).await
}

/// Binds `bind_addr` and serves [`router`] until the process is terminated.
pub async fn serve(bind_addr: &str, state: AppState) -> anyhow::Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("OrbitX server listening on http://{}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the full route table with CORS applied.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/exoplanets", get(handle_exoplanets))
        .route("/signup", post(handle_signup))
        .route("/login", post(handle_login))
        .route("/save_bookmark", post(handle_save_bookmark))
        .route("/my_bookmarks", post(handle_my_bookmarks))
        .route("/iss-location", get(handle_iss_location))
        .route("/iss-predict", get(handle_iss_predict))
        .route("/classified", get(handle_classified));

    Router::new()
        .route("/", get(handle_home))
        .route("/health", get(handle_health))
        .nest("/api", api)
        .layer(cors)
        .with_state(state)
}

// ============ Error response ============

/// JSON error body shared by every endpoint.
#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    code: &'static str,
    message: String,
}

impl ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::InvalidCredential => StatusCode::UNAUTHORIZED,
            ServiceError::DuplicateCredential | ServiceError::AlreadyBookmarked => {
                StatusCode::CONFLICT
            }
            ServiceError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to clients. Dependency details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            ServiceError::StorageUnavailable(_) => "Database server down!".to_string(),
            ServiceError::Upstream(_) => "Tracking service unavailable, try again later.".to_string(),
            ServiceError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        if self.is_retryable() || matches!(self, ServiceError::Internal(_)) {
            tracing::warn!(code = self.code(), error = %self, "request failed");
        }
        let body = ErrorBody {
            status: "error",
            code: self.code(),
            message: self.public_message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

/// Unwraps a JSON body, turning extractor rejections into validation errors.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ServiceError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| ServiceError::validation(e.body_text()))
}

/// `{ status: "success", message }`.
#[derive(Serialize)]
struct MessageResponse {
    status: &'static str,
    message: String,
}

impl MessageResponse {
    fn success(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            status: "success",
            message: message.into(),
        })
    }
}

// ============ GET / and /health ============

async fn handle_home() -> Html<&'static str> {
    Html("<h1>OrbitX Backend Engine is LIVE and Running!</h1>")
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    catalog_size: usize,
    catalog_origin: &'static str,
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        catalog_size: state.catalog.len(),
        catalog_origin: state.catalog.origin().as_str(),
    })
}

// ============ GET /api/exoplanets ============

/// Bounds arrive as raw strings so malformed numbers can be reported as
/// validation errors instead of an extractor rejection.
#[derive(Deserialize)]
struct ExoplanetParams {
    max_dist: Option<String>,
    max_size: Option<String>,
}

#[derive(Serialize)]
struct ExoplanetsResponse {
    status: &'static str,
    total_matches: usize,
    data: Vec<CatalogEntry>,
}

async fn handle_exoplanets(
    State(state): State<AppState>,
    Query(params): Query<ExoplanetParams>,
) -> Result<Json<ExoplanetsResponse>, ServiceError> {
    let bounds = QueryBounds::parse_with_defaults(
        params.max_dist.as_deref(),
        params.max_size.as_deref(),
        state.query_defaults,
    )?;
    let page = query(state.catalog.all(), bounds, state.max_results);

    Ok(Json(ExoplanetsResponse {
        status: "success",
        total_matches: page.total_matches,
        data: page.data,
    }))
}

// ============ POST /api/signup and /api/login ============

#[derive(Deserialize)]
struct SignupRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

async fn handle_signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ServiceError> {
    let req = json_body(payload)?;
    state
        .accounts
        .create(&req.username, &req.email, &req.password)
        .await?;
    Ok(MessageResponse::success("User registered successfully!"))
}

#[derive(Deserialize)]
struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Serialize)]
struct LoginResponse {
    status: &'static str,
    username: String,
    message: &'static str,
}

async fn handle_login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ServiceError> {
    let req = json_body(payload)?;
    let user = state.accounts.verify(&req.email, &req.password).await?;
    Ok(Json(LoginResponse {
        status: "success",
        username: user.username,
        message: "Welcome back!",
    }))
}

// ============ POST /api/save_bookmark and /api/my_bookmarks ============

#[derive(Deserialize)]
struct SaveBookmarkRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    planet_name: String,
}

async fn handle_save_bookmark(
    State(state): State<AppState>,
    payload: Result<Json<SaveBookmarkRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ServiceError> {
    let req = json_body(payload)?;
    state.bookmarks.save(&req.username, &req.planet_name).await?;
    Ok(MessageResponse::success(format!(
        "{} added to your Universe!",
        req.planet_name.trim()
    )))
}

#[derive(Deserialize)]
struct MyBookmarksRequest {
    #[serde(default)]
    username: String,
}

#[derive(Serialize)]
struct BookmarksResponse {
    status: &'static str,
    data: Vec<String>,
}

async fn handle_my_bookmarks(
    State(state): State<AppState>,
    payload: Result<Json<MyBookmarksRequest>, JsonRejection>,
) -> Result<Json<BookmarksResponse>, ServiceError> {
    let req = json_body(payload)?;
    let data = state.bookmarks.list_for(&req.username).await?;
    Ok(Json(BookmarksResponse {
        status: "success",
        data,
    }))
}

// ============ GET /api/iss-location and /api/iss-predict ============

#[derive(Serialize)]
struct PositionResponse {
    status: &'static str,
    latitude: f64,
    longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<i64>,
}

async fn handle_iss_location(
    State(state): State<AppState>,
) -> Result<Json<PositionResponse>, ServiceError> {
    let pos = state.satellite.current().await?;
    Ok(Json(PositionResponse {
        status: "success",
        latitude: pos.latitude,
        longitude: pos.longitude,
        timestamp: None,
    }))
}

#[derive(Deserialize)]
struct PredictParams {
    timestamp: Option<String>,
}

async fn handle_iss_predict(
    State(state): State<AppState>,
    Query(params): Query<PredictParams>,
) -> Result<Json<PositionResponse>, ServiceError> {
    let timestamp = parse_timestamp(params.timestamp.as_deref())?;
    let pos = state.satellite.predict(timestamp).await?;
    Ok(Json(PositionResponse {
        status: "success",
        latitude: pos.latitude,
        longitude: pos.longitude,
        timestamp: Some(timestamp),
    }))
}

// ============ GET /api/classified ============

#[derive(Serialize)]
struct ClassifiedResponse {
    status: &'static str,
    data: Vec<ClassifiedFile>,
}

async fn handle_classified() -> Json<ClassifiedResponse> {
    Json(ClassifiedResponse {
        status: "success",
        data: classified_files(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogOrigin;
    use crate::models::DiscoveryYear;
    use crate::satellite::SatellitePosition;
    use crate::store::InMemoryStore;

    struct FixedSatellite;

    #[async_trait::async_trait]
    impl SatelliteSource for FixedSatellite {
        async fn current(&self) -> Result<SatellitePosition, ServiceError> {
            Ok(SatellitePosition {
                latitude: 1.5,
                longitude: -2.5,
                timestamp: Some(100),
            })
        }

        async fn predict(&self, timestamp: i64) -> Result<SatellitePosition, ServiceError> {
            Ok(SatellitePosition {
                latitude: 0.0,
                longitude: 0.0,
                timestamp: Some(timestamp),
            })
        }
    }

    /// Serves `catalog` with in-memory stores and returns the base URL.
    async fn spawn_app(catalog: CatalogStore) -> String {
        let config: Config =
            toml::from_str("[db]\npath = \"unused.sqlite\"\n[server]\nbind = \"127.0.0.1:0\"\n")
                .unwrap();
        let store = Arc::new(InMemoryStore::new());
        let state = AppState::new(
            &config,
            Arc::new(catalog),
            store.clone(),
            store,
            Arc::new(FixedSatellite),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.ok();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_large_catalog_capped_at_max_results() {
        // Descending distances, so the response order is the reverse of load order.
        let entries = (0..120)
            .map(|i| CatalogEntry {
                name: format!("P-{}", i),
                distance_ly: (120 - i) as f64,
                radius_earth: 1.0,
                discovery_year: DiscoveryYear::Unknown,
            })
            .collect();
        let base = spawn_app(CatalogStore::from_entries(entries, CatalogOrigin::Remote)).await;

        let body: serde_json::Value = reqwest::get(format!("{}/api/exoplanets", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["total_matches"], 120);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 50);
        assert_eq!(data[0]["name"], "P-119");
        assert_eq!(data[0]["year"], "Unknown");

        let health: serde_json::Value = reqwest::get(format!("{}/health", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(health["catalog_size"], 120);
        assert_eq!(health["catalog_origin"], "remote");
    }

    #[tokio::test]
    async fn test_empty_catalog_answers_empty_page() {
        let base = spawn_app(CatalogStore::from_entries(Vec::new(), CatalogOrigin::Remote)).await;

        let body: serde_json::Value = reqwest::get(format!("{}/api/exoplanets", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "success");
        assert_eq!(body["total_matches"], 0);
        assert_eq!(body["data"], serde_json::json!([]));

        let position: serde_json::Value = reqwest::get(format!("{}/api/iss-location", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(position["latitude"], 1.5);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ServiceError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::InvalidCredential.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ServiceError::DuplicateCredential.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::AlreadyBookmarked.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::StorageUnavailable("io".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_storage_details_not_exposed() {
        let err = ServiceError::StorageUnavailable("disk I/O error at /var/db".into());
        assert_eq!(err.public_message(), "Database server down!");
        assert_eq!(
            ServiceError::AlreadyBookmarked.public_message(),
            "Already saved in your Universe!"
        );
    }
}

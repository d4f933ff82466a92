//! JSON API server.

use crate::agent;
use anyhow::{Context, Result};
use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use dagskra_core::programs::{apply_filters, load_programs};
use dagskra_core::{render_markdown, Config, DevlogStore};
use dagskra_types::{Program, SortBy};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

const DEFAULT_DEVLOG_LIMIT: usize = 10;

#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    devlogs: DevlogStore,
    programs: Option<Arc<Vec<Program>>>,
}

impl AppState {
    /// Load the program snapshot, if one is configured
    pub fn load(config: Config) -> Result<Self> {
        let programs = match config.programs_path() {
            Some(path) => {
                let programs = load_programs(&path)
                    .with_context(|| format!("Failed to load programs from {:?}", path))?;
                tracing::info!("Loaded {} programs from {:?}", programs.len(), path);
                Some(Arc::new(programs))
            }
            None => None,
        };

        Ok(Self {
            devlogs: DevlogStore::new(config.devlogs_dir()),
            config: Arc::new(config),
            programs,
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/devlogs", get(api_devlogs))
        .route("/api/devlogs/{slug}", get(api_devlog))
        .route("/api/programs", get(api_programs))
        .route("/api/render", post(api_render))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server
pub async fn serve(config_path: &Path, port: Option<u16>) -> Result<()> {
    let config = Config::load_or_default(config_path).context("Failed to load configuration")?;
    let port = port.unwrap_or(config.server.port);
    let state = AppState::load(config)?;

    let addr = format!("127.0.0.1:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Serving {} on http://{}", state.config.site.title, addr);
    println!("\nServing at http://{}", addr);
    println!("   Press Ctrl+C to stop\n");

    axum::serve(listener, router(state))
        .await
        .context("Server error")?;

    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Deserialize)]
struct DevlogListParams {
    offset: Option<usize>,
    limit: Option<usize>,
}

async fn api_devlogs(
    State(state): State<AppState>,
    Query(params): Query<DevlogListParams>,
) -> Response {
    let offset = params.offset.unwrap_or(0);
    let limit = params
        .limit
        .unwrap_or(DEFAULT_DEVLOG_LIMIT)
        .min(state.config.server.max_devlog_limit);

    match state.devlogs.paginate(offset, limit) {
        Ok(page) => Json(agent::envelope("devlog.list", page)).into_response(),
        Err(e) => internal_error("Failed to list devlogs", e),
    }
}

async fn api_devlog(AxumPath(slug): AxumPath<String>, State(state): State<AppState>) -> Response {
    let post = match state.devlogs.load(&slug) {
        Ok(Some(post)) => post,
        Ok(None) => return (StatusCode::NOT_FOUND, "Devlog not found").into_response(),
        Err(e) => return internal_error("Failed to load devlog", e),
    };

    match state.devlogs.neighbors(&slug) {
        Ok(neighbors) => Json(agent::envelope(
            "devlog.full",
            agent::DevlogData::new(post, neighbors),
        ))
        .into_response(),
        Err(e) => internal_error("Failed to list devlogs", e),
    }
}

#[derive(Deserialize)]
struct ProgramParams {
    #[serde(default)]
    q: String,
    #[serde(default)]
    tags: String,
    sort: Option<String>,
    page: Option<usize>,
    page_size: Option<usize>,
}

async fn api_programs(
    State(state): State<AppState>,
    Query(params): Query<ProgramParams>,
) -> Response {
    let Some(programs) = state.programs.as_deref() else {
        return (StatusCode::NOT_FOUND, "No program snapshot configured").into_response();
    };

    let sort_by = match params.sort.as_deref() {
        None | Some("") => SortBy::default(),
        Some(raw) => match SortBy::from_str(raw) {
            Some(sort_by) => sort_by,
            None => {
                return (StatusCode::BAD_REQUEST, format!("Unknown sort '{}'", raw))
                    .into_response()
            }
        },
    };

    let page_size = params
        .page_size
        .unwrap_or(state.config.programs.page_size);
    if page_size == 0 {
        return (StatusCode::BAD_REQUEST, "page_size must be at least 1").into_response();
    }

    let tags: Vec<String> = params
        .tags
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect();

    let filtered = apply_filters(programs, &tags, &params.q, sort_by);
    let data = agent::ProgramPageData::new(&filtered, params.page.unwrap_or(1), page_size);
    Json(agent::envelope("programs.page", data)).into_response()
}

async fn api_render(body: String) -> Html<String> {
    Html(render_markdown(&body))
}

fn internal_error(context: &str, err: impl std::fmt::Display) -> Response {
    tracing::error!("{}: {}", context, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("{}: {}", context, err),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn write_post(dir: &Path, slug: &str, title: &str, date: &str) {
        fs::write(
            dir.join(format!("{slug}.md")),
            format!("---\ntitle: {title}\ndate: \"{date}\"\n---\n**{title}**\n"),
        )
        .unwrap();
    }

    fn fixture(with_programs: bool) -> (TempDir, Router) {
        let dir = TempDir::new().unwrap();
        let devlogs = dir.path().join("content/devlogs");
        fs::create_dir_all(&devlogs).unwrap();
        for i in 1..=3 {
            let date = format!("2025-0{i}-01");
            write_post(&devlogs, &format!("v{i}"), &format!("Útgáfa {i}"), &date);
        }

        let mut yaml = String::from("server:\n  max_devlog_limit: 2\nprograms:\n  page_size: 1\n");
        if with_programs {
            fs::write(
                dir.path().join("programs.json"),
                r#"[
                    {"id": "1", "name": "Ratleikur", "tags": ["útivera"], "like_count": 2},
                    {"id": "2", "name": "Kvöldvaka", "tags": ["söngur"], "like_count": 9},
                    {"id": "3", "name": "Ratvísi", "tags": ["kort"], "like_count": 5}
                ]"#,
            )
            .unwrap();
            yaml.push_str("paths:\n  programs: programs.json\n");
        }
        let config_path = dir.path().join("dagskra.yml");
        fs::write(&config_path, yaml).unwrap();

        let config = Config::from_file(&config_path).unwrap();
        let app = router(AppState::load(config).unwrap());
        (dir, app)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_healthz() {
        let (_dir, app) = fixture(false);
        let response = app
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_devlog_list_caps_limit() {
        let (_dir, app) = fixture(false);
        let (status, body) = get_json(app, "/api/devlogs?limit=100").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["kind"], "devlog.list");
        assert_eq!(body["data"]["total"], 3);
        let items = body["data"]["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["slug"], "v3");
    }

    #[tokio::test]
    async fn test_devlog_detail_and_missing() {
        let (_dir, app) = fixture(false);
        let (status, body) = get_json(app.clone(), "/api/devlogs/v2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["post"]["title"], "Útgáfa 2");
        assert_eq!(body["data"]["html"], "<p><strong>Útgáfa 2</strong></p>\n");
        assert_eq!(body["data"]["prev"]["slug"], "v3");
        assert_eq!(body["data"]["next"]["slug"], "v1");

        let (status, _) = get_json(app, "/api/devlogs/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_devlog_title_with_colon() {
        let (dir, app) = fixture(false);
        fs::write(
            dir.path().join("content/devlogs/v4.md"),
            "---\ntitle: Devlog #4: Síur\ndate: 2025-04-01\nsummary: Lagað: síur virka\n---\nBody\n",
        )
        .unwrap();

        let (status, body) = get_json(app.clone(), "/api/devlogs/v4").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["post"]["title"], "Devlog #4: Síur");
        assert_eq!(body["data"]["post"]["summary"], "Lagað: síur virka");

        let (_, body) = get_json(app, "/api/devlogs").await;
        assert_eq!(body["data"]["total"], 4);
        assert_eq!(body["data"]["items"][0]["slug"], "v4");
    }

    #[tokio::test]
    async fn test_programs_pipeline() {
        let (_dir, app) = fixture(true);
        let (status, body) =
            get_json(app.clone(), "/api/programs?q=rat&sort=most-liked&page=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total"], 2);
        assert_eq!(body["data"]["total_pages"], 2);
        assert_eq!(body["data"]["items"][0]["name"], "Ratleikur");

        let (_, body) = get_json(
            app.clone(),
            "/api/programs?tags=s%C3%B6ngur,kort&sort=alphabetical&page_size=5",
        )
        .await;
        let names: Vec<&str> = body["data"]["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Kvöldvaka", "Ratvísi"]);

        let (status, _) = get_json(app, "/api/programs?sort=random").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_programs_without_snapshot() {
        let (_dir, app) = fixture(false);
        let (status, _) = get_json(app, "/api/programs").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_render_endpoint() {
        let (_dir, app) = fixture(false);
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/render")
                    .body(Body::from("# Hæ\n[x](javascript:alert(1))"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.starts_with("<h1>Hæ</h1>\n"));
        assert!(html.contains(r##"href="#""##));
    }
}

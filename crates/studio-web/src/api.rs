//! Web API types and handlers
//!
//! Provides the JSON endpoints behind the single-page UI: run a query
//! through the agent pipeline, read or clear the session history, and
//! download the latest output as markdown.

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use studio_core::{Error, Manager, SessionHistory};

/// Application state shared across handlers
pub struct AppState {
    /// Pipeline coordinator
    pub manager: Arc<Manager>,
    /// Session-scoped run history, most recent first
    pub history: Arc<RwLock<SessionHistory>>,
    /// Whether an LLM credential is available
    pub key_configured: bool,
    /// Model identifier shown in the UI
    pub model: String,
    /// Held for the duration of a pipeline run; a second run while one
    /// is in flight gets 409 instead of queueing.
    run_gate: Arc<Mutex<()>>,
}

impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            manager: self.manager.clone(),
            history: self.history.clone(),
            key_configured: self.key_configured,
            model: self.model.clone(),
            run_gate: self.run_gate.clone(),
        }
    }
}

impl AppState {
    /// Create a new application state
    pub fn new(manager: Arc<Manager>, key_configured: bool, model: impl Into<String>) -> Self {
        Self {
            manager,
            history: Arc::new(RwLock::new(SessionHistory::new())),
            key_configured,
            model: model.into(),
            run_gate: Arc::new(Mutex::new(())),
        }
    }
}

/// Request body for POST /api/run
#[derive(Debug, Clone, Deserialize)]
pub struct RunRequest {
    /// The topic or question to send through the pipeline
    pub query: String,
}

/// Error payload returned by API endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Status payload for GET /api/status
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    /// Worker names in dispatch order
    pub agents: Vec<String>,
    /// Number of completed runs this session
    pub runs: usize,
    pub key_configured: bool,
    pub model: String,
}

fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/run", post(run_query))
        .route("/api/history", get(get_history).delete(clear_history))
        .route("/api/history/latest/download", get(download_latest))
        .route("/api/status", get(get_status))
        .route("/api/health", get(health_check))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
        .with_state(Arc::new(state))
}

/// Single-page UI
async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

/// Run a query through the pipeline and record the result
///
/// Only one run may be in flight at a time. Failed runs leave the
/// history untouched.
async fn run_query(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RunRequest>,
) -> Response {
    let query = request.query.trim().to_string();
    if query.is_empty() {
        return api_error(StatusCode::BAD_REQUEST, Error::EmptyQuery.to_string());
    }
    if !state.key_configured {
        return api_error(
            StatusCode::BAD_REQUEST,
            Error::MissingCredential.to_string(),
        );
    }

    let _running = match state.run_gate.try_lock() {
        Ok(guard) => guard,
        Err(_) => {
            return api_error(StatusCode::CONFLICT, "a run is already in progress");
        }
    };

    info!(query = %query, "pipeline run requested");

    match state.manager.run(&query).await {
        Ok(output) => {
            let mut history = state.history.write().await;
            let record = history.record(query, output).clone();
            Json(record).into_response()
        }
        Err(err @ (Error::EmptyQuery | Error::MissingCredential)) => {
            api_error(StatusCode::BAD_REQUEST, err.to_string())
        }
        Err(err) => {
            error!(error = %err, "pipeline run failed");
            api_error(StatusCode::BAD_GATEWAY, err.to_string())
        }
    }
}

/// List all runs, most recent first
async fn get_history(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let history = state.history.read().await;
    Json(history.runs().to_vec())
}

/// Discard all session history
async fn clear_history(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut history = state.history.write().await;
    history.clear();
    StatusCode::NO_CONTENT
}

/// Download the most recent output as a markdown attachment
async fn download_latest(State(state): State<Arc<AppState>>) -> Response {
    let history = state.history.read().await;
    match history.latest() {
        Some(record) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/markdown; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"multi_agent_output.md\"",
                ),
            ],
            record.output.clone(),
        )
            .into_response(),
        None => api_error(StatusCode::NOT_FOUND, "no runs recorded yet"),
    }
}

/// Session and team status
async fn get_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let history = state.history.read().await;
    Json(StatusResponse {
        agents: state.manager.team_names(),
        runs: history.len(),
        key_configured: state.key_configured,
        model: state.model.clone(),
    })
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "studio-web"
    }))
}

/// Index HTML template
const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Multi-Agent Content Studio</title>
    <style>
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #f5f5f5;
            color: #333;
            line-height: 1.6;
        }
        .container { max-width: 900px; margin: 0 auto; padding: 20px; }
        header {
            background: #2c3e50;
            color: white;
            padding: 20px;
            margin-bottom: 20px;
        }
        header h1 { font-size: 24px; }
        header p { color: #bdc3c7; font-size: 14px; }
        .stats-grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
            gap: 20px;
            margin-bottom: 20px;
        }
        .stat-card {
            background: white;
            border-radius: 8px;
            padding: 20px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }
        .stat-card h3 { color: #666; font-size: 14px; margin-bottom: 10px; }
        .stat-card .value { font-size: 28px; font-weight: bold; color: #2c3e50; }
        .panel {
            background: white;
            border-radius: 8px;
            padding: 20px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
            margin-bottom: 20px;
        }
        .panel h2 { font-size: 18px; margin-bottom: 12px; }
        textarea {
            width: 100%;
            min-height: 90px;
            padding: 12px;
            border: 1px solid #ddd;
            border-radius: 6px;
            font-family: inherit;
            font-size: 14px;
            resize: vertical;
        }
        .btn {
            background: #3498db;
            color: white;
            border: none;
            padding: 10px 20px;
            border-radius: 4px;
            cursor: pointer;
            font-size: 14px;
            margin-top: 10px;
        }
        .btn:hover { background: #2980b9; }
        .btn:disabled { background: #95a5a6; cursor: not-allowed; }
        .btn-secondary { background: #7f8c8d; }
        .btn-secondary:hover { background: #626e70; }
        .error {
            background: #f8d7da;
            color: #721c24;
            border-radius: 4px;
            padding: 10px 12px;
            margin-top: 10px;
            display: none;
        }
        .result {
            white-space: pre-wrap;
            font-size: 14px;
            background: #f8f9fa;
            border: 1px solid #eee;
            border-radius: 6px;
            padding: 14px;
            margin-top: 10px;
        }
        .run {
            border-bottom: 1px solid #eee;
            padding: 10px 0;
        }
        .run summary { cursor: pointer; font-weight: 600; }
        .run .timestamp { color: #999; font-size: 12px; font-weight: normal; }
        .badge {
            display: inline-block;
            padding: 4px 8px;
            border-radius: 4px;
            font-size: 12px;
            font-weight: 600;
        }
        .badge-ok { background: #d4edda; color: #155724; }
        .badge-missing { background: #f8d7da; color: #721c24; }
        .muted { color: #999; font-size: 14px; }
    </style>
</head>
<body>
    <header>
        <div class="container">
            <h1>Multi-Agent Content Studio</h1>
            <p>Researcher, Analyst, Writer and Reviewer agents working in sequence</p>
        </div>
    </header>
    <div class="container">
        <div class="stats-grid">
            <div class="stat-card">
                <h3>Agents</h3>
                <div class="value" id="agent-count">-</div>
            </div>
            <div class="stat-card">
                <h3>Runs This Session</h3>
                <div class="value" id="run-count">-</div>
            </div>
            <div class="stat-card">
                <h3>API Key</h3>
                <div class="value"><span class="badge" id="key-badge">-</span></div>
            </div>
        </div>

        <div class="panel">
            <h2>Generate Content</h2>
            <textarea id="query" placeholder="Enter a topic or question, e.g. The impact of AI on journalism"></textarea>
            <div>
                <button class="btn" id="generate-btn" onclick="runQuery()">Generate</button>
            </div>
            <div class="error" id="error-box"></div>
        </div>

        <div class="panel">
            <h2>Latest Result</h2>
            <div id="latest"><p class="muted">No runs yet. Enter a query above to get started.</p></div>
        </div>

        <div class="panel">
            <h2>Past Runs</h2>
            <div id="history"><p class="muted">Nothing here yet.</p></div>
            <button class="btn btn-secondary" onclick="clearHistory()">Clear History</button>
        </div>
    </div>

    <script>
        function escapeHtml(text) {
            const div = document.createElement('div');
            div.textContent = text;
            return div.innerHTML;
        }

        function showError(message) {
            const box = document.getElementById('error-box');
            box.textContent = message;
            box.style.display = message ? 'block' : 'none';
        }

        async function loadStatus() {
            const res = await fetch('/api/status');
            const status = await res.json();
            document.getElementById('agent-count').textContent = status.agents.length;
            document.getElementById('run-count').textContent = status.runs;
            const badge = document.getElementById('key-badge');
            badge.textContent = status.key_configured ? 'Configured' : 'Missing';
            badge.className = 'badge ' + (status.key_configured ? 'badge-ok' : 'badge-missing');
        }

        function renderLatest(record) {
            document.getElementById('latest').innerHTML =
                '<div class="result">' + escapeHtml(record.output) + '</div>' +
                '<a class="btn" style="display:inline-block;text-decoration:none" ' +
                'href="/api/history/latest/download">Download Markdown</a>';
        }

        async function loadHistory() {
            const res = await fetch('/api/history');
            const runs = await res.json();
            if (runs.length > 0) {
                renderLatest(runs[0]);
            } else {
                document.getElementById('latest').innerHTML =
                    '<p class="muted">No runs yet. Enter a query above to get started.</p>';
            }
            const container = document.getElementById('history');
            if (runs.length === 0) {
                container.innerHTML = '<p class="muted">Nothing here yet.</p>';
                return;
            }
            container.innerHTML = runs.map(r =>
                '<details class="run"><summary>' + escapeHtml(r.query) +
                ' <span class="timestamp">' + new Date(r.timestamp).toLocaleString() + '</span></summary>' +
                '<div class="result">' + escapeHtml(r.output) + '</div></details>'
            ).join('');
        }

        async function runQuery() {
            const query = document.getElementById('query').value;
            const btn = document.getElementById('generate-btn');
            showError('');
            btn.disabled = true;
            btn.textContent = 'Generating...';
            try {
                const res = await fetch('/api/run', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify({ query })
                });
                if (!res.ok) {
                    const body = await res.json();
                    showError(body.error || ('request failed: ' + res.status));
                    return;
                }
                await loadHistory();
                await loadStatus();
            } catch (err) {
                showError('request failed: ' + err);
            } finally {
                btn.disabled = false;
                btn.textContent = 'Generate';
            }
        }

        async function clearHistory() {
            await fetch('/api/history', { method: 'DELETE' });
            await loadHistory();
            await loadStatus();
        }

        loadStatus();
        loadHistory();
    </script>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use studio_core::{AgentRole, Result, Worker, WorkerKind};

    struct EchoWorker {
        kind: WorkerKind,
        role: AgentRole,
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl EchoWorker {
        fn new(kind: WorkerKind, calls: Arc<AtomicUsize>, fail: bool) -> Self {
            Self {
                kind,
                role: AgentRole::new(kind.as_str(), "test"),
                calls,
                fail,
            }
        }
    }

    #[async_trait]
    impl Worker for EchoWorker {
        fn kind(&self) -> WorkerKind {
            self.kind
        }

        fn role(&self) -> &AgentRole {
            &self.role
        }

        async fn invoke(&self, prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::Completion("boom".to_string()));
            }
            Ok(format!("{}[{}]", prompt, self.kind))
        }
    }

    fn test_state(fail_at: Option<WorkerKind>) -> (AppState, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let team: Vec<Arc<dyn Worker>> = WorkerKind::PIPELINE
            .iter()
            .map(|&kind| {
                Arc::new(EchoWorker::new(
                    kind,
                    calls.clone(),
                    fail_at == Some(kind),
                )) as Arc<dyn Worker>
            })
            .collect();
        let manager = Arc::new(Manager::new(team));
        (AppState::new(manager, true, "test-model"), calls)
    }

    #[test]
    fn test_router_builds() {
        let (state, _) = test_state(None);
        let _router = create_router(state);
    }

    #[tokio::test]
    async fn test_run_records_and_returns_output() {
        let (state, calls) = test_state(None);
        let state = Arc::new(state);

        let response = run_query(
            State(state.clone()),
            Json(RunRequest {
                query: "  topic  ".to_string(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(calls.load(Ordering::SeqCst), 4);

        let history = state.history.read().await;
        assert_eq!(history.len(), 1);
        let record = history.latest().unwrap();
        assert_eq!(record.query, "topic");
        assert_eq!(record.output, "topic[researcher][analyst][writer][reviewer]");
    }

    #[tokio::test]
    async fn test_blank_query_is_rejected() {
        let (state, calls) = test_state(None);
        let state = Arc::new(state);

        let response = run_query(
            State(state.clone()),
            Json(RunRequest {
                query: "   ".to_string(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(state.history.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_is_rejected_before_dispatch() {
        let (mut state, calls) = test_state(None);
        state.key_configured = false;
        let state = Arc::new(state);

        let response = run_query(
            State(state.clone()),
            Json(RunRequest {
                query: "topic".to_string(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_run_leaves_history_untouched() {
        let (state, calls) = test_state(Some(WorkerKind::Writer));
        let state = Arc::new(state);

        let response = run_query(
            State(state.clone()),
            Json(RunRequest {
                query: "topic".to_string(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(state.history.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_run_gets_conflict() {
        let (state, _) = test_state(None);
        let state = Arc::new(state);

        let _held = state.run_gate.try_lock().unwrap();

        let response = run_query(
            State(state.clone()),
            Json(RunRequest {
                query: "topic".to_string(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_download_requires_a_run() {
        let (state, _) = test_state(None);
        let state = Arc::new(state);

        let response = download_latest(State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        state
            .history
            .write()
            .await
            .record("q".to_string(), "# Output".to_string());

        let response = download_latest(State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(disposition.contains("multi_agent_output.md"));
    }

    #[tokio::test]
    async fn test_clear_history_empties_session() {
        let (state, _) = test_state(None);
        let state = Arc::new(state);

        state
            .history
            .write()
            .await
            .record("q".to_string(), "out".to_string());

        clear_history(State(state.clone())).await;
        assert!(state.history.read().await.is_empty());
    }
}

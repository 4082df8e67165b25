//! Axum web server with WebSocket control for the visualizer.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State, ws::{Message, WebSocket, WebSocketUpgrade}},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use bfviz_engine::{Cursor, StepLog};
use bfviz_graph::{Distance, EdgeSpec, NodeName};
use bfviz_replay::Direction;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::error::{Error, Result};
use crate::input;
use crate::session::{PlaybackStatus, Session, SessionSnapshot};

/// Shared application state.
pub struct AppState {
    session: RwLock<Session>,
}

/// Visualization server.
pub struct VisServer {
    state: Arc<AppState>,
}

impl VisServer {
    /// Create a server around a session.
    pub fn new(session: Session) -> Self {
        Self {
            state: Arc::new(AppState {
                session: RwLock::new(session),
            }),
        }
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/status", get(status_handler))
            .route("/api/snapshot", get(snapshot_handler))
            .route("/api/steps", get(steps_handler))
            .route("/api/graph", post(graph_handler))
            .route("/api/start", post(start_handler))
            .route("/api/step", post(step_handler))
            .route("/api/seek", post(seek_handler))
            .route("/api/path/{node}", get(path_handler))
            // WebSocket control channel
            .route("/ws", get(ws_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Run the server on the given address.
    pub async fn serve(self, addr: SocketAddr) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Visualization server running on http://{}", addr);
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    let session = state.session.read().await;
    Json(session.status())
}

async fn snapshot_handler(State(state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    let session = state.session.read().await;
    Json(session.snapshot())
}

async fn steps_handler(State(state): State<Arc<AppState>>) -> Result<Json<StepLog>> {
    let session = state.session.read().await;
    let run = session.result().ok_or(Error::NotStarted)?;
    Ok(Json(run.steps.clone()))
}

/// Edge list as text lines or as records.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EdgeInput {
    Text(String),
    Records(Vec<EdgeSpec>),
}

#[derive(Debug, Deserialize)]
struct GraphRequest {
    edges: EdgeInput,
    source: String,
}

async fn graph_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GraphRequest>,
) -> Result<Json<PlaybackStatus>> {
    let graph = match req.edges {
        EdgeInput::Text(text) => input::load_graph(&text, &req.source)?,
        EdgeInput::Records(edges) => input::graph_from_edges(edges, &req.source)?,
    };
    tracing::info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        source = %req.source,
        "graph loaded"
    );

    let mut session = state.session.write().await;
    *session = Session::new(graph);
    Ok(Json(session.status()))
}

async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<SessionSnapshot>> {
    let mut session = state.session.write().await;
    session.start()?;
    Ok(Json(session.snapshot()))
}

#[derive(Debug, Deserialize)]
struct StepRequest {
    direction: Direction,
}

async fn step_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StepRequest>,
) -> Result<Json<SessionSnapshot>> {
    let mut session = state.session.write().await;
    match req.direction {
        Direction::Forward => session.next()?,
        Direction::Backward => session.previous()?,
    };
    Ok(Json(session.snapshot()))
}

#[derive(Debug, Deserialize)]
struct SeekRequest {
    cursor: isize,
}

async fn seek_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SeekRequest>,
) -> Result<Json<SessionSnapshot>> {
    let mut session = state.session.write().await;
    session.seek(Cursor::new(req.cursor))?;
    Ok(Json(session.snapshot()))
}

/// Final shortest path to one vertex.
#[derive(Debug, Serialize)]
struct PathResponse {
    node: NodeName,
    distance: Option<Distance>,
    path: Option<Vec<NodeName>>,
}

async fn path_handler(
    State(state): State<Arc<AppState>>,
    Path(node): Path<String>,
) -> Result<Json<PathResponse>> {
    let session = state.session.read().await;
    let node = NodeName::from(node);
    let path = session.path_to(&node)?;
    let distance = session
        .result()
        .and_then(|run| run.final_distances())
        .and_then(|column| column.get(&node).copied().flatten());

    Ok(Json(PathResponse { node, distance, path }))
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    // Send the current point first
    let snapshot = state.session.read().await.snapshot();
    if let Ok(json) = serde_json::to_string(&WsResponse::Snapshot(snapshot)) {
        if socket.send(Message::Text(json.into())).await.is_err() {
            return;
        }
    }

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                let response = match serde_json::from_str::<WsCommand>(&text) {
                    Ok(cmd) => handle_ws_command(&state, cmd).await,
                    Err(e) => WsResponse::Error {
                        message: format!("invalid command: {}", e),
                    },
                };
                if let Ok(json) = serde_json::to_string(&response) {
                    if socket.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }
    tracing::debug!("websocket closed");
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsCommand {
    GetSnapshot,
    GetStatus,
    Start,
    Next,
    Previous,
    Seek { cursor: isize },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsResponse {
    Snapshot(SessionSnapshot),
    Status(PlaybackStatus),
    Error { message: String },
}

async fn handle_ws_command(state: &Arc<AppState>, cmd: WsCommand) -> WsResponse {
    match cmd {
        WsCommand::GetSnapshot => WsResponse::Snapshot(state.session.read().await.snapshot()),
        WsCommand::GetStatus => WsResponse::Status(state.session.read().await.status()),
        cmd => {
            let mut session = state.session.write().await;
            let outcome = match cmd {
                WsCommand::Start => session.start(),
                WsCommand::Next => session.next().map(drop),
                WsCommand::Previous => session.previous().map(drop),
                WsCommand::Seek { cursor } => session.seek(Cursor::new(cursor)).map(drop),
                WsCommand::GetSnapshot | WsCommand::GetStatus => Ok(()),
            };
            match outcome {
                Ok(()) => WsResponse::Snapshot(session.snapshot()),
                Err(e) => {
                    tracing::warn!(error = %e, "websocket command rejected");
                    WsResponse::Error {
                        message: e.to_string(),
                    }
                }
            }
        }
    }
}

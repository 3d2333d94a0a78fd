pub mod mood;
pub mod state;

use anyhow::{Context, Result};
use http_body_util::Full;
use hyper::{
    body::Bytes,
    header::{self, HeaderValue},
    server::conn::http1,
    service::service_fn,
    Request, Response, StatusCode,
};
use hyper_util::rt::TokioIo;
use serde::Serialize;
use serde_json::json;
use std::{convert::Infallible, future::Future, net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::{
    app::state::AppState,
    config::Config,
    events::{map_request_to_route, Route},
    spotify::build_spotify_client,
};

const FETCH_FAILED: &str = "Failed to fetch songs";

pub type Body = Full<Bytes>;

pub struct App {
    config: Config,
    state: Arc<AppState>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let (tokens, search) = build_spotify_client(&config)?;
        Ok(App {
            config,
            state: Arc::new(AppState::new(tokens, search)),
        })
    }

    pub async fn run(&self) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port));
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind port {}", self.config.port))?;

        // Fetch a token up front so the first search doesn't pay for it.
        // A failure here is logged and retried on the next search.
        let tokens = self.state.tokens.clone();
        tokio::spawn(async move {
            if let Err(e) = tokens.get_token().await {
                warn!("Startup token fetch failed: {e}");
            }
        });

        info!("Server running on http://localhost:{}", self.config.port);
        serve(listener, self.state.clone(), async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Could not listen for Ctrl-C: {e}");
                std::future::pending::<()>().await;
            }
        })
        .await
    }
}

/// Accepts connections until `shutdown` resolves; one task per connection.
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!("Failed to accept connection: {e}");
                        continue;
                    }
                };

                let state = state.clone();
                tokio::spawn(async move {
                    let service = service_fn(move |req| {
                        let state = state.clone();
                        async move { handle_request(&state, req).await }
                    });
                    if let Err(e) = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await
                    {
                        debug!("Connection from {peer} closed with error: {e}");
                    }
                });
            }
            _ = &mut shutdown => {
                info!("Shutting down");
                break;
            }
        }
    }

    Ok(())
}

// ── Request handler ──────────────────────────────────────────────────────────
pub async fn handle_request<B>(state: &AppState, req: Request<B>) -> Result<Response<Body>, Infallible> {
    debug!("{} {}", req.method(), req.uri());
    let route = map_request_to_route(req.method(), req.uri().path(), req.uri().query());

    let response = match route {
        Route::Health => {
            let health = state.health().await;
            json_response(
                StatusCode::OK,
                &json!({ "status": health.status, "spotify": health.has_token }),
            )
        }
        Route::SearchSongs { mood } => match state.search.search_by_mood(mood.as_deref()).await {
            Ok(tracks) => json_response(StatusCode::OK, &tracks),
            Err(_) => error_response(StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED),
        },
        Route::Analyze { text } => match non_blank(text) {
            Some(text) => json_response(StatusCode::OK, &state.analyze(&text)),
            None => error_response(StatusCode::BAD_REQUEST, "text is required"),
        },
        Route::Recommendations { text } => match non_blank(text) {
            Some(text) => match state.recommend(&text).await {
                Ok(recommendations) => json_response(StatusCode::OK, &recommendations),
                Err(_) => error_response(StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED),
            },
            None => error_response(StatusCode::BAD_REQUEST, "text is required"),
        },
        Route::Preflight => preflight_response(),
        Route::MethodNotAllowed => {
            error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
        }
        Route::NotFound => error_response(StatusCode::NOT_FOUND, "Not found"),
    };

    Ok(response)
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

fn with_cors(mut response: Response<Body>) -> Response<Body> {
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Body> {
    let bytes = match serde_json::to_vec(body) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Failed to serialize response: {e}");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    };

    let mut response = Response::new(Full::new(Bytes::from(bytes)));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    with_cors(response)
}

fn error_response(status: StatusCode, message: &str) -> Response<Body> {
    let body = json!({ "error": message }).to_string();
    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    with_cors(response)
}

fn preflight_response() -> Response<Body> {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = StatusCode::NO_CONTENT;
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    with_cors(response)
}

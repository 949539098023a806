use axum::{
    Json,
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::{net::SocketAddr, sync::Arc};

use crate::api::dtos::ErrorResponse;

/// Fixed-window, per-IP request limiter.
#[derive(Clone)]
pub struct RateLimit {
    store: Arc<DashMap<String, WindowState>>,
    max_requests: u32,
    window_seconds: i64,
}

#[derive(Debug, Clone)]
struct WindowState {
    count: u32,
    window_start: DateTime<Utc>,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_seconds: i64) -> Self {
        Self {
            store: Arc::new(DashMap::new()),
            max_requests,
            window_seconds,
        }
    }
}

pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(rate_limit): State<RateLimit>,
    req: Request,
    next: Next,
) -> Response {
    let ip = addr.ip().to_string();
    let now = Utc::now();

    let mut entry = rate_limit.store.entry(ip).or_insert_with(|| WindowState {
        count: 0,
        window_start: now,
    });
    let state = entry.value_mut();

    if now.signed_duration_since(state.window_start) >= Duration::seconds(rate_limit.window_seconds)
    {
        state.count = 0;
        state.window_start = now;
    }

    state.count += 1;
    if state.count > rate_limit.max_requests {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorResponse {
                error: "Rate limit exceeded".to_string(),
            }),
        )
            .into_response();
    }
    drop(entry);

    next.run(req).await
}

//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. Classifies each request path and
//! either answers from the mock response cache or hands off to the static
//! file resolver.

use crate::config::AppState;
use crate::error::ServerError;
use crate::handler::static_files;
use crate::http;
use crate::logger;
use chrono::Utc;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response};
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

// Wallet snapshot handed out when no recorded gameService/reloadBalance body
// is available.
const DEFAULT_BALANCE: &str = "balance_bonus=0.00&balance=100000.00&balance_cash=100000.00";

/// Route classification, in match priority order.
///
/// The game client builds these URLs with varying servlet prefixes, so
/// matching is substring containment on the path. Keeping it that way (rather
/// than prefix or exact match) preserves compatibility with every client
/// build seen so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    GameService,
    ReloadBalance,
    SaveSettings,
    Stats,
    Customizations,
    Static,
}

/// Classify a request path. First matching rule wins.
pub fn classify(path: &str) -> RouteKind {
    if path.contains("gameService") {
        RouteKind::GameService
    } else if path.contains("reloadBalance.do") {
        RouteKind::ReloadBalance
    } else if path.contains("saveSettings.do") {
        RouteKind::SaveSettings
    } else if path.contains("stats.do") {
        RouteKind::Stats
    } else if path.contains("customizations.info") {
        RouteKind::Customizations
    } else {
        RouteKind::Static
    }
}

/// Main entry point for HTTP request handling.
///
/// Any error escaping dispatch is logged with full detail and converted into
/// a plain 500, so a handler failure never takes the connection task down.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    if state.config.access_log {
        logger::log_request(req.method(), req.uri());
    }

    // Path component only; hyper has already split off the query string.
    let path = req.uri().path();
    let path = if path.is_empty() { "/" } else { path };

    let response = match dispatch(path, &state).await {
        Ok(resp) => resp,
        Err(e) => {
            logger::log_error(&format!("Unhandled error for '{path}': {e}"));
            http::internal_error()
        }
    };

    if state.config.access_log {
        logger::log_response(response.status().as_u16());
    }

    Ok(response)
}

/// Route a single request path to its response.
async fn dispatch(path: &str, state: &AppState) -> Result<Response<Full<Bytes>>, ServerError> {
    match classify(path) {
        RouteKind::GameService => http::mock_response(
            state
                .mocks
                .game_service
                .clone()
                .unwrap_or_else(|| DEFAULT_BALANCE.to_string()),
            FORM_URLENCODED,
        ),
        RouteKind::ReloadBalance => http::mock_response(
            state
                .mocks
                .reload_balance
                .clone()
                .unwrap_or_else(reload_balance_fallback),
            FORM_URLENCODED,
        ),
        RouteKind::SaveSettings => http::mock_response(
            state.mocks.save_settings.clone().unwrap_or_default(),
            "text/plain",
        ),
        RouteKind::Stats => http::mock_response(
            state.mocks.stats.clone().unwrap_or_else(stats_fallback),
            "application/json",
        ),
        RouteKind::Customizations => {
            http::mock_response(customizations_body(), "application/json")
        }
        RouteKind::Static => static_files::serve(path, state).await,
    }
}

/// Balance snapshot stamped with the current server time, for clients that
/// re-sync their wallet clock from `stime`.
fn reload_balance_fallback() -> String {
    format!("{DEFAULT_BALANCE}&stime={}", Utc::now().timestamp_millis())
}

#[derive(Serialize)]
struct StatsAck {
    error: u32,
    description: &'static str,
}

fn stats_fallback() -> String {
    serde_json::to_string(&StatsAck {
        error: 0,
        description: "OK",
    })
    .unwrap_or_else(|e| {
        logger::log_error(&format!("Failed to encode stats fallback: {e}"));
        String::new()
    })
}

#[derive(Serialize)]
struct CustomizationList {
    customizations: Vec<String>,
}

// The client probes for skin overrides at startup; an empty list keeps it on
// the stock assets.
fn customizations_body() -> String {
    serde_json::to_string(&CustomizationList {
        customizations: Vec::new(),
    })
    .unwrap_or_else(|e| {
        logger::log_error(&format!("Failed to encode customization list: {e}"));
        String::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::mocks::MockStore;
    use http_body_util::BodyExt;
    use std::path::PathBuf;

    fn test_state(mocks: MockStore) -> AppState {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            root: ".".to_string(),
            workers: None,
            access_log: false,
        };
        AppState::new(config, PathBuf::from("."), mocks)
    }

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }

    #[test]
    fn classification_is_substring_containment() {
        assert_eq!(classify("/slots/gameService"), RouteKind::GameService);
        assert_eq!(
            classify("/casino/v2/gameService/spin"),
            RouteKind::GameService
        );
        assert_eq!(classify("/reloadBalance.do"), RouteKind::ReloadBalance);
        assert_eq!(classify("/a/saveSettings.do/b"), RouteKind::SaveSettings);
        assert_eq!(classify("/deep/stats.do"), RouteKind::Stats);
        assert_eq!(classify("/skins/customizations.info"), RouteKind::Customizations);
        assert_eq!(classify("/index.html"), RouteKind::Static);
        assert_eq!(classify("/"), RouteKind::Static);
    }

    #[test]
    fn classification_priority_order_wins() {
        // Both rules match; gameService is checked first.
        assert_eq!(
            classify("/gameService/reloadBalance.do"),
            RouteKind::GameService
        );
        // reloadBalance.do outranks stats.do.
        assert_eq!(classify("/reloadBalance.do/stats.do"), RouteKind::ReloadBalance);
    }

    #[test]
    fn near_miss_paths_fall_through_to_static() {
        // Substring has to match exactly, including the ".do" suffix.
        assert_eq!(classify("/reloadBalance"), RouteKind::Static);
        assert_eq!(classify("/gameservice"), RouteKind::Static); // case matters
    }

    #[test]
    fn containment_matches_inside_longer_tokens() {
        // "/stats.done" still contains "stats.do". The client never sends
        // such paths; matching stays containment on purpose.
        assert_eq!(classify("/stats.done"), RouteKind::Stats);
    }

    #[tokio::test]
    async fn game_service_uses_cached_body_when_loaded() {
        let state = test_state(MockStore {
            game_service: Some("balance=7.00".to_string()),
            ..MockStore::default()
        });
        let resp = dispatch("/gameService", &state).await.expect("dispatch");
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], FORM_URLENCODED);
        assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");
        assert_eq!(body_string(resp).await, "balance=7.00");
    }

    #[tokio::test]
    async fn game_service_falls_back_to_default_balance() {
        let state = test_state(MockStore::default());
        let resp = dispatch("/gameService", &state).await.expect("dispatch");
        assert_eq!(body_string(resp).await, DEFAULT_BALANCE);
    }

    #[tokio::test]
    async fn reload_balance_fallback_carries_current_stime() {
        let state = test_state(MockStore::default());
        let resp = dispatch("/reloadBalance.do", &state).await.expect("dispatch");
        assert_eq!(resp.headers()["Content-Type"], FORM_URLENCODED);

        let body = body_string(resp).await;
        let (prefix, stime) = body.rsplit_once("&stime=").expect("stime token");
        assert_eq!(prefix, DEFAULT_BALANCE);

        let stime: i64 = stime.parse().expect("stime is an integer");
        let now = Utc::now().timestamp_millis();
        assert!((now - stime).abs() < 5_000, "stime {stime} too far from {now}");
    }

    #[tokio::test]
    async fn save_settings_defaults_to_empty_body() {
        let state = test_state(MockStore::default());
        let resp = dispatch("/saveSettings.do", &state).await.expect("dispatch");
        assert_eq!(resp.headers()["Content-Type"], "text/plain");
        assert_eq!(body_string(resp).await, "");
    }

    #[tokio::test]
    async fn stats_fallback_is_ok_ack() {
        let state = test_state(MockStore::default());
        let resp = dispatch("/stats.do", &state).await.expect("dispatch");
        assert_eq!(resp.headers()["Content-Type"], "application/json");
        assert_eq!(body_string(resp).await, "{\"error\":0,\"description\":\"OK\"}");
    }

    #[tokio::test]
    async fn stats_prefers_recorded_body() {
        let state = test_state(MockStore {
            stats: Some("{\"error\":1}".to_string()),
            ..MockStore::default()
        });
        let resp = dispatch("/stats.do", &state).await.expect("dispatch");
        assert_eq!(body_string(resp).await, "{\"error\":1}");
    }

    #[tokio::test]
    async fn customizations_ignore_the_cache_entirely() {
        let state = test_state(MockStore {
            game_service: Some("x".to_string()),
            reload_balance: Some("y".to_string()),
            save_settings: Some("z".to_string()),
            stats: Some("w".to_string()),
        });
        let resp = dispatch("/customizations.info", &state).await.expect("dispatch");
        assert_eq!(resp.headers()["Content-Type"], "application/json");
        assert_eq!(body_string(resp).await, "{\"customizations\":[]}");
    }
}

//! HTTP front for the matchup query. Holds no logic beyond status mapping.

use crate::api::client::RiotApiClient;
use crate::error::{status_description, AppError};
use crate::pipeline::{MatchupFinder, MatchupQuery};
use crate::static_data::StaticData;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Shared by every in-flight request; the client carries the process-wide governor.
#[derive(Clone)]
pub struct AppState {
    client: Arc<RiotApiClient>,
    static_data: Arc<StaticData>,
}

impl AppState {
    pub fn new(client: Arc<RiotApiClient>, static_data: Arc<StaticData>) -> Self {
        Self {
            client,
            static_data,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/{region}/{username}/{champion}/{enemy_champion}",
            get(matchup_handler),
        )
        .with_state(state)
}

pub async fn serve(state: AppState, port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;
    info!("listening on http://{}", addr);
    axum::serve(listener, router(state)).await
}

fn error_response(e: &AppError) -> Response {
    let code = e.status();
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let description = status_description(code).unwrap_or("Unknown");
    (status, Json(json!({ "status": code, "error": description }))).into_response()
}

async fn matchup_handler(
    State(state): State<AppState>,
    Path((region, username, champion, enemy_champion)): Path<(String, String, String, String)>,
) -> Response {
    let query = MatchupQuery {
        region,
        summoner: username,
        champion,
        enemy_champion,
    };

    // The pipeline blocks on upstream calls and throttle delays.
    let result = tokio::task::spawn_blocking(move || {
        MatchupFinder::new(&state.client, &state.static_data).find(&query)
    })
    .await;

    match result {
        Ok(Ok(records)) => (StatusCode::OK, Json(records)).into_response(),
        Ok(Err(e)) => {
            info!("matchup query failed: {}", e);
            error_response(&e)
        }
        Err(e) => {
            error!("matchup task panicked: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::{match_json, static_data, AHRI, ZED};
    use crate::config::Config;
    use crate::rate_limit::tests::RecordingPause;
    use crate::rate_limit::{RateGovernor, RatePolicy, RATE_COUNT_HEADER};
    use httpmock::prelude::*;

    fn state(upstream: &MockServer) -> AppState {
        let governor = Arc::new(RateGovernor::with_pause(
            RatePolicy::default(),
            Arc::new(RecordingPause::default()),
        ));
        let client = RiotApiClient::new(Config::for_tests(&upstream.base_url()), governor);
        AppState::new(Arc::new(client), Arc::new(static_data()))
    }

    /// Serves the router on an ephemeral port from its own runtime thread.
    fn spawn_router(state: AppState) -> SocketAddr {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        listener.set_nonblocking(true).unwrap();

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            runtime.block_on(async move {
                let listener = TcpListener::from_std(listener).unwrap();
                axum::serve(listener, router(state)).await.unwrap();
            });
        });
        addr
    }

    fn mock_profile_and_list(upstream: &MockServer, game_ids: &[i64]) {
        upstream.mock(|when, then| {
            when.method(GET)
                .path("/lol/summoner/v4/summoners/by-name/Hideonbush");
            then.status(200)
                .header(RATE_COUNT_HEADER, "1:1,1:120")
                .json_body(json!({"accountId": "acc-1", "name": "Hideonbush"}));
        });
        let matches: Vec<_> = game_ids
            .iter()
            .map(|id| json!({"gameId": id, "champion": AHRI, "queue": 420}))
            .collect();
        upstream.mock(|when, then| {
            when.method(GET).path("/lol/match/v4/matchlists/by-account/acc-1");
            then.status(200)
                .header(RATE_COUNT_HEADER, "2:1,2:120")
                .json_body(json!({"matches": matches}));
        });
    }

    fn mock_detail(upstream: &MockServer, game_id: i64, players: &[(i64, i64)]) {
        let body = match_json(game_id, players);
        upstream.mock(|when, then| {
            when.method(GET)
                .path(format!("/lol/match/v4/matches/{}", game_id));
            then.status(200)
                .header(RATE_COUNT_HEADER, "3:1,3:120")
                .json_body(body);
        });
    }

    #[test]
    fn route_returns_records_in_list_order() {
        let upstream = MockServer::start();
        mock_profile_and_list(&upstream, &[3, 1, 2]);
        mock_detail(&upstream, 3, &[(AHRI, 100), (ZED, 200)]);
        mock_detail(&upstream, 1, &[(AHRI, 100), (ZED, 100)]);
        mock_detail(&upstream, 2, &[(ZED, 100), (AHRI, 200)]);
        let addr = spawn_router(state(&upstream));

        let response = ureq::get(&format!("http://{}/kr/Hideonbush/Ahri/Zed", addr))
            .call()
            .unwrap();

        assert_eq!(response.status(), 200);
        let body = response.into_string().unwrap();
        let third = body.find("\"3\":{").unwrap();
        let second = body.find("\"2\":{").unwrap();
        assert!(third < second);
        assert!(!body.contains("\"1\":{"));

        let records: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(records["2"]["Ahri"]["teamId"], 200);
        assert_eq!(records["3"]["Zed"]["username"], "Player2");
    }

    #[test]
    fn route_passes_upstream_status_through() {
        let upstream = MockServer::start();
        mock_profile_and_list(&upstream, &[1, 2]);
        mock_detail(&upstream, 1, &[(AHRI, 100), (ZED, 200)]);
        upstream.mock(|when, then| {
            when.method(GET).path("/lol/match/v4/matches/2");
            then.status(403).header(RATE_COUNT_HEADER, "4:1,4:120");
        });
        let addr = spawn_router(state(&upstream));

        let err = ureq::get(&format!("http://{}/kr/Hideonbush/Ahri/Zed", addr))
            .call()
            .unwrap_err();

        let ureq::Error::Status(code, response) = err else {
            panic!("expected an error status from the route");
        };
        assert_eq!(code, 403);
        let body: serde_json::Value = response.into_json().unwrap();
        assert_eq!(body["status"], 403);
        assert_eq!(body["error"], status_description(403).unwrap());
    }

    #[test]
    fn route_rejects_unsupported_region() {
        let upstream = MockServer::start();
        let addr = spawn_router(state(&upstream));

        let err = ureq::get(&format!("http://{}/xx1/Hideonbush/Ahri/Zed", addr))
            .call()
            .unwrap_err();

        assert!(matches!(err, ureq::Error::Status(400, _)));
    }

    #[test]
    fn errors_map_to_their_status() {
        let response = error_response(&AppError::InvalidRegion("xx".to_string()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = error_response(&AppError::UpstreamStatus(429));
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        let response = error_response(&AppError::HttpError("timed out".to_string()));
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}

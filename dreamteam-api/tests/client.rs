//! Client tests against a mock data service.
//!
//! Each test checks the request the client sends (method, path, query, body)
//! and how it decodes or rejects the response.

use std::net::TcpListener;

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dreamteam_api::{ApiError, DataClient, DataService, NewFormation, PlayerQuery};
use dreamteam_core::types::{FormationId, FormationPlayer, PlayerId, Position};

fn client_for(server: &MockServer) -> DataClient {
    DataClient::new(format!("{}/api", server.uri()), 2_000).expect("client builds")
}

fn player_json(id: &str, position: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": format!("Player {id}"),
        "position": position,
        "club": "AC Milan",
        "country": "Italy",
        "rating": 88,
        "image_url": "",
        "achievements": [],
        "era": "1990s",
        "description": ""
    })
}

fn formation_json(id: &str, votes: u32) -> serde_json::Value {
    json!({
        "id": id,
        "user_name": "ana",
        "formation_name": "4-3-3",
        "theme": "Milan Legends",
        "players": [{"player_id": "p1", "position_slot": "GK"}],
        "votes": votes,
        "created_at": "2025-05-27T17:10:04.123000"
    })
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_players_sends_server_side_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/players"))
        .and(query_param("position", "CB"))
        .and(query_param("club", "AC Milan"))
        .and(query_param_is_missing("era"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([player_json("p7", "CB")])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = PlayerQuery {
        position: Some(Position::CenterBack),
        club: Some("AC Milan".to_string()),
        era: None,
    };
    let players = client.list_players(&query).await.expect("players");
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].id, PlayerId::new("p7"));
    assert_eq!(players[0].position, Position::CenterBack);
}

#[tokio::test]
async fn themes_and_daily_theme() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/themes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "t1", "name": "General", "description": "", "filter_criteria": {}, "is_daily": false},
            {"id": "t2", "name": "Milan Legends", "filter_criteria": {"club": "AC Milan"}, "is_daily": true}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/themes/daily"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(
            {"id": "t2", "name": "Milan Legends", "filter_criteria": {"club": "AC Milan"}, "is_daily": true}
        )))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let themes = client.list_themes().await.expect("themes");
    assert_eq!(themes.len(), 2);
    assert!(themes[0].filter_criteria.is_empty());

    let daily = client.daily_theme().await.expect("daily");
    assert!(daily.is_daily);
    assert_eq!(daily.filter_criteria.club.as_deref(), Some("AC Milan"));
}

#[tokio::test]
async fn list_formations_filters_by_theme_only_when_given() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/formations"))
        .and(query_param("theme", "Milan Legends"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([formation_json("f1", 3)])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/formations"))
        .and(query_param_is_missing("theme"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([formation_json("f1", 3), formation_json("f2", 0)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let themed = client.list_formations(Some("Milan Legends")).await.expect("themed");
    assert_eq!(themed.len(), 1);
    assert_eq!(themed[0].votes, 3);

    let all = client.list_formations(None).await.expect("all");
    assert_eq!(all.len(), 2);
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_formation_posts_the_lineup() {
    let server = MockServer::start().await;
    let body = NewFormation {
        user_name: "ana".to_string(),
        formation_name: "4-3-3".to_string(),
        theme: "Milan Legends".to_string(),
        players: vec![FormationPlayer {
            player_id: PlayerId::new("p1"),
            position_slot: "GK".to_string(),
        }],
    };
    Mock::given(method("POST"))
        .and(path("/api/formations"))
        .and(body_json(json!({
            "user_name": "ana",
            "formation_name": "4-3-3",
            "theme": "Milan Legends",
            "players": [{"player_id": "p1", "position_slot": "GK"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(formation_json("f9", 0)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let saved = client.create_formation(&body).await.expect("created");
    assert_eq!(saved.id, FormationId::new("f9"));
    assert_eq!(saved.player_count(), 1);
}

#[tokio::test]
async fn vote_and_seed_use_their_verbs() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/formations/f1/vote"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Vote recorded"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/init-data"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Sample data already exists"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let receipt = client.vote(&FormationId::new("f1")).await.expect("vote");
    assert_eq!(receipt.message, "Vote recorded");
    let seeded = client.init_data().await.expect("seed");
    assert!(seeded.message.contains("already exists"));
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_formation_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/formations/nope/vote"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Formation not found"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.vote(&FormationId::new("nope")).await.expect_err("404");
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn server_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/themes"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.list_themes().await {
        Err(ApiError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "database down");
        }
        other => panic!("expected a status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/players"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "p1"}])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .list_players(&PlayerQuery::default())
        .await
        .expect_err("missing fields");
    assert!(matches!(err, ApiError::Parse(_)));
}

#[tokio::test]
async fn unreachable_service_is_reported() {
    // Reserve a free port, then release it so nothing is listening there.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("local addr").port()
    };
    let uri = format!("http://127.0.0.1:{port}");
    let client = DataClient::new(format!("{uri}/api"), 500).expect("client");
    let err = client.list_themes().await.expect_err("nothing listening");
    assert!(matches!(
        err,
        ApiError::Unavailable(_) | ApiError::Request(_) | ApiError::Timeout(_)
    ));
}

#[tokio::test]
async fn get_player_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/players/p3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(player_json("p3", "GK")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/players/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Player not found"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let player = client.get_player(&PlayerId::new("p3")).await.expect("found");
    assert_eq!(player.position, Position::Goalkeeper);
    assert!(matches!(
        client.get_player(&PlayerId::new("ghost")).await,
        Err(ApiError::NotFound(_))
    ));
}

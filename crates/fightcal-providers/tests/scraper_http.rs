//! Scraper provider against a mock upcoming-fights endpoint.

use fightcal_core::Sport;
use fightcal_providers::{
    FightDataProvider, HttpFightProvider, ProviderErrorCode, ScraperConfig, build_fight_events,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer, sport: Sport) -> HttpFightProvider {
    let config = ScraperConfig::for_sport(&server.uri(), sport);
    HttpFightProvider::new(sport, &config).unwrap()
}

#[tokio::test]
async fn posts_fighter_list_and_parses_answer() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/UFC/upcoming-fights"))
        .and(body_json(serde_json::json!({"fighters": ["A", "B"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "A": {
                "fighters": ["A", "C"],
                "event": {"date": "2025-05-01T20:00:00Z", "location": "Vegas"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let fights = provider(&server, Sport::Ufc)
        .upcoming_fights(vec!["A".to_string(), "B".to_string()])
        .await
        .unwrap();

    assert_eq!(fights.len(), 1);
    let events = build_fight_events(&fights);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].summary(), "A vs C");
    assert_eq!(events[0].location, "Vegas");
}

#[tokio::test]
async fn boxing_uses_its_own_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/boxing/upcoming-fights"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let fights = provider(&server, Sport::Boxing)
        .upcoming_fights(vec!["D".to_string()])
        .await
        .unwrap();
    assert!(fights.is_empty());
}

#[tokio::test]
async fn server_error_is_reported_not_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("scraper down"))
        .mount(&server)
        .await;

    let err = provider(&server, Sport::Ufc)
        .upcoming_fights(vec!["A".to_string()])
        .await
        .unwrap_err();

    assert_eq!(err.code(), ProviderErrorCode::ServerError);
    assert_eq!(err.provider(), Some("scraper:ufc"));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn non_object_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = provider(&server, Sport::Ufc)
        .upcoming_fights(vec!["A".to_string()])
        .await
        .unwrap_err();
    assert_eq!(err.code(), ProviderErrorCode::InvalidResponse);
}

#[tokio::test]
async fn malformed_entries_are_dropped() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "A": {"fighters": ["A", "C"], "event": {"date": "2025-05-01T20:00:00Z", "location": "Vegas"}},
            "B": "no fight found"
        })))
        .mount(&server)
        .await;

    let fights = provider(&server, Sport::Ufc)
        .upcoming_fights(vec!["A".to_string(), "B".to_string()])
        .await
        .unwrap();
    assert_eq!(fights.keys().collect::<Vec<_>>(), vec!["A"]);
}

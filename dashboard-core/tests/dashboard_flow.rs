//! End-to-end dashboard flows against a local stand-in for the OpenWeather API.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dashboard_core::provider::openweather::OpenWeatherProvider;
use dashboard_core::{RequestState, WeatherStore};

fn city_body(name: &str, country: &str, temp: f64) -> serde_json::Value {
    json!({
        "id": 1,
        "name": name,
        "sys": { "country": country },
        "main": { "temp": temp, "feels_like": temp - 1.5, "humidity": 70 },
        "weather": [
            { "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }
        ],
        "wind": { "speed": 4.0 }
    })
}

fn store_for(server: &MockServer) -> WeatherStore {
    let provider = OpenWeatherProvider::with_base_url("test-key".to_string(), server.uri());
    WeatherStore::new(Box::new(provider))
}

#[tokio::test]
async fn repeat_searches_are_served_from_the_session_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("q", "London"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(city_body("London", "GB", 11.8)))
        .expect(1)
        .mount(&server)
        .await;

    let mut store = store_for(&server);

    store.submit("London").await;
    assert!(matches!(store.request_state(), RequestState::Succeeded(_)));

    // Different casing and whitespace still resolve to the cached record,
    // without a second request (the mock expects exactly one).
    store.submit("  LONDON ").await;
    let record = store.current().expect("cached record should be shown");
    assert_eq!(record.name, "London");
    assert_eq!(record.country, "GB");
    assert_eq!(
        store.cache().recent_keys().collect::<Vec<_>>(),
        vec!["london"]
    );
}

#[tokio::test]
async fn a_failed_city_can_be_corrected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("q", "Atlantis"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "cod": "404", "message": "city not found" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("q", "Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(city_body("Paris", "FR", 19.3)))
        .mount(&server)
        .await;

    let mut store = store_for(&server);

    store.submit("Atlantis").await;
    assert_eq!(
        store.error(),
        Some("City not found. Please check the city name and try again.")
    );

    store.submit("Paris").await;
    assert_eq!(store.error(), None);
    assert_eq!(store.current().map(|r| r.name.as_str()), Some("Paris"));

    // The failed lookup never reaches the recent-searches list.
    assert_eq!(
        store.cache().recent_keys().collect::<Vec<_>>(),
        vec!["paris"]
    );
}

#[tokio::test]
async fn an_outage_reports_the_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut store = store_for(&server);
    store.submit("London").await;

    assert_eq!(
        store.error(),
        Some("Failed to fetch weather data. Please try again later.")
    );
    assert!(store.cache().is_empty());
}

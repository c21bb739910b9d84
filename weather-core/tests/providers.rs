//! Provider tests against mock upstream servers.

use std::time::Duration;

use postal_weather_core::{
    Config, LocalityResolver, LookupError, PipelineError, TemperatureSource, WeatherError,
    WeatherPipeline,
    provider::{
        resolver_from_config, temperature_source_from_config, viacep::ViaCepResolver,
        weatherapi::WeatherApiProvider,
    },
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(2);

fn resolver(server: &MockServer) -> ViaCepResolver {
    ViaCepResolver::new(format!("{}/ws", server.uri()), TIMEOUT).unwrap()
}

/// Base URL of a local port with nothing listening on it.
fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn weather(server: &MockServer) -> WeatherApiProvider {
    WeatherApiProvider::new(format!("{}/v1", server.uri()), "KEY".into(), "pt".into(), TIMEOUT)
        .unwrap()
}

#[tokio::test]
async fn viacep_returns_locality() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ws/78048-250/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cep": "78048-250",
            "logradouro": "Rua Presidente Arthur Bernardes",
            "localidade": "Cuiabá",
            "uf": "MT"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let locality = resolver(&server).resolve_locality("78048-250").await.unwrap();

    assert_eq!(locality, "Cuiabá");
}

#[tokio::test]
async fn viacep_error_flag_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ws/00000000/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "erro": "true" })))
        .mount(&server)
        .await;

    let err = resolver(&server).resolve_locality("00000000").await.unwrap_err();

    assert!(matches!(err, LookupError::NotFound(code) if code == "00000000"));
}

#[tokio::test]
async fn viacep_unparsable_body_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = resolver(&server).resolve_locality("78048250").await.unwrap_err();

    assert!(matches!(err, LookupError::NotFound(_)));
}

#[tokio::test]
async fn viacep_non_success_status_is_transport_class() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Bad Request"))
        .mount(&server)
        .await;

    let err = resolver(&server).resolve_locality("78048250").await.unwrap_err();

    assert!(matches!(err, LookupError::Status(status) if status.as_u16() == 400));
}

#[tokio::test]
async fn viacep_timeout_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "localidade": "Cuiabá" }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let resolver =
        ViaCepResolver::new(format!("{}/ws", server.uri()), Duration::from_millis(100)).unwrap();
    let err = resolver.resolve_locality("78048250").await.unwrap_err();

    assert!(matches!(err, LookupError::Transport(e) if e.is_timeout()));
}

#[tokio::test]
async fn viacep_connection_refused_is_transport_error() {
    let resolver = ViaCepResolver::new(format!("{}/ws", unreachable_base_url()), TIMEOUT).unwrap();

    let err = resolver.resolve_locality("78048250").await.unwrap_err();

    assert!(matches!(err, LookupError::Transport(e) if e.is_connect()));
}

#[tokio::test]
async fn pipeline_maps_unreachable_lookup_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let resolver = ViaCepResolver::new(format!("{}/ws", unreachable_base_url()), TIMEOUT).unwrap();
    let pipeline =
        WeatherPipeline::new(std::sync::Arc::new(resolver), std::sync::Arc::new(weather(&server)));

    let err = pipeline.temperature_for("78048-250").await.unwrap_err();

    assert!(matches!(err, PipelineError::PostalCodeNotFound(LookupError::Transport(_))));
}

#[tokio::test]
async fn weatherapi_sends_key_query_and_language() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .and(query_param("key", "KEY"))
        .and(query_param("q", "São Paulo"))
        .and(query_param("lang", "pt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "location": { "name": "São Paulo", "country": "Brazil" },
            "current": { "temp_c": 22.5, "temp_f": 72.5 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let celsius = weather(&server).current_celsius("São Paulo").await.unwrap();

    assert_eq!(celsius, 22.5);
}

#[tokio::test]
async fn weatherapi_non_success_status_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": { "code": 2006, "message": "API key is invalid." }
        })))
        .mount(&server)
        .await;

    let err = weather(&server).current_celsius("Cuiabá").await.unwrap_err();

    match err {
        WeatherError::Status { status, body } => {
            assert_eq!(status.as_u16(), 401);
            assert!(body.contains("API key is invalid"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn weatherapi_timeout_is_request_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "current": { "temp_c": 25.0 } }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let provider = WeatherApiProvider::new(
        format!("{}/v1", server.uri()),
        "KEY".into(),
        "pt".into(),
        Duration::from_millis(100),
    )
    .unwrap();
    let err = provider.current_celsius("Cuiabá").await.unwrap_err();

    assert!(matches!(err, WeatherError::Request(e) if e.is_timeout()));
}

#[tokio::test]
async fn pipeline_maps_weather_timeout_to_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ws/78048-250/json/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "localidade": "Cuiabá" })),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "current": { "temp_c": 25.0 } }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let weather = WeatherApiProvider::new(
        format!("{}/v1", server.uri()),
        "KEY".into(),
        "pt".into(),
        Duration::from_millis(100),
    )
    .unwrap();
    let pipeline =
        WeatherPipeline::new(std::sync::Arc::new(resolver(&server)), std::sync::Arc::new(weather));

    let err = pipeline.temperature_for("78048-250").await.unwrap_err();

    assert!(matches!(err, PipelineError::WeatherUnavailable(WeatherError::Request(e)) if e.is_timeout()));
}

#[tokio::test]
async fn weatherapi_unexpected_shape_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current": { "temp_f": 80.0 }
        })))
        .mount(&server)
        .await;

    let err = weather(&server).current_celsius("Cuiabá").await.unwrap_err();

    assert!(matches!(err, WeatherError::Parse(_)));
}

#[tokio::test]
async fn pipeline_from_config_chains_both_services() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ws/01001-000/json/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "localidade": "São Paulo" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .and(query_param("q", "São Paulo"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "current": { "temp_c": 10.0 } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.lookup.base_url = format!("{}/ws", server.uri());
    config.weather.base_url = format!("{}/v1", server.uri());
    config.set_weather_api_key("KEY".into());

    let pipeline = WeatherPipeline::new(
        resolver_from_config(&config).unwrap(),
        temperature_source_from_config(&config).unwrap(),
    );

    let temp = pipeline.temperature_for("01001-000").await.unwrap();

    assert_eq!(temp.celsius, 10.0);
    assert!((temp.fahrenheit - 50.0).abs() < 0.1);
    assert!((temp.kelvin - 283.15).abs() < 0.1);
}

#[tokio::test]
async fn pipeline_rejects_malformed_code_without_upstream_calls() {
    let server = MockServer::start().await;

    Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let pipeline = WeatherPipeline::new(
        std::sync::Arc::new(resolver(&server)),
        std::sync::Arc::new(weather(&server)),
    );

    let err = pipeline.temperature_for("abc").await.unwrap_err();

    assert!(matches!(err, PipelineError::InvalidPostalCode));
}

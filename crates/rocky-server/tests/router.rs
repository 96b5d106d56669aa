use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::routing::post;
use rocky_engine::SafetyEngine;
use rocky_model::client::ModelClient;
use rocky_model::lookup::InteractionLookup;
use rocky_model::provider::Provider;
use rocky_server::config::ServerConfig;
use rocky_server::router;
use rocky_server::state::AppState;
use serde_json::{Value, json};
use tower::ServiceExt;

fn state(config: ServerConfig) -> AppState {
    AppState::from_config(config).unwrap()
}

fn app() -> Router {
    router(state(ServerConfig::default()))
}

fn intake() -> Value {
    json!({"name": "Alex", "age": 45})
}

async fn call(app: Router, method: &str, uri: &str, body: Option<String>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(text) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(text)
        }
        None => Body::empty(),
    };

    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    call(app, "POST", uri, Some(body.to_string())).await
}

async fn spawn(stub: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, stub).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn healthz_is_ok() {
    let (status, body) = call(app(), "GET", "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn readyz_reports_configuration() {
    let (status, body) = call(app(), "GET", "/readyz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["models"], json!({"mock": true, "gemini": false, "openai": false}));
    assert_eq!(body["lookup"], false);
    assert_eq!(body["rules"], 5);
}

#[tokio::test]
async fn config_without_keys_defaults_to_mock() {
    let (status, body) = call(app(), "GET", "/api/config", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "defaultModel": "mock",
            "models": {"mock": true, "gemini": false, "openai": false},
            "llmProxy": true,
        })
    );
}

#[tokio::test]
async fn config_picks_an_available_model() {
    let app = router(state(ServerConfig {
        gemini_api_key: Some("g".to_string()),
        ..Default::default()
    }));
    let (_, body) = call(app, "GET", "/api/config", None).await;
    assert_eq!(body["defaultModel"], "gemini");
    assert_eq!(body["models"]["gemini"], true);
}

#[tokio::test]
async fn rules_lists_classes_and_table() {
    let (status, body) = call(app(), "GET", "/api/rules", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drugClasses"].as_array().unwrap().len(), 4);
    assert_eq!(body["rules"].as_array().unwrap().len(), 5);
    assert_eq!(body["rules"][0]["id"], "nitrates+pde5i");
}

#[tokio::test]
async fn mock_diagnostics_returns_the_engine_result() {
    let mut body = intake();
    body["medications"] = json!("Nitroglycerin");
    let (status, result) = post_json(app(), "/api/diagnostics/mock", &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["riskLevel"], "HIGH");
    assert_eq!(result["plan"]["medication"], "None");
    assert_eq!(result["source"], "rules");
}

#[tokio::test]
async fn invalid_intake_is_unprocessable() {
    let body = json!({"name": " ", "age": 130, "conditions": ["hypertension"]});
    let (status, result) = post_json(app(), "/api/diagnostics/mock", &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(result["error"], "validation_failed");
    let fields: Vec<_> = result["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["field"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(fields, vec!["name", "age", "bloodPressure"]);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let (status, result) = call(
        app(),
        "POST",
        "/api/diagnostics/mock",
        Some("{\"name\": ".to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result, json!({"error": "invalid payload"}));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let app = router(state(ServerConfig {
        max_body_bytes: 64,
        ..Default::default()
    }));
    let body = json!({"name": "Alex", "complaint": "x".repeat(500)});
    let (status, result) = post_json(app, "/api/diagnostics/mock", &body).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(result["error"], "payload too large");
}

#[tokio::test]
async fn missing_key_is_unavailable_before_the_body_is_read() {
    let (status, result) = call(
        app(),
        "POST",
        "/api/diagnostics/gemini",
        Some("not json".to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        result,
        json!({"error": "gemini_unavailable", "reason": "missing_api_key"})
    );
}

#[tokio::test]
async fn unreachable_model_falls_back_to_the_engine() {
    let client = ModelClient::new(Provider::OpenAi, "sk-test", Duration::from_secs(2))
        .unwrap()
        .with_base_url("http://127.0.0.1:1");
    let mut state = state(ServerConfig::default());
    state.openai = Some(client);

    let (status, result) = post_json(router(state), "/api/diagnostics/openai", &intake()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["source"], "rules");
    assert_eq!(result["riskScore"], 12);
}

#[tokio::test]
async fn model_candidate_is_reconciled() {
    async fn stub() -> Json<Value> {
        let candidate = json!({
            "riskLevel": "MEDIUM",
            "riskScore": 35,
            "issues": ["Discuss cardiovascular fitness"],
            "alternatives": ["Lifestyle changes"],
        });
        Json(json!({"choices": [{"message": {"content": candidate.to_string()}}]}))
    }

    let base = spawn(Router::new().route("/v1/chat/completions", post(stub))).await;
    let client = ModelClient::new(Provider::OpenAi, "sk-test", Duration::from_secs(5))
        .unwrap()
        .with_base_url(&base);
    let mut state = state(ServerConfig::default());
    state.openai = Some(client);

    let (status, result) = post_json(router(state), "/api/diagnostics/openai", &intake()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["source"], "rules+model");
    assert_eq!(result["riskLevel"], "MEDIUM");
    assert_eq!(result["riskScore"], 35);
    assert_eq!(result["issues"], json!(["Discuss cardiovascular fitness"]));
    assert_eq!(result["alternatives"][0]["option"], "Lifestyle changes");
    assert_eq!(result["plan"]["medication"], "Tadalafil");
}

#[tokio::test]
async fn interactions_without_lookup_come_from_the_engine() {
    let body = json!({"medications": "Tamsulosin, Tadalafil"});
    let (status, result) = post_json(app(), "/api/interactions", &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["lookup"], "disabled");
    let list = result["interactions"].as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|i| i["source"] == "engine"));
}

#[tokio::test]
async fn lookup_can_raise_an_engine_interaction() {
    async fn stub(Json(body): Json<Value>) -> Json<Value> {
        assert_eq!(body, json!({"medications": ["tamsulosin", "tadalafil"]}));
        Json(json!([{
            "pair": "alpha-blocker + pde5i",
            "severity": "HIGH",
            "note": "additive hypotension; separate dosing and start low.",
        }]))
    }

    let base = spawn(Router::new().route("/check", post(stub))).await;
    let mut state = state(ServerConfig::default());
    state.lookup = Some(InteractionLookup::new(&format!("{base}/check"), Duration::from_secs(5)).unwrap());

    let body = json!({"medications": "Tamsulosin, Tadalafil"});
    let (status, result) = post_json(router(state), "/api/interactions", &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["lookup"], "ok");
    let list = result["interactions"].as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["source"], "lookup");
    assert_eq!(list[0]["severity"], "HIGH");
    assert_eq!(list[1]["source"], "engine");
}

#[tokio::test]
async fn failed_lookup_is_reported_and_tolerated() {
    let mut state = state(ServerConfig::default());
    state.lookup = Some(InteractionLookup::new("http://127.0.0.1:1/check", Duration::from_secs(2)).unwrap());

    let body = json!({"medications": "nitroglycerin, sildenafil"});
    let (status, result) = post_json(router(state), "/api/interactions", &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["lookup"], "failed");
    assert_eq!(result["interactions"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn custom_rule_table_is_served() {
    let mut state = state(ServerConfig::default());
    state.engine = Arc::new(SafetyEngine::new(Vec::new()));
    let (_, body) = call(router(state), "GET", "/api/rules", None).await;
    assert_eq!(body["rules"], json!([]));
}

#[tokio::test]
async fn static_index_is_served() {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(root.path().join("index.html"), "<h1>Rocky</h1>").unwrap();
    let app = router(state(ServerConfig {
        static_root: Some(root.path().to_path_buf()),
        ..Default::default()
    }));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"<h1>Rocky</h1>");
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/diagnostics/mock")
                .header(header::ORIGIN, "https://intake.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_MAX_AGE).unwrap(),
        "43200"
    );
}

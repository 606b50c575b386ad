// End-to-end tests for the HTTP and WebSocket surface
//
// The router is served on an ephemeral port; the STT service is a wiremock
// server and the WebSocket client is tokio-tungstenite.

use anyhow::{bail, Result};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use voice_relay::session::SessionRegistry;
use voice_relay::{
    create_router, AppState, Config, HttpTranscriptionGateway, RelaySettings, StreamingRelay,
    TranslationService,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

type WsClient = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

struct TestServer {
    addr: std::net::SocketAddr,
    _static_dir: TempDir,
}

async fn spawn_server(stt: &MockServer) -> Result<TestServer> {
    let static_dir = TempDir::new()?;
    std::fs::write(
        static_dir.path().join("index.html"),
        "<!doctype html><title>voice relay</title>",
    )?;

    let mut config = Config::default();
    config.service.http.static_dir = static_dir.path().to_string_lossy().to_string();
    config.transcription.base_url = stt.uri();
    config.transcription.health_retry_delay_ms = 10;

    let gateway = HttpTranscriptionGateway::new(&config.transcription)?;
    let relay = StreamingRelay::new(
        SessionRegistry::new(),
        Arc::new(gateway),
        RelaySettings::from(&config.relay),
    );
    let translator = TranslationService::offline(config.translation.source_language.clone());
    let app = create_router(AppState::new(config, relay, translator));

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(TestServer {
        addr,
        _static_dir: static_dir,
    })
}

async fn mock_stt(server: &MockServer, text: &str) {
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "healthy",
            "stt_ready": true
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/stt/transcribe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "text": text })))
        .mount(server)
        .await;
}

async fn next_json(ws: &mut WsClient) -> Result<serde_json::Value> {
    let frame = tokio::time::timeout(Duration::from_secs(5), ws.next()).await?;
    match frame {
        Some(Ok(Message::Text(text))) => Ok(serde_json::from_str(&text)?),
        other => bail!("expected text frame, got {:?}", other),
    }
}

async fn connect_ws(addr: std::net::SocketAddr, session_id: Option<&'static str>) -> Result<WsClient> {
    let mut request = format!("ws://{}/ws", addr).into_client_request()?;
    if let Some(id) = session_id {
        request
            .headers_mut()
            .insert("x-session-id", HeaderValue::from_static(id));
    }

    let (ws, _resp) = connect_async(request).await?;
    Ok(ws)
}

#[tokio::test]
async fn test_health_reports_active_sessions() -> Result<()> {
    let stt = MockServer::start().await;
    let server = spawn_server(&stt).await?;
    let url = format!("http://{}/api/health", server.addr);

    let body: serde_json::Value = reqwest::get(&url).await?.json().await?;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["activeSessions"], 0);
    assert!(body["timestamp"].as_i64().unwrap() > 0);

    let mut ws = connect_ws(server.addr, Some("health-probe")).await?;
    let connected = next_json(&mut ws).await?;
    assert_eq!(connected["sessionId"], "health-probe");

    let body: serde_json::Value = reqwest::get(&url).await?.json().await?;
    assert_eq!(body["activeSessions"], 1);

    Ok(())
}

#[tokio::test]
async fn test_websocket_round_trip() -> Result<()> {
    let stt = MockServer::start().await;
    mock_stt(&stt, "  olá mundo ").await;
    let server = spawn_server(&stt).await?;

    let mut ws = connect_ws(server.addr, Some("e2e-session")).await?;

    let connected = next_json(&mut ws).await?;
    assert_eq!(connected["type"], "connected");
    assert_eq!(connected["sessionId"], "e2e-session");

    ws.send(Message::Binary(vec![1; 10])).await?;
    ws.send(Message::Text(r#"{"type":"ping"}"#.to_string())).await?;
    ws.send(Message::Binary(vec![2; 20])).await?;
    ws.send(Message::Text(r#"{"type":"end"}"#.to_string())).await?;

    let result = next_json(&mut ws).await?;
    assert_eq!(result["type"], "transcription");
    assert_eq!(result["text"], "olá mundo");
    assert!(result["timestamp"].as_i64().unwrap() > 0);

    let received = stt.received_requests().await.unwrap_or_default();
    let uploads: Vec<_> = received
        .iter()
        .filter(|r| r.url.path() == "/api/stt/transcribe")
        .collect();
    assert_eq!(uploads.len(), 1);

    let stats: serde_json::Value = reqwest::get(format!(
        "http://{}/api/sessions/e2e-session",
        server.addr
    ))
    .await?
    .json()
    .await?;
    assert_eq!(stats["status"], "finalized");
    assert_eq!(stats["recordings_completed"], 1);

    ws.close(None).await?;
    Ok(())
}

#[tokio::test]
async fn test_websocket_reports_stt_outage() -> Result<()> {
    let stt = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&stt)
        .await;
    let server = spawn_server(&stt).await?;

    let mut ws = connect_ws(server.addr, None).await?;
    let connected = next_json(&mut ws).await?;
    assert!(connected["sessionId"].as_str().unwrap().starts_with("session-"));

    ws.send(Message::Binary(vec![9; 8])).await?;
    ws.send(Message::Text(r#"{"type":"end"}"#.to_string())).await?;

    let error = next_json(&mut ws).await?;
    assert_eq!(error["type"], "error");
    assert!(error["message"].as_str().unwrap().contains("not available"));

    Ok(())
}

#[tokio::test]
async fn test_unknown_session_is_404() -> Result<()> {
    let stt = MockServer::start().await;
    let server = spawn_server(&stt).await?;

    let response = reqwest::get(format!("http://{}/api/sessions/nobody", server.addr)).await?;
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_translate_endpoint() -> Result<()> {
    let stt = MockServer::start().await;
    let server = spawn_server(&stt).await?;
    let url = format!("http://{}/api/translate", server.addr);
    let client = reqwest::Client::new();

    let body: serde_json::Value = client
        .post(&url)
        .json(&serde_json::json!({ "text": "Obrigado pela sua ajuda", "targetLanguage": "en" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["translatedText"], "Thank you for your help");
    assert_eq!(body["sourceLanguage"], "pt-BR");
    assert_eq!(body["targetLanguage"], "en");
    assert!(body["warning"].is_string());

    // Defaults to French
    let body: serde_json::Value = client
        .post(&url)
        .json(&serde_json::json!({ "text": "Bom dia, tudo bem?" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["targetLanguage"], "fr");
    assert_eq!(body["translatedText"], "Bonjour, tout va bien ?");

    let response = client
        .post(&url)
        .json(&serde_json::json!({ "text": "  " }))
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"], "Text required");

    let response = client
        .post(&url)
        .json(&serde_json::json!({ "text": "Olá", "targetLanguage": "klingon" }))
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn test_unknown_paths_serve_frontend() -> Result<()> {
    let stt = MockServer::start().await;
    let server = spawn_server(&stt).await?;

    let body = reqwest::get(format!("http://{}/some/client/route", server.addr))
        .await?
        .text()
        .await?;
    assert!(body.contains("voice relay"));

    Ok(())
}

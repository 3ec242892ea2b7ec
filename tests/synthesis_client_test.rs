use axum::response::IntoResponse;
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use voicerelay_backend::config::SynthesisConfig;
use voicerelay_backend::tts::{CloudSynthesisClient, SpeechSynthesizer, SynthesisError};

async fn start_mock_synthesis_server(
    response_status: u16,
    response_body: String,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    // The synthesize path contains a colon, which the router would parse as
    // a parameter marker, so the mock answers on every path instead.
    let app = Router::new().fallback(move || async move {
        let status = axum::http::StatusCode::from_u16(response_status).unwrap();
        (status, response_body).into_response()
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

fn test_client(base_url: &str) -> CloudSynthesisClient {
    CloudSynthesisClient::new(
        reqwest::Client::new(),
        base_url,
        "test-key",
        SynthesisConfig::default(),
    )
}

#[tokio::test]
async fn given_valid_text_when_synthesizing_then_returns_decoded_audio_bytes() {
    let audio_bytes = b"RIFF fake wav payload".to_vec();
    let body = format!(r#"{{"audioContent": "{}"}}"#, STANDARD.encode(&audio_bytes));
    let (base_url, shutdown_tx) = start_mock_synthesis_server(200, body).await;

    let client = test_client(&base_url);
    let result = client.synthesize("hola").await;

    assert_eq!(result.unwrap(), audio_bytes);
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_invalid_base64_content_when_synthesizing_then_returns_malformed_response() {
    let body = r#"{"audioContent": "not!!valid!!base64"}"#.to_string();
    let (base_url, shutdown_tx) = start_mock_synthesis_server(200, body).await;

    let client = test_client(&base_url);
    let result = client.synthesize("hola").await;

    assert!(matches!(result, Err(SynthesisError::MalformedResponse(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_service_error_status_when_synthesizing_then_returns_status_error() {
    let body = r#"{"error": {"code": 429, "message": "quota exceeded"}}"#.to_string();
    let (base_url, shutdown_tx) = start_mock_synthesis_server(429, body).await;

    let client = test_client(&base_url);
    let result = client.synthesize("hola").await;

    assert!(matches!(
        result,
        Err(SynthesisError::ServiceStatus { status: 429, .. })
    ));
    shutdown_tx.send(()).ok();
}

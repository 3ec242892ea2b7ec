use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use voicerelay_backend::translate::{CloudTranslateClient, TranslationError, Translator};

async fn start_mock_translate_server(
    response_status: u16,
    response_body: &'static str,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new().route(
        "/language/translate/v2",
        post(move || async move {
            let status = axum::http::StatusCode::from_u16(response_status).unwrap();
            (status, response_body).into_response()
        }),
    );

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

#[tokio::test]
async fn given_valid_text_when_translating_then_returns_first_translation() {
    let response_body = r#"{"data": {"translations": [{"translatedText": "hello world"}]}}"#;
    let (base_url, shutdown_tx) = start_mock_translate_server(200, response_body).await;

    let client = CloudTranslateClient::new(reqwest::Client::new(), &base_url, "test-key");
    let result = client.translate("hola mundo", "en").await;

    assert_eq!(result.unwrap(), "hello world");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_service_error_status_when_translating_then_returns_status_error() {
    let response_body = r#"{"error": {"code": 500, "message": "backend error"}}"#;
    let (base_url, shutdown_tx) = start_mock_translate_server(500, response_body).await;

    let client = CloudTranslateClient::new(reqwest::Client::new(), &base_url, "test-key");
    let result = client.translate("hola", "en").await;

    assert!(matches!(
        result,
        Err(TranslationError::ServiceStatus { status: 500, .. })
    ));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_empty_translation_list_when_translating_then_returns_malformed_response() {
    let response_body = r#"{"data": {"translations": []}}"#;
    let (base_url, shutdown_tx) = start_mock_translate_server(200, response_body).await;

    let client = CloudTranslateClient::new(reqwest::Client::new(), &base_url, "test-key");
    let result = client.translate("hola", "en").await;

    assert!(matches!(result, Err(TranslationError::MalformedResponse(_))));
    shutdown_tx.send(()).ok();
}

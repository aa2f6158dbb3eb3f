//! Rime provider contract tests
//!
//! Verify the HTTP request shape sent to the synthesis endpoint and how each
//! kind of response is classified.

use std::time::Duration;

use serde_json::json;
use voicenote_core::tts::rime::{RimeConfig, RimeTts};
use voicenote_core::tts::{SynthesisFailure, SynthesisRequest, TextToSpeech};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(lang: Option<&str>) -> SynthesisRequest {
    SynthesisRequest {
        text: "Hello world.".to_string(),
        voice: "atrium".to_string(),
        model: "arcana".to_string(),
        speed: 1.0,
        lang: lang.map(str::to_string),
    }
}

fn client(server: &MockServer) -> RimeTts {
    let config = RimeConfig::new("test-key".to_string())
        .with_endpoint(format!("{}/v1/rime-tts", server.uri()));
    RimeTts::new(config).unwrap()
}

fn pcm_response(bytes: &[u8]) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "audio/pcm")
        .set_body_bytes(bytes.to_vec())
}

#[tokio::test]
async fn test_request_shape_and_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/rime-tts"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("accept", "audio/pcm"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "text": "Hello world.",
            "speaker": "atrium",
            "modelId": "arcana",
            "samplingRate": 48000,
            "speedAlpha": 1.0
        })))
        .respond_with(pcm_response(&[1, 0, 2, 0]))
        .expect(1)
        .mount(&server)
        .await;

    let audio = client(&server).synthesize(&request(None)).await.unwrap();

    assert_eq!(audio.pcm_data, vec![1, 0, 2, 0]);
    assert_eq!(audio.sample_rate, 48000);
    assert_eq!(audio.channels, 1);
}

#[tokio::test]
async fn test_lang_is_sent_when_present() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_json(json!({
            "text": "Hello world.",
            "speaker": "atrium",
            "modelId": "arcana",
            "samplingRate": 48000,
            "speedAlpha": 1.0,
            "lang": "eng"
        })))
        .respond_with(pcm_response(&[0, 1]))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .synthesize(&request(Some("eng")))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_error_status_is_reported_with_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let err = client(&server).synthesize(&request(None)).await.unwrap_err();

    match err {
        SynthesisFailure::Status { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid api key");
        }
        other => panic!("expected status failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_json_payload_is_not_audio() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "quota"})))
        .mount(&server)
        .await;

    let err = client(&server).synthesize(&request(None)).await.unwrap_err();
    assert!(
        matches!(err, SynthesisFailure::NonAudio { ref content_type } if content_type.starts_with("application/json")),
        "{err:?}"
    );
}

#[tokio::test]
async fn test_empty_payload_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(pcm_response(&[]))
        .mount(&server)
        .await;

    let err = client(&server).synthesize(&request(None)).await.unwrap_err();
    assert!(matches!(err, SynthesisFailure::EmptyBody), "{err:?}");
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(pcm_response(&[0, 0]).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let config = RimeConfig::new("test-key".to_string())
        .with_endpoint(format!("{}/v1/rime-tts", server.uri()))
        .with_timeout(Duration::from_millis(200));
    let tts = RimeTts::new(config).unwrap();

    let err = tts.synthesize(&request(None)).await.unwrap_err();
    match err {
        SynthesisFailure::Transport(e) => assert!(e.is_timeout(), "{e}"),
        other => panic!("expected transport failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_single_attempt_per_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client(&server).synthesize(&request(None)).await.is_err());
}

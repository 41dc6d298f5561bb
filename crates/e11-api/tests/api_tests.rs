//! API integration tests.

use std::collections::HashSet;
use std::io::Cursor;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use metrics_exporter_prometheus::PrometheusBuilder;
use rand::Rng;
use serde_json::Value;
use tower::ServiceExt;

use e11_api::{create_router, ApiConfig, AppState};
use e11_models::{parse_processing_time, Detection};
use e11_vision::{Detector, Raster, VisionResult};

const BOUNDARY: &str = "e11-test-boundary";
const CLASSES: [&str; 3] = ["fire_extinguisher", "oxygen_tank", "toolkit"];

struct Part<'a> {
    name: &'a str,
    file_name: Option<&'a str>,
    content_type: Option<&'a str>,
    data: &'a [u8],
}

impl<'a> Part<'a> {
    fn image(file_name: &'a str, content_type: &'a str, data: &'a [u8]) -> Self {
        Self {
            name: "image",
            file_name: Some(file_name),
            content_type: Some(content_type),
            data,
        }
    }
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", part.name);
        if let Some(file_name) = part.file_name {
            disposition.push_str(&format!("; filename=\"{file_name}\""));
        }
        body.extend_from_slice(format!("{disposition}\r\n").as_bytes());
        if let Some(ct) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {ct}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn detect_request(parts: &[Part<'_>]) -> Request<Body> {
    let body = multipart_body(parts);
    Request::builder()
        .method("POST")
        .uri("/api/detect")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap()
}

fn noise_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let mut rng = rand::rng();
    let img = RgbImage::from_fn(width, height, |_, _| Rgb([rng.random(), rng.random(), rng.random()]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), format)
        .unwrap();
    bytes
}

fn create_test_router() -> Router {
    create_router(AppState::new(ApiConfig::default()), None)
}

async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

fn assert_valid_detection_body(body: &Value) {
    assert_eq!(body["success"], Value::Bool(true));

    let detections = body["detections"].as_array().unwrap();
    assert_eq!(body["total_detections"].as_u64().unwrap() as usize, detections.len());
    assert!((1..=3).contains(&detections.len()));

    for det in detections {
        let class_name = det["class_name"].as_str().unwrap();
        assert!(CLASSES.contains(&class_name), "unexpected class {class_name}");
        assert!(det["confidence"].is_f64());

        let bbox = det["bbox"].as_array().unwrap();
        assert_eq!(bbox.len(), 4);
        assert!(bbox.iter().all(Value::is_number));
    }

    let processing_time = body["processing_time"].as_str().unwrap();
    let (_, fraction) = processing_time
        .trim_end_matches('s')
        .split_once('.')
        .unwrap();
    assert_eq!(fraction.len(), 3, "three fractional digits in {processing_time}");
    assert!(parse_processing_time(processing_time).unwrap() >= 0.0);
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = get(create_test_router(), "/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "Eleven11 Detection API");
    assert_eq!(body["version"], "1.0.0");
}

#[tokio::test]
async fn test_model_info_endpoint() {
    let response = get(create_test_router(), "/api/model-info").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let classes: HashSet<&str> = body["classes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_str().unwrap())
        .collect();
    assert_eq!(classes, HashSet::from(CLASSES));
    assert_eq!(body["input_size"], serde_json::json!([640, 640]));
    assert_eq!(body["model_name"], "YOLOv8n-space-v1.0");
}

#[tokio::test]
async fn test_index_endpoint() {
    for uri in ["/api", "/api/"] {
        let response = get(create_test_router(), uri).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {uri}");

        let body = json_body(response).await;
        assert_eq!(body["message"], "Eleven11 Space Safety Detection API");
        assert_eq!(body["version"], "1.0.0");
        assert_eq!(body["endpoints"]["detection"], "/api/detect");
        assert_eq!(body["endpoints"]["health"], "/api/health");
        assert_eq!(body["endpoints"]["model_info"], "/api/model-info");
    }
}

#[tokio::test]
async fn test_detect_jpeg_noise_image() {
    let jpeg = noise_image(640, 480, ImageFormat::Jpeg);
    let response = create_test_router()
        .oneshot(detect_request(&[Part::image("test_image.jpg", "image/jpeg", &jpeg)]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_valid_detection_body(&body);
    assert_eq!(body["image_dimensions"], serde_json::json!([640, 480]));
    assert_eq!(body["model_version"], "YOLOv8n-space-v1.0");
}

#[tokio::test]
async fn test_detect_png_image() {
    let png = noise_image(320, 240, ImageFormat::Png);
    let response = create_test_router()
        .oneshot(detect_request(&[Part::image("test_image.png", "image/png", &png)]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_valid_detection_body(&body);
    assert_eq!(body["image_dimensions"], serde_json::json!([320, 240]));
}

#[tokio::test]
async fn test_detect_repeated_calls_stay_in_contract() {
    let jpeg = noise_image(200, 100, ImageFormat::Jpeg);
    let app = create_test_router();

    for _ in 0..10 {
        let response = app
            .clone()
            .oneshot(detect_request(&[Part::image("a.jpg", "image/jpeg", &jpeg)]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_valid_detection_body(&json_body(response).await);
    }
}

#[tokio::test]
async fn test_detect_rejects_text_file() {
    let response = create_test_router()
        .oneshot(detect_request(&[Part::image(
            "test.txt",
            "text/plain",
            b"This is not an image file",
        )]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["detail"], "File must be an image");
}

#[tokio::test]
async fn test_detect_rejects_real_image_with_wrong_content_type() {
    let png = noise_image(16, 16, ImageFormat::Png);
    let response = create_test_router()
        .oneshot(detect_request(&[Part::image(
            "really_a.png",
            "application/octet-stream",
            &png,
        )]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_detect_rejects_part_without_content_type() {
    let png = noise_image(16, 16, ImageFormat::Png);
    let part = Part {
        name: "image",
        file_name: Some("no_type.png"),
        content_type: None,
        data: &png,
    };
    let response = create_test_router()
        .oneshot(detect_request(&[part]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_detect_rejects_corrupted_image() {
    let response = create_test_router()
        .oneshot(detect_request(&[Part::image(
            "corrupted.jpg",
            "image/jpeg",
            b"corrupted_image_data_not_valid",
        )]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let detail = json_body(response).await["detail"].as_str().unwrap().to_string();
    assert!(detail.starts_with("Error processing image: "), "{detail}");
}

#[tokio::test]
async fn test_detect_without_file_is_unprocessable() {
    let response = create_test_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/detect")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json_body(response).await["detail"].is_string());
}

#[tokio::test]
async fn test_detect_with_other_field_only_is_unprocessable() {
    let png = noise_image(8, 8, ImageFormat::Png);
    let part = Part {
        name: "file",
        file_name: Some("x.png"),
        content_type: Some("image/png"),
        data: &png,
    };
    let response = create_test_router()
        .oneshot(detect_request(&[part]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_detect_with_plain_image_value_is_unprocessable() {
    let part = Part {
        name: "image",
        file_name: None,
        content_type: None,
        data: b"hello",
    };
    let response = create_test_router()
        .oneshot(detect_request(&[part]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let detail = json_body(response).await["detail"].as_str().unwrap().to_string();
    assert!(detail.contains("'image'"), "{detail}");
}

#[tokio::test]
async fn test_detect_rejects_oversized_body() {
    let config = ApiConfig {
        max_body_size: 1024,
        ..ApiConfig::default()
    };
    let app = create_router(AppState::new(config), None);

    let png = noise_image(64, 64, ImageFormat::Png);
    let response = app
        .oneshot(detect_request(&[Part::image("big.png", "image/png", &png)]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    assert_eq!(
        json_body(response).await["detail"],
        "Request body exceeds the 1024 byte limit"
    );
}

struct BrokenDetector;

impl Detector for BrokenDetector {
    fn detect(&self, _raster: &Raster) -> VisionResult<Vec<Detection>> {
        Err(e11_vision::VisionError::detector("model not loaded"))
    }

    fn name(&self) -> &'static str {
        "broken"
    }
}

struct PanickingDetector;

impl Detector for PanickingDetector {
    fn detect(&self, _raster: &Raster) -> VisionResult<Vec<Detection>> {
        panic!("inference kernel crashed");
    }

    fn name(&self) -> &'static str {
        "panicking"
    }
}

#[tokio::test]
async fn test_detector_failure_is_server_error() {
    let png = noise_image(32, 32, ImageFormat::Png);

    for detector in [
        Arc::new(BrokenDetector) as Arc<dyn Detector>,
        Arc::new(PanickingDetector) as Arc<dyn Detector>,
    ] {
        let app = create_router(AppState::with_detector(ApiConfig::default(), detector), None);
        let response = app
            .oneshot(detect_request(&[Part::image("x.png", "image/png", &png)]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let detail = json_body(response).await["detail"].as_str().unwrap().to_string();
        assert!(detail.starts_with("Detection failed: "), "{detail}");
    }
}

#[tokio::test]
async fn test_request_id_header() {
    let response = create_test_router()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("X-Request-ID", "abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "abc-123");

    let response = get(create_test_router(), "/api/health").await;
    let generated = response.headers()["x-request-id"].to_str().unwrap();
    assert_eq!(generated.len(), 36);
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let response = create_test_router()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header(header::ORIGIN, "https://frontend.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let response = get(create_test_router(), "/metrics").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let handle = PrometheusBuilder::new().build_recorder().handle();
    let app = create_router(AppState::new(ApiConfig::default()), Some(handle));
    let response = get(app, "/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route() {
    let response = get(create_test_router(), "/api/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

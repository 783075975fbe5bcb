//! `RenderClient` against a throwaway axum server on a loopback port.

use std::{
  sync::{Arc, Mutex},
  time::Duration,
};

use axum::{Json, Router, http::StatusCode, routing::post};
use chrono::{NaiveDate, TimeZone, Utc};
use lawdesk_core::{
  answers::Answers,
  case::Case,
  mapper::{MapperDefaults, TemplateData, map_answers},
  render::{RenderFailure, Renderer},
  template::RenderCode,
};
use serde_json::{Value, json};

use crate::{Error, RenderClient, RenderConfig};

fn sample_data() -> TemplateData {
  let case = Case {
    case_id:     "CASE001".into(),
    description: "Theft".into(),
    sc_no:       "SC/100/2024".into(),
    court_name:  None,
    case_type:   None,
    court_city:  None,
    court_state: None,
    created_by:  None,
    created_on:  Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
  };
  let answers: Answers = serde_json::from_value(json!({ "point1": "Bail" })).unwrap();
  map_answers(
    &answers,
    RenderCode::PETITION,
    &case,
    &[],
    NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
    &MapperDefaults::default(),
  )
  .data
}

/// Serve `app` on an ephemeral port and return its base URL.
async fn serve(app: Router) -> String {
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
  format!("http://{addr}")
}

fn client(base_url: String, timeout: Duration) -> RenderClient {
  RenderClient::new(RenderConfig { base_url, timeout }).unwrap()
}

#[tokio::test]
async fn successful_render_returns_body_and_sends_payload() {
  let seen: Arc<Mutex<Option<Value>>> = Arc::default();
  let recorder = seen.clone();
  let app = Router::new().route(
    "/api/templates/render",
    post(move |Json(body): Json<Value>| {
      let recorder = recorder.clone();
      async move {
        *recorder.lock().unwrap() = Some(body);
        b"%PDF-1.7 rendered".to_vec()
      }
    }),
  );
  let base = serve(app).await;

  let pdf = client(format!("{base}/"), Duration::from_secs(5))
    .render(RenderCode::POWER_OF_ATTORNEY, &sample_data())
    .await
    .unwrap();
  assert_eq!(&pdf[..], b"%PDF-1.7 rendered");

  let body = seen.lock().unwrap().take().unwrap();
  assert_eq!(body["templateId"], 2);
  assert_eq!(body["format"], "pdf");
  assert_eq!(body["formData"]["caseNumber"], "SC/100/2024");
  assert_eq!(body["formData"]["point1"], "Bail");
}

#[tokio::test]
async fn non_success_status_is_reported() {
  let app = Router::new().route(
    "/api/templates/render",
    post(|| async { (StatusCode::UNPROCESSABLE_ENTITY, "bad template") }),
  );
  let base = serve(app).await;

  let err = client(base, Duration::from_secs(5))
    .render(RenderCode::PETITION, &sample_data())
    .await
    .unwrap_err();
  assert_eq!(err, RenderFailure::Status(422));
}

#[tokio::test]
async fn empty_body_is_malformed() {
  let app = Router::new().route("/api/templates/render", post(|| async { StatusCode::OK }));
  let base = serve(app).await;

  let err = client(base, Duration::from_secs(5))
    .render(RenderCode::PETITION, &sample_data())
    .await
    .unwrap_err();
  assert!(matches!(err, RenderFailure::MalformedBody(_)));
}

#[tokio::test]
async fn slow_service_times_out() {
  let app = Router::new().route(
    "/api/templates/render",
    post(|| async {
      tokio::time::sleep(Duration::from_secs(5)).await;
      b"%PDF".to_vec()
    }),
  );
  let base = serve(app).await;

  let err = client(base, Duration::from_millis(100))
    .render(RenderCode::PETITION, &sample_data())
    .await
    .unwrap_err();
  assert_eq!(err, RenderFailure::Timeout);
}

#[tokio::test]
async fn unreachable_service_is_a_transport_failure() {
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);

  let err = client(format!("http://{addr}"), Duration::from_secs(5))
    .render(RenderCode::PETITION, &sample_data())
    .await
    .unwrap_err();
  assert!(matches!(err, RenderFailure::Transport(_)), "{err:?}");
}

#[test]
fn blank_base_url_is_rejected() {
  let err = RenderClient::new(RenderConfig { base_url: "  ".into(), ..Default::default() })
    .unwrap_err();
  assert!(matches!(err, Error::MissingBaseUrl));

  let ok = RenderClient::new(RenderConfig::default()).unwrap();
  assert_eq!(ok.endpoint(), "http://localhost:8080/api/templates/render");
}

//! Exercises `HttpBackend` against an in-process axum backend.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use sponsor_client::{EventsApi, FragmentApi, HttpBackend, PaymentsApi, SponsorshipApi};
use sponsor_core::api::{CheckoutSuccessRequest, PaymentIntentRequest, SponsorshipRequest};
use sponsor_core::{ClientError, Endpoint, ProfileTab, Tab};

async fn spawn(app: Router) -> HttpBackend {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    HttpBackend::new(format!("http://{addr}"))
}

fn fake_backend() -> Router {
    Router::new()
        .route(
            "/events/{id}/sponsorships",
            post(|Path(id): Path<String>, Json(body): Json<SponsorshipRequest>| async move {
                assert_eq!(body.ids, vec!["20".to_string(), "15".to_string()]);
                Json(json!({ "url": format!("/payments/{id}") }))
            }),
        )
        .route(
            "/events/{id}/save",
            post(|| async { Json(json!({ "message": "Event saved!" })) }),
        )
        .route("/events/{id}/delete", post(|| async { StatusCode::OK }))
        .route(
            "/users/{id}/events/{status}",
            get(|Path((id, status)): Path<(String, String)>| async move {
                format!("<div class=\"thumbs\" data-user=\"{id}\">{status}</div>")
            }),
        )
        .route(
            "/payments/create-payment-intent",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body, json!({ "orderTotal": 3780 }));
                (StatusCode::CREATED, Json(json!({ "clientSecret": "pi_123_secret_456" })))
            }),
        )
        .route(
            "/payments/checkout-success",
            post(|Json(body): Json<Value>| async move {
                if body["eventId"] == "42" {
                    (
                        StatusCode::CREATED,
                        Json(json!({ "code": 201, "message": "Your purchase was successful." })),
                    )
                } else {
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({ "code": 400, "message": "Package sold out" })),
                    )
                }
            }),
        )
        .route(
            "/events/packages/{id}",
            get(|Path(id): Path<String>| async move {
                match id.as_str() {
                    "404" => (StatusCode::NOT_FOUND, "missing"),
                    "500" => (StatusCode::INTERNAL_SERVER_ERROR, "boom"),
                    "403" => (StatusCode::FORBIDDEN, "Forbidden"),
                    _ => (StatusCode::OK, "{not json"),
                }
            }),
        )
}

#[tokio::test]
async fn test_create_sponsorships_returns_payment_url() {
    let backend = spawn(fake_backend()).await;
    let request = SponsorshipRequest {
        ids: vec!["20".into(), "15".into()],
    };

    let redirect = backend.create_sponsorships("42", &request).await.unwrap();
    assert_eq!(redirect.url, "/payments/42");
}

#[tokio::test]
async fn test_save_and_delete_event() {
    let backend = spawn(fake_backend()).await;

    let saved = backend.save_event("7").await.unwrap();
    assert_eq!(saved.message, "Event saved!");

    assert_eq!(backend.delete_event("7").await.unwrap(), None);
}

#[tokio::test]
async fn test_profile_fragment() {
    let backend = spawn(fake_backend()).await;
    let endpoint = ProfileTab::LiveEvents.endpoint("3");

    let html = backend.fragment(&endpoint).await.unwrap();
    assert_eq!(html, "<div class=\"thumbs\" data-user=\"3\">live</div>");
}

#[tokio::test]
async fn test_payment_intent_and_success_report() {
    let backend = spawn(fake_backend()).await;

    let intent = backend
        .create_payment_intent(&PaymentIntentRequest { order_total: 3780 })
        .await
        .unwrap();
    assert_eq!(intent.client_secret, "pi_123_secret_456");

    let ok = backend
        .checkout_success(&CheckoutSuccessRequest { event_id: "42".into() })
        .await
        .unwrap();
    assert!(ok.is_success());
}

#[tokio::test]
async fn test_rejected_checkout_success_is_still_a_message() {
    let backend = spawn(fake_backend()).await;

    let outcome = backend
        .checkout_success(&CheckoutSuccessRequest { event_id: "9".into() })
        .await
        .unwrap();
    assert_eq!(outcome.code, 400);
    assert_eq!(outcome.message, "Package sold out");
}

#[tokio::test]
async fn test_failures_are_classified() {
    let backend = spawn(fake_backend()).await;

    assert_eq!(backend.package_details("404").await.unwrap_err(), ClientError::NotFound);
    assert_eq!(backend.package_details("500").await.unwrap_err(), ClientError::Server);
    assert_eq!(
        backend.package_details("403").await.unwrap_err(),
        ClientError::Uncaught {
            status: 403,
            body: "Forbidden".into()
        }
    );
    assert_eq!(
        backend.package_details("1").await.unwrap_err().user_message(),
        "Requested JSON parse failed."
    );
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backend = HttpBackend::new(format!("http://{addr}"));
    let err = backend.fragment(&Endpoint::EventInfo { event_id: "1".into() }).await.unwrap_err();
    assert_eq!(err, ClientError::Network);
}

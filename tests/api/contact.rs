use serde_json::json;
use wiremock::{
    matchers::{any, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::spawn_app;

#[tokio::test]
async fn contact_returns_a_200_for_valid_form_data() {
    let test_app = spawn_app().await;

    Mock::given(path("/api/v1.0/email/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&test_app.email_server)
        .await;

    let response = test_app
        .post_contact(&json!({
            "name": "le guin",
            "email": "ursula_le_guin@gmail.com",
            "message": "I'd like to commission a site."
        }))
        .await;

    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn contact_forwards_the_fields_as_template_params() {
    let test_app = spawn_app().await;

    Mock::given(any())
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&test_app.email_server)
        .await;

    test_app
        .post_contact(&json!({
            "name": "  le guin ",
            "email": "ursula_le_guin@gmail.com",
            "message": "Hello there"
        }))
        .await;

    let email_request = &test_app.email_server.received_requests().await.unwrap()[0];
    let request_body: serde_json::Value = serde_json::from_slice(&email_request.body).unwrap();

    assert_eq!(request_body["service_id"], "service_test");
    assert_eq!(request_body["template_id"], "template_test");
    assert_eq!(request_body["user_id"], "public_test");
    assert_eq!(
        request_body["template_params"],
        json!({
            "from_name": "le guin",
            "from_email": "ursula_le_guin@gmail.com",
            "message": "Hello there"
        })
    );
}

#[tokio::test]
async fn contact_returns_a_400_when_data_is_missing() {
    let test_app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&test_app.email_server)
        .await;

    let test_cases = vec![
        (json!({ "name": "le guin", "message": "hi" }), "missing the email"),
        (json!({ "email": "ursula_le_guin@gmail.com", "message": "hi" }), "missing the name"),
        (json!({ "name": "le guin", "email": "ursula_le_guin@gmail.com" }), "missing the message"),
        (json!({}), "missing every field"),
    ];

    for (invalid_body, error_msg) in test_cases {
        let response = test_app.post_contact(&invalid_body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}",
            error_msg
        );
    }
}

#[tokio::test]
async fn contact_returns_a_400_when_fields_are_present_but_invalid() {
    let test_app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&test_app.email_server)
        .await;

    let long_message = "x".repeat(4097);
    let test_cases = vec![
        (json!({ "name": "", "email": "ursula_le_guin@gmail.com", "message": "hi" }), "empty name"),
        (json!({ "name": "Ursula", "email": "", "message": "hi" }), "empty email"),
        (json!({ "name": "Ursula", "email": "definitely-not-an-email", "message": "hi" }), "invalid email"),
        (json!({ "name": "Ursula", "email": "ursula@localhost", "message": "hi" }), "undotted domain"),
        (json!({ "name": "Ursula", "email": "ursula@gmail.com", "message": "   " }), "blank message"),
        (json!({ "name": "Ursula", "email": "ursula@gmail.com", "message": long_message }), "overlong message"),
    ];

    for (body, description) in test_cases {
        let response = test_app.post_contact(&body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not return a 400 Bad Request when the payload was {}",
            description
        );
    }
}

#[tokio::test]
async fn contact_reports_an_empty_name_only() {
    let test_app = spawn_app().await;

    let response = test_app
        .post_contact(&json!({ "name": "", "email": "a@b.com", "message": "hi" }))
        .await;

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid contact form submission.");
    assert_eq!(body["fields"], json!({ "name": "Name is required" }));
}

#[tokio::test]
async fn contact_reports_a_malformed_email_only() {
    let test_app = spawn_app().await;

    let response = test_app
        .post_contact(&json!({ "name": "Jo", "email": "not-an-email", "message": "hi" }))
        .await;

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["fields"], json!({ "email": "Valid email is required" }));
}

#[tokio::test]
async fn contact_reports_every_invalid_field_at_once() {
    let test_app = spawn_app().await;

    let response = test_app.post_contact(&json!({})).await;

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["fields"],
        json!({
            "name": "Name is required",
            "email": "Valid email is required",
            "message": "Message is required"
        })
    );
}

#[tokio::test]
async fn contact_returns_a_500_with_an_error_body_when_the_provider_rejects() {
    let test_app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(400).set_body_string("The Public Key is invalid."))
        .expect(1)
        .mount(&test_app.email_server)
        .await;

    let response = test_app
        .post_contact(&json!({ "name": "Jo", "email": "jo@example.com", "message": "hi" }))
        .await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "error": "Failed to send message. Please try again." })
    );
}

#[tokio::test]
async fn contact_returns_a_400_with_an_error_body_for_unreadable_json() {
    let test_app = spawn_app().await;

    let response = test_app.post_raw_contact("{ not json").await;

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid contact form submission.");
}

#[tokio::test]
async fn contact_accepts_a_long_name() {
    let test_app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&test_app.email_server)
        .await;

    let response = test_app
        .post_contact(&json!({ "name": "a".repeat(300), "email": "a@b.com", "message": "hi" }))
        .await;

    assert_eq!(200, response.status().as_u16());
}

use axum::http::StatusCode;
use passreset_backend::{app, identity::IdentityError, state::AppState};
use serde_json::json;

mod support;

use support::{
    account, app_with, reset_request, send, send_json, test_config, MockIdentity, ALLOWED_ORIGIN,
};

fn body(value: serde_json::Value) -> String {
    value.to_string()
}

#[tokio::test]
async fn test_reset_password_updates_matching_account() {
    let mut identity = MockIdentity::new();
    identity
        .expect_find_users_by_email()
        .withf(|email| email == "user@example.com")
        .times(1)
        .returning(|_| Ok(vec![account("u-1", "user@example.com")]));
    identity
        .expect_update_password()
        .withf(|user_id, password| user_id == "u-1" && password == "n3wpass")
        .times(1)
        .returning(|_, _| Ok(()));

    let (status, json) = send_json(
        app_with(identity),
        reset_request(
            Some(ALLOWED_ORIGIN),
            body(json!({ "email": "user@example.com", "newPassword": "n3wpass" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "ok": true, "user_id": "u-1" }));
}

#[tokio::test]
async fn test_reset_password_picks_case_insensitive_match_among_candidates() {
    let mut identity = MockIdentity::new();
    identity.expect_find_users_by_email().returning(|_| {
        Ok(vec![
            account("u-other", "someone@example.com"),
            account("u-match", "User@Example.com"),
        ])
    });
    identity
        .expect_update_password()
        .withf(|user_id, _| user_id == "u-match")
        .times(1)
        .returning(|_, _| Ok(()));

    let (status, json) = send_json(
        app_with(identity),
        reset_request(
            Some(ALLOWED_ORIGIN),
            body(json!({ "email": "user@example.com", "newPassword": "n3wpass" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["user_id"], "u-match");
}

#[tokio::test]
async fn test_reset_password_unknown_email_returns_not_found() {
    let mut identity = MockIdentity::new();
    identity
        .expect_find_users_by_email()
        .times(1)
        .returning(|_| Ok(vec![]));
    identity.expect_update_password().never();

    let (status, json) = send_json(
        app_with(identity),
        reset_request(
            Some(ALLOWED_ORIGIN),
            body(json!({ "email": "user@example.com", "newPassword": "n3wpass" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Email inconnu");
}

#[tokio::test]
async fn test_unauthorized_caller_is_rejected_before_any_outbound_call() {
    for origin in [
        None,
        Some("https://evil.example.com"),
        Some("https://reset.example.app.evil.com"),
    ] {
        let mut identity = MockIdentity::new();
        identity.expect_find_users_by_email().never();
        identity.expect_update_password().never();

        let (status, json) = send_json(
            app_with(identity),
            reset_request(
                origin,
                body(json!({ "email": "user@example.com", "newPassword": "n3wpass" })),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], "Unauthorized");
    }
}

#[tokio::test]
async fn test_referer_prefix_authorizes_caller() {
    let mut identity = MockIdentity::new();
    identity
        .expect_find_users_by_email()
        .returning(|_| Ok(vec![account("u-1", "user@example.com")]));
    identity.expect_update_password().returning(|_, _| Ok(()));

    let mut request = reset_request(
        None,
        body(json!({ "email": "user@example.com", "newPassword": "n3wpass" })),
    );
    request.headers_mut().insert(
        "referer",
        format!("{}/reset?email=user@example.com", ALLOWED_ORIGIN)
            .parse()
            .unwrap(),
    );

    let (status, _) = send_json(app_with(identity), request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_bad_payloads_are_rejected_without_lookup() {
    let payloads = [
        body(json!({ "newPassword": "n3wpass" })),
        body(json!({ "email": "user@example.com" })),
        body(json!({ "email": "", "newPassword": "n3wpass" })),
        body(json!({ "email": "user@example.com", "newPassword": "" })),
        body(json!({ "email": "user@example.com", "newPassword": "12345" })),
        "not valid json".to_string(),
    ];

    for payload in payloads {
        let mut identity = MockIdentity::new();
        identity.expect_find_users_by_email().never();
        identity.expect_update_password().never();

        let (status, json) = send_json(
            app_with(identity),
            reset_request(Some(ALLOWED_ORIGIN), payload.clone()),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {}", payload);
        assert_eq!(json["error"], "Bad payload");
    }
}

#[tokio::test]
async fn test_missing_identity_credentials_report_misconfiguration() {
    let mut config = test_config();
    config.identity_service_url = None;
    let state = AppState::from_config(config).expect("state");

    let (status, json) = send_json(
        app(state),
        reset_request(
            Some(ALLOWED_ORIGIN),
            body(json!({ "email": "user@example.com", "newPassword": "n3wpass" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Server misconfigured (env missing)");
}

#[tokio::test]
async fn test_payload_is_validated_before_configuration() {
    let mut config = test_config();
    config.identity_service_key = None;
    let state = AppState::from_config(config).expect("state");

    let (status, json) = send_json(
        app(state),
        reset_request(Some(ALLOWED_ORIGIN), body(json!({ "email": "user@example.com" }))),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Bad payload");
}

#[tokio::test]
async fn test_lookup_failure_propagates_upstream_status_and_message() {
    let mut identity = MockIdentity::new();
    identity.expect_find_users_by_email().returning(|_| {
        Err(IdentityError::Status {
            status: StatusCode::FORBIDDEN,
            body: "{\"msg\":\"User not allowed\"}".into(),
        })
    });
    identity.expect_update_password().never();

    let (status, json) = send_json(
        app_with(identity),
        reset_request(
            Some(ALLOWED_ORIGIN),
            body(json!({ "email": "user@example.com", "newPassword": "n3wpass" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"], "get user failed: {\"msg\":\"User not allowed\"}");
}

#[tokio::test]
async fn test_large_upstream_lookup_error_reaches_caller_intact() {
    let upstream_body = "x".repeat(70 * 1024);
    let expected = format!("get user failed: {}", upstream_body);
    let mut identity = MockIdentity::new();
    identity.expect_find_users_by_email().returning(move |_| {
        Err(IdentityError::Status {
            status: StatusCode::BAD_GATEWAY,
            body: upstream_body.clone(),
        })
    });
    identity.expect_update_password().never();

    let (status, json) = send_json(
        app_with(identity),
        reset_request(
            Some(ALLOWED_ORIGIN),
            body(json!({ "email": "user@example.com", "newPassword": "n3wpass" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "UPSTREAM_LOOKUP_FAILED");
    assert_eq!(json["error"], expected.as_str());
}

#[tokio::test]
async fn test_update_failure_returns_client_error_with_upstream_message() {
    let mut identity = MockIdentity::new();
    identity
        .expect_find_users_by_email()
        .returning(|_| Ok(vec![account("u-1", "user@example.com")]));
    identity.expect_update_password().returning(|_, _| {
        Err(IdentityError::Status {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: "{\"code\":422,\"msg\":\"Password is known to be weak\"}".into(),
        })
    });

    let (status, json) = send_json(
        app_with(identity),
        reset_request(
            Some(ALLOWED_ORIGIN),
            body(json!({ "email": "user@example.com", "newPassword": "n3wpass" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Password is known to be weak");
}

#[tokio::test]
async fn test_unexpected_identity_failure_is_a_generic_server_error() {
    let mut identity = MockIdentity::new();
    identity.expect_find_users_by_email().returning(|_| {
        let decode = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        Err(IdentityError::Decode(decode))
    });

    let (status, json) = send_json(
        app_with(identity),
        reset_request(
            Some(ALLOWED_ORIGIN),
            body(json!({ "email": "user@example.com", "newPassword": "n3wpass" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Internal server error");
    assert_eq!(json["code"], "INTERNAL_SERVER_ERROR");
}

#[tokio::test]
async fn test_responses_are_not_cacheable() {
    let identity = MockIdentity::new();
    let response = send(
        app_with(identity),
        reset_request(Some("https://evil.example.com"), "{}"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()["cache-control"], "no-store");
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("application/json"));
}

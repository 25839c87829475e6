use http::StatusCode;
use tokio_util::sync::CancellationToken;

use crate::api::mock_sender::{
    AUTH_TOKEN, MockSender, client_with, create_ok_response_with_body, create_response, query_param, test_config,
};
use crate::{ApiClient, Error};

const EMAIL: &str = "email@email.com";
const PASSWORD: &str = "super-secure";

#[tokio::test]
async fn login_when_endpoint_is_missing_returns_endpoint_not_exists() {
    let sender = MockSender::new(vec![Ok(create_response(StatusCode::NOT_FOUND, "404 page not found"))]);

    let result = ApiClient::login_with_sender(EMAIL, PASSWORD, test_config(), sender, &CancellationToken::new()).await;

    assert!(matches!(result, Err(Error::EndpointNotExists { .. })));
}

#[tokio::test]
async fn login_when_api_returns_error_returns_matching_error() {
    let test_cases = vec![
        (
            "wrong username or password",
            r#"{"error": "Correo electrónico y/o contraseña incorrecto"}"#,
        ),
        ("unknown error", r#"{"error": "some_error"}"#),
        ("missing auth token", r#"{"cookie": ""}"#),
        ("absent auth token", r#"{"userId": "1"}"#),
    ];

    for (test_name, api_response) in test_cases {
        // Arrange
        let sender = MockSender::new(vec![Ok(create_ok_response_with_body(api_response))]);

        // Act
        let result =
            ApiClient::login_with_sender(EMAIL, PASSWORD, test_config(), sender.clone(), &CancellationToken::new())
                .await;

        // Assert
        let err = match result {
            Err(err) => err,
            Ok(_) => panic!("Expected an error for {}", test_name),
        };
        match test_name {
            "wrong username or password" => assert!(matches!(err, Error::InvalidCredentials), "{}", err),
            "unknown error" => assert!(matches!(err, Error::Unknown(ref message) if message == "some_error"), "{}", err),
            _ => assert!(matches!(err, Error::MissingAuthToken), "{} for {}", err, test_name),
        }

        let captured_requests = sender.get_captured_requests();
        assert_eq!(captured_requests.len(), 1);
        assert_eq!(captured_requests[0].method(), "GET");
        assert_eq!(captured_requests[0].url().path(), "/api/login");
        assert_eq!(query_param(&captured_requests[0], "mail").as_deref(), Some(EMAIL));
        assert_eq!(query_param(&captured_requests[0], "pw").as_deref(), Some(PASSWORD));
        assert!(query_param(&captured_requests[0], "token").is_none());
    }
}

#[tokio::test]
async fn login_when_api_returns_cookie_stores_token() {
    // Arrange
    let body = format!(r#"{{"cookie": "{}", "userId": "1"}}"#, AUTH_TOKEN);
    let sender = MockSender::new(vec![Ok(create_ok_response_with_body(&body))]);

    // Act
    let client = ApiClient::login_with_sender(EMAIL, PASSWORD, test_config(), sender, &CancellationToken::new())
        .await
        .unwrap();

    // Assert
    assert_eq!(client.auth_token(), AUTH_TOKEN);
}

#[tokio::test]
async fn sign_in_attaches_new_token_to_following_requests() {
    // Arrange
    let sender = MockSender::new(vec![
        Ok(create_ok_response_with_body(r#"{"cookie": "abc", "userId": "1"}"#)),
        Ok(create_ok_response_with_body(r#"{"nextClasses": []}"#)),
    ]);
    let client = client_with("", sender);
    let cancel = CancellationToken::new();

    // Act
    client.sign_in(EMAIL, PASSWORD, &cancel).await.unwrap();
    let bookings = client.bookings().next("123", &cancel).await.unwrap();

    // Assert
    assert!(bookings.is_empty());
    let captured_requests = client.sender.get_captured_requests();
    assert_eq!(captured_requests.len(), 2);
    assert_eq!(query_param(&captured_requests[1], "token").as_deref(), Some("abc"));
}

#[tokio::test]
async fn sign_in_when_cookie_is_empty_keeps_previous_token() {
    let sender = MockSender::new(vec![Ok(create_ok_response_with_body(r#"{"cookie": ""}"#))]);
    let client = client_with(AUTH_TOKEN, sender);

    let result = client.sign_in(EMAIL, PASSWORD, &CancellationToken::new()).await;

    assert!(matches!(result, Err(Error::MissingAuthToken)));
    assert_eq!(client.auth_token(), AUTH_TOKEN);
}

#[tokio::test]
async fn sign_in_when_logout_forced_keeps_previous_token() {
    let sender = MockSender::new(vec![Ok(create_ok_response_with_body(r#"{"logout": 1}"#))]);
    let client = client_with(AUTH_TOKEN, sender);

    let result = client.sign_in(EMAIL, PASSWORD, &CancellationToken::new()).await;

    assert!(result.unwrap_err().is_session_expired());
    assert_eq!(client.auth_token(), AUTH_TOKEN);
}

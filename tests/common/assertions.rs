//! Custom assertion macros and utilities
//!
//! Provides assertion macros for the JSON envelopes returned by the API.

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}

/// Assert the HTTP status of a response and return its JSON body
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {{
        let response = $response;
        let body: serde_json::Value = response.json();
        assert_eq!(
            response.status_code(),
            $status,
            "unexpected status, body: {}",
            body
        );
        body
    }};
}

/// Assert an HTTP 200 envelope with `status: 0` and the given message
#[macro_export]
macro_rules! assert_benign_failure {
    ($response:expr, $message:expr) => {{
        let body = $crate::assert_status!($response, axum::http::StatusCode::OK);
        assert_eq!(body["status"], 0, "expected status 0, body: {}", body);
        assert_eq!(body["message"], $message);
    }};
}

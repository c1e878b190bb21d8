use std::time::Duration;

use venice::VeniceError;

#[test]
fn transient_classification() {
    assert!(VeniceError::Http("connection refused".into()).is_transient());
    assert!(VeniceError::EmptyBody.is_transient());
    assert!(
        VeniceError::RateLimited {
            retry_after: None,
            body: String::new()
        }
        .is_transient()
    );
    for status in [408, 500, 502, 503, 504] {
        let err = VeniceError::RequestFailed {
            status,
            body: String::new(),
        };
        assert!(err.is_transient(), "{status} should be transient");
    }
}

#[test]
fn permanent_classification() {
    for status in [400, 401, 403, 404, 422] {
        let err = VeniceError::RequestFailed {
            status,
            body: String::new(),
        };
        assert!(!err.is_transient(), "{status} should be permanent");
    }
    assert!(!VeniceError::Configuration("no key".into()).is_transient());
    assert!(!VeniceError::TransportInterrupted("reset".into()).is_transient());
    assert!(!VeniceError::ModelNotFound("x".into()).is_transient());
}

#[test]
fn retry_after_only_from_rate_limit() {
    let err = VeniceError::RateLimited {
        retry_after: Some(Duration::from_secs(3)),
        body: String::new(),
    };
    assert_eq!(err.retry_after(), Some(Duration::from_secs(3)));
    assert_eq!(VeniceError::EmptyBody.retry_after(), None);
}

#[test]
fn only_interruption_has_partial_output() {
    assert!(!VeniceError::TransportInterrupted("eof".into()).produced_no_response());
    assert!(VeniceError::EmptyBody.produced_no_response());
    assert!(
        VeniceError::RequestFailed {
            status: 401,
            body: String::new()
        }
        .produced_no_response()
    );
}

#[test]
fn display_includes_status_and_body() {
    let err = VeniceError::RequestFailed {
        status: 401,
        body: "bad key".into(),
    };
    assert_eq!(err.to_string(), "request failed (401): bad key");
}

#[test]
fn json_errors_convert() {
    let err: VeniceError = serde_json::from_str::<serde_json::Value>("{")
        .unwrap_err()
        .into();
    assert!(matches!(err, VeniceError::Json(_)));
}

use adapter_core::error::{AdapterError, ExecutorError};
use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

/// **VALUE**: Verifies `ExecutorError::Server` renders status, body and location.
///
/// **WHY THIS MATTERS**: When a third-party call fails in production the log line
/// is all we get. It has to say which status came back and from where.
///
/// **BUG THIS CATCHES**: Would catch the Display format losing the body or the
/// location suffix.
#[test]
fn given_server_error_when_formatted_then_includes_status_body_and_location() {
    let err = ExecutorError::Server {
        status: HttpStatusCode(502),
        body: "bad gateway".to_string(),
        location: ErrorLocation::from(Location::caller()),
    };

    let rendered = err.to_string();

    assert!(rendered.contains("Server Error"));
    assert!(rendered.contains("HTTP 502"));
    assert!(rendered.contains("bad gateway"));
    assert!(rendered.contains("executor.rs"));
}

/// **VALUE**: Verifies `?` conversion records the conversion site.
///
/// **BUG THIS CATCHES**: Would catch `#[track_caller]` missing on the `From` impl,
/// which makes every URL error point into the error module.
#[test]
fn given_url_parse_failure_when_converted_then_location_is_call_site() {
    fn parse() -> Result<url::Url, ExecutorError> {
        Ok(url::Url::parse("::not a url::")?)
    }

    match parse() {
        Err(ExecutorError::UrlParse { location, .. }) => {
            assert!(location.file.contains("integration_tests"));
        }
        other => panic!("expected url parse error, got {other:?}"),
    }
}

/// **VALUE**: Verifies the umbrella error stays transparent for executor errors.
#[test]
fn given_executor_error_when_wrapped_then_display_unchanged() {
    let inner = ExecutorError::Exhausted {
        message: "no reply queued".to_string(),
        location: ErrorLocation::from(Location::caller()),
    };
    let expected = inner.to_string();

    let wrapped = AdapterError::from(inner);

    assert_eq!(wrapped.to_string(), expected);
}

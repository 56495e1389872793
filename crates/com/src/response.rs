use {
    crate::{ComError, Request, Response},
    http::{HeaderValue, StatusCode, Uri, header},
    serde::{Serialize, de::DeserializeOwned},
};

pub fn empty_response(status: StatusCode) -> Response {
    let mut response = Response::new(Vec::new());
    *response.status_mut() = status;
    response
}

pub fn bytes_response(status: StatusCode, content_type: &'static str, body: Vec<u8>) -> Response {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

/// Serialize `value` as the JSON body. A value that fails to serialize becomes a 500.
pub fn json_response<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(body) => bytes_response(status, "application/json", body),
        Err(error) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("failed to encode response: {}", error),
        ),
    }
}

/// `{"error": message}` with `status`.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    let body = serde_json::json!({ "error": message }).to_string();
    bytes_response(status, "application/json", body.into_bytes())
}

/// Allow any origin to call the API from a browser.
pub fn apply_cors(response: &mut Response) {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PATCH, DELETE, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
}

/// First value of the query parameter `name`, percent-decoded.
pub fn query_param(uri: &Uri, name: &str) -> Option<String> {
    let query = uri.query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Non-empty path segments, e.g. `/friends/42/toggle` gives `["friends", "42", "toggle"]`.
pub fn path_segments(uri: &Uri) -> Vec<&str> {
    uri.path()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Deserialize the request body as JSON.
pub fn parse_json<T: DeserializeOwned>(request: &Request) -> Result<T, ComError> {
    Ok(serde_json::from_slice(request.body())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_param_decodes() {
        let uri: Uri = "/friends?userId=alice%20b&x=1".parse().unwrap();
        assert_eq!(query_param(&uri, "userId").as_deref(), Some("alice b"));
        assert_eq!(query_param(&uri, "missing"), None);
        let bare: Uri = "/friends".parse().unwrap();
        assert_eq!(query_param(&bare, "userId"), None);
    }

    #[test]
    fn test_path_segments() {
        let uri: Uri = "/friends/-100123/toggle?userId=a".parse().unwrap();
        assert_eq!(path_segments(&uri), vec!["friends", "-100123", "toggle"]);
        assert!(path_segments(&"/".parse().unwrap()).is_empty());
    }

    #[test]
    fn test_error_response_body() {
        let response = error_response(StatusCode::NOT_FOUND, "no such route");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.body(), br#"{"error":"no such route"}"#);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            HeaderValue::from_static("application/json")
        );
    }

    #[test]
    fn test_apply_cors() {
        let mut response = empty_response(StatusCode::NO_CONTENT);
        apply_cors(&mut response);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}

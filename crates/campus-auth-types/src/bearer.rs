//! `Authorization: Bearer` header parsing.

use http::HeaderMap;

/// Extract the bearer token from an `Authorization` header, if present.
///
/// Returns `None` when the header is absent, not valid UTF-8, or does not
/// use the `Bearer` scheme.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::AUTHORIZATION,
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn should_extract_bearer_token() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn should_return_none_without_header() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn should_return_none_for_other_schemes() {
        let headers = headers_with("Basic dXNlcjpwdw==");
        assert_eq!(bearer_token(&headers), None);
    }
}

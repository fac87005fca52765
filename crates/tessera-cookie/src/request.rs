//! Read-only cookie access for an inbound request.

use cookie::Cookie;
use http::{HeaderMap, Request, header};

use crate::{CookieError, CookieSource};

/// The cookies an inbound request carries, read straight from its
/// `Cookie` header(s).
///
/// This borrows the request's headers and never needs a response, which
/// is what a routing layer has when it decides whether to admit a
/// request at all.
#[derive(Debug, Clone, Copy)]
pub struct RequestCookies<'a> {
    headers: &'a HeaderMap,
}

impl<'a> RequestCookies<'a> {
    /// View over the cookies of `request`.
    pub fn from_request<B>(request: &'a Request<B>) -> Self {
        Self::from_headers(request.headers())
    }

    /// View over the cookies in `headers`.
    pub fn from_headers(headers: &'a HeaderMap) -> Self {
        Self { headers }
    }

    /// Value of the first cookie called `name`.
    pub fn value(&self, name: &str) -> Option<String> {
        cookie_pairs(self.headers)
            .find(|cookie| cookie.name() == name)
            .map(|cookie| cookie.value().to_owned())
    }
}

impl CookieSource for RequestCookies<'_> {
    async fn get(&self, name: &str) -> Result<Option<String>, CookieError> {
        Ok(self.value(name))
    }
}

/// Every `name=value` pair across all `Cookie` headers, in order.
///
/// Non-UTF-8 headers and pairs that don't parse are skipped.
pub(crate) fn cookie_pairs(
    headers: &HeaderMap,
) -> impl Iterator<Item = Cookie<'_>> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| Cookie::split_parse(value))
        .filter_map(Result::ok)
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    fn headers(cookie_headers: &[&str]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for value in cookie_headers {
            map.append(
                header::COOKIE,
                HeaderValue::from_str(value).expect("valid header"),
            );
        }
        map
    }

    #[test]
    fn test_value_finds_named_cookie_among_many() {
        let map = headers(&["theme=dark; auth-token=a.b.c; lang=en"]);
        let cookies = RequestCookies::from_headers(&map);
        assert_eq!(cookies.value("auth-token").as_deref(), Some("a.b.c"));
        assert_eq!(cookies.value("lang").as_deref(), Some("en"));
    }

    #[test]
    fn test_value_missing_header_returns_none() {
        let map = HeaderMap::new();
        assert!(RequestCookies::from_headers(&map).value("auth-token").is_none());
    }

    #[test]
    fn test_value_scans_multiple_cookie_headers() {
        let map = headers(&["theme=dark", "auth-token=x.y.z"]);
        let cookies = RequestCookies::from_headers(&map);
        assert_eq!(cookies.value("auth-token").as_deref(), Some("x.y.z"));
    }

    #[test]
    fn test_value_duplicate_name_returns_first() {
        let map = headers(&["auth-token=first; auth-token=second"]);
        let cookies = RequestCookies::from_headers(&map);
        assert_eq!(cookies.value("auth-token").as_deref(), Some("first"));
    }

    #[test]
    fn test_value_skips_unparseable_pairs() {
        let map = headers(&["=orphan; auth-token=ok"]);
        let cookies = RequestCookies::from_headers(&map);
        assert_eq!(cookies.value("auth-token").as_deref(), Some("ok"));
    }

    #[test]
    fn test_value_non_utf8_header_returns_none() {
        let mut map = HeaderMap::new();
        map.insert(
            header::COOKIE,
            HeaderValue::from_bytes(b"auth-token=\xff\xfe").expect("opaque bytes allowed"),
        );
        assert!(RequestCookies::from_headers(&map).value("auth-token").is_none());
    }

    #[tokio::test]
    async fn test_get_reads_from_request() {
        let request = Request::builder()
            .uri("http://localhost:3000/")
            .header(header::COOKIE, "auth-token=tok")
            .body(())
            .expect("valid request");

        let cookies = RequestCookies::from_request(&request);
        let value = cookies.get("auth-token").await.expect("never fails");
        assert_eq!(value.as_deref(), Some("tok"));
    }
}

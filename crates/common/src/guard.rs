//! Request guard that rejects requests whose URL is not validly signed.
//!
//! Framework-neutral: it works on [`http::Request`] and answers with an
//! [`http::Response`], so any server built on the `http` types can call it
//! before dispatching to a protected handler.

use http::header::{self, HeaderName, HeaderValue};
use http::{Request, Response, StatusCode};

use crate::verifier::ValidateSignedUrl;

pub const HEADER_X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");

/// Scheme assumed for origin-form request targets.
pub const DEFAULT_SCHEME: &str = "https";

/// Returns `None` when the request may proceed, or a `403 Forbidden`
/// response when its URL does not validate.
pub fn enforce_signed_url<V, B>(validator: &V, req: &Request<B>) -> Option<Response<String>>
where
    V: ValidateSignedUrl + ?Sized,
{
    let Some(url) = request_url(req) else {
        log::debug!("Cannot reconstruct request URL for {}", req.uri());
        return Some(forbidden_response());
    };

    if validator.validate(&url) {
        None
    } else {
        Some(forbidden_response())
    }
}

/// Reconstructs the full URL a client requested.
///
/// Absolute-form targets are used as is. Otherwise the URL is rebuilt from
/// the `Host` header, with the scheme taken from `X-Forwarded-Proto` when it
/// is `http` or `https` and [`DEFAULT_SCHEME`] otherwise.
pub fn request_url<B>(req: &Request<B>) -> Option<String> {
    let uri = req.uri();
    if uri.scheme().is_some() && uri.authority().is_some() {
        return Some(uri.to_string());
    }

    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|h| !h.is_empty())?;

    let scheme = req
        .headers()
        .get(HEADER_X_FORWARDED_PROTO)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|proto| proto.eq_ignore_ascii_case("http") || proto.eq_ignore_ascii_case("https"))
        .map_or(DEFAULT_SCHEME.to_string(), str::to_ascii_lowercase);

    let path_and_query = uri.path_and_query().map_or("/", |pq| pq.as_str());

    Some(format!("{}://{}{}", scheme, host, path_and_query))
}

fn forbidden_response() -> Response<String> {
    let mut response = Response::new("Forbidden".to_string());
    *response.status_mut() = StatusCode::FORBIDDEN;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}

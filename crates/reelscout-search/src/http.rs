use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};

use crate::error::SearchError;

/// Build the shared outbound HTTP client.
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, SearchError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?)
}

/// Parse `base_url`, normalising it to exactly one trailing slash so that
/// [`Url::join`] appends rather than replacing the last path segment.
///
/// # Errors
///
/// Returns [`SearchError::InvalidBaseUrl`] when the URL does not parse.
pub fn parse_base_url(base_url: &str) -> Result<Url, SearchError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| SearchError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

/// Build an endpoint URL under `base` with percent-encoded query pairs.
///
/// # Errors
///
/// Returns [`SearchError::InvalidBaseUrl`] when `path` cannot be joined.
pub fn endpoint(base: &Url, path: &str, params: &[(&str, &str)]) -> Result<Url, SearchError> {
    let mut url = base.join(path).map_err(|e| SearchError::InvalidBaseUrl {
        url: base.to_string(),
        reason: e.to_string(),
    })?;
    {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in params {
            pairs.append_pair(k, v);
        }
    }
    Ok(url)
}

/// GET `url`, require a 2xx status, and parse the body as `T`.
///
/// `context` names the call in error messages; it must never contain
/// credentials.
///
/// # Errors
///
/// See [`send_json`].
pub async fn get_json<T: serde::de::DeserializeOwned>(
    client: &Client,
    url: Url,
    provider: &str,
    context: &str,
) -> Result<T, SearchError> {
    send_json(client.get(url), provider, context).await
}

/// Send a prepared request, require a 2xx status, and parse the body as `T`.
///
/// # Errors
///
/// Returns [`SearchError::Http`] on network failure (with the request URL
/// stripped, since some providers take their key as a query parameter),
/// [`SearchError::Upstream`]
/// on a non-2xx status (carrying the provider's error message when the body
/// has one), and [`SearchError::Deserialize`] when the body does not match `T`.
pub async fn send_json<T: serde::de::DeserializeOwned>(
    request: RequestBuilder,
    provider: &str,
    context: &str,
) -> Result<T, SearchError> {
    let response = request
        .send()
        .await
        .map_err(|e| SearchError::Http(e.without_url()))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| SearchError::Http(e.without_url()))?;

    if !status.is_success() {
        return Err(SearchError::Upstream {
            provider: provider.to_string(),
            message: upstream_message(status, &body),
        });
    }

    serde_json::from_str(&body).map_err(|e| SearchError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}

/// Extract an error message from a non-2xx body.
///
/// Understands both `{"error": "msg"}` and `{"error": {"message": "msg"}}`.
#[must_use]
pub fn upstream_message(status: reqwest::StatusCode, body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let message = parsed.as_ref().and_then(|v| {
        let err = v.get("error")?;
        err.as_str()
            .or_else(|| err.get("message").and_then(serde_json::Value::as_str))
            .map(str::to_string)
    });
    match message {
        Some(m) => format!("HTTP {status}: {m}"),
        None => format!("HTTP {status}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_base_url_adds_single_trailing_slash() {
        let url = parse_base_url("https://serpapi.com").unwrap();
        assert_eq!(url.as_str(), "https://serpapi.com/");
        let url = parse_base_url("http://127.0.0.1:9000///").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/");
    }

    #[test]
    fn parse_base_url_rejects_garbage() {
        let err = parse_base_url("not a url").unwrap_err();
        assert!(matches!(err, SearchError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn endpoint_encodes_query_pairs() {
        let base = parse_base_url("https://serpapi.com").unwrap();
        let url = endpoint(&base, "search.json", &[("q", "rust & tokio"), ("num", "5")]).unwrap();
        assert!(url.as_str().starts_with("https://serpapi.com/search.json?"));
        assert!(url.as_str().contains("q=rust+%26+tokio"), "{url}");
        assert!(url.as_str().contains("num=5"));
    }

    #[test]
    fn upstream_message_reads_flat_and_nested_errors() {
        let status = reqwest::StatusCode::UNAUTHORIZED;
        assert_eq!(
            upstream_message(status, r#"{"error":"Invalid API key."}"#),
            "HTTP 401 Unauthorized: Invalid API key."
        );
        assert_eq!(
            upstream_message(status, r#"{"error":{"code":401,"message":"API key not valid"}}"#),
            "HTTP 401 Unauthorized: API key not valid"
        );
        assert_eq!(upstream_message(status, "<html>"), "HTTP 401 Unauthorized");
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let base = parse_base_url("http://localhost:1234/proxy").unwrap();
        let url = endpoint(&base, "youtube/v3/search", &[]).unwrap();
        assert_eq!(url.path(), "/proxy/youtube/v3/search");
    }
}

//! Attempt outcomes and the log lines they produce.

use std::fmt;

use reqwest::{Method, StatusCode};

/// Longest body excerpt carried in a failure line, in characters.
pub const BODY_EXCERPT_LIMIT: usize = 500;

const ELLIPSIS: char = '…';

/// Outcome of one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptResult {
    Success {
        status_code: u16,
        status_text: String,
        elapsed_ms: u64,
    },
    HttpFailure {
        status_code: u16,
        status_text: String,
        elapsed_ms: u64,
        body_excerpt: String,
    },
    Timeout {
        elapsed_ms: u64,
    },
    TransportError {
        message: String,
        elapsed_ms: u64,
    },
}

impl AttemptResult {
    pub fn success(status: StatusCode, elapsed_ms: u64) -> Self {
        Self::Success {
            status_code: status.as_u16(),
            status_text: status_text(status),
            elapsed_ms,
        }
    }

    pub fn http_failure(status: StatusCode, elapsed_ms: u64, body: &str) -> Self {
        Self::HttpFailure {
            status_code: status.as_u16(),
            status_text: status_text(status),
            elapsed_ms,
            body_excerpt: truncate_excerpt(body),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn elapsed_ms(&self) -> u64 {
        match self {
            Self::Success { elapsed_ms, .. }
            | Self::HttpFailure { elapsed_ms, .. }
            | Self::Timeout { elapsed_ms }
            | Self::TransportError { elapsed_ms, .. } => *elapsed_ms,
        }
    }
}

fn status_text(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or_default().to_string()
}

/// Cut `body` to [`BODY_EXCERPT_LIMIT`] characters, marking the cut with `…`.
pub fn truncate_excerpt(body: &str) -> String {
    match body.char_indices().nth(BODY_EXCERPT_LIMIT) {
        Some((cut, _)) => {
            let mut excerpt = String::with_capacity(cut + ELLIPSIS.len_utf8());
            excerpt.push_str(&body[..cut]);
            excerpt.push(ELLIPSIS);
            excerpt
        }
        None => body.to_string(),
    }
}

/// Renders one attempt as a log line.
///
/// `attempt` is `None` when only one attempt is configured, which drops the
/// attempt number from the line.
pub struct AttemptLine<'a> {
    pub attempt: Option<u32>,
    pub method: &'a Method,
    pub url: &'a str,
    pub timeout_ms: u64,
    pub result: &'a AttemptResult,
}

impl fmt::Display for AttemptLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let AttemptResult::Success {
            status_code,
            status_text,
            elapsed_ms,
        } = self.result
        {
            write!(
                f,
                "OK: {} {} -> {} {} in {}ms",
                self.method, self.url, status_code, status_text, elapsed_ms
            )?;
            if let Some(n) = self.attempt {
                write!(f, " (attempt {n})")?;
            }
            return Ok(());
        }

        if let Some(n) = self.attempt {
            write!(f, "Attempt {n}: ")?;
        }

        match self.result {
            AttemptResult::HttpFailure {
                status_code,
                status_text,
                elapsed_ms,
                body_excerpt,
            } => write!(
                f,
                "Request failed: {status_code} {status_text} in {elapsed_ms}ms. Body: {body_excerpt}"
            ),
            AttemptResult::Timeout { .. } => write!(
                f,
                "Timeout after {}ms for {} {}",
                self.timeout_ms, self.method, self.url
            ),
            AttemptResult::TransportError {
                message,
                elapsed_ms,
            } => write!(f, "Error after {elapsed_ms}ms: {message}"),
            AttemptResult::Success { .. } => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(attempt: Option<u32>, result: &AttemptResult) -> String {
        AttemptLine {
            attempt,
            method: &Method::GET,
            url: "http://x/health",
            timeout_ms: 300,
            result,
        }
        .to_string()
    }

    #[test]
    fn test_excerpt_at_limit_passes_through() {
        let body = "a".repeat(BODY_EXCERPT_LIMIT);
        assert_eq!(truncate_excerpt(&body), body);
        assert_eq!(truncate_excerpt(""), "");
    }

    #[test]
    fn test_excerpt_over_limit_is_cut() {
        let body = "b".repeat(BODY_EXCERPT_LIMIT + 1);
        let excerpt = truncate_excerpt(&body);
        assert_eq!(excerpt.chars().count(), BODY_EXCERPT_LIMIT + 1);
        assert!(excerpt.ends_with('…'));
        assert_eq!(&excerpt[..BODY_EXCERPT_LIMIT], &body[..BODY_EXCERPT_LIMIT]);
    }

    #[test]
    fn test_excerpt_counts_characters_not_bytes() {
        let body = "é".repeat(BODY_EXCERPT_LIMIT + 10);
        let excerpt = truncate_excerpt(&body);
        assert_eq!(excerpt.chars().filter(|c| *c == 'é').count(), BODY_EXCERPT_LIMIT);
        assert!(excerpt.ends_with('…'));
    }

    #[test]
    fn test_success_line() {
        let ok = AttemptResult::success(StatusCode::OK, 12);
        assert_eq!(line(Some(2), &ok), "OK: GET http://x/health -> 200 OK in 12ms (attempt 2)");
        assert_eq!(line(None, &ok), "OK: GET http://x/health -> 200 OK in 12ms");
    }

    #[test]
    fn test_failure_lines() {
        let http = AttemptResult::http_failure(StatusCode::SERVICE_UNAVAILABLE, 7, "down");
        assert_eq!(
            line(Some(1), &http),
            "Attempt 1: Request failed: 503 Service Unavailable in 7ms. Body: down"
        );

        let timeout = AttemptResult::Timeout { elapsed_ms: 301 };
        assert_eq!(line(None, &timeout), "Timeout after 300ms for GET http://x/health");

        let err = AttemptResult::TransportError {
            message: "connection refused".into(),
            elapsed_ms: 3,
        };
        assert_eq!(line(Some(3), &err), "Attempt 3: Error after 3ms: connection refused");
        assert!(!err.is_success());
        assert_eq!(err.elapsed_ms(), 3);
    }
}

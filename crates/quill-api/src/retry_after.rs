use chrono::{DateTime, Utc};

/// Parses a `Retry-After` header into milliseconds.
///
/// Accepts both delay-seconds and RFC 2822 date forms. The value only
/// annotates rate-limit errors; nothing in this client retries on its own.
pub fn parse_retry_after_ms(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    let raw = headers.get("retry-after")?.to_str().ok()?.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(seconds) = raw.parse::<u64>() {
        return Some(seconds.saturating_mul(1000));
    }

    let retry_at = DateTime::parse_from_rfc2822(raw).ok()?.with_timezone(&Utc);
    let now = Utc::now();
    let delay_ms = retry_at.signed_duration_since(now).num_milliseconds();
    if delay_ms <= 0 {
        return Some(0);
    }

    u64::try_from(delay_ms).ok()
}

#[cfg(test)]
mod tests {
    use reqwest::header::{HeaderMap, HeaderValue};

    use super::parse_retry_after_ms;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_str(value).expect("header"));
        headers
    }

    #[test]
    fn parses_delay_seconds() {
        assert_eq!(parse_retry_after_ms(&headers_with("2")), Some(2_000));
        assert_eq!(parse_retry_after_ms(&headers_with("0")), Some(0));
    }

    #[test]
    fn missing_or_blank_header_yields_none() {
        assert_eq!(parse_retry_after_ms(&HeaderMap::new()), None);
        assert_eq!(parse_retry_after_ms(&headers_with("  ")), None);
    }

    #[test]
    fn past_http_date_clamps_to_zero() {
        assert_eq!(
            parse_retry_after_ms(&headers_with("Wed, 21 Oct 2015 07:28:00 GMT")),
            Some(0)
        );
    }

    #[test]
    fn unparseable_value_yields_none() {
        assert_eq!(parse_retry_after_ms(&headers_with("soon")), None);
    }
}

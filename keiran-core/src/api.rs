//! API models for the sharing service
//!
//! Request and response bodies exchanged with the server, plus the endpoint
//! paths and multipart field names they travel under.

use serde::{Deserialize, Serialize};

/// Upload endpoint (multipart form).
pub const UPLOAD_PATH: &str = "/upload";

/// Shorten endpoint (JSON body).
pub const SHORTEN_PATH: &str = "/shorten";

/// Stats endpoint, asking for the JSON rendition.
pub const STATS_PATH: &str = "/stats?format=json";

/// Multipart part carrying the file contents.
pub const FILE_FIELD: &str = "file";

/// Multipart scalar field requesting extended retention.
pub const LONG_FIELD: &str = "long";

/// Reply to a successful upload or shorten request.
///
/// Every field is optional on the wire. Missing keys decode to empty
/// strings and empty strings are omitted when serializing, so a field is
/// "present" exactly when it is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerResponse {
    /// Free-form status message from the server
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    /// Short link produced by `/shorten`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub short_url: String,
    /// Stored file name reported by `/upload`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub filename: String,
    /// Identifier of the stored upload
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Public URL of the stored upload
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
}

/// Body of a `/shorten` request.
///
/// `long` is always serialized, `false` included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenRequest {
    /// URL to shorten
    pub url: String,
    /// Keep the short link for an extended period
    pub long: bool,
}

/// Aggregate counters returned by `/stats`.
///
/// Both counters are required; a body missing either one is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Number of files stored
    pub files: u64,
    /// Number of URLs shortened
    pub urls: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_response_all_fields() {
        let response = ServerResponse {
            message: "ok".to_string(),
            short_url: "https://k.cc/ab12".to_string(),
            filename: "report.pdf".to_string(),
            id: "f00d".to_string(),
            url: "https://k.cc/f/report.pdf".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"short_url\":\"https://k.cc/ab12\""));

        let parsed: ServerResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, response);
    }

    #[test]
    fn test_server_response_missing_fields_default_to_empty() {
        let parsed: ServerResponse =
            serde_json::from_str(r#"{"short_url":"https://k.cc/ab12"}"#).unwrap();

        assert_eq!(parsed.short_url, "https://k.cc/ab12");
        assert!(parsed.message.is_empty());
        assert!(parsed.filename.is_empty());
        assert!(parsed.id.is_empty());
        assert!(parsed.url.is_empty());

        let parsed: ServerResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, ServerResponse::default());
    }

    #[test]
    fn test_server_response_ignores_unknown_keys() {
        let parsed: ServerResponse =
            serde_json::from_str(r#"{"url":"https://k.cc/f/x","expires":"2026-11-01"}"#).unwrap();
        assert_eq!(parsed.url, "https://k.cc/f/x");
    }

    #[test]
    fn test_server_response_empty_fields_omitted() {
        let response = ServerResponse {
            url: "https://k.cc/f/x".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"url":"https://k.cc/f/x"}"#);
    }

    #[test]
    fn test_shorten_request_always_carries_long() {
        let request = ShortenRequest {
            url: "https://example.com/x".to_string(),
            long: false,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["url"], "https://example.com/x");
        assert_eq!(value["long"], false);

        let request = ShortenRequest {
            url: "https://example.com/x".to_string(),
            long: true,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["long"], true);
    }

    #[test]
    fn test_stats_response_requires_both_counters() {
        let stats: StatsResponse = serde_json::from_str(r#"{"files":12,"urls":34}"#).unwrap();
        assert_eq!(stats, StatsResponse { files: 12, urls: 34 });

        assert!(serde_json::from_str::<StatsResponse>(r#"{"files":12}"#).is_err());
        assert!(serde_json::from_str::<StatsResponse>(r#"{"files":"many","urls":1}"#).is_err());
    }
}

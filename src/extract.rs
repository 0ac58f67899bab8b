//! Best-effort extraction of facts from wrangler's
//! human-readable output. Wrangler has no stable machine
//! interface for these, so both lookups are heuristic and a
//! miss is never an error here; callers decide what a miss
//! means.

use std::sync::LazyLock;

use regex::Regex;

static VERSION_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Worker Version ID: ([0-9a-f-]+)").expect("version id pattern is valid")
});

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s"]+"#).expect("url pattern is valid"));

/// First version id announced in the captured text, if any.
/// Matches the exact `Worker Version ID: ` label followed by
/// a hex-and-hyphen identifier.
#[must_use]
pub fn version_id(text: &str) -> Option<String> {
    VERSION_ID
        .captures(text)
        .map(|caps| caps[1].to_string())
}

/// First thing that looks like an http(s) URL in the captured
/// text, if any. Stops at whitespace or a double quote.
#[must_use]
pub fn deployment_url(text: &str) -> Option<String> {
    URL.find(text).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_version_id() {
        let out = "Uploaded my-worker\nWorker Version ID: abc123-def\nDone.";

        assert_eq!(version_id(out).as_deref(), Some("abc123-def"));
    }

    #[test]
    fn version_id_takes_first_match() {
        let out = "Worker Version ID: 1a2b3c\nWorker Version ID: 4d5e6f";

        assert_eq!(version_id(out).as_deref(), Some("1a2b3c"));
    }

    #[test]
    fn version_id_label_is_case_sensitive() {
        assert_eq!(version_id("worker version id: abc123"), None);
        assert_eq!(version_id("no id here"), None);
    }

    #[test]
    fn finds_url_inside_quotes() {
        let out = r#"deployed to "https://example.com/x" ok"#;

        assert_eq!(deployment_url(out).as_deref(), Some("https://example.com/x"));
    }

    #[test]
    fn url_stops_at_whitespace() {
        let out = "live at https://my-worker.example.workers.dev and happy";

        assert_eq!(
            deployment_url(out).as_deref(),
            Some("https://my-worker.example.workers.dev")
        );
    }

    #[test]
    fn plain_http_is_accepted() {
        assert_eq!(
            deployment_url("see http://example.com").as_deref(),
            Some("http://example.com")
        );
    }

    #[test]
    fn no_url_yields_none() {
        assert_eq!(deployment_url("nothing resembling a link"), None);
    }
}

//! Export row rendering.

use crate::config::EXPORT_SNIPPET_MAX_CHARS;
use crate::models::Hop;
use crate::storage::StoredResult;
use crate::utils::truncate_chars;

/// Text written for a chain whose stored JSON cannot be read.
pub const CHAIN_PARSE_ERROR: &str = "Parse error";

/// CSV column names, in order.
pub const EXPORT_COLUMNS: [&str; 7] = [
    "domain",
    "status_code",
    "redirect_chain",
    "snippet",
    "error_message",
    "last_checked",
    "scan_duration_ms",
];

/// Renders a stored chain as `"url (status) -> url (status) -> ..."`.
pub fn render_chain(chain_json: Option<&str>) -> String {
    let Some(json) = chain_json.filter(|j| !j.trim().is_empty()) else {
        return String::new();
    };
    match serde_json::from_str::<Vec<Hop>>(json) {
        Ok(hops) => hops
            .iter()
            .map(|hop| format!("{} ({})", hop.url, hop.status_code))
            .collect::<Vec<_>>()
            .join(" -> "),
        Err(_) => CHAIN_PARSE_ERROR.to_string(),
    }
}

/// Cuts a snippet to the export length, marking the cut with `...`.
pub fn truncate_snippet(snippet: &str) -> String {
    let kept = truncate_chars(snippet, EXPORT_SNIPPET_MAX_CHARS);
    if kept.len() < snippet.len() {
        format!("{kept}...")
    } else {
        kept.to_string()
    }
}

/// One flattened export row.
pub fn export_record(row: &StoredResult) -> [String; 7] {
    [
        row.domain.clone(),
        row.status_code.map(|s| s.to_string()).unwrap_or_default(),
        render_chain(row.redirect_chain.as_deref()),
        truncate_snippet(row.snippet.as_deref().unwrap_or_default()),
        row.error_message.clone().unwrap_or_default(),
        row.last_checked.clone().unwrap_or_default(),
        row.scan_duration_ms.map(|ms| ms.to_string()).unwrap_or_default(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_chain() {
        let json = r#"[
            {"url":"https://a.example.com/","status_code":301,"headers":{"location":"/b"}},
            {"url":"https://a.example.com/b","status_code":200}
        ]"#;
        assert_eq!(
            render_chain(Some(json)),
            "https://a.example.com/ (301) -> https://a.example.com/b (200)"
        );
    }

    #[test]
    fn test_render_empty_chain() {
        assert_eq!(render_chain(Some("[]")), "");
        assert_eq!(render_chain(None), "");
        assert_eq!(render_chain(Some("")), "");
    }

    #[test]
    fn test_render_unreadable_chain() {
        assert_eq!(render_chain(Some("{not json")), CHAIN_PARSE_ERROR);
    }

    #[test]
    fn test_truncate_snippet() {
        assert_eq!(truncate_snippet("short"), "short");

        let exact = "x".repeat(EXPORT_SNIPPET_MAX_CHARS);
        assert_eq!(truncate_snippet(&exact), exact);

        let long = "é".repeat(EXPORT_SNIPPET_MAX_CHARS + 1);
        let cut = truncate_snippet(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), EXPORT_SNIPPET_MAX_CHARS + 3);
    }

    #[test]
    fn test_export_record_for_failure() {
        let row = StoredResult {
            domain: "down.example.com".to_string(),
            status_code: None,
            redirect_chain: Some("[]".to_string()),
            snippet: Some(String::new()),
            error_message: Some("DnsError: no such host".to_string()),
            last_checked: Some("2024-01-01 00:00:00".to_string()),
            scan_duration_ms: Some(12),
        };
        let record = export_record(&row);
        assert_eq!(record[0], "down.example.com");
        assert_eq!(record[1], "");
        assert_eq!(record[2], "");
        assert_eq!(record[4], "DnsError: no such host");
        assert_eq!(record[6], "12");
    }
}

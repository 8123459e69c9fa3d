//! Domain list loading and normalization.
//!
//! Input is one domain per line. Blank lines and `#` comments are ignored,
//! and an accidental scheme prefix or trailing slash is removed.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Longest accepted domain (253-character hostname plus a `:port` suffix).
const MAX_DOMAIN_LENGTH: usize = 260;

/// Normalizes one input line into a domain.
///
/// Returns `None` for blank lines, comments, and values that cannot be a
/// hostname.
pub fn normalize_domain(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let lower = trimmed.to_lowercase();
    let without_scheme = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(&lower);
    let domain = without_scheme.trim_end_matches('/');

    if domain.is_empty() {
        return None;
    }
    if domain.len() > MAX_DOMAIN_LENGTH {
        warn!(
            "Skipping domain exceeding maximum length ({} > {MAX_DOMAIN_LENGTH}): {}...",
            domain.len(),
            domain.chars().take(50).collect::<String>()
        );
        return None;
    }
    if domain.chars().any(char::is_whitespace) {
        warn!("Skipping invalid domain: {trimmed}");
        return None;
    }
    Some(domain.to_string())
}

/// Reads domains from `reader`, normalized and deduplicated in first-seen
/// order.
pub async fn parse_domains<R>(reader: R) -> Result<Vec<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut seen = HashSet::new();
    let mut domains = Vec::new();
    let mut duplicates = 0usize;

    while let Some(line) = lines.next_line().await.context("Failed to read input line")? {
        let Some(domain) = normalize_domain(&line) else {
            continue;
        };
        if seen.insert(domain.clone()) {
            domains.push(domain);
        } else {
            duplicates += 1;
        }
    }

    if duplicates > 0 {
        info!("Ignored {duplicates} duplicate domains");
    }
    Ok(domains)
}

/// Loads domains from a file, or from stdin when `path` is `-`.
///
/// # Errors
///
/// Returns an error if the input cannot be opened or read.
pub async fn load_domains(path: &Path) -> Result<Vec<String>> {
    if path.as_os_str() == "-" {
        info!("Reading domains from stdin");
        return parse_domains(BufReader::new(tokio::io::stdin())).await;
    }
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;
    parse_domains(BufReader::new(file)).await
}

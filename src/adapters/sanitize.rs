//! Log sanitization for health answers and identifiers.
//!
//! Formatted log lines pass through [`SanitizingMakeWriter`], which redacts:
//! - `field=value` / `field: value` pairs for every intake field and feature
//!   column (e.g. `cholesterol_ldl=160`)
//! - UUIDs (verdict identifiers)
//! - email addresses and phone numbers
//!
//! Call sites should never log answers in the first place. This is the
//! fallback when one slips through a `Debug` impl or an error message.
//!
//! Input is capped per call (see `CARDIORISK_SANITIZE_MAX_BYTES`).

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

use crate::domain::{FieldId, FEATURE_NAMES};

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

/// Default per-call cap: 16 KiB.
const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

pub const SANITIZE_MAX_BYTES_ENV: &str = "CARDIORISK_SANITIZE_MAX_BYTES";

struct Pattern {
    regex: Regex,
    replacement: String,
}

struct Patterns {
    set: RegexSet,
    rules: Vec<Pattern>,
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }

    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

fn max_sanitize_bytes() -> usize {
    std::env::var(SANITIZE_MAX_BYTES_ENV)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

/// Alternation of every field key and feature column name.
fn health_keys() -> String {
    let mut keys: Vec<&str> = FieldId::ALL.iter().map(|id| id.key()).collect();
    keys.extend(FEATURE_NAMES.iter().copied());
    keys.sort_unstable_by_key(|k| std::cmp::Reverse(k.len()));
    keys.dedup();
    keys.iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|")
}

fn get_patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| {
        let rules: Vec<(String, String)> = vec![
            (
                format!(r#"\b({})\b(["']?\s*[:=]\s*)"?[^\s,;)}}"]+"?"#, health_keys()),
                "$1$2[REDACTED]".to_string(),
            ),
            (
                r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}"
                    .to_string(),
                "[REDACTED-UUID]".to_string(),
            ),
            (
                r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b"
                    .to_string(),
                "[REDACTED-EMAIL]".to_string(),
            ),
            (
                r"(?:\+62|\b0)8[0-9]{2}[-.\s]?[0-9]{3,4}[-.\s]?[0-9]{3,5}\b".to_string(),
                "[REDACTED-PHONE]".to_string(),
            ),
        ];

        let set = RegexSet::new(rules.iter().map(|(p, _)| p)).expect("Valid regex set");
        let rules = rules
            .into_iter()
            .map(|(pattern, replacement)| Pattern {
                regex: Regex::new(&pattern).expect("Valid regex"),
                replacement,
            })
            .collect();

        Patterns { set, rules }
    })
}

/// Redact health answers and identifiers from `input`.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let patterns = get_patterns();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut result = prefix.to_string();
    for idx in patterns.set.matches(prefix).into_iter() {
        let rule = &patterns.rules[idx];
        result = rule
            .regex
            .replace_all(&result, rule.replacement.as_str())
            .into_owned();
    }

    if truncated {
        result.push_str(" [TRUNCATED]");
    }
    result
}

/// `MakeWriter` wrapper that sanitizes each formatted log line.
#[derive(Debug)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M: Clone> Clone for SanitizingMakeWriter<M> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Line-buffering writer produced by [`SanitizingMakeWriter`].
pub struct SanitizingWriter<W> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W> SanitizingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let sanitized = sanitize(&String::from_utf8_lossy(&line));
            self.inner.write_all(sanitized.as_bytes())?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // A single line larger than twice the cap is flushed as-is (sanitized, truncated).
        let hard_cap = max_sanitize_bytes().saturating_mul(2);
        if self.buffer.len() > hard_cap {
            let sanitized = sanitize(&String::from_utf8_lossy(&self.buffer));
            self.inner.write_all(sanitized.as_bytes())?;
            self.inner.write_all(b"\n")?;
            self.buffer.clear();
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;
        if !self.buffer.is_empty() {
            let sanitized = sanitize(&String::from_utf8_lossy(&self.buffer));
            self.inner.write_all(sanitized.as_bytes())?;
            self.buffer.clear();
        }
        self.inner.flush()
    }
}

impl<W> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        zeroize::Zeroize::zeroize(&mut self.buffer);
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter::new(self.inner.make_writer())
    }
}

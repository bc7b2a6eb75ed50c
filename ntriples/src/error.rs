use thiserror::Error;

/// Reserved for strict-mode parsing. The default [`crate::parse`] never
/// returns this — malformed lines are silently skipped instead.
#[derive(Debug, Error)]
#[error("malformed N-Triples line {line_number}: {line}")]
pub struct MalformedWireForm {
    pub line_number: usize,
    pub line: String,
}

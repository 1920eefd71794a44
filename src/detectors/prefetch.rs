//! Prefetch and preview detector.
//!
//! Browsers mark speculative loads with dedicated headers; see
//! <https://developer.mozilla.org/en-US/docs/Web/HTTP/Link_prefetching_FAQ>.

use super::{Detector, RequestContext};
use crate::verdict::Reason;

/// Header name/value pairs marking a prefetch. Values match case-sensitively.
pub const PREFETCH_HEADERS: [(&str, &str); 5] = [
    ("X-Moz", "prefetch"),
    ("X-Purpose", "prefetch"),
    ("Purpose", "prefetch"),
    ("X-Purpose", "preview"),
    ("Purpose", "preview"),
];

/// Prefetch header detector.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefetchDetector;

impl PrefetchDetector {
    pub fn new() -> Self {
        Self
    }

    /// Returns true if any prefetch marker is present.
    pub fn is_prefetch(&self, ctx: &RequestContext<'_>) -> bool {
        PREFETCH_HEADERS
            .iter()
            .any(|(name, value)| ctx.header_values(name).any(|v| v == *value))
    }
}

impl Detector for PrefetchDetector {
    fn detect(&self, ctx: &RequestContext<'_>) -> Option<Reason> {
        self.is_prefetch(ctx).then_some(Reason::Prefetch)
    }

    fn name(&self) -> &'static str {
        "prefetch"
    }
}

//! Bot detection modules.
//!
//! Each detector looks at one aspect of the request and either decides the
//! verdict or abstains.

pub mod ip_range;
pub mod prefetch;
pub mod user_agent;

pub use ip_range::{IpRangeDetector, IpRangeTable};
pub use prefetch::PrefetchDetector;
pub use user_agent::{UserAgentDetector, UserAgentRule};

use crate::verdict::Reason;
use std::collections::HashMap;

/// The parts of a request the detectors look at.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    /// Request headers; names are matched case-insensitively
    pub headers: &'a HashMap<String, Vec<String>>,
    /// Remote address as seen by the server, possibly empty
    pub remote_addr: &'a str,
    /// User-Agent header value, possibly empty
    pub user_agent: &'a str,
}

impl<'a> RequestContext<'a> {
    pub fn new(
        headers: &'a HashMap<String, Vec<String>>,
        remote_addr: &'a str,
        user_agent: &'a str,
    ) -> Self {
        Self {
            headers,
            remote_addr,
            user_agent,
        }
    }

    /// All values sent for a header, whatever the case of its name.
    pub fn header_values<'n>(&self, name: &'n str) -> impl Iterator<Item = &'a str> + 'n
    where
        'a: 'n,
    {
        let headers = self.headers;
        headers
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .flat_map(|(_, values)| values.iter().map(String::as_str))
    }

    /// Get a single header value (first if multiple).
    pub fn header(&self, name: &str) -> Option<&'a str> {
        self.header_values(name).next()
    }
}

/// Trait for bot detectors.
pub trait Detector: Send + Sync {
    /// Decide the verdict for this request, or `None` to abstain.
    fn detect(&self, ctx: &RequestContext<'_>) -> Option<Reason>;

    /// Get the detector name.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_ignores_case() {
        let mut headers = HashMap::new();
        headers.insert("X-Purpose".to_string(), vec!["preview".to_string()]);
        let ctx = RequestContext::new(&headers, "", "");

        assert_eq!(ctx.header("x-purpose"), Some("preview"));
        assert_eq!(ctx.header("X-PURPOSE"), Some("preview"));
        assert_eq!(ctx.header("purpose"), None);
    }

    #[test]
    fn test_header_values_spans_spellings() {
        let mut headers = HashMap::new();
        headers.insert("purpose".to_string(), vec!["a".to_string()]);
        headers.insert("Purpose".to_string(), vec!["b".to_string(), "c".to_string()]);
        let ctx = RequestContext::new(&headers, "", "");

        let mut values: Vec<&str> = ctx.header_values("PURPOSE").collect();
        values.sort_unstable();
        assert_eq!(values, vec!["a", "b", "c"]);
    }
}

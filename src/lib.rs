//! Bot detection for HTTP requests.
//!
//! A "bot" is any request that isn't a regular browser request initiated by
//! a person. This includes crawlers, but also link preview renderers,
//! monitoring agents and HTTP client libraries.
//!
//! Every classification returns a [`Reason`] naming the rule that fired,
//! rather than a bare boolean.
//!
//! # Signals
//!
//! Checked in this order; the first with an opinion wins:
//!
//! - Prefetch and preview headers
//! - Infrastructure provider IP ranges (cloud compute, hosting)
//! - User-Agent heuristics
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//!
//! let headers = HashMap::new();
//! let reason = isbot::classify_request(
//!     &headers,
//!     "35.180.1.1",
//!     "Mozilla/5.0 (X11; Linux x86_64; rv:71.0) Gecko/20100101 Firefox/71.0",
//! );
//! assert_eq!(reason, isbot::Reason::RangeAws);
//! assert!(isbot::is_bot(reason));
//! ```
//!
//! The remote address is used as given; resolving `X-Forwarded-For` or
//! similar headers is left to the caller.

pub mod classifier;
pub mod config;
pub mod detectors;
pub mod error;
pub mod ranges;
pub mod rules;
pub mod verdict;

pub use classifier::Classifier;
pub use config::ClassifierConfig;
pub use detectors::RequestContext;
pub use error::{Error, Result};
pub use verdict::{is_bot, is_not_bot, is_user_agent_bot, ExternalSignal, Reason, Verdict};

use std::collections::HashMap;

/// Classify a request with the shared default classifier.
pub fn classify_request(
    headers: &HashMap<String, Vec<String>>,
    remote_addr: &str,
    user_agent: &str,
) -> Reason {
    Classifier::global().classify_request(headers, remote_addr, user_agent)
}

/// Check if this User-Agent looks like a bot.
pub fn classify_user_agent(user_agent: &str) -> Reason {
    Classifier::global().classify_user_agent(user_agent)
}

/// Check if this address belongs to an infrastructure provider that should
/// normally never send browser requests.
pub fn classify_ip(addr: &str) -> Reason {
    Classifier::global().classify_ip(addr)
}

/// Check for prefetch or preview headers.
pub fn is_prefetch(headers: &HashMap<String, Vec<String>>) -> bool {
    Classifier::global().is_prefetch(headers)
}

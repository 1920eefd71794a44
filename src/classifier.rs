//! Request classifier combining the detectors.

use crate::config::ClassifierConfig;
use crate::detectors::{
    Detector, IpRangeDetector, IpRangeTable, PrefetchDetector, RequestContext, UserAgentDetector,
};
use crate::error::Result;
use crate::rules::RuleTable;
use crate::verdict::Reason;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, trace};

static GLOBAL: LazyLock<Classifier> = LazyLock::new(Classifier::default);

/// Classifies requests as browser traffic or bots.
///
/// Detectors run in a fixed order and the first one with an opinion decides:
/// prefetch headers, then infrastructure IP ranges, then the User-Agent.
#[derive(Debug, Clone)]
pub struct Classifier {
    /// Configuration
    config: ClassifierConfig,
    /// Prefetch header detector
    prefetch: PrefetchDetector,
    /// IP range detector
    ip_range: IpRangeDetector,
    /// User-Agent detector
    user_agent: UserAgentDetector,
}

impl Classifier {
    /// Create a classifier over the built-in tables.
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        Self::with_tables(config, RuleTable::builtin(), IpRangeTable::builtin())
    }

    /// Create a classifier over caller-supplied tables.
    pub fn with_tables(
        config: ClassifierConfig,
        rules: &'static RuleTable,
        ranges: Arc<IpRangeTable>,
    ) -> Result<Self> {
        config.validate()?;

        info!(
            prefetch = config.detection.prefetch,
            ip_ranges = config.detection.ip_ranges,
            user_agent = config.detection.user_agent,
            ip_networks = ranges.len(),
            min_user_agent_length = config.user_agent.min_length,
            "Classifier initialised"
        );

        Ok(Self {
            prefetch: PrefetchDetector::new(),
            ip_range: IpRangeDetector::with_table(ranges),
            user_agent: UserAgentDetector::with_rules(rules, config.user_agent.min_length),
            config,
        })
    }

    /// The shared classifier with default configuration.
    pub fn global() -> &'static Classifier {
        &GLOBAL
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Enabled detectors in precedence order.
    fn cascade(&self) -> impl Iterator<Item = &dyn Detector> {
        let detection = &self.config.detection;
        [
            (detection.prefetch, &self.prefetch as &dyn Detector),
            (detection.ip_ranges, &self.ip_range as &dyn Detector),
            (detection.user_agent, &self.user_agent as &dyn Detector),
        ]
        .into_iter()
        .filter_map(|(enabled, detector)| enabled.then_some(detector))
    }

    /// Classify a request.
    pub fn classify(&self, ctx: &RequestContext<'_>) -> Reason {
        for detector in self.cascade() {
            match detector.detect(ctx) {
                Some(reason) => {
                    debug!(
                        detector = detector.name(),
                        reason = reason.as_str(),
                        code = reason.code(),
                        "Detector decided verdict"
                    );
                    return reason;
                }
                None => trace!(detector = detector.name(), "Detector abstained"),
            }
        }
        Reason::NotBotNoMatch
    }

    /// Classify a request from its parts.
    pub fn classify_request(
        &self,
        headers: &HashMap<String, Vec<String>>,
        remote_addr: &str,
        user_agent: &str,
    ) -> Reason {
        self.classify(&RequestContext::new(headers, remote_addr, user_agent))
    }

    /// Run only the User-Agent rules.
    pub fn classify_user_agent(&self, user_agent: &str) -> Reason {
        self.user_agent.classify(user_agent)
    }

    /// Run only the IP range lookup.
    pub fn classify_ip(&self, addr: &str) -> Reason {
        self.ip_range.classify(addr)
    }

    /// Run only the prefetch header check.
    pub fn is_prefetch(&self, headers: &HashMap<String, Vec<String>>) -> bool {
        self.prefetch
            .is_prefetch(&RequestContext::new(headers, "", ""))
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            config: ClassifierConfig::default(),
            prefetch: PrefetchDetector::new(),
            ip_range: IpRangeDetector::new(),
            user_agent: UserAgentDetector::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIREFOX: &str =
        "Mozilla/5.0 (X11; Linux x86_64; rv:75.0) Gecko/20100101 Firefox/75.0";

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        let mut h = HashMap::new();
        for (k, v) in pairs {
            h.entry(k.to_string())
                .or_insert_with(Vec::new)
                .push(v.to_string());
        }
        h
    }

    #[test]
    fn test_prefetch_overrides_everything() {
        let c = Classifier::default();
        let h = headers(&[("Purpose", "preview")]);
        assert_eq!(c.classify_request(&h, "35.180.1.1", "curl/7.35.0"), Reason::Prefetch);
        assert_eq!(c.classify_request(&h, "", FIREFOX), Reason::Prefetch);
    }

    #[test]
    fn test_ip_range_overrides_user_agent() {
        let c = Classifier::default();
        let h = headers(&[]);
        assert_eq!(c.classify_request(&h, "35.180.1.1", FIREFOX), Reason::RangeAws);
        assert_eq!(c.classify_request(&h, "35.180.1.1", ""), Reason::RangeAws);
    }

    #[test]
    fn test_user_agent_result_returned_as_is() {
        let c = Classifier::default();
        let h = headers(&[]);
        assert_eq!(c.classify_request(&h, "8.8.8.8", FIREFOX), Reason::NotBotNoMatch);
        assert_eq!(c.classify_request(&h, "8.8.8.8", ""), Reason::Short);
        assert_eq!(
            c.classify_request(&h, "", "Mozilla/5.0 (Linux; Android 9; CUBOT_X19) Chrome/80"),
            Reason::NotBotKnown
        );
    }

    #[test]
    fn test_disabled_detectors_are_skipped() {
        let mut config = ClassifierConfig::default();
        config.detection.prefetch = false;
        config.detection.ip_ranges = false;
        let c = Classifier::new(config).unwrap();
        let h = headers(&[("X-Moz", "prefetch")]);
        assert_eq!(c.classify_request(&h, "35.180.1.1", FIREFOX), Reason::NotBotNoMatch);
        assert_eq!(c.classify_request(&h, "35.180.1.1", ""), Reason::Short);
    }

    #[test]
    fn test_everything_disabled() {
        let mut config = ClassifierConfig::default();
        config.detection.user_agent = false;
        config.detection.ip_ranges = false;
        config.detection.prefetch = false;
        let c = Classifier::new(config).unwrap();
        assert_eq!(c.classify_request(&headers(&[]), "35.180.1.1", ""), Reason::NotBotNoMatch);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ClassifierConfig::default();
        config.user_agent.min_length = 0;
        assert!(Classifier::new(config).is_err());
    }

    #[test]
    fn test_min_length_from_config() {
        let mut config = ClassifierConfig::default();
        config.user_agent.min_length = 100;
        let c = Classifier::new(config).unwrap();
        assert_eq!(c.classify_user_agent(FIREFOX), Reason::Short);
    }

    #[test]
    fn test_classifier_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Classifier>();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(|| Classifier::global().classify_ip("35.180.1.1"))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Reason::RangeAws);
        }
    }
}

//! Verdict codes and the predicates over them.
//!
//! Every verdict is a stable `u8` code. Consumers persist and log the raw
//! value, so codes are never renumbered; new categories are appended.
//!
//! - `0..=1`: not a bot ([`Reason::NotBotKnown`], [`Reason::NotBotNoMatch`])
//! - `2..=149`: bot categories produced by the engine ([`Reason`])
//! - `150..`: signals reported by client-side scripts ([`ExternalSignal`])

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason codes produced by the classification engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum Reason {
    /// Known to not be a bot (allow-listed browser signature).
    NotBotKnown = 0,
    /// None of the rules matched, so probably not a bot.
    NotBotNoMatch = 1,
    /// Prefetch or preview request.
    Prefetch = 2,
    /// User-Agent contains a URL.
    Link = 3,
    /// Known HTTP client library.
    ClientLibrary = 4,
    /// Known crawler, monitor or scanner.
    KnownBot = 5,
    /// User-Agent contains a "boty" keyword.
    Boty = 6,
    /// User-Agent is short or strangely formatted.
    Short = 7,
    /// Amazon Web Services.
    RangeAws = 8,
    /// DigitalOcean.
    RangeDigitalOcean = 9,
    /// Servers.com.
    RangeServersCom = 10,
    /// Hetzner.
    RangeHetzner = 11,
    /// Google Cloud.
    RangeGoogleCloud = 12,
}

impl Reason {
    /// All engine codes in ascending order.
    pub const ALL: [Reason; 13] = [
        Reason::NotBotKnown,
        Reason::NotBotNoMatch,
        Reason::Prefetch,
        Reason::Link,
        Reason::ClientLibrary,
        Reason::KnownBot,
        Reason::Boty,
        Reason::Short,
        Reason::RangeAws,
        Reason::RangeDigitalOcean,
        Reason::RangeServersCom,
        Reason::RangeHetzner,
        Reason::RangeGoogleCloud,
    ];

    /// The raw code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns true unless this is one of the two not-a-bot codes.
    pub const fn is_bot(self) -> bool {
        !matches!(self, Reason::NotBotKnown | Reason::NotBotNoMatch)
    }

    /// Returns true for the categories decided by the User-Agent detector.
    pub const fn is_user_agent_bot(self) -> bool {
        matches!(
            self,
            Reason::Link | Reason::ClientLibrary | Reason::KnownBot | Reason::Boty | Reason::Short
        )
    }

    /// Returns true for the infrastructure provider range categories.
    pub const fn is_ip_range(self) -> bool {
        matches!(
            self,
            Reason::RangeAws
                | Reason::RangeDigitalOcean
                | Reason::RangeServersCom
                | Reason::RangeHetzner
                | Reason::RangeGoogleCloud
        )
    }

    /// Returns the reason as a string for logs and headers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::NotBotKnown => "not_bot_known",
            Reason::NotBotNoMatch => "not_bot_no_match",
            Reason::Prefetch => "prefetch",
            Reason::Link => "link",
            Reason::ClientLibrary => "client_library",
            Reason::KnownBot => "known_bot",
            Reason::Boty => "boty",
            Reason::Short => "short",
            Reason::RangeAws => "range_aws",
            Reason::RangeDigitalOcean => "range_digital_ocean",
            Reason::RangeServersCom => "range_servers_com",
            Reason::RangeHetzner => "range_hetzner",
            Reason::RangeGoogleCloud => "range_google_cloud",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Reason> for u8 {
    fn from(reason: Reason) -> u8 {
        reason.code()
    }
}

impl TryFrom<u8> for Reason {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Reason::ALL
            .get(usize::from(code))
            .copied()
            .ok_or(Error::UnknownCode(code))
    }
}

/// Signals never set by the engine, reserved for client-side script results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum ExternalSignal {
    JsPhantom = 150,
    JsNightmare = 151,
    JsSelenium = 152,
    JsWebDriver = 153,
}

impl ExternalSignal {
    /// First code of the reserved band.
    pub const FIRST_CODE: u8 = 150;

    pub const ALL: [ExternalSignal; 4] = [
        ExternalSignal::JsPhantom,
        ExternalSignal::JsNightmare,
        ExternalSignal::JsSelenium,
        ExternalSignal::JsWebDriver,
    ];

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExternalSignal::JsPhantom => "js_phantom",
            ExternalSignal::JsNightmare => "js_nightmare",
            ExternalSignal::JsSelenium => "js_selenium",
            ExternalSignal::JsWebDriver => "js_web_driver",
        }
    }
}

impl fmt::Display for ExternalSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ExternalSignal> for u8 {
    fn from(signal: ExternalSignal) -> u8 {
        signal.code()
    }
}

impl TryFrom<u8> for ExternalSignal {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        code.checked_sub(Self::FIRST_CODE)
            .and_then(|offset| Self::ALL.get(usize::from(offset)))
            .copied()
            .ok_or(Error::UnknownCode(code))
    }
}

/// Any verdict code: either produced by the engine or attached downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Verdict {
    Engine(Reason),
    External(ExternalSignal),
}

impl Verdict {
    pub const fn code(self) -> u8 {
        match self {
            Verdict::Engine(reason) => reason.code(),
            Verdict::External(signal) => signal.code(),
        }
    }

    /// Returns true for everything outside the not-a-bot band, external
    /// signals included.
    pub const fn is_bot(self) -> bool {
        match self {
            Verdict::Engine(reason) => reason.is_bot(),
            Verdict::External(_) => true,
        }
    }

    pub const fn is_not_bot(self) -> bool {
        !self.is_bot()
    }

    pub const fn is_user_agent_bot(self) -> bool {
        match self {
            Verdict::Engine(reason) => reason.is_user_agent_bot(),
            Verdict::External(_) => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Engine(reason) => reason.as_str(),
            Verdict::External(signal) => signal.as_str(),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Reason> for Verdict {
    fn from(reason: Reason) -> Self {
        Verdict::Engine(reason)
    }
}

impl From<ExternalSignal> for Verdict {
    fn from(signal: ExternalSignal) -> Self {
        Verdict::External(signal)
    }
}

impl From<Verdict> for u8 {
    fn from(verdict: Verdict) -> u8 {
        verdict.code()
    }
}

impl TryFrom<u8> for Verdict {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        if code >= ExternalSignal::FIRST_CODE {
            ExternalSignal::try_from(code).map(Verdict::External)
        } else {
            Reason::try_from(code).map(Verdict::Engine)
        }
    }
}

/// Is this verdict a bot?
pub fn is_bot(verdict: impl Into<Verdict>) -> bool {
    verdict.into().is_bot()
}

/// Is this verdict not a bot?
pub fn is_not_bot(verdict: impl Into<Verdict>) -> bool {
    verdict.into().is_not_bot()
}

/// Was this verdict decided by the User-Agent rules?
pub fn is_user_agent_bot(verdict: impl Into<Verdict>) -> bool {
    verdict.into().is_user_agent_bot()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_verdicts() -> Vec<Verdict> {
        Reason::ALL
            .iter()
            .copied()
            .map(Verdict::from)
            .chain(ExternalSignal::ALL.iter().copied().map(Verdict::from))
            .collect()
    }

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(Reason::NotBotKnown.code(), 0);
        assert_eq!(Reason::NotBotNoMatch.code(), 1);
        assert_eq!(Reason::Prefetch.code(), 2);
        assert_eq!(Reason::Short.code(), 7);
        assert_eq!(Reason::RangeAws.code(), 8);
        assert_eq!(Reason::RangeGoogleCloud.code(), 12);
        assert_eq!(ExternalSignal::JsPhantom.code(), 150);
        assert_eq!(ExternalSignal::JsWebDriver.code(), 153);
    }

    #[test]
    fn test_all_is_in_code_order() {
        for (i, reason) in Reason::ALL.iter().enumerate() {
            assert_eq!(usize::from(reason.code()), i);
        }
        for (i, signal) in ExternalSignal::ALL.iter().enumerate() {
            assert_eq!(usize::from(signal.code()), 150 + i);
        }
    }

    #[test]
    fn test_not_bot_band_is_two_lowest() {
        for verdict in all_verdicts() {
            assert_eq!(verdict.is_bot(), verdict.code() > 1, "{verdict}");
            assert_eq!(is_bot(verdict), !is_not_bot(verdict));
        }
    }

    #[test]
    fn test_user_agent_bot() {
        let ua: Vec<Reason> = Reason::ALL
            .iter()
            .copied()
            .filter(|r| r.is_user_agent_bot())
            .collect();
        assert_eq!(
            ua,
            vec![
                Reason::Link,
                Reason::ClientLibrary,
                Reason::KnownBot,
                Reason::Boty,
                Reason::Short
            ]
        );
        assert!(!is_user_agent_bot(Reason::Prefetch));
        assert!(!is_user_agent_bot(Reason::RangeAws));
        assert!(!is_user_agent_bot(ExternalSignal::JsSelenium));
    }

    #[test]
    fn test_range_reasons_are_bots() {
        for reason in Reason::ALL.iter().filter(|r| r.is_ip_range()) {
            assert!(reason.is_bot());
            assert!(!reason.is_user_agent_bot());
        }
    }

    #[test]
    fn test_unknown_codes_rejected() {
        assert!(matches!(Verdict::try_from(13), Err(Error::UnknownCode(13))));
        assert!(matches!(Verdict::try_from(149), Err(Error::UnknownCode(149))));
        assert!(matches!(Verdict::try_from(154), Err(Error::UnknownCode(154))));
        assert!(Reason::try_from(150).is_err());
        assert!(ExternalSignal::try_from(0).is_err());
    }

    #[test]
    fn test_external_signal_round_trip() {
        for signal in ExternalSignal::ALL {
            let verdict = Verdict::try_from(signal.code()).unwrap();
            assert_eq!(verdict, Verdict::External(signal));
            assert_eq!(u8::from(verdict), signal.code());
            assert!(is_bot(verdict));
        }
    }

    #[test]
    fn test_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Reason::RangeAws).unwrap(), "8");
        assert_eq!(
            serde_json::to_string(&Verdict::External(ExternalSignal::JsSelenium)).unwrap(),
            "152"
        );
        let parsed: Verdict = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, Verdict::Engine(Reason::Link));
        assert!(serde_json::from_str::<Verdict>("99").is_err());
    }

    #[test]
    fn test_as_str_is_unique() {
        let mut names: Vec<&str> = all_verdicts().iter().map(|v| v.as_str()).collect();
        let len = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), len);
        assert_eq!(Reason::RangeDigitalOcean.to_string(), "range_digital_ocean");
    }
}

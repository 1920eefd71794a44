//! Word lists for the User-Agent rules.

/// The substring lists consulted by the User-Agent detector.
///
/// All matching is case-sensitive except `boty_keywords`, which are compared
/// against a lower-cased User-Agent and so must be lower case themselves.
#[derive(Debug, Clone, Copy)]
pub struct RuleTable {
    /// Browsers that would otherwise trip one of the later rules
    pub known_browsers: &'static [&'static str],
    /// HTTP client libraries and runtime default User-Agents
    pub client_libraries: &'static [&'static str],
    /// Named crawlers, monitors, scanners and renderers
    pub known_bots: &'static [&'static str],
    /// Lower-case words associated with automated agents
    pub boty_keywords: &'static [&'static str],
}

impl RuleTable {
    /// The compiled-in rule table.
    pub fn builtin() -> &'static RuleTable {
        &BUILTIN
    }

    /// Iterate every entry of every list, tagged with the list name.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        [
            ("known_browsers", self.known_browsers),
            ("client_libraries", self.client_libraries),
            ("known_bots", self.known_bots),
            ("boty_keywords", self.boty_keywords),
        ]
        .into_iter()
        .flat_map(|(list, words)| words.iter().map(move |word| (list, *word)))
    }
}

static BUILTIN: RuleTable = RuleTable {
    known_browsers: KNOWN_BROWSERS,
    client_libraries: CLIENT_LIBRARIES,
    known_bots: KNOWN_BOTS,
    boty_keywords: BOTY_KEYWORDS,
};

const KNOWN_BROWSERS: &[&str] = &[
    // Cubot phone models, e.g. "CUBOT_X19" or "CUBOT KING KONG".
    "CUBOT_",
    "CUBOT ",
    "StudoBrowser/",
];

const CLIENT_LIBRARIES: &[&str] = &[
    "Go-http-client/",
    "HttpClient/",
    "HTTPClient/",
    "Java/",
    "PycURL/",
    "Python-urllib/",
    "Robosourcer/",
    "Ruby",
    "Wget/",
    "WinHttp.WinHttpRequest.5",
    "curl/",
    "python-requests/",
    "libwww-perl/",
];

const KNOWN_BOTS: &[&str] = &[
    "ADmantX",
    "AlexaToolbar/",
    "BingPreview/",
    "Chrome-Lighthouse",
    "DumpRenderTree/",
    "Faraday v",
    "GigablastOpenSource/",
    "Google Web Preview",
    "Google favicon",
    "Google-Ad",
    "Google-Site-Verification",
    "GoogleSecurityScanner",
    "Google_Analytics_Snippet_Validator",
    "HeadlessChrome/",
    "Netcraft Web Server Survey",
    "NetcraftSurveyAgent/",
    "Owler/",
    "PageAnalyzer/",
    "ScopeContentAG-HTTP-Client",
    "Survey/",
    "Synapse",
    "Wappalyzer",
    "WhatWeb/",
    "WinInet",
    "WordPress.com",
    // Burp security analyzer.
    "burpcollaborator.net/",
    "okhttp/",
    "panscient.com",
    "tracemyfile/",
    "wsr-agent/",
    // Dynatrace.
    "RuxitRecorder/",
    "RuxitSynthetic/",
    "TrendsmapResolver/",
    "ubermetrics-technologies.com",
    "zgrab/",
    "nbertaupete95(at)gmail.com",
    "Dataprovider.com",
    "wkhtmltoimage",
    "wkhtmltopdf",
    "SlimerJS",
];

const BOTY_KEYWORDS: &[&str] = &["bot", "crawler", "spider", "search", "worm", "fetch", "nutch"];

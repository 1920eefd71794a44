//! Infrastructure IP range detector.
//!
//! Flags requests from address space that should normally never send
//! browser traffic, such as cloud compute and hosting providers.

use super::{Detector, RequestContext};
use crate::error::{Error, Result};
use crate::ranges::{ProviderRanges, PROVIDERS};
use crate::verdict::Reason;
use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, LazyLock};
use tracing::info;

static BUILTIN: LazyLock<Arc<IpRangeTable>> = LazyLock::new(|| {
    let table = IpRangeTable::from_providers(PROVIDERS)
        .unwrap_or_else(|e| panic!("built-in IP range table is malformed: {e}"));
    info!(
        ipv4_networks = table.v4.len(),
        ipv6_networks = table.v6.len(),
        "Loaded built-in IP range table"
    );
    Arc::new(table)
});

/// Provider networks, split by address family, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct IpRangeTable {
    v4: Vec<(Ipv4Net, Reason)>,
    v6: Vec<(Ipv6Net, Reason)>,
}

impl IpRangeTable {
    /// Parse every provider's CIDR blocks.
    ///
    /// Fails on the first malformed block or on a provider tagged with a
    /// reason that is not an IP range category.
    pub fn from_providers(providers: &[ProviderRanges]) -> Result<Self> {
        let mut table = Self::default();
        for provider in providers {
            if !provider.reason.is_ip_range() {
                return Err(Error::NotARangeReason(provider.reason));
            }
            for cidr in provider.cidrs {
                let net: IpNet = cidr.parse().map_err(|source| Error::InvalidCidr {
                    provider: provider.reason,
                    cidr: cidr.to_string(),
                    source,
                })?;
                match net.trunc() {
                    IpNet::V4(net) => table.v4.push((net, provider.reason)),
                    IpNet::V6(net) => table.v6.push((net, provider.reason)),
                }
            }
        }
        Ok(table)
    }

    /// The compiled-in provider table, parsed on first use.
    ///
    /// # Panics
    ///
    /// Panics if the compiled-in data contains a malformed CIDR block.
    pub fn builtin() -> Arc<IpRangeTable> {
        Arc::clone(&BUILTIN)
    }

    /// Find the provider owning this address.
    pub fn lookup(&self, ip: IpAddr) -> Option<Reason> {
        match ip.to_canonical() {
            IpAddr::V4(ip) => self
                .v4
                .iter()
                .find(|(net, _)| net.contains(&ip))
                .map(|(_, reason)| *reason),
            IpAddr::V6(ip) => self
                .v6
                .iter()
                .find(|(net, _)| net.contains(&ip))
                .map(|(_, reason)| *reason),
        }
    }

    /// Classify a textual address; unparsable input is not a match.
    pub fn classify(&self, addr: &str) -> Reason {
        parse_addr(addr)
            .and_then(|ip| self.lookup(ip))
            .unwrap_or(Reason::NotBotNoMatch)
    }

    /// Number of networks across both address families.
    pub fn len(&self) -> usize {
        self.v4.len() + self.v6.len()
    }

    pub fn is_empty(&self) -> bool {
        self.v4.is_empty() && self.v6.is_empty()
    }
}

/// Parse a bare address, or the host part of a `host:port` socket address.
fn parse_addr(addr: &str) -> Option<IpAddr> {
    if addr.is_empty() {
        return None;
    }
    addr.parse::<IpAddr>()
        .ok()
        .or_else(|| addr.parse::<SocketAddr>().ok().map(|s| s.ip()))
}

/// IP range detector.
#[derive(Debug, Clone)]
pub struct IpRangeDetector {
    table: Arc<IpRangeTable>,
}

impl IpRangeDetector {
    /// Create a detector over the built-in table.
    pub fn new() -> Self {
        Self::with_table(IpRangeTable::builtin())
    }

    pub fn with_table(table: Arc<IpRangeTable>) -> Self {
        Self { table }
    }

    pub fn classify(&self, addr: &str) -> Reason {
        self.table.classify(addr)
    }

    pub fn table(&self) -> &IpRangeTable {
        &self.table
    }
}

impl Default for IpRangeDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for IpRangeDetector {
    fn detect(&self, ctx: &RequestContext<'_>) -> Option<Reason> {
        parse_addr(ctx.remote_addr).and_then(|ip| self.table.lookup(ip))
    }

    fn name(&self) -> &'static str {
        "ip_range"
    }
}

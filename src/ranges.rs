//! Infrastructure provider address blocks.
//!
//! Maintained from the providers' published range lists. Order matters only
//! for reproducibility: lookups return the first provider containing an
//! address.

use crate::verdict::Reason;

/// The CIDR blocks published by one provider.
#[derive(Debug, Clone, Copy)]
pub struct ProviderRanges {
    pub reason: Reason,
    pub cidrs: &'static [&'static str],
}

pub const PROVIDERS: &[ProviderRanges] = &[
    ProviderRanges {
        reason: Reason::RangeAws,
        cidrs: AWS,
    },
    ProviderRanges {
        reason: Reason::RangeDigitalOcean,
        cidrs: DIGITAL_OCEAN,
    },
    ProviderRanges {
        reason: Reason::RangeServersCom,
        cidrs: SERVERS_COM,
    },
    ProviderRanges {
        reason: Reason::RangeHetzner,
        cidrs: HETZNER,
    },
    ProviderRanges {
        reason: Reason::RangeGoogleCloud,
        cidrs: GOOGLE_CLOUD,
    },
];

// EC2 blocks.
const AWS: &[&str] = &[
    "3.80.0.0/12",
    "13.56.0.0/15",
    "13.58.0.0/15",
    "13.236.0.0/14",
    "18.188.0.0/14",
    "18.204.0.0/14",
    "18.216.0.0/14",
    "18.224.0.0/14",
    "18.236.0.0/15",
    "34.192.0.0/12",
    "34.208.0.0/12",
    "34.224.0.0/12",
    "35.168.0.0/13",
    "35.180.0.0/16",
    "44.224.0.0/11",
    "52.12.0.0/15",
    "52.32.0.0/14",
    "52.44.0.0/15",
    "52.56.0.0/16",
    "54.68.0.0/14",
    "54.86.0.0/15",
    "54.90.0.0/15",
    "54.92.128.0/17",
    "54.156.0.0/14",
    "54.166.0.0/15",
    "54.200.0.0/15",
    "54.215.0.0/16",
    "54.226.0.0/15",
    "54.242.0.0/15",
    "100.20.0.0/14",
    "2600:1f00::/24",
    "2a05:d000::/25",
];

const DIGITAL_OCEAN: &[&str] = &[
    "68.183.0.0/16",
    "104.131.0.0/16",
    "138.68.0.0/16",
    "159.65.0.0/16",
    "167.99.0.0/16",
    "206.189.0.0/16",
    "2604:a880::/32",
];

const SERVERS_COM: &[&str] = &["88.212.248.0/21"];

const HETZNER: &[&str] = &[
    "5.9.0.0/16",
    "46.4.0.0/16",
    "78.46.0.0/15",
    "88.99.0.0/16",
    "88.198.0.0/16",
    "136.243.0.0/16",
    "144.76.0.0/16",
    "148.251.0.0/16",
    "176.9.0.0/16",
    "2a01:4f8::/29",
];

const GOOGLE_CLOUD: &[&str] = &[
    "34.64.0.0/10",
    "35.184.0.0/13",
    "35.192.0.0/14",
    "35.196.0.0/15",
    "35.198.0.0/16",
    "35.199.0.0/17",
    "35.200.0.0/13",
    "35.208.0.0/12",
    "35.224.0.0/12",
    "35.240.0.0/13",
    "2600:1900::/28",
];

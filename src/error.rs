//! Error type for table construction, configuration and code conversion.
//!
//! Classification itself never fails.

use crate::verdict::Reason;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid CIDR {cidr:?} in {provider} range table")]
    InvalidCidr {
        provider: Reason,
        cidr: String,
        #[source]
        source: ipnet::AddrParseError,
    },

    #[error("{0} is not an IP range reason")]
    NotARangeReason(Reason),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown verdict code {0}")]
    UnknownCode(u8),
}

pub type Result<T> = std::result::Result<T, Error>;

use std::collections::BTreeMap;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::plugin_system::traits::AddressFamily;

/// BOOTP fixed header: `hlen` byte offset.
const HLEN_OFFSET: usize = 2;
/// BOOTP fixed header: `chaddr` field offset and length.
const CHADDR_OFFSET: usize = 28;
const CHADDR_LEN: usize = 16;

/// Link-layer address of a client, e.g. `00:11:22:33:44:55`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HwAddr(Vec<u8>);

impl HwAddr {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for HwAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl FromStr for HwAddr {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s
            .split([':', '-'])
            .map(|part| {
                if part.len() != 2 {
                    return Err(format!("invalid hardware address '{}'", s));
                }
                u8::from_str_radix(part, 16).map_err(|_| format!("invalid hardware address '{}'", s))
            })
            .collect::<Result<Vec<u8>, String>>()?;
        if bytes.is_empty() || bytes.len() > CHADDR_LEN {
            return Err(format!("invalid hardware address '{}'", s));
        }
        Ok(Self(bytes))
    }
}

/// One received datagram, as handed to the handler chain.
#[derive(Debug, Clone)]
pub struct Request {
    family: AddressFamily,
    peer: SocketAddr,
    payload: Vec<u8>,
}

impl Request {
    pub fn new(family: AddressFamily, peer: SocketAddr, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            family,
            peer,
            payload: payload.into(),
        }
    }

    pub fn family(&self) -> AddressFamily {
        self.family
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Client hardware address from the BOOTP `chaddr` field, trimmed to
    /// `hlen`. `None` for DHCPv6 or truncated packets.
    pub fn client_hwaddr(&self) -> Option<HwAddr> {
        if self.family != AddressFamily::V4 || self.payload.len() < CHADDR_OFFSET + CHADDR_LEN {
            return None;
        }
        let hlen = self.payload[HLEN_OFFSET] as usize;
        if hlen == 0 || hlen > CHADDR_LEN {
            return None;
        }
        Some(HwAddr::new(&self.payload[CHADDR_OFFSET..CHADDR_OFFSET + hlen]))
    }
}

/// Reply state accumulated by the handler chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    offered_address: Option<IpAddr>,
    options: BTreeMap<u16, Vec<u8>>,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set option `code`, replacing any earlier value.
    pub fn set_option(&mut self, code: u16, value: impl Into<Vec<u8>>) {
        self.options.insert(code, value.into());
    }

    pub fn option(&self, code: u16) -> Option<&[u8]> {
        self.options.get(&code).map(Vec::as_slice)
    }

    pub fn has_option(&self, code: u16) -> bool {
        self.options.contains_key(&code)
    }

    /// Options in ascending code order
    pub fn options(&self) -> impl Iterator<Item = (u16, &[u8])> {
        self.options.iter().map(|(code, value)| (*code, value.as_slice()))
    }

    pub fn set_offered_address(&mut self, address: IpAddr) {
        self.offered_address = Some(address);
    }

    pub fn offered_address(&self) -> Option<IpAddr> {
        self.offered_address
    }
}

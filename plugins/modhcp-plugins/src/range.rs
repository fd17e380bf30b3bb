//! `range <start> <end> <duration>`: dynamic DHCPv4 allocation.
//!
//! Addresses are handed out lowest-first and stay bound to the requesting
//! hardware address for the life of the process. Nothing is persisted.
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Mutex, MutexGuard};

use modhcp_core::plugin_system::traits::{Flow, Handler, Plugin, PluginError};
use modhcp_core::server::message::{HwAddr, Request, Response};

use crate::args;
use crate::leasetime::OPTION_IP_ADDRESS_LEASE_TIME;

pub const NAME: &str = "range";

pub struct RangePlugin;

impl Plugin for RangePlugin {
    fn setup4(&self, args: &[String]) -> Result<Box<dyn Handler>, PluginError> {
        let args = args::exactly(args, 3, "<start> <end> <duration>")?;
        let start = args::ipv4(&args[0])?;
        let end = args::ipv4(&args[1])?;
        if start > end {
            return Err(args::invalid(format!("range start {} is after end {}", start, end)));
        }
        let lease_seconds = args::lease_seconds(args::duration(&args[2])?)?;
        log::info!("Allocating from {} to {} with {}s leases", start, end, lease_seconds);
        Ok(Box::new(RangeHandler {
            pool: Mutex::new(Pool::new(start, end)),
            lease_seconds,
        }))
    }
}

/// Bindings never expire, so free addresses are always the tail of the
/// range and a single cursor tracks the lowest one.
struct Pool {
    end: u32,
    next: Option<u32>,
    bound: HashMap<HwAddr, Ipv4Addr>,
}

impl Pool {
    fn new(start: Ipv4Addr, end: Ipv4Addr) -> Self {
        Self {
            end: u32::from(end),
            next: Some(u32::from(start)),
            bound: HashMap::new(),
        }
    }

    /// The address already bound to `hwaddr`, or the lowest free one.
    fn allocate(&mut self, hwaddr: &HwAddr) -> Option<Ipv4Addr> {
        if let Some(addr) = self.bound.get(hwaddr) {
            return Some(*addr);
        }
        let free = self.next?;
        self.next = free.checked_add(1).filter(|&n| n <= self.end);
        let addr = Ipv4Addr::from(free);
        self.bound.insert(hwaddr.clone(), addr);
        Some(addr)
    }

    fn remaining(&self) -> u64 {
        self.next.map_or(0, |next| u64::from(self.end - next) + 1)
    }
}

struct RangeHandler {
    pool: Mutex<Pool>,
    lease_seconds: u32,
}

impl RangeHandler {
    fn pool(&self) -> MutexGuard<'_, Pool> {
        // A panic elsewhere cannot leave the pool half-updated
        self.pool.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Handler for RangeHandler {
    fn handle(&self, request: &Request, response: &mut Response) -> Flow {
        if response.offered_address().is_some() {
            return Flow::Continue;
        }
        let Some(hwaddr) = request.client_hwaddr() else {
            log::debug!("Request from {} carries no hardware address", request.peer());
            return Flow::Continue;
        };
        let (allocated, remaining) = {
            let mut pool = self.pool();
            (pool.allocate(&hwaddr), pool.remaining())
        };
        match allocated {
            Some(addr) => {
                log::debug!("Offering {} to {} ({} address(es) left)", addr, hwaddr, remaining);
                response.set_offered_address(IpAddr::V4(addr));
                response.set_option(OPTION_IP_ADDRESS_LEASE_TIME, self.lease_seconds.to_be_bytes());
                Flow::Continue
            }
            None => {
                log::warn!("Address range exhausted, dropping request from {}", hwaddr);
                Flow::Stop
            }
        }
    }
}

//! `netmask <mask>`: DHCPv4 subnet mask option.
use std::net::Ipv4Addr;

use modhcp_core::plugin_system::traits::{Flow, Handler, Plugin, PluginError};
use modhcp_core::server::message::{Request, Response};

use crate::args;

pub const NAME: &str = "netmask";
pub const OPTION_SUBNET_MASK: u16 = 1;

pub struct NetmaskPlugin;

/// True when the set bits of `mask` form a single leading run.
fn is_contiguous(mask: Ipv4Addr) -> bool {
    let bits = u32::from(mask);
    bits.leading_ones() + bits.trailing_zeros() >= 32
}

impl Plugin for NetmaskPlugin {
    fn setup4(&self, args: &[String]) -> Result<Box<dyn Handler>, PluginError> {
        let args = args::exactly(args, 1, "<mask>")?;
        let mask = args::ipv4(&args[0])?;
        if !is_contiguous(mask) {
            return Err(args::invalid(format!("'{}' is not a valid netmask", mask)));
        }
        Ok(Box::new(NetmaskHandler { mask }))
    }
}

struct NetmaskHandler {
    mask: Ipv4Addr,
}

impl Handler for NetmaskHandler {
    fn handle(&self, _request: &Request, response: &mut Response) -> Flow {
        response.set_option(OPTION_SUBNET_MASK, self.mask.octets());
        Flow::Continue
    }
}

//! `dns <ip>...`: recursive name servers, for both server families.
use modhcp_core::plugin_system::traits::{Flow, Handler, Plugin, PluginError};
use modhcp_core::server::message::{Request, Response};

use crate::args;

pub const NAME: &str = "dns";
pub const OPTION_DOMAIN_NAME_SERVER: u16 = 6;
pub const OPTION_DNS_RECURSIVE_NAME_SERVER: u16 = 23;

pub struct DnsPlugin;

impl Plugin for DnsPlugin {
    fn setup4(&self, args: &[String]) -> Result<Box<dyn Handler>, PluginError> {
        let mut value = Vec::new();
        for arg in args::at_least_one(args, "<ip>...")? {
            value.extend_from_slice(&args::ipv4(arg)?.octets());
        }
        log::info!("Loaded {} DNS server(s) for DHCPv4", args.len());
        Ok(Box::new(DnsHandler {
            code: OPTION_DOMAIN_NAME_SERVER,
            value,
        }))
    }

    fn setup6(&self, args: &[String]) -> Result<Box<dyn Handler>, PluginError> {
        let mut value = Vec::new();
        for arg in args::at_least_one(args, "<ip>...")? {
            value.extend_from_slice(&args::ipv6(arg)?.octets());
        }
        log::info!("Loaded {} DNS server(s) for DHCPv6", args.len());
        Ok(Box::new(DnsHandler {
            code: OPTION_DNS_RECURSIVE_NAME_SERVER,
            value,
        }))
    }
}

struct DnsHandler {
    code: u16,
    value: Vec<u8>,
}

impl Handler for DnsHandler {
    fn handle(&self, _request: &Request, response: &mut Response) -> Flow {
        response.set_option(self.code, self.value.clone());
        Flow::Continue
    }
}

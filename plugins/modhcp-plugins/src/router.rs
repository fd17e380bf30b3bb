//! `router <ip>...`: DHCPv4 default gateways.
use modhcp_core::plugin_system::traits::{Flow, Handler, Plugin, PluginError};
use modhcp_core::server::message::{Request, Response};

use crate::args;

pub const NAME: &str = "router";
pub const OPTION_ROUTER: u16 = 3;

pub struct RouterPlugin;

impl Plugin for RouterPlugin {
    fn setup4(&self, args: &[String]) -> Result<Box<dyn Handler>, PluginError> {
        let mut value = Vec::new();
        for arg in args::at_least_one(args, "<ip>...")? {
            value.extend_from_slice(&args::ipv4(arg)?.octets());
        }
        log::info!("Loaded {} router(s)", args.len());
        Ok(Box::new(RouterHandler { value }))
    }
}

struct RouterHandler {
    value: Vec<u8>,
}

impl Handler for RouterHandler {
    fn handle(&self, _request: &Request, response: &mut Response) -> Flow {
        response.set_option(OPTION_ROUTER, self.value.clone());
        Flow::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{args, request_from};

    #[test]
    fn test_routers_in_argument_order() {
        let handler = RouterPlugin.setup4(&args("10.0.0.254 10.0.0.253")).unwrap();
        let mut response = Response::new();
        handler.handle(&request_from(&[1; 6]), &mut response);
        assert_eq!(response.option(OPTION_ROUTER), Some(&[10, 0, 0, 254, 10, 0, 0, 253][..]));
    }

    #[test]
    fn test_needs_a_router() {
        assert!(RouterPlugin.setup4(&[]).is_err());
        assert!(RouterPlugin.setup4(&args("10.0.0.1 fe80::1")).is_err());
    }
}

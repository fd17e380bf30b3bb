//! `serverid <ip>`: identify this server to DHCPv4 clients.
use std::net::Ipv4Addr;

use modhcp_core::plugin_system::traits::{Flow, Handler, Plugin, PluginError};
use modhcp_core::server::message::{Request, Response};

use crate::args;

pub const NAME: &str = "serverid";
pub const OPTION_SERVER_IDENTIFIER: u16 = 54;

pub struct ServerIdPlugin;

impl Plugin for ServerIdPlugin {
    fn setup4(&self, args: &[String]) -> Result<Box<dyn Handler>, PluginError> {
        let args = args::exactly(args, 1, "<ip>")?;
        let id = args::ipv4(&args[0])?;
        if id.is_unspecified() || id.is_broadcast() {
            return Err(args::invalid(format!("'{}' cannot identify a server", id)));
        }
        log::info!("Server identifier set to {}", id);
        Ok(Box::new(ServerIdHandler { id }))
    }
}

struct ServerIdHandler {
    id: Ipv4Addr,
}

impl Handler for ServerIdHandler {
    fn handle(&self, _request: &Request, response: &mut Response) -> Flow {
        response.set_option(OPTION_SERVER_IDENTIFIER, self.id.octets());
        Flow::Continue
    }
}

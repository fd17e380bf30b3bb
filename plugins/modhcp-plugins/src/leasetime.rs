//! `leasetime <duration>`: DHCPv4 IP address lease time.
use modhcp_core::plugin_system::traits::{Flow, Handler, Plugin, PluginError};
use modhcp_core::server::message::{Request, Response};

use crate::args;

pub const NAME: &str = "leasetime";
pub const OPTION_IP_ADDRESS_LEASE_TIME: u16 = 51;

pub struct LeaseTimePlugin;

impl Plugin for LeaseTimePlugin {
    fn setup4(&self, args: &[String]) -> Result<Box<dyn Handler>, PluginError> {
        let args = args::exactly(args, 1, "<duration>")?;
        let seconds = args::lease_seconds(args::duration(&args[0])?)?;
        log::info!("Default lease time set to {}s", seconds);
        Ok(Box::new(LeaseTimeHandler { seconds }))
    }
}

struct LeaseTimeHandler {
    seconds: u32,
}

impl Handler for LeaseTimeHandler {
    fn handle(&self, _request: &Request, response: &mut Response) -> Flow {
        response.set_option(OPTION_IP_ADDRESS_LEASE_TIME, self.seconds.to_be_bytes());
        Flow::Continue
    }
}

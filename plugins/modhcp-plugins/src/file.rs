//! `file <path>`: static DHCPv4 assignments.
//!
//! The file holds one `<hwaddr> <ip>` pair per line. Blank lines and lines
//! starting with `#` are ignored. A matching entry overrides any address
//! offered earlier in the chain.
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;

use modhcp_core::plugin_system::traits::{Flow, Handler, Plugin, PluginError};
use modhcp_core::server::message::{HwAddr, Request, Response};

use crate::args;

pub const NAME: &str = "file";

pub struct FilePlugin;

fn load_leases(path: &Path) -> Result<HashMap<HwAddr, Ipv4Addr>, PluginError> {
    let data = std::fs::read_to_string(path)?;
    parse_leases(&data)
}

fn parse_leases(data: &str) -> Result<HashMap<HwAddr, Ipv4Addr>, PluginError> {
    let mut leases = HashMap::new();
    for (index, line) in data.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [hwaddr, ip] = fields.as_slice() else {
            return Err(args::invalid(format!("line {}: want '<hwaddr> <ip>'", index + 1)));
        };
        let hwaddr: HwAddr = hwaddr
            .parse()
            .map_err(|e| args::invalid(format!("line {}: {}", index + 1, e)))?;
        let ip = args::ipv4(ip).map_err(|e| args::invalid(format!("line {}: {}", index + 1, e)))?;
        leases.insert(hwaddr, ip);
    }
    Ok(leases)
}

impl Plugin for FilePlugin {
    fn setup4(&self, args: &[String]) -> Result<Box<dyn Handler>, PluginError> {
        let args = args::exactly(args, 1, "<path>")?;
        let path = Path::new(&args[0]);
        let leases = load_leases(path)?;
        log::info!("Loaded {} static lease(s) from {}", leases.len(), path.display());
        Ok(Box::new(FileHandler { leases }))
    }
}

struct FileHandler {
    leases: HashMap<HwAddr, Ipv4Addr>,
}

impl Handler for FileHandler {
    fn handle(&self, request: &Request, response: &mut Response) -> Flow {
        let Some(hwaddr) = request.client_hwaddr() else {
            return Flow::Continue;
        };
        if let Some(ip) = self.leases.get(&hwaddr) {
            log::debug!("Static lease {} for {}", ip, hwaddr);
            response.set_offered_address(IpAddr::V4(*ip));
        }
        Flow::Continue
    }
}

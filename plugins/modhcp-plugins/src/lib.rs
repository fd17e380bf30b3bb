//! Built-in modhcp plugins.
//!
//! [`desired_plugins`] is the fixed set the binary registers, in the order the
//! handler chains evaluate them.
use std::sync::Arc;

use modhcp_core::kernel::bootstrap::DesiredPlugin;
use modhcp_core::plugin_system::registry::PluginDescriptor;

mod args;
pub mod dns;
pub mod file;
pub mod leasetime;
pub mod nbp;
pub mod netmask;
pub mod range;
pub mod router;
pub mod serverid;

/// Registration order of the built-in plugins.
///
/// Handlers run in this order, so address selection is sequenced here:
/// `file` must offer static leases before `range` allocates from its pool,
/// and `range` sets its own lease time after `leasetime` sets the default.
pub const NAMES: [&str; 8] = [
    dns::NAME,
    file::NAME,
    leasetime::NAME,
    nbp::NAME,
    netmask::NAME,
    range::NAME,
    router::NAME,
    serverid::NAME,
];

/// Constructors for every built-in plugin, in [`NAMES`] order.
pub fn desired_plugins() -> Vec<DesiredPlugin> {
    vec![
        Box::new(|| PluginDescriptor::new(dns::NAME, Arc::new(dns::DnsPlugin))),
        Box::new(|| PluginDescriptor::new(file::NAME, Arc::new(file::FilePlugin))),
        Box::new(|| PluginDescriptor::new(leasetime::NAME, Arc::new(leasetime::LeaseTimePlugin))),
        Box::new(|| PluginDescriptor::new(nbp::NAME, Arc::new(nbp::NbpPlugin))),
        Box::new(|| PluginDescriptor::new(netmask::NAME, Arc::new(netmask::NetmaskPlugin))),
        Box::new(|| PluginDescriptor::new(range::NAME, Arc::new(range::RangePlugin))),
        Box::new(|| PluginDescriptor::new(router::NAME, Arc::new(router::RouterPlugin))),
        Box::new(|| PluginDescriptor::new(serverid::NAME, Arc::new(serverid::ServerIdPlugin))),
    ]
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::leasetime::OPTION_IP_ADDRESS_LEASE_TIME;
    use crate::test_util::request_from;
    use modhcp_core::config::{PluginEntry, ServerConfig};
    use modhcp_core::kernel::bootstrap::register_plugins;
    use modhcp_core::plugin_system::traits::AddressFamily;
    use modhcp_core::server::chain::HandlerChain;
    use std::io::Write;
    use std::net::IpAddr;
    use tempfile::NamedTempFile;

    fn section(entries: &[(&str, &str)]) -> ServerConfig {
        ServerConfig {
            listen: vec!["127.0.0.1:0".parse().unwrap()],
            plugins: entries
                .iter()
                .map(|&(name, args)| PluginEntry {
                    name: name.to_string(),
                    args: test_util::args(args),
                })
                .collect(),
        }
    }

    fn offered(chain: &HandlerChain, hwaddr: &[u8]) -> Option<IpAddr> {
        chain.process(&request_from(hwaddr)).offered_address()
    }

    #[test]
    fn test_desired_plugins_register_in_names_order() {
        let registry = register_plugins(&desired_plugins()).expect("built-in names are distinct");
        assert_eq!(registry.names(), NAMES.to_vec());
        assert_eq!(
            NAMES,
            ["dns", "file", "leasetime", "nbp", "netmask", "range", "router", "serverid"]
        );
    }

    #[test]
    fn test_each_factory_builds_a_fresh_descriptor() {
        let desired = desired_plugins();
        let first = desired[0]();
        let second = desired[0]();
        assert_eq!(first.name(), second.name());
        assert!(!Arc::ptr_eq(first.plugin(), second.plugin()));
    }

    #[test]
    fn test_static_lease_leaves_range_pool_untouched() {
        let mut leases_file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(leases_file, "01:01:01:01:01:01 10.0.0.50").unwrap();
        let path = leases_file.path().to_string_lossy().into_owned();

        let registry = register_plugins(&desired_plugins()).unwrap();
        // Document order deliberately differs from registration order
        let config = section(&[("range", "10.0.0.1 10.0.0.1 1h"), ("file", path.as_str())]);
        let chain = HandlerChain::build(AddressFamily::V4, &config, &registry).unwrap();
        assert_eq!(chain.names(), vec!["file", "range"]);

        assert_eq!(offered(&chain, &[1; 6]), Some("10.0.0.50".parse().unwrap()));
        assert_eq!(offered(&chain, &[2; 6]), Some("10.0.0.1".parse().unwrap()));
    }

    #[test]
    fn test_range_lease_time_overrides_default() {
        let registry = register_plugins(&desired_plugins()).unwrap();
        let config = section(&[("leasetime", "10m"), ("range", "10.0.0.1 10.0.0.9 1h")]);
        let chain = HandlerChain::build(AddressFamily::V4, &config, &registry).unwrap();

        let response = chain.process(&request_from(&[3; 6]));
        assert_eq!(response.option(OPTION_IP_ADDRESS_LEASE_TIME), Some(&3600u32.to_be_bytes()[..]));
    }
}

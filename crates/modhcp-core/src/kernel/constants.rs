/// Application name, also the per-user config directory under `$XDG_CONFIG_HOME`
pub const APP_NAME: &str = "modhcp";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration file name looked up on the search path
pub const CONFIG_FILE_NAME: &str = "config.yml";

/// Configuration directory name under `$HOME`
pub const CONFIG_DIR_NAME: &str = ".modhcp";

/// System-wide configuration directory
pub const SYSTEM_CONFIG_DIR: &str = "/etc/modhcp";

/// Default DHCPv4 server port
pub const DHCPV4_SERVER_PORT: u16 = 67;

/// Default DHCPv6 server port
pub const DHCPV6_SERVER_PORT: u16 = 547;

/// Largest datagram a listener reads
pub const MAX_DATAGRAM_SIZE: usize = 1500;

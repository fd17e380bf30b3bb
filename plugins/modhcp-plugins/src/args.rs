use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::Duration;

use modhcp_core::plugin_system::traits::PluginError;

pub(crate) fn invalid(msg: impl Into<String>) -> PluginError {
    PluginError::InvalidArgs(msg.into())
}

pub(crate) fn exactly<'a>(args: &'a [String], n: usize, usage: &str) -> Result<&'a [String], PluginError> {
    if args.len() != n {
        return Err(invalid(format!("want exactly {} argument(s): {}, got {}", n, usage, args.len())));
    }
    Ok(args)
}

pub(crate) fn at_least_one<'a>(args: &'a [String], usage: &str) -> Result<&'a [String], PluginError> {
    if args.is_empty() {
        return Err(invalid(format!("want at least one argument: {}", usage)));
    }
    Ok(args)
}

pub(crate) fn ipv4(arg: &str) -> Result<Ipv4Addr, PluginError> {
    arg.parse().map_err(|_| invalid(format!("'{}' is not an IPv4 address", arg)))
}

pub(crate) fn ipv6(arg: &str) -> Result<Ipv6Addr, PluginError> {
    arg.parse().map_err(|_| invalid(format!("'{}' is not an IPv6 address", arg)))
}

/// `<n>s`, `<n>m` or `<n>h`.
pub(crate) fn duration(arg: &str) -> Result<Duration, PluginError> {
    let bad = || invalid(format!("invalid duration '{}', expected e.g. 60s, 10m or 1h", arg));
    let split = arg.len().checked_sub(1).filter(|&i| arg.is_char_boundary(i)).ok_or_else(bad)?;
    let (count, unit) = arg.split_at(split);
    let count: u64 = count.parse().map_err(|_| bad())?;
    let secs = match unit {
        "s" => Some(count),
        "m" => count.checked_mul(60),
        "h" => count.checked_mul(3600),
        _ => None,
    }
    .ok_or_else(bad)?;
    Ok(Duration::from_secs(secs))
}

/// Lease time as carried by DHCPv4 option 51.
pub(crate) fn lease_seconds(lease: Duration) -> Result<u32, PluginError> {
    match u32::try_from(lease.as_secs()) {
        Ok(0) => Err(invalid("lease time must be greater than zero")),
        Ok(secs) => Ok(secs),
        Err(_) => Err(invalid(format!("lease time {}s does not fit in 32 bits", lease.as_secs()))),
    }
}

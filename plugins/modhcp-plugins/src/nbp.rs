//! `nbp <url>`: network boot program location.
//!
//! For DHCPv4 a `tftp://host/path` URL is split into the TFTP server name
//! (option 66) and the boot file name (option 67); `http(s)` URLs are sent
//! whole as the boot file name. DHCPv6 always carries the full URL in
//! option 59.
use modhcp_core::plugin_system::traits::{Flow, Handler, Plugin, PluginError};
use modhcp_core::server::message::{Request, Response};

use crate::args;

pub const NAME: &str = "nbp";
pub const OPTION_TFTP_SERVER_NAME: u16 = 66;
pub const OPTION_BOOTFILE_NAME: u16 = 67;
pub const OPTION_BOOTFILE_URL: u16 = 59;

pub struct NbpPlugin;

#[derive(Debug, PartialEq, Eq)]
struct BootUrl<'a> {
    scheme: &'a str,
    host: &'a str,
    path: &'a str,
}

fn parse_url(url: &str) -> Result<BootUrl<'_>, PluginError> {
    let bad = || args::invalid(format!("'{}' is not a boot URL", url));
    let (scheme, rest) = url.split_once("://").ok_or_else(bad)?;
    let (host, path) = rest.split_once('/').ok_or_else(bad)?;
    if host.is_empty() || path.is_empty() {
        return Err(bad());
    }
    match scheme {
        "tftp" | "http" | "https" => Ok(BootUrl { scheme, host, path }),
        other => Err(args::invalid(format!("unsupported boot URL scheme '{}'", other))),
    }
}

impl Plugin for NbpPlugin {
    fn setup4(&self, args: &[String]) -> Result<Box<dyn Handler>, PluginError> {
        let args = args::exactly(args, 1, "<url>")?;
        let url = &args[0];
        let parsed = parse_url(url)?;
        let options = if parsed.scheme == "tftp" {
            vec![
                (OPTION_TFTP_SERVER_NAME, parsed.host.as_bytes().to_vec()),
                (OPTION_BOOTFILE_NAME, parsed.path.as_bytes().to_vec()),
            ]
        } else {
            vec![(OPTION_BOOTFILE_NAME, url.as_bytes().to_vec())]
        };
        log::info!("Network boot program set to {}", url);
        Ok(Box::new(NbpHandler { options }))
    }

    fn setup6(&self, args: &[String]) -> Result<Box<dyn Handler>, PluginError> {
        let args = args::exactly(args, 1, "<url>")?;
        let url = &args[0];
        parse_url(url)?;
        log::info!("Network boot program set to {}", url);
        Ok(Box::new(NbpHandler {
            options: vec![(OPTION_BOOTFILE_URL, url.as_bytes().to_vec())],
        }))
    }
}

struct NbpHandler {
    options: Vec<(u16, Vec<u8>)>,
}

impl Handler for NbpHandler {
    fn handle(&self, _request: &Request, response: &mut Response) -> Flow {
        for (code, value) in &self.options {
            response.set_option(*code, value.clone());
        }
        Flow::Continue
    }
}

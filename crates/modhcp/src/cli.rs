use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use modhcp_core::kernel::bootstrap::BootstrapOptions;

/// Long flags that may also be spelled with a single dash, e.g. `-loglevel`.
const SINGLE_DASH_FLAGS: [&str; 5] = ["logfile", "nostdout", "loglevel", "conf", "list-plugins"];

/// modhcp: a plugin-driven DHCPv4/DHCPv6 server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Log to this file, in addition to stderr
    #[arg(long, value_name = "PATH")]
    pub logfile: Option<PathBuf>,

    /// Disable logging to stdout/stderr
    #[arg(long)]
    pub nostdout: bool,

    /// Log level: none, debug, info, warning, error or fatal
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub loglevel: String,

    /// Configuration file; the default search path is used when omitted
    #[arg(long, value_name = "PATH")]
    pub conf: Option<PathBuf>,

    /// Print the built-in plugins in registration order and exit
    #[arg(long)]
    pub list_plugins: bool,
}

impl CliArgs {
    /// Parse the process arguments, accepting single-dash long flags.
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize(std::env::args_os()))
    }

    pub fn bootstrap_options(&self) -> BootstrapOptions {
        BootstrapOptions {
            log_level: self.loglevel.clone(),
            log_file: self.logfile.clone(),
            no_stdout: self.nostdout,
        }
    }
}

/// Rewrite `-flag` and `-flag=value` to their `--` form for known long flags.
/// Everything after a bare `--` is left alone.
pub fn normalize<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split('=').next().unwrap_or(rest);
                    if SINGLE_DASH_FLAGS.contains(&name) {
                        OsString::from(format!("-{}", text))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}

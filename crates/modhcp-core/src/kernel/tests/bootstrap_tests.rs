use crate::config::{Config, ConfigError, ConfigLoader, ServerConfig};
use crate::kernel::bootstrap::*;
use crate::kernel::error::{BootstrapPhase, Error};
use crate::logging::LoggingError;
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::registry::{PluginDescriptor, PluginRegistry};
use crate::plugin_system::traits::{Flow, Handler, Plugin, PluginError};
use crate::server::message::{Request, Response};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const CHAIN: [&str; 8] = [
    "serverid", "netmask", "range", "router", "dns", "leasetime", "nbp", "file",
];

struct NullPlugin;

struct NullHandler;

impl Handler for NullHandler {
    fn handle(&self, _request: &Request, _response: &mut Response) -> Flow {
        Flow::Continue
    }
}

impl Plugin for NullPlugin {
    fn setup4(&self, _args: &[String]) -> Result<Box<dyn Handler>, PluginError> {
        Ok(Box::new(NullHandler))
    }
}

struct MockLoader {
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl MockLoader {
    fn new(fail: bool) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (Self { fail, calls: calls.clone() }, calls)
    }
}

impl ConfigLoader for MockLoader {
    fn load(&self) -> Result<Config, ConfigError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ConfigError::NotFound { searched: vec![] });
        }
        Ok(Config {
            server4: Some(ServerConfig {
                listen: vec!["127.0.0.1:0".parse().unwrap()],
                plugins: vec![],
            }),
            server6: None,
        })
    }
}

fn counted(name: &'static str, counter: &Arc<AtomicUsize>) -> DesiredPlugin {
    let counter = counter.clone();
    Box::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        PluginDescriptor::new(name, Arc::new(NullPlugin))
    })
}

fn desired(names: &[&'static str], counter: &Arc<AtomicUsize>) -> Vec<DesiredPlugin> {
    names.iter().map(|&name| counted(name, counter)).collect()
}

#[test]
fn test_default_options() {
    let options = BootstrapOptions::default();
    assert_eq!(options.log_level, "info");
    assert!(options.log_file.is_none());
    assert!(!options.no_stdout);
}

#[test]
fn test_successful_bootstrap_registers_in_order_and_builds_server() {
    let factories = Arc::new(AtomicUsize::new(0));
    let (loader, loads) = MockLoader::new(false);
    let bootstrap = Bootstrap::new(BootstrapOptions::default(), loader, desired(&CHAIN, &factories));

    let mut seen_registry: Option<Arc<PluginRegistry>> = None;
    let result = bootstrap.run(|config, registry| {
        seen_registry = Some(registry.clone());
        config
    });
    let bootstrapped = result.expect("bootstrap succeeds");

    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert_eq!(factories.load(Ordering::SeqCst), CHAIN.len());
    assert_eq!(bootstrapped.registry.names(), CHAIN.to_vec());
    assert!(Arc::ptr_eq(&bootstrapped.registry, &seen_registry.unwrap()));
    assert!(bootstrapped.server.server4.is_some(), "server built from loaded config");
}

#[test]
fn test_invalid_log_level_stops_before_config_load() {
    let factories = Arc::new(AtomicUsize::new(0));
    let (loader, loads) = MockLoader::new(false);
    let options = BootstrapOptions {
        log_level: "chatty".into(),
        ..BootstrapOptions::default()
    };
    let mut built = false;

    let result = Bootstrap::new(options, loader, desired(&CHAIN, &factories)).run(|_, _| built = true);

    match result {
        Err(Error::InvalidLogLevel(LoggingError::InvalidLogLevel { value, .. })) => assert_eq!(value, "chatty"),
        Err(e) => panic!("Expected InvalidLogLevel, got {:?}", e),
        Ok(_) => panic!("Expected InvalidLogLevel, bootstrap succeeded"),
    }
    assert_eq!(loads.load(Ordering::SeqCst), 0);
    assert_eq!(factories.load(Ordering::SeqCst), 0);
    assert!(!built);
}

#[test]
fn test_config_failure_stops_before_plugin_registration() {
    let factories = Arc::new(AtomicUsize::new(0));
    let (loader, loads) = MockLoader::new(true);
    let mut built = false;

    let result = Bootstrap::new(BootstrapOptions::default(), loader, desired(&CHAIN, &factories))
        .run(|_, _| built = true);

    match result {
        Err(err @ Error::ConfigLoad(_)) => {
            assert_eq!(err.phase(), BootstrapPhase::ConfigLoad);
            assert!(err.to_string().starts_with("Failed to load configuration"));
        }
        Err(e) => panic!("Expected ConfigLoad, got {:?}", e),
        Ok(_) => panic!("Expected ConfigLoad, bootstrap succeeded"),
    }
    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert_eq!(factories.load(Ordering::SeqCst), 0, "no plugin may be registered");
    assert!(!built);
}

#[test]
fn test_duplicate_plugin_stops_before_server_construction() {
    let factories = Arc::new(AtomicUsize::new(0));
    let (loader, _) = MockLoader::new(false);
    let names = ["serverid", "range", "range", "dns"];
    let mut built = false;

    let result = Bootstrap::new(BootstrapOptions::default(), loader, desired(&names, &factories))
        .run(|_, _| built = true);

    match result {
        Err(Error::PluginRegistration { plugin, source: PluginSystemError::DuplicatePlugin { name } }) => {
            assert_eq!(plugin, "range");
            assert_eq!(name, "range");
        }
        Err(e) => panic!("Expected PluginRegistration, got {:?}", e),
        Ok(_) => panic!("Expected PluginRegistration, bootstrap succeeded"),
    }
    // Fail-fast: "dns" is never constructed
    assert_eq!(factories.load(Ordering::SeqCst), 3);
    assert!(!built);
}

#[test]
fn test_register_plugins_scenario() {
    let factories = Arc::new(AtomicUsize::new(0));
    let registry = register_plugins(&desired(&CHAIN, &factories)).expect("distinct names");
    assert_eq!(registry.names(), CHAIN.to_vec());

    let mut registry = registry;
    let again = registry.register(Arc::new(PluginDescriptor::new("range", Arc::new(NullPlugin))));
    assert!(matches!(again, Err(PluginSystemError::DuplicatePlugin { .. })));
    assert_eq!(registry.names(), CHAIN.to_vec());
}

#[test]
fn test_logger_config_from_options() {
    let options = BootstrapOptions {
        log_level: "debug".into(),
        log_file: Some("/var/log/modhcp.log".into()),
        no_stdout: true,
    };
    let config = options.logger_config().unwrap();
    assert_eq!(config.level().as_str(), "debug");
    assert_eq!(config.file(), Some(std::path::Path::new("/var/log/modhcp.log")));
    assert!(config.no_stdout());
}

use crate::plugin_system::traits::{AddressFamily, Flow, Handler, Plugin, PluginError};
use crate::server::message::{Request, Response};

struct V4OnlyPlugin;

struct StopHandler;

impl Handler for StopHandler {
    fn handle(&self, _request: &Request, _response: &mut Response) -> Flow {
        Flow::Stop
    }
}

impl Plugin for V4OnlyPlugin {
    fn setup4(&self, args: &[String]) -> Result<Box<dyn Handler>, PluginError> {
        if args.is_empty() {
            return Err(PluginError::InvalidArgs("need one argument".into()));
        }
        Ok(Box::new(StopHandler))
    }
}

#[test]
fn test_setup6_is_unsupported_by_default() {
    let plugin = V4OnlyPlugin;
    match plugin.setup6(&[]) {
        Err(PluginError::Unsupported(AddressFamily::V6)) => {}
        Err(e) => panic!("Expected Unsupported(V6), got {:?}", e),
        Ok(_) => panic!("Expected Unsupported(V6), got a handler"),
    }
}

#[test]
fn test_setup_dispatches_by_family() {
    let plugin = V4OnlyPlugin;
    assert!(plugin.setup(AddressFamily::V4, &["x".to_string()]).is_ok());
    assert!(matches!(
        plugin.setup(AddressFamily::V4, &[]),
        Err(PluginError::InvalidArgs(_))
    ));
    assert!(matches!(
        plugin.setup(AddressFamily::V6, &["x".to_string()]),
        Err(PluginError::Unsupported(AddressFamily::V6))
    ));
}

#[test]
fn test_family_display() {
    assert_eq!(AddressFamily::V4.to_string(), "DHCPv4");
    assert_eq!(AddressFamily::V6.to_string(), "DHCPv6");
    assert_eq!(
        PluginError::Unsupported(AddressFamily::V6).to_string(),
        "DHCPv6 is not supported"
    );
}

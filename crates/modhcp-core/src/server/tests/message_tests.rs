use crate::plugin_system::traits::AddressFamily;
use crate::server::message::{HwAddr, Request, Response};
use std::net::{IpAddr, Ipv4Addr};

fn bootp_packet(hlen: u8, chaddr: &[u8]) -> Vec<u8> {
    let mut packet = vec![0u8; 240];
    packet[0] = 1; // BOOTREQUEST
    packet[1] = 1; // Ethernet
    packet[2] = hlen;
    packet[28..28 + chaddr.len()].copy_from_slice(chaddr);
    packet
}

#[test]
fn test_client_hwaddr_reads_chaddr_up_to_hlen() {
    let mac = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55];
    let request = Request::new(AddressFamily::V4, "10.0.0.9:68".parse().unwrap(), bootp_packet(6, &mac));
    let hwaddr = request.client_hwaddr().expect("hardware address present");
    assert_eq!(hwaddr.as_bytes(), &mac);
    assert_eq!(hwaddr.to_string(), "00:11:22:33:44:55");
}

#[test]
fn test_client_hwaddr_rejects_bad_packets() {
    let peer = "10.0.0.9:68".parse().unwrap();
    assert!(Request::new(AddressFamily::V4, peer, vec![0u8; 20]).client_hwaddr().is_none());
    assert!(Request::new(AddressFamily::V4, peer, bootp_packet(0, &[])).client_hwaddr().is_none());
    assert!(Request::new(AddressFamily::V4, peer, bootp_packet(17, &[])).client_hwaddr().is_none());
    assert!(Request::new(AddressFamily::V6, peer, bootp_packet(6, &[1; 6])).client_hwaddr().is_none());
}

#[test]
fn test_hwaddr_parse() {
    let parsed: HwAddr = "AA-bb-cc-00-11-22".parse().unwrap();
    assert_eq!(parsed, HwAddr::new(vec![0xaa, 0xbb, 0xcc, 0x00, 0x11, 0x22]));
    assert!("".parse::<HwAddr>().is_err());
    assert!("aa:bb:c".parse::<HwAddr>().is_err());
    assert!("zz:00".parse::<HwAddr>().is_err());
}

#[test]
fn test_response_options_are_ordered_and_replaceable() {
    let mut response = Response::new();
    response.set_option(54, vec![10, 0, 0, 1]);
    response.set_option(1, vec![255, 255, 255, 0]);
    response.set_option(54, vec![10, 0, 0, 2]);

    let codes: Vec<u16> = response.options().map(|(code, _)| code).collect();
    assert_eq!(codes, vec![1, 54]);
    assert_eq!(response.option(54), Some(&[10, 0, 0, 2][..]));
    assert!(response.option(3).is_none());

    assert!(response.offered_address().is_none());
    response.set_offered_address(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 50)));
    assert_eq!(response.offered_address(), Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 50))));
}

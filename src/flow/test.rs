use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use anyhow::Result;
use pnet::util::MacAddr;
use super::flow::{FLAG_EVENT, FLAG_SAMPLED};
use super::format::{ipv4_int, ipv6_ints, mpls, tcp_flags};
use super::{Extension, Flow, Source};

#[test]
fn flags_as_string() {
    assert_eq!(tcp_flags(0),  "......");
    assert_eq!(tcp_flags(2),  "....S.");
    assert_eq!(tcp_flags(18), ".A..S.");
    assert_eq!(tcp_flags(27), ".AP.SF");
    assert_eq!(tcp_flags(63), "UAPRSF");
}

#[test]
fn flags_as_hex() {
    assert_eq!(tcp_flags(64),  "0x40");
    assert_eq!(tcp_flags(194), "0xc2");
    assert_eq!(tcp_flags(255), "0xff");
}

#[test]
fn mpls_entry() {
    let entry = (1234 << 4) | (5 << 1) | 1;
    assert_eq!(mpls(entry), "1234-5-1");
    assert_eq!(mpls(0),     "0-0-0");
}

#[test]
fn signed_addresses() {
    assert_eq!(ipv4_int(Ipv4Addr::new(10, 0, 0, 1)), 0x0a000001);
    assert_eq!(ipv4_int(Ipv4Addr::new(192, 168, 1, 1)), 0xc0a80101u32 as i32);
    assert!(ipv4_int(Ipv4Addr::new(192, 168, 1, 1)) < 0);

    let ip = "2001:db8::1".parse::<Ipv6Addr>().unwrap();
    let (hi, lo) = ipv6_ints(ip);
    assert_eq!(hi, 0x20010db800000000);
    assert_eq!(lo, 1);

    let ip = "ffff::ffff".parse::<Ipv6Addr>().unwrap();
    assert_eq!(ipv6_ints(ip), (0xffff000000000000u64 as i64, 0xffff));
}

#[test]
fn extension_ids() {
    for id in 0..128 {
        if let Some(ext) = Extension::from_id(id) {
            assert_eq!(ext.id(), id);
        }
    }
    assert_eq!(Extension::from_id(4),  Some(Extension::IoSnmp2));
    assert_eq!(Extension::from_id(64), Some(Extension::Latency));
    assert_eq!(Extension::from_id(28), None);
    assert_eq!(Extension::from_id(0),  None);
}

#[test]
fn extension_list_terminates() {
    let flow = Flow {
        extensions: vec![4, 99, 13, 0, 20],
        ..Default::default()
    };
    let exts = flow.extensions().collect::<Vec<_>>();
    assert_eq!(exts, vec![Extension::IoSnmp2, Extension::Vlan]);
}

#[test]
fn flow_times_and_flags() {
    let flow = Flow {
        flags:      FLAG_EVENT | FLAG_SAMPLED,
        first:      1_500_000_000,
        msec_first: 250,
        last:       1_500_000_002,
        msec_last:  999,
        prot:       58,
        ..Default::default()
    };
    assert_eq!(flow.start_ms(), 1_500_000_000_250);
    assert_eq!(flow.end_ms(),   1_500_000_002_999);
    assert!(flow.is_event());
    assert!(flow.is_sampled());
    assert!(flow.is_icmp());
    assert!(!Flow::default().is_event());
}

#[test]
fn source_reads_json() -> Result<()> {
    let json = r#"
        {"first": 10, "prot": 6, "src": "10.0.0.1", "dst": "10.0.0.2", "srcport": 443, "extensions": [13]}
        {"prot": 17, "src": "2001:db8::1", "dst": "2001:db8::2", "in_src_mac": "00:11:22:33:44:55", "label": "x"}
    "#;

    let flows = Source::new(json.as_bytes()).collect::<Result<Vec<_>>>()?;
    assert_eq!(flows.len(), 2);

    assert_eq!(flows[0].first,   10);
    assert_eq!(flows[0].srcport, 443);
    assert_eq!(flows[0].src,     IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));
    assert_eq!(flows[0].extensions().collect::<Vec<_>>(), vec![Extension::Vlan]);

    assert_eq!(flows[1].dst,        "2001:db8::2".parse::<IpAddr>()?);
    assert_eq!(flows[1].in_src_mac, MacAddr::new(0x00, 0x11, 0x22, 0x33, 0x44, 0x55));
    assert_eq!(flows[1].label.as_deref(), Some("x"));

    Ok(())
}

#[test]
fn source_rejects_garbage() {
    let mut source = Source::new("{\"prot\": \"tcp\"}".as_bytes());
    assert!(matches!(source.next(), Some(Err(_))));
}

#[test]
fn sample_file() -> Result<()> {
    let flows = Source::open("flows/sample.json")?.collect::<Result<Vec<_>>>()?;
    assert_eq!(flows.len(), 3);
    assert!(flows[1].is_event());
    assert_eq!(flows[2].label.as_deref(), Some("dns"));
    Ok(())
}

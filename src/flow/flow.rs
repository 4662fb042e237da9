use std::net::{IpAddr, Ipv4Addr};
use pnet::util::MacAddr;
use serde::Deserialize;
use super::Extension;

pub const FLAG_EVENT:   u16 = 0b01000000;
pub const FLAG_SAMPLED: u16 = 0b10000000;

pub const ICMP:   u8 = 1;
pub const ICMPV6: u8 = 58;

pub const MPLS_LABELS: usize = 10;

/// An nfdump master record, with the extension ids that say which of
/// the optional field groups carry data.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Flow {
    pub flags:                u16,
    pub first:                u32,
    pub msec_first:           u16,
    pub last:                 u32,
    pub msec_last:            u16,
    pub exporter_sysid:       u16,
    pub prot:                 u8,
    pub tcp_flags:            u8,
    pub tos:                  u8,
    pub dst_tos:              u8,
    pub fwd_status:           u8,
    pub src:                  IpAddr,
    pub dst:                  IpAddr,
    pub srcport:              u16,
    pub dstport:              u16,
    pub icmp_type:            u8,
    pub icmp_code:            u8,
    pub d_pkts:               u64,
    pub d_octets:             u64,
    pub input:                u32,
    pub output:               u32,
    pub srcas:                u32,
    pub dstas:                u32,
    pub next_as:              u32,
    pub prev_as:              u32,
    pub src_mask:             u8,
    pub dst_mask:             u8,
    pub dir:                  u8,
    pub ip_nexthop:           IpAddr,
    pub bgp_nexthop:          IpAddr,
    pub ip_router:            IpAddr,
    pub src_vlan:             u16,
    pub dst_vlan:             u16,
    pub out_pkts:             u64,
    pub out_bytes:            u64,
    pub aggr_flows:           u64,
    pub in_src_mac:           MacAddr,
    pub out_dst_mac:          MacAddr,
    pub in_dst_mac:           MacAddr,
    pub out_src_mac:          MacAddr,
    pub mpls_label:           [u32; MPLS_LABELS],
    pub client_nw_delay_usec: u64,
    pub server_nw_delay_usec: u64,
    pub appl_latency_usec:    u64,
    pub engine_type:          u8,
    pub engine_id:            u8,
    pub received:             u64,
    pub label:                Option<String>,
    pub extensions:           Vec<u16>,
}

impl Flow {
    pub fn is_event(&self) -> bool {
        self.flags & FLAG_EVENT != 0
    }

    pub fn is_sampled(&self) -> bool {
        self.flags & FLAG_SAMPLED != 0
    }

    pub fn is_icmp(&self) -> bool {
        self.prot == ICMP || self.prot == ICMPV6
    }

    pub fn start_ms(&self) -> u64 {
        self.first as u64 * 1000 + self.msec_first as u64
    }

    pub fn end_ms(&self) -> u64 {
        self.last as u64 * 1000 + self.msec_last as u64
    }

    /// Known extensions in list order, stopping at the first zero id.
    pub fn extensions(&self) -> impl Iterator<Item = Extension> + '_ {
        self.extensions.iter()
            .take_while(|&&id| id != 0)
            .filter_map(|&id| Extension::from_id(id))
    }
}

impl Default for Flow {
    fn default() -> Self {
        let any = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
        let mac = MacAddr::zero();
        Flow {
            flags:                0,
            first:                0,
            msec_first:           0,
            last:                 0,
            msec_last:            0,
            exporter_sysid:       0,
            prot:                 0,
            tcp_flags:            0,
            tos:                  0,
            dst_tos:              0,
            fwd_status:           0,
            src:                  any,
            dst:                  any,
            srcport:              0,
            dstport:              0,
            icmp_type:            0,
            icmp_code:            0,
            d_pkts:               0,
            d_octets:             0,
            input:                0,
            output:               0,
            srcas:                0,
            dstas:                0,
            next_as:              0,
            prev_as:              0,
            src_mask:             0,
            dst_mask:             0,
            dir:                  0,
            ip_nexthop:           any,
            bgp_nexthop:          any,
            ip_router:            any,
            src_vlan:             0,
            dst_vlan:             0,
            out_pkts:             0,
            out_bytes:            0,
            aggr_flows:           0,
            in_src_mac:           mac,
            out_dst_mac:          mac,
            in_dst_mac:           mac,
            out_src_mac:          mac,
            mpls_label:           [0; MPLS_LABELS],
            client_nw_delay_usec: 0,
            server_nw_delay_usec: 0,
            appl_latency_usec:    0,
            engine_type:          0,
            engine_id:            0,
            received:             0,
            label:                None,
            extensions:           Vec::new(),
        }
    }
}

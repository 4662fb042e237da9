use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::fs::File;
use std::hash::{Hash, Hasher};
use std::io::Write;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;
use apache_avro::{to_avro_datum, Schema, Writer};
use apache_avro::types::Value;
use log::{debug, trace, warn};
use crate::flow::{Extension, Flow};
use crate::flow::format::{ipv4_int, ipv6_ints, mpls, tcp_flags};
use super::{schema, Config, Error, Record, SCHEMA};

const MAGIC: &[u8] = b"Obj\x01";

/// Maps flows into the reused record and appends them to an Avro
/// container. Not safe for concurrent callers without external locking.
pub struct Export<W: Write> {
    writer: Writer<'static, W>,
    record: Record,
    count:  u64,
    opened: bool,
}

impl Export<File> {
    pub fn create(path: &str, cfg: Config) -> Result<Self, Error> {
        let schema = schema()?;
        let file   = File::create(path)?;
        debug!("writing flows to {}", path);
        Self::with_schema(schema, file, cfg)
    }
}

impl<W: Write> Export<W> {
    pub fn new(writer: W, cfg: Config) -> Result<Self, Error> {
        Self::with_schema(schema()?, writer, cfg)
    }

    fn with_schema(schema: &'static apache_avro::Schema, writer: W, cfg: Config) -> Result<Self, Error> {
        let record = Record::new(schema)?;

        debug!("codec {:?}, block size {}", cfg.codec, cfg.block_size);

        let writer = Writer::builder()
            .schema(schema)
            .writer(writer)
            .codec(cfg.codec)
            .block_size(cfg.block_size)
            .build();

        Ok(Self {
            writer: writer,
            record: record,
            count:  0,
            opened: false,
        })
    }

    pub fn export(&mut self, flow: &Flow) -> Result<(), Error> {
        self.record.wipe();

        map(&mut self.record, flow)?;

        trace!("flow {} -> {} proto {}", flow.src, flow.dst, flow.prot);

        self.opened = true;
        self.writer.append_value_ref(self.record.value())?;
        self.count += 1;

        Ok(())
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Export flows until the source ends, fails, or `stop` is set.
    /// The first error is returned; the caller still finishes the export.
    pub fn export_all<I>(&mut self, flows: I, stop: &AtomicBool) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = anyhow::Result<Flow>>,
    {
        for flow in flows {
            if stop.load(Ordering::Acquire) {
                warn!("interrupted after {} flows", self.count);
                break;
            }
            self.export(&flow?)?;
        }
        Ok(())
    }

    /// Flush any buffered block and return the underlying writer. An
    /// export without flows still gets a container header.
    pub fn finish(self) -> Result<W, Error> {
        debug!("finishing export after {} flows", self.count);
        let mut inner = self.writer.into_inner()?;
        if !self.opened {
            inner.write_all(&header()?)?;
        }
        Ok(inner)
    }
}

// The writer emits its header with the first append only.
fn header() -> Result<Vec<u8>, Error> {
    let meta = Schema::parse_str(r#"{"type": "map", "values": "bytes"}"#)?;

    let mut map = HashMap::new();
    map.insert("avro.schema".to_owned(), Value::Bytes(SCHEMA.as_bytes().to_vec()));
    map.insert("avro.codec".to_owned(),  Value::Bytes(b"null".to_vec()));

    let mut header = MAGIC.to_vec();
    header.extend(to_avro_datum(&meta, Value::Map(map))?);
    header.extend(&marker());
    Ok(header)
}

fn marker() -> [u8; 16] {
    let mut marker = [0u8; 16];
    for (n, chunk) in marker.chunks_mut(8).enumerate() {
        let mut hasher = DefaultHasher::new();
        (SystemTime::now(), std::process::id(), n).hash(&mut hasher);
        chunk.copy_from_slice(&hasher.finish().to_be_bytes());
    }
    marker
}

fn map(r: &mut Record, flow: &Flow) -> Result<(), Error> {
    r.set_long("start_ts", flow.start_ms() as i64);
    r.set_long("end_ts",   flow.end_ms() as i64);

    r.set_string("type", match flow.is_event() {
        true  => "EVENT",
        false => "FLOW",
    });

    r.set_boolean("sampled", flow.is_sampled());
    r.set_long("export_sysid", flow.exporter_sysid as i64);
    r.set_int("protocol", flow.prot as i32);

    addr(r, "src", flow.src);
    addr(r, "dst", flow.dst);

    if flow.is_icmp() {
        r.set_int_union("icmp_type", flow.icmp_type as i32);
        r.set_int_union("icmp_code", flow.icmp_code as i32);
    } else {
        r.set_int_union("src_port", flow.srcport as i32);
        r.set_int_union("dst_port", flow.dstport as i32);
    }

    r.set_int("fwd_status", flow.fwd_status as i32);
    r.set_string("tcp_flags", &tcp_flags(flow.tcp_flags));
    r.set_int("src_tos", flow.tos as i32);
    r.set_long("in_packets", flow.d_pkts as i64);
    r.set_long("in_bytes", flow.d_octets as i64);

    for ext in flow.extensions() {
        extension(r, flow, ext)?;
    }

    if let Some(label) = &flow.label {
        r.set_string_union("label", label);
    }

    Ok(())
}

fn extension(r: &mut Record, flow: &Flow, ext: Extension) -> Result<(), Error> {
    match ext {
        Extension::IoSnmp2 | Extension::IoSnmp4 => {
            r.set_int_union("input_snmp",  flow.input as i32);
            r.set_int_union("output_snmp", flow.output as i32);
        },
        Extension::As2 | Extension::As4 => {
            r.set_int_union("src_as", flow.srcas as i32);
            r.set_int_union("dst_as", flow.dstas as i32);
        },
        Extension::BgpAdj => {
            r.set_int_union("next_as", flow.next_as as i32);
            r.set_int_union("prev_as", flow.prev_as as i32);
        },
        Extension::Multiple => {
            r.set_int_union("src_mask",  flow.src_mask as i32);
            r.set_int_union("dst_mask",  flow.dst_mask as i32);
            r.set_int_union("dst_tos",   flow.dst_tos as i32);
            r.set_int_union("direction", flow.dir as i32);
        },
        Extension::NextHopV4 => {
            r.set_string_union("ip4_next_hop_str", &v4(ext, flow.ip_nexthop)?.to_string());
        },
        Extension::NextHopV6 => {
            r.set_string_union("ip6_next_hop_str", &v6(flow.ip_nexthop).to_string());
        },
        Extension::NextHopBgpV4 => {
            r.set_string_union("bgp4_next_hop_str", &v4(ext, flow.bgp_nexthop)?.to_string());
        },
        Extension::NextHopBgpV6 => {
            r.set_string_union("bgp6_next_hop_str", &v6(flow.bgp_nexthop).to_string());
        },
        Extension::Vlan => {
            r.set_int_union("src_vlan", flow.src_vlan as i32);
            r.set_int_union("dst_vlan", flow.dst_vlan as i32);
        },
        Extension::OutPkg4 | Extension::OutPkg8 => {
            r.set_long_union("out_packets", flow.out_pkts as i64);
        },
        Extension::OutBytes4 | Extension::OutBytes8 => {
            r.set_long_union("out_bytes", flow.out_bytes as i64);
        },
        Extension::AggrFlows4 | Extension::AggrFlows8 => {
            r.set_long_union("aggr_flows", flow.aggr_flows as i64);
        },
        Extension::Mac1 => {
            r.set_string_union("in_src_mac",  &flow.in_src_mac.to_string());
            r.set_string_union("out_dst_mac", &flow.out_dst_mac.to_string());
        },
        Extension::Mac2 => {
            r.set_string_union("in_dst_mac",  &flow.in_dst_mac.to_string());
            r.set_string_union("out_src_mac", &flow.out_src_mac.to_string());
        },
        Extension::Mpls => {
            for (n, &entry) in flow.mpls_label.iter().enumerate() {
                let name = format!("mpls_label_{:02}", n + 1);
                r.set_string_union(&name, &mpls(entry));
            }
        },
        Extension::RouterIpV4 => {
            r.set_string_union("ip4_router_str", &v4(ext, flow.ip_router)?.to_string());
        },
        Extension::RouterIpV6 => {
            r.set_string_union("ip6_router_str", &v6(flow.ip_router).to_string());
        },
        Extension::Latency => {
            r.set_double_union("cli_latency", flow.client_nw_delay_usec as f64 / 1000.0);
            r.set_double_union("srv_latency", flow.server_nw_delay_usec as f64 / 1000.0);
            r.set_double_union("app_latency", flow.appl_latency_usec as f64 / 1000.0);
        },
        Extension::RouterId => {
            r.set_int_union("engine_type", flow.engine_type as i32);
            r.set_int_union("engine_id",   flow.engine_id as i32);
        },
        Extension::Received => {
            r.set_long_union("t_received", flow.received as i64);
        },
    }
    Ok(())
}

fn addr(r: &mut Record, side: &str, ip: IpAddr) {
    match ip {
        IpAddr::V4(ip) => {
            r.set_string_union(&format!("{}_v4_str", side), &ip.to_string());
            r.set_int_union(&format!("{}_v4_int", side), ipv4_int(ip));
        },
        IpAddr::V6(ip) => {
            let (hi, lo) = ipv6_ints(ip);
            r.set_string_union(&format!("{}_v6_str", side), &ip.to_string());
            r.set_long_union(&format!("{}_v6_int_hi", side), hi);
            r.set_long_union(&format!("{}_v6_int_lo", side), lo);
        },
    }
}

// The extension id picks the field family. A v4 address under a v6 id is
// written v4-mapped; a v6 address under a v4 id must embed a v4 address.

fn v4(ext: Extension, ip: IpAddr) -> Result<Ipv4Addr, Error> {
    match ip {
        IpAddr::V4(ip) => Ok(ip),
        IpAddr::V6(v6) => v6.to_ipv4().ok_or_else(|| {
            Error::Address(format!("{:?} address {} is not IPv4", ext, v6))
        }),
    }
}

fn v6(ip: IpAddr) -> Ipv6Addr {
    match ip {
        IpAddr::V4(ip) => ip.to_ipv6_mapped(),
        IpAddr::V6(ip) => ip,
    }
}

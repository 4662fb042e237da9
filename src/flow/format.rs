use std::net::{Ipv4Addr, Ipv6Addr};

const FLAGS: [(u8, char); 6] = [
    (32, 'U'),
    (16, 'A'),
    (8,  'P'),
    (4,  'R'),
    (2,  'S'),
    (1,  'F'),
];

/// Render TCP flags as `UAPRSF` with `.` for clear bits, or as hex
/// when nonstandard bits are set.
pub fn tcp_flags(flags: u8) -> String {
    if flags > 63 {
        return format!("0x{:2x}", flags);
    }

    FLAGS.iter().map(|&(bit, c)| {
        match flags & bit {
            0 => '.',
            _ => c,
        }
    }).collect()
}

pub fn mpls(entry: u32) -> String {
    let label  = entry >> 4;
    let exp    = (entry & 0xF) >> 1;
    let bottom = entry & 1;
    format!("{}-{}-{}", label, exp, bottom)
}

// Avro lacks unsigned types, so integer renderings are cast bit for
// bit and may come out negative.

pub fn ipv4_int(ip: Ipv4Addr) -> i32 {
    u32::from(ip) as i32
}

pub fn ipv6_ints(ip: Ipv6Addr) -> (i64, i64) {
    let n = u128::from(ip);
    ((n >> 64) as u64 as i64, n as u64 as i64)
}

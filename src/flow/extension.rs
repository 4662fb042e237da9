#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Extension {
    IoSnmp2,
    IoSnmp4,
    As2,
    As4,
    Multiple,
    NextHopV4,
    NextHopV6,
    NextHopBgpV4,
    NextHopBgpV6,
    Vlan,
    OutPkg4,
    OutPkg8,
    OutBytes4,
    OutBytes8,
    AggrFlows4,
    AggrFlows8,
    Mac1,
    Mac2,
    Mpls,
    RouterIpV4,
    RouterIpV6,
    RouterId,
    BgpAdj,
    Received,
    Latency,
}

impl Extension {
    pub fn from_id(id: u16) -> Option<Self> {
        Some(match id {
            4  => Extension::IoSnmp2,
            5  => Extension::IoSnmp4,
            6  => Extension::As2,
            7  => Extension::As4,
            8  => Extension::Multiple,
            9  => Extension::NextHopV4,
            10 => Extension::NextHopV6,
            11 => Extension::NextHopBgpV4,
            12 => Extension::NextHopBgpV6,
            13 => Extension::Vlan,
            14 => Extension::OutPkg4,
            15 => Extension::OutPkg8,
            16 => Extension::OutBytes4,
            17 => Extension::OutBytes8,
            18 => Extension::AggrFlows4,
            19 => Extension::AggrFlows8,
            20 => Extension::Mac1,
            21 => Extension::Mac2,
            22 => Extension::Mpls,
            23 => Extension::RouterIpV4,
            24 => Extension::RouterIpV6,
            25 => Extension::RouterId,
            26 => Extension::BgpAdj,
            27 => Extension::Received,
            64 => Extension::Latency,
            _  => return None,
        })
    }

    pub fn id(self) -> u16 {
        match self {
            Extension::IoSnmp2      => 4,
            Extension::IoSnmp4      => 5,
            Extension::As2          => 6,
            Extension::As4          => 7,
            Extension::Multiple     => 8,
            Extension::NextHopV4    => 9,
            Extension::NextHopV6    => 10,
            Extension::NextHopBgpV4 => 11,
            Extension::NextHopBgpV6 => 12,
            Extension::Vlan         => 13,
            Extension::OutPkg4      => 14,
            Extension::OutPkg8      => 15,
            Extension::OutBytes4    => 16,
            Extension::OutBytes8    => 17,
            Extension::AggrFlows4   => 18,
            Extension::AggrFlows8   => 19,
            Extension::Mac1         => 20,
            Extension::Mac2         => 21,
            Extension::Mpls         => 22,
            Extension::RouterIpV4   => 23,
            Extension::RouterIpV6   => 24,
            Extension::RouterId     => 25,
            Extension::BgpAdj       => 26,
            Extension::Received     => 27,
            Extension::Latency      => 64,
        }
    }
}

//! 具体的なアドレス型とプロトコルパケット

pub mod network_address;
pub mod mac_address;
pub mod ipv4_address;
pub mod arp_packet;
pub mod ethernet_ii_header;

pub use network_address::NetworkAddress;
pub use mac_address::{MacAddress, MAC_LENGTH_BYTES};
pub use ipv4_address::{Ipv4Address, IPV4_LENGTH_BYTES};
pub use arp_packet::{
    AddressBinding, ArpHeader, ArpPacket, HTYPE_ETHERNET, OPER_REPLY, OPER_REQUEST, PTYPE_IPV4,
};
pub use ethernet_ii_header::EthernetIIHeader;

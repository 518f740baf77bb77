/// netfield Rust Implementation
/// ビット/バイト単位のバイナリフィールドとネットワークパケットのコーデック

pub mod netfield_common_rs;

// 便利な再エクスポート
pub mod prelude {
    pub use crate::netfield_common_rs::field::{
        ByteField, ByteOrder, DataField, DataPacket, DataUnits, FieldError, FieldResult, IndexingMode,
        RawDataField, SimpleDataField,
    };
    pub use crate::netfield_common_rs::packet::types::{
        ArpPacket, EthernetIIHeader, Ipv4Address, MacAddress, NetworkAddress,
    };
    pub use crate::netfield_common_rs::transport::{receive_field, send_field, RawTransport};
}

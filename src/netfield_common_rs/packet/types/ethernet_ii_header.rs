/// Ethernet II ヘッダ（宛先MAC、送信元MAC、EtherType）

use super::mac_address::MacAddress;
use crate::netfield_common_rs::field::data_packet::{packed_length_bits, read_fields, write_fields};
use crate::netfield_common_rs::field::{ByteOrder, DataField, FieldResult, SimpleDataField};

const ETHERNET_BYTE_ALIGNMENT: usize = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct EthernetIIHeader<'a> {
    destination: MacAddress<'a>,
    source: MacAddress<'a>,
    ether_type: SimpleDataField<u16>,
}

impl EthernetIIHeader<'_> {
    pub const LENGTH_BYTES: usize = 14;

    pub const IPV4: u16 = 0x0800;
    pub const ARP: u16 = 0x0806;
    pub const VLAN: u16 = 0x8100;
    pub const IPV6: u16 = 0x86DD;
}

impl EthernetIIHeader<'static> {
    /// MACアドレスはゼロで初期化
    pub fn new(ether_type: u16) -> Self {
        Self::with_addresses(MacAddress::new(), MacAddress::new(), ether_type)
    }
}

impl<'a> EthernetIIHeader<'a> {
    pub fn with_addresses(destination: MacAddress<'a>, source: MacAddress<'a>, ether_type: u16) -> Self {
        Self {
            destination,
            source,
            ether_type: SimpleDataField::new(ether_type),
        }
    }

    pub fn destination(&self) -> &MacAddress<'a> {
        &self.destination
    }

    pub fn destination_mut(&mut self) -> &mut MacAddress<'a> {
        &mut self.destination
    }

    pub fn source(&self) -> &MacAddress<'a> {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut MacAddress<'a> {
        &mut self.source
    }

    pub fn ether_type(&self) -> u16 {
        self.ether_type.get()
    }

    pub fn set_ether_type(&mut self, ether_type: u16) {
        self.ether_type.set(ether_type);
    }

    fn data_fields(&self) -> [&dyn DataField; 3] {
        [&self.destination, &self.source, &self.ether_type]
    }

    fn data_fields_mut(&mut self) -> [&mut dyn DataField; 3] {
        [&mut self.destination, &mut self.source, &mut self.ether_type]
    }
}

impl DataField for EthernetIIHeader<'_> {
    fn length_bits(&self) -> usize {
        packed_length_bits(&self.data_fields(), ETHERNET_BYTE_ALIGNMENT)
    }

    fn read_raw(&mut self, buffer: &[u8], byte_order: ByteOrder, offset_bits: usize) -> FieldResult<usize> {
        read_fields(&mut self.data_fields_mut(), ETHERNET_BYTE_ALIGNMENT, buffer, byte_order, offset_bits)
    }

    fn write_raw(&self, buffer: &mut [u8], byte_order: ByteOrder, offset_bits: usize) -> FieldResult<usize> {
        write_fields(&self.data_fields(), ETHERNET_BYTE_ALIGNMENT, buffer, byte_order, offset_bits)
    }
}

/// MACアドレス（6バイト）

use std::fmt;
use std::str::FromStr;

use super::network_address::{parse_separated_hex, NetworkAddress};
use crate::netfield_common_rs::field::{
    ByteField, ByteOrder, DataField, FieldError, FieldResult, FormatError, LengthMismatchError,
};

/// MACアドレスの長さ（バイト）
pub const MAC_LENGTH_BYTES: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacAddress<'a> {
    bytes: ByteField<'a>,
}

impl MacAddress<'static> {
    /// 00:00:00:00:00:00 で初期化
    pub fn new() -> Self {
        Self { bytes: ByteField::new(MAC_LENGTH_BYTES) }
    }

    pub fn from_octets(octets: [u8; MAC_LENGTH_BYTES]) -> Self {
        Self { bytes: ByteField::from_bytes(&octets) }
    }

    /// ブロードキャストアドレス ff:ff:ff:ff:ff:ff
    pub fn broadcast() -> Self {
        Self::from_octets([0xFF; MAC_LENGTH_BYTES])
    }
}

impl Default for MacAddress<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> MacAddress<'a> {
    /// `buffer` の先頭6バイトをそのまま格納領域として使う
    pub fn borrowed(buffer: &'a mut [u8]) -> FieldResult<Self> {
        if buffer.len() < MAC_LENGTH_BYTES {
            return Err(LengthMismatchError::address_length("mac", MAC_LENGTH_BYTES, buffer.len()).into());
        }
        let (head, _) = buffer.split_at_mut(MAC_LENGTH_BYTES);
        Ok(Self { bytes: ByteField::borrowed(head) })
    }

    pub fn octets(&self) -> [u8; MAC_LENGTH_BYTES] {
        let mut octets = [0u8; MAC_LENGTH_BYTES];
        octets.copy_from_slice(&self.bytes.to_vec());
        octets
    }

    /// 文字列を解析して値を置き換える（失敗時は元の値のまま）
    pub fn assign_str(&mut self, text: &str) -> FieldResult<()> {
        let octets = parse_mac(text)?;
        for (i, octet) in octets.iter().enumerate() {
            self.bytes.set_byte(i, *octet)?;
        }
        Ok(())
    }

    pub fn is_owned(&self) -> bool {
        self.bytes.is_owned()
    }

    pub fn view_mut(&mut self) -> MacAddress<'_> {
        MacAddress { bytes: self.bytes.view_mut() }
    }

    pub fn detach(&self) -> MacAddress<'static> {
        MacAddress { bytes: self.bytes.detach() }
    }
}

fn parse_mac(text: &str) -> FieldResult<[u8; MAC_LENGTH_BYTES]> {
    let bytes = parse_separated_hex(text)
        .filter(|bytes| bytes.len() == MAC_LENGTH_BYTES)
        .ok_or_else(|| FormatError::MacAddress(text.to_string()))?;
    let mut octets = [0u8; MAC_LENGTH_BYTES];
    octets.copy_from_slice(&bytes);
    Ok(octets)
}

impl FromStr for MacAddress<'static> {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_octets(parse_mac(s)?))
    }
}

impl fmt::Display for MacAddress<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = self.octets();
        write!(f, "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}", o[0], o[1], o[2], o[3], o[4], o[5])
    }
}

impl DataField for MacAddress<'_> {
    fn length_bits(&self) -> usize {
        self.bytes.length_bits()
    }

    fn read_raw(&mut self, buffer: &[u8], byte_order: ByteOrder, offset_bits: usize) -> FieldResult<usize> {
        self.bytes.read_raw(buffer, byte_order, offset_bits)
    }

    fn write_raw(&self, buffer: &mut [u8], byte_order: ByteOrder, offset_bits: usize) -> FieldResult<usize> {
        self.bytes.write_raw(buffer, byte_order, offset_bits)
    }
}

impl<'a> From<MacAddress<'a>> for NetworkAddress<'a> {
    fn from(mac: MacAddress<'a>) -> Self {
        NetworkAddress::from_byte_field(mac.bytes)
    }
}

impl<'a> TryFrom<NetworkAddress<'a>> for MacAddress<'a> {
    type Error = FieldError;

    fn try_from(address: NetworkAddress<'a>) -> Result<Self, Self::Error> {
        if address.length_bytes() != MAC_LENGTH_BYTES {
            return Err(LengthMismatchError::address_length("mac", MAC_LENGTH_BYTES, address.length_bytes()).into());
        }
        Ok(Self { bytes: address.into_byte_field() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_and_parse() {
        let mac: MacAddress = "02:42:AC:11:00:02".parse().unwrap();
        assert_eq!(mac.octets(), [0x02, 0x42, 0xac, 0x11, 0x00, 0x02]);
        assert_eq!(mac.to_string(), "02:42:ac:11:00:02");

        let dashed: MacAddress = "02-42-ac-11-00-02".parse().unwrap();
        assert_eq!(dashed, mac);
    }

    #[test]
    fn test_assign_invalid_keeps_value() {
        let mut mac = MacAddress::broadcast();
        assert!(mac.assign_str("02:42:ac").is_err());
        assert_eq!(mac, MacAddress::broadcast());
    }

    #[test]
    fn test_network_address_conversion() {
        let mac = MacAddress::from_octets([1, 2, 3, 4, 5, 6]);
        let address: NetworkAddress = mac.clone().into();
        assert_eq!(address.to_vec(), vec![1, 2, 3, 4, 5, 6]);
        let back = MacAddress::try_from(address).unwrap();
        assert_eq!(back, mac);

        assert!(MacAddress::try_from(NetworkAddress::new(4)).is_err());
    }
}

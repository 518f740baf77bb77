/// IPv4アドレス（4バイト）
/// "d.d.d.d" 形式の文字列との相互変換をサポート

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use super::network_address::NetworkAddress;
use crate::netfield_common_rs::field::{
    ByteField, ByteOrder, DataField, FieldError, FieldResult, FormatError, LengthMismatchError,
};

/// IPv4アドレスの長さ（バイト）
pub const IPV4_LENGTH_BYTES: usize = 4;

// 各要素は10進数（先頭の0は許容）
static IPV4_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+)\.(\d+)\.(\d+)\.(\d+)\s*$").expect("ipv4 pattern")
});

/// ドット区切り10進表記を4バイトに変換する
pub fn parse_ipv4(text: &str) -> FieldResult<[u8; IPV4_LENGTH_BYTES]> {
    let invalid = || FieldError::from(FormatError::Ipv4Address(text.to_string()));
    let captures = IPV4_PATTERN.captures(text).ok_or_else(invalid)?;

    let mut octets = [0u8; IPV4_LENGTH_BYTES];
    for (i, octet) in octets.iter_mut().enumerate() {
        *octet = captures[i + 1].parse::<u8>().map_err(|_| invalid())?;
    }
    Ok(octets)
}

#[derive(Debug, Clone)]
pub struct Ipv4Address<'a> {
    bytes: ByteField<'a>,
}

impl Ipv4Address<'static> {
    /// 0.0.0.0 で初期化
    pub fn new() -> Self {
        Self { bytes: ByteField::new(IPV4_LENGTH_BYTES) }
    }

    pub fn from_octets(octets: [u8; IPV4_LENGTH_BYTES]) -> Self {
        Self { bytes: ByteField::from_bytes(&octets) }
    }
}

impl Default for Ipv4Address<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Ipv4Address<'a> {
    /// `buffer` の先頭4バイトをそのまま格納領域として使う
    pub fn borrowed(buffer: &'a mut [u8]) -> FieldResult<Self> {
        if buffer.len() < IPV4_LENGTH_BYTES {
            return Err(LengthMismatchError::address_length("ipv4", IPV4_LENGTH_BYTES, buffer.len()).into());
        }
        let (head, _) = buffer.split_at_mut(IPV4_LENGTH_BYTES);
        Ok(Self { bytes: ByteField::borrowed(head) })
    }

    pub fn octets(&self) -> [u8; IPV4_LENGTH_BYTES] {
        let mut octets = [0u8; IPV4_LENGTH_BYTES];
        octets.copy_from_slice(&self.bytes.to_vec());
        octets
    }

    /// 文字列を解析して値を置き換える
    ///
    /// 4要素すべてを解析できなかった場合は元の値をそのまま残してエラーを返す
    pub fn assign_str(&mut self, text: &str) -> FieldResult<()> {
        let octets = parse_ipv4(text)?;
        for (i, octet) in octets.iter().enumerate() {
            self.bytes.set_byte(i, *octet)?;
        }
        Ok(())
    }

    pub fn is_owned(&self) -> bool {
        self.bytes.is_owned()
    }

    pub fn view_mut(&mut self) -> Ipv4Address<'_> {
        Ipv4Address { bytes: self.bytes.view_mut() }
    }

    pub fn detach(&self) -> Ipv4Address<'static> {
        Ipv4Address { bytes: self.bytes.detach() }
    }
}

impl FromStr for Ipv4Address<'static> {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_octets(parse_ipv4(s)?))
    }
}

impl TryFrom<&str> for Ipv4Address<'static> {
    type Error = FieldError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Ipv4Address<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = self.octets();
        write!(f, "{}.{}.{}.{}", o[0], o[1], o[2], o[3])
    }
}

impl From<Ipv4Addr> for Ipv4Address<'static> {
    fn from(addr: Ipv4Addr) -> Self {
        Self::from_octets(addr.octets())
    }
}

impl From<&Ipv4Address<'_>> for Ipv4Addr {
    fn from(address: &Ipv4Address<'_>) -> Self {
        Ipv4Addr::from(address.octets())
    }
}

impl<'a> From<Ipv4Address<'a>> for NetworkAddress<'a> {
    fn from(address: Ipv4Address<'a>) -> Self {
        NetworkAddress::from_byte_field(address.bytes)
    }
}

impl<'a> TryFrom<NetworkAddress<'a>> for Ipv4Address<'a> {
    type Error = FieldError;

    fn try_from(address: NetworkAddress<'a>) -> Result<Self, Self::Error> {
        if address.length_bytes() != IPV4_LENGTH_BYTES {
            return Err(LengthMismatchError::address_length("ipv4", IPV4_LENGTH_BYTES, address.length_bytes()).into());
        }
        Ok(Self { bytes: address.into_byte_field() })
    }
}

impl DataField for Ipv4Address<'_> {
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

// 比較は格納されたバイト内容のみで行う
impl PartialEq<Ipv4Address<'_>> for Ipv4Address<'_> {
    fn eq(&self, other: &Ipv4Address<'_>) -> bool {
        self.octets() == other.octets()
    }
}

impl Eq for Ipv4Address<'_> {}

// 解析できない文字列とは常に不一致
impl PartialEq<str> for Ipv4Address<'_> {
    fn eq(&self, other: &str) -> bool {
        parse_ipv4(other).map_or(false, |octets| self.octets() == octets)
    }
}

impl PartialEq<&str> for Ipv4Address<'_> {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl PartialEq<String> for Ipv4Address<'_> {
    fn eq(&self, other: &String) -> bool {
        *self == **other
    }
}

impl PartialEq<Ipv4Address<'_>> for str {
    fn eq(&self, other: &Ipv4Address<'_>) -> bool {
        *other == *self
    }
}

impl PartialEq<Ipv4Address<'_>> for &str {
    fn eq(&self, other: &Ipv4Address<'_>) -> bool {
        *other == **self
    }
}

impl PartialEq<Ipv4Address<'_>> for String {
    fn eq(&self, other: &Ipv4Address<'_>) -> bool {
        *other == **self
    }
}

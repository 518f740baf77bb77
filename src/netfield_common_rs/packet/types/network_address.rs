/// 任意長のネットワークアドレス
/// ARPのように長さがヘッダで宣言されるアドレスに使う

use std::fmt;

use crate::netfield_common_rs::field::{
    ByteField, ByteOrder, DataField, FieldResult, FormatError,
};

/// 長さ固定のバイト列アドレス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkAddress<'a> {
    bytes: ByteField<'a>,
}

impl NetworkAddress<'static> {
    /// ゼロ埋めした `length_bytes` バイトのアドレスを確保
    pub fn new(length_bytes: usize) -> Self {
        Self { bytes: ByteField::new(length_bytes) }
    }

    /// `bytes` をコピーして作成
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self { bytes: ByteField::from_bytes(bytes) }
    }

    /// `aa:bb:cc` 形式（区切りは `:` または `-`）の16進文字列から作成
    pub fn parse_hex(text: &str) -> FieldResult<Self> {
        let bytes = parse_separated_hex(text).ok_or_else(|| FormatError::Hex(text.to_string()))?;
        Ok(Self::from_bytes(&bytes))
    }
}

impl<'a> NetworkAddress<'a> {
    /// `buffer` をそのまま格納領域として使う
    pub fn borrowed(buffer: &'a mut [u8]) -> Self {
        Self { bytes: ByteField::borrowed(buffer) }
    }

    pub(crate) fn from_byte_field(bytes: ByteField<'a>) -> Self {
        Self { bytes }
    }

    pub(crate) fn into_byte_field(self) -> ByteField<'a> {
        self.bytes
    }

    pub fn is_owned(&self) -> bool {
        self.bytes.is_owned()
    }

    pub fn get_byte(&self, index: usize) -> FieldResult<u8> {
        self.bytes.get_byte(index)
    }

    pub fn set_byte(&mut self, index: usize, byte: u8) -> FieldResult<()> {
        self.bytes.set_byte(index, byte)
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    /// 別のアドレスの内容をコピー（長さ一致が必要）
    pub fn copy_from(&mut self, other: &NetworkAddress<'_>) -> FieldResult<()> {
        self.bytes.copy_from(&other.bytes)
    }

    /// 同じ領域を指す借用ビュー
    pub fn view_mut(&mut self) -> NetworkAddress<'_> {
        NetworkAddress { bytes: self.bytes.view_mut() }
    }

    /// 新しい領域へのディープコピー
    pub fn detach(&self) -> NetworkAddress<'static> {
        NetworkAddress { bytes: self.bytes.detach() }
    }
}

/// `:` または `-` 区切りの16進バイト列を解析する
pub(crate) fn parse_separated_hex(text: &str) -> Option<Vec<u8>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let separator = if text.contains('-') { '-' } else { ':' };
    text.split(separator)
        .map(|part| {
            if part.len() != 2 {
                return None;
            }
            hex::decode(part).ok().map(|decoded| decoded[0])
        })
        .collect()
}

impl DataField for NetworkAddress<'_> {
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

impl fmt::Display for NetworkAddress<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.to_vec().iter().map(|b| format!("{:02x}", b)).collect();
        write!(f, "{}", parts.join(":"))
    }
}

/// 固定幅スカラー値フィールド

use std::fmt;

use super::bit_utils::copy_bits;
use super::data_field::DataField;
use super::exceptions::FieldResult;
use super::misc::{ByteOrder, Scalar};

/// プリミティブ値1つを保持するフィールド
///
/// サイズは型のネイティブ幅。読み書きは指定されたバイト順序で行う
/// （Native はホストのバイト順そのまま）。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimpleDataField<T: Scalar> {
    value: T,
}

impl<T: Scalar> SimpleDataField<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn get(&self) -> T {
        self.value
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
    }
}

impl<T: Scalar> From<T> for SimpleDataField<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Scalar + fmt::Display> fmt::Display for SimpleDataField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl<T: Scalar> DataField for SimpleDataField<T> {
    fn length_bits(&self) -> usize {
        T::bit_width()
    }

    fn read_raw(&mut self, buffer: &[u8], byte_order: ByteOrder, offset_bits: usize) -> FieldResult<usize> {
        let mut bytes = [0u8; 16];
        let bytes = &mut bytes[..T::SIZE_BYTES];
        let consumed = copy_bits(buffer, offset_bits, bytes, 0, T::bit_width())?;
        self.value = T::take_bytes(byte_order, bytes);
        Ok(consumed)
    }

    fn write_raw(&self, buffer: &mut [u8], byte_order: ByteOrder, offset_bits: usize) -> FieldResult<usize> {
        let mut bytes = [0u8; 16];
        let bytes = &mut bytes[..T::SIZE_BYTES];
        self.value.put_bytes(byte_order, bytes);
        copy_bits(bytes, 0, buffer, offset_bits, T::bit_width())
    }
}

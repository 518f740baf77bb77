/// バイト単位でアクセスするフィールド
/// RawDataField と同じ格納方式・インデックス規則をバイト粒度だけで公開する

use super::data_field::DataField;
use super::exceptions::FieldResult;
use super::misc::{ByteOrder, DataUnits, IndexingMode};
use super::raw_data_field::RawDataField;
use super::storage::Storage;

/// バイト列フィールド
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteField<'a> {
    raw: RawDataField<'a>,
}

impl ByteField<'static> {
    /// ゼロ埋めした `length_bytes` バイトのフィールドを確保
    pub fn new(length_bytes: usize) -> Self {
        Self::with_indexing_mode(length_bytes, IndexingMode::LeastSignificantFirst)
    }

    pub fn with_indexing_mode(length_bytes: usize, indexing_mode: IndexingMode) -> Self {
        Self {
            raw: RawDataField::new(length_bytes, DataUnits::Bytes, indexing_mode),
        }
    }

    /// `bytes` 全体を新しい領域へコピーして作成
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            raw: RawDataField::from_storage(Storage::copied(bytes), IndexingMode::LeastSignificantFirst),
        }
    }
}

impl<'a> ByteField<'a> {
    /// `buffer` 全体をそのまま格納領域として使う
    pub fn borrowed(buffer: &'a mut [u8]) -> Self {
        Self::borrowed_with_mode(buffer, IndexingMode::LeastSignificantFirst)
    }

    pub fn borrowed_with_mode(buffer: &'a mut [u8], indexing_mode: IndexingMode) -> Self {
        Self {
            raw: RawDataField::from_storage(Storage::Borrowed(buffer), indexing_mode),
        }
    }

    pub fn indexing_mode(&self) -> IndexingMode {
        self.raw.indexing_mode()
    }

    pub fn is_owned(&self) -> bool {
        self.raw.is_owned()
    }

    /// 指定バイトを取得
    pub fn get_byte(&self, index: usize) -> FieldResult<u8> {
        self.raw.get_byte(index)
    }

    /// 指定バイトを設定
    pub fn set_byte(&mut self, index: usize, byte: u8) -> FieldResult<()> {
        self.raw.set_byte(index, byte)
    }

    /// 論理順のバイト列
    pub fn to_vec(&self) -> Vec<u8> {
        let mut bytes = self.raw.as_raw_bytes().to_vec();
        if self.indexing_mode() == IndexingMode::MostSignificantFirst {
            bytes.reverse();
        }
        bytes
    }

    /// 物理順の生バイト列
    pub fn as_raw_bytes(&self) -> &[u8] {
        self.raw.as_raw_bytes()
    }

    /// 別のフィールドの内容をコピー（長さ一致が必要）
    pub fn copy_from(&mut self, other: &ByteField<'_>) -> FieldResult<()> {
        self.raw.copy_from(&other.raw)
    }

    /// 同じ領域を指す借用ビュー
    pub fn view_mut(&mut self) -> ByteField<'_> {
        ByteField { raw: self.raw.view_mut() }
    }

    /// 新しい領域へのディープコピー
    pub fn detach(&self) -> ByteField<'static> {
        ByteField { raw: self.raw.detach() }
    }
}

// 生データなのでバイト順序の指定にかかわらず格納順のままコピーする
impl DataField for ByteField<'_> {
    fn length_bits(&self) -> usize {
        self.raw.length_bits()
    }

    fn read_raw(&mut self, buffer: &[u8], byte_order: ByteOrder, offset_bits: usize) -> FieldResult<usize> {
        self.raw.read_raw(buffer, byte_order, offset_bits)
    }

    fn write_raw(&self, buffer: &mut [u8], byte_order: ByteOrder, offset_bits: usize) -> FieldResult<usize> {
        self.raw.write_raw(buffer, byte_order, offset_bits)
    }
}

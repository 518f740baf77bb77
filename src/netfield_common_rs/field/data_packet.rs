/// 複合パケット
/// 登録順にフィールドを並べ、各フィールドの後ろにアライメント用のパディングを入れる

use log::trace;

use super::bit_utils::{bits_to_bytes, check_span};
use super::data_field::DataField;
use super::exceptions::{FieldResult, RangeError};
use super::misc::{ByteOrder, BITS_PER_BYTE};

/// フィールド長 `field_length_bytes` の後ろに必要なパディングバイト数
///
/// `(alignment - n mod alignment) mod alignment`
pub fn compute_padding(byte_alignment: usize, field_length_bytes: usize) -> usize {
    let extra_bytes = field_length_bytes % byte_alignment;
    if extra_bytes > 0 {
        byte_alignment - extra_bytes
    } else {
        0
    }
}

/// パディング込みの合計ビット数
pub(crate) fn packed_length_bits(fields: &[&dyn DataField], byte_alignment: usize) -> usize {
    fields
        .iter()
        .map(|field| {
            let length = field.length_bytes();
            (length + compute_padding(byte_alignment, length)) * BITS_PER_BYTE
        })
        .sum()
}

/// フィールドを順に読み込む（最後のフィールドの後ろにもパディングを入れる）
///
/// バッファが全体の長さに足りない場合はどのフィールドも変更せずにエラーを返す
pub(crate) fn read_fields(
    fields: &mut [&mut dyn DataField],
    byte_alignment: usize,
    buffer: &[u8],
    byte_order: ByteOrder,
    offset_bits: usize,
) -> FieldResult<usize> {
    let total_bits: usize = fields
        .iter()
        .map(|field| {
            let length = field.length_bytes();
            (length + compute_padding(byte_alignment, length)) * BITS_PER_BYTE
        })
        .sum();
    check_span(buffer.len(), offset_bits, total_bits)?;

    let mut offset = offset_bits;
    for (index, field) in fields.iter_mut().enumerate() {
        let length = bits_to_bytes(field.read_raw(buffer, byte_order, offset)?);
        let padding = compute_padding(byte_alignment, length);
        trace!("read field #{} at bit {}: {} bytes + {} padding", index, offset, length, padding);
        offset += (length + padding) * BITS_PER_BYTE;
    }
    Ok(offset - offset_bits)
}

/// フィールドを順に書き込む（パディング部分の内容は変更しない）
pub(crate) fn write_fields(
    fields: &[&dyn DataField],
    byte_alignment: usize,
    buffer: &mut [u8],
    byte_order: ByteOrder,
    offset_bits: usize,
) -> FieldResult<usize> {
    let mut offset = offset_bits;
    for (index, field) in fields.iter().enumerate() {
        let length = bits_to_bytes(field.write_raw(buffer, byte_order, offset)?);
        let padding = compute_padding(byte_alignment, length);
        trace!("wrote field #{} at bit {}: {} bytes + {} padding", index, offset, length, padding);
        offset += (length + padding) * BITS_PER_BYTE;
    }
    Ok(offset - offset_bits)
}

/// 借用したフィールドの順序付きリスト
///
/// フィールドの所有権は持たない。登録順がそのまま読み書きの順序になる。
pub struct DataPacket<'f> {
    byte_alignment: usize,
    data_fields: Vec<&'f mut dyn DataField>,
}

impl<'f> DataPacket<'f> {
    /// 新しい空のパケットを作成（アライメントは1以上）
    pub fn new(byte_alignment: usize) -> FieldResult<Self> {
        if byte_alignment == 0 {
            return Err(RangeError::InvalidAlignment(byte_alignment).into());
        }
        Ok(Self {
            byte_alignment,
            data_fields: Vec::new(),
        })
    }

    /// フィールドを末尾に追加
    pub fn add_data_field(&mut self, field: &'f mut dyn DataField) -> &mut Self {
        self.data_fields.push(field);
        self
    }

    pub fn byte_alignment(&self) -> usize {
        self.byte_alignment
    }

    pub fn field_count(&self) -> usize {
        self.data_fields.len()
    }

    /// このパケットのアライメントでのパディング量
    pub fn compute_padding(&self, field_length_bytes: usize) -> usize {
        compute_padding(self.byte_alignment, field_length_bytes)
    }

    fn shared_fields(&self) -> Vec<&dyn DataField> {
        self.data_fields.iter().map(|field| &**field as &dyn DataField).collect()
    }
}

impl DataField for DataPacket<'_> {
    fn length_bits(&self) -> usize {
        packed_length_bits(&self.shared_fields(), self.byte_alignment)
    }

    fn read_raw(&mut self, buffer: &[u8], byte_order: ByteOrder, offset_bits: usize) -> FieldResult<usize> {
        read_fields(&mut self.data_fields, self.byte_alignment, buffer, byte_order, offset_bits)
    }

    fn write_raw(&self, buffer: &mut [u8], byte_order: ByteOrder, offset_bits: usize) -> FieldResult<usize> {
        write_fields(&self.shared_fields(), self.byte_alignment, buffer, byte_order, offset_bits)
    }
}

/// ビット単位でアクセスできる生データフィールド
/// 格納領域は自前確保（Owned）か呼び出し側の領域の借用（Borrowed）

use bitvec::prelude::*;

use super::bit_utils::{bits_to_bytes, check_span, copy_bits};
use super::data_field::DataField;
use super::exceptions::{FieldResult, LengthMismatchError, RangeError};
use super::misc::{ByteOrder, DataUnits, IndexingMode, Scalar, BITS_PER_BYTE};
use super::storage::Storage;

/// 可変長のビットバッファ
///
/// ビット長は構築時に決まり、以後変わらない。論理インデックスから物理位置への
/// 対応は `IndexingMode` に従い、MostSignificantFirst では反転する。
/// 物理ビット p はバイト p/8 の p%8 ビット目（LSB基準）。
#[derive(Debug)]
pub struct RawDataField<'a> {
    storage: Storage<'a>,
    length_bits: usize,
    indexing_mode: IndexingMode,
}

impl RawDataField<'static> {
    /// ゼロ埋めした領域を確保して新しいフィールドを作成
    pub fn new(length: usize, length_units: DataUnits, indexing_mode: IndexingMode) -> Self {
        let length_bits = length_units.to_bits(length);
        Self {
            storage: Storage::zeroed(bits_to_bytes(length_bits)),
            length_bits,
            indexing_mode,
        }
    }

    /// `buffer` の内容を新しく確保した領域へコピーして作成
    pub fn from_bytes(
        buffer: &[u8],
        length: usize,
        length_units: DataUnits,
        indexing_mode: IndexingMode,
    ) -> FieldResult<Self> {
        let length_bits = length_units.to_bits(length);
        let length_bytes = bits_to_bytes(length_bits);
        check_span(buffer.len(), 0, length_bits)?;
        Ok(Self {
            storage: Storage::copied(&buffer[..length_bytes]),
            length_bits,
            indexing_mode,
        })
    }
}

impl<'a> RawDataField<'a> {
    /// `buffer` をそのまま格納領域として使うフィールドを作成
    ///
    /// 領域の寿命は呼び出し側が管理する。このフィールドは確保も解放もしない。
    pub fn borrowed(
        buffer: &'a mut [u8],
        length: usize,
        length_units: DataUnits,
        indexing_mode: IndexingMode,
    ) -> FieldResult<Self> {
        let length_bits = length_units.to_bits(length);
        let length_bytes = bits_to_bytes(length_bits);
        check_span(buffer.len(), 0, length_bits)?;
        let (head, _) = buffer.split_at_mut(length_bytes);
        Ok(Self {
            storage: Storage::Borrowed(head),
            length_bits,
            indexing_mode,
        })
    }

    /// バイト単位の格納領域から直接作成
    pub(crate) fn from_storage(storage: Storage<'a>, indexing_mode: IndexingMode) -> Self {
        let length_bits = storage.len() * BITS_PER_BYTE;
        Self {
            storage,
            length_bits,
            indexing_mode,
        }
    }

    pub fn indexing_mode(&self) -> IndexingMode {
        self.indexing_mode
    }

    /// 格納領域を自前で管理しているか
    pub fn is_owned(&self) -> bool {
        self.storage.is_owned()
    }

    /// 物理順の生バイト列
    pub fn as_raw_bytes(&self) -> &[u8] {
        &self.storage
    }

    /// 同じ領域を指す借用フィールドを作る（書き込みは互いに見える）
    pub fn view_mut(&mut self) -> RawDataField<'_> {
        RawDataField {
            storage: self.storage.reborrow(),
            length_bits: self.length_bits,
            indexing_mode: self.indexing_mode,
        }
    }

    /// 新しく確保した領域へ内容をディープコピーする
    pub fn detach(&self) -> RawDataField<'static> {
        RawDataField {
            storage: Storage::copied(&self.storage),
            length_bits: self.length_bits,
            indexing_mode: self.indexing_mode,
        }
    }

    /// 別のフィールドの内容を自分の領域へコピーする（長さは一致している必要がある）
    pub fn copy_from(&mut self, other: &RawDataField<'_>) -> FieldResult<()> {
        if other.length_bits != self.length_bits {
            return Err(LengthMismatchError::FieldLength {
                expected: self.length_bits,
                actual: other.length_bits,
            }
            .into());
        }
        let bytes = self.storage.len();
        self.storage.copy_from_slice(&other.storage[..bytes]);
        Ok(())
    }

    fn physical_bit(&self, index: usize) -> FieldResult<usize> {
        if index >= self.length_bits {
            return Err(RangeError::index_out_of_range(index, self.length_bits).into());
        }
        Ok(self.indexing_mode.physical_index(index, self.length_bits))
    }

    fn physical_byte(&self, index: usize) -> FieldResult<usize> {
        let length_bytes = self.storage.len();
        if index >= length_bytes {
            return Err(RangeError::index_out_of_range(index, length_bytes).into());
        }
        Ok(self.indexing_mode.physical_index(index, length_bytes))
    }

    /// 指定ビットを取得
    pub fn get_bit(&self, index: usize) -> FieldResult<bool> {
        let p = self.physical_bit(index)?;
        Ok(BitSlice::<u8, Lsb0>::from_slice(&self.storage)[p])
    }

    /// 指定ビットを設定
    pub fn set_bit(&mut self, index: usize, value: bool) -> FieldResult<()> {
        let p = self.physical_bit(index)?;
        BitSlice::<u8, Lsb0>::from_slice_mut(&mut self.storage).set(p, value);
        Ok(())
    }

    /// 指定バイトを取得
    pub fn get_byte(&self, index: usize) -> FieldResult<u8> {
        let p = self.physical_byte(index)?;
        Ok(self.storage[p])
    }

    /// 指定バイトを設定
    pub fn set_byte(&mut self, index: usize, value: u8) -> FieldResult<()> {
        let p = self.physical_byte(index)?;
        self.storage[p] = value;
        Ok(())
    }

    fn check_bit_range(&self, start_bit: usize, count: usize) -> FieldResult<()> {
        let end = start_bit.checked_add(count);
        if start_bit >= self.length_bits || end.map_or(true, |end| end > self.length_bits) {
            return Err(RangeError::BitsOutOfRange {
                start: start_bit,
                count,
                length: self.length_bits,
            }
            .into());
        }
        Ok(())
    }

    /// `start_bit` から `count` ビットを取り出してスカラー値として返す
    ///
    /// スカラー値を同じインデックス方向のビット列として重ね、1ビットずつコピーする。
    /// スカラー値のビットは有効桁の順で解釈する（LeastSignificantFirst なら
    /// 取り出したビット列の先頭が値の最下位ビットになる）。
    pub fn get_bits_as_scalar<T: Scalar>(&self, start_bit: usize, count: usize) -> FieldResult<T> {
        self.check_bit_range(start_bit, count)?;
        if count > T::bit_width() {
            return Err(RangeError::DestinationTooNarrow { count, width: T::bit_width() }.into());
        }

        let mut scratch_bytes = [0u8; 16];
        let scratch = &mut scratch_bytes[..T::SIZE_BYTES];
        {
            let mut working = RawDataField::borrowed(scratch, T::SIZE_BYTES, DataUnits::Bytes, self.indexing_mode)?;
            for i in 0..count {
                working.set_bit(i, self.get_bit(start_bit + i)?)?;
            }
        }

        Ok(T::take_bytes(ByteOrder::Little, scratch))
    }

    /// スカラー値の `count` ビットを `start_bit` 以降へ書き込む
    ///
    /// 取り出しと同じ重ね方なので、LeastSignificantFirst では値の下位側、
    /// MostSignificantFirst では値の上位側から `count` ビットが使われる。
    pub fn set_bits_as_scalar<T: Scalar>(&mut self, value: T, start_bit: usize, count: usize) -> FieldResult<()> {
        self.check_bit_range(start_bit, count)?;
        if count > T::bit_width() {
            return Err(RangeError::SourceTooNarrow { count, width: T::bit_width() }.into());
        }

        let mut scratch_bytes = [0u8; 16];
        let scratch = &mut scratch_bytes[..T::SIZE_BYTES];
        value.put_bytes(ByteOrder::Little, scratch);
        let working = RawDataField::borrowed(scratch, T::SIZE_BYTES, DataUnits::Bytes, self.indexing_mode)?;

        for i in 0..count {
            self.set_bit(start_bit + i, working.get_bit(i)?)?;
        }

        Ok(())
    }

    fn check_shift(&self, shift_bits: usize) -> FieldResult<()> {
        if shift_bits >= self.length_bits {
            return Err(RangeError::ShiftTooLarge {
                shift: shift_bits,
                width: self.length_bits,
            }
            .into());
        }
        Ok(())
    }

    /// 論理左シフト（上位インデックス方向へ移動し、下位を0で埋める）
    pub fn shift_left(&mut self, shift_bits: usize) -> FieldResult<()> {
        self.check_shift(shift_bits)?;
        if shift_bits == 0 {
            return Ok(());
        }

        for i in (shift_bits..self.length_bits).rev() {
            let bit = self.get_bit(i - shift_bits)?;
            self.set_bit(i, bit)?;
        }
        for i in 0..shift_bits {
            self.set_bit(i, false)?;
        }

        Ok(())
    }

    /// 論理右シフト（下位インデックス方向へ移動し、上位を0で埋める）
    pub fn shift_right(&mut self, shift_bits: usize) -> FieldResult<()> {
        self.check_shift(shift_bits)?;
        if shift_bits == 0 {
            return Ok(());
        }

        for i in 0..self.length_bits - shift_bits {
            let bit = self.get_bit(i + shift_bits)?;
            self.set_bit(i, bit)?;
        }
        for i in self.length_bits - shift_bits..self.length_bits {
            self.set_bit(i, false)?;
        }

        Ok(())
    }

    /// 左シフトしたコピーを返す
    pub fn shifted_left(&self, shift_bits: usize) -> FieldResult<RawDataField<'static>> {
        let mut shifted = self.detach();
        shifted.shift_left(shift_bits)?;
        Ok(shifted)
    }

    /// 右シフトしたコピーを返す
    pub fn shifted_right(&self, shift_bits: usize) -> FieldResult<RawDataField<'static>> {
        let mut shifted = self.detach();
        shifted.shift_right(shift_bits)?;
        Ok(shifted)
    }
}

// 生データなのでバイト順序の指定にかかわらず格納順のままコピーする
impl DataField for RawDataField<'_> {
    fn length_bits(&self) -> usize {
        self.length_bits
    }

    fn read_raw(&mut self, buffer: &[u8], _byte_order: ByteOrder, offset_bits: usize) -> FieldResult<usize> {
        copy_bits(buffer, offset_bits, &mut self.storage, 0, self.length_bits)
    }

    fn write_raw(&self, buffer: &mut [u8], _byte_order: ByteOrder, offset_bits: usize) -> FieldResult<usize> {
        copy_bits(&self.storage, 0, buffer, offset_bits, self.length_bits)
    }
}

/// コピーは格納方式にかかわらず常に新しい領域を確保する
impl Clone for RawDataField<'_> {
    fn clone(&self) -> Self {
        self.detach()
    }
}

// 長さが同じで格納領域の全バイトが一致すれば等しい（末尾の未使用ビットも比較対象）
impl PartialEq<RawDataField<'_>> for RawDataField<'_> {
    fn eq(&self, other: &RawDataField<'_>) -> bool {
        self.length_bits == other.length_bits && self.storage[..] == other.storage[..]
    }
}

impl Eq for RawDataField<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_field_is_zeroed() {
        let field = RawDataField::new(12, DataUnits::Bits, IndexingMode::LeastSignificantFirst);
        assert_eq!(field.length_bits(), 12);
        assert_eq!(field.length_bytes(), 2);
        assert!(field.is_owned());
        for i in 0..12 {
            assert!(!field.get_bit(i).unwrap());
        }
    }

    #[test]
    fn test_bit_indexing_modes() {
        let mut ls = RawDataField::new(1, DataUnits::Bytes, IndexingMode::LeastSignificantFirst);
        ls.set_bit(0, true).unwrap();
        assert_eq!(ls.as_raw_bytes(), &[0b0000_0001]);

        let mut ms = RawDataField::new(1, DataUnits::Bytes, IndexingMode::MostSignificantFirst);
        ms.set_bit(0, true).unwrap();
        assert_eq!(ms.as_raw_bytes(), &[0b1000_0000]);
    }

    #[test]
    fn test_out_of_range_bit() {
        let mut field = RawDataField::new(4, DataUnits::Bits, IndexingMode::LeastSignificantFirst);
        assert!(field.get_bit(4).is_err());
        assert!(field.set_bit(4, true).is_err());
        assert!(field.get_byte(1).is_err());
    }

    #[test]
    fn test_get_bits_as_scalar() {
        let field = RawDataField::from_bytes(&[0b1101_0110], 1, DataUnits::Bytes, IndexingMode::LeastSignificantFirst).unwrap();
        assert_eq!(field.get_bits_as_scalar::<u8>(0, 4).unwrap(), 0b0110);
        assert_eq!(field.get_bits_as_scalar::<u8>(2, 4).unwrap(), 0b0101);
        assert_eq!(field.get_bits_as_scalar::<u16>(4, 4).unwrap(), 0b1101);
    }

    #[test]
    fn test_set_bits_as_scalar() {
        let mut field = RawDataField::new(2, DataUnits::Bytes, IndexingMode::LeastSignificantFirst);
        field.set_bits_as_scalar(0xABu8, 4, 8).unwrap();
        assert_eq!(field.as_raw_bytes(), &[0xB0, 0x0A]);
        assert_eq!(field.get_bits_as_scalar::<u32>(4, 8).unwrap(), 0xAB);
    }

    #[test]
    fn test_scalar_range_errors() {
        let field = RawDataField::new(16, DataUnits::Bits, IndexingMode::LeastSignificantFirst);
        assert!(matches!(
            field.get_bits_as_scalar::<u8>(10, 8),
            Err(crate::netfield_common_rs::field::exceptions::FieldError::Range(RangeError::BitsOutOfRange { .. }))
        ));
        assert!(matches!(
            field.get_bits_as_scalar::<u8>(0, 9),
            Err(crate::netfield_common_rs::field::exceptions::FieldError::Range(RangeError::DestinationTooNarrow { .. }))
        ));
    }

    #[test]
    fn test_shift() {
        let mut field = RawDataField::from_bytes(&[0b0000_0011], 8, DataUnits::Bits, IndexingMode::LeastSignificantFirst).unwrap();
        field.shift_left(2).unwrap();
        assert_eq!(field.as_raw_bytes(), &[0b0000_1100]);
        field.shift_right(3).unwrap();
        assert_eq!(field.as_raw_bytes(), &[0b0000_0001]);
        assert!(field.shift_left(8).is_err());
    }

    #[test]
    fn test_view_mut_aliases() {
        let mut field = RawDataField::new(1, DataUnits::Bytes, IndexingMode::LeastSignificantFirst);
        {
            let mut view = field.view_mut();
            assert!(!view.is_owned());
            view.set_byte(0, 0x5A).unwrap();
        }
        assert_eq!(field.get_byte(0).unwrap(), 0x5A);
    }

    #[test]
    fn test_equality_compares_every_byte() {
        let a = RawDataField::from_bytes(&[0x0F], 4, DataUnits::Bits, IndexingMode::LeastSignificantFirst).unwrap();
        let b = RawDataField::from_bytes(&[0xFF], 4, DataUnits::Bits, IndexingMode::LeastSignificantFirst).unwrap();
        let c = RawDataField::from_bytes(&[0x0F], 5, DataUnits::Bits, IndexingMode::LeastSignificantFirst).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_bit_range_overflow() {
        let field = RawDataField::new(16, DataUnits::Bits, IndexingMode::LeastSignificantFirst);
        assert!(matches!(
            field.get_bits_as_scalar::<u8>(1, usize::MAX),
            Err(crate::netfield_common_rs::field::exceptions::FieldError::Range(RangeError::BitsOutOfRange { .. }))
        ));
    }
}

/// フィールドの基本trait
/// ビット、バイト、スカラー値、複合パケットのすべてがこの契約を実装する

use super::bit_utils::bits_to_bytes;
use super::exceptions::FieldResult;
use super::misc::ByteOrder;

/// バッファとの間で自身を読み書きできるバイナリデータの単位
pub trait DataField {
    /// フィールドのビット長（内容ではなく構成だけで決まる）
    fn length_bits(&self) -> usize;

    /// フィールドのバイト長（ビット長の切り上げ）
    fn length_bytes(&self) -> usize {
        bits_to_bytes(self.length_bits())
    }

    /// `buffer` の `offset_bits` ビット目から読み込み、消費したビット数を返す
    fn read_raw(&mut self, buffer: &[u8], byte_order: ByteOrder, offset_bits: usize) -> FieldResult<usize>;

    /// `buffer` の `offset_bits` ビット目へ書き込み、書き込んだビット数を返す
    fn write_raw(&self, buffer: &mut [u8], byte_order: ByteOrder, offset_bits: usize) -> FieldResult<usize>;

    /// バッファ先頭から読み込む
    fn read_from(&mut self, buffer: &[u8], byte_order: ByteOrder) -> FieldResult<usize> {
        self.read_raw(buffer, byte_order, 0)
    }

    /// バッファ先頭へ書き込む
    fn write_to(&self, buffer: &mut [u8], byte_order: ByteOrder) -> FieldResult<usize> {
        self.write_raw(buffer, byte_order, 0)
    }

    /// 新しいバッファへ書き出す
    fn to_bytes(&self, byte_order: ByteOrder) -> FieldResult<Vec<u8>> {
        let mut buffer = vec![0u8; self.length_bytes()];
        self.write_raw(&mut buffer, byte_order, 0)?;
        Ok(buffer)
    }
}

/// ビット操作ユーティリティ
/// バッファ上の任意ビット位置へのコピーとバイト数計算

use bitvec::prelude::*;

use super::exceptions::{FieldResult, RangeError};
use super::misc::BITS_PER_BYTE;

/// ビット数を格納に必要なバイト数に変換する（切り上げ）
pub fn bits_to_bytes(bits: usize) -> usize {
    bits.div_ceil(BITS_PER_BYTE)
}

/// `offset_bits` から `count` ビットがバッファに収まるか確認する
///
/// Returns:
///     収まらない場合は必要バイト数を含む InsufficientBuffer
pub fn check_span(buffer_len: usize, offset_bits: usize, count: usize) -> FieldResult<()> {
    let end_bits = offset_bits.checked_add(count).ok_or(RangeError::BitsOutOfRange {
        start: offset_bits,
        count,
        length: buffer_len.saturating_mul(BITS_PER_BYTE),
    })?;
    let required = bits_to_bytes(end_bits);
    if required > buffer_len {
        return Err(RangeError::insufficient_buffer(required, buffer_len).into());
    }
    Ok(())
}

/// `src` の `src_offset` ビット目から `count` ビットを `dst` の `dst_offset` ビット目へコピーする
///
/// ビット位置はバイト内LSB基準（ビット p はバイト p/8 の p%8 ビット目）。
/// 両方のオフセットがバイト境界で `count` が8の倍数なら単純なバイトコピーと同じ結果になる。
/// 範囲外のビットには触れない。
pub fn copy_bits(
    src: &[u8],
    src_offset: usize,
    dst: &mut [u8],
    dst_offset: usize,
    count: usize,
) -> FieldResult<usize> {
    check_span(src.len(), src_offset, count)?;
    check_span(dst.len(), dst_offset, count)?;

    if count == 0 {
        return Ok(0);
    }

    // バイト境界に揃っている場合は直接コピー
    if src_offset % BITS_PER_BYTE == 0 && dst_offset % BITS_PER_BYTE == 0 && count % BITS_PER_BYTE == 0 {
        let s = src_offset / BITS_PER_BYTE;
        let d = dst_offset / BITS_PER_BYTE;
        let n = count / BITS_PER_BYTE;
        dst[d..d + n].copy_from_slice(&src[s..s + n]);
        return Ok(count);
    }

    let src_bits = BitSlice::<u8, Lsb0>::from_slice(src);
    let dst_bits = BitSlice::<u8, Lsb0>::from_slice_mut(dst);
    dst_bits[dst_offset..dst_offset + count].copy_from_bitslice(&src_bits[src_offset..src_offset + count]);

    Ok(count)
}

/// バッファの内容をその場で反転する
///
/// 例えば4バイトの整数1つ分を入れ替える場合は長さ4のスライスを渡す
pub fn byteswap(buffer: &mut [u8]) {
    buffer.reverse();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netfield_common_rs::field::exceptions::FieldError;

    #[test]
    fn test_bits_to_bytes() {
        assert_eq!(bits_to_bytes(0), 0);
        assert_eq!(bits_to_bytes(1), 1);
        assert_eq!(bits_to_bytes(8), 1);
        assert_eq!(bits_to_bytes(19), 3); // (19 + 7) / 8 = 3
    }

    #[test]
    fn test_copy_bits_aligned() {
        let src = [0x12, 0x34, 0x56];
        let mut dst = [0u8; 4];
        let copied = copy_bits(&src, 8, &mut dst, 16, 16).unwrap();
        assert_eq!(copied, 16);
        assert_eq!(dst, [0x00, 0x00, 0x34, 0x56]);
    }

    #[test]
    fn test_copy_bits_unaligned() {
        let src = [0b0000_1111u8];
        let mut dst = [0u8; 2];

        // 下位4ビットを dst の 6 ビット目から配置
        copy_bits(&src, 0, &mut dst, 6, 4).unwrap();
        assert_eq!(dst, [0b1100_0000, 0b0000_0011]);
    }

    #[test]
    fn test_copy_bits_leaves_other_bits() {
        let src = [0x00u8];
        let mut dst = [0xFFu8];
        copy_bits(&src, 0, &mut dst, 2, 3).unwrap();
        assert_eq!(dst[0], 0b1110_0011);
    }

    #[test]
    fn test_copy_bits_insufficient() {
        let src = [0u8; 2];
        let mut dst = [0u8; 1];
        let err = copy_bits(&src, 0, &mut dst, 0, 16).unwrap_err();
        assert_eq!(err, FieldError::from(RangeError::insufficient_buffer(2, 1)));
    }

    #[test]
    fn test_copy_bits_overflowing_count() {
        let src = [0u8; 2];
        let mut dst = [0u8; 2];
        assert!(matches!(
            copy_bits(&src, 8, &mut dst, 0, usize::MAX),
            Err(FieldError::Range(RangeError::BitsOutOfRange { .. }))
        ));
        assert_eq!(bits_to_bytes(usize::MAX), usize::MAX / 8 + 1);
    }

    #[test]
    fn test_byteswap() {
        let mut buf = [1u8, 2, 3, 4];
        byteswap(&mut buf);
        assert_eq!(buf, [4, 3, 2, 1]);

        let mut odd = [1u8, 2, 3];
        byteswap(&mut odd);
        assert_eq!(odd, [3, 2, 1]);
    }
}

/// バイト順序・インデックス方向・長さ単位などの共通定義

use serde::{Deserialize, Serialize};

/// 1バイトのビット数
pub const BITS_PER_BYTE: usize = 8;

/// バイト順序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    /// ビッグエンディアン（ネットワークバイト順）
    #[serde(alias = "big_endian", alias = "network")]
    Big,
    /// リトルエンディアン
    #[serde(alias = "little_endian")]
    Little,
    /// ホストのバイト順
    #[serde(alias = "host")]
    Native,
}

impl ByteOrder {
    /// ホストのバイト順を具体的な値で返す
    pub fn host() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        }
    }

    /// Native をホストの具体的なバイト順に解決する
    pub fn resolve(self) -> Self {
        match self {
            ByteOrder::Native => Self::host(),
            other => other,
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "big" | "big_endian" | "network" => Ok(ByteOrder::Big),
            "little" | "little_endian" => Ok(ByteOrder::Little),
            "native" | "host" => Ok(ByteOrder::Native),
            _ => Err(format!("Invalid byte order: {}", s)),
        }
    }
}

impl Default for ByteOrder {
    fn default() -> Self {
        ByteOrder::Native
    }
}

/// 論理インデックスから物理位置への対応規則
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexingMode {
    /// インデックス0が最下位（物理位置 = i）
    LeastSignificantFirst,
    /// インデックス0が最上位（物理位置 = 長さ - i - 1）
    MostSignificantFirst,
}

impl IndexingMode {
    /// 長さ `length` の領域で論理インデックスを物理位置に変換する
    ///
    /// 範囲チェックは呼び出し側で済ませておくこと
    pub fn physical_index(self, index: usize, length: usize) -> usize {
        match self {
            IndexingMode::LeastSignificantFirst => index,
            IndexingMode::MostSignificantFirst => length - index - 1,
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "least_significant_first" | "ls_zero" | "lsb" => Ok(IndexingMode::LeastSignificantFirst),
            "most_significant_first" | "ms_zero" | "msb" => Ok(IndexingMode::MostSignificantFirst),
            _ => Err(format!("Invalid indexing mode: {}", s)),
        }
    }
}

impl Default for IndexingMode {
    fn default() -> Self {
        IndexingMode::LeastSignificantFirst
    }
}

/// 長さの単位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataUnits {
    Bits,
    Bytes,
}

impl DataUnits {
    /// 指定された長さをビット数に変換
    pub fn to_bits(self, length: usize) -> usize {
        match self {
            DataUnits::Bits => length,
            DataUnits::Bytes => length * BITS_PER_BYTE,
        }
    }
}

/// 固定幅のプリミティブ型
///
/// 値とバイト列の相互変換をバイト順序付きで提供する。
/// `SimpleDataField` とビット範囲の取り出し/書き込みで使用する。
pub trait Scalar: Copy + Default + PartialEq + std::fmt::Debug {
    /// 型のバイト幅
    const SIZE_BYTES: usize;

    /// 型のビット幅
    fn bit_width() -> usize {
        Self::SIZE_BYTES * BITS_PER_BYTE
    }

    /// `out` の先頭 `SIZE_BYTES` バイトへ指定のバイト順で書き出す
    fn put_bytes(self, byte_order: ByteOrder, out: &mut [u8]);

    /// `input` の先頭 `SIZE_BYTES` バイトから指定のバイト順で読み込む
    fn take_bytes(byte_order: ByteOrder, input: &[u8]) -> Self;
}

macro_rules! impl_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl Scalar for $t {
                const SIZE_BYTES: usize = std::mem::size_of::<$t>();

                fn put_bytes(self, byte_order: ByteOrder, out: &mut [u8]) {
                    let bytes = match byte_order {
                        ByteOrder::Big => self.to_be_bytes(),
                        ByteOrder::Little => self.to_le_bytes(),
                        ByteOrder::Native => self.to_ne_bytes(),
                    };
                    out[..Self::SIZE_BYTES].copy_from_slice(&bytes);
                }

                fn take_bytes(byte_order: ByteOrder, input: &[u8]) -> Self {
                    let mut bytes = [0u8; std::mem::size_of::<$t>()];
                    bytes.copy_from_slice(&input[..Self::SIZE_BYTES]);
                    match byte_order {
                        ByteOrder::Big => <$t>::from_be_bytes(bytes),
                        ByteOrder::Little => <$t>::from_le_bytes(bytes),
                        ByteOrder::Native => <$t>::from_ne_bytes(bytes),
                    }
                }
            }
        )*
    };
}

impl_scalar!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_index() {
        assert_eq!(IndexingMode::LeastSignificantFirst.physical_index(0, 4), 0);
        assert_eq!(IndexingMode::MostSignificantFirst.physical_index(0, 4), 3);
        assert_eq!(IndexingMode::MostSignificantFirst.physical_index(3, 4), 0);
    }

    #[test]
    fn test_scalar_byte_orders() {
        let mut out = [0u8; 2];
        0x0800u16.put_bytes(ByteOrder::Big, &mut out);
        assert_eq!(out, [0x08, 0x00]);
        0x0800u16.put_bytes(ByteOrder::Little, &mut out);
        assert_eq!(out, [0x00, 0x08]);

        assert_eq!(u32::take_bytes(ByteOrder::Big, &[0x01, 0x02, 0x03, 0x04]), 0x01020304);
        assert_eq!(u32::take_bytes(ByteOrder::Little, &[0x01, 0x02, 0x03, 0x04]), 0x04030201);
        assert_eq!(f64::SIZE_BYTES, 8);
        assert_eq!(i128::bit_width(), 128);
    }

    #[test]
    fn test_native_resolves_to_host() {
        assert_eq!(ByteOrder::Native.resolve(), ByteOrder::host());
        assert_eq!(ByteOrder::Big.resolve(), ByteOrder::Big);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(ByteOrder::from_str("network").unwrap(), ByteOrder::Big);
        assert_eq!(IndexingMode::from_str("ms_zero").unwrap(), IndexingMode::MostSignificantFirst);
        assert!(ByteOrder::from_str("middle").is_err());
    }
}

//! フィールドコア機能
//! ビット/バイト/スカラー値フィールド、複合パケット、エラー処理等のコア機能

pub mod exceptions;
pub mod misc;
pub mod bit_utils;
pub mod storage;
pub mod data_field;
pub mod raw_data_field;
pub mod byte_field;
pub mod simple_data_field;
pub mod data_packet;

// 便利な再エクスポート
pub use exceptions::{RangeError, LengthMismatchError, FormatError, FieldError, FieldResult};
pub use misc::{ByteOrder, IndexingMode, DataUnits, Scalar, BITS_PER_BYTE};
pub use bit_utils::{bits_to_bytes, copy_bits, byteswap};
pub use storage::Storage;
pub use data_field::DataField;
pub use raw_data_field::RawDataField;
pub use byte_field::ByteField;
pub use simple_data_field::SimpleDataField;
pub use data_packet::{DataPacket, compute_padding};

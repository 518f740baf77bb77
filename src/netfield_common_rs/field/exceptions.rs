/// フィールド処理用エラー型定義
/// 範囲外アクセス、長さ不一致、文字列解析失敗をそれぞれ別の型で表現する

use std::fmt;
use std::error::Error;

/// 範囲エラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// ビット/バイトのインデックスが範囲外
    IndexOutOfRange { index: usize, length: usize },
    /// 指定されたビット範囲がフィールドからはみ出している
    BitsOutOfRange { start: usize, count: usize, length: usize },
    /// 取り出し先の型のビット幅が足りない
    DestinationTooNarrow { count: usize, width: usize },
    /// 書き込み元の型のビット幅が足りない
    SourceTooNarrow { count: usize, width: usize },
    /// シフト量がフィールド幅以上
    ShiftTooLarge { shift: usize, width: usize },
    /// バッファが短すぎる
    InsufficientBuffer { required: usize, actual: usize },
    /// 不正なバイトアライメント
    InvalidAlignment(usize),
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::IndexOutOfRange { index, length } => {
                write!(f, "インデックスが範囲外です: {} (長さ {})", index, length)
            }
            RangeError::BitsOutOfRange { start, count, length } => {
                write!(f, "範囲外のビットが指定されました: 開始 {}, 個数 {} (長さ {}ビット)", start, count, length)
            }
            RangeError::DestinationTooNarrow { count, width } => {
                write!(f, "取り出し先の型のビット数が足りません: 要求 {}ビット, 型の幅 {}ビット", count, width)
            }
            RangeError::SourceTooNarrow { count, width } => {
                write!(f, "書き込み元の型のビット数が足りません: 要求 {}ビット, 型の幅 {}ビット", count, width)
            }
            RangeError::ShiftTooLarge { shift, width } => {
                write!(f, "シフト量はフィールド幅未満である必要があります: シフト {}, 幅 {}", shift, width)
            }
            RangeError::InsufficientBuffer { required, actual } => {
                write!(f, "バッファが不足しています: 必要 {}バイト, 実際 {}バイト", required, actual)
            }
            RangeError::InvalidAlignment(alignment) => {
                write!(f, "バイトアライメントは1以上である必要があります: {}", alignment)
            }
        }
    }
}

impl Error for RangeError {}

/// 長さ不一致エラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LengthMismatchError {
    /// アドレス長が宣言された長さと一致しない
    AddressLength { field: String, expected: usize, actual: usize },
    /// フィールド同士の長さが一致しない
    FieldLength { expected: usize, actual: usize },
}

impl fmt::Display for LengthMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthMismatchError::AddressLength { field, expected, actual } => {
                write!(f, "'{}' の長さが一致しません: 期待 {}バイト, 実際 {}バイト", field, expected, actual)
            }
            LengthMismatchError::FieldLength { expected, actual } => {
                write!(f, "フィールド長が一致しません: 期待 {}ビット, 実際 {}ビット", expected, actual)
            }
        }
    }
}

impl Error for LengthMismatchError {}

/// 文字列形式エラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// 不正なIPv4アドレス文字列
    Ipv4Address(String),
    /// 不正なMACアドレス文字列
    MacAddress(String),
    /// 不正な16進文字列
    Hex(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Ipv4Address(text) => write!(f, "不正なIPv4アドレスです: '{}'", text),
            FormatError::MacAddress(text) => write!(f, "不正なMACアドレスです: '{}'", text),
            FormatError::Hex(text) => write!(f, "不正な16進文字列です: '{}'", text),
        }
    }
}

impl Error for FormatError {}

/// フィールド処理の統合エラー型
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    /// 範囲エラー
    Range(RangeError),
    /// 長さ不一致エラー
    LengthMismatch(LengthMismatchError),
    /// 形式エラー
    Format(FormatError),
    /// I/O エラー
    Io(String),
    /// 設定エラー
    Config(String),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Range(err) => write!(f, "範囲エラー: {}", err),
            FieldError::LengthMismatch(err) => write!(f, "長さ不一致エラー: {}", err),
            FieldError::Format(err) => write!(f, "形式エラー: {}", err),
            FieldError::Io(msg) => write!(f, "I/Oエラー: {}", msg),
            FieldError::Config(msg) => write!(f, "設定エラー: {}", msg),
        }
    }
}

impl Error for FieldError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FieldError::Range(err) => Some(err),
            FieldError::LengthMismatch(err) => Some(err),
            FieldError::Format(err) => Some(err),
            _ => None,
        }
    }
}

// From実装で自動変換をサポート
impl From<RangeError> for FieldError {
    fn from(err: RangeError) -> Self {
        FieldError::Range(err)
    }
}

impl From<LengthMismatchError> for FieldError {
    fn from(err: LengthMismatchError) -> Self {
        FieldError::LengthMismatch(err)
    }
}

impl From<FormatError> for FieldError {
    fn from(err: FormatError) -> Self {
        FieldError::Format(err)
    }
}

impl From<std::io::Error> for FieldError {
    fn from(err: std::io::Error) -> Self {
        FieldError::Io(err.to_string())
    }
}

/// Result型のエイリアス
pub type FieldResult<T> = Result<T, FieldError>;

/// エラーヘルパー関数
impl RangeError {
    /// インデックス範囲外エラーを作成
    pub fn index_out_of_range(index: usize, length: usize) -> Self {
        RangeError::IndexOutOfRange { index, length }
    }

    /// バッファ不足エラーを作成
    pub fn insufficient_buffer(required: usize, actual: usize) -> Self {
        RangeError::InsufficientBuffer { required, actual }
    }
}

impl LengthMismatchError {
    /// アドレス長不一致エラーを作成
    pub fn address_length(field: &str, expected: usize, actual: usize) -> Self {
        LengthMismatchError::AddressLength {
            field: field.to_string(),
            expected,
            actual,
        }
    }
}

//! ネットワークパケット
//! フィールドコアを組み合わせたアドレス型・プロトコルヘッダ

pub mod types;
pub mod debug;

pub use types::*;

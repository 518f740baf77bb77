/// フィールドの格納領域
/// 自前で確保した領域か、呼び出し側が寿命を管理する領域への参照のどちらか

use std::ops::{Deref, DerefMut};

/// バイト列の格納領域
#[derive(Debug)]
pub enum Storage<'a> {
    /// このフィールドが確保し、drop時に解放する領域
    Owned(Box<[u8]>),
    /// 呼び出し側の領域をそのまま使う（解放はしない）
    Borrowed(&'a mut [u8]),
}

impl<'a> Storage<'a> {
    /// ゼロ埋めした領域を確保
    pub fn zeroed(length_bytes: usize) -> Self {
        Storage::Owned(vec![0u8; length_bytes].into_boxed_slice())
    }

    /// 内容をコピーした新しい領域を確保
    pub fn copied(bytes: &[u8]) -> Self {
        Storage::Owned(bytes.to_vec().into_boxed_slice())
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, Storage::Owned(_))
    }

    /// 同じ領域を指す借用ビューを作る
    pub fn reborrow(&mut self) -> Storage<'_> {
        Storage::Borrowed(&mut **self)
    }
}

impl Deref for Storage<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Storage::Owned(bytes) => &**bytes,
            Storage::Borrowed(bytes) => &**bytes,
        }
    }
}

impl DerefMut for Storage<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        match self {
            Storage::Owned(bytes) => &mut **bytes,
            Storage::Borrowed(bytes) => &mut **bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owned_storage() {
        let storage = Storage::zeroed(4);
        assert!(storage.is_owned());
        assert_eq!(&*storage, &[0, 0, 0, 0]);
    }

    #[test]
    fn test_borrowed_storage_aliases_buffer() {
        let mut buffer = [1u8, 2, 3];
        {
            let mut storage = Storage::Borrowed(&mut buffer);
            assert!(!storage.is_owned());
            storage[0] = 9;
        }
        assert_eq!(buffer, [9, 2, 3]);
    }

    #[test]
    fn test_reborrow() {
        let mut storage = Storage::copied(&[5, 6]);
        {
            let mut view = storage.reborrow();
            view[1] = 7;
        }
        assert_eq!(&*storage, &[5, 7]);
    }
}

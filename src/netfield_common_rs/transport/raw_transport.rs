/// 生バイト列の送受信口
/// ソケット等の実装はこのtraitの外側に置き、コーデックは読み書きだけを依頼する

use std::io;

use log::debug;

use crate::netfield_common_rs::field::{ByteOrder, DataField, FieldError, FieldResult, RangeError};

#[cfg_attr(test, mockall::automock)]
pub trait RawTransport {
    /// 受信したバイト数を返す
    fn read(&mut self, buffer: &mut [u8]) -> io::Result<usize>;

    /// 送信したバイト数を返す
    fn write(&mut self, buffer: &[u8]) -> io::Result<usize>;
}

/// `io::Read + io::Write` を実装する型はそのまま使える
pub struct StreamTransport<S> {
    stream: S,
}

impl<S: io::Read + io::Write> StreamTransport<S> {
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: io::Read + io::Write> RawTransport for StreamTransport<S> {
    fn read(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
        self.stream.read(buffer)
    }

    fn write(&mut self, buffer: &[u8]) -> io::Result<usize> {
        self.stream.write(buffer)
    }
}

/// フィールドをエンコードして1回の書き込みで送信する
pub fn send_field(
    transport: &mut dyn RawTransport,
    field: &dyn DataField,
    byte_order: ByteOrder,
) -> FieldResult<usize> {
    let buffer = field.to_bytes(byte_order)?;
    let written = transport.write(&buffer)?;
    debug!("sent {} of {} bytes", written, buffer.len());
    if written != buffer.len() {
        return Err(FieldError::Io(format!("short write: {} of {} bytes", written, buffer.len())));
    }
    Ok(written)
}

/// フィールド長ちょうどを1回の読み込みで受信してデコードする
pub fn receive_field(
    transport: &mut dyn RawTransport,
    field: &mut dyn DataField,
    byte_order: ByteOrder,
) -> FieldResult<usize> {
    let mut buffer = vec![0u8; field.length_bytes()];
    let received = transport.read(&mut buffer)?;
    debug!("received {} of {} bytes", received, buffer.len());
    if received < buffer.len() {
        return Err(RangeError::insufficient_buffer(buffer.len(), received).into());
    }
    field.read_from(&buffer, byte_order)?;
    Ok(received)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netfield_common_rs::field::SimpleDataField;
    use crate::netfield_common_rs::packet::types::EthernetIIHeader;

    #[test]
    fn test_send_field_writes_encoded_bytes() {
        let mut transport = MockRawTransport::new();
        transport
            .expect_write()
            .withf(|buffer: &[u8]| buffer.to_vec() == vec![0x12u8, 0x34])
            .times(1)
            .returning(|buffer| Ok(buffer.len()));

        let field = SimpleDataField::new(0x1234u16);
        assert_eq!(send_field(&mut transport, &field, ByteOrder::Big).unwrap(), 2);
    }

    #[test]
    fn test_short_write_is_error() {
        let mut transport = MockRawTransport::new();
        transport.expect_write().returning(|_| Ok(1));

        let field = SimpleDataField::new(0x1234u16);
        assert!(matches!(send_field(&mut transport, &field, ByteOrder::Big), Err(FieldError::Io(_))));
    }

    #[test]
    fn test_receive_field_decodes() {
        let mut transport = MockRawTransport::new();
        transport.expect_read().times(1).returning(|buffer| {
            buffer.copy_from_slice(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0, 1, 2, 3, 4, 5, 0x08, 0x00]);
            Ok(buffer.len())
        });

        let mut header = EthernetIIHeader::new(0);
        assert_eq!(receive_field(&mut transport, &mut header, ByteOrder::Big).unwrap(), 14);
        assert_eq!(header.ether_type(), EthernetIIHeader::IPV4);
    }

    #[test]
    fn test_short_read_is_error() {
        let mut transport = MockRawTransport::new();
        transport.expect_read().returning(|_| Ok(3));

        let mut header = EthernetIIHeader::new(0);
        assert!(receive_field(&mut transport, &mut header, ByteOrder::Big).is_err());
    }

    #[test]
    fn test_io_error_propagates() {
        let mut transport = MockRawTransport::new();
        transport
            .expect_write()
            .returning(|_| Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed")));

        let field = SimpleDataField::new(1u8);
        assert!(matches!(send_field(&mut transport, &field, ByteOrder::Big), Err(FieldError::Io(_))));
    }

    #[test]
    fn test_stream_transport() {
        let mut transport = StreamTransport::new(io::Cursor::new(Vec::new()));
        let field = SimpleDataField::new(0xABCDu16);
        send_field(&mut transport, &field, ByteOrder::Little).unwrap();
        assert_eq!(transport.into_inner().into_inner(), vec![0xCD, 0xAB]);
    }
}

pub mod raw_transport;

pub use raw_transport::{receive_field, send_field, RawTransport, StreamTransport};

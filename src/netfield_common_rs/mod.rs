pub mod field;
pub mod packet;
pub mod transport;
pub mod utils;

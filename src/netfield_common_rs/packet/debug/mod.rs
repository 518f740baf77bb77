pub mod debug_logger;

pub use debug_logger::PacketDebugLogger;

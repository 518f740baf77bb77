use log::{debug, log_enabled, Level};

use crate::netfield_common_rs::field::{ByteOrder, DataField};
use crate::netfield_common_rs::packet::types::arp_packet::ArpPacket;
use crate::netfield_common_rs::packet::types::ethernet_ii_header::EthernetIIHeader;

const BYTES_PER_LINE: usize = 16;

/// エンコード済みバッファの簡易ダンプ
/// - 16バイト単位の16進ダンプ
/// - Ethernet/ARP ヘッダの主要フィールド表示
pub struct PacketDebugLogger;

impl PacketDebugLogger {
    /// 16進ダンプの各行を返す（"0000: 00 01 02 ..."）
    pub fn hex_lines(buf: &[u8]) -> Vec<String> {
        buf.chunks(BYTES_PER_LINE)
            .enumerate()
            .map(|(i, chunk)| {
                let encoded = hex::encode(chunk);
                let pairs: Vec<&str> = (0..chunk.len()).map(|j| &encoded[j * 2..j * 2 + 2]).collect();
                format!("{:04x}: {}", i * BYTES_PER_LINE, pairs.join(" "))
            })
            .collect()
    }

    pub fn log_hex(label: &str, buf: &[u8]) {
        if !log_enabled!(Level::Debug) {
            return;
        }
        debug!("[PacketDebug] {} ({} bytes)", label, buf.len());
        for line in Self::hex_lines(buf) {
            debug!("[PacketDebug] {}", line);
        }
    }

    /// フィールドをエンコードしてダンプ
    pub fn log_field(label: &str, field: &dyn DataField, byte_order: ByteOrder) {
        match field.to_bytes(byte_order) {
            Ok(bytes) => Self::log_hex(label, &bytes),
            Err(e) => debug!("[PacketDebug] {} encode failed: {}", label, e),
        }
    }

    pub fn log_ethernet(buf: &[u8]) {
        if buf.len() < EthernetIIHeader::LENGTH_BYTES {
            debug!("[PacketDebug] ethernet too short: {} bytes", buf.len());
            return;
        }
        let mut header = EthernetIIHeader::new(0);
        match header.read_from(buf, ByteOrder::Big) {
            Ok(_) => debug!(
                "[PacketDebug] eth dst={} src={} type=0x{:04x}",
                header.destination(),
                header.source(),
                header.ether_type()
            ),
            Err(e) => debug!("[PacketDebug] ethernet decode failed: {}", e),
        }
        if buf.len() > EthernetIIHeader::LENGTH_BYTES {
            debug!("[PacketDebug] payload_len={} bytes", buf.len() - EthernetIIHeader::LENGTH_BYTES);
        }
    }

    /// Ethernet + IPv4 のARPとして解釈して表示
    pub fn log_arp(buf: &[u8]) {
        let mut packet = ArpPacket::new(6, 4);
        if buf.len() < packet.length_bytes() {
            debug!("[PacketDebug] arp too short: {} bytes", buf.len());
            return;
        }
        match packet.read_from(buf, ByteOrder::Big) {
            Ok(_) => debug!(
                "[PacketDebug] arp htype={} ptype=0x{:04x} oper={} sha={} spa={} tha={} tpa={}",
                packet.htype(),
                packet.ptype(),
                packet.oper(),
                packet.sha(),
                packet.spa(),
                packet.tha(),
                packet.tpa()
            ),
            Err(e) => debug!("[PacketDebug] arp decode failed: {}", e),
        }
    }
}

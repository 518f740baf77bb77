use clap::{Parser, Subcommand};
use std::error::Error;

use netfield_rust::netfield_common_rs::field::{compute_padding, ByteField, ByteOrder, DataField, DataPacket};
use netfield_rust::netfield_common_rs::packet::debug::PacketDebugLogger;
use netfield_rust::netfield_common_rs::packet::types::{
    ArpPacket, EthernetIIHeader, Ipv4Address, MacAddress, OPER_REQUEST,
};
use netfield_rust::netfield_common_rs::utils::{init_logging, ConfigLoader, LogConfig};

#[derive(Parser)]
#[command(name = "netfield-cli")]
#[command(about = "netfield CLI - バイナリフィールド/パケットコーデックツール")]
#[command(version = "0.1.0")]
struct Cli {
    /// デバッグモード（16進ダンプを出力）
    #[arg(short, long)]
    debug: bool,

    /// バイト順序 (big / little / native)。省略時は設定ファイルの値
    #[arg(long)]
    byte_order: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// ARPリクエストフレーム（Ethernet II + ARP）を生成
    ArpRequest {
        /// 送信元MACアドレス
        #[arg(long)]
        sender_mac: String,

        /// 送信元IPv4アドレス
        #[arg(long)]
        sender_ip: String,

        /// 問い合わせ先IPv4アドレス
        #[arg(long)]
        target_ip: String,
    },
    /// 16進文字列のARPパケット（28バイト、またはEthernetヘッダ付き42バイト）を解析
    DecodeArp {
        /// 16進文字列
        hex: String,
    },
    /// IPv4アドレスを解析して表示
    Ipv4 {
        /// ドット区切り10進表記
        address: String,
    },
    /// フィールド長とアライメントからパケットのレイアウトを計算
    Layout {
        /// バイトアライメント
        #[arg(short, long, default_value = "1")]
        alignment: usize,

        /// 各フィールドのバイト長（カンマ区切り）
        #[arg(value_delimiter = ',')]
        sizes: Vec<usize>,
    },
    /// インターフェースのMAC/IPv4アドレスを表示（Linuxのみ）
    Iface {
        /// インターフェース名
        name: String,
    },
}

fn print_layout(alignment: usize, sizes: &[usize]) -> Result<(), Box<dyn Error>> {
    let mut fields: Vec<ByteField> = sizes.iter().map(|&size| ByteField::new(size)).collect();
    let mut packet = DataPacket::new(alignment)?;
    for field in fields.iter_mut() {
        packet.add_data_field(field);
    }

    println!("=== レイアウト (alignment={}) ===", alignment);
    let mut offset = 0;
    for (index, size) in sizes.iter().enumerate() {
        let padding = compute_padding(alignment, *size);
        println!("#{:<3} offset={:<5} size={:<5} padding={}", index, offset, size, padding);
        offset += size + padding;
    }
    println!("合計: {} バイト", packet.length_bytes());
    Ok(())
}

fn decode_arp(hex_text: &str, byte_order: ByteOrder) -> Result<(), Box<dyn Error>> {
    let bytes = hex::decode(hex_text.trim())?;
    let arp_offset = if bytes.len() >= EthernetIIHeader::LENGTH_BYTES + 28 {
        let mut header = EthernetIIHeader::new(0);
        header.read_from(&bytes, byte_order)?;
        println!("dst={} src={} type=0x{:04x}", header.destination(), header.source(), header.ether_type());
        EthernetIIHeader::LENGTH_BYTES
    } else {
        0
    };

    let mut packet = ArpPacket::new(6, 4);
    packet.read_from(&bytes[arp_offset..], byte_order)?;
    println!("htype={} ptype=0x{:04x} hlen={} plen={} oper={}",
        packet.htype(), packet.ptype(), packet.hlen(), packet.plen(), packet.oper());

    let spa = Ipv4Address::try_from(packet.spa().detach())?;
    let tpa = Ipv4Address::try_from(packet.tpa().detach())?;
    println!("sha={} spa={}", packet.sha(), spa);
    println!("tha={} tpa={}", packet.tha(), tpa);
    Ok(())
}

#[cfg(target_os = "linux")]
fn show_interface(name: &str) -> Result<(), Box<dyn Error>> {
    use netfield_rust::netfield_common_rs::utils::interfaces::{get_ipv4_address, get_mac_address};

    match get_mac_address(name)? {
        Some(mac) => println!("mac:  {}", mac),
        None => println!("mac:  (なし)"),
    }
    match get_ipv4_address(name)? {
        Some(ip) => println!("ipv4: {}", ip),
        None => println!("ipv4: (なし)"),
    }
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn show_interface(_name: &str) -> Result<(), Box<dyn Error>> {
    Err("インターフェース情報の取得はLinuxのみ対応しています".into())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = ConfigLoader::new().load()?;

    let log_config = if cli.debug {
        LogConfig { level: "debug".into(), ..config.logging.clone() }
    } else {
        config.logging.clone()
    };
    init_logging(&log_config)?;

    let byte_order = match &cli.byte_order {
        Some(order) => ByteOrder::from_str(order)?,
        None => config.codec.byte_order,
    };

    match cli.command {
        Commands::ArpRequest { sender_mac, sender_ip, target_ip } => {
            let sha: MacAddress = sender_mac.parse()?;
            let spa: Ipv4Address = sender_ip.parse()?;
            let tpa: Ipv4Address = target_ip.parse()?;

            let header = EthernetIIHeader::with_addresses(MacAddress::broadcast(), sha.clone(), EthernetIIHeader::ARP);
            let arp = ArpPacket::ethernet_ipv4(OPER_REQUEST, &sha, &spa, &MacAddress::new(), &tpa);

            let mut frame = header.to_bytes(byte_order)?;
            frame.extend(arp.to_bytes(byte_order)?);
            PacketDebugLogger::log_hex("arp request", &frame);
            println!("{}", hex::encode(&frame));
        }
        Commands::DecodeArp { hex } => decode_arp(&hex, byte_order)?,
        Commands::Ipv4 { address } => {
            let ip: Ipv4Address = address.parse()?;
            println!("{} ({})", ip, hex::encode(ip.octets()));
        }
        Commands::Layout { alignment, sizes } => print_layout(alignment, &sizes)?,
        Commands::Iface { name } => show_interface(&name)?,
    }

    Ok(())
}

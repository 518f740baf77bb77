/// ネットワークインターフェースのアドレス取得（Linux のみ）

use std::net::SocketAddrV4;

use log::debug;
use nix::ifaddrs::getifaddrs;

use crate::netfield_common_rs::field::{FieldError, FieldResult};
use crate::netfield_common_rs::packet::types::{Ipv4Address, MacAddress};

/// インターフェース `name` のハードウェアアドレス
///
/// インターフェースが存在しない、またはリンク層アドレスを持たない場合は `None`
pub fn get_mac_address(name: &str) -> FieldResult<Option<MacAddress<'static>>> {
    let addrs = getifaddrs().map_err(|e| FieldError::Io(format!("getifaddrs failed: {}", e)))?;
    for ifaddr in addrs {
        if ifaddr.interface_name != name {
            continue;
        }
        let octets = ifaddr
            .address
            .as_ref()
            .and_then(|address| address.as_link_addr())
            .and_then(|link| link.addr());
        if let Some(octets) = octets {
            debug!("{}: link address found", name);
            return Ok(Some(MacAddress::from_octets(octets)));
        }
    }
    Ok(None)
}

/// インターフェース `name` の最初のIPv4アドレス
pub fn get_ipv4_address(name: &str) -> FieldResult<Option<Ipv4Address<'static>>> {
    let addrs = getifaddrs().map_err(|e| FieldError::Io(format!("getifaddrs failed: {}", e)))?;
    for ifaddr in addrs {
        if ifaddr.interface_name != name {
            continue;
        }
        let sin = ifaddr.address.as_ref().and_then(|address| address.as_sockaddr_in()).copied();
        if let Some(sin) = sin {
            let socket = SocketAddrV4::from(sin);
            debug!("{}: ipv4 address {}", name, socket.ip());
            return Ok(Some(Ipv4Address::from(*socket.ip())));
        }
    }
    Ok(None)
}

/// 利用可能なインターフェース名（重複なし、列挙順）
pub fn interface_names() -> FieldResult<Vec<String>> {
    let addrs = getifaddrs().map_err(|e| FieldError::Io(format!("getifaddrs failed: {}", e)))?;
    let mut names: Vec<String> = Vec::new();
    for ifaddr in addrs {
        if !names.contains(&ifaddr.interface_name) {
            names.push(ifaddr.interface_name);
        }
    }
    Ok(names)
}

/// ARPパケット
///
/// htype(2) ptype(2) hlen(1) plen(1) oper(2) sha(hlen) spa(plen) tha(hlen) tpa(plen)
/// の順に並ぶ。アライメントは常に1バイト（パディングなし）。

use log::debug;

use super::ipv4_address::Ipv4Address;
use super::mac_address::{MacAddress, MAC_LENGTH_BYTES};
use super::network_address::NetworkAddress;
use crate::netfield_common_rs::field::data_packet::{packed_length_bits, read_fields, write_fields};
use crate::netfield_common_rs::field::{
    ByteOrder, DataField, DataPacket, FieldResult, LengthMismatchError, SimpleDataField, BITS_PER_BYTE,
};

pub const HTYPE_ETHERNET: u16 = 0x0001;
pub const PTYPE_IPV4: u16 = 0x0800;
pub const OPER_REQUEST: u16 = 0x0001;
pub const OPER_REPLY: u16 = 0x0002;

const ARP_BYTE_ALIGNMENT: usize = 1;
const HLEN_OFFSET_BYTES: usize = 4;
const PLEN_OFFSET_BYTES: usize = 5;

/// ARPヘッダの固定長部分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArpHeader {
    pub htype: u16,
    pub ptype: u16,
    pub hlen: u8,
    pub plen: u8,
    pub oper: u16,
}

impl ArpHeader {
    /// Ethernet + IPv4 用のヘッダ
    pub fn ethernet_ipv4(oper: u16) -> Self {
        Self {
            htype: HTYPE_ETHERNET,
            ptype: PTYPE_IPV4,
            hlen: MAC_LENGTH_BYTES as u8,
            plen: 4,
            oper,
        }
    }
}

/// 生バッファからアドレスを作る際の扱い
///
/// `Owned` は内容をコピーして内部に確保し、`Borrowed` は渡された領域をそのまま使う。
pub enum AddressBinding<'a, 's> {
    Owned(&'s [u8]),
    Borrowed(&'a mut [u8]),
}

impl AddressBinding<'_, '_> {
    fn len(&self) -> usize {
        match self {
            AddressBinding::Owned(bytes) => bytes.len(),
            AddressBinding::Borrowed(bytes) => bytes.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArpPacket<'a> {
    htype: SimpleDataField<u16>,
    ptype: SimpleDataField<u16>,
    hlen: SimpleDataField<u8>,
    plen: SimpleDataField<u8>,
    oper: SimpleDataField<u16>,
    sha: NetworkAddress<'a>,
    spa: NetworkAddress<'a>,
    tha: NetworkAddress<'a>,
    tpa: NetworkAddress<'a>,
}

impl ArpPacket<'static> {
    /// 長さだけを指定し、それ以外はゼロで初期化
    pub fn new(hlen: u8, plen: u8) -> Self {
        Self::with_header(ArpHeader { hlen, plen, ..ArpHeader::default() })
    }

    /// ヘッダ値を指定し、アドレスは内部に確保（ゼロ埋め）
    pub fn with_header(header: ArpHeader) -> Self {
        let hlen = header.hlen as usize;
        let plen = header.plen as usize;
        Self::assemble(
            header,
            [
                NetworkAddress::new(hlen),
                NetworkAddress::new(plen),
                NetworkAddress::new(hlen),
                NetworkAddress::new(plen),
            ],
        )
    }

    /// Ethernet + IPv4 のARPパケット
    pub fn ethernet_ipv4(
        oper: u16,
        sha: &MacAddress<'_>,
        spa: &Ipv4Address<'_>,
        tha: &MacAddress<'_>,
        tpa: &Ipv4Address<'_>,
    ) -> Self {
        Self::assemble(
            ArpHeader::ethernet_ipv4(oper),
            [
                NetworkAddress::from_bytes(&sha.octets()),
                NetworkAddress::from_bytes(&spa.octets()),
                NetworkAddress::from_bytes(&tha.octets()),
                NetworkAddress::from_bytes(&tpa.octets()),
            ],
        )
    }
}

impl<'a> ArpPacket<'a> {
    /// `[sha, spa, tha, tpa]` の順でアドレスを渡して作成
    ///
    /// 所有/借用はアドレス自身の格納領域のまま引き継ぐ。
    /// 長さが `hlen`/`plen` と一致しない場合は作成しない。
    pub fn with_addresses(header: ArpHeader, addresses: [NetworkAddress<'a>; 4]) -> FieldResult<Self> {
        let lengths = [
            addresses[0].length_bytes(),
            addresses[1].length_bytes(),
            addresses[2].length_bytes(),
            addresses[3].length_bytes(),
        ];
        validate_address_lengths(&header, lengths)?;
        Ok(Self::assemble(header, addresses))
    }

    /// 生バッファから `[sha, spa, tha, tpa]` を作成
    pub fn from_bindings(header: ArpHeader, bindings: [AddressBinding<'a, '_>; 4]) -> FieldResult<Self> {
        let lengths = [bindings[0].len(), bindings[1].len(), bindings[2].len(), bindings[3].len()];
        validate_address_lengths(&header, lengths)?;

        let [sha, spa, tha, tpa] = bindings.map(|binding| match binding {
            AddressBinding::Owned(bytes) => NetworkAddress::from_bytes(bytes),
            AddressBinding::Borrowed(bytes) => NetworkAddress::borrowed(bytes),
        });
        Ok(Self::assemble(header, [sha, spa, tha, tpa]))
    }

    fn assemble(header: ArpHeader, addresses: [NetworkAddress<'a>; 4]) -> Self {
        let [sha, spa, tha, tpa] = addresses;
        Self {
            htype: SimpleDataField::new(header.htype),
            ptype: SimpleDataField::new(header.ptype),
            hlen: SimpleDataField::new(header.hlen),
            plen: SimpleDataField::new(header.plen),
            oper: SimpleDataField::new(header.oper),
            sha,
            spa,
            tha,
            tpa,
        }
    }

    pub fn header(&self) -> ArpHeader {
        ArpHeader {
            htype: self.htype.get(),
            ptype: self.ptype.get(),
            hlen: self.hlen.get(),
            plen: self.plen.get(),
            oper: self.oper.get(),
        }
    }

    pub fn htype(&self) -> u16 {
        self.htype.get()
    }

    pub fn set_htype(&mut self, htype: u16) {
        self.htype.set(htype);
    }

    pub fn ptype(&self) -> u16 {
        self.ptype.get()
    }

    pub fn set_ptype(&mut self, ptype: u16) {
        self.ptype.set(ptype);
    }

    // hlen/plen はアドレス長と一致している必要があるため変更不可
    pub fn hlen(&self) -> u8 {
        self.hlen.get()
    }

    pub fn plen(&self) -> u8 {
        self.plen.get()
    }

    pub fn oper(&self) -> u16 {
        self.oper.get()
    }

    pub fn set_oper(&mut self, oper: u16) {
        self.oper.set(oper);
    }

    pub fn sha(&self) -> &NetworkAddress<'a> {
        &self.sha
    }

    pub fn sha_mut(&mut self) -> &mut NetworkAddress<'a> {
        &mut self.sha
    }

    pub fn spa(&self) -> &NetworkAddress<'a> {
        &self.spa
    }

    pub fn spa_mut(&mut self) -> &mut NetworkAddress<'a> {
        &mut self.spa
    }

    pub fn tha(&self) -> &NetworkAddress<'a> {
        &self.tha
    }

    pub fn tha_mut(&mut self) -> &mut NetworkAddress<'a> {
        &mut self.tha
    }

    pub fn tpa(&self) -> &NetworkAddress<'a> {
        &self.tpa
    }

    pub fn tpa_mut(&mut self) -> &mut NetworkAddress<'a> {
        &mut self.tpa
    }

    pub fn byte_alignment(&self) -> usize {
        ARP_BYTE_ALIGNMENT
    }

    /// 各フィールドを登録順に並べた `DataPacket` として借用する
    pub fn as_data_packet(&mut self) -> FieldResult<DataPacket<'_>> {
        let mut packet = DataPacket::new(ARP_BYTE_ALIGNMENT)?;
        for field in self.data_fields_mut() {
            packet.add_data_field(field);
        }
        Ok(packet)
    }

    fn data_fields(&self) -> [&dyn DataField; 9] {
        [
            &self.htype, &self.ptype, &self.hlen, &self.plen, &self.oper,
            &self.sha, &self.spa, &self.tha, &self.tpa,
        ]
    }

    fn data_fields_mut(&mut self) -> [&mut dyn DataField; 9] {
        [
            &mut self.htype, &mut self.ptype, &mut self.hlen, &mut self.plen, &mut self.oper,
            &mut self.sha, &mut self.spa, &mut self.tha, &mut self.tpa,
        ]
    }
}

fn validate_address_lengths(header: &ArpHeader, lengths: [usize; 4]) -> FieldResult<()> {
    let hlen = header.hlen as usize;
    let plen = header.plen as usize;
    let declared = [("sha", hlen), ("spa", plen), ("tha", hlen), ("tpa", plen)];

    for ((name, expected), actual) in declared.into_iter().zip(lengths) {
        if expected != actual {
            debug!("ARP address length mismatch: {} expected {} bytes, got {}", name, expected, actual);
            return Err(LengthMismatchError::address_length(name, expected, actual).into());
        }
    }
    Ok(())
}

impl DataField for ArpPacket<'_> {
    fn length_bits(&self) -> usize {
        packed_length_bits(&self.data_fields(), ARP_BYTE_ALIGNMENT)
    }

    /// 読み込み前にバッファ上の hlen/plen がアドレス長と一致するか確認する
    fn read_raw(&mut self, buffer: &[u8], byte_order: ByteOrder, offset_bits: usize) -> FieldResult<usize> {
        let mut hlen = SimpleDataField::<u8>::default();
        let mut plen = SimpleDataField::<u8>::default();
        hlen.read_raw(buffer, byte_order, offset_bits + HLEN_OFFSET_BYTES * BITS_PER_BYTE)?;
        plen.read_raw(buffer, byte_order, offset_bits + PLEN_OFFSET_BYTES * BITS_PER_BYTE)?;

        let header = ArpHeader { hlen: hlen.get(), plen: plen.get(), ..self.header() };
        validate_address_lengths(
            &header,
            [
                self.sha.length_bytes(),
                self.spa.length_bytes(),
                self.tha.length_bytes(),
                self.tpa.length_bytes(),
            ],
        )?;

        read_fields(&mut self.data_fields_mut(), ARP_BYTE_ALIGNMENT, buffer, byte_order, offset_bits)
    }

    fn write_raw(&self, buffer: &mut [u8], byte_order: ByteOrder, offset_bits: usize) -> FieldResult<usize> {
        write_fields(&self.data_fields(), ARP_BYTE_ALIGNMENT, buffer, byte_order, offset_bits)
    }
}

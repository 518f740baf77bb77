use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use netfield_rust::netfield_common_rs::field::{
    copy_bits, ByteField, ByteOrder, DataField, DataPacket, DataUnits, IndexingMode, RawDataField, SimpleDataField,
};
use netfield_rust::netfield_common_rs::packet::types::{ArpPacket, Ipv4Address, MacAddress, OPER_REQUEST};

fn benchmark_arp_encode(c: &mut Criterion) {
    let sha = MacAddress::from_octets([0x02, 0x42, 0xac, 0x11, 0x00, 0x02]);
    let spa = Ipv4Address::from_octets([192, 168, 1, 10]);
    let tpa = Ipv4Address::from_octets([192, 168, 1, 1]);
    let packet = ArpPacket::ethernet_ipv4(OPER_REQUEST, &sha, &spa, &MacAddress::new(), &tpa);

    c.bench_function("arp_encode", |b| {
        let mut buffer = [0u8; 28];
        b.iter(|| black_box(packet.write_to(black_box(&mut buffer), ByteOrder::Big)))
    });
}

fn benchmark_arp_decode(c: &mut Criterion) {
    let sha = MacAddress::from_octets([0x02, 0x42, 0xac, 0x11, 0x00, 0x02]);
    let spa = Ipv4Address::from_octets([192, 168, 1, 10]);
    let tpa = Ipv4Address::from_octets([192, 168, 1, 1]);
    let bytes = ArpPacket::ethernet_ipv4(OPER_REQUEST, &sha, &spa, &MacAddress::new(), &tpa)
        .to_bytes(ByteOrder::Big)
        .unwrap();

    c.bench_function("arp_decode", |b| {
        let mut packet = ArpPacket::new(6, 4);
        b.iter(|| black_box(packet.read_from(black_box(&bytes), ByteOrder::Big)))
    });
}

fn benchmark_ipv4_parse(c: &mut Criterion) {
    c.bench_function("ipv4_parse", |b| {
        b.iter(|| black_box(black_box("192.168.100.200").parse::<Ipv4Address>()))
    });
}

fn benchmark_copy_bits(c: &mut Criterion) {
    let mut group = c.benchmark_group("copy_bits");

    for size in [16usize, 64, 256, 1024] {
        let src: Vec<u8> = (0..size).map(|i| (i % 256) as u8).collect();
        let mut dst = vec![0u8; size + 1];

        group.bench_with_input(BenchmarkId::new("aligned", size), &src, |b, src| {
            b.iter(|| black_box(copy_bits(black_box(src), 0, &mut dst, 8, size * 8)))
        });
        group.bench_with_input(BenchmarkId::new("unaligned", size), &src, |b, src| {
            b.iter(|| black_box(copy_bits(black_box(src), 0, &mut dst, 3, size * 8)))
        });
    }

    group.finish();
}

fn benchmark_scalar_bits(c: &mut Criterion) {
    let mut field = RawDataField::new(64, DataUnits::Bits, IndexingMode::MostSignificantFirst);

    c.bench_function("set_get_bits_as_scalar", |b| {
        b.iter(|| {
            field.set_bits_as_scalar(black_box(0x5Au8), 12, 8).unwrap();
            black_box(field.get_bits_as_scalar::<u8>(12, 8).unwrap())
        })
    });
}

fn benchmark_aligned_packet(c: &mut Criterion) {
    let mut a = ByteField::from_bytes(&[1, 2, 3]);
    let mut b = SimpleDataField::new(0x0405u16);
    let mut d = SimpleDataField::new(1.5f64);
    let mut packet = DataPacket::new(4).unwrap();
    packet.add_data_field(&mut a).add_data_field(&mut b).add_data_field(&mut d);
    let mut buffer = vec![0u8; packet.length_bytes()];

    c.bench_function("aligned_packet_encode", |bench| {
        bench.iter(|| black_box(packet.write_to(&mut buffer, ByteOrder::Little)))
    });
}

criterion_group!(
    benches,
    benchmark_arp_encode,
    benchmark_arp_decode,
    benchmark_ipv4_parse,
    benchmark_copy_bits,
    benchmark_scalar_bits,
    benchmark_aligned_packet
);
criterion_main!(benches);

use netfield_rust::netfield_common_rs::field::{
    compute_padding, ByteField, ByteOrder, DataField, DataPacket, DataUnits, IndexingMode, RawDataField,
    SimpleDataField,
};

#[test]
fn test_padding_scenario() {
    let mut three = ByteField::new(3);
    let mut two = ByteField::new(2);
    let mut packet = DataPacket::new(4).unwrap();
    packet.add_data_field(&mut three).add_data_field(&mut two);
    assert_eq!(packet.length_bytes(), (3 + 1) + (2 + 2));
}

#[test]
fn test_length_additivity() {
    for alignment in 1..=8 {
        let sizes = [1usize, 3, 4, 7, 2];
        let mut fields: Vec<ByteField> = sizes.iter().map(|&n| ByteField::new(n)).collect();
        let mut packet = DataPacket::new(alignment).unwrap();
        for field in fields.iter_mut() {
            packet.add_data_field(field);
        }

        let expected: usize = sizes.iter().map(|&n| n + compute_padding(alignment, n)).sum();
        assert_eq!(packet.length_bytes(), expected);
        assert_eq!(packet.length_bytes() % alignment, 0);
    }
}

#[test]
fn test_encode_decode_mixed_fields() {
    let mut flags = RawDataField::from_bytes(&[0b101], 3, DataUnits::Bits, IndexingMode::LeastSignificantFirst).unwrap();
    let mut id = SimpleDataField::new(0xBEEFu16);
    let mut payload = ByteField::from_bytes(&[9, 8, 7]);

    let mut buffer = {
        let mut packet = DataPacket::new(2).unwrap();
        packet.add_data_field(&mut flags).add_data_field(&mut id).add_data_field(&mut payload);
        assert_eq!(packet.length_bytes(), 2 + 2 + 4);
        packet.to_bytes(ByteOrder::Big).unwrap()
    };
    assert_eq!(buffer, vec![0b101, 0x00, 0xBE, 0xEF, 9, 8, 7, 0x00]);

    buffer[2] = 0xCA;
    buffer[3] = 0xFE;
    let mut decoded_flags = RawDataField::new(3, DataUnits::Bits, IndexingMode::LeastSignificantFirst);
    let mut decoded_id = SimpleDataField::<u16>::default();
    let mut decoded_payload = ByteField::new(3);
    {
        let mut packet = DataPacket::new(2).unwrap();
        packet
            .add_data_field(&mut decoded_flags)
            .add_data_field(&mut decoded_id)
            .add_data_field(&mut decoded_payload);
        assert_eq!(packet.read_from(&buffer, ByteOrder::Big).unwrap(), 64);
    }
    assert_eq!(decoded_flags, flags);
    assert_eq!(decoded_id.get(), 0xCAFE);
    assert_eq!(decoded_payload.to_vec(), vec![9, 8, 7]);
}

#[test]
fn test_nested_packets() {
    let mut a = SimpleDataField::new(1u8);
    let mut b = SimpleDataField::new(2u8);
    let mut c = SimpleDataField::new(3u8);

    let mut inner = DataPacket::new(2).unwrap();
    inner.add_data_field(&mut a).add_data_field(&mut b);

    let mut outer = DataPacket::new(1).unwrap();
    outer.add_data_field(&mut inner).add_data_field(&mut c);

    assert_eq!(outer.length_bytes(), 5);
    assert_eq!(outer.to_bytes(ByteOrder::Little).unwrap(), vec![1, 0, 2, 0, 3]);
}

#[test]
fn test_write_at_offset_and_short_buffer() {
    let mut value = SimpleDataField::new(0x0102u16);
    let mut packet = DataPacket::new(1).unwrap();
    packet.add_data_field(&mut value);

    let mut buffer = [0u8; 3];
    assert_eq!(packet.write_raw(&mut buffer, ByteOrder::Big, 8).unwrap(), 16);
    assert_eq!(buffer, [0x00, 0x01, 0x02]);
    assert!(packet.write_raw(&mut buffer, ByteOrder::Big, 16).is_err());
}

#[test]
fn test_byte_order_applies_to_scalars_only() {
    let mut raw = ByteField::from_bytes(&[0x01, 0x02]);
    let mut scalar = SimpleDataField::new(0x0102u16);
    let mut packet = DataPacket::new(1).unwrap();
    packet.add_data_field(&mut raw).add_data_field(&mut scalar);

    assert_eq!(packet.to_bytes(ByteOrder::Big).unwrap(), vec![0x01, 0x02, 0x01, 0x02]);
    assert_eq!(packet.to_bytes(ByteOrder::Little).unwrap(), vec![0x01, 0x02, 0x02, 0x01]);
}

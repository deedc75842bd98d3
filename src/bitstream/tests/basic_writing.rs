use bitstream::BitStream;

#[test]
fn write_primitives() {
    let mut writer = BitStream::with_capacity(4);

    writer.write(u8::BITS, 0xFF);
    writer.write(u16::BITS, 0xDEAD);
    writer.write(u8::BITS, 0xFF);

    assert_eq!(writer.words(), &[0xFFDE_ADFF]);
    assert_eq!(writer.position(), 32);
    assert_eq!(writer.remaining(), 0);
}

#[cfg(target_endian = "little")]
#[test]
fn write_primitives_view() {
    let mut writer = BitStream::with_capacity(8);

    writer.write(u8::BITS, 0xFF);
    writer.write(u16::BITS, 0xDEAD);
    writer.write(u8::BITS, 0xFF);
    writer.write(1, 1);

    assert_eq!(writer.view(), &[0xFF, 0xAD, 0xDE, 0xFF, 0x01]);
    assert_eq!(writer.as_bytes().len(), 8);
}

#[test]
fn write_sequence_across_words() {
    let fields = [(3, 0b101), (29, 0x1234_5678), (17, 0x1_ABCD)];

    let mut writer = BitStream::with_capacity(7);
    for (bits, value) in fields {
        writer.write(bits, value);
    }
    assert_eq!(writer.position(), 49);
    assert_eq!(writer.view().len(), 7);

    let mut reader = BitStream::from_words(writer.words());
    for (bits, value) in fields {
        assert_eq!(reader.read(bits), value);
    }
    assert_eq!(reader.remaining(), 15);
}

#[test]
fn write_discards_excess_value_bits() {
    let mut writer = BitStream::with_capacity(8);

    writer.write(30, 0);
    writer.write(4, 0xFFFF_FFF5);
    writer.write(30, 0);

    assert_eq!(writer.words(), &[0x4000_0000, 0x0000_0001]);
}

#[test]
fn write_across_boundary_keeps_neighbours() {
    let mut writer = BitStream::with_capacity(12);
    for _ in 0..3 {
        writer.write(32, u32::MAX);
    }

    writer.seek(20);
    writer.write(24, 0);
    assert_eq!(writer.position(), 44);

    assert_eq!(writer.words(), &[0x000F_FFFF, 0xFFFF_F000, 0xFFFF_FFFF]);
}

#[test]
fn rewrite_between_sentinels() {
    let mut writer = BitStream::with_capacity(8);

    writer.write(20, 0xABCDE);
    writer.write(24, 0x123456);
    writer.write(20, 0x9ABCD);

    writer.seek(20);
    writer.write(24, 0xFEDCBA);

    let mut reader = BitStream::from_words(writer.words());
    assert_eq!(reader.read(20), 0xABCDE);
    assert_eq!(reader.read(24), 0xFEDCBA);
    assert_eq!(reader.read(20), 0x9ABCD);
}

#[test]
fn write_bytes_matches_single_writes() {
    let data = [1, 2, 3, 4, 5, 6, 7, 8];

    let mut fast = BitStream::with_capacity(8);
    fast.write_bytes(&data);

    let mut slow = BitStream::with_capacity(8);
    for byte in data {
        slow.write(u8::BITS, byte as u32);
    }

    assert_eq!(fast.position(), 64);
    assert_eq!(fast.words(), slow.words());
    assert_eq!(fast.words(), &[0x0403_0201, 0x0807_0605]);
}

#[test]
fn write_bytes_unaligned() {
    let mut fast = BitStream::with_capacity(4);
    fast.write(3, 0b101);
    fast.write_bytes(&[0xAB, 0xCD]);

    let mut slow = BitStream::with_capacity(4);
    slow.write(3, 0b101);
    slow.write(u8::BITS, 0xAB);
    slow.write(u8::BITS, 0xCD);

    assert_eq!(fast.position(), 19);
    assert_eq!(fast.words(), slow.words());
}

#[test]
fn write_bytes_and_alignment() {
    let mut writer = BitStream::with_capacity(5);

    writer.write(1, 1);
    writer.align_to_byte();
    assert_eq!(writer.position(), 8);

    writer.align_to_byte();
    assert_eq!(writer.position(), 8);

    writer.write(u8::BITS, 3);
    writer.write_bytes(&[4, 5, 6]);
    assert_eq!(writer.remaining(), 0);

    let mut reader = BitStream::from_words(writer.words());
    let mut out = [0; 5];
    reader.read_bytes(&mut out);
    assert_eq!(out, [1, 3, 4, 5, 6]);
}

#[test]
#[should_panic(expected = "overruns")]
fn write_past_capacity() {
    let mut writer = BitStream::with_capacity(1);
    writer.write(u8::BITS, 0);
    writer.write(1, 0);
}

#[test]
#[should_panic(expected = "overruns")]
fn write_bytes_past_capacity() {
    let mut writer = BitStream::with_capacity(2);
    writer.write(1, 0);
    writer.write_bytes(&[0, 0]);
}

#[test]
#[should_panic(expected = "field width")]
fn write_zero_width() {
    let mut writer = BitStream::with_capacity(4);
    writer.write(0, 0);
}

#[test]
#[should_panic(expected = "field width")]
fn write_too_wide() {
    let mut writer = BitStream::with_capacity(8);
    writer.write(33, 0);
}

#[test]
#[should_panic(expected = "stream mode")]
fn write_to_reader() {
    let mut reader = BitStream::from_bytes(&[0; 4]);
    reader.write(1, 1);
}

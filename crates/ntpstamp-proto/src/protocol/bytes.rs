use byteorder::{ByteOrder, NativeEndian};

use crate::error::ParseError;

use super::{ConstPackedSizeBytes, FromBytes, Packet, TimestampFormat, ToBytes};

// The codec moves the in-memory image of a normalized value to and from the
// buffer with native-endian reads and writes. Normalization is the only place
// byte order changes, and it happens exactly once per direction.

fn read_raw_timestamp(buf: &[u8]) -> TimestampFormat {
    TimestampFormat {
        seconds: NativeEndian::read_u32(&buf[0..4]),
        fraction: NativeEndian::read_u32(&buf[4..8]),
    }
}

fn write_raw_timestamp(ts: &TimestampFormat, buf: &mut [u8]) {
    NativeEndian::write_u32(&mut buf[0..4], ts.seconds);
    NativeEndian::write_u32(&mut buf[4..8], ts.fraction);
}

impl FromBytes for TimestampFormat {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        Self::check_packed_len(buf.len())?;
        let mut ts = read_raw_timestamp(buf);
        ts.normalize_byte_order();
        Ok((ts, Self::PACKED_SIZE_BYTES))
    }
}

impl ToBytes for TimestampFormat {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        Self::check_packed_len(buf.len())?;
        let mut wire = *self;
        wire.normalize_byte_order();
        write_raw_timestamp(&wire, buf);
        Ok(Self::PACKED_SIZE_BYTES)
    }
}

impl Packet {
    /// Serialize into a fixed 48-byte network-order record.
    ///
    /// The packet itself is not modified; a copy is normalized and written out.
    pub fn to_wire(&self) -> [u8; Packet::PACKED_SIZE_BYTES] {
        let mut wire = *self;
        wire.normalize_byte_order();

        let mut buf = [0u8; Packet::PACKED_SIZE_BYTES];
        buf[0] = wire.li_vn_mode;
        buf[1] = wire.stratum;
        buf[2] = wire.poll as u8;
        buf[3] = wire.precision as u8;
        NativeEndian::write_u32(&mut buf[4..8], wire.root_delay);
        NativeEndian::write_u32(&mut buf[8..12], wire.root_dispersion);
        buf[12..16].copy_from_slice(&wire.reference_id);
        write_raw_timestamp(&wire.reference_timestamp, &mut buf[16..24]);
        write_raw_timestamp(&wire.origin_timestamp, &mut buf[24..32]);
        write_raw_timestamp(&wire.receive_timestamp, &mut buf[32..40]);
        write_raw_timestamp(&wire.transmit_timestamp, &mut buf[40..48]);
        buf
    }
}

impl FromBytes for Packet {
    /// Parse the first 48 bytes of `buf`. Any trailing bytes (extension fields, MAC) are ignored.
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        Self::check_packed_len(buf.len())?;

        let mut packet = Packet::default();
        packet.li_vn_mode = buf[0];
        packet.stratum = buf[1];
        packet.poll = buf[2] as i8;
        packet.precision = buf[3] as i8;
        packet.root_delay = NativeEndian::read_u32(&buf[4..8]);
        packet.root_dispersion = NativeEndian::read_u32(&buf[8..12]);
        packet.reference_id.copy_from_slice(&buf[12..16]);
        packet.reference_timestamp = read_raw_timestamp(&buf[16..24]);
        packet.origin_timestamp = read_raw_timestamp(&buf[24..32]);
        packet.receive_timestamp = read_raw_timestamp(&buf[32..40]);
        packet.transmit_timestamp = read_raw_timestamp(&buf[40..48]);
        packet.normalize_byte_order();

        Ok((packet, Self::PACKED_SIZE_BYTES))
    }
}

impl ToBytes for Packet {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        Self::check_packed_len(buf.len())?;
        buf[..Self::PACKED_SIZE_BYTES].copy_from_slice(&self.to_wire());
        Ok(Self::PACKED_SIZE_BYTES)
    }
}

use super::{
    ConstPackedSizeBytes, LEAP_MASK, LEAP_SHIFT, MODE_MASK, VERSION_MASK, VERSION_SHIFT,
};

/// **NTP Timestamp Format** - Used in packet headers and other places with limited word size. It
/// includes a 32-bit unsigned seconds field spanning 136 years and a 32-bit fraction field
/// resolving 232 picoseconds.
///
/// The prime epoch is 0 h 1 January 1900 UTC, when all bits are zero. An all-zero timestamp is
/// also the protocol's "unset" sentinel.
///
/// ### Layout
///
/// ```ignore
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                            Seconds                            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                            Fraction                           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TimestampFormat {
    /// Seconds since 1900-01-01 00:00:00 UTC (32-bit unsigned).
    pub seconds: u32,
    /// Fractional seconds in units of 2^-32 s.
    pub fraction: u32,
}

/// A 2-bit integer warning of an impending leap second to be inserted or deleted in the last
/// minute of the current month.
///
/// Note that this field is packed in the actual header.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum LeapIndicator {
    /// No leap required.
    #[default]
    NoWarning = 0,
    /// Last minute of the day has 61 seconds.
    AddOne = 1,
    /// Last minute of the day has 59 seconds.
    SubOne = 2,
    /// Alarm condition: clock unsynchronized, do not trust.
    Alarm = 3,
}

impl TryFrom<u8> for LeapIndicator {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LeapIndicator::NoWarning),
            1 => Ok(LeapIndicator::AddOne),
            2 => Ok(LeapIndicator::SubOne),
            3 => Ok(LeapIndicator::Alarm),
            _ => Err(()),
        }
    }
}

/// A 3-bit integer representing the NTP version number.
///
/// Note that while this struct is 8-bits, this field is packed to 3 in the actual header.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Version(u8);

/// A 3-bit integer representing the mode.
///
/// Note that while this enum is 8-bits, this field is packed to 3 in the actual header.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Mode {
    /// Reserved mode (value 0).
    Reserved = 0,
    /// Symmetric active mode (value 1).
    SymmetricActive = 1,
    /// Symmetric passive mode (value 2).
    SymmetricPassive = 2,
    /// Client mode (value 3).
    #[default]
    Client = 3,
    /// Server mode (value 4).
    Server = 4,
    /// Broadcast mode (value 5).
    Broadcast = 5,
    /// NTP control message mode (value 6).
    NtpControlMessage = 6,
    /// Reserved for private use (value 7).
    ReservedForPrivateUse = 7,
}

impl TryFrom<u8> for Mode {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Mode::Reserved),
            1 => Ok(Mode::SymmetricActive),
            2 => Ok(Mode::SymmetricPassive),
            3 => Ok(Mode::Client),
            4 => Ok(Mode::Server),
            5 => Ok(Mode::Broadcast),
            6 => Ok(Mode::NtpControlMessage),
            7 => Ok(Mode::ReservedForPrivateUse),
            _ => Err(()),
        }
    }
}

/// **Packet Header** - the fixed 48-byte NTP message, without extension fields or MAC.
///
/// The first byte packs the leap indicator, version and mode; use the accessors rather than
/// manipulating [`li_vn_mode`](Packet::li_vn_mode) directly. All multi-byte numeric fields are
/// in host byte order while the packet is held in memory.
///
/// ### Format
///
/// ```ignore
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |LI | VN  |Mode |    Stratum     |     Poll      |  Precision   |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                         Root Delay                            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                         Root Dispersion                       |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                          Reference ID                         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                     Reference Timestamp (64)                  +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                      Origin Timestamp (64)                    +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                      Receive Timestamp (64)                   +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                      Transmit Timestamp (64)                  +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Packet {
    /// Packed leap indicator (bits 6-7), version (bits 3-5) and mode (bits 0-2).
    pub li_vn_mode: u8,
    /// Stratum: 0 unspecified, 1 primary, 2-15 secondary, 16 unsynchronized, 17+ reserved.
    pub stratum: u8,
    /// Maximum interval between successive messages, in log2 seconds.
    pub poll: i8,
    /// Precision of the system clock, in log2 seconds.
    pub precision: i8,
    /// Total round-trip delay to the reference clock, NTP short format (16.16).
    pub root_delay: u32,
    /// Total dispersion to the reference clock, NTP short format (16.16).
    pub root_dispersion: u32,
    /// Reference identifier: a kiss code, a reference clock name, or an upstream address.
    pub reference_id: [u8; 4],
    /// Time when the system clock was last set or corrected.
    pub reference_timestamp: TimestampFormat,
    /// Time at the client when the request departed for the server.
    pub origin_timestamp: TimestampFormat,
    /// Time at the server when the request arrived from the client.
    pub receive_timestamp: TimestampFormat,
    /// Time at the server when the response left for the client.
    pub transmit_timestamp: TimestampFormat,
}

// Inherent implementations.

impl TimestampFormat {
    /// Swap both fields between host byte order and big-endian.
    ///
    /// Applying this twice restores the original value. On big-endian targets `u32::to_be` is
    /// the identity, so no byte-swapping code is emitted at all.
    pub fn normalize_byte_order(&mut self) {
        self.seconds = self.seconds.to_be();
        self.fraction = self.fraction.to_be();
    }

    /// Whether both fields are zero, the "unset" sentinel.
    pub fn is_zero(&self) -> bool {
        self.seconds == 0 && self.fraction == 0
    }
}

impl Version {
    /// NTP version 3 (RFC 1305).
    pub const V3: Self = Version(3);
    /// NTP version 4 (RFC 5905, current standard).
    pub const V4: Self = Version(4);

    /// Create a `Version` from a raw version number.
    ///
    /// Returns `None` if the value does not fit the 3-bit field or is zero.
    pub fn new(v: u8) -> Option<Self> {
        if (1..=7).contains(&v) {
            Some(Version(v))
        } else {
            None
        }
    }

    /// Returns the raw version number as a `u8`.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Version {
    /// Defaults to NTPv4, the current standard (RFC 5905).
    fn default() -> Self {
        Version::V4
    }
}

impl Packet {
    /// A zero-initialized client request (mode 3) with the given version.
    ///
    /// Every other field, including all four timestamps, stays zero. A server answering a basic
    /// client query ignores the all-zero origin timestamp.
    pub fn client_request(version: Version) -> Self {
        let mut packet = Packet::default();
        packet.set_version(version.value());
        packet.set_mode(Mode::Client as u8);
        packet
    }

    /// The association mode (bits 0-2).
    pub fn mode(&self) -> u8 {
        self.li_vn_mode & MODE_MASK
    }

    /// Set the mode. Values wider than 3 bits are truncated.
    pub fn set_mode(&mut self, mode: u8) {
        self.li_vn_mode = (self.li_vn_mode & !MODE_MASK) | (mode & MODE_MASK);
    }

    /// The protocol version (bits 3-5).
    pub fn version(&self) -> u8 {
        (self.li_vn_mode >> VERSION_SHIFT) & VERSION_MASK
    }

    /// Set the version. Values wider than 3 bits are truncated.
    pub fn set_version(&mut self, version: u8) {
        let field = VERSION_MASK << VERSION_SHIFT;
        self.li_vn_mode = (self.li_vn_mode & !field) | ((version & VERSION_MASK) << VERSION_SHIFT);
    }

    /// The leap indicator (bits 6-7).
    pub fn leap_indicator(&self) -> u8 {
        (self.li_vn_mode >> LEAP_SHIFT) & LEAP_MASK
    }

    /// Set the leap indicator. Values wider than 2 bits are truncated.
    pub fn set_leap_indicator(&mut self, leap: u8) {
        let field = LEAP_MASK << LEAP_SHIFT;
        self.li_vn_mode = (self.li_vn_mode & !field) | ((leap & LEAP_MASK) << LEAP_SHIFT);
    }

    /// Swap every multi-byte numeric field between host byte order and big-endian.
    ///
    /// Covers the four timestamps and the root delay / root dispersion words. Single-byte
    /// fields and the reference identifier are byte-order independent and left untouched.
    pub fn normalize_byte_order(&mut self) {
        self.root_delay = self.root_delay.to_be();
        self.root_dispersion = self.root_dispersion.to_be();
        self.reference_timestamp.normalize_byte_order();
        self.origin_timestamp.normalize_byte_order();
        self.receive_timestamp.normalize_byte_order();
        self.transmit_timestamp.normalize_byte_order();
    }

    /// The Kiss-o'-Death code, if this is a stratum 0 packet.
    pub fn kiss_code(&self) -> Option<[u8; 4]> {
        (self.stratum == 0).then_some(self.reference_id)
    }
}

// Size implementations.

impl ConstPackedSizeBytes for TimestampFormat {
    const PACKED_SIZE_BYTES: usize = 8;
}

impl ConstPackedSizeBytes for Packet {
    const PACKED_SIZE_BYTES: usize = 4 + 4 + 4 + 4 + TimestampFormat::PACKED_SIZE_BYTES * 4;
}

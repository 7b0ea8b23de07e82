use crate::error::ParseError;

/// Types whose wire image has a fixed length.
pub trait ConstPackedSizeBytes {
    /// Length of the wire image in bytes.
    const PACKED_SIZE_BYTES: usize;

    /// Fail with [`ParseError::BufferTooShort`] unless `len` can hold one wire image.
    fn check_packed_len(len: usize) -> Result<(), ParseError> {
        if len < Self::PACKED_SIZE_BYTES {
            return Err(ParseError::BufferTooShort {
                needed: Self::PACKED_SIZE_BYTES,
                available: len,
            });
        }
        Ok(())
    }
}

/// Decode a value from the front of a network-order buffer.
///
/// Returns the value and the number of bytes it occupied; anything after that
/// is left for the caller. Works on plain slices, without `std`.
pub trait FromBytes: Sized {
    /// Decode from the front of `buf`.
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError>;
}

/// Encode a value into the front of a buffer in network order.
pub trait ToBytes {
    /// Encode into the front of `buf`, returning the number of bytes written.
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError>;
}

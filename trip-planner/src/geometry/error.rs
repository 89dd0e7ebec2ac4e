//! Geometry decoding errors.

/// Errors from decoding an encoded polyline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// Input ended in the middle of a value, or after a latitude with no longitude
    #[error("truncated polyline at byte {offset}")]
    Truncated { offset: usize },

    /// Byte outside the printable polyline alphabet (`?` to `~`)
    #[error("invalid polyline byte 0x{byte:02x} at {offset}")]
    InvalidByte { offset: usize, byte: u8 },

    /// A single value spans more chunks than fit in 64 bits
    #[error("polyline value too long at byte {offset}")]
    Overlong { offset: usize },
}

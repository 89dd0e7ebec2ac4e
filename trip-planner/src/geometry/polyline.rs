//! Google Encoded Polyline Algorithm Format.
//!
//! Each coordinate is scaled by 1e5 and rounded, then stored as the signed
//! delta from the previous point. Deltas are zig-zag encoded and written as
//! little-endian 5-bit chunks, each offset by 63 so the output is printable
//! ASCII. A chunk with bit 0x20 set is followed by another chunk of the same
//! value.

use crate::domain::Coordinate;

use super::error::GeometryError;

/// Fixed precision: five decimal digits.
const PRECISION: f64 = 1e5;

/// Offset added to every chunk to keep it printable.
const CHUNK_OFFSET: u8 = 63;

/// Continuation bit within a chunk.
const CONTINUATION: u8 = 0x20;

/// Largest shift a 64-bit value can absorb.
const MAX_SHIFT: u32 = 60;

/// Decode a polyline into coordinates.
///
/// Empty input yields an empty vector.
///
/// ```
/// use trip_planner::geometry::decode;
///
/// let coords = decode("_p~iF~ps|U").unwrap();
/// assert_eq!(coords.len(), 1);
/// assert!((coords[0].latitude - 38.5).abs() < 1e-9);
/// assert!(decode("").unwrap().is_empty());
/// ```
pub fn decode(points: &str) -> Result<Vec<Coordinate>, GeometryError> {
    PolylineDecoder::new(points).collect()
}

/// Encode coordinates as a polyline.
pub fn encode(coords: &[Coordinate]) -> String {
    let mut out = String::with_capacity(coords.len() * 8);
    let mut prev_lat = 0i64;
    let mut prev_lon = 0i64;

    for coord in coords {
        let lat = scale(coord.latitude);
        let lon = scale(coord.longitude);

        encode_value(lat - prev_lat, &mut out);
        encode_value(lon - prev_lon, &mut out);

        prev_lat = lat;
        prev_lon = lon;
    }

    out
}

fn scale(value: f64) -> i64 {
    (value * PRECISION).round() as i64
}

fn encode_value(value: i64, out: &mut String) {
    let zigzag = if value < 0 { !(value << 1) } else { value << 1 };
    let mut v = zigzag as u64;

    while v >= u64::from(CONTINUATION) {
        let chunk = (u64::from(CONTINUATION) | (v & 0x1f)) as u8;
        out.push(char::from(chunk + CHUNK_OFFSET));
        v >>= 5;
    }
    out.push(char::from(v as u8 + CHUNK_OFFSET));
}

/// Streaming polyline decoder.
///
/// Yields one coordinate per latitude/longitude pair. After the first
/// error it yields nothing further.
#[derive(Debug, Clone)]
pub struct PolylineDecoder<'a> {
    bytes: &'a [u8],
    pos: usize,
    lat: i64,
    lon: i64,
    failed: bool,
}

impl<'a> PolylineDecoder<'a> {
    pub fn new(points: &'a str) -> Self {
        Self {
            bytes: points.as_bytes(),
            pos: 0,
            lat: 0,
            lon: 0,
            failed: false,
        }
    }

    /// Read one zig-zag varint starting at `self.pos`.
    fn next_value(&mut self) -> Result<i64, GeometryError> {
        let mut result = 0u64;
        let mut shift = 0u32;

        loop {
            let offset = self.pos;
            let byte = *self
                .bytes
                .get(offset)
                .ok_or(GeometryError::Truncated { offset })?;

            if !(CHUNK_OFFSET..=b'~').contains(&byte) {
                return Err(GeometryError::InvalidByte { offset, byte });
            }
            if shift > MAX_SHIFT {
                return Err(GeometryError::Overlong { offset });
            }

            let chunk = byte - CHUNK_OFFSET;
            result |= u64::from(chunk & 0x1f) << shift;
            shift += 5;
            self.pos += 1;

            if chunk & CONTINUATION == 0 {
                break;
            }
        }

        let value = (result >> 1) as i64;
        Ok(if result & 1 == 1 { !value } else { value })
    }
}

impl Iterator for PolylineDecoder<'_> {
    type Item = Result<Coordinate, GeometryError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.bytes.len() {
            return None;
        }

        let pair = self
            .next_value()
            .and_then(|dlat| self.next_value().map(|dlon| (dlat, dlon)));

        match pair {
            Ok((dlat, dlon)) => {
                self.lat += dlat;
                self.lon += dlon;
                Some(Ok(Coordinate::new(
                    self.lat as f64 / PRECISION,
                    self.lon as f64 / PRECISION,
                )))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

//! Serialized size estimation.
//!
//! Sizes are the byte length of the compact JSON encoding, measured by
//! streaming the serializer into a counter instead of building the string.

use std::io;

use serde::Serialize;

use crate::error::FigtrimError;

pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

#[derive(Default)]
struct ByteCounter {
    bytes: usize,
}

impl io::Write for ByteCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Byte length of `value` serialized as compact JSON.
pub fn estimate_size_bytes<T: Serialize + ?Sized>(value: &T) -> Result<usize, FigtrimError> {
    let mut counter = ByteCounter::default();
    serde_json::to_writer(&mut counter, value)?;
    Ok(counter.bytes)
}

/// Same as [`estimate_size_bytes`], in megabytes.
pub fn estimate_size_mb<T: Serialize + ?Sized>(value: &T) -> Result<f64, FigtrimError> {
    Ok(bytes_to_mb(estimate_size_bytes(value)?))
}

pub fn bytes_to_mb(bytes: usize) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

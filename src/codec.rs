//! Content codec for stored page text.
//!
//! Raw page text is serialized with a stable binary encoding and then
//! zlib-compressed before it lands in the `link_content` column. The two
//! functions here are exact inverses, so any reader of the stored blob can
//! recover the original text byte for byte.

use crate::error::Result;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// Pack page text into a compressed blob.
///
/// The text is bincode-serialized first so the length travels with the
/// payload, then run through a zlib pass. The output is raw binary suitable
/// for a BLOB column.
///
/// # Arguments
///
/// * `text` - The raw page text to pack
///
/// # Returns
///
/// The compressed blob, or an error if serialization or compression failed.
pub fn compress(text: &str) -> Result<Vec<u8>> {
    let serialized = bincode::serialize(text)?;
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&serialized)?;
    Ok(encoder.finish()?)
}

/// Unpack a blob produced by [`compress`] back into the original text.
///
/// # Arguments
///
/// * `blob` - A blob previously produced by [`compress`]
///
/// # Returns
///
/// The original text, or an error if the blob is not valid zlib data or the
/// decompressed payload does not deserialize.
pub fn decompress(blob: &[u8]) -> Result<String> {
    let mut decoder = ZlibDecoder::new(blob);
    let mut serialized = Vec::new();
    decoder.read_to_end(&mut serialized)?;
    Ok(bincode::deserialize(&serialized)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_ascii() {
        let text = "Reuters Brasil - Noticias do dia";
        let blob = compress(text).unwrap();
        assert_eq!(decompress(&blob).unwrap(), text);
    }

    #[test]
    fn test_round_trip_empty() {
        let blob = compress("").unwrap();
        assert_eq!(decompress(&blob).unwrap(), "");
    }

    #[test]
    fn test_round_trip_multibyte() {
        let text = "Negociações avançam após reunião em São Paulo — ações sobem 3%";
        let blob = compress(text).unwrap();
        assert_eq!(decompress(&blob).unwrap(), text);
    }

    #[test]
    fn test_round_trip_large_input() {
        let text = "<html><body><p>editoria de economia</p></body></html>".repeat(2000);
        let blob = compress(&text).unwrap();
        assert!(blob.len() < text.len());
        assert_eq!(decompress(&blob).unwrap(), text);
    }

    #[test]
    fn test_decompress_rejects_garbage() {
        assert!(decompress(&[0x00, 0x01, 0x02, 0x03]).is_err());
    }
}

//! Pixel-dimension probing for PNG and JPEG bytes.
//!
//! Layout only needs an image's aspect ratio, so nothing is decoded past the
//! header: PNG goes through the `png` decoder's info pass, JPEG is scanned
//! for its start-of-frame segment.

use std::io::Cursor;

/// Intrinsic pixel size of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// Width over height. Zero-height images report 0, which layout treats
    /// as degenerate.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        f64::from(self.width) / f64::from(self.height)
    }
}

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
const JPEG_SOI: [u8; 2] = [0xff, 0xd8];

/// Read pixel dimensions from PNG or JPEG bytes, sniffing the format from
/// the leading magic bytes.
///
/// # Errors
///
/// Returns a description of the problem when the bytes are neither format
/// or the header is truncated.
pub fn probe(bytes: &[u8]) -> Result<Dimensions, String> {
    if bytes.starts_with(&PNG_SIGNATURE) {
        probe_png(bytes)
    } else if bytes.starts_with(&JPEG_SOI) {
        probe_jpeg(bytes)
    } else {
        Err("not a PNG or JPEG image".into())
    }
}

fn probe_png(bytes: &[u8]) -> Result<Dimensions, String> {
    let decoder = png::Decoder::new(Cursor::new(bytes));
    let reader = decoder.read_info().map_err(|e| e.to_string())?;
    let info = reader.info();
    Ok(Dimensions { width: info.width, height: info.height })
}

fn probe_jpeg(bytes: &[u8]) -> Result<Dimensions, String> {
    let mut pos = JPEG_SOI.len();
    loop {
        // Markers may be preceded by any number of 0xff fill bytes.
        while bytes.get(pos) == Some(&0xff) {
            pos += 1;
        }
        let Some(&marker) = bytes.get(pos) else {
            return Err("jpeg ended before a frame header".into());
        };
        if pos == 0 || bytes[pos - 1] != 0xff {
            return Err(format!("expected jpeg marker at offset {pos}"));
        }
        pos += 1;

        match marker {
            // Standalone markers carry no length.
            0x01 | 0xd0..=0xd7 => continue,
            0xd9 | 0xda => return Err("jpeg has no frame header before scan data".into()),
            _ => {}
        }

        let len = read_u16(bytes, pos)? as usize;
        if len < 2 {
            return Err(format!("invalid jpeg segment length {len}"));
        }

        if is_start_of_frame(marker) {
            // length(2) precision(1) height(2) width(2)
            let height = read_u16(bytes, pos + 3)?;
            let width = read_u16(bytes, pos + 5)?;
            return Ok(Dimensions { width: u32::from(width), height: u32::from(height) });
        }
        pos += len;
    }
}

fn is_start_of_frame(marker: u8) -> bool {
    matches!(marker, 0xc0..=0xcf) && !matches!(marker, 0xc4 | 0xc8 | 0xcc)
}

fn read_u16(bytes: &[u8], at: usize) -> Result<u16, String> {
    match bytes.get(at..at + 2) {
        Some(&[hi, lo]) => Ok(u16::from_be_bytes([hi, lo])),
        _ => Err("jpeg header truncated".into()),
    }
}

//! Device transfer frame.
//!
//! The panel client reads two 4-bit wire indices per byte, left pixel in the
//! high nibble. Palette indices above 3 shift up by one because wire index 4
//! is reserved by the controller. Rows of odd width end in a zero low
//! nibble.
//!
//! The bytes travel as uppercase hex pairs separated by `,`; after every
//! 16th byte the separator is `,\n`. There is no trailing separator.
//!
//! ```
//! use spectra_dither::{decode_frame, encode_frame, DitheredImage, Palette};
//!
//! let palette = Palette::spectra6();
//! // black, white, blue
//! let image = DitheredImage::new(vec![0, 1, 4], 3, 1);
//! let text = encode_frame(&image, &palette);
//! assert_eq!(text, "01,50");
//!
//! let decoded = decode_frame(&text, 3, &palette).unwrap();
//! assert_eq!(decoded, image);
//! ```

use std::fmt;
use std::fmt::Write;

use super::DitheredImage;
use crate::palette::Palette;

/// Bytes per text line.
pub const BYTES_PER_LINE: usize = 16;

/// Packed frame size in bytes for a `width` x `height` image.
#[inline]
pub fn frame_len(width: u32, height: u32) -> usize {
    (width as usize).div_ceil(2) * height as usize
}

/// Pack indices into wire bytes.
pub fn pack(image: &DitheredImage, palette: &Palette) -> Vec<u8> {
    let width = image.width() as usize;
    let mut bytes = Vec::with_capacity(frame_len(image.width(), image.height()));
    for row in image.indices().chunks(width.max(1)) {
        for pair in row.chunks(2) {
            let high = palette.wire_index(pair[0]);
            let low = pair.get(1).map_or(0, |&idx| palette.wire_index(idx));
            bytes.push((high << 4) | low);
        }
    }
    bytes
}

/// Render bytes as the comma separated hex text.
pub fn to_hex_text(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len() * 3 + bytes.len() / BYTES_PER_LINE);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            text.push(',');
            if i % BYTES_PER_LINE == 0 {
                text.push('\n');
            }
        }
        let _ = write!(text, "{:02X}", byte);
    }
    text
}

/// Encode a dithered image as transfer text.
pub fn encode_frame(image: &DitheredImage, palette: &Palette) -> String {
    to_hex_text(&pack(image, palette))
}

/// Errors from parsing transfer text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// A token is not a two-digit hex byte.
    InvalidByte { position: usize, token: String },
    /// A nibble holds a wire index with no palette color.
    UnknownWireIndex { position: usize, wire: u8 },
    /// The byte count is not a whole number of rows.
    RaggedLength { bytes: usize, row_bytes: usize },
    /// Width must be at least one pixel.
    ZeroWidth,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::InvalidByte { position, token } => {
                write!(f, "invalid hex byte {:?} at position {}", token, position)
            }
            FrameError::UnknownWireIndex { position, wire } => {
                write!(f, "unknown wire index {} in byte {}", wire, position)
            }
            FrameError::RaggedLength { bytes, row_bytes } => write!(
                f,
                "{} bytes is not a multiple of the row size {}",
                bytes, row_bytes
            ),
            FrameError::ZeroWidth => f.write_str("frame width must be positive"),
        }
    }
}

impl std::error::Error for FrameError {}

/// Parse comma separated hex text back into bytes.
///
/// Whitespace around tokens is ignored. Empty text is an empty frame.
pub fn parse_hex_text(text: &str) -> Result<Vec<u8>, FrameError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .enumerate()
        .map(|(position, token)| {
            let token = token.trim();
            if token.len() != 2 {
                return Err(FrameError::InvalidByte {
                    position,
                    token: token.to_string(),
                });
            }
            u8::from_str_radix(token, 16).map_err(|_| FrameError::InvalidByte {
                position,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Decode transfer text for an image `width` pixels wide.
///
/// The height follows from the byte count. Padding nibbles of odd-width
/// rows are ignored.
pub fn decode_frame(
    text: &str,
    width: u32,
    palette: &Palette,
) -> Result<DitheredImage, FrameError> {
    if width == 0 {
        return Err(FrameError::ZeroWidth);
    }
    let bytes = parse_hex_text(text)?;
    let row_bytes = (width as usize).div_ceil(2);
    if bytes.len() % row_bytes != 0 {
        return Err(FrameError::RaggedLength {
            bytes: bytes.len(),
            row_bytes,
        });
    }
    let height = bytes.len() / row_bytes;

    let mut indices = Vec::with_capacity(width as usize * height);
    for (row_idx, row) in bytes.chunks(row_bytes).enumerate() {
        for x in 0..width as usize {
            let byte = row[x / 2];
            let wire = if x % 2 == 0 { byte >> 4 } else { byte & 0x0F };
            let idx = palette
                .from_wire_index(wire)
                .ok_or(FrameError::UnknownWireIndex {
                    position: row_idx * row_bytes + x / 2,
                    wire,
                })?;
            indices.push(idx);
        }
    }
    Ok(DitheredImage::new(indices, width, height as u32))
}

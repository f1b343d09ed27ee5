// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Fixed 15-byte header of a compressed file.

use super::packing;
use crate::config::{
    check_codebook_size, check_geometry, CHANNELS, FORMAT_TAG, HEADER_SIZE, MAX_CODEBOOK_SIZE,
    WORD_BITS,
};
use crate::error::{FormatError, Result, VqError};
use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use serde::Serialize;
use std::io::{Read, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Header {
    pub width: u16,
    pub height: u16,
    pub tile_width: u16,
    pub tile_height: u16,
    /// Codebook size. Kept wider than the u16 field so 65536 is representable.
    pub k: u32,
    /// Bits per packed label, `floor(log2(k))` when written by this encoder.
    pub id_bits: u16,
    /// `tile_width * tile_height * 3`.
    pub tile_bytes: u16,
}

impl Header {
    /// Validated header for a new file.
    pub fn new(width: u32, height: u32, tile_width: u32, tile_height: u32, k: u32) -> Result<Self> {
        check_geometry(width, height, tile_width, tile_height)?;
        check_codebook_size(k)?;
        Ok(Self {
            width: width as u16,
            height: height as u16,
            tile_width: tile_width as u16,
            tile_height: tile_height as u16,
            k,
            id_bits: id_bits_for(k),
            tile_bytes: (tile_width * tile_height * CHANNELS as u32) as u16,
        })
    }

    /// Number of tiles, `(w / tile_w) * (h / tile_h)`.
    pub fn vector_count(&self) -> usize {
        (self.width / self.tile_width) as usize * (self.height / self.tile_height) as usize
    }

    pub fn tile_len(&self) -> usize {
        self.tile_bytes as usize
    }

    pub fn codebook_bytes(&self) -> usize {
        self.k as usize * self.tile_len()
    }

    pub fn labels_per_word(&self) -> usize {
        packing::labels_per_word(self.id_bits)
    }

    pub fn label_words(&self) -> usize {
        packing::word_count(self.vector_count(), self.id_bits)
    }

    /// Exact size of the encoded file.
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.codebook_bytes() + self.label_words() * 2
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_u8(FORMAT_TAG)?;
        writer.write_u16::<LittleEndian>(self.width)?;
        writer.write_u16::<LittleEndian>(self.height)?;
        writer.write_u16::<LittleEndian>(self.tile_width)?;
        writer.write_u16::<LittleEndian>(self.tile_height)?;
        // 65536 wraps to 0; the reader restores it from id_bits
        writer.write_u16::<LittleEndian>(self.k as u16)?;
        writer.write_u16::<LittleEndian>(self.id_bits)?;
        writer.write_u16::<LittleEndian>(self.tile_bytes)?;
        Ok(())
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0] = FORMAT_TAG;
        let fields = [
            self.width,
            self.height,
            self.tile_width,
            self.tile_height,
            self.k as u16,
            self.id_bits,
            self.tile_bytes,
        ];
        LittleEndian::write_u16_into(&fields, &mut buf[1..]);
        buf
    }

    /// Reads and sanity-checks a header. The stored `id_bits` is trusted as written.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut buf = [0u8; HEADER_SIZE];
        let found = super::read_full(&mut reader, &mut buf)?;
        if found < HEADER_SIZE {
            return Err(FormatError::TruncatedHeader {
                expected: HEADER_SIZE,
                found,
            }
            .into());
        }
        Self::from_bytes(&buf)
    }

    pub fn from_bytes(buf: &[u8; HEADER_SIZE]) -> Result<Self> {
        if buf[0] != FORMAT_TAG {
            return Err(FormatError::UnknownTag(buf[0]).into());
        }
        let mut fields = [0u16; 7];
        LittleEndian::read_u16_into(&buf[1..], &mut fields);
        let [width, height, tile_width, tile_height, k_field, id_bits, tile_bytes] = fields;

        let malformed = |msg: String| -> VqError { FormatError::MalformedHeader(msg).into() };

        if tile_width == 0 || tile_height == 0 {
            return Err(malformed(format!("zero tile size {}x{}", tile_width, tile_height)));
        }
        if width % tile_width != 0 || height % tile_height != 0 {
            return Err(malformed(format!(
                "image {}x{} not divisible into {}x{} tiles",
                width, height, tile_width, tile_height
            )));
        }
        if id_bits as u32 > WORD_BITS {
            return Err(malformed(format!("label width {} exceeds {} bits", id_bits, WORD_BITS)));
        }
        let k = match k_field {
            0 if id_bits as u32 == WORD_BITS => MAX_CODEBOOK_SIZE,
            0 => return Err(malformed("empty codebook".to_string())),
            k => k as u32,
        };
        let expected_tile = tile_width as u32 * tile_height as u32 * CHANNELS as u32;
        if tile_bytes as u32 != expected_tile {
            return Err(malformed(format!(
                "tile size {} bytes, geometry implies {}",
                tile_bytes, expected_tile
            )));
        }

        Ok(Self {
            width,
            height,
            tile_width,
            tile_height,
            k,
            id_bits,
            tile_bytes,
        })
    }
}

/// `floor(log2(k))` for `k >= 1`.
pub fn id_bits_for(k: u32) -> u16 {
    debug_assert!(k >= 1);
    (u32::BITS - 1 - k.leading_zeros()) as u16
}

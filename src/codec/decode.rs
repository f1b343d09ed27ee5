// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Compressed stream decoding.

use super::header::Header;
use super::packing::unpack_labels;
use super::{read_full, read_region, Compressed};
use crate::error::{FormatError, Result};
use crate::types::matrix::Matrix;
use byteorder::{ByteOrder, LittleEndian};
use std::io::Read;

/// Reads a full compressed stream into freshly allocated header, codebook and labels.
pub fn decode<R: Read>(mut reader: R) -> Result<Compressed> {
    let header = Header::read_from(&mut reader)?;

    // buffers grow with the bytes actually read, never with what the header claims
    let expected = header.codebook_bytes();
    let tiles = read_region(&mut reader, expected)?;
    if tiles.len() < expected {
        return Err(FormatError::TruncatedCodebook {
            expected,
            found: tiles.len(),
        }
        .into());
    }
    let codebook = Matrix::from_vec(tiles.into_iter().map(f64::from).collect(), header.tile_len())?;

    let count = header.vector_count();
    let expected_words = header.label_words();
    let raw = read_region(&mut reader, expected_words * 2)?;
    let found = raw.len();
    if found < expected_words * 2 {
        // an odd byte count means the stream stopped inside a word
        let err = if found % 2 == 1 {
            FormatError::PartialLabelWord {
                word: found / 2,
                found: 1,
            }
        } else {
            FormatError::MissingLabelWords {
                expected: expected_words,
                found: found / 2,
            }
        };
        return Err(err.into());
    }

    let mut words = vec![0u16; expected_words];
    LittleEndian::read_u16_into(&raw, &mut words);
    let labels = unpack_labels(&words, header.id_bits, count);

    if let Some((index, &label)) = labels.iter().enumerate().find(|&(_, &l)| l >= header.k) {
        return Err(FormatError::LabelOutOfRange {
            index,
            label,
            k: header.k,
        }
        .into());
    }

    let mut probe = [0u8; 1];
    if read_full(&mut reader, &mut probe)? > 0 {
        tracing::warn!("ignoring bytes after the label stream");
    }

    tracing::debug!(
        width = header.width,
        height = header.height,
        k = header.k,
        labels = labels.len(),
        "decoded compressed stream"
    );

    Ok(Compressed {
        header,
        codebook,
        labels,
    })
}

/// Decodes from an in-memory buffer.
pub fn decode_slice(buf: &[u8]) -> Result<Compressed> {
    decode(buf)
}

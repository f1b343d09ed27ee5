// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Compressed stream encoding.

use super::header::Header;
use super::packing::pack_labels;
use crate::config::check_codebook_size;
use crate::error::{Result, VqError};
use crate::types::matrix::Matrix;
use crate::types::Label;
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

/// Converts a channel value to its stored byte.
///
/// Saturates to `[0, 255]` and truncates toward zero, matching the plain integer cast
/// existing files were written with. NaN maps to 0.
pub fn channel_byte(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// Checks that the codebook and labels agree with the header before anything is written.
pub fn validate(header: &Header, codebook: &Matrix, labels: &[Label]) -> Result<()> {
    check_codebook_size(header.k)?;
    if codebook.rows() != header.k as usize {
        return Err(VqError::DimensionMismatch {
            expected: header.k as usize,
            found: codebook.rows(),
        });
    }
    if codebook.cols() != header.tile_len() {
        return Err(VqError::DimensionMismatch {
            expected: header.tile_len(),
            found: codebook.cols(),
        });
    }
    if labels.len() != header.vector_count() {
        return Err(VqError::DimensionMismatch {
            expected: header.vector_count(),
            found: labels.len(),
        });
    }
    // k is a power of two here, so every label below k fits in id_bits
    if let Some((index, &label)) = labels.iter().enumerate().find(|&(_, &l)| l >= header.k) {
        return Err(VqError::LabelOutOfRange {
            index,
            label,
            k: header.k,
        });
    }
    Ok(())
}

/// Writes header, codebook and packed labels.
pub fn encode<W: Write>(header: &Header, codebook: &Matrix, labels: &[Label], mut writer: W) -> Result<()> {
    validate(header, codebook, labels)?;

    header.write_to(&mut writer)?;

    let tile: Vec<u8> = codebook.as_slice().iter().map(|&v| channel_byte(v)).collect();
    writer.write_all(&tile)?;

    let words = pack_labels(labels, header.id_bits);
    for word in &words {
        writer.write_u16::<LittleEndian>(*word)?;
    }

    tracing::debug!(
        k = header.k,
        id_bits = header.id_bits,
        labels = labels.len(),
        words = words.len(),
        "encoded compressed stream"
    );
    Ok(())
}

/// Encodes into a fresh buffer of exactly [`Header::encoded_len`] bytes.
pub fn encode_to_vec(header: &Header, codebook: &Matrix, labels: &[Label]) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(header.encoded_len());
    encode(header, codebook, labels, &mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_byte_saturates_and_truncates() {
        assert_eq!(channel_byte(0.0), 0);
        assert_eq!(channel_byte(127.9), 127);
        assert_eq!(channel_byte(255.0), 255);
        assert_eq!(channel_byte(300.0), 255);
        assert_eq!(channel_byte(-4.0), 0);
        assert_eq!(channel_byte(f64::NAN), 0);
    }

    #[test]
    fn test_label_out_of_range_rejected() {
        let header = Header::new(2, 2, 1, 1, 2).unwrap();
        let codebook = Matrix::zeros(2, 3);
        let err = encode_to_vec(&header, &codebook, &[0, 1, 2, 0]).unwrap_err();
        assert!(matches!(err, VqError::LabelOutOfRange { index: 2, label: 2, k: 2 }));
    }

    #[test]
    fn test_codebook_shape_checked() {
        let header = Header::new(2, 2, 1, 1, 4).unwrap();
        let codebook = Matrix::zeros(2, 3);
        let err = encode_to_vec(&header, &codebook, &[0, 0, 0, 0]).unwrap_err();
        assert!(matches!(err, VqError::DimensionMismatch { expected: 4, found: 2 }));
    }

    #[test]
    fn test_non_power_of_two_header_rejected() {
        let mut header = Header::new(2, 2, 1, 1, 8).unwrap();
        header.k = 10;
        let codebook = Matrix::zeros(10, 3);
        let err = encode_to_vec(&header, &codebook, &[0, 1, 2, 9]).unwrap_err();
        assert!(matches!(err, VqError::NonPowerOfTwoCodebook(10)));
    }
}

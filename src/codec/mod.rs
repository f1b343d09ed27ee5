// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Compressed file codec.
//!
//! Layout, little-endian throughout:
//!
//! ```text
//! offset  size                 field
//! 0       1                    format tag 'J'
//! 1       2                    width (px)
//! 3       2                    height (px)
//! 5       2                    tile width (px)
//! 7       2                    tile height (px)
//! 9       2                    k, codebook size (65536 stored as 0)
//! 11      2                    id_bits = floor(log2(k))
//! 13      2                    tile size in bytes = tile_w * tile_h * 3
//! 15      k * tile size        codebook, one byte per channel
//! ...     2 * words            packed labels, see [`packing`]
//! ```

pub mod decode;
pub mod encode;
pub mod header;
pub mod packing;

pub use decode::{decode, decode_slice};
pub use encode::{encode, encode_to_vec};
pub use header::Header;

use crate::cluster::ClusterResult;
use crate::error::{Result, VqError};
use crate::types::matrix::Matrix;
use crate::types::Label;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Everything a compressed file holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Compressed {
    pub header: Header,
    /// `k` rows of `tile_bytes` channel values, each a whole number in `[0, 255]`.
    pub codebook: Matrix,
    pub labels: Vec<Label>,
}

impl Compressed {
    /// Pairs a clustering result with its header, checking shapes and label range.
    pub fn from_cluster(header: Header, result: ClusterResult) -> Result<Self> {
        encode::validate(&header, &result.codebook, &result.labels)?;
        Ok(Self {
            header,
            codebook: result.codebook,
            labels: result.labels,
        })
    }

    pub fn encode<W: Write>(&self, writer: W) -> Result<()> {
        encode(&self.header, &self.codebook, &self.labels, writer)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        encode_to_vec(&self.header, &self.codebook, &self.labels)
    }
}

/// Writes a compressed file. I/O failures carry the path.
pub fn write_file(path: impl AsRef<Path>, header: &Header, codebook: &Matrix, labels: &[Label]) -> Result<()> {
    let path = path.as_ref();
    // validate first so a bad request does not leave an empty file behind
    encode::validate(header, codebook, labels)?;

    let file = File::create(path).map_err(|e| VqError::file("create", path, e))?;
    let mut writer = BufWriter::new(file);
    encode(header, codebook, labels, &mut writer).map_err(|e| with_path(e, "write", path))?;
    writer.flush().map_err(|e| VqError::file("write", path, e))?;
    writer
        .get_ref()
        .sync_data()
        .map_err(|e| VqError::file("sync", path, e))?;

    tracing::info!(path = %path.display(), bytes = header.encoded_len(), "wrote compressed file");
    Ok(())
}

/// Reads and decodes a compressed file.
pub fn read_file(path: impl AsRef<Path>) -> Result<Compressed> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| VqError::file("open", path, e))?;
    decode(BufReader::new(file)).map_err(|e| with_path(e, "read", path))
}

/// Reads only the header of a compressed file.
pub fn read_header_file(path: impl AsRef<Path>) -> Result<Header> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| VqError::file("open", path, e))?;
    Header::read_from(BufReader::new(file)).map_err(|e| with_path(e, "read", path))
}

fn with_path(err: VqError, op: &'static str, path: &Path) -> VqError {
    match err {
        VqError::Io(source) => VqError::file(op, path, source),
        other => other,
    }
}

/// Reads up to `len` bytes. The buffer only grows as data arrives, so a corrupt length
/// costs no more memory than the stream really holds.
pub(crate) fn read_region<R: Read>(reader: &mut R, len: usize) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut buf)?;
    Ok(buf)
}

/// Reads until `buf` is full or the reader hits EOF. Returns the bytes read.
pub(crate) fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

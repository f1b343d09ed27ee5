//! Plain-text dumps of pixel and centroid rows for offline inspection.

use crate::error::{PixmapError, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use vqpix_kernel::codec::encode::channel_byte;
use vqpix_kernel::Matrix;

/// One row per line, each value a truncated integer followed by a space, so every
/// line ends in `" \n"`. Existing tooling reads dumps in this exact layout.
pub fn write_rows<W: Write>(rows: &Matrix, mut writer: W) -> std::io::Result<()> {
    for row in rows.iter_rows() {
        for &v in row {
            write!(writer, "{} ", channel_byte(v))?;
        }
        writeln!(writer)?;
    }
    writer.flush()
}

pub fn dump_rows(path: impl AsRef<Path>, rows: &Matrix) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| PixmapError::file("create", path, e))?;
    write_rows(rows, BufWriter::new(file)).map_err(|e| PixmapError::file("write", path, e))?;
    tracing::debug!(path = %path.display(), rows = rows.rows(), "wrote text dump");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_layout() {
        let rows = Matrix::from_rows(&[[1.0, 2.9, 255.0], [0.0, 0.0, 17.5]]).unwrap();
        let mut out = Vec::new();
        write_rows(&rows, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1 2 255 \n0 0 17 \n");
    }
}

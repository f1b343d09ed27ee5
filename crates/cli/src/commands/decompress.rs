use anyhow::Context;
use std::path::Path;
use vqpix_kernel::codec;
use vqpix_pixmap::store_vectors;

pub fn run(input: &Path, output: &Path) -> anyhow::Result<()> {
    let compressed = codec::read_file(input).with_context(|| format!("failed to read {}", input.display()))?;
    let h = compressed.header;

    store_vectors(
        output,
        h.width.into(),
        h.height.into(),
        h.tile_width.into(),
        h.tile_height.into(),
        &compressed.codebook,
        &compressed.labels,
    )
    .with_context(|| format!("failed to write pixmap {}", output.display()))?;

    println!(
        "decompressed {}x{} image ({} tiles, k = {}) to {}",
        h.width,
        h.height,
        compressed.labels.len(),
        h.k,
        output.display()
    );
    Ok(())
}

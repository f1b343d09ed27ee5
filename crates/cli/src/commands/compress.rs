use anyhow::Context;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::Path;
use vqpix_kernel::codec::{self, Header};
use vqpix_kernel::{cluster, CompressConfig};
use vqpix_pixmap::dump::dump_rows;
use vqpix_pixmap::load_vectors;

/// Outcome of one compress run.
#[derive(Debug, Clone)]
pub struct CompressReport {
    pub vectors: usize,
    pub k: u32,
    pub iterations: usize,
    pub converged: bool,
    pub inertia: f64,
    pub bytes: usize,
}

impl CompressReport {
    pub fn print(&self) {
        println!(
            "compressed {} tiles into {} centroids: {} bytes, {} iterations{}, inertia {:.1}",
            self.vectors,
            self.k,
            self.bytes,
            self.iterations,
            if self.converged { " (converged)" } else { "" },
            self.inertia
        );
    }
}

pub fn run(config: &CompressConfig, input: &Path, output: &Path, dump: bool) -> anyhow::Result<CompressReport> {
    config.validate().context("invalid compress settings")?;

    let vectors = load_vectors(
        input,
        config.width,
        config.height,
        config.tile_width,
        config.tile_height,
    )
    .with_context(|| format!("failed to load pixmap {}", input.display()))?;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let result = cluster::run(&vectors, config.k as usize, config.max_iters, &mut rng)
        .context("clustering failed")?;

    let header = Header::new(
        config.width,
        config.height,
        config.tile_width,
        config.tile_height,
        config.k,
    )?;
    codec::write_file(output, &header, &result.codebook, &result.labels)
        .with_context(|| format!("failed to write {}", output.display()))?;

    if dump {
        if config.tile_width == 1 && config.tile_height == 1 {
            let dir = output.parent().unwrap_or_else(|| Path::new("."));
            dump_rows(dir.join("pixels.txt"), &vectors).context("failed to dump pixels")?;
            dump_rows(dir.join("centroids.txt"), &result.codebook).context("failed to dump centroids")?;
            tracing::info!(dir = %dir.display(), "wrote pixels.txt and centroids.txt");
        } else {
            tracing::warn!(
                tile_width = config.tile_width,
                tile_height = config.tile_height,
                "text dump needs 1x1 tiles, skipping"
            );
        }
    }

    Ok(CompressReport {
        vectors: vectors.rows(),
        k: config.k,
        iterations: result.iterations,
        converged: result.converged,
        inertia: result.inertia,
        bytes: header.encoded_len(),
    })
}

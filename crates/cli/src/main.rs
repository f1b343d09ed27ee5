use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use vqpix_cli::commands::{compress, decompress, inspect};
use vqpix_cli::telemetry;
use vqpix_kernel::config::{CompressConfig, DEFAULT_MAX_ITERS, DEFAULT_SEED};

#[derive(Parser)]
#[command(name = "vqpix", version)]
#[command(about = "Tile vector-quantization compressor for raw RGB pixmaps", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cluster the image tiles into a k-entry codebook and write the compressed file.
    #[command(alias = "c")]
    Compress {
        /// Codebook size, a power of two in [1, 65536]
        k: u32,
        /// Image width in pixels
        width: u32,
        /// Image height in pixels
        height: u32,
        /// Tile width in pixels (must divide the width)
        tile_width: u32,
        /// Tile height in pixels (must divide the height)
        tile_height: u32,
        /// Raw row-major RGB input
        input: PathBuf,
        /// Compressed output
        output: PathBuf,

        /// Also write pixels.txt and centroids.txt next to the output (1x1 tiles only)
        #[arg(long, short = 'w')]
        dump: bool,

        /// Upper bound on Lloyd iterations
        #[arg(long, default_value_t = DEFAULT_MAX_ITERS)]
        iterations: usize,

        /// Seed for centroid sampling
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
    /// Rebuild a raw RGB pixmap from a compressed file.
    #[command(alias = "d")]
    Decompress {
        input: PathBuf,
        output: PathBuf,
    },
    /// Show the header of a compressed file.
    Inspect {
        path: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    telemetry::init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // usage errors exit 1; --help and --version are not errors
            return if e.use_stderr() { ExitCode::from(1) } else { ExitCode::SUCCESS };
        }
    };

    let result = match cli.command {
        Commands::Compress {
            k,
            width,
            height,
            tile_width,
            tile_height,
            input,
            output,
            dump,
            iterations,
            seed,
        } => {
            let config = CompressConfig {
                k,
                width,
                height,
                tile_width,
                tile_height,
                max_iters: iterations,
                seed,
            };
            compress::run(&config, &input, &output, dump).map(|report| report.print())
        }
        Commands::Decompress { input, output } => decompress::run(&input, &output),
        Commands::Inspect { path, json } => inspect::run(&path, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

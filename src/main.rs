use clap::Parser;
use masonry_gal::pipeline::{self, BuildOptions};
use masonry_gal::{config, output};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "masonry-gal")]
#[command(about = "Static masonry gallery generator with height-balanced columns")]
#[command(long_about = "\
Static masonry gallery generator with height-balanced columns

Copies every photo in the source directory to <dest>/raw_photos/ under a
sequence number, writes scaled copies to <dest>/compressed_photos/, balances
them across columns of equal rendered height and writes index.html,
style.css and gallery.js next to them.

Output structure:

  gallery/
  ├── index.html
  ├── style.css
  ├── gallery.js
  ├── raw_photos/             # 001.jpg, 002.png, ... (full size)
  └── compressed_photos/      # scaled photos + column_buffer_N.png fillers

Run 'masonry-gal --gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory with the source photos
    #[arg(long, required_unless_present = "gen_config")]
    src_photos_dir: Option<PathBuf>,

    /// Directory the gallery is written to
    #[arg(long, required_unless_present = "gen_config")]
    dest_gallery_dir: Option<PathBuf>,

    /// Scale factor for compressed photos, strictly between 0 and 1
    #[arg(long, required_unless_present = "gen_config")]
    compress_factor: Option<f64>,

    /// Config file (default: <src-photos-dir>/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable the compression cache and recompress every photo
    #[arg(long)]
    no_cache: bool,

    /// Also write the balanced layout as JSON to this file
    #[arg(long)]
    layout_json: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,

    /// Print a stock config.toml with all options documented
    #[arg(long, conflicts_with_all = ["src_photos_dir", "dest_gallery_dir", "compress_factor"])]
    gen_config: bool,
}

impl Cli {
    fn build_options(&self) -> Option<BuildOptions> {
        let mut options = BuildOptions::new(
            self.src_photos_dir.clone()?,
            self.dest_gallery_dir.clone()?,
            self.compress_factor?,
        );
        options.config_path = self.config.clone();
        options.use_cache = !self.no_cache;
        options.layout_json = self.layout_json.clone();
        Some(options)
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return ExitCode::SUCCESS;
    }

    // clap enforces the three build flags when --gen-config is absent
    let Some(options) = cli.build_options() else {
        error!("--src-photos-dir, --dest-gallery-dir and --compress-factor are required");
        return ExitCode::FAILURE;
    };

    match build(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn build(options: &BuildOptions) -> Result<(), pipeline::GalleryError> {
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_process_event(&event) {
                println!("{}", line);
            }
        }
    });

    let result = pipeline::run(options, Some(tx));
    if printer.join().is_err() {
        warn!("Progress printer panicked");
    }
    let report = result?;

    output::print_copy_output(&report.copied);
    println!("{}", output::format_cache_stats(&report.process.cache_stats));
    output::print_layout_output(&report.layout);
    output::print_generate_output(&report.generate, &report.layout);
    println!("==> Gallery written to {}", options.dest_gallery_dir.display());
    Ok(())
}

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;
use splice_detect::{
    OUTPUT_FILE_NAME,
    detection::SplicingConfig,
    error::Result,
    report::JsonReport,
    session::Session,
};

/// Highlight the regions of a forged image that differ from its original
#[derive(Parser, Debug)]
#[command(name = "splice-detect")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The suspected forged image (.jpg, .jpeg or .png)
    forged: PathBuf,

    /// The untouched original image, same dimensions as the forged one
    original: PathBuf,

    /// Where to write the spliced regions JPEG
    #[arg(short, long, default_value = OUTPUT_FILE_NAME)]
    output: PathBuf,

    /// Grayscale difference above which a pixel counts as changed
    #[arg(short, long, default_value_t = 25)]
    threshold: u8,

    /// JPEG quality of the written output (1-100)
    #[arg(short, long, default_value_t = 95)]
    quality: u8,

    /// Also write a PNG panel of all previews
    #[arg(long)]
    panel: Option<PathBuf>,

    /// Also write a JSON report
    #[arg(long)]
    report: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = SplicingConfig::default()
        .with_difference_threshold(cli.threshold)
        .with_jpeg_quality(cli.quality)
        .with_output_path(&cli.output);
    config.validate()?;

    let mut session = Session::new(config);
    session.select_forged(&cli.forged)?;
    session.select_original(&cli.original)?;

    if let Some(result) = session.result() {
        println!("{}", result.summary.describe());
        println!("Output: {}", cli.output.display());

        if let Some(path) = &cli.report {
            JsonReport::from(result)
                .with_inputs(&cli.forged, &cli.original)
                .with_output(&cli.output)
                .save_json(path)?;
            println!("Report: {}", path.display());
        }
    }

    if let Some(path) = &cli.panel {
        if let Some(panel) = session.render_panel() {
            panel.save(path)?;
            println!("Panel: {}", path.display());
        }
    }

    println!("{}", session.status());
    Ok(())
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }

    builder.init();
}

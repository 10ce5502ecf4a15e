use clap::Parser;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};
use snapgal::config::{self, ArchiveStrategy, ConfigError, GalleryConfig, OutputRoot};
use snapgal::imaging::RustBackend;
use snapgal::output;
use snapgal::pipeline::{self, RunOutcome};
use snapgal::types::GalleryRequest;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

fn version_string() -> &'static str {
    let on_tag = env!("SNAPGAL_ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("SNAPGAL_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "snapgal")]
#[command(about = "Build a static lightbox photo gallery from a folder of images")]
#[command(long_about = "\
Build a static lightbox photo gallery from a folder of images

Point it at a folder and it writes, next to that folder:

  trip/                  # your photos (untouched)
  │   ├── a.JPG
  │   └── b.png
  thumbnails/            # width-bounded copies, same file names
  photos.zip             # the whole folder, for one-click download
  gallery.html           # thumbnail grid + click-to-zoom lightbox

Supported images: jpg, jpeg, png, webp, gif (any letter case).
Existing thumbnails are reused; delete thumbnails/ to regenerate.

Run without FOLDER to be prompted for each setting.
Run 'snapgal --gen-config' to print a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Image folder (omit for interactive mode)
    folder: Option<PathBuf>,

    /// Gallery title
    #[arg(long, default_value = GalleryRequest::DEFAULT_TITLE)]
    title: String,

    /// HTML file name
    #[arg(long, default_value = GalleryRequest::DEFAULT_OUTPUT)]
    output: String,

    /// Skip the zip archive and download link
    #[arg(long)]
    no_zip: bool,

    /// Config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Thumbnail width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Where to write thumbnails, archive and HTML
    #[arg(long, value_enum)]
    output_root: Option<OutputRoot>,

    /// How to build the zip archive
    #[arg(long, value_enum)]
    archiver: Option<ArchiveStrategy>,

    /// List images whose thumbnail failed anyway
    #[arg(long)]
    keep_failed: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print a stock config.toml with all options documented
    #[arg(long)]
    gen_config: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let interactive_mode = cli.folder.is_none() && !cli.gen_config;
    let result = run(&cli);
    if let Err(e) = &result {
        eprintln!("{} {}", style("Error:").red().bold().for_stderr(), e);
    }
    // Interactive sessions pause on errors too
    if interactive_mode {
        if let Err(e) = pause() {
            log::warn!("cannot wait for Enter: {e}");
        }
    }
    if result.is_err() {
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    match &cli.folder {
        Some(folder) => {
            let config = resolve_config(cli)?;
            let request = GalleryRequest {
                folder: folder.clone(),
                title: cli.title.clone(),
                output_filename: cli.output.clone(),
                archive: !cli.no_zip,
            };
            build(&request, &config)
        }
        None => interactive(cli),
    }
}

/// Route `log` output to stderr at a level picked by `-v` count.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

/// Config file (if any) with command-line overrides applied.
fn resolve_config(cli: &Cli) -> Result<GalleryConfig, ConfigError> {
    let mut config = config::load_config(cli.config.as_deref())?;
    if let Some(width) = cli.width {
        config.thumbnails.width = width;
    }
    if let Some(root) = cli.output_root {
        config.output.root = root;
    }
    if let Some(strategy) = cli.archiver {
        config.archive.strategy = strategy;
    }
    if cli.keep_failed {
        config.thumbnails.keep_failed = true;
    }
    config.validate()?;
    Ok(config)
}

/// Run the pipeline, printing progress as it arrives.
fn build(request: &GalleryRequest, config: &GalleryConfig) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let (tx, rx) = mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            output::print_event(&event);
        }
    });

    let result = pipeline::run(request, config, &RustBackend::new(), &cwd, Some(&tx));
    drop(tx);
    printer
        .join()
        .map_err(|_| "progress printer thread panicked")?;

    let outcome = result?;
    output::print_outcome(&outcome);
    if let RunOutcome::Built(report) = &outcome {
        log::info!(
            "{} generated, {} cached, {} failed",
            report.thumbnails.generated(),
            report.thumbnails.skipped(),
            report.thumbnails.failed()
        );
    }
    Ok(())
}

/// Prompt for each setting, using command-line values as defaults.
fn interactive(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(cli)?;
    let theme = ColorfulTheme::default();

    println!("{}", style("snapgal: lightbox gallery builder").cyan().bold());

    let folder: String = Input::with_theme(&theme)
        .with_prompt("Image folder")
        .allow_empty(true)
        .interact_text()?;
    let folder = folder.trim();
    if folder.is_empty() {
        return Err("no folder given".into());
    }

    let title: String = Input::with_theme(&theme)
        .with_prompt("Gallery title")
        .default(cli.title.clone())
        .interact_text()?;
    let output_filename: String = Input::with_theme(&theme)
        .with_prompt("HTML file name")
        .default(cli.output.clone())
        .interact_text()?;
    let archive = Confirm::with_theme(&theme)
        .with_prompt("Create zip archive?")
        .default(!cli.no_zip)
        .interact()?;

    let request = GalleryRequest {
        folder: Path::new(folder).to_path_buf(),
        title,
        output_filename,
        archive,
    };
    build(&request, &config)
}

fn pause() -> std::io::Result<()> {
    println!("\n{}", style("Press Enter to exit...").dim());
    Term::stdout().read_line()?;
    Ok(())
}

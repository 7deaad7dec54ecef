use cardnews::RenderConfig;
use clap::Parser;
use std::path::PathBuf;

/// Build the Q&A card news as HTML, PDF and per-page PNGs
#[derive(Parser)]
#[command(name = "cardnews", version)]
struct Cli {
    /// TOML file overriding the built-in configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory that relative input/output paths resolve against
    #[arg(short, long)]
    workdir: Option<PathBuf>,

    /// Skip per-page PNG export
    #[arg(long)]
    no_png: bool,

    /// Clear and recreate the output directory first
    #[arg(long)]
    clean: bool,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(cli: &Cli) -> cardnews::Result<RenderConfig> {
    let mut config = match &cli.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::new(),
    };
    if let Some(dir) = &cli.workdir {
        config = config.with_base_dir(dir);
    }
    if cli.no_png {
        config.display.export_png = false;
    }
    if cli.clean {
        config.display.clean_output = true;
    }
    Ok(config)
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .default_format()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let result = load_config(&cli).and_then(|config| cardnews::generate(&config));
    match result {
        Ok(outcome) => log::info!(
            "Generated {} pages: {} ({} PNGs)",
            outcome.page_count,
            outcome.pdf_path.display(),
            outcome.png_paths.len()
        ),
        Err(error) => {
            log::error!("{error}");
            std::process::exit(1);
        }
    }
}

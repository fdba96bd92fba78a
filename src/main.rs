use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uvmapper::{
    batch::{Converter, InputSelector, build_luts},
    config::ConverterConfig,
};

#[derive(Parser)]
#[command(name = "uvmapper")]
#[command(about = "Converts palette-painted animation frames into RG lookup coordinates", long_about = None)]
struct Cli {
    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert animations to RG frames using the LUT of each animation part
    Convert {
        /// Directory name inside the animations root, or `all`
        #[arg(short, long)]
        input: InputSelector,

        #[command(flatten)]
        dirs: DirArgs,

        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Author a LUT for every texture painted over the map template
    BuildLuts {
        #[command(flatten)]
        dirs: DirArgs,

        #[arg(long)]
        clothes: Option<PathBuf>,

        #[arg(long)]
        template: Option<PathBuf>,
    },
}

#[derive(Args)]
struct DirArgs {
    /// JSON config, defaults apply to missing fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    animations: Option<PathBuf>,

    #[arg(long)]
    luts: Option<PathBuf>,
}

impl DirArgs {
    fn load(self) -> Result<ConverterConfig> {
        let mut config = match self.config {
            Some(path) => ConverterConfig::read_config(path)?,
            None => ConverterConfig::default(),
        };
        if let Some(dir) = self.animations {
            config.animations_dir = dir;
        }
        if let Some(dir) = self.luts {
            config.luts_dir = dir;
        }
        Ok(config)
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Convert {
            input,
            dirs,
            output,
        } => {
            let mut config = dirs.load()?;
            if let Some(dir) = output {
                config.output_dir = dir;
            }
            let report = Converter::new(config).convert(&input)?;
            info!(%report, "conversion finished");
        }
        Commands::BuildLuts {
            dirs,
            clothes,
            template,
        } => {
            let mut config = dirs.load()?;
            if let Some(dir) = clothes {
                config.clothes_dir = dir;
            }
            if let Some(path) = template {
                config.template_path = path;
            }
            let report = build_luts(&config)?;
            info!(%report, "LUT authoring finished");
        }
    }
    Ok(())
}

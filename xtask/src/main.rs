use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tasks for uvmapper", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the identity RG template textures are painted over
    GenerateTemplate {
        #[arg(default_value = "img/map_template.png")]
        path: PathBuf,

        #[arg(long, default_value_t = 256)]
        size: u32,
    },
    Ci,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::GenerateTemplate { path, size } => generate_template(&path, size),
        Commands::Ci => ci(),
    }
}

/// Pixel (x, y) of the template is (x, y, 0, 255)
fn generate_template(path: &Path, size: u32) -> Result<()> {
    if size == 0 || size > 256 {
        anyhow::bail!("template size must be between 1 and 256, got {}", size);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let template =
        image::RgbaImage::from_fn(size, size, |x, y| image::Rgba([x as u8, y as u8, 0, 255]));
    template.save_with_format(path, image::ImageFormat::Png)?;
    println!("wrote {}x{} template to {}", size, size, path.display());
    Ok(())
}

/// can run benches, tests, bundle reports and so on...
fn ci() -> Result<()> {
    run_command("cargo", &["fmt", "--all", "--check"])?;
    run_command(
        "cargo",
        &["clippy", "--all-targets", "--all-features", "--", "-D", "warnings"],
    )?;
    run_command("cargo", &["build", "--all-features"])?;
    run_command("cargo", &["test", "--all-features"])?;
    Ok(())
}

fn run_command(cmd: &str, args: &[&str]) -> Result<()> {
    use std::process::Command;
    let status = Command::new(cmd).args(args).status()?;
    if !status.success() {
        anyhow::bail!("Command failed: {} {}", cmd, args.join(" "));
    }
    Ok(())
}

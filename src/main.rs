use clap::{Parser, Subcommand};
use spreadkit::{commands, editor_options, init_logging, Config, Locale, BUILD_DATE, VERSION};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "spreadkit")]
#[command(about = "Tarot spread layout tools")]
#[command(version)]
struct Cli {
    /// Settings file (.json or .toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log at debug level
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the thumbnail SVG of one locale
    Render {
        document: PathBuf,
        #[arg(long, default_value = "en")]
        locale: Locale,
        /// Output file; stdout when absent
        #[arg(long)]
        out: Option<PathBuf>,
        /// Edge length in pixels
        #[arg(long, default_value_t = 240)]
        size: u32,
    },
    /// Copy one locale's layout onto the other
    Sync {
        document: PathBuf,
        #[arg(long)]
        from: Locale,
    },
    /// Report slot counts, duplicate indices, off-board slots and store rejections
    Check { document: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref())?;
    init_logging(&config.logging, cli.verbose)?;
    tracing::debug!(version = VERSION, build = BUILD_DATE, "spreadkit starting");

    match cli.command {
        Commands::Render {
            document,
            locale,
            out,
            size,
        } => {
            let svg = commands::render(&document, locale, size)?;
            match out {
                Some(path) => std::fs::write(&path, svg)?,
                None => print!("{}", svg),
            }
        }
        Commands::Sync { document, from } => {
            let report = commands::sync(&document, from, editor_options(&config.editor))?;
            println!("{}", report.message());
            if report.truncated() > 0 {
                println!("{} trailing slots dropped", report.truncated());
            }
        }
        Commands::Check { document } => {
            let report = commands::check(&document).await?;
            print!("{}", report);
            if report.has_errors() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

// Converts an HTML file (or stdin) to GitHub-flavored Markdown on stdout.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use kodegen_gfm::{Options, OptionsBuilder, convert_with_options};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kodegen-gfm")]
#[command(about = "Convert HTML to GitHub-flavored Markdown", version)]
struct Cli {
    /// HTML file to convert. Reads stdin when omitted.
    input: Option<PathBuf>,

    /// JSON options file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Code fence, e.g. ``` or ~~~
    #[arg(long)]
    fence: Option<String>,

    /// Reduce unconvertible tables to their cell text instead of keeping raw HTML
    #[arg(long)]
    no_keep_tables: bool,
}

impl Cli {
    fn options(&self) -> Result<Options> {
        let base = match &self.config {
            Some(path) => Options::from_json_file(path)?,
            None => Options::default(),
        };
        let mut builder = OptionsBuilder::from(base);
        if let Some(fence) = &self.fence {
            builder = builder.fence(fence.clone());
        }
        if self.no_keep_tables {
            builder = builder.keep_tables(false);
        }
        Ok(builder.build()?)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = cli.options().context("Failed to load options")?;

    let html = match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut html = String::new();
            std::io::stdin()
                .read_to_string(&mut html)
                .context("Failed to read stdin")?;
            html
        }
    };

    let markdown = convert_with_options(&html, options).context("Conversion failed")?;
    println!("{markdown}");
    Ok(())
}

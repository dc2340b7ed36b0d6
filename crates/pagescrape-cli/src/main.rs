//! PageScrape CLI - scrape one web page into a report

use chrono::Utc;
use clap::{Parser, ValueEnum};
use pagescrape::output::{report_file_name, write_report};
use pagescrape::{ScrapeReport, Scraper, DEFAULT_PREVIEW_CHARS};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Report format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Plain-text report
    #[default]
    Text,
    /// JSON format
    Json,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

/// PageScrape - extract headings, links, images, scripts and meta tags from a web page
#[derive(Parser, Debug)]
#[command(name = "pagescrape")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// URL to scrape; prompts on stdin when omitted
    url: Option<String>,

    /// Report format
    #[arg(long, short, default_value = "text")]
    format: OutputFormat,

    /// Directory the report is written to
    #[arg(long, short, default_value = "./output")]
    output_dir: PathBuf,

    /// Print the report to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Custom User-Agent
    #[arg(long)]
    user_agent: Option<String>,

    /// Truncate page bodies larger than this many bytes
    #[arg(long)]
    max_bytes: Option<usize>,

    /// Characters of raw markup shown in the text report
    #[arg(long, default_value_t = DEFAULT_PREVIEW_CHARS)]
    preview_chars: usize,

    /// Print the JSON schema of the report and exit
    #[arg(long)]
    schema: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    let scraper = build_scraper(&cli);

    if cli.schema {
        let schema = serde_json::to_string_pretty(&scraper.output_schema()).unwrap_or_else(|e| {
            eprintln!("Error serializing schema: {}", e);
            std::process::exit(1);
        });
        writeln_safe(&schema);
        std::process::exit(0);
    }

    let url = match cli.url.clone() {
        Some(url) => url,
        None => prompt_url().unwrap_or_else(|| {
            eprintln!("Error: no URL entered");
            std::process::exit(1);
        }),
    };

    let report = match scraper.scrape(&url).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let rendered = render(&scraper, &report, cli.format).unwrap_or_else(|e| {
        eprintln!("Error serializing report: {}", e);
        std::process::exit(1);
    });

    if cli.stdout {
        writeln_safe(&rendered);
        return;
    }

    let file_name = report_file_name(&report.url, Utc::now(), cli.format.extension());
    match write_report(&cli.output_dir, &file_name, &rendered) {
        Ok(path) => writeln_safe(&format!("Saved report to {}", path.display())),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Log to stderr; `RUST_LOG` overrides the default `warn` level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn build_scraper(cli: &Cli) -> Scraper {
    let mut builder = Scraper::builder().preview_chars(cli.preview_chars);

    if let Some(ref ua) = cli.user_agent {
        builder = builder.user_agent(ua);
    }
    if let Some(max_bytes) = cli.max_bytes {
        builder = builder.max_body_bytes(max_bytes);
    }

    builder.build()
}

fn render(
    scraper: &Scraper,
    report: &ScrapeReport,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(scraper.render_text(report)),
        OutputFormat::Json => serde_json::to_string_pretty(report),
    }
}

/// Ask for a URL on stdin; `None` when the answer is empty or stdin is closed
fn prompt_url() -> Option<String> {
    print!("Enter URL to scrape: ");
    let _ = io::stdout().flush();
    read_url(io::stdin().lock())
}

fn read_url(mut input: impl BufRead) -> Option<String> {
    let mut line = String::new();
    input.read_line(&mut line).ok()?;
    let url = line.trim();
    if url.is_empty() {
        None
    } else {
        Some(url.to_string())
    }
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}

mod echo;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, bail};
use clap::Parser;
use novex_core::{
    ConfigLoader, ConfigLoaderBuilder, ConfigParser, Document, ExportFormat, Exporter, FetchConfig, HtmlConfig,
    JsonConfig, RenderConfig, SiteConfig, Strategy, TextConfig, export_filename, extract_with_site_config, fetch_file,
    fetch_stdin, fetch_url, render,
};
use owo_colors::OwoColorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Export a serialized-fiction page to TXT, HTML or JSON
#[derive(Parser, Debug)]
#[command(name = "novex")]
#[command(author = "Novex Contributors")]
#[command(version)]
#[command(about = "Export serialized fiction pages to TXT, HTML or JSON", long_about = None)]
struct Args {
    /// URL to fetch, saved HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Page location for file or stdin input (used for the novel id and source link)
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Export format (txt, html, json)
    #[arg(short, long, default_value = "txt", value_name = "FORMAT")]
    format: ExportFormat,

    /// Output file (default: <title>.<ext> in --dir)
    #[arg(short, long, value_name = "FILE", conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Directory for the generated file name
    #[arg(long, default_value = ".", value_name = "DIR")]
    dir: PathBuf,

    /// Write the export to stdout instead of a file
    #[arg(long)]
    stdout: bool,

    /// Omit the UTF-8 byte order mark from TXT output
    #[arg(long)]
    no_bom: bool,

    /// Value of the lang attribute in HTML output
    #[arg(long, default_value = "en", value_name = "LANG")]
    lang: String,

    /// Pretty print JSON output
    #[arg(long)]
    pretty: bool,

    /// Site config file used instead of per-domain lookup
    #[arg(long, value_name = "FILE")]
    site_config: Option<PathBuf>,

    /// Directory searched for <domain>.txt site configs
    #[arg(long, value_name = "DIR", conflicts_with = "site_config")]
    config_dir: Option<PathBuf>,

    /// Paragraph-like element count above which paragraphs are harvested
    #[arg(long, value_name = "NUM")]
    structure_threshold: Option<usize>,

    /// Paragraphs with this many characters or fewer are dropped
    #[arg(long, value_name = "NUM")]
    min_paragraph_chars: Option<usize>,

    /// Reconstruction strategy (auto, structured, text)
    #[arg(long, value_name = "STRATEGY")]
    strategy: Option<StrategyArg>,

    /// Export pages the site config does not list as supported
    #[arg(long)]
    force: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// `--strategy` value; `auto` clears any strategy set by the site config
#[derive(Debug, Clone, Copy)]
struct StrategyArg(Option<Strategy>);

impl FromStr for StrategyArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::parse_choice(s).map(StrategyArg)
    }
}

impl Args {
    fn is_remote(&self) -> bool {
        self.input.starts_with("http://") || self.input.starts_with("https://")
    }

    /// Location of the page, if known
    fn page_url(&self) -> Option<&str> {
        if self.is_remote() { Some(self.input.as_str()) } else { self.url.as_deref() }
    }

    fn exporter(&self) -> anyhow::Result<Exporter> {
        if let Some(path) = &self.site_config {
            let config = ConfigParser::parse_file(path)
                .with_context(|| format!("Failed to load site config: {}", path.display()))?;
            return Ok(Exporter::with_site_config(config.with_defaults()));
        }

        let loader = match &self.config_dir {
            Some(dir) => ConfigLoaderBuilder::new().custom_dir(dir).build(),
            None => ConfigLoader::default(),
        };
        Ok(Exporter::builder().loader(loader).build())
    }

    fn apply_overrides(&self, config: &mut SiteConfig) {
        if let Some(threshold) = self.structure_threshold {
            config.structure_threshold = Some(threshold);
        }
        if let Some(min_chars) = self.min_paragraph_chars {
            config.min_paragraph_chars = Some(min_chars);
        }
        if let Some(StrategyArg(choice)) = self.strategy {
            config.strategy = choice;
        }
    }

    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            text: TextConfig { include_bom: !self.no_bom, ..Default::default() },
            html: HtmlConfig { lang: self.lang.clone(), ..Default::default() },
            json: JsonConfig { pretty: self.pretty },
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "warn,novex_core=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .init();
}

async fn read_input(args: &Args) -> anyhow::Result<String> {
    if args.input == "-" {
        return fetch_stdin().context("Failed to read from stdin");
    }

    if args.is_remote() {
        let defaults = FetchConfig::default();
        let config = FetchConfig {
            timeout: args.timeout,
            user_agent: args.user_agent.clone().unwrap_or(defaults.user_agent),
            ..defaults
        };
        return fetch_url(&args.input, &config).await.context("Failed to fetch URL");
    }

    fetch_file(&args.input).with_context(|| format!("Failed to read file: {}", args.input))
}

async fn run(args: &Args) -> anyhow::Result<()> {
    if args.verbose {
        echo::print_banner();
    }

    let url = args.page_url().map(str::to_string);
    let exporter = args.exporter()?;
    let mut site_config = exporter.site_config_for(url.as_deref());
    args.apply_overrides(&mut site_config);

    if let Some(url) = url.as_deref().filter(|url| !site_config.supports_url(url)) {
        if !args.force {
            bail!("Unsupported page: {} (use --force to export anyway)", url);
        }
        echo::print_warning(&format!("Page is not listed as supported: {}", url));
    }
    debug!(url = url.as_deref().unwrap_or(""), strategy = ?site_config.strategy, "resolved site config");

    if args.verbose {
        echo::print_step(1, 3, &format!("Reading {}", args.input.bright_white()));
    }
    let html = read_input(args).await?;
    if args.verbose {
        echo::print_field("Size", &echo::format_size(html.len()));
    }

    if args.verbose {
        echo::print_step(2, 3, "Extracting novel");
    }
    let doc = match &url {
        Some(url) => Document::parse_with_url(&html, url).context("Invalid page URL")?,
        None => Document::parse(&html),
    };
    let record = extract_with_site_config(&doc, &site_config).context("Failed to extract novel")?;
    if args.verbose {
        echo::print_record_summary(&record);
    }

    if args.verbose {
        echo::print_step(3, 3, &format!("Writing {}", args.format));
    }
    let output = render(&record, args.format, &args.render_config()).context("Failed to render export")?;

    if args.stdout {
        print!("{}", output);
        return Ok(());
    }

    let path = match &args.output {
        Some(path) => path.clone(),
        None => args.dir.join(export_filename(&record, args.format)),
    };
    fs::write(&path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
    echo::print_success(&format!("Exported to {}", path.display().bright_white()));

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            echo::print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

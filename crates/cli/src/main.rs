use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use brevis_core::summarize::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH};
use brevis_core::{
    ArticleContent, ExtractConfig, Extractor, FetchConfig, ModelConfig, ModelKind, OutputFormat, SummaryRequest,
    SummaryView, create_model, render_article, render_summary, summarize,
};
use clap::builder::RangedU64ValueParser;
use clap::{Args, CommandFactory, Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

mod echo;

use echo::{
    format_size, print_article_details, print_banner, print_detail, print_error, print_info, print_step,
    print_success, print_summary_details, print_warning,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Extract news articles from the web and summarize long text
#[derive(Parser, Debug)]
#[command(name = "brevis")]
#[command(author = "Brevis Contributors")]
#[command(version)]
#[command(about = "Extract and summarize news articles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the main text of an article
    Extract(ExtractArgs),
    /// Summarize text or an article in fixed-size chunks
    Summarize(SummarizeArgs),
    /// Print a shell completion script
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Options shared by every command that reads input and writes a result
#[derive(Args, Debug)]
struct CommonArgs {
    /// Output format (text, markdown, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "10", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Retries for the fallback fetch
    #[arg(long, default_value = "3", value_name = "N")]
    retries: u32,

    /// Minimum characters for a structured parse to be accepted
    #[arg(long, default_value = "500", value_name = "NUM")]
    min_chars: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct SummarizeArgs {
    /// URL to extract first, local text file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Upper bound on each chunk summary
    #[arg(long, default_value_t = DEFAULT_MAX_LENGTH, value_parser = clap::value_parser!(u32).range(100..=600))]
    max_length: u32,

    /// Lower bound on each chunk summary
    #[arg(long, default_value_t = DEFAULT_MIN_LENGTH, value_parser = clap::value_parser!(u32).range(30..=150))]
    min_length: u32,

    /// Let the model sample instead of decoding greedily
    #[arg(long)]
    sample: bool,

    /// Characters per chunk
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE, value_parser = RangedU64ValueParser::<usize>::new().range(500..=2000))]
    chunk_size: usize,

    /// Summarization model (huggingface, lead)
    #[arg(long, default_value = "huggingface", value_name = "MODEL")]
    model: ModelKind,

    /// Inference endpoint for the huggingface model
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Bearer token for the inference endpoint
    #[arg(long, env = "HF_API_TOKEN", hide_env_values = true, value_name = "TOKEN")]
    api_token: Option<String>,

    /// List every chunk summary
    #[arg(long)]
    show_chunks: bool,

    /// Append the summarized text
    #[arg(long)]
    show_original: bool,

    #[command(flatten)]
    common: CommonArgs,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "brevis_core=debug,brevis=debug" } else { "warn" }));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(false).init();
}

fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read file: {}", input))
    }
}

fn write_output(output: Option<&Path>, content: &str, verbose: bool) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write output file: {}", path.display()))?;
            if verbose {
                print_success(&format!("Written to {}", path.display().bright_white()));
            }
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn build_extractor(common: &CommonArgs) -> anyhow::Result<Extractor> {
    let mut fetch = FetchConfig::default().timeout(common.timeout).max_retries(common.retries);
    if let Some(ua) = &common.user_agent {
        fetch = fetch.user_agent(ua.clone());
    }

    let config = ExtractConfig::default().min_text_length(common.min_chars).fetch(fetch);
    Extractor::new(config).context("Failed to build HTTP client")
}

async fn load_article(input: &str, common: &CommonArgs, step: usize, total: usize) -> anyhow::Result<ArticleContent> {
    let extractor = build_extractor(common)?;

    if is_url(input) {
        if common.verbose {
            print_step(step, total, &format!("Fetching from {}", input.bright_white().underline()));
        }
        extractor.extract(input).await.with_context(|| format!("Failed to extract {}", input))
    } else {
        if common.verbose {
            print_step(step, total, &format!("Reading HTML from {}", if input == "-" { "stdin" } else { input }));
        }
        let html = read_input(input)?;
        if common.verbose {
            print_detail("Size", &format_size(html.len()));
        }
        extractor.extract_html(&html, None).context("Failed to extract content")
    }
}

async fn run_extract(args: ExtractArgs) -> anyhow::Result<()> {
    let common = &args.common;
    let start = Instant::now();

    let article = load_article(&args.input, common, 1, 2).await?;

    if common.verbose {
        print_article_details(&article);
        print_step(2, 2, &format!("Rendering {}", common.format));
    }

    let output = render_article(&article, common.format).context("Failed to render article")?;
    write_output(common.output.as_deref(), &output, common.verbose)?;

    if common.verbose {
        print_success(&format!("Done in {:.2}s", start.elapsed().as_secs_f64()));
    }

    Ok(())
}

async fn run_summarize(args: SummarizeArgs) -> anyhow::Result<()> {
    let common = &args.common;
    let start = Instant::now();

    let (text, article) = if is_url(&args.input) {
        let article = load_article(&args.input, common, 1, 3).await?;
        if common.verbose {
            print_article_details(&article);
        }
        (article.text.clone(), Some(article))
    } else {
        if common.verbose {
            let source = if args.input == "-" { "stdin" } else { args.input.as_str() };
            print_step(1, 3, &format!("Reading text from {}", source));
        }
        (read_input(&args.input)?, None)
    };

    if common.verbose {
        print_detail("Size", &format_size(text.len()));
    }

    if text.trim().is_empty() {
        print_warning("Input is empty; nothing to summarize");
    }

    let mut model_config = ModelConfig::new(args.model);
    if let Some(endpoint) = &args.endpoint {
        model_config = model_config.endpoint(endpoint.clone());
    }
    if let Some(token) = &args.api_token {
        model_config = model_config.api_token(token.clone());
    }

    if common.verbose {
        print_step(2, 3, &format!("Summarizing with {}", args.model));
        print_info(&format!(
            "max_length={} min_length={} chunk_size={} sample={}",
            args.max_length, args.min_length, args.chunk_size, args.sample
        ));
    }

    let model = create_model(&model_config).context("Failed to initialize summarization model")?;
    tracing::debug!(model = model.name(), ?model_config, "model ready");
    let request = SummaryRequest::new(text.clone())
        .max_length(args.max_length)
        .min_length(args.min_length)
        .do_sample(args.sample)
        .chunk_size(args.chunk_size);

    let summary = summarize(model.as_ref(), &request).await.context("Summarization failed")?;

    if common.verbose {
        print_summary_details(&summary, start.elapsed());
        print_step(3, 3, &format!("Rendering {}", common.format));
    }

    let view = SummaryView {
        show_chunks: args.show_chunks,
        original: args.show_original.then_some(text.as_str()),
        article: article.as_ref(),
    };
    let output = render_summary(&summary, &view, common.format).context("Failed to render summary")?;
    write_output(common.output.as_deref(), &output, common.verbose)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Extract(args) => run_extract(args).await,
        Command::Summarize(args) => run_summarize(args).await,
        Command::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "brevis", &mut io::stdout());
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let verbose = match &cli.command {
        Command::Extract(args) => args.common.verbose,
        Command::Summarize(args) => args.common.verbose,
        Command::Completions { .. } => false,
    };

    init_tracing(verbose);

    if verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    if let Err(err) = run(cli).await {
        print_error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

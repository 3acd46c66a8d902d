//! Perplexity CLI - Command-line interface for asking questions
//!
//! Usage:
//!     perplexity [OPTIONS] [QUESTION]
//!
//! Environment Variables:
//!     PERPLEXITY_API_KEY: API key used when --api-key is not given
//!     PERPLEXITY_BASE_URL: Chat completions endpoint (default: https://api.perplexity.ai/chat/completions)
//!     RUST_LOG: Log filter (default: warn)

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use perplexity_agent::{
    load_dotenv_from, ChatClient, ChatOptions, ClientConfig, BASE_URL_ENV, DEFAULT_ENDPOINT_URL,
    DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
use std::io::{self, Read};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Perplexity Agent - Ask questions using Perplexity AI
#[derive(Parser, Debug)]
#[command(name = "perplexity", version)]
#[command(about = "Perplexity Agent - Ask questions using Perplexity AI")]
#[command(after_help = r#"Examples:
    # Ask a question
    perplexity "What is the capital of France?"

    # Read the question from stdin
    echo "Explain quantum computing" | perplexity

    # Print the full API response as JSON
    perplexity --full-response "What is Rust?"

    # Custom parameters
    perplexity --temperature 0.7 --max-tokens 200 "Write a short poem about AI"
"#)]
struct Cli {
    /// The question to ask (if not provided, will read from stdin)
    question: Option<String>,

    /// Perplexity API key (overrides PERPLEXITY_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Chat completions endpoint
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_ENDPOINT_URL)]
    base_url: String,

    /// Model to use
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Sampling temperature
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE, allow_negative_numbers = true)]
    temperature: f64,

    /// Maximum number of tokens to generate
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Output the full API response as JSON
    #[arg(long)]
    full_response: bool,

    /// Log request details to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn chat_options(&self) -> ChatOptions {
        let mut options = ChatOptions::new()
            .with_model(&self.model)
            .with_temperature(self.temperature);
        if let Some(max_tokens) = self.max_tokens {
            options = options.with_max_tokens(max_tokens);
        }
        options
    }
}

/// Use the positional question if present, else the trimmed contents of
/// `input`. Returns `None` when both are empty.
fn resolve_question(arg: Option<String>, mut input: impl Read) -> io::Result<Option<String>> {
    if let Some(question) = arg.filter(|q| !q.trim().is_empty()) {
        return Ok(Some(question));
    }

    let mut buf = String::new();
    input.read_to_string(&mut buf)?;
    let question = buf.trim();
    Ok((!question.is_empty()).then(|| question.to_string()))
}

/// Load an env file if present. A malformed file is reported on stderr and
/// skipped.
fn load_env_file(path: &Path) -> bool {
    match load_dotenv_from(path) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Warning: {}", e);
            false
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "perplexity_agent=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Ask the question and print the answer or the pretty-printed envelope
async fn run(args: &Cli, question: &str) -> Result<()> {
    let config = ClientConfig::from_env(args.api_key.clone())?.with_endpoint_url(&args.base_url);
    let client = ChatClient::new(config)?;
    let options = args.chat_options();

    if args.full_response {
        let response = client.ask_full(question, &options).await?;
        println!("{}", serde_json::to_string_pretty(response.as_value())?);
    } else {
        let answer = client.ask(question, &options).await?;
        println!("{}", answer);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing so `.env` can supply PERPLEXITY_BASE_URL too.
    load_env_file(Path::new(".env"));

    let mut args = Cli::parse();
    init_logging(args.verbose);

    let question = match resolve_question(args.question.take(), io::stdin().lock())? {
        Some(question) => question,
        None => Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "No question provided. Please provide a question as an argument or via stdin.",
            )
            .exit(),
    };

    if let Err(e) = run(&args, &question).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

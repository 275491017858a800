//! oai-cli: inspect URLs, engines and batch jobs from the command line.
//!
//! Usage:
//!   oai-cli url <suffix> [--model <name>]          Print the URL a request would use
//!   oai-cli engines                                List engines
//!   oai-cli engine <id>                            Show one engine
//!   oai-cli batches [--limit N] [--after ID]       List batch jobs
//!   oai-cli batch <id>                             Show one batch job
//!   oai-cli jsonl <kind> <model> <input>...        Print a batch input file

use anyhow::{bail, Context};
use oai_client::batch::UploadBatchFileRequest;
use oai_client::chat::{ChatCompletionMessage, ChatCompletionRequest};
use oai_client::client::UrlOptions;
use oai_client::completions::CompletionRequest;
use oai_client::embeddings::EmbeddingRequest;
use oai_client::{Client, ClientConfig};
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config_path, args) = split_config_flag(args);
    if args.is_empty() {
        print_usage();
        std::process::exit(1);
    }

    let result = match args[0].as_str() {
        "url" => cmd_url(config_path.as_deref(), &args[1..]),
        "engines" => cmd_engines(config_path.as_deref()).await,
        "engine" => cmd_engine(config_path.as_deref(), &args[1..]).await,
        "batches" => cmd_batches(config_path.as_deref(), &args[1..]).await,
        "batch" => cmd_batch(config_path.as_deref(), &args[1..]).await,
        "jsonl" => cmd_jsonl(&args[1..]),
        "version" | "--version" | "-V" => {
            println!("oai-cli {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"oai-cli

USAGE:
    oai-cli [--config <file.yaml>] <COMMAND> [OPTIONS]

COMMANDS:
    url <suffix> [--model <name>]       Print the URL a request for <suffix> would use
    engines                             List engines
    engine <id>                         Show one engine
    batches [--limit N] [--after ID]    List batch jobs
    batch <id>                          Show one batch job
    jsonl <chat|completion|embedding> <model> <input>...
                                        Print a batch input file, one line per input
    version                             Show version information
    help                                Show this help message

ENVIRONMENT:
    OPENAI_API_KEY, OPENAI_BASE_URL, OPENAI_API_TYPE, OPENAI_API_VERSION,
    OPENAI_ORG_ID, OPENAI_HTTP_TIMEOUT_SECS, OPENAI_HTTP_POOL_IDLE_TIMEOUT_SECS,
    OPENAI_PROXY_URL
    RUST_LOG                            Log filter (default: info)"#
    );
}

fn split_config_flag(args: Vec<String>) -> (Option<String>, Vec<String>) {
    let mut config = None;
    let mut rest = Vec::with_capacity(args.len());
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            config = iter.next();
        } else {
            rest.push(arg);
        }
    }
    (config, rest)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn load_config(path: Option<&str>) -> anyhow::Result<ClientConfig> {
    let config = match path {
        Some(path) => ClientConfig::from_yaml_file(path)
            .with_context(|| format!("loading config from {path}"))?,
        None => ClientConfig::from_env().context("loading config from environment")?,
    };
    info!(api_type = %config.api_type, base_url = %config.base_url, "loaded configuration");
    Ok(config)
}

fn load_client(path: Option<&str>) -> anyhow::Result<Client> {
    Ok(Client::with_config(load_config(path)?)?)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_url(config_path: Option<&str>, args: &[String]) -> anyhow::Result<()> {
    let Some(suffix) = args.first() else {
        bail!("usage: oai-cli url <suffix> [--model <name>]");
    };
    let config = load_config(config_path)?;
    let opts = match flag_value(args, "--model") {
        Some(model) => UrlOptions::with_model(model),
        None => UrlOptions::new(),
    };
    println!("{}", oai_client::client::full_url(&config, suffix, &opts));
    Ok(())
}

async fn cmd_engines(config_path: Option<&str>) -> anyhow::Result<()> {
    let client = load_client(config_path)?;
    let engines = client.list_engines().await?;
    for engine in &engines.data {
        let ready = if engine.ready { "ready" } else { "not ready" };
        println!("{:<40} {:<20} {}", engine.id, engine.owner, ready);
    }
    Ok(())
}

async fn cmd_engine(config_path: Option<&str>, args: &[String]) -> anyhow::Result<()> {
    let Some(id) = args.first() else {
        bail!("usage: oai-cli engine <id>");
    };
    let client = load_client(config_path)?;
    print_json(&client.get_engine(id).await?)
}

async fn cmd_batches(config_path: Option<&str>, args: &[String]) -> anyhow::Result<()> {
    let limit = flag_value(args, "--limit")
        .map(|s| s.parse::<u32>().with_context(|| format!("invalid --limit: {s}")))
        .transpose()?;
    let after = flag_value(args, "--after");
    let client = load_client(config_path)?;
    let page = client.list_batch(after, limit).await?;
    info!(count = page.data.len(), has_more = page.has_more, "listed batches");
    for batch in &page.data {
        println!(
            "{:<32} {:<12} {:<22} {}/{}",
            batch.id,
            batch.status,
            batch.endpoint,
            batch.request_counts.completed,
            batch.request_counts.total
        );
    }
    if page.has_more {
        if let Some(last) = &page.last_id {
            eprintln!("more results: --after {last}");
        }
    }
    Ok(())
}

async fn cmd_batch(config_path: Option<&str>, args: &[String]) -> anyhow::Result<()> {
    let Some(id) = args.first() else {
        bail!("usage: oai-cli batch <id>");
    };
    let client = load_client(config_path)?;
    print_json(&client.retrieve_batch(id).await?)
}

fn cmd_jsonl(args: &[String]) -> anyhow::Result<()> {
    if args.len() < 3 {
        bail!("usage: oai-cli jsonl <chat|completion|embedding> <model> <input>...");
    }
    let (kind, model, inputs) = (args[0].as_str(), args[1].as_str(), &args[2..]);

    let mut upload = UploadBatchFileRequest::new();
    for (i, input) in inputs.iter().enumerate() {
        let custom_id = format!("request-{}", i + 1);
        match kind {
            "chat" => upload.add_chat_completion(
                custom_id,
                ChatCompletionRequest::new(model, vec![ChatCompletionMessage::user(input.as_str())]),
            ),
            "completion" => upload.add_completion(custom_id, CompletionRequest::new(model, input.as_str())),
            "embedding" => upload.add_embedding(custom_id, EmbeddingRequest::single(model, input.as_str())),
            other => bail!("unknown batch line kind: {other}"),
        }
    }

    let mut out = std::io::stdout().lock();
    out.write_all(&upload.marshal_jsonl()?)?;
    out.write_all(b"\n")?;
    Ok(())
}

mod transcript;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use crate::transcript::Transcript;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("failed to read {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("server returned {status} for {path}: {message}")]
    Api { status: u16, path: String, message: String },
    #[error("missing expected field `{0}`")]
    MissingField(&'static str),
}

#[derive(Parser, Debug)]
#[command(name = "analyzer-cli", about = "AI Analyzer API CLI")]
struct Cli {
    #[arg(long, env = "ANALYZER_BASE_URL", default_value = "http://127.0.0.1:3001")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check server health.
    Ping,
    /// Extract the AI Overview for a search query.
    Extract {
        query: String,
    },
    /// Interactive chat against a loaded overview.
    Chat(ChatArgs),
    /// Run a content-gap analysis for an article URL.
    Analyze(AnalyzeArgs),
    Files(FilesCommand),
    /// Upload a local JSON result file.
    Upload {
        path: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ChatArgs {
    /// Local overview JSON file whose text is sent as chat context.
    #[arg(long)]
    overview: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    article_url: String,

    /// Name of a stored overview file to analyze against.
    #[arg(long)]
    overview_file: Option<String>,

    /// Use plain keyword matching instead of semantic analysis.
    #[arg(long)]
    keyword: bool,
}

#[derive(Args, Debug)]
struct FilesCommand {
    #[command(subcommand)]
    command: FilesSubcommand,
}

#[derive(Subcommand, Debug)]
enum FilesSubcommand {
    /// List stored result files.
    List,
    /// Fetch one stored result file.
    Get {
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let ctx = CliContext { base_url: cli.base_url };

    match cli.command {
        Command::Ping => run_ping(&ctx).await,
        Command::Extract { query } => run_extract(&ctx, &query).await,
        Command::Chat(args) => run_chat(&ctx, args).await,
        Command::Analyze(args) => run_analyze(&ctx, args).await,
        Command::Files(files) => run_files(&ctx, files).await,
        Command::Upload { path } => run_upload(&ctx, &path).await,
    }
}

async fn run_ping(cli: &CliContext) -> Result<(), CliError> {
    let json = api_request(cli, reqwest::Method::GET, "/api/health", None).await?;
    let status = json
        .get("status")
        .and_then(Value::as_str)
        .ok_or(CliError::MissingField("status"))?;
    println!("{status}");
    Ok(())
}

async fn run_extract(cli: &CliContext, query: &str) -> Result<(), CliError> {
    let body = serde_json::json!({ "query": query });
    let json = api_request(cli, reqwest::Method::POST, "/api/extract-ai-overview", Some(body)).await?;
    print_json(&json)
}

async fn run_analyze(cli: &CliContext, args: AnalyzeArgs) -> Result<(), CliError> {
    let mut body = serde_json::json!({
        "article_url": args.article_url,
        "use_semantic_analysis": !args.keyword,
    });
    if let Some(overview_file) = args.overview_file {
        body["ai_overview_file"] = Value::String(overview_file);
    }
    let json = api_request(cli, reqwest::Method::POST, "/api/analyze-content-gap", Some(body)).await?;
    print_json(&json)
}

async fn run_files(cli: &CliContext, files: FilesCommand) -> Result<(), CliError> {
    match files.command {
        FilesSubcommand::List => {
            let json = api_request(cli, reqwest::Method::GET, "/api/files", None).await?;
            print_json(&json)
        }
        FilesSubcommand::Get { name } => {
            let path = format!("/api/files/{name}");
            let json = api_request(cli, reqwest::Method::GET, &path, None).await?;
            print_json(&json)
        }
    }
}

async fn run_upload(cli: &CliContext, path: &Path) -> Result<(), CliError> {
    let content = read_file(path)?;
    // Validate client-side before posting, as the web UI does.
    serde_json::from_str::<Value>(&content)?;
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or(CliError::MissingField("filename"))?;

    let body = serde_json::json!({ "filename": filename, "content": content });
    let json = api_request(cli, reqwest::Method::POST, "/api/upload", Some(body)).await?;
    print_json(&json)
}

// =============================================================================
// CHAT LOOP
// =============================================================================

async fn run_chat(cli: &CliContext, args: ChatArgs) -> Result<(), CliError> {
    let overview = match &args.overview {
        Some(path) => Some(read_overview_text(path)?),
        None => None,
    };

    let mut transcript = Transcript::new();
    eprintln!("chat ready — /clear resets the transcript, /quit exits");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        eprint!("> ");
        io::stderr().flush().ok();

        let Some(line) = lines.next() else { break };
        let line = line.map_err(|source| CliError::Io { path: "stdin".to_owned(), source })?;
        let question = line.trim();

        match question {
            "" => continue,
            "/quit" => break,
            "/clear" => {
                transcript.clear();
                eprintln!("transcript cleared");
                continue;
            }
            _ => {}
        }

        let body = serde_json::json!({
            "question": question,
            "ai_overview_content": overview,
            "chat_history": transcript.history_json(),
        });
        transcript.push_user(question);

        match api_request(cli, reqwest::Method::POST, "/api/semantic-chat", Some(body)).await {
            Ok(json) => {
                let response = json
                    .get("response")
                    .and_then(Value::as_str)
                    .ok_or(CliError::MissingField("response"))?;
                transcript.push_assistant(response);
                println!("{response}\n");
            }
            // Surface the server's error string verbatim and keep the session.
            Err(CliError::Api { message, .. }) => eprintln!("error: {message}"),
            Err(error) => return Err(error),
        }
    }

    Ok(())
}

/// Read a local overview JSON file and pull out its text, preferring the
/// short `ai_overview` over the `full_content` body.
fn read_overview_text(path: &Path) -> Result<String, CliError> {
    let content = read_file(path)?;
    let payload: Value = serde_json::from_str(&content)?;
    payload
        .get("ai_overview")
        .or_else(|| payload.get("full_content"))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(CliError::MissingField("ai_overview"))
}

// =============================================================================
// HELPERS
// =============================================================================

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io { path: path.display().to_string(), source })
}

async fn api_request(
    cli: &CliContext,
    method: reqwest::Method,
    path: &str,
    body: Option<Value>,
) -> Result<Value, CliError> {
    let client = reqwest::Client::new();
    let url = format!("{}{path}", cli.base_url.trim_end_matches('/'));

    let mut request = client.request(method, url);
    if let Some(body) = body {
        request = request.json(&body);
    }

    let response = request.send().await?;
    let status = response.status();
    let json: Value = response.json().await?;

    if !status.is_success() {
        let message = json
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("request failed")
            .to_owned();
        return Err(CliError::Api { status: status.as_u16(), path: path.to_owned(), message });
    }
    Ok(json)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

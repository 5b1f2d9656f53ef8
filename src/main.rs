//! textclassify - LLM-backed content classification
//!
//! Classifies text into caller-supplied categories with a high/medium/low
//! confidence label, via any OpenAI-compatible chat API (Groq by default).
//!
//! ## Usage
//!
//! ### CLI Mode
//! ```bash
//! textclassify classify "I love this product"
//! textclassify calibrate samples.csv --categories Positive,Negative,Neutral
//! textclassify compare "I love this product" --models llama3-70b-8192,llama3-8b-8192
//! ```
//!
//! ### Web Form Mode
//! ```bash
//! textclassify serve --port 3000
//! ```

use anyhow::{Context, Result};
use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Form, Json, Router,
};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use textclassify::{
    analysis, calibration,
    classifier::{self, ClassificationResult, DEFAULT_CATEGORIES, DEFAULT_CONFIDENCE_THRESHOLD},
    compare, LlmClient, LlmConfig,
};
use tower_http::trace::TraceLayer;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Content Classification and Analysis Tool
#[derive(Parser)]
#[command(name = "textclassify")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(flatten)]
    llm: LlmArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Provider settings shared by every subcommand
#[derive(Args)]
struct LlmArgs {
    /// LLM API key (not validated; a bad key surfaces as a failed completion)
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true, default_value = "", global = true)]
    api_key: String,

    /// LLM API base URL
    #[arg(long, env = "LLM_BASE_URL", default_value = textclassify::llm_client::DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// LLM model name
    #[arg(long, env = "LLM_MODEL", default_value = textclassify::llm_client::DEFAULT_MODEL, global = true)]
    model: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "60", global = true)]
    timeout: u64,
}

impl From<LlmArgs> for LlmConfig {
    fn from(args: LlmArgs) -> Self {
        Self {
            base_url: args.base_url,
            api_key: args.api_key,
            model: args.model,
            timeout_secs: args.timeout,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Classify one text sample
    Classify {
        /// Text to classify
        text: String,

        /// Candidate categories, comma-separated
        #[arg(long, value_delimiter = ',', default_value = "Positive,Negative,Neutral")]
        categories: Vec<String>,

        /// Confidence threshold (reported, not applied)
        #[arg(long, default_value_t = DEFAULT_CONFIDENCE_THRESHOLD)]
        threshold: f64,
    },

    /// Measure accuracy against a labeled CSV (columns: text,expected)
    Calibrate {
        /// Path to the samples CSV
        samples: PathBuf,

        /// Candidate categories, comma-separated
        #[arg(long, value_delimiter = ',', default_value = "Positive,Negative,Neutral")]
        categories: Vec<String>,
    },

    /// Classify one text with several models
    Compare {
        /// Text to classify
        text: String,

        /// Model identifiers, comma-separated
        #[arg(long, value_delimiter = ',', required = true)]
        models: Vec<String>,

        /// Candidate categories, comma-separated
        #[arg(long, value_delimiter = ',', default_value = "Positive,Negative,Neutral")]
        categories: Vec<String>,
    },

    /// Ask a free-form question about a text
    Ask {
        /// Text to analyse
        text: String,

        /// Question about the text
        #[arg(short, long)]
        question: String,
    },

    /// Run the browser form
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up GROQ_API_KEY and friends from .env before clap reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    if cli.log_json {
        fmt().json().with_env_filter(filter).init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .init();
    }

    let config = LlmConfig::from(cli.llm);

    match cli.command {
        Commands::Classify {
            text,
            categories,
            threshold,
        } => run_classify(config, text, categories, threshold).await,
        Commands::Calibrate { samples, categories } => {
            run_calibrate(config, samples, categories).await
        }
        Commands::Compare {
            text,
            models,
            categories,
        } => run_compare(config, text, models, categories).await,
        Commands::Ask { text, question } => run_ask(config, text, question).await,
        Commands::Serve { port, host } => run_server(config, host, port).await,
    }
}

// ============================================================================
// CLI Commands
// ============================================================================

async fn run_classify(
    config: LlmConfig,
    text: String,
    categories: Vec<String>,
    threshold: f64,
) -> Result<()> {
    classifier::validate_input(&text, &categories)?;
    let client = LlmClient::new(config)?;

    info!(model = %client.model(), categories = ?categories, "Classifying");
    let result = classifier::classify_with_confidence(&client, &text, &categories, threshold).await;

    println!(
        "{}",
        serde_json::to_string_pretty(&result).context("Failed to serialize result")?
    );
    if let Some(result) = &result {
        if !result.meets_threshold(threshold) {
            info!(
                confidence = ?result.confidence,
                threshold = threshold,
                "Confidence below threshold"
            );
        }
    }
    Ok(())
}

async fn run_calibrate(config: LlmConfig, samples: PathBuf, categories: Vec<String>) -> Result<()> {
    let samples = calibration::load_samples(&samples)
        .with_context(|| format!("Failed to load samples from {}", samples.display()))?;
    let client = LlmClient::new(config)?;

    let report = calibration::calibrate_report(&client, &samples, &categories).await;

    println!(
        "Accuracy: {:.2}% ({}/{})",
        report.accuracy * 100.0,
        report.correct,
        report.total
    );
    Ok(())
}

async fn run_compare(
    config: LlmConfig,
    text: String,
    models: Vec<String>,
    categories: Vec<String>,
) -> Result<()> {
    classifier::validate_input(&text, &categories)?;

    let results = compare::compare_models(&config, &models, &text, &categories).await;

    println!(
        "{}",
        serde_json::to_string_pretty(&results).context("Failed to serialize results")?
    );
    Ok(())
}

async fn run_ask(config: LlmConfig, text: String, question: String) -> Result<()> {
    let client = LlmClient::new(config)?;

    match analysis::ask(&client, &text, &question).await {
        Some(answer) => println!("{}", answer),
        None => println!("No analysis available."),
    }
    Ok(())
}

// ============================================================================
// HTTP Server
// ============================================================================

async fn run_server(config: LlmConfig, host: String, port: u16) -> Result<()> {
    info!(host = %host, port = port, model = %config.model, "Starting HTTP server");

    let app_state = Arc::new(AppState { config });

    let app = Router::new()
        .route("/", get(form_handler).post(classify_form_handler))
        .route("/api/classify", post(classify_api_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .context("Invalid host:port")?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    println!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}

struct AppState {
    config: LlmConfig,
}

/// Health check endpoint
async fn health_handler() -> &'static str {
    "OK"
}

/// Empty classification form
async fn form_handler() -> Html<String> {
    Html(render_page("", None))
}

/// Browser form body
#[derive(Debug, Deserialize)]
struct ClassifyForm {
    #[serde(default)]
    text: String,
}

/// Form submission: classify with the default categories and re-render the page
async fn classify_form_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ClassifyForm>,
) -> Html<String> {
    let result = classify_for_request(
        &state.config,
        &form.text,
        DEFAULT_CATEGORIES,
        DEFAULT_CONFIDENCE_THRESHOLD,
    )
    .await;
    Html(render_page(&form.text, Some(&result)))
}

/// JSON classification request
#[derive(Debug, Deserialize)]
struct ClassifyRequest {
    text: String,
    categories: Option<Vec<String>>,
    threshold: Option<f64>,
}

/// JSON classification response
#[derive(Debug, Serialize)]
struct ClassifyResponse {
    status: String,
    result: Option<ClassificationResult>,
}

async fn classify_api_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClassifyRequest>,
) -> Json<ClassifyResponse> {
    let categories = req
        .categories
        .unwrap_or_else(|| DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect());

    if let Err(e) = classifier::validate_input(&req.text, &categories) {
        return Json(ClassifyResponse {
            status: format!("error: {}", e),
            result: None,
        });
    }

    let threshold = req.threshold.unwrap_or(DEFAULT_CONFIDENCE_THRESHOLD);
    let result = classify_for_request(&state.config, &req.text, &categories, threshold).await;

    Json(ClassifyResponse {
        status: "success".to_string(),
        result,
    })
}

/// One fresh client per request, as each classification is independent
async fn classify_for_request<S: AsRef<str> + Sync>(
    config: &LlmConfig,
    text: &str,
    categories: &[S],
    threshold: f64,
) -> Option<ClassificationResult> {
    let client = match LlmClient::new(config.clone()) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Failed to build LLM client");
            return None;
        }
    };
    classifier::classify_with_confidence(&client, text, categories, threshold).await
}

// ============================================================================
// Page Rendering
// ============================================================================

const PAGE_TITLE: &str = "Content Classification and Analysis Tool";

/// Render the form, with the previous result below it when there is one
fn render_page(text: &str, result: Option<&Option<ClassificationResult>>) -> String {
    let result_block = match result {
        Some(result) => {
            let shown = serde_json::to_string_pretty(result).unwrap_or_else(|_| "null".to_string());
            format!("<h2>Result</h2>\n<pre>{}</pre>\n", escape_html(&shown))
        }
        None => String::new(),
    };

    format!(
        r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>{PAGE_TITLE}</title></head>
<body>
<h1>{PAGE_TITLE}</h1>
<form method="post" action="/">
<label for="text">Enter text to classify:</label><br>
<textarea id="text" name="text" rows="8" cols="80">{text}</textarea><br>
<button type="submit">Classify</button>
</form>
{result_block}</body>
</html>
"#,
        text = escape_html(text),
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

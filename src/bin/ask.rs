//! Answers questions about a local (or remote) PDF from the command line,
//! using the same pipeline and configuration as the HTTP service.

use anyhow::Context;
use clap::Parser;

use docqa::domain::DocumentSource;
use docqa::infrastructure::observability::{TracingConfig, init_tracing};
use docqa::presentation::{Environment, Settings, build_answer_service};

#[derive(Debug, Parser)]
#[command(name = "ask", version, about = "Ask questions about a PDF document")]
struct Args {
    /// Path to a PDF file, or an http(s) URL
    document: String,

    /// Question to answer; repeat for several
    #[arg(short, long = "question", required = true)]
    questions: Vec<String>,

    /// Override chunking.chunk_size
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Override chunking.chunk_overlap
    #[arg(long)]
    chunk_overlap: Option<usize>,

    /// Override retrieval.k_initial
    #[arg(long)]
    k: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let mut settings = Settings::load(environment).context("failed to load settings")?;
    let rejected_port = settings.apply_conventional_env(|key| std::env::var(key).ok());

    if let Some(size) = args.chunk_size {
        settings.chunking.chunk_size = size;
    }
    if let Some(overlap) = args.chunk_overlap {
        settings.chunking.chunk_overlap = overlap;
    }
    if let Some(k) = args.k {
        settings.retrieval.k_initial = k;
    }
    settings.retrieval.max_questions = settings.retrieval.max_questions.max(args.questions.len());
    settings.validate().context("invalid settings")?;

    init_tracing(&TracingConfig::from_settings(environment, &settings.logging));
    if let Some(value) = rejected_port {
        tracing::warn!(%value, "Ignoring invalid PORT value");
    }

    let service = build_answer_service(&settings).context("failed to build pipeline")?;
    let source = DocumentSource::from_cli_arg(&args.document);

    let answers = service
        .answer_all(&source, &args.questions)
        .await
        .with_context(|| format!("failed to answer questions about {source}"))?;

    for (question, answer) in args.questions.iter().zip(answers) {
        println!("Q: {question}");
        println!("A: {answer}");
        println!();
    }

    Ok(())
}

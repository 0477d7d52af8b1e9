// Lullaby - bedtime stories with an LLM judge-and-revise loop
// Main entry point

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::style::Stylize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use lullaby::config::{load_config, GeneratorMode};
use lullaby::generators::create_generator;
use lullaby::story::{LoopConfig, StoryLoop, StoryOutcome};
use lullaby::{StoryError, DEFAULT_REQUEST, EXAMPLE_REQUESTS};

#[derive(Parser, Debug)]
#[command(
    name = "lullaby",
    version,
    about = "Bedtime story generator with an LLM judge-and-revise loop"
)]
struct Cli {
    /// Story request; read from the terminal when omitted
    #[arg(long, short)]
    request: Option<String>,

    /// Use the deterministic offline generator (no API calls)
    #[arg(long)]
    offline: bool,

    /// Judge + revise rounds (overrides config)
    #[arg(long)]
    rounds: Option<usize>,

    /// Config file (default: ~/.lullaby/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not print the judge's scores
    #[arg(long)]
    no_scores: bool,

    /// Do not offer a follow-up tweak
    #[arg(long)]
    no_tweak: bool,

    /// Print example requests and exit
    #[arg(long)]
    examples: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so the story on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lullaby=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.examples {
        for example in EXAMPLE_REQUESTS {
            println!("- {example}");
        }
        return Ok(());
    }

    let mut config = load_config(cli.config.as_deref())?;
    if cli.offline {
        config.mode = GeneratorMode::Offline;
    }
    if let Some(rounds) = cli.rounds {
        config.story.rounds = rounds;
        config.validate().context("Invalid --rounds")?;
    }

    println!("{}\n", "Bedtime Storyteller (ages 5–10) with LLM Judge".bold());
    if config.mode == GeneratorMode::Offline {
        println!(
            "{}\n",
            "[Running offline; no API calls will be made]".dark_grey()
        );
    }

    let generator = create_generator(&config).inspect_err(|e| {
        if matches!(e, StoryError::ServiceUnavailable(_)) {
            eprintln!(
                "{} {}",
                "No generation service; try".yellow(),
                "lullaby --offline".cyan().bold()
            );
        }
    })?;
    let story_loop = StoryLoop::new(generator, LoopConfig::from(&config));

    let mut editor = DefaultEditor::new().context("Failed to initialise line editor")?;

    let request = match cli.request {
        Some(request) => request.trim().to_string(),
        None => read_line(&mut editor, "What kind of story do you want to hear? ")?,
    };
    let request = if request.is_empty() {
        DEFAULT_REQUEST.to_string()
    } else {
        request
    };

    let outcome = run_reporting(story_loop.run(&request).await)?;
    show_outcome(&outcome, !cli.no_scores);

    if cli.no_tweak {
        return Ok(());
    }

    println!(
        "\nOptional: Want any changes? (e.g., 'shorter', 'more silly', 'add a bunny friend')"
    );
    let tweak = read_line(&mut editor, "Tweak (or press Enter to finish): ")?;
    if !tweak.is_empty() {
        let outcome = run_reporting(story_loop.run_with_tweak(&request, &tweak).await)?;
        show_outcome(&outcome, !cli.no_scores);
    }

    Ok(())
}

/// Read one trimmed line; end of input reads as empty.
fn read_line(editor: &mut DefaultEditor, prompt: &str) -> Result<String> {
    match editor.readline(prompt) {
        Ok(line) => Ok(line.trim().to_string()),
        Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(String::new()),
        Err(e) => Err(e).context("Failed to read input"),
    }
}

/// Attach the raw generator text to malformed-response failures.
fn run_reporting(result: Result<StoryOutcome, StoryError>) -> Result<StoryOutcome> {
    result.map_err(|e| {
        if let Some(raw) = e.raw_response() {
            eprintln!("{}\n{}", "Generator response was:".yellow(), raw);
        }
        anyhow::Error::new(e).context("Story generation failed")
    })
}

fn show_outcome(outcome: &StoryOutcome, show_scores: bool) {
    if show_scores {
        if let Some(last) = outcome.last_judgment() {
            println!("\n{} {}", "[Judge scores]".cyan().bold(), last.summary_line());
            if !last.must_fix().is_empty() {
                let top: Vec<&str> = last
                    .must_fix()
                    .iter()
                    .take(4)
                    .map(String::as_str)
                    .collect();
                println!("{} {}", "[Must fix]".red().bold(), top.join("; "));
            }
        }
    }

    let rule = "=".repeat(60);
    println!("\n{rule}");
    println!("{}", outcome.story);
    println!("{rule}");
}

//! bachu: brewery chat assistant CLI.
//!
//! Runs the intent classifier and dialogue brain from a terminal: an
//! interactive chat, one-shot answers, and classifier diagnostics.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bachu::{Brain, Config, Conversation};

/// Bachu brewery chat assistant
#[derive(Parser)]
#[command(name = "bachu")]
#[command(version = bachu::PKG_VERSION)]
#[command(about = "Bachu brewery chat assistant")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long, env = "BACHU_CONFIG")]
    config: Option<PathBuf>,

    /// Seed for response selection (overrides config).
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive chat on stdin ("salir" or EOF to quit)
    Chat,

    /// Answer a single message
    Ask {
        /// Message text
        text: String,
        /// Also print label and score
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the label ranking for a message
    Classify {
        /// Message text
        text: String,
        /// Number of labels to show
        #[arg(short = 'n', long, default_value_t = 5)]
        top: usize,
    },

    /// List trained labels with example counts and priors
    Labels,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if args.seed.is_some() {
        config.responses.seed = args.seed;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut brain = config.brain()?;
    brain.init();
    info!(version = %bachu::version_string(), "bachu ready");

    match args.command {
        Command::Chat => chat(&mut brain)?,
        Command::Ask { text, verbose } => {
            let reply = brain.process(&text);
            if verbose {
                println!("[{} {:.4}]", reply.label, reply.score);
            }
            println!("{}", reply.response);
        }
        Command::Classify { text, top } => {
            for result in brain.classify(&text).into_iter().take(top) {
                println!("{:<20} {:>10.4}", result.label, result.score);
            }
        }
        Command::Labels => {
            let classifier = brain.classifier();
            for label in classifier.labels() {
                println!(
                    "{:<20} {:>4} {:>8.4}",
                    label,
                    classifier.class_count(label),
                    classifier.prior(label).unwrap_or(f64::NEG_INFINITY)
                );
            }
            println!(
                "{} examples, {} stems",
                classifier.document_count(),
                classifier.vocabulary_size()
            );
        }
    }

    Ok(())
}

fn chat(brain: &mut Brain) -> io::Result<()> {
    let mut conversation = Conversation::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    writeln!(stdout, "Bachu: {}", brain.get_random_response("greeting"))?;
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text.eq_ignore_ascii_case("salir") {
            break;
        }

        let turn = conversation.handle(brain, text);
        writeln!(stdout, "Bachu: {}", turn.reply)?;
    }
    Ok(())
}

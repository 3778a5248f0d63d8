use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::debug;

use chatmark::catalog::Provider;
use chatmark::{Config, Error, InlineSpan, Message, Role, Segment};

mod logging;

/// Config picked up from the working directory when --config is not given
const LOCAL_CONFIG: &str = "chatmark.toml";

#[derive(Parser)]
#[command(name = "chatmark")]
#[command(about = "Render chat messages with lightweight markdown and code highlighting")]
struct Cli {
    /// Config file (defaults to ./chatmark.toml, then built-in defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a message to HTML
    Render {
        /// Input file, or - for stdin
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Who wrote the message
        #[arg(long, value_enum, default_value_t = RoleArg::Assistant)]
        role: RoleArg,

        /// Emit a complete HTML page instead of a fragment
        #[arg(long)]
        standalone: bool,
    },

    /// Print the segments of a message as JSON
    Segments {
        /// Input file, or - for stdin
        input: PathBuf,

        /// Also resolve inline spans inside text segments
        #[arg(long)]
        inline: bool,
    },

    /// Print the tokens of every line of a code file as JSON
    Tokens {
        /// Input file, or - for stdin
        input: PathBuf,

        /// Language tag, as written after a fence
        #[arg(short, long, default_value = chatmark::DEFAULT_FENCE_LANGUAGE)]
        language: String,
    },

    /// List providers and their models
    Models {
        /// Only list this provider
        #[arg(long)]
        provider: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    User,
    Assistant,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::User => Role::User,
            RoleArg::Assistant => Role::Assistant,
        }
    }
}

#[derive(Serialize)]
struct SegmentWithSpans {
    segment: Segment,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline: Option<Vec<InlineSpan>>,
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> chatmark::Result<()> {
    match cli.command {
        Command::Render {
            input,
            output,
            role,
            standalone,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let message = Message::new(role.into(), read_input(&input)?);
            let html = if standalone {
                chatmark::render_document(std::slice::from_ref(&message), &config)
            } else {
                chatmark::render_message(&message, &config)
            };
            match output {
                Some(path) => {
                    fs::write(&path, html).map_err(|source| Error::Io {
                        path: path.clone(),
                        source,
                    })?;
                    println!("Created {}", path.display());
                }
                None => print!("{}", html),
            }
        }
        Command::Segments { input, inline } => {
            let content = read_input(&input)?;
            let segments: Vec<SegmentWithSpans> = chatmark::segment(&content)
                .into_iter()
                .map(|segment| {
                    let spans = match (&segment, inline) {
                        (Segment::Text { raw, .. }, true) => Some(chatmark::resolve_inline(raw)),
                        _ => None,
                    };
                    SegmentWithSpans {
                        segment,
                        inline: spans,
                    }
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&segments)?);
        }
        Command::Tokens { input, language } => {
            let content = read_input(&input)?;
            let lines = chatmark::tokenize_block(&content, &language);
            println!("{}", serde_json::to_string_pretty(&lines)?);
        }
        Command::Models { provider } => {
            let providers = match provider {
                Some(id) => vec![id.parse::<Provider>()?],
                None => Provider::ALL.to_vec(),
            };
            for provider in providers {
                println!(
                    "{} ({}) {} - {}",
                    provider.name(),
                    provider.id(),
                    provider.color(),
                    provider.description()
                );
                let default_id = provider.default_model().id;
                for model in provider.models() {
                    let marker = if model.id == default_id { "*" } else { " " };
                    println!(
                        " {} {:<36} {:<18} {:<8} [{:?} {}] {}",
                        marker,
                        model.id,
                        model.name,
                        model.icon.name(),
                        model.tier,
                        model.tier.badge_color(),
                        model.description
                    );
                }
            }
        }
    }
    Ok(())
}

fn load_config(explicit: Option<&Path>) -> chatmark::Result<Config> {
    match explicit {
        Some(path) => Config::load(path),
        None => Ok(Config::load_or_default(Path::new(LOCAL_CONFIG))),
    }
}

fn read_input(path: &Path) -> chatmark::Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .map_err(|source| Error::Io {
                path: path.to_path_buf(),
                source,
            })?;
        return Ok(content);
    }

    debug!("reading {}", path.display());
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

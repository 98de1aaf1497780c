//! Medassist — medical symptom chatbot assistant.
//!
//! Usage:
//!   medassist init       Scaffold config and prompt files
//!   medassist chat       Start an interactive chat session
//!   medassist ask        Ask a single question
//!   medassist tools      Show the tool schemas presented to the model
//!   medassist symptoms   Print the symptom catalog

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tracing::warn;

use medassist::agent::{system_prompt, Conversation};
use medassist::config::{self, AssistantConfig};
use medassist::knowledge::{HttpKnowledgeService, KnowledgeService};
use medassist::llm::AnthropicClient;
use medassist::tools::{self, ToolDispatcher};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "medassist")]
#[command(version = "0.1.0")]
#[command(about = "Medical symptom chatbot assistant")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the assistant home directory (defaults to ~/.medassist).
    #[arg(long)]
    home: Option<String>,

    /// Log level (debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scaffold the config file and default prompt.
    Init,

    /// Start an interactive chat session.
    Chat,

    /// Ask a single question and print the reply.
    Ask {
        /// The message to send.
        message: String,
    },

    /// Show the tool schemas presented to the model.
    Tools,

    /// Print the symptom catalog from the knowledge service.
    Symptoms,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    // Resolve home directory
    let home_dir = match &cli.home {
        Some(home) => PathBuf::from(shellexpand::tilde(home).into_owned()),
        None => config::default_home_dir(),
    };

    match cli.command {
        Commands::Init => cmd_init(&home_dir),
        Commands::Chat => cmd_chat(&home_dir).await,
        Commands::Ask { message } => cmd_ask(&home_dir, &message).await,
        Commands::Tools => cmd_tools(),
        Commands::Symptoms => cmd_symptoms(&home_dir).await,
    }
}

// ---------------------------------------------------------------------------
// Command implementations
// ---------------------------------------------------------------------------

fn cmd_init(home_dir: &Path) -> Result<()> {
    let config_path = home_dir.join("medassist.toml");
    let prompt_path = home_dir.join("prompt.yaml");

    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
    } else {
        let mut config = AssistantConfig::default();
        config.prompt_path = prompt_path.display().to_string();
        config::save_config(&config, &config_path)?;
        println!("Wrote {}", config_path.display());
    }

    if prompt_path.exists() {
        println!("Prompt already exists at {}", prompt_path.display());
    } else {
        system_prompt::write_default_prompt(&prompt_path)?;
        println!("Wrote {}", prompt_path.display());
    }

    println!(
        "\nSet your API key in {} (or export ANTHROPIC_API_KEY), then run `medassist chat`.",
        config_path.display()
    );
    Ok(())
}

async fn cmd_chat(home_dir: &Path) -> Result<()> {
    let (config, mut conversation) = bootstrap(home_dir)?;

    println!(
        "{} Medical assistant ready (model: {}). /quit to exit, /clear to reset, /reload to re-read the prompt.",
        ">>>".green().bold(),
        config.model,
    );

    let stdin = tokio::io::stdin();
    let mut lines = tokio::io::BufReader::new(stdin).lines();

    loop {
        print!("{} ", "you>".cyan().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        match input {
            "" => continue,
            "/quit" | "/exit" => break,
            "/clear" => {
                conversation.clear_history();
                println!("History cleared.");
            }
            "/reload" => {
                let prompt_path = config.resolved_prompt_path();
                match conversation.reload_prompt(Path::new(&prompt_path)) {
                    Ok(()) => println!("Prompt reloaded."),
                    Err(e) => eprintln!("{} {:#}", "Error:".red().bold(), e),
                }
            }
            _ => {
                let reply = conversation.process_message(input).await;
                println!("{} {}", "assistant>".green().bold(), reply);
            }
        }
    }

    Ok(())
}

async fn cmd_ask(home_dir: &Path, message: &str) -> Result<()> {
    let (_config, mut conversation) = bootstrap(home_dir)?;
    let reply = conversation.process_message(message).await;
    println!("{reply}");
    Ok(())
}

fn cmd_tools() -> Result<()> {
    let registry = tools::builtin_registry()?;

    for descriptor in registry.descriptors() {
        println!("{}", descriptor.name.bold());
        println!("{}", descriptor.description.trim());
        println!(
            "{}",
            serde_json::to_string_pretty(&descriptor.input_schema())?
        );
        println!();
    }
    Ok(())
}

async fn cmd_symptoms(home_dir: &Path) -> Result<()> {
    let config = load_config_or_exit(home_dir)?;
    let service = knowledge_service(&config);

    let symptoms = service.list_symptoms().await?;
    println!("{} symptoms:", symptoms.len());
    for symptom in &symptoms {
        println!("  {:>6}  {}", symptom.id, symptom.description);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build the full assistant: config, prompt, model client, knowledge
/// service, tool registry, and the conversation that ties them together.
fn bootstrap(home_dir: &Path) -> Result<(AssistantConfig, Conversation)> {
    let config = load_config_or_exit(home_dir)?;

    let prompt_path = config.resolved_prompt_path();
    let prompt = match system_prompt::load_system_prompt(Path::new(&prompt_path)) {
        Ok(prompt) => prompt,
        Err(e) => {
            warn!("Falling back to the built-in prompt: {:#}", e);
            system_prompt::DEFAULT_SYSTEM_PROMPT.to_string()
        }
    };

    let api_key = config.effective_api_key()?;
    let llm = AnthropicClient::new(&config.anthropic_api_url, &api_key);
    let dispatcher = ToolDispatcher::new(knowledge_service(&config));
    let registry = tools::builtin_registry()?;

    let conversation = Conversation::new(&config, prompt, Box::new(llm), dispatcher, registry);
    Ok((config, conversation))
}

fn load_config_or_exit(home_dir: &Path) -> Result<AssistantConfig> {
    let config_path = home_dir.join("medassist.toml");

    if !config_path.exists() {
        eprintln!(
            "{} No config found at {:?}. Run `medassist init` first.",
            "Error:".red().bold(),
            config_path
        );
        std::process::exit(1);
    }

    config::load_config(&config_path)
}

fn knowledge_service(config: &AssistantConfig) -> Arc<dyn KnowledgeService> {
    Arc::new(HttpKnowledgeService::new(
        &config.knowledge_api_url,
        config.knowledge_token(),
        &config.language,
    ))
}

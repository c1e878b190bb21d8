//! Command-line client for the Venice chat API.

use std::io::{self, IsTerminal, Read, Write};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use futures_util::StreamExt;

use venice::catalog;
use venice::config::{Config, Secrets};
use venice::settings::SettingsField;
use venice::{
    ApiHandler, Message, Mode, RetryingHandler, StreamChunk, VeniceError, VeniceHandler,
    WebSearchMode,
};

/// Venice CLI client
#[derive(Parser)]
#[command(name = "venice")]
#[command(version)]
#[command(about = "Venice chat client")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Settings mode to use (plan or act).
    #[arg(long, default_value = "act")]
    mode: Mode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Chat with a model (streams the reply)
    Chat {
        /// User message (or omit to read from stdin)
        message: Option<String>,
        /// Model to use (overrides config)
        #[arg(short, long)]
        model: Option<String>,
        /// System prompt
        #[arg(short, long, default_value = "You are a helpful assistant.")]
        system: String,
        /// Web search mode: auto, on or off (overrides config)
        #[arg(long)]
        web_search: Option<WebSearchMode>,
    },

    /// List models
    Models {
        /// Fetch the live listing instead of the built-in catalog
        #[arg(long)]
        remote: bool,
    },

    /// Show one model's limits, prices and capabilities
    Model {
        /// Model ID
        id: String,
        /// Look the model up in the live listing
        #[arg(long)]
        remote: bool,
    },

    /// Show the effective settings for the selected mode
    Settings,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::load_or_default(args.config.as_deref())?;
    let secrets = Secrets::load()?;

    match args.command {
        Command::Chat {
            message,
            model,
            system,
            web_search,
        } => {
            let text = read_input(message)?;
            let mut options = config.options(args.mode, &secrets);
            if let Some(model) = model {
                options = options.model(model);
            }
            if let Some(mode) = web_search {
                options = options.web_search(mode);
            }

            let handler = Arc::new(VeniceHandler::new(options)?);
            let handler = RetryingHandler::new(handler, config.retry.to_retry_config());
            chat(&handler, &system, &text).await?;
        }
        Command::Models { remote } => {
            let models = if remote {
                let handler = VeniceHandler::new(config.options(args.mode, &secrets))?;
                handler.list_models().await?
            } else {
                catalog::models()
            };
            for m in models {
                println!(
                    "{:<24} ctx {:>7}  max {:>6}  in ${:<6} out ${:<6} {}",
                    m.id,
                    m.context_window,
                    m.max_tokens,
                    m.input_price,
                    m.output_price,
                    m.description.as_deref().unwrap_or("")
                );
            }
        }
        Command::Model { id, remote } => {
            let model = if remote {
                let handler = VeniceHandler::new(config.options(args.mode, &secrets))?;
                handler.fetch_model(&id).await?
            } else {
                catalog::lookup(&id).ok_or_else(|| VeniceError::ModelNotFound(id.clone()))?
            };
            println!("{}", model.id);
            if let Some(description) = &model.description {
                println!("  {description}");
            }
            println!("  context window:   {}", model.context_window);
            println!("  max tokens:       {}", model.max_tokens);
            println!("  input price:      ${}/M", model.input_price);
            println!("  output price:     ${}/M", model.output_price);
            println!("  images:           {}", model.supports_images);
            println!("  reasoning:        {}", model.supports_reasoning);
            println!("  function calling: {}", model.supports_function_calling);
            println!("  prompt cache:     {}", model.supports_prompt_cache);
        }
        Command::Settings => {
            let settings = &config.venice;
            let mode = args.mode;
            let values = settings.mode(mode);
            println!("mode: {mode}");
            for field in settings.visible_fields(mode) {
                let value = match field {
                    SettingsField::ApiKey => match config.options(mode, &secrets).api_key {
                        Some(_) => "(set)".to_string(),
                        None => "(missing)".to_string(),
                    },
                    SettingsField::Model => settings.selected_model(mode).id,
                    SettingsField::WebSearch => settings.web_search(mode).to_string(),
                    SettingsField::IncludeSearchResultsInStream => {
                        flag(values.include_search_results_in_stream)
                    }
                    SettingsField::IncludeVeniceSystemPrompt => {
                        flag(values.include_venice_system_prompt)
                    }
                    SettingsField::StripThinkingResponse => flag(values.strip_thinking_response),
                    SettingsField::DisableThinking => flag(values.disable_thinking),
                };
                println!("  {:<34} {value}", field.label());
            }
        }
    }

    Ok(())
}

async fn chat(handler: &dyn ApiHandler, system: &str, text: &str) -> venice::Result<()> {
    let mut stream = handler
        .create_message(system, &[Message::user(text)])
        .await?;

    let mut stdout = io::stdout();
    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(StreamChunk::Text { text }) => {
                print!("{text}");
                let _ = stdout.flush();
            }
            Ok(StreamChunk::Usage(usage)) => {
                eprintln!(
                    "\n[{} in / {} out, {} cached, ${:.6}]",
                    usage.input_tokens,
                    usage.output_tokens,
                    usage.cache_read_tokens,
                    usage.total_cost
                );
            }
            Err(e @ VeniceError::TransportInterrupted(_)) => {
                eprintln!("\n[response cut off: {e}]");
                return Err(e);
            }
            Err(e) => return Err(e),
        }
    }
    println!();
    Ok(())
}

fn flag(value: Option<bool>) -> String {
    value.unwrap_or(false).to_string()
}

/// Read text from the argument, or stdin if absent and not a terminal.
fn read_input(arg: Option<String>) -> Result<String, Box<dyn std::error::Error>> {
    match arg {
        Some(text) => Ok(text),
        None if !io::stdin().is_terminal() => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf.trim_end().to_string())
        }
        None => Err("no input: pass a message or pipe text on stdin".into()),
    }
}

use clap::{Parser, Subcommand, ValueEnum};
use relaychat_client::{ChatClient, ChatSession, ExchangeProvider, HttpRelay, SingleExchange};
use tracing_subscriber::EnvFilter;

mod repl;

#[derive(Parser)]
#[command(name = "relaychat", version, about = "Chat with hosted models through a relaychat server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open an interactive chat
    Chat {
        /// Which relay route to talk to
        #[arg(value_enum)]
        provider: ProviderArg,

        /// Base URL of the relaychat server
        #[arg(short, long, default_value = "http://localhost:8080")]
        server: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ProviderArg {
    Openai,
    Deepseek,
    Gemini,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat { provider, server } => {
            let relay = HttpRelay::new(server);
            let (label, mut session): (&str, Box<dyn ChatClient>) = match provider {
                ProviderArg::Openai => ("openai", Box::new(ChatSession::new())),
                ProviderArg::Deepseek => (
                    "deepseek",
                    Box::new(SingleExchange::new(ExchangeProvider::DeepSeek)),
                ),
                ProviderArg::Gemini => (
                    "gemini",
                    Box::new(SingleExchange::new(ExchangeProvider::Gemini)),
                ),
            };
            repl::run(label, session.as_mut(), &relay).await
        }
    }
}

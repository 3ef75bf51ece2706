use clap::Parser;
use mcp_chat::core::config::{self, ResolvedConfig};
use mcp_chat::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "mcp-chat", about = "Terminal chat client for an MCP-backed LLM server")]
struct Args {
    /// Base URL of the chat backend (overrides config and MCP_CHAT_ENDPOINT)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Server to route messages to (overrides config and MCP_CHAT_SERVER)
    #[arg(short, long)]
    server: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to mcp-chat.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("mcp-chat.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let resolved = match config::load_config() {
        Ok(file_config) => config::resolve(
            &file_config,
            args.endpoint.as_deref(),
            args.server.as_deref(),
        ),
        Err(e) => {
            log::warn!("Ignoring config file: {}", e);
            eprintln!("Warning: could not read config file ({e}); using defaults");
            config::resolve(
                &Default::default(),
                args.endpoint.as_deref(),
                args.server.as_deref(),
            )
        }
    };
    log_startup(&resolved);

    tui::run(resolved)
}

fn log_startup(config: &ResolvedConfig) {
    log::info!(
        "mcp-chat starting up: endpoint={}, server_id={:?}, {} configured servers",
        config.endpoint,
        config.server_id,
        config.servers.len()
    );
}

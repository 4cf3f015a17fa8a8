use clap::Parser;
use diagora::core::config::{self, CliOverrides, DiagoraConfig};
use diagora::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "diagora", about = "Terminal client for the Diagora EBS assistant")]
struct Args {
    /// Backend base URL (overrides DIAGORA_BASE_URL and the config file)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Show assistant answers as plain text instead of rendered markdown
    #[arg(long)]
    plain: bool,

    /// Log file path (overrides DIAGORA_LOG_FILE and the config file)
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let cli = CliOverrides {
        base_url: args.base_url,
        plain: args.plain,
        log_file: args.log_file,
    };

    // Config errors are reported once the logger is up
    let (file_config, config_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (DiagoraConfig::default(), Some(e)),
    };
    let resolved = config::resolve(&file_config, &cli);

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    if let Some(e) = config_error {
        log::warn!("Ignoring config file, using defaults: {}", e);
    }
    log::info!("Diagora starting up against {}", resolved.base_url);

    tui::run(resolved)
}

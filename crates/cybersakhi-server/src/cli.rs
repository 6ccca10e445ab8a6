//! Command-line interface

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "cybersakhi-server")]
#[command(about = "CyberSakhi safety API server", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    pub config: String,

    /// Hosted LLM invoke endpoint
    #[arg(short = 'e', long, env = "CYBERSAKHI_LLM_ENDPOINT")]
    pub llm_endpoint: Option<String>,

    /// Harassment classification timeout in milliseconds
    #[arg(short, long)]
    pub timeout_ms: Option<u64>,

    /// Listen address
    #[arg(short = 'l', long, default_value = "0.0.0.0")]
    pub listen: String,

    /// Listen port
    #[arg(short = 'P', long, default_value = "8080")]
    pub port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

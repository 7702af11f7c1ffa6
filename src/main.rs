use clap::Parser;
use fb_ads_mcp::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = fb_ads_mcp::mcp::server::run_stdio(cli).await {
        eprintln!("fb-ads-mcp: {}", err);
        std::process::exit(1);
    }
}

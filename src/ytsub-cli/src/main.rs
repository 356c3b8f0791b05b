//! ytsub-mcp entry point.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use ytsub_cli::{Cli, build_server, check_downloader, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.effective_log_level())?;

    check_downloader(&cli.yt_dlp);
    info!(
        downloader = %cli.yt_dlp.display(),
        layout = ?cli.banner_layout(),
        "Starting ytsub-mcp"
    );

    let server = build_server(cli.tool())?;
    server.run_stdio().await
}

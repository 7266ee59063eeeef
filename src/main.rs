use chrono::Local;
use clap::Parser;
use house_scrap::{cli, info_time, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let start_time = Local::now();
    cli::run(cli::Cli::parse()).await?;
    info_time!(start_time, "Full program time:");

    Ok(())
}

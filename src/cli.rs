use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::parse::{ExtractOptions, UrlPolicy};
use crate::process::{process_cards, process_lot_size, CardsJob, LotSizeTarget};
use crate::store::CorruptStorePolicy;
use crate::{info_time, Result, DEFAULT_INPUT_PATH, DEFAULT_STORE_PATH, DETAILS_BASE_URL};

#[derive(Parser, Debug)]
#[command(name = "house_scrap", about = "Scrape real-estate listing cards into a JSON store")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract listing cards from a saved search page and merge them into the store
    Cards {
        #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
        input: PathBuf,

        #[arg(short, long, default_value = DEFAULT_STORE_PATH)]
        store: PathBuf,

        /// Keep at most this many listings from the page
        #[arg(short, long)]
        limit: Option<usize>,

        #[arg(long, value_enum, default_value_t = UrlMode::Absolute)]
        url_policy: UrlMode,

        /// Base that relative detail links are resolved against
        #[arg(long, default_value = DETAILS_BASE_URL)]
        base_url: String,

        /// Fail instead of starting over when the store is corrupt
        #[arg(long)]
        strict_store: bool,
    },
    /// Fetch the lot size from a listing detail page
    LotSize {
        url: String,

        /// Store to record the lot size in (needs --mls-id)
        #[arg(long, requires = "mls_id")]
        store: Option<PathBuf>,

        #[arg(long, requires = "store")]
        mls_id: Option<String>,

        #[arg(long)]
        strict_store: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum UrlMode {
    /// Resolve detail links against --base-url
    Absolute,
    /// Store detail links as they appear in the page
    Raw,
}

fn store_policy(strict: bool) -> CorruptStorePolicy {
    if strict {
        CorruptStorePolicy::Fail
    } else {
        CorruptStorePolicy::StartEmpty
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Cards {
            input,
            store,
            limit,
            url_policy,
            base_url,
            strict_store,
        } => {
            let url_policy = match url_policy {
                UrlMode::Absolute => UrlPolicy::absolute(&base_url)?,
                UrlMode::Raw => UrlPolicy::Raw,
            };
            let job = CardsJob {
                input,
                store,
                extract: ExtractOptions::new(limit, url_policy),
                store_policy: store_policy(strict_store),
            };
            process_cards(&job).await?;
        }
        Command::LotSize {
            url,
            store,
            mls_id,
            strict_store,
        } => {
            let target = store.zip(mls_id).map(|(store, mls_id)| LotSizeTarget {
                store,
                mls_id,
                store_policy: store_policy(strict_store),
            });
            if process_lot_size(&url, target.as_ref()).await?.is_none() {
                info_time!("No lot size for {}", url);
            }
        }
    }
    Ok(())
}

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::parse::{parse_document, ExtractOptions};
use crate::request::DetailFetcher;
use crate::store::{CorruptStorePolicy, ListingStore, MergeSummary};
use crate::{info_time, warn_time, Error, Result};

/// One run of the card pipeline: extract `input`, merge into the store at `store`.
#[derive(Debug, Clone)]
pub struct CardsJob {
    pub input: PathBuf,
    pub store: PathBuf,
    pub extract: ExtractOptions,
    pub store_policy: CorruptStorePolicy,
}

/// Extracts the cards of the saved search page and merges them into the store.
///
/// An unreadable input page is logged and merges nothing; the store is still rewritten.
pub async fn process_cards(job: &CardsJob) -> Result<MergeSummary> {
    let start_time = Local::now();

    let listings = match read_source(&job.input).await {
        Ok(html) => parse_document(&html, &job.extract)?.listings,
        Err(e) => {
            warn_time!("{}", e);
            Default::default()
        }
    };
    info_time!("New houses: {}", listings.len());

    let mut store = ListingStore::load(&job.store, job.store_policy).await?;
    info_time!("Existing houses: {}", store.len());
    let summary = store.merge(listings);
    store.save(&job.store).await?;

    info_time!(start_time, "Finished processing {:?}", job.input);
    Ok(summary)
}

/// Where a fetched lot size gets recorded.
#[derive(Debug, Clone)]
pub struct LotSizeTarget {
    pub store: PathBuf,
    pub mls_id: String,
    pub store_policy: CorruptStorePolicy,
}

/// Fetches the lot size of the listing at `url` and, given a target, stores it on that listing.
pub async fn process_lot_size(url: &str, target: Option<&LotSizeTarget>) -> Result<Option<String>> {
    let fetcher = DetailFetcher::new()?;
    let Some(lot_size) = fetcher.fetch_lot_size(url).await else {
        warn_time!("Failed to retrieve lot size.");
        return Ok(None);
    };
    info_time!("Lot Size: {} sqft", lot_size);

    if let Some(target) = target {
        let mut store = ListingStore::load(&target.store, target.store_policy).await?;
        if store.set_lot_size(&target.mls_id, lot_size.clone()) {
            store.save(&target.store).await?;
        } else {
            warn_time!("No house with MLS ID {} in {:?}", target.mls_id, target.store);
        }
    }
    Ok(Some(lot_size))
}

async fn read_source(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Error::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })
}

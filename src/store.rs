use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;

use crate::record::{ListingRecord, Listings};
use crate::{info_time, warn_time, Error, Result};

/// What to do when the persisted store can't be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CorruptStorePolicy {
    /// Log it and start over with an empty store. The next save overwrites the file.
    #[default]
    StartEmpty,
    /// Fail with [`Error::StoreCorrupt`].
    Fail,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub updated: usize,
    pub inserted: usize,
}

/// Listings persisted across runs, keyed by MLS ID.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingStore {
    listings: Listings,
}

impl ListingStore {
    pub fn new(listings: Listings) -> Self {
        Self { listings }
    }

    /// Reads the store at `path`. A missing file is an empty store.
    pub async fn load(path: impl AsRef<Path>, policy: CorruptStorePolicy) -> Result<Self> {
        let path = path.as_ref();
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info_time!("No existing file found at {:?}. Starting fresh.", path);
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<Listings>(&bytes) {
            Ok(listings) => {
                info_time!("Loaded {} existing houses from {:?}", listings.len(), path);
                Ok(Self { listings })
            }
            Err(source) => match policy {
                CorruptStorePolicy::StartEmpty => {
                    warn_time!("Error loading existing houses from {:?}: {}", path, source);
                    Ok(Self::default())
                }
                CorruptStorePolicy::Fail => Err(Error::StoreCorrupt {
                    path: path.to_path_buf(),
                    source,
                }),
            },
        }
    }

    /// Merges `new` into the store. Known listings get the new fields overlaid,
    /// unknown ones are inserted whole.
    pub fn merge(&mut self, new: Listings) -> MergeSummary {
        let mut summary = MergeSummary::default();
        for (mls_id, record) in new {
            match self.listings.get_mut(&mls_id) {
                Some(existing) => {
                    existing.overlay(record);
                    summary.updated += 1;
                }
                None => {
                    self.listings.insert(mls_id, record);
                    summary.inserted += 1;
                }
            }
        }
        info_time!(
            "Updated {} existing houses and added {} new houses",
            summary.updated,
            summary.inserted
        );
        summary
    }

    /// Sets the lot size of a stored listing. Returns `false` if the listing isn't stored.
    pub fn set_lot_size(&mut self, mls_id: &str, lot_size: String) -> bool {
        match self.listings.get_mut(mls_id) {
            Some(record) => {
                record.lot_size = Some(lot_size);
                true
            }
            None => false,
        }
    }

    /// Rewrites the whole store at `path`, creating its directory if needed.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).await?;
        }
        let json = serde_json::to_string_pretty(&self.listings)?;
        fs::write(path, json).await?;
        info_time!("Saved {} houses to {:?}", self.listings.len(), path);
        Ok(())
    }

    pub fn get(&self, mls_id: &str) -> Option<&ListingRecord> {
        self.listings.get(mls_id)
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

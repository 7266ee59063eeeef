//! Real-estate listing scraper.
//!
//! Extracts listing cards from saved search-result pages, merges them into a JSON
//! store keyed by MLS ID and fetches lot sizes from single listing pages.

pub mod cli;
mod error;
mod macros;
pub mod parse;
pub mod process;
pub mod record;
pub mod request;
pub mod store;

pub use error::{Error, Result};

/// Structural marker of a single listing card.
const CARD_SELECTOR: &str = r#"div[data-test="PropertyListCard-wrapper"]"#;
/// Images whose source contains this marker are stand-ins for "no photo".
const PLACEHOLDER_IMAGE_MARKER: &str = "listCardFallBackImage";
/// Label preceding the MLS ID of a card.
const MLS_ID_LABEL: &str = "MLS ID";
/// Class token prefix of the lot size `<li>` on a listing detail page.
const LOT_SIZE_CLASS_PREFIX: &str = "PropertyLotSizeMetastyles__StyledPropertyLotSizeMeta";
/// Detail links on cards are relative to this base.
pub const DETAILS_BASE_URL: &str = "https://www.zillow.com/";
pub const DEFAULT_INPUT_PATH: &str = "data/cards.html";
pub const DEFAULT_STORE_PATH: &str = "data/saved_houses.json";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
(KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36";

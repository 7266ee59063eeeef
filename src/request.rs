use reqwest::Client;
use scraper::Html;

use crate::parse::create_selector;

use crate::{info_time, warn_time, Error, Result, LOT_SIZE_CLASS_PREFIX, USER_AGENT};

/// Fetches single listing detail pages.
pub struct DetailFetcher {
    client: Client,
}

impl DetailFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    /// Requests a page and returns its HTML. Non-2xx responses are errors.
    pub async fn fetch_html(&self, url: &str) -> Result<String> {
        let res = self.client.get(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.into(),
                status,
            });
        }
        Ok(res.text().await?)
    }

    /// Fetches the listing page at `url` and reads its lot size.
    /// Every failure is logged and ends up as `None`.
    pub async fn fetch_lot_size(&self, url: &str) -> Option<String> {
        info_time!("Requesting lot size from {}", url);
        let html = match self.fetch_html(url).await {
            Ok(html) => html,
            Err(e) => {
                warn_time!("Error fetching URL: {}", e);
                return None;
            }
        };
        match parse_lot_size(&html) {
            Ok(lot_size) => lot_size,
            Err(e) => {
                warn_time!("Error processing content: {}", e);
                None
            }
        }
    }
}

/// Reads the lot size (e.g. `"7,841"`) off a listing detail page.
pub fn parse_lot_size(html: &str) -> Result<Option<String>> {
    let li_selector = create_selector("li")?;
    let value_selector = create_selector("span.meta-value")?;
    let doc = Html::parse_document(html);

    let Some(lot_size_li) = doc
        .select(&li_selector)
        .find(|li| li.value().classes().any(|c| c.starts_with(LOT_SIZE_CLASS_PREFIX)))
    else {
        info_time!("Lot size element not found.");
        return Ok(None);
    };

    let Some(value) = lot_size_li.select(&value_selector).next() else {
        info_time!("Meta value span not found.");
        return Ok(None);
    };

    Ok(Some(value.text().collect::<String>().trim().to_string()))
}

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::record::{ListingRecord, Listings};
use crate::{info_time, warn_time, Error, Result, CARD_SELECTOR, MLS_ID_LABEL, PLACEHOLDER_IMAGE_MARKER};

/// How a card's details link is stored.
#[derive(Debug, Clone, PartialEq)]
pub enum UrlPolicy {
    /// Resolve the link against a base URL.
    Absolute(Url),
    /// Keep the `href` attribute as it is.
    Raw,
}

impl UrlPolicy {
    pub fn absolute(base: &str) -> Result<Self> {
        Url::parse(base)
            .map(UrlPolicy::Absolute)
            .map_err(|source| Error::InvalidBaseUrl {
                base: base.into(),
                source,
            })
    }

    fn apply(&self, href: &str) -> String {
        match self {
            UrlPolicy::Raw => href.to_string(),
            UrlPolicy::Absolute(base) => match base.join(href) {
                Ok(url) => url.into(),
                Err(e) => {
                    warn_time!("Couldn't resolve {} against {}: {}", href, base, e);
                    href.to_string()
                }
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    /// Stop after this many records. `None` means no limit.
    pub max_records: Option<usize>,
    pub url_policy: UrlPolicy,
}

impl ExtractOptions {
    pub fn new(max_records: Option<usize>, url_policy: UrlPolicy) -> Self {
        Self {
            max_records,
            url_policy,
        }
    }
}

/// Result of extracting one document.
#[derive(Debug, Default)]
pub struct Extraction {
    pub listings: Listings,
    pub cards_found: usize,
    pub skipped: usize,
}

struct CardSelectors {
    card: Selector,
    image: Selector,
    price: Selector,
    details: Selector,
    span: Selector,
    bold: Selector,
    link: Selector,
    address: Selector,
    div: Selector,
}

impl CardSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            card: create_selector(CARD_SELECTOR)?,
            image: create_selector("img")?,
            price: create_selector(r#"span[data-testid="data-price-row"]"#)?,
            details: create_selector(r#"span[class*="StyledPropertyCardHomeDetails"]"#)?,
            span: create_selector("span")?,
            bold: create_selector("b")?,
            link: create_selector(r#"a[class*="StyledPropertyCardDataArea"]"#)?,
            address: create_selector("address")?,
            div: create_selector("div")?,
        })
    }
}

/// Parses `html` and extracts its listing cards. See [`extract`].
pub fn parse_document(html: &str, opts: &ExtractOptions) -> Result<Extraction> {
    let doc = Html::parse_document(html);
    extract(&doc, opts)
}

/// Extracts every listing card of `doc` into a record keyed by its MLS ID.
///
/// Cards without an MLS ID are skipped, and so are cards whose MLS ID was already seen
/// in this document (first one wins). Missing sub-elements leave their field empty.
pub fn extract(doc: &Html, opts: &ExtractOptions) -> Result<Extraction> {
    let sel = CardSelectors::new()?;
    let mut out = Extraction::default();

    let cards: Vec<ElementRef> = doc.select(&sel.card).collect();
    out.cards_found = cards.len();
    info_time!("Found {} property cards", out.cards_found);

    for (i, card) in cards.into_iter().enumerate() {
        let card_num = i + 1;
        if opts.max_records.is_some_and(|max| out.listings.len() >= max) {
            info_time!("Reached the limit of {} records", out.listings.len());
            break;
        }

        let mls_id = match extract_mls_id(card, &sel) {
            Some(id) => id,
            None => {
                info_time!("Card {}: Skipped (no MLS ID)", card_num);
                out.skipped += 1;
                continue;
            }
        };
        if out.listings.contains_key(&mls_id) {
            info_time!("Card {}: Skipped (duplicate MLS ID {})", card_num, mls_id);
            out.skipped += 1;
            continue;
        }

        let record = extract_card(card, card_num, &sel, &opts.url_policy);
        out.listings.insert(mls_id, record);
    }

    info_time!(
        "Processed {} valid cards out of {} total",
        out.listings.len(),
        out.cards_found
    );
    Ok(out)
}

fn extract_card(
    card: ElementRef,
    card_num: usize,
    sel: &CardSelectors,
    url_policy: &UrlPolicy,
) -> ListingRecord {
    let mut record = ListingRecord::default();

    match card
        .select(&sel.image)
        .next()
        .and_then(|img| img.value().attr("src"))
        .filter(|src| !src.is_empty())
    {
        Some(src) if src.contains(PLACEHOLDER_IMAGE_MARKER) => {}
        Some(src) => record.image = src.to_string(),
        None => info_time!("Card {}: cannot find image", card_num),
    }

    if let Some(price) = card.select(&sel.price).next() {
        record.price = trimmed_text(price);
    }

    if let Some(details) = card.select(&sel.details).next() {
        for span in details.select(&sel.span) {
            let text = trimmed_text(span);
            let bold = || span.select(&sel.bold).next().map(trimmed_text).unwrap_or_default();
            if text.contains("bds") {
                record.bedrooms = bold();
            } else if text.contains("ba") {
                record.bathrooms = bold();
            } else if text.contains("sqft") {
                record.square_feet = bold().replace(',', "");
            }
        }
    }

    if let Some(link) = card.select(&sel.link).next() {
        if let Some(href) = link.value().attr("href") {
            record.details_url = url_policy.apply(href);
        }
        if let Some(address) = link.select(&sel.address).next() {
            record.address = trimmed_text(address);
        }
    }

    record
}

/// Digits of the first `<div>` whose own text carries the MLS ID label.
fn extract_mls_id(card: ElementRef, sel: &CardSelectors) -> Option<String> {
    let label = card.select(&sel.div).find_map(|div| {
        let own_text: String = div
            .children()
            .filter_map(|node| node.value().as_text())
            .map(|text| &**text)
            .collect();
        own_text.contains(MLS_ID_LABEL).then_some(own_text)
    })?;

    let digits: String = label.chars().filter(char::is_ascii_digit).collect();
    (!digits.is_empty()).then_some(digits)
}

#[inline]
fn trimmed_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[inline]
pub(crate) fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseMissingSelector(sel_str.into()))
}

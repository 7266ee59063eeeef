// tests/pipeline.rs
use std::fs;
use std::path::PathBuf;

use house_scrap::parse::{ExtractOptions, UrlPolicy};
use house_scrap::process::{process_cards, CardsJob};
use house_scrap::store::{CorruptStorePolicy, ListingStore, MergeSummary};
use house_scrap::{Error, DETAILS_BASE_URL};
use serde_json::Value;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("house_scrap_e2e_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn card(mls: &str, price: &str, beds: &str) -> String {
    format!(
        r#"<div data-test="PropertyListCard-wrapper">
             <img src="https://photos/{mls}.jpg">
             <span data-testid="data-price-row">{price}</span>
             <span class="StyledPropertyCardHomeDetailsList">
               <span><b>{beds}</b> bds</span><span><b>2</b> ba</span><span><b>2,010</b> sqft</span>
             </span>
             <a class="StyledPropertyCardDataArea-c11n" href="homedetails/{mls}_zpid/">
               <address>{mls} Elm St</address>
             </a>
             <div>MLS ID #{mls}</div>
           </div>"#
    )
}

fn job(dir: &PathBuf, cards: &[String]) -> CardsJob {
    let input = dir.join("cards.html");
    fs::write(&input, format!("<html><body>{}</body></html>", cards.concat())).unwrap();
    CardsJob {
        input,
        store: dir.join("data").join("saved_houses.json"),
        extract: ExtractOptions::new(None, UrlPolicy::absolute(DETAILS_BASE_URL).unwrap()),
        store_policy: CorruptStorePolicy::Fail,
    }
}

#[tokio::test]
async fn first_run_creates_store() {
    let dir = tmp_dir("first_run");
    let job = job(&dir, &[card("100", "$300,000", "3"), card("200", "$400,000", "4")]);

    let summary = process_cards(&job).await.unwrap();
    assert_eq!(summary, MergeSummary { updated: 0, inserted: 2 });

    let json: Value = serde_json::from_str(&fs::read_to_string(&job.store).unwrap()).unwrap();
    assert_eq!(json["100"]["price"], "$300,000");
    assert_eq!(json["100"]["square_feet"], "2010");
    assert_eq!(json["200"]["details_url"], "https://www.zillow.com/homedetails/200_zpid/");
    assert_eq!(json["200"]["address"], "200 Elm St");
    assert!(json["200"].get("lot_size").is_none());
}

#[tokio::test]
async fn second_run_updates_without_losing_fields() {
    let dir = tmp_dir("second_run");
    let first = job(&dir, &[card("100", "$300,000", "3")]);
    process_cards(&first).await.unwrap();

    let mut store = ListingStore::load(&first.store, CorruptStorePolicy::Fail)
        .await
        .unwrap();
    assert!(store.set_lot_size("100", "7,841".into()));
    store.save(&first.store).await.unwrap();

    let second = job(&dir, &[card("100", "$289,000", "3"), card("300", "$1", "1")]);
    let summary = process_cards(&second).await.unwrap();
    assert_eq!(summary, MergeSummary { updated: 1, inserted: 1 });

    let store = ListingStore::load(&second.store, CorruptStorePolicy::Fail)
        .await
        .unwrap();
    let rec = store.get("100").unwrap();
    assert_eq!(rec.price, "$289,000");
    assert_eq!(rec.lot_size.as_deref(), Some("7,841"));
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn missing_input_keeps_existing_store() {
    let dir = tmp_dir("missing_input");
    let first = job(&dir, &[card("100", "$300,000", "3")]);
    process_cards(&first).await.unwrap();

    let mut gone = first.clone();
    gone.input = dir.join("does_not_exist.html");
    let summary = process_cards(&gone).await.unwrap();
    assert_eq!(summary, MergeSummary::default());

    let store = ListingStore::load(&gone.store, CorruptStorePolicy::Fail)
        .await
        .unwrap();
    assert_eq!(store.get("100").unwrap().price, "$300,000");
}

#[tokio::test]
async fn strict_policy_refuses_corrupt_store() {
    let dir = tmp_dir("strict");
    let job = job(&dir, &[card("100", "$300,000", "3")]);
    fs::create_dir_all(job.store.parent().unwrap()).unwrap();
    fs::write(&job.store, "not json at all").unwrap();

    let res = process_cards(&job).await;
    assert!(matches!(res, Err(Error::StoreCorrupt { .. })));
    assert_eq!(fs::read_to_string(&job.store).unwrap(), "not json at all");
}

#[tokio::test]
async fn lenient_policy_replaces_corrupt_store() {
    let dir = tmp_dir("lenient");
    let mut job = job(&dir, &[card("100", "$300,000", "3")]);
    job.store_policy = CorruptStorePolicy::StartEmpty;
    fs::create_dir_all(job.store.parent().unwrap()).unwrap();
    fs::write(&job.store, "not json at all").unwrap();

    let summary = process_cards(&job).await.unwrap();
    assert_eq!(summary.inserted, 1);
    let store = ListingStore::load(&job.store, CorruptStorePolicy::Fail)
        .await
        .unwrap();
    assert_eq!(store.len(), 1);
}

//! Command handlers. Each one maps a user intent onto the library crates and
//! prints the outcome; `LocationUnavailable` and `SearchFailed` come back as
//! errors with a retry hint, an empty search result does not.

use std::sync::Arc;

use anyhow::Context;
use cafe_core::{AppConfig, Coordinate, NormalizedCafe};
use cafe_locator::{IpLocationProvider, LocationError, Locator, LocatorError};
use cafe_places::{CafeSearch, OverpassClient, SearchSession};
use cafe_store::{
    read_json, write_json, FileStore, KvStore, SaveOutcome, SavedList, LAST_RESULTS_KEY,
};

use crate::render::{format_results, format_saved};

/// Builds the IP-geolocation locator.
///
/// # Errors
///
/// Returns [`LocatorError::LocationUnavailable`] with
/// [`LocationError::Unsupported`] when `CAFE_GEOIP_URL` is empty.
pub(crate) fn build_locator<S: KvStore>(
    config: &AppConfig,
    store: S,
) -> Result<Locator<IpLocationProvider, S>, LocatorError> {
    if config.geoip_url.trim().is_empty() {
        return Err(LocationError::Unsupported(
            "CAFE_GEOIP_URL is empty; pass --lat and --lon".to_owned(),
        )
        .into());
    }
    let provider = IpLocationProvider::new(&config.geoip_url, &config.user_agent)?;
    Ok(Locator::from_config(provider, store, config))
}

async fn locate(config: &AppConfig, store: Arc<FileStore>) -> anyhow::Result<Coordinate> {
    let located = match build_locator(config, store) {
        Ok(locator) => locator.acquire_location().await,
        Err(e) => Err(e),
    };
    located.context("could not determine your location; retry, or pass --lat and --lon")
}

pub(crate) async fn run_locate(
    config: &AppConfig,
    store: Arc<FileStore>,
    refresh: bool,
) -> anyhow::Result<()> {
    if refresh {
        build_locator(config, Arc::clone(&store))?.clear_cache()?;
    }
    let coordinate = locate(config, store).await?;
    println!("{coordinate}");
    Ok(())
}

pub(crate) async fn run_search(
    config: &AppConfig,
    store: Arc<FileStore>,
    explicit: Option<Coordinate>,
    json: bool,
) -> anyhow::Result<()> {
    let center = match explicit {
        Some(coordinate) => coordinate,
        None => locate(config, Arc::clone(&store)).await?,
    };

    let client = OverpassClient::with_base_url(
        config.http_timeout_secs,
        &config.user_agent,
        &config.overpass_url,
    )?;
    let session = SearchSession::new(CafeSearch::from_config(client, config));

    let Some(cafes) = session
        .search(center)
        .await
        .context("cafe search failed; retry in a moment")?
    else {
        return Ok(());
    };

    remember_results(store.as_ref(), &cafes)?;
    print_results(&cafes, json)
}

fn remember_results<S: KvStore + ?Sized>(
    store: &S,
    cafes: &[NormalizedCafe],
) -> anyhow::Result<()> {
    write_json(store, LAST_RESULTS_KEY, cafes).context("failed to store search results")
}

fn print_results(cafes: &[NormalizedCafe], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(cafes)?);
    } else {
        print!("{}", format_results(cafes));
    }
    Ok(())
}

/// Resolves `id` against the last search result and adds it to the saved list.
pub(crate) fn save_from_last_results<S: KvStore>(
    store: S,
    id: &str,
) -> anyhow::Result<(NormalizedCafe, SaveOutcome)> {
    let last: Vec<NormalizedCafe> = read_json(&store, LAST_RESULTS_KEY)?.unwrap_or_default();
    let cafe = last
        .into_iter()
        .find(|cafe| cafe.id == id)
        .with_context(|| {
            format!("café {id} is not in the last search results; run `cafe-cli search` first")
        })?;

    let outcome = SavedList::new(store).save(cafe.clone())?;
    Ok((cafe, outcome))
}

pub(crate) fn run_save(store: &Arc<FileStore>, id: &str) -> anyhow::Result<()> {
    let (cafe, outcome) = save_from_last_results(Arc::clone(store), id)?;
    match outcome {
        SaveOutcome::Saved => println!("Saved {}.", cafe.name),
        SaveOutcome::AlreadySaved => println!("{} is already saved.", cafe.name),
    }
    Ok(())
}

pub(crate) fn run_saved(store: &Arc<FileStore>, json: bool) -> anyhow::Result<()> {
    let saved = SavedList::new(Arc::clone(store)).list()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&saved)?);
    } else {
        print!("{}", format_saved(&saved));
    }
    Ok(())
}

pub(crate) fn run_remove(store: &Arc<FileStore>, id: &str) -> anyhow::Result<()> {
    if SavedList::new(Arc::clone(store)).remove(id)? {
        println!("Removed {id} from saved cafés.");
    } else {
        println!("No saved café with id {id}.");
    }
    Ok(())
}

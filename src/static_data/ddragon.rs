//! Data Dragon documents: parsing into [`StaticData`] and downloading them.

use super::StaticData;
use crate::error::AppError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub const DATA_DRAGON_URL: &str = "https://ddragon.leagueoflegends.com";

pub const CHAMPION_FILE: &str = "champion.json";
pub const ITEM_FILE: &str = "item.json";
pub const RUNE_FILE: &str = "runesReforged.json";
pub const SUMMONER_FILE: &str = "summoner.json";

#[derive(Debug, Deserialize)]
struct DataDocument<T> {
    data: HashMap<String, T>,
}

#[derive(Debug, Deserialize)]
struct ChampionEntry {
    id: String,
    key: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ItemEntry {
    name: String,
}

#[derive(Debug, Deserialize)]
struct SummonerEntry {
    key: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct RuneTree {
    slots: Vec<RuneSlot>,
}

#[derive(Debug, Deserialize)]
struct RuneSlot {
    runes: Vec<RuneEntry>,
}

#[derive(Debug, Deserialize)]
struct RuneEntry {
    id: i64,
    name: String,
}

fn parse<T: for<'de> Deserialize<'de>>(content: &str) -> Result<T, AppError> {
    serde_json::from_str(content).map_err(|e| AppError::JsonError(e.to_string()))
}

fn numeric_key(key: &str) -> Result<i64, AppError> {
    key.parse()
        .map_err(|_| AppError::StaticDataError(format!("non-numeric key '{}'", key)))
}

pub fn apply_champions(data: &mut StaticData, content: &str) -> Result<usize, AppError> {
    let doc: DataDocument<ChampionEntry> = parse(content)?;
    for champion in doc.data.values() {
        data.insert_champion(numeric_key(&champion.key)?, &champion.id, &champion.name);
    }
    Ok(doc.data.len())
}

pub fn apply_items(data: &mut StaticData, content: &str) -> Result<usize, AppError> {
    let doc: DataDocument<ItemEntry> = parse(content)?;
    for (id, item) in &doc.data {
        data.insert_item(numeric_key(id)?, &item.name);
    }
    Ok(doc.data.len())
}

pub fn apply_summoner_spells(data: &mut StaticData, content: &str) -> Result<usize, AppError> {
    let doc: DataDocument<SummonerEntry> = parse(content)?;
    for spell in doc.data.values() {
        data.insert_summoner_spell(numeric_key(&spell.key)?, &spell.name);
    }
    Ok(doc.data.len())
}

pub fn apply_runes(data: &mut StaticData, content: &str) -> Result<usize, AppError> {
    let trees: Vec<RuneTree> = parse(content)?;
    let mut count = 0;
    for rune in trees
        .iter()
        .flat_map(|tree| &tree.slots)
        .flat_map(|slot| &slot.runes)
    {
        data.insert_rune(rune.id, &rune.name);
        count += 1;
    }
    Ok(count)
}

/// Fetches the four documents for `version` (latest when `None`) into `dir`.
/// Returns the version written.
pub fn download(base_url: &str, dir: &Path, version: Option<&str>) -> Result<String, AppError> {
    let agent = ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(60))
        .build();

    let fetch = |url: &str| -> Result<String, AppError> {
        agent
            .get(url)
            .call()
            .map_err(|e| AppError::HttpError(e.to_string()))?
            .into_string()
            .map_err(|e| AppError::HttpError(e.to_string()))
    };

    let version = match version {
        Some(v) => v.to_string(),
        None => {
            let versions: Vec<String> = parse(&fetch(&format!("{}/api/versions.json", base_url))?)?;
            versions
                .into_iter()
                .next()
                .ok_or_else(|| AppError::StaticDataError("empty version list".to_string()))?
        }
    };
    info!("downloading Data Dragon {}", version);

    fs::create_dir_all(dir).map_err(|e| AppError::StaticDataError(e.to_string()))?;

    for file in [CHAMPION_FILE, ITEM_FILE, RUNE_FILE, SUMMONER_FILE] {
        let url = format!("{}/cdn/{}/data/en_US/{}", base_url, version, file);
        let body = fetch(&url)?;
        fs::write(dir.join(file), body)
            .map_err(|e| AppError::StaticDataError(format!("{}: {}", file, e)))?;
        info!("wrote {}", dir.join(file).display());
    }

    Ok(version)
}

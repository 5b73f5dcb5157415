//! Id -> name lookup tables. Every lookup is total: unknown ids give `None`.

pub mod ddragon;

use crate::error::AppError;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Stat shards are absent from Data Dragon, so they ship with the binary.
const STAT_RUNES: [(i64, &str); 9] = [
    (5001, "Health Scaling"),
    (5002, "Armor"),
    (5003, "Magic Resist"),
    (5005, "Attack Speed"),
    (5007, "Ability Haste"),
    (5008, "Adaptive Force"),
    (5010, "Move Speed"),
    (5011, "Health"),
    (5013, "Tenacity and Slow Resist"),
];

#[derive(Debug, Default)]
pub struct StaticData {
    champions: HashMap<i64, String>,
    champion_ids: HashMap<String, i64>,
    items: HashMap<i64, String>,
    runes: HashMap<i64, String>,
    summoner_spells: HashMap<i64, String>,
    stat_runes: HashMap<i64, String>,
}

impl StaticData {
    pub fn new() -> Self {
        let mut data = StaticData::default();
        for (id, name) in STAT_RUNES {
            data.insert_stat_rune(id, name);
        }
        data
    }

    /// Reads the Data Dragon documents found in `dir`. Missing files leave
    /// their table empty; unreadable ones are an error.
    pub fn load(dir: &Path) -> Result<Self, AppError> {
        let mut data = StaticData::new();

        let loaders: [(&str, fn(&mut StaticData, &str) -> Result<usize, AppError>); 4] = [
            (ddragon::CHAMPION_FILE, ddragon::apply_champions),
            (ddragon::ITEM_FILE, ddragon::apply_items),
            (ddragon::RUNE_FILE, ddragon::apply_runes),
            (ddragon::SUMMONER_FILE, ddragon::apply_summoner_spells),
        ];

        for (file, apply) in loaders {
            let path = dir.join(file);
            match fs::read_to_string(&path) {
                Ok(content) => {
                    let count = apply(&mut data, &content).map_err(|e| {
                        AppError::StaticDataError(format!("{}: {}", path.display(), e))
                    })?;
                    info!("loaded {} entries from {}", count, path.display());
                }
                Err(e) => warn!("{} not loaded: {}", path.display(), e),
            }
        }

        info!("{} champions available", data.champion_count());
        Ok(data)
    }

    pub fn insert_champion(&mut self, id: i64, key: &str, name: &str) {
        self.champion_ids.insert(normalize(key), id);
        self.champion_ids.insert(normalize(name), id);
        self.champions.insert(id, name.to_string());
    }

    pub fn insert_item(&mut self, id: i64, name: &str) {
        self.items.insert(id, name.to_string());
    }

    pub fn insert_rune(&mut self, id: i64, name: &str) {
        self.runes.insert(id, name.to_string());
    }

    pub fn insert_summoner_spell(&mut self, id: i64, name: &str) {
        self.summoner_spells.insert(id, name.to_string());
    }

    pub fn insert_stat_rune(&mut self, id: i64, name: &str) {
        self.stat_runes.insert(id, name.to_string());
    }

    /// Accepts display names and Data Dragon keys, ignoring case, spaces and punctuation.
    pub fn champion_id(&self, name: &str) -> Option<i64> {
        self.champion_ids.get(&normalize(name)).copied()
    }

    pub fn champion_name(&self, id: i64) -> Option<&str> {
        self.champions.get(&id).map(String::as_str)
    }

    pub fn item(&self, id: i64) -> Option<&str> {
        self.items.get(&id).map(String::as_str)
    }

    pub fn rune(&self, id: i64) -> Option<&str> {
        self.runes.get(&id).map(String::as_str)
    }

    pub fn summoner_spell(&self, id: i64) -> Option<&str> {
        self.summoner_spells.get(&id).map(String::as_str)
    }

    pub fn stat_rune(&self, id: i64) -> Option<&str> {
        self.stat_runes.get(&id).map(String::as_str)
    }

    pub fn champion_count(&self) -> usize {
        self.champions.len()
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn champion_names_resolve_loosely() {
        let mut data = StaticData::new();
        data.insert_champion(62, "MonkeyKing", "Wukong");
        data.insert_champion(145, "Kaisa", "Kai'Sa");

        assert_eq!(data.champion_id("wukong"), Some(62));
        assert_eq!(data.champion_id("MONKEYKING"), Some(62));
        assert_eq!(data.champion_id("kai'sa"), Some(145));
        assert_eq!(data.champion_id("Kai Sa"), Some(145));
        assert_eq!(data.champion_name(62), Some("Wukong"));
        assert_eq!(data.champion_id("Teemo"), None);
    }

    #[test]
    fn unknown_ids_are_absent() {
        let data = StaticData::new();

        assert_eq!(data.item(3020), None);
        assert_eq!(data.rune(8112), None);
        assert_eq!(data.summoner_spell(4), None);
        assert_eq!(data.champion_name(1), None);
        assert_eq!(data.stat_rune(5008), Some("Adaptive Force"));
        assert_eq!(data.stat_rune(0), None);
    }

    #[test]
    fn load_tolerates_missing_directory() {
        let data = StaticData::load(Path::new("/nonexistent/league_matchup")).unwrap();

        assert_eq!(data.champion_count(), 0);
        assert_eq!(data.stat_rune(5002), Some("Armor"));
    }
}

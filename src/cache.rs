use crate::region::Region;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Raw match-detail body as it came off the wire.
#[derive(Debug, Serialize, Deserialize)]
pub struct CachedMatch {
    pub region: String,
    pub game_id: i64,
    pub fetched_at: DateTime<Utc>,
    pub body: String,
}

/// File-backed store of match-detail responses. Finished games never change,
/// so these are the only responses worth keeping between runs.
#[derive(Debug, Clone)]
pub struct MatchCache {
    dir: PathBuf,
    ttl: Duration,
}

impl MatchCache {
    pub fn new(dir: PathBuf, ttl_hours: i64) -> Self {
        MatchCache {
            dir,
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn default_dir() -> PathBuf {
        dirs::cache_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("league_matchup")
            .join("matches")
    }

    fn entry_path(&self, region: Region, game_id: i64) -> PathBuf {
        self.dir.join(format!("{}_{}.json", region.code(), game_id))
    }

    pub fn load(&self, region: Region, game_id: i64) -> Option<String> {
        let path = self.entry_path(region, game_id);
        let content = fs::read_to_string(&path).ok()?;

        let entry: CachedMatch = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("ignoring unreadable cache entry {}: {}", path.display(), e);
                return None;
            }
        };

        if Utc::now().signed_duration_since(entry.fetched_at) > self.ttl {
            debug!("cache entry for {} expired", game_id);
            return None;
        }

        Some(entry.body)
    }

    /// Best effort: failures are logged and otherwise ignored.
    pub fn store(&self, region: Region, game_id: i64, body: &str) {
        let entry = CachedMatch {
            region: region.code().to_string(),
            game_id,
            fetched_at: Utc::now(),
            body: body.to_string(),
        };

        let result = fs::create_dir_all(&self.dir)
            .map_err(|e| e.to_string())
            .and_then(|_| serde_json::to_string(&entry).map_err(|e| e.to_string()))
            .and_then(|json| {
                fs::write(self.entry_path(region, game_id), json).map_err(|e| e.to_string())
            });

        if let Err(e) = result {
            warn!("failed to cache match {}: {}", game_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "league_matchup_cache_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn stores_and_loads_bodies_per_region() {
        let dir = scratch_dir("roundtrip");
        let cache = MatchCache::new(dir.clone(), 24);

        assert_eq!(cache.load(Region::Euw1, 7), None);
        cache.store(Region::Euw1, 7, r#"{"gameId":7}"#);

        assert_eq!(cache.load(Region::Euw1, 7).as_deref(), Some(r#"{"gameId":7}"#));
        assert_eq!(cache.load(Region::Na1, 7), None);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn expired_entries_are_ignored() {
        let dir = scratch_dir("expired");
        let cache = MatchCache::new(dir.clone(), 24);
        fs::create_dir_all(&dir).unwrap();

        let stale = CachedMatch {
            region: "kr".to_string(),
            game_id: 9,
            fetched_at: Utc::now() - Duration::hours(25),
            body: "{}".to_string(),
        };
        fs::write(
            cache.entry_path(Region::Kr, 9),
            serde_json::to_string(&stale).unwrap(),
        )
        .unwrap();

        assert_eq!(cache.load(Region::Kr, 9), None);

        let _ = fs::remove_dir_all(dir);
    }
}

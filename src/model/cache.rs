//! Disk cache of episode detail records with a revalidation window
//!
//! The detail view is served from `.cache/episodes/<id>.json` while the cached
//! record is younger than 24 hours; after that the record is treated as stale
//! and refetched from the API. The two most recent episodes are prefetched at
//! startup so their detail views open without a network round trip.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::episode::Episode;

const CACHE_DIR: &str = ".cache/episodes";

/// Seconds a cached record stays fresh (24 hours)
pub const REVALIDATE_SECS: i64 = 60 * 60 * 24;

/// How many of the most recent episodes are prefetched at startup
pub const PREFETCH_COUNT: u32 = 2;

#[derive(Serialize, Deserialize)]
struct CachedEpisode {
    fetched_at: DateTime<Utc>,
    episode: Episode,
}

#[derive(Clone)]
pub struct EpisodeCache {
    dir: PathBuf,
}

impl EpisodeCache {
    pub fn new() -> Self {
        Self {
            dir: PathBuf::from(CACHE_DIR),
        }
    }

    #[cfg(test)]
    fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Load a cached episode if it exists and is still inside the
    /// revalidation window.
    pub fn load(&self, id: &str) -> Option<Episode> {
        let path = self.path_for(id);
        let content = fs::read_to_string(&path).ok()?;
        let cached: CachedEpisode = match serde_json::from_str(&content) {
            Ok(cached) => cached,
            Err(e) => {
                tracing::debug!(id, error = %e, "Discarding unreadable cache entry");
                return None;
            }
        };

        if !is_fresh(cached.fetched_at, Utc::now()) {
            tracing::debug!(id, "Cache entry stale, will refetch");
            return None;
        }

        tracing::debug!(id, "Episode served from cache");
        Some(cached.episode)
    }

    pub fn store(&self, episode: &Episode) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let cached = CachedEpisode {
            fetched_at: Utc::now(),
            episode: episode.clone(),
        };
        let content = serde_json::to_string(&cached)?;
        fs::write(self.path_for(&episode.id), content)?;
        Ok(())
    }

    fn path_for(&self, id: &str) -> PathBuf {
        // Episode ids are slugs, but don't trust them as path components
        let safe: String = id
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        Path::new(&self.dir).join(format!("{}.json", safe))
    }
}

impl Default for EpisodeCache {
    fn default() -> Self {
        Self::new()
    }
}

fn is_fresh(fetched_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    (now - fetched_at).num_seconds() < REVALIDATE_SECS
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn episode(id: &str) -> Episode {
        Episode {
            id: id.to_string(),
            title: "Title".to_string(),
            members: "Crew".to_string(),
            thumbnail: String::new(),
            url: "https://example.com/a.mp3".to_string(),
            duration_secs: 90,
            duration_as_string: "00:01:30".to_string(),
            published_at: "22 Jan 21".to_string(),
            description: "<p>hi</p>".to_string(),
        }
    }

    #[test]
    fn freshness_respects_the_24_hour_window() {
        let now = Utc::now();
        assert!(is_fresh(now - Duration::hours(23), now));
        assert!(!is_fresh(now - Duration::hours(25), now));
        assert!(!is_fresh(now - Duration::seconds(REVALIDATE_SECS), now));
    }

    #[test]
    fn stores_and_loads_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = EpisodeCache::with_dir(tmp.path().join("episodes"));
        let ep = episode("faladev-30");

        cache.store(&ep).unwrap();
        assert_eq!(cache.load("faladev-30"), Some(ep));
        assert_eq!(cache.load("unknown"), None);
    }

    #[test]
    fn suspicious_ids_stay_inside_the_cache_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = EpisodeCache::with_dir(tmp.path().join("episodes"));

        let mut ep = episode("x");
        ep.id = "../../etc/passwd".to_string();
        cache.store(&ep).unwrap();

        assert!(tmp.path().join("episodes").read_dir().unwrap().count() == 1);
    }
}

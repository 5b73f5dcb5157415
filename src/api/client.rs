use crate::cache::MatchCache;
use crate::config::Config;
use crate::error::{status_description, AppError};
use crate::rate_limit::{RateGovernor, UsageCounts, RATE_COUNT_HEADER};
use crate::region::Region;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::endpoints;
use super::models::*;

pub struct RiotApiClient {
    config: Config,
    agent: ureq::Agent,
    governor: Arc<RateGovernor>,
    cache: Option<MatchCache>,
}

impl RiotApiClient {
    pub fn new(config: Config, governor: Arc<RateGovernor>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("league_matchup/", env!("CARGO_PKG_VERSION")))
            .build();
        let cache = config
            .cache_enabled
            .then(|| MatchCache::new(MatchCache::default_dir(), config.cache_ttl_hours));

        RiotApiClient {
            config,
            agent,
            governor,
            cache,
        }
    }

    pub fn with_cache(mut self, cache: Option<MatchCache>) -> Self {
        self.cache = cache;
        self
    }

    fn base_url(&self, region: Region) -> String {
        match &self.config.api_base_url {
            Some(base) => base.clone(),
            None => format!("https://{}", region.host()),
        }
    }

    /// Issues one upstream call. The governor sees every response that carries
    /// usage counters, failures included, before the status is interpreted.
    fn execute_request(
        &self,
        region: Region,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<String, AppError> {
        let url = format!("{}{}", self.base_url(region), path);

        self.governor.wait_turn();

        let mut request = self
            .agent
            .get(&url)
            .set("X-Riot-Token", &self.config.api_key);
        for (key, value) in query {
            request = request.query(key, value);
        }

        let started = Instant::now();
        let response = request.call();
        let call_time = started.elapsed();

        match response {
            Ok(resp) => {
                self.governor.observe(call_time, usage_of(&resp));
                if resp.status() != 200 {
                    return Err(upstream_failure(path, resp.status()));
                }
                resp.into_string()
                    .map_err(|e| AppError::HttpError(e.to_string()))
            }
            Err(ureq::Error::Status(code, resp)) => {
                self.governor.observe(call_time, usage_of(&resp));
                Err(upstream_failure(path, code))
            }
            Err(e) => Err(AppError::HttpError(e.to_string())),
        }
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        region: Region,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let body = self.execute_request(region, path, query)?;
        decode(&body)
    }

    pub fn get_summoner_by_name(&self, region: Region, name: &str) -> Result<SummonerDto, AppError> {
        let summoner: SummonerDto =
            self.get_json(region, &endpoints::summoner_by_name(name), &[])?;
        info!("found {} (account {})", summoner.name, summoner.account_id);
        Ok(summoner)
    }

    pub fn get_matchlist(
        &self,
        region: Region,
        account_id: &str,
        champion_id: i64,
    ) -> Result<MatchlistDto, AppError> {
        let query = [
            ("champion", champion_id.to_string()),
            ("queue", endpoints::RANKED_SOLO_QUEUE.to_string()),
        ];
        self.get_json(region, &endpoints::matchlist_by_account(account_id), &query)
    }

    pub fn get_match(&self, region: Region, game_id: i64) -> Result<MatchDto, AppError> {
        let cached = self
            .cache
            .as_ref()
            .and_then(|cache| cache.load(region, game_id))
            .and_then(|body| serde_json::from_str(&body).ok());
        if let Some(match_data) = cached {
            debug!("match {} served from cache", game_id);
            return Ok(match_data);
        }

        let body = self.execute_request(region, &endpoints::match_by_id(game_id), &[])?;
        let match_data = decode(&body)?;
        if let Some(cache) = &self.cache {
            cache.store(region, game_id, &body);
        }
        Ok(match_data)
    }
}

fn usage_of(resp: &ureq::Response) -> Option<UsageCounts> {
    resp.header(RATE_COUNT_HEADER)
        .and_then(UsageCounts::from_header)
}

fn upstream_failure(path: &str, code: u16) -> AppError {
    warn!(
        "{} responded {} ({})",
        path,
        code,
        status_description(code).unwrap_or("Unknown")
    );
    AppError::UpstreamStatus(code)
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, AppError> {
    serde_json::from_str(body).map_err(|e| AppError::JsonError(e.to_string()))
}

//! The matchup query: profile -> match list -> match details -> cross-reference.
//!
//! Every stage is a blocking upstream call throttled by the shared governor.
//! The first failure ends the query and is returned unchanged.

use crate::analysis::cross_reference::{cross_reference, MatchRecords};
use crate::api::client::RiotApiClient;
use crate::error::AppError;
use crate::region::Region;
use crate::static_data::StaticData;
use tracing::{debug, info};

/// Upper bound on match-detail calls per query.
pub const MAX_DETAIL_FETCHES: usize = 50;

/// Raw query as received from the CLI or the web route.
#[derive(Debug, Clone)]
pub struct MatchupQuery {
    pub region: String,
    pub summoner: String,
    pub champion: String,
    pub enemy_champion: String,
}

/// A query that passed validation: nothing in here can steer a request elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchupRequest {
    pub region: Region,
    pub summoner: String,
    pub champion_id: i64,
    pub enemy_champion_id: i64,
}

pub struct MatchupFinder<'a> {
    client: &'a RiotApiClient,
    static_data: &'a StaticData,
}

impl<'a> MatchupFinder<'a> {
    pub fn new(client: &'a RiotApiClient, static_data: &'a StaticData) -> Self {
        MatchupFinder {
            client,
            static_data,
        }
    }

    /// Validates the region and resolves both champion names. Makes no network call.
    pub fn resolve(&self, query: &MatchupQuery) -> Result<MatchupRequest, AppError> {
        let region: Region = query.region.parse()?;
        let resolve = |name: &str| {
            self.static_data
                .champion_id(name)
                .ok_or_else(|| AppError::UnknownChampion(name.to_string()))
        };

        Ok(MatchupRequest {
            region,
            summoner: query.summoner.clone(),
            champion_id: resolve(&query.champion)?,
            enemy_champion_id: resolve(&query.enemy_champion)?,
        })
    }

    pub fn find(&self, query: &MatchupQuery) -> Result<MatchRecords, AppError> {
        let request = self.resolve(query)?;
        self.run(&request)
    }

    pub fn run(&self, request: &MatchupRequest) -> Result<MatchRecords, AppError> {
        let summoner = self
            .client
            .get_summoner_by_name(request.region, &request.summoner)?;

        let matchlist =
            self.client
                .get_matchlist(request.region, &summoner.account_id, request.champion_id)?;

        let game_ids: Vec<i64> = matchlist
            .matches
            .iter()
            .map(|m| m.game_id)
            .take(MAX_DETAIL_FETCHES)
            .collect();
        info!(
            "{} has {} matches on the champion, inspecting {}",
            summoner.name,
            matchlist.matches.len(),
            game_ids.len()
        );

        let mut records = MatchRecords::new();
        for game_id in game_ids {
            let match_data = self.client.get_match(request.region, game_id)?;

            match cross_reference(
                &match_data,
                request.champion_id,
                request.enemy_champion_id,
                self.static_data,
            ) {
                Some(entry) => {
                    debug!("match {} qualifies", game_id);
                    records.insert(game_id, entry);
                }
                None => debug!("match {} skipped, champions not on opposing teams", game_id),
            }
        }

        info!(
            "finished {}: {} qualifying matches",
            summoner.name,
            records.len()
        );
        Ok(records)
    }
}

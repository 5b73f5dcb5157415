use crate::api::models::{MatchDto, ParticipantDto};
use crate::static_data::StaticData;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;

/// One target champion's side of a qualifying match, ids resolved to names.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantView {
    pub username: Option<String>,
    pub team_id: i64,
    pub win: bool,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub champion_id: i64,
    pub spells: [Option<String>; 2],
    pub items: [Option<String>; 7],
    pub perks: [Option<String>; 6],
    pub stat_perks: [Option<String>; 3],
}

/// A match where both champions met on opposing teams. Serializes as
/// `{"date": .., "<Champion>": {..}, "<Enemy>": {..}}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MatchEntry {
    /// Creation time, seconds since epoch with millisecond fraction.
    pub date: f64,
    #[serde(flatten)]
    pub views: IndexMap<String, ParticipantView>,
}

/// Keyed by game id, in match-list order.
pub type MatchRecords = IndexMap<i64, MatchEntry>;

/// Returns the entry for `match_data` when `champion_id` and `enemy_id` both
/// played and were on different teams, `None` otherwise.
pub fn cross_reference(
    match_data: &MatchDto,
    champion_id: i64,
    enemy_id: i64,
    static_data: &StaticData,
) -> Option<MatchEntry> {
    let by_champion: HashMap<i64, &ParticipantDto> = match_data
        .participants
        .iter()
        .map(|p| (p.champion_id, p))
        .collect();

    let champion = by_champion.get(&champion_id)?;
    let enemy = by_champion.get(&enemy_id)?;
    if champion.team_id == enemy.team_id {
        return None;
    }

    let usernames: HashMap<i64, &str> = match_data
        .participant_identities
        .iter()
        .filter_map(|identity| {
            let name = identity.player.as_ref()?.summoner_name.as_deref()?;
            Some((identity.participant_id, name))
        })
        .collect();

    let mut views = IndexMap::new();
    for participant in [*champion, *enemy] {
        let key = static_data
            .champion_name(participant.champion_id)
            .map(str::to_string)
            .unwrap_or_else(|| participant.champion_id.to_string());
        let username = usernames.get(&participant.participant_id).copied();
        views.insert(key, project(participant, username, static_data));
    }

    Some(MatchEntry {
        date: match_data.game_creation as f64 / 1000.0,
        views,
    })
}

fn project(
    participant: &ParticipantDto,
    username: Option<&str>,
    static_data: &StaticData,
) -> ParticipantView {
    let stats = &participant.stats;
    let owned = |name: Option<&str>| name.map(str::to_string);

    ParticipantView {
        username: username.map(str::to_string),
        team_id: participant.team_id,
        win: stats.win,
        kills: stats.kills,
        deaths: stats.deaths,
        assists: stats.assists,
        champion_id: participant.champion_id,
        spells: participant.spells().map(|id| owned(static_data.summoner_spell(id))),
        items: stats.items().map(|id| owned(static_data.item(id))),
        perks: stats.perks().map(|id| owned(static_data.rune(id))),
        stat_perks: stats.stat_perks().map(|id| owned(static_data.stat_rune(id))),
    }
}

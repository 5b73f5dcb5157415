use serde::Deserialize;

// Summoner V4 response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct SummonerDto {
    pub account_id: String,
    pub name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub puuid: String,
    #[serde(default)]
    pub summoner_level: i64,
}

// Match V4 matchlist response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct MatchlistDto {
    #[serde(default)]
    pub matches: Vec<MatchReferenceDto>,
    #[serde(default)]
    pub total_games: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct MatchReferenceDto {
    pub game_id: i64,
    #[serde(default)]
    pub champion: i64,
    #[serde(default)]
    pub queue: i64,
    #[serde(default)]
    pub timestamp: i64,
}

// Match V4 match response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct MatchDto {
    pub game_id: i64,
    /// Milliseconds since epoch.
    pub game_creation: i64,
    #[serde(default)]
    pub queue_id: i64,
    #[serde(default)]
    pub participants: Vec<ParticipantDto>,
    #[serde(default)]
    pub participant_identities: Vec<ParticipantIdentityDto>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub participant_id: i64,
    pub team_id: i64,
    pub champion_id: i64,
    #[serde(default)]
    pub spell1_id: i64,
    #[serde(default)]
    pub spell2_id: i64,
    pub stats: ParticipantStatsDto,
}

impl ParticipantDto {
    pub fn spells(&self) -> [i64; 2] {
        [self.spell1_id, self.spell2_id]
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticipantStatsDto {
    pub win: bool,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub item0: i64,
    pub item1: i64,
    pub item2: i64,
    pub item3: i64,
    pub item4: i64,
    pub item5: i64,
    pub item6: i64,
    pub perk0: i64,
    pub perk1: i64,
    pub perk2: i64,
    pub perk3: i64,
    pub perk4: i64,
    pub perk5: i64,
    pub stat_perk0: i64,
    pub stat_perk1: i64,
    pub stat_perk2: i64,
}

impl ParticipantStatsDto {
    pub fn items(&self) -> [i64; 7] {
        [
            self.item0, self.item1, self.item2, self.item3, self.item4, self.item5, self.item6,
        ]
    }

    pub fn perks(&self) -> [i64; 6] {
        [
            self.perk0, self.perk1, self.perk2, self.perk3, self.perk4, self.perk5,
        ]
    }

    pub fn stat_perks(&self) -> [i64; 3] {
        [self.stat_perk0, self.stat_perk1, self.stat_perk2]
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantIdentityDto {
    pub participant_id: i64,
    pub player: Option<PlayerDto>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct PlayerDto {
    #[serde(default)]
    pub summoner_name: Option<String>,
    #[serde(default)]
    pub account_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_payload_decodes_with_missing_optional_stats() {
        let body = r#"{
            "gameId": 3456,
            "gameCreation": 1600000000123,
            "queueId": 420,
            "participants": [
                {"participantId": 1, "teamId": 100, "championId": 1, "spell1Id": 4, "spell2Id": 14,
                 "stats": {"win": true, "kills": 7, "deaths": 2, "assists": 9, "item0": 3020, "perk0": 8112, "statPerk0": 5008}}
            ],
            "participantIdentities": [
                {"participantId": 1, "player": {"summonerName": "Faker", "accountId": "abc"}}
            ]
        }"#;

        let m: MatchDto = serde_json::from_str(body).unwrap();

        assert_eq!(m.game_creation / 1000, 1_600_000_000);
        let p = &m.participants[0];
        assert_eq!(p.spells(), [4, 14]);
        assert_eq!(p.stats.items(), [3020, 0, 0, 0, 0, 0, 0]);
        assert_eq!(p.stats.perks()[0], 8112);
        assert_eq!(p.stats.stat_perks(), [5008, 0, 0]);
        assert_eq!(
            m.participant_identities[0]
                .player
                .as_ref()
                .unwrap()
                .summoner_name
                .as_deref(),
            Some("Faker")
        );
    }
}

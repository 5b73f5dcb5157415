use crate::analysis::cross_reference::{MatchRecords, ParticipantView};
use chrono::{TimeZone, Utc};
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct MatchupRow {
    #[tabled(rename = "Game")]
    game_id: String,
    date: String,
    player: String,
    kda: String,
    result: String,
    opponent: String,
    #[tabled(rename = "Opp. KDA")]
    opponent_kda: String,
}

fn kda(view: &ParticipantView) -> String {
    format!("{}/{}/{}", view.kills, view.deaths, view.assists)
}

fn name_or_dash(name: &Option<String>) -> String {
    name.clone().unwrap_or_else(|| "-".to_string())
}

fn build_rows(records: &MatchRecords) -> Vec<MatchupRow> {
    records
        .iter()
        .filter_map(|(game_id, entry)| {
            let mut views = entry.views.iter();
            let (champion, player) = views.next()?;
            let (enemy, opponent) = views.next()?;

            let date = Utc
                .timestamp_millis_opt((entry.date * 1000.0).round() as i64)
                .single()
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| entry.date.to_string());
            let result = if player.win {
                "WIN".green().to_string()
            } else {
                "LOSS".red().to_string()
            };

            Some(MatchupRow {
                game_id: game_id.to_string(),
                date,
                player: format!("{} ({})", name_or_dash(&player.username), champion),
                kda: kda(player),
                result,
                opponent: format!("{} ({})", name_or_dash(&opponent.username), enemy),
                opponent_kda: kda(opponent),
            })
        })
        .collect()
}

pub fn display_matchups(records: &MatchRecords, champion: &str, enemy: &str) {
    println!(
        "\n{}",
        format!("⚔️  {} vs {}", champion, enemy).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    if records.is_empty() {
        println!(
            "{}",
            "No ranked games found where these champions faced each other".yellow()
        );
        return;
    }

    let rows = build_rows(records);
    let wins = records
        .values()
        .filter(|entry| entry.views.values().next().is_some_and(|v| v.win))
        .count();
    println!(
        "{} {} W / {} L\n",
        "📈 Record:".bold(),
        wins.to_string().green(),
        (records.len() - wins).to_string().red()
    );

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_json(records: &MatchRecords) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(records)?);
    Ok(())
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::cross_reference::cross_reference;
    use crate::analysis::fixtures::{match_json, static_data, AHRI, ZED};

    #[test]
    fn rows_follow_record_order() {
        let data = static_data();
        let mut records = MatchRecords::new();
        for (game_id, players) in [(5, [(AHRI, 100), (ZED, 200)]), (2, [(ZED, 100), (AHRI, 200)])] {
            let m = serde_json::from_value(match_json(game_id, &players)).unwrap();
            records.insert(game_id, cross_reference(&m, AHRI, ZED, &data).unwrap());
        }

        let rows = build_rows(&records);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].game_id, "5");
        assert_eq!(rows[0].player, "Player1 (Ahri)");
        assert_eq!(rows[0].opponent, "Player2 (Zed)");
        assert_eq!(rows[0].kda, "3/1/7");
        assert_eq!(rows[1].game_id, "2");
        assert_eq!(rows[1].player, "Player2 (Ahri)");
    }
}

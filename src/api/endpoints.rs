// Path builders for the three calls of the matchup query.

/// Ranked solo/duo.
pub const RANKED_SOLO_QUEUE: u32 = 420;

pub const SUMMONER_BY_NAME: &str = "/lol/summoner/v4/summoners/by-name";
pub const MATCHLIST_BY_ACCOUNT: &str = "/lol/match/v4/matchlists/by-account";
pub const MATCH_BY_ID: &str = "/lol/match/v4/matches";

pub fn summoner_by_name(name: &str) -> String {
    format!("{}/{}", SUMMONER_BY_NAME, encode_segment(name))
}

pub fn matchlist_by_account(account_id: &str) -> String {
    format!("{}/{}", MATCHLIST_BY_ACCOUNT, encode_segment(account_id))
}

pub fn match_by_id(game_id: i64) -> String {
    format!("{}/{}", MATCH_BY_ID, game_id)
}

/// Percent-encodes everything outside the unreserved set so a handle can't alter the path.
fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summoner_names_are_encoded() {
        assert_eq!(
            summoner_by_name("Le Conservateur"),
            "/lol/summoner/v4/summoners/by-name/Le%20Conservateur"
        );
        assert_eq!(
            summoner_by_name("../admin?x"),
            "/lol/summoner/v4/summoners/by-name/..%2Fadmin%3Fx"
        );
        assert_eq!(match_by_id(42), "/lol/match/v4/matches/42");
    }
}

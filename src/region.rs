use crate::error::AppError;
use std::fmt;
use std::str::FromStr;

/// Platform routing values accepted by the summoner and match v4 endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Br1,
    Eun1,
    Euw1,
    Jp1,
    Kr,
    La1,
    La2,
    Na1,
    Oc1,
    Ru,
    Tr1,
}

impl Region {
    pub const ALL: [Region; 11] = [
        Region::Br1,
        Region::Eun1,
        Region::Euw1,
        Region::Jp1,
        Region::Kr,
        Region::La1,
        Region::La2,
        Region::Na1,
        Region::Oc1,
        Region::Ru,
        Region::Tr1,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Region::Br1 => "br1",
            Region::Eun1 => "eun1",
            Region::Euw1 => "euw1",
            Region::Jp1 => "jp1",
            Region::Kr => "kr",
            Region::La1 => "la1",
            Region::La2 => "la2",
            Region::Na1 => "na1",
            Region::Oc1 => "oc1",
            Region::Ru => "ru",
            Region::Tr1 => "tr1",
        }
    }

    /// Membership test against the allow-list. Anything else must never reach a hostname.
    pub fn is_supported(code: &str) -> bool {
        Self::ALL.iter().any(|r| r.code() == code)
    }

    pub fn host(&self) -> String {
        format!("{}.api.riotgames.com", self.code())
    }
}

impl FromStr for Region {
    type Err = AppError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        if !Self::is_supported(code) {
            return Err(AppError::InvalidRegion(code.to_string()));
        }
        Self::ALL
            .into_iter()
            .find(|r| r.code() == code)
            .ok_or_else(|| AppError::InvalidRegion(code.to_string()))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_platform_code() {
        for region in Region::ALL {
            assert!(Region::is_supported(region.code()));
            assert_eq!(region.code().parse::<Region>().unwrap(), region);
        }
        assert_eq!(Region::Euw1.host(), "euw1.api.riotgames.com");
    }

    #[test]
    fn rejects_codes_outside_allow_list() {
        for code in ["", "NA1", "euw", "na1.evil.com/", "americas"] {
            assert!(!Region::is_supported(code));
            let err = code.parse::<Region>().unwrap_err();
            assert!(matches!(err, AppError::InvalidRegion(_)));
            assert_eq!(err.status(), 400);
        }
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unsupported region: {0}")]
    InvalidRegion(String),

    #[error("Unknown champion: {0}")]
    UnknownChampion(String),

    #[error("Upstream responded with status {0}")]
    UpstreamStatus(u16),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("Static data error: {0}")]
    StaticDataError(String),
}

impl AppError {
    /// Bare status reported to callers of the matchup query.
    pub fn status(&self) -> u16 {
        match self {
            AppError::InvalidRegion(_) | AppError::UnknownChampion(_) => 400,
            AppError::UpstreamStatus(code) => *code,
            AppError::HttpError(_) => 502,
            AppError::ConfigError(_) | AppError::JsonError(_) | AppError::StaticDataError(_) => 500,
        }
    }
}

/// Descriptions for the statuses the Riot API documents.
pub fn status_description(code: u16) -> Option<&'static str> {
    match code {
        400 => Some("Bad request"),
        401 => Some("Unauthorized"),
        403 => Some("Forbidden"),
        404 => Some("Data not found"),
        405 => Some("Method not allowed"),
        415 => Some("Unsupported media type"),
        429 => Some("Rate limit exceeded"),
        500 => Some("Internal server error"),
        502 => Some("Bad gateway"),
        503 => Some("Service unavailable"),
        504 => Some("Gateway timeout"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_is_passed_through() {
        assert_eq!(AppError::UpstreamStatus(403).status(), 403);
        assert_eq!(AppError::UpstreamStatus(418).status(), 418);
        assert_eq!(AppError::InvalidRegion("xx".into()).status(), 400);
        assert_eq!(AppError::HttpError("reset".into()).status(), 502);
    }

    #[test]
    fn unknown_status_has_no_description() {
        assert_eq!(status_description(429), Some("Rate limit exceeded"));
        assert_eq!(status_description(299), None);
        assert_eq!(
            AppError::UpstreamStatus(299).to_string(),
            "Upstream responded with status 299"
        );
    }
}

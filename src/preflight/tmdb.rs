//! TMDB API preflight check.

use super::CheckResult;
use crate::services::tmdb::TmdbClient;

/// Check that the TMDB token is accepted.
pub async fn check(client: &TmdbClient) -> CheckResult {
    match client.verify_api_key().await {
        Ok(true) => CheckResult::ok("TMDB API", "connected"),
        Ok(false) => CheckResult::fail(
            "TMDB API",
            "invalid token",
            "Check --token or the TMDB_TOKEN environment variable",
        ),
        Err(_) => CheckResult::fail(
            "TMDB API",
            "connection failed",
            "Check your network connection",
        ),
    }
}

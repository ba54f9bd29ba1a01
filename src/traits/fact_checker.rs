use async_trait::async_trait;

use crate::errors::CheckResult;
use crate::models::report::CheckReport;

/// Main facade for checking claims against news coverage
#[async_trait]
pub trait FactChecker: Send + Sync {
    /// Check a single claim.
    ///
    /// Only invalid input is returned as an error; missing evidence and
    /// unavailable backends still produce a report.
    async fn verify(&self, claim: &str) -> CheckResult<CheckReport>;

    /// Query string that would be sent to the article source for `claim`
    fn search_query(&self, claim: &str) -> String;
}

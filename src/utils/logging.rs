// Centralized logging for the authentication pipeline. Tokens are never logged.
use crate::profile::{CanonicalProfile, ProfileError};
use crate::strategy::{CredentialsMissing, StrategyOptions};
use log::{debug, info, warn};

pub struct LoggingHelper;

impl LoggingHelper {
    /// Log strategy construction
    pub fn log_strategy_configured(name: &str, options: &StrategyOptions) {
        info!(
            "🔧 {} strategy configured (profile_url: {}, pass_request_to_callback: {})",
            name, options.profile_url, options.pass_request_to_callback
        );
    }

    /// Log a request that lacks the required credentials
    pub fn log_credentials_missing(missing: &CredentialsMissing) {
        debug!("Authentication attempt rejected: {missing}");
    }

    /// Log the start of a profile fetch
    pub fn log_profile_fetch_start(account_id: &str, refresh_token_present: bool) {
        debug!(
            "🔄 Fetching Yahoo profile for account {account_id} (refresh_token={})",
            if refresh_token_present { "present" } else { "missing" }
        );
    }

    /// Log a normalized profile
    pub fn log_profile_fetched(profile: &CanonicalProfile) {
        debug!(
            "Fetched {} profile {} (display_name: {:?}, email present: {})",
            profile.provider,
            profile.id,
            profile.display_name,
            !profile.primary_email().is_empty()
        );
    }

    /// Log a failed profile fetch
    pub fn log_profile_fetch_failed(account_id: &str, error: &ProfileError) {
        if error.is_transport() {
            warn!("❌ Yahoo profile request failed for account {account_id}: {error}");
        } else {
            warn!("❌ Yahoo profile response for account {account_id} is malformed: {error}");
        }
    }

    /// Log the verifier's decision
    pub fn log_verification_result(account_id: &str, accepted: bool) {
        if accepted {
            info!("✅ Account {account_id} authenticated");
        } else {
            info!("Account {account_id} rejected by verifier");
        }
    }

    /// Log a verifier error
    pub fn log_verification_error(account_id: &str, error: &anyhow::Error) {
        warn!("Verifier failed for account {account_id}: {error:#}");
    }
}

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use log::info;
use reqwest::Client;
use serde_json::Value;

use crate::config::settings::LeetifySettings;
use crate::domain::SkillProfile;

/// Client for the public Leetify CS profile API. The tracker only reads
/// the per-player rating block (aim, positioning, utility, ...), which it
/// treats as an opaque numeric attribute map.
pub struct LeetifyClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl LeetifyClient {
    pub fn new(settings: &LeetifySettings, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.base_url.to_string(),
            api_key,
        })
    }

    /// Fetch the skill profile for one external profile id. A response
    /// without the expected rating block is a contract violation and is
    /// surfaced as an error, not defaulted.
    pub async fn fetch_profile(&self, profile_id: &str) -> Result<SkillProfile> {
        let url = format!("{}/v3/profile", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("id", profile_id)])
            .header("accept", "application/json")
            .header("_leetify_key", &self.api_key)
            .send()
            .await
            .with_context(|| format!("Failed to fetch skill profile {profile_id}"))?
            .error_for_status()
            .with_context(|| format!("Skill API rejected the request for {profile_id}"))?;

        let data: Value = response
            .json()
            .await
            .context("Failed to decode skill API response")?;

        let Some(rating) = data.get("rating") else {
            bail!("Invalid response structure: 'rating' key not found");
        };
        serde_json::from_value(rating.clone()).context("Invalid skill API rating payload")
    }

    /// Fetch profiles for every (canonical name, external id) pair. Any
    /// single failure aborts the whole lookup; there are no retries.
    pub async fn fetch_profiles(
        &self,
        ids: &HashMap<String, String>,
    ) -> Result<HashMap<String, SkillProfile>> {
        let mut profiles = HashMap::new();
        for (name, profile_id) in ids {
            info!("Fetching skill profile for {name}");
            let profile = self.fetch_profile(profile_id).await?;
            profiles.insert(name.clone(), profile);
        }
        Ok(profiles)
    }
}

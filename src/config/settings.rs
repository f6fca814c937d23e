pub struct RatingSettings {
    pub k_factor: f64,
    pub default_initial_elo: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            k_factor: 32.0,
            default_initial_elo: 1000.0,
        }
    }
}

pub struct BalanceSettings {
    pub team_size: usize,
    pub result_limit: usize,
    pub fallback_rating: f64,
}

impl Default for BalanceSettings {
    fn default() -> Self {
        Self {
            team_size: 5,
            result_limit: 5,
            fallback_rating: 1000.0,
        }
    }
}

pub struct LeetifySettings {
    pub base_url: &'static str,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub api_key_env: &'static str,
}

impl Default for LeetifySettings {
    fn default() -> Self {
        Self {
            base_url: "https://api-public.cs-prod.leetify.com",
            user_agent: "ScrimEloTracker/0.1",
            timeout_secs: 10,
            api_key_env: "LEETIFY_API_KEY",
        }
    }
}

pub struct DataSettings {
    pub data_dir: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
        }
    }
}

pub struct AppConfig {
    pub rating: RatingSettings,
    pub balance: BalanceSettings,
    pub leetify: LeetifySettings,
    pub data: DataSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            rating: RatingSettings::default(),
            balance: BalanceSettings::default(),
            leetify: LeetifySettings::default(),
            data: DataSettings::default(),
        }
    }
}

// Config is passed explicitly into each service (Dependency Injection)
// rather than read from globals inside the computation functions.

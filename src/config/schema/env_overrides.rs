use super::Config;

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Some(raw) = env_nonempty("EMBEDGATE_MAX_REDIRECTS")
            && let Ok(max) = raw.parse::<u8>()
        {
            self.validator.max_redirects = max;
        }

        if let Some(raw) = env_nonempty("EMBEDGATE_CONNECT_TIMEOUT_MS")
            && let Ok(ms) = raw.parse::<u64>()
        {
            self.validator.connect_timeout_ms = ms;
        }

        if let Some(raw) = env_nonempty("EMBEDGATE_READ_TIMEOUT_MS")
            && let Ok(ms) = raw.parse::<u64>()
        {
            self.validator.read_timeout_ms = ms;
        }

        if let Some(raw) = env_nonempty("EMBEDGATE_DNS_TIMEOUT_MS")
            && let Ok(ms) = raw.parse::<u64>()
        {
            self.validator.dns_timeout_ms = ms;
        }

        if let Some(domain) = env_nonempty("EMBEDGATE_CANONICAL_DOMAIN") {
            self.site.canonical_domain = domain;
        }

        if let Some(name) = env_nonempty("EMBEDGATE_COMMUNITY_NAME") {
            self.site.community_name = name;
        }
    }
}

//! Client identity (User-Agent) selection.

use rand::seq::SliceRandom;

/// Config value that selects per-request browser impersonation.
pub const IMPERSONATE: &str = "impersonate";

/// Real browser user agents rotated per request.
/// Current user agents from popular browsers (updated Nov 2024).
pub const IMPERSONATE_USER_AGENTS: &[&str] = &[
    // Chrome on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36",
    // Chrome on Mac
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    // Firefox on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:132.0) Gecko/20100101 Firefox/132.0",
    // Firefox on Mac
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
    // Safari on Mac
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.1 Safari/605.1.15",
    // Edge on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36 Edg/131.0.0.0",
];

/// Pick a browser user agent. Each call is an independent random draw.
pub fn random_user_agent() -> &'static str {
    IMPERSONATE_USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(IMPERSONATE_USER_AGENTS[0])
}

/// How the fetcher identifies itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IdentityPolicy {
    /// Fresh random browser user agent for every request.
    #[default]
    Rotate,
    /// Fixed user agent string.
    Fixed(String),
}

impl IdentityPolicy {
    /// Resolve the policy from a config value.
    /// - None or "impersonate" => rotate real browser user agents
    /// - other => custom user agent string
    pub fn from_config(value: Option<&str>) -> Self {
        match value {
            None | Some(IMPERSONATE) => IdentityPolicy::Rotate,
            Some(custom) => IdentityPolicy::Fixed(custom.to_string()),
        }
    }

    /// Identity to send with the next request.
    pub fn next_identity(&self) -> &str {
        match self {
            IdentityPolicy::Rotate => random_user_agent(),
            IdentityPolicy::Fixed(ua) => ua,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_default_rotates() {
        assert_eq!(IdentityPolicy::from_config(None), IdentityPolicy::Rotate);
        assert_eq!(
            IdentityPolicy::from_config(Some("impersonate")),
            IdentityPolicy::Rotate
        );
    }

    #[test]
    fn test_policy_custom() {
        let policy = IdentityPolicy::from_config(Some("MyBot/1.0"));
        assert_eq!(policy.next_identity(), "MyBot/1.0");
    }

    #[test]
    fn test_rotating_identity_is_from_pool() {
        let policy = IdentityPolicy::Rotate;
        for _ in 0..32 {
            let ua = policy.next_identity();
            assert!(IMPERSONATE_USER_AGENTS.contains(&ua));
            assert!(ua.contains("Mozilla"));
        }
    }
}

/// Fixed extension settings
///
/// The two recognized sites and the redirect target are compile-time
/// constants; there is no user-editable routing table.

/// Address marker for the eligibility portal
pub const ELIGIBILITY_SITE_MARKER: &str = "eligibility.carestackqa.com";

/// Address marker for the Cigna provider portal
pub const CIGNA_SITE_MARKER: &str = "cignaforhcp.cigna.com";

/// Login page opened when a capture runs on the eligibility portal
pub const CIGNA_LOGIN_URL: &str = "https://cignaforhcp.cigna.com/app/login?unifyAutofillApp=eyJhcHBJZCI6IjAxMDgzYjY0LTRiYmQtNDQzMC05ODBmLWQxOTc1M2U2YzU1NCJ9";

/// Script injected into a tab to run a capture
pub const CONTENT_SCRIPT_FILE: &str = "content.js";

const DEFAULT_LOG_LEVEL: log::Level = log::Level::Info;

/// Console log level, taken from `PAGE_CAPTURE_LOG` at build time
pub fn log_level() -> log::Level {
    parse_log_level(option_env!("PAGE_CAPTURE_LOG"))
}

fn parse_log_level(raw: Option<&str>) -> log::Level {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(DEFAULT_LOG_LEVEL)
}

pub fn logger_config() -> wasm_logger::Config {
    wasm_logger::Config::new(log_level())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level(Some("debug")), log::Level::Debug);
        assert_eq!(parse_log_level(Some(" WARN ")), log::Level::Warn);
        assert_eq!(parse_log_level(Some("chatty")), log::Level::Info);
        assert_eq!(parse_log_level(None), log::Level::Info);
    }

    #[test]
    fn test_login_url_targets_cigna_site() {
        assert!(CIGNA_LOGIN_URL.starts_with("https://"));
        assert!(CIGNA_LOGIN_URL.contains(CIGNA_SITE_MARKER));
        assert!(!CIGNA_LOGIN_URL.contains(ELIGIBILITY_SITE_MARKER));
    }
}

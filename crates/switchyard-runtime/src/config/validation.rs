//! Configuration validation utilities.

use switchyard_router::Condition;

use super::error::{ConfigError, ConfigResult};
use super::schema::{LoggingConfig, RouterConfig, SwitchyardConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &SwitchyardConfig) -> ConfigResult<()> {
    validate_logging_config(&config.logging)?;
    validate_router_config(&config.router)?;
    Ok(())
}

fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.filters.keys().any(|module| module.trim().is_empty()) {
        return Err(ConfigError::validation(
            "Log filter module names must not be empty",
        ));
    }
    Ok(())
}

fn validate_router_config(router: &RouterConfig) -> ConfigResult<()> {
    if router.name.trim().is_empty() {
        return Err(ConfigError::validation("Router name must not be empty"));
    }

    for (index, rule) in router.replies.iter().enumerate() {
        Condition::<()>::try_from(&rule.when)
            .map_err(|source| ConfigError::InvalidReply { index, source })?;

        if rule.reply.is_empty() {
            return Err(ConfigError::validation(format!(
                "Reply rule #{index} has an empty reply"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReplyRule;
    use serde_json::json;
    use switchyard_router::RouteError;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&SwitchyardConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_router_name_rejected() {
        let mut config = SwitchyardConfig::default();
        config.router.name = "  ".to_string();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_non_literal_reply_condition_rejected() {
        let mut config = SwitchyardConfig::default();
        config.router.replies = vec![
            ReplyRule::new("/ping", "pong"),
            ReplyRule {
                when: json!(7),
                reply: "seven".to_string(),
            },
        ];

        match validate_config(&config) {
            Err(ConfigError::InvalidReply { index, source }) => {
                assert_eq!(index, 1);
                assert_eq!(source, RouteError::InvalidConditionKind { found: "number" });
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_empty_reply_text_rejected() {
        let mut config = SwitchyardConfig::default();
        config.router.replies = vec![ReplyRule::new("/ping", "")];
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_blank_filter_module_rejected() {
        let mut config = SwitchyardConfig::default();
        config
            .logging
            .filters
            .insert(String::new(), crate::config::LogLevel::Debug);
        assert!(validate_config(&config).is_err());
    }
}

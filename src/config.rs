//! Bus API settings resolved from command-line arguments and the
//! environment (`.env` is loaded into the environment at startup).

use anyhow::{Result, bail};

pub const URL_VAR: &str = "BUS_API_URL";
pub const TOKEN_VAR: &str = "BUS_API_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusApiConfig {
    pub url: String,
    pub token: Option<String>,
}

impl BusApiConfig {
    /// Command-line values win over `BUS_API_URL` / `BUS_API_TOKEN`.
    pub fn resolve(url: Option<String>, token: Option<String>) -> Result<Self> {
        Self::resolve_with(url, token, |key| std::env::var(key).ok())
    }

    /// Like [`BusApiConfig::resolve`] with an explicit variable lookup.
    /// Empty values count as unset.
    pub fn resolve_with(
        url: Option<String>,
        token: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let pick = |arg: Option<String>, var: &str| {
            arg.filter(|v| !v.is_empty())
                .or_else(|| lookup(var).filter(|v| !v.is_empty()))
        };

        let Some(url) = pick(url, URL_VAR) else {
            bail!("bus API URL not provided: pass --url or set {URL_VAR} in .env");
        };
        let token = pick(token, TOKEN_VAR);

        Ok(Self { url, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_arguments_take_priority() {
        let cfg = BusApiConfig::resolve_with(
            Some("https://cli.example".into()),
            Some("cli-token".into()),
            env(&[(URL_VAR, "https://env.example"), (TOKEN_VAR, "env-token")]),
        )
        .unwrap();

        assert_eq!(cfg.url, "https://cli.example");
        assert_eq!(cfg.token.as_deref(), Some("cli-token"));
    }

    #[test]
    fn test_environment_fills_missing_arguments() {
        let cfg = BusApiConfig::resolve_with(
            None,
            Some(String::new()),
            env(&[(URL_VAR, "https://env.example"), (TOKEN_VAR, "env-token")]),
        )
        .unwrap();

        assert_eq!(cfg.url, "https://env.example");
        assert_eq!(cfg.token.as_deref(), Some("env-token"));
    }

    #[test]
    fn test_token_is_optional() {
        let cfg = BusApiConfig::resolve_with(Some("https://cli.example".into()), None, env(&[]))
            .unwrap();

        assert_eq!(cfg.token, None);
    }

    #[test]
    fn test_missing_url_is_an_error() {
        let err = BusApiConfig::resolve_with(None, None, env(&[(URL_VAR, "")])).unwrap_err();

        assert!(err.to_string().contains(URL_VAR));
    }
}

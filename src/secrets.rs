use tokio::process::Command;

use crate::config::Config;
use crate::youtube_rs::Credential;

pub const ACCESS_TOKEN_ENV: &str = "YOUTUBE_ACCESS_TOKEN";
pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error(
        "No YouTube credential configured. Set youtube.access_token / youtube.api_key, \
         the YOUTUBE_ACCESS_TOKEN / YOUTUBE_API_KEY environment variables, \
         or a 1Password reference in the [1password] section."
    )]
    MissingCredential,
    #[error("1Password CLI (op) not found in PATH. Install it and sign in to use secret references.")]
    OpNotFound,
    #[error("Failed to run 1Password CLI: {0}")]
    OpSpawn(#[from] std::io::Error),
    #[error("Failed to read secret {reference} from 1Password: {stderr}")]
    OpRead { reference: String, stderr: String },
    #[error("Secret {reference} from 1Password is empty")]
    Empty { reference: String },
}

/// Where a credential comes from, in lookup order.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CredentialSource {
    Literal(String),
    OnePassword(String),
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

type MakeCredential = fn(String) -> Credential;

/// Picks the first configured credential: access tokens win over API keys,
/// and for each kind a literal value wins over the environment, which wins
/// over a 1Password reference.
fn select_source<F>(config: &Config, env: F) -> Option<(CredentialSource, MakeCredential)>
where
    F: Fn(&str) -> Option<String>,
{
    let kinds: [(Option<&str>, &str, Option<&str>, MakeCredential); 2] = [
        (
            config.youtube.access_token.as_deref(),
            ACCESS_TOKEN_ENV,
            config.onepassword.youtube_access_token.as_deref(),
            Credential::AccessToken,
        ),
        (
            config.youtube.api_key.as_deref(),
            API_KEY_ENV,
            config.onepassword.youtube_api_key.as_deref(),
            Credential::ApiKey,
        ),
    ];

    kinds
        .into_iter()
        .find_map(|(literal, env_key, reference, make)| {
            non_empty(literal)
                .or_else(|| non_empty(env(env_key).as_deref()))
                .map(CredentialSource::Literal)
                .or_else(|| non_empty(reference).map(CredentialSource::OnePassword))
                .map(|source| (source, make))
        })
}

/// Read a secret using the 1Password CLI (`op read <reference>`).
pub async fn read_from_1password(reference: &str) -> Result<String, SecretError> {
    if which::which("op").is_err() {
        return Err(SecretError::OpNotFound);
    }

    let output = Command::new("op").arg("read").arg(reference).output().await?;

    if !output.status.success() {
        return Err(SecretError::OpRead {
            reference: reference.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let secret = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if secret.is_empty() {
        return Err(SecretError::Empty {
            reference: reference.to_string(),
        });
    }

    Ok(secret)
}

/// Resolve the credential used to talk to the catalog.
///
/// `env` looks up environment variables; pass `|k| std::env::var(k).ok()` in production.
pub async fn resolve_credential<F>(config: &Config, env: F) -> Result<Credential, SecretError>
where
    F: Fn(&str) -> Option<String>,
{
    let (source, make) = select_source(config, env).ok_or(SecretError::MissingCredential)?;

    let secret = match source {
        CredentialSource::Literal(value) => value,
        CredentialSource::OnePassword(reference) => {
            log::debug!("Reading credential from 1Password: {}", reference);
            read_from_1password(&reference).await?
        }
    };

    let credential = make(secret);
    log::debug!("Using YouTube {}", credential.kind());
    Ok(credential)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[tokio::test]
    async fn test_missing_credential() {
        let config = Config::default();
        let result = resolve_credential(&config, env_from(&[])).await;
        assert!(matches!(result, Err(SecretError::MissingCredential)));
    }

    #[tokio::test]
    async fn test_literal_access_token_wins() {
        let mut config = Config::default();
        config.youtube.access_token = Some("token".into());
        config.youtube.api_key = Some("key".into());

        let credential = resolve_credential(&config, env_from(&[(API_KEY_ENV, "env-key")]))
            .await
            .unwrap();
        assert!(matches!(credential, Credential::AccessToken(t) if t == "token"));
    }

    #[tokio::test]
    async fn test_env_access_token_beats_api_key() {
        let mut config = Config::default();
        config.youtube.api_key = Some("key".into());

        let credential =
            resolve_credential(&config, env_from(&[(ACCESS_TOKEN_ENV, " env-token\n")]))
                .await
                .unwrap();
        assert!(matches!(credential, Credential::AccessToken(t) if t == "env-token"));
    }

    #[tokio::test]
    async fn test_env_api_key() {
        let config = Config::default();
        let credential = resolve_credential(&config, env_from(&[(API_KEY_ENV, "env-key")]))
            .await
            .unwrap();
        assert!(matches!(credential, Credential::ApiKey(k) if k == "env-key"));
    }

    #[tokio::test]
    async fn test_blank_values_are_ignored() {
        let mut config = Config::default();
        config.youtube.access_token = Some("   ".into());
        config.youtube.api_key = Some("key".into());

        let credential = resolve_credential(&config, env_from(&[(ACCESS_TOKEN_ENV, "")]))
            .await
            .unwrap();
        assert!(matches!(credential, Credential::ApiKey(k) if k == "key"));
    }

    #[test]
    fn test_env_beats_1password_reference() {
        let mut config = Config::default();
        config.onepassword.youtube_api_key = Some("op://vault/youtube/key".into());

        let (source, _) = select_source(&config, env_from(&[(API_KEY_ENV, "env-key")])).unwrap();
        assert_eq!(source, CredentialSource::Literal("env-key".into()));
    }

    #[test]
    fn test_1password_access_token_beats_literal_api_key() {
        let mut config = Config::default();
        config.onepassword.youtube_access_token = Some("op://vault/youtube/token".into());
        config.youtube.api_key = Some("key".into());

        let (source, make) = select_source(&config, env_from(&[])).unwrap();
        assert_eq!(
            source,
            CredentialSource::OnePassword("op://vault/youtube/token".into())
        );
        assert!(matches!(make("x".into()), Credential::AccessToken(_)));
    }
}

//! REST client for Discord-style command registries.

use super::{CommandRegistryClient, Scope};
use crate::config::RegistryConfig;
use crate::error::RegistryError;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use slashsync_proto::{ApplicationId, CommandPayload, RemoteCommand};
use std::time::Duration;
use tracing::{debug, info};

const USER_AGENT: &str = concat!("slashsync/", env!("CARGO_PKG_VERSION"));

/// Command registry reached over HTTP.
pub struct HttpRegistryClient {
    api_base: String,
    application_id: ApplicationId,
    http_client: reqwest::Client,
}

impl HttpRegistryClient {
    /// Create a client authenticating with `token`.
    pub fn new(
        api_base: impl Into<String>,
        application_id: ApplicationId,
        token: &str,
        timeout: Duration,
    ) -> Result<Self, RegistryError> {
        let mut auth = HeaderValue::from_str(&format!("Bot {token}"))
            .map_err(|_| RegistryError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        let api_base = api_base.into().trim_end_matches('/').to_string();
        info!(api_base = %api_base, application_id = %application_id, "Registry client initialized");

        Ok(Self {
            api_base,
            application_id,
            http_client,
        })
    }

    /// Create a client from config, reading the token from the configured
    /// environment variable.
    pub fn from_config(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let token = std::env::var(&config.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| RegistryError::MissingToken(config.token_env.clone()))?;
        Self::new(
            config.api_base.clone(),
            config.application_id,
            token.trim(),
            config.request_timeout(),
        )
    }

    /// Collection URL of `scope`.
    fn commands_url(&self, scope: Scope) -> String {
        commands_url(&self.api_base, self.application_id, scope)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, RegistryError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(RegistryError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

fn commands_url(api_base: &str, application_id: ApplicationId, scope: Scope) -> String {
    match scope {
        Scope::Global => format!("{api_base}/applications/{application_id}/commands"),
        Scope::Guild(guild) => {
            format!("{api_base}/applications/{application_id}/guilds/{guild}/commands")
        }
    }
}

#[async_trait]
impl CommandRegistryClient for HttpRegistryClient {
    async fn list_commands(&self, scope: Scope) -> Result<Vec<RemoteCommand>, RegistryError> {
        let url = self.commands_url(scope);
        debug!(url = %url, "Listing commands");
        let response = self.http_client.get(&url).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn create_command(
        &self,
        scope: Scope,
        payload: &CommandPayload,
    ) -> Result<RemoteCommand, RegistryError> {
        payload.validate()?;
        let url = self.commands_url(scope);
        debug!(url = %url, command = %payload.name, "Creating command");
        let response = self.http_client.post(&url).json(payload).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete_command(&self, scope: Scope, command: &RemoteCommand) -> Result<(), RegistryError> {
        let url = format!("{}/{}", self.commands_url(scope), command.id);
        debug!(url = %url, command = %command.name, "Deleting command");
        let response = self.http_client.delete(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(command.name.clone()));
        }
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slashsync_proto::GuildId;

    #[test]
    fn test_global_url() {
        assert_eq!(
            commands_url("https://discord.com/api/v10", ApplicationId::new(11), Scope::Global),
            "https://discord.com/api/v10/applications/11/commands"
        );
    }

    #[test]
    fn test_guild_url() {
        assert_eq!(
            commands_url(
                "https://discord.com/api/v10",
                ApplicationId::new(11),
                Scope::Guild(GuildId::new(22))
            ),
            "https://discord.com/api/v10/applications/11/guilds/22/commands"
        );
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = HttpRegistryClient::new(
            "http://localhost:8080/api/",
            ApplicationId::new(1),
            "token",
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(
            client.commands_url(Scope::Global),
            "http://localhost:8080/api/applications/1/commands"
        );
    }

    #[test]
    fn test_missing_token_env() {
        let config: RegistryConfig = toml::from_str(
            r#"
application_id = "1"
token_env = "SLASHSYNC_TEST_TOKEN_THAT_IS_NEVER_SET"
"#,
        )
        .unwrap();
        assert!(matches!(
            HttpRegistryClient::from_config(&config),
            Err(RegistryError::MissingToken(name)) if name == "SLASHSYNC_TEST_TOKEN_THAT_IS_NEVER_SET"
        ));
    }
}

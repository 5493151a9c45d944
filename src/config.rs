use anyhow::Context;
use secrecy::Secret;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub application_host: String,
    pub application_port: u16,
    pub database_url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
    pub email_client_base_url: String,
    pub email_client_sender_email: String,
    #[serde(default = "default_email_timeout")]
    pub email_client_timeout_millis: u64,
    pub sendgrid_api_key: Secret<String>,
}

fn default_max_connections() -> u32 {
    10
}

fn default_email_timeout() -> u64 {
    10_000
}

impl Config {
    /// Reads the config from the process environment, layering a `.env` file
    /// underneath when one exists in the working directory.
    pub fn new() -> anyhow::Result<Config> {
        // variables already set in the environment win over the .env file
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().context("Failed to read the config from env")
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.application_host, self.application_port)
    }
}

use anyhow::{Context, Result};
use reqwest::{blocking::Client, redirect::Policy};

use crate::config::Settings;

/// Build the blocking HTTP client shared by the network-backed services.
pub(crate) fn http_client(settings: &Settings) -> Result<Client> {
    let mut builder = Client::builder()
        .user_agent(settings.user_agent.as_str())
        .redirect(Policy::limited(10));
    if let Some(timeout) = settings.http_timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().context("build HTTP client")
}

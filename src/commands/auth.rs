use anyhow::{Context, Result};
use appointer_core::calendar::ProviderCalendar;
use appointer_core::config::AppointerConfig;

pub async fn run(provider_name: &str) -> Result<()> {
    println!("Authenticating with {provider_name}...");

    // Provider handles the full OAuth flow and stores credentials/tokens
    let account = ProviderCalendar::authenticate(provider_name)
        .await
        .with_context(|| format!("Authentication with {provider_name} failed"))?;

    println!("Authenticated as: {account}\n");

    let config_path = AppointerConfig::config_path()?;
    println!("Book into this account by setting in {}:\n", config_path.display());
    println!("provider = \"{provider_name}\"");
    println!("account = \"{account}\"");

    Ok(())
}

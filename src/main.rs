use anyhow::Context;
use user_flows::configuration::get_configuration;
use user_flows::flows;
use user_flows::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("user-flows".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().expect("Failed to read configuration.");
    let browser = configuration
        .harness
        .browser()
        .context("Failed to build the browser client")?;

    tracing::info!(base_url = %browser.base_url(), "running user flows");

    let mut failures = 0;

    // Registration first, so the login flow has an account to come back to
    // on a fresh deployment.
    match flows::register(
        &browser,
        &configuration.flows.username,
        &configuration.flows.email,
    )
    .await
    {
        Ok(page) => tracing::info!(url = %page.url(), "registration flow passed"),
        Err(e) => {
            failures += 1;
            tracing::error!(error = ?e, "registration flow failed");
        }
    }

    match flows::log_in(&browser, &configuration.flows.username).await {
        Ok(page) => tracing::info!(url = %page.url(), "login flow passed"),
        Err(e) => {
            failures += 1;
            tracing::error!(error = ?e, "login flow failed");
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} flow(s) failed");
    }
    Ok(())
}

use anyhow::Result;
use owo_colors::OwoColorize;

pub async fn run() -> Result<()> {
    println!("Authenticating with Google...");

    // The provider runs the browser flow and stores the session itself
    let account = timetable_provider_google::authenticate().await?;

    println!("Authenticated as: {}\n", account.green());
    println!("Set `google_account = \"{account}\"` in your config, then run `timetable-sync run`.");

    Ok(())
}

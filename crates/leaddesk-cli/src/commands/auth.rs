//! Login, logout and local settings.

use anyhow::{bail, Context, Result};
use tracing::warn;

use leaddesk_core::models::LoginCredentials;
use leaddesk_core::{Config, RouteName};

use crate::app::App;
use crate::cli::ConfigArgs;
use crate::render::{self, details, yes_no};

const USERNAME_ENV: &str = "LEADDESK_USERNAME";
const PASSWORD_ENV: &str = "LEADDESK_PASSWORD";

pub async fn login(app: &App, username: Option<String>) -> Result<()> {
    let landing = app.router.navigate(RouteName::Login.path(), &app.session.snapshot());
    if landing.name() != RouteName::Login {
        println!(
            "Already logged in as {}. Run `leaddesk logout` to switch accounts.",
            app.session.display_name()
        );
        return Ok(());
    }

    let username = match username.or_else(|| std::env::var(USERNAME_ENV).ok()) {
        Some(name) => name,
        None => prompt_username(app.config.last_username.as_deref())?,
    };
    let username = username.trim().to_string();
    if username.is_empty() {
        bail!("Username is required");
    }

    let password = match std::env::var(PASSWORD_ENV) {
        Ok(password) => password,
        Err(_) => rpassword::prompt_password("Password: ").context("Failed to read password")?,
    };
    if password.is_empty() {
        bail!("Password is required");
    }

    let credentials = LoginCredentials::new(&username, password);
    let profile = match app.session.login(&app.api, &credentials).await {
        Ok(profile) => profile,
        Err(e) => bail!("{}", e.user_message()),
    };

    if app.config.last_username.as_deref() != Some(username.as_str()) {
        let mut config = app.config.clone();
        config.last_username = Some(username);
        if let Err(e) = config.save() {
            warn!(error = %e, "Failed to remember username");
        }
    }

    if app.json {
        return render::print_json(&profile);
    }
    println!("Logged in as {} ({})", profile.full_name, profile.role);
    Ok(())
}

fn prompt_username(last: Option<&str>) -> Result<String> {
    use std::io::{self, BufRead, Write};

    match last {
        Some(last) => print!("Username [{}]: ", last),
        None => print!("Username: "),
    }
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let line = line.trim();

    Ok(match (line.is_empty(), last) {
        (true, Some(last)) => last.to_string(),
        _ => line.to_string(),
    })
}

pub fn logout(app: &App) -> Result<()> {
    let was_logged_in = app.session.is_logged_in();
    app.session.logout();
    if was_logged_in {
        println!("Logged out.");
    } else {
        println!("No active session.");
    }
    Ok(())
}

pub fn whoami(app: &App) -> Result<()> {
    app.enter(RouteName::Dashboard.path())?;
    let Some(profile) = app.session.user() else {
        bail!("Not logged in. Run `leaddesk login` first.");
    };

    if app.json {
        return render::print_json(&profile);
    }

    let mut pairs = vec![
        ("User", app.session.display_name()),
        ("Username", profile.username.clone()),
        ("Role", profile.role.to_string()),
        ("Active", yes_no(profile.is_active).to_string()),
    ];
    if !profile.projects.is_empty() {
        pairs.push(("Projects", profile.project_names()));
    }
    print!("{}", details(&pairs));
    Ok(())
}

pub fn config(app: &App, args: ConfigArgs) -> Result<()> {
    let mut config = app.config.clone();
    let mut changed = false;

    if let Some(url) = args.set_api_url {
        config.api_url = Some(url.trim().trim_end_matches('/').to_string()).filter(|u| !u.is_empty());
        changed = true;
    }
    if let Some(storage) = args.set_storage {
        config.storage = storage;
        changed = true;
    }
    if let Some(secs) = args.set_timeout {
        config.request_timeout_secs = Some(secs);
        changed = true;
    }

    if changed {
        config.save().context("Failed to save configuration")?;
    }

    if app.json {
        return render::print_json(&config);
    }

    let path = Config::config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "(unavailable)".to_string());
    print!(
        "{}",
        details(&[
            ("Config file", path),
            ("API URL", config.base_url()),
            ("Storage", format!("{:?}", config.storage).to_lowercase()),
            ("Timeout", format!("{}s", config.request_timeout().as_secs())),
            (
                "Last username",
                config.last_username.clone().unwrap_or_else(|| "-".to_string())
            ),
        ])
    );
    Ok(())
}

//! Project, bot and manager administration.

use anyhow::{bail, Context, Result};

use leaddesk_core::models::{
    BotCreate, BotResponse, BotUpdate, ManagerCreate, ManagerProfile, ManagerUpdate, ProjectCreate,
};
use leaddesk_core::utils::{format_optional, format_timestamp};
use leaddesk_core::RouteName;

use crate::app::App;
use crate::cli::{BotsCommand, ManagersCommand, ProjectsCommand};
use crate::render::{self, details, yes_no, Table};

fn project_path(id: i64) -> String {
    format!("/projects/{}", id)
}

pub async fn projects(app: &App, command: ProjectsCommand) -> Result<()> {
    match command {
        ProjectsCommand::List => {
            app.enter(RouteName::Projects.path())?;
            let projects = app.api.projects().await?;
            if app.json {
                return render::print_json(&projects);
            }
            let mut table = Table::new(&["ID", "NAME", "CREATED"]);
            for project in &projects {
                table.row([
                    project.id.to_string(),
                    project.name.clone(),
                    format_timestamp(&project.created_at),
                ]);
            }
            table.print("No projects.");
        }
        ProjectsCommand::Show { id } => {
            app.enter(&project_path(id))?;
            let (project, bots) =
                futures::try_join!(app.api.project(id), app.api.project_bots(id))?;
            if app.json {
                return render::print_json(&serde_json::json!({
                    "project": project,
                    "bots": bots,
                }));
            }

            print!(
                "{}",
                details(&[
                    ("Project", format!("#{} {}", project.id, project.name)),
                    ("Created", format_timestamp(&project.created_at)),
                ])
            );

            println!("\nManagers:");
            let mut managers = Table::new(&["ID", "USERNAME", "NAME"]);
            for manager in &project.managers {
                managers.row([
                    manager.id.to_string(),
                    manager.username.clone(),
                    manager.full_name.clone(),
                ]);
            }
            managers.print("No managers assigned.");

            println!("\nBots:");
            bot_table(&bots).print("No bots.");
        }
        ProjectsCommand::Create { name } => {
            app.enter(RouteName::Projects.path())?;
            let name = required(name, "Project name")?;
            let project = app.api.create_project(&ProjectCreate { name }).await?;
            if app.json {
                return render::print_json(&project);
            }
            println!("Created project #{} {}.", project.id, project.name);
        }
        ProjectsCommand::Rename { id, name } => {
            app.enter(&project_path(id))?;
            let name = required(name, "Project name")?;
            let project = app.api.update_project(id, &ProjectCreate { name }).await?;
            println!("Project #{} renamed to {}.", project.id, project.name);
        }
        ProjectsCommand::Delete { id } => {
            app.enter(&project_path(id))?;
            app.api.delete_project(id).await?;
            println!("Project {} deleted.", id);
        }
        ProjectsCommand::AddManagers { id, manager_ids } => {
            app.enter(&project_path(id))?;
            app.api.add_project_managers(id, &manager_ids).await?;
            println!("Assigned {} manager(s) to project {}.", manager_ids.len(), id);
        }
        ProjectsCommand::RemoveManager { id, manager_id } => {
            app.enter(&project_path(id))?;
            app.api.remove_project_manager(id, manager_id).await?;
            println!("Manager {} removed from project {}.", manager_id, id);
        }
    }
    Ok(())
}

pub async fn bots(app: &App, command: BotsCommand) -> Result<()> {
    match command {
        BotsCommand::List { project_id } => {
            app.enter(&project_path(project_id))?;
            let bots = app.api.project_bots(project_id).await?;
            if app.json {
                return render::print_json(&bots);
            }
            bot_table(&bots).print("No bots.");
        }
        BotsCommand::Create {
            project_id,
            identifier,
            name,
            token,
            auto_reply,
        } => {
            app.enter(&project_path(project_id))?;
            let data = BotCreate {
                identifier: required(identifier, "Identifier")?,
                name: required(name, "Name")?,
                token: required(token, "Token")?,
                auto_reply,
            };
            let bot = app.api.create_bot(project_id, &data).await?;
            if app.json {
                return render::print_json(&bot);
            }
            println!("Created bot #{} {}.", bot.id, bot.name);
            if let Some(url) = &bot.webhook_url {
                println!("Webhook: {}", url);
            }
        }
        BotsCommand::Update {
            project_id,
            bot_id,
            identifier,
            name,
            token,
            auto_reply,
            active,
        } => {
            app.enter(&project_path(project_id))?;
            let data = BotUpdate {
                identifier,
                name,
                token,
                auto_reply,
                is_active: active,
            };
            let bot = app.api.update_bot(project_id, bot_id, &data).await?;
            if app.json {
                return render::print_json(&bot);
            }
            println!("Bot #{} updated.", bot.id);
        }
        BotsCommand::Delete { project_id, bot_id } => {
            app.enter(&project_path(project_id))?;
            app.api.delete_bot(project_id, bot_id).await?;
            println!("Bot {} deleted.", bot_id);
        }
    }
    Ok(())
}

pub async fn managers(app: &App, command: ManagersCommand) -> Result<()> {
    app.enter(RouteName::AdminManagers.path())?;

    match command {
        ManagersCommand::List => {
            let managers = app.api.managers().await?;
            if app.json {
                return render::print_json(&managers);
            }
            manager_table(&managers).print("No managers.");
        }
        ManagersCommand::Create {
            username,
            full_name,
            password,
        } => {
            let password = match password {
                Some(password) => password,
                None => rpassword::prompt_password("Password for the new manager: ")
                    .context("Failed to read password")?,
            };
            let data = ManagerCreate {
                username: required(username, "Username")?,
                password: required(password, "Password")?,
                full_name: required(full_name, "Full name")?,
            };
            let manager = app.api.create_manager(&data).await?;
            if app.json {
                return render::print_json(&manager);
            }
            println!("Created manager #{} {}.", manager.id, manager.username);
        }
        ManagersCommand::Update {
            id,
            full_name,
            password,
            active,
        } => {
            let data = ManagerUpdate {
                password,
                full_name,
                is_active: active,
            };
            if data.is_empty() {
                bail!("Nothing to update");
            }
            let manager = app.api.update_manager(id, &data).await?;
            if app.json {
                return render::print_json(&manager);
            }
            println!("Manager #{} updated.", manager.id);
        }
        ManagersCommand::Delete { id } => {
            app.api.delete_manager(id).await?;
            println!("Manager {} deleted.", id);
        }
    }
    Ok(())
}

fn required(value: String, field: &str) -> Result<String> {
    let value = value.trim().to_string();
    if value.is_empty() {
        bail!("{} must not be empty", field);
    }
    Ok(value)
}

fn bot_table(bots: &[BotResponse]) -> Table {
    let mut table = Table::new(&["ID", "IDENTIFIER", "NAME", "TOKEN", "ACTIVE", "WEBHOOK"]);
    for bot in bots {
        table.row([
            bot.id.to_string(),
            bot.identifier.clone(),
            bot.name.clone(),
            bot.masked_token(),
            yes_no(bot.is_active).to_string(),
            format_optional(&bot.webhook_url, "-"),
        ]);
    }
    table
}

fn manager_table(managers: &[ManagerProfile]) -> Table {
    let mut table = Table::new(&["ID", "USERNAME", "NAME", "ROLE", "ACTIVE", "PROJECTS"]);
    for manager in managers {
        table.row([
            manager.id.to_string(),
            manager.username.clone(),
            manager.full_name.clone(),
            manager.role.to_string(),
            yes_no(manager.is_active).to_string(),
            manager.project_names(),
        ]);
    }
    table
}

//! Lead list and conversation commands.

use anyhow::{bail, Result};
use serde::Serialize;

use leaddesk_core::models::{LeadResponse, LeadState, MessageResponse, MessageSender};
use leaddesk_core::utils::{format_optional, format_timestamp};

use crate::app::App;
use crate::cli::LeadsCommand;
use crate::render::{self, details, Table};

pub async fn run(app: &App, command: LeadsCommand) -> Result<()> {
    match command {
        LeadsCommand::List { status } => {
            app.enter("/leads")?;
            let leads = app.api.leads(status).await?;
            if app.json {
                return render::print_json(&leads);
            }
            lead_table(&leads).print("No leads.");
        }
        LeadsCommand::Show { id } => show(app, id).await?,
        LeadsCommand::Close { id } => {
            app.enter(&lead_path(id))?;
            app.api.close_lead(id).await?;
            println!("Lead {} closed.", id);
        }
        LeadsCommand::Read { id } => {
            app.enter(&lead_path(id))?;
            app.api.mark_lead_read(id).await?;
            println!("Lead {} marked as read.", id);
        }
        LeadsCommand::Send { id, text } => {
            app.enter(&lead_path(id))?;
            let text = text.join(" ");
            if text.trim().is_empty() {
                bail!("Message text is empty");
            }
            app.api.send_message(id, &text).await?;
            println!("Message sent to lead {}.", id);
        }
    }
    Ok(())
}

fn lead_path(id: i64) -> String {
    format!("/leads/{}", id)
}

#[derive(Serialize)]
struct LeadConversation {
    lead: LeadResponse,
    messages: Vec<MessageResponse>,
}

async fn show(app: &App, id: i64) -> Result<()> {
    app.enter(&lead_path(id))?;

    let (mut lead, messages) = futures::try_join!(app.api.lead(id), app.api.messages(id))?;

    // Opening a new lead counts as reading it.
    if lead.status == LeadState::New {
        app.api.mark_lead_read(id).await?;
        lead = app.api.lead(id).await?;
    }

    if app.json {
        return render::print_json(&LeadConversation { lead, messages });
    }

    print!(
        "{}",
        details(&[
            ("Lead", format!("#{} {}", lead.id, lead.contact_name())),
            (
                "Username",
                format_optional(&lead.telegram_username.as_ref().map(|u| format!("@{}", u)), "-")
            ),
            ("Project", lead.project_name.clone()),
            ("Status", lead.status.display_name().to_string()),
            ("Created", format_timestamp(&lead.created_at)),
            ("Updated", format_timestamp(&lead.last_updated_at)),
        ])
    );
    println!();

    if messages.is_empty() {
        println!("No messages yet.");
    }
    for message in &messages {
        println!("{}", conversation_line(&lead, message));
    }
    Ok(())
}

fn lead_table(leads: &[LeadResponse]) -> Table {
    let mut table = Table::new(&["ID", "CONTACT", "PROJECT", "STATUS", "UPDATED"]);
    for lead in leads {
        table.row([
            lead.id.to_string(),
            lead.contact_name(),
            lead.project_name.clone(),
            lead.status.display_name().to_string(),
            format_timestamp(&lead.last_updated_at),
        ]);
    }
    table
}

fn conversation_line(lead: &LeadResponse, message: &MessageResponse) -> String {
    let author = match message.sender {
        MessageSender::Manager => "You".to_string(),
        MessageSender::Lead => lead.contact_name(),
    };
    format!(
        "[{}] {}: {}",
        format_timestamp(&message.created_at),
        author,
        message.text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead() -> LeadResponse {
        serde_json::from_value(serde_json::json!({
            "id": 9, "telegram_chat_id": 100, "telegram_username": "olga",
            "telegram_first_name": "Olga", "telegram_last_name": null,
            "bot_id": 1, "project_id": 2, "project_name": "Shop",
            "assigned_manager_id": 3, "status": "in_progress",
            "created_at": "2024-05-01T10:00:00", "last_updated_at": "2024-05-02T11:30:00"
        }))
        .expect("valid lead")
    }

    #[test]
    fn test_lead_table_row() {
        let out = lead_table(&[lead()]).render();
        let row = out.lines().nth(2).unwrap_or_default();
        assert!(row.starts_with("9"));
        assert!(row.contains("Olga"));
        assert!(row.contains("Shop"));
        assert!(row.contains("May 02, 2024 11:30"));
    }

    #[test]
    fn test_conversation_line_names_author() {
        let lead = lead();
        let incoming = MessageResponse {
            id: 1,
            sender: MessageSender::Lead,
            text: "Hi".to_string(),
            created_at: "2024-05-01T10:05:00".to_string(),
        };
        let outgoing = MessageResponse {
            sender: MessageSender::Manager,
            text: "Hello!".to_string(),
            ..incoming.clone()
        };

        assert_eq!(conversation_line(&lead, &incoming), "[May 01, 2024 10:05] Olga: Hi");
        assert_eq!(conversation_line(&lead, &outgoing), "[May 01, 2024 10:05] You: Hello!");
    }
}

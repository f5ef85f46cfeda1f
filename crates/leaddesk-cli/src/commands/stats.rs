//! Dashboard and statistics.

use anyhow::Result;
use serde::Serialize;

use leaddesk_core::models::{
    DailyManagerStatsParams, DailyStats, Last24HoursStats, ManagerStats, ManagerStats24h,
    OverviewStats,
};
use leaddesk_core::RouteName;

use crate::app::App;
use crate::cli::StatsCommand;
use crate::render::{self, details, Table};

#[derive(Serialize)]
struct Dashboard {
    overview: OverviewStats,
    daily: Vec<DailyStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_24h: Option<Last24HoursStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_24h_managers: Option<Vec<ManagerStats24h>>,
}

pub async fn dashboard(app: &App, days: u32) -> Result<()> {
    app.enter(RouteName::Dashboard.path())?;

    let (overview, daily) =
        futures::try_join!(app.api.overview_stats(), app.api.daily_stats(days))?;

    let (last_24h, last_24h_managers) = if app.session.is_admin() {
        let (totals, per_manager) = futures::try_join!(
            app.api.last_24h_stats(),
            app.api.last_24h_manager_stats()
        )?;
        (Some(totals), Some(per_manager))
    } else {
        (None, None)
    };

    let dashboard = Dashboard {
        overview,
        daily,
        last_24h,
        last_24h_managers,
    };
    if app.json {
        return render::print_json(&dashboard);
    }

    println!("Welcome, {}\n", app.session.display_name());
    print!("{}", overview_details(&dashboard.overview));

    if let Some(totals) = &dashboard.last_24h {
        println!("\nLast 24 hours:");
        print!("{}", last_24h_details(totals));
    }
    if let Some(per_manager) = &dashboard.last_24h_managers {
        println!();
        last_24h_manager_table(per_manager).print("No manager activity in the last 24 hours.");
    }

    println!("\nLast {} days:", days);
    daily_table(&dashboard.daily).print("No activity.");
    Ok(())
}

pub async fn run(app: &App, command: StatsCommand) -> Result<()> {
    app.enter(RouteName::Dashboard.path())?;

    match command {
        StatsCommand::Overview => {
            let overview = app.api.overview_stats().await?;
            if app.json {
                return render::print_json(&overview);
            }
            print!("{}", overview_details(&overview));
        }
        StatsCommand::Managers => {
            let stats = app.api.all_manager_stats().await?;
            if app.json {
                return render::print_json(&stats);
            }
            manager_table(&stats).print("No managers.");
        }
        StatsCommand::Manager { id } => {
            let stats = app.api.manager_stats(id).await?;
            if app.json {
                return render::print_json(&stats);
            }
            manager_table(std::slice::from_ref(&stats)).print("No data.");
        }
        StatsCommand::Last24h => {
            let totals = app.api.last_24h_stats().await?;
            if app.json {
                return render::print_json(&totals);
            }
            print!("{}", last_24h_details(&totals));
        }
        StatsCommand::Last24hManagers => {
            let stats = app.api.last_24h_manager_stats().await?;
            if app.json {
                return render::print_json(&stats);
            }
            last_24h_manager_table(&stats).print("No manager activity in the last 24 hours.");
        }
        StatsCommand::Daily { days } => {
            let daily = app.api.daily_stats(days).await?;
            if app.json {
                return render::print_json(&daily);
            }
            daily_table(&daily).print("No activity.");
        }
        StatsCommand::DailyManagers {
            days,
            start_date,
            end_date,
            manager_id,
        } => {
            let params = DailyManagerStatsParams {
                days,
                start_date,
                end_date,
                manager_id,
            };
            let stats = app.api.daily_manager_stats(&params).await?;
            if app.json {
                return render::print_json(&stats);
            }
            let mut table = Table::new(&["DATE", "MANAGER", "NEW", "CLOSED", "MESSAGES"]);
            for row in &stats {
                table.row([
                    row.date.to_string(),
                    row.manager_name.clone(),
                    row.new_leads.to_string(),
                    row.closed_leads.to_string(),
                    row.messages_count.to_string(),
                ]);
            }
            table.print("No activity.");
        }
    }
    Ok(())
}

fn overview_details(stats: &OverviewStats) -> String {
    details(&[
        ("Total leads", stats.total_leads.to_string()),
        ("Active leads", stats.active_leads.to_string()),
        ("Closed leads", stats.closed_leads.to_string()),
        ("Messages", stats.total_messages.to_string()),
        ("Managers", stats.managers_count.to_string()),
    ])
}

fn last_24h_details(stats: &Last24HoursStats) -> String {
    details(&[
        ("New leads", stats.new_leads.to_string()),
        ("Closed leads", stats.closed_leads.to_string()),
        ("Messages", stats.messages_count.to_string()),
        ("Active chats", stats.active_conversations.to_string()),
    ])
}

fn daily_table(daily: &[DailyStats]) -> Table {
    let mut table = Table::new(&["DATE", "NEW", "CLOSED", "MESSAGES"]);
    for day in daily {
        table.row([
            day.date.format("%b %d").to_string(),
            day.new_leads.to_string(),
            day.closed_leads.to_string(),
            day.messages_count.to_string(),
        ]);
    }
    table
}

fn manager_table(stats: &[ManagerStats]) -> Table {
    let mut table = Table::new(&["ID", "MANAGER", "TOTAL", "ACTIVE", "CLOSED", "MESSAGES"]);
    for row in stats {
        table.row([
            row.manager_id.to_string(),
            row.manager_name.clone(),
            row.total_leads.to_string(),
            row.active_leads.to_string(),
            row.closed_leads.to_string(),
            row.total_messages.to_string(),
        ]);
    }
    table
}

fn last_24h_manager_table(stats: &[ManagerStats24h]) -> Table {
    let mut table = Table::new(&["ID", "MANAGER", "NEW", "CLOSED", "MESSAGES"]);
    for row in stats {
        table.row([
            row.manager_id.to_string(),
            row.manager_name.clone(),
            row.new_leads.to_string(),
            row.closed_leads.to_string(),
            row.messages_count.to_string(),
        ]);
    }
    table
}

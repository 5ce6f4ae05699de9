use clap::Args;
use serde::Serialize;
use zenflow_core::{Config, QuotableClient, Quote, QuoteSource, Theme};

use super::{open_workspace, runtime, CmdResult};

#[derive(Args)]
pub struct DashboardArgs {
    /// Use the local quote list instead of the network
    #[arg(long)]
    pub offline: bool,
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Summary<'a> {
    greeting: &'a str,
    date: String,
    time: String,
    theme: Theme,
    focus: &'a str,
    sessions: u64,
    active_tasks: usize,
    total_tasks: usize,
    notes: usize,
    quote: Quote,
}

pub fn run(args: DashboardArgs) -> CmdResult {
    let config = Config::load_or_default();
    let ws = open_workspace(&config)?;

    let client = QuotableClient::from_config(&config.quotes)
        .offline(args.offline || config.quotes.offline);
    let quote = runtime()?.block_on(client.fetch());

    let clock = ws.clock();
    let summary = Summary {
        greeting: clock.greeting(),
        date: clock.date_line(),
        time: clock.time_line(),
        theme: ws.theme(),
        focus: ws.focus_text(),
        sessions: ws.sessions(),
        active_tasks: ws.tasks().active_count(),
        total_tasks: ws.tasks().len(),
        notes: ws.notes().len(),
        quote,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", summary.greeting);
    println!("{}  {}", summary.date, summary.time);
    println!();
    if summary.focus.is_empty() {
        println!("Focus: (not set)");
    } else {
        println!("Focus: {}", summary.focus);
    }
    println!("Sessions: {}", summary.sessions);
    println!(
        "Tasks: {} active of {}",
        summary.active_tasks, summary.total_tasks
    );
    println!("Notes: {}", summary.notes);
    println!("Theme: {}", summary.theme);
    println!();
    println!("{}", summary.quote);
    Ok(())
}

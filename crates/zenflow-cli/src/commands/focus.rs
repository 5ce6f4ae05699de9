use clap::Subcommand;
use zenflow_core::Config;

use super::{open_workspace, CmdResult};

#[derive(Subcommand)]
pub enum FocusAction {
    /// Print today's focus
    Get,
    /// Set today's focus
    Set { text: String },
}

pub fn run(action: FocusAction) -> CmdResult {
    let config = Config::load_or_default();
    let mut ws = open_workspace(&config)?;

    match action {
        FocusAction::Get => println!("{}", ws.focus_text()),
        FocusAction::Set { text } => {
            ws.set_focus(&text);
            println!("ok");
        }
    }
    Ok(())
}

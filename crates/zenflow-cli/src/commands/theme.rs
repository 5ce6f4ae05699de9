use clap::Subcommand;
use zenflow_core::{Config, Theme};

use super::{open_workspace, CmdResult};

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Get,
    /// Switch theme: light, dark or zen
    Set { theme: Theme },
}

pub fn run(action: ThemeAction) -> CmdResult {
    let config = Config::load_or_default();
    let mut ws = open_workspace(&config)?;

    match action {
        ThemeAction::Get => println!("{}", ws.theme()),
        ThemeAction::Set { theme } => {
            ws.set_theme(theme);
            println!("theme: {theme}");
        }
    }
    Ok(())
}

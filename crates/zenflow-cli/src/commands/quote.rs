use zenflow_core::{Config, QuotableClient, QuoteSource};

use super::{runtime, CmdResult};

pub fn run(offline: bool) -> CmdResult {
    let config = Config::load_or_default();
    let client = QuotableClient::from_config(&config.quotes).offline(offline || config.quotes.offline);
    let quote = runtime()?.block_on(client.fetch());
    println!("{quote}");
    Ok(())
}

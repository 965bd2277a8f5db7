use crate::cli::commands::{emit, open_db, user_of};
use crate::cli::parser::{Cli, Commands, PaymentAction};
use crate::config::Config;
use crate::core::subscription::confirm_return;
use crate::errors::AppResult;
use crate::gateway::Gateway;

/// Missing gateway credentials are a startup problem, not a tool outcome,
/// so they propagate instead of rendering as a message.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Payment { action } = &cli.command {
        let gateway = Gateway::from_config(&cfg.gateway)?;
        let now = cli.reference_now()?;

        match action {
            PaymentAction::Url {
                amount,
                description,
                bank,
            } => {
                let url = gateway.build_payment_url(
                    user_of(cli, cfg),
                    *amount,
                    description.as_deref(),
                    bank.as_deref(),
                    now,
                )?;
                println!("💳 Payment URL:\n{url}");
            }
            PaymentAction::Confirm { query } => {
                let mut db = open_db(cfg)?;
                emit(confirm_return(&mut db, &gateway, query, now));
            }
        }
    }
    Ok(())
}

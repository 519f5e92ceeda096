// Command line surface of the membership admin client.
//
// Responsibilities
// - Parse arguments and run one command against an already built gateway.
// - Write human readable output to the given writer; logging stays on stderr.

use crate::modules::entities::use_cases::delete_with_confirmation::confirmer::Confirmer;
use crate::modules::entities::use_cases::delete_with_confirmation::handler::{
    DeleteOutcome, delete_with_confirmation,
};
use crate::modules::membership::core::span::SpanCategory;
use crate::modules::membership::models::key::Key;
use crate::modules::membership::models::span::member_spans;
use crate::modules::membership::use_cases::edit_membership_periods::form::MembershipPeriodsForm;
use crate::shared::core::primitives::millis_to_date;
use crate::shared::infrastructure::gateway::Gateway;
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "membership_admin", version, about = "Membership admin client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the membership periods of a member, per category.
    Periods { member_id: i64 },

    /// Show an RFID key.
    Key {
        key_id: i64,

        /// Delete the key after confirmation.
        #[arg(long)]
        delete: bool,

        /// Do not ask before deleting.
        #[arg(long, requires = "delete")]
        yes: bool,
    },
}

pub struct AssumeYes;

#[async_trait]
impl Confirmer for AssumeYes {
    async fn confirm(&self, _message: &str) -> bool {
        true
    }
}

/// Asks on stderr and reads the answer from stdin.
pub struct PromptConfirmer;

#[async_trait]
impl Confirmer for PromptConfirmer {
    async fn confirm(&self, message: &str) -> bool {
        let prompt = format!("{message} [y/N] ");
        tokio::task::spawn_blocking(move || {
            eprint!("{prompt}");
            let mut answer = String::new();
            std::io::stdin().read_line(&mut answer).is_ok()
                && matches!(answer.trim(), "y" | "Y" | "yes")
        })
        .await
        .unwrap_or(false)
    }
}

pub async fn run(
    command: Command,
    gateway: Arc<dyn Gateway>,
    confirmer: &impl Confirmer,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::Periods { member_id } => {
            let mut spans = member_spans(gateway, member_id);
            let mut form = MembershipPeriodsForm::new();
            form.load_from(&mut spans).await?;
            for category in SpanCategory::ALL {
                writeln!(out, "{category}")?;
                let periods = form.list(category).periods();
                if periods.is_empty() {
                    writeln!(out, "  -")?;
                }
                for period in periods {
                    writeln!(
                        out,
                        "  {} - {}",
                        millis_to_date(period.start).unwrap_or_default(),
                        millis_to_date(period.end).unwrap_or_default()
                    )?;
                }
            }
        }
        Command::Key { key_id, delete, .. } => {
            let key = Key::get_by_id(gateway, key_id).await?;
            writeln!(
                out,
                "key {key_id}: tagid {} member {} {}",
                key.tagid(),
                key.member_id().map_or("-".to_string(), |m| m.to_string()),
                key.description()
            )?;
            if delete {
                match delete_with_confirmation(&key, confirmer).await? {
                    DeleteOutcome::Deleted => writeln!(out, "deleted")?,
                    DeleteOutcome::Cancelled => writeln!(out, "cancelled")?,
                }
            }
        }
    }
    Ok(())
}

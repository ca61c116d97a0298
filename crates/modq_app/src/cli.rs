use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use modq_core::{
    ModerationAction, StatsFilter, StatsPeriod, Verdict, BULK_REJECT_COMMENT, BULK_REJECT_REASON,
};

#[derive(Debug, Parser)]
#[command(name = "modq", about = "Moderation queue client", version)]
pub struct Cli {
    #[arg(long, global = true, help = "RON config file (defaults to ./modq.ron if present)")]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, help = "API root, e.g. http://localhost:3001/api/v1")]
    pub base_url: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load one page and print it.
    List(QueryArgs),
    /// Poll for new ads until Ctrl-C.
    Watch(QueryArgs),
    /// Apply one moderation action to several ads of the page.
    Bulk(BulkArgs),
    /// Print a single ad.
    Show {
        #[arg(help = "Ad identifier")]
        id: u64,
    },
    #[command(subcommand)]
    Preset(PresetCommand),
    /// Print review statistics for a period.
    Stats(StatsArgs),
    /// Print the signed-in moderator.
    Whoami,
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct QueryArgs {
    #[arg(long, default_value = "", help = "Filter query string, e.g. 'status=pending&page=2'")]
    pub query: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BulkKind {
    Approve,
    Reject,
    RequestChanges,
}

#[derive(Debug, clap::Args)]
pub struct BulkArgs {
    pub kind: BulkKind,
    #[arg(long, value_delimiter = ',', required = true)]
    pub ids: Vec<u64>,
    #[command(flatten)]
    pub query: QueryArgs,
    #[arg(long)]
    pub reason: Option<String>,
    #[arg(long)]
    pub comment: Option<String>,
}

impl BulkArgs {
    /// Rejections and change requests without an explicit reason get the
    /// uniform bulk verdict.
    pub fn action(&self) -> ModerationAction {
        let verdict = || match &self.reason {
            Some(reason) => Verdict::new(reason.clone(), self.comment.clone()),
            None => Verdict::new(
                BULK_REJECT_REASON,
                self.comment
                    .clone()
                    .or_else(|| Some(BULK_REJECT_COMMENT.to_string())),
            ),
        };
        match self.kind {
            BulkKind::Approve => ModerationAction::Approve,
            BulkKind::Reject => ModerationAction::Reject(verdict()),
            BulkKind::RequestChanges => ModerationAction::RequestChanges(verdict()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PeriodArg {
    Today,
    #[default]
    Week,
    Month,
}

#[derive(Debug, clap::Args)]
pub struct StatsArgs {
    #[arg(long, value_enum, default_value_t = PeriodArg::Week)]
    pub period: PeriodArg,
    #[arg(long, help = "First day, YYYY-MM-DD")]
    pub from: Option<String>,
    #[arg(long, help = "Last day, YYYY-MM-DD")]
    pub to: Option<String>,
    #[arg(long, help = "Also write the report as CSV to this file")]
    pub csv: Option<PathBuf>,
}

impl StatsArgs {
    pub fn filter(&self) -> StatsFilter {
        let period = match self.period {
            PeriodArg::Today => StatsPeriod::Today,
            PeriodArg::Week => StatsPeriod::Week,
            PeriodArg::Month => StatsPeriod::Month,
        };
        StatsFilter {
            period: Some(period),
            start_date: self.from.clone(),
            end_date: self.to.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum PresetCommand {
    Save {
        name: String,
        #[command(flatten)]
        query: QueryArgs,
    },
    List,
    Delete {
        id: String,
    },
    /// Print the query of a preset, looked up by id or name.
    Apply {
        id: String,
    },
}

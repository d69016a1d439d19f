//! Command line definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dictation_core::{TargetFilter, TestBlock};

/// Vocabulary dictation in the terminal
#[derive(Parser, Debug)]
#[command(name = "dictation", version, about)]
pub struct Cli {
    /// Settings file [default: <config dir>/dictation/settings.json]
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Directory holding one `<sheet>.tsv` file per sheet. Overrides the
    /// vocabulary path from the settings.
    #[arg(long, global = true, value_name = "DIR")]
    pub workbook: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a dictation over one sheet
    Run(RunArgs),
    /// Check that a scheme fits its sheet
    Check {
        #[arg(long)]
        scheme: String,
    },
    /// List, add or remove schemes
    Schemes {
        #[command(subcommand)]
        action: Option<SchemeAction>,
    },
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Scheme to dictate with
    #[arg(long)]
    pub scheme: String,

    /// First spreadsheet row to ask (data starts at row 2)
    #[arg(long, value_name = "ROW")]
    pub from: Option<usize>,

    /// Last spreadsheet row to ask, inclusive
    #[arg(long, value_name = "ROW")]
    pub to: Option<usize>,

    /// Which words to ask: new, normal, needs-revision or all
    #[arg(long, value_parser = parse_target)]
    pub target: Option<TargetFilter>,

    /// Ask words in sheet order
    #[arg(long)]
    pub no_shuffle: bool,

    /// Do not read correct answers aloud
    #[arg(long)]
    pub no_narration: bool,
}

#[derive(Subcommand, Debug)]
pub enum SchemeAction {
    /// List configured schemes
    List,
    /// Add a scheme. Columns are 0-based.
    Add {
        name: String,
        #[arg(long)]
        sheet: String,
        #[arg(long)]
        translation: usize,
        #[arg(long)]
        status: usize,
        /// `INSTRUCTIONS:SPELLING:INFO`, repeat for every check
        #[arg(long = "block", required = true, value_parser = parse_block)]
        blocks: Vec<TestBlock>,
    },
    /// Remove a scheme
    Remove { name: String },
}

fn parse_target(s: &str) -> Result<TargetFilter, String> {
    TargetFilter::from_name(s).ok_or_else(|| format!("unknown target `{s}`, expected new, normal, needs-revision or all"))
}

fn parse_block(s: &str) -> Result<TestBlock, String> {
    let mut parts = s.rsplitn(3, ':');
    let (Some(info), Some(spelling), Some(instructions)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected INSTRUCTIONS:SPELLING:INFO, got `{s}`"));
    };
    let column = |raw: &str| raw.trim().parse::<usize>().map_err(|_| format!("`{raw}` is not a column index"));
    Ok(TestBlock::new(instructions, column(spelling)?, column(info)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dictation_core::StatusName;

    #[test]
    fn block_keeps_colons_in_instructions() {
        let block = parse_block("Note: type the plural:2:3").unwrap();
        assert_eq!(block.instructions, "Note: type the plural");
        assert_eq!((block.spelling, block.info), (2, 3));

        assert!(parse_block("plural:2").is_err());
        assert!(parse_block("plural:x:3").is_err());
    }

    #[test]
    fn run_arguments() {
        let cli = Cli::parse_from([
            "dictation",
            "--workbook",
            "/tmp/vocabulary",
            "run",
            "--scheme",
            "verbs",
            "--from",
            "3",
            "--target",
            "needs-revision",
            "--no-shuffle",
        ]);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.from, Some(3));
        assert_eq!(args.to, None);
        assert_eq!(args.target, Some(TargetFilter::Status(StatusName::NeedsRevision)));
        assert!(args.no_shuffle);
        assert!(!args.no_narration);
    }

    #[test]
    fn unknown_target_is_rejected() {
        let result = Cli::try_parse_from(["dictation", "run", "--scheme", "verbs", "--target", "delayed"]);
        assert!(result.is_err());
    }
}

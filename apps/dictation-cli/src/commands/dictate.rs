//! `dictation run`: ask the selected words and write their new statuses.

use std::io;

use dictation_core::{select, validate, NarrationGuard, QuizSession, RowRange, SessionReport, Sheet};

use super::Context;
use crate::cli::RunArgs;
use crate::console::Console;
use crate::narrator::Espeak;

pub fn run(ctx: &Context, args: RunArgs) -> anyhow::Result<()> {
    let settings = &ctx.settings;
    let scheme = settings.scheme(&args.scheme)?;
    let workbook = ctx.workbook()?;
    let sheet = workbook.load_sheet(&scheme.sheet_name)?;
    validate(&sheet, scheme)?;

    let range = resolve_range(&sheet, args.from, args.to)?;
    let target = args.target.unwrap_or(settings.target);
    let shuffle = settings.shuffle && !args.no_shuffle;
    let selection = select(&sheet, scheme, range, target, shuffle, &mut rand::rng())?;
    println!("{} words with status {target} in rows {}..={}", selection.len(), range.first, range.last);

    let narration = if args.no_narration || !settings.narration.enabled {
        NarrationGuard::disabled()
    } else {
        NarrationGuard::new(Espeak::new(settings.narration.language.clone()))
    };

    let mut session = QuizSession::new(selection, scheme, workbook).with_matching(settings.matching);
    {
        let mut console = Console::new(io::stdin().lock(), io::stdout().lock(), narration);
        console.dictate(&mut session)?;
    }

    println!();
    println!("{}", summary(&session.report()));
    Ok(())
}

/// Missing ends default to the first and last data row.
fn resolve_range(sheet: &Sheet, from: Option<usize>, to: Option<usize>) -> anyhow::Result<RowRange> {
    let all = RowRange::all(sheet);
    let range = RowRange::new(from.unwrap_or(all.first), to.unwrap_or(all.last));
    range.check_within(sheet)?;
    Ok(range)
}

fn summary(report: &SessionReport) -> String {
    let elapsed = match (report.started_at, report.finished_at) {
        (Some(start), Some(end)) => {
            let secs = (end - start).num_seconds().max(0);
            format!(" in {}m{:02}s", secs / 60, secs % 60)
        }
        _ => String::new(),
    };
    format!(
        "{} words{elapsed}: {} correct answers, {} mistakes, {} hints.\n{} words to revise, {} words learned.",
        report.words,
        report.answered,
        report.mistakes,
        report.hints,
        report.needs_revision.len(),
        report.normal.len(),
    )
}

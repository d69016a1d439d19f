//! `dictation check`: validate a scheme against its sheet without asking anything.

use std::collections::BTreeMap;

use anyhow::Context as _;
use dictation_core::{validate, Sheet, StatusCode, StatusName};

use super::Context;

pub fn run(ctx: &Context, scheme_name: &str) -> anyhow::Result<()> {
    let scheme = ctx.settings.scheme(scheme_name)?;
    let workbook = ctx.workbook()?;
    let sheet = workbook.load_sheet(&scheme.sheet_name)?;

    validate(&sheet, scheme).with_context(|| format!("scheme `{scheme_name}` cannot be used"))?;

    println!(
        "Scheme `{scheme_name}` fits sheet `{}` ({} rows)",
        sheet.name,
        sheet.row_count()
    );
    for (name, count) in status_counts(&sheet, scheme.status) {
        println!("  {name:<15} {count}");
    }
    Ok(())
}

/// Rows per status name. Only called on validated sheets.
fn status_counts(sheet: &Sheet, column: usize) -> BTreeMap<&'static str, usize> {
    let mut counts: BTreeMap<&'static str, usize> = StatusName::ALL.iter().map(|n| (n.as_str(), 0)).collect();
    for offset in 0..sheet.row_count() {
        if let Ok(status) = StatusCode::parse(sheet.cell(offset, column)) {
            *counts.entry(status.name().as_str()).or_default() += 1;
        }
    }
    counts
}

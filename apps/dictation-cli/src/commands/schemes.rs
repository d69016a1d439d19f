//! `dictation schemes`: manage the schemes stored in the settings.

use dictation_core::{DictationError, Scheme};

use super::Context;
use crate::cli::SchemeAction;

pub fn run(ctx: &mut Context, action: Option<SchemeAction>) -> anyhow::Result<()> {
    match action.unwrap_or(SchemeAction::List) {
        SchemeAction::List => {
            if ctx.settings.schemes.is_empty() {
                println!("No schemes in {}", ctx.settings_path.display());
            }
            for (name, scheme) in &ctx.settings.schemes {
                println!("{}", describe(name, scheme));
            }
        }
        SchemeAction::Add {
            name,
            sheet,
            translation,
            status,
            blocks,
        } => {
            let scheme = Scheme::new(sheet, translation, status, blocks)?;
            ctx.settings.add_scheme(name.clone(), scheme)?;
            ctx.save()?;
            tracing::info!(scheme = %name, "scheme added");
        }
        SchemeAction::Remove { name } => {
            if !ctx.settings.remove_scheme(&name) {
                return Err(DictationError::UnknownScheme { name }.into());
            }
            ctx.save()?;
            tracing::info!(scheme = %name, "scheme removed");
        }
    }
    Ok(())
}

fn describe(name: &str, scheme: &Scheme) -> String {
    let mut out = format!(
        "{name}: sheet `{}`, translation column {}, status column {}",
        scheme.sheet_name, scheme.translation, scheme.status
    );
    for block in &scheme.test_blocks {
        out.push_str(&format!(
            "\n  {} (spelling {}, info {})",
            block.instructions, block.spelling, block.info
        ));
    }
    out
}

//! Interactive form filling

use colored::Colorize;
use dialoguer::{Confirm, Input, Password, Select, theme::ColorfulTheme};

use crate::error::Result;
use crate::view::form::{FieldKind, FormDialog, FormMode, FormResource};

/// Prompt for every editable field of `dialog`, starting from its current
/// values. Blank answers leave optional fields unset.
pub fn fill_form<R: FormResource>(dialog: &mut FormDialog<R>) -> Result<()> {
    let theme = ColorfulTheme::default();
    let mode = dialog.mode();

    for field in R::fields() {
        if mode == FormMode::Edit && field.locked_on_edit {
            continue;
        }

        let mut prompt = field.label.to_string();
        if let Some(hint) = field.hint() {
            prompt.push_str(&format!(" ({})", hint));
        }
        if !field.is_required(mode) {
            prompt.push_str(&" [optional]".dimmed().to_string());
        }
        let current = dialog.value(field.name).unwrap_or_default().to_string();

        let value = match field.kind {
            FieldKind::Secret => Password::with_theme(&theme)
                .with_prompt(prompt)
                .allow_empty_password(!field.is_required(mode))
                .interact()?,
            FieldKind::Choice(options) => {
                let default = options.iter().position(|o| *o == current).unwrap_or(0);
                let index = Select::with_theme(&theme)
                    .with_prompt(prompt)
                    .items(options)
                    .default(default)
                    .interact()?;
                options[index].to_string()
            }
            _ => Input::<String>::with_theme(&theme)
                .with_prompt(prompt)
                .with_initial_text(current)
                .allow_empty(true)
                .interact_text()?,
        };

        dialog.set(field.name, value)?;
    }

    Ok(())
}

/// Ask before deleting `what`.
pub fn confirm_delete(what: &str) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Delete {}?", what))
        .default(false)
        .interact()?)
}

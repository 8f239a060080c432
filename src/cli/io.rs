use dialoguer::{theme::ColorfulTheme, Confirm};

use super::CliError;

/// Asks a yes/no question, defaulting to "no".
pub fn confirm_action(prompt: &str) -> Result<bool, CliError> {
    let theme = ColorfulTheme::default();
    Confirm::with_theme(&theme)
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(CliError::from)
}

use std::collections::HashMap;

use super::CliError;

/// Flags that never take a value.
const SWITCHES: [&str; 4] = ["yes", "json", "plain", "help"];

/// Positional arguments and `--flag value` pairs of one command.
#[derive(Debug, Default)]
pub struct Args {
    positional: Vec<String>,
    options: HashMap<String, String>,
    switches: Vec<String>,
}

impl Args {
    pub fn parse<I>(tokens: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = Args::default();
        let mut tokens = tokens.into_iter().peekable();
        while let Some(token) = tokens.next() {
            let Some(raw) = token.strip_prefix("--") else {
                args.positional.push(token);
                continue;
            };
            let (name, inline) = match raw.split_once('=') {
                Some((name, value)) => (name.to_string(), Some(value.to_string())),
                None => (raw.to_string(), None),
            };
            if SWITCHES.contains(&name.as_str()) {
                args.switches.push(name);
                continue;
            }
            let value = match inline {
                Some(value) => value,
                None => tokens
                    .next()
                    .ok_or_else(|| CliError::Usage(format!("--{} needs a value", name)))?,
            };
            args.options.insert(name, value);
        }
        Ok(args)
    }

    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(String::as_str)
    }

    pub fn required_positional(&self, index: usize, what: &str) -> Result<&str, CliError> {
        self.positional(index)
            .ok_or_else(|| CliError::Usage(format!("missing {}", what)))
    }

    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    pub fn required_option(&self, name: &str) -> Result<&str, CliError> {
        self.option(name)
            .ok_or_else(|| CliError::Usage(format!("missing --{}", name)))
    }

    pub fn switch(&self, name: &str) -> bool {
        self.switches.iter().any(|switch| switch == name)
    }

    /// Rejects options the command does not understand.
    pub fn expect_only(&self, known: &[&str]) -> Result<(), CliError> {
        for name in self.options.keys() {
            if !known.contains(&name.as_str()) {
                return Err(CliError::Usage(format!("unknown option --{}", name)));
            }
        }
        Ok(())
    }
}

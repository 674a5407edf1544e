use crate::app::error::ReclinkError;
use crate::app::models::RuntimeConfig;
use anyhow::Result;
use std::io::{BufRead, Write};

pub struct Prompt;

impl Prompt {
    pub fn summary(config: &RuntimeConfig) -> String {
        let ignore: Vec<&str> = config.ignore_rules.iter().map(String::as_str).collect();
        format!(
            "source: {}\ntarget: {}\nignore: {:?}",
            config.source_root.display(),
            config.target_root.display(),
            ignore
        )
    }

    /// Prints the resolved run and blocks until a line arrives on `input`.
    pub fn confirm<R: BufRead, W: Write>(
        config: &RuntimeConfig,
        input: &mut R,
        output: &mut W,
    ) -> Result<()> {
        writeln!(output, "{}", Self::summary(config))?;
        if config.replace_existing {
            writeln!(output, "existing targets will be replaced")?;
        }
        write!(output, "press enter to confirm")?;
        output.flush()?;

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) | Err(_) => Err(ReclinkError::ConfirmationDeclined.into()),
            Ok(_) => Ok(()),
        }
    }
}

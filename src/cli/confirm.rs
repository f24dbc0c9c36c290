use std::io::{self, BufRead, Write};

use crate::error::Result;

/// Ask before a destructive step. Anything but an explicit yes declines;
/// `--yes` flags route through `assume_yes`.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

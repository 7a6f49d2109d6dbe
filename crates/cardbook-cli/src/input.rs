//! Reading block input from files or stdin.

use std::io::Read;
use std::path::Path;

use crate::errors::CliError;

/// Read a whole input file, or stdin for `None` / `"-"`.
pub fn read_input(path: Option<&str>) -> anyhow::Result<String> {
    match path {
        None | Some("-") => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
            Ok(buffer)
        }
        Some(path) => {
            let path = Path::new(path);
            if !path.exists() {
                return Err(CliError::not_found(
                    format!("Input file not found: {}", path.display()),
                    "Hint: Pass a readable text file, or \"-\" to read stdin.",
                )
                .into());
            }
            std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))
        }
    }
}

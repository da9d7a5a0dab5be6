use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::record::{AbilityRow, parse_rows};

pub fn load_rows(path: &Path) -> Result<Vec<AbilityRow>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read data file {}", path.display()))?;
    parse_rows(&raw).with_context(|| format!("failed to parse data file {}", path.display()))
}

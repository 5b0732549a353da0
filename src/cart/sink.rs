// writing and reporting finished cartridges
use anyhow::{Context, Result};
use log::info;
use std::fmt;
use std::fs;
use std::path::Path;

use super::image::Image;

pub fn write_image(path: &Path, image: &Image) -> Result<()> {
    fs::write(path, image.bytes())
        .with_context(|| format!("failed to write cartridge to {}", path.display()))?;
    info!("wrote {} bytes to {}", image.len(), path.display());
    Ok(())
}

/// Human readable status report for a built cartridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub name: String,
    pub code_len: usize,
    pub total_len: usize,
    pub reset_address: u16,
}

impl Summary {
    pub fn new(name: impl Into<String>, image: &Image) -> Self {
        Self {
            name: name.into(),
            code_len: image.code_len(),
            total_len: image.len(),
            reset_address: image.reset_address(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File \"{}\" complete", self.name)?;
        writeln!(f, "{} bytes of program code", self.code_len)?;
        writeln!(f, "{} total bytes on cartridge", self.total_len)?;
        write!(f, "Reset vector: 0x{:X}", self.reset_address)
    }
}

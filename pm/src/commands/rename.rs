use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use plugmerge_codegen::rename::rename_file;
use plugmerge_config::{Platform, PlatformSettings};
use plugmerge_core::is_identifier;

#[derive(Args)]
pub struct RenameCommand {
    /// C# file declaring the plugin class
    #[arg(short, long)]
    pub file: PathBuf,

    /// New class name
    #[arg(short, long)]
    pub name: String,

    /// Platform whose plugin base classes are recognized
    #[arg(short, long, default_value = "oxide")]
    pub platform: Platform,
}

impl RenameCommand {
    pub fn run(&self) -> Result<()> {
        if !is_identifier(&self.name) {
            eyre::bail!("Invalid class name '{}'", self.name);
        }

        let platform = PlatformSettings::new(self.platform, "");
        if !rename_file(&self.file, &self.name, &platform)? {
            eyre::bail!("No plugin class found in {}", self.file.display());
        }

        println!("Renamed plugin class in {} to {}", self.file.display(), self.name);
        Ok(())
    }
}

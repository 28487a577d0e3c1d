use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use plugmerge_config::ConfigFile;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct InitCommand {
    /// Directory to create the configuration in
    #[arg(short, long, default_value = ".")]
    pub path: PathBuf,

    /// Configuration file name; `.json` selects JSON, `.yml`/`.yaml` YAML
    #[arg(short, long, default_value = "merge.toml")]
    pub filename: String,
}

impl InitCommand {
    pub fn run(&self) -> Result<()> {
        let file = ConfigFile::create(self.path.join(&self.filename)).unwrap_or_exit();

        println!("Created {}", file.path().display());
        println!();
        println!("Next steps:");
        println!("  edit input_paths and output_paths");
        println!("  plugmerge merge -c {}", file.path().display());
        Ok(())
    }
}

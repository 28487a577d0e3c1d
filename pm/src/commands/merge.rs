use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use plugmerge_codegen::MergeHandler;
use plugmerge_config::{ConfigFile, CreatorMode};
use plugmerge_core::to_full_path;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct MergeCommand {
    /// Path to the merge configuration
    #[arg(short, long, default_value = "merge.toml")]
    pub config: PathBuf,

    /// Additional output directories
    #[arg(short, long)]
    pub output: Vec<PathBuf>,

    /// Creator mode (overrides the configuration)
    #[arg(short, long)]
    pub mode: Option<CreatorMode>,

    /// Print the merged file instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl MergeCommand {
    pub fn run(&self) -> Result<()> {
        let cwd = std::env::current_dir()?;
        let config_file = ConfigFile::open(to_full_path(&cwd, &self.config)).unwrap_or_exit();
        let mut config = config_file.resolved();

        for output in &self.output {
            let output = to_full_path(&cwd, output);
            if !config.merge.output_paths.contains(&output) {
                config.merge.output_paths.push(output);
            }
        }

        if let Some(mode) = self.mode {
            config.merge.creator_mode = mode;
        }

        let handler = MergeHandler::new(config);
        if self.dry_run {
            let output = handler.merge()?;
            print!("{}", output.code);
            return Ok(());
        }

        let output = handler.run()?;
        if output.destinations.is_empty() {
            eprintln!("No output paths configured; nothing was written");
        }
        Ok(())
    }
}

use std::{path::PathBuf, time::Instant};

use eyre::Result;
use plugmerge_config::PluginMergeConfig;
use plugmerge_core::{File, WriteResult};
use plugmerge_syntax::{CSharpParser, SourceParser};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::{FileScanner, ScannedFile};
use crate::{
    classify::{ClassifiedFile, ClassifyOptions, classify},
    creator::FileCreator,
    error::MergeError,
};

/// Result of a merge, before it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutput {
    /// Name of the merged plugin class
    pub plugin_name: String,
    pub code: String,
    /// `<output dir>/<plugin name>.cs` for every output directory
    pub destinations: Vec<PathBuf>,
    /// Number of files merged
    pub file_count: usize,
}

/// Runs a merge end to end: scan, classify, create and write.
pub struct MergeHandler {
    config: PluginMergeConfig,
}

impl MergeHandler {
    /// `config` paths must already be resolved.
    pub fn new(config: PluginMergeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PluginMergeConfig {
        &self.config
    }

    /// Merge and write to every destination.
    pub fn run(&self) -> Result<MergeOutput> {
        let start = Instant::now();
        let output = self.merge()?;
        write_outputs(&output.code, &output.destinations)?;

        info!(
            "Merged {} files into {} ({} mode) in {} ms",
            output.file_count,
            output.plugin_name,
            self.config.merge.creator_mode,
            start.elapsed().as_millis()
        );
        for destination in &output.destinations {
            info!("Wrote {}", destination.display());
        }
        Ok(output)
    }

    /// Merge without writing anything.
    pub fn merge(&self) -> Result<MergeOutput> {
        let scanned = FileScanner::from_config(&self.config.merge).scan();
        debug!("Scanned {} files", scanned.len());

        let mut files = self.classify_all(&scanned)?;
        files.retain(|file| {
            if file.is_excluded() {
                debug!("Excluding {}", file.path.display());
            }
            !file.is_excluded()
        });
        files.sort_by_key(|file| file.order);

        let mut creator = FileCreator::new(&self.config);
        let code = creator.create(&mut files)?;
        let plugin_name = creator.plugin_name().to_string();

        let destinations = self.config.merge.final_files(&plugin_name);
        Ok(MergeOutput {
            plugin_name,
            code,
            destinations,
            file_count: files.len(),
        })
    }

    /// Read, parse and classify every file on the rayon pool, in scan order.
    fn classify_all(&self, scanned: &[ScannedFile]) -> Result<Vec<ClassifiedFile>, MergeError> {
        let options = ClassifyOptions::from_config(&self.config);
        scanned
            .par_iter()
            .enumerate()
            .map_init(CSharpParser::new, |parser, (index, file)| -> Result<_, MergeError> {
                let parser = parser
                    .as_mut()
                    .map_err(|e| MergeError::Parser(e.to_string()))?;
                classify_file(parser, file, index, &options)
            })
            .collect()
    }
}

fn classify_file(
    parser: &mut impl SourceParser,
    file: &ScannedFile,
    index: usize,
    options: &ClassifyOptions,
) -> Result<ClassifiedFile, MergeError> {
    let text = std::fs::read_to_string(&file.path).map_err(|source| MergeError::Read {
        path: file.path.clone(),
        source,
    })?;
    let parsed = parser.parse(&text).map_err(|source| MergeError::Parse {
        path: file.path.clone(),
        source,
    })?;
    if parsed.has_errors {
        warn!("Syntax errors in {}; merging recovered declarations", file.path.display());
    }

    let classified = classify(file, index, text, &parsed, options);
    debug!(
        "Classified {} as {} (order {})",
        classified.region_label, classified.settings, classified.order
    );
    Ok(classified)
}

/// Write `code` to every destination in parallel, creating parent directories.
pub fn write_outputs(code: &str, destinations: &[PathBuf]) -> Result<()> {
    destinations.par_iter().try_for_each(|path| {
        match File::new(path, code).write()? {
            WriteResult::Unchanged => debug!("Unchanged {}", path.display()),
            _ => debug!("Wrote {}", path.display()),
        }
        Ok(())
    })
}

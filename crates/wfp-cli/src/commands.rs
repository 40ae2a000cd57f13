use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::info;

use wfp_cli::samples::template_files;
use wfp_core::{ValidateRequest, validate_file};
use wfp_export::ExportRegistry;
use wfp_ingest::LogicalFile;
use wfp_model::{RuleRegistry, ValidationOutcome};

use crate::cli::{TemplateArgs, ValidateArgs};

/// Loads the rule registry: builtin unless a JSON file was given.
pub fn load_registry(rules: Option<&Path>) -> Result<RuleRegistry> {
    match rules {
        Some(path) => RuleRegistry::from_path(path)
            .with_context(|| format!("load rules: {}", path.display())),
        None => Ok(RuleRegistry::builtin()),
    }
}

pub fn run_validate(registry: &RuleRegistry, args: &ValidateArgs) -> Result<ValidationOutcome> {
    let Some(spec) = registry.get(&args.file_type) else {
        let known: Vec<&str> = registry.file_types().collect();
        bail!(
            "unknown file type '{}' (registered: {})",
            args.file_type,
            known.join(", ")
        );
    };

    let (upload, filename) = read_inputs(&args.inputs)?;
    let mut request = ValidateRequest::new(&args.file_type, filename);
    request.remarks = args.remarks.clone().unwrap_or_default();
    request.key = args.key.clone();

    let exports = ExportRegistry::builtin();
    Ok(validate_file(&upload, spec, &request, &exports))
}

/// Reads CLI inputs: one bare path for a flat upload, or `Sheet=path`
/// pairs for a multi-sheet one. The first path's file name seeds the
/// upload key.
fn read_inputs(inputs: &[String]) -> Result<(LogicalFile, String)> {
    let sheet_count = inputs.iter().filter(|input| input.contains('=')).count();
    if sheet_count == 0 {
        let [input] = inputs else {
            bail!("a flat upload takes exactly one input path");
        };
        let path = PathBuf::from(input);
        let upload = LogicalFile::read_single(&path)?;
        return Ok((upload, display_name(&path)));
    }
    let mut sheets: Vec<(String, PathBuf)> = Vec::with_capacity(inputs.len());
    for input in inputs {
        let Some((name, path)) = input.split_once('=') else {
            bail!("cannot mix bare paths and Sheet=path inputs");
        };
        if name.is_empty() {
            bail!("empty sheet name in input '{input}'");
        }
        sheets.push((name.to_string(), PathBuf::from(path)));
    }
    let filename = display_name(&sheets[0].1);
    let upload = LogicalFile::read_sheets(
        sheets
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_path())),
    )?;
    Ok((upload, filename))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn run_template(registry: &RuleRegistry, args: &TemplateArgs) -> Result<()> {
    let file_types: Vec<String> = match &args.file_type {
        Some(file_type) => vec![file_type.clone()],
        None => registry.file_types().map(str::to_string).collect(),
    };

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("create template dir: {}", args.output_dir.display()))?;
    for file_type in &file_types {
        let Some(files) = template_files(file_type) else {
            if args.file_type.is_some() {
                bail!("no template available for file type '{file_type}'");
            }
            continue;
        };
        for (name, contents) in files {
            let destination = args.output_dir.join(&name);
            std::fs::write(&destination, contents)
                .with_context(|| format!("write template: {}", destination.display()))?;
            info!(%file_type, destination = %destination.display(), "wrote template");
            println!("{}", destination.display());
        }
    }
    Ok(())
}

//! Catalog command implementation — print the models a push would process

use crate::catalog::{corenlp_catalog, ArtifactFamily, CatalogProvider, DirectoryCatalog};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::CatalogArgs;

pub fn run_catalog(args: CatalogArgs, level: LogLevel) -> Result<(), String> {
    let catalog = match args.family {
        ArtifactFamily::Corenlp => corenlp_catalog(),
        ArtifactFamily::Stanza => {
            let root = args
                .input_dir
                .as_ref()
                .ok_or("--input-dir is required for the stanza family")?;
            DirectoryCatalog::new(root)
                .models()
                .map_err(|e| format!("Scanning {}: {e}", root.display()))?
        }
    };

    for model in &catalog {
        let lang = model.language.as_deref().unwrap_or("-");
        log(
            level,
            LogLevel::Normal,
            &format!(
                "{:<16} {:<4} {}",
                model.model_name,
                lang,
                model.repo_id(args.family)
            ),
        );
    }
    log(
        level,
        LogLevel::Verbose,
        &format!("{} model(s)", catalog.len()),
    );
    Ok(())
}

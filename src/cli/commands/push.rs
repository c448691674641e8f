//! Push command implementation — publish model artifacts to the Hub

use chrono::Utc;

use crate::card;
use crate::catalog::{
    corenlp_catalog, filter_catalog, ArtifactFamily, CatalogProvider, DirectoryCatalog,
    ModelDescriptor,
};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::PushArgs;
use crate::hub::HttpHubClient;
use crate::publish::{ModelOutcome, Progress, PublishOptions, Publisher};
use crate::resolve::Resolver;
use crate::staging;

pub fn run_push(args: PushArgs, level: LogLevel) -> Result<(), String> {
    let catalog = build_catalog(&args)?;
    if catalog.is_empty() {
        return Err("Catalog is empty; nothing to publish".to_string());
    }

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Publishing {} model(s), version {}",
            catalog.len(),
            args.version
        ),
    );

    if args.dry_run {
        return dry_run(&args, &catalog, level);
    }

    let client = HttpHubClient::new().map_err(|e| format!("Hub client: {e}"))?;
    let options = PublishOptions {
        family: args.family,
        version: args.version.clone(),
        input_dir: args.input_dir.clone(),
        staging_root: args.output_dir.clone(),
        fail_fast: args.fail_fast,
    };
    let publisher = Publisher::new(&client, options);

    let report = publisher.publish_all(&catalog, |progress| match progress {
        Progress::Started { model } => {
            log(level, LogLevel::Normal, &format!("Processing {model}"));
        }
        Progress::Finished { report } => match &report.outcome {
            ModelOutcome::Published { repo_url, no_op } => {
                let suffix = if *no_op { " (no changes)" } else { "" };
                log(
                    level,
                    LogLevel::Normal,
                    &format!("  View your model in {repo_url}{suffix}"),
                );
            }
            ModelOutcome::Failed { stage, error } => {
                log(
                    level,
                    LogLevel::Normal,
                    &format!("  Failed while {stage}: {error}"),
                );
            }
        },
    });

    log(level, LogLevel::Normal, &report.to_string());

    if report.halted {
        Err(format!(
            "Batch halted after {} model(s); re-run the failed subset",
            report.reports.len()
        ))
    } else if report.all_failed() {
        Err(format!("All {} model(s) failed", report.reports.len()))
    } else {
        Ok(())
    }
}

/// Resolve and stage every model locally without any remote call.
fn dry_run(args: &PushArgs, catalog: &[ModelDescriptor], level: LogLevel) -> Result<(), String> {
    let resolver = Resolver::new(args.family, args.version.clone());
    for model in catalog {
        match resolver.resolve(model, args.input_dir.as_deref()) {
            Ok(artifact) => {
                let rendered = card::render(
                    args.family,
                    &model.model_name,
                    model.language.as_deref(),
                    Utc::now(),
                );
                let staged = staging::stage(
                    &args.output_dir,
                    args.family,
                    model,
                    &artifact,
                    &rendered,
                )
                .map_err(|e| format!("Staging {}: {e}", model.model_name))?;
                log(
                    level,
                    LogLevel::Normal,
                    &format!("{}: staged at {}", model.model_name, staged.display()),
                );
                log(
                    level,
                    LogLevel::Verbose,
                    &format!("  artifact: {}", artifact.display()),
                );
            }
            Err(e) => {
                log(level, LogLevel::Normal, &format!("{}: {e}", model.model_name));
            }
        }
    }
    log(level, LogLevel::Normal, "Dry run; skipping upload");
    Ok(())
}

fn build_catalog(args: &PushArgs) -> Result<Vec<ModelDescriptor>, String> {
    let mut catalog = match args.family {
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

    if args.package_only {
        if args.family != ArtifactFamily::Corenlp {
            return Err("--package-only only applies to the corenlp family".to_string());
        }
        catalog.retain(|m| m.model_name == "CoreNLP");
    }

    filter_catalog(catalog, &args.models)
}

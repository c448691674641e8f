//! End-to-end staging checks through the public API
//!
//! Everything here stays local: resolve an artifact, render its card, and
//! assemble the staging tree the way a push would before its first remote
//! call.

use chrono::Utc;
use empujar::card;
use empujar::catalog::{corenlp_catalog, filter_catalog, ArtifactFamily};
use empujar::resolve::Resolver;
use empujar::staging;

#[test]
fn corenlp_subset_stages_artifact_and_card() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    std::fs::write(
        input.path().join("stanford-corenlp-models-french.jar"),
        b"french-jar",
    )
    .unwrap();
    std::fs::write(
        input.path().join("stanford-german-corenlp-models-current.jar"),
        b"german-jar",
    )
    .unwrap();

    let catalog = filter_catalog(
        corenlp_catalog(),
        &["french".to_string(), "german".to_string()],
    )
    .unwrap();
    let resolver = Resolver::new(ArtifactFamily::Corenlp, "4.5.4");

    for model in &catalog {
        let artifact = resolver.resolve(model, Some(input.path())).unwrap();
        let rendered = card::render(
            ArtifactFamily::Corenlp,
            &model.model_name,
            model.language.as_deref(),
            Utc::now(),
        );
        staging::stage(
            output.path(),
            ArtifactFamily::Corenlp,
            model,
            &artifact,
            &rendered,
        )
        .unwrap();
    }

    let french = output.path().join("corenlp-french");
    assert_eq!(
        std::fs::read(french.join("stanford-corenlp-models-french.jar")).unwrap(),
        b"french-jar"
    );
    let card_text = std::fs::read_to_string(french.join("README.md")).unwrap();
    assert!(card_text.contains("language: fr"));
    assert!(card_text.contains("# CoreNLP model for french"));

    // The german artifact only exists under its alternate name.
    let german = output.path().join("corenlp-german");
    assert_eq!(
        std::fs::read(german.join("stanford-corenlp-models-german.jar")).unwrap(),
        b"german-jar"
    );
}

#[test]
fn cli_surface_parses_a_full_push_invocation() {
    let cli = empujar::config::parse_args([
        "empujar",
        "push",
        "--family",
        "stanza",
        "--input-dir",
        "/data/stanza",
        "--output-dir",
        "/tmp/hub",
        "--version",
        "1.3.0",
        "--fail-fast",
        "--dry-run",
        "en",
        "fr",
    ])
    .unwrap();

    let empujar::config::Command::Push(args) = cli.command else {
        panic!("expected Push command");
    };
    assert_eq!(args.family, ArtifactFamily::Stanza);
    assert_eq!(args.version, "1.3.0");
    assert_eq!(args.models, ["en", "fr"]);
    assert!(args.fail_fast && args.dry_run);
}

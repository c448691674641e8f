//! Static CoreNLP catalog
//!
//! The full distribution: the CoreNLP package itself plus one jar of models
//! per language variant. Order here is publish order.

use super::ModelDescriptor;

/// The CoreNLP publishing catalog.
///
/// The package entry carries every override: its artifact is a zip rather
/// than a convention-named jar, it keeps its local filename remotely, and
/// its repository is plain `CoreNLP` instead of `corenlp-CoreNLP`.
#[must_use]
pub fn corenlp_catalog() -> Vec<ModelDescriptor> {
    let mut package = ModelDescriptor::new("CoreNLP", "en");
    package.local_name = Some("stanford-corenlp-latest.zip".into());
    package.remote_name = Some("stanford-corenlp-latest.zip".into());
    package.repo_name = Some("CoreNLP".into());

    let mut catalog = vec![package];
    for (model, lang, local) in [
        ("arabic", "ar", "stanford-arabic-corenlp-models-current.jar"),
        ("chinese", "zh", "stanford-chinese-corenlp-models-current.jar"),
        ("english-default", "en", "stanford-corenlp-models-current.jar"),
        (
            "english-extra",
            "en",
            "stanford-english-corenlp-models-current.jar",
        ),
        (
            "english-kbp",
            "en",
            "stanford-english-kbp-corenlp-models-current.jar",
        ),
        ("french", "fr", "stanford-french-corenlp-models-current.jar"),
        ("german", "de", "stanford-german-corenlp-models-current.jar"),
        (
            "hungarian",
            "hu",
            "stanford-hungarian-corenlp-models-current.jar",
        ),
        (
            "italian",
            "it",
            "stanford-italian-corenlp-models-current.jar",
        ),
        (
            "spanish",
            "es",
            "stanford-spanish-corenlp-models-current.jar",
        ),
    ] {
        let mut entry = ModelDescriptor::new(model, lang);
        entry.local_name = Some(local.into());
        catalog.push(entry);
    }
    catalog
}

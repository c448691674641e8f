//! Local staging of one model's upload
//!
//! Assembles the files a publish commit contains: the artifact under its
//! remote name plus the rendered model card. The staging directory is owned
//! by the model currently being processed and is wiped on reuse, so a
//! previous partial run never leaks files into the next upload.

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{ArtifactFamily, ModelDescriptor};
use crate::error::Result;

/// Name of the rendered model card inside the staging directory
pub const CARD_FILE: &str = "README.md";

/// Subdirectory that holds a directory-shaped artifact
pub const MODELS_SUBDIR: &str = "models";

/// Build the staging directory for one model and return its path.
///
/// A file artifact lands at the staging root under the model's remote
/// name; a directory artifact is copied as a tree under `models/`.
pub fn stage(
    staging_root: &Path,
    family: ArtifactFamily,
    model: &ModelDescriptor,
    artifact: &Path,
    card: &str,
) -> Result<PathBuf> {
    let dir = staging_root.join(model.repo_name(family));
    if dir.exists() {
        fs::remove_dir_all(&dir)?;
    }
    fs::create_dir_all(&dir)?;

    if artifact.is_dir() {
        copy_tree(artifact, &dir.join(MODELS_SUBDIR))?;
    } else {
        fs::copy(artifact, dir.join(model.remote_file_name(family)))?;
    }

    fs::write(dir.join(CARD_FILE), card)?;
    Ok(dir)
}

fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.path().is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::corenlp_catalog;

    #[test]
    fn file_artifact_is_staged_under_remote_name() {
        let input = tempfile::tempdir().unwrap();
        let staging = tempfile::tempdir().unwrap();
        let artifact = input.path().join("stanford-corenlp-models-arabic.jar");
        fs::write(&artifact, b"jar-bytes").unwrap();

        let model = ModelDescriptor::new("arabic", "ar");
        let card = "---\ncard\n";
        let dir = stage(
            staging.path(),
            ArtifactFamily::Corenlp,
            &model,
            &artifact,
            card,
        )
        .unwrap();

        assert_eq!(dir, staging.path().join("corenlp-arabic"));
        assert_eq!(
            fs::read(dir.join("stanford-corenlp-models-arabic.jar")).unwrap(),
            b"jar-bytes"
        );
        assert_eq!(fs::read_to_string(dir.join(CARD_FILE)).unwrap(), card);
    }

    #[test]
    fn package_entry_uses_its_remote_name_override() {
        let input = tempfile::tempdir().unwrap();
        let staging = tempfile::tempdir().unwrap();
        let artifact = input.path().join("stanford-corenlp-latest.zip");
        fs::write(&artifact, b"zip").unwrap();

        let package = corenlp_catalog().remove(0);
        let dir = stage(
            staging.path(),
            ArtifactFamily::Corenlp,
            &package,
            &artifact,
            "card",
        )
        .unwrap();

        assert_eq!(dir, staging.path().join("CoreNLP"));
        assert!(dir.join("stanford-corenlp-latest.zip").exists());
    }

    #[test]
    fn directory_artifact_is_copied_under_models() {
        let input = tempfile::tempdir().unwrap();
        let staging = tempfile::tempdir().unwrap();
        let lang_dir = input.path().join("en");
        fs::create_dir_all(lang_dir.join("tokenize")).unwrap();
        fs::write(lang_dir.join("tokenize").join("combined.pt"), b"w").unwrap();
        fs::write(lang_dir.join("default.zip"), b"z").unwrap();

        let mut model = ModelDescriptor::new("en", "en");
        model.local_name = Some("en".into());
        let dir = stage(staging.path(), ArtifactFamily::Stanza, &model, &lang_dir, "c").unwrap();

        assert!(dir.join("models").join("default.zip").exists());
        assert!(dir
            .join("models")
            .join("tokenize")
            .join("combined.pt")
            .exists());
    }

    #[test]
    fn restaging_wipes_previous_contents() {
        let input = tempfile::tempdir().unwrap();
        let staging = tempfile::tempdir().unwrap();
        let artifact = input.path().join("stanford-corenlp-models-french.jar");
        fs::write(&artifact, b"new").unwrap();

        let stale = staging.path().join("corenlp-french");
        fs::create_dir_all(&stale).unwrap();
        fs::write(stale.join("leftover.jar"), b"old").unwrap();

        let model = ModelDescriptor::new("french", "fr");
        let dir = stage(
            staging.path(),
            ArtifactFamily::Corenlp,
            &model,
            &artifact,
            "card",
        )
        .unwrap();

        assert!(!dir.join("leftover.jar").exists());
        assert!(dir.join("stanford-corenlp-models-french.jar").exists());
    }
}

//! Hugging Face Hub client
//!
//! Implements [`HubApi`] against the Hub REST API with a blocking HTTP
//! client. Uploads go through the commit endpoint so every publish lands
//! as a single atomic revision; single-file reads go through the `hf_hub`
//! download API.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use sha2::{Digest, Sha256};

use super::api::{collect_files, matches_pattern, CommitOutcome, HubApi};
use crate::error::{PublishError, Result};

const HF_BASE: &str = "https://huggingface.co";
const HF_API_BASE: &str = "https://huggingface.co/api";
const USER_AGENT: &str = concat!("empujar/", env!("CARGO_PKG_VERSION"));

/// Signal the Hub sends back when a commit would not change anything.
const NO_OP_MARKER: &str = "No files have been modified";

/// A large file already uploaded through the LFS channel, referenced from
/// a commit by digest instead of inline content.
#[derive(Debug)]
struct LfsEntry {
    path: String,
    oid: String,
    size: u64,
}

impl LfsEntry {
    fn new(path: String, content: &[u8]) -> Self {
        Self {
            oid: hex::encode(Sha256::digest(content)),
            size: content.len() as u64,
            path,
        }
    }
}

/// Blocking Hub client with bearer-token authentication.
pub struct HttpHubClient {
    client: reqwest::blocking::Client,
    token: String,
}

impl HttpHubClient {
    /// Create a client, resolving the write token from the environment.
    ///
    /// Publishing always writes, so a missing token is an error here
    /// rather than a degraded anonymous mode.
    pub fn new() -> Result<Self> {
        let token = Self::resolve_token().ok_or(PublishError::AuthRequired)?;
        Self::with_token(token)
    }

    /// Create a client with an explicit token.
    pub fn with_token(token: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| PublishError::Http {
                message: format!("Failed to create HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            token: token.into(),
        })
    }

    /// Resolve the token from `HF_TOKEN`, then `~/.huggingface/token`.
    #[must_use]
    pub fn resolve_token() -> Option<String> {
        if let Ok(token) = std::env::var("HF_TOKEN") {
            if !token.is_empty() {
                return Some(token);
            }
        }

        if let Some(home) = dirs::home_dir() {
            let token_path = home.join(".huggingface").join("token");
            if let Ok(token) = std::fs::read_to_string(token_path) {
                let token = token.trim().to_string();
                if !token.is_empty() {
                    return Some(token);
                }
            }
        }

        None
    }

    fn validate_repo_id(repo_id: &str) -> Result<(&str, &str)> {
        let parts: Vec<&str> = repo_id.split('/').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            return Err(PublishError::InvalidRepoId {
                repo_id: repo_id.to_string(),
            });
        }
        Ok((parts[0], parts[1]))
    }

    /// Post one commit: header line, then one NDJSON line per inline
    /// file, per LFS reference, and per deletion.
    fn commit(
        &self,
        repo_id: &str,
        message: &str,
        files: &[(String, Vec<u8>)],
        lfs_files: &[LfsEntry],
        deletions: &[String],
    ) -> Result<CommitOutcome> {
        let url = format!("{HF_API_BASE}/models/{repo_id}/commit/main");
        let body = commit_body(message, files, lfs_files, deletions);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header("Content-Type", "application/x-ndjson")
            .body(body)
            .send()
            .map_err(|e| PublishError::UploadFailed {
                path: repo_id.to_string(),
                message: format!("Commit request failed: {e}"),
            })?;

        if response.status().is_success() {
            return Ok(CommitOutcome::Committed);
        }

        let status = response.status();
        let text = response.text().unwrap_or_default();
        if is_no_op_response(&text) {
            Ok(CommitOutcome::NoChanges)
        } else {
            Err(PublishError::UploadFailed {
                path: repo_id.to_string(),
                message: format!("HTTP {status}: {text}"),
            })
        }
    }

    /// List the file paths at the repository head; an absent tree listing
    /// is an empty repository, not an error.
    fn list_repo_files(&self, repo_id: &str) -> Result<Vec<String>> {
        let url = format!("{HF_API_BASE}/models/{repo_id}/tree/main?recursive=true");
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .map_err(|e| PublishError::Http {
                message: format!("Tree listing failed: {e}"),
            })?;

        if response.status().as_u16() == 404 {
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            let status = response.status();
            return Err(PublishError::Http {
                message: format!("Tree listing failed: HTTP {status}"),
            });
        }

        let entries: Vec<serde_json::Value> =
            response.json().map_err(|e| PublishError::Http {
                message: format!("Tree listing parse failed: {e}"),
            })?;
        Ok(entries
            .iter()
            .filter(|e| e.get("type").and_then(|t| t.as_str()) == Some("file"))
            .filter_map(|e| e.get("path").and_then(|p| p.as_str()))
            .map(str::to_string)
            .collect())
    }

    fn build_download_api(&self) -> Result<hf_hub::api::sync::Api> {
        hf_hub::api::sync::ApiBuilder::new()
            .with_token(Some(self.token.clone()))
            .build()
            .map_err(|e| PublishError::Http {
                message: format!("Failed to initialize download API: {e}"),
            })
    }

    /// Upload large files through the git-LFS batch endpoint and return
    /// the digest references the commit will carry.
    ///
    /// Objects the server already holds come back without an upload
    /// action and are skipped; re-publishing identical artifacts never
    /// re-transfers them.
    fn upload_lfs_files(
        &self,
        repo_id: &str,
        files: Vec<(String, Vec<u8>)>,
    ) -> Result<Vec<LfsEntry>> {
        if files.is_empty() {
            return Ok(Vec::new());
        }

        let entries: Vec<LfsEntry> = files
            .iter()
            .map(|(path, content)| LfsEntry::new(path.clone(), content))
            .collect();

        let url = format!("{HF_BASE}/{repo_id}.git/info/lfs/objects/batch");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header("Content-Type", "application/vnd.git-lfs+json")
            .header("Accept", "application/vnd.git-lfs+json")
            .json(&lfs_batch_body(&entries))
            .send()
            .map_err(|e| PublishError::UploadFailed {
                path: repo_id.to_string(),
                message: format!("LFS batch request failed: {e}"),
            })?;
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().unwrap_or_default();
            return Err(PublishError::UploadFailed {
                path: repo_id.to_string(),
                message: format!("LFS batch failed: HTTP {status}: {text}"),
            });
        }
        let batch: serde_json::Value = response.json().map_err(|e| PublishError::UploadFailed {
            path: repo_id.to_string(),
            message: format!("LFS batch parse failed: {e}"),
        })?;

        let objects = batch
            .get("objects")
            .and_then(|o| o.as_array())
            .ok_or_else(|| PublishError::UploadFailed {
                path: repo_id.to_string(),
                message: "LFS batch response has no objects".to_string(),
            })?;

        for (entry, (_, content)) in entries.iter().zip(files) {
            let object = objects
                .iter()
                .find(|o| o.get("oid").and_then(|v| v.as_str()) == Some(entry.oid.as_str()))
                .ok_or_else(|| PublishError::UploadFailed {
                    path: entry.path.clone(),
                    message: "LFS batch response is missing the object".to_string(),
                })?;
            if let Some(message) = object
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
            {
                return Err(PublishError::UploadFailed {
                    path: entry.path.clone(),
                    message: format!("LFS batch rejected the object: {message}"),
                });
            }
            // No upload action means the object is already stored.
            let Some(upload) = object.get("actions").and_then(|a| a.get("upload")) else {
                continue;
            };
            self.put_lfs_object(entry, upload, content)?;
        }

        Ok(entries)
    }

    /// PUT one object's bytes to the transfer URL the batch response
    /// handed out, forwarding exactly the headers it specified.
    fn put_lfs_object(
        &self,
        entry: &LfsEntry,
        upload: &serde_json::Value,
        content: Vec<u8>,
    ) -> Result<()> {
        let href = upload
            .get("href")
            .and_then(|h| h.as_str())
            .ok_or_else(|| PublishError::UploadFailed {
                path: entry.path.clone(),
                message: "LFS upload action has no href".to_string(),
            })?;

        let mut request = self.client.put(href).body(content);
        if let Some(headers) = upload.get("header").and_then(|h| h.as_object()) {
            for (name, value) in headers {
                if let Some(value) = value.as_str() {
                    request = request.header(name, value);
                }
            }
        }

        let response = request.send().map_err(|e| PublishError::UploadFailed {
            path: entry.path.clone(),
            message: format!("LFS transfer failed: {e}"),
        })?;
        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            Err(PublishError::UploadFailed {
                path: entry.path.clone(),
                message: format!("LFS transfer failed: HTTP {status}"),
            })
        }
    }
}

impl HubApi for HttpHubClient {
    fn create_repo(&self, repo_id: &str) -> Result<String> {
        let (org, name) = Self::validate_repo_id(repo_id)?;
        let url = format!("{HF_API_BASE}/repos/create");
        let body = serde_json::json!({
            "name": name,
            "organization": org,
            "type": "model",
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .map_err(|e| PublishError::RepoUnavailable {
                repo_id: repo_id.to_string(),
                message: format!("Create repo request failed: {e}"),
            })?;

        // 409 = already exists, which is the expected steady state.
        if response.status().is_success() || response.status().as_u16() == 409 {
            Ok(format!("https://huggingface.co/{repo_id}"))
        } else {
            let status = response.status();
            let text = response.text().unwrap_or_default();
            Err(PublishError::RepoUnavailable {
                repo_id: repo_id.to_string(),
                message: format!("HTTP {status}: {text}"),
            })
        }
    }

    fn get_file(&self, repo_id: &str, path: &str) -> Result<Option<Vec<u8>>> {
        Self::validate_repo_id(repo_id)?;
        let api = self.build_download_api()?;
        let repo = api.model(repo_id.to_string());

        match repo.get(path) {
            Ok(local) => Ok(Some(std::fs::read(local)?)),
            Err(hf_hub::api::sync::ApiError::RequestError(e)) => {
                if e.to_string().contains("404") {
                    Ok(None)
                } else {
                    Err(PublishError::RepoUnavailable {
                        repo_id: repo_id.to_string(),
                        message: format!("Fetching {path} failed: {e}"),
                    })
                }
            }
            Err(e) => Err(PublishError::RepoUnavailable {
                repo_id: repo_id.to_string(),
                message: format!("Fetching {path} failed: {e}"),
            }),
        }
    }

    fn put_file(
        &self,
        repo_id: &str,
        path: &str,
        content: &[u8],
        message: &str,
    ) -> Result<CommitOutcome> {
        Self::validate_repo_id(repo_id)?;
        self.commit(
            repo_id,
            message,
            &[(path.to_string(), content.to_vec())],
            &[],
            &[],
        )
    }

    fn upload_folder(
        &self,
        repo_id: &str,
        local_dir: &Path,
        message: &str,
        lfs_patterns: &[&str],
    ) -> Result<CommitOutcome> {
        Self::validate_repo_id(repo_id)?;
        let files = collect_files(local_dir)?;

        let deletions = if lfs_patterns.is_empty() {
            Vec::new()
        } else {
            self.list_repo_files(repo_id)?
                .into_iter()
                .filter(|remote| {
                    lfs_patterns.iter().any(|p| matches_pattern(p, remote))
                        && !files.iter().any(|(path, _)| path == remote)
                })
                .collect()
        };

        let (large, inline) = split_by_patterns(files, lfs_patterns);
        let lfs_entries = self.upload_lfs_files(repo_id, large)?;

        self.commit(repo_id, message, &inline, &lfs_entries, &deletions)
    }

    fn list_tags(&self, repo_id: &str) -> Result<Vec<String>> {
        Self::validate_repo_id(repo_id)?;
        let url = format!("{HF_API_BASE}/models/{repo_id}/refs");
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .map_err(|e| PublishError::Http {
                message: format!("Listing refs failed: {e}"),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(PublishError::Http {
                message: format!("Listing refs failed: HTTP {status}"),
            });
        }

        let refs: serde_json::Value = response.json().map_err(|e| PublishError::Http {
            message: format!("Refs parse failed: {e}"),
        })?;
        Ok(refs
            .get("tags")
            .and_then(|t| t.as_array())
            .map(|tags| {
                tags.iter()
                    .filter_map(|t| t.get("name").and_then(|n| n.as_str()))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default())
    }

    fn delete_tag(&self, repo_id: &str, tag: &str) -> Result<()> {
        Self::validate_repo_id(repo_id)?;
        let url = format!("{HF_API_BASE}/models/{repo_id}/tag/{tag}");
        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.token)
            .send()
            .map_err(|e| PublishError::TagOperationFailed {
                tag: tag.to_string(),
                message: format!("Delete request failed: {e}"),
            })?;

        // 404 = already absent; the tag swap remains re-runnable.
        if response.status().is_success() || response.status().as_u16() == 404 {
            Ok(())
        } else {
            let status = response.status();
            let text = response.text().unwrap_or_default();
            Err(PublishError::TagOperationFailed {
                tag: tag.to_string(),
                message: format!("HTTP {status}: {text}"),
            })
        }
    }

    fn create_tag(&self, repo_id: &str, tag: &str, message: &str) -> Result<()> {
        Self::validate_repo_id(repo_id)?;
        let url = format!("{HF_API_BASE}/models/{repo_id}/tag/main");
        let body = serde_json::json!({ "tag": tag, "message": message });
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .map_err(|e| PublishError::TagOperationFailed {
                tag: tag.to_string(),
                message: format!("Create request failed: {e}"),
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let text = response.text().unwrap_or_default();
            Err(PublishError::TagOperationFailed {
                tag: tag.to_string(),
                message: format!("HTTP {status}: {text}"),
            })
        }
    }
}

impl std::fmt::Debug for HttpHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpHubClient").finish_non_exhaustive()
    }
}

fn is_no_op_response(body: &str) -> bool {
    body.contains(NO_OP_MARKER)
}

/// Partition collected files into (pattern matches, everything else).
fn split_by_patterns(
    files: Vec<(String, Vec<u8>)>,
    patterns: &[&str],
) -> (Vec<(String, Vec<u8>)>, Vec<(String, Vec<u8>)>) {
    files
        .into_iter()
        .partition(|(path, _)| patterns.iter().any(|p| matches_pattern(p, path)))
}

/// NDJSON body for the commit endpoint: a header line, `file` lines with
/// inline base64 content, `lfsFile` lines carrying only digest and size,
/// and `deletedFile` lines.
fn commit_body(
    message: &str,
    files: &[(String, Vec<u8>)],
    lfs_files: &[LfsEntry],
    deletions: &[String],
) -> String {
    let mut body = String::new();
    let header = serde_json::json!({
        "key": "header",
        "value": { "summary": message },
    });
    body.push_str(&header.to_string());
    body.push('\n');
    for (path, content) in files {
        let line = serde_json::json!({
            "key": "file",
            "value": {
                "path": path,
                "content": BASE64.encode(content),
                "encoding": "base64",
            },
        });
        body.push_str(&line.to_string());
        body.push('\n');
    }
    for entry in lfs_files {
        let line = serde_json::json!({
            "key": "lfsFile",
            "value": {
                "path": entry.path,
                "algo": "sha256",
                "oid": entry.oid,
                "size": entry.size,
            },
        });
        body.push_str(&line.to_string());
        body.push('\n');
    }
    for path in deletions {
        let line = serde_json::json!({
            "key": "deletedFile",
            "value": { "path": path },
        });
        body.push_str(&line.to_string());
        body.push('\n');
    }
    body
}

/// Request body for the git-LFS batch endpoint.
fn lfs_batch_body(entries: &[LfsEntry]) -> serde_json::Value {
    serde_json::json!({
        "operation": "upload",
        "transfers": ["basic"],
        "hash_algo": "sha256",
        "objects": entries
            .iter()
            .map(|e| serde_json::json!({ "oid": e.oid, "size": e.size }))
            .collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_id_must_be_owner_slash_name() {
        assert!(HttpHubClient::validate_repo_id("stanfordnlp/corenlp-arabic").is_ok());
        for bad in ["", "no-slash", "/name", "org/", "a/b/c"] {
            assert!(
                matches!(
                    HttpHubClient::validate_repo_id(bad),
                    Err(PublishError::InvalidRepoId { .. })
                ),
                "expected InvalidRepoId for {bad:?}"
            );
        }
    }

    #[test]
    fn no_op_marker_is_detected() {
        assert!(is_no_op_response(
            r#"{"error":"No files have been modified since last commit."}"#
        ));
        assert!(!is_no_op_response(r#"{"error":"Forbidden"}"#));
    }

    #[test]
    fn collect_files_is_recursive_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("models")).unwrap();
        std::fs::write(dir.path().join("models").join("weights.pt"), b"w").unwrap();
        std::fs::write(dir.path().join("README.md"), b"card").unwrap();
        std::fs::write(dir.path().join("a.jar"), b"jar").unwrap();

        let files = collect_files(dir.path()).unwrap();
        let paths: Vec<&str> = files.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(paths, ["README.md", "a.jar", "models/weights.pt"]);
    }

    #[test]
    fn explicit_token_builds_a_client() {
        let client = HttpHubClient::with_token("hf_fake");
        assert!(client.is_ok());
    }

    #[test]
    fn lfs_entry_carries_sha256_and_size() {
        let entry = LfsEntry::new("model.jar".to_string(), b"abc");
        assert_eq!(
            entry.oid,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(entry.size, 3);
    }

    #[test]
    fn lfs_pattern_files_split_away_from_inline() {
        let files = vec![
            ("README.md".to_string(), b"card".to_vec()),
            ("stanford-corenlp-models-arabic.jar".to_string(), b"jar".to_vec()),
            ("models/tokenize/combined.pt".to_string(), b"w".to_vec()),
        ];
        let (large, inline) = split_by_patterns(files, &["*.jar", "*.pt"]);
        let large: Vec<&str> = large.iter().map(|(p, _)| p.as_str()).collect();
        let inline: Vec<&str> = inline.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(
            large,
            ["stanford-corenlp-models-arabic.jar", "models/tokenize/combined.pt"]
        );
        assert_eq!(inline, ["README.md"]);
    }

    #[test]
    fn commit_body_references_large_files_by_digest() {
        let jar = b"jar-bytes".to_vec();
        let entry = LfsEntry::new("stanford-corenlp-models-arabic.jar".to_string(), &jar);
        let oid = entry.oid.clone();
        let body = commit_body(
            "Add model 4.5.4",
            &[("README.md".to_string(), b"card".to_vec())],
            &[entry],
            &[],
        );

        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains(r#""summary":"Add model 4.5.4""#));
        assert!(lines[1].contains(r#""key":"file""#));
        assert!(lines[1].contains(&BASE64.encode(b"card")));
        assert!(lines[2].contains(r#""key":"lfsFile""#));
        assert!(lines[2].contains(&oid));
        assert!(lines[2].contains(r#""size":9"#));
        // The artifact bytes never appear inline.
        assert!(!body.contains(&BASE64.encode(&jar)));
    }

    #[test]
    fn commit_body_lists_deletions() {
        let body = commit_body(
            "Add model 4.5.4",
            &[],
            &[],
            &["stanford-corenlp-models-arabic-old.jar".to_string()],
        );
        assert!(body.contains(r#""key":"deletedFile""#));
        assert!(body.contains("stanford-corenlp-models-arabic-old.jar"));
    }

    #[test]
    fn lfs_batch_body_declares_upload_of_each_object() {
        let entries = [
            LfsEntry::new("a.jar".to_string(), b"a"),
            LfsEntry::new("b.zip".to_string(), b"b"),
        ];
        let body = lfs_batch_body(&entries);
        assert_eq!(body["operation"], "upload");
        assert_eq!(body["hash_algo"], "sha256");
        assert_eq!(body["objects"].as_array().unwrap().len(), 2);
        assert_eq!(body["objects"][0]["oid"], entries[0].oid.as_str());
        assert_eq!(body["objects"][0]["size"], 1);
    }
}

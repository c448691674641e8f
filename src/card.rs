//! Model card generation
//!
//! Renders the README.md that accompanies every upload: a YAML metadata
//! block with a fixed key set and order (`tags`, `library_name`,
//! `language`, `license`), a short prose section, and a generation
//! timestamp with millisecond precision. Pure text substitution; the
//! timestamp is the only field that varies between runs.

use chrono::{DateTime, Utc};

use crate::catalog::ArtifactFamily;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Render the model card for one model.
///
/// A missing language code drops the `language:` line rather than failing;
/// the CoreNLP package artifact is not tied to a single language.
#[must_use]
pub fn render(
    family: ArtifactFamily,
    model_name: &str,
    language: Option<&str>,
    now: DateTime<Utc>,
) -> String {
    let mut card = String::from("---\ntags:\n");
    card.push_str(&format!("- {}\n", family_tag(family)));
    card.push_str(&format!("library_name: {}\n", family_tag(family)));
    if let Some(lang) = language {
        card.push_str(&format!("language: {lang}\n"));
    }
    card.push_str(&format!("license: {}\n", license(family)));
    card.push_str("---\n");

    card.push_str(&format!("# {} model for {model_name}\n", title(family)));
    card.push_str(prose(family));
    card.push_str(&format!(
        "Find more about it in [our website]({}) and our [GitHub repository]({}).\n",
        website(family),
        github(family)
    ));
    card.push('\n');
    card.push_str(&format!(
        "Last updated {}\n",
        now.format(TIMESTAMP_FORMAT)
    ));
    card
}

fn family_tag(family: ArtifactFamily) -> &'static str {
    match family {
        ArtifactFamily::Corenlp => "corenlp",
        ArtifactFamily::Stanza => "stanza",
    }
}

fn license(family: ArtifactFamily) -> &'static str {
    match family {
        ArtifactFamily::Corenlp => "gpl-2.0",
        ArtifactFamily::Stanza => "apache-2.0",
    }
}

fn title(family: ArtifactFamily) -> &'static str {
    match family {
        ArtifactFamily::Corenlp => "CoreNLP",
        ArtifactFamily::Stanza => "Stanza",
    }
}

fn prose(family: ArtifactFamily) -> &'static str {
    match family {
        ArtifactFamily::Corenlp => {
            "CoreNLP is your one stop shop for natural language processing in Java! \
             CoreNLP enables users to derive linguistic annotations for text, including \
             token and sentence boundaries, parts of speech, named entities, numeric and \
             time values, dependency and constituency parses, coreference, sentiment, \
             quote attributions, and relations.\n"
        }
        ArtifactFamily::Stanza => {
            "Stanza is a collection of accurate and efficient tools for the linguistic \
             analysis of many human languages. Starting from raw text to syntactic \
             analysis and entity recognition, Stanza brings state-of-the-art NLP models \
             to languages of your choosing.\n"
        }
    }
}

fn website(family: ArtifactFamily) -> &'static str {
    match family {
        ArtifactFamily::Corenlp => "https://stanfordnlp.github.io/CoreNLP",
        ArtifactFamily::Stanza => "https://stanfordnlp.github.io/stanza",
    }
}

fn github(family: ArtifactFamily) -> &'static str {
    match family {
        ArtifactFamily::Corenlp => "https://github.com/stanfordnlp/CoreNLP",
        ArtifactFamily::Stanza => "https://github.com/stanfordnlp/stanza",
    }
}

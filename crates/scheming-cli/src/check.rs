//! # Check Command
//!
//! Compiles one schema document and matches each candidate document
//! against it. A document that fails to load is reported as an error rather
//! than a mismatch; a schema that fails to load or compile aborts the run.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use scheming_core::Schema;
use scheming_engine::{compile, Matcher};
use serde::Serialize;

use crate::document::{self, Format};

/// Arguments for checking documents against a schema.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Schema document (JSON or YAML).
    #[arg(long, short = 's')]
    pub schema: PathBuf,

    /// Documents to match against the schema.
    #[arg(required = true)]
    pub documents: Vec<PathBuf>,

    /// Input format for the schema and every document.
    #[arg(long, value_enum, default_value_t = Format::Auto)]
    pub format: Format,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Print nothing; report through the exit code only.
    #[arg(long, short = 'q', conflicts_with = "json")]
    pub quiet: bool,
}

/// Outcome for one candidate document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum Outcome {
    Matched,
    Mismatched,
    Error { message: String },
}

/// Per-document line of a [`Report`].
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub path: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Result of a check run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub schema: String,
    pub documents: Vec<DocumentReport>,
}

impl Report {
    /// True when every document loaded and matched.
    pub fn all_matched(&self) -> bool {
        self.documents.iter().all(|d| d.outcome == Outcome::Matched)
    }

    pub fn matched_count(&self) -> usize {
        self.documents
            .iter()
            .filter(|d| d.outcome == Outcome::Matched)
            .count()
    }

    /// Human-readable report, one line per document plus a summary.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for doc in &self.documents {
            let line = match &doc.outcome {
                Outcome::Matched => format!("ok       {}", doc.path),
                Outcome::Mismatched => format!("MISMATCH {}", doc.path),
                Outcome::Error { message } => format!("ERROR    {}: {message}", doc.path),
            };
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str(&format!(
            "{}/{} document(s) match {}\n",
            self.matched_count(),
            self.documents.len(),
            self.schema
        ));
        out
    }
}

/// Load and compile the schema document at `path`.
///
/// # Errors
///
/// Fails if the document cannot be loaded or the schema does not compile.
pub fn load_matcher(path: &Path, format: Format) -> anyhow::Result<Matcher> {
    let value = document::load(path, format)?;
    let schema = Schema::from(value);
    compile(&schema).with_context(|| format!("compiling schema {}", path.display()))
}

/// Run the check described by `args`.
///
/// # Errors
///
/// Fails only when the schema cannot be loaded or compiled. Candidate
/// documents that fail to load are recorded in the report.
pub fn run(args: &CheckArgs) -> anyhow::Result<Report> {
    let matcher = load_matcher(&args.schema, args.format)?;
    tracing::debug!(schema = %args.schema.display(), "schema compiled");

    let documents = args
        .documents
        .iter()
        .map(|path| DocumentReport {
            path: path.display().to_string(),
            outcome: check_one(&matcher, path, args.format),
        })
        .collect();

    Ok(Report {
        schema: args.schema.display().to_string(),
        documents,
    })
}

fn check_one(matcher: &Matcher, path: &Path, format: Format) -> Outcome {
    match document::load(path, format) {
        Ok(candidate) => {
            let matched = matcher.matches(&candidate);
            tracing::info!(document = %path.display(), matched, "document checked");
            if matched {
                Outcome::Matched
            } else {
                Outcome::Mismatched
            }
        }
        Err(err) => {
            tracing::warn!(document = %path.display(), error = %err, "document could not be loaded");
            Outcome::Error {
                message: err.to_string(),
            }
        }
    }
}

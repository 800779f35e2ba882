use std::path::{Path, PathBuf};

use ketodot_core::ColorSummary;

pub fn run_completed(sources: usize, tuples: usize, summary: &ColorSummary) {
    tracing::info!(
        target: "ketodot",
        event = "run_completed",
        sources = sources,
        tuples = tuples,
        groups = summary.groups,
        merges = summary.merges,
        "graph generated"
    );
}

pub fn run_failed(error: &dyn std::error::Error) {
    tracing::error!(
        target: "ketodot",
        event = "run_failed",
        error = %error,
        "graph generation failed"
    );
}

pub fn watch_failed(error: &dyn std::error::Error) {
    tracing::error!(
        target: "ketodot",
        event = "watch_failed",
        error = %error,
        "watching stopped"
    );
}

pub fn watch_started(paths: &[PathBuf]) {
    let files = paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    tracing::info!(
        target: "ketodot",
        event = "watch_started",
        files = %files,
        "watching for changes"
    );
}

pub fn change_detected(path: &Path) {
    tracing::debug!(
        target: "ketodot",
        event = "change_detected",
        path = %path.display(),
        "input changed, regenerating"
    );
}

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::{AppConfig, OutputFormat};

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to write {target}: {cause}")]
    Write {
        target: String,
        #[source]
        cause: std::io::Error,
    },

    #[error("cannot write a {0} image to stdout; provide an output file")]
    ImageToStdout(OutputFormat),

    #[error("failed to run renderer '{binary}': {cause}")]
    Spawn {
        binary: String,
        #[source]
        cause: std::io::Error,
    },

    #[error("renderer '{binary}' failed ({status}): {stderr}")]
    Renderer {
        binary: String,
        status: String,
        stderr: String,
    },
}

/// Sends DOT text where the configuration asks: `stdout`, a DOT file, or an
/// image rendered by the external Graphviz binary.
pub fn emit<W: Write>(dot: &str, config: &AppConfig, stdout: &mut W) -> Result<(), OutputError> {
    let format = config.output.format;
    match (format.is_image(), config.output.path.as_deref()) {
        (false, None) => stdout
            .write_all(dot.as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(|cause| OutputError::Write {
                target: "stdout".to_string(),
                cause,
            }),
        (false, Some(path)) => std::fs::write(path, dot).map_err(|cause| OutputError::Write {
            target: path.display().to_string(),
            cause,
        }),
        (true, None) => Err(OutputError::ImageToStdout(format)),
        (true, Some(path)) => render_image(dot, format, path, &config.render.dot_binary),
    }
}

fn render_image(
    dot: &str,
    format: OutputFormat,
    path: &Path,
    binary: &str,
) -> Result<(), OutputError> {
    let spawn_error = |cause| OutputError::Spawn {
        binary: binary.to_string(),
        cause,
    };

    let mut child = Command::new(binary)
        .arg(format!("-T{}", format.graphviz_name()))
        .arg("-o")
        .arg(path)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(spawn_error)?;

    // A renderer that exits early breaks the pipe; its exit status and
    // stderr explain why, so collect them before looking at the write.
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(dot.as_bytes()),
        None => Ok(()),
    };

    let output = child.wait_with_output().map_err(spawn_error)?;
    if !output.status.success() {
        return Err(OutputError::Renderer {
            binary: binary.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    written.map_err(|cause| OutputError::Write {
        target: format!("renderer '{binary}'"),
        cause,
    })
}

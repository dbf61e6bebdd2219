//! Batch scripts: one `render` argument list per line.
//!
//! Options accumulate. Each line starts from the settings the previous
//! line left behind, so a script can set the paper once and then vary the
//! light or the viewing angle line by line.

use std::path::{Path, PathBuf};

use clap::Parser;

use super::render_proof;
use crate::cli::RenderArgs;
use crate::error::ProofError;
use crate::models::ProofConfig;

/// Default script name for `softproof batch`
pub const DEFAULT_SCRIPT: &str = "proof.scr";

#[derive(Parser)]
#[command(no_binary_name = true)]
struct ScriptLine {
    #[command(flatten)]
    args: RenderArgs,
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Pictures written, in script order
    pub rendered: Vec<PathBuf>,
    /// Lines whose render failed
    pub failed: Vec<usize>,
    /// Lines whose arguments did not parse
    pub skipped: Vec<usize>,
}

/// Run the script at `path` starting from `config`.
///
/// Only a missing or unreadable script is an error. Failing lines are
/// reported and the script continues.
pub fn run_batch(path: &Path, config: ProofConfig) -> Result<BatchReport, ProofError> {
    let script = std::fs::read_to_string(path).map_err(|source| ProofError::Script {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(script = %path.display(), "Running batch script");
    Ok(run_script(&script, config))
}

/// Run every line of `script`.
pub fn run_script(script: &str, mut config: ProofConfig) -> BatchReport {
    let mut report = BatchReport::default();

    for (index, line) in script.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let args = match ScriptLine::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => parsed.args,
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(
                    line = line_no,
                    error = message.lines().next().unwrap_or_default(),
                    "Skipping batch line"
                );
                report.skipped.push(line_no);
                continue;
            }
        };
        args.apply(&mut config);

        match render_proof(&config) {
            Ok(result) => report.rendered.push(result.output),
            Err(e) => {
                tracing::warn!(line = line_no, %e, "Batch line failed");
                report.failed.push(line_no);
            }
        }
    }

    tracing::info!(
        rendered = report.rendered.len(),
        failed = report.failed.len(),
        skipped = report.skipped.len(),
        "Batch finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn scene_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("paper.p"),
            "p 20\nm 10\nr 3 3\n100 100 100\n100 100 100\n100 100 100\n",
        )
        .unwrap();
        fs::write(dir.path().join("light.l"), "X 0\nY 0\nZ 500\n").unwrap();
        dir
    }

    fn base_config(dir: &Path) -> ProofConfig {
        ProofConfig {
            width_mm: 0.08,
            height_mm: 0.04,
            paper: dir.join("paper"),
            light: dir.join("light"),
            ..ProofConfig::default()
        }
    }

    #[test]
    fn test_options_accumulate_across_lines() {
        let dir = scene_dir();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        let script = format!(
            "# two views of one sheet\n-o {} -d 40\n\n-o {} -V 30\n",
            a.display(),
            b.display()
        );

        let report = run_script(&script, base_config(dir.path()));
        assert_eq!(report.rendered, vec![a.with_extension("png"), b.with_extension("png")]);
        assert!(report.failed.is_empty());

        // The second line kept the 40 µm dots from the first.
        let bytes = fs::read(b.with_extension("png")).unwrap();
        let reader = png::Decoder::new(bytes.as_slice()).read_info().unwrap();
        assert_eq!((reader.info().width, reader.info().height), (2, 1));
    }

    #[test]
    fn test_bad_lines_do_not_stop_the_script() {
        let dir = scene_dir();
        let out = dir.path().join("ok");
        let script = format!(
            "--no-such-flag\n-l {}\n-l {} -o {}\n",
            dir.path().join("missing").display(),
            dir.path().join("light").display(),
            out.display()
        );

        let report = run_script(&script, base_config(dir.path()));
        assert_eq!(report.skipped, vec![1]);
        assert_eq!(report.failed, vec![2]);
        assert_eq!(report.rendered, vec![out.with_extension("png")]);
    }

    #[test]
    fn test_missing_script_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_batch(&dir.path().join("none.scr"), ProofConfig::default()).unwrap_err();
        assert!(matches!(err, ProofError::Script { .. }));
    }
}

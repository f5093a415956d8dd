use super::ProcessorConfig;
use crate::error::{AudioError, AudioResult};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Input extensions recognized as audio, matched case-insensitively
pub const AUDIO_EXTENSIONS: [&str; 8] = ["mp3", "wav", "flac", "m4a", "ogg", "aac", "wma", "opus"];

/// One unit of batch work: an input file, its mirrored output path, and a
/// copy of the batch configuration. Consumed by exactly one worker.
#[derive(Debug, Clone)]
pub struct Task {
    /// Source audio file
    pub input_path: PathBuf,
    /// Destination WAV file
    pub output_path: PathBuf,
    /// Normalization parameters for this file
    pub config: ProcessorConfig,
}

/// Whether a path carries a recognized audio extension
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| AUDIO_EXTENSIONS.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Recursively enumerate `input_dir` for audio files.
///
/// Each match becomes a Task whose output path mirrors the input's relative
/// directory structure under `output_dir`, with the extension replaced by
/// `.wav`. Traversal errors on the input tree are fatal to the batch.
pub fn collect_tasks(
    input_dir: &Path,
    output_dir: &Path,
    config: ProcessorConfig,
) -> AudioResult<Vec<Task>> {
    let mut tasks = Vec::new();

    for entry in WalkDir::new(input_dir) {
        let entry = entry.map_err(|e| AudioError::Io(e.into()))?;
        if !entry.file_type().is_file() || !is_audio_file(entry.path()) {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(input_dir)
            .unwrap_or_else(|_| entry.path());
        let mut output_path = output_dir.join(rel);
        output_path.set_extension("wav");

        tasks.push(Task {
            input_path: entry.into_path(),
            output_path,
            config,
        });
    }

    Ok(tasks)
}

/// Create every distinct output parent directory before workers start.
///
/// `create_dir_all` succeeds when the directory already exists, so concurrent
/// or repeated runs are safe. Any real failure is fatal to the batch: there
/// is no valid destination for results.
pub fn ensure_output_dirs(tasks: &[Task]) -> AudioResult<()> {
    let mut seen = HashSet::new();

    for task in tasks {
        if let Some(parent) = task.output_path.parent() {
            if seen.insert(parent.to_path_buf()) {
                fs::create_dir_all(parent).map_err(|e| AudioError::DirectoryCreateFailed {
                    path: parent.to_path_buf(),
                    message: e.to_string(),
                })?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_is_audio_file() {
        assert!(is_audio_file(Path::new("a.mp3")));
        assert!(is_audio_file(Path::new("b.FLAC")));
        assert!(is_audio_file(Path::new("dir/c.Opus")));
        assert!(!is_audio_file(Path::new("d.txt")));
        assert!(!is_audio_file(Path::new("noext")));
        assert!(!is_audio_file(Path::new(".wav")));
    }

    #[test]
    fn test_collect_mirrors_tree() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        let output = dir.path().join("out");
        touch(&input.join("a.mp3"));
        touch(&input.join("sub/b.FLAC"));
        touch(&input.join("sub/deep/c.wav"));
        touch(&input.join("sub/skip.txt"));

        let mut tasks = collect_tasks(&input, &output, ProcessorConfig::default()).unwrap();
        tasks.sort_by(|a, b| a.input_path.cmp(&b.input_path));

        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].output_path, output.join("a.wav"));
        assert_eq!(tasks[1].output_path, output.join("sub/b.wav"));
        assert_eq!(tasks[2].output_path, output.join("sub/deep/c.wav"));
    }

    #[test]
    fn test_collect_empty_tree() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        fs::create_dir_all(&input).unwrap();

        let tasks = collect_tasks(&input, &dir.path().join("out"), ProcessorConfig::default())
            .unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_collect_missing_input_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = collect_tasks(
            &dir.path().join("no_such"),
            &dir.path().join("out"),
            ProcessorConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_ensure_output_dirs_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let tasks = vec![
            Task {
                input_path: PathBuf::from("x.mp3"),
                output_path: dir.path().join("out/sub/x.wav"),
                config: ProcessorConfig::default(),
            },
            Task {
                input_path: PathBuf::from("y.mp3"),
                output_path: dir.path().join("out/sub/y.wav"),
                config: ProcessorConfig::default(),
            },
        ];

        ensure_output_dirs(&tasks).unwrap();
        assert!(dir.path().join("out/sub").is_dir());
        // Existing directories are not an error
        ensure_output_dirs(&tasks).unwrap();
    }
}

use super::{process_file, Task};
use log::{error, info};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

/// Batch outcome totals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    /// Files written successfully
    pub processed: usize,
    /// Files that failed and were skipped
    pub failed: usize,
}

impl BatchReport {
    /// Total tasks accounted for
    pub fn total(&self) -> usize {
        self.processed + self.failed
    }
}

/// Resolve the worker count: the explicit request or the machine's available
/// parallelism, clamped to the task count, floor of one.
pub fn resolve_thread_count(requested: Option<usize>, task_count: usize) -> usize {
    let threads = requested.filter(|&n| n > 0).unwrap_or_else(|| {
        thread::available_parallelism().map(|p| p.get()).unwrap_or(4)
    });
    threads.min(task_count).max(1)
}

/// Distribute tasks across a fixed pool of worker threads.
///
/// Workers share a single atomic cursor into the task list; each claims the
/// next unclaimed index and runs the per-file pipeline on it until the list
/// is exhausted. No task runs twice, none is skipped, and a failing file
/// only costs that file: the outcome is counted and logged, sibling tasks
/// keep going. All workers are joined before this returns.
pub fn run(tasks: &[Task], threads: Option<usize>) -> BatchReport {
    let workers = resolve_thread_count(threads, tasks.len());

    let cursor = AtomicUsize::new(0);
    let processed = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    thread::scope(|s| {
        for _ in 0..workers {
            s.spawn(|| loop {
                // The cursor is the only mutable state shared between workers
                let index = cursor.fetch_add(1, Ordering::Relaxed);
                let Some(task) = tasks.get(index) else {
                    break;
                };

                match process_file(&task.input_path, &task.output_path, &task.config) {
                    Ok(()) => {
                        processed.fetch_add(1, Ordering::Relaxed);
                        info!("Processed: {}", task.input_path.display());
                    }
                    Err(e) => {
                        failed.fetch_add(1, Ordering::Relaxed);
                        error!("Failed: {} - {}", task.input_path.display(), e);
                    }
                }
            });
        }
    });

    BatchReport {
        processed: processed.load(Ordering::Relaxed),
        failed: failed.load(Ordering::Relaxed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::ProcessorConfig;
    use std::fs;
    use std::path::Path;

    #[test]
    fn test_resolve_thread_count() {
        assert_eq!(resolve_thread_count(Some(4), 100), 4);
        // Clamped to the task count
        assert_eq!(resolve_thread_count(Some(8), 3), 3);
        // Floor of one even with no tasks
        assert_eq!(resolve_thread_count(Some(8), 0), 1);
        // Zero request falls back to auto-detection
        assert!(resolve_thread_count(Some(0), 100) >= 1);
        assert!(resolve_thread_count(None, 100) >= 1);
    }

    fn write_sine_wav(path: &Path, secs: f64, rate: u32) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..(secs * rate as f64) as usize {
            let v = (2.0 * std::f64::consts::PI * 330.0 * i as f64 / rate as f64).sin() as f32;
            writer.write_sample(v * 0.5).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn make_tasks(dir: &Path, count: usize) -> Vec<Task> {
        (0..count)
            .map(|i| {
                let input_path = dir.join(format!("in_{i}.wav"));
                write_sine_wav(&input_path, 1.0 + i as f64 * 0.5, 44100);
                Task {
                    input_path,
                    output_path: dir.join(format!("out_{i}.wav")),
                    config: ProcessorConfig::default(),
                }
            })
            .collect()
    }

    #[test]
    fn test_run_processes_every_task() {
        let dir = tempfile::tempdir().unwrap();
        let tasks = make_tasks(dir.path(), 6);

        let report = run(&tasks, Some(3));
        assert_eq!(report.processed, 6);
        assert_eq!(report.failed, 0);
        for task in &tasks {
            assert!(task.output_path.exists());
        }
    }

    #[test]
    fn test_failure_is_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let mut tasks = make_tasks(dir.path(), 3);

        let bad_input = dir.path().join("corrupt.mp3");
        fs::write(&bad_input, [0u8; 32]).unwrap();
        tasks.push(Task {
            input_path: bad_input,
            output_path: dir.path().join("corrupt_out.wav"),
            config: ProcessorConfig::default(),
        });

        let report = run(&tasks, Some(2));
        assert_eq!(report.processed, 3);
        assert_eq!(report.failed, 1);
        assert_eq!(report.total(), 4);
    }

    #[test]
    fn test_thread_count_does_not_change_output() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = make_tasks(dir.path(), 4);

        let serial: Vec<Task> = inputs
            .iter()
            .map(|t| Task {
                output_path: dir.path().join(format!(
                    "serial_{}",
                    t.output_path.file_name().unwrap().to_str().unwrap()
                )),
                ..t.clone()
            })
            .collect();

        run(&inputs, Some(4));
        run(&serial, Some(1));

        for (parallel, serial) in inputs.iter().zip(&serial) {
            let a = fs::read(&parallel.output_path).unwrap();
            let b = fs::read(&serial.output_path).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_run_with_no_tasks() {
        let report = run(&[], Some(4));
        assert_eq!(report.processed, 0);
        assert_eq!(report.failed, 0);
    }
}

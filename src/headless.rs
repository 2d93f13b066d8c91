// Headless runner - streams one sort to stdout
//
// Used by `sortscope run` and by the default command when the TUI is
// disabled. Frames are printed as they are delivered, either as readable
// text or as JSON lines (one RunEvent per line), followed by a summary.

use anyhow::{bail, Context, Result};
use futures::StreamExt;
use serde::Serialize;
use std::io::Write;
use std::time::{Duration, Instant};

use crate::cli::RunArgs;
use crate::config::Config;
use crate::events::{RunEvent, Stats};
use crate::scheduler::{FrameStream, Scheduler};
use crate::sorting::sample;
use crate::sorting::{apply_frame, elements, is_sorted, Algorithm, Frame};

/// How events are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    JsonLines,
}

/// What a finished run looked like from the consumer's side
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub algorithm: Algorithm,
    pub len: usize,
    pub frames: u64,
    pub comparisons: u64,
    pub swaps: u64,
    pub passes: usize,
    pub elapsed_ms: u128,
    /// Values as replayed from the delivered frames
    pub sorted: Vec<u32>,
}

/// Input array for a run: explicit values, or random ones of the requested size
pub fn input_values(config: &Config, args: &RunArgs) -> Vec<u32> {
    if let Some(values) = &args.values {
        return values.clone();
    }

    let len = args.size.unwrap_or(config.sample.size);
    sample::values(&mut sample::sample_rng(args.seed), len)
}

/// Run one sort and print it; errors on rejection or a failed run
pub async fn run(config: &Config, args: RunArgs) -> Result<()> {
    let algorithm = args.algorithm.or(config.algorithm);
    let values = input_values(config, &args);

    let mut scheduler_config = config.scheduler_config();
    if args.instant {
        scheduler_config.base_duration = Duration::ZERO;
    }
    let scheduler = Scheduler::new(scheduler_config);

    let format = if args.json {
        OutputFormat::JsonLines
    } else {
        OutputFormat::Text
    };

    let stream = scheduler
        .request_sort(algorithm, values.len(), &values)
        .context("Sort request rejected")?;

    let mut out = std::io::stdout();
    if format == OutputFormat::Text {
        writeln!(out, "input: {:?}", values)?;
    }

    // Ctrl+C drops the stream, which stops the engine and frees the scheduler
    let summary = tokio::select! {
        result = consume(stream, &values, format, &mut out) => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted, abandoning run");
            bail!("Interrupted");
        }
    };

    write_summary(&mut out, &summary, format)?;
    out.flush()?;
    Ok(())
}

/// Drain a run's stream, writing each event, until its terminal marker
pub async fn consume<W: Write>(
    mut stream: FrameStream,
    initial: &[u32],
    format: OutputFormat,
    out: &mut W,
) -> Result<RunSummary> {
    let mut bars = elements(initial);
    let mut stats = Stats::default();
    let started = Instant::now();

    while let Some(event) = stream.next().await {
        match format {
            OutputFormat::JsonLines => writeln!(out, "{}", serde_json::to_string(&event)?)?,
            OutputFormat::Text => write_text(out, &event)?,
        }
        if event.is_terminal() {
            out.flush()?;
        }

        match event {
            RunEvent::Frame(frame) => {
                apply_frame(&mut bars, &frame);
                stats.record(&frame);
            }
            RunEvent::Completed {
                algorithm, passes, ..
            } => {
                stats.elapsed = started.elapsed();
                let sorted: Vec<u32> = bars.iter().map(|e| e.num).collect();
                debug_assert!(is_sorted(&sorted));

                return Ok(RunSummary {
                    kind: "summary",
                    algorithm,
                    len: bars.len(),
                    frames: stats.frames,
                    comparisons: stats.comparisons,
                    swaps: stats.swaps,
                    passes,
                    elapsed_ms: stats.elapsed.as_millis(),
                    sorted,
                });
            }
            RunEvent::Failed { run_id, error } => {
                return Err(anyhow::Error::new(error).context(format!("Run {} failed", run_id)));
            }
        }
    }

    bail!("Run ended without a completion marker")
}

fn write_text<W: Write>(out: &mut W, event: &RunEvent) -> Result<()> {
    match event {
        RunEvent::Frame(frame) => writeln!(out, "{}", describe_frame(frame))?,
        RunEvent::Completed {
            run_id, algorithm, ..
        } => writeln!(out, "run {} complete: {}", run_id, algorithm)?,
        RunEvent::Failed { run_id, error } => writeln!(out, "run {} failed: {}", run_id, error)?,
    }
    Ok(())
}

/// `#12  3=45:comparing 4=12:comparing`
fn describe_frame(frame: &Frame) -> String {
    let updates: Vec<String> = frame
        .updates
        .iter()
        .map(|u| {
            let highlight = serde_json::to_value(u.highlight)
                .ok()
                .and_then(|v| v.as_str().map(str::to_owned))
                .unwrap_or_default();
            format!("{}={}:{}", u.position, u.value, highlight)
        })
        .collect();
    format!("#{:<5} {}", frame.seq, updates.join(" "))
}

fn write_summary<W: Write>(out: &mut W, summary: &RunSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::JsonLines => writeln!(out, "{}", serde_json::to_string(summary)?)?,
        OutputFormat::Text => {
            writeln!(
                out,
                "{}: {} values, {} frames ({} comparisons, {} swaps), {} passes in {}ms",
                summary.algorithm,
                summary.len,
                summary.frames,
                summary.comparisons,
                summary.swaps,
                summary.passes,
                summary.elapsed_ms
            )?;
            writeln!(out, "sorted: {:?}", summary.sorted)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::SchedulerConfig;
    use crate::sorting::{Highlight, SortError};

    fn instant_scheduler() -> Scheduler {
        Scheduler::new(SchedulerConfig {
            base_duration: Duration::ZERO,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_consume_text_output_and_summary() {
        let scheduler = instant_scheduler();
        let values = vec![3, 1, 2];
        let stream = scheduler
            .request_sort(Some(Algorithm::Insertion), 3, &values)
            .unwrap();

        let mut out = Vec::new();
        let summary = consume(stream, &values, OutputFormat::Text, &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("#0"));
        assert!(text.contains(":done"));
        assert!(text.trim_end().ends_with("complete: Insertion Sort"));

        assert_eq!(summary.sorted, vec![1, 2, 3]);
        assert_eq!(summary.len, 3);
        assert!(summary.comparisons > 0);
    }

    #[tokio::test]
    async fn test_consume_json_lines_parse_back() {
        let scheduler = instant_scheduler();
        let values = vec![5, 4, 3, 2];
        let stream = scheduler
            .request_sort(Some(Algorithm::Bitonic), 4, &values)
            .unwrap();

        let mut out = Vec::new();
        let summary = consume(stream, &values, OutputFormat::JsonLines, &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let events: Vec<RunEvent> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(events.len() as u64, summary.frames + 1);
        assert!(events.last().unwrap().is_terminal());

        let last_frames: Vec<_> = events
            .iter()
            .rev()
            .skip(1)
            .take(4)
            .filter_map(|e| match e {
                RunEvent::Frame(f) => Some(f.updates[0].highlight),
                _ => None,
            })
            .collect();
        assert_eq!(last_frames, vec![Highlight::Done; 4]);
    }

    #[tokio::test]
    async fn test_rejected_request_reports_invalid_input() {
        let scheduler = instant_scheduler();
        let err = scheduler
            .request_sort(Some(Algorithm::Bitonic), 3, &[3, 2, 1])
            .unwrap_err();
        assert!(matches!(err, SortError::InvalidInput(_)));
    }

    #[test]
    fn test_input_values_prefers_explicit_values() {
        let config = Config::default();
        let args = RunArgs {
            values: Some(vec![9, 8, 7]),
            size: Some(50),
            ..Default::default()
        };
        assert_eq!(input_values(&config, &args), vec![9, 8, 7]);
    }

    #[test]
    fn test_input_values_seeded_is_reproducible() {
        let config = Config::default();
        let args = RunArgs {
            size: Some(12),
            seed: Some(99),
            ..Default::default()
        };

        let a = input_values(&config, &args);
        let b = input_values(&config, &args);
        assert_eq!(a.len(), 12);
        assert_eq!(a, b);
    }

    #[test]
    fn test_describe_frame() {
        let frame = Frame {
            seq: 12,
            updates: vec![crate::sorting::Update {
                position: 3,
                value: 45,
                highlight: Highlight::Comparing,
            }],
        };
        assert_eq!(describe_frame(&frame), "#12    3=45:comparing");
    }
}

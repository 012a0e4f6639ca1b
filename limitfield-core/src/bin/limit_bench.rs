//! Normalization Benchmarking Tool
//!
//! Measures throughput of the normalization pipeline on a text file, one
//! normalization per line, the way a field sees pasted or typed values.
//!
//! ## What It Benchmarks
//!
//! 1. **Lines**: Each line normalized once into a reused buffer
//! 2. **Keystrokes**: Each line typed one scalar at a time into a [`LimitField`],
//!    renormalizing the whole value after every keystroke
//!
//! Besides timing, each pass reports how much the profile actually removed:
//! scalars dropped per line, and keystrokes that left the value unchanged.
//!
//! ## Usage
//!
//! ```bash
//! # Default profile: digits only, max 16, groups of 4
//! ./target/release/limit_bench /path/to/input.txt
//!
//! # Named profile from a TOML file
//! ./target/release/limit_bench /path/to/input.txt profiles.toml card
//!
//! # Show profile loading logs
//! RUST_LOG=limitfield_core=info ./target/release/limit_bench input.txt profiles.toml email
//! ```
//!
//! ## Example Output
//!
//! ```text
//! === Lines ===
//! calls        1000000  (19.2 M/s)
//! elapsed      0.052 s  (812.4 MiB/s in)
//! output       15.3 MiB
//! dropped      3.41 scalars/line
//! ```

use std::env;
use std::error::Error;
use std::fs;
use std::time::{Duration, Instant};

use limitfield_core::pipeline::grouping::SEPARATOR;
use limitfield_core::{CharacterClass, LimitField, NormalizationConfig, ProfileSet, TextNormalizer};
use tracing_subscriber::EnvFilter;

const WARMUP_RUNS: u32 = 1;
const MEASURE_RUNS: u32 = 5;

const USAGE: &str = "Usage: limit_bench <path> [profiles.toml profile]";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(true)
        .init();

    let args: Vec<String> = env::args().collect();

    let Some(path) = args.get(1) else {
        eprintln!("{}", USAGE);
        std::process::exit(1);
    };

    let config = match (args.get(2), args.get(3)) {
        (Some(file), Some(name)) => ProfileSet::load(file)?.get(name)?,
        (Some(_), None) => {
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
        _ => NormalizationConfig::default()
            .with_character_class(CharacterClass::DigitsOnly)
            .with_max_length(16)
            .with_group_size(4),
    };

    let bytes = fs::read(path)?;
    let input = std::str::from_utf8(&bytes)?;
    let lines: Vec<&str> = input.lines().collect();

    println!("input        {} in {} lines", mib(input.len()), lines.len());
    println!("config       {:?}\n", config);

    bench_lines(&lines, input.len(), &config).print();
    bench_keystrokes(&lines, input.len(), &config).print();

    Ok(())
}

/// Outcome of one benchmark pass.
struct Pass {
    label: &'static str,
    elapsed: Duration,
    input_bytes: usize,
    calls: u64,
    lines: u64,
    output_bytes: usize,
    /// Input scalars missing from the final value of each line, summed over one run.
    dropped: u64,
    /// Keystrokes that left the field value unchanged.
    rejected: Option<u64>,
}

impl Pass {
    fn print(&self) {
        let secs = self.elapsed.as_secs_f64();

        println!("=== {} ===", self.label);
        println!("calls        {}  ({:.1} M/s)", self.calls, self.calls as f64 / secs / 1e6);
        println!(
            "elapsed      {:.3} s  ({:.1} MiB/s in)",
            secs,
            self.input_bytes as f64 / (1024.0 * 1024.0) / secs
        );
        println!("output       {}", mib(self.output_bytes));
        if self.lines > 0 {
            println!("dropped      {:.2} scalars/line", self.dropped as f64 / self.lines as f64);
        }
        if let Some(rejected) = self.rejected {
            println!(
                "rejected     {} keystrokes ({:.1}%)",
                rejected,
                100.0 * rejected as f64 / self.calls.max(1) as f64
            );
        }
        println!();
    }
}

fn bench_lines(lines: &[&str], input_bytes: usize, config: &NormalizationConfig) -> Pass {
    let normalizer = TextNormalizer::new(config.clone());
    let mut out = String::with_capacity(256);
    let mut output_bytes = 0usize;
    let mut dropped = 0u64;

    let elapsed = timed(|| {
        output_bytes = 0;
        dropped = 0;
        for line in lines {
            normalizer.normalize_into(line, &mut out);
            output_bytes += out.len();
            dropped += scalars_dropped(line, &out);
        }
        std::hint::black_box(output_bytes);
    });

    Pass {
        label: "Lines",
        elapsed,
        input_bytes,
        calls: lines.len() as u64,
        lines: lines.len() as u64,
        output_bytes,
        dropped,
        rejected: None,
    }
}

fn bench_keystrokes(lines: &[&str], input_bytes: usize, config: &NormalizationConfig) -> Pass {
    let mut field = LimitField::new(config.clone());
    let mut typed = String::with_capacity(256);
    let mut calls = 0u64;
    let mut rejected = 0u64;
    let mut output_bytes = 0usize;
    let mut dropped = 0u64;

    let elapsed = timed(|| {
        calls = 0;
        rejected = 0;
        output_bytes = 0;
        dropped = 0;
        for line in lines {
            field.clear();
            for c in line.chars() {
                // Append to the displayed value, as an input method would
                typed.clear();
                typed.push_str(field.text());
                typed.push(c);

                let before = field.revision();
                field.input(&typed);
                if field.revision() == before {
                    rejected += 1;
                }
                calls += 1;
            }
            output_bytes += field.text().len();
            dropped += scalars_dropped(line, field.text());
        }
        std::hint::black_box(field.revision());
    });

    Pass {
        label: "Keystrokes",
        elapsed,
        input_bytes,
        calls,
        lines: lines.len() as u64,
        output_bytes,
        dropped,
        rejected: Some(rejected),
    }
}

/// Input scalars minus output scalars, not counting inserted separators.
///
/// Case expansions ("ß" -> "SS") can make the output longer; those lines
/// count as zero.
fn scalars_dropped(input: &str, output: &str) -> u64 {
    let kept = output.chars().filter(|&c| c != SEPARATOR).count();
    input.chars().count().saturating_sub(kept) as u64
}

/// Warms up, then returns the mean wall time of the measured runs.
fn timed<F: FnMut()>(mut f: F) -> Duration {
    for _ in 0..WARMUP_RUNS {
        f();
    }

    let start = Instant::now();
    for _ in 0..MEASURE_RUNS {
        f();
    }
    start.elapsed() / MEASURE_RUNS
}

fn mib(bytes: usize) -> String {
    format!("{:.1} MiB", bytes as f64 / (1024.0 * 1024.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropped_ignores_separators() {
        assert_eq!(scalars_dropped("88888sss8888", "8888 8888 8"), 3);
        assert_eq!(scalars_dropped("4111 1111", "4111 1111"), 1);
    }

    #[test]
    fn dropped_saturates_on_case_expansion() {
        assert_eq!(scalars_dropped("ß", "SS"), 0);
    }

    #[test]
    fn keystroke_pass_counts_rejected_input() {
        let config = NormalizationConfig::default()
            .with_character_class(CharacterClass::DigitsOnly)
            .with_max_length(4);
        let pass = bench_keystrokes(&["12ab345"], 7, &config);
        assert_eq!(pass.calls, 7);
        // 'a', 'b' filtered, '5' over the limit
        assert_eq!(pass.rejected, Some(3));
        assert_eq!(pass.dropped, 3);
        assert_eq!(pass.output_bytes, 4);
    }
}

//! Line-oriented step protocol.
//!
//! ```text
//! # comments and blank lines are skipped
//! open screenshots/home.png
//! When I open image `baselines/home.png`
//! close
//! teardown
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::sync::mpsc;

use tracing::{debug, error};

use crate::messages::StepCommand;

/// Where steps are read from.
#[derive(Clone, Debug)]
pub enum StepSource {
    Stdin,
    File(PathBuf),
}

/// Parse one step line. Returns `None` for blank lines and comments.
pub fn parse_step(line: &str) -> Option<StepCommand> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let lower = line.to_ascii_lowercase();
    match lower.as_str() {
        "close" => return Some(StepCommand::Close),
        "teardown" | "quit" | "exit" => return Some(StepCommand::Teardown),
        _ => {}
    }

    if let Some(rest) = strip_prefix_ignore_case(line, "open ") {
        let path = unquote(rest.trim());
        if !path.is_empty() {
            return Some(StepCommand::Open {
                path: PathBuf::from(path),
            });
        }
    }

    if let Some(path) = parse_natural_open(line) {
        return Some(StepCommand::Open {
            path: PathBuf::from(path),
        });
    }

    Some(StepCommand::Unknown {
        line: line.to_string(),
    })
}

/// ``[When|Given|And] I open image `<path>` ``
fn parse_natural_open(line: &str) -> Option<&str> {
    let mut rest = line;
    for keyword in ["when ", "given ", "then ", "and "] {
        if let Some(stripped) = strip_prefix_ignore_case(rest, keyword) {
            rest = stripped.trim_start();
            break;
        }
    }
    let rest = strip_prefix_ignore_case(rest, "i open image ")?.trim();
    let inner = rest.strip_prefix('`')?.strip_suffix('`')?;
    (!inner.is_empty()).then_some(inner)
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

fn unquote(s: &str) -> &str {
    for quote in ['"', '\'', '`'] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|r| r.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}

/// Read steps on a background thread and forward them to the worker. End of
/// input (or a read error) becomes a teardown.
pub fn spawn_step_reader(source: StepSource, cmd_tx: mpsc::Sender<StepCommand>) {
    std::thread::Builder::new()
        .name("glimpse-step-reader".into())
        .spawn(move || {
            if let Err(e) = read_steps(&source, &cmd_tx) {
                error!("reading steps from {source:?} failed: {e}");
            }
            let _ = cmd_tx.send(StepCommand::Teardown);
        })
        .expect("Failed to spawn step reader thread");
}

fn read_steps(source: &StepSource, cmd_tx: &mpsc::Sender<StepCommand>) -> io::Result<()> {
    let reader: Box<dyn BufRead> = match source {
        StepSource::Stdin => Box::new(BufReader::new(io::stdin())),
        StepSource::File(path) => Box::new(BufReader::new(File::open(path)?)),
    };

    for line in reader.lines() {
        let line = line?;
        let Some(step) = parse_step(&line) else {
            continue;
        };
        debug!(?step, "step read");
        let teardown = step == StepCommand::Teardown;
        if cmd_tx.send(step).is_err() || teardown {
            break;
        }
    }
    Ok(())
}

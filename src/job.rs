use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Lines, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::conversion_spec::ConversionSpec;
use crate::engine::Engine;
use crate::error::{ConversionError, InvalidArgument, InvalidState};
use crate::ffmpeg::FFmpeg;
use crate::timecode::Timecode;

/// Lines of engine output retained for the diagnostic tail on failure.
const TAIL_LINES: usize = 20;

/// How long a cancelled engine process gets to die before we stop polling
/// and force the issue once more.
const KILL_GRACE: Duration = Duration::from_secs(2);
const KILL_POLL: Duration = Duration::from_millis(50);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JobState {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProgressEvent {
    pub timecode: Timecode,
    pub raw_line: String,
}

/// One conversion of one file. Owns the engine invocation it starts; created
/// Pending, Running once iteration begins, and ends in exactly one of
/// Completed, Failed or Cancelled.
pub struct TranscodeJob {
    source: PathBuf,
    destination: PathBuf,
    spec: ConversionSpec,
    engine: Box<dyn Engine>,
    state: JobState,
    cancel: Arc<AtomicBool>,
    last_timecode: Option<Timecode>,
    error: Option<ConversionError>,
    iterated: bool,
    child: Option<Child>,
    lines: Option<Lines<BufReader<ChildStdout>>>,
    tail: VecDeque<String>,
}

impl TranscodeJob {
    pub fn start(
        source: PathBuf,
        destination: PathBuf,
        spec: ConversionSpec,
    ) -> Result<Self, InvalidArgument> {
        TranscodeJob::with_engine(source, destination, spec, Box::new(FFmpeg::new()))
    }

    /// Like `start`, but with a caller-supplied engine client. Path checks
    /// happen here, before anything is spawned.
    pub fn with_engine(
        source: PathBuf,
        destination: PathBuf,
        spec: ConversionSpec,
        engine: Box<dyn Engine>,
    ) -> Result<Self, InvalidArgument> {
        if source.as_os_str().is_empty() {
            return Err(InvalidArgument::new("source path must not be empty"));
        }
        if destination.as_os_str().is_empty() {
            return Err(InvalidArgument::new("destination path must not be empty"));
        }
        if source == destination {
            return Err(InvalidArgument::new("destination path must differ from source path"));
        }
        Ok(TranscodeJob {
            source,
            destination,
            spec,
            engine,
            state: JobState::Pending,
            cancel: Arc::new(AtomicBool::new(false)),
            last_timecode: None,
            error: None,
            iterated: false,
            child: None,
            lines: None,
            tail: VecDeque::new(),
        })
    }

    /// Flag observed between progress lines; setting it kills the engine
    /// process. Compatible with `signal_hook::flag::register`.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn last_timecode(&self) -> Option<Timecode> {
        self.last_timecode
    }

    pub fn error(&self) -> Option<&ConversionError> {
        self.error.as_ref()
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn spec(&self) -> &ConversionSpec {
        &self.spec
    }

    /// Spawns the engine and returns the progress sequence. Single use: any
    /// second call is an InvalidState, whatever became of the first.
    pub fn progress(&mut self) -> Result<Progress<'_>, InvalidState> {
        if self.iterated {
            return Err(InvalidState::new("progress() may only be iterated once per job"));
        }
        self.iterated = true;
        self.state = JobState::Running;
        match self.engine.start(&self.source, &self.destination, &self.spec) {
            Ok(mut child) => match child.stdout.take() {
                Some(stdout) => {
                    self.lines = Some(BufReader::new(stdout).lines());
                    self.child = Some(child);
                },
                None => {
                    let _ = child.kill();
                    let _ = child.wait();
                    self.state = JobState::Failed;
                    self.error = Some(ConversionError::for_file(
                        &self.source,
                        None,
                        vec![String::from("engine child process has no stdout handle")],
                    ));
                },
            },
            Err(err) => {
                self.state = JobState::Failed;
                self.error = Some(ConversionError::for_file(
                    &self.source,
                    None,
                    vec![format!("failed to start engine: {}", err)],
                ));
            },
        }
        Ok(Progress { job: self })
    }

    fn remember(&mut self, line: &str) {
        if self.tail.len() == TAIL_LINES {
            self.tail.pop_front();
        }
        self.tail.push_back(String::from(line));
    }

    /// Parses one line of engine output. ffmpeg's `-progress pipe:1` stream
    /// is `key=value` pairs; only `out_time` markers become events, anything
    /// else is log noise and is skipped.
    fn parse_progress_line(&mut self, line: String) -> Option<ProgressEvent> {
        let timecode = match line.split_once('=') {
            Some(("out_time", value)) => Timecode::from_str(value.trim())?,
            _ => return None,
        };
        // never surface a regression as newer progress
        let timecode = match self.last_timecode {
            Some(last) if timecode < last => last,
            _ => timecode,
        };
        self.last_timecode = Some(timecode);
        Some(ProgressEvent {
            timecode,
            raw_line: line,
        })
    }

    fn finish(&mut self) {
        let mut child = match self.child.take() {
            Some(child) => child,
            None => return,
        };
        self.drain_stderr(&mut child);
        match child.wait() {
            Ok(status) if status.success() => {
                self.state = JobState::Completed;
            },
            Ok(status) => {
                self.state = JobState::Failed;
                self.error = Some(ConversionError::for_file(
                    &self.source,
                    status.code(),
                    self.tail.iter().cloned().collect(),
                ));
            },
            Err(err) => {
                self.state = JobState::Failed;
                self.remember(&format!("error waiting for engine process: {}", err));
                self.error = Some(ConversionError::for_file(
                    &self.source,
                    None,
                    self.tail.iter().cloned().collect(),
                ));
            },
        }
    }

    fn drain_stderr(&mut self, child: &mut Child) {
        let mut buf = Vec::new();
        if let Some(stderr) = child.stderr.take() {
            if BufReader::new(stderr).read_to_end(&mut buf).is_ok() {
                if let Ok(text) = String::from_utf8(buf) {
                    for line in text.lines().filter(|l| !l.is_empty()) {
                        self.remember(line);
                    }
                }
            }
        }
    }

    fn cancel_child(&mut self) {
        let mut child = match self.child.take() {
            Some(child) => child,
            None => {
                self.state = JobState::Cancelled;
                return;
            },
        };
        let _ = child.kill();
        let deadline = Instant::now() + KILL_GRACE;
        loop {
            match child.try_wait() {
                Ok(Some(_)) => break,
                Ok(None) if Instant::now() < deadline => thread::sleep(KILL_POLL),
                _ => {
                    // still alive after the grace period
                    let _ = child.kill();
                    let _ = child.wait();
                    break;
                },
            }
        }
        // partial output stays on disk; cleaning up is the caller's call
        self.state = JobState::Cancelled;
    }
}

impl Drop for TranscodeJob {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// Lazy, finite, single-consumer sequence of progress events. Exhausting it
/// drives the job to its terminal state.
pub struct Progress<'a> {
    job: &'a mut TranscodeJob,
}

impl Iterator for Progress<'_> {
    type Item = ProgressEvent;

    fn next(&mut self) -> Option<ProgressEvent> {
        loop {
            if self.job.state != JobState::Running {
                return None;
            }
            if self.job.cancel.load(Ordering::Relaxed) {
                self.job.cancel_child();
                return None;
            }
            let line = match self.job.lines.as_mut() {
                Some(lines) => lines.next(),
                None => None,
            };
            match line {
                Some(Ok(l)) => {
                    self.job.remember(&l);
                    if let Some(event) = self.job.parse_progress_line(l) {
                        return Some(event);
                    }
                },
                Some(Err(_)) | None => {
                    self.job.lines = None;
                    if self.job.cancel.load(Ordering::Relaxed) {
                        self.job.cancel_child();
                    } else {
                        self.job.finish();
                    }
                    return None;
                },
            }
        }
    }
}

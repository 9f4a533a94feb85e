//! Pose sources feeding per-frame hand landmarks into the application.
//!
//! Landmark extraction runs in an external hand-pose estimator (for example a
//! MediaPipe Hands process with `max_num_hands = 1` and 0.7 detection/tracking
//! confidence). It writes one JSON object per frame, newline delimited:
//!
//! ```text
//! {"width":640,"height":480,"timestamp_ms":1234,"landmarks":[[0.51,0.82,0.0], ...]}
//! ```
//!
//! `landmarks` is `null` or missing when no hand is visible, and
//! `timestamp_ms` is optional. Malformed frames are rejected here, before the
//! classifier ever sees them.

use crate::{
    constants::MAX_FRAME_DIMENSION,
    hand_pose::{FrameSize, HandPose},
    Error, Result,
};
use log::{debug, info};
use serde::Deserialize;
use std::{
    fs::File,
    io::{self, BufRead, BufReader, StdinLock},
    path::Path,
    process::{Child, ChildStdout, Command, Stdio},
};

/// One frame of estimator output
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Pixel size of the source frame
    pub size: FrameSize,
    /// Capture time supplied by the estimator, if any
    pub timestamp_ms: Option<u64>,
    /// Tracked hand, `None` when no hand was detected
    pub hand: Option<HandPose>,
}

/// Wire format of a single estimator line
#[derive(Debug, Deserialize)]
struct FrameMessage {
    width: u32,
    height: u32,
    #[serde(default)]
    timestamp_ms: Option<u64>,
    #[serde(default)]
    landmarks: Option<Vec<[f32; 3]>>,
}

/// Parse and validate one JSON frame
///
/// # Errors
///
/// Returns `Error::PoseStream` if the line is not a valid frame object and
/// `Error::InvalidInput` if the frame size or landmark set is malformed.
pub fn parse_frame(line: &str) -> Result<Frame> {
    let message: FrameMessage = serde_json::from_str(line)
        .map_err(|e| Error::PoseStream(format!("Failed to parse frame: {e}")))?;

    if message.width == 0 || message.height == 0 {
        return Err(Error::InvalidInput(format!(
            "Frame size must be non-zero, got {}x{}",
            message.width, message.height
        )));
    }
    if message.width > MAX_FRAME_DIMENSION || message.height > MAX_FRAME_DIMENSION {
        return Err(Error::InvalidInput(format!(
            "Frame size {}x{} exceeds {MAX_FRAME_DIMENSION} pixels",
            message.width, message.height
        )));
    }

    let hand = message
        .landmarks
        .as_deref()
        .map(HandPose::from_points)
        .transpose()?;

    Ok(Frame {
        size: FrameSize::new(message.width, message.height),
        timestamp_ms: message.timestamp_ms,
        hand,
    })
}

/// Trait for per-frame pose providers
pub trait PoseSource {
    /// Next frame, or `None` once the stream has ended
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails. Malformed frames surface as
    /// `Error::PoseStream` or `Error::InvalidInput`; the source stays usable
    /// and the following call moves on to the next frame.
    fn next_frame(&mut self) -> Result<Option<Frame>>;
}

impl<T: PoseSource + ?Sized> PoseSource for Box<T> {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        (**self).next_frame()
    }
}

/// Newline-delimited JSON frames from any buffered reader
pub struct JsonLinesSource<R> {
    reader: R,
    line: String,
    line_number: usize,
}

impl<R: BufRead> JsonLinesSource<R> {
    /// Wrap a buffered reader
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            line_number: 0,
        }
    }

    /// Number of lines consumed so far
    #[must_use]
    pub const fn line_number(&self) -> usize {
        self.line_number
    }
}

impl JsonLinesSource<BufReader<File>> {
    /// Read frames from a recorded file
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        info!("Opening pose recording: {}", path.as_ref().display());
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl JsonLinesSource<StdinLock<'static>> {
    /// Read frames from standard input
    #[must_use]
    pub fn stdin() -> Self {
        info!("Reading poses from stdin");
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> PoseSource for JsonLinesSource<R> {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let trimmed = self.line.trim();
            if trimmed.is_empty() {
                continue;
            }

            return parse_frame(trimmed).map(Some).map_err(|e| {
                debug!("Rejected line {}: {}", self.line_number, e);
                e
            });
        }
    }
}

/// Estimator running as a child process, read through its stdout
pub struct SubprocessSource {
    process: Child,
    reader: JsonLinesSource<BufReader<ChildStdout>>,
}

impl SubprocessSource {
    /// Spawn the estimator command
    ///
    /// # Errors
    ///
    /// Returns `Error::PoseStream` if the process cannot be started.
    pub fn spawn(program: &str, args: &[String]) -> Result<Self> {
        info!("Starting pose estimator: {} {}", program, args.join(" "));

        let mut process = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| Error::PoseStream(format!("Failed to start {program}: {e}")))?;

        let stdout = process
            .stdout
            .take()
            .ok_or_else(|| Error::PoseStream("Estimator stdout not captured".to_string()))?;

        Ok(Self {
            process,
            reader: JsonLinesSource::new(BufReader::new(stdout)),
        })
    }
}

impl PoseSource for SubprocessSource {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        self.reader.next_frame()
    }
}

impl Drop for SubprocessSource {
    fn drop(&mut self) {
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

//! Breathing-pulse meditation aid.
//!
//! A [`BreathingSession`] is either idle or running. While running it owns a
//! tokio task that pulses a [`Pulse`] target through one breath every
//! [`BREATH_PERIOD_MS`] (rest → peak → rest, ease-in-out) and keeps optional
//! background audio playing. Starting a running session does nothing.

use crate::config::Config;
use crate::constants::{BREATH_FRAME_MS, BREATH_PEAK_SCALE, BREATH_PERIOD_MS, BREATH_REST_SCALE};
use crate::errors::{AppResult, AudioError};
use std::future::Future;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// CSS `ease-in-out`, i.e. `cubic-bezier(0.42, 0, 0.58, 1)`.
fn ease_in_out(t: f64) -> f64 {
    const X1: f64 = 0.42;
    const X2: f64 = 0.58;

    let t = t.clamp(0.0, 1.0);
    let bezier = |s: f64, p1: f64, p2: f64| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
    };

    // x(s) is monotonic on [0, 1]; bisect for the s that gives x(s) = t.
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for _ in 0..40 {
        let mid = (lo + hi) / 2.0;
        if bezier(mid, X1, X2) < t {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    bezier((lo + hi) / 2.0, 0.0, 1.0)
}

/// Scale of the breathing circle `elapsed` into the animation.
///
/// ```
/// use soulcare::meditation::breath_scale;
/// use std::time::Duration;
///
/// let period = Duration::from_secs(4);
/// assert_eq!(breath_scale(Duration::ZERO, period), 1.0);
/// assert!((breath_scale(Duration::from_secs(2), period) - 1.28).abs() < 1e-9);
/// ```
pub fn breath_scale(elapsed: Duration, period: Duration) -> f64 {
    let period_ms = period.as_millis();
    if period_ms == 0 {
        return BREATH_REST_SCALE;
    }

    let phase = (elapsed.as_millis() % period_ms) as f64 / period_ms as f64;
    let span = BREATH_PEAK_SCALE - BREATH_REST_SCALE;
    if phase < 0.5 {
        BREATH_REST_SCALE + span * ease_in_out(phase * 2.0)
    } else {
        BREATH_PEAK_SCALE - span * ease_in_out((phase - 0.5) * 2.0)
    }
}

/// The visual element being pulsed.
pub trait Pulse: Send + 'static {
    fn set_scale(&mut self, scale: f64);
}

/// Background audio for a session.
pub trait AudioPlayer {
    /// Starts playback. Already playing is not an error.
    fn play(&mut self) -> AppResult<()>;
    fn pause(&mut self);
}

/// Plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentPlayer;

impl AudioPlayer for SilentPlayer {
    fn play(&mut self) -> AppResult<()> {
        Ok(())
    }

    fn pause(&mut self) {}
}

/// Plays an audio file by spawning an external player.
#[derive(Debug)]
pub struct CommandPlayer {
    command: String,
    file: PathBuf,
    child: Option<Child>,
}

impl CommandPlayer {
    pub fn new(command: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            file: file.into(),
            child: None,
        }
    }

    fn is_playing(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }
}

impl AudioPlayer for CommandPlayer {
    fn play(&mut self) -> AppResult<()> {
        if self.is_playing() {
            return Ok(());
        }
        if !self.file.exists() {
            return Err(AudioError::MissingFile {
                path: self.file.clone(),
            }
            .into());
        }

        let child = Command::new(&self.command)
            .arg(&self.file)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| AudioError::from_spawn(&self.command, e))?;

        debug!("Started audio player (pid {})", child.id());
        self.child = Some(child);
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl Drop for CommandPlayer {
    fn drop(&mut self) {
        self.pause();
    }
}

/// Picks the audio player described by the configuration.
pub fn audio_player_for(config: &Config) -> Box<dyn AudioPlayer> {
    match (&config.audio_player, &config.audio_file) {
        (Some(command), Some(file)) => Box::new(CommandPlayer::new(command.clone(), file.clone())),
        _ => Box::new(SilentPlayer),
    }
}

/// Draws the pulse as a bar on a terminal line.
pub struct TerminalPulse<W> {
    out: W,
}

impl<W: Write + Send + 'static> TerminalPulse<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + Send + 'static> Pulse for TerminalPulse<W> {
    fn set_scale(&mut self, scale: f64) {
        let span = BREATH_PEAK_SCALE - BREATH_REST_SCALE;
        let width = (((scale - BREATH_REST_SCALE) / span) * 24.0).round().max(0.0) as usize + 1;
        let _ = write!(self.out, "\r{:<26}", "●".repeat(width));
        let _ = self.out.flush();
    }
}

/// Whether a session is animating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
}

struct Animation {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

enum BreathingState {
    Idle,
    Running(Animation),
}

fn apply_scale<P: Pulse>(pulse: &Mutex<P>, scale: f64) {
    if let Ok(mut target) = pulse.lock() {
        target.set_scale(scale);
    }
}

async fn animate<P: Pulse>(
    pulse: Arc<Mutex<P>>,
    cancel: CancellationToken,
    period: Duration,
    frame: Duration,
) {
    let started = tokio::time::Instant::now();
    let mut ticker = tokio::time::interval(frame);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => apply_scale(&pulse, breath_scale(started.elapsed(), period)),
        }
    }
}

/// Start/stop control for the breathing animation and its audio.
pub struct BreathingSession<P: Pulse> {
    runtime: Handle,
    pulse: Arc<Mutex<P>>,
    audio: Box<dyn AudioPlayer>,
    period: Duration,
    frame: Duration,
    state: BreathingState,
}

impl<P: Pulse> BreathingSession<P> {
    pub fn new(runtime: Handle, pulse: P, audio: Box<dyn AudioPlayer>) -> Self {
        Self {
            runtime,
            pulse: Arc::new(Mutex::new(pulse)),
            audio,
            period: Duration::from_millis(BREATH_PERIOD_MS),
            frame: Duration::from_millis(BREATH_FRAME_MS),
            state: BreathingState::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            BreathingState::Idle => Phase::Idle,
            BreathingState::Running(_) => Phase::Running,
        }
    }

    pub fn pulse(&self) -> &Arc<Mutex<P>> {
        &self.pulse
    }

    /// Starts the animation and audio. Returns `false` if already running.
    ///
    /// Audio that fails to start is logged and otherwise ignored.
    pub fn start(&mut self) -> bool {
        if let BreathingState::Running(_) = self.state {
            debug!("Breathing session already running");
            return false;
        }

        let cancel = CancellationToken::new();
        let task = self.runtime.spawn(animate(
            Arc::clone(&self.pulse),
            cancel.clone(),
            self.period,
            self.frame,
        ));
        self.state = BreathingState::Running(Animation { cancel, task });

        if let Err(e) = self.audio.play() {
            debug!("Meditation audio unavailable: {}", e);
        }

        info!("Breathing session started");
        true
    }

    /// Stops the animation, returns the pulse to rest and pauses audio.
    pub fn stop(&mut self) {
        if let BreathingState::Running(animation) =
            std::mem::replace(&mut self.state, BreathingState::Idle)
        {
            animation.cancel.cancel();
            animation.task.abort();
            info!("Breathing session stopped");
        }
        apply_scale(&self.pulse, BREATH_REST_SCALE);
        self.audio.pause();
    }
}

impl<P: Pulse> Drop for BreathingSession<P> {
    fn drop(&mut self) {
        if self.phase() == Phase::Running {
            self.stop();
        }
    }
}

/// Why a meditation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The stop signal (Ctrl-C) arrived.
    Interrupted,
    /// The time limit ran out.
    TimeUp,
    /// No stop signal could be installed and there is no time limit.
    SignalUnavailable,
}

/// Waits until `stop_signal` resolves or `limit` elapses.
///
/// A signal that fails to install is logged; the wait then continues until
/// the time limit, or ends at once when there is none.
pub async fn wait_for_stop<F>(stop_signal: F, limit: Option<Duration>) -> StopReason
where
    F: Future<Output = io::Result<()>>,
{
    let signal = async {
        match stop_signal.await {
            Ok(()) => StopReason::Interrupted,
            Err(e) => {
                warn!("Failed to listen for Ctrl-C: {}", e);
                StopReason::SignalUnavailable
            }
        }
    };

    let Some(limit) = limit else {
        return signal.await;
    };

    let timer = tokio::time::sleep(limit);
    tokio::pin!(timer);
    tokio::select! {
        reason = signal => {
            if reason == StopReason::Interrupted {
                return reason;
            }
        }
        _ = &mut timer => return StopReason::TimeUp,
    }

    timer.await;
    StopReason::TimeUp
}

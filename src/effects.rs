use crate::lesson::Completion;
use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const APP_NAME: &str = "Berhan's Lesson Timer";
pub const PULSE_DURATION: Duration = Duration::from_secs(1);
pub const NOTICE_TIMEOUT: Duration = Duration::from_secs(5);

const PULSE_FREQUENCY_HZ: f32 = 880.0;
const PULSE_VOLUME: f32 = 0.25;

/// Something that can give the user a short physical cue, like a vibration.
pub trait Haptics {
    fn pulse(&self, duration: Duration) -> Result<(), EffectError>;
}

pub trait Notifier {
    fn notify(&self, notice: &Notice) -> Result<(), EffectError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub timeout: Duration,
}

impl From<&Completion> for Notice {
    fn from(completion: &Completion) -> Self {
        Notice {
            title: "Timer Complete".to_string(),
            body: format!("{} is done!", completion.label),
            timeout: NOTICE_TIMEOUT,
        }
    }
}

pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn pulse(&self, _duration: Duration) -> Result<(), EffectError> {
        Ok(())
    }
}

pub struct NoNotifier;

impl Notifier for NoNotifier {
    fn notify(&self, _notice: &Notice) -> Result<(), EffectError> {
        Ok(())
    }
}

/// Terminals have no vibration motor, so the pulse is a short tone.
pub struct TonePulse {
    // dropping the stream stops all playback
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
}

impl TonePulse {
    pub fn new() -> Result<Self, EffectError> {
        let (stream, stream_handle) = OutputStream::try_default()?;

        Ok(TonePulse {
            _stream: stream,
            stream_handle,
        })
    }
}

impl Haptics for TonePulse {
    fn pulse(&self, duration: Duration) -> Result<(), EffectError> {
        let sink = Sink::try_new(&self.stream_handle)?;
        sink.append(
            SineWave::new(PULSE_FREQUENCY_HZ)
                .take_duration(duration)
                .amplify(PULSE_VOLUME),
        );
        sink.detach();

        Ok(())
    }
}

pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, notice: &Notice) -> Result<(), EffectError> {
        notify_rust::Notification::new()
            .appname(APP_NAME)
            .summary(&notice.title)
            .body(&notice.body)
            .timeout(notify_rust::Timeout::Milliseconds(timeout_millis(
                notice.timeout,
            )))
            .show()?;
        Ok(())
    }
}

fn timeout_millis(timeout: Duration) -> u32 {
    u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX)
}

/// The completion side effects, chosen once at startup.
pub struct Effects {
    haptics: Box<dyn Haptics>,
    notifier: Box<dyn Notifier>,
}

impl Effects {
    pub fn new(haptics: Box<dyn Haptics>, notifier: Box<dyn Notifier>) -> Self {
        Effects { haptics, notifier }
    }

    /// Both effects are best effort: failures are logged and dropped.
    pub fn on_completion(&self, completion: &Completion) {
        if let Err(err) = self.haptics.pulse(PULSE_DURATION) {
            debug!(timer = %completion.timer, "skipping completion pulse: {err}");
        }
        if let Err(err) = self.notifier.notify(&Notice::from(completion)) {
            debug!(timer = %completion.timer, "skipping completion notification: {err}");
        }
    }
}

impl Default for Effects {
    fn default() -> Self {
        Effects::new(Box::new(NoHaptics), Box::new(NoNotifier))
    }
}

#[derive(Debug, Error)]
pub enum EffectError {
    #[error("failed to show desktop notification: {0}")]
    Show(#[from] notify_rust::error::Error),
    #[error("failed to create audio stream for completion pulse: {0}")]
    StreamCreation(#[from] rodio::StreamError),
    #[error("failed to play completion pulse: {0}")]
    Play(#[from] rodio::PlayError),
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    pub struct Recorder {
        pub pulses: Rc<RefCell<Vec<Duration>>>,
        pub notices: Rc<RefCell<Vec<Notice>>>,
    }

    impl Recorder {
        pub fn effects(&self) -> Effects {
            Effects::new(Box::new(self.clone()), Box::new(self.clone()))
        }
    }

    impl Haptics for Recorder {
        fn pulse(&self, duration: Duration) -> Result<(), EffectError> {
            self.pulses.borrow_mut().push(duration);
            Ok(())
        }
    }

    impl Notifier for Recorder {
        fn notify(&self, notice: &Notice) -> Result<(), EffectError> {
            self.notices.borrow_mut().push(notice.clone());
            Ok(())
        }
    }

    pub struct Broken;

    impl Haptics for Broken {
        fn pulse(&self, _duration: Duration) -> Result<(), EffectError> {
            Err(EffectError::Play(rodio::PlayError::NoDevice))
        }
    }

    impl Notifier for Broken {
        fn notify(&self, _notice: &Notice) -> Result<(), EffectError> {
            Err(EffectError::Play(rodio::PlayError::NoDevice))
        }
    }
}

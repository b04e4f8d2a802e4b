use crate::event::{Command, Event, Target};
use crate::lesson::{ClockTime, Timer, TimerId};
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEventKind, KeyModifiers,
};
use futures::StreamExt;
use std::io;
use thiserror::Error;
use tui::{backend::CrosstermBackend, Terminal};

mod animation;
mod render;
mod widgets;

pub struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    events: EventStream,
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl Tui {
    pub fn new() -> Result<Self, TuiError> {
        let backend = CrosstermBackend::new(io::stdout());

        Ok(Tui {
            terminal: Terminal::new(backend).map_err(TuiError::Creation)?,
            events: EventStream::new(),
            alternate_screen_enabled: false,
            raw_mode_enabled: false,
        })
    }

    /// Has to be explicitly disabled, because disabling can cause errors that have to be catched.
    /// Is not disabled by dropping.
    pub fn enable(&mut self) -> Result<(), TuiError> {
        crossterm::terminal::enable_raw_mode().map_err(TuiError::RawModeToggle)?;
        self.raw_mode_enabled = true;

        crossterm::execute!(
            self.terminal.backend_mut(),
            crossterm::terminal::EnterAlternateScreen,
            crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
            crossterm::cursor::Hide,
        )
        .map_err(TuiError::AlternateScreenToggle)?;
        self.alternate_screen_enabled = true;

        Ok(())
    }

    pub fn disable(&mut self) -> Result<(), TuiError> {
        if self.alternate_screen_enabled {
            crossterm::execute!(
                self.terminal.backend_mut(),
                crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
                crossterm::terminal::LeaveAlternateScreen,
                crossterm::cursor::Show,
            )
            .map_err(TuiError::AlternateScreenToggle)?;
            self.alternate_screen_enabled = false;
        }
        if self.raw_mode_enabled {
            crossterm::terminal::disable_raw_mode().map_err(TuiError::RawModeToggle)?;
            self.raw_mode_enabled = false;
        }

        Ok(())
    }

    pub fn render(&mut self, visuals: &PairVisuals) -> Result<(), TuiError> {
        self.terminal
            .draw(|frame| render::render_ui(frame, visuals))
            .map_err(TuiError::Rendering)?;

        Ok(())
    }

    /// Waits for the next terminal event. Events without a meaning for the app
    /// (resizes, unbound keys) yield `None`, so the caller still gets a chance to re-render.
    pub async fn read_event(&mut self) -> Result<Option<Event>, TuiError> {
        let event = self
            .events
            .next()
            .await
            .ok_or(TuiError::InputClosed)?
            .map_err(TuiError::ReadInputEvent)?;

        Ok(Event::try_from(event).ok())
    }
}

/// Everything the ui needs to draw one timer.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerVisuals {
    pub label: String,
    pub time_remaining: ClockTime,
    pub is_running: bool,
    pub progress_percentage: f64,
}

impl TimerVisuals {
    pub fn caption(&self) -> &'static str {
        if self.is_running {
            "Pause"
        } else {
            "Start"
        }
    }
}

impl From<&Timer> for TimerVisuals {
    fn from(timer: &Timer) -> Self {
        TimerVisuals {
            label: timer.label().to_string(),
            time_remaining: timer.time_remaining(),
            is_running: timer.is_running(),
            progress_percentage: timer.progress_percentage(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PairVisuals {
    pub timers: [TimerVisuals; 2],
    pub focused: TimerId,
    pub banner: Option<String>,
}

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("failed to initialize terminal ui: {0}")]
    Creation(io::Error),
    #[error("failed to toggle terminal raw mode: {0}")]
    RawModeToggle(io::Error),
    #[error("failed to toggle alternate terminal screen: {0}")]
    AlternateScreenToggle(io::Error),
    #[error("failed to render terminal ui: {0}")]
    Rendering(io::Error),
    #[error("failed to read input event from terminal: {0}")]
    ReadInputEvent(io::Error),
    #[error("terminal input stream closed")]
    InputClosed,
}

#[derive(Debug)]
pub struct EventConversionUndefinedError;

impl TryFrom<CrosstermEvent> for Event {
    type Error = EventConversionUndefinedError;

    fn try_from(value: CrosstermEvent) -> Result<Self, Self::Error> {
        match value {
            CrosstermEvent::Key(key_event) if key_event.kind == KeyEventKind::Release => None,
            CrosstermEvent::Key(key_event)
                if key_event.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                match key_event.code {
                    KeyCode::Char('c') => Some(Event::Quit),
                    _ => None,
                }
            }
            CrosstermEvent::Key(key_event) => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => Some(Event::Quit),
                KeyCode::Char('1') => Some(Event::Timer(
                    Target::Timer(TimerId::First),
                    Command::StartOrPause,
                )),
                KeyCode::Char('2') => Some(Event::Timer(
                    Target::Timer(TimerId::Second),
                    Command::StartOrPause,
                )),
                KeyCode::Char(' ') | KeyCode::Enter => {
                    Some(Event::Timer(Target::Focused, Command::StartOrPause))
                }
                KeyCode::Char('r') => Some(Event::Timer(Target::Focused, Command::Reset)),
                KeyCode::Tab | KeyCode::Left | KeyCode::Right => Some(Event::SwitchFocus),
                _ => None,
            },
            _ => None,
        }
        .ok_or(EventConversionUndefinedError)
    }
}

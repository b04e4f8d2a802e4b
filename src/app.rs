use crate::event::{Command, Event, Target};
use crate::lesson::{Completion, TimerId};
use crate::tui::{PairVisuals, TimerVisuals, Tui, TuiError};
use std::io;
use std::ops::Deref;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tokio::select;
use tokio::time::{interval, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};

mod controller;

pub use controller::Controller;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);
const BANNER_DURATION: Duration = Duration::from_secs(5);

pub(crate) fn tick_clock(period: Duration) -> Interval {
    let mut clock = interval(period);
    clock.set_missed_tick_behavior(MissedTickBehavior::Skip);
    clock
}

pub struct App {
    session: Session,
    tui: Tui,
}

impl App {
    pub fn new(controller: Controller) -> Result<Self, UnrecoverableError> {
        let tui = Tui::new()?;

        Ok(Self {
            session: Session::new(controller),
            tui,
        })
    }

    pub async fn run(&mut self) -> Result<(), UnrecoverableError> {
        self.tui.enable()?;
        let maybe_err = self.run_inner().await;
        self.tui.disable()?;

        maybe_err?;
        Ok(())
    }

    async fn run_inner(&mut self) -> Result<(), UnrecoverableError> {
        let mut clock = tick_clock(TICK_PERIOD);

        loop {
            self.session.expire_banner();
            self.tui.render(&PairVisuals::from(&self.session))?;

            select! {
                _ = clock.tick() => {
                    self.session.tick();
                }
                tui_event = self.tui.read_event() => {
                    let Some(event) = tui_event? else {
                        continue;
                    };
                    if *self.session.handle_event(&event, &mut clock) {
                        break;
                    }
                }
            }
        }

        info!("quitting");
        Ok(())
    }
}

/// Everything the app does between terminal input and rendering: focus,
/// command dispatch and the completion banner.
pub struct Session {
    controller: Controller,
    focused: TimerId,
    banner: Option<Banner>,
}

struct Banner {
    text: String,
    shown_at: Instant,
}

impl Session {
    pub fn new(controller: Controller) -> Self {
        Session {
            controller,
            focused: TimerId::First,
            banner: None,
        }
    }

    pub fn tick(&mut self) -> Option<Completion> {
        let completion = self.controller.tick()?;
        self.banner = Some(Banner {
            text: format!("{} is done!", completion.label),
            shown_at: Instant::now(),
        });
        Some(completion)
    }

    fn handle_event(&mut self, event: &Event, clock: &mut Interval) -> AppShouldQuit {
        let running_before = self.controller.pair().running();

        match event {
            Event::Quit => return AppShouldQuit(true),
            Event::SwitchFocus => {
                self.focused = self.focused.other();
                debug!(focused = %self.focused, "focus switched");
            }
            Event::Timer(target, command) => {
                let id = match target {
                    Target::Timer(id) => *id,
                    Target::Focused => self.focused,
                };
                match command {
                    Command::StartOrPause => self.controller.start_or_pause(id),
                    Command::Reset => self.controller.reset(id),
                }
            }
        }

        // a countdown starts a full period after pressing start
        let running_after = self.controller.pair().running();
        if running_after.is_some() && running_after != running_before {
            clock.reset();
        }

        AppShouldQuit(false)
    }

    pub fn expire_banner(&mut self) {
        if let Some(banner) = &self.banner {
            if banner.shown_at.elapsed() >= BANNER_DURATION {
                self.banner = None;
            }
        }
    }
}

struct AppShouldQuit(bool);

impl Deref for AppShouldQuit {
    type Target = bool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&Session> for PairVisuals {
    fn from(session: &Session) -> Self {
        let pair = session.controller.pair();

        PairVisuals {
            timers: TimerId::ALL.map(|id| TimerVisuals::from(pair.get(id))),
            focused: session.focused,
            banner: session.banner.as_ref().map(|banner| banner.text.clone()),
        }
    }
}

/// Represents errors the app has no control over.
#[derive(Debug, Error)]
pub enum UnrecoverableError {
    #[error("error while interfacing with the terminal: {0}")]
    Tui(#[from] TuiError),
    #[error("failed to open log file {0}: {1}")]
    LogFile(PathBuf, io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::testing::Recorder;
    use crate::lesson::{Timer, TimerPair};
    use tokio::time;

    fn create_session(first_secs: u32, second_secs: u32) -> (Session, Interval, Recorder) {
        let recorder = Recorder::default();
        let pair = TimerPair::new(
            Timer::new("40-min Timer", first_secs),
            Timer::new("13-min Timer", second_secs),
        );
        let session = Session::new(Controller::new(pair, recorder.effects()));
        (session, tick_clock(TICK_PERIOD), recorder)
    }

    fn press(session: &mut Session, clock: &mut Interval, event: Event) -> bool {
        *session.handle_event(&event, clock)
    }

    fn shown(session: &Session, id: TimerId) -> String {
        PairVisuals::from(session).timers[id as usize]
            .time_remaining
            .to_string()
    }

    async fn run_ticks(session: &mut Session, clock: &mut Interval, n: usize) {
        for _ in 0..n {
            clock.tick().await;
            session.tick();
        }
    }

    mod dispatch_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_quit() {
            let (mut session, mut clock, _recorder) = create_session(2400, 780);

            assert!(press(&mut session, &mut clock, Event::Quit));
            assert!(!press(&mut session, &mut clock, Event::SwitchFocus));
        }

        #[tokio::test(start_paused = true)]
        async fn test_switch_focus_toggles() {
            let (mut session, mut clock, _recorder) = create_session(2400, 780);
            assert_eq!(PairVisuals::from(&session).focused, TimerId::First);

            press(&mut session, &mut clock, Event::SwitchFocus);
            assert_eq!(PairVisuals::from(&session).focused, TimerId::Second);

            press(&mut session, &mut clock, Event::SwitchFocus);
            assert_eq!(PairVisuals::from(&session).focused, TimerId::First);
        }

        #[tokio::test(start_paused = true)]
        async fn test_focused_target_follows_focus() {
            let (mut session, mut clock, _recorder) = create_session(2400, 780);
            press(&mut session, &mut clock, Event::SwitchFocus);

            press(
                &mut session,
                &mut clock,
                Event::Timer(Target::Focused, Command::StartOrPause),
            );

            let visuals = PairVisuals::from(&session);
            assert!(visuals.timers[1].is_running);
            assert!(!visuals.timers[0].is_running);
        }

        #[tokio::test(start_paused = true)]
        async fn test_focused_reset() {
            let (mut session, mut clock, _recorder) = create_session(2400, 780);
            press(
                &mut session,
                &mut clock,
                Event::Timer(Target::Timer(TimerId::First), Command::StartOrPause),
            );
            clock.reset();
            run_ticks(&mut session, &mut clock, 3).await;

            press(
                &mut session,
                &mut clock,
                Event::Timer(Target::Focused, Command::Reset),
            );

            assert_eq!(shown(&session, TimerId::First), "40:00");
            assert!(!PairVisuals::from(&session).timers[0].is_running);
        }
    }

    mod clock_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_first_decrement_is_a_full_period_after_start() {
            let (mut session, mut clock, _recorder) = create_session(2400, 780);
            clock.tick().await;

            time::advance(Duration::from_millis(900)).await;
            press(
                &mut session,
                &mut clock,
                Event::Timer(Target::Timer(TimerId::First), Command::StartOrPause),
            );
            let started = Instant::now();

            run_ticks(&mut session, &mut clock, 1).await;

            assert_eq!(started.elapsed(), TICK_PERIOD);
            assert_eq!(shown(&session, TimerId::First), "39:59");
        }

        #[tokio::test(start_paused = true)]
        async fn test_switching_running_timer_resets_clock() {
            let (mut session, mut clock, _recorder) = create_session(2400, 780);
            press(
                &mut session,
                &mut clock,
                Event::Timer(Target::Timer(TimerId::First), Command::StartOrPause),
            );
            run_ticks(&mut session, &mut clock, 1).await;
            assert_eq!(shown(&session, TimerId::First), "39:59");

            time::advance(Duration::from_millis(900)).await;
            press(
                &mut session,
                &mut clock,
                Event::Timer(Target::Timer(TimerId::Second), Command::StartOrPause),
            );
            let started = Instant::now();

            run_ticks(&mut session, &mut clock, 1).await;

            assert_eq!(started.elapsed(), TICK_PERIOD);
            assert_eq!(shown(&session, TimerId::Second), "12:59");
            assert_eq!(shown(&session, TimerId::First), "40:00");
        }

        #[tokio::test(start_paused = true)]
        async fn test_pause_keeps_clock_phase() {
            let (mut session, mut clock, _recorder) = create_session(2400, 780);
            press(
                &mut session,
                &mut clock,
                Event::Timer(Target::Timer(TimerId::First), Command::StartOrPause),
            );
            run_ticks(&mut session, &mut clock, 2).await;

            press(
                &mut session,
                &mut clock,
                Event::Timer(Target::Timer(TimerId::First), Command::StartOrPause),
            );
            run_ticks(&mut session, &mut clock, 3).await;

            assert_eq!(shown(&session, TimerId::First), "39:58");
        }
    }

    mod banner_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_banner_shows_on_completion_and_expires() {
            let (mut session, mut clock, recorder) = create_session(2, 780);
            press(
                &mut session,
                &mut clock,
                Event::Timer(Target::Timer(TimerId::First), Command::StartOrPause),
            );
            run_ticks(&mut session, &mut clock, 2).await;

            session.expire_banner();
            assert_eq!(
                PairVisuals::from(&session).banner.as_deref(),
                Some("40-min Timer is done!")
            );
            assert_eq!(recorder.notices.borrow().len(), 1);

            time::advance(Duration::from_millis(4900)).await;
            session.expire_banner();
            assert!(PairVisuals::from(&session).banner.is_some());

            time::advance(Duration::from_millis(100)).await;
            session.expire_banner();
            assert!(PairVisuals::from(&session).banner.is_none());
        }

        #[tokio::test(start_paused = true)]
        async fn test_no_banner_without_completion() {
            let (mut session, mut clock, _recorder) = create_session(2400, 780);
            press(
                &mut session,
                &mut clock,
                Event::Timer(Target::Timer(TimerId::First), Command::StartOrPause),
            );
            run_ticks(&mut session, &mut clock, 3).await;

            assert!(PairVisuals::from(&session).banner.is_none());
        }
    }
}

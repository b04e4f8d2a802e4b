use crate::lesson::TimerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Quit,
    SwitchFocus,
    Timer(Target, Command),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Timer(TimerId),
    Focused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartOrPause,
    Reset,
}

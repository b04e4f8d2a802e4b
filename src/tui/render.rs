use crate::effects::APP_NAME;
use crate::lesson::TimerId;
use crate::tui::widgets::{BlockWithLegend, CountdownClock};
use crate::tui::{PairVisuals, TimerVisuals};
use std::io;
use tui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{self, BorderType, Paragraph},
    Frame,
};
use unicode_segmentation::UnicodeSegmentation;

fn split_initial(str: &str) -> (&str, &str) {
    let mut graphemes = str.graphemes(true);

    let initial = graphemes.next().unwrap_or("");
    let remainder = graphemes.as_str();

    (initial, remainder)
}

fn highlighted_initial(str: &str) -> Spans<'static> {
    let (initial, remainder) = split_initial(str);

    let text_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let initials_style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);

    Spans::from(vec![
        Span::styled(initial.to_string(), initials_style),
        Span::styled(remainder.to_string(), text_style),
    ])
}

fn define_block(title: &str, legend: Vec<String>) -> BlockWithLegend<'static> {
    let legend = legend.iter().map(|s| highlighted_initial(s)).collect();

    BlockWithLegend::default()
        .borders(widgets::Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(highlighted_initial(title))
        .legend(legend)
}

fn key_for(id: TimerId) -> char {
    match id {
        TimerId::First => '¹',
        TimerId::Second => '²',
    }
}

fn timer_widget(visuals: &TimerVisuals, id: TimerId, focused: bool) -> CountdownClock<'static> {
    let mut legend = vec![format!("{} {}", key_for(id), visuals.caption().to_lowercase())];
    if focused {
        legend.push("reset".to_string());
    }

    let mut block = define_block(&visuals.label, legend);
    if focused {
        block = block.border_style(Style::default().fg(Color::Yellow));
    }

    CountdownClock::default()
        .block(block)
        .time_remaining(visuals.time_remaining)
        .timer_is_running(visuals.is_running)
        .caption(visuals.caption())
        .progress_percentage(visuals.progress_percentage)
}

pub fn render_ui(frame: &mut Frame<CrosstermBackend<io::Stdout>>, visuals: &PairVisuals) {
    let outer_block = define_block(
        APP_NAME,
        vec!["⇆ focus".to_string(), "␣ toggle".to_string(), "quit".to_string()],
    );
    let inner_area = outer_block.inner(frame.size());
    frame.render_widget(outer_block, frame.size());

    let (timers_area, banner_area) = split_banner(inner_area, visuals.banner.is_some());

    let timer_chunks = Layout::default()
        .direction(timers_direction(timers_area))
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(timers_area);

    for (index, id) in TimerId::ALL.into_iter().enumerate() {
        let widget = timer_widget(&visuals.timers[index], id, visuals.focused == id);
        frame.render_widget(widget, timer_chunks[index]);
    }

    if let (Some(banner), Some(area)) = (&visuals.banner, banner_area) {
        let banner = Paragraph::new(Span::styled(
            banner.as_str(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(banner, area);
    }
}

/// Side by side when the area is at least twice as wide as it is tall.
fn timers_direction(area: Rect) -> Direction {
    if area.width >= area.height.saturating_mul(2) {
        Direction::Horizontal
    } else {
        Direction::Vertical
    }
}

fn split_banner(area: Rect, show_banner: bool) -> (Rect, Option<Rect>) {
    if !show_banner {
        return (area, None);
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    (chunks[0], Some(chunks[1]))
}

use crate::lesson::ClockTime;
use crate::tui::animation::{self, CLOCK_HEIGHT, CLOCK_WIDTH};
use std::iter::once;
use tui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::Style,
    text::{Span, Spans},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

/// A block that additionally prints a legend into its bottom border.
pub struct BlockWithLegend<'a> {
    legend: Vec<Spans<'a>>,
    block: Block<'a>,
    border_type: BorderType,
}

impl<'a> BlockWithLegend<'a> {
    pub fn title<T>(mut self, title: T) -> BlockWithLegend<'a>
    where
        T: Into<Spans<'a>>,
    {
        self.block = self.block.title(title);
        self
    }

    pub fn border_style(mut self, style: Style) -> BlockWithLegend<'a> {
        self.block = self.block.border_style(style);
        self
    }

    pub fn borders(mut self, borders: Borders) -> BlockWithLegend<'a> {
        self.block = self.block.borders(borders);
        self
    }

    pub fn border_type(mut self, border_type: BorderType) -> BlockWithLegend<'a> {
        self.block = self.block.border_type(border_type);
        self.border_type = border_type;
        self
    }

    pub fn inner(&self, inner: Rect) -> Rect {
        self.block.inner(inner)
    }

    pub fn legend<T>(mut self, legend: Vec<T>) -> BlockWithLegend<'a>
    where
        T: Into<Spans<'a>>,
    {
        self.legend = legend.into_iter().map(|l| l.into()).collect();
        self
    }
}

impl<'a> Default for BlockWithLegend<'a> {
    fn default() -> BlockWithLegend<'a> {
        BlockWithLegend {
            legend: vec![],
            block: Block::default(),
            border_type: BorderType::Plain,
        }
    }
}

impl<'a> Widget for BlockWithLegend<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        self.block.render(area, buf);
        let symbols = BorderType::line_symbols(self.border_type);

        let legend_y = area.y + area.height - 1;
        let mut legend_x = area.x + 1;

        for legend in self.legend.into_iter() {
            let legend: Spans = once(Span::from(symbols.bottom_right))
                .chain(legend.0.into_iter())
                .chain(once(Span::from(symbols.bottom_left)))
                .collect::<Vec<_>>()
                .into();

            let width_remaining = area.width.saturating_sub(legend_x - area.x + 1);
            let (x, _) = buf.set_spans(legend_x, legend_y, &legend, width_remaining);
            legend_x = x;
        }
    }
}

/// One countdown: the draining box with the remaining time and the
/// start/pause caption in its center.
pub struct CountdownClock<'a> {
    block: Option<BlockWithLegend<'a>>,
    progress_percentage: f64,
    time_remaining: ClockTime,
    is_running: bool,
    caption: &'a str,
}

impl<'a> CountdownClock<'a> {
    pub fn block(mut self, block: BlockWithLegend<'a>) -> CountdownClock<'a> {
        self.block = Some(block);
        self
    }

    pub fn progress_percentage(mut self, progress_percentage: f64) -> CountdownClock<'a> {
        self.progress_percentage = progress_percentage.clamp(0.0, 1.0);
        self
    }

    pub fn time_remaining(mut self, time_remaining: ClockTime) -> CountdownClock<'a> {
        self.time_remaining = time_remaining;
        self
    }

    pub fn timer_is_running(mut self, is_running: bool) -> CountdownClock<'a> {
        self.is_running = is_running;
        self
    }

    pub fn caption(mut self, caption: &'a str) -> CountdownClock<'a> {
        self.caption = caption;
        self
    }
}

impl<'a> Widget for CountdownClock<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_area = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };
        if let Some(block) = self.block {
            block.render(area, buf);
        }

        let centered_chunk = {
            let (left_padding, right_padding);
            {
                let leftover_width = inner_area.width.saturating_sub(CLOCK_WIDTH);
                left_padding = leftover_width / 2;
                right_padding = leftover_width.saturating_sub(left_padding);
            }
            let (top_padding, bottom_padding);
            {
                let leftover_height = inner_area.height.saturating_sub(CLOCK_HEIGHT);
                top_padding = leftover_height / 2;
                bottom_padding = leftover_height.saturating_sub(top_padding);
            }
            let vertically_centered_sub_chunk = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(top_padding),
                    Constraint::Length(CLOCK_HEIGHT),
                    Constraint::Length(bottom_padding),
                ])
                .split(inner_area)[1];

            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Length(left_padding),
                    Constraint::Length(CLOCK_WIDTH),
                    Constraint::Length(right_padding),
                ])
                .split(vertically_centered_sub_chunk)[1]
        };

        Paragraph::new(animation::clock(1.0 - self.progress_percentage))
            .alignment(Alignment::Left)
            .render(centered_chunk, buf);

        let status_text = format!(
            "{}\n\n{} {}",
            self.time_remaining,
            if self.is_running { "⏸" } else { "⏵" },
            self.caption,
        );

        let text_chunk = centered_chunk.inner(&Margin {
            horizontal: 1,
            vertical: 1,
        });

        let text_height = status_text.lines().count() as u16;
        let ceil_padding = (text_chunk.height / 2).saturating_sub(text_height / 2);

        let text_chunk = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(ceil_padding), Constraint::Min(0)])
            .split(text_chunk)[1];

        Paragraph::new(status_text)
            .alignment(Alignment::Center)
            .render(text_chunk, buf);
    }
}

impl<'a> Default for CountdownClock<'a> {
    fn default() -> CountdownClock<'a> {
        CountdownClock {
            block: None,
            progress_percentage: 0.0,
            time_remaining: ClockTime::default(),
            is_running: false,
            caption: "",
        }
    }
}

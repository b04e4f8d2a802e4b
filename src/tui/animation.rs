use std::iter;
use unicode_segmentation::UnicodeSegmentation;

pub const CLOCK_WIDTH: u16 = 21;
pub const CLOCK_HEIGHT: u16 = 11;

const WHOLE_BOX: &str = "╭───────────────────╮
│                   │
│                   │
│                   │
│                   │
│                   │
│                   │
│                   │
│                   │
│                   │
╰───────────────────╯";

const N_BOX_ELEMENTS: usize = 60;

/// A rounded box whose border is drawn clockwise from the top center,
/// covering `remaining` (`0.0..=1.0`) of its circumference.
pub fn clock(remaining: f64) -> String {
    let remaining = remaining.clamp(0.0, 1.0);
    let (width, height) = (CLOCK_WIDTH as usize, CLOCK_HEIGHT as usize);

    let draw_n_bars = (N_BOX_ELEMENTS as f64 * remaining).ceil() as usize;
    let skip_n_bars = N_BOX_ELEMENTS - draw_n_bars;
    let mut grapheme_matrix: Vec<Vec<&str>> = WHOLE_BOX
        .lines()
        .map(|line| line.graphemes(true).collect())
        .collect();

    // erased counter-clockwise, so the remaining border shrinks toward 12 o'clock
    let mut path: Vec<(usize, usize)> = Vec::new();
    path.extend(iter::repeat(0).zip((0..width / 2).rev()));
    path.extend((1..height).zip(iter::repeat(0)));
    path.extend(iter::repeat(height - 1).zip(1..width));
    path.extend((0..height - 1).rev().zip(iter::repeat(width - 1)));
    path.extend(iter::repeat(0).zip(((width - width / 2 - 1)..(width - 1)).rev()));

    for (row, col) in path.iter().take(skip_n_bars) {
        grapheme_matrix[*row][*col] = " ";
    }

    grapheme_matrix
        .iter()
        .map(|row| row.concat() + "\n")
        .collect()
}

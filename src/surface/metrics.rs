//! Helvetica metrics and line wrapping
//!
//! Widths are the standard Helvetica AFM advance widths in 1/1000 em for
//! the printable ASCII range. Characters outside that range use
//! [`FALLBACK_WIDTH`].

/// Advance widths for `' '..='~'`
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

pub const FALLBACK_WIDTH: u16 = 556;

/// Font bounding box height (931 - -225) in 1/1000 em
pub const LINE_HEIGHT_RATIO: f32 = 1.156;

/// Distance from the top of a line box to the baseline
pub const ASCENT_RATIO: f32 = 0.931;

const WIDTH_EPSILON: f32 = 1e-3;

fn char_width(c: char) -> u16 {
    match c {
        ' '..='~' => HELVETICA_WIDTHS[c as usize - ' ' as usize],
        _ => FALLBACK_WIDTH,
    }
}

/// Width of `text` set at `font_size`
pub fn text_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c))).sum();
    #[allow(clippy::cast_precision_loss)]
    let units = units as f32;
    units * font_size / 1000.0
}

/// Height of one line at `font_size`, without line gap
pub fn line_height(font_size: f32) -> f32 {
    font_size * LINE_HEIGHT_RATIO
}

/// Greedy word wrap at `max_width`.
///
/// Explicit newlines always break. Words wider than the line are split
/// between characters. Always returns at least one line.
pub fn wrap(text: &str, max_width: f32, font_size: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        wrap_paragraph(paragraph, max_width, font_size, &mut lines);
    }
    lines
}

fn wrap_paragraph(paragraph: &str, max_width: f32, font_size: f32, lines: &mut Vec<String>) {
    let fits = |s: &str| text_width(s, font_size) <= max_width + WIDTH_EPSILON;
    let mut current = String::new();

    for word in paragraph.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if fits(&candidate) {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if fits(word) {
            current = word.to_string();
        } else {
            // break the word, keeping at least one char per line
            for c in word.chars() {
                current.push(c);
                if !fits(&current) && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                }
            }
        }
    }
    lines.push(current);
}

//! Text box layout.
//!
//! Text boxes store only a wrap width; their height follows from how many
//! lines the content wraps into. Glyph advances are estimated from the font
//! size since export runs without a shaping engine.

/// Average advance of a narrow glyph, in ems.
const NARROW_ADVANCE: f64 = 0.55;
/// Extra advance applied to bold glyphs, in ems.
const BOLD_EXTRA: f64 = 0.05;
/// Advance of a full-width (CJK) glyph, in ems.
const WIDE_ADVANCE: f64 = 1.0;

/// Wrapped lines of one text box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    /// Lines in display order.
    pub lines: Vec<String>,
    /// Distance between consecutive baselines in pixels.
    pub line_height_px: f64,
}

impl TextLayout {
    /// Height of the whole block in pixels.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn height(&self) -> f64 {
        self.lines.len() as f64 * self.line_height_px
    }
}

fn is_wide(c: char) -> bool {
    matches!(
        u32::from(c),
        0x1100..=0x115F
            | 0x2E80..=0xA4CF
            | 0xAC00..=0xD7A3
            | 0xF900..=0xFAFF
            | 0xFE30..=0xFE4F
            | 0xFF00..=0xFF60
            | 0xFFE0..=0xFFE6
    )
}

/// Estimated width of a run of text.
#[must_use]
pub fn measure(text: &str, font_size: f64, bold: bool) -> f64 {
    let narrow = if bold {
        NARROW_ADVANCE + BOLD_EXTRA
    } else {
        NARROW_ADVANCE
    };
    text.chars()
        .map(|c| if is_wide(c) { WIDE_ADVANCE } else { narrow })
        .sum::<f64>()
        * font_size
}

/// Greedily wrap text at `max_width`.
///
/// Explicit newlines always break. Words wider than the box are split
/// between characters.
#[must_use]
pub fn wrap(
    text: &str,
    max_width: f64,
    font_size: f64,
    line_height: f64,
    bold: bool,
) -> TextLayout {
    let fits = |candidate: &str| measure(candidate, font_size, bold) <= max_width;
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split(' ') {
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
            // Break an oversized word between characters.
            for c in word.chars() {
                current.push(c);
                if !fits(&current) && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                }
            }
        }
        lines.push(current);
    }

    TextLayout {
        lines,
        line_height_px: font_size * line_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_stays_on_one_line() {
        let layout = wrap("hello", 200.0, 20.0, 1.4, false);
        assert_eq!(layout.lines, vec!["hello".to_string()]);
        assert!((layout.height() - 28.0).abs() < 1e-9);
    }

    #[test]
    fn wraps_at_word_boundaries() {
        // 11 px per glyph at 20 px, so 100 px fits 9 glyphs.
        let layout = wrap("aaaa bbbb cccc", 100.0, 20.0, 1.0, false);
        assert_eq!(layout.lines, vec!["aaaa bbbb", "cccc"]);
    }

    #[test]
    fn newlines_always_break() {
        let layout = wrap("one\n\ntwo", 500.0, 20.0, 1.0, false);
        assert_eq!(layout.lines, vec!["one", "", "two"]);
    }

    #[test]
    fn long_words_split_between_characters() {
        let layout = wrap("abcdefghij", 56.0, 20.0, 1.0, false);
        assert_eq!(layout.lines, vec!["abcde", "fghij"]);
    }

    #[test]
    fn wider_box_means_fewer_lines() {
        let text = "The quick brown fox jumps over the lazy dog";
        let narrow = wrap(text, 200.0, 20.0, 1.4, false);
        let wide = wrap(text, 300.0, 20.0, 1.4, false);
        assert!(wide.lines.len() < narrow.lines.len());
    }

    #[test]
    fn bold_and_wide_glyphs_measure_wider() {
        assert!(measure("abc", 20.0, true) > measure("abc", 20.0, false));
        assert!(measure("漢字", 20.0, false) > measure("ab", 20.0, false));
    }
}

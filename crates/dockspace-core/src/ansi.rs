//! Splitting text with ANSI SGR escape sequences into colored segments.
//!
//! Only foreground colors are interpreted: `30..=37`, `90..=97`, `38;2;r;g;b`,
//! `38;5;n` (first 16 entries), `39` and reset (`0` or no parameters). Other
//! attributes are accepted and ignored. Non-SGR sequences are removed from the
//! output text.

/// RGBA color, components in `0.0..=1.0`.
pub type Rgba = [f32; 4];

const ESC: char = '\u{1b}';

const STANDARD: [Rgba; 8] = [
    [0.0, 0.0, 0.0, 1.0],
    [0.80, 0.0, 0.0, 1.0],
    [0.0, 0.80, 0.0, 1.0],
    [0.80, 0.80, 0.0, 1.0],
    [0.0, 0.0, 0.93, 1.0],
    [0.80, 0.0, 0.80, 1.0],
    [0.0, 0.80, 0.80, 1.0],
    [0.90, 0.90, 0.90, 1.0],
];

const BRIGHT: [Rgba; 8] = [
    [0.50, 0.50, 0.50, 1.0],
    [1.0, 0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [1.0, 1.0, 0.0, 1.0],
    [0.36, 0.36, 1.0, 1.0],
    [1.0, 0.0, 1.0, 1.0],
    [0.0, 1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0, 1.0],
];

/// A run of text drawn in one color.
#[derive(Debug, Clone, PartialEq)]
pub struct AnsiSegment {
    pub text: String,
    /// `None` draws the segment in the caller's base color.
    pub color: Option<Rgba>,
}

/// Splits `input` into colored segments. Empty runs are not emitted.
pub fn parse(input: &str) -> Vec<AnsiSegment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut color: Option<Rgba> = None;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != ESC {
            current.push(c);
            continue;
        }
        if chars.peek() != Some(&'[') {
            // Lone escape: drop it.
            continue;
        }
        chars.next();

        let mut params = String::new();
        let mut final_byte = None;
        for c in chars.by_ref() {
            if ('\u{40}'..='\u{7e}').contains(&c) {
                final_byte = Some(c);
                break;
            }
            params.push(c);
        }

        if final_byte != Some('m') {
            continue;
        }

        let next = apply_sgr(color, &params);
        if next != color {
            flush(&mut segments, &mut current, color);
            color = next;
        }
    }

    flush(&mut segments, &mut current, color);
    segments
}

/// Removes every escape sequence, returning the visible text only.
pub fn strip(input: &str) -> String {
    parse(input).into_iter().map(|s| s.text).collect()
}

fn flush(segments: &mut Vec<AnsiSegment>, current: &mut String, color: Option<Rgba>) {
    if current.is_empty() {
        return;
    }
    segments.push(AnsiSegment {
        text: std::mem::take(current),
        color,
    });
}

fn apply_sgr(mut color: Option<Rgba>, params: &str) -> Option<Rgba> {
    if params.is_empty() {
        return None;
    }

    let codes: Vec<u32> = params
        .split(';')
        .map(|p| p.parse().unwrap_or(0))
        .collect();
    let mut i = 0;
    while i < codes.len() {
        match codes[i] {
            0 | 39 => color = None,
            code @ 30..=37 => color = Some(STANDARD[(code - 30) as usize]),
            code @ 90..=97 => color = Some(BRIGHT[(code - 90) as usize]),
            38 => match codes.get(i + 1).copied() {
                Some(2) if i + 4 < codes.len() => {
                    let channel = |v: u32| v.min(255) as f32 / 255.0;
                    color = Some([
                        channel(codes[i + 2]),
                        channel(codes[i + 3]),
                        channel(codes[i + 4]),
                        1.0,
                    ]);
                    i += 4;
                }
                Some(5) if i + 2 < codes.len() => {
                    let index = codes[i + 2] as usize;
                    if index < 8 {
                        color = Some(STANDARD[index]);
                    } else if index < 16 {
                        color = Some(BRIGHT[index - 8]);
                    }
                    i += 2;
                }
                _ => {}
            },
            _ => {}
        }
        i += 1;
    }
    color
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        let segments = parse("Bar");
        assert_eq!(
            segments,
            vec![AnsiSegment {
                text: "Bar".into(),
                color: None
            }]
        );
    }

    #[test]
    fn test_red_then_reset() {
        let segments = parse("B\x1b[31marA\x1b[mnsi ");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].text, "B");
        assert_eq!(segments[0].color, None);
        assert_eq!(segments[1].text, "arA");
        assert_eq!(segments[1].color, Some(STANDARD[1]));
        assert_eq!(segments[2].text, "nsi ");
        assert_eq!(segments[2].color, None);
    }

    #[test]
    fn test_strip_keeps_visible_text() {
        assert_eq!(strip("Eg\x1b[31mgAn\x1b[msi "), "EggAnsi ");
    }

    #[test]
    fn test_bright_and_truecolor() {
        let segments = parse("\x1b[92mok\x1b[38;2;255;0;0mred");
        assert_eq!(segments[0].color, Some(BRIGHT[2]));
        assert_eq!(segments[1].color, Some([1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_non_sgr_sequences_removed() {
        assert_eq!(strip("a\x1b[2Kb\x1b[1;1Hc"), "abc");
        assert_eq!(parse("a\x1b[2Kb").len(), 1);
    }

    #[test]
    fn test_lone_escape_dropped() {
        assert_eq!(strip("a\x1bb"), "ab");
    }

    #[test]
    fn test_unterminated_sequence_dropped() {
        assert_eq!(strip("text\x1b[31"), "text");
    }

    #[test]
    fn test_attributes_ignored() {
        let segments = parse("\x1b[1;31mbold red");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].color, Some(STANDARD[1]));
    }

    #[test]
    fn test_palette_256_low_entries() {
        let segments = parse("\x1b[38;5;9mx");
        assert_eq!(segments[0].color, Some(BRIGHT[1]));
    }
}

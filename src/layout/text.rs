use crate::fonts::font;
use crate::model::FontWeight;

fn finish_line(words: &mut Vec<&str>) -> String {
    let line = words.join(" ");
    words.clear();
    line
}

/// Greedy word wrap into lines no wider than `max_width` millimetres.
/// A single word wider than the line is kept whole on its own line.
/// Blank input yields no lines.
pub(crate) fn wrap_text(
    text: &str,
    weight: FontWeight,
    font_size: f32,
    max_width: f32,
) -> Vec<String> {
    let entry = font(weight);
    let space_w = entry.space_width(font_size);
    let mut lines = Vec::new();
    let mut words: Vec<&str> = Vec::new();
    let mut current_x = 0.0f32;

    for word in text.split_whitespace() {
        let ww = entry.text_width(word, font_size);
        let proposed_x = if words.is_empty() {
            0.0
        } else {
            current_x + space_w
        };
        if !words.is_empty() && proposed_x + ww > max_width {
            lines.push(finish_line(&mut words));
            current_x = ww;
        } else {
            current_x = proposed_x + ww;
        }
        words.push(word);
    }

    if !words.is_empty() {
        lines.push(finish_line(&mut words));
    }
    lines
}

/// Font size at which `text` fits in `max_width` millimetres, never larger
/// than `font_size`.
pub(crate) fn fit_size(text: &str, weight: FontWeight, font_size: f32, max_width: f32) -> f32 {
    let width = font(weight).text_width(text, font_size);
    if width > max_width && width > 0.0 {
        font_size * max_width / width
    } else {
        font_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_stays_on_one_line() {
        let lines = wrap_text("Réparation plafond", FontWeight::Regular, 10.0, 60.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], "Réparation plafond");
    }

    #[test]
    fn long_text_wraps_within_width() {
        let text = "Dépose et évacuation de l'ancien carrelage puis ragréage complet du sol avant pose";
        let lines = wrap_text(text, FontWeight::Regular, 10.0, 40.0);
        assert!(lines.len() > 1);
        for line in &lines {
            let width = font(FontWeight::Regular).text_width(line, 10.0);
            assert!(width <= 40.0 || !line.contains(' '));
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn oversized_word_gets_its_own_line() {
        let lines = wrap_text("a Supercalifragilisticexpialidocious b", FontWeight::Bold, 12.0, 20.0);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Supercalifragilisticexpialidocious");
    }

    #[test]
    fn blank_text_has_no_lines() {
        assert!(wrap_text("   ", FontWeight::Regular, 10.0, 50.0).is_empty());
    }

    #[test]
    fn fit_size_only_shrinks() {
        assert_eq!(fit_size("Pose", FontWeight::Regular, 10.0, 100.0), 10.0);
        let long = "RCS Paris 123 456 789 ".repeat(10);
        let size = fit_size(&long, FontWeight::Regular, 8.0, 50.0);
        assert!(size < 8.0);
        let width = font(FontWeight::Regular).text_width(&long, size);
        assert!(width <= 50.0 + 1e-3, "{width}");
    }
}

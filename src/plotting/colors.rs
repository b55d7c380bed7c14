use std::borrow::Cow;
use std::fmt;

/// A CSS color string attached to a chart series (`#rrggbb` or `hsl(...)`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesColor(Cow<'static, str>);

impl SeriesColor {
    pub const fn fixed(css: &'static str) -> Self {
        Self(Cow::Borrowed(css))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the CSS form back into RGB channels.
    pub fn to_rgb(&self) -> Option<(u8, u8, u8)> {
        parse_css_color(&self.0)
    }
}

impl fmt::Display for SeriesColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for SeriesColor {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Color of the repository timeline line.
pub const TIMELINE_COLOR: SeriesColor = SeriesColor::fixed("#3498db");

/// GitHub's color for a well-known language.
fn known_language_color(language: &str) -> Option<&'static str> {
    let color = match language {
        "JavaScript" => "#f1e05a",
        "Python" => "#3572A5",
        "Java" => "#b07219",
        "TypeScript" => "#2b7489",
        "C" => "#555555",
        "C++" => "#f34b7d",
        "C#" => "#178600",
        "PHP" => "#4F5D95",
        "Ruby" => "#701516",
        "Go" => "#00ADD8",
        "Rust" => "#dea584",
        _ => return None,
    };
    Some(color)
}

/// Color for a language slice.
///
/// Unknown languages get a hue derived from their name, so the same language
/// keeps its color across searches and runs.
pub fn language_color(language: &str) -> SeriesColor {
    match known_language_color(language) {
        Some(css) => SeriesColor::fixed(css),
        None => SeriesColor(Cow::Owned(format!(
            "hsl({}, 70%, 50%)",
            fnv1a(language.as_bytes()) % 360
        ))),
    }
}

fn fnv1a(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0x811c_9dc5_u32, |hash, byte| {
        (hash ^ u32::from(*byte)).wrapping_mul(0x0100_0193)
    })
}

fn parse_css_color(css: &str) -> Option<(u8, u8, u8)> {
    let css = css.trim();
    if let Some(hex) = css.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        return Some((channel(0)?, channel(2)?, channel(4)?));
    }

    let inner = css.strip_prefix("hsl(")?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(str::trim);
    let hue: f64 = parts.next()?.parse().ok()?;
    let saturation: f64 = parts.next()?.strip_suffix('%')?.parse().ok()?;
    let lightness: f64 = parts.next()?.strip_suffix('%')?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(hsl_to_rgb(hue, saturation / 100.0, lightness / 100.0))
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let h = hue.rem_euclid(360.0) / 360.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    if s == 0.0 {
        let gray = (l * 255.0).round() as u8;
        return (gray, gray, gray);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |t: f64| {
        let t = t.rem_euclid(1.0);
        let v = if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        };
        (v * 255.0).round() as u8
    };

    (channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_languages() {
        assert_eq!(language_color("JavaScript"), "#f1e05a");
        assert_eq!(language_color("Rust"), "#dea584");
        assert_eq!(language_color("C#"), "#178600");
        assert_eq!(language_color("PHP"), "#4F5D95");
    }

    #[test]
    fn test_unknown_language_is_stable_hsl() {
        let first = language_color("Elixir");
        let second = language_color("Elixir");
        assert_eq!(first, second);
        assert!(first.as_str().starts_with("hsl("));
        assert!(first.as_str().ends_with(", 70%, 50%)"));
        assert!(first.to_rgb().is_some());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(language_color("rust").as_str().starts_with("hsl("));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(SeriesColor::fixed("#3572A5").to_rgb(), Some((0x35, 0x72, 0xa5)));
        assert_eq!(TIMELINE_COLOR.to_rgb(), Some((0x34, 0x98, 0xdb)));
        assert_eq!(SeriesColor::fixed("#fff").to_rgb(), None);
    }

    #[test]
    fn test_parse_hsl() {
        assert_eq!(SeriesColor::fixed("hsl(0, 100%, 50%)").to_rgb(), Some((255, 0, 0)));
        assert_eq!(SeriesColor::fixed("hsl(120, 100%, 50%)").to_rgb(), Some((0, 255, 0)));
        assert_eq!(SeriesColor::fixed("hsl(240, 100%, 50%)").to_rgb(), Some((0, 0, 255)));
        assert_eq!(SeriesColor::fixed("hsl(0, 0%, 50%)").to_rgb(), Some((128, 128, 128)));
        assert_eq!(SeriesColor::fixed("hsl(0, 50%)").to_rgb(), None);
    }
}

//! Welcome banner: figlet title with a vertical gradient.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Newsroom red (#e63946).
const WIRE_RED: (u8, u8, u8) = (0xe6, 0x39, 0x46);
/// Paper white (#f1faee).
const PAPER: (u8, u8, u8) = (0xf1, 0xfa, 0xee);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Prints `title` in the standard figlet font, red fading to white, then the subtitle
/// and version. Falls back to plain text if the font cannot render.
pub fn print_welcome(title: &str, subtitle: &str) {
    let mut out = stdout();
    let art = FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(title).map(|f| f.to_string()))
        .unwrap_or_else(|| title.to_string());
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(WIRE_RED, PAPER, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: PAPER.0,
        g: PAPER.1,
        b: PAPER.2,
    }));
    let _ = out.execute(Print(format!(
        "{}  v{}\r\n\r\n",
        subtitle,
        env!("CARGO_PKG_VERSION")
    )));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp_rgb(WIRE_RED, PAPER, 0.0), WIRE_RED);
        assert_eq!(lerp_rgb(WIRE_RED, PAPER, 1.0), PAPER);
    }
}

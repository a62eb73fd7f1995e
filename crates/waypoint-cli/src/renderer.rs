//! Terminal output.
//!
//! Markdown from the core is printed through termimad when color is on and
//! as-is otherwise.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Prints markdown either styled or plain.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Print markdown to stdout.
    ///
    /// Header lines keep their `#` markers so trip, step and section levels
    /// stay distinguishable in the terminal.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            match header_color(line) {
                Some(color) => println!("\x1b[{color}m{line}\x1b[0m"),
                None => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
        Ok(())
    }
}

/// ANSI color code for a markdown header line: trips, sections, then steps.
fn header_color(line: &str) -> Option<u8> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if level == 0 || !line[level..].starts_with(' ') {
        return None;
    }
    Some(match level {
        1 => 34,
        2 => 36,
        _ => 32,
    })
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
    }

    #[test]
    fn test_default_is_rich() {
        let renderer = TerminalRenderer::default();
        assert!(renderer.rich_enabled);
    }

    #[test]
    fn test_header_color() {
        assert_eq!(header_color("# 1. Lisbon"), Some(34));
        assert_eq!(header_color("## In Progress"), Some(36));
        assert_eq!(header_color("### 2. Castle (○ Pending)"), Some(32));
        assert_eq!(header_color("#hashtag"), None);
        assert_eq!(header_color("- Status: Planned"), None);
    }
}

use std::io::{self, Write};

use crate::terminal::colors;
use colored::*;
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 64;
const TREE_KEY_WIDTH: usize = 7;

pub fn header(out: &mut impl Write, msg: &str, q_level: u8) -> io::Result<()> {
    if q_level > 0 {
        return Ok(());
    }

    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = UnicodeWidthStr::width(formatted.as_str());

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    writeln!(out, "{}", line)
}

pub fn fat_separator(out: &mut impl Write) -> io::Result<()> {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    writeln!(out, "{}", sep)
}

pub fn tree_head(out: &mut impl Write, idx: usize, name: &str) -> io::Result<()> {
    let idx_str: String = format!("[{}]", idx.to_string().color(colors::ACCENT));
    writeln!(
        out,
        "{} {}",
        idx_str.color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    )
}

pub fn as_tree_one_level(
    out: &mut impl Write,
    key_value_pair: Vec<(String, ColoredString)>,
) -> io::Result<()> {
    for (i, (key, value)) in key_value_pair.iter().enumerate() {
        let last: bool = i + 1 == key_value_pair.len();
        let branch: ColoredString = if !last {
            "├─".bright_black()
        } else {
            "└─".bright_black()
        };
        let dots: ColoredString = ".".repeat(TREE_KEY_WIDTH.saturating_sub(key.len())).color(colors::SEPARATOR);
        writeln!(
            out,
            " {} {}{}{} {}",
            branch,
            key.color(colors::TEXT_DEFAULT),
            dots,
            ":".color(colors::SEPARATOR),
            value
        )?;
    }
    Ok(())
}

pub fn centerln(out: &mut impl Write, msg: &str) -> io::Result<()> {
    let width: usize = console::measure_text_width(msg);
    let space: String = " ".repeat(TOTAL_WIDTH.saturating_sub(width) / 2);
    writeln!(out, "{}{}", space, msg)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        colored::control::set_override(false);
        let mut buf: Vec<u8> = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_is_centered_and_quiet_aware() {
        let line = render(|out| header(out, "scan", 0));
        assert!(line.contains("⟦ SCAN ⟧"));
        assert_eq!(UnicodeWidthStr::width(line.trim_end()), TOTAL_WIDTH);

        assert!(render(|out| header(out, "scan", 1)).is_empty());
    }

    #[test]
    fn tree_uses_branch_glyphs() {
        let text = render(|out| {
            as_tree_one_level(
                out,
                vec![
                    ("22".to_string(), "closed".normal()),
                    ("80".to_string(), "open".normal()),
                ],
            )
        });
        assert_eq!(text, " ├─ 22.....: closed\n └─ 80.....: open\n");
    }

    #[test]
    fn long_keys_do_not_underflow() {
        let text = render(|out| as_tree_one_level(out, vec![("a-very-long-key".to_string(), "v".normal())]));
        assert_eq!(text, " └─ a-very-long-key: v\n");
    }
}

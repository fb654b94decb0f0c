//! Everything the session shows or asks goes through a [Presenter]. The session never reads or
//! writes the terminal directly, which keeps it free of I/O details and lets tests script it.

use std::{
    fmt::Display,
    io::{BufRead, Write},
};

use ansi_term::{Colour, Style};
use anyhow::Result;

use crate::insights::chart::{render_chart, Chart};

/// Returned when the input ends while the presenter is waiting for an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputClosed;

impl Display for InputClosed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Input was closed")
    }
}

impl std::error::Error for InputClosed {}

/// Input and output widgets of the tracker. Input widgets only ever return values that satisfy
/// their constraints.
pub trait Presenter {
    fn title(&mut self, text: &str) -> Result<()>;

    /// Sidebar like choice between views. `None` means the user wants to leave.
    fn menu(&mut self, label: &str, options: &[&str]) -> Result<Option<usize>>;

    fn subheader(&mut self, text: &str) -> Result<()>;

    /// Returns index of the chosen option.
    fn select(&mut self, label: &str, options: &[&str]) -> Result<usize>;

    /// Returns a value in `min..=max`.
    fn slider(&mut self, label: &str, min: u8, max: u8, default: u8) -> Result<u8>;

    fn text_area(&mut self, label: &str) -> Result<String>;

    fn button(&mut self, label: &str) -> Result<bool>;

    fn write(&mut self, text: &str) -> Result<()>;

    fn chart(&mut self, chart: &Chart) -> Result<()>;

    fn success(&mut self, text: &str) -> Result<()>;

    fn info(&mut self, text: &str) -> Result<()>;

    fn warning(&mut self, text: &str) -> Result<()>;

    fn divider(&mut self) -> Result<()>;

    /// Collapsible block. Terminals can't collapse text, so the body is shown indented under the
    /// label.
    fn expander(&mut self, label: &str, body: &[String]) -> Result<()>;
}

/// [Presenter] for a line based terminal.
pub struct TerminalPresenter<R, W> {
    input: R,
    output: W,
    styled: bool,
}

impl<R: BufRead, W: Write> TerminalPresenter<R, W> {
    pub fn new(input: R, output: W, styled: bool) -> Self {
        Self {
            input,
            output,
            styled,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.styled {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(InputClosed.into());
        }
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }

    fn list_options(&mut self, options: &[&str]) -> Result<()> {
        for (index, option) in options.iter().enumerate() {
            writeln!(self.output, "  [{}] {option}", index + 1)?;
        }
        Ok(())
    }

    fn banner(&mut self, icon: &str, colour: Colour, text: &str) -> Result<()> {
        let line = self.paint(colour.normal(), &format!("{icon} {text}"));
        writeln!(self.output, "{line}")?;
        Ok(())
    }
}

/// Accepts either the 1-based number of an option or its label.
fn parse_option(answer: &str, options: &[&str]) -> Option<usize> {
    let answer = answer.trim();
    if let Ok(number) = answer.parse::<usize>() {
        return number.checked_sub(1).filter(|v| *v < options.len());
    }
    options.iter().position(|v| v.eq_ignore_ascii_case(answer))
}

impl<R: BufRead, W: Write> Presenter for TerminalPresenter<R, W> {
    fn title(&mut self, text: &str) -> Result<()> {
        let line = self.paint(Style::new().bold().underline(), text);
        writeln!(self.output, "{line}")?;
        writeln!(self.output)?;
        Ok(())
    }

    fn menu(&mut self, label: &str, options: &[&str]) -> Result<Option<usize>> {
        loop {
            writeln!(self.output, "{label}")?;
            self.list_options(options)?;
            writeln!(self.output, "  [q] Quit")?;
            let answer = match self.prompt("> ") {
                Ok(v) => v,
                Err(e) if e.is::<InputClosed>() => return Ok(None),
                Err(e) => return Err(e),
            };
            if answer.trim().eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            match parse_option(&answer, options) {
                Some(index) => return Ok(Some(index)),
                None => writeln!(self.output, "Unknown option {answer:?}")?,
            }
        }
    }

    fn subheader(&mut self, text: &str) -> Result<()> {
        let line = self.paint(Style::new().bold(), text);
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    fn select(&mut self, label: &str, options: &[&str]) -> Result<usize> {
        loop {
            writeln!(self.output, "{label}")?;
            self.list_options(options)?;
            let answer = self.prompt("> ")?;
            match parse_option(&answer, options) {
                Some(index) => return Ok(index),
                None => writeln!(self.output, "Unknown option {answer:?}")?,
            }
        }
    }

    fn slider(&mut self, label: &str, min: u8, max: u8, default: u8) -> Result<u8> {
        loop {
            let answer = self.prompt(&format!("{label} [{min}-{max}] ({default}): "))?;
            let answer = answer.trim();
            if answer.is_empty() {
                return Ok(default);
            }
            match answer.parse::<u8>() {
                Ok(v) if (min..=max).contains(&v) => return Ok(v),
                _ => writeln!(self.output, "Please enter a value between {min} and {max}")?,
            }
        }
    }

    fn text_area(&mut self, label: &str) -> Result<String> {
        writeln!(self.output, "{label}")?;
        self.prompt("> ")
    }

    fn button(&mut self, label: &str) -> Result<bool> {
        let answer = self.prompt(&format!(
            "[{label}] Press Enter to {}, n to discard: ",
            label.to_lowercase()
        ))?;
        Ok(!answer.trim().eq_ignore_ascii_case("n"))
    }

    fn write(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    fn chart(&mut self, chart: &Chart) -> Result<()> {
        write!(self.output, "{}", render_chart(chart, self.styled))?;
        writeln!(self.output)?;
        Ok(())
    }

    fn success(&mut self, text: &str) -> Result<()> {
        self.banner("✔", Colour::Green, text)
    }

    fn info(&mut self, text: &str) -> Result<()> {
        self.banner("ℹ", Colour::Blue, text)
    }

    fn warning(&mut self, text: &str) -> Result<()> {
        self.banner("⚠", Colour::Yellow, text)
    }

    fn divider(&mut self) -> Result<()> {
        writeln!(self.output, "{}", "─".repeat(48))?;
        Ok(())
    }

    fn expander(&mut self, label: &str, body: &[String]) -> Result<()> {
        let line = self.paint(Style::new().bold(), &format!("▸ {label}"));
        writeln!(self.output, "{line}")?;
        for text in body {
            for line in text.lines() {
                writeln!(self.output, "    {line}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod presenter_tests {
    use std::io::Cursor;

    use anyhow::Result;

    use super::{parse_option, InputClosed, Presenter, TerminalPresenter};

    fn presenter(input: &str) -> TerminalPresenter<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalPresenter::new(Cursor::new(input.as_bytes().to_vec()), vec![], false)
    }

    fn output(presenter: TerminalPresenter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(presenter.into_output()).unwrap()
    }

    #[test]
    fn options_parse_by_number_or_label() {
        let options = ["Happy", "Sad"];
        assert_eq!(parse_option("2", &options), Some(1));
        assert_eq!(parse_option("happy", &options), Some(0));
        assert_eq!(parse_option("0", &options), None);
        assert_eq!(parse_option("3", &options), None);
        assert_eq!(parse_option("Calm", &options), None);
    }

    #[test]
    fn slider_reprompts_until_in_range() -> Result<()> {
        let mut presenter = presenter("9\nabc\n4\n");
        assert_eq!(presenter.slider("Intensity", 1, 5, 3)?, 4);
        let text = output(presenter);
        assert_eq!(text.matches("Please enter a value between 1 and 5").count(), 2);
        Ok(())
    }

    #[test]
    fn slider_uses_default_on_empty_answer() -> Result<()> {
        let mut presenter = presenter("\n");
        assert_eq!(presenter.slider("Intensity", 1, 5, 3)?, 3);
        Ok(())
    }

    #[test]
    fn menu_quits_on_q_and_end_of_input() -> Result<()> {
        let options = ["Track My Mood", "Weekly Insights"];
        assert_eq!(presenter("q\n").menu("Menu", &options)?, None);
        assert_eq!(presenter("").menu("Menu", &options)?, None);
        assert_eq!(presenter("x\n2\n").menu("Menu", &options)?, Some(1));
        Ok(())
    }

    #[test]
    fn closed_input_is_reported() {
        let error = presenter("").text_area("Why?").unwrap_err();
        assert!(error.is::<InputClosed>());
    }

    #[test]
    fn button_can_be_declined() -> Result<()> {
        assert!(presenter("\n").button("Save")?);
        assert!(!presenter("n\n").button("Save")?);
        Ok(())
    }

    #[test]
    fn expander_indents_body() -> Result<()> {
        let mut presenter = presenter("");
        presenter.expander("Notes", &["first\nsecond".to_string()])?;
        assert_eq!(output(presenter), "▸ Notes\n    first\n    second\n");
        Ok(())
    }
}

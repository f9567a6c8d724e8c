//! Spinner feedback around each network stage

use std::borrow::Cow;
use std::io::Write;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

const TICK: Duration = Duration::from_millis(80);

/// Creates spinners; hidden reporters draw nothing at all
#[derive(Debug, Clone, Copy)]
pub struct Status {
    visible: bool,
}

impl Status {
    pub fn terminal() -> Self {
        Self { visible: true }
    }

    pub fn hidden() -> Self {
        Self { visible: false }
    }

    /// Start a spinner showing `message` in bold
    pub fn start(&self, message: impl Into<Cow<'static, str>>) -> Spinner {
        if !self.visible {
            return Spinner {
                bar: ProgressBar::hidden(),
                visible: false,
            };
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg:.bold}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message);
        bar.enable_steady_tick(TICK);
        Spinner { bar, visible: true }
    }

    /// Failure line for errors raised outside any spinner
    pub fn error(&self, message: &str) {
        if self.visible {
            print_final("✖ ", Color::Red, Some(("Error: ", Color::Red)), message);
        }
    }
}

/// A running spinner. Consumed by exactly one final state.
pub struct Spinner {
    bar: ProgressBar,
    visible: bool,
}

impl Spinner {
    pub fn succeed(self, message: &str) {
        self.finish("✔ ", Color::Green, None, message);
    }

    /// Non-fatal problem; the run continues
    pub fn warn(self, message: &str) {
        self.finish("⚠ ", Color::Yellow, Some(("Warning: ", Color::Yellow)), message);
    }

    pub fn fail(self, message: &str) {
        self.finish("✖ ", Color::Red, Some(("Error: ", Color::Red)), message);
    }

    fn finish(self, symbol: &str, color: Color, label: Option<(&str, Color)>, message: &str) {
        self.bar.finish_and_clear();
        if self.visible {
            print_final(symbol, color, label, message);
        }
    }
}

fn print_final(symbol: &str, color: Color, label: Option<(&str, Color)>, message: &str) {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(color)));
    let _ = write!(stderr, "{symbol}");
    match label {
        Some((label, message_color)) => {
            let _ = stderr.set_color(ColorSpec::new().set_bold(true));
            let _ = write!(stderr, "{label}");
            let _ = stderr.set_color(ColorSpec::new().set_fg(Some(message_color)));
            let _ = write!(stderr, "{message}");
        }
        None => {
            let _ = stderr.set_color(ColorSpec::new().set_bold(true));
            let _ = write!(stderr, "{message}");
        }
    }
    let _ = stderr.reset();
    let _ = writeln!(stderr);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_spinners_finish_quietly() {
        let status = Status::hidden();
        status.start("Finding releases...").succeed("Found 3 releases");
        status.start("Finding assets...").warn("No assets found");
        status.start("Downloading...").fail("Not Found");
        status.error("not a terminal");
    }
}

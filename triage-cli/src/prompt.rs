//! Line-oriented prompts for interactive intake.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Reads answers from `input` and writes questions to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `message` and read one trimmed line. `None` means end of input.
    pub fn ask(&mut self, message: &str) -> std::io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn say(&mut self, message: &str) -> std::io::Result<()> {
        writeln!(self.output, "{message}")
    }

    /// Ask for a whole number; empty input or end of input keeps `default`.
    pub fn ask_int<T>(&mut self, message: &str, default: T) -> std::io::Result<T>
    where
        T: FromStr + Display + Copy,
    {
        loop {
            let Some(raw) = self.ask(&format!("{message} [{default}]: "))? else {
                return Ok(default);
            };
            if raw.is_empty() {
                return Ok(default);
            }
            if raw.chars().all(|c| c.is_ascii_digit()) {
                if let Ok(value) = raw.parse::<T>() {
                    return Ok(value);
                }
            }
            self.say("Digite um número inteiro válido.")?;
        }
    }

    /// Ask for a decimal number, accepting `,` as the separator.
    pub fn ask_float(&mut self, message: &str, default: f64) -> std::io::Result<f64> {
        loop {
            let Some(raw) = self.ask(&format!("{message} [{default}]: "))? else {
                return Ok(default);
            };
            if raw.is_empty() {
                return Ok(default);
            }
            match parse_decimal(&raw) {
                Some(value) => return Ok(value),
                None => self.say("Valor inválido. Tente novamente.")?,
            }
        }
    }

    /// Collect lines until an empty one.
    pub fn ask_list(&mut self, message: &str) -> std::io::Result<Vec<String>> {
        self.say(message)?;
        let mut items = Vec::new();
        while let Some(item) = self.ask("- ")? {
            if item.is_empty() {
                break;
            }
            items.push(item);
        }
        Ok(items)
    }
}

/// Parse a finite decimal, accepting `,` as the separator.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

use colored::*;
use tabled::{Table, Tabled, settings::Style};
use ustvnow::{Channel, HttpExchange, QualityGroup};

use crate::codecs::describe_codecs;

/// Status line printer, optionally colored.
pub struct OutputManager {
    colored: bool,
}

impl OutputManager {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    pub fn step(&self, message: &str) {
        println!("{} {}", self.colorize("[+]", Color::Green), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", self.colorize("[i]", Color::Cyan), message);
    }

    pub fn detail(&self, message: &str) {
        println!("{} {}", self.colorize("[*]", Color::Blue), message);
    }

    pub fn warn(&self, message: &str) {
        println!("{} {}", self.colorize("[!]", Color::Yellow), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", self.colorize("Error:", Color::Red), message);
    }

    /// Print the request and, if any, the response of a failed exchange.
    pub fn exchange(&self, exchange: &HttpExchange) {
        eprintln!("{} Sent request:", self.colorize("[*]", Color::Blue));
        eprintln!("{}", indent(&exchange.request_text(), 6));
        match exchange.response_text() {
            Some(text) => {
                eprintln!("{} Received response:", self.colorize("[*]", Color::Blue));
                eprintln!("{}", indent(&text, 6));
            }
            None => eprintln!("{} No response received.", self.colorize("[*]", Color::Blue)),
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.colored {
            text.color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

pub fn indent(text: &str, columns: usize) -> String {
    let pad = " ".repeat(columns);
    text.lines()
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Human readable magnitude with 1024-based prefixes, e.g. `1.1M`.
pub fn format_si(num: f64) -> String {
    const UNITS: [&str; 8] = ["", "k", "M", "G", "T", "P", "E", "Z"];
    let mut num = num;
    for unit in UNITS {
        if num.abs() < 1024.0 {
            return format!("{num:3.1}{unit}");
        }
        num /= 1024.0;
    }
    format!("{num:.1}Y")
}

/// Menu line for a quality group.
pub fn quality_label(group: &QualityGroup) -> String {
    let key = &group.key;
    let resolution = key
        .resolution
        .map(|r| r.to_string())
        .unwrap_or_else(|| "unknown resolution".to_string());
    let codecs = if key.codecs.is_empty() {
        "unknown".to_string()
    } else {
        describe_codecs(&key.codecs)
    };
    format!(
        "{}: {}, {}bps, codecs: {}",
        key.bandwidth,
        resolution,
        format_si(key.bandwidth as f64),
        codecs
    )
}

#[derive(Tabled)]
struct ChannelRow<'a> {
    #[tabled(rename = "Code")]
    code: &'a str,
    #[tabled(rename = "Name")]
    name: &'a str,
    #[tabled(rename = "Callsign")]
    callsign: &'a str,
    #[tabled(rename = "Available")]
    available: &'static str,
}

pub fn channel_table(channels: &[Channel]) -> String {
    let rows = channels.iter().map(|c| ChannelRow {
        code: &c.code,
        name: &c.name,
        callsign: &c.callsign,
        available: if c.available { "yes" } else { "no" },
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn default_filename(channel_code: &str, bandwidth: u64) -> String {
    format!("{channel_code}_{bandwidth}.m3u8")
}

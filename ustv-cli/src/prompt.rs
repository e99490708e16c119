//! Interactive prompts for everything not given on the command line.

use inquire::{Confirm, Password, Select, Text};
use std::{
    fmt,
    path::{Path, PathBuf},
};
use ustvnow::{Channel, QualityGroup, select_by_bandwidth, sorted_by_bandwidth_desc};

use crate::{
    error::{CliError, Result},
    output::{OutputManager, quality_label},
};

/// How a channel code given on the command line relates to the directory.
#[derive(Debug, PartialEq, Eq)]
pub enum ChannelLookup<'a> {
    Available(&'a Channel),
    Unavailable(&'a Channel),
    Unknown,
}

pub fn lookup_channel<'a>(channels: &'a [Channel], code: &str) -> ChannelLookup<'a> {
    match channels.iter().find(|c| c.code == code) {
        Some(channel) if channel.available => ChannelLookup::Available(channel),
        Some(channel) => ChannelLookup::Unavailable(channel),
        None => ChannelLookup::Unknown,
    }
}

pub fn credentials(
    out: &OutputManager,
    username: Option<String>,
    password: Option<String>,
) -> Result<(String, String)> {
    let username = username.filter(|u| !u.is_empty());
    let password = password.filter(|p| !p.is_empty());
    if username.is_none() || password.is_none() {
        out.info("Enter your USTVnow login credentials:");
    }

    let username = match username {
        Some(username) => username,
        None => Text::new("Username:")
            .with_validator(inquire::required!("A username is required"))
            .prompt()?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::new("Password:")
            .without_confirmation()
            .with_validator(inquire::required!("A password is required"))
            .prompt()?,
    };
    Ok((username, password))
}

struct ChannelOption<'a>(&'a Channel);

impl fmt::Display for ChannelOption<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Settle on a channel code, asking when the requested one is unknown or
/// unavailable.
pub fn channel_code(
    out: &OutputManager,
    channels: &[Channel],
    requested: Option<&str>,
) -> Result<String> {
    if let Some(code) = requested {
        match lookup_channel(channels, code) {
            ChannelLookup::Available(channel) => return Ok(channel.code.clone()),
            ChannelLookup::Unavailable(channel) => {
                let question =
                    format!("Channel '{code}' exists but is marked as unavailable. Use anyway?");
                if Confirm::new(&question).with_default(false).prompt()? {
                    return Ok(channel.code.clone());
                }
            }
            ChannelLookup::Unknown => out.warn(&format!("Unknown channel '{code}'.")),
        }
    }

    let options: Vec<ChannelOption> = channels
        .iter()
        .filter(|c| c.available)
        .map(ChannelOption)
        .collect();
    if options.is_empty() {
        return Err(CliError::NoChannels);
    }

    let selection = Select::new("Select a channel:", options).prompt()?;
    Ok(selection.0.code.clone())
}

struct QualityOption<'a>(&'a QualityGroup);

impl fmt::Display for QualityOption<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&quality_label(self.0))
    }
}

/// Pick a quality group: the exact bitrate if it exists, otherwise a menu
/// sorted by bitrate, highest first.
pub fn quality<'a>(
    out: &OutputManager,
    groups: &'a [QualityGroup],
    requested: Option<u64>,
) -> Result<&'a QualityGroup> {
    if let Some(bandwidth) = requested {
        match select_by_bandwidth(groups, bandwidth) {
            Ok(group) => return Ok(group),
            Err(_) => out.warn(&format!("Channel bitrate {bandwidth} does not exist.")),
        }
    }

    let options: Vec<QualityOption> = sorted_by_bandwidth_desc(groups)
        .into_iter()
        .map(QualityOption)
        .collect();
    if options.is_empty() {
        return Err(CliError::invalid_input("the playlist has no variants"));
    }

    let selection = Select::new("Select desired quality:", options).prompt()?;
    Ok(selection.0)
}

/// Return a path that may be written, asking before overwriting.
pub fn output_path(out: &OutputManager, path: PathBuf, overwrite: bool) -> Result<PathBuf> {
    if overwrite || !path.is_file() {
        return Ok(path);
    }

    let question = format!("File '{}' already exists, overwrite?", path.display());
    if Confirm::new(&question).with_default(false).prompt()? {
        return Ok(path);
    }

    out.info("Choose another file name.");
    let name = Text::new("New filename:")
        .with_validator(inquire::required!("A file name is required"))
        .prompt()?;
    Ok(Path::new(name.trim()).to_path_buf())
}

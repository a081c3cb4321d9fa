use std::collections::HashSet;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::error::SwitchError;
use crate::lang::LanguageStrings;

pub const TOOL_FILE_NAME: &str = "nircmd.exe";
const SET_DEFAULT_COMMAND: &str = "setdefaultsounddevice";

pub trait SwitchTool {
    fn set_default(&self, tool_path: &Path, device_name: &str) -> Result<(), SwitchError>;
}

/// Runs `nircmd.exe setdefaultsounddevice <name>`; exit code 0 means it took.
#[derive(Debug, Default)]
pub struct Nircmd;

impl SwitchTool for Nircmd {
    fn set_default(&self, tool_path: &Path, device_name: &str) -> Result<(), SwitchError> {
        let status = Command::new(tool_path)
            .args([SET_DEFAULT_COMMAND, device_name])
            .stdin(Stdio::null())
            .status()
            .map_err(|source| SwitchError::Launch {
                tool: tool_path.to_path_buf(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(SwitchError::Exit {
                tool: tool_path.to_path_buf(),
                status,
            })
        }
    }
}

fn qualifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\((.*?)\)").expect("qualifier regex is valid"))
}

/// Names nircmd might know the device by: the full OS name, the part before the
/// first `(`, and the first parenthesized qualifier.
///
/// `"Speakers (Realtek Audio)"` gives `{"Speakers (Realtek Audio)", "Speakers", "Realtek Audio"}`.
pub fn candidate_names(device_name: &str) -> HashSet<String> {
    let mut candidates = HashSet::new();
    candidates.insert(device_name.to_string());

    if let Some((head, _)) = device_name.split_once('(') {
        candidates.insert(head.trim().to_string());
    }

    if let Some(qualifier) = qualifier_pattern()
        .captures(device_name)
        .and_then(|caps| caps.get(1))
    {
        candidates.insert(qualifier.as_str().trim().to_string());
    }

    candidates
}

/// Tries every candidate name, even after one succeeds, and prints a trace line
/// per attempt. Returns whether any attempt succeeded.
pub fn switch_to<T: SwitchTool, W: Write>(
    tool: &T,
    device_name: &str,
    tool_path: &Path,
    text: &LanguageStrings,
    out: &mut W,
) -> io::Result<bool> {
    writeln!(out, "\n{}[{}]", text.switching, device_name)?;

    let mut success = false;
    for candidate in candidate_names(device_name) {
        if candidate.is_empty() {
            continue;
        }
        write!(out, "   👉 '{}'... ", candidate)?;
        out.flush()?;

        match tool.set_default(tool_path, &candidate) {
            Ok(()) => {
                debug!("Switched default device to {:?}", candidate);
                writeln!(out, "OK")?;
                success = true;
            }
            Err(e) => {
                debug!("Switch attempt {:?} failed: {}", candidate, e);
                writeln!(out, "Fail")?;
            }
        }
    }

    writeln!(out, "\n{}", if success { text.success } else { text.fail })?;
    Ok(success)
}

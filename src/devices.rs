use std::process::{Command, Stdio};

use encoding_rs::Encoding;
use tracing::debug;

use crate::error::ScanError;

const DEVICE_QUERY: &str = "Get-PnpDevice -Class AudioEndpoint | Where-Object { $_.Status -eq 'OK' } | Select-Object -ExpandProperty FriendlyName";

// English-only heuristic for capture endpoints
const INPUT_MARKERS: [&str; 2] = ["Microphone", "Input"];

pub trait DeviceSource {
    /// Active output devices in the order the OS reports them. Empty on any failure.
    fn active_output_devices(&self) -> Vec<String>;
}

/// Lists audio endpoints through `Get-PnpDevice`. Spawns a fresh PowerShell per scan.
#[derive(Debug)]
pub struct PowerShellDevices {
    program: String,
}

impl Default for PowerShellDevices {
    fn default() -> Self {
        Self {
            program: "powershell".to_string(),
        }
    }
}

impl PowerShellDevices {
    #[cfg(test)]
    fn with_program(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    pub fn scan(&self) -> Result<Vec<String>, ScanError> {
        let mut command = Command::new(&self.program);
        command
            .args(["-NoProfile", "-Command", DEVICE_QUERY])
            .stdin(Stdio::null())
            .stderr(Stdio::null());
        hide_window(&mut command);

        let output = command.output().map_err(ScanError::Launch)?;
        if !output.status.success() {
            return Err(ScanError::Exit(output.status));
        }

        let text = decode_console_output(&output.stdout);
        Ok(filter_output_devices(&text))
    }
}

impl DeviceSource for PowerShellDevices {
    fn active_output_devices(&self) -> Vec<String> {
        match self.scan() {
            Ok(devices) => {
                debug!("Found {} output devices: {:?}", devices.len(), devices);
                devices
            }
            Err(e) => {
                debug!("Device scan failed: {}", e);
                Vec::new()
            }
        }
    }
}

/// One name per line; blank lines and anything that looks like a capture device are dropped.
pub fn filter_output_devices(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter(|name| !INPUT_MARKERS.iter().any(|marker| name.contains(marker)))
        .map(String::from)
        .collect()
}

fn decode_console_output(bytes: &[u8]) -> String {
    let (text, _, had_errors) = console_encoding().decode(bytes);
    if had_errors {
        debug!("Device list contained bytes outside the console code page");
    }
    text.into_owned()
}

pub fn encoding_for_code_page(code_page: u32) -> &'static Encoding {
    match code_page {
        949 => encoding_rs::EUC_KR,
        932 => encoding_rs::SHIFT_JIS,
        936 => encoding_rs::GBK,
        950 => encoding_rs::BIG5,
        866 => encoding_rs::IBM866,
        // encoding_rs has no DOS pages (437, 850, 852): non-ASCII names from those consoles come out as U+FFFD
        _ => encoding_rs::UTF_8,
    }
}

#[cfg(windows)]
fn console_encoding() -> &'static Encoding {
    let code_page = unsafe { windows::Win32::Globalization::GetOEMCP() };
    encoding_for_code_page(code_page)
}

#[cfg(not(windows))]
fn console_encoding() -> &'static Encoding {
    encoding_rs::UTF_8
}

#[cfg(windows)]
fn hide_window(command: &mut Command) {
    use std::os::windows::process::CommandExt;
    use windows::Win32::System::Threading::CREATE_NO_WINDOW;

    command.creation_flags(CREATE_NO_WINDOW.0);
}

#[cfg(not(windows))]
fn hide_window(_command: &mut Command) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_drops_capture_devices_and_keeps_order() {
        let raw = "Speakers (Realtek Audio)\r\n\
                   Microphone (USB Audio)\r\n\
                   Headphones (USB Audio)\r\n\
                   Line Input (Realtek Audio)\r\n\
                   LG TV (NVIDIA High Definition Audio)\r\n";
        assert_eq!(
            filter_output_devices(raw),
            vec![
                "Speakers (Realtek Audio)",
                "Headphones (USB Audio)",
                "LG TV (NVIDIA High Definition Audio)",
            ]
        );
    }

    #[test]
    fn filter_is_case_sensitive() {
        let raw = "microphone array\ninput mixer\nMicrophone Array\n";
        assert_eq!(filter_output_devices(raw), vec!["microphone array", "input mixer"]);
    }

    #[test]
    fn filter_trims_and_skips_blank_lines() {
        let raw = "\n   \n  Speakers  \n\n";
        assert_eq!(filter_output_devices(raw), vec!["Speakers"]);
    }

    #[test]
    fn empty_output_yields_no_devices() {
        assert!(filter_output_devices("").is_empty());
    }

    #[test]
    fn korean_code_page_decodes_device_names() {
        let (bytes, _, _) = encoding_rs::EUC_KR.encode("스피커 (Realtek Audio)");
        let (text, _, had_errors) = encoding_for_code_page(949).decode(&bytes);
        assert!(!had_errors);
        assert_eq!(text, "스피커 (Realtek Audio)");
    }

    #[test]
    fn unknown_code_page_falls_back_to_utf8() {
        for code_page in [437, 850, 852, 65001] {
            assert_eq!(encoding_for_code_page(code_page), encoding_rs::UTF_8);
        }
    }

    #[test]
    fn missing_shell_is_a_launch_error() {
        let devices = PowerShellDevices::with_program("/nonexistent/powershell-for-tests");
        assert!(matches!(devices.scan(), Err(ScanError::Launch(_))));
    }

    #[test]
    fn failed_scan_collapses_to_no_devices() {
        let devices = PowerShellDevices::with_program("/nonexistent/powershell-for-tests");
        assert!(devices.active_output_devices().is_empty());
    }
}

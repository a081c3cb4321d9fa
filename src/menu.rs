use std::io::{BufRead, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::config::{Config, ConfigStore};
use crate::console::Console;
use crate::devices::DeviceSource;
use crate::error::Result;
use crate::lang::strings;
use crate::setup::{choose_language, choose_tool_path};
use crate::switcher::{switch_to, SwitchTool};

const BANNER_WIDTH: usize = 40;
const DIVIDER_WIDTH: usize = 20;
const CONTROL_ENTRIES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    /// Zero-based position in the device list that was just rendered.
    Device(usize),
    ChangeLanguage,
    ChangePath,
    Exit,
}

/// Maps typed input to a menu entry. The three controls always follow the
/// devices, at `N+1`, `N+2` and `N+3`.
pub fn resolve_selection(input: &str, device_count: usize) -> Option<MenuEntry> {
    let selected = input.trim().parse::<i64>().ok()?;
    let selected = usize::try_from(selected).ok()?;
    match selected {
        0 => None,
        n if n <= device_count => Some(MenuEntry::Device(n - 1)),
        n => match n - device_count {
            1 => Some(MenuEntry::ChangeLanguage),
            2 => Some(MenuEntry::ChangePath),
            3 => Some(MenuEntry::Exit),
            _ => None,
        },
    }
}

enum Flow {
    Continue,
    Exit,
}

pub struct App<D, T, R, W> {
    store: ConfigStore,
    devices: D,
    tool: T,
    console: Console<R, W>,
}

impl<D, T, R, W> App<D, T, R, W>
where
    D: DeviceSource,
    T: SwitchTool,
    R: BufRead,
    W: Write,
{
    pub fn new(store: ConfigStore, devices: D, tool: T, console: Console<R, W>) -> Self {
        Self {
            store,
            devices,
            tool,
            console,
        }
    }

    #[cfg(test)]
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    pub fn run(&mut self) -> Result<()> {
        if self.store.load().is_none() {
            self.bootstrap()?;
        }

        loop {
            // Re-read every pass so edits to the file show up on the next render
            let config = self.store.load().unwrap_or_default();
            let devices = self.render(&config)?;

            let text = strings(config.lang);
            let prompt = format!(
                "{} (1~{}): ",
                text.input_prompt,
                devices.len() + CONTROL_ENTRIES
            );
            let input = self.console.prompt(&prompt)?;

            let flow = match resolve_selection(&input, devices.len()) {
                Some(entry) => self.dispatch(entry, &config, &devices)?,
                None => {
                    debug!("Rejected menu input {:?}", input);
                    writeln!(self.console.out(), "{}", text.invalid_input)?;
                    self.console.pause()?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                return Ok(());
            }
        }
    }

    fn bootstrap(&mut self) -> Result<()> {
        info!("No config at {:?}, running first-time setup", self.store.path());
        let lang = choose_language(&mut self.console)?;
        let path = choose_tool_path(&mut self.console, lang)?;
        self.store.save(&Config::new(lang, path))?;
        Ok(())
    }

    fn render(&mut self, config: &Config) -> Result<Vec<String>> {
        let text = strings(config.lang);
        self.console.clear()?;

        let out = self.console.out();
        writeln!(out, "\n{}", "=".repeat(BANNER_WIDTH))?;
        writeln!(out, "   {}", text.title)?;
        writeln!(out, "{}", "=".repeat(BANNER_WIDTH))?;
        write!(out, "{} ", text.scanning)?;
        out.flush()?;

        let devices = self.devices.active_output_devices();
        writeln!(out, "{}", text.scan_done)?;

        writeln!(out, "\n{}", text.menu_title)?;
        for (i, name) in devices.iter().enumerate() {
            writeln!(out, " {}. {}", i + 1, name)?;
        }
        writeln!(out, "{}", "-".repeat(DIVIDER_WIDTH))?;

        let count = devices.len();
        writeln!(out, " {}. {}", count + 1, text.opt_lang)?;
        writeln!(out, " {}. {}", count + 2, text.opt_path)?;
        writeln!(out, " {}. {}", count + 3, text.opt_exit)?;
        writeln!(out, "{}", "=".repeat(BANNER_WIDTH))?;

        Ok(devices)
    }

    fn dispatch(&mut self, entry: MenuEntry, config: &Config, devices: &[String]) -> Result<Flow> {
        let text = strings(config.lang);
        match entry {
            MenuEntry::Device(index) => {
                let device = &devices[index];
                let switched = switch_to(
                    &self.tool,
                    device,
                    Path::new(&config.path),
                    text,
                    self.console.out(),
                )?;
                info!("Switch to {:?} {}", device, if switched { "succeeded" } else { "failed" });

                writeln!(self.console.out(), "\n{}", text.return_menu)?;
                self.console.read_line()?;
            }
            MenuEntry::ChangeLanguage => {
                let lang = choose_language(&mut self.console)?;
                self.store.save(&config.with_lang(lang))?;
                writeln!(self.console.out(), "\n{}", strings(lang).settings_saved)?;
                self.console.pause()?;
            }
            MenuEntry::ChangePath => {
                let path = choose_tool_path(&mut self.console, config.lang)?;
                self.store.save(&config.with_path(path))?;
                writeln!(self.console.out(), "\n{}", text.settings_saved)?;
                self.console.pause()?;
            }
            MenuEntry::Exit => {
                writeln!(self.console.out(), "{}", text.farewell)?;
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }
}

use std::io::{BufRead, Write};
use std::path::Path;

use tracing::debug;

use crate::console::Console;
use crate::error::Result;
use crate::lang::{strings, Language, LANGUAGE_INPUT, LANGUAGE_PROMPT};
use crate::switcher::TOOL_FILE_NAME;

const LANGUAGE_CHOICES: [(&str, Language); 2] = [("1", Language::Korean), ("2", Language::English)];

/// Asks until the user answers `1` or `2`.
pub fn choose_language<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Language> {
    console.clear()?;
    writeln!(console.out(), "{}", LANGUAGE_PROMPT)?;
    for (key, language) in LANGUAGE_CHOICES {
        writeln!(console.out(), "{}. {}", key, language.display_name())?;
    }

    loop {
        let answer = console.prompt(LANGUAGE_INPUT)?;
        let answer = answer.trim();
        if let Some((_, language)) = LANGUAGE_CHOICES.iter().find(|(key, _)| *key == answer) {
            debug!("Language chosen: {}", language.to_code());
            return Ok(*language);
        }
    }
}

/// Asks for the nircmd.exe location until an existing file with that name is given.
pub fn choose_tool_path<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    language: Language,
) -> Result<String> {
    let text = strings(language);
    loop {
        console.clear()?;
        writeln!(console.out(), "[{}]\n", text.title)?;
        let answer = console.prompt(text.ask_path)?;
        let path = strip_quotes(&answer);

        if is_valid_tool_path(path) {
            debug!("Tool path accepted: {}", path);
            return Ok(path.to_string());
        }

        writeln!(console.out(), "\n{}", text.path_error)?;
        console.prompt(text.retry_path)?;
    }
}

// Paths pasted from Explorer arrive wrapped in quotes
fn strip_quotes(input: &str) -> &str {
    input.trim().trim_matches('"').trim_matches('\'')
}

pub fn is_valid_tool_path(path: &str) -> bool {
    path.to_lowercase().ends_with(TOOL_FILE_NAME) && Path::new(path).exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::scripted;
    use std::fs;
    use tempfile::TempDir;

    fn fake_tool(dir: &TempDir, name: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, b"").unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn language_choice_repeats_until_valid() {
        let mut console = scripted(&["3", "ko", "", " 2 "]);
        assert_eq!(choose_language(&mut console).unwrap(), Language::English);

        let printed = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(printed.matches(LANGUAGE_INPUT).count(), 4);
        assert!(printed.contains("1. 한국어 (Korean)"));
        assert!(printed.contains("2. English"));
    }

    #[test]
    fn language_choice_one_is_korean() {
        let mut console = scripted(&["1"]);
        assert_eq!(choose_language(&mut console).unwrap(), Language::Korean);
    }

    #[test]
    fn language_choice_without_input_ends() {
        let mut console = scripted(&["x"]);
        assert!(matches!(
            choose_language(&mut console),
            Err(crate::error::AppError::InputClosed)
        ));
    }

    #[test]
    fn tool_path_accepts_existing_nircmd_case_insensitively() {
        let dir = TempDir::new().unwrap();
        let tool = fake_tool(&dir, "NirCmd.EXE");
        assert!(is_valid_tool_path(&tool));
    }

    #[test]
    fn tool_path_rejects_other_files_and_missing_files() {
        let dir = TempDir::new().unwrap();
        let other = fake_tool(&dir, "notepad.exe");
        assert!(!is_valid_tool_path(&other));

        let missing = dir.path().join("nircmd.exe");
        assert!(!is_valid_tool_path(&missing.to_string_lossy()));
        assert!(!is_valid_tool_path(""));
    }

    #[test]
    fn tool_path_prompt_strips_quotes_and_retries() {
        let dir = TempDir::new().unwrap();
        let tool = fake_tool(&dir, "nircmd.exe");
        let quoted = format!("\"{}\"", tool);
        let single = format!("  '{}'  ", tool);
        let mut console = scripted(&["C:\\nowhere\\nircmd.exe", "", &quoted]);

        assert_eq!(choose_tool_path(&mut console, Language::English).unwrap(), tool);

        let printed = String::from_utf8(console.into_output()).unwrap();
        let text = strings(Language::English);
        assert_eq!(printed.matches(text.path_error).count(), 1);
        assert_eq!(printed.matches(text.retry_path).count(), 1);

        let mut console = scripted(&[&single]);
        assert_eq!(choose_tool_path(&mut console, Language::Korean).unwrap(), tool);
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "ko")]
    Korean,
    #[serde(rename = "en")]
    English,
}

impl Language {
    pub fn to_code(&self) -> &'static str {
        match self {
            Language::Korean => "ko",
            Language::English => "en",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Korean => "한국어 (Korean)",
            Language::English => "English",
        }
    }
}

#[derive(Debug)]
pub struct LanguageStrings {
    // Setup
    pub title: &'static str,
    pub ask_path: &'static str,
    pub path_error: &'static str,
    pub retry_path: &'static str,

    // Device scan
    pub scanning: &'static str,
    pub scan_done: &'static str,

    // Menu
    pub menu_title: &'static str,
    pub opt_lang: &'static str,
    pub opt_path: &'static str,
    pub opt_exit: &'static str,
    pub input_prompt: &'static str,
    pub invalid_input: &'static str,

    // Switching
    pub switching: &'static str,
    pub success: &'static str,
    pub fail: &'static str,
    pub return_menu: &'static str,

    pub settings_saved: &'static str,
    pub farewell: &'static str,
}

/// Shown before any language is configured, so it carries both.
pub const LANGUAGE_PROMPT: &str = "Select Language / 언어를 선택하세요";
pub const LANGUAGE_INPUT: &str = "Number (1 or 2): ";

static KOREAN: LanguageStrings = LanguageStrings {
    title: "🔊 오디오 출력 장치 변경기",
    ask_path: "Nircmd.exe 파일의 전체 경로를 입력해주세요\n(예: D:\\Tools\\nircmd.exe): ",
    path_error: "❌ 파일을 찾을 수 없습니다. 올바른 경로를 입력해주세요.",
    retry_path: "엔터를 누르면 다시 입력합니다...",
    scanning: "장치 목록을 불러오는 중...",
    scan_done: "OK!",
    menu_title: "[변경할 장치를 선택하세요]",
    opt_lang: "[설정] 언어 변경 (Change Language)",
    opt_path: "[설정] Nircmd 경로 변경 (Change Path)",
    opt_exit: "종료 (Exit)",
    input_prompt: "번호 입력",
    invalid_input: "⚠️ 올바른 번호를 입력해주세요.",
    switching: "🔄 변경 시도: ",
    success: "✅ 명령 전송 완료! (소리를 확인하세요)",
    fail: "❌ 모든 시도가 실패했습니다.",
    return_menu: "엔터를 누르면 메뉴로 돌아갑니다...",
    settings_saved: "✅ 설정이 저장되었습니다! 메뉴를 새로고침합니다.",
    farewell: "프로그램을 종료합니다. Bye!",
};

static ENGLISH: LanguageStrings = LanguageStrings {
    title: "🔊 Audio Output Switcher",
    ask_path: "Please enter the full path of Nircmd.exe\n(Ex: D:\\Tools\\nircmd.exe): ",
    path_error: "❌ File not found. Please enter a valid path.",
    retry_path: "Press Enter to retry...",
    scanning: "Scanning audio devices...",
    scan_done: "OK!",
    menu_title: "[Select a device to switch]",
    opt_lang: "[Settings] Change Language",
    opt_path: "[Settings] Change Nircmd Path",
    opt_exit: "Exit",
    input_prompt: "Enter Number",
    invalid_input: "⚠️ Please enter a valid number.",
    switching: "🔄 Switching to: ",
    success: "✅ Command sent! (Check your audio)",
    fail: "❌ All attempts failed.",
    return_menu: "Press Enter to return to menu...",
    settings_saved: "✅ Settings saved! Reloading menu.",
    farewell: "Bye!",
};

pub fn strings(language: Language) -> &'static LanguageStrings {
    match language {
        Language::Korean => &KOREAN,
        Language::English => &ENGLISH,
    }
}

//! Defaults for tab identity and the dedicated run-script tab.

pub fn default_tab_title() -> String {
    "Terminal".to_string()
}

pub fn default_tab_icon() -> Option<String> {
    Some("terminal".to_string())
}

pub fn run_script_tab_title() -> String {
    "Run".to_string()
}

pub fn run_script_tab_icon() -> String {
    "play".to_string()
}

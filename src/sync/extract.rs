//! Per-field extractors over generated files.
//!
//! Each extractor owns one field and matches a single line with a fixed prefix.
//! Everything else in the file is ignored, so hand edits around the captured
//! lines survive. A missing line yields `None`; an empty value is returned as is.

use std::sync::OnceLock;

use regex_lite::Regex;

use crate::platform::Platform;
use crate::render::context::unescape_python_string;

/// Compile a pattern once and reuse it on later calls.
macro_rules! regex {
    ($pattern:expr) => {{
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new($pattern).expect("valid regex"))
    }};
}

/// `Section: user/<section>` in the packaging control file.
pub fn section(control_file: &str) -> Option<String> {
    first_capture(control_file, regex!(r"^Section:[ \t]*user/(.*)$"))
}

/// `Debian-Version: <revision>` in the packaging control file.
pub fn revision(control_file: &str) -> Option<u32> {
    first_capture(control_file, regex!(r"^Debian-Version:[ \t]*([0-9]+)[ \t]*$"))
        .and_then(|v| v.parse().ok())
}

/// `Name=<appName>` in the desktop entry. Localized `Name[xx]=` keys are ignored.
pub fn app_name(desktop_entry: &str) -> Option<String> {
    first_capture(desktop_entry, regex!(r"^Name=(.*)$"))
}

/// `Categories=<category>;` in the desktop entry.
pub fn category(desktop_entry: &str) -> Option<String> {
    first_capture(desktop_entry, regex!(r"^Categories=(.*);$"))
}

/// `description="<description>"` in the build script, unescaped.
pub fn description(build_script: &str) -> Option<String> {
    let re = regex!(r#"^[ \t]*description="((?:[^"\\]|\\.)*)",?[ \t]*$"#);
    first_capture(build_script, re).map(|literal| unescape_python_string(&literal))
}

/// `version="<version>"` in the build script.
pub fn version(build_script: &str) -> Option<String> {
    first_capture(build_script, regex!(r#"^[ \t]*version="([^"\\]*)",?[ \t]*$"#))
}

/// `setup(name="<name>"` in the build script.
pub fn project_name(build_script: &str) -> Option<String> {
    let re = regex!(r#"^(?:setup\()?[ \t]*name="([^"\\]*)",?[ \t]*$"#);
    first_capture(build_script, re)
}

/// Which platform a desktop entry was rendered for: harmattan entries launch
/// through `invoker`, fremantle entries carry Hildon `X-Osso-Type` keys.
pub fn platform(desktop_entry: &str) -> Option<Platform> {
    let harmattan = regex!(r"^Exec=[ \t]*invoker[ \t]");
    let fremantle = regex!(r"^X-Osso-Type=");
    desktop_entry.lines().find_map(|line| {
        if harmattan.is_match(line) {
            Some(Platform::Harmattan)
        } else if fremantle.is_match(line) {
            Some(Platform::Fremantle)
        } else {
            None
        }
    })
}

fn first_capture(text: &str, re: &Regex) -> Option<String> {
    text.lines()
        .find_map(|line| re.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/*!
 * Build Metadata
 */

use std::fmt;

pub struct BuildInfo {
    settings: Vec<(&'static str, String)>,
}

impl BuildInfo {
    pub fn current() -> Self {
        let profile = if cfg!(debug_assertions) { "debug" } else { "release" };

        let mut settings = vec![
            ("package", env!("CARGO_PKG_NAME").to_string()),
            ("version", env!("CARGO_PKG_VERSION").to_string()),
            ("profile", profile.to_string()),
            ("os", std::env::consts::OS.to_string()),
            ("arch", std::env::consts::ARCH.to_string()),
        ];
        // Set by packagers at build time.
        if let Some(rev) = option_env!("BTMENU_GIT_REV") {
            settings.push(("vcs.revision", rev.to_string()));
        }

        Self { settings }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Build Info:")?;
        for (key, value) in &self.settings {
            writeln!(f, "{}: {}", key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_package_and_version() {
        let info = BuildInfo::current();
        let text = info.to_string();

        assert!(text.starts_with("Build Info:\n"));
        assert_eq!(info.get("package"), Some("alopex-btmenu"));
        assert!(text.contains(&format!("version: {}", env!("CARGO_PKG_VERSION"))));
    }
}

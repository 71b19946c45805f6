use std::collections::BTreeMap;

/// Read-only, process-wide key lookup.
pub trait PropertySource {
    fn property(&self, key: &str) -> Option<String>;
}

/// Process-wide property store.
///
/// Lookups check explicit overrides first, then (unless isolated) the
/// environment variable derived from the key: `fabric.gameVersion` is read
/// from `FABRIC_GAMEVERSION`.
#[derive(Debug, Clone, Default)]
pub struct SystemProperties {
    overrides: BTreeMap<String, String>,
    read_env: bool,
}

impl SystemProperties {
    /// Store backed by the process environment.
    pub fn from_env() -> Self {
        Self {
            overrides: BTreeMap::new(),
            read_env: true,
        }
    }

    /// Store that only sees explicit overrides.
    pub fn isolated() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.overrides.insert(key.to_string(), value.to_string());
    }

    /// Parse `-Dkey=value` defines into overrides; other tokens are ignored.
    pub fn extend_from_defines<S: AsRef<str>>(&mut self, defines: &[S]) {
        for define in defines {
            let Some(body) = define.as_ref().strip_prefix("-D") else {
                continue;
            };
            if let Some((key, value)) = body.split_once('=') {
                if !key.is_empty() {
                    self.set(key, value);
                }
            }
        }
    }

    pub fn env_key(key: &str) -> String {
        key.chars()
            .map(|c| match c {
                '.' | '-' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect()
    }
}

impl PropertySource for SystemProperties {
    fn property(&self, key: &str) -> Option<String> {
        if let Some(value) = self.overrides.get(key) {
            return Some(value.clone());
        }

        if !self.read_env {
            return None;
        }

        std::env::var(Self::env_key(key)).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_key_uppercases_and_replaces_separators() {
        assert_eq!(
            SystemProperties::env_key("fabric.gameVersion"),
            "FABRIC_GAMEVERSION"
        );
        assert_eq!(SystemProperties::env_key("a-b.c"), "A_B_C");
    }

    #[test]
    fn overrides_win_over_environment() {
        std::env::set_var("PROVIDER_TEST_OVERRIDE", "from-env");
        let props = SystemProperties::from_env().with("provider.test.override", "explicit");

        assert_eq!(
            props.property("provider.test.override").as_deref(),
            Some("explicit")
        );
        std::env::remove_var("PROVIDER_TEST_OVERRIDE");
    }

    #[test]
    fn environment_is_read_only_when_enabled() {
        std::env::set_var("PROVIDER_TEST_ENVONLY", "42");

        assert_eq!(
            SystemProperties::from_env()
                .property("provider.test.envonly")
                .as_deref(),
            Some("42")
        );
        assert_eq!(
            SystemProperties::isolated().property("provider.test.envonly"),
            None
        );
        std::env::remove_var("PROVIDER_TEST_ENVONLY");
    }

    #[test]
    fn defines_are_parsed_into_overrides() {
        let mut props = SystemProperties::isolated();
        props.extend_from_defines(&["-Dfabric.gameVersion=126.2", "-Xmx2G", "-D=bad"]);

        assert_eq!(
            props.property("fabric.gameVersion").as_deref(),
            Some("126.2")
        );
        assert_eq!(props.property(""), None);
    }
}

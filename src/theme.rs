use std::collections::BTreeMap;

pub const ACCENT: &str = "--accent";
pub const ACCENT_3: &str = "--accent-3";
pub const ACCENT_FALLBACK: &str = "#6c63ff";
pub const ACCENT_3_FALLBACK: &str = "#00d18f";

/// Read access to the page's colour variables.
pub trait ThemeSource {
    fn property(&self, name: &str) -> Option<String>;

    /// Trimmed value of `name`, or `fallback` when it is unset or blank.
    fn color_or(&self, name: &str, fallback: &str) -> String {
        self.property(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Theme {
    vars: BTreeMap<String, String>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Declarations for a `:root { ... }` block.
    pub fn css_declarations(&self) -> String {
        self.vars
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl ThemeSource for Theme {
    fn property(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

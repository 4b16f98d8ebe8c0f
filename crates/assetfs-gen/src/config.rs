use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_MODULE_NAME: &str = "assets";
const DEFAULT_FUNCTION_NAME: &str = "assets";

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "gen",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Names the generated module imports from `assetfs`.
const RESERVED: &[&str] = &["must_parse_time", "AssetFs", "DirRecord", "FileRecord"];

/// Settings for one generation run.
///
/// Loadable from TOML:
///
/// ```toml
/// output = "src/assets_vfsdata.rs"
/// module_name = "assets"
/// function_name = "assets"
/// function_doc = "Static files served by the dashboard."
/// cfg = 'not(feature = "dev")'
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// File the generated source is written to.
    #[serde(default)]
    pub output: PathBuf,
    /// Name of the module wrapping the generated code.
    #[serde(default = "default_module_name")]
    pub module_name: String,
    /// Name of the generated function returning the filesystem.
    #[serde(default = "default_function_name")]
    pub function_name: String,
    /// Doc comment for the generated function. A default is used if unset.
    #[serde(default)]
    pub function_doc: Option<String>,
    /// `cfg` predicate gating the generated module, e.g. `feature = "embed"`.
    #[serde(default)]
    pub cfg: Option<String>,
}

fn default_module_name() -> String {
    DEFAULT_MODULE_NAME.to_string()
}

fn default_function_name() -> String {
    DEFAULT_FUNCTION_NAME.to_string()
}

impl Config {
    /// Create a configuration writing to `output` with default names.
    pub fn new<P: Into<PathBuf>>(output: P) -> Self {
        Self {
            output: output.into(),
            module_name: default_module_name(),
            function_name: default_function_name(),
            function_doc: None,
            cfg: None,
        }
    }

    /// Parse a configuration from TOML bytes.
    pub fn from_toml(data: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::Config(format!("config is not UTF-8: {e}")))?;
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_toml(&data)
    }

    pub fn with_output<P: Into<PathBuf>>(mut self, output: P) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = name.into();
        self
    }

    pub fn with_function_name(mut self, name: impl Into<String>) -> Self {
        self.function_name = name.into();
        self
    }

    pub fn with_function_doc(mut self, doc: impl Into<String>) -> Self {
        self.function_doc = Some(doc.into());
        self
    }

    pub fn with_cfg(mut self, predicate: impl Into<String>) -> Self {
        self.cfg = Some(predicate.into());
        self
    }

    /// Check the configuration before anything is generated.
    pub fn validate(&self) -> Result<()> {
        if self.output.as_os_str().is_empty() {
            return Err(Error::Config("output path is empty".to_string()));
        }
        if !is_identifier(&self.module_name) {
            return Err(Error::Config(format!(
                "module name {:?} is not a valid identifier",
                self.module_name
            )));
        }
        if !is_identifier(&self.function_name) {
            return Err(Error::Config(format!(
                "function name {:?} is not a valid identifier",
                self.function_name
            )));
        }
        if RESERVED.contains(&self.function_name.as_str()) {
            return Err(Error::Config(format!(
                "function name {:?} collides with a generated import",
                self.function_name
            )));
        }
        if let Some(cfg) = &self.cfg {
            if cfg.trim().is_empty() || cfg.contains('\n') {
                return Err(Error::Config(format!("invalid cfg predicate {cfg:?}")));
            }
        }
        Ok(())
    }

    /// Doc comment lines for the generated function.
    pub(crate) fn function_doc_lines(&self) -> Vec<String> {
        match &self.function_doc {
            Some(doc) => doc.lines().map(str::to_string).collect(),
            None => vec![format!(
                "`{}` statically implements the virtual filesystem provided to assetfs-gen.",
                self.function_name
            )],
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    if name == "_" || KEYWORDS.contains(&name) {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new("out.rs");
        assert_eq!(config.module_name, "assets");
        assert_eq!(config.function_name, "assets");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_fills_defaults() {
        let config = Config::from_toml(br#"output = "gen/data.rs""#).unwrap();
        assert_eq!(config.output, PathBuf::from("gen/data.rs"));
        assert_eq!(config.module_name, "assets");
        assert_eq!(config.cfg, None);
    }

    #[test]
    fn test_from_toml_all_fields() {
        let toml_str = r#"
output = "src/static_data.rs"
module_name = "web"
function_name = "static_files"
function_doc = "Dashboard assets."
cfg = 'feature = "embed"'
"#;
        let config = Config::from_toml(toml_str.as_bytes()).unwrap();
        assert_eq!(config.module_name, "web");
        assert_eq!(config.function_name, "static_files");
        assert_eq!(config.cfg.as_deref(), Some(r#"feature = "embed""#));
        assert_eq!(config.function_doc_lines(), vec!["Dashboard assets."]);
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml(b"output = [").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_empty_output_rejected() {
        let err = Config::new("").validate().unwrap_err();
        assert!(err.to_string().contains("output path is empty"));
    }

    #[test]
    fn test_bad_identifiers_rejected() {
        for name in ["", "1abc", "with-dash", "fn", "_", "a b"] {
            let config = Config::new("out.rs").with_module_name(name);
            assert!(config.validate().is_err(), "{name:?} should be rejected");
        }
        for name in ["must_parse_time", "AssetFs", "DirRecord", "FileRecord"] {
            let config = Config::new("out.rs").with_function_name(name);
            assert!(
                matches!(config.validate(), Err(Error::Config(_))),
                "{name:?} should be rejected"
            );
        }
        assert!(Config::new("out.rs")
            .with_function_name("_private_assets2")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_blank_cfg_rejected() {
        let config = Config::new("out.rs").with_cfg("  ");
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_default_doc_mentions_function() {
        let config = Config::new("out.rs").with_function_name("files");
        assert_eq!(
            config.function_doc_lines(),
            vec!["`files` statically implements the virtual filesystem provided to assetfs-gen."]
        );
    }
}

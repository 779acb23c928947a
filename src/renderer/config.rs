//! Output settings for card and preview documents

/// How a rendered card is written out as markup
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Emit an `<?xml?>` header, for cards saved as `.svg` files
    pub standalone: bool,

    /// One element per line, nested groups indented
    pub pretty_print: bool,

    /// Namespace for generated class names; `card-` yields `card-frame`,
    /// `card-text` and so on
    pub class_prefix: Option<String>,
}

impl Default for SvgConfig {
    /// File output: XML header, indented, `card-` classes
    fn default() -> Self {
        Self {
            standalone: true,
            pretty_print: true,
            class_prefix: Some("card-".to_string()),
        }
    }
}

impl SvgConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-line output without the XML header, for embedding a card in a page
    pub fn inline() -> Self {
        Self::default()
            .with_standalone(false)
            .with_pretty_print(false)
    }

    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Use another class namespace, e.g. when two card styles share a page
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Bare class names such as `frame` and `text`
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_output_by_default() {
        let config = SvgConfig::default();
        assert!(config.standalone);
        assert!(config.pretty_print);
        assert_eq!(config.class_prefix.as_deref(), Some("card-"));
    }

    #[test]
    fn test_custom_class_namespace() {
        let config = SvgConfig::new()
            .with_standalone(false)
            .with_class_prefix("deck-");

        assert!(!config.standalone);
        assert!(config.pretty_print);
        assert_eq!(config.class_prefix.as_deref(), Some("deck-"));
    }

    #[test]
    fn test_inline_config() {
        let config = SvgConfig::inline().without_class_prefix();
        assert!(!config.standalone);
        assert!(!config.pretty_print);
        assert_eq!(config.class_prefix, None);
    }
}

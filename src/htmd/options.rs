//! Conversion options and their builder

use std::path::Path;

use serde::Deserialize;

use crate::error::{ConvertError, ConvertResult};

/// How a `<br>` element is written in Markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrStyle {
    /// Two trailing spaces followed by a newline
    #[default]
    TwoSpaces,
    /// A backslash followed by a newline
    Backslash,
}

/// Options consumed by the element handlers.
///
/// Every field has a default, so a JSON options file only needs the fields
/// it changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Code fence used for fenced code blocks (default: "```")
    pub fence: String,

    /// Line break rendering (default: two spaces)
    pub br_style: BrStyle,

    /// Emit tables that cannot become GFM tables as their original HTML
    /// (default: true). When disabled, such tables degrade to their
    /// composed cell text.
    pub keep_tables: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            fence: "```".to_string(),
            br_style: BrStyle::TwoSpaces,
            keep_tables: true,
        }
    }
}

impl Options {
    #[must_use]
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    /// Parse options from a JSON document and validate them.
    pub fn from_json_str(json: &str) -> ConvertResult<Self> {
        let options: Options = serde_json::from_str(json)?;
        validate_fence(&options.fence)?;
        Ok(options)
    }

    /// Read and parse an options file.
    pub fn from_json_file(path: impl AsRef<Path>) -> ConvertResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConvertError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

/// Fluent builder for [`Options`].
#[derive(Debug, Clone, Default)]
pub struct OptionsBuilder {
    fence: Option<String>,
    br_style: Option<BrStyle>,
    keep_tables: Option<bool>,
}

/// Start from existing options, e.g. ones loaded from a file.
impl From<Options> for OptionsBuilder {
    fn from(options: Options) -> Self {
        Self {
            fence: Some(options.fence),
            br_style: Some(options.br_style),
            keep_tables: Some(options.keep_tables),
        }
    }
}

impl OptionsBuilder {
    #[must_use]
    pub fn fence(mut self, fence: impl Into<String>) -> Self {
        self.fence = Some(fence.into());
        self
    }

    #[must_use]
    pub fn br_style(mut self, br_style: BrStyle) -> Self {
        self.br_style = Some(br_style);
        self
    }

    #[must_use]
    pub fn keep_tables(mut self, keep_tables: bool) -> Self {
        self.keep_tables = Some(keep_tables);
        self
    }

    /// Build the options, falling back to defaults for unset fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the fence is not at least three backticks or
    /// three tildes.
    pub fn build(self) -> ConvertResult<Options> {
        let defaults = Options::default();
        let options = Options {
            fence: self.fence.unwrap_or(defaults.fence),
            br_style: self.br_style.unwrap_or(defaults.br_style),
            keep_tables: self.keep_tables.unwrap_or(defaults.keep_tables),
        };
        validate_fence(&options.fence)?;
        Ok(options)
    }
}

fn validate_fence(fence: &str) -> ConvertResult<()> {
    let valid = fence.len() >= 3
        && (fence.bytes().all(|b| b == b'`') || fence.bytes().all(|b| b == b'~'));
    if valid {
        Ok(())
    } else {
        Err(ConvertError::InvalidOption {
            name: "fence",
            message: format!("expected three or more backticks or tildes, got {fence:?}"),
        })
    }
}

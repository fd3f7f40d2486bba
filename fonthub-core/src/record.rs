//! Font metadata records as stored on disk and served to callers

use serde::{Deserialize, Deserializer, Serialize};

/// One font's metadata entry, keyed by `name`.
///
/// Field names and nesting follow the on-disk documents, so the same type
/// is used for decoding the metadata set and for serving it. Capitalised
/// keys (`Name`, `FontsFiles`) are accepted on input; output always uses
/// the lowercase names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontRecord {
    #[serde(default, alias = "Name")]
    pub name: String,
    #[serde(default, alias = "License")]
    pub license: String,
    #[serde(default, alias = "Version")]
    pub version: String,
    #[serde(default, alias = "Categories", deserialize_with = "nullable_list")]
    pub categories: Vec<String>,
    #[serde(default, alias = "Widths", deserialize_with = "nullable_list")]
    pub widths: Vec<String>,
    #[serde(default, alias = "Weights", deserialize_with = "nullable_list")]
    pub weights: Vec<String>,
    #[serde(default, alias = "Styles", deserialize_with = "nullable_list")]
    pub styles: Vec<String>,
    #[serde(default, alias = "Languages", deserialize_with = "nullable_list")]
    pub languages: Vec<String>,
    #[serde(default, alias = "Source")]
    pub source: String,
    #[serde(rename = "fontsFiles", alias = "FontsFiles", default)]
    pub fonts_files: FontFiles,
}

/// Where the font binaries for a record can be fetched from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontFiles {
    #[serde(default, alias = "Link")]
    pub link: String,
    #[serde(default, alias = "Path")]
    pub path: String,
}

impl FontRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_categories<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_widths<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.widths = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_weights<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.weights = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_styles<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.styles = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_languages<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = values.into_iter().map(Into::into).collect();
        self
    }

    /// True when `category` appears verbatim in the record's category list.
    pub fn in_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

/// Missing and `null` lists both decode as empty.
fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default())
}

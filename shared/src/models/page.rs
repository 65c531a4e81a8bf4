//! Page section: what is being viewed.

use serde::{Deserialize, Serialize};

use super::{DataHolder, SectionSchema};

/// Typed view of the page section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    #[serde(rename = "type")]
    pub page_type: String,
    pub name: String,
    pub path_name: String,
    pub title: String,
    #[serde(default)]
    pub validation_errors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageSchema;

impl SectionSchema for PageSchema {
    const LOGGER_NAME: &'static str = "page-data";
    const REQUIRED_STRINGS: &'static [&'static str] = &["type", "name", "pathName", "title"];
    type Data = PageData;
}

pub type PageHolder = DataHolder<PageSchema>;

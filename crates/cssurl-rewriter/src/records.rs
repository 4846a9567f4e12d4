//! Records handed to the resolver stage.
//!
//! Every group yields an [`ImportRequest`] followed by a [`ReplaceDirective`].
//! The resolver turns each import into final text and substitutes it for the
//! placeholder wherever it appears in rewritten values.

use crate::dedup::{Groups, UrlGroup};

/// Ask the resolver to resolve one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ImportRequest {
    pub index: usize,
    pub url: String,
    #[cfg_attr(feature = "serde", serde(rename = "needQuotes"))]
    pub needs_quotes: bool,
    pub hash: String,
    #[cfg_attr(feature = "serde", serde(rename = "name"))]
    pub placeholder: String,
}

/// Tell the resolver that `placeholder` occurs in rewritten values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplaceDirective {
    #[cfg_attr(feature = "serde", serde(rename = "name"))]
    pub placeholder: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum OutputRecord {
    #[cfg_attr(feature = "serde", serde(rename = "import"))]
    Import(ImportRequest),
    #[cfg_attr(feature = "serde", serde(rename = "replacer"))]
    Replace(ReplaceDirective),
}

impl OutputRecord {
    pub fn placeholder(&self) -> &str {
        match self {
            OutputRecord::Import(import) => &import.placeholder,
            OutputRecord::Replace(replace) => &replace.placeholder,
        }
    }

    pub fn as_import(&self) -> Option<&ImportRequest> {
        match self {
            OutputRecord::Import(import) => Some(import),
            OutputRecord::Replace(_) => None,
        }
    }
}

impl From<&UrlGroup> for ImportRequest {
    fn from(group: &UrlGroup) -> Self {
        Self {
            index: group.index,
            url: group.url.clone(),
            needs_quotes: group.needs_quotes,
            hash: group.hash.clone(),
            placeholder: group.placeholder.clone(),
        }
    }
}

/// Records for all groups, in group index order.
pub fn records_for(groups: &Groups) -> Vec<OutputRecord> {
    groups
        .iter()
        .flat_map(|group| {
            [
                OutputRecord::Import(ImportRequest::from(group)),
                OutputRecord::Replace(ReplaceDirective {
                    placeholder: group.placeholder.clone(),
                }),
            ]
        })
        .collect()
}

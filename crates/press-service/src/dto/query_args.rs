//! Arguments of the named queries.
//!
//! Every struct deserializes from the JSON object a caller hands to the
//! registry and is validated before any read is issued.

use press_core::{post_type, rules, MetaId, MetaKeys, PostId};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

fn default_post_type() -> String {
    post_type::POST.to_string()
}

/// Arguments of the `posts` query.
///
/// `post_type` is the only recognized option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PostsArgs {
    /// Post type to list, `post` when omitted.
    #[serde(default = "default_post_type")]
    #[validate(custom(function = "rules::not_blank"))]
    pub post_type: String,
}

impl Default for PostsArgs {
    fn default() -> Self {
        Self {
            post_type: default_post_type(),
        }
    }
}

impl PostsArgs {
    #[must_use]
    pub fn of_type(post_type: impl Into<String>) -> Self {
        Self {
            post_type: post_type.into(),
        }
    }
}

/// Arguments of the `post` and `postThumbnail` queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PostIdArgs {
    pub id: PostId,
}

/// Arguments of the `postByName` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PostByNameArgs {
    #[validate(custom(function = "rules::not_blank"))]
    pub name: String,
}

/// Arguments of the `postmeta` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_post_meta_args"))]
pub struct PostMetaArgs {
    pub id: PostId,
    /// Keys to keep; all keys when omitted.
    #[serde(default)]
    pub keys: Option<Vec<String>>,
}

fn validate_post_meta_args(args: &PostMetaArgs) -> Result<(), ValidationError> {
    match &args.keys {
        Some(keys) => rules::meta_keys(keys),
        None => Ok(()),
    }
}

impl PostMetaArgs {
    /// Returns the key restriction as a set.
    #[must_use]
    pub fn meta_keys(&self) -> Option<MetaKeys> {
        self.keys.as_ref().map(|keys| keys.iter().cloned().collect())
    }
}

/// Arguments of the `postMetaById` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PostMetaByIdArgs {
    pub id: MetaId,
}

/// Arguments of the `menu` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct MenuArgs {
    /// Slug of the menu term.
    #[validate(custom(function = "rules::not_blank"))]
    pub name: String,
}

/// Arguments of the `postTerms` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PostTermsArgs {
    pub id: PostId,
    #[validate(custom(function = "rules::not_blank"))]
    pub taxonomy: String,
}

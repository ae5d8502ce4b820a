/*!
 * Document model consumed by the translation pipeline.
 *
 * These types mirror the rows of the host application's document store,
 * restricted to what translation needs: the description, the attached files
 * and the access-control list.
 */

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Permission level granted by an ACL entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Permission {
    Read,
    Write,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "READ"),
            Self::Write => write!(f, "WRITE"),
        }
    }
}

impl FromStr for Permission {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "READ" => Ok(Self::Read),
            "WRITE" => Ok(Self::Write),
            _ => Err(anyhow!("Invalid permission: {}", s)),
        }
    }
}

/// One grant on a document, targeting a user id or a group id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclEntry {
    pub target_id: String,
    pub permission: Permission,
}

impl AclEntry {
    pub fn new(target_id: impl Into<String>, permission: Permission) -> Self {
        Self {
            target_id: target_id.into(),
            permission,
        }
    }
}

/// A stored document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Opaque identifier
    pub id: String,
    /// User who created the document
    pub owner_id: String,
    pub title: String,
    /// Free text, possibly empty
    pub description: String,
    /// Declared document language, if any
    pub language: Option<String>,
    /// Grants attached to the document
    pub acl: Vec<AclEntry>,
}

impl Document {
    pub fn new(id: impl Into<String>, owner_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            title: title.into(),
            description: String::new(),
            language: None,
            acl: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn grant(mut self, target_id: impl Into<String>, permission: Permission) -> Self {
        self.acl.push(AclEntry::new(target_id, permission));
        self
    }
}

/// A binary attachment of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: String,
    pub document_id: String,
    /// Original file name as uploaded
    pub name: Option<String>,
    /// Location of the stored content
    pub path: PathBuf,
    /// Declared MIME type
    pub mime_type: Option<String>,
}

impl StoredFile {
    pub fn new(id: impl Into<String>, document_id: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self {
            id: id.into(),
            document_id: document_id.into(),
            name: None,
            path: path.as_ref().to_path_buf(),
            mime_type: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Identity of the caller asking for a translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    pub user_id: String,
    pub group_ids: Vec<String>,
}

impl Requester {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            group_ids: Vec::new(),
        }
    }

    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_ids.extend(groups.into_iter().map(Into::into));
        self
    }

    /// User id followed by group ids, the ids ACL entries may target
    pub fn target_ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.user_id.as_str()).chain(self.group_ids.iter().map(String::as_str))
    }
}

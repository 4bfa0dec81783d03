use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author of a post, embedded in the post itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Display name used by the API: `"first last"`, trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// BlogPost entity - a stored blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub author: Author,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl BlogPost {
    /// Materialize a new post under a store-assigned id.
    pub fn from_new(id: Uuid, new: NewBlogPost) -> Self {
        Self {
            id,
            author: new.author,
            title: new.title,
            content: new.content,
            created: new.created.unwrap_or_else(Utc::now),
        }
    }

    /// Apply whitelisted changes. Author and creation time never change.
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
    }
}

/// A post that has not been stored yet; the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlogPost {
    pub author: Author,
    pub title: String,
    pub content: String,
    /// Defaults to the insertion time when absent.
    pub created: Option<DateTime<Utc>>,
}

impl NewBlogPost {
    pub fn new(author: Author, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author,
            title: title.into(),
            content: content.into(),
            created: None,
        }
    }

    pub fn created_at(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }
}

/// Partial update of a post. Only `title` and `content` are updatable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_joins_and_trims() {
        assert_eq!(Author::new("Ada", "Lovelace").full_name(), "Ada Lovelace");
        assert_eq!(Author::new("", "Prince").full_name(), "Prince");
        assert_eq!(Author::new("Cher", "").full_name(), "Cher");
    }

    #[test]
    fn test_from_new_defaults_created() {
        let before = Utc::now();
        let post = BlogPost::from_new(
            Uuid::new_v4(),
            NewBlogPost::new(Author::new("A", "B"), "t", "c"),
        );
        assert!(post.created >= before);
    }

    #[test]
    fn test_apply_only_touches_whitelisted_fields() {
        let created = Utc::now() - chrono::Duration::days(3);
        let mut post = BlogPost::from_new(
            Uuid::new_v4(),
            NewBlogPost::new(Author::new("A", "B"), "old title", "old content").created_at(created),
        );

        post.apply(PostChanges {
            title: Some("new title".to_string()),
            content: None,
        });

        assert_eq!(post.title, "new title");
        assert_eq!(post.content, "old content");
        assert_eq!(post.author, Author::new("A", "B"));
        assert_eq!(post.created, created);
    }
}

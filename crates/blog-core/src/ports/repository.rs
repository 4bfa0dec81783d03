use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BlogPost, NewBlogPost, PostChanges};
use crate::error::RepoError;

/// Generic repository trait defining the read and delete side of CRUD.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID. Absence is `Ok(None)`, not an error.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Every stored entity.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Delete an entity by its ID. Fails with `RepoError::NotFound` if absent.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;

    /// Number of stored entities.
    async fn count(&self) -> Result<u64, RepoError>;
}

/// Blog post store.
#[async_trait]
pub trait PostRepository: BaseRepository<BlogPost, Uuid> {
    /// Store a new post; the store assigns its id.
    async fn insert(&self, post: NewBlogPost) -> Result<BlogPost, RepoError>;

    /// Bulk insert, used for seeding.
    async fn insert_many(&self, posts: Vec<NewBlogPost>) -> Result<Vec<BlogPost>, RepoError>;

    /// Any one stored post, if there is one.
    async fn find_one(&self) -> Result<Option<BlogPost>, RepoError>;

    /// Apply whitelisted changes and return the updated post.
    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<BlogPost, RepoError>;

    /// Remove every post. Used to tear down test data.
    async fn clear(&self) -> Result<u64, RepoError>;

    /// Release the underlying connection. Further calls may fail.
    async fn close(&self) -> Result<(), RepoError> {
        Ok(())
    }
}

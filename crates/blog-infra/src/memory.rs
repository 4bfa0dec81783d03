//! In-memory post store - used for `memory://` URLs and tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{BlogPost, NewBlogPost, PostChanges};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};

/// In-memory post store backed by an insertion-ordered `Vec` behind an async
/// `RwLock`.
///
/// Note: Data is lost on process restart. Once closed, every operation fails
/// with `RepoError::Connection`, mirroring a closed connection pool.
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<BlogPost>>,
    closed: AtomicBool,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
            closed: AtomicBool::new(false),
        }
    }

    fn ensure_open(&self) -> Result<(), RepoError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(RepoError::Connection("store is closed".to_string()));
        }
        Ok(())
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<BlogPost, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError> {
        self.ensure_open()?;
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        self.ensure_open()?;
        Ok(self.posts.read().await.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.ensure_open()?;
        let mut posts = self.posts.write().await;
        let index = posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        posts.remove(index);
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        self.ensure_open()?;
        Ok(self.posts.read().await.len() as u64)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, post: NewBlogPost) -> Result<BlogPost, RepoError> {
        self.ensure_open()?;
        let post = BlogPost::from_new(Uuid::new_v4(), post);
        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn insert_many(&self, posts: Vec<NewBlogPost>) -> Result<Vec<BlogPost>, RepoError> {
        self.ensure_open()?;
        let created: Vec<BlogPost> = posts
            .into_iter()
            .map(|p| BlogPost::from_new(Uuid::new_v4(), p))
            .collect();
        // Single write lock so the batch becomes visible at once
        self.posts.write().await.extend(created.iter().cloned());
        Ok(created)
    }

    async fn find_one(&self) -> Result<Option<BlogPost>, RepoError> {
        self.ensure_open()?;
        Ok(self.posts.read().await.first().cloned())
    }

    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<BlogPost, RepoError> {
        self.ensure_open()?;
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        post.apply(changes);
        Ok(post.clone())
    }

    async fn clear(&self) -> Result<u64, RepoError> {
        self.ensure_open()?;
        let mut posts = self.posts.write().await;
        let removed = posts.len() as u64;
        posts.clear();
        Ok(removed)
    }

    async fn close(&self) -> Result<(), RepoError> {
        self.closed.store(true, Ordering::Release);
        tracing::debug!("In-memory store closed");
        Ok(())
    }
}

//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, Set};
use uuid::Uuid;

use blog_core::domain::{BlogPost, NewBlogPost, PostChanges};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::entity::post::{ActiveModel, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, query_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, post: NewBlogPost) -> Result<BlogPost, RepoError> {
        let post = BlogPost::from_new(Uuid::new_v4(), post);
        tracing::debug!(post_id = %post.id, "Inserting post");

        let model = ActiveModel::from(post)
            .insert(&self.db)
            .await
            .map_err(query_err)?;

        Ok(model.into())
    }

    async fn insert_many(&self, posts: Vec<NewBlogPost>) -> Result<Vec<BlogPost>, RepoError> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let posts: Vec<BlogPost> = posts
            .into_iter()
            .map(|p| BlogPost::from_new(Uuid::new_v4(), p))
            .collect();
        let models: Vec<ActiveModel> = posts.iter().cloned().map(Into::into).collect();

        let inserted = PostEntity::insert_many(models)
            .exec_without_returning(&self.db)
            .await
            .map_err(query_err)?;
        tracing::debug!(count = inserted, "Inserted posts");

        Ok(posts)
    }

    async fn find_one(&self) -> Result<Option<BlogPost>, RepoError> {
        let result = PostEntity::find()
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<BlogPost, RepoError> {
        let model = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?
            .ok_or(RepoError::NotFound)?;

        if changes.is_empty() {
            return Ok(model.into());
        }

        let mut active = model.into_active_model();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(content) = changes.content {
            active.content = Set(content);
        }

        let model = active.update(&self.db).await.map_err(query_err)?;
        Ok(model.into())
    }

    async fn clear(&self) -> Result<u64, RepoError> {
        let result = PostEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.rows_affected)
    }

    async fn close(&self) -> Result<(), RepoError> {
        // Closes the shared pool; `close_by_ref` is what `close` delegates to.
        self.db
            .close_by_ref()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))
    }
}

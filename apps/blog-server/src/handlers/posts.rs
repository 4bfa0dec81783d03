//! Blog post handlers.

use actix_web::{HttpResponse, http::header, web};
use uuid::Uuid;

use blog_core::domain::{Author, BlogPost, NewBlogPost, PostChanges};
use blog_core::error::DomainError;
use blog_shared::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::observability::RequestId;
use crate::state::AppState;

const ENTITY: &str = "BlogPost";

/// Flatten a stored post into its API shape.
pub fn to_response(post: BlogPost) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        author: post.author.full_name(),
        title: post.title,
        content: post.content,
        created: post.created,
    }
}

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    tracing::debug!(count = posts.len(), "Listing posts");

    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: ENTITY,
            id,
        })?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let new_post = validate_create(body.into_inner())?;

    let post = state.posts.insert(new_post).await?;
    tracing::info!(
        request_id = %request_id.as_str(),
        post_id = %post.id,
        "Post created"
    );

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/posts/{}", post.id)))
        .json(to_response(post)))
}

/// PUT /posts/{id}
///
/// Only `title` and `content` are written; the body `id` must repeat the path id.
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let path_id = path.into_inner();

    let body_id = req.id.ok_or_else(|| DomainError::missing_field("id"))?;
    if body_id != path_id {
        return Err(DomainError::Validation(format!(
            "Request path id ({}) and request body id ({}) must match",
            path_id, body_id
        ))
        .into());
    }

    let id = parse_id(&path_id)?;
    let changes = PostChanges {
        title: not_blank(req.title, "title")?,
        content: not_blank(req.content, "content")?,
    };
    if changes.is_empty() {
        tracing::debug!(post_id = %id, "Update carries no updatable fields");
    }

    state.posts.update(id, changes).await?;
    tracing::info!(post_id = %id, "Post updated");

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;

    state.posts.delete(id).await?;
    tracing::info!(post_id = %id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}

/// An id that is not a UUID cannot name a stored post.
fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::NotFound(format!("{} with id {} not found", ENTITY, raw)))
}

fn validate_create(req: CreatePostRequest) -> Result<NewBlogPost, DomainError> {
    let title = required(req.title, "title")?;
    let content = required(req.content, "content")?;
    let author = req.author.ok_or_else(|| DomainError::missing_field("author"))?;
    let author = Author {
        first_name: required(author.first_name, "author.firstName")?,
        last_name: required(author.last_name, "author.lastName")?,
    };

    Ok(NewBlogPost {
        author,
        title,
        content,
        created: req.created,
    })
}

fn required(value: Option<String>, field: &str) -> Result<String, DomainError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DomainError::missing_field(field))
}

/// An updatable field may be omitted, but not cleared.
fn not_blank(value: Option<String>, field: &str) -> Result<Option<String>, DomainError> {
    match value {
        Some(v) if v.is_empty() => Err(DomainError::Validation(format!(
            "`{}` must not be empty",
            field
        ))),
        other => Ok(other),
    }
}

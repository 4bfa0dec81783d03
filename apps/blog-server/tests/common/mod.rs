//! Shared fixtures for the blog API integration tests.

#![allow(dead_code)]

use chrono::{Duration, Utc};
use uuid::Uuid;

use blog_core::domain::{Author, BlogPost, NewBlogPost};
use blog_server::AppState;

pub const SEED_COUNT: usize = 10;

/// A post with random-looking names, text and a creation date in the past.
pub fn generate_post() -> NewBlogPost {
    let tag = Uuid::new_v4().simple().to_string();
    let days_ago = i64::from(tag.as_bytes()[0] % 30) + 1;

    NewBlogPost::new(
        Author::new(format!("First{}", &tag[..6]), format!("Last{}", &tag[6..12])),
        format!("title {}", &tag[12..20]),
        format!("content {} {}", &tag[20..], &tag[..4]),
    )
    .created_at(Utc::now() - Duration::days(days_ago))
}

pub async fn seed_blog_data(state: &AppState) -> Vec<BlogPost> {
    let posts = (0..SEED_COUNT).map(|_| generate_post()).collect();
    state.posts.insert_many(posts).await.unwrap()
}

pub async fn tear_down_db(state: &AppState) {
    state.posts.clear().await.unwrap();
}

use crate::{
    error::{AppError, AppResult},
    models::{blog_post, category, user, BlogPost, BlogPostModel, Category, CategoryModel, User,
        UserModel},
    response::Pagination,
    utils::join_keywords,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Statement,
};
use std::collections::HashMap;

const FEATURED_MAX: u64 = 20;

pub struct CreateBlogPostInput {
    pub slug: String,
    pub title_ko: String,
    pub title_en: String,
    pub title_ja: String,
    pub excerpt_ko: Option<String>,
    pub excerpt_en: Option<String>,
    pub excerpt_ja: Option<String>,
    pub content_ko: String,
    pub content_en: String,
    pub content_ja: String,
    pub thumbnail_url: Option<String>,
    pub difficulty: Option<String>,
    pub reading_time: Option<i32>,
    pub meta_keywords: Vec<String>,
    pub published: bool,
    pub author_id: i32,
    pub category_id: i32,
}

#[derive(Default)]
pub struct UpdateBlogPostInput {
    pub slug: Option<String>,
    pub title_ko: Option<String>,
    pub title_en: Option<String>,
    pub title_ja: Option<String>,
    pub excerpt_ko: Option<String>,
    pub excerpt_en: Option<String>,
    pub excerpt_ja: Option<String>,
    pub content_ko: Option<String>,
    pub content_en: Option<String>,
    pub content_ja: Option<String>,
    pub thumbnail_url: Option<String>,
    pub difficulty: Option<String>,
    pub reading_time: Option<i32>,
    pub meta_keywords: Option<Vec<String>>,
    pub published: Option<bool>,
    pub category_id: Option<i32>,
}

/// A post with its author and category expanded.
pub type ExpandedPost = (BlogPostModel, Option<UserModel>, Option<CategoryModel>);

pub struct BlogPostService {
    db: DatabaseConnection,
}

impl BlogPostService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: CreateBlogPostInput) -> AppResult<ExpandedPost> {
        let difficulty = input
            .difficulty
            .unwrap_or_else(|| blog_post::DIFFICULTY_BEGINNER.to_string());
        if !blog_post::is_valid_difficulty(&difficulty) {
            return Err(AppError::Validation(format!(
                "Unknown difficulty '{}'",
                difficulty
            )));
        }

        let meta_keywords = join_keywords(&input.meta_keywords)?;

        // Surface dangling references as validation errors instead of
        // letting the RESTRICT foreign keys bubble up as database errors.
        if Category::find_by_id(input.category_id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(AppError::Validation("Unknown category".to_string()));
        }
        if User::find_by_id(input.author_id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(AppError::Validation("Unknown author".to_string()));
        }

        let now = chrono::Utc::now().naive_utc();
        let published_at = input.published.then_some(now);

        let new_post = blog_post::ActiveModel {
            slug: sea_orm::ActiveValue::Set(input.slug),
            title_ko: sea_orm::ActiveValue::Set(input.title_ko),
            title_en: sea_orm::ActiveValue::Set(input.title_en),
            title_ja: sea_orm::ActiveValue::Set(input.title_ja),
            excerpt_ko: sea_orm::ActiveValue::Set(input.excerpt_ko),
            excerpt_en: sea_orm::ActiveValue::Set(input.excerpt_en),
            excerpt_ja: sea_orm::ActiveValue::Set(input.excerpt_ja),
            content_ko: sea_orm::ActiveValue::Set(input.content_ko),
            content_en: sea_orm::ActiveValue::Set(input.content_en),
            content_ja: sea_orm::ActiveValue::Set(input.content_ja),
            thumbnail_url: sea_orm::ActiveValue::Set(input.thumbnail_url),
            difficulty: sea_orm::ActiveValue::Set(difficulty),
            reading_time: sea_orm::ActiveValue::Set(input.reading_time),
            view_count: sea_orm::ActiveValue::Set(0),
            like_count: sea_orm::ActiveValue::Set(0),
            meta_keywords: sea_orm::ActiveValue::Set(meta_keywords),
            published: sea_orm::ActiveValue::Set(input.published),
            published_at: sea_orm::ActiveValue::Set(published_at),
            author_id: sea_orm::ActiveValue::Set(input.author_id),
            category_id: sea_orm::ActiveValue::Set(input.category_id),
            created_at: sea_orm::ActiveValue::Set(now),
            updated_at: sea_orm::ActiveValue::Set(now),
            ..Default::default()
        };

        let post = new_post.insert(&self.db).await?;
        self.expand(post).await
    }

    /// A page of posts ordered by publish time descending, optionally
    /// restricted to published ones. The envelope total is computed over
    /// the filtered set.
    pub async fn list(
        &self,
        page: u64,
        limit: u64,
        published_only: bool,
    ) -> AppResult<(Vec<ExpandedPost>, Pagination)> {
        let mut query = BlogPost::find();
        if published_only {
            query = query.filter(blog_post::Column::Published.eq(true));
        }

        let paginator = query
            .order_by_desc(blog_post::Column::PublishedAt)
            .paginate(&self.db, limit);

        let total = paginator.num_items().await?;
        let posts = paginator.fetch_page(page.saturating_sub(1)).await?;
        let posts = self.attach_relations(posts).await?;

        Ok((posts, Pagination::new(page, limit, total)))
    }

    /// Fetch a post by slug and count the view. Every fetch increments the
    /// counter with an atomic column update, so repeat fetches by the same
    /// client all count.
    pub async fn get_by_slug(&self, slug: &str) -> AppResult<ExpandedPost> {
        let post = BlogPost::find()
            .filter(blog_post::Column::Slug.eq(slug))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        self.db
            .execute(Statement::from_sql_and_values(
                sea_orm::DatabaseBackend::Postgres,
                "UPDATE blog_posts SET view_count = view_count + 1 WHERE id = $1",
                [post.id.into()],
            ))
            .await?;

        self.expand(post).await
    }

    pub async fn update(&self, id: i32, input: UpdateBlogPostInput) -> AppResult<ExpandedPost> {
        let existing = BlogPost::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        if let Some(difficulty) = &input.difficulty {
            if !blog_post::is_valid_difficulty(difficulty) {
                return Err(AppError::Validation(format!(
                    "Unknown difficulty '{}'",
                    difficulty
                )));
            }
        }
        if let Some(category_id) = input.category_id {
            if Category::find_by_id(category_id)
                .one(&self.db)
                .await?
                .is_none()
            {
                return Err(AppError::Validation("Unknown category".to_string()));
            }
        }

        let was_published = existing.published;
        let had_publish_time = existing.published_at.is_some();
        let now = chrono::Utc::now().naive_utc();

        let mut active: blog_post::ActiveModel = existing.into();
        if let Some(v) = input.slug {
            active.slug = sea_orm::ActiveValue::Set(v);
        }
        if let Some(v) = input.title_ko {
            active.title_ko = sea_orm::ActiveValue::Set(v);
        }
        if let Some(v) = input.title_en {
            active.title_en = sea_orm::ActiveValue::Set(v);
        }
        if let Some(v) = input.title_ja {
            active.title_ja = sea_orm::ActiveValue::Set(v);
        }
        if let Some(v) = input.excerpt_ko {
            active.excerpt_ko = sea_orm::ActiveValue::Set(Some(v));
        }
        if let Some(v) = input.excerpt_en {
            active.excerpt_en = sea_orm::ActiveValue::Set(Some(v));
        }
        if let Some(v) = input.excerpt_ja {
            active.excerpt_ja = sea_orm::ActiveValue::Set(Some(v));
        }
        if let Some(v) = input.content_ko {
            active.content_ko = sea_orm::ActiveValue::Set(v);
        }
        if let Some(v) = input.content_en {
            active.content_en = sea_orm::ActiveValue::Set(v);
        }
        if let Some(v) = input.content_ja {
            active.content_ja = sea_orm::ActiveValue::Set(v);
        }
        if let Some(v) = input.thumbnail_url {
            active.thumbnail_url = sea_orm::ActiveValue::Set(Some(v));
        }
        if let Some(v) = input.difficulty {
            active.difficulty = sea_orm::ActiveValue::Set(v);
        }
        if let Some(v) = input.reading_time {
            active.reading_time = sea_orm::ActiveValue::Set(Some(v));
        }
        if let Some(keywords) = input.meta_keywords {
            active.meta_keywords = sea_orm::ActiveValue::Set(join_keywords(&keywords)?);
        }
        if let Some(published) = input.published {
            active.published = sea_orm::ActiveValue::Set(published);
            // First transition to published stamps the publish time.
            if published && !was_published && !had_publish_time {
                active.published_at = sea_orm::ActiveValue::Set(Some(now));
            }
        }
        if let Some(category_id) = input.category_id {
            active.category_id = sea_orm::ActiveValue::Set(category_id);
        }
        active.updated_at = sea_orm::ActiveValue::Set(now);

        let updated = active.update(&self.db).await?;
        self.expand(updated).await
    }

    pub async fn remove(&self, id: i32) -> AppResult<()> {
        BlogPost::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        BlogPost::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    /// Unconditional atomic like increment; returns the new count.
    /// There is no per-viewer limit server-side.
    pub async fn increment_like(&self, slug: &str) -> AppResult<i32> {
        let row = self
            .db
            .query_one(Statement::from_sql_and_values(
                sea_orm::DatabaseBackend::Postgres,
                "UPDATE blog_posts SET like_count = like_count + 1 \
                 WHERE slug = $1 RETURNING like_count",
                [slug.into()],
            ))
            .await?
            .ok_or(AppError::NotFound)?;

        let like_count: i32 = row.try_get("", "like_count")?;
        Ok(like_count)
    }

    /// Top published posts by view count, then like count, with category
    /// summaries.
    pub async fn get_featured(
        &self,
        limit: u64,
    ) -> AppResult<Vec<(BlogPostModel, Option<CategoryModel>)>> {
        let limit = limit.clamp(1, FEATURED_MAX);

        let posts = BlogPost::find()
            .filter(blog_post::Column::Published.eq(true))
            .order_by_desc(blog_post::Column::ViewCount)
            .order_by_desc(blog_post::Column::LikeCount)
            .limit(limit)
            .all(&self.db)
            .await?;

        let categories = self.category_map(&posts).await?;
        Ok(posts
            .into_iter()
            .map(|post| {
                let category = categories.get(&post.category_id).cloned();
                (post, category)
            })
            .collect())
    }

    async fn expand(&self, post: BlogPostModel) -> AppResult<ExpandedPost> {
        let author = User::find_by_id(post.author_id).one(&self.db).await?;
        let category = Category::find_by_id(post.category_id).one(&self.db).await?;
        Ok((post, author, category))
    }

    async fn attach_relations(&self, posts: Vec<BlogPostModel>) -> AppResult<Vec<ExpandedPost>> {
        let author_ids: Vec<i32> = posts.iter().map(|p| p.author_id).collect();
        let authors: HashMap<i32, UserModel> = User::find()
            .filter(user::Column::Id.is_in(author_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();
        let categories = self.category_map(&posts).await?;

        Ok(posts
            .into_iter()
            .map(|post| {
                let author = authors.get(&post.author_id).cloned();
                let category = categories.get(&post.category_id).cloned();
                (post, author, category)
            })
            .collect())
    }

    async fn category_map(
        &self,
        posts: &[BlogPostModel],
    ) -> AppResult<HashMap<i32, CategoryModel>> {
        let category_ids: Vec<i32> = posts.iter().map(|p| p.category_id).collect();
        let categories = Category::find()
            .filter(category::Column::Id.is_in(category_ids))
            .all(&self.db)
            .await?;
        Ok(categories.into_iter().map(|c| (c.id, c)).collect())
    }
}

use crate::error::{AppError, AppResult};
use crate::locale::{resolve_lang, Locale, Localized};
use crate::middleware::auth::require_editor;
use crate::middleware::AuthUser;
use crate::models::{BlogPostModel, CategoryModel, UserModel};
use crate::response::{ApiResponse, Pagination};
use crate::services::blog_post::{
    BlogPostService, CreateBlogPostInput, UpdateBlogPostInput,
};
use crate::utils::split_keywords;
use axum::{extract::Path, extract::Query, response::IntoResponse, Extension, Json};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBlogPostRequest {
    /// URL slug (1-200 characters)
    #[validate(length(min = 1, max = 200))]
    pub slug: String,
    /// Korean title
    #[validate(length(min = 1, max = 200))]
    pub title_ko: String,
    /// English title
    #[validate(length(min = 1, max = 200))]
    pub title_en: String,
    /// Japanese title
    #[validate(length(min = 1, max = 200))]
    pub title_ja: String,
    /// Korean excerpt
    #[validate(length(max = 500))]
    pub excerpt_ko: Option<String>,
    /// English excerpt
    #[validate(length(max = 500))]
    pub excerpt_en: Option<String>,
    /// Japanese excerpt
    #[validate(length(max = 500))]
    pub excerpt_ja: Option<String>,
    /// Korean content (Markdown)
    #[validate(length(min = 1))]
    pub content_ko: String,
    /// English content (Markdown)
    #[validate(length(min = 1))]
    pub content_en: String,
    /// Japanese content (Markdown)
    #[validate(length(min = 1))]
    pub content_ja: String,
    /// Thumbnail URL
    pub thumbnail_url: Option<String>,
    /// Difficulty (BEGINNER, INTERMEDIATE, ADVANCED)
    pub difficulty: Option<String>,
    /// Estimated reading time in minutes
    pub reading_time: Option<i32>,
    /// Keyword tokens (no commas allowed)
    pub meta_keywords: Vec<String>,
    /// Publish immediately
    pub published: Option<bool>,
    /// Category ID
    pub category_id: i32,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBlogPostRequest {
    /// URL slug (1-200 characters)
    #[validate(length(min = 1, max = 200))]
    pub slug: Option<String>,
    /// Korean title
    #[validate(length(min = 1, max = 200))]
    pub title_ko: Option<String>,
    /// English title
    #[validate(length(min = 1, max = 200))]
    pub title_en: Option<String>,
    /// Japanese title
    #[validate(length(min = 1, max = 200))]
    pub title_ja: Option<String>,
    /// Korean excerpt
    #[validate(length(max = 500))]
    pub excerpt_ko: Option<String>,
    /// English excerpt
    #[validate(length(max = 500))]
    pub excerpt_en: Option<String>,
    /// Japanese excerpt
    #[validate(length(max = 500))]
    pub excerpt_ja: Option<String>,
    /// Korean content (Markdown)
    pub content_ko: Option<String>,
    /// English content (Markdown)
    pub content_en: Option<String>,
    /// Japanese content (Markdown)
    pub content_ja: Option<String>,
    /// Thumbnail URL
    pub thumbnail_url: Option<String>,
    /// Difficulty (BEGINNER, INTERMEDIATE, ADVANCED)
    pub difficulty: Option<String>,
    /// Estimated reading time in minutes
    pub reading_time: Option<i32>,
    /// Keyword tokens (no commas allowed)
    pub meta_keywords: Option<Vec<String>>,
    /// Published flag
    pub published: Option<bool>,
    /// Category ID
    pub category_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorSummary {
    /// Author user ID
    pub id: i32,
    /// Author display name
    pub name: Option<String>,
    /// Author avatar URL
    pub avatar_url: Option<String>,
}

impl From<UserModel> for AuthorSummary {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            name: user.name,
            avatar_url: user.avatar_url,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategorySummary {
    /// Category ID
    pub id: i32,
    /// Category slug
    pub slug: String,
    /// Name resolved for the requested locale
    pub name: String,
    /// Icon glyph
    pub icon: Option<String>,
    /// Display color
    pub color: Option<String>,
}

impl CategorySummary {
    pub fn new(category: CategoryModel, locale: Locale) -> Self {
        let name = Localized::new(category.name_ko, category.name_en, category.name_ja)
            .into_get(locale);
        Self {
            id: category.id,
            slug: category.slug,
            name,
            icon: category.icon,
            color: category.color,
        }
    }
}

/// Card-level view of a post for list responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct PostSummary {
    /// Post ID
    pub id: i32,
    /// URL slug
    pub slug: String,
    /// Title resolved for the requested locale
    pub title: String,
    /// Excerpt resolved for the requested locale
    pub excerpt: Option<String>,
    /// Thumbnail URL
    pub thumbnail_url: Option<String>,
    /// Difficulty
    pub difficulty: String,
    /// Estimated reading time in minutes
    pub reading_time: Option<i32>,
    /// View count
    pub view_count: i32,
    /// Like count
    pub like_count: i32,
    /// Publish timestamp
    pub published_at: Option<String>,
    /// Post author
    pub author: Option<AuthorSummary>,
    /// Post category
    pub category: Option<CategorySummary>,
}

impl PostSummary {
    pub fn new(
        post: BlogPostModel,
        author: Option<UserModel>,
        category: Option<CategoryModel>,
        locale: Locale,
    ) -> Self {
        let title =
            Localized::new(post.title_ko, post.title_en, post.title_ja).into_get(locale);
        let excerpt =
            Localized::new(post.excerpt_ko, post.excerpt_en, post.excerpt_ja).into_get(locale);
        Self {
            id: post.id,
            slug: post.slug,
            title,
            excerpt,
            thumbnail_url: post.thumbnail_url,
            difficulty: post.difficulty,
            reading_time: post.reading_time,
            view_count: post.view_count,
            like_count: post.like_count,
            published_at: post.published_at.map(|t| t.to_string()),
            author: author.map(AuthorSummary::from),
            category: category.map(|c| CategorySummary::new(c, locale)),
        }
    }
}

/// Full view of a post with all three localized variants.
#[derive(Debug, Serialize, ToSchema)]
pub struct PostDetail {
    /// Post ID
    pub id: i32,
    /// URL slug
    pub slug: String,
    /// Korean title
    pub title_ko: String,
    /// English title
    pub title_en: String,
    /// Japanese title
    pub title_ja: String,
    /// Korean excerpt
    pub excerpt_ko: Option<String>,
    /// English excerpt
    pub excerpt_en: Option<String>,
    /// Japanese excerpt
    pub excerpt_ja: Option<String>,
    /// Korean content
    pub content_ko: String,
    /// English content
    pub content_en: String,
    /// Japanese content
    pub content_ja: String,
    /// Thumbnail URL
    pub thumbnail_url: Option<String>,
    /// Difficulty
    pub difficulty: String,
    /// Estimated reading time in minutes
    pub reading_time: Option<i32>,
    /// View count
    pub view_count: i32,
    /// Like count
    pub like_count: i32,
    /// Keyword tokens
    pub meta_keywords: Vec<String>,
    /// Published flag
    pub published: bool,
    /// Publish timestamp
    pub published_at: Option<String>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
    /// Post author
    pub author: Option<AuthorSummary>,
    /// Post category
    pub category: Option<CategorySummary>,
}

impl PostDetail {
    pub fn new(
        post: BlogPostModel,
        author: Option<UserModel>,
        category: Option<CategoryModel>,
        locale: Locale,
    ) -> Self {
        Self {
            id: post.id,
            slug: post.slug,
            title_ko: post.title_ko,
            title_en: post.title_en,
            title_ja: post.title_ja,
            excerpt_ko: post.excerpt_ko,
            excerpt_en: post.excerpt_en,
            excerpt_ja: post.excerpt_ja,
            content_ko: post.content_ko,
            content_en: post.content_en,
            content_ja: post.content_ja,
            thumbnail_url: post.thumbnail_url,
            difficulty: post.difficulty,
            reading_time: post.reading_time,
            view_count: post.view_count,
            like_count: post.like_count,
            meta_keywords: split_keywords(&post.meta_keywords),
            published: post.published,
            published_at: post.published_at.map(|t| t.to_string()),
            created_at: post.created_at.to_string(),
            updated_at: post.updated_at.to_string(),
            author: author.map(AuthorSummary::from),
            category: category.map(|c| CategorySummary::new(c, locale)),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PostListResponse {
    /// Page of posts
    pub posts: Vec<PostSummary>,
    /// Pagination envelope
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LikeResponse {
    /// Post slug
    pub slug: String,
    /// Like count after the increment
    pub like_count: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PostListQuery {
    /// Page number
    pub page: Option<u64>,
    /// Items per page (clamped to 1-100)
    pub limit: Option<u64>,
    /// Restrict to published posts (default true)
    pub published: Option<bool>,
    /// Response language (ko, en, ja)
    pub lang: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FeaturedQuery {
    /// Number of posts (default 3)
    pub limit: Option<u64>,
    /// Response language (ko, en, ja)
    pub lang: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/blog-posts",
    params(
        ("page" = Option<u64>, Query, description = "Page number"),
        ("limit" = Option<u64>, Query, description = "Items per page"),
        ("published" = Option<bool>, Query, description = "Restrict to published posts"),
        ("lang" = Option<String>, Query, description = "Response language"),
    ),
    responses(
        (status = 200, description = "Page of posts", body = PostListResponse),
    ),
    tag = "blog-posts"
)]
pub async fn list_posts(
    Extension(db): Extension<DatabaseConnection>,
    Query(query): Query<PostListQuery>,
) -> AppResult<impl IntoResponse> {
    let page_query = crate::response::PageQuery {
        page: query.page,
        limit: query.limit,
    };
    let (page, limit) = page_query.resolve();
    let published_only = query.published.unwrap_or(true);
    let locale = resolve_lang(query.lang.as_deref());

    let service = BlogPostService::new(db);
    let (posts, pagination) = service.list(page, limit, published_only).await?;

    let posts = posts
        .into_iter()
        .map(|(post, author, category)| PostSummary::new(post, author, category, locale))
        .collect();

    Ok(ApiResponse::ok(PostListResponse { posts, pagination }))
}

#[utoipa::path(
    get,
    path = "/api/blog-posts/featured",
    params(
        ("limit" = Option<u64>, Query, description = "Number of posts"),
        ("lang" = Option<String>, Query, description = "Response language"),
    ),
    responses(
        (status = 200, description = "Most viewed/liked published posts", body = Vec<PostSummary>),
    ),
    tag = "blog-posts"
)]
pub async fn get_featured(
    Extension(db): Extension<DatabaseConnection>,
    Query(query): Query<FeaturedQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = query.limit.unwrap_or(3);
    let locale = resolve_lang(query.lang.as_deref());

    let service = BlogPostService::new(db);
    let posts = service.get_featured(limit).await?;

    let posts: Vec<PostSummary> = posts
        .into_iter()
        .map(|(post, category)| PostSummary::new(post, None, category, locale))
        .collect();

    Ok(ApiResponse::ok(posts))
}

#[utoipa::path(
    get,
    path = "/api/blog-posts/{slug}",
    params(
        ("slug" = String, Path, description = "Post slug"),
        ("lang" = Option<String>, Query, description = "Response language"),
    ),
    responses(
        (status = 200, description = "Full post; the fetch counts as a view", body = PostDetail),
        (status = 404, description = "Post not found", body = AppError),
    ),
    tag = "blog-posts"
)]
pub async fn get_post(
    Extension(db): Extension<DatabaseConnection>,
    Path(slug): Path<String>,
    Query(query): Query<crate::locale::LocaleQuery>,
) -> AppResult<impl IntoResponse> {
    let locale = query.resolve();

    let service = BlogPostService::new(db);
    let (post, author, category) = service.get_by_slug(&slug).await?;

    Ok(ApiResponse::ok(PostDetail::new(
        post, author, category, locale,
    )))
}

#[utoipa::path(
    post,
    path = "/api/blog-posts",
    security(("jwt_token" = [])),
    request_body = CreateBlogPostRequest,
    responses(
        (status = 200, description = "Post created", body = PostDetail),
        (status = 400, description = "Validation error", body = AppError),
        (status = 403, description = "Editor or admin only", body = AppError),
    ),
    tag = "blog-posts"
)]
pub async fn create_post(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Json(payload): Json<CreateBlogPostRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let author_id = require_editor(&auth_user)?;

    let service = BlogPostService::new(db);
    let (post, author, category) = service
        .create(CreateBlogPostInput {
            slug: payload.slug,
            title_ko: payload.title_ko,
            title_en: payload.title_en,
            title_ja: payload.title_ja,
            excerpt_ko: payload.excerpt_ko,
            excerpt_en: payload.excerpt_en,
            excerpt_ja: payload.excerpt_ja,
            content_ko: payload.content_ko,
            content_en: payload.content_en,
            content_ja: payload.content_ja,
            thumbnail_url: payload.thumbnail_url,
            difficulty: payload.difficulty,
            reading_time: payload.reading_time,
            meta_keywords: payload.meta_keywords,
            published: payload.published.unwrap_or(false),
            author_id,
            category_id: payload.category_id,
        })
        .await?;

    Ok(ApiResponse::ok(PostDetail::new(
        post,
        author,
        category,
        Locale::default(),
    )))
}

#[utoipa::path(
    patch,
    path = "/api/blog-posts/{id}",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "Post ID")),
    request_body = UpdateBlogPostRequest,
    responses(
        (status = 200, description = "Post updated", body = PostDetail),
        (status = 400, description = "Validation error", body = AppError),
        (status = 403, description = "Editor or admin only", body = AppError),
        (status = 404, description = "Post not found", body = AppError),
    ),
    tag = "blog-posts"
)]
pub async fn update_post(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBlogPostRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    require_editor(&auth_user)?;

    let service = BlogPostService::new(db);
    let (post, author, category) = service
        .update(
            id,
            UpdateBlogPostInput {
                slug: payload.slug,
                title_ko: payload.title_ko,
                title_en: payload.title_en,
                title_ja: payload.title_ja,
                excerpt_ko: payload.excerpt_ko,
                excerpt_en: payload.excerpt_en,
                excerpt_ja: payload.excerpt_ja,
                content_ko: payload.content_ko,
                content_en: payload.content_en,
                content_ja: payload.content_ja,
                thumbnail_url: payload.thumbnail_url,
                difficulty: payload.difficulty,
                reading_time: payload.reading_time,
                meta_keywords: payload.meta_keywords,
                published: payload.published,
                category_id: payload.category_id,
            },
        )
        .await?;

    Ok(ApiResponse::ok(PostDetail::new(
        post,
        author,
        category,
        Locale::default(),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/blog-posts/{id}",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post deleted", body = String),
        (status = 403, description = "Editor or admin only", body = AppError),
        (status = 404, description = "Post not found", body = AppError),
    ),
    tag = "blog-posts"
)]
pub async fn delete_post(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    require_editor(&auth_user)?;

    let service = BlogPostService::new(db);
    service.remove(id).await?;

    Ok(ApiResponse::ok("Post deleted"))
}

#[utoipa::path(
    post,
    path = "/api/blog-posts/{slug}/like",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Like counted", body = LikeResponse),
        (status = 404, description = "Post not found", body = AppError),
    ),
    tag = "blog-posts"
)]
pub async fn like_post(
    Extension(db): Extension<DatabaseConnection>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let service = BlogPostService::new(db);
    let like_count = service.increment_like(&slug).await?;

    Ok(ApiResponse::ok(LikeResponse { slug, like_count }))
}

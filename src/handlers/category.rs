use crate::error::{AppError, AppResult};
use crate::handlers::blog_post::PostSummary;
use crate::locale::{resolve_lang, Locale, Localized};
use crate::middleware::auth::require_admin;
use crate::middleware::AuthUser;
use crate::models::CategoryModel;
use crate::response::{ApiResponse, Pagination};
use crate::services::cache::CacheService;
use crate::services::category::{CategoryService, CategoryWithCount, CreateCategoryInput};
use axum::{extract::Path, extract::Query, response::IntoResponse, Extension, Json};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    /// URL slug (1-100 characters)
    #[validate(length(min = 1, max = 100))]
    pub slug: String,
    /// Korean name
    #[validate(length(min = 1, max = 100))]
    pub name_ko: String,
    /// English name
    #[validate(length(min = 1, max = 100))]
    pub name_en: String,
    /// Japanese name
    #[validate(length(min = 1, max = 100))]
    pub name_ja: String,
    /// Korean description
    #[validate(length(max = 500))]
    pub description_ko: Option<String>,
    /// English description
    #[validate(length(max = 500))]
    pub description_en: Option<String>,
    /// Japanese description
    #[validate(length(max = 500))]
    pub description_ja: Option<String>,
    /// Icon glyph
    pub icon: Option<String>,
    /// Display color
    pub color: Option<String>,
    /// Display sort order
    pub sort_order: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    /// Category ID
    pub id: i32,
    /// URL slug
    pub slug: String,
    /// Korean name
    pub name_ko: String,
    /// English name
    pub name_en: String,
    /// Japanese name
    pub name_ja: String,
    /// Name resolved for the requested locale
    pub name: String,
    /// Description resolved for the requested locale
    pub description: Option<String>,
    /// Icon glyph
    pub icon: Option<String>,
    /// Display color
    pub color: Option<String>,
    /// Display sort order
    pub sort_order: i32,
    /// Number of published posts
    pub post_count: i64,
}

impl CategoryResponse {
    pub fn new(category: CategoryModel, post_count: i64, locale: Locale) -> Self {
        let name = Localized::new(
            category.name_ko.clone(),
            category.name_en.clone(),
            category.name_ja.clone(),
        )
        .into_get(locale);
        let description = Localized::new(
            category.description_ko,
            category.description_en,
            category.description_ja,
        )
        .into_get(locale);
        Self {
            id: category.id,
            slug: category.slug,
            name_ko: category.name_ko,
            name_en: category.name_en,
            name_ja: category.name_ja,
            name,
            description,
            icon: category.icon,
            color: category.color,
            sort_order: category.sort_order,
            post_count,
        }
    }

    fn from_with_count(entry: CategoryWithCount, locale: Locale) -> Self {
        Self::new(entry.category, entry.post_count, locale)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryPostsResponse {
    /// The category itself
    pub category: CategoryResponse,
    /// Page of the category's published posts
    pub posts: Vec<PostSummary>,
    /// Pagination envelope
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CategoryPostsQuery {
    /// Page number
    pub page: Option<u64>,
    /// Items per page (clamped to 1-100)
    pub limit: Option<u64>,
    /// Response language (ko, en, ja)
    pub lang: Option<String>,
}

fn make_category_service(db: DatabaseConnection, cache: Option<CacheService>) -> CategoryService {
    let service = CategoryService::new(db);
    match cache {
        Some(c) => service.with_cache(c),
        None => service,
    }
}

#[utoipa::path(
    get,
    path = "/api/categories",
    params(("lang" = Option<String>, Query, description = "Response language")),
    responses(
        (status = 200, description = "All categories with published-post counts", body = Vec<CategoryResponse>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    Extension(db): Extension<DatabaseConnection>,
    cache: Option<Extension<CacheService>>,
    Query(query): Query<crate::locale::LocaleQuery>,
) -> AppResult<impl IntoResponse> {
    let locale = query.resolve();
    let service = make_category_service(db, cache.map(|c| c.0));
    let categories = service.list().await?;

    let response: Vec<CategoryResponse> = categories
        .into_iter()
        .map(|entry| CategoryResponse::from_with_count(entry, locale))
        .collect();

    Ok(ApiResponse::ok(response))
}

#[utoipa::path(
    get,
    path = "/api/categories/{slug}",
    params(
        ("slug" = String, Path, description = "Category slug"),
        ("lang" = Option<String>, Query, description = "Response language"),
    ),
    responses(
        (status = 200, description = "Category details", body = CategoryResponse),
        (status = 404, description = "Category not found", body = AppError),
    ),
    tag = "categories"
)]
pub async fn get_category(
    Extension(db): Extension<DatabaseConnection>,
    Path(slug): Path<String>,
    Query(query): Query<crate::locale::LocaleQuery>,
) -> AppResult<impl IntoResponse> {
    let locale = query.resolve();
    let service = CategoryService::new(db);
    let entry = service.get_by_slug(&slug).await?;

    Ok(ApiResponse::ok(CategoryResponse::from_with_count(
        entry, locale,
    )))
}

#[utoipa::path(
    get,
    path = "/api/categories/{slug}/posts",
    params(
        ("slug" = String, Path, description = "Category slug"),
        ("page" = Option<u64>, Query, description = "Page number"),
        ("limit" = Option<u64>, Query, description = "Items per page"),
        ("lang" = Option<String>, Query, description = "Response language"),
    ),
    responses(
        (status = 200, description = "Category with a page of its published posts", body = CategoryPostsResponse),
        (status = 404, description = "Category not found", body = AppError),
    ),
    tag = "categories"
)]
pub async fn get_category_posts(
    Extension(db): Extension<DatabaseConnection>,
    Path(slug): Path<String>,
    Query(query): Query<CategoryPostsQuery>,
) -> AppResult<impl IntoResponse> {
    let page_query = crate::response::PageQuery {
        page: query.page,
        limit: query.limit,
    };
    let (page, limit) = page_query.resolve();
    let locale = resolve_lang(query.lang.as_deref());

    let service = CategoryService::new(db);
    let (category, posts, pagination) = service.get_with_posts(&slug, page, limit).await?;

    let total = pagination.total as i64;
    let posts: Vec<PostSummary> = posts
        .into_iter()
        .map(|(post, author)| PostSummary::new(post, author, Some(category.clone()), locale))
        .collect();

    Ok(ApiResponse::ok(CategoryPostsResponse {
        category: CategoryResponse::new(category, total, locale),
        posts,
        pagination,
    }))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    security(("jwt_token" = [])),
    request_body = CreateCategoryRequest,
    responses(
        (status = 200, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 403, description = "Admin only", body = AppError),
    ),
    tag = "categories"
)]
pub async fn create_category(
    Extension(db): Extension<DatabaseConnection>,
    cache: Option<Extension<CacheService>>,
    auth_user: AuthUser,
    Json(payload): Json<CreateCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    require_admin(&auth_user)?;

    let service = make_category_service(db, cache.map(|c| c.0));
    let category = service
        .create(CreateCategoryInput {
            slug: payload.slug,
            name_ko: payload.name_ko,
            name_en: payload.name_en,
            name_ja: payload.name_ja,
            description_ko: payload.description_ko,
            description_en: payload.description_en,
            description_ja: payload.description_ja,
            icon: payload.icon,
            color: payload.color,
            sort_order: payload.sort_order.unwrap_or(0),
        })
        .await?;

    Ok(ApiResponse::ok(CategoryResponse::new(
        category,
        0,
        Locale::default(),
    )))
}

#[utoipa::path(
    put,
    path = "/api/categories/{slug}",
    security(("jwt_token" = [])),
    params(("slug" = String, Path, description = "Category slug")),
    request_body = CreateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 403, description = "Admin only", body = AppError),
        (status = 404, description = "Category not found", body = AppError),
    ),
    tag = "categories"
)]
pub async fn update_category(
    Extension(db): Extension<DatabaseConnection>,
    cache: Option<Extension<CacheService>>,
    auth_user: AuthUser,
    Path(slug): Path<String>,
    Json(payload): Json<CreateCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    require_admin(&auth_user)?;

    let service = make_category_service(db, cache.map(|c| c.0));
    let category = service
        .update(
            &slug,
            CreateCategoryInput {
                slug: payload.slug,
                name_ko: payload.name_ko,
                name_en: payload.name_en,
                name_ja: payload.name_ja,
                description_ko: payload.description_ko,
                description_en: payload.description_en,
                description_ja: payload.description_ja,
                icon: payload.icon,
                color: payload.color,
                sort_order: payload.sort_order.unwrap_or(0),
            },
        )
        .await?;

    let entry = service.get_by_slug(&category.slug).await?;
    Ok(ApiResponse::ok(CategoryResponse::from_with_count(
        entry,
        Locale::default(),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{slug}",
    security(("jwt_token" = [])),
    params(("slug" = String, Path, description = "Category slug")),
    responses(
        (status = 200, description = "Category deleted", body = String),
        (status = 403, description = "Admin only", body = AppError),
        (status = 404, description = "Category not found", body = AppError),
        (status = 409, description = "Category still has posts", body = AppError),
    ),
    tag = "categories"
)]
pub async fn delete_category(
    Extension(db): Extension<DatabaseConnection>,
    cache: Option<Extension<CacheService>>,
    auth_user: AuthUser,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    require_admin(&auth_user)?;

    let service = make_category_service(db, cache.map(|c| c.0));
    service.delete(&slug).await?;

    Ok(ApiResponse::ok("Category deleted"))
}

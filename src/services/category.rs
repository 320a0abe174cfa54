use crate::{
    error::{AppError, AppResult},
    models::{blog_post, category, user, BlogPost, BlogPostModel, Category, CategoryModel, User,
        UserModel},
    response::Pagination,
    services::cache::CacheService,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Statement,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const CACHE_KEY_CATEGORIES_LIST: &str = "categories:list";
const CACHE_TTL_CATEGORIES: u64 = 300; // 5 minutes

/// A category annotated with its published-post count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryWithCount {
    pub category: CategoryModel,
    pub post_count: i64,
}

pub struct CreateCategoryInput {
    pub slug: String,
    pub name_ko: String,
    pub name_en: String,
    pub name_ja: String,
    pub description_ko: Option<String>,
    pub description_en: Option<String>,
    pub description_ja: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub sort_order: i32,
}

pub struct CategoryService {
    db: DatabaseConnection,
    cache: Option<CacheService>,
}

impl CategoryService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db, cache: None }
    }

    pub fn with_cache(mut self, cache: CacheService) -> Self {
        self.cache = Some(cache);
        self
    }

    /// All categories ordered by sort order, each with its published-post
    /// count. Read-heavy, so the result is served from cache when one is
    /// configured.
    pub async fn list(&self) -> AppResult<Vec<CategoryWithCount>> {
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache
                .get::<Vec<CategoryWithCount>>(CACHE_KEY_CATEGORIES_LIST)
                .await
            {
                return Ok(cached);
            }
        }

        let categories = Category::find()
            .order_by_asc(category::Column::SortOrder)
            .all(&self.db)
            .await?;

        let counts = self.published_counts().await?;
        let result: Vec<CategoryWithCount> = categories
            .into_iter()
            .map(|category| {
                let post_count = counts.get(&category.id).copied().unwrap_or(0);
                CategoryWithCount {
                    category,
                    post_count,
                }
            })
            .collect();

        if let Some(cache) = &self.cache {
            cache
                .set(CACHE_KEY_CATEGORIES_LIST, &result, CACHE_TTL_CATEGORIES)
                .await;
        }

        Ok(result)
    }

    pub async fn get_by_slug(&self, slug: &str) -> AppResult<CategoryWithCount> {
        let category = self.find_by_slug(slug).await?;
        let post_count = self.published_count_for(category.id).await?;
        Ok(CategoryWithCount {
            category,
            post_count,
        })
    }

    /// A category plus a page of its published posts (newest first) with
    /// the posts' authors, and a pagination envelope over the category's
    /// published-post total.
    pub async fn get_with_posts(
        &self,
        slug: &str,
        page: u64,
        limit: u64,
    ) -> AppResult<(
        CategoryModel,
        Vec<(BlogPostModel, Option<UserModel>)>,
        Pagination,
    )> {
        let category = self.find_by_slug(slug).await?;

        let paginator = BlogPost::find()
            .filter(blog_post::Column::CategoryId.eq(category.id))
            .filter(blog_post::Column::Published.eq(true))
            .order_by_desc(blog_post::Column::PublishedAt)
            .paginate(&self.db, limit);

        let total = paginator.num_items().await?;
        let posts = paginator.fetch_page(page.saturating_sub(1)).await?;
        let posts = self.attach_authors(posts).await?;

        Ok((category, posts, Pagination::new(page, limit, total)))
    }

    pub async fn create(&self, input: CreateCategoryInput) -> AppResult<CategoryModel> {
        let now = chrono::Utc::now().naive_utc();

        let new_category = category::ActiveModel {
            slug: sea_orm::ActiveValue::Set(input.slug),
            name_ko: sea_orm::ActiveValue::Set(input.name_ko),
            name_en: sea_orm::ActiveValue::Set(input.name_en),
            name_ja: sea_orm::ActiveValue::Set(input.name_ja),
            description_ko: sea_orm::ActiveValue::Set(input.description_ko),
            description_en: sea_orm::ActiveValue::Set(input.description_en),
            description_ja: sea_orm::ActiveValue::Set(input.description_ja),
            icon: sea_orm::ActiveValue::Set(input.icon),
            color: sea_orm::ActiveValue::Set(input.color),
            sort_order: sea_orm::ActiveValue::Set(input.sort_order),
            created_at: sea_orm::ActiveValue::Set(now),
            updated_at: sea_orm::ActiveValue::Set(now),
            ..Default::default()
        };

        let category = new_category.insert(&self.db).await?;
        self.invalidate_list_cache().await;
        Ok(category)
    }

    pub async fn update(&self, slug: &str, input: CreateCategoryInput) -> AppResult<CategoryModel> {
        let existing = self.find_by_slug(slug).await?;
        let now = chrono::Utc::now().naive_utc();

        let mut active: category::ActiveModel = existing.into();
        active.slug = sea_orm::ActiveValue::Set(input.slug);
        active.name_ko = sea_orm::ActiveValue::Set(input.name_ko);
        active.name_en = sea_orm::ActiveValue::Set(input.name_en);
        active.name_ja = sea_orm::ActiveValue::Set(input.name_ja);
        active.description_ko = sea_orm::ActiveValue::Set(input.description_ko);
        active.description_en = sea_orm::ActiveValue::Set(input.description_en);
        active.description_ja = sea_orm::ActiveValue::Set(input.description_ja);
        active.icon = sea_orm::ActiveValue::Set(input.icon);
        active.color = sea_orm::ActiveValue::Set(input.color);
        active.sort_order = sea_orm::ActiveValue::Set(input.sort_order);
        active.updated_at = sea_orm::ActiveValue::Set(now);

        let updated = active.update(&self.db).await?;
        self.invalidate_list_cache().await;
        Ok(updated)
    }

    /// Delete a category. Fails with Conflict while posts still reference
    /// it, matching the RESTRICT foreign key.
    pub async fn delete(&self, slug: &str) -> AppResult<()> {
        let existing = self.find_by_slug(slug).await?;

        let referencing = BlogPost::find()
            .filter(blog_post::Column::CategoryId.eq(existing.id))
            .count(&self.db)
            .await?;
        if referencing > 0 {
            return Err(AppError::Conflict(
                "Category still has posts".to_string(),
            ));
        }

        Category::delete_by_id(existing.id).exec(&self.db).await?;
        self.invalidate_list_cache().await;
        Ok(())
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<CategoryModel> {
        Category::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Published-post counts for all categories in one grouped query.
    async fn published_counts(&self) -> AppResult<HashMap<i32, i64>> {
        let rows = self
            .db
            .query_all(Statement::from_string(
                sea_orm::DatabaseBackend::Postgres,
                "SELECT category_id, COUNT(*) AS post_count FROM blog_posts \
                 WHERE published = TRUE GROUP BY category_id"
                    .to_string(),
            ))
            .await?;

        let mut counts = HashMap::with_capacity(rows.len());
        for row in rows {
            let category_id: i32 = row.try_get("", "category_id")?;
            let post_count: i64 = row.try_get("", "post_count")?;
            counts.insert(category_id, post_count);
        }
        Ok(counts)
    }

    async fn published_count_for(&self, category_id: i32) -> AppResult<i64> {
        let count = BlogPost::find()
            .filter(blog_post::Column::CategoryId.eq(category_id))
            .filter(blog_post::Column::Published.eq(true))
            .count(&self.db)
            .await?;
        Ok(count as i64)
    }

    async fn attach_authors(
        &self,
        posts: Vec<BlogPostModel>,
    ) -> AppResult<Vec<(BlogPostModel, Option<UserModel>)>> {
        let author_ids: Vec<i32> = posts.iter().map(|p| p.author_id).collect();
        let authors: HashMap<i32, UserModel> = User::find()
            .filter(user::Column::Id.is_in(author_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(posts
            .into_iter()
            .map(|post| {
                let author = authors.get(&post.author_id).cloned();
                (post, author)
            })
            .collect())
    }

    async fn invalidate_list_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate(CACHE_KEY_CATEGORIES_LIST).await;
        }
    }
}

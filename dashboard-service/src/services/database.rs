//! PostgreSQL data-access layer.
//!
//! One method per (resource, operation) pair. Every tenant-scoped method
//! takes the website id and applies it as an equality filter on reads and
//! writes - defense in depth on top of the route-level access guard.
//! Errors are propagated verbatim; nothing here retries or caches.

use service_core::error::AppError;
use sqlx::postgres::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::{
    Category, Content, ContentUpdate, DashboardStats, Product, ProductUpdate, Profile, User,
    Website, WebsiteAccess, WebsiteUser, WebsiteWithOwner,
};

/// Client-style filters for the Content page list.
#[derive(Debug, Default)]
pub struct ContentFilter {
    pub search: Option<String>,
    pub status: Option<String>,
    pub category_id: Option<Uuid>,
}

/// Filters for the Products page list.
#[derive(Debug, Default)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub status: Option<String>,
}

/// Filters for the Users page list.
#[derive(Debug, Default)]
pub struct UserFilter {
    pub search: Option<String>,
    pub role: Option<String>,
}

/// PostgreSQL database wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Health check - ping the database.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // ==================== Auth User Operations ====================

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user =
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(user)
    }

    pub async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO users (user_id, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.user_id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // ==================== Profile Operations ====================

    pub async fn insert_profile(&self, profile: &Profile) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (id, user_id, name, email, role, selected_website_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(profile.id)
        .bind(profile.user_id)
        .bind(&profile.name)
        .bind(&profile.email)
        .bind(&profile.role)
        .bind(profile.selected_website_id)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn find_profile_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(profile)
    }

    pub async fn find_profiles_by_user_ids(
        &self,
        user_ids: &[Uuid],
    ) -> Result<Vec<Profile>, AppError> {
        let profiles =
            sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = ANY($1)")
                .bind(user_ids)
                .fetch_all(&self.pool)
                .await?;
        Ok(profiles)
    }

    /// Persist the caller's selected website (or clear it with `None`).
    pub async fn update_selected_website(
        &self,
        user_id: Uuid,
        website_id: Option<Uuid>,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE profiles SET selected_website_id = $1, updated_at = now() WHERE user_id = $2",
        )
        .bind(website_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // ==================== Website Operations ====================

    /// Websites visible to a user, newest first. Superadmins see all;
    /// everyone else sees websites they own or hold an access grant on.
    pub async fn list_websites_for_user(
        &self,
        user_id: Uuid,
        is_superadmin: bool,
    ) -> Result<Vec<Website>, AppError> {
        let websites = sqlx::query_as::<_, Website>(
            r#"
            SELECT w.* FROM websites w
            WHERE $2
               OR w.owner_id = $1
               OR EXISTS (
                   SELECT 1 FROM website_access a
                   WHERE a.website_id = w.id AND a.user_id = $1
               )
            ORDER BY w.created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(is_superadmin)
        .fetch_all(&self.pool)
        .await?;
        Ok(websites)
    }

    pub async fn find_website_by_id(&self, website_id: Uuid) -> Result<Option<Website>, AppError> {
        let website = sqlx::query_as::<_, Website>("SELECT * FROM websites WHERE id = $1")
            .bind(website_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(website)
    }

    /// Insert a website and the creator's admin grant in one transaction.
    pub async fn insert_website_with_owner(
        &self,
        website: &Website,
        grant: &WebsiteAccess,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO websites (id, name, domain, theme, owner_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(website.id)
        .bind(&website.name)
        .bind(&website.domain)
        .bind(&website.theme)
        .bind(website.owner_id)
        .bind(website.created_at)
        .bind(website.updated_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO website_access (id, user_id, website_id, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(grant.id)
        .bind(grant.user_id)
        .bind(grant.website_id)
        .bind(&grant.role)
        .bind(grant.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn update_website(
        &self,
        website_id: Uuid,
        name: Option<&str>,
        domain: Option<&str>,
        theme: Option<&str>,
    ) -> Result<Option<Website>, AppError> {
        let website = sqlx::query_as::<_, Website>(
            r#"
            UPDATE websites SET
                name = COALESCE($2, name),
                domain = COALESCE($3, domain),
                theme = COALESCE($4, theme),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(website_id)
        .bind(name)
        .bind(domain)
        .bind(theme)
        .fetch_optional(&self.pool)
        .await?;
        Ok(website)
    }

    /// Delete a website. Child rows cascade at the schema level.
    pub async fn delete_website(&self, website_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM websites WHERE id = $1")
            .bind(website_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// "Does user have access to website X" - the authorization primitive
    /// every tenant-scoped route is guarded by.
    pub async fn user_can_access_website(
        &self,
        user_id: Uuid,
        website_id: Uuid,
        is_superadmin: bool,
    ) -> Result<bool, AppError> {
        let allowed: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM websites w
                WHERE w.id = $2
                  AND ($3
                       OR w.owner_id = $1
                       OR EXISTS (
                           SELECT 1 FROM website_access a
                           WHERE a.website_id = w.id AND a.user_id = $1
                       ))
            )
            "#,
        )
        .bind(user_id)
        .bind(website_id)
        .bind(is_superadmin)
        .fetch_one(&self.pool)
        .await?;
        Ok(allowed)
    }

    /// Every website with its owner's profile, for the superadmin panel.
    pub async fn list_websites_with_owners(&self) -> Result<Vec<WebsiteWithOwner>, AppError> {
        let websites = sqlx::query_as::<_, WebsiteWithOwner>(
            r#"
            SELECT w.id, w.name, w.domain, w.theme, w.owner_id, w.created_at, w.updated_at,
                   p.name AS owner_name, p.email AS owner_email
            FROM websites w
            LEFT JOIN profiles p ON p.user_id = w.owner_id
            ORDER BY w.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(websites)
    }

    // ==================== Access Grant Operations ====================

    pub async fn find_access(
        &self,
        user_id: Uuid,
        website_id: Uuid,
    ) -> Result<Option<WebsiteAccess>, AppError> {
        let grant = sqlx::query_as::<_, WebsiteAccess>(
            "SELECT * FROM website_access WHERE user_id = $1 AND website_id = $2",
        )
        .bind(user_id)
        .bind(website_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(grant)
    }

    pub async fn list_access_for_website(
        &self,
        website_id: Uuid,
    ) -> Result<Vec<WebsiteAccess>, AppError> {
        let grants = sqlx::query_as::<_, WebsiteAccess>(
            "SELECT * FROM website_access WHERE website_id = $1 ORDER BY created_at DESC",
        )
        .bind(website_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(grants)
    }

    pub async fn insert_access(&self, grant: &WebsiteAccess) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO website_access (id, user_id, website_id, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(grant.id)
        .bind(grant.user_id)
        .bind(grant.website_id)
        .bind(&grant.role)
        .bind(grant.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Revoke a user's grant on a website.
    pub async fn delete_access(&self, website_id: Uuid, user_id: Uuid) -> Result<u64, AppError> {
        let result =
            sqlx::query("DELETE FROM website_access WHERE website_id = $1 AND user_id = $2")
                .bind(website_id)
                .bind(user_id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected())
    }

    /// The Users page join: grants for the website, then profiles for the
    /// user-id set, merged by user id. A grant with no profile is kept with
    /// placeholder fields.
    pub async fn list_website_users(
        &self,
        website_id: Uuid,
        filter: &UserFilter,
    ) -> Result<Vec<WebsiteUser>, AppError> {
        let grants = self.list_access_for_website(website_id).await?;
        let user_ids: Vec<Uuid> = grants.iter().map(|g| g.user_id).collect();

        let profiles = if user_ids.is_empty() {
            Vec::new()
        } else {
            self.find_profiles_by_user_ids(&user_ids).await?
        };
        let by_user: HashMap<Uuid, Profile> =
            profiles.into_iter().map(|p| (p.user_id, p)).collect();

        let users = grants
            .into_iter()
            .map(|grant| {
                let profile = by_user.get(&grant.user_id);
                WebsiteUser::from_grant(grant, profile)
            })
            .filter(|user| {
                let search_ok = filter.search.as_deref().map_or(true, |needle| {
                    let needle = needle.to_lowercase();
                    user.name.to_lowercase().contains(&needle)
                        || user.email.to_lowercase().contains(&needle)
                });
                let role_ok = filter
                    .role
                    .as_deref()
                    .map_or(true, |role| user.role == role);
                search_ok && role_ok
            })
            .collect();

        Ok(users)
    }

    // ==================== Category Operations ====================

    pub async fn list_categories(
        &self,
        website_id: Uuid,
        search: Option<&str>,
    ) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT * FROM categories
            WHERE website_id = $1
              AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')
            ORDER BY created_at DESC
            "#,
        )
        .bind(website_id)
        .bind(search)
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    pub async fn insert_category(&self, category: &Category) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO categories (id, website_id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(category.id)
        .bind(category.website_id)
        .bind(&category.name)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn update_category(
        &self,
        website_id: Uuid,
        category_id: Uuid,
        name: &str,
    ) -> Result<Option<Category>, AppError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories SET name = $3, updated_at = now()
            WHERE website_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(website_id)
        .bind(category_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    pub async fn delete_category(
        &self,
        website_id: Uuid,
        category_id: Uuid,
    ) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE website_id = $1 AND id = $2")
            .bind(website_id)
            .bind(category_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    // ==================== Content Operations ====================

    pub async fn list_content(
        &self,
        website_id: Uuid,
        filter: &ContentFilter,
    ) -> Result<Vec<Content>, AppError> {
        let content = sqlx::query_as::<_, Content>(
            r#"
            SELECT * FROM content
            WHERE website_id = $1
              AND ($2::text IS NULL
                   OR title ILIKE '%' || $2 || '%'
                   OR body ILIKE '%' || $2 || '%')
              AND ($3::text IS NULL OR status = $3)
              AND ($4::uuid IS NULL OR category_id = $4)
            ORDER BY created_at DESC
            "#,
        )
        .bind(website_id)
        .bind(filter.search.as_deref())
        .bind(filter.status.as_deref())
        .bind(filter.category_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(content)
    }

    pub async fn find_content(
        &self,
        website_id: Uuid,
        content_id: Uuid,
    ) -> Result<Option<Content>, AppError> {
        let content = sqlx::query_as::<_, Content>(
            "SELECT * FROM content WHERE website_id = $1 AND id = $2",
        )
        .bind(website_id)
        .bind(content_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(content)
    }

    pub async fn insert_content(&self, content: &Content) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO content (id, website_id, title, body, content_type, status,
                                 category_id, author_id, published_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(content.id)
        .bind(content.website_id)
        .bind(&content.title)
        .bind(&content.body)
        .bind(&content.content_type)
        .bind(&content.status)
        .bind(content.category_id)
        .bind(content.author_id)
        .bind(content.published_at)
        .bind(content.created_at)
        .bind(content.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Apply a partial update. The published_at derivation happens in
    /// [`Content::apply`]; last write wins, there is no version check.
    pub async fn update_content(
        &self,
        website_id: Uuid,
        content_id: Uuid,
        update: ContentUpdate,
    ) -> Result<Option<Content>, AppError> {
        let Some(existing) = self.find_content(website_id, content_id).await? else {
            return Ok(None);
        };
        let updated = existing.apply(update);

        sqlx::query(
            r#"
            UPDATE content SET
                title = $3, body = $4, content_type = $5, status = $6,
                category_id = $7, published_at = $8, updated_at = $9
            WHERE website_id = $1 AND id = $2
            "#,
        )
        .bind(website_id)
        .bind(content_id)
        .bind(&updated.title)
        .bind(&updated.body)
        .bind(&updated.content_type)
        .bind(&updated.status)
        .bind(updated.category_id)
        .bind(updated.published_at)
        .bind(updated.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(Some(updated))
    }

    pub async fn delete_content(
        &self,
        website_id: Uuid,
        content_id: Uuid,
    ) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM content WHERE website_id = $1 AND id = $2")
            .bind(website_id)
            .bind(content_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    // ==================== Product Operations ====================

    pub async fn list_products(
        &self,
        website_id: Uuid,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE website_id = $1
              AND ($2::text IS NULL
                   OR name ILIKE '%' || $2 || '%'
                   OR sku ILIKE '%' || $2 || '%')
              AND ($3::text IS NULL OR status = $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(website_id)
        .bind(filter.search.as_deref())
        .bind(filter.status.as_deref())
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn find_product(
        &self,
        website_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE website_id = $1 AND id = $2",
        )
        .bind(website_id)
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    pub async fn insert_product(&self, product: &Product) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, website_id, name, description, price, sku, category_id,
                                  stock_quantity, status, images, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(product.id)
        .bind(product.website_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.sku)
        .bind(product.category_id)
        .bind(product.stock_quantity)
        .bind(&product.status)
        .bind(&product.images)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn update_product(
        &self,
        website_id: Uuid,
        product_id: Uuid,
        update: ProductUpdate,
    ) -> Result<Option<Product>, AppError> {
        let Some(existing) = self.find_product(website_id, product_id).await? else {
            return Ok(None);
        };
        let updated = existing.apply(update);

        sqlx::query(
            r#"
            UPDATE products SET
                name = $3, description = $4, price = $5, sku = $6, category_id = $7,
                stock_quantity = $8, status = $9, images = $10, updated_at = $11
            WHERE website_id = $1 AND id = $2
            "#,
        )
        .bind(website_id)
        .bind(product_id)
        .bind(&updated.name)
        .bind(&updated.description)
        .bind(updated.price)
        .bind(&updated.sku)
        .bind(updated.category_id)
        .bind(updated.stock_quantity)
        .bind(&updated.status)
        .bind(&updated.images)
        .bind(updated.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(Some(updated))
    }

    pub async fn delete_product(
        &self,
        website_id: Uuid,
        product_id: Uuid,
    ) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE website_id = $1 AND id = $2")
            .bind(website_id)
            .bind(product_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    // ==================== Dashboard Stats ====================

    async fn count_scoped(&self, query: &str, website_id: Uuid) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(query)
            .bind(website_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Four independent counts, issued concurrently. A failure in any one
    /// query fails the whole aggregate.
    pub async fn get_dashboard_stats(&self, website_id: Uuid) -> Result<DashboardStats, AppError> {
        let (user_count, content_count, category_count, product_count) = tokio::try_join!(
            self.count_scoped(
                "SELECT COUNT(*) FROM website_access WHERE website_id = $1",
                website_id
            ),
            self.count_scoped(
                "SELECT COUNT(*) FROM content WHERE website_id = $1",
                website_id
            ),
            self.count_scoped(
                "SELECT COUNT(*) FROM categories WHERE website_id = $1",
                website_id
            ),
            self.count_scoped(
                "SELECT COUNT(*) FROM products WHERE website_id = $1",
                website_id
            ),
        )?;

        Ok(DashboardStats {
            user_count,
            content_count,
            category_count,
            product_count,
        })
    }
}

//! PostgreSQL-backed document store.
//!
//! Each collection is a table with typed columns for the fields the service
//! filters and sorts on and a `fields` JSONB column for everything else.

use async_trait::async_trait;
use sqlx::{PgConnection, Postgres, QueryBuilder, types::Json};
use uuid::Uuid;

use super::Store;
use crate::db::DbPool;
use crate::error::AppError;
use crate::models::{
    blog::{Blog, BlogFilter, BlogPatch, BlogQuery, BlogRecord, NewBlog},
    comment::{Comment, CommentRecord, NewComment},
    result::{DeleteResult, InsertResult, UpdateResult},
    wishlist::{NewWishlistEntry, WishlistEntry, WishlistRecord},
};

const BLOG_COLUMNS: &str = "id, title, category, created_at, fields";

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_blogs(&self, query: &BlogQuery) -> Result<Vec<Blog>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT {BLOG_COLUMNS} FROM blogs"));

        if let BlogFilter::Category(category) = &query.filter {
            builder.push(" WHERE category = ").push_bind(category.clone());
        }

        if query.newest_first {
            builder.push(" ORDER BY created_at DESC");
        } else {
            // Store order: the order documents were inserted in
            builder.push(" ORDER BY inserted_at");
        }

        if let Some(limit) = query.limit {
            builder.push(" LIMIT ").push_bind(limit as i64);
        }

        let records = builder
            .build_query_as::<BlogRecord>()
            .fetch_all(&self.pool)
            .await?;

        Ok(records.into_iter().map(Blog::from).collect())
    }

    async fn find_blog(&self, id: Uuid) -> Result<Option<Blog>, AppError> {
        let record = sqlx::query_as::<_, BlogRecord>(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Blog::from))
    }

    async fn insert_blog(&self, blog: NewBlog) -> Result<InsertResult, AppError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO blogs (id, title, category, created_at, fields)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(&blog.title)
        .bind(&blog.category)
        .bind(blog.created_at)
        .bind(Json(&blog.fields))
        .execute(&self.pool)
        .await?;

        Ok(InsertResult::new(id))
    }

    async fn upsert_blog(&self, id: Uuid, patch: BlogPatch) -> Result<UpdateResult, AppError> {
        // Start db transaction so the read-merge-write is atomic per document
        let mut tx = self.pool.begin().await?;

        let result = match lock_blog(&mut *tx, id).await? {
            Some(record) => merge_blog(&mut *tx, record, patch).await?,
            None => {
                let blog = patch.clone().into_new_blog()?;

                let inserted = sqlx::query(
                    r#"
                    INSERT INTO blogs (id, title, category, created_at, fields)
                    VALUES ($1, $2, $3, $4, $5)
                    ON CONFLICT (id) DO NOTHING
                    "#,
                )
                .bind(id)
                .bind(&blog.title)
                .bind(&blog.category)
                .bind(blog.created_at)
                .bind(Json(&blog.fields))
                .execute(&mut *tx)
                .await?
                .rows_affected();

                if inserted == 1 {
                    UpdateResult::upserted(id)
                } else {
                    // A concurrent upsert created the post first: merge into it
                    let record = lock_blog(&mut *tx, id)
                        .await?
                        .ok_or(AppError::NotFound("blog"))?;
                    merge_blog(&mut *tx, record, patch).await?
                }
            }
        };

        // Commit all changes atomically
        tx.commit().await?;

        Ok(result)
    }

    async fn find_comments(&self, blog_id: &str) -> Result<Vec<Comment>, AppError> {
        let records = sqlx::query_as::<_, CommentRecord>(
            r#"
            SELECT id, blog_id, comment, fields
            FROM comments
            WHERE blog_id = $1
            ORDER BY inserted_at
            "#,
        )
        .bind(blog_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Comment::from).collect())
    }

    async fn insert_comment(&self, comment: NewComment) -> Result<InsertResult, AppError> {
        let id = Uuid::new_v4();

        sqlx::query("INSERT INTO comments (id, blog_id, comment, fields) VALUES ($1, $2, $3, $4)")
            .bind(id)
            .bind(&comment.blog_id)
            .bind(&comment.comment)
            .bind(Json(&comment.fields))
            .execute(&self.pool)
            .await?;

        Ok(InsertResult::new(id))
    }

    async fn find_wishlist(&self, email: &str) -> Result<Vec<WishlistEntry>, AppError> {
        let records = sqlx::query_as::<_, WishlistRecord>(
            r#"
            SELECT id, email, blog_id, fields
            FROM wishlist
            WHERE email = $1
            ORDER BY inserted_at
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(WishlistEntry::from).collect())
    }

    async fn insert_wishlist_entry(
        &self,
        entry: NewWishlistEntry,
    ) -> Result<InsertResult, AppError> {
        let id = Uuid::new_v4();

        sqlx::query("INSERT INTO wishlist (id, email, blog_id, fields) VALUES ($1, $2, $3, $4)")
            .bind(id)
            .bind(&entry.email)
            .bind(&entry.blog_id)
            .bind(Json(&entry.fields))
            .execute(&self.pool)
            .await?;

        Ok(InsertResult::new(id))
    }

    async fn delete_wishlist_entry(&self, id: Uuid) -> Result<DeleteResult, AppError> {
        let deleted = sqlx::query("DELETE FROM wishlist WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(DeleteResult::new(deleted))
    }
}

/// Fetch a blog row and lock it until the transaction ends.
async fn lock_blog(conn: &mut PgConnection, id: Uuid) -> Result<Option<BlogRecord>, AppError> {
    let record = sqlx::query_as::<_, BlogRecord>(&format!(
        "SELECT {BLOG_COLUMNS} FROM blogs WHERE id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(record)
}

/// Apply `patch` to a locked row, writing it back only when something changed.
async fn merge_blog(
    conn: &mut PgConnection,
    record: BlogRecord,
    patch: BlogPatch,
) -> Result<UpdateResult, AppError> {
    let mut blog = Blog::from(record);
    let modified = blog.apply(patch);

    if modified {
        sqlx::query(
            r#"
            UPDATE blogs
            SET title = $2,
                category = $3,
                created_at = $4,
                fields = $5
            WHERE id = $1
            "#,
        )
        .bind(blog.id)
        .bind(&blog.data.title)
        .bind(&blog.data.category)
        .bind(blog.data.created_at)
        .bind(Json(&blog.data.fields))
        .execute(conn)
        .await?;
    }

    Ok(UpdateResult::matched(modified))
}

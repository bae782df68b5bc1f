use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Banner;

pub async fn list_all(pool: &PgPool) -> Result<Vec<Banner>, sqlx::Error> {
    sqlx::query_as::<_, Banner>("SELECT * FROM banners ORDER BY position ASC, created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn list_active(pool: &PgPool) -> Result<Vec<Banner>, sqlx::Error> {
    sqlx::query_as::<_, Banner>(
        "SELECT * FROM banners WHERE active = true ORDER BY position ASC, created_at DESC",
    )
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Banner>, sqlx::Error> {
    sqlx::query_as::<_, Banner>("SELECT * FROM banners WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    title: &str,
    image_url: &str,
    link_url: Option<&str>,
    position: i32,
    active: bool,
) -> Result<Banner, sqlx::Error> {
    sqlx::query_as::<_, Banner>(
        "INSERT INTO banners (title, image_url, link_url, position, active)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(title)
    .bind(image_url)
    .bind(link_url)
    .bind(position)
    .bind(active)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    title: &str,
    image_url: &str,
    link_url: Option<&str>,
    position: i32,
    active: bool,
) -> Result<Option<Banner>, sqlx::Error> {
    sqlx::query_as::<_, Banner>(
        "UPDATE banners SET title = $2, image_url = $3, link_url = $4, position = $5, active = $6
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(title)
    .bind(image_url)
    .bind(link_url)
    .bind(position)
    .bind(active)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM banners WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

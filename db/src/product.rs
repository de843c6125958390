use common::error::{AppError, Res};
use sqlx::{Executor, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    dtos::product::{PriceSort, ProductCreateRequest, ProductFilter, ProductUpdate},
    models::product::Product,
};

pub async fn get_products_by_filter<'e, E>(executor: E, filter: ProductFilter) -> Res<Vec<Product>>
where
    E: Executor<'e, Database = Postgres>,
{
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM products");
    let mut conditions_added = false;

    // Helper to add WHERE or AND
    let mut add_condition_separator = |qb: &mut QueryBuilder<Postgres>| {
        if !conditions_added {
            qb.push(" WHERE ");
            conditions_added = true;
        } else {
            qb.push(" AND ");
        }
    };

    if filter.hot_deals {
        add_condition_separator(&mut qb);
        qb.push("is_hot_deal = TRUE");
    }

    if filter.featured {
        add_condition_separator(&mut qb);
        qb.push("is_featured = TRUE");
    }

    if let Some(category_id) = filter.category_id {
        add_condition_separator(&mut qb);
        qb.push("category_id = ").push_bind(category_id);
    }

    if let Some(search) = filter.search {
        add_condition_separator(&mut qb);
        qb.push("name ILIKE ").push_bind(format!("%{}%", search));
    }

    match filter.sort {
        Some(PriceSort::LowToHigh) => {
            qb.push(" ORDER BY price ASC");
        }
        Some(PriceSort::HighToLow) => {
            qb.push(" ORDER BY price DESC");
        }
        None => {
            qb.push(" ORDER BY created_at");
        }
    }

    let query = qb.build_query_as::<Product>();

    query.fetch_all(executor).await.map_err(AppError::from)
}

pub async fn get_product_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    product_id: Uuid,
) -> Res<Option<Product>> {
    sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(product_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_product_ids_by_category<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    category_id: Uuid,
) -> Res<Vec<Uuid>> {
    sqlx::query_scalar::<_, Uuid>("SELECT id FROM products WHERE category_id = $1")
        .bind(category_id)
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert_product<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: ProductCreateRequest,
) -> Res<Product> {
    sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (name, description, price, category_id, stock, images, rating, is_hot_deal, is_featured)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.category_id)
    .bind(data.stock)
    .bind(&data.images)
    .bind(data.rating)
    .bind(data.is_hot_deal)
    .bind(data.is_featured)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn update_product<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    product_id: Uuid,
    update: ProductUpdate,
) -> Res<Product> {
    sqlx::query_as::<_, Product>(
        r#"
        UPDATE products
        SET name = COALESCE($2, name),
            description = COALESCE($3, description),
            price = COALESCE($4, price),
            category_id = COALESCE($5, category_id),
            stock = COALESCE($6, stock),
            images = COALESCE($7, images),
            rating = COALESCE($8, rating),
            is_hot_deal = COALESCE($9, is_hot_deal),
            is_featured = COALESCE($10, is_featured),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(product_id)
    .bind(&update.name)
    .bind(&update.description)
    .bind(update.price)
    .bind(update.category_id)
    .bind(update.stock)
    .bind(&update.images)
    .bind(update.rating)
    .bind(update.is_hot_deal)
    .bind(update.is_featured)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn delete_product<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    product_id: Uuid,
) -> Res<()> {
    sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(product_id)
        .execute(executor)
        .await?;
    Ok(())
}

/// Decrements stock only when enough is available. Returns `false` when
/// the guard failed (insufficient stock or unknown product) and nothing
/// was changed.
pub async fn decrement_stock_checked<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    product_id: Uuid,
    quantity: i32,
) -> Res<bool> {
    let result = sqlx::query(
        r#"
        UPDATE products
        SET stock = stock - $2, updated_at = now()
        WHERE id = $1 AND stock >= $2
        "#,
    )
    .bind(product_id)
    .bind(quantity)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn restore_stock<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    product_id: Uuid,
    quantity: i32,
) -> Res<()> {
    sqlx::query("UPDATE products SET stock = stock + $2, updated_at = now() WHERE id = $1")
        .bind(product_id)
        .bind(quantity)
        .execute(executor)
        .await?;
    Ok(())
}

use crate::{
	Result,
	db::Db,
	models::{ItemRow, NewItem},
};

/// Full snapshot of the catalog, ordered by id.
pub async fn list_items(db: &Db) -> Result<Vec<ItemRow>> {
	let rows = sqlx::query_as::<_, ItemRow>(
		"\
SELECT
	id,
	name,
	price,
	image,
	brand,
	category
FROM item
ORDER BY id ASC",
	)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

pub async fn insert_item(db: &Db, item: &NewItem) -> Result<i64> {
	let id: i64 = sqlx::query_scalar(
		"\
INSERT INTO item (
	name,
	price,
	image,
	brand,
	category
)
VALUES ($1, $2, $3, $4, $5)
RETURNING id",
	)
	.bind(item.name.as_deref())
	.bind(item.price)
	.bind(item.image.as_deref())
	.bind(item.brand.as_deref())
	.bind(item.category.as_deref())
	.fetch_one(&db.pool)
	.await?;

	Ok(id)
}

pub async fn delete_item(db: &Db, id: i64) -> Result<bool> {
	let result = sqlx::query("DELETE FROM item WHERE id = $1").bind(id).execute(&db.pool).await?;

	Ok(result.rows_affected() > 0)
}

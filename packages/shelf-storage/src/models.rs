/// Row of the `item` table. Every column but the key is nullable in the source schema.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ItemRow {
	pub id: i64,
	pub name: Option<String>,
	pub price: Option<i32>,
	pub image: Option<String>,
	pub brand: Option<String>,
	pub category: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewItem {
	pub name: Option<String>,
	pub price: Option<i32>,
	pub image: Option<String>,
	pub brand: Option<String>,
	pub category: Option<String>,
}

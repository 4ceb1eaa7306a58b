//! Pagination cursors

use serde::{Deserialize, Serialize};

use crate::query::Query;

/// Anything that can sit in a paginated batch.
pub trait Identified {
	fn id(&self) -> &str;
}

/// Pair of continuation queries.
///
/// `prev` pages towards newer items (`since_id` set), `next` towards older
/// ones (`until_id` set). An empty marker means there is no further page in
/// that direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
	pub prev: Query,
	pub next: Query,
}

impl Cursor {
	/// Builds both continuation queries from `query` and the boundary ids.
	pub fn new(query: &Query, prev_id: impl Into<String>, next_id: impl Into<String>) -> Self {
		let mut prev = query.clone();
		prev.since_id = prev_id.into();
		prev.until_id = String::new();

		let mut next = query.clone();
		next.since_id = String::new();
		next.until_id = next_id.into();

		Self { prev, next }
	}

	/// Uses the first and last item of `items` as continuation markers.
	pub fn from_items<T: Identified>(query: &Query, items: &[T]) -> Self {
		let (prev_id, next_id) = boundary_ids(items);
		Self::new(query, prev_id, next_id)
	}

	pub fn has_prev(&self) -> bool {
		!self.prev.since_id.is_empty()
	}

	pub fn has_next(&self) -> bool {
		!self.next.until_id.is_empty()
	}
}

/// Ids of the first and last item, or two empty strings for an empty batch.
pub fn boundary_ids<T: Identified>(items: &[T]) -> (String, String) {
	match (items.first(), items.last()) {
		(Some(first), Some(last)) => (first.id().to_string(), last.id().to_string()),
		_ => (String::new(), String::new()),
	}
}

/// A batch of normalized entities plus its cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
	pub items: Vec<T>,
	pub cursor: Cursor,
}

impl<T: Identified> Page<T> {
	/// Wraps `items`, deriving the cursor from the first and last item.
	pub fn from_items(query: &Query, items: Vec<T>) -> Self {
		let cursor = Cursor::from_items(query, &items);
		Self { items, cursor }
	}
}

impl<T> Page<T> {
	/// Wraps `items` with cursor markers supplied by the provider.
	pub fn with_cursor(items: Vec<T>, cursor: Cursor) -> Self {
		Self { items, cursor }
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}

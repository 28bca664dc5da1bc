//! Common types used throughout the Curricula platform.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::skip_serializing_none;
use std::time::SystemTime;

// UserId //
//********//
/// Opaque identifier of a platform user. Users themselves live outside this system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for UserId {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_i64(self.0)
	}
}

impl<'de> Deserialize<'de> for UserId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		Ok(UserId(i64::deserialize(deserializer)?))
	}
}

// Timestamp //
//***********//
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(pub i64);

impl Timestamp {
	pub fn now() -> Timestamp {
		let res = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
		Timestamp(i64::try_from(res.as_secs()).unwrap_or(i64::MAX))
	}

	pub fn add_seconds(&self, seconds: i64) -> Timestamp {
		Timestamp(self.0.saturating_add(seconds))
	}
}

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for Timestamp {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_i64(self.0)
	}
}

impl<'de> Deserialize<'de> for Timestamp {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		Ok(Timestamp(i64::deserialize(deserializer)?))
	}
}

// Patch //
//*******//
/// Tri-state field for partial updates.
///
/// A missing field deserializes to `Undefined` (needs `#[serde(default)]` on the
/// field), an explicit `null` to `Null`, anything else to `Value`.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Patch<T> {
	#[default]
	Undefined,
	Null,
	Value(T),
}

impl<T> Patch<T> {
	pub fn is_undefined(&self) -> bool {
		matches!(self, Patch::Undefined)
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Patch::Null)
	}

	pub fn is_value(&self) -> bool {
		matches!(self, Patch::Value(_))
	}

	pub fn value(&self) -> Option<&T> {
		match self {
			Patch::Value(v) => Some(v),
			_ => None,
		}
	}

	/// `None` if undefined, `Some(None)` if null, `Some(Some(v))` if set
	pub fn as_option(&self) -> Option<Option<&T>> {
		match self {
			Patch::Undefined => None,
			Patch::Null => Some(None),
			Patch::Value(v) => Some(Some(v)),
		}
	}

	pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Patch<U> {
		match self {
			Patch::Undefined => Patch::Undefined,
			Patch::Null => Patch::Null,
			Patch::Value(v) => Patch::Value(f(v)),
		}
	}
}

impl<T: Serialize> Serialize for Patch<T> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self {
			Patch::Undefined | Patch::Null => serializer.serialize_none(),
			Patch::Value(v) => v.serialize(serializer),
		}
	}
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		Ok(match Option::<T>::deserialize(deserializer)? {
			Some(v) => Patch::Value(v),
			None => Patch::Null,
		})
	}
}

// Pagination //
//************//
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Offset/limit paging request, 1-based page numbers
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct PageQuery {
	pub page: Option<u32>,
	pub take: Option<u32>,
}

impl PageQuery {
	pub fn page(&self) -> u32 {
		self.page.unwrap_or(1).max(1)
	}

	pub fn take(&self) -> u32 {
		self.take.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
	}

	pub fn offset(&self) -> u32 {
		(self.page() - 1).saturating_mul(self.take())
	}
}

/// A page of items together with the total count of matching rows
#[derive(Debug)]
pub struct Page<T> {
	pub items: Vec<T>,
	pub total: u64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
	pub page: u32,
	pub take: u32,
	pub total: u64,
}

// ApiResponse //
//*************//
#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
	pub data: T,
	pub pagination: Option<Pagination>,
	pub time: Timestamp,
}

impl<T> ApiResponse<T> {
	pub fn new(data: T) -> Self {
		Self { data, pagination: None, time: Timestamp::now() }
	}

	pub fn with_pagination(data: T, query: &PageQuery, total: u64) -> Self {
		Self {
			data,
			pagination: Some(Pagination { page: query.page(), take: query.take(), total }),
			time: Timestamp::now(),
		}
	}
}

/// Bare acknowledgement body used by mutation endpoints without payload
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
	pub success: bool,
}

impl SuccessResponse {
	pub fn ok() -> Self {
		Self { success: true }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_page_query_defaults() {
		let q = PageQuery::default();
		assert_eq!(q.page(), 1);
		assert_eq!(q.take(), DEFAULT_PAGE_SIZE);
		assert_eq!(q.offset(), 0);
	}

	#[test]
	fn test_page_query_clamps() {
		let q = PageQuery { page: Some(0), take: Some(1000) };
		assert_eq!(q.page(), 1);
		assert_eq!(q.take(), MAX_PAGE_SIZE);

		let q = PageQuery { page: Some(3), take: Some(10) };
		assert_eq!(q.offset(), 20);
	}

	#[test]
	fn test_user_id_serde() {
		let ids: Vec<UserId> = serde_json::from_str("[1, 42]").unwrap();
		assert_eq!(ids, vec![UserId(1), UserId(42)]);
		assert_eq!(serde_json::to_string(&UserId(7)).unwrap(), "7");
	}
}

// vim: ts=4

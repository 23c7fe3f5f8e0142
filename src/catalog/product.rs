//! Product record shown in the warehouse list.

// self
use crate::_prelude::*;

/// Display-only product record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
	/// Model name.
	pub model: String,
	/// Manufacturer name.
	pub manufacturer: String,
	/// Unit price.
	pub price: f64,
	/// Units in stock.
	pub quantity: u32,
}
impl Product {
	/// Creates a product record.
	pub fn new(
		model: impl Into<String>,
		manufacturer: impl Into<String>,
		price: f64,
		quantity: u32,
	) -> Self {
		Self { model: model.into(), manufacturer: manufacturer.into(), price, quantity }
	}
}

//! Warehouse product list model.
//!
//! [`ProductListAdapter`] owns the backing list shown in the product screen, formats rows, and
//! forwards taps to a caller-supplied handler. It is toolkit-agnostic: a view layer pulls
//! [`ProductRow`]s and re-renders whenever the registered [`DataSetObserver`] fires.

pub mod product;

pub use product::*;

// self
use crate::_prelude::*;

/// Handler invoked with the tapped product.
pub type ClickHandler = Arc<dyn Fn(&Product) + Send + Sync>;
/// Observer notified after every full list swap.
pub type DataSetObserver = Arc<dyn Fn(DataSetChanged) + Send + Sync>;

/// Notification emitted by [`ProductListAdapter::replace_products`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DataSetChanged {
	/// Number of items after the swap.
	pub item_count: usize,
	/// Monotonic counter, incremented on every swap.
	pub generation: u64,
}

/// One bound row: four display strings plus the click binding.
#[derive(Clone)]
pub struct ProductRow {
	/// `Model: …`
	pub model: String,
	/// `Manufacturer: …`
	pub manufacturer: String,
	/// `Price: …`
	pub price: String,
	/// `QA: …`
	pub quantities: String,
	product: Product,
	on_click: ClickHandler,
}
impl ProductRow {
	/// Formats `product` and attaches `on_click`.
	pub fn bind(product: Product, on_click: ClickHandler) -> Self {
		Self {
			model: format!("Model: {}", product.model),
			manufacturer: format!("Manufacturer: {}", product.manufacturer),
			price: format!("Price: {}", product.price),
			quantities: format!("QA: {}", product.quantity),
			product,
			on_click,
		}
	}

	/// Bound product.
	pub fn product(&self) -> &Product {
		&self.product
	}

	/// Forwards a tap to the click handler.
	pub fn click(&self) {
		(self.on_click)(&self.product);
	}
}
impl Debug for ProductRow {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ProductRow")
			.field("model", &self.model)
			.field("manufacturer", &self.manufacturer)
			.field("price", &self.price)
			.field("quantities", &self.quantities)
			.finish_non_exhaustive()
	}
}

#[derive(Default)]
struct DataSet {
	products: Vec<Product>,
	generation: u64,
}

/// Backing list for the product screen.
///
/// The list is only ever replaced wholesale; there is no incremental diffing.
pub struct ProductListAdapter {
	data: RwLock<DataSet>,
	on_click: ClickHandler,
	observer: RwLock<Option<DataSetObserver>>,
}
impl ProductListAdapter {
	/// Creates an empty adapter that forwards taps to `on_click`.
	pub fn new<F>(on_click: F) -> Self
	where
		F: 'static + Fn(&Product) + Send + Sync,
	{
		Self { data: Default::default(), on_click: Arc::new(on_click), observer: Default::default() }
	}

	/// Registers the observer notified after every [`replace_products`](Self::replace_products),
	/// replacing any previous one.
	pub fn set_observer<F>(&self, observer: F)
	where
		F: 'static + Fn(DataSetChanged) + Send + Sync,
	{
		*self.observer.write() = Some(Arc::new(observer));
	}

	/// Replaces the whole backing list and signals a full re-render.
	pub fn replace_products(&self, products: impl IntoIterator<Item = Product>) {
		let event = {
			let mut data = self.data.write();

			data.products.clear();
			data.products.extend(products);
			data.generation += 1;

			DataSetChanged { item_count: data.products.len(), generation: data.generation }
		};
		let observer = self.observer.read().clone();

		if let Some(observer) = observer {
			observer(event);
		}
	}

	/// Number of rows.
	pub fn item_count(&self) -> usize {
		self.data.read().products.len()
	}

	/// Number of swaps so far.
	pub fn generation(&self) -> u64 {
		self.data.read().generation
	}

	/// Binds the row at `position`, or `None` when out of range.
	pub fn bind(&self, position: usize) -> Option<ProductRow> {
		let product = self.data.read().products.get(position)?.clone();

		Some(ProductRow::bind(product, self.on_click.clone()))
	}

	/// Binds every row in backing order.
	pub fn rows(&self) -> Vec<ProductRow> {
		self.data
			.read()
			.products
			.iter()
			.cloned()
			.map(|product| ProductRow::bind(product, self.on_click.clone()))
			.collect()
	}

	/// Snapshot of the backing list.
	pub fn products(&self) -> Vec<Product> {
		self.data.read().products.clone()
	}
}
impl Debug for ProductListAdapter {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let data = self.data.read();

		f.debug_struct("ProductListAdapter")
			.field("item_count", &data.products.len())
			.field("generation", &data.generation)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicU64, Ordering};
	// crates.io
	use parking_lot::Mutex;
	// self
	use super::*;

	fn product(model: &str, quantity: u32) -> Product {
		Product::new(model, "Bosch", 199.99, quantity)
	}

	#[test]
	fn renders_exactly_the_last_replaced_list() {
		let adapter = ProductListAdapter::new(|_| {});

		adapter.replace_products([product("GSR 12V", 3), product("PSB 500", 1)]);
		adapter.replace_products([
			product("PKS 55", 7),
			product("GBH 2-26", 2),
			product("UniversalDrill", 0),
		]);

		let models =
			adapter.rows().into_iter().map(|row| row.product().model.clone()).collect::<Vec<_>>();

		assert_eq!(models, ["PKS 55", "GBH 2-26", "UniversalDrill"]);
		assert_eq!(adapter.item_count(), 3);
		assert_eq!(adapter.generation(), 2);

		adapter.replace_products([]);

		assert!(adapter.rows().is_empty());
		assert!(adapter.bind(0).is_none());
	}

	#[test]
	fn bind_formats_display_strings() {
		let adapter = ProductListAdapter::new(|_| {});

		adapter.replace_products([Product::new("GSR 12V", "Bosch", 249.5, 12)]);

		let row = adapter.bind(0).expect("Row 0 should exist after the swap.");

		assert_eq!(row.model, "Model: GSR 12V");
		assert_eq!(row.manufacturer, "Manufacturer: Bosch");
		assert_eq!(row.price, "Price: 249.5");
		assert_eq!(row.quantities, "QA: 12");
		assert!(adapter.bind(1).is_none());
	}

	#[test]
	fn click_forwards_bound_product() {
		let clicked = Arc::new(Mutex::new(Vec::new()));
		let sink = clicked.clone();
		let adapter =
			ProductListAdapter::new(move |product: &Product| sink.lock().push(product.model.clone()));

		adapter.replace_products([product("A", 1), product("B", 2)]);
		adapter.bind(1).expect("Row 1 should exist.").click();
		adapter.bind(0).expect("Row 0 should exist.").click();

		assert_eq!(*clicked.lock(), ["B", "A"]);
	}

	#[test]
	fn observer_sees_every_swap() {
		let last = Arc::new(AtomicU64::new(0));
		let seen = last.clone();
		let adapter = ProductListAdapter::new(|_| {});

		adapter.set_observer(move |event| {
			seen.store(event.generation * 100 + event.item_count as u64, Ordering::SeqCst);
		});
		adapter.replace_products([product("A", 1)]);

		assert_eq!(last.load(Ordering::SeqCst), 101);

		adapter.replace_products([product("A", 1), product("B", 1), product("C", 1)]);

		assert_eq!(last.load(Ordering::SeqCst), 203);
	}
}

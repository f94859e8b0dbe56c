use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::debug;

use bouquet_catalog::{
    CatalogReader, Event, EventFilter, EventUpdate, Flower, FlowerFilter, FlowerInProduct,
    FlowerUpdate, NewEvent, NewFlower, NewProduct, PackagingOption, Product, ProductFilter,
    ProductInEvent, ProductUpdate, validate,
};
use bouquet_core::{DomainError, DomainResult, Entity, EventId, FlowerId, ProductId, ValueObject};

#[derive(Debug, Default)]
struct CatalogState {
    flowers: HashMap<FlowerId, Flower>,
    products: HashMap<ProductId, Product>,
    events: HashMap<EventId, Event>,
    product_flowers: HashMap<ProductId, Vec<FlowerInProduct>>,
    event_products: HashMap<EventId, Vec<ProductInEvent>>,
}

impl CatalogState {
    fn flower(&self, id: FlowerId) -> DomainResult<&Flower> {
        self.flowers
            .get(&id)
            .ok_or_else(|| DomainError::not_found("flower", id))
    }

    fn product(&self, id: ProductId) -> DomainResult<&Product> {
        self.products
            .get(&id)
            .ok_or_else(|| DomainError::not_found("product", id))
    }

    fn event(&self, id: EventId) -> DomainResult<&Event> {
        self.events
            .get(&id)
            .ok_or_else(|| DomainError::not_found("event", id))
    }
}

/// In-memory catalog for development runs and tests.
///
/// Every mutation validates fully before touching state, so a rejected request
/// leaves the catalog exactly as it was. Deleting a flower or product also
/// removes the composition rows that reference it.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    inner: RwLock<CatalogState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, CatalogState>> {
        self.inner
            .read()
            .map_err(|_| DomainError::unavailable("catalog lock poisoned"))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, CatalogState>> {
        self.inner
            .write()
            .map_err(|_| DomainError::unavailable("catalog lock poisoned"))
    }

    // Flowers

    pub fn create_flower(&self, request: NewFlower) -> DomainResult<Flower> {
        self.create_flower_with_id(FlowerId::new(), request)
    }

    /// Create a flower under a caller-chosen id (fixtures, imports).
    pub fn create_flower_with_id(&self, id: FlowerId, request: NewFlower) -> DomainResult<Flower> {
        let flower = Flower::create(id, request)?;
        insert_new(&mut self.write()?.flowers, &flower, "flower")?;
        debug!(flower_id = %id, name = %flower.name, "flower created");
        Ok(flower)
    }

    pub fn edit_flower(&self, id: FlowerId, update: FlowerUpdate) -> DomainResult<Flower> {
        let mut state = self.write()?;
        let flower = state
            .flowers
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("flower", id))?;
        flower.apply(update)?;
        Ok(flower.clone())
    }

    pub fn delete_flower(&self, id: FlowerId) -> DomainResult<()> {
        let mut state = self.write()?;
        if state.flowers.remove(&id).is_none() {
            return Err(DomainError::not_found("flower", id));
        }
        for rows in state.product_flowers.values_mut() {
            rows.retain(|row| row.flower_id != id);
        }
        debug!(flower_id = %id, "flower deleted");
        Ok(())
    }

    pub fn flower(&self, id: FlowerId) -> DomainResult<Flower> {
        self.read()?.flower(id).cloned()
    }

    /// Flowers matching `filter`, ordered by name.
    pub fn list_flowers(&self, filter: &FlowerFilter) -> DomainResult<Vec<Flower>> {
        let state = self.read()?;
        let mut flowers: Vec<Flower> = state
            .flowers
            .values()
            .filter(|flower| filter.matches(flower))
            .cloned()
            .collect();
        flowers.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(flowers)
    }

    // Products

    pub fn create_product(&self, request: NewProduct) -> DomainResult<Product> {
        self.create_product_with_id(ProductId::new(), request)
    }

    pub fn create_product_with_id(
        &self,
        id: ProductId,
        request: NewProduct,
    ) -> DomainResult<Product> {
        let product = Product::create(id, request)?;
        insert_new(&mut self.write()?.products, &product, "product")?;
        debug!(product_id = %id, name = %product.name, "product created");
        Ok(product)
    }

    pub fn edit_product(&self, id: ProductId, update: ProductUpdate) -> DomainResult<Product> {
        let mut state = self.write()?;
        let product = state
            .products
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("product", id))?;
        product.apply(update)?;
        Ok(product.clone())
    }

    pub fn delete_product(&self, id: ProductId) -> DomainResult<()> {
        let mut state = self.write()?;
        if state.products.remove(&id).is_none() {
            return Err(DomainError::not_found("product", id));
        }
        state.product_flowers.remove(&id);
        for rows in state.event_products.values_mut() {
            rows.retain(|row| row.product_id != id);
        }
        debug!(product_id = %id, "product deleted");
        Ok(())
    }

    pub fn product(&self, id: ProductId) -> DomainResult<Product> {
        self.read()?.product(id).cloned()
    }

    pub fn list_products(&self, filter: &ProductFilter) -> DomainResult<Vec<Product>> {
        let state = self.read()?;
        let mut products: Vec<Product> = state
            .products
            .values()
            .filter(|product| filter.matches(product))
            .cloned()
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(products)
    }

    /// Attach flowers to a product. Fails if any flower is already attached.
    pub fn add_flowers_to_product(
        &self,
        product_id: ProductId,
        rows: Vec<FlowerInProduct>,
    ) -> DomainResult<()> {
        let mut state = self.write()?;
        state.product(product_id)?;
        check_rows(&rows, |flower_id: FlowerId| state.flower(flower_id).map(|_| ()))?;
        append_rows(&mut state.product_flowers, product_id, rows)
    }

    /// Change the quantities of flowers already attached to a product.
    pub fn edit_flowers_in_product(
        &self,
        product_id: ProductId,
        rows: Vec<FlowerInProduct>,
    ) -> DomainResult<()> {
        let mut state = self.write()?;
        state.product(product_id)?;
        check_rows(&rows, |flower_id: FlowerId| state.flower(flower_id).map(|_| ()))?;
        update_rows(&mut state.product_flowers, product_id, rows)
    }

    pub fn flowers_of_product(&self, product_id: ProductId) -> DomainResult<Vec<FlowerInProduct>> {
        let state = self.read()?;
        state.product(product_id)?;
        Ok(state
            .product_flowers
            .get(&product_id)
            .cloned()
            .unwrap_or_default())
    }

    // Events

    pub fn create_event(&self, request: NewEvent) -> DomainResult<Event> {
        self.create_event_with_id(EventId::new(), request)
    }

    pub fn create_event_with_id(&self, id: EventId, request: NewEvent) -> DomainResult<Event> {
        let event = Event::create(id, request)?;
        insert_new(&mut self.write()?.events, &event, "event")?;
        debug!(event_id = %id, name = %event.name, "event created");
        Ok(event)
    }

    pub fn edit_event(&self, id: EventId, update: EventUpdate) -> DomainResult<Event> {
        let mut state = self.write()?;
        let event = state
            .events
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("event", id))?;
        event.apply(update)?;
        Ok(event.clone())
    }

    pub fn delete_event(&self, id: EventId) -> DomainResult<()> {
        let mut state = self.write()?;
        if state.events.remove(&id).is_none() {
            return Err(DomainError::not_found("event", id));
        }
        state.event_products.remove(&id);
        debug!(event_id = %id, "event deleted");
        Ok(())
    }

    pub fn event(&self, id: EventId) -> DomainResult<Event> {
        self.read()?.event(id).cloned()
    }

    /// Events matching `filter`, ordered by date, then name.
    pub fn list_events(&self, filter: &EventFilter) -> DomainResult<Vec<Event>> {
        let state = self.read()?;
        let mut events: Vec<Event> = state
            .events
            .values()
            .filter(|event| filter.matches(event))
            .cloned()
            .collect();
        events.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.name.cmp(&b.name))
                .then(a.id.cmp(&b.id))
        });
        Ok(events)
    }

    /// Attach products to an event. Fails if any product is already attached.
    pub fn add_products_to_event(
        &self,
        event_id: EventId,
        rows: Vec<ProductInEvent>,
    ) -> DomainResult<()> {
        let mut state = self.write()?;
        state.event(event_id)?;
        check_rows(&rows, |product_id: ProductId| state.product(product_id).map(|_| ()))?;
        append_rows(&mut state.event_products, event_id, rows)
    }

    /// Change the quantities of products already attached to an event.
    pub fn edit_products_in_event(
        &self,
        event_id: EventId,
        rows: Vec<ProductInEvent>,
    ) -> DomainResult<()> {
        let mut state = self.write()?;
        state.event(event_id)?;
        check_rows(&rows, |product_id: ProductId| state.product(product_id).map(|_| ()))?;
        update_rows(&mut state.event_products, event_id, rows)
    }

    pub fn products_of_event(&self, event_id: EventId) -> DomainResult<Vec<ProductInEvent>> {
        let state = self.read()?;
        state.event(event_id)?;
        Ok(state
            .event_products
            .get(&event_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl CatalogReader for InMemoryCatalog {
    async fn get_event(&self, event_id: EventId) -> DomainResult<Event> {
        self.event(event_id)
    }

    async fn list_products_of_event(
        &self,
        event_id: EventId,
    ) -> DomainResult<Vec<ProductInEvent>> {
        self.products_of_event(event_id)
    }

    async fn list_flowers_of_product(
        &self,
        product_id: ProductId,
    ) -> DomainResult<Vec<FlowerInProduct>> {
        self.flowers_of_product(product_id)
    }

    async fn get_flower(&self, flower_id: FlowerId) -> DomainResult<Flower> {
        self.flower(flower_id)
    }

    async fn list_packaging_options(
        &self,
        flower_id: FlowerId,
    ) -> DomainResult<Vec<PackagingOption>> {
        Ok(self.read()?.flower(flower_id)?.packaging.clone())
    }
}

fn insert_new<E>(table: &mut HashMap<E::Id, E>, entity: &E, kind: &str) -> DomainResult<()>
where
    E: Entity + Clone,
    E::Id: Display,
{
    if table.contains_key(entity.id()) {
        return Err(DomainError::invalid_input(format!(
            "{kind} {} already exists",
            entity.id()
        )));
    }
    table.insert(entity.id().clone(), entity.clone());
    Ok(())
}

/// A row of one of the two composition tables.
trait CompositionRow: ValueObject {
    type Item: Copy + Eq + Hash + Display;

    const LABEL: &'static str;

    fn item(&self) -> Self::Item;
    fn quantity(&self) -> i64;
    fn set_quantity(&mut self, quantity: i64);
}

impl CompositionRow for FlowerInProduct {
    type Item = FlowerId;

    const LABEL: &'static str = "flower in product";

    fn item(&self) -> FlowerId {
        self.flower_id
    }

    fn quantity(&self) -> i64 {
        self.quantity
    }

    fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }
}

impl CompositionRow for ProductInEvent {
    type Item = ProductId;

    const LABEL: &'static str = "product in event";

    fn item(&self) -> ProductId {
        self.product_id
    }

    fn quantity(&self) -> i64 {
        self.quantity
    }

    fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }
}

fn check_rows<R, F>(rows: &[R], exists: F) -> DomainResult<()>
where
    R: CompositionRow,
    F: Fn(R::Item) -> DomainResult<()>,
{
    let mut seen = HashSet::new();
    for row in rows {
        validate::quantity(R::LABEL, row.quantity())?;
        if !seen.insert(row.item()) {
            return Err(DomainError::invalid_input(format!(
                "{}: {} listed more than once",
                R::LABEL,
                row.item()
            )));
        }
        exists(row.item())?;
    }
    Ok(())
}

fn append_rows<O, R>(table: &mut HashMap<O, Vec<R>>, owner: O, rows: Vec<R>) -> DomainResult<()>
where
    O: Copy + Eq + Hash + Display,
    R: CompositionRow,
{
    let existing = table.get(&owner).map(Vec::as_slice).unwrap_or_default();
    if let Some(row) = rows
        .iter()
        .find(|row| existing.iter().any(|current| current.item() == row.item()))
    {
        return Err(DomainError::invalid_input(format!(
            "{}: {} is already attached to {owner}",
            R::LABEL,
            row.item()
        )));
    }
    table.entry(owner).or_default().extend(rows);
    Ok(())
}

fn update_rows<O, R>(table: &mut HashMap<O, Vec<R>>, owner: O, rows: Vec<R>) -> DomainResult<()>
where
    O: Copy + Eq + Hash + Display,
    R: CompositionRow,
{
    let missing = |row: &R| DomainError::not_found(R::LABEL, format!("{owner}/{}", row.item()));

    let Some(existing) = table.get_mut(&owner) else {
        return match rows.first() {
            Some(row) => Err(missing(row)),
            None => Ok(()),
        };
    };

    if let Some(row) = rows
        .iter()
        .find(|row| !existing.iter().any(|current| current.item() == row.item()))
    {
        return Err(missing(row));
    }

    for row in rows {
        if let Some(current) = existing
            .iter_mut()
            .find(|current| current.item() == row.item())
        {
            current.set_quantity(row.quantity());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;

    fn rose(catalog: &InMemoryCatalog) -> Flower {
        catalog
            .create_flower(NewFlower {
                name: "Rose".to_string(),
                packaging: vec![
                    PackagingOption::new(25, dec!(2.50)),
                    PackagingOption::new(10, dec!(1.00)),
                ],
            })
            .unwrap()
    }

    fn bouquet(catalog: &InMemoryCatalog) -> Product {
        catalog
            .create_product(NewProduct {
                name: "Bridal Bouquet".to_string(),
                description: String::new(),
            })
            .unwrap()
    }

    fn wedding(catalog: &InMemoryCatalog) -> Event {
        catalog
            .create_event(NewEvent {
                name: "Wedding".to_string(),
                date: NaiveDate::from_ymd_opt(2026, 6, 20).unwrap(),
                phone: String::new(),
                email: String::new(),
                address: "Garden Hall".to_string(),
                description: String::new(),
            })
            .unwrap()
    }

    #[test]
    fn created_flower_can_be_read_back() {
        let catalog = InMemoryCatalog::new();
        let created = rose(&catalog);

        assert_eq!(catalog.flower(created.id).unwrap(), created);
    }

    #[test]
    fn create_with_existing_id_is_rejected() {
        let catalog = InMemoryCatalog::new();
        let created = rose(&catalog);

        let err = catalog
            .create_flower_with_id(
                created.id,
                NewFlower {
                    name: "Tulip".to_string(),
                    packaging: vec![],
                },
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert_eq!(catalog.flower(created.id).unwrap().name, "Rose");
    }

    #[test]
    fn list_flowers_filters_and_orders_by_name() {
        let catalog = InMemoryCatalog::new();
        rose(&catalog);
        for name in ["Tulip", "Lily", "Rosemary"] {
            catalog
                .create_flower(NewFlower {
                    name: name.to_string(),
                    packaging: vec![],
                })
                .unwrap();
        }

        let names: Vec<String> = catalog
            .list_flowers(&FlowerFilter {
                name: Some("ROS".to_string()),
                package_size: None,
            })
            .unwrap()
            .into_iter()
            .map(|flower| flower.name)
            .collect();
        assert_eq!(names, vec!["Rose", "Rosemary"]);

        let all = catalog.list_flowers(&FlowerFilter::default()).unwrap();
        assert_eq!(all.first().map(|f| f.name.as_str()), Some("Lily"));
    }

    #[test]
    fn editing_unknown_records_reports_not_found() {
        let catalog = InMemoryCatalog::new();

        let err = catalog
            .edit_product(
                ProductId::new(),
                ProductUpdate {
                    name: "x".to_string(),
                    description: String::new(),
                },
            )
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(catalog.delete_event(EventId::new()).unwrap_err().is_not_found());
    }

    #[test]
    fn add_flowers_requires_existing_product_and_flowers() {
        let catalog = InMemoryCatalog::new();
        let flower = rose(&catalog);
        let product = bouquet(&catalog);

        let missing_product = ProductId::new();
        let err = catalog
            .add_flowers_to_product(missing_product, vec![FlowerInProduct::new(flower.id, 3)])
            .unwrap_err();
        assert_eq!(err, DomainError::not_found("product", missing_product));

        let unknown = FlowerId::new();
        let err = catalog
            .add_flowers_to_product(
                product.id,
                vec![
                    FlowerInProduct::new(flower.id, 3),
                    FlowerInProduct::new(unknown, 1),
                ],
            )
            .unwrap_err();
        assert_eq!(err, DomainError::not_found("flower", unknown));
        assert!(catalog.flowers_of_product(product.id).unwrap().is_empty());
    }

    #[test]
    fn add_flowers_rejects_pairs_already_present() {
        let catalog = InMemoryCatalog::new();
        let flower = rose(&catalog);
        let product = bouquet(&catalog);

        catalog
            .add_flowers_to_product(product.id, vec![FlowerInProduct::new(flower.id, 3)])
            .unwrap();
        let err = catalog
            .add_flowers_to_product(product.id, vec![FlowerInProduct::new(flower.id, 5)])
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert_eq!(
            catalog.flowers_of_product(product.id).unwrap(),
            vec![FlowerInProduct::new(flower.id, 3)]
        );
    }

    #[test]
    fn add_flowers_rejects_negative_and_repeated_rows() {
        let catalog = InMemoryCatalog::new();
        let flower = rose(&catalog);
        let product = bouquet(&catalog);

        let negative = catalog
            .add_flowers_to_product(product.id, vec![FlowerInProduct::new(flower.id, -1)])
            .unwrap_err();
        let repeated = catalog
            .add_flowers_to_product(
                product.id,
                vec![
                    FlowerInProduct::new(flower.id, 1),
                    FlowerInProduct::new(flower.id, 2),
                ],
            )
            .unwrap_err();

        assert!(matches!(negative, DomainError::InvalidInput(_)));
        assert!(matches!(repeated, DomainError::InvalidInput(_)));
        assert!(catalog.flowers_of_product(product.id).unwrap().is_empty());
    }

    #[test]
    fn edit_flowers_updates_quantities_of_attached_rows_only() {
        let catalog = InMemoryCatalog::new();
        let flower = rose(&catalog);
        let other = catalog
            .create_flower(NewFlower {
                name: "Fern".to_string(),
                packaging: vec![],
            })
            .unwrap();
        let product = bouquet(&catalog);
        catalog
            .add_flowers_to_product(product.id, vec![FlowerInProduct::new(flower.id, 3)])
            .unwrap();

        catalog
            .edit_flowers_in_product(product.id, vec![FlowerInProduct::new(flower.id, 7)])
            .unwrap();
        assert_eq!(
            catalog.flowers_of_product(product.id).unwrap(),
            vec![FlowerInProduct::new(flower.id, 7)]
        );

        let err = catalog
            .edit_flowers_in_product(
                product.id,
                vec![
                    FlowerInProduct::new(flower.id, 1),
                    FlowerInProduct::new(other.id, 1),
                ],
            )
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(
            catalog.flowers_of_product(product.id).unwrap(),
            vec![FlowerInProduct::new(flower.id, 7)]
        );
    }

    #[test]
    fn edit_on_product_without_composition_reports_missing_row() {
        let catalog = InMemoryCatalog::new();
        let flower = rose(&catalog);
        let product = bouquet(&catalog);

        let err = catalog
            .edit_flowers_in_product(product.id, vec![FlowerInProduct::new(flower.id, 2)])
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::not_found("flower in product", format!("{}/{}", product.id, flower.id))
        );
    }

    #[test]
    fn deleting_a_flower_removes_it_from_products() {
        let catalog = InMemoryCatalog::new();
        let flower = rose(&catalog);
        let product = bouquet(&catalog);
        catalog
            .add_flowers_to_product(product.id, vec![FlowerInProduct::new(flower.id, 3)])
            .unwrap();

        catalog.delete_flower(flower.id).unwrap();

        assert!(catalog.flower(flower.id).unwrap_err().is_not_found());
        assert!(catalog.flowers_of_product(product.id).unwrap().is_empty());
    }

    #[test]
    fn deleting_a_product_removes_it_from_events() {
        let catalog = InMemoryCatalog::new();
        let product = bouquet(&catalog);
        let event = wedding(&catalog);
        catalog
            .add_products_to_event(event.id, vec![ProductInEvent::new(product.id, 2)])
            .unwrap();

        catalog.delete_product(product.id).unwrap();

        assert!(catalog.products_of_event(event.id).unwrap().is_empty());
        assert!(catalog.flowers_of_product(product.id).unwrap_err().is_not_found());
    }

    #[test]
    fn list_events_filters_by_date_and_address() {
        let catalog = InMemoryCatalog::new();
        let event = wedding(&catalog);

        let hit = EventFilter {
            date: Some(event.date),
            address: Some("garden".to_string()),
            ..EventFilter::default()
        };
        let miss = EventFilter {
            date: NaiveDate::from_ymd_opt(2026, 6, 21),
            ..EventFilter::default()
        };

        assert_eq!(catalog.list_events(&hit).unwrap(), vec![event]);
        assert!(catalog.list_events(&miss).unwrap().is_empty());
    }

    #[tokio::test]
    async fn reader_serves_packaging_options_and_not_found() {
        let catalog = InMemoryCatalog::new();
        let flower = rose(&catalog);
        let reader: &dyn CatalogReader = &catalog;

        let options = reader.list_packaging_options(flower.id).await.unwrap();
        assert_eq!(options, flower.packaging);

        let missing = FlowerId::new();
        let err = reader.list_packaging_options(missing).await.unwrap_err();
        assert_eq!(err, DomainError::not_found("flower", missing));
        assert!(reader.get_event(EventId::new()).await.unwrap_err().is_not_found());
    }

    #[test]
    fn poisoned_lock_surfaces_as_unavailable() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let poisoner = Arc::clone(&catalog);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("poison the catalog lock");
        })
        .join();

        let err = catalog.list_flowers(&FlowerFilter::default()).unwrap_err();
        assert!(matches!(err, DomainError::Unavailable(_)));
    }
}

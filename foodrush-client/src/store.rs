//! In-memory collections behind the console views
//!
//! Collections are replaced wholesale on fetch and patched optimistically
//! after each successful mutation response (the server's returned record
//! is authoritative). There is no polling; a view re-fetches only on
//! mount or explicit action.

use shared::models::{Customer, Driver, Order, Restaurant};

/// Fetched collections plus optimistic patches
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub orders: Vec<Order>,
    pub drivers: Vec<Driver>,
    pub restaurants: Vec<Restaurant>,
    pub customers: Vec<Customer>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Fetch replacement ====================

    pub fn set_orders(&mut self, orders: Vec<Order>) {
        self.orders = orders;
    }

    pub fn set_drivers(&mut self, drivers: Vec<Driver>) {
        self.drivers = drivers;
    }

    pub fn set_restaurants(&mut self, restaurants: Vec<Restaurant>) {
        self.restaurants = restaurants;
    }

    pub fn set_customers(&mut self, customers: Vec<Customer>) {
        self.customers = customers;
    }

    // ==================== Optimistic patches ====================

    /// Patch a mutated order in place; new orders go to the front to
    /// keep the newest-first default ordering
    pub fn apply_order(&mut self, order: Order) {
        match self.orders.iter_mut().find(|o| o.id == order.id) {
            Some(slot) => *slot = order,
            None => self.orders.insert(0, order),
        }
    }

    pub fn apply_driver(&mut self, driver: Driver) {
        match self.drivers.iter_mut().find(|d| d.id == driver.id) {
            Some(slot) => *slot = driver,
            None => self.drivers.push(driver),
        }
    }

    pub fn remove_driver(&mut self, id: i64) -> bool {
        let before = self.drivers.len();
        self.drivers.retain(|d| d.id != id);
        self.drivers.len() != before
    }

    pub fn apply_restaurant(&mut self, restaurant: Restaurant) {
        match self.restaurants.iter_mut().find(|r| r.id == restaurant.id) {
            Some(slot) => *slot = restaurant,
            None => self.restaurants.push(restaurant),
        }
    }

    pub fn remove_restaurant(&mut self, id: i64) -> bool {
        let before = self.restaurants.len();
        self.restaurants.retain(|r| r.id != id);
        self.restaurants.len() != before
    }

    pub fn apply_customer(&mut self, customer: Customer) {
        match self.customers.iter_mut().find(|c| c.id == customer.id) {
            Some(slot) => *slot = customer,
            None => self.customers.push(customer),
        }
    }

    pub fn remove_customer(&mut self, id: i64) -> bool {
        let before = self.customers.len();
        self.customers.retain(|c| c.id != id);
        self.customers.len() != before
    }

    // ==================== Lookups ====================

    pub fn order(&self, id: i64) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn driver(&self, id: i64) -> Option<&Driver> {
        self.drivers.iter().find(|d| d.id == id)
    }

    pub fn restaurant(&self, id: i64) -> Option<&Restaurant> {
        self.restaurants.iter().find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::OrderStatus;
    use shared::models::OrderItem;

    fn order(id: i64, status: OrderStatus) -> Order {
        Order {
            id,
            customer_id: 1,
            restaurant_id: 1,
            driver_id: None,
            items: vec![OrderItem {
                name: "Pizza".to_string(),
                price: 10.0,
                quantity: 1,
                subtotal: None,
            }],
            total_amount: 10.0,
            status,
            customer_name: None,
            restaurant_name: None,
            driver_name: None,
            delivery_address: None,
            delivery_coordinates: None,
            created_at: id,
            confirmed_at: None,
            in_transit_at: None,
            delivered_at: None,
            cancelled_at: None,
        }
    }

    #[test]
    fn test_apply_order_replaces_by_id() {
        let mut store = Store::new();
        store.set_orders(vec![order(1, OrderStatus::New), order(2, OrderStatus::New)]);

        store.apply_order(order(2, OrderStatus::Preparing));

        assert_eq!(store.orders.len(), 2);
        assert_eq!(store.order(2).unwrap().status, OrderStatus::Preparing);
    }

    #[test]
    fn test_apply_order_inserts_new_at_front() {
        let mut store = Store::new();
        store.set_orders(vec![order(1, OrderStatus::New)]);

        store.apply_order(order(9, OrderStatus::New));

        assert_eq!(store.orders[0].id, 9);
        assert_eq!(store.orders.len(), 2);
    }

    #[test]
    fn test_remove_restaurant() {
        let mut store = Store::new();
        store.set_restaurants(vec![Restaurant {
            id: 3,
            name: "Mario's".to_string(),
            address: "1 Main St".to_string(),
            cuisine_type: None,
            coordinates: None,
            created_at: 0,
        }]);

        assert!(store.remove_restaurant(3));
        assert!(!store.remove_restaurant(3));
        assert!(store.restaurants.is_empty());
    }
}

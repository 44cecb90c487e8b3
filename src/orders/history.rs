//! A signed-in customer's past orders, read across every restaurant.

use crate::model::{Order, RestaurantId, Table, UserId};

/// One entry of a customer's history.
#[derive(Debug, Clone, PartialEq)]
pub struct PastOrder {
    pub restaurant_id: RestaurantId,
    pub order: Order,
}

/// Orders placed by `customer` in `tables`, newest first.
pub fn customer_history(tables: Vec<Table>, customer: &UserId) -> Vec<PastOrder> {
    let mut history: Vec<PastOrder> = tables
        .into_iter()
        .flat_map(|table| {
            let restaurant_id = table.restaurant_id;
            table
                .orders
                .into_iter()
                .filter(|o| o.customer_id.as_ref() == Some(customer))
                .map(move |order| PastOrder {
                    restaurant_id: restaurant_id.clone(),
                    order,
                })
        })
        .collect();
    history.sort_by(|a, b| b.order.created_at.cmp(&a.order.created_at));
    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderLine, TableId};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn order(table: u32, hour: u32, customer: Option<&str>) -> Order {
        let line = OrderLine {
            menu_item_id: "tea".into(),
            name: "Tea".into(),
            price: Decimal::new(300, 2),
            quantity: 1,
        };
        let at = Utc.with_ymd_and_hms(2024, 6, 2, hour, 0, 0).unwrap();
        let order = Order::new(TableId(table), "Ola", vec![line], at);
        match customer {
            Some(id) => order.placed_by(UserId(id.into())),
            None => order,
        }
    }

    fn table(id: u32, restaurant: &str, orders: Vec<Order>) -> Table {
        Table {
            id: TableId(id),
            number: id,
            restaurant_id: RestaurantId::from(restaurant),
            orders,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_history_spans_restaurants_newest_first() {
        let lunch = order(1, 12, Some("ola"));
        let dinner = order(2, 19, Some("ola"));
        let tables = vec![
            table(1, "cafe", vec![lunch.clone(), order(1, 13, None)]),
            table(2, "bistro", vec![dinner.clone(), order(2, 20, Some("kai"))]),
        ];

        let history = customer_history(tables, &UserId("ola".into()));
        assert_eq!(
            history,
            vec![
                PastOrder {
                    restaurant_id: RestaurantId::from("bistro"),
                    order: dinner
                },
                PastOrder {
                    restaurant_id: RestaurantId::from("cafe"),
                    order: lunch
                },
            ]
        );
    }

    #[test]
    fn test_anonymous_orders_belong_to_nobody() {
        let tables = vec![table(1, "cafe", vec![order(1, 9, None)])];
        assert!(customer_history(tables, &UserId("ola".into())).is_empty());
    }
}

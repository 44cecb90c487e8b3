//! Scripted walk through one evening at a restaurant.
//!
//! 1. A restaurant registers, builds its menu and sets up two tables.
//! 2. The dashboard opens its live order feed.
//! 3. A customer scans table 2's QR code, fills a cart and orders.
//! 4. The kitchen accepts and completes the order.
//! 5. Analytics, then graceful shutdown.

use chrono::Utc;
use doc_actor::tracing::setup_tracing;
use rust_decimal::Decimal;
use tableside::cart::Cart;
use tableside::config::Config;
use tableside::lifecycle::RestaurantSystem;
use tableside::model::{MenuItem, OperatorAction, Profile, RestaurantId};
use tableside::orders::{daily_sales, summarize};
use tableside::routes::{resolve, QrPayload, Route, View};
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = Config::from_env();
    setup_tracing(&config.log_filter);

    info!("Starting tableside demo");
    let system = RestaurantSystem::new(&config);

    // --- Restaurant setup ---
    let span = tracing::info_span!("restaurant_setup");
    let (restaurant_id, qr_url) = async {
        let owner = system
            .session
            .sign_up(
                "owner@noodlebar.example",
                "wok-and-roll",
                Profile::Restaurant {
                    business_name: "Noodle Bar".into(),
                    phone: "555-0100".into(),
                    address: "12 Harbour St".into(),
                },
            )
            .await
            .map_err(|e| e.to_string())?;
        let restaurant_id = RestaurantId::from(&owner.id);

        let menu = [
            MenuItem::new("Miso Soup", Decimal::new(450, 2), "Tofu, wakame", "Starters"),
            MenuItem::new("Gyoza", Decimal::new(650, 2), "Pork, six pieces", "Starters"),
            MenuItem::new("Tonkotsu Ramen", Decimal::new(1400, 2), "Pork broth", "Mains"),
        ];
        for item in menu {
            system
                .menus
                .upsert_item(restaurant_id.clone(), item)
                .await
                .map_err(|e| e.to_string())?;
        }

        let mut qr_url = String::new();
        for number in [1, 2] {
            let table = system
                .tables
                .create(restaurant_id.clone(), number)
                .await
                .map_err(|e| e.to_string())?;
            qr_url = system.qr_url(&table).map_err(|e| e.to_string())?;
            info!(number, url = %qr_url, "QR code ready");
        }
        Ok::<_, String>((restaurant_id, qr_url))
    }
    .instrument(span)
    .await?;

    let view = resolve(Route::Dashboard, system.session.role());
    info!(?view, "Dashboard");
    let mut feed = system
        .orders
        .subscribe(restaurant_id.clone())
        .await
        .map_err(|e| e.to_string())?;
    feed.next().await;

    // --- Customer at table 2 ---
    let span = tracing::info_span!("customer_order");
    let order = async {
        let scanned = QrPayload::parse(&qr_url).map_err(|e| e.to_string())?;
        let View::TableOrder {
            restaurant_id,
            table_id,
        } = resolve(scanned.route(), None)
        else {
            return Err("QR code does not open a table page".to_string());
        };

        let restaurant = system
            .restaurants
            .restaurant(restaurant_id.clone())
            .await
            .map_err(|e| e.to_string())?;
        let menu = system
            .menus
            .load(restaurant_id)
            .await
            .map_err(|e| e.to_string())?;
        info!(restaurant = %restaurant.business_name, categories = ?menu.categories(), "Menu shown");

        let mut cart = Cart::new();
        for item in menu.in_category("Mains") {
            cart.add(item);
            cart.add(item);
        }
        if let Some(soup) = menu.in_category("Starters").next() {
            cart.add(soup);
        }
        info!(items = cart.item_count(), total = %cart.total(), "Cart ready");

        system
            .orders
            .submit(table_id, "Mika", &mut cart)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    // --- Kitchen ---
    if let Some(board) = feed.next().await {
        if let Some(notice) = &board.notice {
            info!(count = notice.count(), "Dashboard notified");
        }
    }
    let accepted = system
        .orders
        .apply(&order, OperatorAction::Accept)
        .await
        .map_err(|e| e.to_string())?;
    let completed = system
        .orders
        .apply(&accepted, OperatorAction::Complete)
        .await
        .map_err(|e| e.to_string())?;
    info!(order_id = %completed.id, status = %completed.status, "Order done");

    // --- Analytics ---
    let orders = system
        .orders
        .orders(restaurant_id)
        .await
        .map_err(|e| e.to_string())?;
    let summary = summarize(&orders);
    info!(
        revenue = %summary.revenue,
        orders = summary.order_count,
        customers = summary.unique_customers,
        "Sales summary"
    );
    for day in daily_sales(&orders, Utc::now().date_naive()) {
        info!(date = %day.date, revenue = %day.revenue, "Daily sales");
    }

    feed.close();
    system
        .session
        .sign_out()
        .await
        .map_err(|e| e.to_string())?;
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}

//! Full end-to-end pass: the owner stocks the menu, a shopper browses,
//! fills a cart, and checks out; the owner then reads the order back.

use std::sync::Arc;

use async_trait::async_trait;

use resto_storefront::admin::{AdminPanel, NewDishForm};
use resto_storefront::cart::{AddOutcome, CartStore};
use resto_storefront::catalog::CatalogView;
use resto_storefront::checkout::{CheckoutFlow, CheckoutOutcome};
use resto_storefront::config::StorefrontConfig;
use resto_storefront::lifecycle::Storefront;
use resto_storefront::model::CustomerDetails;
use resto_storefront::services::auth::{Identity, Role};
use resto_storefront::services::images::{ImageCompressor, ImageError, ImageHost, ImageLimits};
use resto_storefront::services::payment::{mock::ScriptedGateway, PaymentOutcome};

struct StaticHost;

#[async_trait]
impl ImageHost for StaticHost {
    async fn upload(&self, image: Vec<u8>, preset: &str) -> Result<String, ImageError> {
        Ok(format!("https://cdn.example/{}/{}.jpg", preset, image.len()))
    }
}

struct PassthroughCompressor;

#[async_trait]
impl ImageCompressor for PassthroughCompressor {
    async fn shrink(&self, image: Vec<u8>, _limits: &ImageLimits) -> Result<Vec<u8>, ImageError> {
        Ok(image)
    }
}

fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        admin_emails: vec!["owner@restaurant.com".into()],
        ..StorefrontConfig::default()
    }
}

#[tokio::test]
async fn full_storefront_flow() {
    let storefront = Storefront::new(test_config());

    // The allow-list, not a hardcoded literal, decides who sees admin.
    let owner = Identity {
        user_id: Some("user_1".into()),
        email: Some("owner@restaurant.com".into()),
    };
    assert_eq!(storefront.access.role_for(&owner), Role::Admin);
    assert_eq!(storefront.access.role_for(&Identity::guest()), Role::Guest);

    // Owner stocks the menu.
    let mut panel = AdminPanel::new(
        storefront.dish_client.clone(),
        storefront.order_client.clone(),
        Arc::new(StaticHost),
        Arc::new(PassthroughCompressor),
        storefront.config.image_limits,
        storefront.config.upload_preset.clone(),
    );
    let jollof = panel
        .add_dish(NewDishForm {
            name: "Jollof Rice".into(),
            price: "10.00".into(),
            in_stock: true,
            image: vec![1u8; 64],
        })
        .await
        .unwrap();
    let kelewele = panel
        .add_dish(NewDishForm {
            name: "Kelewele".into(),
            price: "5.50".into(),
            in_stock: true,
            image: vec![2u8; 64],
        })
        .await
        .unwrap();

    // Shopper loads the catalog and fills the cart; the duplicate add is
    // reported, not applied.
    let catalog = CatalogView::load(&storefront.dish_client).await.unwrap();
    assert_eq!(catalog.dishes().len(), 2);

    let mut cart = CartStore::new();
    assert_eq!(
        catalog.add_to_cart(&mut cart, &jollof.id),
        Ok(AddOutcome::Added)
    );
    assert_eq!(
        catalog.add_to_cart(&mut cart, &kelewele.id),
        Ok(AddOutcome::Added)
    );
    assert_eq!(
        catalog.add_to_cart(&mut cart, &jollof.id),
        Ok(AddOutcome::AlreadyInCart)
    );
    assert_eq!(cart.len(), 2);
    assert_eq!(cart.total(), 15.5);

    // Checkout with a successful hosted payment.
    let gateway = ScriptedGateway::new();
    gateway.push(PaymentOutcome::Succeeded {
        reference: "prov_e2e".into(),
    });

    let mut flow = CheckoutFlow::new(storefront.config.currency.clone());
    flow.proceed_to_details(&cart).unwrap();
    flow.submit_details(CustomerDetails {
        name: "Ama Mensah".into(),
        email: "ama@example.com".into(),
        address: "123 Main Street, Accra".into(),
        number: "+233 504 388 888".into(),
        message: None,
    })
    .unwrap();

    let outcome = flow
        .place_order(&mut cart, &gateway, &storefront.order_client, None)
        .await
        .unwrap();
    assert!(matches!(outcome, CheckoutOutcome::Placed { .. }));
    assert!(cart.is_empty());
    assert_eq!(gateway.requests()[0].amount_minor, 1550);

    // Owner reads the order back, newest first.
    let orders = panel.recent_orders().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].items.len(), 2);
    assert_eq!(orders[0].payment_reference, "prov_e2e");

    drop(panel);
    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn order_listing_is_newest_first() {
    let storefront = Storefront::new(test_config());

    let gateway = ScriptedGateway::new();

    for (dish_name, price, reference) in [
        ("Jollof Rice", "10.00", "prov_1"),
        ("Kelewele", "5.50", "prov_2"),
    ] {
        let mut panel = AdminPanel::new(
            storefront.dish_client.clone(),
            storefront.order_client.clone(),
            Arc::new(StaticHost),
            Arc::new(PassthroughCompressor),
            storefront.config.image_limits,
            storefront.config.upload_preset.clone(),
        );
        let dish = panel
            .add_dish(NewDishForm {
                name: dish_name.into(),
                price: price.into(),
                in_stock: true,
                image: vec![1u8; 16],
            })
            .await
            .unwrap();

        let catalog = CatalogView::load(&storefront.dish_client).await.unwrap();
        let mut cart = CartStore::new();
        catalog.add_to_cart(&mut cart, &dish.id).unwrap();

        gateway.push(PaymentOutcome::Succeeded {
            reference: reference.into(),
        });
        let mut flow = CheckoutFlow::new("GHS");
        flow.proceed_to_details(&cart).unwrap();
        flow.submit_details(CustomerDetails {
            name: "Kofi Boateng".into(),
            email: "kofi@example.com".into(),
            address: "".into(),
            number: "+233 200 000 000".into(),
            message: None,
        })
        .unwrap();
        flow.place_order(&mut cart, &gateway, &storefront.order_client, None)
            .await
            .unwrap();
    }

    let orders = storefront.order_client.recent_orders().await.unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].payment_reference, "prov_2");
    assert_eq!(orders[1].payment_reference, "prov_1");

    storefront.shutdown().await.unwrap();
}

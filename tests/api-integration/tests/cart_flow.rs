//! Shopping flow: products fetched from the server go into a file-backed cart
//! that survives a reload.

use rust_decimal::Decimal;

use farmfresh_client::file_storage::FileStorage;
use farmfresh_common::cart::CartStore;
use farmfresh_common::checkout::PromoCode;
use farmfresh_common::storage::{CartStorage, CART_STORAGE_KEY};
use farmfresh_integration::TestServer;

#[tokio::test]
async fn cart_persists_across_sessions() {
    let server = TestServer::start().await;
    let client = server.client();
    let dir = tempfile::tempdir().unwrap();

    let coffee = client
        .product_by_slug("ethiopian-highland-coffee")
        .await
        .unwrap()
        .unwrap();
    let herbs = client
        .product_by_slug("mediterranean-herbs")
        .await
        .unwrap()
        .unwrap();

    {
        let mut cart = CartStore::load(FileStorage::new(dir.path()));
        cart.add_many(&coffee, 3);
        cart.add_to_cart(&herbs);
        assert_eq!(cart.cart_total(), Decimal::new(9072, 2));
        assert_eq!(cart.take_notices().len(), 2);
    }

    let mut cart = CartStore::load(FileStorage::new(dir.path()));
    assert_eq!(cart.cart_count(), 4);
    assert_eq!(cart.item_quantity(coffee.id), 3);
    assert_eq!(cart.lines()[0].product, coffee);

    let summary = cart.checkout_summary(Some(PromoCode::Farm10));
    assert_eq!(summary.discount, Decimal::new(907, 2));
    assert_eq!(summary.total, Decimal::new(8165, 2));

    cart.update_quantity(herbs.id, 0);
    assert!(!cart.is_in_cart(herbs.id));
    cart.clear_cart();

    let reloaded = CartStore::load(FileStorage::new(dir.path()));
    assert!(reloaded.is_empty());
}

#[tokio::test]
async fn corrupt_cart_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::new(dir.path());
    storage.set(CART_STORAGE_KEY, "{ not json").unwrap();

    let cart = CartStore::load(FileStorage::new(dir.path()));
    assert!(cart.is_empty());
    assert_eq!(cart.cart_total(), Decimal::ZERO);
    assert_eq!(storage.get(CART_STORAGE_KEY).unwrap(), None);
}

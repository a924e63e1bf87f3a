//! Fixed catalog loaded at startup in lieu of a database.

use rust_decimal::Decimal;

use farmfresh_common::farmer::{FarmerId, NewFarmer};
use farmfresh_common::product::{NewProduct, ProductCategory};

use crate::store::{MemStore, StoreError};

const IMAGE_PARAMS: &str = "ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=800&h=600";

fn unsplash(photo: &str) -> String {
    format!("https://images.unsplash.com/photo-{photo}?{IMAGE_PARAMS}")
}

fn farmers() -> Vec<NewFarmer> {
    vec![
        NewFarmer {
            name: "Maria Santos".into(),
            location: "Colombia, Huila".into(),
            specialty: "High-altitude coffee cultivation".into(),
            bio: "Specializes in high-altitude coffee cultivation with 30 years of experience.".into(),
            image_url: unsplash("1500648767791-00dcc994a43e"),
            years_experience: Some(30),
        },
        NewFarmer {
            name: "Rajesh Kumar".into(),
            location: "Kerala, India".into(),
            specialty: "Traditional spice farming".into(),
            bio: "Third-generation spice farmer growing cardamom, pepper, and turmeric.".into(),
            image_url: unsplash("1582750433449-648ed127bb54"),
            years_experience: Some(25),
        },
        NewFarmer {
            name: "Chen Wei".into(),
            location: "Yunnan, China".into(),
            specialty: "Ancient grain cultivation".into(),
            bio: "Sustainable grain farmer focusing on ancient varieties and organic methods.".into(),
            image_url: unsplash("1559827260-dc66d52bef19"),
            years_experience: Some(20),
        },
        NewFarmer {
            name: "Sofia Rossi".into(),
            location: "Tuscany, Italy".into(),
            specialty: "Mediterranean herbs".into(),
            bio: "Herbal farmer cultivating Mediterranean herbs using traditional techniques.".into(),
            image_url: unsplash("1594736797933-d0401ba2fe65"),
            years_experience: Some(15),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn product(
    name: &str,
    description: &str,
    price_cents: i64,
    category: ProductCategory,
    photo: &str,
    farmer: u32,
    rating_tenths: i64,
    review_count: u32,
    slug: &str,
) -> NewProduct {
    NewProduct {
        name: name.into(),
        description: description.into(),
        price: Decimal::new(price_cents, 2),
        category,
        image_url: unsplash(photo),
        farmer_id: FarmerId(farmer),
        rating: Some(Decimal::new(rating_tenths, 1)),
        review_count: Some(review_count),
        in_stock: None,
        slug: slug.into(),
    }
}

fn products() -> Vec<NewProduct> {
    use ProductCategory::*;

    vec![
        product(
            "Ethiopian Highland Coffee",
            "Rich, full-bodied coffee with notes of chocolate and citrus",
            2499,
            Coffee,
            "1559056199-641a0ac8b55e",
            1,
            50,
            24,
            "ethiopian-highland-coffee",
        ),
        product(
            "Himalayan Spice Mix",
            "Aromatic blend of traditional mountain spices",
            1850,
            Spices,
            "1596040033229-a9821ebd058d",
            2,
            45,
            18,
            "himalayan-spice-mix",
        ),
        product(
            "Ancient Grain Blend",
            "Nutritious mix of quinoa, amaranth, and millet",
            3200,
            Grains,
            "1574323347407-f5e1ad6d020b",
            3,
            50,
            12,
            "ancient-grain-blend",
        ),
        product(
            "Mediterranean Herbs",
            "Fresh dried herbs from sunny Mediterranean fields",
            1575,
            Herbs,
            "1506905925346-21bda4d32df4",
            4,
            40,
            8,
            "mediterranean-herbs",
        ),
        product(
            "Colombian Single Origin",
            "Premium single-origin coffee beans from high-altitude farms",
            2899,
            Coffee,
            "1447933601403-0c6688de566e",
            1,
            48,
            32,
            "colombian-single-origin",
        ),
        product(
            "Organic Turmeric Powder",
            "Pure, organic turmeric with vibrant color and flavor",
            1250,
            Spices,
            "1615485500704-8e990f9900f7",
            2,
            47,
            15,
            "organic-turmeric-powder",
        ),
    ]
}

/// Load the seed farmers and products into `store`.
pub fn seed(store: &mut MemStore) -> Result<(), StoreError> {
    for farmer in farmers() {
        store.create_farmer(farmer);
    }
    for product in products() {
        store.create_product(product)?;
    }
    Ok(())
}

/// A fresh store holding only the seed data.
pub fn seeded_store() -> Result<MemStore, StoreError> {
    let mut store = MemStore::new();
    seed(&mut store)?;
    Ok(store)
}

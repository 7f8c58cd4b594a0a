//! Database seeder for Mondera development and testing.
//!
//! Seeds a small reference hierarchy (countries with cities, categories
//! with sub-categories) through the lifecycle engine so the seeded rows
//! carry proper translations and audit stamps.
//!
//! Usage: cargo run --bin seeder

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

use mondera_core::TranslationDraft;
use mondera_db::entities::{categories, countries};
use mondera_db::{
    CategoryKind, CityFields, CityKind, CountryKind, MasterRepository, NoFields,
    SubCategoryFields, SubCategoryKind,
};

/// Seed actor id (consistent for all seeds)
const SEED_ACTOR_ID: &str = "00000000-0000-0000-0000-000000000001";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = mondera_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    if already_seeded(&db).await {
        println!("Reference data already present, nothing to do.");
        return;
    }

    println!("Seeding geography...");
    seed_geography(&db).await;

    println!("Seeding categories...");
    seed_categories(&db).await;

    println!("Seeding complete!");
}

fn seed_actor() -> Uuid {
    Uuid::parse_str(SEED_ACTOR_ID).unwrap()
}

fn drafts(pairs: &[(&str, &str)]) -> Vec<TranslationDraft> {
    pairs
        .iter()
        .map(|(lang, name)| TranslationDraft::new(*lang, *name))
        .collect()
}

/// Whether any live reference rows already exist.
async fn already_seeded(db: &DatabaseConnection) -> bool {
    let countries = countries::Entity::find()
        .filter(countries::Column::IsDeleted.eq(false))
        .count(db)
        .await
        .expect("Failed to count countries");
    let categories = categories::Entity::find()
        .filter(categories::Column::IsDeleted.eq(false))
        .count(db)
        .await
        .expect("Failed to count categories");
    countries > 0 || categories > 0
}

/// Seeds two countries with one city each.
async fn seed_geography(db: &DatabaseConnection) {
    let actor = seed_actor();
    let country_repo = MasterRepository::<CountryKind>::new(db.clone());
    let city_repo = MasterRepository::<CityKind>::new(db.clone());

    let germany = country_repo
        .create(
            NoFields,
            drafts(&[("en", "Germany"), ("de", "Deutschland")]),
            actor,
        )
        .await
        .expect("Failed to seed country");
    city_repo
        .create(
            CityFields {
                country_id: germany,
            },
            drafts(&[("en", "Berlin"), ("de", "Berlin")]),
            actor,
        )
        .await
        .expect("Failed to seed city");

    let france = country_repo
        .create(NoFields, drafts(&[("en", "France"), ("fr", "La France")]), actor)
        .await
        .expect("Failed to seed country");
    city_repo
        .create(
            CityFields { country_id: france },
            drafts(&[("en", "Paris"), ("fr", "Paris")]),
            actor,
        )
        .await
        .expect("Failed to seed city");
}

/// Seeds two categories with one sub-category each.
async fn seed_categories(db: &DatabaseConnection) {
    let actor = seed_actor();
    let category_repo = MasterRepository::<CategoryKind>::new(db.clone());
    let sub_category_repo = MasterRepository::<SubCategoryKind>::new(db.clone());

    let food = category_repo
        .create(NoFields, drafts(&[("en", "Food"), ("fr", "Nourriture")]), actor)
        .await
        .expect("Failed to seed category");
    sub_category_repo
        .create(
            SubCategoryFields { category_id: food },
            drafts(&[("en", "Groceries"), ("fr", "Épicerie")]),
            actor,
        )
        .await
        .expect("Failed to seed sub-category");

    let travel = category_repo
        .create(NoFields, drafts(&[("en", "Travel"), ("fr", "Voyage")]), actor)
        .await
        .expect("Failed to seed category");
    sub_category_repo
        .create(
            SubCategoryFields {
                category_id: travel,
            },
            drafts(&[("en", "Flights"), ("fr", "Vols")]),
            actor,
        )
        .await
        .expect("Failed to seed sub-category");
}

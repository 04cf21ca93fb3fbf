//! Database seeder for Triplexa development and testing.
//!
//! Seeds an admin account, a sample agent, city inventory, and a sample
//! lead for local development. The default pricing configuration and
//! transport types come from the initial migration.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use triplexa_core::auth::hash_password;
use triplexa_core::provisioning::{ProvisioningService, SignupMetadata};
use triplexa_db::entities::{hotels, restaurants, sales_leads, sightseeing_options, users};
use triplexa_db::repositories::{AgentRepository, ProfileRepository};

/// Admin user ID (consistent for all seeds)
const ADMIN_USER_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Admin login email
const ADMIN_EMAIL: &str = "admin@triplexa.dev";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = triplexa_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding admin account...");
    seed_admin(&db).await;

    println!("Seeding sample agent...");
    seed_agent(&db).await;

    println!("Seeding hotels...");
    seed_hotels(&db).await;

    println!("Seeding sightseeing options...");
    seed_sightseeing(&db).await;

    println!("Seeding restaurants...");
    seed_restaurants(&db).await;

    println!("Seeding sample lead...");
    seed_lead(&db).await;

    println!("Seeding complete!");
}

fn admin_user_id() -> Uuid {
    Uuid::parse_str(ADMIN_USER_ID).unwrap()
}

/// Seeds the admin user and profile.
async fn seed_admin(db: &DatabaseConnection) {
    if users::Entity::find_by_id(admin_user_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Admin already exists, skipping...");
        return;
    }

    let password_hash = hash_password("triplexa-dev").expect("Failed to hash password");
    let user = users::ActiveModel {
        id: Set(admin_user_id()),
        email: Set(ADMIN_EMAIL.to_string()),
        password_hash: Set(password_hash),
        is_active: Set(true),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    };

    if let Err(e) = user.insert(db).await {
        eprintln!("Failed to insert admin user: {e}");
        return;
    }

    let metadata = SignupMetadata {
        name: Some("Triplexa Admin".to_string()),
        role: Some("admin".to_string()),
        department: Some("management".to_string()),
        ..SignupMetadata::default()
    };
    let seed = ProvisioningService::seed_from_signup(ADMIN_EMAIL, &metadata)
        .expect("Failed to derive admin profile");

    let profiles = ProfileRepository::new(db.clone());
    match profiles.upsert_for_user(admin_user_id(), &seed).await {
        Ok(_) => println!("  Created admin: {ADMIN_EMAIL} (password: triplexa-dev)"),
        Err(e) => eprintln!("Failed to provision admin profile: {e}"),
    }
}

/// Seeds a sample agent with credentials.
async fn seed_agent(db: &DatabaseConnection) {
    let agents = AgentRepository::new(db.clone());

    match agents.find_by_email("agent@sunrise-tours.dev").await {
        Ok(Some(_)) => {
            println!("  Sample agent already exists, skipping...");
            return;
        }
        Ok(None) => {}
        Err(e) => {
            eprintln!("Failed to check sample agent: {e}");
            return;
        }
    }

    let agent = match agents
        .create(
            "Sunrise Tours",
            "Ravi Kumar",
            "agent@sunrise-tours.dev",
            Some("+91-98100-12345"),
            Some("Delhi"),
        )
        .await
    {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Failed to insert sample agent: {e}");
            return;
        }
    };

    let password_hash = hash_password("sunrise-dev").expect("Failed to hash password");
    match agents.set_credentials(agent.id, &password_hash).await {
        Ok(_) => println!("  Created agent: agent@sunrise-tours.dev (password: sunrise-dev)"),
        Err(e) => eprintln!("Failed to set agent credentials: {e}"),
    }
}

/// Seeds sample hotels.
async fn seed_hotels(db: &DatabaseConnection) {
    let samples = [
        ("Jaipur", "Amber Palace Hotel", 4_i16),
        ("Jaipur", "Pink City Residency", 3_i16),
        ("Agra", "Taj View Grand", 5_i16),
    ];

    for (city, name, stars) in samples {
        let exists = hotels::Entity::find()
            .filter(hotels::Column::City.eq(city))
            .filter(hotels::Column::Name.eq(name))
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some();
        if exists {
            continue;
        }

        let hotel = hotels::ActiveModel {
            id: Set(Uuid::new_v4()),
            city: Set(city.to_string()),
            name: Set(name.to_string()),
            star_rating: Set(stars),
            address: Set(None),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = hotel.insert(db).await {
            eprintln!("Failed to insert hotel {name}: {e}");
        } else {
            println!("  Created hotel: {name} ({city})");
        }
    }
}

/// Seeds sample sightseeing options.
async fn seed_sightseeing(db: &DatabaseConnection) {
    let samples = [
        ("Jaipur", "Amber Fort", dec!(500.00), 180_i32),
        ("Jaipur", "City Palace", dec!(700.00), 120_i32),
        ("Agra", "Taj Mahal", dec!(1100.00), 240_i32),
    ];

    for (city, name, cost, duration) in samples {
        let exists = sightseeing_options::Entity::find()
            .filter(sightseeing_options::Column::City.eq(city))
            .filter(sightseeing_options::Column::Name.eq(name))
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some();
        if exists {
            continue;
        }

        let option = sightseeing_options::ActiveModel {
            id: Set(Uuid::new_v4()),
            city: Set(city.to_string()),
            name: Set(name.to_string()),
            description: Set(None),
            ticket_cost: Set(cost),
            currency: Set("INR".to_string()),
            duration_minutes: Set(duration),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = option.insert(db).await {
            eprintln!("Failed to insert sightseeing option {name}: {e}");
        } else {
            println!("  Created sightseeing option: {name} ({city})");
        }
    }
}

/// Seeds sample restaurants.
async fn seed_restaurants(db: &DatabaseConnection) {
    let samples = [
        ("Jaipur", "Spice Court", "Rajasthani", dec!(650.00)),
        ("Agra", "Peshawri", "North Indian", dec!(1200.00)),
    ];

    for (city, name, cuisine, cost) in samples {
        let exists = restaurants::Entity::find()
            .filter(restaurants::Column::City.eq(city))
            .filter(restaurants::Column::Name.eq(name))
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some();
        if exists {
            continue;
        }

        let restaurant = restaurants::ActiveModel {
            id: Set(Uuid::new_v4()),
            city: Set(city.to_string()),
            name: Set(name.to_string()),
            cuisine: Set(Some(cuisine.to_string())),
            meal_type: Set(Some("dinner".to_string())),
            cost_per_person: Set(cost),
            currency: Set("INR".to_string()),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = restaurant.insert(db).await {
            eprintln!("Failed to insert restaurant {name}: {e}");
        } else {
            println!("  Created restaurant: {name} ({city})");
        }
    }
}

/// Seeds a sample lead.
async fn seed_lead(db: &DatabaseConnection) {
    let exists = sales_leads::Entity::find()
        .filter(sales_leads::Column::CustomerName.eq("Meera Nair"))
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some();
    if exists {
        println!("  Sample lead already exists, skipping...");
        return;
    }

    let lead = sales_leads::ActiveModel {
        id: Set(Uuid::new_v4()),
        customer_name: Set("Meera Nair".to_string()),
        customer_phone: Set(Some("+91-98450-11111".to_string())),
        customer_email: Set(Some("meera@example.com".to_string())),
        source: Set(Some("website".to_string())),
        destination: Set(Some("Rajasthan".to_string())),
        travel_start: Set(None),
        travel_end: Set(None),
        adults: Set(2),
        children: Set(1),
        status: Set(triplexa_db::entities::sea_orm_active_enums::LeadStatus::New),
        assigned_to: Set(None),
        notes: Set(Some("Interested in a 6-day golden triangle package".to_string())),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    };

    if let Err(e) = lead.insert(db).await {
        eprintln!("Failed to insert sample lead: {e}");
    } else {
        println!("  Created sample lead: Meera Nair");
    }
}

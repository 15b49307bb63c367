//! Database seeder for EduLink development and testing.
//!
//! Seeds the admin account plus one verified school, donor and volunteer,
//! and a sample donation and supply request so the public feeds are not
//! empty on a fresh database.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use edulink_core::auth::hash_password;
use edulink_db::entities::{
    accounts, donations,
    sea_orm_active_enums::{
        AccountRole, ApprovalStatus, DonationType, RequestCategory, RequestUrgency,
    },
    supply_requests,
};

/// Admin account ID (consistent for all seeds)
const ADMIN_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Demo school account ID
const SCHOOL_ID: &str = "00000000-0000-0000-0000-000000000002";
/// Demo donor account ID
const DONOR_ID: &str = "00000000-0000-0000-0000-000000000003";
/// Demo volunteer account ID
const VOLUNTEER_ID: &str = "00000000-0000-0000-0000-000000000004";
/// Demo donation ID
const DONATION_ID: &str = "00000000-0000-0000-0000-000000000005";
/// Demo supply request ID
const REQUEST_ID: &str = "00000000-0000-0000-0000-000000000006";

/// Password for every seeded account. Development only.
const SEED_PASSWORD: &str = "password123";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = edulink_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding admin account...");
    seed_admin(&db).await;

    println!("Seeding demo school...");
    seed_school(&db).await;

    println!("Seeding demo donor...");
    seed_donor(&db).await;

    println!("Seeding demo volunteer...");
    seed_volunteer(&db).await;

    println!("Seeding demo donation...");
    seed_donation(&db).await;

    println!("Seeding demo supply request...");
    seed_supply_request(&db).await;

    println!("Seeding complete!");
}

fn id(value: &str) -> Uuid {
    Uuid::parse_str(value).unwrap()
}

async fn account_exists(db: &DatabaseConnection, account_id: Uuid) -> bool {
    accounts::Entity::find_by_id(account_id)
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
}

/// Seeds the platform admin account.
async fn seed_admin(db: &DatabaseConnection) {
    if account_exists(db, id(ADMIN_ID)).await {
        println!("  Admin account already exists, skipping...");
        return;
    }

    let now = Utc::now();
    let admin = accounts::ActiveModel {
        id: Set(id(ADMIN_ID)),
        name: Set("Platform Admin".to_string()),
        email: Set("admin@edulink.lk".to_string()),
        password_hash: Set(hash_password(SEED_PASSWORD).expect("Failed to hash password")),
        role: Set(AccountRole::Admin),
        status: Set(ApprovalStatus::Verified),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    if let Err(e) = admin.insert(db).await {
        eprintln!("Failed to insert admin account: {e}");
    } else {
        println!("  Created admin account: admin@edulink.lk");
    }
}

/// Seeds a verified school with a completed profile.
async fn seed_school(db: &DatabaseConnection) {
    if account_exists(db, id(SCHOOL_ID)).await {
        println!("  Demo school already exists, skipping...");
        return;
    }

    let now = Utc::now();
    let school = accounts::ActiveModel {
        id: Set(id(SCHOOL_ID)),
        name: Set("Nimal Perera".to_string()),
        email: Set("school@edulink.lk".to_string()),
        password_hash: Set(hash_password(SEED_PASSWORD).expect("Failed to hash password")),
        role: Set(AccountRole::School),
        status: Set(ApprovalStatus::Verified),
        school_name: Set(Some("Galle Central College".to_string())),
        school_reg_no: Set(Some("SCH-2019-0042".to_string())),
        school_type: Set(Some("government".to_string())),
        province: Set(Some("Southern".to_string())),
        district: Set(Some("Galle".to_string())),
        address: Set(Some("12 Wakwella Road, Galle".to_string())),
        school_contact: Set(Some("+94 91 222 3344".to_string())),
        school_email: Set(Some("office@gallecentral.lk".to_string())),
        principal_name: Set(Some("K. Wijesinghe".to_string())),
        principal_contact: Set(Some("+94 77 111 2233".to_string())),
        verifying_authority: Set(Some("Southern Provincial Education Office".to_string())),
        authority_contact: Set(Some("+94 91 555 6677".to_string())),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    if let Err(e) = school.insert(db).await {
        eprintln!("Failed to insert demo school: {e}");
    } else {
        println!("  Created demo school: school@edulink.lk");
    }
}

/// Seeds a verified donor with a completed profile.
async fn seed_donor(db: &DatabaseConnection) {
    if account_exists(db, id(DONOR_ID)).await {
        println!("  Demo donor already exists, skipping...");
        return;
    }

    let now = Utc::now();
    let donor = accounts::ActiveModel {
        id: Set(id(DONOR_ID)),
        name: Set("Amara Fernando".to_string()),
        email: Set("donor@edulink.lk".to_string()),
        password_hash: Set(hash_password(SEED_PASSWORD).expect("Failed to hash password")),
        role: Set(AccountRole::Donor),
        status: Set(ApprovalStatus::Verified),
        organization_name: Set(Some("Lanka Book Trust".to_string())),
        registration_number: Set(Some("NGO-2015-118".to_string())),
        organization_type: Set(Some("ngo".to_string())),
        contact_number: Set(Some("+94 11 234 5678".to_string())),
        representative_name: Set(Some("Amara Fernando".to_string())),
        representative_position: Set(Some("Programme Director".to_string())),
        representative_email: Set(Some("amara@lankabooktrust.lk".to_string())),
        representative_phone: Set(Some("+94 71 888 9900".to_string())),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    if let Err(e) = donor.insert(db).await {
        eprintln!("Failed to insert demo donor: {e}");
    } else {
        println!("  Created demo donor: donor@edulink.lk");
    }
}

/// Seeds a verified volunteer with a completed profile.
async fn seed_volunteer(db: &DatabaseConnection) {
    if account_exists(db, id(VOLUNTEER_ID)).await {
        println!("  Demo volunteer already exists, skipping...");
        return;
    }

    let now = Utc::now();
    let volunteer = accounts::ActiveModel {
        id: Set(id(VOLUNTEER_ID)),
        name: Set("Kasun Silva".to_string()),
        email: Set("volunteer@edulink.lk".to_string()),
        password_hash: Set(hash_password(SEED_PASSWORD).expect("Failed to hash password")),
        role: Set(AccountRole::Volunteer),
        status: Set(ApprovalStatus::Verified),
        full_name: Set(Some("Kasun Silva".to_string())),
        contact_number: Set(Some("+94 76 555 0101".to_string())),
        address: Set(Some("45 Temple Road, Matara".to_string())),
        vehicle_type: Set(Some("van".to_string())),
        availability: Set(Some("weekends".to_string())),
        skills: Set(Some("driving, heavy lifting".to_string())),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    if let Err(e) = volunteer.insert(db).await {
        eprintln!("Failed to insert demo volunteer: {e}");
    } else {
        println!("  Created demo volunteer: volunteer@edulink.lk");
    }
}

/// Seeds one verified donation from the demo donor.
async fn seed_donation(db: &DatabaseConnection) {
    if donations::Entity::find_by_id(id(DONATION_ID))
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Demo donation already exists, skipping...");
        return;
    }

    let now = Utc::now();
    let donation = donations::ActiveModel {
        id: Set(id(DONATION_ID)),
        donor_id: Set(id(DONOR_ID)),
        organization_name: Set("Lanka Book Trust".to_string()),
        contact_person: Set("Amara Fernando".to_string()),
        email: Set("amara@lankabooktrust.lk".to_string()),
        phone: Set("+94 71 888 9900".to_string()),
        donation_type: Set(DonationType::Books),
        purpose: Set("Library restock for rural schools".to_string()),
        description: Set("500 English and Sinhala readers, grades 6 to 11".to_string()),
        estimated_amount: Set("250000".to_string()),
        image_url: Set(None),
        status: Set(ApprovalStatus::Verified),
        rejection_reason: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };

    if let Err(e) = donation.insert(db).await {
        eprintln!("Failed to insert demo donation: {e}");
    } else {
        println!("  Created demo donation: Library restock for rural schools");
    }
}

/// Seeds one verified supply request from the demo school.
async fn seed_supply_request(db: &DatabaseConnection) {
    if supply_requests::Entity::find_by_id(id(REQUEST_ID))
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Demo supply request already exists, skipping...");
        return;
    }

    let now = Utc::now();
    let request = supply_requests::ActiveModel {
        id: Set(id(REQUEST_ID)),
        school_id: Set(id(SCHOOL_ID)),
        school_name: Set("Galle Central College".to_string()),
        contact_person: Set("K. Wijesinghe".to_string()),
        contact_email: Set("office@gallecentral.lk".to_string()),
        contact_phone: Set("+94 91 222 3344".to_string()),
        category: Set(RequestCategory::DigitalDevices),
        title: Set("Tablets for the grade 10 ICT lab".to_string()),
        description: Set("The lab shares four ageing desktops between forty students".to_string()),
        quantity: Set("20".to_string()),
        urgency: Set(RequestUrgency::High),
        location: Set("Galle".to_string()),
        principal_letter: Set(None),
        status: Set(ApprovalStatus::Verified),
        rejection_reason: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };

    if let Err(e) = request.insert(db).await {
        eprintln!("Failed to insert demo supply request: {e}");
    } else {
        println!("  Created demo supply request: Tablets for the grade 10 ICT lab");
    }
}

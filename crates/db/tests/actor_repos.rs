//! Integration tests for the user and captain repositories.

use assert_matches::assert_matches;
use ryde_db::models::captain::CreateCaptain;
use ryde_db::models::user::CreateUser;
use ryde_db::repositories::{CaptainRepo, UserRepo};
use sqlx::PgPool;

fn sample_user(email: &str) -> CreateUser {
    CreateUser {
        first_name: "Asha".to_string(),
        last_name: "Verma".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$placeholder-hash".to_string(),
    }
}

fn sample_captain(email: &str, plate: &str) -> CreateCaptain {
    CreateCaptain {
        first_name: "Ravi".to_string(),
        last_name: "Kumar".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$placeholder-hash".to_string(),
        status: "unavailable".to_string(),
        vehicle_color: "black".to_string(),
        vehicle_plate: plate.to_string(),
        vehicle_capacity: 4,
        vehicle_type: "car".to_string(),
    }
}

#[sqlx::test]
async fn create_and_find_user(pool: PgPool) {
    let user = UserRepo::create(&pool, &sample_user("a@x.com")).await.unwrap();

    let found = UserRepo::find_by_id(&pool, user.id)
        .await
        .unwrap()
        .expect("user should exist");
    assert_eq!(found.email, "a@x.com");
    assert_eq!(found.first_name, "Asha");
}

#[sqlx::test]
async fn credential_is_only_exposed_on_demand(pool: PgPool) {
    let user = UserRepo::create(&pool, &sample_user("a@x.com")).await.unwrap();

    let row = UserRepo::find_by_email_with_password(&pool, "a@x.com")
        .await
        .unwrap()
        .expect("user should exist");
    assert_eq!(row.user.id, user.id);
    assert_eq!(row.password_hash, "$argon2id$placeholder-hash");

    assert!(UserRepo::find_by_email_with_password(&pool, "ghost@x.com")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test]
async fn duplicate_user_email_names_its_constraint(pool: PgPool) {
    UserRepo::create(&pool, &sample_user("dup@x.com")).await.unwrap();

    let err = UserRepo::create(&pool, &sample_user("dup@x.com"))
        .await
        .expect_err("second insert must conflict");
    assert_matches!(&err, sqlx::Error::Database(db_err) => {
        assert_eq!(db_err.constraint(), Some("uq_users_email"));
    });
}

#[sqlx::test]
async fn create_and_find_captain(pool: PgPool) {
    let captain = CaptainRepo::create(&pool, &sample_captain("c@x.com", "ABC123"))
        .await
        .unwrap();
    assert_eq!(captain.status, "unavailable");

    let found = CaptainRepo::find_by_id(&pool, captain.id)
        .await
        .unwrap()
        .expect("captain should exist");
    assert_eq!(found.vehicle_plate, "ABC123");
    assert_eq!(found.vehicle_capacity, 4);
}

#[sqlx::test]
async fn duplicate_captain_email_names_its_constraint(pool: PgPool) {
    CaptainRepo::create(&pool, &sample_captain("dup@x.com", "AAA111"))
        .await
        .unwrap();

    let err = CaptainRepo::create(&pool, &sample_captain("dup@x.com", "BBB222"))
        .await
        .expect_err("second insert must conflict");
    assert_matches!(&err, sqlx::Error::Database(db_err) => {
        assert_eq!(db_err.constraint(), Some("uq_captains_email"));
    });
}

#[sqlx::test]
async fn duplicate_plate_names_its_constraint(pool: PgPool) {
    CaptainRepo::create(&pool, &sample_captain("one@x.com", "ABC123"))
        .await
        .unwrap();

    let err = CaptainRepo::create(&pool, &sample_captain("two@x.com", "ABC123"))
        .await
        .expect_err("second insert must conflict");
    assert_matches!(&err, sqlx::Error::Database(db_err) => {
        assert_eq!(db_err.constraint(), Some("uq_captains_vehicle_plate"));
    });
}

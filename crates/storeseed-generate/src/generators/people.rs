use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, SecondaryAddress, StreetName, ZipCode};
use fake::faker::internet::en::{Password, SafeEmail};
use fake::faker::name::en::{FirstName, LastName};
use rand::RngCore;
use sha2::{Digest, Sha256};

use storeseed_core::Client;

use super::RecordFaker;

/// Confirmed clients with a random UUID id, a login equal to the email and
/// upper-cased normalized copies of both.
pub fn client_faker() -> RecordFaker<Client> {
    RecordFaker::new()
        .rule("id", |rng, client: &mut Client| client.id = random_uuid(rng))
        .rule("first_name", |rng, client| {
            client.first_name = FirstName().fake_with_rng(rng);
        })
        .rule("last_name", |rng, client| {
            client.last_name = LastName().fake_with_rng(rng);
        })
        .rule("email", |rng, client| client.email = SafeEmail().fake_with_rng(rng))
        .rule("password_hash", |rng, client| {
            let password: String = Password(8..17).fake_with_rng(rng);
            client.password_hash = hash_password(&password);
        })
        .rule("user_name", |_, client| client.user_name = client.email.clone())
        .rule("normalized_email", |_, client| {
            client.normalized_email = client.email.to_uppercase();
        })
        .rule("normalized_user_name", |_, client| {
            client.normalized_user_name = client.user_name.to_uppercase();
        })
        .rule("email_confirmed", |_, client| client.email_confirmed = true)
        .rule("address", |rng, client| {
            let address = &mut client.address;
            address.street = StreetName().fake_with_rng(rng);
            address.building_number = BuildingNumber().fake_with_rng(rng);
            address.apartment_number = SecondaryAddress().fake_with_rng(rng);
            address.postal_code = ZipCode().fake_with_rng(rng);
            address.locality = CityName().fake_with_rng(rng);
        })
}

fn random_uuid(rng: &mut dyn RngCore) -> String {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    uuid::Builder::from_random_bytes(bytes)
        .into_uuid()
        .to_string()
}

fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

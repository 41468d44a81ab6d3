//! End-to-end walkthrough of one room: four participants register,
//! the chair sorts, and everyone exchanges addresses, all through the
//! opaque blobs the bulletin board would store.
//!
//! Run with: `cargo run --example santa_round_trip`

use cryptosanta::{protocol, GiftAddress, GroupParams, Keypair};
use rand::rngs::OsRng;

fn main() -> Result<(), cryptosanta::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let params = GroupParams::modp_2048();

    // The chair opens the room with a session keypair; registrations
    // are encrypted under its public half.
    let session = Keypair::generate(&params, &mut OsRng)?;
    println!("room open, session key published");

    let names = ["alva", "ben", "cleo", "dmitri"];
    let people: Vec<Keypair> = names
        .iter()
        .map(|_| Keypair::generate(&params, &mut OsRng))
        .collect::<Result<_, _>>()?;

    // Registration phase: each participant posts an encrypted blob.
    let registrations: Vec<_> = people
        .iter()
        .map(|kp| protocol::register(&params, &session.public_key, &kp.public_key, &mut OsRng))
        .collect::<Result<_, _>>()?;
    println!("{} registrations posted", registrations.len());

    // Sort phase: chair decrypts, sorts, publishes.
    let sorted = protocol::sort_registrations(&params, &session.private_key, &registrations)?;
    println!("chair published the sorted cycle of {} keys", sorted.len());

    // Address exchange: everyone seals their address for their santa.
    let mut posted = Vec::new();
    for (name, kp) in names.iter().zip(&people) {
        let mine = protocol::my_assignment(&sorted, &kp.public_key).expect("registered in time");
        let address = GiftAddress {
            name: (*name).into(),
            address: format!("{name}'s chimney, North Pole"),
            note: None,
        };
        posted.push(protocol::seal_address(&params, &mine.santa, &address, &mut OsRng)?);
    }
    println!("{} sealed addresses posted", posted.len());

    // Everyone scans the board for the one blob that opens.
    for (name, kp) in names.iter().zip(&people) {
        let opened =
            protocol::open_addressed_to_me(&params, kp, &posted).expect("exactly one blob opens");
        println!("{name} ships a gift to: {} ({})", opened.name, opened.address);
    }

    Ok(())
}

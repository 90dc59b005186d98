mod chat_interface;
mod client;
mod display;
mod lobby_interface;

use clap::Parser;
use rand::{Rng, rng, seq::IndexedRandom};
use shared::RELAY_PORT;

use crate::client::Client;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, long)]
    username: Option<String>,

    #[arg(short, long, default_value = "127.0.0.1")]
    server_address: String,

    #[arg(short, long, default_value_t = RELAY_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let username = match args.username {
        Some(username) => username,
        None => generate_username(),
    };

    let server_addr = format!("{}:{}", args.server_address, args.port);

    if let Err(e) = Client::run(&server_addr, &username).await {
        eprintln!("{}", e);
    }
}

fn generate_username() -> String {
    let adjectives = ["quiet", "chatty", "swift", "mellow", "bright"];
    let nouns = ["otter", "heron", "badger", "lynx", "finch"];

    let mut rng = rng();

    let adjective = adjectives.choose(&mut rng).unwrap();
    let noun = nouns.choose(&mut rng).unwrap();
    let number: u16 = rng.random_range(1..9999);

    format!("{}-{}{}", adjective, noun, number)
}

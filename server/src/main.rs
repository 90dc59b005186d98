use log::{error, info};
use shared::RELAY_PORT;

use clap::Parser;

use server::relay::RelayServer;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    #[arg(short, long, default_value_t = RELAY_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let addr = format!("{}:{}", args.host, args.port);

    let relay = match RelayServer::bind(addr.clone()).await {
        Ok(relay) => relay,
        Err(e) => {
            error!("Error binding: {}", e);
            return;
        }
    };

    info!("Relay server is running on {}", addr);

    match relay.listen().await {
        Ok(_) => (),
        Err(e) => {
            error!("{}", e);
            return;
        }
    };
}

//! Escrow client CLI
//!
//! Command-line front end for the escrow client library: offer lookup and
//! address derivation, plus native and token transfers signed with a keypair
//! from the configured env var.

use escrow_client::{EscrowClient, EscrowConfig, KeypairSigner, OfferStatus};
use solana_sdk::pubkey::Pubkey;
use std::{collections::HashMap, env, error::Error, str::FromStr};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(error) = run().await {
        eprintln!("[escrow-cli] Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        print_usage();
        return Ok(());
    }

    let command = args[0].as_str();
    let options = parse_options(&args[1..])?;

    let config = EscrowConfig::load_from_path(options.get("config").map(String::as_str))?;
    let client = EscrowClient::new(&config)?;

    match command {
        "lookup-offer" => handle_lookup_offer(&client, &options).await,
        "offer-address" => handle_offer_address(&client, &options),
        "send-sol" => handle_send_sol(&client, &config, &options).await,
        "send-token" => handle_send_token(&client, &config, &options).await,
        "take-offer" => handle_take_offer(&client, &options).await,
        _ => {
            print_usage();
            Ok(())
        }
    }
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

async fn handle_lookup_offer(
    client: &EscrowClient,
    options: &HashMap<String, String>,
) -> Result<(), Box<dyn Error>> {
    let maker = required_option(options, "maker")?;
    let offer_id = required_option(options, "offer-id")?;

    match client.lookup_offer(maker, offer_id).await? {
        OfferStatus::Live(view) => {
            println!("Offer is live");
            println!("Offer address: {}", view.offer_address);
            println!("Vault: {}", view.vault);
            println!("Asset offered: {}", view.token_mint_a);
            println!("Amount offered: {}", view.token_a_offered_amount);
            println!("Asset wanted: {}", view.token_mint_b);
            println!("Amount wanted: {}", view.token_b_wanted_amount);
        }
        OfferStatus::AlreadySettled(view) => {
            println!("Offer {} was already taken (vault drained)", view.offer_address);
        }
        OfferStatus::NotFound => {
            println!("No offer found for this maker and id");
        }
    }
    Ok(())
}

fn handle_offer_address(
    client: &EscrowClient,
    options: &HashMap<String, String>,
) -> Result<(), Box<dyn Error>> {
    let maker = parse_pubkey(required_option(options, "maker")?)?;
    let offer_id: u64 = required_option(options, "offer-id")?.parse()?;

    let (address, bump) = client.offer_address(&maker, offer_id);
    println!("Offer address: {address}");
    println!("Bump: {bump}");
    Ok(())
}

async fn handle_send_sol(
    client: &EscrowClient,
    config: &EscrowConfig,
    options: &HashMap<String, String>,
) -> Result<(), Box<dyn Error>> {
    let recipient = required_option(options, "recipient")?;
    let amount: f64 = required_option(options, "amount")?.parse()?;

    let signer = KeypairSigner::from_env(&config.signer_key_env)?;
    let signature = client.send_native(&signer, recipient, amount).await?;
    println!("Transfer signature: {signature}");
    Ok(())
}

async fn handle_send_token(
    client: &EscrowClient,
    config: &EscrowConfig,
    options: &HashMap<String, String>,
) -> Result<(), Box<dyn Error>> {
    let mint = required_option(options, "mint")?;
    let recipient = required_option(options, "recipient")?;
    let amount: f64 = required_option(options, "amount")?.parse()?;
    let decimals: u8 = required_option(options, "decimals")?.parse()?;

    let signer = KeypairSigner::from_env(&config.signer_key_env)?;
    let signature = client
        .send_token(&signer, mint, recipient, amount, decimals)
        .await?;
    println!("Transfer signature: {signature}");
    Ok(())
}

async fn handle_take_offer(
    client: &EscrowClient,
    options: &HashMap<String, String>,
) -> Result<(), Box<dyn Error>> {
    let maker = parse_pubkey(required_option(options, "maker")?)?;
    let offer = parse_pubkey(required_option(options, "offer")?)?;
    let mint_a = parse_pubkey(required_option(options, "mint-a")?)?;
    let mint_b = parse_pubkey(required_option(options, "mint-b")?)?;

    match client.take_offer(&maker, &offer, &mint_a, &mint_b).await {
        Ok(signature) => println!("Take signature: {signature}"),
        Err(error) => println!("{error}"),
    }
    Ok(())
}

// ============================================================================
// LOCAL HELPERS
// ============================================================================

fn parse_options(args: &[String]) -> Result<HashMap<String, String>, Box<dyn Error>> {
    let mut options = HashMap::new();
    let mut index = 0;
    while index < args.len() {
        let key = args[index]
            .strip_prefix("--")
            .ok_or_else(|| format!("Expected --option, got '{}'", args[index]))?;
        let value = args
            .get(index + 1)
            .ok_or_else(|| format!("Missing value for --{key}"))?;
        options.insert(key.to_string(), value.clone());
        index += 2;
    }
    Ok(options)
}

fn required_option<'a>(
    options: &'a HashMap<String, String>,
    key: &str,
) -> Result<&'a String, Box<dyn Error>> {
    options
        .get(key)
        .ok_or_else(|| format!("Missing required option --{key}").into())
}

fn parse_pubkey(value: &str) -> Result<Pubkey, Box<dyn Error>> {
    Ok(Pubkey::from_str(value)?)
}

// ============================================================================
// USAGE
// ============================================================================

fn print_usage() {
    eprintln!(
        r#"Escrow Client CLI

Usage:
  escrow-cli <command> [--option value]...

Commands:
  lookup-offer   --maker <pubkey> --offer-id <u64> [--config <path>]
  offer-address  --maker <pubkey> --offer-id <u64> [--config <path>]
  send-sol       --recipient <pubkey> --amount <sol> [--config <path>]
  send-token     --mint <pubkey> --recipient <pubkey> --amount <tokens>
                 --decimals <u8> [--config <path>]
  take-offer     --maker <pubkey> --offer <pubkey> --mint-a <pubkey>
                 --mint-b <pubkey> [--config <path>]

The signer keypair for send commands is read from the env var named by
signer_key_env in the config (base58-encoded 64-byte private key).
        "#
    );
}

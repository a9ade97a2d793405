//! # RecordKV Demo
//!
//! Purpose: Walk through the typed store against a live Redis-compatible
//! server: ping, scalar writes and reads, a missing key, and a user record.
//!
//! Usage: `rkv-demo [addr] [max_idle] [max_total]`
//!
//! Each step runs independently; a failing step is reported and the rest
//! still run. Set `RUST_LOG=debug` to see every command issued.

use std::env;

use anyhow::{Context, Result};
use rkv_client::{ClientConfig, KVClient};
use rkv_store::{Lookup, Namespace, TypedStore, UserProfile};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "127.0.0.1:6379";
const DEFAULT_MAX_IDLE: usize = 10;
const DEFAULT_MAX_TOTAL: usize = 12_000;

fn config_from_args() -> ClientConfig {
    let mut args = env::args().skip(1);
    ClientConfig {
        addr: args.next().unwrap_or_else(|| DEFAULT_ADDR.to_string()),
        max_idle: parse_usize("max_idle", args.next(), DEFAULT_MAX_IDLE),
        max_total: parse_usize("max_total", args.next(), DEFAULT_MAX_TOTAL),
        ..ClientConfig::default()
    }
}

fn parse_usize(name: &str, value: Option<String>, fallback: usize) -> usize {
    let Some(raw) = value else {
        return fallback;
    };
    match raw.parse() {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(argument = name, value = %raw, error = %err, fallback, "ignoring invalid argument");
            fallback
        }
    }
}

fn ping(client: &KVClient) -> Result<()> {
    let pong = client.ping(None).context("PING failed")?;
    println!("PING Response = {}", String::from_utf8_lossy(&pong));
    Ok(())
}

fn set_scalars(store: &TypedStore) -> Result<()> {
    store.put_scalar("Favorite Movie", "Repo Man")?;
    store.put_scalar("Release Year", &1984_i64)?;
    Ok(())
}

fn get_scalars(store: &TypedStore) -> Result<()> {
    let key = "Favorite Movie";
    match store.get_scalar::<String>(key)? {
        Lookup::Found(movie) => println!("{key} = {movie}"),
        Lookup::Absent => println!("{key} does not exist"),
    }

    let key = "Release Year";
    match store.get_scalar::<i64>(key)? {
        Lookup::Found(year) => println!("{key} = {year}"),
        Lookup::Absent => println!("{key} does not exist"),
    }

    let key = "Nonexistent Key";
    match store.get_scalar::<String>(key)? {
        Lookup::Found(value) => println!("{key} = {value}"),
        Lookup::Absent => println!("{key} does not exist"),
    }
    Ok(())
}

fn set_user(store: &TypedStore) -> Result<()> {
    let user = UserProfile {
        username: "coderminer.com".to_string(),
        mobile_id: "12345678941".to_string(),
        email: "kevin@163.com".to_string(),
        first_name: "coderminer.com".to_string(),
        last_name: "coderminer.com".to_string(),
    };
    store
        .put_record(&Namespace::USER, user.identity(), &user)
        .context("storing user record")
}

fn get_user(store: &TypedStore) -> Result<()> {
    let username = "coderminer.com";
    match store
        .get_record::<UserProfile>(&Namespace::USER, username)
        .context("loading user record")?
    {
        Lookup::Found(user) => println!("{user:#?}"),
        Lookup::Absent => println!("User does not exist"),
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config_from_args();
    info!(addr = %config.addr, max_idle = config.max_idle, max_total = config.max_total, "starting demo");
    let pool = config.build_pool().context("building connection pool")?;
    let client = KVClient::with_pool(pool.clone());
    let store = TypedStore::new(pool);

    let steps: [(&str, &dyn Fn() -> Result<()>); 5] = [
        ("ping", &|| ping(&client)),
        ("set", &|| set_scalars(&store)),
        ("get", &|| get_scalars(&store)),
        ("set user", &|| set_user(&store)),
        ("get user", &|| get_user(&store)),
    ];
    for (name, step) in steps {
        if let Err(err) = step() {
            error!(step = name, "{err:#}");
        }
    }

    Ok(())
}

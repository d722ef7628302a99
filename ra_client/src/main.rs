//! Example client for the remote authentication server.
//!
//! Walks the whole flow: register an account, log in for a session
//! token, call the protected resource with it, then wipe the database.

use anyhow::{Context, Result};
use pico_args::Arguments;

mod api_client;

use api_client::ApiClient;

const HELP: &str = "\
Drive the remote authentication server through a full session

USAGE:
  ra_client [OPTIONS]

OPTIONS:
  --server URL          Server URL  [default: http://localhost:50051]
  --email EMAIL         Account email  [default: test@example.com]
  --username NAME       Account username  [default: testuser]
  --password PASS       Account password  [default: testpassword]

FLAGS:
  -h, --help            Print help information
";

struct Args {
    server_url: String,
    email: String,
    username: String,
    password: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        server_url: pargs
            .value_from_str("--server")
            .unwrap_or_else(|_| "http://localhost:50051".to_string()),
        email: pargs
            .value_from_str("--email")
            .unwrap_or_else(|_| "test@example.com".to_string()),
        username: pargs
            .value_from_str("--username")
            .unwrap_or_else(|_| "testuser".to_string()),
        password: pargs
            .value_from_str("--password")
            .unwrap_or_else(|_| "testpassword".to_string()),
    };

    run(args).await
}

async fn run(args: Args) -> Result<()> {
    let mut client = ApiClient::new(args.server_url);

    // Try to register a new account; an existing one is fine, we log in
    // with it below.
    match client
        .register(&args.email, &args.username, &args.password)
        .await
    {
        Ok(message) => println!("{message}"),
        Err(e) => println!("Error: {e}"),
    }

    // Log in with the registered account
    let token = client
        .login(&args.email, &args.password)
        .await
        .context("Failed to log in")?;
    println!("Token: {token}");

    // Access the protected resource
    let message = client
        .access_protected()
        .await
        .context("Failed to access protected resource")?;
    println!("{message}");

    // Clean up the database after tests
    client.cleanup().await.context("Cleanup failed")?;
    println!("Database cleaned up.");

    Ok(())
}

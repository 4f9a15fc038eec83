//! List servers and flavors for an account.
//!
//! Credentials come from the environment:
//!
//! ```text
//! ECLOUD_USER_ID=... ECLOUD_PASSWORD=... ECLOUD_TENANT_ID=... \
//!     cargo run --example list_servers
//! ```

use anyhow::Context;
use ecloud_compute::ComputeClient;
use ecloud_core::Client;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let user_id = std::env::var("ECLOUD_USER_ID").context("ECLOUD_USER_ID is not set")?;
    let password = std::env::var("ECLOUD_PASSWORD").context("ECLOUD_PASSWORD is not set")?;
    let tenant_id = std::env::var("ECLOUD_TENANT_ID").context("ECLOUD_TENANT_ID is not set")?;
    let region = std::env::var("ECLOUD_REGION").unwrap_or_else(|_| "c3j1".to_string());

    let client = Client::builder().region(region).build();
    let token = client.authenticate(&user_id, &password, &tenant_id).await?;
    println!("authenticated; token expires at {}", token.expires_at);

    let compute = ComputeClient::new(&client);

    println!("\nflavors:");
    for flavor in compute.list_flavors_detail().await? {
        println!("  {} ({} vCPU / {} MiB)", flavor.name, flavor.vcpus, flavor.ram);
    }

    println!("\nservers:");
    for server in compute.list_servers_detail(None).await? {
        println!("  {} [{}] {}", server.id, server.status, server.name);
    }

    Ok(())
}

//! List the pools of the cluster named by `CEPH_CONF`
//!
//! Run with: RUST_LOG=debug cargo run --example list_pools --features librados

use rados_pools::{Librados, Session, SessionConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = SessionConfig::from_env();
    let mut session = Session::configure(Librados, &config)?;
    session.connect()?;
    println!("librados {}", session.version());

    for pool in session.list_pools()? {
        println!("{:?}", pool);
    }

    session.shutdown();
    Ok(())
}

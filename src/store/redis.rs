//! Redis Store Module
//!
//! [`Store`] implementation backed by a real Redis server through a
//! multiplexed connection manager.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tracing::info;

use super::Store;
use crate::config::RedisConfig;
use crate::error::Result;

// == Redis Store ==
/// Store backed by a Redis server.
///
/// Holds a [`ConnectionManager`], which multiplexes commands over one
/// connection and reconnects on failure. Clones share the manager, so a
/// `RedisStore` can be cloned freely across tasks.
#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
}

impl RedisStore {
    // == Constructor ==
    /// Connects to the Redis server described by `config`.
    pub async fn connect(config: &RedisConfig) -> Result<Self> {
        let client = Client::open(config.connection_url())?;
        let connection = ConnectionManager::new(client).await?;

        info!("connected to redis at {}:{}", config.host, config.port);

        Ok(Self { connection })
    }

    // == Ping ==
    /// Round-trips a PING to verify the connection is alive.
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.connection.clone();
        redis::cmd("PING").query_async::<()>(&mut conn).await?;
        Ok(())
    }
}

// == Store Implementation ==
#[async_trait]
impl Store for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.connection.clone();
        let raw: Option<Vec<u8>> = conn.get(key).await?;
        Ok(raw)
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut conn = self.connection.clone();
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn expire(&self, key: &str, seconds: u64) -> Result<()> {
        let mut conn = self.connection.clone();
        let _: bool = conn.expire(key, seconds as i64).await?;
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<()> {
        let mut conn = self.connection.clone();
        let _: i64 = conn.del(key).await?;
        Ok(())
    }

    async fn scan(
        &self,
        cursor: u64,
        pattern: &str,
        count: Option<usize>,
    ) -> Result<(u64, Vec<String>)> {
        let mut conn = self.connection.clone();

        let mut cmd = redis::cmd("SCAN");
        cmd.arg(cursor).arg("MATCH").arg(pattern);
        if let Some(hint) = count {
            cmd.arg("COUNT").arg(hint);
        }

        let (next, keys): (u64, Vec<String>) = cmd.query_async(&mut conn).await?;
        Ok((next, keys))
    }

    async fn hset_many(&self, key: &str, fields: &[(String, String)]) -> Result<()> {
        let mut conn = self.connection.clone();
        let _: () = conn.hset_multiple(key, fields).await?;
        Ok(())
    }
}

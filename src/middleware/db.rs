use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use sqlx::{pool::PoolConnection, PgConnection, Postgres};
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex};

use crate::app::AppState;
use crate::error::ApiError;

/// One pooled connection for the lifetime of a request.
///
/// The connection goes back to the pool when the handler returns, on success and on error.
pub struct DbConn(pub PoolConnection<Postgres>);

/// Connection already acquired by the auth middleware, parked in the request extensions
/// until the handler's [`DbConn`] picks it up.
#[derive(Clone)]
pub struct RequestConnection(Arc<Mutex<Option<PoolConnection<Postgres>>>>);

impl RequestConnection {
    pub fn new(conn: PoolConnection<Postgres>) -> Self {
        Self(Arc::new(Mutex::new(Some(conn))))
    }

    /// Hand the connection out once; later calls get `None`.
    pub fn take(&self) -> Option<PoolConnection<Postgres>> {
        self.0.lock().ok().and_then(|mut slot| slot.take())
    }
}

#[async_trait]
impl FromRequestParts<AppState> for DbConn {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(conn) = parts.extensions.get::<RequestConnection>().and_then(RequestConnection::take) {
            return Ok(DbConn(conn));
        }
        let conn = state.db.acquire().await?;
        Ok(DbConn(conn))
    }
}

impl Deref for DbConn {
    type Target = PgConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DbConn {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

// Exercise tracker
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! REST service to keep track of the exercises done by a collection of users.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use exercise_tracker_core::clocks::SystemClock;
use exercise_tracker_core::db::{Db, DbOptions, connect};
use exercise_tracker_core::env::get_optional_var;
use log::{info, warn};
use std::error::Error;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

mod db;
mod driver;
use driver::Driver;
mod model;
mod rest;
use rest::app;

/// Default value for the `PORT` setting when not specified.
const DEFAULT_PORT: u16 = 3000;

/// Configuration options for the service.
#[derive(Debug)]
pub struct TrackerOptions {
    /// Port on which to listen for requests.
    pub port: u16,

    /// Whether to listen on all network interfaces instead of only on the loopback one.
    pub bind_all: bool,

    /// Directory that holds the `views` and `public` static content.
    pub static_dir: PathBuf,

    /// Options to connect to the database.
    pub db: DbOptions,
}

impl TrackerOptions {
    /// Creates a new set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        Ok(Self {
            port: get_optional_var::<u16>(prefix, "PORT")?.unwrap_or(DEFAULT_PORT),
            bind_all: get_optional_var::<bool>(prefix, "BIND_ALL")?.unwrap_or(false),
            static_dir: get_optional_var::<PathBuf>(prefix, "STATIC_DIR")?
                .unwrap_or_else(|| PathBuf::from(".")),
            db: DbOptions::from_env(prefix)?,
        })
    }

    /// Computes the address on which to listen for requests.
    fn bind_addr(&self) -> SocketAddr {
        let ip = if self.bind_all { Ipv4Addr::UNSPECIFIED } else { Ipv4Addr::LOCALHOST };
        SocketAddr::from((ip, self.port))
    }
}

/// Waits for a request to terminate the server.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl-C; shutdown must be forced: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

/// Instantiates all resources to serve the application as configured by `opts`.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose many
/// crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(opts: TrackerOptions) -> Result<(), Box<dyn Error>> {
    let db: Arc<dyn Db + Send + Sync> = Arc::from(connect(&opts.db).await?);
    db::init_schema(&mut db.ex().await?).await?;

    let driver = Driver::new(db.clone(), Arc::from(SystemClock::default()));
    let app = app(driver, &opts.static_dir);

    let bind_addr = opts.bind_addr();
    let listener = TcpListener::bind(bind_addr).await?;
    info!("Listening on {}", bind_addr);

    let result = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await;
    db.close().await;
    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Creates options to serve on `port` backed by an in-memory database.
    fn memory_opts(port: u16) -> TrackerOptions {
        TrackerOptions {
            port,
            bind_all: false,
            static_dir: PathBuf::from("."),
            db: DbOptions { uri: "sqlite::memory:".to_owned(), max_connections: None, max_retries: 1 },
        }
    }

    #[tokio::test]
    async fn test_serve_port_in_use() {
        let busy = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let port = busy.local_addr().unwrap().port();

        let err = serve(memory_opts(port)).await.unwrap_err();
        assert!(err.to_string().to_lowercase().contains("in use"), "Unexpected error: {}", err);
    }

    #[tokio::test]
    async fn test_serve_unsupported_db() {
        let mut opts = memory_opts(0);
        opts.db.uri = "mysql://localhost/tracker".to_owned();

        let err = serve(opts).await.unwrap_err();
        assert!(err.to_string().contains("Unsupported scheme"), "Unexpected error: {}", err);
    }

    #[test]
    fn test_tracker_options_from_env_defaults() {
        temp_env::with_vars(
            [
                ("PREFIX_DB_URI", Some("sqlite::memory:")),
                ("PREFIX_PORT", None),
                ("PREFIX_BIND_ALL", None),
                ("PREFIX_STATIC_DIR", None),
            ],
            || {
                let opts = TrackerOptions::from_env("PREFIX").unwrap();
                assert_eq!(DEFAULT_PORT, opts.port);
                assert!(!opts.bind_all);
                assert_eq!(PathBuf::from("."), opts.static_dir);
                assert_eq!("sqlite::memory:", opts.db.uri);
                assert_eq!(SocketAddr::from((Ipv4Addr::LOCALHOST, 3000)), opts.bind_addr());
            },
        );
    }

    #[test]
    fn test_tracker_options_from_env_all_present() {
        temp_env::with_vars(
            [
                ("PREFIX_DB_URI", Some("sqlite:tracker.db")),
                ("PREFIX_PORT", Some("8080")),
                ("PREFIX_BIND_ALL", Some("true")),
                ("PREFIX_STATIC_DIR", Some("/srv/tracker")),
            ],
            || {
                let opts = TrackerOptions::from_env("PREFIX").unwrap();
                assert_eq!(8080, opts.port);
                assert!(opts.bind_all);
                assert_eq!(PathBuf::from("/srv/tracker"), opts.static_dir);
                assert_eq!("sqlite:tracker.db", opts.db.uri);
                assert_eq!(SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8080)), opts.bind_addr());
            },
        );
    }

    #[test]
    fn test_tracker_options_from_env_bad_port() {
        temp_env::with_vars(
            [("PREFIX_DB_URI", Some("sqlite::memory:")), ("PREFIX_PORT", Some("http"))],
            || {
                let err = TrackerOptions::from_env("PREFIX").unwrap_err();
                assert!(err.contains("PREFIX_PORT"), "Unexpected error: {}", err);
            },
        );
    }

    #[test]
    fn test_tracker_options_from_env_missing_db_uri() {
        temp_env::with_vars([("PREFIX_DB_URI", None::<&str>), ("PREFIX_PORT", Some("80"))], || {
            let err = TrackerOptions::from_env("PREFIX").unwrap_err();
            assert!(err.contains("PREFIX_DB_URI"), "Unexpected error: {}", err);
        });
    }
}

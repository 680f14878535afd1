//! MongoDB test infrastructure
//!
//! Provides a `TestMongo` helper that starts a throwaway MongoDB container.

use mongodb::{Client, Database};
use testcontainers::ContainerAsync;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::mongo::Mongo;

/// Test MongoDB wrapper that ensures proper cleanup
///
/// The container is automatically stopped and removed when this struct is dropped.
pub struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    pub client: Client,
    pub host: String,
}

impl TestMongo {
    /// Start a container and connect to it (no authentication).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use test_utils::TestMongo;
    ///
    /// # async fn example() {
    /// let mongo = TestMongo::new().await;
    /// let db = mongo.database("products_test");
    /// # }
    /// ```
    pub async fn new() -> Self {
        let container = Mongo::default()
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get host port");

        let host = format!("127.0.0.1:{}", port);
        let client = Client::with_uri_str(format!("mongodb://{}", host))
            .await
            .expect("Failed to connect to test MongoDB");

        tracing::info!(port, "Test MongoDB ready");

        Self {
            container,
            client,
            host,
        }
    }

    pub fn database(&self, name: &str) -> Database {
        self.client.database(name)
    }
}

use mongodb::{Client, bson::doc};

/// Check MongoDB health with a `ping` against the given database.
///
/// # Example
/// ```ignore
/// use database::mongodb::{connect_from_config, check_health};
///
/// let client = connect_from_config(&config).await?;
/// check_health(&client, "products").await.map_err(|e| e.to_string())?;
/// ```
pub async fn check_health(client: &Client, database: &str) -> Result<(), mongodb::error::Error> {
    client
        .database(database)
        .run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_check_health_fails_when_unreachable() {
        let client = Client::with_uri_str(
            "mongodb://127.0.0.1:9/?serverSelectionTimeoutMS=200&connectTimeoutMS=200",
        )
        .await
        .unwrap();

        assert!(check_health(&client, "products").await.is_err());
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_check_health() {
        let client = Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        assert!(check_health(&client, "admin").await.is_ok());
    }
}

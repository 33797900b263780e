use anyhow::Result;
use mongodb::{Client, Collection, Database};

/// MongoDB connection manager. Opened once at startup and shared with
/// the handlers through `web::Data`.
#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    /// Connect to MongoDB and verify the connection.
    ///
    /// The database name is taken from the URI path
    /// (`mongodb://host:port/<name>`), falling back to `wyma_db`.
    pub async fn new(uri: &str) -> Result<Self> {
        log::info!("Connecting to MongoDB at {}", uri);

        let client = Client::with_uri_str(uri).await?;

        let db_name = uri
            .split('/')
            .nth(3)
            .and_then(|s| s.split('?').next())
            .filter(|s| !s.is_empty())
            .unwrap_or("wyma_db");

        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;
        log::info!("Connected to MongoDB database: {}", db_name);

        Ok(Self { client, db })
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub async fn health_check(&self) -> Result<bool> {
        self.db.list_collection_names().await?;
        Ok(true)
    }
}

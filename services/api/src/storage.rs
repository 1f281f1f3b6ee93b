//! Avatar object store backed by S3
//!
//! Uploads land under a path namespaced by the owning principal with a
//! randomized filename; collisions are treated as negligible and earlier
//! objects for the same principal are left in place.

use anyhow::Result;
use aws_config::BehaviorVersion;
use aws_sdk_s3::{Client, primitives::ByteStream};
use std::env;
use tracing::info;
use uuid::Uuid;

/// Avatar object store
#[derive(Clone)]
pub struct AvatarStore {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl AvatarStore {
    /// Initialize the store from the ambient AWS configuration
    ///
    /// # Environment Variables
    /// - `AVATAR_BUCKET_NAME`: Bucket for avatar objects (default: "avatars")
    /// - `AVATAR_PUBLIC_BASE_URL`: Base URL the bucket is served from
    pub async fn from_env() -> Result<Self> {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let client = Client::new(&config);

        let bucket = env::var("AVATAR_BUCKET_NAME").unwrap_or_else(|_| "avatars".to_string());
        let public_base_url = env::var("AVATAR_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("https://{}.s3.amazonaws.com", bucket));

        info!("Avatar store initialized for bucket: {}", bucket);

        Ok(AvatarStore {
            client,
            bucket,
            public_base_url,
        })
    }

    /// Object key for a new upload: namespaced by principal, randomized
    /// filename
    pub fn object_key(user_id: Uuid, extension: &str) -> String {
        format!("{}/{}.{}", user_id, Uuid::new_v4(), extension)
    }

    /// Durable public URL for an object key
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), key)
    }

    /// Store an avatar and return its public URL
    pub async fn upload(&self, user_id: Uuid, content: Vec<u8>, extension: &str) -> Result<String> {
        let key = Self::object_key(user_id, extension);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(content))
            .send()
            .await?;

        info!("Uploaded avatar for user {} at {}", user_id, key);

        Ok(self.public_url(&key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_keys_are_namespaced_by_principal() {
        let user_id = Uuid::new_v4();
        let key = AvatarStore::object_key(user_id, "png");

        assert!(key.starts_with(&format!("{}/", user_id)));
        assert!(key.ends_with(".png"));
    }

    #[test]
    fn object_keys_are_unique_per_upload() {
        let user_id = Uuid::new_v4();
        let a = AvatarStore::object_key(user_id, "jpg");
        let b = AvatarStore::object_key(user_id, "jpg");
        assert_ne!(a, b);
    }
}

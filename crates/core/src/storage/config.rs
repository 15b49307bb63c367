//! Storage configuration types.

use std::path::PathBuf;

/// Storage provider configuration.
#[derive(Debug, Clone)]
pub enum StorageProvider {
    /// S3-compatible storage: Cloudflare R2, Supabase, AWS S3, DigitalOcean Spaces
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// S3 bucket name.
        bucket: String,
        /// AWS access key ID.
        access_key_id: String,
        /// AWS secret access key.
        secret_access_key: String,
        /// AWS region.
        region: String,
    },
    /// Azure Blob Storage
    AzureBlob {
        /// Azure storage account name.
        account: String,
        /// Azure storage access key.
        access_key: String,
        /// Azure container name.
        container: String,
    },
    /// Local filesystem (development only)
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
}

impl StorageProvider {
    /// Create S3-compatible provider (Cloudflare R2, Supabase, AWS S3).
    #[must_use]
    pub fn s3(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self::S3 {
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
        }
    }

    /// Create Azure Blob Storage provider.
    #[must_use]
    pub fn azure_blob(
        account: impl Into<String>,
        access_key: impl Into<String>,
        container: impl Into<String>,
    ) -> Self {
        Self::AzureBlob {
            account: account.into(),
            access_key: access_key.into(),
            container: container.into(),
        }
    }

    /// Create local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Get the provider name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::AzureBlob { .. } => "azure_blob",
            Self::LocalFs { .. } => "local",
        }
    }
}

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Maximum upload size in bytes.
    pub max_file_size: u64,
    /// Allowed file extensions (lowercase, without the dot).
    pub allowed_extensions: Vec<String>,
}

impl StorageConfig {
    /// Default max upload size: 5MB.
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

    /// Create a new storage config with default settings.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
            allowed_extensions: Self::default_extensions(),
        }
    }

    /// Set maximum upload size.
    #[must_use]
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Set allowed file extensions.
    #[must_use]
    pub fn with_allowed_extensions(mut self, extensions: Vec<String>) -> Self {
        self.allowed_extensions = extensions;
        self
    }

    /// Default allowed extensions for uploaded documents.
    ///
    /// Images for photos and scans, plus the document formats schools and
    /// donors actually send.
    #[must_use]
    pub fn default_extensions() -> Vec<String> {
        ["jpg", "jpeg", "png", "pdf", "doc", "docx"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Check if a file extension is allowed (case-insensitive).
    #[must_use]
    pub fn is_extension_allowed(&self, extension: &str) -> bool {
        let lowered = extension.to_lowercase();
        self.allowed_extensions.iter().any(|e| *e == lowered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_provider_names() {
        let s3 = StorageProvider::s3(
            "https://account.r2.cloudflarestorage.com",
            "documents",
            "access_key",
            "secret_key",
            "auto",
        );
        assert_eq!(s3.name(), "s3");

        let azure = StorageProvider::azure_blob("account", "key", "documents");
        assert_eq!(azure.name(), "azure_blob");

        let local = StorageProvider::local_fs("./uploads");
        assert_eq!(local.name(), "local");
    }

    #[test]
    fn test_default_extensions() {
        let config = StorageConfig::new(StorageProvider::local_fs("./uploads"));
        assert!(config.is_extension_allowed("pdf"));
        assert!(config.is_extension_allowed("JPG"));
        assert!(config.is_extension_allowed("docx"));
        assert!(!config.is_extension_allowed("exe"));
        assert!(!config.is_extension_allowed("svg"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = StorageConfig::new(StorageProvider::local_fs("./uploads"))
            .with_max_file_size(1024)
            .with_allowed_extensions(vec!["pdf".to_string()]);
        assert_eq!(config.max_file_size, 1024);
        assert!(config.is_extension_allowed("pdf"));
        assert!(!config.is_extension_allowed("png"));
    }
}

//! Storage service implementation using Apache OpenDAL.

use bytes::Bytes;
use opendal::{Operator, services};
use uuid::Uuid;

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// The document categories uploads are grouped under.
///
/// The category is the first segment of every storage key, so each kind of
/// document lands in its own folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// School registration proofs and endorsement letters.
    School,
    /// Donor identity certificates.
    Donor,
    /// Volunteer NIC scans.
    Volunteer,
    /// Donation images.
    Donation,
    /// Supply request principal letters.
    SupplyRequest,
}

impl DocumentKind {
    /// Returns the folder name used as the key prefix.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::School => "school",
            Self::Donor => "donor",
            Self::Volunteer => "volunteer",
            Self::Donation => "donation",
            Self::SupplyRequest => "request",
        }
    }
}

/// A stored document: the key to persist and the byte count written.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    /// Storage key, persisted on the owning row.
    pub key: String,
    /// File size in bytes.
    pub size: u64,
}

/// Storage service for uploaded documents.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        let operator = match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::AzureBlob {
                account,
                access_key,
                container,
            } => {
                let builder = services::Azblob::default()
                    .account_name(account)
                    .account_key(access_key)
                    .container(container);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
        };

        Ok(operator)
    }

    /// Validate an upload against the configured constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is too large, has no extension, or has
    /// an extension outside the allowed set.
    pub fn validate_upload(&self, filename: &str, size: u64) -> Result<(), StorageError> {
        if size > self.config.max_file_size {
            return Err(StorageError::file_too_large(
                size,
                self.config.max_file_size,
            ));
        }

        let extension = extension_of(filename).ok_or_else(|| StorageError::MissingExtension {
            filename: filename.to_string(),
        })?;

        if !self.config.is_extension_allowed(&extension) {
            return Err(StorageError::extension_not_allowed(extension));
        }

        Ok(())
    }

    /// Generate the storage key for a document.
    ///
    /// Format: `{kind}/{field}-{uuid}.{ext}`. The original filename only
    /// contributes its extension, so client-supplied names never reach the
    /// backend.
    #[must_use]
    pub fn document_key(kind: DocumentKind, field: &str, filename: &str) -> String {
        let extension = extension_of(filename).unwrap_or_else(|| "bin".to_string());
        format!("{}/{}-{}.{}", kind.as_str(), field, Uuid::new_v4(), extension)
    }

    /// Validate and write an uploaded document.
    ///
    /// The write happens before the owning row is created; a row that fails
    /// later leaves an orphan file rather than a row pointing at nothing.
    ///
    /// # Errors
    ///
    /// Returns a validation error without writing, or an operation error if
    /// the backend write fails.
    pub async fn store(
        &self,
        kind: DocumentKind,
        field: &str,
        filename: &str,
        data: Bytes,
    ) -> Result<StoredDocument, StorageError> {
        let size = data.len() as u64;
        self.validate_upload(filename, size)?;

        let key = Self::document_key(kind, field, filename);
        self.operator.write(&key, data).await?;

        Ok(StoredDocument { key, size })
    }

    /// Read a stored document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the key does not exist.
    pub async fn read(&self, key: &str) -> Result<Bytes, StorageError> {
        let buffer = self.operator.read(key).await?;
        Ok(buffer.to_bytes())
    }

    /// Delete a stored document.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.operator.delete(key).await.map_err(StorageError::from)
    }

    /// Check if a document exists in storage.
    pub async fn exists(&self, key: &str) -> bool {
        self.operator.stat(key).await.is_ok()
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    /// Get the maximum upload size in bytes.
    #[must_use]
    pub fn max_file_size(&self) -> u64 {
        self.config.max_file_size
    }
}

/// Extract the lowercased extension from a filename.
///
/// A trailing or leading dot does not count as an extension.
fn extension_of(filename: &str) -> Option<String> {
    let (stem, extension) = filename.rsplit_once('.')?;
    if stem.is_empty() || extension.is_empty() {
        return None;
    }
    Some(extension.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> StorageService {
        let config = StorageConfig::new(StorageProvider::local_fs("./test-uploads"));
        StorageService::from_config(config).expect("should create service")
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("letter.pdf"), Some("pdf".to_string()));
        assert_eq!(extension_of("photo.JPG"), Some("jpg".to_string()));
        assert_eq!(extension_of("archive.tar.gz"), Some("gz".to_string()));
        assert_eq!(extension_of("no_extension"), None);
        assert_eq!(extension_of(".hidden"), None);
        assert_eq!(extension_of("trailing."), None);
    }

    #[test]
    fn test_document_key_format() {
        let key = StorageService::document_key(DocumentKind::Volunteer, "nicFront", "scan.PNG");
        let parts: Vec<&str> = key.split('/').collect();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], "volunteer");
        assert!(parts[1].starts_with("nicFront-"));
        assert!(parts[1].ends_with(".png"));
    }

    #[test]
    fn test_document_keys_are_unique() {
        let first = StorageService::document_key(DocumentKind::Donation, "image", "a.png");
        let second = StorageService::document_key(DocumentKind::Donation, "image", "a.png");
        assert_ne!(first, second);
    }

    #[test]
    fn test_validate_upload_size() {
        let config =
            StorageConfig::new(StorageProvider::local_fs("./test-uploads")).with_max_file_size(1024);
        let service = StorageService::from_config(config).expect("should create service");

        assert!(service.validate_upload("letter.pdf", 512).is_ok());

        let err = service.validate_upload("letter.pdf", 2048).unwrap_err();
        assert!(matches!(err, StorageError::FileTooLarge { .. }));
    }

    #[test]
    fn test_validate_upload_extension() {
        let service = test_service();

        assert!(service.validate_upload("proof.pdf", 1024).is_ok());
        assert!(service.validate_upload("scan.jpeg", 1024).is_ok());

        let err = service.validate_upload("malware.exe", 1024).unwrap_err();
        assert!(matches!(err, StorageError::ExtensionNotAllowed { .. }));

        let err = service.validate_upload("noext", 1024).unwrap_err();
        assert!(matches!(err, StorageError::MissingExtension { .. }));
    }

    #[tokio::test]
    async fn test_store_read_delete_round_trip() {
        let root = std::env::temp_dir().join(format!("edulink-storage-{}", Uuid::new_v4()));
        let config = StorageConfig::new(StorageProvider::local_fs(root));
        let service = StorageService::from_config(config).expect("should create service");

        let stored = service
            .store(
                DocumentKind::Donation,
                "image",
                "bookshelf.png",
                Bytes::from_static(b"fake png bytes"),
            )
            .await
            .expect("should store document");
        assert!(stored.key.starts_with("donation/image-"));
        assert_eq!(stored.size, 14);

        let data = service
            .read(&stored.key)
            .await
            .expect("should read document");
        assert_eq!(data, Bytes::from_static(b"fake png bytes"));
        assert!(service.exists(&stored.key).await);

        service
            .delete(&stored.key)
            .await
            .expect("should delete document");
        assert!(!service.exists(&stored.key).await);
    }

    #[tokio::test]
    async fn test_read_missing_key() {
        let service = test_service();

        let result = service.read("donation/image-does-not-exist.png").await;
        assert!(matches!(result, Err(StorageError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_store_validates_before_writing() {
        let config =
            StorageConfig::new(StorageProvider::local_fs("./test-uploads")).with_max_file_size(8);
        let service = StorageService::from_config(config).expect("should create service");

        let result = service
            .store(
                DocumentKind::Volunteer,
                "nicFront",
                "scan.jpg",
                Bytes::from_static(b"way past the configured limit"),
            )
            .await;
        assert!(matches!(result, Err(StorageError::FileTooLarge { .. })));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    // Document keys always follow {kind}/{field}-{uuid}.{ext} and never
    // leak the original filename.
    proptest! {
        #[test]
        fn prop_document_key_format(
            field in "[a-zA-Z]{1,20}",
            stem in "[a-zA-Z0-9 ]{0,15}@[a-zA-Z0-9 ]{0,15}",
            ext in "[a-zA-Z]{1,5}",
        ) {
            let filename = format!("{stem}.{ext}");
            let key = StorageService::document_key(DocumentKind::School, &field, &filename);

            let parts: Vec<&str> = key.split('/').collect();
            prop_assert_eq!(parts.len(), 2);
            prop_assert_eq!(parts[0], "school");
            prop_assert!(parts[1].starts_with(&format!("{field}-")));
            prop_assert!(parts[1].ends_with(&format!(".{}", ext.to_lowercase())));
            prop_assert!(!key.contains(&stem));
        }
    }

    // Size validation accepts exactly the sizes within the configured max.
    proptest! {
        #[test]
        fn prop_file_size_validation(
            max_size in 1024u64..10_000_000,
            file_size in 0u64..20_000_000,
        ) {
            let config = StorageConfig::new(StorageProvider::local_fs("./test-uploads"))
                .with_max_file_size(max_size);
            let service = StorageService::from_config(config)
                .expect("should create service");

            let result = service.validate_upload("document.pdf", file_size);

            if file_size <= max_size {
                prop_assert!(result.is_ok(), "Expected Ok for valid file size");
            } else {
                let is_too_large = matches!(result, Err(StorageError::FileTooLarge { .. }));
                prop_assert!(is_too_large, "Expected FileTooLarge error");
            }
        }
    }

    // Extension validation agrees with the configured allowlist.
    proptest! {
        #[test]
        fn prop_extension_validation(ext in "[a-zA-Z0-9]{1,6}") {
            let config = StorageConfig::new(StorageProvider::local_fs("./test-uploads"));
            let service = StorageService::from_config(config.clone())
                .expect("should create service");

            let filename = format!("upload.{ext}");
            let result = service.validate_upload(&filename, 1024);

            if config.is_extension_allowed(&ext) {
                prop_assert!(result.is_ok(), "Expected Ok for allowed extension");
            } else {
                let is_rejected = matches!(result, Err(StorageError::ExtensionNotAllowed { .. }));
                prop_assert!(is_rejected, "Expected ExtensionNotAllowed error");
            }
        }
    }

    // Extracted extensions are always lowercase and never contain a dot.
    proptest! {
        #[test]
        fn prop_extension_of_normalized(filename in ".*") {
            if let Some(ext) = extension_of(&filename) {
                prop_assert!(!ext.contains('.'));
                prop_assert_eq!(ext.clone(), ext.to_lowercase());
            }
        }
    }
}

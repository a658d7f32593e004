//! S3 object store
//!
//! Website bucket provisioning and object uploads. Object bodies are
//! streamed from disk, never buffered wholesale.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketCannedAcl, BucketLocationConstraint, CreateBucketConfiguration, ErrorDocument,
    IndexDocument, ObjectCannedAcl, WebsiteConfiguration,
};
use nebulis_cloud::{
    BucketConfig, BucketEndpoints, CloudError, ObjectAcl, ObjectStore, PutRequest, Result,
};
use tracing::{debug, info};

const FALLBACK_REGION: &str = "us-east-1";

/// S3-backed object store
pub struct S3ObjectStore {
    client: Client,
    region: String,
}

impl S3ObjectStore {
    pub fn new(client: Client, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
        }
    }

    /// Build a store from the default AWS credential chain
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let region = config
            .region()
            .map(|r| r.to_string())
            .unwrap_or_else(|| FALLBACK_REGION.to_string());
        Self::new(Client::new(&config), region)
    }

    /// Public-read policy document for the website bucket
    fn public_read_policy(bucket: &str) -> String {
        serde_json::json!({
            "Version": "2012-10-17",
            "Statement": [{
                "Effect": "Allow",
                "Principal": "*",
                "Action": ["s3:GetObject"],
                "Resource": [format!("arn:aws:s3:::{}/*", bucket)]
            }]
        })
        .to_string()
    }

    /// Website endpoint for a bucket in this store's region
    fn website_endpoint(&self, bucket: &str) -> String {
        format!("{}.s3-website-{}.amazonaws.com", bucket, self.region)
    }

    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(err)
                if err
                    .as_service_error()
                    .map(|e| e.is_not_found())
                    .unwrap_or(false) =>
            {
                Ok(false)
            }
            Err(err) => Err(api_error(err)),
        }
    }

    async fn create_bucket(&self, config: &BucketConfig) -> Result<()> {
        info!(bucket = %config.name, region = %self.region, "Creating website bucket");

        let mut request = self.client.create_bucket().bucket(&config.name);
        if config.acl == ObjectAcl::PublicRead {
            request = request.acl(BucketCannedAcl::PublicRead);
        }
        // us-east-1 rejects an explicit location constraint
        if self.region != FALLBACK_REGION {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
                    .build(),
            );
        }
        request.send().await.map_err(api_error)?;
        Ok(())
    }

    async fn apply_website_config(&self, config: &BucketConfig) -> Result<()> {
        let website = WebsiteConfiguration::builder()
            .index_document(
                IndexDocument::builder()
                    .suffix(&config.index_document)
                    .build()
                    .map_err(invalid)?,
            )
            .error_document(
                ErrorDocument::builder()
                    .key(&config.error_document)
                    .build()
                    .map_err(invalid)?,
            )
            .build();

        self.client
            .put_bucket_website()
            .bucket(&config.name)
            .website_configuration(website)
            .send()
            .await
            .map_err(api_error)?;

        if config.acl == ObjectAcl::PublicRead {
            self.client
                .put_bucket_policy()
                .bucket(&config.name)
                .policy(Self::public_read_policy(&config.name))
                .send()
                .await
                .map_err(api_error)?;
        }

        Ok(())
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn ensure_bucket(&self, config: &BucketConfig) -> Result<BucketEndpoints> {
        if !self.bucket_exists(&config.name).await? {
            self.create_bucket(config).await?;
        } else {
            debug!(bucket = %config.name, "Bucket already exists");
        }
        self.apply_website_config(config).await?;

        Ok(BucketEndpoints {
            name: config.name.clone(),
            website_endpoint: self.website_endpoint(&config.name),
            bucket_domain: format!("{}.s3.amazonaws.com", config.name),
        })
    }

    async fn put_object(&self, request: &PutRequest) -> Result<()> {
        let body = ByteStream::from_path(&request.source)
            .await
            .map_err(|e| CloudError::Io(std::io::Error::other(e)))?;

        let acl = match request.acl {
            ObjectAcl::PublicRead => ObjectCannedAcl::PublicRead,
            ObjectAcl::Private => ObjectCannedAcl::Private,
        };

        debug!(bucket = %request.bucket, key = %request.key, "Putting object");

        self.client
            .put_object()
            .bucket(&request.bucket)
            .key(&request.key)
            .body(body)
            .set_content_type(request.content_type.clone())
            .acl(acl)
            .send()
            .await
            .map_err(|err| CloudError::UploadRejected {
                key: request.key.clone(),
                message: DisplayErrorContext(&err).to_string(),
            })?;

        Ok(())
    }
}

fn api_error<E: std::error::Error + 'static>(err: aws_sdk_s3::error::SdkError<E>) -> CloudError {
    CloudError::ApiError(DisplayErrorContext(&err).to_string())
}

fn invalid(err: aws_sdk_s3::error::BuildError) -> CloudError {
    CloudError::InvalidConfig(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_read_policy_targets_bucket_objects() {
        let policy = S3ObjectStore::public_read_policy("app.example.com");
        assert!(policy.contains("arn:aws:s3:::app.example.com/*"));
        assert!(policy.contains("s3:GetObject"));
        assert!(policy.contains("2012-10-17"));
    }
}

//! CloudFront distribution
//!
//! Creates the distribution fronting the S3 website endpoint. The website
//! endpoint only speaks HTTP, so the origin is reached http-only while
//! viewers are redirected to HTTPS.

use crate::error::{AwsError, Result};
use aws_sdk_cloudfront::Client;
use aws_sdk_cloudfront::error::DisplayErrorContext;
use aws_sdk_cloudfront::types::{
    Aliases, AllowedMethods, CachedMethods, CookiePreference, CustomErrorResponse,
    CustomErrorResponses, CustomOriginConfig, DefaultCacheBehavior, DistributionConfig,
    ForwardedValues, GeoRestriction, GeoRestrictionType, ItemSelection, LoggingConfig, Method,
    Origin, OriginProtocolPolicy, OriginSslProtocols, Origins, PriceClass, Restrictions,
    SslProtocol, SslSupportMethod, ViewerCertificate, ViewerProtocolPolicy,
};
use nebulis_cloud::{DistributionInfo, resource};
use tracing::info;

/// Alias records targeting any CloudFront distribution use this fixed
/// hosted zone id.
const CLOUDFRONT_HOSTED_ZONE_ID: &str = "Z2FDTNDATAQYW2";

/// CloudFront distribution manager
pub struct CloudFrontCdn {
    client: Client,
}

impl CloudFrontCdn {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a distribution manager from the default AWS credential chain
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config))
    }

    /// Create the distribution and return its id, domain name and the
    /// fixed hosted zone id alias records must reference.
    pub async fn create_distribution(
        &self,
        config: &resource::DistributionConfig,
    ) -> Result<DistributionInfo> {
        info!(domain = %config.domain, origin = %config.origin_endpoint, "Creating distribution");

        let distribution_config = build_distribution_config(config)?;

        let output = self
            .client
            .create_distribution()
            .distribution_config(distribution_config)
            .send()
            .await
            .map_err(api_error)?;

        let distribution = output
            .distribution()
            .ok_or_else(|| AwsError::DistributionMissing(config.domain.clone()))?;

        let info = DistributionInfo {
            id: distribution.id().to_string(),
            domain_name: distribution.domain_name().to_string(),
            hosted_zone_id: CLOUDFRONT_HOSTED_ZONE_ID.to_string(),
        };
        info!(id = %info.id, domain_name = %info.domain_name, "Distribution created");
        Ok(info)
    }
}

fn build_distribution_config(
    config: &resource::DistributionConfig,
) -> Result<DistributionConfig> {
    let origin_id = format!("s3-website-{}", config.domain);

    let origin = Origin::builder()
        .id(&origin_id)
        .domain_name(&config.origin_endpoint)
        .custom_origin_config(
            CustomOriginConfig::builder()
                .http_port(80)
                .https_port(443)
                .origin_protocol_policy(OriginProtocolPolicy::HttpOnly)
                .origin_ssl_protocols(
                    OriginSslProtocols::builder()
                        .quantity(1)
                        .items(SslProtocol::TlSv12)
                        .build()
                        .map_err(invalid)?,
                )
                .build()
                .map_err(invalid)?,
        )
        .build()
        .map_err(invalid)?;

    let cache_behavior = DefaultCacheBehavior::builder()
        .target_origin_id(&origin_id)
        .viewer_protocol_policy(ViewerProtocolPolicy::RedirectToHttps)
        .allowed_methods(
            AllowedMethods::builder()
                .quantity(3)
                .items(Method::Get)
                .items(Method::Head)
                .items(Method::Options)
                .cached_methods(
                    CachedMethods::builder()
                        .quantity(3)
                        .items(Method::Get)
                        .items(Method::Head)
                        .items(Method::Options)
                        .build()
                        .map_err(invalid)?,
                )
                .build()
                .map_err(invalid)?,
        )
        .forwarded_values(
            ForwardedValues::builder()
                .query_string(false)
                .cookies(
                    CookiePreference::builder()
                        .forward(ItemSelection::None)
                        .build()
                        .map_err(invalid)?,
                )
                .build()
                .map_err(invalid)?,
        )
        .min_ttl(config.min_ttl)
        .default_ttl(config.default_ttl)
        .max_ttl(config.max_ttl)
        .build()
        .map_err(invalid)?;

    let mut error_responses = CustomErrorResponses::builder().quantity(config.error_responses.len() as i32);
    for response in &config.error_responses {
        error_responses = error_responses.items(
            CustomErrorResponse::builder()
                .error_code(response.error_code)
                .response_code(response.response_code.to_string())
                .response_page_path(&response.response_page_path)
                .build()
                .map_err(invalid)?,
        );
    }

    let mut builder = DistributionConfig::builder()
        .caller_reference(caller_reference(&config.domain))
        .comment(format!("Nebulis site {}", config.domain))
        .enabled(true)
        .default_root_object(&config.default_root_object)
        .aliases(
            Aliases::builder()
                .quantity(1)
                .items(&config.domain)
                .build()
                .map_err(invalid)?,
        )
        .origins(
            Origins::builder()
                .quantity(1)
                .items(origin)
                .build()
                .map_err(invalid)?,
        )
        .default_cache_behavior(cache_behavior)
        .custom_error_responses(error_responses.build().map_err(invalid)?)
        // narrowest (and cheapest) edge footprint
        .price_class(PriceClass::PriceClass100)
        .restrictions(
            Restrictions::builder()
                .geo_restriction(
                    GeoRestriction::builder()
                        .restriction_type(GeoRestrictionType::None)
                        .quantity(0)
                        .build()
                        .map_err(invalid)?,
                )
                .build(),
        )
        .viewer_certificate(
            ViewerCertificate::builder()
                .acm_certificate_arn(&config.certificate_arn)
                .ssl_support_method(SslSupportMethod::SniOnly)
                .build(),
        );

    if let Some(logging) = &config.logging {
        builder = builder.logging(
            LoggingConfig::builder()
                .enabled(true)
                .include_cookies(false)
                .bucket(&logging.bucket_domain)
                .prefix(&logging.prefix)
                .build(),
        );
    }

    builder.build().map_err(invalid)
}

/// Caller references must be unique per creation request
fn caller_reference(domain: &str) -> String {
    format!("nebulis-{}-{}", domain, chrono::Utc::now().timestamp())
}

fn api_error<E: std::error::Error + 'static>(
    err: aws_sdk_cloudfront::error::SdkError<E>,
) -> AwsError {
    AwsError::ApiError(DisplayErrorContext(&err).to_string())
}

fn invalid(err: aws_sdk_cloudfront::error::BuildError) -> AwsError {
    AwsError::InvalidConfig(err.to_string())
}

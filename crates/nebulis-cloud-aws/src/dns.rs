//! Route53 hosted zones
//!
//! Zone lookup by parent domain name and record upserts.

use async_trait::async_trait;
use aws_sdk_route53::Client;
use aws_sdk_route53::error::DisplayErrorContext;
use aws_sdk_route53::types::{
    AliasTarget, Change, ChangeAction, ChangeBatch, ResourceRecord, ResourceRecordSet, RrType,
};
use nebulis_cloud::{CloudError, DnsZones, RecordKind, RecordSpec, Result};
use tracing::{debug, info};

/// Route53-backed zone service
pub struct Route53Dns {
    client: Client,
}

impl Route53Dns {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a zone service from the default AWS credential chain
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config))
    }

    /// Route53 zone names are absolute; queries without a trailing dot get
    /// one before comparison.
    fn absolute(name: &str) -> String {
        if name.ends_with('.') {
            name.to_string()
        } else {
            format!("{}.", name)
        }
    }

    fn record_set(record: &RecordSpec) -> Result<ResourceRecordSet> {
        let mut builder = ResourceRecordSet::builder().name(&record.name);

        match &record.kind {
            RecordKind::Alias {
                target,
                target_zone_id,
                evaluate_target_health,
            } => {
                builder = builder.r#type(RrType::A).alias_target(
                    AliasTarget::builder()
                        .hosted_zone_id(target_zone_id)
                        .dns_name(target)
                        .evaluate_target_health(*evaluate_target_health)
                        .build()
                        .map_err(invalid)?,
                );
            }
            RecordKind::Value {
                record_type,
                values,
            } => {
                builder = builder.r#type(RrType::from(record_type.as_str()));
                if let Some(ttl) = record.ttl {
                    builder = builder.ttl(ttl);
                }
                for value in values {
                    builder =
                        builder.resource_records(ResourceRecord::builder().value(value).build().map_err(invalid)?);
                }
            }
        }

        builder.build().map_err(invalid)
    }
}

#[async_trait]
impl DnsZones for Route53Dns {
    async fn resolve_zone(&self, parent_domain: &str) -> Result<String> {
        let wanted = Self::absolute(parent_domain);

        let output = self
            .client
            .list_hosted_zones_by_name()
            .dns_name(&wanted)
            .send()
            .await
            .map_err(api_error)?;

        let zone = output
            .hosted_zones()
            .iter()
            .find(|z| z.name() == wanted)
            .ok_or_else(|| CloudError::ZoneNotFound(parent_domain.to_string()))?;

        // Zone ids come back as "/hostedzone/Z..."
        let zone_id = zone
            .id()
            .rsplit('/')
            .next()
            .unwrap_or_else(|| zone.id())
            .to_string();

        debug!(zone = %wanted, zone_id = %zone_id, "Resolved hosted zone");
        Ok(zone_id)
    }

    async fn upsert_record(&self, record: &RecordSpec) -> Result<()> {
        info!(
            zone_id = %record.zone_id,
            name = %record.name,
            record_type = %record.record_type(),
            "Upserting record"
        );

        let change = Change::builder()
            .action(ChangeAction::Upsert)
            .resource_record_set(Self::record_set(record)?)
            .build()
            .map_err(invalid)?;

        self.client
            .change_resource_record_sets()
            .hosted_zone_id(&record.zone_id)
            .change_batch(ChangeBatch::builder().changes(change).build().map_err(invalid)?)
            .send()
            .await
            .map_err(api_error)?;

        Ok(())
    }
}

fn api_error<E: std::error::Error + 'static>(
    err: aws_sdk_route53::error::SdkError<E>,
) -> CloudError {
    CloudError::ApiError(DisplayErrorContext(&err).to_string())
}

fn invalid(err: aws_sdk_route53::error::BuildError) -> CloudError {
    CloudError::InvalidConfig(err.to_string())
}

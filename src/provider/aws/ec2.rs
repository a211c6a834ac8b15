//! # AWS EC2
//!
//! [`Ec2Api`] on top of `aws-sdk-ec2`. Only the security group calls are used.

use super::{empty_response, non_empty, observe, owned, remote_error};
use crate::constants::SERVICE_EC2;
use crate::error::Result;
use crate::provider::{CreateSecurityGroupRequest, Ec2Api};
use crate::types::{Filter, IpPermission, IpRange, SecurityGroup, SecurityGroupReference, Tag};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_ec2::types as sdk;
use aws_sdk_ec2::Client as Ec2Client;
use tracing::{debug_span, Instrument};

/// EC2 API client
pub struct AwsEc2 {
    client: Ec2Client,
}

impl std::fmt::Debug for AwsEc2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsEc2").finish_non_exhaustive()
    }
}

impl AwsEc2 {
    #[must_use]
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self::from_client(Ec2Client::new(sdk_config))
    }

    #[must_use]
    pub fn from_client(client: Ec2Client) -> Self {
        Self { client }
    }
}

fn sdk_filter(filter: &Filter) -> sdk::Filter {
    sdk::Filter::builder()
        .name(&filter.name)
        .set_values(Some(filter.values.clone()))
        .build()
}

fn permission_to_sdk(permission: &IpPermission) -> sdk::IpPermission {
    let ip_ranges = permission
        .ip_ranges
        .iter()
        .map(|range| {
            sdk::IpRange::builder()
                .cidr_ip(&range.cidr)
                .set_description(range.description.clone())
                .build()
        })
        .collect::<Vec<_>>();
    let group_pairs = permission
        .source_groups
        .iter()
        .map(|group| {
            sdk::UserIdGroupPair::builder()
                .group_id(&group.group_id)
                .set_description(group.description.clone())
                .build()
        })
        .collect::<Vec<_>>();

    sdk::IpPermission::builder()
        .ip_protocol(&permission.protocol)
        .set_from_port(permission.from_port)
        .set_to_port(permission.to_port)
        .set_ip_ranges(non_empty(&ip_ranges))
        .set_user_id_group_pairs(non_empty(&group_pairs))
        .build()
}

fn permission_from_sdk(permission: &sdk::IpPermission) -> IpPermission {
    IpPermission {
        protocol: permission.ip_protocol().unwrap_or("-1").to_string(),
        from_port: permission.from_port(),
        to_port: permission.to_port(),
        ip_ranges: permission
            .ip_ranges()
            .iter()
            .filter_map(|range| {
                range.cidr_ip().map(|cidr| IpRange {
                    cidr: cidr.to_string(),
                    description: owned(range.description()),
                })
            })
            .collect(),
        source_groups: permission
            .user_id_group_pairs()
            .iter()
            .filter_map(|pair| {
                pair.group_id().map(|group_id| SecurityGroupReference {
                    group_id: group_id.to_string(),
                    description: owned(pair.description()),
                })
            })
            .collect(),
    }
}

/// Tag specification for a new security group, omitted when there is nothing to tag
fn tag_specifications(tags: &[Tag]) -> Option<Vec<sdk::TagSpecification>> {
    let tags = tags
        .iter()
        .map(|tag| sdk::Tag::builder().key(&tag.key).value(&tag.value).build())
        .collect::<Vec<_>>();
    non_empty(&tags).map(|tags| {
        vec![sdk::TagSpecification::builder()
            .resource_type(sdk::ResourceType::SecurityGroup)
            .set_tags(Some(tags))
            .build()]
    })
}

fn security_group_from_sdk(group: &sdk::SecurityGroup) -> SecurityGroup {
    SecurityGroup {
        id: group.group_id().unwrap_or_default().to_string(),
        name: owned(group.group_name()),
        description: owned(group.description()),
        vpc_id: owned(group.vpc_id()),
        ingress: group.ip_permissions().iter().map(permission_from_sdk).collect(),
        tags: group
            .tags()
            .iter()
            .filter_map(|tag| {
                tag.key()
                    .map(|key| Tag::new(key, tag.value().unwrap_or_default()))
            })
            .collect(),
    }
}

#[async_trait]
impl Ec2Api for AwsEc2 {
    async fn describe_security_groups(
        &self,
        filters: &[Filter],
        group_ids: &[String],
    ) -> Result<Vec<SecurityGroup>> {
        const OPERATION: &str = "DescribeSecurityGroups";
        let span = debug_span!(
            "ec2.describe_security_groups",
            filters = filters.len(),
            group_ids = ?group_ids
        );
        let filters = filters.iter().map(sdk_filter).collect::<Vec<_>>();
        observe(SERVICE_EC2, OPERATION, async {
            let out = self
                .client
                .describe_security_groups()
                .set_filters(non_empty(&filters))
                .set_group_ids(non_empty(group_ids))
                .send()
                .await
                .map_err(|e| remote_error(SERVICE_EC2, OPERATION, &e))?;
            Ok(out
                .security_groups()
                .iter()
                .map(security_group_from_sdk)
                .collect())
        })
        .instrument(span)
        .await
    }

    async fn create_security_group(&self, request: &CreateSecurityGroupRequest) -> Result<String> {
        const OPERATION: &str = "CreateSecurityGroup";
        let span = debug_span!(
            "ec2.create_security_group",
            vpc_id = %request.vpc_id,
            group_name = %request.name
        );
        let tag_specifications = tag_specifications(&request.tags);
        observe(SERVICE_EC2, OPERATION, async {
            let out = self
                .client
                .create_security_group()
                .description(&request.description)
                .group_name(&request.name)
                .vpc_id(&request.vpc_id)
                .set_tag_specifications(tag_specifications)
                .send()
                .await
                .map_err(|e| remote_error(SERVICE_EC2, OPERATION, &e))?;
            out.group_id()
                .map(ToString::to_string)
                .ok_or_else(|| empty_response(SERVICE_EC2, OPERATION, "GroupId"))
        })
        .instrument(span)
        .await
    }

    async fn delete_security_group(&self, id: &str) -> Result<()> {
        const OPERATION: &str = "DeleteSecurityGroup";
        let span = debug_span!("ec2.delete_security_group", group_id = id);
        observe(SERVICE_EC2, OPERATION, async {
            self.client
                .delete_security_group()
                .group_id(id)
                .send()
                .await
                .map_err(|e| remote_error(SERVICE_EC2, OPERATION, &e))?;
            Ok(())
        })
        .instrument(span)
        .await
    }

    async fn authorize_security_group_ingress(
        &self,
        id: &str,
        permissions: &[IpPermission],
    ) -> Result<()> {
        const OPERATION: &str = "AuthorizeSecurityGroupIngress";
        let span = debug_span!(
            "ec2.authorize_security_group_ingress",
            group_id = id,
            permissions = permissions.len()
        );
        let permissions = permissions.iter().map(permission_to_sdk).collect::<Vec<_>>();
        observe(SERVICE_EC2, OPERATION, async {
            self.client
                .authorize_security_group_ingress()
                .group_id(id)
                .set_ip_permissions(Some(permissions))
                .send()
                .await
                .map_err(|e| remote_error(SERVICE_EC2, OPERATION, &e))?;
            Ok(())
        })
        .instrument(span)
        .await
    }
}

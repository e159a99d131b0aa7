use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_config::sts::AssumeRoleProvider;
use aws_sdk_s3::{
    Client,
    config::{Builder, Region, SharedCredentialsProvider},
    error::{ProvideErrorMetadata, SdkError},
    operation::get_object::GetObjectError,
};
use dashmap::DashMap;

use super::{FetchedObject, ObjectReference};
use crate::error::{BoxError, Error, FetchErrorKind, Result};
use crate::handler::ObjectStore;

const ASSUME_ROLE_SESSION_NAME: &str = "trail-streamer";

/// Reads log files from S3.
///
/// Clients are created lazily per region and cached for the lifetime of the process. When a role
/// ARN is given, every client reads with credentials obtained by assuming that role.
pub struct S3ObjectStore {
    base_config: SdkConfig,
    credentials: Option<SharedCredentialsProvider>,
    clients: DashMap<String, Client>,
}

impl S3ObjectStore {
    pub async fn new(base_config: SdkConfig, role_arn: Option<&str>) -> Self {
        let credentials = match role_arn {
            Some(role_arn) => {
                log::info!("S3 reads will assume role {role_arn}.");
                let provider = AssumeRoleProvider::builder(role_arn)
                    .session_name(ASSUME_ROLE_SESSION_NAME)
                    .configure(&base_config)
                    .build()
                    .await;
                Some(SharedCredentialsProvider::new(provider))
            }
            None => None,
        };
        Self {
            base_config,
            credentials,
            clients: DashMap::new(),
        }
    }

    fn get_client(&self, region: &str) -> Client {
        self.clients
            .entry(region.to_owned())
            .or_insert_with(|| {
                log::debug!("Creating S3 client for region {region}.");
                create_s3_client(&self.base_config, region, self.credentials.clone())
            })
            .clone()
    }
}

fn create_s3_client(
    base_config: &SdkConfig,
    region_id: &str,
    credentials: Option<SharedCredentialsProvider>,
) -> Client {
    let mut builder = Builder::from(base_config).region(Region::new(region_id.to_owned()));
    if let Some(credentials) = credentials {
        builder = builder.credentials_provider(credentials);
    }
    Client::from_conf(builder.build())
}

fn classify(err: &SdkError<GetObjectError>) -> FetchErrorKind {
    match err.as_service_error() {
        Some(service_err) if service_err.is_no_such_key() => FetchErrorKind::NotFound,
        Some(service_err) if service_err.code() == Some("AccessDenied") => {
            FetchErrorKind::AccessDenied
        }
        _ => FetchErrorKind::Other,
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn fetch(&self, object: &ObjectReference) -> Result<FetchedObject> {
        let fetch_error = |kind: FetchErrorKind, source: BoxError| Error::Fetch {
            kind,
            bucket: object.get_bucket().to_owned(),
            key: object.get_key().to_owned(),
            source,
        };

        let output = self
            .get_client(object.get_region())
            .get_object()
            .bucket(object.get_bucket())
            .key(object.get_key())
            .send()
            .await
            .map_err(|e| {
                log::error!("AWS error getting {object}: {e:?}");
                fetch_error(classify(&e), e.into())
            })?;

        let content_type = output.content_type().map(str::to_owned);
        let content_encoding = output.content_encoding().map(str::to_owned);
        let body = output.body.collect().await.map_err(|e| {
            log::error!("Error reading body of {object}: {e}");
            fetch_error(FetchErrorKind::Other, e.into())
        })?;

        Ok(FetchedObject::new(
            body.into_bytes().to_vec(),
            content_type,
            content_encoding,
        ))
    }
}

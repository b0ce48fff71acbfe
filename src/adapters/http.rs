use crate::adapters::decode_records;
use crate::config::{CollectionPaths, TomlConfig};
use crate::domain::model::{Collection, Course, Enrollment, Instructor, Participant, Record, Room};
use crate::domain::ports::CollectionLoader;
use crate::utils::error::{KpiError, Result};
use crate::utils::validation::validate_required_field;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Reads collections from a record service, one GET per collection.
pub struct HttpCollectionLoader {
    client: Client,
    endpoint: String,
    paths: CollectionPaths,
}

impl HttpCollectionLoader {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            paths: CollectionPaths::default(),
        }
    }

    pub fn with_paths(mut self, paths: CollectionPaths) -> Self {
        self.paths = paths;
        self
    }

    pub fn from_config(config: &TomlConfig) -> Result<Self> {
        let endpoint = validate_required_field("source.endpoint", &config.source.endpoint)?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(headers) = &config.source.headers {
            builder = builder.default_headers(header_map(headers)?);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.clone(),
            paths: config.collections.clone(),
        })
    }

    pub fn url(&self, collection: Collection) -> String {
        format!(
            "{}/{}",
            self.endpoint.trim_end_matches('/'),
            self.paths.path(collection).trim_start_matches('/')
        )
    }

    async fn fetch<F>(&self, collection: Collection) -> Result<Vec<Record<F>>>
    where
        F: DeserializeOwned + Default,
    {
        let url = self.url(collection);
        tracing::debug!("Fetching {} from {}", collection, url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        tracing::debug!("{} response status: {}", collection, status);

        if !status.is_success() {
            return Err(KpiError::HttpStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body: serde_json::Value = response.json().await?;
        let records = decode_records(collection, body)?;
        tracing::debug!("Fetched {} {} records", records.len(), collection);
        Ok(records)
    }
}

fn header_map(headers: &std::collections::HashMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
            KpiError::InvalidConfigValueError {
                field: "source.headers".to_string(),
                value: key.clone(),
                reason: e.to_string(),
            }
        })?;
        // Header values often carry secrets; keep them out of the error.
        let value = HeaderValue::from_str(value).map_err(|e| KpiError::InvalidConfigValueError {
            field: format!("source.headers.{}", key),
            value: "<redacted>".to_string(),
            reason: e.to_string(),
        })?;
        map.insert(name, value);
    }
    Ok(map)
}

#[async_trait]
impl CollectionLoader for HttpCollectionLoader {
    async fn instructors(&self) -> Result<Vec<Instructor>> {
        self.fetch(Collection::Instructors).await
    }

    async fn rooms(&self) -> Result<Vec<Room>> {
        self.fetch(Collection::Rooms).await
    }

    async fn participants(&self) -> Result<Vec<Participant>> {
        self.fetch(Collection::Participants).await
    }

    async fn courses(&self) -> Result<Vec<Course>> {
        self.fetch(Collection::Courses).await
    }

    async fn enrollments(&self) -> Result<Vec<Enrollment>> {
        self.fetch(Collection::Enrollments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_fetch_courses_array() {
        let server = MockServer::start_async().await;
        let courses_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/kurse");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(serde_json::json!([
                        {"record_id": "c1", "fields": {"titel": "Yoga", "status": "aktiv", "preis": 100}},
                        {"record_id": "c2", "fields": {"status": "geplant"}}
                    ]));
            })
            .await;

        let loader = HttpCollectionLoader::new(server.base_url());
        let courses = loader.courses().await.unwrap();

        courses_mock.assert_async().await;
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].price(), 100.0);
        assert_eq!(courses[1].fields.titel, None);
    }

    #[tokio::test]
    async fn test_custom_paths_and_headers() {
        let server = MockServer::start_async().await;
        let enrollments_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/rest/apps/a1/records")
                    .header("x-api-key", "secret");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(serde_json::json!({
                        "a1": {"fields": {"bezahlt": true, "kurs": ["c1"]}}
                    }));
            })
            .await;

        let mut config = TomlConfig::local("./unused");
        config.source.r#type = "http".to_string();
        config.source.endpoint = Some(server.url("/rest/"));
        config.source.timeout_seconds = Some(5);
        config.source.headers = Some(HashMap::from([(
            "X-API-Key".to_string(),
            "secret".to_string(),
        )]));
        config.collections.anmeldungen = "/apps/a1/records".to_string();

        let loader = HttpCollectionLoader::from_config(&config).unwrap();
        assert_eq!(
            loader.url(Collection::Enrollments),
            server.url("/rest/apps/a1/records")
        );

        let enrollments = loader.enrollments().await.unwrap();

        enrollments_mock.assert_async().await;
        assert_eq!(enrollments.len(), 1);
        assert_eq!(enrollments[0].record_id, "a1");
        assert!(enrollments[0].is_paid());
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start_async().await;
        let rooms_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/raeume");
                then.status(500);
            })
            .await;

        let loader = HttpCollectionLoader::new(server.base_url());
        let err = loader.rooms().await.unwrap_err();

        rooms_mock.assert_async().await;
        match err {
            KpiError::HttpStatus { status, url } => {
                assert_eq!(status, 500);
                assert!(url.ends_with("/raeume"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_header_name_is_config_error() {
        let headers = HashMap::from([("bad header".to_string(), "x".to_string())]);
        assert!(matches!(
            header_map(&headers),
            Err(KpiError::InvalidConfigValueError { .. })
        ));
    }
}

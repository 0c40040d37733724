//! Catalog search.

use easy_common::error::{EasyError, Result};

use crate::source::CatalogSource;

/// Returns catalog services whose name contains `query`, ignoring case.
///
/// Results keep catalog order.
///
/// # Errors
///
/// Returns [`EasyError::Config`] for a blank query, or any error from
/// [`CatalogSource::list_available`].
pub fn search(source: &dyn CatalogSource, query: &str) -> Result<Vec<String>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Err(EasyError::Config {
            message: "search query is empty".into(),
        });
    }
    let matches: Vec<String> = source
        .list_available()?
        .into_iter()
        .filter(|name| name.to_lowercase().contains(&needle))
        .collect();
    tracing::debug!(query, count = matches.len(), "catalog search");
    Ok(matches)
}

/// Short description of a well-known service.
#[must_use]
pub fn describe(name: &str) -> Option<&'static str> {
    let description = match name.to_lowercase().as_str() {
        "postgres" => "PostgreSQL database server",
        "mysql" => "MySQL database server",
        "mongodb" => "MongoDB NoSQL database",
        "redis" => "Redis in-memory data store",
        "nginx" => "NGINX web server",
        "apache" => "Apache HTTP Server",
        "elasticsearch" => "Elasticsearch search engine",
        "rabbitmq" => "RabbitMQ message broker",
        "kafka" => "Apache Kafka streaming platform",
        "jenkins" => "Jenkins automation server",
        _ => return None,
    };
    Some(description)
}

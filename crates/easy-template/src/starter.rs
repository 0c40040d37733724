//! Starter templates for `easy init`.

use std::fmt;
use std::str::FromStr;

use easy_common::error::EasyError;

use crate::content::{self, BundleContent};

/// Database engine used by the database starter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DbFlavor {
    /// PostgreSQL 15.
    #[default]
    Postgres,
    /// MySQL 8.
    Mysql,
}

/// Starter layouts offered by `init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitTemplate {
    /// Single nginx container serving `./data`.
    Basic,
    /// One database server with a persisted volume.
    Database(DbFlavor),
    /// Node app behind nginx with a postgres backend.
    Webapp,
    /// Descriptor skeleton with no services.
    Empty,
}

impl InitTemplate {
    /// Every template name accepted by [`FromStr`].
    pub const NAMES: [&'static str; 6] = ["basic", "database", "postgres", "mysql", "webapp", "empty"];

    /// Short label used in the generated readme.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Database(DbFlavor::Postgres) => "database (postgres)",
            Self::Database(DbFlavor::Mysql) => "database (mysql)",
            Self::Webapp => "webapp",
            Self::Empty => "empty",
        }
    }

    /// One-line description for help output.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Basic => "Simple single-container setup",
            Self::Database(_) => "PostgreSQL or MySQL database",
            Self::Webapp => "Full stack with app, database, and reverse proxy",
            Self::Empty => "Empty descriptor to fill in from scratch",
        }
    }

    /// Renders the starter bundle for `service`.
    #[must_use]
    pub fn render(self, service: &str) -> BundleContent {
        let descriptor = match self {
            Self::Basic => BASIC.to_string(),
            Self::Database(flavor) => database(flavor),
            Self::Webapp => WEBAPP.to_string(),
            Self::Empty => EMPTY.to_string(),
        };
        BundleContent {
            descriptor,
            readme: content::readme(service, self.label(), &[]),
            template: self.label().to_string(),
        }
    }
}

impl fmt::Display for InitTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InitTemplate {
    type Err = EasyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "database" | "postgres" => Ok(Self::Database(DbFlavor::Postgres)),
            "mysql" => Ok(Self::Database(DbFlavor::Mysql)),
            "webapp" => Ok(Self::Webapp),
            "empty" => Ok(Self::Empty),
            other => Err(EasyError::Config {
                message: format!(
                    "unknown template '{other}' (expected one of: {})",
                    Self::NAMES.join(", ")
                ),
            }),
        }
    }
}

const BASIC: &str = r#"version: '3.8'

services:
  app:
    image: nginx:latest
    ports:
      - "8080:80"
    volumes:
      - ./data:/usr/share/nginx/html
    restart: unless-stopped
"#;

const WEBAPP: &str = r#"version: '3.8'

services:
  app:
    image: node:18-alpine
    working_dir: /app
    volumes:
      - ./app:/app
    environment:
      - NODE_ENV=production
      - DATABASE_URL=postgres://user:password@db:5432/mydb
    command: npm start
    depends_on:
      - db
    restart: unless-stopped

  db:
    image: postgres:15
    environment:
      POSTGRES_PASSWORD: password
      POSTGRES_USER: user
      POSTGRES_DB: mydb
    volumes:
      - db_data:/var/lib/postgresql/data
    restart: unless-stopped

  nginx:
    image: nginx:alpine
    ports:
      - "80:80"
    volumes:
      - ./nginx.conf:/etc/nginx/nginx.conf:ro
    depends_on:
      - app
    restart: unless-stopped

volumes:
  db_data:
"#;

const EMPTY: &str = "version: '3.8'\n\nservices:\n  # Add your services here\n";

fn database(flavor: DbFlavor) -> String {
    let (image, password, user, db, port, data) = match flavor {
        DbFlavor::Postgres => (
            "postgres:15",
            "POSTGRES_PASSWORD",
            "POSTGRES_USER",
            "POSTGRES_DB",
            5432,
            "/var/lib/postgresql/data",
        ),
        DbFlavor::Mysql => (
            "mysql:8",
            "MYSQL_ROOT_PASSWORD",
            "MYSQL_USER",
            "MYSQL_DATABASE",
            3306,
            "/var/lib/mysql",
        ),
    };
    format!(
        "version: '3.8'\n\
         \n\
         services:\n\
         \x20 db:\n\
         \x20   image: {image}\n\
         \x20   environment:\n\
         \x20     {password}: changeme\n\
         \x20     {user}: user\n\
         \x20     {db}: mydb\n\
         \x20   ports:\n\
         \x20     - \"{port}:{port}\"\n\
         \x20   volumes:\n\
         \x20     - db_data:{data}\n\
         \x20   restart: unless-stopped\n\
         \n\
         volumes:\n\
         \x20 db_data:\n"
    )
}

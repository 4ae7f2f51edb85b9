// Environment-driven configuration and the store wiring that depends on it.

use crate::modules::shifts::core::roster::{DEFAULT_CAPACITY_COLUMN, DEFAULT_ID_COLUMN, RosterLayout};
use crate::shared::infrastructure::table_store::TableStore;
use crate::shared::infrastructure::table_store::cached::CachedTableStore;
use crate::shared::infrastructure::table_store::csv_file::CsvFileTableStore;
use crate::shared::infrastructure::table_store::github_file::GitHubFileTableStore;
use crate::shared::infrastructure::table_store::google_auth::{
    AccessTokenSource, ServiceAccountTokens, StaticToken,
};
use crate::shared::infrastructure::table_store::google_sheets::GoogleSheetsTableStore;
use reqwest::Client;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_PAGE_TITLE: &str = "Turni Pubblica Assistenza Dego";
pub const DEFAULT_ROSTER_WORKSHEET: &str = "Turni_Master";
pub const DEFAULT_REGISTRATIONS_WORKSHEET: &str = "Iscrizioni";
pub const DEFAULT_REGISTRATIONS_PATH: &str = "iscrizioni.csv";
pub const DEFAULT_GITHUB_BRANCH: &str = "main";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("unusable service account key {path:?}: {reason}")]
    Credentials { path: PathBuf, reason: String },
}

/// How the Sheets stores authenticate. A service-account key is the deployed
/// setup; a static token expires within the hour and only suits local runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetsCredentials {
    ServiceAccountKey(PathBuf),
    StaticToken(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetsAccess {
    pub spreadsheet_id: String,
    pub credentials: SheetsCredentials,
}

pub struct Stores {
    pub roster: Arc<dyn TableStore>,
    pub registrations: Arc<dyn TableStore>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterSource {
    Sheets {
        access: SheetsAccess,
        worksheet: String,
    },
    CsvFile {
        path: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationsSink {
    Sheets {
        access: SheetsAccess,
        worksheet: String,
    },
    GitHub {
        repository: String,
        token: String,
        branch: String,
        path: String,
    },
    CsvFile {
        path: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub page_title: String,
    pub require_email: bool,
    pub cache_ttl: Duration,
    pub roster_layout: RosterLayout,
    pub roster: RosterSource,
    pub registrations: RegistrationsSink,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));
        let or_default = |name: &str, default: &str| get(name).unwrap_or_else(|| default.to_string());

        let bind_addr = parse_with("SHIFTS_BIND_ADDR", &or_default("SHIFTS_BIND_ADDR", DEFAULT_BIND_ADDR), |v| {
            v.parse::<SocketAddr>().ok()
        })?;
        let require_email = match get("SHIFTS_REQUIRE_EMAIL") {
            Some(v) => parse_flag("SHIFTS_REQUIRE_EMAIL", &v)?,
            None => true,
        };
        let cache_ttl = match get("SHIFTS_CACHE_TTL_SECS") {
            Some(v) => Duration::from_secs(parse_with("SHIFTS_CACHE_TTL_SECS", &v, |v| {
                v.parse::<u64>().ok()
            })?),
            None => Duration::ZERO,
        };

        let positional = match get("SHIFTS_ROSTER_POSITIONAL") {
            Some(v) => parse_flag("SHIFTS_ROSTER_POSITIONAL", &v)?,
            None => false,
        };
        let roster_layout = if positional {
            RosterLayout::Positional
        } else {
            RosterLayout::ByHeader {
                id_column: or_default("SHIFTS_ROSTER_ID_COLUMN", DEFAULT_ID_COLUMN),
                capacity_column: or_default("SHIFTS_ROSTER_CAPACITY_COLUMN", DEFAULT_CAPACITY_COLUMN),
            }
        };

        let sheets = || -> Result<SheetsAccess, ConfigError> {
            let spreadsheet_id = required("GOOGLE_SHEETS_SPREADSHEET_ID")?;
            let credentials = match (
                get("GOOGLE_SHEETS_CREDENTIALS_FILE"),
                get("GOOGLE_SHEETS_ACCESS_TOKEN"),
            ) {
                (Some(path), _) => SheetsCredentials::ServiceAccountKey(PathBuf::from(path)),
                (None, Some(token)) => SheetsCredentials::StaticToken(token),
                (None, None) => return Err(ConfigError::Missing("GOOGLE_SHEETS_CREDENTIALS_FILE")),
            };
            Ok(SheetsAccess {
                spreadsheet_id,
                credentials,
            })
        };

        let roster_backend = or_default("SHIFTS_ROSTER_BACKEND", "sheets");
        let roster = match roster_backend.as_str() {
            "sheets" => RosterSource::Sheets {
                access: sheets()?,
                worksheet: or_default("SHIFTS_ROSTER_WORKSHEET", DEFAULT_ROSTER_WORKSHEET),
            },
            "csv_file" => RosterSource::CsvFile {
                path: PathBuf::from(required("SHIFTS_ROSTER_PATH")?),
            },
            _ => {
                return Err(ConfigError::Invalid {
                    name: "SHIFTS_ROSTER_BACKEND",
                    value: roster_backend,
                });
            }
        };

        let registrations_backend = or_default("SHIFTS_REGISTRATIONS_BACKEND", "sheets");
        let registrations_path =
            or_default("SHIFTS_REGISTRATIONS_PATH", DEFAULT_REGISTRATIONS_PATH);
        let registrations = match registrations_backend.as_str() {
            "sheets" => RegistrationsSink::Sheets {
                access: sheets()?,
                worksheet: or_default(
                    "SHIFTS_REGISTRATIONS_WORKSHEET",
                    DEFAULT_REGISTRATIONS_WORKSHEET,
                ),
            },
            "github" => RegistrationsSink::GitHub {
                repository: required("GITHUB_REPOSITORY")?,
                token: required("GITHUB_TOKEN")?,
                branch: or_default("GITHUB_BRANCH", DEFAULT_GITHUB_BRANCH),
                path: registrations_path,
            },
            "csv_file" => RegistrationsSink::CsvFile {
                path: PathBuf::from(registrations_path),
            },
            _ => {
                return Err(ConfigError::Invalid {
                    name: "SHIFTS_REGISTRATIONS_BACKEND",
                    value: registrations_backend,
                });
            }
        };

        Ok(Self {
            bind_addr,
            page_title: or_default("SHIFTS_PAGE_TITLE", DEFAULT_PAGE_TITLE),
            require_email,
            cache_ttl,
            roster_layout,
            roster,
            registrations,
        })
    }

    /// Builds both stores. Sheets stores built from the same credentials share
    /// one token source.
    pub fn stores(&self, client: &Client) -> Result<Stores, ConfigError> {
        let mut tokens = TokenSources::default();

        let roster: Arc<dyn TableStore> = match &self.roster {
            RosterSource::Sheets { access, worksheet } => Arc::new(GoogleSheetsTableStore::new(
                client.clone(),
                &access.spreadsheet_id,
                worksheet,
                tokens.for_credentials(&access.credentials)?,
            )),
            RosterSource::CsvFile { path } => Arc::new(CsvFileTableStore::new(path.clone())),
        };

        let registrations: Arc<dyn TableStore> = match &self.registrations {
            RegistrationsSink::Sheets { access, worksheet } => {
                Arc::new(GoogleSheetsTableStore::new(
                    client.clone(),
                    &access.spreadsheet_id,
                    worksheet,
                    tokens.for_credentials(&access.credentials)?,
                ))
            }
            RegistrationsSink::GitHub {
                repository,
                token,
                branch,
                path,
            } => Arc::new(
                GitHubFileTableStore::new(client.clone(), repository, branch, path, token).map_err(
                    |_| ConfigError::Invalid {
                        name: "GITHUB_REPOSITORY",
                        value: repository.clone(),
                    },
                )?,
            ),
            RegistrationsSink::CsvFile { path } => Arc::new(CsvFileTableStore::new(path.clone())),
        };

        Ok(Stores {
            roster: Arc::new(CachedTableStore::new("roster", roster, self.cache_ttl)),
            registrations: Arc::new(CachedTableStore::new(
                "registrations",
                registrations,
                self.cache_ttl,
            )),
        })
    }
}

#[derive(Default)]
struct TokenSources {
    built: Vec<(SheetsCredentials, Arc<dyn AccessTokenSource>)>,
}

impl TokenSources {
    fn for_credentials(
        &mut self,
        credentials: &SheetsCredentials,
    ) -> Result<Arc<dyn AccessTokenSource>, ConfigError> {
        if let Some((_, source)) = self.built.iter().find(|(c, _)| c == credentials) {
            return Ok(source.clone());
        }
        let source: Arc<dyn AccessTokenSource> = match credentials {
            SheetsCredentials::ServiceAccountKey(path) => Arc::new(
                ServiceAccountTokens::from_file(path).map_err(|e| ConfigError::Credentials {
                    path: path.clone(),
                    reason: e.to_string(),
                })?,
            ),
            SheetsCredentials::StaticToken(token) => {
                tracing::warn!("using a static sheets access token; it expires within the hour");
                Arc::new(StaticToken::new(token.clone()))
            }
        };
        self.built.push((credentials.clone(), source.clone()));
        Ok(source)
    }
}

fn parse_with<T>(
    name: &'static str,
    value: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, ConfigError> {
    parse(value).ok_or_else(|| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    parse_with(name, value, |v| match v.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    })
}

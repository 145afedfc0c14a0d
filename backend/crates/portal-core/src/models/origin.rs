//! Identity source a user record was first created from.

use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Local username/password account (also the value for legacy records)
    #[default]
    Local,
    /// Federated login through the OIDC provider
    Oidc,
    /// Federated login through the ticket-based SSO server
    Ticket,
    /// Placeholder created from the Agent Catalog Service user directory
    Catalog,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Oidc => "oidc",
            Self::Ticket => "ticket",
            Self::Catalog => "catalog",
        }
    }

    /// Prefix applied to record ids minted for this origin.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Oidc => "oidc-",
            Self::Ticket => "cas-",
            Self::Local | Self::Catalog => "",
        }
    }

    /// Build the namespaced record id for a raw identifier from this origin.
    pub fn namespaced_id(&self, raw: &str) -> String {
        format!("{}{}", self.id_prefix(), raw)
    }

    /// Extension-bag key holding the raw upstream payload for this origin.
    pub fn extension_key(&self) -> Option<&'static str> {
        match self {
            Self::Local => None,
            Self::Oidc => Some("oidc_data"),
            Self::Ticket => Some("ticket_data"),
            Self::Catalog => Some("catalog_data"),
        }
    }

    /// Whether users of this origin authenticate somewhere other than the local bridge.
    pub fn is_federated(&self) -> bool {
        !matches!(self, Self::Local)
    }

    /// Human readable name of the login channel users of this origin must use.
    pub fn login_channel(&self) -> &'static str {
        match self {
            Self::Local => "local login",
            Self::Oidc => "OIDC single sign-on",
            Self::Ticket => "CAS single sign-on",
            Self::Catalog => "agent catalog single sign-on",
        }
    }
}

impl FromStr for Origin {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s {
            "local" => Ok(Self::Local),
            "oidc" => Ok(Self::Oidc),
            "ticket" => Ok(Self::Ticket),
            "catalog" => Ok(Self::Catalog),
            _ => Err(CoreError::InvalidOrigin {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

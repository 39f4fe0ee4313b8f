//! Connection record model shared by the store and the command handlers.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_PORT: u16 = 22;

/// Credential kind used when connecting.
#[derive(clap::ValueEnum, Serialize, Deserialize, Clone, Copy, Debug, Default, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    /// Private key file (`ssh -i`)
    #[default]
    Key,
    /// Password typed at the client's prompt
    Password,
}

impl AuthMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::Key => "key",
            AuthMethod::Password => "password",
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored connection profile, keyed by `nickname`.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct Record {
    pub nickname: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub auth_method: AuthMethod,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key_path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
}

impl Record {
    /// `user@host:port`
    pub fn address(&self) -> String {
        format!("{}@{}:{}", self.user, self.host, self.port)
    }

    /// `user@host`, the login target handed to the client.
    pub fn destination(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }

    /// Key path only when key auth is the active method.
    pub fn active_key_path(&self) -> Option<&str> {
        match self.auth_method {
            AuthMethod::Key if !self.key_path.is_empty() => Some(&self.key_path),
            _ => None,
        }
    }

    /// Password only when password auth is the active method.
    pub fn active_password(&self) -> Option<&str> {
        match self.auth_method {
            AuthMethod::Password if !self.password.is_empty() => Some(&self.password),
            _ => None,
        }
    }
}

/// Selective overwrite for [`Record`].
///
/// A field is applied only when it is present *and* non-empty (non-zero for
/// the port). An empty string or `0` is indistinguishable from "not given",
/// so a patch can never clear a field.
#[derive(Clone, Debug, Default)]
pub struct RecordPatch {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub auth_method: Option<AuthMethod>,
    pub key_path: Option<String>,
    pub password: Option<String>,
}

impl RecordPatch {
    pub fn apply(&self, record: &mut Record) {
        if let Some(host) = non_empty(&self.host) {
            record.host = host.to_string();
        }
        if let Some(port) = self.port.filter(|p| *p != 0) {
            record.port = port;
        }
        if let Some(user) = non_empty(&self.user) {
            record.user = user.to_string();
        }
        if let Some(method) = self.auth_method {
            record.auth_method = method;
        }
        if let Some(key) = non_empty(&self.key_path) {
            record.key_path = key.to_string();
        }
        if let Some(pw) = non_empty(&self.password) {
            record.password = pw.to_string();
        }
    }

    /// True when applying the patch would change nothing.
    pub fn is_noop(&self) -> bool {
        non_empty(&self.host).is_none()
            && self.port.filter(|p| *p != 0).is_none()
            && non_empty(&self.user).is_none()
            && self.auth_method.is_none()
            && non_empty(&self.key_path).is_none()
            && non_empty(&self.password).is_none()
    }
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Record {
        Record {
            nickname: "db".into(),
            host: "10.0.0.9".into(),
            port: 22,
            user: "alice".into(),
            auth_method: AuthMethod::Key,
            key_path: "/home/alice/.ssh/id_ed25519".into(),
            password: String::new(),
        }
    }

    #[test]
    fn patch_port_only_keeps_user() {
        let mut r = alice();
        let patch = RecordPatch {
            port: Some(2222),
            ..Default::default()
        };
        patch.apply(&mut r);
        assert_eq!(r.port, 2222);
        assert_eq!(r.user, "alice");
        assert_eq!(r.host, "10.0.0.9");
    }

    #[test]
    fn empty_and_zero_mean_unchanged() {
        let mut r = alice();
        let patch = RecordPatch {
            host: Some(String::new()),
            port: Some(0),
            user: Some(String::new()),
            ..Default::default()
        };
        assert!(patch.is_noop());
        patch.apply(&mut r);
        assert_eq!(r, alice());
    }

    #[test]
    fn switching_method_keeps_old_credential() {
        let mut r = alice();
        RecordPatch {
            auth_method: Some(AuthMethod::Password),
            password: Some("hunter2".into()),
            ..Default::default()
        }
        .apply(&mut r);
        assert_eq!(r.auth_method, AuthMethod::Password);
        assert_eq!(r.key_path, "/home/alice/.ssh/id_ed25519");
        assert_eq!(r.active_key_path(), None);
        assert_eq!(r.active_password(), Some("hunter2"));
    }

    #[test]
    fn json_omits_empty_credentials() {
        let v = serde_json::to_value(alice()).unwrap();
        assert_eq!(v["auth_method"], "key");
        assert!(v.get("password").is_none());
        assert_eq!(v["key_path"], "/home/alice/.ssh/id_ed25519");
    }

    #[test]
    fn json_missing_optional_fields_deserialize() {
        let raw = r#"{"nickname":"x","host":"h","port":2200,"user":"u","auth_method":"password"}"#;
        let r: Record = serde_json::from_str(raw).unwrap();
        assert_eq!(r.auth_method, AuthMethod::Password);
        assert!(r.key_path.is_empty());
        assert!(r.password.is_empty());
    }

    #[test]
    fn address_formats() {
        let r = alice();
        assert_eq!(r.address(), "alice@10.0.0.9:22");
        assert_eq!(r.destination(), "alice@10.0.0.9");
    }
}

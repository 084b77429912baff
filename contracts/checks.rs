//! Provider check records and request bodies

use serde::{Deserialize, Deserializer, Serialize};

use super::Host;

/// Default check type sent on create/update
pub const DEFAULT_CHECK_TYPE: &str = "http";
/// Consecutive failures before the provider alerts
pub const DEFAULT_ALERT_THRESHOLD: u32 = 2;
/// Maximum response time in milliseconds
pub const DEFAULT_MAX_TIME_MS: u32 = 5000;
/// Poll interval in seconds
pub const DEFAULT_INTERVAL_SECS: u32 = 120;

/// Check as returned by `GET /checks`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    /// Provider-assigned identifier
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,

    /// Check name; matched against inventory labels
    pub name: String,

    /// Whether the provider has paused the check
    #[serde(rename = "isPaused", default, deserialize_with = "null_as_default")]
    pub is_paused: bool,
}

/// Treat an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Check {
    /// Whether an update request can be addressed to this check
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Form body for `PUT /checks` and `POST /checks/{id}`
///
/// Field order is preserved on the wire. `alertTreshold` is the provider's
/// spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckForm {
    pub name: String,

    pub url: String,

    #[serde(rename = "type")]
    pub check_type: String,

    #[serde(rename = "alertTreshold")]
    pub alert_threshold: u32,

    #[serde(rename = "maxTime")]
    pub max_time_ms: u32,

    pub interval: u32,
}

impl Default for CheckForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            url: "http://".to_string(),
            check_type: DEFAULT_CHECK_TYPE.to_string(),
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            max_time_ms: DEFAULT_MAX_TIME_MS,
            interval: DEFAULT_INTERVAL_SECS,
        }
    }
}

impl CheckForm {
    /// Default form with name and URL taken from the host
    pub fn for_host(host: &Host) -> Self {
        Self {
            name: host.label.clone(),
            url: host.liveness_url(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_decodes_provider_fields() {
        let raw = r#"{"_id":"99","name":"web1","isPaused":true,"isUp":false,"url":"http://x"}"#;
        let check: Check = serde_json::from_str(raw).unwrap();

        assert_eq!(check.id, "99");
        assert_eq!(check.name, "web1");
        assert!(check.is_paused);
        assert!(check.has_id());
    }

    #[test]
    fn test_check_defaults_missing_flags() {
        let check: Check = serde_json::from_str(r#"{"name":"web1"}"#).unwrap();

        assert!(!check.is_paused);
        assert!(!check.has_id());
    }

    #[test]
    fn test_check_null_fields_default() {
        let checks: Vec<Check> = serde_json::from_str(
            r#"[
                {"name": "web1", "isPaused": true, "_id": null},
                {"name": "web2", "isPaused": null, "_id": "7"}
            ]"#,
        )
        .unwrap();

        assert!(checks[0].is_paused);
        assert!(!checks[0].has_id());
        assert!(!checks[1].is_paused);
        assert_eq!(checks[1].id, "7");
    }

    #[test]
    fn test_check_rejects_wrong_types() {
        assert!(serde_json::from_str::<Check>(r#"{"name":42}"#).is_err());
        assert!(serde_json::from_str::<Check>(r#"{"name":"a","isPaused":"yes"}"#).is_err());
    }

    #[test]
    fn test_default_form() {
        let form = CheckForm::default();
        assert_eq!(form.name, "");
        assert_eq!(form.url, "http://");
        assert_eq!(form.check_type, "http");
        assert_eq!(form.alert_threshold, 2);
        assert_eq!(form.max_time_ms, 5000);
        assert_eq!(form.interval, 120);
    }

    #[test]
    fn test_form_for_host_overrides_name_and_url() {
        let form = CheckForm::for_host(&Host::new("web1", "1.2.3.4"));

        assert_eq!(form.name, "web1");
        assert_eq!(form.url, "http://1.2.3.4/live/live.htm");
        assert_eq!(form.check_type, DEFAULT_CHECK_TYPE);
        assert_eq!(form.interval, DEFAULT_INTERVAL_SECS);
    }

    #[test]
    fn test_form_wire_names() {
        let value = serde_json::to_value(CheckForm::default()).unwrap();
        let obj = value.as_object().unwrap();

        for key in ["name", "url", "type", "alertTreshold", "maxTime", "interval"] {
            assert!(obj.contains_key(key), "missing {}", key);
        }
        assert_eq!(obj.len(), 6);
    }
}

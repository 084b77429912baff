//! Decision table
//!
//! | in index | paused | has id | action        |
//! |----------|--------|--------|---------------|
//! | no       |        |        | Create        |
//! | yes      | yes    | yes    | Reactivate    |
//! | yes      | yes    | no     | Unaddressable |
//! | yes      | no     |        | Unchanged     |

use std::collections::HashMap;

use crate::contracts::{Check, Host};

/// Provider checks keyed by name
#[derive(Debug, Clone, Default)]
pub struct CheckIndex {
    by_name: HashMap<String, Check>,
}

impl CheckIndex {
    /// Index checks by name; on duplicate names the later entry wins
    pub fn from_checks(checks: Vec<Check>) -> Self {
        let mut by_name = HashMap::with_capacity(checks.len());
        for check in checks {
            if let Some(previous) = by_name.insert(check.name.clone(), check) {
                tracing::warn!(
                    name = %previous.name,
                    replaced_id = %previous.id,
                    "Duplicate check name in provider list"
                );
            }
        }
        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Option<&Check> {
        self.by_name.get(name)
    }

    pub fn count(&self) -> usize {
        self.by_name.len()
    }
}

/// What to do for a single inventory host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No check exists; `PUT /checks`
    Create { host: Host },

    /// Check is paused; `POST /checks/{id}`
    Reactivate { id: String, host: Host },

    /// Check exists and is active
    Unchanged { host: Host },

    /// Check is paused but the provider gave no id to address it by
    Unaddressable { host: Host },
}

impl Action {
    /// Decide the action for one host
    pub fn decide(host: &Host, index: &CheckIndex) -> Self {
        let host = host.clone();
        match index.get(&host.label) {
            None => Action::Create { host },
            Some(check) if !check.is_paused => Action::Unchanged { host },
            Some(check) if check.has_id() => Action::Reactivate {
                id: check.id.clone(),
                host,
            },
            Some(_) => Action::Unaddressable { host },
        }
    }

    pub fn host(&self) -> &Host {
        match self {
            Action::Create { host }
            | Action::Reactivate { host, .. }
            | Action::Unchanged { host }
            | Action::Unaddressable { host } => host,
        }
    }
}

/// One action per host, in inventory order
pub fn plan(hosts: &[Host], index: &CheckIndex) -> Vec<Action> {
    hosts.iter().map(|h| Action::decide(h, index)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn check(name: &str, id: &str, paused: bool) -> Check {
        Check {
            id: id.to_string(),
            name: name.to_string(),
            is_paused: paused,
        }
    }

    #[test]
    fn test_absent_host_is_created() {
        let host = Host::new("web1", "1.2.3.4");
        let actions = plan(&[host.clone()], &CheckIndex::default());

        assert_eq!(actions, vec![Action::Create { host }]);
    }

    #[test]
    fn test_paused_check_is_reactivated() {
        let host = Host::new("web1", "1.2.3.4");
        let index = CheckIndex::from_checks(vec![check("web1", "99", true)]);

        assert_eq!(
            Action::decide(&host, &index),
            Action::Reactivate {
                id: "99".to_string(),
                host
            }
        );
    }

    #[test]
    fn test_active_check_is_unchanged() {
        let host = Host::new("web1", "1.2.3.4");
        let index = CheckIndex::from_checks(vec![check("web1", "99", false)]);

        assert_eq!(Action::decide(&host, &index), Action::Unchanged { host });
    }

    #[test]
    fn test_paused_without_id_is_unaddressable() {
        let host = Host::new("web1", "1.2.3.4");
        let index = CheckIndex::from_checks(vec![check("web1", "", true)]);

        assert_eq!(Action::decide(&host, &index), Action::Unaddressable { host });
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let index = CheckIndex::from_checks(vec![
            check("web1", "1", false),
            check("web1", "2", true),
        ]);

        assert_eq!(index.count(), 1);
        assert_eq!(index.get("web1").unwrap().id, "2");
    }

    #[test]
    fn test_plan_preserves_host_order() {
        let hosts = vec![
            Host::new("b", "10.0.0.2"),
            Host::new("a", "10.0.0.1"),
        ];
        let actions = plan(&hosts, &CheckIndex::default());

        let labels: Vec<_> = actions.iter().map(|a| a.host().label.as_str()).collect();
        assert_eq!(labels, vec!["b", "a"]);
    }

    fn arb_checks() -> impl Strategy<Value = Vec<Check>> {
        prop::collection::vec(
            ("[a-e]", "[0-9]{0,2}", any::<bool>())
                .prop_map(|(name, id, paused)| check(&name, &id, paused)),
            0..8,
        )
    }

    fn arb_hosts() -> impl Strategy<Value = Vec<Host>> {
        prop::collection::vec(
            ("[a-h]", "[0-9]{1,3}").prop_map(|(label, ip)| Host::new(label, ip)),
            0..8,
        )
    }

    proptest! {
        #[test]
        fn prop_one_action_per_host(hosts in arb_hosts(), checks in arb_checks()) {
            let index = CheckIndex::from_checks(checks);
            let actions = plan(&hosts, &index);

            prop_assert_eq!(actions.len(), hosts.len());
            for (action, host) in actions.iter().zip(&hosts) {
                prop_assert_eq!(action.host(), host);
            }
        }

        #[test]
        fn prop_requests_only_for_absent_or_paused(hosts in arb_hosts(), checks in arb_checks()) {
            let index = CheckIndex::from_checks(checks);

            for action in plan(&hosts, &index) {
                let existing = index.get(&action.host().label);
                match &action {
                    Action::Create { .. } => prop_assert!(existing.is_none()),
                    Action::Reactivate { id, .. } => {
                        let c = existing.unwrap();
                        prop_assert!(c.is_paused);
                        prop_assert_eq!(&c.id, id);
                        prop_assert!(!id.is_empty());
                    }
                    Action::Unchanged { .. } => prop_assert!(!existing.unwrap().is_paused),
                    Action::Unaddressable { .. } => prop_assert!(!existing.unwrap().has_id()),
                }
            }
        }
    }
}

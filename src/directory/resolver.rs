use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// A user record from the workspace directory export (`users.json`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub real_name: String,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub is_restricted: bool,
    #[serde(default)]
    pub is_ultra_restricted: bool,
    #[serde(default)]
    pub profile: Profile,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub email: String,
}

impl UserRecord {
    /// Why this account is never scored, if it isn't eligible.
    fn exclusion(&self) -> Option<Status> {
        if self.deleted {
            Some(Status::Deleted)
        } else if self.is_bot {
            Some(Status::Bot)
        } else if self.is_restricted {
            Some(Status::Restricted)
        } else if self.is_ultra_restricted {
            Some(Status::UltraRestricted)
        } else {
            None
        }
    }
}

/// One org-chart row, reduced to the two columns the join uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgRow {
    pub department: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Included,
    Ignored,
    NotInOrgChart,
    Deleted,
    Bot,
    Restricted,
    UltraRestricted,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Included => "included",
            Status::Ignored => "ignored",
            Status::NotInOrgChart => "not in org chart",
            Status::Deleted => "deleted",
            Status::Bot => "bot",
            Status::Restricted => "restricted",
            Status::UltraRestricted => "ultra-restricted",
        }
    }

    pub fn sort_key(&self) -> u8 {
        match self {
            Status::Included => 0,
            Status::Ignored => 1,
            Status::NotInOrgChart => 2,
            Status::Deleted => 3,
            Status::Bot => 4,
            Status::Restricted => 5,
            Status::UltraRestricted => 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub display_name: String,
    pub department: Option<String>,
    pub included: bool,
    pub status: Status,
}

/// Resolved lookups: who is who, which department they sit in, and whose
/// messages seed the graph. Unknown ids resolve to the empty string.
#[derive(Debug, Default)]
pub struct Directory {
    names: HashMap<String, String>,
    departments: HashMap<String, String>,
    included: HashSet<String>,
    identities: Vec<Identity>,
}

impl Directory {
    /// Join the user directory against the org chart and drop ignored emails.
    ///
    /// Only eligible accounts (not deleted, bot, restricted or
    /// ultra-restricted) get a name, can match an org-chart email, or can be
    /// ignored. Emails compare case-insensitively; when two eligible
    /// accounts share an email the later one owns it.
    pub fn resolve(users: &[UserRecord], org_chart: &[OrgRow], ignored_emails: &[String]) -> Self {
        let mut names = HashMap::new();
        let mut email_to_id: HashMap<String, &str> = HashMap::new();

        for user in users.iter().filter(|u| u.exclusion().is_none()) {
            names.insert(user.id.clone(), user.real_name.replace(',', ""));
            email_to_id.insert(user.profile.email.to_lowercase(), user.id.as_str());
        }

        let mut departments = HashMap::new();
        let mut included = HashSet::new();

        for row in org_chart {
            if row.email.is_empty() {
                continue;
            }
            let email = row.email.to_lowercase();
            match email_to_id.get(email.as_str()) {
                Some(&id) => {
                    departments.insert(id.to_string(), row.department.clone());
                    included.insert(id.to_string());
                }
                None => tracing::debug!("org chart email {email} matches no active user"),
            }
        }

        let mut ignored = HashSet::new();
        for line in ignored_emails {
            let email = line.trim().to_lowercase();
            if email.is_empty() {
                continue;
            }
            if let Some(&id) = email_to_id.get(email.as_str()) {
                tracing::info!("ignoring {email}: {id}");
                included.remove(id);
                ignored.insert(id);
            }
        }

        let identities = users
            .iter()
            .map(|user| {
                let status = user.exclusion().unwrap_or_else(|| {
                    if ignored.contains(user.id.as_str()) {
                        Status::Ignored
                    } else if included.contains(&user.id) {
                        Status::Included
                    } else {
                        Status::NotInOrgChart
                    }
                });
                Identity {
                    id: user.id.clone(),
                    display_name: user.real_name.replace(',', ""),
                    department: departments.get(&user.id).cloned(),
                    included: status == Status::Included,
                    status,
                }
            })
            .collect();

        Self {
            names,
            departments,
            included,
            identities,
        }
    }

    pub fn name_of(&self, id: &str) -> &str {
        self.names.get(id).map_or("", String::as_str)
    }

    pub fn department_of(&self, id: &str) -> &str {
        self.departments.get(id).map_or("", String::as_str)
    }

    pub fn is_included(&self, id: &str) -> bool {
        self.included.contains(id)
    }

    pub fn included_count(&self) -> usize {
        self.included.len()
    }

    /// Every directory record in input order, with its resolution status.
    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;

//! Client-side navigation targets and path rules.

/// Dashboard listings with a status filter dropdown
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dashboard {
    Events,
    Sponsorships,
    AdminPanel,
}

impl Dashboard {
    const fn segment(self) -> &'static str {
        match self {
            Self::Events => "events",
            Self::Sponsorships => "sponsorships",
            Self::AdminPanel => "admin-panel",
        }
    }

    /// Target for the selected filter option, e.g. `Past` -> `/dashboard/events/past`
    pub fn filter_path(self, selected_option: &str) -> String {
        format!(
            "/dashboard/{}/{}",
            self.segment(),
            selected_option.trim().to_lowercase()
        )
    }
}

/// Event id when `path` is an event sub-page (`/events/<id>/<section>`)
pub fn event_id_from_path(path: &str) -> Option<u64> {
    let mut segments = path.split('/').skip(1);
    if segments.next()? != "events" {
        return None;
    }
    let id = segments.next()?.parse().ok()?;
    let section = segments.next()?;
    (!section.is_empty() && section.chars().next().is_some_and(|c| c.is_ascii_alphabetic()))
        .then_some(id)
}

/// Whether the "create event" nav link is hidden on `path`
pub fn hides_create_event_link(path: &str) -> bool {
    let segments: Vec<&str> = path.split('/').collect();
    segments.get(3) == Some(&"sponsorships") || segments.get(1) == Some(&"auth")
}

/// Public events listing of a company profile, upcoming or past
pub fn company_events_path(company: &str, past: bool) -> String {
    if past {
        format!("/users/{company}?past=1")
    } else {
        format!("/users/{company}")
    }
}

/// Whether `path` is the edit view of a package (`.../edit`)
pub fn is_package_edit_view(path: &str) -> bool {
    path.trim_end_matches('/').rsplit('/').next() == Some("edit")
}

/// Package listing of an event, where an edit view returns when closed
pub fn event_packages_path(event_id: &str) -> String {
    format!("/events/{event_id}/packages")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_paths() {
        assert_eq!(Dashboard::Events.filter_path("Past"), "/dashboard/events/past");
        assert_eq!(Dashboard::Sponsorships.filter_path(" All "), "/dashboard/sponsorships/all");
        assert_eq!(Dashboard::AdminPanel.filter_path("Users"), "/dashboard/admin-panel/users");
    }

    #[test]
    fn test_event_id_from_path() {
        assert_eq!(event_id_from_path("/events/12/packages"), Some(12));
        assert_eq!(event_id_from_path("/events/12"), None);
        assert_eq!(event_id_from_path("/events/abc/packages"), None);
        assert_eq!(event_id_from_path("/users/12/packages"), None);
    }

    #[test]
    fn test_create_event_link_rules() {
        assert!(hides_create_event_link("/events/4/sponsorships"));
        assert!(hides_create_event_link("/auth/login"));
        assert!(!hides_create_event_link("/events/4/info"));
    }

    #[test]
    fn test_company_events_paths() {
        assert_eq!(company_events_path("acme", false), "/users/acme");
        assert_eq!(company_events_path("acme", true), "/users/acme?past=1");
    }

    #[test]
    fn test_package_edit_view() {
        assert!(is_package_edit_view("/events/4/packages/9/edit"));
        assert!(!is_package_edit_view("/events/4/packages"));
        assert!(!is_package_edit_view("/events/4/packages/editor"));
        assert_eq!(event_packages_path("4"), "/events/4/packages");
    }
}

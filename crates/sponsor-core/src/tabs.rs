//! Tab/Panel Switcher
//!
//! A row of tabs over one content region. Each tab loads an HTML fragment;
//! the tab becomes active only once its fragment arrives, and a fragment for
//! a tab that is no longer the latest request is dropped.

use crate::routes::Endpoint;

/// A tab that loads a fragment for some owner (event or profile)
pub trait Tab: Copy + Eq {
    /// Element id of the tab control
    fn dom_id(self) -> &'static str;

    /// Endpoint serving this tab's fragment
    fn endpoint(self, owner_id: &str) -> Endpoint;
}

/// Tabs on an event page
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventTab {
    Info,
    Sponsors,
}

impl EventTab {
    pub const ALL: [Self; 2] = [Self::Info, Self::Sponsors];
}

impl Tab for EventTab {
    fn dom_id(self) -> &'static str {
        match self {
            Self::Info => "eventInfoTab",
            Self::Sponsors => "sponsorsTab",
        }
    }

    fn endpoint(self, owner_id: &str) -> Endpoint {
        let event_id = owner_id.to_string();
        match self {
            Self::Info => Endpoint::EventInfo { event_id },
            Self::Sponsors => Endpoint::EventSponsors { event_id },
        }
    }
}

/// Tabs on a user profile
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileTab {
    LiveEvents,
    PastEvents,
    CurrentSponsorships,
    PastSponsorships,
}

impl ProfileTab {
    pub const ALL: [Self; 4] = [
        Self::LiveEvents,
        Self::PastEvents,
        Self::CurrentSponsorships,
        Self::PastSponsorships,
    ];
}

impl Tab for ProfileTab {
    fn dom_id(self) -> &'static str {
        match self {
            Self::LiveEvents => "live",
            Self::PastEvents => "pastEvent",
            Self::CurrentSponsorships => "current",
            Self::PastSponsorships => "pastSponsorship",
        }
    }

    fn endpoint(self, owner_id: &str) -> Endpoint {
        let user_id = owner_id.to_string();
        match self {
            Self::LiveEvents => Endpoint::ProfileEvents { user_id, status: "live".into() },
            Self::PastEvents => Endpoint::ProfileEvents { user_id, status: "past".into() },
            Self::CurrentSponsorships => Endpoint::ProfileSponsorships {
                user_id,
                status: "current".into(),
            },
            Self::PastSponsorships => Endpoint::ProfileSponsorships {
                user_id,
                status: "past".into(),
            },
        }
    }
}

/// Ticket for one in-flight fragment request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TabRequest<T> {
    pub tab: T,
    seq: u64,
}

/// Active-tab state for one tab row
#[derive(Clone, Debug)]
pub struct TabSet<T: Tab> {
    tabs: Vec<T>,
    active: Option<T>,
    latest: u64,
}

impl<T: Tab> TabSet<T> {
    pub fn new(tabs: impl Into<Vec<T>>, active: Option<T>) -> Self {
        Self {
            tabs: tabs.into(),
            active,
            latest: 0,
        }
    }

    pub fn tabs(&self) -> &[T] {
        &self.tabs
    }

    pub const fn active(&self) -> Option<T> {
        self.active
    }

    pub fn is_active(&self, tab: T) -> bool {
        self.active == Some(tab)
    }

    /// Start loading `tab`; supersedes any earlier request
    pub fn request(&mut self, tab: T) -> TabRequest<T> {
        self.latest += 1;
        TabRequest { tab, seq: self.latest }
    }

    /// Fragment arrived; activates the tab unless a newer request exists
    pub fn complete(&mut self, request: TabRequest<T>) -> bool {
        if request.seq != self.latest {
            tracing::debug!(tab = request.tab.dom_id(), "dropping superseded tab fragment");
            return false;
        }
        self.active = Some(request.tab);
        true
    }

    /// Whether `request` is still the latest one
    pub const fn is_current(&self, request: &TabRequest<T>) -> bool {
        request.seq == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_completed_tab_is_active() {
        let mut tabs = TabSet::new(ProfileTab::ALL, Some(ProfileTab::LiveEvents));
        let req = tabs.request(ProfileTab::PastSponsorships);
        assert!(tabs.is_active(ProfileTab::LiveEvents));

        assert!(tabs.complete(req));
        assert!(tabs.is_active(ProfileTab::PastSponsorships));
        assert_eq!(
            tabs.tabs().iter().filter(|t| tabs.is_active(**t)).count(),
            1
        );
    }

    #[test]
    fn test_superseded_fragment_is_dropped() {
        let mut tabs = TabSet::new(EventTab::ALL, Some(EventTab::Info));
        let first = tabs.request(EventTab::Sponsors);
        let second = tabs.request(EventTab::Info);

        assert!(!tabs.is_current(&first));
        assert!(!tabs.complete(first));
        assert!(tabs.complete(second));
        assert_eq!(tabs.active(), Some(EventTab::Info));
    }

    #[test]
    fn test_tab_endpoints() {
        assert_eq!(ProfileTab::LiveEvents.endpoint("8").path(), "/users/8/events/live");
        assert_eq!(ProfileTab::CurrentSponsorships.endpoint("8").path(), "/users/8/sponsorships/current");
        assert_eq!(EventTab::Sponsors.endpoint("3").path(), "/events/3/sponsors");
        assert_eq!(ProfileTab::PastEvents.dom_id(), "pastEvent");
    }
}

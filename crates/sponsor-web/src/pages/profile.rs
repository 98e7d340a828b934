//! User profile: live/past events and current/past sponsorships tabs

use sponsor_core::{ProfileTab, TabSet};

use super::tabs::{TabRegion, attach_tabs, initially_active};
use crate::app::Site;

const PROFILE_PAGE: &str = ".user-profile";
const TAB_LINK: &str = ".nav-link";

pub fn attach(site: &Site) {
    let Some(user_id) = super::owner_id(PROFILE_PAGE) else {
        return;
    };
    tracing::debug!(%user_id, "attaching profile tabs");

    attach_tabs(
        site,
        TabSet::new(ProfileTab::ALL, initially_active(&ProfileTab::ALL, TAB_LINK)),
        &user_id,
        TabRegion {
            panel: "#eventThumbnails",
            link: TAB_LINK,
        },
    );
}

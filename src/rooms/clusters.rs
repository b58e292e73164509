//! Room clusters and joint meetings
//!
//! A cluster is what the admin console shows as one entry: an auto-scaling
//! family with its rooms in index order, or a single manual room.

use std::collections::HashSet;

use serde::Serialize;

use super::RoomCollection;
use crate::models::{Room, RoomSummary, User};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomCluster {
    /// Token that joins the cluster: master code or room QR code
    pub join_token: String,
    pub label: String,
    pub is_auto: bool,
    pub rooms: Vec<RoomSummary>,
}

impl RoomCluster {
    pub fn total_members(&self) -> usize {
        self.rooms.iter().map(|room| room.participants).sum()
    }
}

/// Ad-hoc meeting over every member of a cluster; never stored in the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JointMeeting {
    pub title: String,
    pub host: User,
    pub participants: Vec<User>,
}

impl RoomCollection {
    /// Group rooms by family, keeping the order in which clusters first appear
    pub fn clusters(&self) -> Vec<RoomCluster> {
        let mut seen = HashSet::new();
        let mut clusters = Vec::new();

        for room in self {
            match room.master_qr_code() {
                Some(master) => {
                    if !seen.insert(master.to_string()) {
                        continue;
                    }
                    clusters.push(RoomCluster {
                        join_token: master.to_string(),
                        label: room.display_base().to_string(),
                        is_auto: true,
                        rooms: self.family(master).into_iter().map(RoomSummary::from).collect(),
                    });
                }
                None => clusters.push(RoomCluster {
                    join_token: room.qr_code(),
                    label: room.name.clone(),
                    is_auto: false,
                    rooms: vec![RoomSummary::from(room)],
                }),
            }
        }

        clusters
    }

    /// Gather the host and every member of the cluster behind `token`,
    /// de-duplicated by user id in first-seen order
    pub fn joint_meeting(&self, token: &str, host: &User) -> Option<JointMeeting> {
        let rooms: Vec<&Room> = if self.is_master_code(token) {
            self.family(token)
        } else {
            self.find_by_code(token).into_iter().collect()
        };

        let first = rooms.first()?;
        let title = format!("Joint meeting: {}", first.display_base());

        let mut seen = HashSet::new();
        let mut participants = Vec::new();
        for user in std::iter::once(host).chain(rooms.iter().flat_map(|room| room.participants())) {
            if seen.insert(user.id.as_str()) {
                participants.push(user.clone());
            }
        }

        Some(JointMeeting {
            title,
            host: host.clone(),
            participants,
        })
    }
}

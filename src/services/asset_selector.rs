//! Chooses the next photo and records it in the tracking log.
//!
//! Selection is split into a plan and a commit so the log only changes once
//! the original has been downloaded.

use std::cmp::Reverse;
use std::collections::HashSet;
use tokio::sync::{Mutex, MutexGuard};

use super::tracking_log::TrackingLog;
use crate::models::{Asset, ImageOrder};

/// The chosen asset and whether the log must be restarted first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPlan {
    pub asset: Asset,
    pub reset_log: bool,
}

/// Pick an asset from `assets` (album order).
///
/// - `Newest`: latest capture time, missing times sort last, ties keep album
///   order. The log is ignored.
/// - `Random`: first asset not yet delivered. When every asset has been
///   delivered the log is reset and the first asset of the album is used.
///
/// Returns `None` for an empty album.
pub fn plan_selection(
    order: ImageOrder,
    assets: &[Asset],
    delivered: &HashSet<String>,
) -> Option<SelectionPlan> {
    match order {
        ImageOrder::Newest => {
            let mut sorted: Vec<&Asset> = assets.iter().collect();
            sorted.sort_by_key(|a| Reverse(a.taken_at));
            sorted.first().map(|asset| SelectionPlan {
                asset: (*asset).clone(),
                reset_log: false,
            })
        }
        ImageOrder::Random => {
            if let Some(asset) = assets.iter().find(|a| !delivered.contains(&a.id)) {
                return Some(SelectionPlan {
                    asset: asset.clone(),
                    reset_log: false,
                });
            }
            assets.first().map(|asset| SelectionPlan {
                asset: asset.clone(),
                reset_log: true,
            })
        }
    }
}

/// Serialises plan and commit against the tracking log.
pub struct AssetSelector {
    log: Mutex<TrackingLog>,
}

/// Exclusive access to the tracking log for one selection.
pub struct SelectionGuard<'a> {
    log: MutexGuard<'a, TrackingLog>,
}

impl AssetSelector {
    pub fn new(log: TrackingLog) -> Self {
        Self {
            log: Mutex::new(log),
        }
    }

    /// Hold the log until the selection is committed or dropped.
    pub async fn begin(&self) -> SelectionGuard<'_> {
        SelectionGuard {
            log: self.log.lock().await,
        }
    }
}

impl SelectionGuard<'_> {
    pub fn plan(&self, order: ImageOrder, album: &str, assets: &[Asset]) -> Option<SelectionPlan> {
        let delivered = match order {
            ImageOrder::Random => self.log.delivered(album),
            ImageOrder::Newest => HashSet::new(),
        };
        plan_selection(order, assets, &delivered)
    }

    /// Reset if planned, then append the chosen id.
    pub fn commit(self, album: &str, plan: &SelectionPlan) {
        if plan.reset_log {
            tracing::info!(album = %album, "All photos shown, restarting rotation");
            self.log.reset(album);
        }
        self.log.append(album, &plan.asset.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn album() -> Vec<Asset> {
        vec![
            Asset::new("a", "/p/a.jpg").taken_at(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()),
            Asset::new("b", "/p/b.jpg"),
            Asset::new("c", "/p/c.jpg").taken_at(Utc.with_ymd_and_hms(2023, 5, 1, 0, 0, 0).unwrap()),
            Asset::new("d", "/p/d.jpg").taken_at(Utc.with_ymd_and_hms(2023, 5, 1, 0, 0, 0).unwrap()),
        ]
    }

    #[test]
    fn test_newest_picks_latest_capture() {
        let plan = plan_selection(ImageOrder::Newest, &album(), &HashSet::new()).unwrap();
        assert_eq!(plan.asset.id, "c", "ties keep album order");
        assert!(!plan.reset_log);
    }

    #[test]
    fn test_newest_ignores_log() {
        let delivered: HashSet<String> = ["c".to_string()].into();
        let plan = plan_selection(ImageOrder::Newest, &album(), &delivered).unwrap();
        assert_eq!(plan.asset.id, "c");
    }

    #[test]
    fn test_newest_missing_dates_sort_last() {
        let assets = vec![Asset::new("x", "x.jpg"), Asset::new("y", "y.jpg")];
        let plan = plan_selection(ImageOrder::Newest, &assets, &HashSet::new()).unwrap();
        assert_eq!(plan.asset.id, "x");
    }

    #[test]
    fn test_random_skips_delivered() {
        let delivered: HashSet<String> = ["a".to_string(), "b".to_string()].into();
        let plan = plan_selection(ImageOrder::Random, &album(), &delivered).unwrap();
        assert_eq!(plan.asset.id, "c");
        assert!(!plan.reset_log);
    }

    #[test]
    fn test_random_resets_when_exhausted() {
        let delivered: HashSet<String> = album().into_iter().map(|a| a.id).collect();
        let plan = plan_selection(ImageOrder::Random, &album(), &delivered).unwrap();
        assert_eq!(plan.asset.id, "a");
        assert!(plan.reset_log);
    }

    #[test]
    fn test_empty_album() {
        assert!(plan_selection(ImageOrder::Random, &[], &HashSet::new()).is_none());
        assert!(plan_selection(ImageOrder::Newest, &[], &HashSet::new()).is_none());
    }

    #[tokio::test]
    async fn test_rotation_through_three_assets() {
        let dir = tempfile::tempdir().unwrap();
        let selector = AssetSelector::new(TrackingLog::in_dir(dir.path()));
        let assets = vec![
            Asset::new("1", "1.jpg"),
            Asset::new("2", "2.jpg"),
            Asset::new("3", "3.jpg"),
        ];

        let mut picked = Vec::new();
        for _ in 0..3 {
            let guard = selector.begin().await;
            let plan = guard.plan(ImageOrder::Random, "Trip", &assets).unwrap();
            picked.push(plan.asset.id.clone());
            guard.commit("Trip", &plan);
        }
        assert_eq!(picked, ["1", "2", "3"]);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("tracking.txt")).unwrap(),
            "Trip\n1\n2\n3\n"
        );

        let guard = selector.begin().await;
        let plan = guard.plan(ImageOrder::Random, "Trip", &assets).unwrap();
        assert!(plan.reset_log);
        assert_eq!(plan.asset.id, "1");
        guard.commit("Trip", &plan);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("tracking.txt")).unwrap(),
            "Trip\n1\n"
        );
    }

    #[tokio::test]
    async fn test_uncommitted_plan_leaves_log_alone() {
        let dir = tempfile::tempdir().unwrap();
        let selector = AssetSelector::new(TrackingLog::in_dir(dir.path()));
        let assets = vec![Asset::new("1", "1.jpg")];
        {
            let guard = selector.begin().await;
            let plan = guard.plan(ImageOrder::Random, "Trip", &assets).unwrap();
            assert_eq!(plan.asset.id, "1");
        }
        let guard = selector.begin().await;
        let plan = guard.plan(ImageOrder::Random, "Trip", &assets).unwrap();
        assert_eq!(plan.asset.id, "1");
        assert!(!plan.reset_log);
    }
}

use chrono::{DateTime, NaiveDate, Utc};

use super::project::Project;

/// Default look-ahead for the "upcoming deadlines" counter.
pub const DEFAULT_UPCOMING_WINDOW_DAYS: i64 = 7;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Headline counters shown above the project list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub active: usize,
    pub completed: usize,
    /// Active projects due within the window, overdue ones included.
    pub upcoming_deadlines: usize,
}

impl DashboardStats {
    pub fn compute(projects: &[Project], now: DateTime<Utc>, window_days: i64) -> Self {
        let mut stats = Self::default();
        for project in projects {
            if project.is_active() {
                stats.active += 1;
                if days_until(project.deadline, now) <= window_days {
                    stats.upcoming_deadlines += 1;
                }
            } else {
                stats.completed += 1;
            }
        }
        stats
    }
}

/// Whole days from `now` to the start of `deadline` (UTC), rounded up.
/// Negative once the deadline has passed.
pub fn days_until(deadline: NaiveDate, now: DateTime<Utc>) -> i64 {
    let due = deadline.and_time(chrono::NaiveTime::MIN).and_utc();
    let millis = (due - now).num_milliseconds();
    millis.div_euclid(MILLIS_PER_DAY) + i64::from(millis.rem_euclid(MILLIS_PER_DAY) != 0)
}

/// Active-project progress counted in four ranges for the chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressDistribution {
    buckets: [u32; 4],
}

impl ProgressDistribution {
    /// Inclusive upper bound of each bucket.
    pub const THRESHOLDS: [u8; 4] = [25, 50, 75, 100];
    pub const LABELS: [&'static str; 4] = ["0-25%", "26-50%", "51-75%", "76-100%"];

    /// Completed projects are left out even though they sit at 100.
    pub fn compute(projects: &[Project]) -> Self {
        let mut buckets = [0u32; 4];
        for project in projects.iter().filter(|p| p.is_active()) {
            buckets[Self::bucket_of(project.progress)] += 1;
        }
        Self { buckets }
    }

    /// Index of the first bucket whose threshold is at least `progress`.
    pub fn bucket_of(progress: u8) -> usize {
        Self::THRESHOLDS
            .iter()
            .position(|&t| progress <= t)
            .unwrap_or(Self::THRESHOLDS.len() - 1)
    }

    pub fn buckets(&self) -> [u32; 4] {
        self.buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::project::{ProjectId, ProjectKind, ProjectStatus};
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2025-04-10T15:30:00Z".parse().unwrap()
    }

    fn project(progress: u8, status: ProjectStatus, deadline: NaiveDate) -> Project {
        Project {
            id: ProjectId::generate(),
            name: "P".into(),
            description: String::new(),
            deadline,
            kind: ProjectKind::Other,
            status,
            progress,
            created_at: now(),
        }
    }

    fn today() -> NaiveDate {
        now().date_naive()
    }

    #[test]
    fn bucket_boundaries_belong_to_lower_bucket() {
        assert_eq!(ProgressDistribution::bucket_of(0), 0);
        assert_eq!(ProgressDistribution::bucket_of(25), 0);
        assert_eq!(ProgressDistribution::bucket_of(26), 1);
        assert_eq!(ProgressDistribution::bucket_of(50), 1);
        assert_eq!(ProgressDistribution::bucket_of(51), 2);
        assert_eq!(ProgressDistribution::bucket_of(75), 2);
        assert_eq!(ProgressDistribution::bucket_of(76), 3);
        assert_eq!(ProgressDistribution::bucket_of(100), 3);
    }

    #[test]
    fn mixed_collection_scenario() {
        let projects = vec![
            project(20, ProjectStatus::Active, today()),
            project(60, ProjectStatus::Active, today()),
            project(100, ProjectStatus::Completed, today()),
        ];

        let dist = ProgressDistribution::compute(&projects);
        assert_eq!(dist.buckets(), [1, 0, 1, 0]);

        let stats = DashboardStats::compute(&projects, now(), DEFAULT_UPCOMING_WINDOW_DAYS);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.completed, 1);
    }

    #[test]
    fn completed_projects_are_not_bucketed() {
        let projects = vec![
            project(100, ProjectStatus::Completed, today()),
            project(100, ProjectStatus::Active, today()),
        ];
        assert_eq!(ProgressDistribution::compute(&projects).buckets(), [0, 0, 0, 1]);
    }

    #[test]
    fn upcoming_counts_near_and_overdue_active_projects() {
        let projects = vec![
            project(0, ProjectStatus::Active, today() + Duration::days(3)),
            project(0, ProjectStatus::Active, today() + Duration::days(10)),
            project(0, ProjectStatus::Active, today() - Duration::days(3)),
            project(100, ProjectStatus::Completed, today() + Duration::days(1)),
        ];
        let stats = DashboardStats::compute(&projects, now(), DEFAULT_UPCOMING_WINDOW_DAYS);
        assert_eq!(stats.upcoming_deadlines, 2);
    }

    #[test]
    fn days_until_rounds_up_partial_days() {
        // 15:30 today to midnight in 8 days is 7 days and 8.5 hours.
        assert_eq!(days_until(today() + Duration::days(8), now()), 8);
        assert_eq!(days_until(today() + Duration::days(7), now()), 7);
        assert_eq!(days_until(today(), now()), 0);
        assert_eq!(days_until(today() - Duration::days(1), now()), -1);

        let midnight: DateTime<Utc> = "2025-04-10T00:00:00Z".parse().unwrap();
        assert_eq!(days_until(today() + Duration::days(7), midnight), 7);
    }
}

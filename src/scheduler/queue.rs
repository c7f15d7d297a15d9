//! Work-center queue selection.

use crate::models::{Job, WorkCenter};

/// Selects the jobs queued at `work_center`, ordered by priority.
///
/// Returns `None` when there is nothing to schedule: the target is a
/// sentinel center, the input is empty, or no job is assigned to it.
/// Ties keep their input order.
pub fn build_queue(jobs: &[Job], work_center: WorkCenter) -> Option<Vec<Job>> {
    if work_center.is_sentinel() || jobs.is_empty() {
        return None;
    }

    let mut queue: Vec<Job> = jobs
        .iter()
        .filter(|job| job.work_center == work_center)
        .cloned()
        .collect();
    if queue.is_empty() {
        return None;
    }

    queue.sort_by_key(|job| job.priority);
    Some(queue)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: &str, center: WorkCenter, priority: i32) -> Job {
        Job::new(id).with_work_center(center).with_priority(priority)
    }

    fn ids(queue: &[Job]) -> Vec<&str> {
        queue.iter().map(|j| j.id.as_str()).collect()
    }

    #[test]
    fn test_filters_and_sorts() {
        let jobs = vec![
            job("a", WorkCenter::Q, 3),
            job("b", WorkCenter::R, 1),
            job("c", WorkCenter::Q, 1),
            job("d", WorkCenter::Q, 2),
        ];
        let queue = build_queue(&jobs, WorkCenter::Q).unwrap();
        assert_eq!(ids(&queue), vec!["c", "d", "a"]);
    }

    #[test]
    fn test_ties_are_stable() {
        let jobs = vec![
            job("first", WorkCenter::H, 5),
            job("second", WorkCenter::H, 5),
            job("zero", WorkCenter::H, 0),
            job("third", WorkCenter::H, 5),
        ];
        let queue = build_queue(&jobs, WorkCenter::H).unwrap();
        assert_eq!(ids(&queue), vec!["zero", "first", "second", "third"]);
    }

    #[test]
    fn test_sentinel_target_is_nothing_to_schedule() {
        let jobs = vec![job("a", WorkCenter::Unassigned, 1)];
        assert!(build_queue(&jobs, WorkCenter::Unassigned).is_none());
        assert!(build_queue(&jobs, WorkCenter::ReadyForInspection).is_none());
    }

    #[test]
    fn test_empty_input_and_no_match() {
        assert!(build_queue(&[], WorkCenter::Q).is_none());
        let jobs = vec![
            job("a", WorkCenter::Unassigned, 1),
            job("b", WorkCenter::ReadyForInspection, 2),
        ];
        assert!(build_queue(&jobs, WorkCenter::Q).is_none());
    }

    #[test]
    fn test_input_untouched() {
        let jobs = vec![job("a", WorkCenter::Q, 2), job("b", WorkCenter::Q, 1)];
        let _ = build_queue(&jobs, WorkCenter::Q);
        assert_eq!(ids(&jobs), vec!["a", "b"]);
    }
}

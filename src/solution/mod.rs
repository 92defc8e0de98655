//! The mutable per-run value type the evolutionary search operates over: a
//! day and starting timeslot per class group, materialized into concrete
//! class sessions, plus a cached cost.

use crate::error::{Result, SchedulerError};
use crate::preprocessor::PreprocessResult;
use crate::types::{ClassSession, SchedulerConfig};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Solution {
    pub class_groups: Vec<u64>,
    sessions: HashMap<u64, Vec<ClassSession>>,
    next_session_id: u64,
    cost: f64,
}

impl Solution {
    /// Builds an empty solution (every session's day/timeslot left at the
    /// preprocessor's -1 sentinel) from a preprocessing pass.
    pub fn new(result: &PreprocessResult) -> Solution {
        Solution {
            class_groups: result.class_groups.iter().map(|g| g.id).collect(),
            sessions: result.sessions.clone(),
            next_session_id: result.next_session_id,
            cost: f64::INFINITY,
        }
    }

    pub fn sessions(&self) -> impl Iterator<Item = &ClassSession> {
        self.sessions.values().flatten()
    }

    pub fn sessions_of(&self, group: u64) -> Option<&[ClassSession]> {
        self.sessions.get(&group).map(|v| v.as_slice())
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn set_cost(&mut self, cost: f64) {
        self.cost = cost;
    }

    pub fn get_class_day(&self, group: u64) -> Result<i64> {
        self.sessions
            .get(&group)
            .and_then(|s| s.first())
            .map(|s| s.day)
            .ok_or_else(|| SchedulerError::UnknownClassGroup(group).into())
    }

    pub fn get_class_starting_timeslot(&self, group: u64) -> Result<i64> {
        self.sessions
            .get(&group)
            .and_then(|s| s.first())
            .map(|s| s.timeslot)
            .ok_or_else(|| SchedulerError::UnknownClassGroup(group).into())
    }

    /// Sets day and consecutive starting timeslot for every session in
    /// `group`, reconciling the session count with the target day's
    /// multiplicity first (see module docs on double-timeslot days).
    pub fn update_day_and_timeslot(
        &mut self,
        group: u64,
        new_day: u32,
        new_start_timeslot: u32,
        config: &SchedulerConfig,
    ) -> Result<()> {
        let next_session_id = self.next_session_id;
        let sessions = self
            .sessions
            .get_mut(&group)
            .ok_or(SchedulerError::UnknownClassGroup(group))?;

        let prev_day = sessions.first().map(|s| s.day).unwrap_or(-1);
        let prev_is_double = prev_day >= 0 && config.is_double_timeslot_day(prev_day as u32);
        let new_is_double = config.is_double_timeslot_day(new_day);

        let mut minted = 0u64;
        if new_is_double && !prev_is_double {
            let base_count = sessions.len();
            let mut appended = Vec::with_capacity(base_count);
            for base in sessions.iter() {
                let mut extra = base.clone();
                extra.session_id = next_session_id + minted;
                minted += 1;
                extra.timeslot = base.timeslot + base_count as i64;
                appended.push(extra);
            }
            sessions.extend(appended);
        } else if !new_is_double && prev_is_double {
            sessions.sort_by_key(|s| s.timeslot);
            let keep = sessions.len() / 2;
            sessions.truncate(keep);
        }

        for (i, session) in sessions.iter_mut().enumerate() {
            session.day = new_day as i64;
            session.timeslot = new_start_timeslot as i64 + i as i64;
        }

        self.next_session_id += minted;
        Ok(())
    }

    pub fn change_class_day(&mut self, group: u64, day: u32) -> Result<()> {
        let sessions = self
            .sessions
            .get_mut(&group)
            .ok_or(SchedulerError::UnknownClassGroup(group))?;
        for session in sessions {
            session.day = day as i64;
        }
        Ok(())
    }

    pub fn change_class_timeslot(&mut self, group: u64, start_timeslot: u32) -> Result<()> {
        let sessions = self
            .sessions
            .get_mut(&group)
            .ok_or(SchedulerError::UnknownClassGroup(group))?;
        for (i, session) in sessions.iter_mut().enumerate() {
            session.timeslot = start_timeslot as i64 + i as i64;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{class_group_id, ClassGroup, CourseId};

    fn fixture(num_timeslots: u32) -> PreprocessResult {
        let group_id = class_group_id("c1", 0);
        let sessions = (0..num_timeslots)
            .map(|i| ClassSession {
                session_id: i as u64,
                class_group: group_id,
                course: CourseId("c1".into()),
                teacher: None,
                room: None,
                day: -1,
                timeslot: -1,
            })
            .collect();
        let mut map = HashMap::new();
        map.insert(group_id, sessions);
        PreprocessResult {
            class_groups: vec![ClassGroup {
                id: group_id,
                course: CourseId("c1".into()),
                num_timeslots,
                teacher: None,
            }],
            sessions: map,
            conflicts: HashMap::new(),
            next_session_id: num_timeslots as u64,
        }
    }

    #[test]
    fn update_then_read_round_trips() {
        let result = fixture(3);
        let group = result.class_groups[0].id;
        let config = SchedulerConfig::for_test();
        let mut solution = Solution::new(&result);

        solution.update_day_and_timeslot(group, 3, 5, &config).unwrap();

        assert_eq!(solution.get_class_day(group).unwrap(), 3);
        assert_eq!(solution.get_class_starting_timeslot(group).unwrap(), 5);
        let sessions = solution.sessions_of(group).unwrap();
        assert_eq!(sessions.len(), 3);
        let mut timeslots: Vec<i64> = sessions.iter().map(|s| s.timeslot).collect();
        timeslots.sort();
        assert_eq!(timeslots, vec![5, 6, 7]);
    }

    #[test]
    fn entering_double_timeslot_day_doubles_session_count() {
        let result = fixture(3);
        let group = result.class_groups[0].id;
        let config = SchedulerConfig::for_test();
        let mut solution = Solution::new(&result);

        solution.update_day_and_timeslot(group, 0, 2, &config).unwrap();
        assert_eq!(solution.sessions_of(group).unwrap().len(), 3);

        solution.update_day_and_timeslot(group, 1, 2, &config).unwrap();
        assert_eq!(solution.sessions_of(group).unwrap().len(), 6);
    }

    #[test]
    fn leaving_double_timeslot_day_restores_original_count() {
        let result = fixture(3);
        let group = result.class_groups[0].id;
        let config = SchedulerConfig::for_test();
        let mut solution = Solution::new(&result);

        solution.update_day_and_timeslot(group, 1, 2, &config).unwrap();
        assert_eq!(solution.sessions_of(group).unwrap().len(), 6);

        solution.update_day_and_timeslot(group, 2, 2, &config).unwrap();
        assert_eq!(solution.sessions_of(group).unwrap().len(), 3);
    }

    #[test]
    fn clone_is_an_independent_deep_copy() {
        let result = fixture(3);
        let group = result.class_groups[0].id;
        let config = SchedulerConfig::for_test();
        let mut solution = Solution::new(&result);
        solution.update_day_and_timeslot(group, 2, 1, &config).unwrap();
        solution.set_cost(42.0);

        let mut clone = solution.clone();
        assert_eq!(clone.cost(), 42.0);
        clone.update_day_and_timeslot(group, 4, 1, &config).unwrap();

        assert_eq!(solution.get_class_day(group).unwrap(), 2);
        assert_eq!(clone.get_class_day(group).unwrap(), 4);
    }
}

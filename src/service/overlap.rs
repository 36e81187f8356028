use crate::models::event::CalendarEvent;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverlapGroup {
    pub members: Vec<usize>,
}

impl OverlapGroup {
    fn single(index: usize) -> Self {
        Self {
            members: vec![index],
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn touches(&self, events: &[CalendarEvent], candidate: &CalendarEvent) -> bool {
        self.members
            .iter()
            .any(|&member| events[member].overlaps(candidate))
    }

    fn touches_group(&self, events: &[CalendarEvent], other: &OverlapGroup) -> bool {
        self.members
            .iter()
            .any(|&member| other.touches(events, &events[member]))
    }
}

pub fn sort_by_start(events: &[CalendarEvent]) -> Vec<CalendarEvent> {
    let mut sorted = events.to_vec();
    sorted.sort_by_key(|event| event.start);
    sorted
}

/// Greedy grouping over `events`, normally sorted by start. Each event joins
/// the first group it overlaps; after every insertion the groups are merged
/// pairwise, so the result is a partition into connected groups for any
/// input order.
pub fn group_overlapping(events: &[CalendarEvent]) -> Vec<OverlapGroup> {
    let mut groups: Vec<OverlapGroup> = Vec::new();

    for (index, event) in events.iter().enumerate() {
        match groups.iter_mut().find(|group| group.touches(events, event)) {
            Some(group) => group.members.push(index),
            None => groups.push(OverlapGroup::single(index)),
        }
        merge_pass(events, &mut groups);
    }

    groups
}

fn merge_pass(events: &[CalendarEvent], groups: &mut Vec<OverlapGroup>) {
    let mut i = groups.len();
    while i > 1 {
        i -= 1;
        for j in (0..i).rev() {
            if groups[i].touches_group(events, &groups[j]) {
                let absorbed = groups.remove(i);
                groups[j].members.extend(absorbed.members);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::collections::HashSet;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn next_midnight() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 3)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn event(start: (u32, u32), end: (u32, u32)) -> CalendarEvent {
        CalendarEvent::new(at(start.0, start.1), at(end.0, end.1))
    }

    fn assert_partition(groups: &[OverlapGroup], count: usize) {
        let mut seen = HashSet::new();
        for group in groups {
            for member in &group.members {
                assert!(seen.insert(*member), "event {} in two groups", member);
            }
        }
        assert_eq!(seen.len(), count);
    }

    #[test]
    fn chain_collapses_into_one_group() {
        let events = vec![
            event((9, 0), (10, 0)),
            event((9, 30), (11, 0)),
            event((10, 30), (12, 0)),
        ];
        let groups = group_overlapping(&events);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members, vec![0, 1, 2]);
    }

    #[test]
    fn touching_events_stay_apart() {
        let events = vec![event((9, 0), (10, 0)), event((10, 0), (11, 0))];
        let groups = group_overlapping(&events);
        assert_eq!(groups.len(), 2);
        assert_partition(&groups, 2);
    }

    #[test]
    fn bridging_event_merges_earlier_groups() {
        // A long event arriving last links two groups created independently.
        let events = vec![
            event((9, 0), (10, 0)),
            event((11, 0), (12, 0)),
            event((8, 0), (13, 0)),
        ];
        let groups = group_overlapping(&events);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members, vec![0, 2, 1]);
        assert_partition(&groups, 3);
    }

    #[test]
    fn separate_clusters_form_separate_groups() {
        let events = vec![
            event((8, 0), (9, 0)),
            event((8, 30), (9, 30)),
            event((9, 45), (11, 0)),
            event((10, 0), (10, 30)),
            event((12, 0), (13, 0)),
        ];
        let groups = group_overlapping(&events);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].members, vec![0, 1]);
        assert_eq!(groups[1].members, vec![2, 3]);
        assert_eq!(groups[2].members, vec![4]);
        assert_partition(&groups, 5);
    }

    #[test]
    fn midnight_end_overlaps_late_evening_event() {
        let events = vec![
            CalendarEvent::new(at(22, 0), next_midnight()),
            event((23, 0), (23, 30)),
        ];
        let groups = group_overlapping(&events);
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn sort_is_stable_for_equal_starts() {
        let mut first = event((9, 0), (10, 0));
        first.id = Some(1);
        let mut second = event((9, 0), (11, 0));
        second.id = Some(2);
        let mut earlier = event((8, 0), (8, 30));
        earlier.id = Some(3);
        let sorted = sort_by_start(&[first, second, earlier]);
        let ids: Vec<_> = sorted.iter().map(|event| event.id).collect();
        assert_eq!(ids, vec![Some(3), Some(1), Some(2)]);
    }

    #[test]
    fn empty_day_has_no_groups() {
        assert!(group_overlapping(&[]).is_empty());
    }

    #[test]
    fn partition_holds_for_dense_day() {
        let mut events = Vec::new();
        for hour in 0..20 {
            events.push(event((hour, 0), (hour + 1, 30)));
            events.push(event((hour, 15), (hour, 45)));
        }
        let events = sort_by_start(&events);
        let groups = group_overlapping(&events);
        assert_partition(&groups, events.len());
        for (a, group_a) in groups.iter().enumerate() {
            for group_b in groups.iter().skip(a + 1) {
                for &x in &group_a.members {
                    for &y in &group_b.members {
                        assert!(!events[x].overlaps(&events[y]));
                    }
                }
            }
        }
    }
}

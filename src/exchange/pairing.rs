//! Gift pairing
//!
//! The eligible participants are shuffled and arranged in one ring: position
//! `i` gifts position `(i + 1) % n`. Every participant gives once, receives
//! once and never draws themselves. The result is always a single cycle, so
//! for four or more people two disjoint pairs swapping gifts never happen.

use futures_util::future::join_all;
use rand::seq::SliceRandom;
use rand::Rng;

use super::notifier::{DeliveryError, Notice, Notifier};
use super::participant::{ParticipantId, ParticipantRecord};
use crate::core::error::{AppError, AppResult};

/// Minimum number of eligible participants for a draw.
pub const MIN_PARTICIPANTS: usize = 2;

/// One "who gifts whom" pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub giver: ParticipantId,
    pub receiver: ParticipantId,
    pub receiver_record: ParticipantRecord,
}

impl Assignment {
    pub fn notice(&self) -> Notice {
        Notice::Assignment {
            receiver_name: self.receiver_record.name.clone(),
            receiver_wish: self.receiver_record.wish.clone(),
        }
    }
}

/// Outcome of notifying every giver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawReport {
    pub assignments: usize,
    pub delivered: usize,
    pub failures: Vec<DeliveryError>,
}

/// Shuffles `eligible` and pairs every participant with the next one in the ring.
///
/// # Errors
/// `AppError::InsufficientParticipants` when fewer than two are eligible.
pub fn draw<R: Rng + ?Sized>(
    mut eligible: Vec<(ParticipantId, ParticipantRecord)>,
    rng: &mut R,
) -> AppResult<Vec<Assignment>> {
    let n = eligible.len();
    if n < MIN_PARTICIPANTS {
        return Err(AppError::InsufficientParticipants { eligible: n });
    }

    eligible.shuffle(rng);

    let assignments = (0..n)
        .map(|i| {
            let (giver, _) = &eligible[i];
            let (receiver, receiver_record) = &eligible[(i + 1) % n];
            Assignment {
                giver: *giver,
                receiver: *receiver,
                receiver_record: receiver_record.clone(),
            }
        })
        .collect();

    Ok(assignments)
}

/// Notifies every giver. A failed delivery is logged and collected; the rest
/// are still attempted. Nothing is retried.
pub async fn deliver_assignments(notifier: &dyn Notifier, assignments: &[Assignment]) -> DrawReport {
    let results = join_all(assignments.iter().map(|assignment| async move {
        let notice = assignment.notice();
        notifier.notify(assignment.giver, &notice).await
    }))
    .await;

    let mut report = DrawReport {
        assignments: assignments.len(),
        ..Default::default()
    };

    for result in results {
        match result {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                log::warn!("Could not send assignment to {}: {}", e.target, e.reason);
                report.failures.push(e);
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingNotifier;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashMap, HashSet};

    fn participants(names: &[&str]) -> Vec<(ParticipantId, ParticipantRecord)> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                (
                    ParticipantId(i as u64 + 1),
                    ParticipantRecord {
                        name: name.to_string(),
                        handle: String::new(),
                        phone: format!("+7123456{}", i),
                        wish: format!("gift for {}", name),
                    },
                )
            })
            .collect()
    }

    fn assert_single_cycle(assignments: &[Assignment], n: usize) {
        assert_eq!(assignments.len(), n);

        let givers: HashSet<_> = assignments.iter().map(|a| a.giver).collect();
        let receivers: HashSet<_> = assignments.iter().map(|a| a.receiver).collect();
        assert_eq!(givers.len(), n, "everyone gives exactly once");
        assert_eq!(receivers.len(), n, "everyone receives exactly once");
        assert!(assignments.iter().all(|a| a.giver != a.receiver));

        let next: HashMap<_, _> = assignments.iter().map(|a| (a.giver, a.receiver)).collect();
        let start = assignments[0].giver;
        let mut current = start;
        let mut steps = 0;
        loop {
            current = next[&current];
            steps += 1;
            if current == start {
                break;
            }
        }
        assert_eq!(steps, n, "the pairing is one ring over all participants");
    }

    #[test]
    fn test_three_participants_over_many_seeds() {
        for seed in 0..500 {
            let mut rng = StdRng::seed_from_u64(seed);
            let assignments = draw(participants(&["A", "B", "C"]), &mut rng).unwrap();
            assert_single_cycle(&assignments, 3);
        }
    }

    #[test]
    fn test_receiver_record_matches_receiver() {
        let mut rng = StdRng::seed_from_u64(7);
        let input = participants(&["Ann", "Ben", "Cid", "Dee"]);
        let by_id: HashMap<_, _> = input.iter().cloned().collect();

        for assignment in draw(input, &mut rng).unwrap() {
            assert_eq!(assignment.receiver_record, by_id[&assignment.receiver]);
        }
    }

    #[test]
    fn test_four_participants_never_split_into_pairs() {
        for seed in 0..500 {
            let mut rng = StdRng::seed_from_u64(seed);
            let assignments = draw(participants(&["A", "B", "C", "D"]), &mut rng).unwrap();
            assert_single_cycle(&assignments, 4);
        }
    }

    #[test]
    fn test_two_participants_swap() {
        let mut rng = StdRng::seed_from_u64(1);
        let assignments = draw(participants(&["Ann", "Ben"]), &mut rng).unwrap();
        assert_eq!(assignments.len(), 2);
        assert_eq!(assignments[0].giver, assignments[1].receiver);
        assert_eq!(assignments[1].giver, assignments[0].receiver);
    }

    #[test]
    fn test_every_ring_order_shows_up() {
        // 3 participants form one of two rings; a fair shuffle yields both
        let mut seen = HashSet::new();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let assignments = draw(participants(&["A", "B", "C"]), &mut rng).unwrap();
            let next_of_first = assignments
                .iter()
                .find(|a| a.giver == ParticipantId(1))
                .map(|a| a.receiver)
                .unwrap();
            seen.insert(next_of_first);
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_too_few_participants() {
        let mut rng = StdRng::seed_from_u64(0);
        for names in [&[][..], &["Solo"][..]] {
            let err = draw(participants(names), &mut rng).unwrap_err();
            assert!(matches!(err, AppError::InsufficientParticipants { eligible } if eligible == names.len()));
        }
    }

    #[tokio::test]
    async fn test_delivery_failure_does_not_stop_fan_out() {
        let mut rng = StdRng::seed_from_u64(3);
        let assignments = draw(participants(&["Ann", "Ben", "Cid"]), &mut rng).unwrap();

        let notifier = RecordingNotifier::new();
        notifier.fail_for(ParticipantId(2));

        let report = deliver_assignments(&notifier, &assignments).await;
        assert_eq!(report.assignments, 3);
        assert_eq!(report.delivered, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].target, ParticipantId(2));

        assert!(notifier.sent_to(ParticipantId(2)).is_empty());
        assert_eq!(notifier.sent_to(ParticipantId(1)).len(), 1);
        assert_eq!(notifier.sent_to(ParticipantId(3)).len(), 1);
    }
}

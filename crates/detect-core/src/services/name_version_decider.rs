//! Reconciles detector candidates into one project name/version decision.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{DetectorProjectInfo, DetectorType, NameVersionDecision};

/// Ranks detector candidates by depth and detector preference.
///
/// - With a preferred detector type: only that type counts, and exactly one
///   candidate must sit at its lowest depth.
/// - Without one: among the lowest-depth candidates, detector types that
///   appear exactly once are unique. One unique candidate wins outright.
///   With several, one is picked from every lowest-depth candidate except
///   GIT, ordered by name and version.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectNameVersionDecider;

impl ProjectNameVersionDecider {
    pub const fn new() -> Self {
        Self
    }

    pub fn decide(
        &self,
        candidates: &[DetectorProjectInfo],
        preferred: Option<DetectorType>,
    ) -> NameVersionDecision {
        let decision = match preferred {
            Some(detector_type) => Self::decide_preferred(candidates, detector_type),
            None => Self::decide_unique(candidates),
        };
        debug!("{}", decision.describe());
        decision
    }

    fn decide_preferred(
        candidates: &[DetectorProjectInfo],
        detector_type: DetectorType,
    ) -> NameVersionDecision {
        let preferred: Vec<&DetectorProjectInfo> = candidates
            .iter()
            .filter(|info| info.detector_type == detector_type)
            .collect();
        let mut lowest = at_lowest_depth(&preferred);

        match lowest.len() {
            0 => NameVersionDecision::PreferredDetectorNotFound { detector_type },
            1 => NameVersionDecision::PreferredDetector(lowest.remove(0).clone()),
            _ => NameVersionDecision::TooManyPreferredDetectorTypesFound { detector_type },
        }
    }

    fn decide_unique(candidates: &[DetectorProjectInfo]) -> NameVersionDecision {
        let all: Vec<&DetectorProjectInfo> = candidates.iter().collect();
        let lowest = at_lowest_depth(&all);

        let mut counts: HashMap<DetectorType, usize> = HashMap::new();
        for info in &lowest {
            *counts.entry(info.detector_type).or_default() += 1;
        }

        let mut unique: Vec<&DetectorProjectInfo> = lowest
            .iter()
            .copied()
            .filter(|info| counts.get(&info.detector_type) == Some(&1))
            .collect();

        match unique.len() {
            0 => NameVersionDecision::UniqueDetectorNotFound,
            1 => NameVersionDecision::UniqueDetector(unique.remove(0).clone()),
            _ => Self::decide_arbitrarily(lowest),
        }
    }

    fn decide_arbitrarily(lowest: Vec<&DetectorProjectInfo>) -> NameVersionDecision {
        // GIT never supplies an arbitrary choice.
        let mut options: Vec<&DetectorProjectInfo> = lowest
            .into_iter()
            .filter(|info| info.detector_type != DetectorType::Git)
            .collect();
        options.sort_by(|a, b| {
            a.name_version
                .cmp(&b.name_version)
                .then_with(|| a.detector_type.cmp(&b.detector_type))
        });

        let mut iter = options.into_iter().cloned();
        match iter.next() {
            Some(chosen) => NameVersionDecision::Arbitrary {
                chosen,
                other_choices: iter.collect(),
            },
            None => NameVersionDecision::UniqueDetectorNotFound,
        }
    }
}

fn at_lowest_depth<'a>(candidates: &[&'a DetectorProjectInfo]) -> Vec<&'a DetectorProjectInfo> {
    let Some(lowest) = candidates.iter().map(|info| info.depth).min() else {
        return Vec::new();
    };
    candidates
        .iter()
        .copied()
        .filter(|info| info.depth == lowest)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NameVersion;

    fn info(detector_type: DetectorType, depth: u32, name: &str) -> DetectorProjectInfo {
        DetectorProjectInfo::new(detector_type, depth, NameVersion::new(name, "1.0"))
    }

    #[test]
    fn test_preferred_detector_at_lowest_depth_wins() {
        let candidates = vec![
            info(DetectorType::Maven, 0, "root"),
            info(DetectorType::Npm, 2, "deep-npm"),
            info(DetectorType::Npm, 1, "shallow-npm"),
        ];
        let decision =
            ProjectNameVersionDecider::new().decide(&candidates, Some(DetectorType::Npm));
        assert_eq!(
            decision,
            NameVersionDecision::PreferredDetector(info(DetectorType::Npm, 1, "shallow-npm"))
        );
    }

    #[test]
    fn test_preferred_detector_not_found() {
        let candidates = vec![info(DetectorType::Maven, 0, "root")];
        let decision =
            ProjectNameVersionDecider::new().decide(&candidates, Some(DetectorType::Gradle));
        assert_eq!(
            decision,
            NameVersionDecision::PreferredDetectorNotFound {
                detector_type: DetectorType::Gradle
            }
        );
    }

    #[test]
    fn test_too_many_preferred() {
        let candidates = vec![
            info(DetectorType::Gradle, 1, "a"),
            info(DetectorType::Gradle, 1, "b"),
            info(DetectorType::Gradle, 2, "c"),
        ];
        let decision =
            ProjectNameVersionDecider::new().decide(&candidates, Some(DetectorType::Gradle));
        assert!(matches!(
            decision,
            NameVersionDecision::TooManyPreferredDetectorTypesFound { .. }
        ));
    }

    #[test]
    fn test_unique_detector_at_lowest_depth() {
        let candidates = vec![
            info(DetectorType::Maven, 0, "root"),
            info(DetectorType::Npm, 1, "ui"),
            info(DetectorType::Npm, 1, "api"),
        ];
        let decision = ProjectNameVersionDecider::new().decide(&candidates, None);
        assert_eq!(
            decision,
            NameVersionDecision::UniqueDetector(info(DetectorType::Maven, 0, "root"))
        );
    }

    #[test]
    fn test_duplicate_types_at_lowest_depth_are_not_unique() {
        let candidates = vec![
            info(DetectorType::Npm, 0, "ui"),
            info(DetectorType::Npm, 0, "api"),
        ];
        let decision = ProjectNameVersionDecider::new().decide(&candidates, None);
        assert_eq!(decision, NameVersionDecision::UniqueDetectorNotFound);
    }

    #[test]
    fn test_no_candidates() {
        let decider = ProjectNameVersionDecider::new();
        assert_eq!(
            decider.decide(&[], None),
            NameVersionDecision::UniqueDetectorNotFound
        );
        assert!(matches!(
            decider.decide(&[], Some(DetectorType::Pip)),
            NameVersionDecision::PreferredDetectorNotFound { .. }
        ));
    }

    #[test]
    fn test_arbitrary_excludes_git_and_orders_by_name() {
        let candidates = vec![
            info(DetectorType::Git, 0, "aaa-repo"),
            info(DetectorType::Pip, 0, "zeta"),
            info(DetectorType::Maven, 0, "beta"),
        ];
        let decision = ProjectNameVersionDecider::new().decide(&candidates, None);
        match decision {
            NameVersionDecision::Arbitrary {
                chosen,
                other_choices,
            } => {
                assert_eq!(chosen, info(DetectorType::Maven, 0, "beta"));
                assert_eq!(other_choices, vec![info(DetectorType::Pip, 0, "zeta")]);
            }
            other => panic!("expected arbitrary decision, got {other:?}"),
        }
    }

    #[test]
    fn test_arbitrary_draws_from_every_lowest_depth_candidate() {
        let candidates = vec![
            info(DetectorType::Npm, 0, "aaa-ui"),
            info(DetectorType::Npm, 0, "bbb-api"),
            info(DetectorType::Maven, 0, "ccc"),
            info(DetectorType::Pip, 0, "ddd"),
            info(DetectorType::Gradle, 1, "000-nested"),
        ];
        let decision = ProjectNameVersionDecider::new().decide(&candidates, None);
        match decision {
            NameVersionDecision::Arbitrary {
                chosen,
                other_choices,
            } => {
                assert_eq!(chosen, info(DetectorType::Npm, 0, "aaa-ui"));
                assert_eq!(other_choices.len(), 3);
            }
            other => panic!("expected arbitrary decision, got {other:?}"),
        }
    }

    #[test]
    fn test_decision_is_order_independent() {
        let mut candidates = vec![
            info(DetectorType::Pip, 0, "zeta"),
            info(DetectorType::Maven, 0, "beta"),
        ];
        let decider = ProjectNameVersionDecider::new();
        let first = decider.decide(&candidates, None);
        candidates.reverse();
        let second = decider.decide(&candidates, None);
        assert_eq!(
            first.chosen_name_version(),
            second.chosen_name_version()
        );
    }
}
